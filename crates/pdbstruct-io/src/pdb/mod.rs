//! PDB file format parser and writer
//!
//! Reading tolerates overflowed serial and residue columns, merges alternate
//! locations into their primary atom and turns MODEL/ENDMDL ensembles into
//! coordinate frames over one topology. Writing renumbers and filters
//! alternates according to [`WriteOptions`].

mod altloc;
mod frames;
pub mod hybrid36;
mod metadata;
mod numbering;
mod parser;
mod records;
mod writer;

pub use parser::PdbReader;
pub use records::{
    decode_number, infer_element_from_name, parse_pdb_charge, NumberField, RecordType,
    RESNUM_WIDTH, SERIAL_WIDTH,
};
pub use writer::PdbWriter;

use std::io::{Read, Write};
use std::path::Path;

use pdbstruct_mol::Structure;

use crate::error::IoResult;
use crate::traits::{StructureReader, StructureWriter, WriteOptions};

/// Read a PDB file from a path (gzip input is detected and decoded)
pub fn read_pdb(path: &Path) -> IoResult<Structure> {
    let file = crate::compress::open_file(path)?;
    let mut reader = PdbReader::new(file);
    reader.read()
}

/// Read a PDB file from a string
pub fn read_pdb_str(content: &str) -> IoResult<Structure> {
    let mut reader = PdbReader::new(content.as_bytes());
    reader.read()
}

/// Read a PDB file from a reader
pub fn read_pdb_from<R: Read>(reader: R) -> IoResult<Structure> {
    let mut reader = PdbReader::new(reader);
    reader.read()
}

/// Write a structure to a stream.
///
/// The stream is flushed but not closed.
pub fn write_pdb<W: Write>(structure: &Structure, writer: W, options: &WriteOptions) -> IoResult<()> {
    let mut pdb_writer = PdbWriter::with_options(writer, options.clone());
    pdb_writer.write(structure)?;
    pdb_writer.flush()
}

/// Write a structure to a file, gzip-compressed when the path ends in `.gz`
pub fn write_pdb_file(path: &Path, structure: &Structure, options: &WriteOptions) -> IoResult<()> {
    let file = crate::compress::create_file(path)?;
    let mut pdb_writer = PdbWriter::with_options(file, options.clone());
    pdb_writer.write(structure)?;
    pdb_writer.flush()?;
    pdb_writer.into_inner().finish()?.flush()?;
    Ok(())
}

/// Method-style PDB output for [`Structure`]
pub trait PdbWrite {
    /// Write as PDB to a stream
    fn write_pdb<W: Write>(&self, writer: W, options: &WriteOptions) -> IoResult<()>;

    /// Write as PDB to a file
    fn write_pdb_file(&self, path: &Path, options: &WriteOptions) -> IoResult<()>;
}

impl PdbWrite for Structure {
    fn write_pdb<W: Write>(&self, writer: W, options: &WriteOptions) -> IoResult<()> {
        write_pdb(self, writer, options)
    }

    fn write_pdb_file(&self, path: &Path, options: &WriteOptions) -> IoResult<()> {
        write_pdb_file(path, self, options)
    }
}
