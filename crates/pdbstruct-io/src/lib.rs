//! PDB structure file I/O
//!
//! Reads Protein Data Bank files into a [`pdbstruct_mol::Structure`] and
//! writes them back:
//!
//! - fixed-column ATOM/HETATM decoding that survives overflowed serial and
//!   residue-number fields (hexadecimal, hybrid-36, `*****`)
//! - alternate locations merged into their primary atom
//! - MODEL/ENDMDL ensembles read as frames over one topology
//! - HEADER, TITLE, AUTHOR, KEYWDS, EXPDTA, JRNL, REMARK 2 and CRYST1
//! - writer renumbering and altloc selection ([`WriteOptions`])
//! - transparent gzip input, gzip output for `.gz` paths
//!
//! # Quick Start
//!
//! ```no_run
//! use std::path::Path;
//! use pdbstruct_io::{read_pdb, write_pdb_file, WriteOptions};
//!
//! let structure = read_pdb(Path::new("4lzt.pdb.gz")).unwrap();
//! println!("{} atoms, {} frames", structure.atom_count(), structure.frame_count());
//!
//! let options = WriteOptions::new().with_altlocs_str("occupancy").unwrap();
//! write_pdb_file(Path::new("4lzt_clean.pdb"), &structure, &options).unwrap();
//! ```

pub mod compress;
pub mod error;
pub mod pdb;
pub mod traits;

// Re-exports
pub use error::{IoError, IoResult};
pub use pdb::{read_pdb, read_pdb_from, read_pdb_str, write_pdb, write_pdb_file, PdbReader, PdbWrite, PdbWriter};
pub use traits::{AltlocPolicy, StructureReader, StructureWriter, WriteOptions};
