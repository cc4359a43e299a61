//! PDB file parser
//!
//! Single pass over the input: each line is decoded by column and handed to
//! the numbering tracker, altloc resolver, frame assembler and metadata
//! extractor, which build the [`Structure`] incrementally.

use std::io::{BufRead, BufReader, Read};

use lin_alg::f64::Vec3;
use log::{debug, warn};
use pdbstruct_mol::{Atom, Residue, Structure};

use crate::error::{IoError, IoResult};
use crate::traits::StructureReader;

use super::altloc::place_atom;
use super::frames::{FrameAssembler, ModelState};
use super::metadata::MetadataExtractor;
use super::numbering::NumberingTracker;
use super::records::{parse_atom_record, parse_cryst1_record, parse_model_record, AtomRecord, RecordType};

/// PDB file reader
pub struct PdbReader<R> {
    reader: BufReader<R>,
    line_number: usize,
}

/// Mutable state of one read
struct ReadContext {
    structure: Structure,
    numbering: NumberingTracker,
    frames: FrameAssembler,
    metadata: MetadataExtractor,
}

impl<R: Read> PdbReader<R> {
    /// Create a new PDB reader
    pub fn new(reader: R) -> Self {
        PdbReader {
            reader: BufReader::new(reader),
            line_number: 0,
        }
    }

    /// Read a single line; bytes that are not UTF-8 are replaced, so
    /// Latin-1 text in ignored records does not end the read
    fn read_line(&mut self, bytes: &mut Vec<u8>, line: &mut String) -> IoResult<bool> {
        bytes.clear();
        line.clear();
        if self.reader.read_until(b'\n', bytes)? == 0 {
            return Ok(false);
        }
        self.line_number += 1;
        line.push_str(&String::from_utf8_lossy(bytes));
        Ok(true)
    }

    /// Parse the PDB file
    fn parse(&mut self) -> IoResult<Structure> {
        let mut ctx = ReadContext::new();
        let mut bytes = Vec::new();
        let mut buffer = String::new();

        while self.read_line(&mut bytes, &mut buffer)? {
            let line = buffer.trim_end();
            if line.is_empty() {
                continue;
            }
            let line_number = self.line_number;

            match RecordType::of(line) {
                record if record.is_coordinate() => ctx.coordinate(line, line_number)?,
                RecordType::Ter => ctx.ter(),
                RecordType::Model => {
                    if let Some(serial) = parse_model_record(line) {
                        debug!("MODEL {} at line {}", serial, line_number);
                    }
                    ctx.frames.begin_model(&mut ctx.structure, line_number)?;
                }
                RecordType::Endmdl => ctx.frames.end_model(&mut ctx.structure, line_number)?,
                RecordType::End => break,
                RecordType::Cryst1 => match parse_cryst1_record(line) {
                    Ok((_, cell)) => ctx.structure.unit_cell = Some(cell),
                    Err(_) => warn!("Malformed CRYST1 record at line {}; ignored", line_number),
                },
                RecordType::Other => {}
                record => ctx.metadata.feed(record, line),
            }
        }

        ctx.finish(self.line_number)
    }
}

impl ReadContext {
    fn new() -> Self {
        ReadContext {
            structure: Structure::new(),
            numbering: NumberingTracker::new(),
            frames: FrameAssembler::new(),
            metadata: MetadataExtractor::new(),
        }
    }

    fn coordinate(&mut self, line: &str, line_number: usize) -> IoResult<()> {
        let (_, record) = parse_atom_record(line).map_err(|_| {
            IoError::format(line_number, format!("malformed coordinate record: {:?}", line))
        })?;

        if !self.frames.building_topology() {
            let position = Vec3::new(record.x, record.y, record.z);
            return self.frames.add_coordinates(position, line_number);
        }

        let idx = self.numbering.next_idx();
        let number = self.numbering.serial(record.serial);

        if self
            .numbering
            .opens_residue(&record, self.structure.residues().last())
        {
            let resnum = self.numbering.open_residue(&record);
            let mut residue = Residue::new(record.resname.as_str(), resnum, record.chain, record.icode);
            residue.segid = record.segid.clone();
            self.structure.add_residue(residue);
        }

        let residue = self
            .structure
            .last_residue_mut()
            .ok_or_else(|| IoError::format(line_number, "coordinate record without residue"))?;
        let placement = place_atom(residue, build_atom(&record, idx, number))?;
        self.frames.record_topology(placement);
        Ok(())
    }

    fn ter(&mut self) {
        if !self.frames.building_topology() {
            return;
        }
        if let Some(residue) = self.structure.last_residue_mut() {
            residue.ter = true;
            self.numbering.mark_ter();
        }
    }

    fn finish(mut self, line_number: usize) -> IoResult<Structure> {
        if self.frames.state() == ModelState::InModel {
            debug!("Input ended inside a model; closing it");
        }
        self.frames.finish(&mut self.structure, line_number)?;

        let mut structure = self.structure;
        structure.metadata = self.metadata.finish();

        debug!(
            "Read PDB: {} coordinate records per model, {} models, {} residues, {} atoms, {} alternates, {} frames",
            self.numbering.indexed(),
            self.frames.model_count(),
            structure.residue_count(),
            structure.atom_count(),
            structure.alternate_count(),
            structure.frame_count()
        );
        Ok(structure)
    }
}

/// Build an atom from a coordinate record
fn build_atom(record: &AtomRecord, idx: usize, number: i32) -> Atom {
    let mut atom = Atom::new(record.name(), record.get_element())
        .with_position(record.x, record.y, record.z)
        .with_occupancy(record.occupancy)
        .with_bfactor(record.bfactor)
        .with_altloc(record.altloc)
        .with_number(number);
    atom.idx = idx;
    atom.hetatm = record.hetatm;
    atom.formal_charge = record.get_formal_charge();
    atom
}

impl<R: Read> StructureReader for PdbReader<R> {
    fn read(&mut self) -> IoResult<Structure> {
        self.parse()
    }
}
