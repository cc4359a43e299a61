//! PDB file writer
//!
//! Writes a [`Structure`] in PDB format. Serial and residue numbers are
//! assigned once per write and reused in every MODEL, so frames of an
//! ensemble always describe the same records.

use std::io::Write;

use lin_alg::f64::Vec3;
use log::debug;
use pdbstruct_mol::{Atom, Metadata, Residue, Structure, NO_ALTLOC};

use crate::error::IoResult;
use crate::traits::{AltlocPolicy, StructureWriter, WriteOptions};

use super::hybrid36::hy36encode;
use super::records::{RESNUM_WIDTH, SERIAL_WIDTH};

/// Which conformer of an atom a record was planned from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Conformer {
    /// The primary atom itself
    Primary,
    /// An attached alternate, written with its own altloc
    Alternate,
    /// The highest-occupancy conformer standing in for the atom
    Selected,
}

/// One coordinate record to write
struct PlannedAtom<'a> {
    atom: &'a Atom,
    /// Index of the primary atom in the flat atom order
    primary: usize,
    conformer: Conformer,
    serial: i32,
}

impl PlannedAtom<'_> {
    fn altloc(&self) -> char {
        match self.conformer {
            Conformer::Selected => NO_ALTLOC,
            _ => self.atom.altloc,
        }
    }

    /// Coordinates of this record in frame `k`
    fn position(&self, structure: &Structure, k: usize) -> Vec3 {
        if k == 0 || self.conformer == Conformer::Alternate {
            return self.atom.position;
        }
        structure
            .extra_frame(k)
            .and_then(|frame| frame.get(self.primary))
            .unwrap_or(self.atom.position)
    }
}

struct PlannedResidue<'a> {
    residue: &'a Residue,
    number: i32,
    atoms: Vec<PlannedAtom<'a>>,
    /// Serial printed on the TER record that follows, if any
    ter_serial: Option<i32>,
}

/// Assign serials and residue numbers and pick conformers
fn plan<'a>(structure: &'a Structure, options: &WriteOptions) -> Vec<PlannedResidue<'a>> {
    let mut serial = 0;
    let mut primary = 0;
    let mut planned = Vec::with_capacity(structure.residue_count());

    for (res_index, residue) in structure.residues().iter().enumerate() {
        let mut atoms = Vec::with_capacity(residue.len());
        for atom in residue {
            let mut push = |atom: &'a Atom, conformer: Conformer| {
                serial += 1;
                atoms.push(PlannedAtom {
                    atom,
                    primary,
                    conformer,
                    serial: if options.renumber { serial } else { atom.number },
                });
            };
            match options.altlocs {
                AltlocPolicy::All => {
                    push(atom, Conformer::Primary);
                    for alt in atom.other_locations.values() {
                        push(alt, Conformer::Alternate);
                    }
                }
                AltlocPolicy::First => push(atom, Conformer::Primary),
                AltlocPolicy::Occupancy => push(atom.highest_occupancy(), Conformer::Selected),
            }
            primary += 1;
        }

        let ter_serial = residue.ter.then(|| {
            let last = atoms.last().map_or(0, |a| a.serial);
            last + 1
        });
        let number = if options.renumber {
            res_index as i32 + 1
        } else {
            residue.number
        };
        planned.push(PlannedResidue {
            residue,
            number,
            atoms,
            ter_serial,
        });
    }
    planned
}

/// PDB file writer
pub struct PdbWriter<W> {
    writer: W,
    options: WriteOptions,
}

impl<W: Write> PdbWriter<W> {
    /// Create a new PDB writer with default options
    pub fn new(writer: W) -> Self {
        PdbWriter::with_options(writer, WriteOptions::default())
    }

    /// Create a PDB writer with explicit options
    pub fn with_options(writer: W, options: WriteOptions) -> Self {
        PdbWriter { writer, options }
    }

    pub fn options(&self) -> &WriteOptions {
        &self.options
    }

    /// Consume the writer, returning the underlying stream
    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Write `text` as a record and its continuation lines
    fn write_continued(&mut self, record: &str, text: &str, width: usize, breaks: Breaks) -> IoResult<()> {
        for (i, chunk) in wrap_text(text, width, breaks).iter().enumerate() {
            if i == 0 {
                writeln!(self.writer, "{:<6}    {}", record, chunk)?;
            } else {
                writeln!(self.writer, "{:<6}  {:>2} {}", record, i + 1, chunk)?;
            }
        }
        Ok(())
    }

    /// Write a JRNL sub-record and its continuation lines
    fn write_jrnl(&mut self, sub: &str, text: &str, breaks: Breaks) -> IoResult<()> {
        for (i, chunk) in wrap_text(text, 60, breaks).iter().enumerate() {
            if i == 0 {
                writeln!(self.writer, "JRNL        {:<4}   {}", sub, chunk)?;
            } else {
                writeln!(self.writer, "JRNL        {:<4}{:>2} {}", sub, i + 1, chunk)?;
            }
        }
        Ok(())
    }

    fn write_reference(&mut self, md: &Metadata) -> IoResult<()> {
        let journal = wrap_text(md.journal.as_deref().unwrap_or(""), 28, Breaks::ListItems);
        let first = journal.first().map(String::as_str).unwrap_or("");
        let numbers = md.volume.is_some() || md.page.is_some() || md.year.is_some();
        if numbers {
            let year = md.year.map(|y| y.to_string()).unwrap_or_default();
            writeln!(
                self.writer,
                "JRNL        REF    {:<28}  V.{:>4.4} {:>5.5} {:>4.4}",
                first,
                md.volume.as_deref().unwrap_or(""),
                md.page.as_deref().unwrap_or(""),
                year
            )?;
        } else {
            writeln!(self.writer, "JRNL        REF    {}", first)?;
        }
        for (i, chunk) in journal.iter().enumerate().skip(1) {
            writeln!(self.writer, "JRNL        REF {:>2} {}", i + 1, chunk)?;
        }
        Ok(())
    }

    /// Write header records
    fn write_metadata(&mut self, md: &Metadata) -> IoResult<()> {
        if md.classification.is_some() || md.deposition_date.is_some() || md.id_code.is_some() {
            let line = format!(
                "HEADER    {:<40}{:<9}   {}",
                md.classification.as_deref().unwrap_or(""),
                md.deposition_date.as_deref().unwrap_or(""),
                md.id_code.as_deref().unwrap_or("")
            );
            writeln!(self.writer, "{}", line.trim_end())?;
        }
        if let Some(ref title) = md.title {
            self.write_continued("TITLE", title, 68, Breaks::Spaces)?;
        }
        if !md.keywords.is_empty() {
            self.write_continued("KEYWDS", &md.keywords.join(", "), 68, Breaks::AnyComma)?;
        }
        if let Some(ref method) = md.experimental {
            self.write_continued("EXPDTA", method, 68, Breaks::Spaces)?;
        }
        if let Some(ref authors) = md.authors {
            self.write_continued("AUTHOR", authors, 68, Breaks::ListItems)?;
        }

        if let Some(ref authors) = md.journal_authors {
            self.write_jrnl("AUTH", authors, Breaks::ListItems)?;
        }
        if let Some(ref title) = md.journal_title {
            self.write_jrnl("TITL", title, Breaks::Spaces)?;
        }
        if md.journal.is_some() || md.volume.is_some() || md.page.is_some() || md.year.is_some() {
            self.write_reference(md)?;
        }
        if let Some(ref pmid) = md.pmid {
            self.write_jrnl("PMID", pmid, Breaks::Spaces)?;
        }
        if let Some(ref doi) = md.doi {
            self.write_jrnl("DOI", doi, Breaks::Spaces)?;
        }

        if let Some(resolution) = md.resolution {
            writeln!(self.writer, "REMARK   2")?;
            writeln!(self.writer, "REMARK   2 RESOLUTION. {:7.2} ANGSTROMS.", resolution)?;
        }
        Ok(())
    }

    /// Write CRYST1 record
    fn write_cryst1(&mut self, structure: &Structure) -> IoResult<()> {
        if let Some(ref cell) = structure.unit_cell {
            writeln!(
                self.writer,
                "CRYST1{:9.3}{:9.3}{:9.3}{:7.2}{:7.2}{:7.2} {:<11}{:4}",
                cell.lengths[0],
                cell.lengths[1],
                cell.lengths[2],
                cell.angles[0],
                cell.angles[1],
                cell.angles[2],
                cell.space_group,
                cell.z
            )?;
        }
        Ok(())
    }

    /// Write ATOM/HETATM record
    fn write_atom(&mut self, planned: &PlannedAtom, residue: &PlannedResidue, pos: Vec3) -> IoResult<()> {
        let atom = planned.atom;
        let res = residue.residue;
        let record_type = if atom.hetatm { "HETATM" } else { "ATOM  " };
        let element = atom.element.symbol().to_ascii_uppercase();

        writeln!(
            self.writer,
            "{}{} {:4}{}{}{}{}{}   {:8.3}{:8.3}{:8.3}{:6.2}{:6.2}      {:<4.4}{:>2}{}",
            record_type,
            format_serial(planned.serial),
            format_atom_name(&atom.name, &element),
            planned.altloc(),
            format_resname(&res.name),
            res.chain,
            format_resnum(residue.number),
            res.insertion_code,
            pos.x,
            pos.y,
            pos.z,
            atom.occupancy,
            atom.bfactor,
            res.segid,
            element,
            format_charge(atom.formal_charge)
        )?;

        Ok(())
    }

    /// Write TER record
    fn write_ter(&mut self, serial: i32, residue: &PlannedResidue) -> IoResult<()> {
        let res = residue.residue;
        writeln!(
            self.writer,
            "TER   {}      {}{}{}{}",
            format_serial(serial),
            format_resname(&res.name),
            res.chain,
            format_resnum(residue.number),
            res.insertion_code
        )?;
        Ok(())
    }

    /// Write a structure
    fn write_structure(&mut self, structure: &Structure) -> IoResult<()> {
        if self.options.write_metadata {
            self.write_metadata(&structure.metadata)?;
        }
        self.write_cryst1(structure)?;

        let planned = plan(structure, &self.options);
        let n_frames = structure.frame_count();
        let write_models = n_frames > 1;

        for k in 0..n_frames {
            if write_models {
                writeln!(self.writer, "MODEL     {:4}", k + 1)?;
            }
            for residue in &planned {
                for atom in &residue.atoms {
                    self.write_atom(atom, residue, atom.position(structure, k))?;
                }
                if let Some(serial) = residue.ter_serial {
                    self.write_ter(serial, residue)?;
                }
            }
            if write_models {
                writeln!(self.writer, "ENDMDL")?;
            }
        }

        writeln!(self.writer, "END")?;

        debug!(
            "Wrote PDB: {} residues, {} records per model, {} models (renumber={}, altlocs={})",
            planned.len(),
            planned.iter().map(|r| r.atoms.len()).sum::<usize>(),
            n_frames,
            self.options.renumber,
            self.options.altlocs
        );
        Ok(())
    }
}

impl<W: Write> StructureWriter for PdbWriter<W> {
    fn write(&mut self, structure: &Structure) -> IoResult<()> {
        self.write_structure(structure)
    }

    fn flush(&mut self) -> IoResult<()> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Where [`wrap_text`] may end a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Breaks {
    /// Only at spaces; the reader joins free text with one space
    Spaces,
    /// At spaces, and after commas that were not followed by a space
    ListItems,
    /// At spaces and after every comma
    AnyComma,
}

/// Split `text` into chunks of at most `width` characters.
///
/// Chunks are re-joined by the reader with a space, or for list records
/// directly after a trailing comma. With [`Breaks::Spaces`] and
/// [`Breaks::ListItems`] the joined text equals the input up to repeated
/// whitespace.
fn wrap_text(text: &str, width: usize, breaks: Breaks) -> Vec<String> {
    // (token, joined to the previous token with a space)
    let mut tokens: Vec<(String, bool)> = Vec::new();
    for word in text.split_whitespace() {
        if breaks == Breaks::Spaces {
            tokens.push((word.to_string(), true));
            continue;
        }
        let mut spaced = true;
        for piece in word.split_inclusive(',') {
            match tokens.last_mut() {
                Some((prev, _)) if breaks == Breaks::ListItems && spaced && prev.ends_with(',') => {
                    prev.push(' ');
                    prev.push_str(piece);
                }
                _ => tokens.push((piece.to_string(), spaced)),
            }
            spaced = false;
        }
    }

    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    for (token, spaced) in tokens {
        let sep = if spaced && !current.is_empty() { 1 } else { 0 };
        if !current.is_empty() && current.len() + sep + token.len() > width {
            lines.push(std::mem::take(&mut current));
        } else if sep == 1 {
            current.push(' ');
        }
        current.push_str(&token);
        while current.len() > width {
            let rest = current.split_off(floor_char_boundary(&current, width));
            lines.push(std::mem::replace(&mut current, rest));
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

fn floor_char_boundary(s: &str, index: usize) -> usize {
    (0..=index.min(s.len()))
        .rev()
        .find(|&i| s.is_char_boundary(i))
        .unwrap_or(0)
}

/// Format a serial into the 5-column field, hybrid-36 beyond 99999
fn format_serial(serial: i32) -> String {
    hy36encode(SERIAL_WIDTH, serial).unwrap_or_else(|| "*".repeat(SERIAL_WIDTH))
}

/// Format a residue number into the 4-column field, hybrid-36 beyond 9999
fn format_resnum(number: i32) -> String {
    hy36encode(RESNUM_WIDTH, number).unwrap_or_else(|| "*".repeat(RESNUM_WIDTH))
}

/// Residue name in columns 18-21: right-justified in 18-20, four-letter
/// names spill into 21
fn format_resname(name: &str) -> String {
    if name.len() > 3 {
        format!("{:<4.4}", name)
    } else {
        format!("{:>3} ", name)
    }
}

/// Format atom name according to PDB conventions
fn format_atom_name(name: &str, element: &str) -> String {
    let name = name.trim();

    // 1-letter elements start in column 14 (index 1 of the 4-char field)
    if name.len() >= 4 {
        format!("{:.4}", name)
    } else if element.len() == 1 && !name.starts_with(char::is_numeric) {
        format!(" {:<3}", name)
    } else {
        format!("{:<4}", name)
    }
}

/// Format charge for PDB format (e.g., "2+" or "1-")
fn format_charge(charge: i8) -> String {
    match charge {
        0 => "  ".to_string(),
        c if c > 0 => format!("{}+", c.unsigned_abs()),
        c => format!("{}-", c.unsigned_abs()),
    }
}
