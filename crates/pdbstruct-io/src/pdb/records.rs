//! Fixed-column record decoding
//!
//! Stateless decoders that map one PDB line to typed fields by column
//! position. Numeric serial/sequence fields are never fatal: text that is
//! not a number comes back as [`NumberField::Overflow`] and the numbering
//! tracker decides what the number should have been.

use nom::branch::alt;
use nom::bytes::complete::take;
use nom::combinator::rest;
use nom::IResult;
use pdbstruct_mol::{Element, UnitCell, NO_ALTLOC};

use super::hybrid36::hy36decode;

/// Width of the atom serial field (columns 7-11)
pub const SERIAL_WIDTH: usize = 5;
/// Width of the residue sequence field (columns 23-26)
pub const RESNUM_WIDTH: usize = 4;

/// Record type from columns 1-6
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordType {
    Atom,
    Hetatm,
    Ter,
    Model,
    Endmdl,
    End,
    Cryst1,
    Header,
    Title,
    Author,
    Jrnl,
    Keywds,
    Expdta,
    Remark,
    /// Anything this reader does not interpret
    Other,
}

fn record_tag(input: &str) -> IResult<&str, &str> {
    alt((take(6usize), rest))(input)
}

impl RecordType {
    /// Classify a line by its whitespace-trimmed record name
    pub fn of(line: &str) -> Self {
        let tag = record_tag(line).map(|(_, tag)| tag.trim()).unwrap_or("");
        match tag {
            "ATOM" => RecordType::Atom,
            "HETATM" => RecordType::Hetatm,
            "TER" => RecordType::Ter,
            "MODEL" => RecordType::Model,
            "ENDMDL" => RecordType::Endmdl,
            "END" => RecordType::End,
            "CRYST1" => RecordType::Cryst1,
            "HEADER" => RecordType::Header,
            "TITLE" => RecordType::Title,
            "AUTHOR" => RecordType::Author,
            "JRNL" => RecordType::Jrnl,
            "KEYWDS" => RecordType::Keywds,
            "EXPDTA" => RecordType::Expdta,
            "REMARK" => RecordType::Remark,
            _ => RecordType::Other,
        }
    }

    #[inline]
    pub fn is_coordinate(&self) -> bool {
        matches!(self, RecordType::Atom | RecordType::Hetatm)
    }
}

/// Columns `start..end` (0-based, end exclusive), clipped to the line
#[inline]
pub fn column(line: &str, start: usize, end: usize) -> &str {
    let end = end.min(line.len());
    if start >= end {
        return "";
    }
    line.get(start..end).unwrap_or("")
}

/// Single character at a 0-based column; space when absent
#[inline]
pub fn column_char(line: &str, index: usize) -> char {
    line.as_bytes()
        .get(index)
        .filter(|b| b.is_ascii())
        .map(|&b| b as char)
        .unwrap_or(' ')
}

/// Decoded serial or sequence-number field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberField {
    /// Field is empty
    Blank,
    /// Field parsed as a number; `saturated` when its text fills the whole
    /// field width, which is how wrapped or truncated numbers look
    Value { value: i32, saturated: bool },
    /// Field text is not a number (`*****`, hexadecimal, ...)
    Overflow,
}

/// Decode a fixed-width integer field
pub fn decode_number(field: &str, width: usize) -> NumberField {
    let text = field.trim();
    if text.is_empty() {
        return NumberField::Blank;
    }
    match hy36decode(width, text) {
        Some(value) => NumberField::Value {
            value,
            saturated: text.len() >= width,
        },
        None => NumberField::Overflow,
    }
}

/// Parsed ATOM or HETATM record
#[derive(Debug, Clone, PartialEq)]
pub struct AtomRecord {
    /// Record type: true for HETATM, false for ATOM
    pub hetatm: bool,
    /// Atom serial (columns 7-11)
    pub serial: NumberField,
    /// Atom name as written, 4 columns (13-16)
    pub raw_name: String,
    /// Alternate location indicator (column 17)
    pub altloc: char,
    /// Residue name (columns 18-21)
    pub resname: String,
    /// Chain identifier (column 22)
    pub chain: char,
    /// Residue sequence number (columns 23-26)
    pub resnum: NumberField,
    /// Residue sequence text, trimmed; distinguishes residues even when the
    /// number itself overflowed
    pub resnum_text: String,
    /// Insertion code (column 27)
    pub icode: char,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    /// Occupancy (columns 55-60), 1.0 when absent
    pub occupancy: f64,
    /// Temperature factor (columns 61-66), 0.0 when absent
    pub bfactor: f64,
    /// Segment identifier (columns 73-76)
    pub segid: String,
    /// Element symbol (columns 77-78)
    pub element: String,
    /// Formal charge (columns 79-80)
    pub charge: String,
}

impl AtomRecord {
    /// Atom name without padding
    pub fn name(&self) -> &str {
        self.raw_name.trim()
    }

    /// Element from the element column, or inferred from the atom name
    pub fn get_element(&self) -> Element {
        Element::from_symbol(&self.element).unwrap_or_else(|| infer_element_from_name(&self.raw_name))
    }

    pub fn get_formal_charge(&self) -> i8 {
        parse_pdb_charge(&self.charge)
    }
}

fn coordinate_error(input: &str) -> nom::Err<nom::error::Error<&str>> {
    nom::Err::Error(nom::error::Error::new(input, nom::error::ErrorKind::Float))
}

/// Parse an ATOM or HETATM record.
///
/// Only the coordinates are mandatory; every other numeric field falls back
/// to a default or to [`NumberField::Overflow`].
pub fn parse_atom_record(input: &str) -> IResult<&str, AtomRecord> {
    if input.len() < 54 {
        return Err(nom::Err::Error(nom::error::Error::new(
            input,
            nom::error::ErrorKind::Eof,
        )));
    }

    let coord = |start: usize| -> Result<f64, nom::Err<nom::error::Error<&str>>> {
        column(input, start, start + 8)
            .trim()
            .parse()
            .map_err(|_| coordinate_error(input))
    };
    let x = coord(30)?;
    let y = coord(38)?;
    let z = coord(46)?;

    let resnum_field = column(input, 22, 26);
    let altloc = match column_char(input, 16) {
        '\0' => NO_ALTLOC,
        c => c,
    };

    let record = AtomRecord {
        hetatm: input.starts_with("HETATM"),
        serial: decode_number(column(input, 6, 11), SERIAL_WIDTH),
        raw_name: format!("{:<4}", column(input, 12, 16)),
        altloc,
        resname: column(input, 17, 21).trim().to_string(),
        chain: column_char(input, 21),
        resnum: decode_number(resnum_field, RESNUM_WIDTH),
        resnum_text: resnum_field.trim().to_string(),
        icode: column_char(input, 26),
        x,
        y,
        z,
        occupancy: column(input, 54, 60).trim().parse().unwrap_or(1.0),
        bfactor: column(input, 60, 66).trim().parse().unwrap_or(0.0),
        segid: column(input, 72, 76).trim().to_string(),
        element: column(input, 76, 78).trim().to_string(),
        charge: column(input, 78, 80).trim().to_string(),
    };

    Ok(("", record))
}

/// Parse a MODEL record, returning the model serial if present
pub fn parse_model_record(input: &str) -> Option<i32> {
    column(input, 6, input.len()).trim().parse().ok()
}

/// Parse a CRYST1 record.
///
/// Fails when any of the six cell parameters is missing or malformed; the
/// space group and Z value are optional.
pub fn parse_cryst1_record(input: &str) -> IResult<&str, UnitCell> {
    let mut cell = [0.0f64; 6];
    let fields = [(6, 15), (15, 24), (24, 33), (33, 40), (40, 47), (47, 54)];
    for (slot, (start, end)) in cell.iter_mut().zip(fields) {
        *slot = column(input, start, end)
            .trim()
            .parse()
            .map_err(|_| coordinate_error(input))?;
    }

    let mut unit_cell = UnitCell::new(
        [cell[0], cell[1], cell[2]],
        [cell[3], cell[4], cell[5]],
        column(input, 55, 66).trim(),
    );
    if let Ok(z) = column(input, 66, 70).trim().parse() {
        unit_cell.z = z;
    }
    Ok(("", unit_cell))
}

/// Infer the element from a 4-column atom name.
///
/// PDB right-justifies one-letter element symbols into column 14, so a name
/// starting with a space or digit names its element in the next letter;
/// otherwise columns 13-14 hold a two-letter symbol. Four-character names
/// starting with H are hydrogens (e.g. `HG21`).
pub fn infer_element_from_name(raw_name: &str) -> Element {
    let chars: Vec<char> = raw_name.chars().collect();
    let Some(start) = chars.iter().position(|c| c.is_ascii_alphabetic()) else {
        return Element::UNKNOWN;
    };
    let first = chars[start].to_ascii_uppercase();

    let justified_one_letter = start > 0;
    let full_width = raw_name.trim().len() >= 4;
    if !justified_one_letter && !(full_width && first == 'H') {
        if let Some(second) = chars.get(start + 1).filter(|c| c.is_ascii_alphabetic()) {
            let symbol: String = [first, *second].iter().collect();
            if let Some(elem) = Element::from_symbol(&symbol) {
                return elem;
            }
        }
    }

    Element::from_symbol(&first.to_string()).unwrap_or(Element::UNKNOWN)
}

/// Parse PDB-style charge string (e.g., "2+", "1-", "+", "-")
pub fn parse_pdb_charge(charge_str: &str) -> i8 {
    let chars: Vec<char> = charge_str.trim().chars().collect();
    let digit = |d: &char| d.to_digit(10).unwrap_or(0) as i8;
    match chars.as_slice() {
        ['+'] => 1,
        ['-'] => -1,
        [d, '+'] | ['+', d] if d.is_ascii_digit() => digit(d),
        [d, '-'] | ['-', d] if d.is_ascii_digit() => -digit(d),
        _ => 0,
    }
}
