//! Atom and residue numbering while reading
//!
//! Internal indices (`idx`) are handed out sequentially. Display numbers are
//! taken from the file while they make sense and continued from the last
//! assigned number once a field has overflowed: unparseable text (`*****`,
//! VMD hexadecimal), or a full-width value that does not continue the count
//! after the decimal capacity was reached.

use log::debug;
use pdbstruct_mol::Residue;

use super::hybrid36::decimal_limit;
use super::records::{AtomRecord, NumberField, RESNUM_WIDTH, SERIAL_WIDTH};

/// Identity of the residue currently being filled
#[derive(Debug, Clone, PartialEq, Eq)]
struct ResidueMark {
    chain: char,
    resnum_text: String,
    icode: char,
    resname: String,
}

impl ResidueMark {
    fn of(record: &AtomRecord) -> Self {
        ResidueMark {
            chain: record.chain,
            resnum_text: record.resnum_text.clone(),
            icode: record.icode,
            resname: record.resname.clone(),
        }
    }
}

/// Numbering state threaded through one read
#[derive(Debug, Default)]
pub struct NumberingTracker {
    next_idx: usize,
    last_serial: Option<i32>,
    last_resnum: Option<i32>,
    current: Option<ResidueMark>,
    after_ter: bool,
    serial_substituted: bool,
    resnum_substituted: bool,
}

impl NumberingTracker {
    pub fn new() -> Self {
        NumberingTracker::default()
    }

    /// Next internal atom index
    pub fn next_idx(&mut self) -> usize {
        let idx = self.next_idx;
        self.next_idx += 1;
        idx
    }

    /// Number of coordinate records indexed so far
    pub fn indexed(&self) -> usize {
        self.next_idx
    }

    /// Display serial for a coordinate record
    pub fn serial(&mut self, field: NumberField) -> i32 {
        let capacity = decimal_limit(SERIAL_WIDTH as u32) as i32;
        let next = self.last_serial.map_or(1, |s| s.saturating_add(1));
        let serial = match field {
            NumberField::Value { value, saturated } => {
                let wrapped = self
                    .last_serial
                    .is_some_and(|last| last >= capacity && (saturated || value < last));
                if wrapped {
                    self.note_serial_substitution(next);
                    next
                } else {
                    value
                }
            }
            NumberField::Blank => next,
            NumberField::Overflow => {
                self.note_serial_substitution(next);
                next
            }
        };
        self.last_serial = Some(serial);
        serial
    }

    fn note_serial_substitution(&mut self, serial: i32) {
        if !self.serial_substituted {
            self.serial_substituted = true;
            debug!("Atom serial field overflowed; continuing count from {}", serial);
        }
    }

    /// Record that a TER closed the current residue
    pub fn mark_ter(&mut self) {
        self.after_ter = true;
    }

    /// Whether `record` starts a new residue rather than joining `current`.
    ///
    /// Residues are contiguous runs of identical chain, sequence field and
    /// insertion code, broken by TER. When the sequence field holds the
    /// same overflow marker for every residue, a new residue is recognized
    /// by a change of residue name or a repeated atom name.
    pub fn opens_residue(&self, record: &AtomRecord, current: Option<&Residue>) -> bool {
        let (Some(mark), Some(residue)) = (&self.current, current) else {
            return true;
        };
        if self.after_ter {
            return true;
        }
        if mark.chain != record.chain
            || mark.icode != record.icode
            || mark.resnum_text != record.resnum_text
        {
            return true;
        }
        if record.resnum == NumberField::Overflow {
            return mark.resname != record.resname
                || residue.iter().any(|atom| {
                    atom.name == record.name()
                        && atom.conformers().any(|c| c.altloc == record.altloc)
                });
        }
        false
    }

    /// Display number for a residue opened by `record`
    pub fn open_residue(&mut self, record: &AtomRecord) -> i32 {
        let capacity = decimal_limit(RESNUM_WIDTH as u32) as i32;
        let same_chain = self
            .current
            .as_ref()
            .is_some_and(|mark| mark.chain == record.chain);
        let next = self.last_resnum.map_or(1, |n| n.saturating_add(1));

        let number = match record.resnum {
            NumberField::Value { value, saturated } => {
                let wrapped = same_chain
                    && self
                        .last_resnum
                        .is_some_and(|last| last >= capacity && (saturated || value < last));
                if wrapped {
                    self.note_resnum_substitution(next);
                    next
                } else {
                    value
                }
            }
            NumberField::Blank => next,
            NumberField::Overflow => {
                self.note_resnum_substitution(next);
                next
            }
        };

        self.last_resnum = Some(number);
        self.current = Some(ResidueMark::of(record));
        self.after_ter = false;
        number
    }

    fn note_resnum_substitution(&mut self, number: i32) {
        if !self.resnum_substituted {
            self.resnum_substituted = true;
            debug!("Residue number field overflowed; continuing count from {}", number);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdb::records::parse_atom_record;
    use pdbstruct_mol::{Atom, Element};

    fn record(serial: &str, name: &str, resname: &str, resnum: &str) -> AtomRecord {
        let line = format!(
            "ATOM  {:>5} {:<4} {:>3} A{:>4}       1.000   2.000   3.000  1.00  0.00           C",
            serial, name, resname, resnum
        );
        parse_atom_record(&line).unwrap().1
    }

    fn value(v: i32) -> NumberField {
        NumberField::Value {
            value: v,
            saturated: v.to_string().len() >= SERIAL_WIDTH,
        }
    }

    #[test]
    fn test_serials_follow_file() {
        let mut tracker = NumberingTracker::new();
        assert_eq!(tracker.serial(value(5)), 5);
        assert_eq!(tracker.serial(value(9)), 9);
        assert_eq!(tracker.serial(NumberField::Blank), 10);
    }

    #[test]
    fn test_serial_overflow_continues_count() {
        let mut tracker = NumberingTracker::new();
        assert_eq!(tracker.serial(value(99999)), 99999);
        // VMD hexadecimal: 186a0 and the all-digit 18700
        assert_eq!(tracker.serial(NumberField::Overflow), 100000);
        assert_eq!(tracker.serial(value(18700)), 100001);
        assert_eq!(tracker.serial(NumberField::Overflow), 100002);
        // Modulo wrap
        assert_eq!(tracker.serial(value(3)), 100003);
    }

    #[test]
    fn test_idx_is_sequential() {
        let mut tracker = NumberingTracker::new();
        assert_eq!(tracker.next_idx(), 0);
        assert_eq!(tracker.next_idx(), 1);
        assert_eq!(tracker.indexed(), 2);
    }

    #[test]
    fn test_residue_boundaries() {
        let mut tracker = NumberingTracker::new();
        let first = record("1", "N", "ALA", "1");
        assert!(tracker.opens_residue(&first, None));
        assert_eq!(tracker.open_residue(&first), 1);

        let mut res = Residue::new("ALA", 1, 'A', ' ');
        res.add_atom(Atom::new("N", Element::NITROGEN));

        assert!(!tracker.opens_residue(&record("2", "CA", "ALA", "1"), Some(&res)));
        assert!(tracker.opens_residue(&record("3", "N", "GLY", "2"), Some(&res)));

        tracker.mark_ter();
        assert!(tracker.opens_residue(&record("2", "CA", "ALA", "1"), Some(&res)));
    }

    #[test]
    fn test_residue_number_overflow() {
        let mut tracker = NumberingTracker::new();
        assert_eq!(tracker.open_residue(&record("1", "O", "HOH", "9999")), 9999);
        // VMD hexadecimal 10000 == 0x2710
        assert_eq!(tracker.open_residue(&record("2", "O", "HOH", "2710")), 10000);
        assert_eq!(tracker.open_residue(&record("3", "O", "HOH", "271a")), 10001);
        assert_eq!(tracker.open_residue(&record("4", "O", "HOH", "****")), 10002);
    }

    #[test]
    fn test_overflowed_residues_split_on_repeated_names() {
        let mut tracker = NumberingTracker::new();
        let o = record("*****", "O", "HOH", "****");
        tracker.open_residue(&o);

        let mut water = Residue::new("HOH", 10002, 'A', ' ');
        water.add_atom(Atom::new("O", Element::OXYGEN));

        assert!(!tracker.opens_residue(&record("*****", "H1", "HOH", "****"), Some(&water)));
        assert!(tracker.opens_residue(&o, Some(&water)));
        assert!(tracker.opens_residue(&record("*****", "NA", "NA", "****"), Some(&water)));
    }
}
