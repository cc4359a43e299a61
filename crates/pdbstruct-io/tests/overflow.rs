//! Files with more atoms or residues than the fixed-width columns can hold

mod common;

use std::fmt::Write as _;

use common::write_to_string;
use pdbstruct_io::{read_pdb_str, WriteOptions};
use pdbstruct_mol::{Structure, DEFAULT_BOX};

/// Serial column the way VMD writes it: decimal, then hexadecimal, then stars
fn vmd_serial(serial: usize) -> String {
    if serial <= 99_999 {
        format!("{:>5}", serial)
    } else if serial <= 0xfffff {
        format!("{:05x}", serial)
    } else {
        "*****".to_string()
    }
}

fn vmd_resnum(resnum: usize) -> String {
    if resnum <= 9_999 {
        format!("{:>4}", resnum)
    } else if resnum <= 0xffff {
        format!("{:04x}", resnum)
    } else {
        "****".to_string()
    }
}

struct SolventBox {
    text: String,
    serial: usize,
    resnum: usize,
}

impl SolventBox {
    fn new() -> Self {
        SolventBox {
            text: String::new(),
            serial: 0,
            resnum: 0,
        }
    }

    fn residue(&mut self, resname: &str, atoms: &[(&str, &str)]) {
        self.resnum += 1;
        for (i, (name, element)) in atoms.iter().enumerate() {
            self.serial += 1;
            let x = (self.resnum % 100) as f64 * 0.5;
            let y = (self.resnum / 100) as f64 * 0.25;
            let z = i as f64;
            writeln!(
                self.text,
                "ATOM  {} {:<4} {:<4}W{}    {:8.3}{:8.3}{:8.3}  1.00  0.00      WAT {:>2}",
                vmd_serial(self.serial),
                name,
                resname,
                vmd_resnum(self.resnum),
                x,
                y,
                z,
                element
            )
            .unwrap();
        }
    }

    fn finish(mut self) -> String {
        self.text.push_str("END\n");
        self.text
    }
}

const TIP4P: [(&str, &str); 4] = [(" OW", "O"), (" HW1", "H"), (" HW2", "H"), (" MW", "")];
const TIP3P: [(&str, &str); 3] = [(" OW", "O"), (" HW1", "H"), (" HW2", "H")];

fn large_water_box() -> Structure {
    let mut pdb = SolventBox::new();
    for _ in 0..3146 {
        pdb.residue("T4P", &TIP4P);
    }
    for _ in 0..32551 {
        pdb.residue("WAT", &TIP3P);
    }
    read_pdb_str(&pdb.finish()).unwrap()
}

#[test]
fn hexadecimal_serials_and_residues() {
    let s = large_water_box();
    assert_eq!(s.atom_count(), 110_237);
    assert_eq!(s.residue_count(), 35_697);
    assert_eq!(s.alternate_count(), 0);
    assert_eq!(s.box_dims(), DEFAULT_BOX);

    let last = s.residues().last().unwrap();
    assert_eq!(last.number, 35_697);
    assert_eq!(last.name, "WAT");
    assert_eq!(last.len(), 3);
    assert_eq!(s.atoms().last().unwrap().number, 110_237);

    // Residue 10000 is the first one written as hexadecimal
    let r = &s.residues()[9_999];
    assert_eq!(r.number, 10_000);
    assert_eq!(r.len(), 3);
    assert_eq!(s.atom(99_999).unwrap().number, 100_000);

    let t4p = &s.residues()[3_145];
    assert_eq!(t4p.name, "T4P");
    assert_eq!(t4p.len(), 4);
}

#[test]
fn starred_residue_numbers() {
    let mut pdb = SolventBox::new();
    for _ in 0..65_600 {
        pdb.residue("NA", &[("NA", "NA")]);
    }
    pdb.residue("WAT", &TIP3P);
    pdb.residue("WAT", &TIP3P);
    let s = read_pdb_str(&pdb.finish()).unwrap();

    assert_eq!(s.residue_count(), 65_602);
    assert_eq!(s.atom_count(), 65_606);
    let numbers: Vec<i32> = s.residues()[65_598..].iter().map(|r| r.number).collect();
    assert_eq!(numbers, vec![65_599, 65_600, 65_601, 65_602]);
    assert_eq!(s.residues()[65_600].name, "WAT");
    assert_eq!(s.residues()[65_601].len(), 3);
}

#[test]
fn renumbered_output_uses_hybrid36() {
    let s = large_water_box();
    let text = write_to_string(&s, &WriteOptions::new());

    let atom_100000 = text
        .lines()
        .filter(|l| l.starts_with("ATOM"))
        .nth(99_999)
        .unwrap();
    assert_eq!(&atom_100000[6..11], "A0000");

    let first_hybrid_residue = text
        .lines()
        .find(|l| l.starts_with("ATOM") && &l[22..26] == "A000")
        .unwrap();
    assert_eq!(&first_hybrid_residue[17..20], "WAT");
    assert!(!text.contains("*****"));

    let copy = read_pdb_str(&text).unwrap();
    assert_eq!(copy.atom_count(), s.atom_count());
    assert_eq!(copy.residue_count(), s.residue_count());
    assert_eq!(copy.atoms().last().unwrap().number, 110_237);
    assert_eq!(copy.residues().last().unwrap().number, 35_697);
}
