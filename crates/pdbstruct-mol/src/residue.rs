//! Residues
//!
//! A [`Residue`] owns the primary atoms of one contiguous run of coordinate
//! records sharing chain, sequence number and insertion code. Alternate
//! conformers hang off their primary atom and are never listed here.

use std::ops::Index;

use crate::atom::Atom;

/// Key identifying a residue within its chain
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResidueKey {
    /// Chain identifier
    pub chain: char,
    /// Residue sequence number
    pub number: i32,
    /// Insertion code
    pub insertion_code: char,
}

impl ResidueKey {
    pub fn new(chain: char, number: i32, insertion_code: char) -> Self {
        ResidueKey {
            chain,
            number,
            insertion_code,
        }
    }
}

impl std::fmt::Display for ResidueKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let icode = self.insertion_code.to_string();
        write!(f, "{}/{}{}", self.chain, self.number, icode.trim())
    }
}

/// Ordered group of atoms sharing residue identity
#[derive(Debug, Clone)]
pub struct Residue {
    /// Internal index, file order
    pub idx: usize,
    /// Residue name (up to 4 characters)
    pub name: String,
    /// Sequence number (as read, or reassigned when renumbering)
    pub number: i32,
    /// Insertion code; space when unset
    pub insertion_code: char,
    /// Chain identifier; space when unset
    pub chain: char,
    /// Segment identifier (columns 73-76)
    pub segid: String,
    /// A TER record immediately followed this residue
    pub ter: bool,
    atoms: Vec<Atom>,
}

impl Residue {
    pub fn new(name: impl Into<String>, number: i32, chain: char, insertion_code: char) -> Self {
        Residue {
            idx: 0,
            name: name.into(),
            number,
            insertion_code,
            chain,
            segid: String::new(),
            ter: false,
            atoms: Vec::new(),
        }
    }

    pub fn key(&self) -> ResidueKey {
        ResidueKey::new(self.chain, self.number, self.insertion_code)
    }

    /// Append a primary atom
    pub fn add_atom(&mut self, atom: Atom) {
        self.atoms.push(atom);
    }

    /// Number of primary atoms
    #[inline]
    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    pub fn atoms_mut(&mut self) -> &mut [Atom] {
        &mut self.atoms
    }

    pub fn get(&self, index: usize) -> Option<&Atom> {
        self.atoms.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Atom> {
        self.atoms.get_mut(index)
    }

    /// Most recently added atom with the given name
    pub fn find_by_name(&self, name: &str) -> Option<&Atom> {
        self.atoms.iter().rev().find(|a| a.name == name)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Atom> {
        self.atoms.iter()
    }
}

impl Index<usize> for Residue {
    type Output = Atom;

    fn index(&self, index: usize) -> &Atom {
        &self.atoms[index]
    }
}

impl<'a> IntoIterator for &'a Residue {
    type Item = &'a Atom;
    type IntoIter = std::slice::Iter<'a, Atom>;

    fn into_iter(self) -> Self::IntoIter {
        self.atoms.iter()
    }
}
