//! Atom data structure
//!
//! An [`Atom`] is one physical atomic site. When the source reports several
//! alternate conformers for the same site, the first one seen is the primary
//! atom and the rest are attached to it in [`Atom::other_locations`], keyed by
//! their altloc character in insertion order.

use indexmap::IndexMap;
use lin_alg::f64::Vec3;

use crate::element::Element;
use crate::error::{MolError, MolResult};

/// Altloc character meaning "no alternate location"
pub const NO_ALTLOC: char = ' ';

/// One atomic site (or one alternate conformer of a site)
#[derive(Debug, Clone)]
pub struct Atom {
    // =========================================================================
    // Identity
    // =========================================================================
    /// Internal index, assigned in file order and never renumbered
    pub idx: usize,

    /// Display serial number (as read, or as assigned when renumbering)
    pub number: i32,

    /// Atom name (up to 4 characters, e.g. "CA")
    pub name: String,

    /// Chemical element
    pub element: Element,

    /// Force-field atom type; empty for formats that do not carry one
    pub atom_type: String,

    // =========================================================================
    // Physical properties
    // =========================================================================
    /// Mass in Daltons
    pub mass: f64,

    /// Partial charge
    pub charge: f64,

    /// Formal charge from the PDB charge column
    pub formal_charge: i8,

    /// Occupancy; not renormalized across alternates
    pub occupancy: f64,

    /// Temperature factor
    pub bfactor: f64,

    /// Alternate location indicator; [`NO_ALTLOC`] when unset
    pub altloc: char,

    /// Written as HETATM rather than ATOM
    pub hetatm: bool,

    /// Coordinates in the first frame
    pub position: Vec3,

    // =========================================================================
    // Alternates
    // =========================================================================
    /// Alternate conformers keyed by altloc, in the order they were read
    pub other_locations: IndexMap<char, Atom>,
}

impl Atom {
    /// Create a new atom; the mass is taken from the element
    pub fn new(name: impl Into<String>, element: Element) -> Self {
        Atom {
            idx: 0,
            number: 0,
            name: name.into(),
            element,
            atom_type: String::new(),
            mass: element.mass(),
            charge: 0.0,
            formal_charge: 0,
            occupancy: 1.0,
            bfactor: 0.0,
            altloc: NO_ALTLOC,
            hetatm: false,
            position: Vec3::new(0.0, 0.0, 0.0),
            other_locations: IndexMap::new(),
        }
    }

    pub fn with_position(mut self, x: f64, y: f64, z: f64) -> Self {
        self.position = Vec3::new(x, y, z);
        self
    }

    pub fn with_occupancy(mut self, occupancy: f64) -> Self {
        self.occupancy = occupancy;
        self
    }

    pub fn with_bfactor(mut self, bfactor: f64) -> Self {
        self.bfactor = bfactor;
        self
    }

    pub fn with_altloc(mut self, altloc: char) -> Self {
        self.altloc = altloc;
        self
    }

    pub fn with_number(mut self, number: i32) -> Self {
        self.number = number;
        self
    }

    #[inline]
    pub fn atomic_number(&self) -> u8 {
        self.element.atomic_number()
    }

    /// Whether this atom carries an altloc code
    #[inline]
    pub fn has_altloc(&self) -> bool {
        self.altloc != NO_ALTLOC
    }

    /// Attach an alternate conformer to this (primary) atom.
    ///
    /// Both altloc codes must be set and distinct from each other and from
    /// every conformer already attached; the alternate may not carry
    /// alternates of its own.
    pub fn add_other_location(&mut self, mut alternate: Atom) -> MolResult<()> {
        let altloc = alternate.altloc;
        if !self.has_altloc()
            || altloc == NO_ALTLOC
            || altloc == self.altloc
            || self.other_locations.contains_key(&altloc)
        {
            return Err(MolError::AltlocConflict {
                name: self.name.clone(),
                altloc,
            });
        }
        alternate.other_locations.clear();
        self.other_locations.insert(altloc, alternate);
        Ok(())
    }

    /// Primary conformer followed by its alternates, in read order
    pub fn conformers(&self) -> impl Iterator<Item = &Atom> {
        std::iter::once(self).chain(self.other_locations.values())
    }

    /// Conformer with the strictly greatest occupancy; ties go to the earliest
    pub fn highest_occupancy(&self) -> &Atom {
        self.conformers()
            .fold(self, |best, a| if a.occupancy > best.occupancy { a } else { best })
    }

    /// Total number of conformers, primary included
    #[inline]
    pub fn conformer_count(&self) -> usize {
        1 + self.other_locations.len()
    }
}
