//! Structural model for PDB macromolecules
//!
//! This crate provides the in-memory model produced by reading a PDB file and
//! consumed by writing one:
//!
//! - [`Atom`] - one atomic site, with alternate conformers attached by altloc
//! - [`Residue`] - ordered atoms sharing chain, sequence number and insertion code
//! - [`Structure`] - residues, coordinate frames, unit cell and [`Metadata`]
//! - [`CoordFrame`] - per-atom coordinates for one model of an ensemble
//!
//! # Example
//!
//! ```rust
//! use pdbstruct_mol::{Atom, Element, Residue, Structure};
//!
//! let mut res = Residue::new("HOH", 1, 'W', ' ');
//! res.add_atom(Atom::new("O", Element::OXYGEN).with_position(0.0, 0.0, 0.0));
//!
//! let mut structure = Structure::new();
//! structure.add_residue(res);
//!
//! assert_eq!(structure.atom_count(), 1);
//! assert_eq!(structure.frame_count(), 1);
//! assert_eq!(structure.box_dims(), [0.0, 0.0, 0.0, 90.0, 90.0, 90.0]);
//! ```

mod atom;
mod coordset;
mod element;
mod error;
mod metadata;
mod residue;
mod structure;

pub use atom::{Atom, NO_ALTLOC};
pub use coordset::{CoordFrame, UnitCell, DEFAULT_BOX};
pub use element::{Element, ELEMENT_COUNT};
pub use error::{MolError, MolResult};
pub use metadata::Metadata;
pub use residue::{Residue, ResidueKey};
pub use structure::Structure;

/// Coordinates are stored as double-precision vectors
pub use lin_alg::f64::Vec3;
