//! Alternate location merging
//!
//! A coordinate record whose atom name is already present in the current
//! residue under a different altloc becomes an alternate conformer of that
//! atom. The first record seen for a name is the primary.

use pdbstruct_mol::{Atom, MolResult, Residue, NO_ALTLOC};

/// Where a coordinate record ended up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Appended to the residue as a new primary atom
    Primary,
    /// Attached to an existing atom as an alternate conformer
    Alternate,
}

/// Position of the atom `atom` would attach to as an alternate, if any
fn primary_for(residue: &Residue, atom: &Atom) -> Option<usize> {
    if atom.altloc == NO_ALTLOC {
        return None;
    }
    residue.iter().rposition(|existing| {
        existing.name == atom.name
            && existing.has_altloc()
            && existing.altloc != atom.altloc
            && !existing.other_locations.contains_key(&atom.altloc)
    })
}

/// Place `atom` in `residue`, merging it into an existing atom when it is an
/// alternate location of one
pub fn place_atom(residue: &mut Residue, atom: Atom) -> MolResult<Placement> {
    match primary_for(residue, &atom).and_then(|i| residue.get_mut(i)) {
        Some(primary) => {
            primary.add_other_location(atom)?;
            Ok(Placement::Alternate)
        }
        None => {
            residue.add_atom(atom);
            Ok(Placement::Primary)
        }
    }
}
