//! Structure container
//!
//! [`Structure`] owns the residues (and through them the atoms), the extra
//! coordinate frames of multi-model inputs, the unit cell and the header
//! metadata.
//!
//! Frame 0 is not stored separately: it is read from and written to each
//! primary atom's own `position`, so the two can never disagree. Frames
//! 1.. are stored as [`CoordFrame`]s aligned to the flat atom order.

use lin_alg::f64::Vec3;

use crate::atom::Atom;
use crate::coordset::{CoordFrame, UnitCell, DEFAULT_BOX};
use crate::error::{MolError, MolResult};
use crate::metadata::Metadata;
use crate::residue::Residue;

/// A macromolecular structure
#[derive(Debug, Clone, Default)]
pub struct Structure {
    residues: Vec<Residue>,
    /// Coordinate frames after the first
    extra_frames: Vec<CoordFrame>,
    /// Unit cell from CRYST1, if any
    pub unit_cell: Option<UnitCell>,
    /// Header metadata
    pub metadata: Metadata,
}

impl Structure {
    pub fn new() -> Self {
        Structure::default()
    }

    // =========================================================================
    // Residues and atoms
    // =========================================================================

    /// Append a residue, assigning its `idx`; returns that index
    pub fn add_residue(&mut self, mut residue: Residue) -> usize {
        let idx = self.residues.len();
        residue.idx = idx;
        self.residues.push(residue);
        idx
    }

    pub fn residues(&self) -> &[Residue] {
        &self.residues
    }

    pub fn residues_mut(&mut self) -> &mut [Residue] {
        &mut self.residues
    }

    pub fn residue(&self, index: usize) -> Option<&Residue> {
        self.residues.get(index)
    }

    pub fn last_residue_mut(&mut self) -> Option<&mut Residue> {
        self.residues.last_mut()
    }

    #[inline]
    pub fn residue_count(&self) -> usize {
        self.residues.len()
    }

    /// Number of primary atoms
    pub fn atom_count(&self) -> usize {
        self.residues.iter().map(Residue::len).sum()
    }

    /// Number of alternate conformers attached across all atoms
    pub fn alternate_count(&self) -> usize {
        self.atoms().map(|a| a.other_locations.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.atom_count() == 0
    }

    /// Primary atoms in residue order
    pub fn atoms(&self) -> impl Iterator<Item = &Atom> {
        self.residues.iter().flat_map(|r| r.iter())
    }

    pub fn atoms_mut(&mut self) -> impl Iterator<Item = &mut Atom> {
        self.residues.iter_mut().flat_map(|r| r.atoms_mut().iter_mut())
    }

    /// Primary atom at a position of the flat atom order
    pub fn atom(&self, index: usize) -> Option<&Atom> {
        self.atoms().nth(index)
    }

    // =========================================================================
    // Frames
    // =========================================================================

    /// Number of coordinate frames; zero for an empty structure
    pub fn frame_count(&self) -> usize {
        if self.is_empty() && self.extra_frames.is_empty() {
            0
        } else {
            1 + self.extra_frames.len()
        }
    }

    /// Copy of frame `k`; frame 0 is assembled from the atoms' own positions
    pub fn frame(&self, k: usize) -> Option<CoordFrame> {
        if k == 0 {
            if self.frame_count() == 0 {
                return None;
            }
            let mut frame = CoordFrame::with_capacity(self.atom_count());
            for atom in self.atoms() {
                frame.push(atom.position);
            }
            Some(frame)
        } else {
            self.extra_frames.get(k - 1).cloned()
        }
    }

    /// Stored frame `k` for `k >= 1`
    pub fn extra_frame(&self, k: usize) -> Option<&CoordFrame> {
        k.checked_sub(1).and_then(|i| self.extra_frames.get(i))
    }

    /// Every frame, frame 0 first
    pub fn pdbxyz(&self) -> Vec<CoordFrame> {
        (0..self.frame_count()).filter_map(|k| self.frame(k)).collect()
    }

    /// Position of one atom in one frame
    pub fn position(&self, frame: usize, atom: usize) -> Option<Vec3> {
        if frame == 0 {
            self.atom(atom).map(|a| a.position)
        } else {
            self.extra_frame(frame)?.get(atom)
        }
    }

    /// Append a frame after the existing ones
    pub fn push_frame(&mut self, frame: CoordFrame) -> MolResult<()> {
        let expected = self.atom_count();
        if frame.len() != expected {
            return Err(MolError::FrameLength {
                expected,
                actual: frame.len(),
            });
        }
        self.extra_frames.push(frame);
        Ok(())
    }

    /// Replace frame `k`; replacing frame 0 moves the atoms themselves
    pub fn set_frame(&mut self, k: usize, frame: CoordFrame) -> MolResult<()> {
        let expected = self.atom_count();
        if frame.len() != expected {
            return Err(MolError::FrameLength {
                expected,
                actual: frame.len(),
            });
        }
        if k == 0 {
            for (atom, pos) in self.atoms_mut().zip(frame.iter()) {
                atom.position = pos;
            }
            return Ok(());
        }
        let count = self.frame_count();
        match self.extra_frames.get_mut(k - 1) {
            Some(slot) => {
                *slot = frame;
                Ok(())
            }
            None => Err(MolError::frame_out_of_bounds(k, count)),
        }
    }

    // =========================================================================
    // Crystallographic data
    // =========================================================================

    /// Unit cell as `[a, b, c, alpha, beta, gamma]`, or `[0, 0, 0, 90, 90, 90]`
    pub fn box_dims(&self) -> [f64; 6] {
        self.unit_cell
            .as_ref()
            .map(UnitCell::as_box)
            .unwrap_or(DEFAULT_BOX)
    }

    pub fn space_group(&self) -> Option<&str> {
        self.unit_cell.as_ref().map(|c| c.space_group.as_str())
    }
}
