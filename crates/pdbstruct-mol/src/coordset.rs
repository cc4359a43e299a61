//! Coordinate frames and unit cell
//!
//! A [`CoordFrame`] holds one set of atomic positions aligned to the
//! structure's flat atom order. Frames after the first come from additional
//! MODEL blocks (NMR ensembles, trajectories).

use lin_alg::f64::Vec3;

/// Unit-cell lengths and angles reported when no CRYST1 record is present
pub const DEFAULT_BOX: [f64; 6] = [0.0, 0.0, 0.0, 90.0, 90.0, 90.0];

/// Crystallographic unit cell from a CRYST1 record
#[derive(Debug, Clone, PartialEq)]
pub struct UnitCell {
    /// Cell lengths a, b, c (Angstroms)
    pub lengths: [f64; 3],
    /// Cell angles alpha, beta, gamma (degrees)
    pub angles: [f64; 3],
    /// Space group symbol (e.g. "P 21 21 21")
    pub space_group: String,
    /// Z value (polymeric chains per unit cell)
    pub z: i32,
}

impl UnitCell {
    pub fn new(lengths: [f64; 3], angles: [f64; 3], space_group: impl Into<String>) -> Self {
        UnitCell {
            lengths,
            angles,
            space_group: space_group.into(),
            z: 1,
        }
    }

    /// Cell as `[a, b, c, alpha, beta, gamma]`
    pub fn as_box(&self) -> [f64; 6] {
        [
            self.lengths[0],
            self.lengths[1],
            self.lengths[2],
            self.angles[0],
            self.angles[1],
            self.angles[2],
        ]
    }
}

/// One frame of coordinates, three values per atom
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoordFrame {
    coords: Vec<f64>,
}

impl CoordFrame {
    pub fn new() -> Self {
        CoordFrame::default()
    }

    pub fn with_capacity(n_atoms: usize) -> Self {
        CoordFrame {
            coords: Vec::with_capacity(n_atoms * 3),
        }
    }

    /// Build a frame from a slice of positions
    pub fn from_vec3(positions: &[Vec3]) -> Self {
        let mut frame = CoordFrame::with_capacity(positions.len());
        for pos in positions {
            frame.push(*pos);
        }
        frame
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.coords.len() / 3
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    /// Append the position of the next atom
    #[inline]
    pub fn push(&mut self, pos: Vec3) {
        self.coords.extend_from_slice(&[pos.x, pos.y, pos.z]);
    }

    #[inline]
    pub fn get(&self, atom: usize) -> Option<Vec3> {
        let base = atom * 3;
        let xyz = self.coords.get(base..base + 3)?;
        Some(Vec3::new(xyz[0], xyz[1], xyz[2]))
    }

    /// Overwrite the position of an atom; returns false when out of range
    #[inline]
    pub fn set(&mut self, atom: usize, pos: Vec3) -> bool {
        let base = atom * 3;
        match self.coords.get_mut(base..base + 3) {
            Some(xyz) => {
                xyz.copy_from_slice(&[pos.x, pos.y, pos.z]);
                true
            }
            None => false,
        }
    }

    /// Flat `[x0, y0, z0, x1, ...]` view
    #[inline]
    pub fn as_flat(&self) -> &[f64] {
        &self.coords
    }

    pub fn iter(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.coords
            .chunks_exact(3)
            .map(|xyz| Vec3::new(xyz[0], xyz[1], xyz[2]))
    }
}
