//! MODEL/ENDMDL handling
//!
//! The first model (or the whole file, when it has no MODEL records) builds
//! the topology. Every later model only contributes a coordinate frame: its
//! Nth coordinate record belongs to the same atom as the Nth record of the
//! first model.

use lin_alg::f64::Vec3;
use log::warn;
use pdbstruct_mol::{CoordFrame, Structure};

use super::altloc::Placement;
use crate::error::{IoError, IoResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelState {
    NoModel,
    InModel,
    BetweenModels,
}

/// Tracks model boundaries and collects the frames of later models
#[derive(Debug)]
pub struct FrameAssembler {
    state: ModelState,
    /// Completed models, including the one building the topology
    models: usize,
    /// Placement of each coordinate record of the first model
    slots: Vec<Placement>,
    /// Position in `slots` while reading a later model
    cursor: usize,
    pending: CoordFrame,
}

impl Default for FrameAssembler {
    fn default() -> Self {
        FrameAssembler::new()
    }
}

impl FrameAssembler {
    pub fn new() -> Self {
        FrameAssembler {
            state: ModelState::NoModel,
            models: 0,
            slots: Vec::new(),
            cursor: 0,
            pending: CoordFrame::new(),
        }
    }

    pub fn state(&self) -> ModelState {
        self.state
    }

    /// True while coordinate records still define atoms and residues
    pub fn building_topology(&self) -> bool {
        self.models == 0
    }

    fn primary_count(&self) -> usize {
        self.slots.iter().filter(|s| **s == Placement::Primary).count()
    }

    /// Handle a MODEL record
    pub fn begin_model(&mut self, structure: &mut Structure, line: usize) -> IoResult<()> {
        match self.state {
            ModelState::InModel => {
                warn!("MODEL at line {} without ENDMDL; closing previous model", line);
                self.close_model(structure, line)?;
            }
            ModelState::NoModel if !self.slots.is_empty() => {
                // Coordinates before the first MODEL form a model of their own
                self.models = 1;
            }
            _ => {}
        }
        self.state = ModelState::InModel;
        if !self.building_topology() {
            self.cursor = 0;
            self.pending = CoordFrame::with_capacity(self.primary_count());
        }
        Ok(())
    }

    /// Handle an ENDMDL record
    pub fn end_model(&mut self, structure: &mut Structure, line: usize) -> IoResult<()> {
        if self.state != ModelState::InModel {
            warn!("ENDMDL at line {} outside a model; ignored", line);
            return Ok(());
        }
        self.close_model(structure, line)?;
        self.state = ModelState::BetweenModels;
        Ok(())
    }

    /// Record how a coordinate record of the first model was placed
    pub fn record_topology(&mut self, placement: Placement) {
        self.slots.push(placement);
    }

    /// Accept a coordinate record of a later model
    pub fn add_coordinates(&mut self, position: Vec3, line: usize) -> IoResult<()> {
        if self.state != ModelState::InModel {
            return Err(IoError::format(
                line,
                "coordinate record outside MODEL/ENDMDL after the first model",
            ));
        }
        let Some(slot) = self.slots.get(self.cursor) else {
            return Err(IoError::format(
                line,
                format!(
                    "model {} has more than {} coordinate records",
                    self.models + 1,
                    self.slots.len()
                ),
            ));
        };
        if *slot == Placement::Primary {
            self.pending.push(position);
        }
        self.cursor += 1;
        Ok(())
    }

    fn close_model(&mut self, structure: &mut Structure, line: usize) -> IoResult<()> {
        if !self.building_topology() {
            if self.cursor != self.slots.len() {
                return Err(IoError::format(
                    line,
                    format!(
                        "model {} has {} coordinate records, expected {}",
                        self.models + 1,
                        self.cursor,
                        self.slots.len()
                    ),
                ));
            }
            let frame = std::mem::take(&mut self.pending);
            structure.push_frame(frame)?;
        }
        self.models += 1;
        Ok(())
    }

    /// Close an unterminated model at end of input
    pub fn finish(&mut self, structure: &mut Structure, line: usize) -> IoResult<()> {
        if self.state == ModelState::InModel {
            self.close_model(structure, line)?;
            self.state = ModelState::BetweenModels;
        }
        Ok(())
    }

    /// Number of models seen, counting a file without MODEL records as one
    pub fn model_count(&self) -> usize {
        if self.models == 0 && !self.slots.is_empty() {
            1
        } else {
            self.models
        }
    }
}
