//! Cells — addressable locations of a lattice.
//!
//! A cell carries an identifier, a table of neighbour handles and a
//! payload. The handles are plain indices into the owning [`Lattice`];
//! a cell never owns its neighbours. The payload decides what kind of
//! ground the cell is:
//!
//! - [`Nest`]: structural space inside the nest
//! - [`Pheromone`]: open ground holding signal concentrations
//! - [`FoodSource`]: a patch with food left to carry off
//!
//! [`Lattice`]: crate::lattice::Lattice

use crate::direction::Direction;
use crate::error::{FormicaError, Result};
use crate::stimulus::{StimulusRegistry, StimulusType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Handle to a cell inside its lattice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellId(pub usize);

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A single location with adjacency and a payload.
#[derive(Debug, Clone, Serialize)]
pub struct Cell<P> {
    name: String,
    handle: CellId,
    neighbors: [Option<CellId>; 8],
    payload: P,
}

pub type NestCell = Cell<Nest>;
pub type PheromoneCell = Cell<Pheromone>;
pub type FoodSourceCell = Cell<FoodSource>;

impl<P> Cell<P> {
    pub(crate) fn new(name: String, handle: CellId, payload: P) -> Self {
        Self {
            name,
            handle,
            neighbors: [None; 8],
            payload,
        }
    }

    /// Identifier of the form `"<prefix>-<row>,<col>"`.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn handle(&self) -> CellId {
        self.handle
    }

    /// Neighbour in a direction, or `None` at the edge of the world.
    pub fn neighbor(&self, direction: Direction) -> Option<CellId> {
        self.neighbors[direction.index()]
    }

    /// Populated directions with their neighbour handles.
    pub fn neighbors(&self) -> impl Iterator<Item = (Direction, CellId)> + '_ {
        Direction::ALL
            .into_iter()
            .filter_map(|dir| self.neighbor(dir).map(|id| (dir, id)))
    }

    pub fn neighbor_count(&self) -> usize {
        self.neighbors.iter().flatten().count()
    }

    pub fn payload(&self) -> &P {
        &self.payload
    }

    pub fn payload_mut(&mut self) -> &mut P {
        &mut self.payload
    }

    // One-sided writes. Only the lattice calls these, always in pairs.
    pub(crate) fn set_neighbor(&mut self, direction: Direction, id: CellId) -> Option<CellId> {
        self.neighbors[direction.index()].replace(id)
    }

    pub(crate) fn clear_neighbor(&mut self, direction: Direction) -> Option<CellId> {
        self.neighbors[direction.index()].take()
    }
}

/// Payload of a nest cell. Identity and adjacency only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Nest;

/// Signal concentrations held by a cell, keyed by stimulus name.
///
/// Concentrations are never negative.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawPheromone")]
pub struct Pheromone {
    concentrations: BTreeMap<String, f64>,
}

impl Pheromone {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current level of a stimulus. `0.0` if never deposited.
    pub fn concentration(&self, stimulus: &StimulusType) -> f64 {
        self.concentrations
            .get(stimulus.name())
            .copied()
            .unwrap_or(0.0)
    }

    /// Add `amount` of a stimulus and return the new level.
    pub fn deposit(&mut self, stimulus: &StimulusType, amount: f64) -> Result<f64> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(FormicaError::InvalidAmount(amount));
        }
        let level = self
            .concentrations
            .entry(stimulus.name().to_string())
            .or_insert(0.0);
        let next = *level + amount;
        if !next.is_finite() {
            return Err(FormicaError::InvalidAmount(amount));
        }
        *level = next;
        Ok(next)
    }

    /// Apply one tick of decay for a stimulus.
    pub fn decay(&mut self, stimulus: &StimulusType) {
        if let Some(level) = self.concentrations.get_mut(stimulus.name()) {
            *level = stimulus.decayed(*level);
        }
    }

    /// Decay every stored stimulus by its registered type.
    ///
    /// Entries whose name the registry does not know are left untouched.
    pub fn decay_all(&mut self, registry: &StimulusRegistry) {
        for (name, level) in self.concentrations.iter_mut() {
            if let Some(kind) = registry.get(name) {
                *level = kind.decayed(*level);
            }
        }
    }

    /// Drop entries that have faded below `threshold` and return how many.
    pub fn evaporate_below(&mut self, threshold: f64) -> Result<usize> {
        if !threshold.is_finite() {
            return Err(FormicaError::InvalidThreshold(threshold));
        }
        let before = self.concentrations.len();
        self.concentrations.retain(|_, level| *level >= threshold);
        Ok(before - self.concentrations.len())
    }

    /// Stimulus names with their levels.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.concentrations.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn is_empty(&self) -> bool {
        self.concentrations.is_empty()
    }
}

/// Unvalidated form of [`Pheromone`] read from serialized data.
#[derive(Debug, Clone, Deserialize)]
struct RawPheromone {
    #[serde(default)]
    concentrations: BTreeMap<String, f64>,
}

impl TryFrom<RawPheromone> for Pheromone {
    type Error = FormicaError;

    fn try_from(raw: RawPheromone) -> Result<Self> {
        if let Some(&bad) = raw
            .concentrations
            .values()
            .find(|level| !level.is_finite() || **level < 0.0)
        {
            return Err(FormicaError::InvalidAmount(bad));
        }
        Ok(Self {
            concentrations: raw.concentrations,
        })
    }
}

/// Food left on a food-source cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawFoodSource")]
pub struct FoodSource {
    remaining: f64,
}

impl FoodSource {
    /// A patch holding `amount` of food. The amount must be finite and `>= 0`.
    pub fn new(amount: f64) -> Result<Self> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(FormicaError::InvalidAmount(amount));
        }
        Ok(Self { remaining: amount })
    }

    pub fn remaining(&self) -> f64 {
        self.remaining
    }

    pub fn is_depleted(&self) -> bool {
        self.remaining <= 0.0
    }

    /// Remove up to `amount` of food and return what was actually taken.
    pub fn take(&mut self, amount: f64) -> Result<f64> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(FormicaError::InvalidAmount(amount));
        }
        let taken = amount.min(self.remaining);
        self.remaining -= taken;
        Ok(taken)
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
struct RawFoodSource {
    remaining: f64,
}

impl TryFrom<RawFoodSource> for FoodSource {
    type Error = FormicaError;

    fn try_from(raw: RawFoodSource) -> Result<Self> {
        FoodSource::new(raw.remaining)
    }
}
