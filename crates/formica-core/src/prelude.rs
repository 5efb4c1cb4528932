//! Formica Core Prelude — convenient imports for common usage.
//!
//! ```rust
//! use formica_core::prelude::*;
//! ```

pub use crate::direction::Direction;

pub use crate::stimulus::{builtin_stimuli, StimulusRegistry, StimulusType, FORAGE};

pub use crate::cell::{
    Cell, CellId,
    Nest, Pheromone, FoodSource,
    NestCell, PheromoneCell, FoodSourceCell,
};

pub use crate::lattice::Lattice;

pub use crate::factory::{
    build_grid, create_food_source_grid, create_nest_grid, create_pheromone_grid,
    PHEROMONE_PREFIX,
};

pub use crate::error::{FormicaError, Result};
