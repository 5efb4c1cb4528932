//! # Formica Core
//!
//! The ground an ant colony walks on. This crate builds the spatial
//! substrate of a colony simulation and defines the chemical signals ants
//! leave on it:
//!
//! - **Direction** — the eight compass keys of a cell's neighbourhood
//! - **StimulusType** — a named signal with a decay factor and a diffusion radius
//! - **Cell** — an addressable location holding neighbour handles and a payload
//! - **Lattice** — the arena that owns every cell of one grid
//! - **Factory** — builds nest, pheromone and food-source lattices
//!
//! Agents coordinate by stigmergy: they never message each other, they
//! mark cells, and the marks fade a little every tick. When that tick
//! happens is up to the scheduler driving the simulation; this crate only
//! provides the data and the update law.
//!
//! ## Quick Start
//!
//! ```rust
//! use formica_core::prelude::*;
//!
//! let mut field = create_pheromone_grid(3, 2).unwrap();
//! let centre = field.id_at(1, 1).unwrap();
//! field.cell_mut(centre).unwrap().payload_mut().deposit(&FORAGE, 1.0).unwrap();
//!
//! // One scheduler tick.
//! field.decay(&FORAGE);
//! assert!((field.total_concentration(&FORAGE) - 0.9).abs() < 1e-12);
//! ```

pub mod direction;
pub mod stimulus;
pub mod cell;
pub mod lattice;
pub mod factory;
pub mod error;
pub mod prelude;
