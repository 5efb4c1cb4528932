//! Watch a single deposit fade under the decay law.

use anyhow::{bail, Context, Result};
use colored::Colorize;
use formica_core::prelude::*;

use crate::config::Config;

/// Longest trace the `decay` command will run.
pub const MAX_TICKS: u64 = 1_000_000;

/// One row of the decay trace.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecaySample {
    pub tick: u64,
    pub centre: f64,
    pub total: f64,
}

/// Deposit `amount` on the centre cell of the configured pheromone field
/// and apply `ticks` rounds of decay, sampling after each.
pub fn simulate(
    config: &Config,
    stimulus: &str,
    ticks: u64,
    amount: f64,
) -> Result<Vec<DecaySample>> {
    if ticks > MAX_TICKS {
        bail!("Tick count {ticks} is too large (at most {MAX_TICKS})");
    }
    let registry = config.registry()?;
    let kind = registry.resolve(stimulus)?;

    let mut field = create_pheromone_grid(config.pheromone.width, config.pheromone.height)
        .context("Failed to build pheromone field")?;
    let centre = field
        .id_at(field.height() / 2, field.width() / 2)
        .context("Pheromone field has no centre cell")?;

    match field.cell_mut(centre) {
        Some(cell) => cell.payload_mut().deposit(&kind, amount)?,
        None => bail!("Centre cell {centre} missing from field"),
    };

    let mut samples = Vec::new();
    let sample = |tick: u64, field: &Lattice<Pheromone>| DecaySample {
        tick,
        centre: field
            .cell(centre)
            .map(|c| c.payload().concentration(&kind))
            .unwrap_or(0.0),
        total: field.total_concentration(&kind),
    };
    samples.push(sample(0, &field));

    let threshold = config.pheromone.evaporation_threshold;
    for tick in 1..=ticks {
        field.decay(&kind);
        let mut evaporated = 0;
        for cell in field.iter_mut() {
            evaporated += cell
                .payload_mut()
                .evaporate_below(threshold)
                .context("Bad pheromone.evaporation_threshold")?;
        }
        if evaporated > 0 {
            tracing::debug!(tick, evaporated, "signal evaporated");
        }
        samples.push(sample(tick, &field));
    }

    Ok(samples)
}

pub fn run(config: &Config, stimulus: &str, ticks: u64, amount: f64) -> Result<()> {
    let samples = simulate(config, stimulus, ticks, amount)?;

    println!("{} {}", "Decay trace for".white().bold(), stimulus.cyan());
    println!("{}", "═".repeat(40).dimmed());
    println!("  {:>6}  {:>14}", "tick", "concentration");
    for s in &samples {
        println!("  {:>6}  {:>14.6}", s.tick, s.centre);
    }
    println!("{}", "═".repeat(40).dimmed());

    Ok(())
}
