//! Build a lattice from config and report on it.

use anyhow::{Context, Result};
use colored::Colorize;
use formica_core::prelude::*;
use serde::Serialize;

use crate::config::Config;
use crate::GridKind;

/// Summary of a constructed lattice.
#[derive(Debug, Clone, Serialize)]
pub struct BuildReport {
    pub kind: &'static str,
    pub prefix: String,
    pub width: usize,
    pub height: usize,
    pub cells: usize,
    pub links: usize,
    pub border_cells: usize,
    pub interior_cells: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_food: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub food_per_cell: Option<f64>,
}

impl BuildReport {
    fn from_lattice<P>(kind: &'static str, prefix: &str, lattice: &Lattice<P>) -> Self {
        let border_cells = lattice
            .iter()
            .filter(|c| lattice.is_border(c.handle()))
            .count();
        Self {
            kind,
            prefix: prefix.to_string(),
            width: lattice.width(),
            height: lattice.height(),
            cells: lattice.len(),
            links: lattice.link_count(),
            border_cells,
            interior_cells: lattice.len() - border_cells,
            total_food: None,
            food_per_cell: None,
        }
    }
}

/// Build the requested lattice and verify its adjacency.
pub fn build(
    config: &Config,
    kind: GridKind,
    width: Option<i64>,
    height: Option<i64>,
) -> Result<BuildReport> {
    let report = match kind {
        GridKind::Nest => {
            let w = width.unwrap_or(config.nest.width);
            let h = height.unwrap_or(config.nest.height);
            let lattice = create_nest_grid(&config.nest.name, w, h)
                .with_context(|| format!("Failed to build nest grid {w}x{h}"))?;
            lattice.verify_symmetry()?;
            BuildReport::from_lattice("nest", &config.nest.name, &lattice)
        }
        GridKind::Pheromone => {
            let w = width.unwrap_or(config.pheromone.width);
            let h = height.unwrap_or(config.pheromone.height);
            let lattice = create_pheromone_grid(w, h)
                .with_context(|| format!("Failed to build pheromone grid {w}x{h}"))?;
            lattice.verify_symmetry()?;
            BuildReport::from_lattice("pheromone", PHEROMONE_PREFIX, &lattice)
        }
        GridKind::Food => {
            let w = width.unwrap_or(config.food.width);
            let h = height.unwrap_or(config.food.height);
            let lattice = create_food_source_grid(&config.food.name, w, h, config.food.total)
                .with_context(|| format!("Failed to build food grid {w}x{h}"))?;
            lattice.verify_symmetry()?;
            let mut report = BuildReport::from_lattice("food", &config.food.name, &lattice);
            report.total_food = Some(lattice.total_remaining());
            report.food_per_cell = lattice.get(0, 0).map(|c| c.payload().remaining());
            report
        }
    };
    Ok(report)
}

pub fn run(
    config: &Config,
    kind: GridKind,
    width: Option<i64>,
    height: Option<i64>,
    json: bool,
) -> Result<()> {
    let report = build(config, kind, width, height)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{}", format!("Formica {} lattice", report.kind).white().bold());
    println!("{}", "═".repeat(40).dimmed());
    println!();
    println!("{}", "Shape".blue().bold());
    println!("  Dimensions:        {}x{}", report.width, report.height);
    println!("  Cells:             {}", report.cells.to_string().cyan());
    println!("  Id prefix:         {}", report.prefix);
    println!();
    println!("{}", "Adjacency".blue().bold());
    println!("  Links:             {}", report.links.to_string().cyan());
    println!("  Border cells:      {}", report.border_cells);
    println!("  Interior cells:    {}", report.interior_cells);
    println!("  Symmetry:          {}", "ok".green());

    if let (Some(total), Some(share)) = (report.total_food, report.food_per_cell) {
        println!();
        println!("{}", "Food".blue().bold());
        println!("  Total:             {:.4}", total);
        println!("  Per cell:          {:.4}", share);
    }

    println!();
    println!("{}", "═".repeat(40).dimmed());
    Ok(())
}
