//! Environment factory — builds fully linked lattices.
//!
//! Every grid is built by the same sweep: rows top to bottom, columns
//! left to right. Each new cell links back to the neighbours that already
//! exist (west, north, north-west, north-east). Since [`Lattice::link`]
//! writes both ends, the remaining four directions are filled in by the
//! cells created later, and every link is made exactly once.
//!
//! Inputs are validated before anything is allocated, so a failed call
//! never hands back a partial lattice.

use crate::cell::{CellId, FoodSource, Nest, Pheromone};
use crate::direction::Direction;
use crate::error::{FormicaError, Result};
use crate::lattice::Lattice;

/// Identifier prefix used for pheromone grid cells.
pub const PHEROMONE_PREFIX: &str = "n";

/// Build a nest lattice whose cells are named after the nest.
pub fn create_nest_grid(nest_name: &str, width: i64, height: i64) -> Result<Lattice<Nest>> {
    let lattice = build_grid(nest_name, width, height, |_, _| Nest)?;
    tracing::debug!(
        kind = "nest",
        name = nest_name,
        width,
        height,
        cells = lattice.len(),
        "lattice constructed"
    );
    Ok(lattice)
}

/// Build an empty pheromone field.
pub fn create_pheromone_grid(width: i64, height: i64) -> Result<Lattice<Pheromone>> {
    let lattice = build_grid(PHEROMONE_PREFIX, width, height, |_, _| Pheromone::new())?;
    tracing::debug!(
        kind = "pheromone",
        width,
        height,
        cells = lattice.len(),
        "lattice constructed"
    );
    Ok(lattice)
}

/// Build a food source with `total_food` spread evenly over its cells.
pub fn create_food_source_grid(
    source_name: &str,
    width: i64,
    height: i64,
    total_food: f64,
) -> Result<Lattice<FoodSource>> {
    let (w, h) = validate_dimensions(width, height)?;
    if !total_food.is_finite() || total_food < 0.0 {
        return Err(FormicaError::InvalidFoodTotal(total_food));
    }
    let cells = cell_count(w, h).ok_or(FormicaError::DegenerateGrid { width, height })?;
    let share = FoodSource::new(total_food / cells as f64)?;

    let lattice = build_grid(source_name, width, height, |_, _| share)?;
    tracing::debug!(
        kind = "food",
        name = source_name,
        width,
        height,
        cells = lattice.len(),
        total_food,
        share = share.remaining(),
        "lattice constructed"
    );
    Ok(lattice)
}

/// Build a lattice of any payload with the shared linking sweep.
///
/// `payload` is called once per cell with `(row, col)` and cell names are
/// `"<prefix>-<row>,<col>"`.
pub fn build_grid<P, F>(
    prefix: &str,
    width: i64,
    height: i64,
    mut payload: F,
) -> Result<Lattice<P>>
where
    F: FnMut(usize, usize) -> P,
{
    let (w, h) = validate_dimensions(width, height)?;
    cell_count(w, h).ok_or(FormicaError::DegenerateGrid { width, height })?;
    let mut lattice = Lattice::try_with_capacity(w, h)
        .ok_or(FormicaError::DegenerateGrid { width, height })?;
    let at = |row: usize, col: usize| CellId(row * w + col);

    for row in 0..h {
        for col in 0..w {
            let id = lattice.push(format!("{prefix}-{row},{col}"), payload(row, col));

            if col > 0 {
                lattice.link(id, at(row, col - 1), Direction::West)?;
            }
            if row > 0 {
                lattice.link(id, at(row - 1, col), Direction::North)?;
            }
            if row > 0 && col > 0 {
                lattice.link(id, at(row - 1, col - 1), Direction::NorthWest)?;
            }
            if row > 0 && col + 1 < w {
                lattice.link(id, at(row - 1, col + 1), Direction::NorthEast)?;
            }
        }
    }

    Ok(lattice)
}

fn validate_dimensions(width: i64, height: i64) -> Result<(usize, usize)> {
    if width <= 0 || height <= 0 {
        return Err(FormicaError::invalid_dimension(width, height));
    }
    let w = usize::try_from(width).map_err(|_| FormicaError::DegenerateGrid { width, height })?;
    let h = usize::try_from(height).map_err(|_| FormicaError::DegenerateGrid { width, height })?;
    Ok((w, h))
}

/// `width * height`, or `None` when it is zero or overflows.
fn cell_count(width: usize, height: usize) -> Option<usize> {
    width.checked_mul(height).filter(|&n| n > 0)
}
