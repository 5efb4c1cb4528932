//! Lattice — the arena that owns every cell of a grid.
//!
//! Cells are stored row-major in a single `Vec`, so a [`CellId`] is just
//! `row * width + col`. Adjacency is recorded on the cells as handles
//! back into this arena. The only way to change adjacency from outside
//! the crate is [`Lattice::link`] / [`Lattice::unlink`], both of which
//! write the two ends of a link together.

use crate::cell::{Cell, CellId, FoodSource, Pheromone};
use crate::direction::Direction;
use crate::error::{FormicaError, Result};
use crate::stimulus::{StimulusRegistry, StimulusType};
use serde::Serialize;

/// A rectangular grid of cells with payload `P`.
#[derive(Debug, Clone, Serialize)]
pub struct Lattice<P> {
    width: usize,
    height: usize,
    cells: Vec<Cell<P>>,
}

impl<P> Lattice<P> {
    /// Empty arena with room for `width * height` cells, or `None` when
    /// that many cells cannot be allocated.
    pub(crate) fn try_with_capacity(width: usize, height: usize) -> Option<Self> {
        let mut cells = Vec::new();
        cells.try_reserve_exact(width.checked_mul(height)?).ok()?;
        Some(Self {
            width,
            height,
            cells,
        })
    }

    /// Append a cell and return its handle.
    pub(crate) fn push(&mut self, name: String, payload: P) -> CellId {
        let id = CellId(self.cells.len());
        self.cells.push(Cell::new(name, id, payload));
        id
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Handle of the cell at `(row, col)`, if inside the grid.
    pub fn id_at(&self, row: usize, col: usize) -> Option<CellId> {
        if row < self.height && col < self.width {
            Some(CellId(row * self.width + col))
        } else {
            None
        }
    }

    /// `(row, col)` of a handle, if it belongs to this lattice.
    pub fn position_of(&self, id: CellId) -> Option<(usize, usize)> {
        if id.0 < self.cells.len() {
            Some((id.0 / self.width, id.0 % self.width))
        } else {
            None
        }
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&Cell<P>> {
        self.id_at(row, col).and_then(|id| self.cell(id))
    }

    pub fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut Cell<P>> {
        let id = self.id_at(row, col)?;
        self.cell_mut(id)
    }

    pub fn cell(&self, id: CellId) -> Option<&Cell<P>> {
        self.cells.get(id.0)
    }

    pub fn cell_mut(&mut self, id: CellId) -> Option<&mut Cell<P>> {
        self.cells.get_mut(id.0)
    }

    /// Look a cell up by its identifier string.
    pub fn find_by_name(&self, name: &str) -> Option<&Cell<P>> {
        self.cells.iter().find(|c| c.name() == name)
    }

    /// Cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = &Cell<P>> {
        self.cells.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Cell<P>> {
        self.cells.iter_mut()
    }

    /// Rows of cells, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell<P>]> {
        self.cells.chunks(self.width.max(1))
    }

    /// The cell reached by stepping from `id` in `direction`.
    pub fn neighbor_of(&self, id: CellId, direction: Direction) -> Option<&Cell<P>> {
        self.cell(id)?
            .neighbor(direction)
            .and_then(|n| self.cell(n))
    }

    /// Populated directions of a cell. Empty for unknown handles.
    pub fn neighbors_of(&self, id: CellId) -> impl Iterator<Item = (Direction, CellId)> + '_ {
        self.cell(id).into_iter().flat_map(|c| c.neighbors())
    }

    /// Whether a cell sits on the outer ring of the grid.
    pub fn is_border(&self, id: CellId) -> bool {
        match self.position_of(id) {
            Some((row, col)) => {
                row == 0 || col == 0 || row + 1 == self.height || col + 1 == self.width
            }
            None => false,
        }
    }

    /// Number of undirected links.
    pub fn link_count(&self) -> usize {
        self.cells.iter().map(|c| c.neighbor_count()).sum::<usize>() / 2
    }

    /// Make `b` the neighbour of `a` in `direction`, and `a` the neighbour
    /// of `b` in the opposite direction.
    ///
    /// Any link either end already had in those slots is removed on both
    /// of its ends first.
    pub fn link(&mut self, a: CellId, b: CellId, direction: Direction) -> Result<()> {
        self.check(a)?;
        self.check(b)?;
        if a == b {
            return Err(FormicaError::SelfLink(a));
        }
        let back = direction.opposite();

        if let Some(stale) = self.cells[a.0].neighbor(direction).filter(|&x| x != b) {
            tracing::warn!(
                cell = self.cells[a.0].name(),
                %direction,
                "replacing existing link"
            );
            self.cells[stale.0].clear_neighbor(back);
        }
        if let Some(stale) = self.cells[b.0].neighbor(back).filter(|&x| x != a) {
            tracing::warn!(
                cell = self.cells[b.0].name(),
                direction = %back,
                "replacing existing link"
            );
            self.cells[stale.0].clear_neighbor(direction);
        }

        self.cells[a.0].set_neighbor(direction, b);
        self.cells[b.0].set_neighbor(back, a);
        Ok(())
    }

    /// Remove the link leaving `a` in `direction`, on both ends.
    ///
    /// Returns the former neighbour, if there was one.
    pub fn unlink(&mut self, a: CellId, direction: Direction) -> Result<Option<CellId>> {
        self.check(a)?;
        let former = self.cells[a.0].clear_neighbor(direction);
        if let Some(b) = former {
            self.cells[b.0].clear_neighbor(direction.opposite());
        }
        Ok(former)
    }

    /// Check the symmetry invariant over the whole lattice.
    ///
    /// Reports the first link whose far end does not point back.
    pub fn verify_symmetry(&self) -> Result<()> {
        for cell in &self.cells {
            for (direction, other) in cell.neighbors() {
                let back = self
                    .cell(other)
                    .and_then(|o| o.neighbor(direction.opposite()));
                if back != Some(cell.handle()) {
                    return Err(FormicaError::broken_adjacency(cell.name(), direction));
                }
            }
        }
        Ok(())
    }

    fn check(&self, id: CellId) -> Result<()> {
        if id.0 < self.cells.len() {
            Ok(())
        } else {
            Err(FormicaError::UnknownCell(id))
        }
    }
}

impl Lattice<Pheromone> {
    /// Apply one tick of decay for `stimulus` to every cell.
    pub fn decay(&mut self, stimulus: &StimulusType) {
        for cell in &mut self.cells {
            cell.payload_mut().decay(stimulus);
        }
        tracing::trace!(stimulus = stimulus.name(), cells = self.cells.len(), "decayed lattice");
    }

    /// Apply one tick of decay for every registered stimulus to every cell.
    pub fn decay_all(&mut self, registry: &StimulusRegistry) {
        for cell in &mut self.cells {
            cell.payload_mut().decay_all(registry);
        }
    }

    /// Sum of a stimulus over the lattice.
    pub fn total_concentration(&self, stimulus: &StimulusType) -> f64 {
        self.cells
            .iter()
            .map(|c| c.payload().concentration(stimulus))
            .sum()
    }
}

impl Lattice<FoodSource> {
    /// Food left across all cells.
    pub fn total_remaining(&self) -> f64 {
        self.cells.iter().map(|c| c.payload().remaining()).sum()
    }

    pub fn depleted_count(&self) -> usize {
        self.cells
            .iter()
            .filter(|c| c.payload().is_depleted())
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::Nest;

    /// Unlinked 2x2 arena.
    fn bare() -> Lattice<Nest> {
        let mut lattice = Lattice::try_with_capacity(2, 2).unwrap();
        for row in 0..2 {
            for col in 0..2 {
                lattice.push(format!("t-{row},{col}"), Nest);
            }
        }
        lattice
    }

    #[test]
    fn positions_round_trip() {
        let lattice = bare();
        for row in 0..2 {
            for col in 0..2 {
                let id = lattice.id_at(row, col).unwrap();
                assert_eq!(lattice.position_of(id), Some((row, col)));
            }
        }
        assert_eq!(lattice.id_at(2, 0), None);
        assert_eq!(lattice.position_of(CellId(4)), None);
    }

    #[test]
    fn link_writes_both_ends() {
        let mut lattice = bare();
        lattice.link(CellId(1), CellId(0), Direction::West).unwrap();
        assert_eq!(lattice.cell(CellId(1)).unwrap().neighbor(Direction::West), Some(CellId(0)));
        assert_eq!(lattice.cell(CellId(0)).unwrap().neighbor(Direction::East), Some(CellId(1)));
        assert_eq!(lattice.link_count(), 1);
        lattice.verify_symmetry().unwrap();
    }

    #[test]
    fn link_replaces_stale_links_on_both_sides() {
        let mut lattice = bare();
        lattice.link(CellId(0), CellId(1), Direction::East).unwrap();
        // Re-point 0's east slot at 3; 1 must lose its west back-link.
        lattice.link(CellId(0), CellId(3), Direction::East).unwrap();
        assert_eq!(lattice.cell(CellId(1)).unwrap().neighbor(Direction::West), None);
        assert_eq!(lattice.cell(CellId(3)).unwrap().neighbor(Direction::West), Some(CellId(0)));

        // Now give 3 a different west neighbour; 0 must lose its east link.
        lattice.link(CellId(2), CellId(3), Direction::East).unwrap();
        assert_eq!(lattice.cell(CellId(0)).unwrap().neighbor(Direction::East), None);
        lattice.verify_symmetry().unwrap();
        assert_eq!(lattice.link_count(), 1);
    }

    #[test]
    fn unlink_clears_both_ends() {
        let mut lattice = bare();
        lattice.link(CellId(2), CellId(0), Direction::North).unwrap();
        assert_eq!(lattice.unlink(CellId(0), Direction::South).unwrap(), Some(CellId(2)));
        assert_eq!(lattice.cell(CellId(2)).unwrap().neighbor(Direction::North), None);
        assert_eq!(lattice.unlink(CellId(0), Direction::South).unwrap(), None);
        assert_eq!(lattice.link_count(), 0);
    }

    #[test]
    fn link_rejects_bad_handles() {
        let mut lattice = bare();
        assert_eq!(
            lattice.link(CellId(0), CellId(9), Direction::East),
            Err(FormicaError::UnknownCell(CellId(9)))
        );
        assert_eq!(
            lattice.link(CellId(1), CellId(1), Direction::East),
            Err(FormicaError::SelfLink(CellId(1)))
        );
        assert!(lattice.unlink(CellId(7), Direction::North).is_err());
    }

    #[test]
    fn verify_symmetry_catches_one_sided_links() {
        let mut lattice = bare();
        lattice.cells[0].set_neighbor(Direction::South, CellId(2));
        assert_eq!(
            lattice.verify_symmetry(),
            Err(FormicaError::broken_adjacency("t-0,0", Direction::South))
        );
    }

    #[test]
    fn neighbor_of_follows_handles() {
        let mut lattice = bare();
        lattice.link(CellId(3), CellId(0), Direction::NorthWest).unwrap();
        let nw = lattice.neighbor_of(CellId(3), Direction::NorthWest).unwrap();
        assert_eq!(nw.name(), "t-0,0");
        assert!(lattice.neighbor_of(CellId(3), Direction::North).is_none());
        assert_eq!(lattice.neighbors_of(CellId(0)).count(), 1);
        assert_eq!(lattice.neighbors_of(CellId(42)).count(), 0);
    }

    #[test]
    fn rows_are_width_sized() {
        let lattice = bare();
        let rows: Vec<_> = lattice.rows().collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1][0].name(), "t-1,0");
    }
}
