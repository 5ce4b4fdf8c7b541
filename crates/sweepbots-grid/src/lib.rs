//! Bounded multi-occupancy grid used by the SweepBots simulation.
//!
//! The grid is a mutable spatial index over a fixed `width x height`
//! rectangle of integer cells. A cell may host any number of agents, and the
//! grid tracks both directions of the mapping: cell -> occupants and
//! occupant -> cell. Neighborhood queries clip to the bounds; the grid never
//! wraps.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use thiserror::Error;

/// Integer cell coordinate on the bounded grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct CellPos {
    pub x: u32,
    pub y: u32,
}

impl CellPos {
    /// Construct a new cell coordinate.
    #[must_use]
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for CellPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Neighborhood result sized for a full Moore neighborhood plus the center.
pub type NeighborList = SmallVec<[CellPos; 9]>;

/// Errors emitted by grid operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    /// Indicates configuration values that cannot be used.
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),
    /// Placement or move target lies outside the grid rectangle.
    #[error("cell {pos} is outside the {width}x{height} grid")]
    OutOfBounds { pos: CellPos, width: u32, height: u32 },
    /// The agent is not currently tracked by the grid.
    #[error("agent is not placed on the grid")]
    NotPlaced,
    /// The agent is already tracked; `move_to` is the relocation path.
    #[error("agent is already placed at {0}")]
    AlreadyPlaced(CellPos),
}

/// Spatial index tracking which agents occupy which cells.
///
/// Generic over the agent id so the crate stays independent of the key type
/// the simulation core allocates. Every operation keeps the occupant list and
/// the reverse position map in agreement before returning.
#[derive(Debug, Clone)]
pub struct OccupancyGrid<Id> {
    width: u32,
    height: u32,
    cells: Vec<Vec<Id>>,
    positions: HashMap<Id, CellPos>,
}

impl<Id: Copy + Eq + Hash> OccupancyGrid<Id> {
    /// Construct an empty grid with `width * height` cells.
    pub fn new(width: u32, height: u32) -> Result<Self, GridError> {
        if width == 0 || height == 0 {
            return Err(GridError::InvalidConfig(
                "grid dimensions must be non-zero",
            ));
        }
        let cell_count = (width as usize) * (height as usize);
        Ok(Self {
            width,
            height,
            cells: (0..cell_count).map(|_| Vec::new()).collect(),
            positions: HashMap::new(),
        })
    }

    /// Width of the grid in cells.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height of the grid in cells.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Total number of cells.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        (self.width as usize) * (self.height as usize)
    }

    /// Number of agents currently placed.
    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Returns true when no agents are placed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Returns true when `pos` lies inside the grid rectangle.
    #[must_use]
    pub const fn in_bounds(&self, pos: CellPos) -> bool {
        pos.x < self.width && pos.y < self.height
    }

    #[inline]
    fn offset(&self, pos: CellPos) -> usize {
        (pos.y as usize) * (self.width as usize) + (pos.x as usize)
    }

    fn bounds_check(&self, pos: CellPos) -> Result<(), GridError> {
        if self.in_bounds(pos) {
            Ok(())
        } else {
            Err(GridError::OutOfBounds {
                pos,
                width: self.width,
                height: self.height,
            })
        }
    }

    /// Insert `id` at `pos`.
    pub fn place(&mut self, id: Id, pos: CellPos) -> Result<(), GridError> {
        self.bounds_check(pos)?;
        if let Some(&current) = self.positions.get(&id) {
            return Err(GridError::AlreadyPlaced(current));
        }
        let offset = self.offset(pos);
        self.cells[offset].push(id);
        self.positions.insert(id, pos);
        Ok(())
    }

    /// Remove `id` from its current cell, returning the vacated coordinate.
    pub fn remove(&mut self, id: Id) -> Result<CellPos, GridError> {
        let pos = self.positions.remove(&id).ok_or(GridError::NotPlaced)?;
        let offset = self.offset(pos);
        let cell = &mut self.cells[offset];
        if let Some(slot) = cell.iter().position(|occupant| *occupant == id) {
            cell.swap_remove(slot);
        }
        Ok(pos)
    }

    /// Atomically relocate `id` to `new_pos`, returning the vacated cell.
    ///
    /// The bounds check runs before any mutation so a failed move leaves the
    /// grid untouched.
    pub fn move_to(&mut self, id: Id, new_pos: CellPos) -> Result<CellPos, GridError> {
        self.bounds_check(new_pos)?;
        if !self.positions.contains_key(&id) {
            return Err(GridError::NotPlaced);
        }
        let old_pos = self.remove(id)?;
        let offset = self.offset(new_pos);
        self.cells[offset].push(id);
        self.positions.insert(id, new_pos);
        Ok(old_pos)
    }

    /// Current coordinate of `id`, if placed.
    #[must_use]
    pub fn position_of(&self, id: Id) -> Option<CellPos> {
        self.positions.get(&id).copied()
    }

    /// Occupants of `pos`, oldest placement first. Empty for out-of-bounds
    /// coordinates.
    #[must_use]
    pub fn contents_of(&self, pos: CellPos) -> &[Id] {
        if !self.in_bounds(pos) {
            return &[];
        }
        &self.cells[self.offset(pos)]
    }

    /// Moore neighborhood of `pos` clipped to the grid bounds.
    ///
    /// Corner and edge cells legitimately yield fewer than eight neighbors.
    /// With `include_center` the center cell is part of the result.
    #[must_use]
    pub fn neighbors_of(&self, pos: CellPos, include_center: bool) -> NeighborList {
        let mut neighbors = NeighborList::new();
        if !self.in_bounds(pos) {
            return neighbors;
        }
        for dy in -1i64..=1 {
            for dx in -1i64..=1 {
                if dx == 0 && dy == 0 && !include_center {
                    continue;
                }
                let x = i64::from(pos.x) + dx;
                let y = i64::from(pos.y) + dy;
                if x < 0 || y < 0 || x >= i64::from(self.width) || y >= i64::from(self.height) {
                    continue;
                }
                neighbors.push(CellPos::new(x as u32, y as u32));
            }
        }
        neighbors
    }

    /// Number of cells hosting at least one agent.
    #[must_use]
    pub fn occupied_cells(&self) -> usize {
        self.cells.iter().filter(|cell| !cell.is_empty()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(width: u32, height: u32) -> OccupancyGrid<u32> {
        OccupancyGrid::new(width, height).expect("grid")
    }

    #[test]
    fn construction_rejects_zero_dimensions() {
        assert!(matches!(
            OccupancyGrid::<u32>::new(0, 4),
            Err(GridError::InvalidConfig(_))
        ));
        assert!(matches!(
            OccupancyGrid::<u32>::new(4, 0),
            Err(GridError::InvalidConfig(_))
        ));
    }

    #[test]
    fn place_and_remove_round_trip() {
        let mut grid = grid(3, 3);
        let pos = CellPos::new(2, 1);
        grid.place(7, pos).expect("place");
        assert_eq!(grid.position_of(7), Some(pos));
        assert_eq!(grid.contents_of(pos), &[7]);
        assert_eq!(grid.len(), 1);

        let vacated = grid.remove(7).expect("remove");
        assert_eq!(vacated, pos);
        assert!(grid.contents_of(pos).is_empty());
        assert!(grid.is_empty());
        assert_eq!(grid.position_of(7), None);
    }

    #[test]
    fn place_rejects_out_of_bounds_and_duplicates() {
        let mut grid = grid(2, 2);
        let outside = CellPos::new(2, 0);
        assert_eq!(
            grid.place(1, outside),
            Err(GridError::OutOfBounds {
                pos: outside,
                width: 2,
                height: 2
            })
        );

        let pos = CellPos::new(0, 1);
        grid.place(1, pos).expect("place");
        assert_eq!(
            grid.place(1, CellPos::new(1, 1)),
            Err(GridError::AlreadyPlaced(pos))
        );
    }

    #[test]
    fn remove_untracked_agent_fails() {
        let mut grid = grid(2, 2);
        assert_eq!(grid.remove(9), Err(GridError::NotPlaced));
        assert_eq!(
            grid.move_to(9, CellPos::new(0, 0)),
            Err(GridError::NotPlaced)
        );
    }

    #[test]
    fn move_to_updates_both_directions() {
        let mut grid = grid(3, 3);
        let from = CellPos::new(0, 0);
        let to = CellPos::new(1, 2);
        grid.place(4, from).expect("place");

        let vacated = grid.move_to(4, to).expect("move");
        assert_eq!(vacated, from);
        assert!(grid.contents_of(from).is_empty());
        assert_eq!(grid.contents_of(to), &[4]);
        assert_eq!(grid.position_of(4), Some(to));
    }

    #[test]
    fn failed_move_leaves_grid_untouched() {
        let mut grid = grid(2, 2);
        let pos = CellPos::new(1, 1);
        grid.place(3, pos).expect("place");

        let outside = CellPos::new(5, 5);
        assert!(matches!(
            grid.move_to(3, outside),
            Err(GridError::OutOfBounds { .. })
        ));
        assert_eq!(grid.position_of(3), Some(pos));
        assert_eq!(grid.contents_of(pos), &[3]);
    }

    #[test]
    fn cells_support_multiple_occupants() {
        let mut grid = grid(4, 4);
        let pos = CellPos::new(1, 1);
        grid.place(1, pos).expect("place");
        grid.place(2, pos).expect("place");
        grid.place(3, pos).expect("place");

        assert_eq!(grid.contents_of(pos), &[1, 2, 3]);
        assert_eq!(grid.len(), 3);
        assert_eq!(grid.occupied_cells(), 1);

        grid.remove(2).expect("remove");
        let remaining = grid.contents_of(pos);
        assert_eq!(remaining.len(), 2);
        assert!(remaining.contains(&1));
        assert!(remaining.contains(&3));
    }

    #[test]
    fn corner_neighborhood_is_exactly_three_cells() {
        let grid = grid(5, 5);
        let neighbors = grid.neighbors_of(CellPos::new(0, 0), false);
        assert_eq!(neighbors.len(), 3);
        for pos in &neighbors {
            assert!(grid.in_bounds(*pos));
        }
        assert!(neighbors.contains(&CellPos::new(1, 0)));
        assert!(neighbors.contains(&CellPos::new(0, 1)));
        assert!(neighbors.contains(&CellPos::new(1, 1)));
    }

    #[test]
    fn edge_and_interior_neighborhood_sizes() {
        let grid = grid(5, 5);
        assert_eq!(grid.neighbors_of(CellPos::new(2, 0), false).len(), 5);
        assert_eq!(grid.neighbors_of(CellPos::new(2, 2), false).len(), 8);
        assert_eq!(grid.neighbors_of(CellPos::new(4, 4), false).len(), 3);
    }

    #[test]
    fn include_center_adds_the_queried_cell() {
        let grid = grid(5, 5);
        let center = CellPos::new(2, 2);
        let neighbors = grid.neighbors_of(center, true);
        assert_eq!(neighbors.len(), 9);
        assert!(neighbors.contains(&center));
    }

    #[test]
    fn degenerate_single_cell_grid_has_no_neighbors() {
        let grid = grid(1, 1);
        assert!(grid.neighbors_of(CellPos::new(0, 0), false).is_empty());
        assert_eq!(grid.neighbors_of(CellPos::new(0, 0), true).len(), 1);
    }

    #[test]
    fn occupied_cells_counts_distinct_cells() {
        let mut grid = grid(3, 3);
        grid.place(1, CellPos::new(0, 0)).expect("place");
        grid.place(2, CellPos::new(0, 0)).expect("place");
        grid.place(3, CellPos::new(2, 2)).expect("place");
        assert_eq!(grid.occupied_cells(), 2);
        assert_eq!(grid.cell_count(), 9);
    }
}
