//! This module defines the `Cell` struct, the atomic unit of a `NavGrid`.
use bevy::math::{UVec2, Vec3};
use std::hash::{Hash, Hasher};

/// A single walkable or blocked slot in a [`crate::grid::NavGrid`].
///
/// Cells are immutable once the grid is built. Search state is kept by each
/// search, never on the cell, so the same grid can serve many searches.
#[derive(Debug, Clone, Copy)]
pub struct Cell {
    /// Column and row of the cell in the grid.
    pub(crate) grid_position: UVec2,
    /// The scene position this cell was built from.
    pub(crate) world_position: Vec3,
    /// Walls block all movement.
    pub(crate) wall: bool,
}

impl Cell {
    pub(crate) fn new(grid_position: UVec2, world_position: Vec3, wall: bool) -> Self {
        Cell {
            grid_position,
            world_position,
            wall,
        }
    }

    /// Column and row of the cell.
    pub fn grid_position(&self) -> UVec2 {
        self.grid_position
    }

    /// The world-space position the cell represents.
    pub fn world_position(&self) -> Vec3 {
        self.world_position
    }

    pub fn is_wall(&self) -> bool {
        self.wall
    }

    pub fn is_passable(&self) -> bool {
        !self.wall
    }
}

impl PartialEq for Cell {
    fn eq(&self, other: &Self) -> bool {
        self.grid_position == other.grid_position
    }
}

impl Eq for Cell {}

impl Hash for Cell {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.grid_position.hash(state);
    }
}
