//! This module defines the `Path` returned by searches.
use bevy::math::{UVec2, Vec3};
use std::collections::VecDeque;

use crate::{cell::Cell, dir::Dir, Cost};

/// The result of a successful search: the cells to walk through, in order.
///
/// The start cell is never part of the path. A path whose start and goal are
/// the same cell is empty but still reports its goal and a cost of zero.
#[derive(Debug, Clone)]
pub struct Path {
    pub(crate) cells: VecDeque<Cell>,
    goal: UVec2,
    cost: Cost,
}

impl Path {
    /// Create a new path from the cells after the start, ending at `goal`.
    /// # Arguments
    /// * `cells` - The cells to move through, goal last
    /// * `goal` - Grid position of the goal
    /// * `cost` - The accumulated movement cost of the path
    ///
    pub fn new(cells: Vec<Cell>, goal: UVec2, cost: Cost) -> Self {
        Path {
            cells: cells.into_iter().collect(),
            goal,
            cost,
        }
    }

    /// An empty path for a search whose start already is the goal.
    pub fn empty(goal: UVec2) -> Self {
        Path::new(Vec::new(), goal, 0.0)
    }

    /// Returns the cells of the path in walking order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> + '_ {
        self.cells.iter()
    }

    /// Returns the grid positions of the path.
    /// Useful to mark the path for rendering.
    pub fn positions(&self) -> Vec<UVec2> {
        self.cells.iter().map(Cell::grid_position).collect()
    }

    /// Returns the world positions of the path.
    pub fn world_positions(&self) -> Vec<Vec3> {
        self.cells.iter().map(Cell::world_position).collect()
    }

    /// Returns true if the path contains the given grid position
    pub fn contains_position(&self, pos: UVec2) -> bool {
        self.cells.iter().any(|cell| cell.grid_position() == pos)
    }

    /// Returns the grid position the path leads to.
    pub fn goal(&self) -> UVec2 {
        self.goal
    }

    /// Returns the movement cost of the path
    pub fn cost(&self) -> Cost {
        self.cost
    }

    /// Returns the length of the path
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns true if the path is empty
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Pops the first cell of the path.
    pub fn pop(&mut self) -> Option<Cell> {
        self.cells.pop_front()
    }

    /// Returns the next cell in the path without removing it.
    pub fn next(&self) -> Option<&Cell> {
        self.cells.front()
    }

    /// Returns the direction of every step when walking the path from `start`.
    ///
    /// Stops early if two consecutive positions are not 4-adjacent, which
    /// only happens when `start` isn't the cell the path was searched from.
    pub fn directions(&self, start: UVec2) -> Vec<Dir> {
        let mut previous = start;
        let mut directions = Vec::with_capacity(self.cells.len());

        for cell in &self.cells {
            match Dir::between(previous, cell.grid_position()) {
                Some(dir) => directions.push(dir),
                None => break,
            }
            previous = cell.grid_position();
        }

        directions
    }
}

impl PartialEq for Path {
    fn eq(&self, other: &Self) -> bool {
        self.goal == other.goal && self.cells == other.cells
    }
}

impl Eq for Path {}

impl IntoIterator for Path {
    type Item = Cell;
    type IntoIter = std::collections::vec_deque::IntoIter<Cell>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.into_iter()
    }
}
