//! The 4-connected neighbourhood used by every search.
use bevy::math::UVec2;
use ndarray::ArrayView2;
use smallvec::SmallVec;

use crate::{cell::Cell, dir::Dir, Cost};

/// Neighbour positions of a cell, at most four.
pub type Neighbors = SmallVec<[UVec2; 4]>;

/// North, east, south and west adjacency with a Manhattan distance heuristic.
///
/// Diagonal movement is not supported.
#[derive(Clone, Copy, Debug, Default)]
pub struct CardinalNeighborhood;

impl CardinalNeighborhood {
    /// Pushes the in-bounds neighbours of `pos` onto `target` in N/E/S/W order.
    /// Walls are included; callers decide whether they can be entered.
    #[inline(always)]
    pub fn neighbors(&self, grid: &ArrayView2<Cell>, pos: UVec2, target: &mut Neighbors) {
        let shape = grid.shape();

        for dir in Dir::cardinal() {
            if let Some(next) = dir.step(pos) {
                if (next.x as usize) < shape[0] && (next.y as usize) < shape[1] {
                    target.push(next);
                }
            }
        }
    }

    /// Manhattan distance between two grid positions.
    #[inline(always)]
    pub fn heuristic(&self, pos: UVec2, target: UVec2) -> u32 {
        pos.x.abs_diff(target.x) + pos.y.abs_diff(target.y)
    }

    /// Euclidean distance between two grid positions, the cost of moving
    /// from one to the other. On this neighbourhood every step costs `1.0`.
    #[inline(always)]
    pub fn step_cost(&self, from: UVec2, to: UVec2) -> Cost {
        let dx = from.x as Cost - to.x as Cost;
        let dy = from.y as Cost - to.y as Cost;
        (dx * dx + dy * dy).sqrt()
    }
}
