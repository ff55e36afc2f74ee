//! Cardinal directions on the navigation grid.
use bevy::math::{IVec2, UVec2};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Dir {
    NORTH = 0,
    EAST = 1,
    SOUTH = 2,
    WEST = 3,
}

pub use self::Dir::*;

impl Dir {
    /// The four directions in neighbour order: north, east, south, west.
    ///
    /// Searches expand neighbours in this order, so it decides which of two
    /// equally good routes is returned.
    pub fn cardinal() -> std::iter::Copied<std::slice::Iter<'static, Dir>> {
        [NORTH, EAST, SOUTH, WEST].iter().copied()
    }

    /// Grid offset of one step in this direction.
    pub fn vector(self) -> (i32, i32) {
        match self {
            NORTH => (0, 1),
            EAST => (1, 0),
            SOUTH => (0, -1),
            WEST => (-1, 0),
        }
    }

    pub fn opposite(self) -> Dir {
        match self {
            NORTH => SOUTH,
            EAST => WEST,
            SOUTH => NORTH,
            WEST => EAST,
        }
    }

    /// Returns the direction of a single step from `from` to `to`,
    /// or `None` if the two positions are not 4-adjacent.
    pub fn between(from: UVec2, to: UVec2) -> Option<Dir> {
        let delta = to.as_ivec2() - from.as_ivec2();
        Dir::cardinal().find(|dir| {
            let (dx, dy) = dir.vector();
            delta == IVec2::new(dx, dy)
        })
    }

    /// Applies one step in this direction, returning `None` when the result
    /// would have a negative coordinate.
    pub fn step(self, pos: UVec2) -> Option<UVec2> {
        let (dx, dy) = self.vector();
        let x = pos.x.checked_add_signed(dx)?;
        let y = pos.y.checked_add_signed(dy)?;
        Some(UVec2::new(x, y))
    }
}
