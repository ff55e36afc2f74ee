//! Navigation grid construction and A* pathfinding over labyrinth scenes.
//!
//! A [`grid::NavGrid`] is built once from labelled floor and wall positions,
//! after which any number of searches can run against it through
//! [`pathfind::PathFinder`].
use std::cmp::Ordering;
use std::hash::BuildHasherDefault;

use indexmap::IndexMap;
use rustc_hash::FxHasher;

mod astar;
pub mod cell;
pub mod dir;
pub mod error;
pub mod grid;
mod macros;
pub mod neighbor;
pub mod path;
pub mod pathfind;
pub mod target;

pub mod prelude {
    pub use crate::cell::Cell;
    pub use crate::dir::Dir;
    pub use crate::error::NavError;
    pub use crate::grid::{NavGrid, NavGridBuilder, NavGridSettings};
    pub use crate::neighbor::CardinalNeighborhood;
    pub use crate::path::Path;
    pub use crate::pathfind::{find_paths, PathFinder, PathRequest};
    pub use crate::target::{FirstTarget, IndexTarget, RandomTarget, TargetSelector};
}

/// Accumulated movement cost along a path.
pub type Cost = f64;

type FxIndexMap<K, V> = IndexMap<K, V, BuildHasherDefault<FxHasher>>;

/// Frontier entry for the A* open set.
///
/// Ordered so that a max-heap pops the lowest `estimated_cost` first. Equal
/// estimates are resolved by `index`, the order in which the cell first
/// entered the open set: earlier cells win.
pub(crate) struct SmallestCostHolder {
    pub(crate) estimated_cost: Cost,
    pub(crate) cost: Cost,
    pub(crate) index: usize,
}

impl PartialEq for SmallestCostHolder {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SmallestCostHolder {}

impl PartialOrd for SmallestCostHolder {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SmallestCostHolder {
    fn cmp(&self, other: &Self) -> Ordering {
        match other.estimated_cost.total_cmp(&self.estimated_cost) {
            Ordering::Equal => other.index.cmp(&self.index),
            s => s,
        }
    }
}
