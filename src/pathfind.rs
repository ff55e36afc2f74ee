//! This module defines the `PathFinder` and the batch search helper.
use bevy::{
    log::{debug, warn},
    math::{UVec2, Vec3},
};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::{
    astar::astar_grid,
    error::NavError,
    grid::NavGrid,
    macros::timed,
    path::Path,
    target::{RandomTarget, TargetSelector},
};

/// Runs A* searches from world positions on a shared [`NavGrid`].
///
/// When several targets are offered, the [`TargetSelector`] decides which one
/// the search heads for. The default selector picks at random; tests and
/// replays can inject a fixed one.
///
/// ```
/// use bevy::math::Vec3;
/// use labyrinth_nav::prelude::*;
///
/// let mut floors = Vec::new();
/// let mut walls = Vec::new();
/// for x in 0..5 {
///     for z in 0..5 {
///         let position = Vec3::new(x as f32 * 10.0, 0.0, z as f32 * 10.0);
///         if x == 0 || z == 0 || x == 4 || z == 4 {
///             walls.push(position);
///         } else {
///             floors.push(position);
///         }
///     }
/// }
///
/// let grid = NavGrid::build(
///     &floors,
///     &walls,
///     Vec3::new(40.0, 0.0, 0.0),
///     Vec3::new(0.0, 0.0, 40.0),
///     10.0,
/// )
/// .unwrap();
///
/// let mut finder = PathFinder::with_selector(&grid, FirstTarget);
/// let path = finder
///     .find_path(Vec3::new(10.0, 0.0, 10.0), &[Vec3::new(30.0, 0.0, 30.0)])
///     .unwrap()
///     .expect("target is reachable");
///
/// assert_eq!(path.len(), 4);
/// ```
pub struct PathFinder<'a, S: TargetSelector = RandomTarget> {
    grid: &'a NavGrid,
    selector: S,
    size_hint: usize,
}

impl<'a> PathFinder<'a, RandomTarget> {
    /// A path finder that picks among multiple targets at random.
    pub fn new(grid: &'a NavGrid) -> Self {
        PathFinder::with_selector(grid, RandomTarget::new())
    }
}

impl<'a, S: TargetSelector> PathFinder<'a, S> {
    /// A path finder with an injected target selection strategy.
    pub fn with_selector(grid: &'a NavGrid, selector: S) -> Self {
        PathFinder {
            grid,
            selector,
            size_hint: grid.len(),
        }
    }

    /// Presizes the frontier and scratch storage of every search.
    pub fn with_size_hint(mut self, size_hint: usize) -> Self {
        self.size_hint = size_hint;
        self
    }

    /// Returns the grid this path finder searches.
    pub fn grid(&self) -> &'a NavGrid {
        self.grid
    }

    /// Returns the target selector.
    pub fn selector_mut(&mut self) -> &mut S {
        &mut self.selector
    }

    /// Finds a path from `start` to one of `targets`.
    ///
    /// Both positions are resolved with [`NavGrid::cell_at`], so positions
    /// outside the grid are clamped onto its border.
    ///
    /// # Returns
    /// * `Ok(Some(path))` - The cells to walk through, start excluded. Empty
    ///   when start and target share a cell.
    /// * `Ok(None)` - The chosen target can't be reached.
    /// * `Err(_)` - No targets were given, the selector picked an invalid
    ///   index, or the search state was corrupt.
    pub fn find_path(&mut self, start: Vec3, targets: &[Vec3]) -> Result<Option<Path>, NavError> {
        if targets.is_empty() {
            return Err(NavError::NoTargets);
        }

        let index = self.selector.select(targets);
        let target = *targets.get(index).ok_or(NavError::InvalidTargetIndex {
            index,
            len: targets.len(),
        })?;

        let start_pos = self.grid.cell_at(start).grid_position();
        let goal_pos = self.grid.cell_at(target).grid_position();

        debug!(
            "Searching from {} to {} (target {} of {})",
            start_pos,
            goal_pos,
            index,
            targets.len()
        );

        let path = timed!("Found path", {
            astar_grid(self.grid, start_pos, goal_pos, self.size_hint)
        })?;

        if path.is_none() {
            warn!("Destination {} unreachable from {}", goal_pos, start_pos);
        }

        Ok(path)
    }
}

/// One search in a batch, in grid positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathRequest {
    pub start: UVec2,
    pub goal: UVec2,
}

impl PathRequest {
    pub fn new(start: UVec2, goal: UVec2) -> Self {
        PathRequest { start, goal }
    }
}

/// Runs a batch of searches on the same grid, returning results in request order.
///
/// With the `parallel` feature the searches run concurrently; each search
/// keeps its own scratch state so they never interfere.
pub fn find_paths(
    grid: &NavGrid,
    requests: &[PathRequest],
) -> Vec<Result<Option<Path>, NavError>> {
    timed!("Found batch of paths", {
        #[cfg(feature = "parallel")]
        let iter = requests.par_iter();
        #[cfg(not(feature = "parallel"))]
        let iter = requests.iter();

        iter.map(|request| grid.pathfind(request.start, request.goal))
            .collect()
    })
}
