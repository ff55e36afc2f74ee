//! A* search over a `NavGrid`.
use bevy::{
    log::{debug, error},
    math::UVec2,
};
use indexmap::map::Entry::{Occupied, Vacant};
use std::collections::BinaryHeap;

use crate::{
    error::NavError, grid::NavGrid, neighbor::Neighbors, path::Path, Cost, FxIndexMap,
    SmallestCostHolder,
};

/// Parent index of the start cell.
const NO_PARENT: usize = usize::MAX;

/// Per-search bookkeeping for one discovered cell.
///
/// The index of a `Visit` in the scratch map is the order in which its cell
/// entered the open set, which doubles as the tie-break between equal `f_cost`s.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Visit {
    /// Scratch-map index of the cell this one was reached from.
    pub(crate) parent: usize,
    /// Accumulated cost from the start (`g`).
    pub(crate) cost: Cost,
    /// Manhattan distance to the goal (`h`).
    pub(crate) heuristic: u32,
    /// Finalized cells are never re-examined.
    pub(crate) closed: bool,
}

impl Visit {
    fn new(parent: usize, cost: Cost, heuristic: u32) -> Self {
        Visit {
            parent,
            cost,
            heuristic,
            closed: false,
        }
    }

    pub(crate) fn f_cost(&self) -> Cost {
        self.cost + self.heuristic as Cost
    }
}

/// A* search algorithm for a [`NavGrid`].
///
/// # Arguments
/// * `grid` - The grid to search. It is only read.
/// * `start` - The starting position in the grid.
/// * `goal` - The goal position in the grid.
/// * `size_hint` - A hint for the size of the binary heap and scratch map.
///
/// # Returns
/// * `Ok(Some(Path))` when the goal is reached, the start excluded from the path.
/// * `Ok(None)` when every reachable cell was expanded without meeting the goal.
/// * `Err(NavError::PathReconstruction)` if the parent chain is broken.
pub(crate) fn astar_grid(
    grid: &NavGrid,
    start: UVec2,
    goal: UVec2,
    size_hint: usize,
) -> Result<Option<Path>, NavError> {
    if start == goal {
        return Ok(Some(Path::empty(goal)));
    }

    let neighborhood = grid.neighborhood();
    let view = grid.view();

    let mut to_visit = BinaryHeap::with_capacity(size_hint / 2);
    let mut visited: FxIndexMap<UVec2, Visit> = FxIndexMap::default();
    visited.reserve(size_hint / 2);

    let start_visit = Visit::new(NO_PARENT, 0.0, neighborhood.heuristic(start, goal));
    to_visit.push(SmallestCostHolder {
        estimated_cost: start_visit.f_cost(),
        cost: 0.0,
        index: 0,
    });
    visited.insert(start, start_visit);

    let mut neighbors = Neighbors::new();

    while let Some(SmallestCostHolder { cost, index, .. }) = to_visit.pop() {
        let (current_pos, current_cost) = {
            let Some((pos, visit)) = visited.get_index_mut(index) else {
                continue;
            };

            // Superseded by a cheaper entry for the same cell.
            if visit.closed || cost > visit.cost {
                continue;
            }

            visit.closed = true;
            (*pos, visit.cost)
        };

        if current_pos == goal {
            debug!(
                "Reached goal {} after discovering {} cells",
                goal,
                visited.len()
            );
            return reconstruct_path(grid, &visited, start, index).map(Some);
        }

        neighbors.clear();
        neighborhood.neighbors(&view, current_pos, &mut neighbors);

        for &neighbor in neighbors.iter() {
            if view[[neighbor.x as usize, neighbor.y as usize]].is_wall() {
                continue;
            }

            let new_cost = current_cost + neighborhood.step_cost(current_pos, neighbor);
            let visit = Visit::new(index, new_cost, neighborhood.heuristic(neighbor, goal));

            let n = match visited.entry(neighbor) {
                Vacant(e) => {
                    let n = e.index();
                    e.insert(visit);
                    n
                }
                Occupied(mut e) => {
                    if e.get().closed || new_cost >= e.get().cost {
                        continue;
                    }
                    let n = e.index();
                    e.insert(visit);
                    n
                }
            };

            to_visit.push(SmallestCostHolder {
                estimated_cost: visit.f_cost(),
                cost: new_cost,
                index: n,
            });
        }
    }

    debug!(
        "Goal {} unreachable from {}, expanded {} cells",
        goal,
        start,
        visited.len()
    );
    Ok(None)
}

/// Walks the parent chain back from `goal_index` to `start`.
///
/// A cell without a parent that isn't the start, or a chain longer than the
/// number of discovered cells, is reported instead of looped on.
pub(crate) fn reconstruct_path(
    grid: &NavGrid,
    visited: &FxIndexMap<UVec2, Visit>,
    start: UVec2,
    goal_index: usize,
) -> Result<Path, NavError> {
    let Some((&goal, goal_visit)) = visited.get_index(goal_index) else {
        error!("Goal index {} missing from search state", goal_index);
        return Err(NavError::PathReconstruction { cell: start, start });
    };

    let mut steps = vec![];
    let mut current = goal_index;

    loop {
        let Some((&pos, visit)) = visited.get_index(current) else {
            error!("Parent index {} missing from search state", current);
            return Err(NavError::PathReconstruction { cell: goal, start });
        };

        if pos == start {
            break;
        }

        let cell = match grid.cell(pos) {
            Some(cell) if visit.parent != NO_PARENT && steps.len() < visited.len() => *cell,
            _ => {
                error!("Path reconstruction stalled at {} before reaching {}", pos, start);
                return Err(NavError::PathReconstruction { cell: pos, start });
            }
        };

        steps.push(cell);
        current = visit.parent;
    }

    steps.reverse();
    Ok(Path::new(steps, goal, goal_visit.cost))
}
