//! This module contains the `NavGrid`, the navigation grid every search runs on.
use bevy::{
    log::{info, warn},
    math::{UVec2, Vec3},
};
use ndarray::{Array2, ArrayView2};
use smallvec::SmallVec;

use crate::{
    astar::astar_grid,
    cell::Cell,
    error::NavError,
    macros::timed,
    neighbor::{CardinalNeighborhood, Neighbors},
    path::Path,
};

/// Settings that control how world positions are mapped onto the grid lattice.
#[derive(Copy, Clone, Debug)]
pub struct NavGridSettings {
    /// World-space size of one cell along both axes.
    pub cell_size: f32,
    /// How far, in cells, a position may sit from its lattice point before
    /// it is rejected.
    pub lattice_tolerance: f32,
    /// If true, both corner references must be part of the wall set.
    pub require_wall_corners: bool,
}

impl Default for NavGridSettings {
    fn default() -> Self {
        NavGridSettings {
            cell_size: 10.0,
            lattice_tolerance: 1e-3,
            require_wall_corners: true,
        }
    }
}

/// Builder for [`NavGrid`].
///
/// Example usage:
/// ```
/// use bevy::math::Vec3;
/// use labyrinth_nav::prelude::*;
///
/// // A 3x3 room: one floor cell ringed by walls.
/// let mut walls = Vec::new();
/// for x in 0..3 {
///     for z in 0..3 {
///         if (x, z) != (1, 1) {
///             walls.push(Vec3::new(x as f32 * 10.0, 10.0, z as f32 * 10.0));
///         }
///     }
/// }
///
/// let grid = NavGridBuilder::new(Vec3::new(20.0, 10.0, 0.0), Vec3::new(0.0, 10.0, 20.0))
///     .cell_size(10.0)
///     .floors([Vec3::new(10.0, 0.0, 10.0)])
///     .walls(walls)
///     .build()
///     .unwrap();
///
/// assert_eq!(grid.width(), 3);
/// assert_eq!(grid.height(), 3);
/// ```
#[derive(Clone, Debug)]
pub struct NavGridBuilder {
    settings: NavGridSettings,
    top_right: Vec3,
    bottom_left: Vec3,
    floors: Vec<Vec3>,
    walls: Vec<Vec3>,
}

impl NavGridBuilder {
    /// Starts a grid spanning the two corner references.
    /// `top_right` becomes the last column of row 0, `bottom_left` the first
    /// column of the last row.
    pub fn new(top_right: Vec3, bottom_left: Vec3) -> Self {
        NavGridBuilder {
            settings: NavGridSettings::default(),
            top_right,
            bottom_left,
            floors: Vec::new(),
            walls: Vec::new(),
        }
    }

    /// World-space size of one cell.
    pub fn cell_size(mut self, cell_size: f32) -> Self {
        self.settings.cell_size = cell_size;
        self
    }

    /// Maximum distance, in cells, between a position and its lattice point.
    pub fn lattice_tolerance(mut self, tolerance: f32) -> Self {
        self.settings.lattice_tolerance = tolerance;
        self
    }

    /// Allows the corner references to be floor cells.
    pub fn allow_open_corners(mut self) -> Self {
        self.settings.require_wall_corners = false;
        self
    }

    /// Replaces all settings at once.
    pub fn settings(mut self, settings: NavGridSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Adds walkable positions.
    pub fn floors(mut self, floors: impl IntoIterator<Item = Vec3>) -> Self {
        self.floors.extend(floors);
        self
    }

    /// Adds blocked positions.
    pub fn walls(mut self, walls: impl IntoIterator<Item = Vec3>) -> Self {
        self.walls.extend(walls);
        self
    }

    pub fn add_floor(&mut self, position: Vec3) -> &mut Self {
        self.floors.push(position);
        self
    }

    pub fn add_wall(&mut self, position: Vec3) -> &mut Self {
        self.walls.push(position);
        self
    }

    /// Validates the inputs and builds the [`NavGrid`].
    ///
    /// Fails if any position is off the lattice or outside the corner bounds,
    /// if two positions share a slot, or if any slot is left empty.
    pub fn build(self) -> Result<NavGrid, NavError> {
        timed!("Built navigation grid", {
            NavGrid::from_builder(self)
        })
    }
}

/// Maps world positions to fractional grid coordinates.
///
/// Columns run from `bottom_left.x` towards `top_right.x`, rows from
/// `top_right.z` towards `bottom_left.z`. World `y` is ignored.
#[derive(Copy, Clone, Debug)]
struct Lattice {
    origin_x: f32,
    origin_z: f32,
    step_x: f32,
    step_z: f32,
}

impl Lattice {
    fn new(top_right: Vec3, bottom_left: Vec3, cell_size: f32) -> Self {
        let step_x = if top_right.x >= bottom_left.x {
            cell_size
        } else {
            -cell_size
        };
        let step_z = if bottom_left.z >= top_right.z {
            cell_size
        } else {
            -cell_size
        };

        Lattice {
            origin_x: bottom_left.x,
            origin_z: top_right.z,
            step_x,
            step_z,
        }
    }

    #[inline]
    fn coords(&self, position: Vec3) -> (f32, f32) {
        (
            (position.x - self.origin_x) / self.step_x,
            (position.z - self.origin_z) / self.step_z,
        )
    }

    fn world(&self, pos: UVec2) -> Vec3 {
        Vec3::new(
            self.origin_x + pos.x as f32 * self.step_x,
            0.0,
            self.origin_z + pos.y as f32 * self.step_z,
        )
    }
}

fn off_lattice(value: f32, tolerance: f32) -> bool {
    !value.is_finite() || (value - value.round()).abs() > tolerance
}

/// Number of lattice points along an axis spanning `span` cells, or `None`
/// if it doesn't fit in a `u32`.
fn extent(span: f32) -> Option<u32> {
    let steps = span.round();
    if steps >= u32::MAX as f32 {
        return None;
    }
    (steps as u32).checked_add(1)
}

/// `NavGrid` is the dense 2D array of [`Cell`]s that searches run on.
///
/// It is read-only once built. Searches keep their own scratch state, so a
/// grid can be shared between threads and searched concurrently.
#[derive(Clone, Debug)]
pub struct NavGrid {
    neighborhood: CardinalNeighborhood,

    cells: Array2<Cell>,
    dimensions: UVec2,

    cell_size: f32,
    top_right: Vec3,
    bottom_left: Vec3,
    lattice: Lattice,
}

impl NavGrid {
    /// Builds a grid from floor and wall positions with default settings.
    /// Use [`NavGridBuilder`] to change the lattice tolerance or corner rules.
    pub fn build(
        floors: &[Vec3],
        walls: &[Vec3],
        top_right: Vec3,
        bottom_left: Vec3,
        cell_size: f32,
    ) -> Result<Self, NavError> {
        NavGridBuilder::new(top_right, bottom_left)
            .cell_size(cell_size)
            .floors(floors.iter().copied())
            .walls(walls.iter().copied())
            .build()
    }

    fn from_builder(builder: NavGridBuilder) -> Result<Self, NavError> {
        let NavGridBuilder {
            settings,
            top_right,
            bottom_left,
            floors,
            walls,
        } = builder;

        let NavGridSettings {
            cell_size,
            lattice_tolerance,
            require_wall_corners,
        } = settings;

        if !cell_size.is_finite() || cell_size <= 0.0 {
            return Err(NavError::InvalidCellSize { cell_size });
        }

        let span_x = (top_right.x - bottom_left.x).abs() / cell_size;
        let span_z = (top_right.z - bottom_left.z).abs() / cell_size;

        if off_lattice(span_x, lattice_tolerance) || off_lattice(span_z, lattice_tolerance) {
            return Err(NavError::OffLattice {
                position: top_right,
                column: span_x,
                row: span_z,
            });
        }

        let overflow = NavError::ExtentOverflow {
            columns: span_x,
            rows: span_z,
        };
        let (Some(width), Some(height)) = (extent(span_x), extent(span_z)) else {
            return Err(overflow);
        };

        if width < 2 || height < 2 {
            return Err(NavError::DegenerateExtent { width, height });
        }

        let Some(expected) = (width as usize).checked_mul(height as usize) else {
            return Err(overflow);
        };

        // Checked before allocating: far corners would otherwise reserve the
        // whole array just to report a hole.
        let supplied = floors.len() + walls.len();
        if supplied < expected {
            return Err(NavError::MissingCells { expected, supplied });
        }

        let lattice = Lattice::new(top_right, bottom_left, cell_size);
        let shape = (width as usize, height as usize);

        let mut cells = Array2::from_shape_fn(shape, |(x, y)| {
            let pos = UVec2::new(x as u32, y as u32);
            Cell::new(pos, lattice.world(pos), true)
        });
        let mut filled = Array2::from_elem(shape, false);

        let labelled = floors
            .iter()
            .map(|p| (*p, false))
            .chain(walls.iter().map(|p| (*p, true)));

        for (position, wall) in labelled {
            let (column, row) = lattice.coords(position);

            if off_lattice(column, lattice_tolerance) || off_lattice(row, lattice_tolerance) {
                return Err(NavError::OffLattice {
                    position,
                    column,
                    row,
                });
            }

            let x = column.round() as i64;
            let y = row.round() as i64;

            if x < 0 || y < 0 || x >= width as i64 || y >= height as i64 {
                return Err(NavError::OutOfBounds {
                    position,
                    column: x,
                    row: y,
                    width,
                    height,
                });
            }

            let slot = [x as usize, y as usize];
            if filled[slot] {
                return Err(NavError::DuplicateCell {
                    position,
                    column: x as u32,
                    row: y as u32,
                });
            }

            filled[slot] = true;
            cells[slot] = Cell::new(UVec2::new(x as u32, y as u32), position, wall);
        }

        // With at least one input per slot and none out of bounds or
        // duplicated, every slot is filled.
        debug_assert!(filled.iter().all(|filled| *filled));

        let grid = NavGrid {
            neighborhood: CardinalNeighborhood,
            cells,
            dimensions: UVec2::new(width, height),
            cell_size,
            top_right,
            bottom_left,
            lattice,
        };

        if require_wall_corners {
            for corner in [top_right, bottom_left] {
                if grid.cell_at(corner).is_passable() {
                    return Err(NavError::CornerNotWall { position: corner });
                }
            }
        }

        info!(
            "Built {}x{} navigation grid with {} floors and {} walls",
            width,
            height,
            floors.len(),
            walls.len()
        );

        Ok(grid)
    }

    /// Returns the neighbourhood used by this grid.
    pub fn neighborhood(&self) -> &CardinalNeighborhood {
        &self.neighborhood
    }

    /// Returns an [`ndarray::ArrayView2<Cell>`] for read-only access to the grid data.
    /// The array is indexed `[column, row]`.
    pub fn view(&self) -> ArrayView2<Cell> {
        self.cells.view()
    }

    /// Returns the dimensions of the grid as (width, height).
    pub fn dimensions(&self) -> UVec2 {
        self.dimensions
    }

    /// Returns the number of columns.
    pub fn width(&self) -> u32 {
        self.dimensions.x
    }

    /// Returns the number of rows.
    pub fn height(&self) -> u32 {
        self.dimensions.y
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    pub fn top_right(&self) -> Vec3 {
        self.top_right
    }

    pub fn bottom_left(&self) -> Vec3 {
        self.bottom_left
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// A built grid always holds at least 2x2 cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Checks if a position is within the bounds of the grid.
    pub fn in_bounds(&self, pos: UVec2) -> bool {
        pos.x < self.dimensions.x && pos.y < self.dimensions.y
    }

    /// Gets the [`Cell`] at a grid position, or `None` if out of bounds.
    pub fn cell(&self, pos: UVec2) -> Option<&Cell> {
        self.cells.get([pos.x as usize, pos.y as usize])
    }

    /// Test if the cell at a grid position can be walked on.
    pub fn is_passable(&self, pos: UVec2) -> bool {
        self.cell(pos).is_some_and(Cell::is_passable)
    }

    /// World position of the cell at a grid position.
    pub fn world_position(&self, pos: UVec2) -> Option<Vec3> {
        self.cell(pos).map(Cell::world_position)
    }

    /// Iterates over every cell, column by column.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> + '_ {
        self.cells.iter()
    }

    /// Number of wall cells.
    pub fn walls(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_wall()).count()
    }

    /// Number of floor cells.
    pub fn floors(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_passable()).count()
    }

    /// Resolves a world position to the nearest grid position.
    ///
    /// Positions outside the grid are clamped onto the border, so the result
    /// is approximate for far out-of-range input.
    pub fn grid_position(&self, world_position: Vec3) -> UVec2 {
        let (column, row) = self.lattice.coords(world_position);
        let x = (column.round() as i64).clamp(0, self.dimensions.x as i64 - 1);
        let y = (row.round() as i64).clamp(0, self.dimensions.y as i64 - 1);

        if x as f32 != column.round() || y as f32 != row.round() {
            warn!(
                "Clamped world position {} to border cell ({}, {})",
                world_position, x, y
            );
        }

        UVec2::new(x as u32, y as u32)
    }

    /// Gets the cell closest to a world position, clamping onto the border
    /// for positions outside the grid.
    pub fn cell_at(&self, world_position: Vec3) -> &Cell {
        let pos = self.grid_position(world_position);
        &self.cells[[pos.x as usize, pos.y as usize]]
    }

    /// Grid positions of the in-bounds north, east, south and west neighbours
    /// of `pos`, in that order. Walls are included.
    pub fn neighbor_positions(&self, pos: UVec2) -> Neighbors {
        let mut neighbors = Neighbors::new();
        self.neighborhood
            .neighbors(&self.cells.view(), pos, &mut neighbors);
        neighbors
    }

    /// The in-bounds north, east, south and west neighbours of `cell`, in
    /// that order. Corner cells have two, edge cells three.
    pub fn neighbors(&self, cell: &Cell) -> SmallVec<[&Cell; 4]> {
        self.neighbor_positions(cell.grid_position)
            .into_iter()
            .map(|pos| &self.cells[[pos.x as usize, pos.y as usize]])
            .collect()
    }

    /// A* search between two grid positions.
    ///
    /// Returns `Ok(None)` when the goal can't be reached, and
    /// [`NavError::PositionOutsideGrid`] when either position is out of
    /// bounds. The path excludes `start`, so `start == goal` yields an empty path.
    pub fn pathfind(&self, start: UVec2, goal: UVec2) -> Result<Option<Path>, NavError> {
        for position in [start, goal] {
            if !self.in_bounds(position) {
                warn!("Position is out of bounds: {:?}", position);
                return Err(NavError::PositionOutsideGrid {
                    position,
                    width: self.dimensions.x,
                    height: self.dimensions.y,
                });
            }
        }

        astar_grid(self, start, goal, self.len())
    }
}

/// Builds a grid from ASCII rows for tests: `#` is a wall, anything else a floor.
/// Row 0 sits at `z = 0`, columns at `x = column * cell_size`.
#[cfg(test)]
pub(crate) fn builder_from_ascii(rows: &[&str], cell_size: f32) -> NavGridBuilder {
    let height = rows.len();
    let width = rows[0].chars().count();

    let mut floors = Vec::new();
    let mut walls = Vec::new();

    for (row, line) in rows.iter().enumerate() {
        for (column, c) in line.chars().enumerate() {
            let position = Vec3::new(column as f32 * cell_size, 0.0, row as f32 * cell_size);
            if c == '#' {
                walls.push(position + Vec3::Y * cell_size);
            } else {
                floors.push(position);
            }
        }
    }

    let top_right = Vec3::new((width - 1) as f32 * cell_size, cell_size, 0.0);
    let bottom_left = Vec3::new(0.0, cell_size, (height - 1) as f32 * cell_size);

    NavGridBuilder::new(top_right, bottom_left)
        .cell_size(cell_size)
        .floors(floors)
        .walls(walls)
}

#[cfg(test)]
pub(crate) fn grid_from_ascii(rows: &[&str]) -> NavGrid {
    builder_from_ascii(rows, 10.0).build().unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROOM: [&str; 5] = [
        "#####", //
        "#...#", //
        "#...#", //
        "#...#", //
        "#####",
    ];

    #[test]
    fn test_build_dimensions() {
        let grid = grid_from_ascii(&ROOM);
        assert_eq!(grid.dimensions(), UVec2::new(5, 5));
        assert_eq!(grid.view().shape(), &[5, 5]);
        assert_eq!(grid.floors(), 9);
        assert_eq!(grid.walls(), 16);
        assert_eq!(grid.len(), 25);
    }

    #[test]
    fn test_build_rectangular_dimensions() {
        let rows = ["#######", "#.....#", "#######"];
        let grid = builder_from_ascii(&rows, 2.5).build().unwrap();

        assert_eq!(grid.width(), 7);
        assert_eq!(grid.height(), 3);
        assert_eq!(grid.cell_size(), 2.5);
    }

    #[test]
    fn test_every_slot_populated_with_own_position() {
        let grid = grid_from_ascii(&ROOM);
        for x in 0..5 {
            for y in 0..5 {
                let cell = grid.cell(UVec2::new(x, y)).unwrap();
                assert_eq!(cell.grid_position(), UVec2::new(x, y));
                assert_eq!(cell.world_position().x, x as f32 * 10.0);
                assert_eq!(cell.world_position().z, y as f32 * 10.0);
            }
        }
    }

    #[test]
    fn test_wall_flags() {
        let grid = grid_from_ascii(&ROOM);
        assert!(!grid.is_passable(UVec2::new(0, 0)));
        assert!(grid.is_passable(UVec2::new(1, 1)));
        assert!(grid.is_passable(UVec2::new(3, 3)));
        assert!(!grid.is_passable(UVec2::new(4, 2)));
        assert!(!grid.is_passable(UVec2::new(9, 9)));
    }

    #[test]
    fn test_build_mirrored_axes() {
        // Columns grow towards -x and rows towards +z, like a scene
        // centred on the origin.
        let cell_size = 10.0;
        let mut walls = Vec::new();
        let mut floors = Vec::new();
        for column in 0..3 {
            for row in 0..3 {
                let position = Vec3::new(-(column as f32) * cell_size, 0.0, row as f32 * cell_size);
                if column == 1 && row == 1 {
                    floors.push(position);
                } else {
                    walls.push(position);
                }
            }
        }

        let grid = NavGridBuilder::new(Vec3::new(-20.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 20.0))
            .cell_size(cell_size)
            .floors(floors)
            .walls(walls)
            .build()
            .unwrap();

        assert_eq!(grid.dimensions(), UVec2::new(3, 3));
        assert!(grid.is_passable(UVec2::new(1, 1)));
        assert_eq!(grid.cell_at(Vec3::new(-10.0, 0.0, 10.0)).grid_position(), UVec2::new(1, 1));
    }

    #[test]
    fn test_build_rejects_bad_cell_size() {
        for cell_size in [0.0, -10.0, f32::NAN, f32::INFINITY] {
            let result = builder_from_ascii(&ROOM, 10.0).cell_size(cell_size).build();
            assert!(matches!(result, Err(NavError::InvalidCellSize { .. })));
        }
    }

    #[test]
    fn test_build_rejects_off_lattice() {
        let result = builder_from_ascii(&ROOM, 10.0)
            .floors([Vec3::new(14.0, 0.0, 10.0)])
            .build();
        assert!(matches!(result, Err(NavError::OffLattice { .. })));
    }

    #[test]
    fn test_build_rejects_off_lattice_extent() {
        let result = NavGridBuilder::new(Vec3::new(25.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 20.0))
            .cell_size(10.0)
            .build();
        assert!(matches!(result, Err(NavError::OffLattice { .. })));
    }

    #[test]
    fn test_build_rejects_out_of_bounds() {
        let result = builder_from_ascii(&ROOM, 10.0)
            .walls([Vec3::new(50.0, 10.0, 0.0)])
            .build();
        assert!(matches!(
            result,
            Err(NavError::OutOfBounds {
                column: 5,
                row: 0,
                ..
            })
        ));

        let result = builder_from_ascii(&ROOM, 10.0)
            .walls([Vec3::new(-10.0, 10.0, 0.0)])
            .build();
        assert!(matches!(result, Err(NavError::OutOfBounds { column: -1, .. })));
    }

    #[test]
    fn test_build_rejects_overlap() {
        let result = builder_from_ascii(&ROOM, 10.0)
            .walls([Vec3::new(10.0, 10.0, 10.0)])
            .build();
        assert!(matches!(
            result,
            Err(NavError::DuplicateCell {
                column: 1,
                row: 1,
                ..
            })
        ));
    }

    #[test]
    fn test_build_rejects_holes() {
        let mut builder = NavGridBuilder::new(Vec3::new(20.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 20.0))
            .cell_size(10.0);
        for x in 0..3 {
            for z in 0..3 {
                if (x, z) != (2, 1) {
                    builder.add_wall(Vec3::new(x as f32 * 10.0, 0.0, z as f32 * 10.0));
                }
            }
        }

        let result = builder.build();
        assert_eq!(
            result.unwrap_err(),
            NavError::MissingCells {
                expected: 9,
                supplied: 8
            }
        );
    }

    #[test]
    fn test_build_rejects_hole_filled_by_duplicate() {
        let mut builder = NavGridBuilder::new(Vec3::new(20.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 20.0))
            .cell_size(10.0);
        for x in 0..3 {
            for z in 0..3 {
                let x = if (x, z) == (2, 1) { 1 } else { x };
                builder.add_wall(Vec3::new(x as f32 * 10.0, 0.0, z as f32 * 10.0));
            }
        }

        let result = builder.build();
        assert!(matches!(
            result,
            Err(NavError::DuplicateCell {
                column: 1,
                row: 1,
                ..
            })
        ));
    }

    #[test]
    fn test_build_rejects_oversized_extent() {
        let result = NavGridBuilder::new(Vec3::new(1e10, 0.0, 0.0), Vec3::new(0.0, 0.0, 10.0))
            .cell_size(1.0)
            .build();
        assert!(matches!(result, Err(NavError::ExtentOverflow { .. })));

        let result = NavGridBuilder::new(Vec3::new(f32::MAX, 0.0, 0.0), Vec3::new(0.0, 0.0, 10.0))
            .cell_size(1.0)
            .build();
        assert!(result.unwrap_err().is_configuration());
    }

    #[test]
    fn test_build_rejects_sparse_large_extent() {
        // 100001 x 100001 slots, checked before anything is allocated.
        let result = NavGridBuilder::new(Vec3::new(1e5, 0.0, 0.0), Vec3::new(0.0, 0.0, 1e5))
            .cell_size(1.0)
            .walls([Vec3::new(1e5, 0.0, 0.0), Vec3::new(0.0, 0.0, 1e5)])
            .build();
        assert_eq!(
            result.unwrap_err(),
            NavError::MissingCells {
                expected: 100_001 * 100_001,
                supplied: 2
            }
        );
    }

    #[test]
    fn test_build_rejects_degenerate_extent() {
        let result = NavGridBuilder::new(Vec3::new(30.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 0.0))
            .cell_size(10.0)
            .build();
        assert!(matches!(
            result,
            Err(NavError::DegenerateExtent {
                width: 4,
                height: 1
            })
        ));
    }

    #[test]
    fn test_corner_rules() {
        let rows = ["...", "...", "..."];
        let result = builder_from_ascii(&rows, 10.0).build();
        assert!(matches!(result, Err(NavError::CornerNotWall { .. })));

        let grid = builder_from_ascii(&rows, 10.0)
            .allow_open_corners()
            .build()
            .unwrap();
        assert_eq!(grid.floors(), 9);
    }

    #[test]
    fn test_build_lattice_tolerance() {
        // 0.02 world units of noise is 0.002 cells at this cell size.
        let noisy = |builder: NavGridBuilder| {
            let mut builder = builder;
            for x in 0..3 {
                for z in 0..3 {
                    builder.add_wall(Vec3::new(x as f32 * 10.0 + 0.02, 0.0, z as f32 * 10.0 - 0.02));
                }
            }
            builder
        };
        let base = || NavGridBuilder::new(Vec3::new(20.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 20.0));

        let strict = noisy(base()).build();
        assert!(matches!(strict, Err(NavError::OffLattice { .. })));

        let grid = noisy(base().lattice_tolerance(0.01)).build().unwrap();
        assert_eq!(grid.dimensions(), UVec2::new(3, 3));

        let grid = noisy(base().settings(NavGridSettings {
            cell_size: 10.0,
            lattice_tolerance: 0.01,
            require_wall_corners: true,
        }))
        .build()
        .unwrap();
        assert_eq!(grid.walls(), 9);
    }

    #[test]
    fn test_cell_at_rounds_to_nearest() {
        let grid = grid_from_ascii(&ROOM);
        assert_eq!(grid.cell_at(Vec3::new(10.0, 0.0, 10.0)).grid_position(), UVec2::new(1, 1));
        assert_eq!(grid.cell_at(Vec3::new(14.0, 3.0, 26.0)).grid_position(), UVec2::new(1, 3));
        assert_eq!(grid.cell_at(Vec3::new(36.0, 0.0, 4.9)).grid_position(), UVec2::new(4, 0));
    }

    #[test]
    fn test_cell_at_is_idempotent() {
        let grid = grid_from_ascii(&ROOM);
        let position = Vec3::new(23.0, 5.0, 17.0);
        assert_eq!(grid.cell_at(position), grid.cell_at(position));
        assert_eq!(
            grid.cell_at(position).grid_position(),
            grid.cell_at(position).grid_position()
        );
    }

    #[test]
    fn test_cell_at_clamps() {
        let grid = grid_from_ascii(&ROOM);
        assert_eq!(
            grid.cell_at(Vec3::new(-1000.0, 0.0, -1000.0)).grid_position(),
            UVec2::new(0, 0)
        );
        assert_eq!(
            grid.cell_at(Vec3::new(1e6, 0.0, 1e6)).grid_position(),
            UVec2::new(4, 4)
        );
        assert_eq!(
            grid.cell_at(Vec3::new(20.0, 0.0, 500.0)).grid_position(),
            UVec2::new(2, 4)
        );
        assert_eq!(
            grid.cell_at(Vec3::new(f32::NAN, 0.0, 20.0)).grid_position(),
            UVec2::new(0, 2)
        );
    }

    #[test]
    fn test_neighbors() {
        let grid = grid_from_ascii(&ROOM);

        let center = grid.cell(UVec2::new(2, 2)).unwrap();
        let neighbors: Vec<UVec2> = grid
            .neighbors(center)
            .iter()
            .map(|cell| cell.grid_position())
            .collect();
        assert_eq!(
            neighbors,
            vec![
                UVec2::new(2, 3),
                UVec2::new(3, 2),
                UVec2::new(2, 1),
                UVec2::new(1, 2),
            ]
        );

        let corner = grid.cell(UVec2::new(0, 0)).unwrap();
        let neighbors: Vec<UVec2> = grid
            .neighbors(corner)
            .iter()
            .map(|cell| cell.grid_position())
            .collect();
        assert_eq!(neighbors, vec![UVec2::new(0, 1), UVec2::new(1, 0)]);

        let edge = grid.cell(UVec2::new(4, 2)).unwrap();
        assert_eq!(grid.neighbors(edge).len(), 3);
    }

    #[test]
    fn test_neighbors_include_walls() {
        let grid = grid_from_ascii(&ROOM);
        let cell = grid.cell(UVec2::new(1, 1)).unwrap();
        let walls = grid.neighbors(cell).iter().filter(|c| c.is_wall()).count();
        assert_eq!(walls, 2);
    }

    #[test]
    fn test_pathfind_on_grid() {
        let grid = grid_from_ascii(&ROOM);
        let path = grid
            .pathfind(UVec2::new(1, 1), UVec2::new(3, 3))
            .unwrap()
            .unwrap();
        assert_eq!(path.len(), 4);
        assert_eq!(path.goal(), UVec2::new(3, 3));

        let outside = grid.pathfind(UVec2::new(1, 1), UVec2::new(7, 1));
        assert_eq!(
            outside.unwrap_err(),
            NavError::PositionOutsideGrid {
                position: UVec2::new(7, 1),
                width: 5,
                height: 5,
            }
        );

        let outside = grid.pathfind(UVec2::new(5, 0), UVec2::new(1, 1));
        assert!(matches!(
            outside,
            Err(NavError::PositionOutsideGrid { .. })
        ));

        // Walled off but in bounds is still just unreachable.
        let enclosed = grid.pathfind(UVec2::new(1, 1), UVec2::new(0, 0)).unwrap();
        assert!(enclosed.is_none());
    }
}
