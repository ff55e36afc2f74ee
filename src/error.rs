//! Errors raised while building a `NavGrid` or searching it.
use bevy::math::{UVec2, Vec3};
use thiserror::Error;

/// Everything that can go wrong in grid construction and pathfinding.
///
/// An unreachable target is not an error: searches report it as `Ok(None)`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NavError {
    #[error("cell size must be finite and greater than zero, got {cell_size}")]
    InvalidCellSize { cell_size: f32 },

    #[error("corner references span a degenerate {width}x{height} grid")]
    DegenerateExtent { width: u32, height: u32 },

    #[error("corner references span {columns} by {rows} cells, too many to allocate")]
    ExtentOverflow { columns: f32, rows: f32 },

    #[error("position {position} is off the cell lattice (column {column}, row {row})")]
    OffLattice { position: Vec3, column: f32, row: f32 },

    #[error(
        "position {position} maps to column {column}, row {row}, outside the {width}x{height} grid"
    )]
    OutOfBounds {
        position: Vec3,
        column: i64,
        row: i64,
        width: u32,
        height: u32,
    },

    #[error("position {position} maps to column {column}, row {row}, which is already occupied")]
    DuplicateCell { position: Vec3, column: u32, row: u32 },

    #[error("grid has {expected} slots but only {supplied} floors and walls were supplied")]
    MissingCells { expected: usize, supplied: usize },

    #[error("corner reference {position} is not a wall")]
    CornerNotWall { position: Vec3 },

    #[error("pathfinding needs at least one target")]
    NoTargets,

    #[error("grid position {position} is outside the {width}x{height} grid")]
    PositionOutsideGrid {
        position: UVec2,
        width: u32,
        height: u32,
    },

    #[error("target selector picked index {index} out of {len} candidates")]
    InvalidTargetIndex { index: usize, len: usize },

    #[error("path reconstruction stalled at cell {cell} before reaching start {start}")]
    PathReconstruction { cell: UVec2, start: UVec2 },
}

impl NavError {
    /// True for errors caused by the inputs handed to grid construction.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            NavError::InvalidCellSize { .. }
                | NavError::DegenerateExtent { .. }
                | NavError::ExtentOverflow { .. }
                | NavError::OffLattice { .. }
                | NavError::OutOfBounds { .. }
                | NavError::DuplicateCell { .. }
                | NavError::MissingCells { .. }
                | NavError::CornerNotWall { .. }
        )
    }
}
