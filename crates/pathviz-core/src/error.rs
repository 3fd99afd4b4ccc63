//! Error types raised by the grid model.

use crate::geom::{Dims, Pos};

/// A request that the current state cannot honour. Nothing is mutated when
/// one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    /// `run` was requested before both start and end were placed.
    #[error("please select a start and end node")]
    MissingEndpoints,
    /// Requested dimensions fall outside the allowed range.
    #[error("grid size {rows}x{cols} is outside [{min}, {max}]")]
    SizeOutOfBounds {
        rows: i32,
        cols: i32,
        min: i32,
        max: i32,
    },
    /// A click landed outside the grid.
    #[error("position {0} is outside the grid")]
    OutOfBounds(Pos),
    /// A second run was requested while one is still animating.
    #[error("a search is already running")]
    RunInProgress,
}

/// A cell layout that cannot form a valid grid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    #[error("expected {expected} cells for a {dims} grid, found {found}")]
    CellCount {
        dims: Dims,
        expected: usize,
        found: usize,
    },
    #[error("more than one start cell ({first} and {second})")]
    DuplicateStart { first: Pos, second: Pos },
    #[error("more than one end cell ({first} and {second})")]
    DuplicateEnd { first: Pos, second: Pos },
    /// A cell weight outside `[min, max]`.
    #[error("cell {pos} has weight {weight}, outside [{min}, {max}]")]
    WeightOutOfRange {
        pos: Pos,
        weight: u32,
        min: u32,
        max: u32,
    },
    /// A textual layout has lines of different widths.
    #[error("layout has inconsistent line widths")]
    InconsistentSize,
    /// A textual layout contains an unknown character.
    #[error("layout contains invalid character \u{201c}{ch}\u{201d} at {pos}")]
    InvalidChar { ch: char, pos: Pos },
}
