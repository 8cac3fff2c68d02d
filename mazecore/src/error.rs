use thiserror::Error;

use crate::dims::Position;

/// Everything that can be wrong with a maze before a search or generation starts.
///
/// An unreachable exit is *not* an error, solvers report it as `Ok(None)`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MazeError {
    #[error("invalid maze size {0}x{1}, both dimensions must be at least 1")]
    InvalidSize(usize, usize),
    #[error("row {row} has {found} cells, expected {expected}")]
    NonRectangular {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("start {0} is outside of the maze")]
    StartOutOfBounds(Position),
    #[error("cell {pos} has value {value}, expected 0 (passable) or 1 (blocked)")]
    InvalidBinaryValue { pos: Position, value: u8 },
    #[error("wall matrix is {cells:?} but binary matrix is {binary:?}")]
    LayerSizeMismatch {
        cells: (usize, usize),
        binary: (usize, usize),
    },
    #[error("walls between {from} and {to} are not symmetric")]
    AsymmetricWalls { from: Position, to: Position },
}
