//! Board model and game rules for the 4×4 sliding-tile merge game.
//!
//! - [`core`] holds the pure, value-typed pieces used by the search engine: [`Board`],
//!   [`Direction`], [`MoveResult`] and the chance-node [`spawn_distribution`].
//! - [`engine`] holds the stateful live game: [`GameSession`] with its seeded
//!   [`TileSpawner`] and [`GameStats`].
//!
//! Every transition produces a new [`Board`]; nothing in [`core`] mutates a board another
//! component still holds.
//!
//! ```
//! use tilewise_engine::{Board, Direction};
//!
//! let board: Board = "2 2 0 0 / 0 0 0 0 / 0 0 0 0 / 0 0 0 0".parse().unwrap();
//! let result = board.apply(Direction::Left);
//! assert!(result.changed);
//! assert_eq!(result.score_delta, 4);
//! assert_eq!(result.board.tile(0, 0), 4);
//! ```

pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

/// A board snapshot that violates the tile invariant.
///
/// Every non-zero cell must hold a power of two between 2 and [`MAX_TILE`], and the tiles
/// must sum to at most [`MAX_TILE_SUM`].
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum MalformedBoardError {
    #[display("board must have 4 rows, got {rows}")]
    RowCount { rows: usize },
    #[display("row {row} must have 4 cells, got {cells}")]
    CellCount { row: usize, cells: usize },
    #[display("negative tile {value} at ({row}, {col})")]
    NegativeTile { row: usize, col: usize, value: i64 },
    #[display("tile {value} at ({row}, {col}) is not a power of two >= 2")]
    NotPowerOfTwo { row: usize, col: usize, value: i64 },
    #[display("tile {value} at ({row}, {col}) exceeds the largest reachable tile")]
    TileTooLarge { row: usize, col: usize, value: i64 },
    #[display("tile sum {sum} exceeds the largest reachable sum")]
    TileSumTooLarge { sum: u64 },
}

/// A direction tag outside the four canonical directions.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid direction {tag:?} (expected up, down, left or right)")]
pub struct InvalidDirectionError {
    tag: String,
}

impl InvalidDirectionError {
    pub(crate) fn new(tag: impl Into<String>) -> Self {
        Self { tag: tag.into() }
    }

    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }
}

/// Failure to read a board from its text form.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParseBoardError {
    #[display("expected 16 cells, got {cells}")]
    CellCount { cells: usize },
    #[display("invalid cell {token:?}")]
    InvalidCell { token: String },
    #[display("{_0}")]
    Malformed(MalformedBoardError),
}

/// A move rejected by the live game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum MoveError {
    #[display("move does not change the board")]
    Illegal,
    #[display("game is not in progress")]
    NotPlaying,
}
