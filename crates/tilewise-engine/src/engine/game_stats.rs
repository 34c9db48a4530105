use serde::{Deserialize, Serialize};

use crate::core::board::{Board, WINNING_TILE};

/// Running statistics of one game.
///
/// ```
/// use tilewise_engine::GameStats;
///
/// let mut stats = GameStats::new();
/// stats.record_move(4, 4);
/// stats.record_move(8, 8);
///
/// assert_eq!(stats.score(), 12);
/// assert_eq!(stats.moves(), 2);
/// assert_eq!(stats.max_tile(), 8);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameStats {
    score: u64,
    moves: usize,
    max_tile: u32,
}

impl GameStats {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            score: 0,
            moves: 0,
            max_tile: 0,
        }
    }

    /// Statistics of a game that starts on `board` without having moved.
    #[must_use]
    pub fn starting_at(board: &Board) -> Self {
        Self {
            max_tile: board.max_tile(),
            ..Self::new()
        }
    }

    /// Sum of all merge values so far.
    #[must_use]
    pub const fn score(&self) -> u64 {
        self.score
    }

    #[must_use]
    pub const fn moves(&self) -> usize {
        self.moves
    }

    #[must_use]
    pub const fn max_tile(&self) -> u32 {
        self.max_tile
    }

    /// Returns `true` once a tile of at least 2048 has appeared.
    #[must_use]
    pub const fn won(&self) -> bool {
        self.max_tile >= WINNING_TILE
    }

    /// Records one accepted move.
    pub fn record_move(&mut self, score_delta: u32, max_tile: u32) {
        self.score += u64::from(score_delta);
        self.moves += 1;
        self.max_tile = self.max_tile.max(max_tile);
    }

    #[must_use]
    pub fn result(&self) -> GameResult {
        GameResult {
            final_score: self.score,
            max_tile: self.max_tile,
            moves: self.moves,
            won: self.won(),
        }
    }
}

/// Final outcome of a game, as written to run reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResult {
    pub final_score: u64,
    pub max_tile: u32,
    pub moves: usize,
    pub won: bool,
}
