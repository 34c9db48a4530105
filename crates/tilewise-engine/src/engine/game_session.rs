use crate::{
    MoveError,
    core::{board::Board, direction::Direction},
};

use super::{GameResult, GameSeed, GameStats, TileSpawner};

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum SessionState {
    Playing,
    Paused,
    GameOver,
}

/// One game from its two starting tiles until the board locks up.
///
/// Accepted moves add their merge score, advance the move counter and spawn a new tile.
/// Reaching 2048 sets the won flag but does not end the game.
#[derive(Debug, Clone)]
pub struct GameSession {
    board: Board,
    spawner: TileSpawner,
    stats: GameStats,
    session_state: SessionState,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

impl GameSession {
    /// Starts a game with a random seed.
    #[must_use]
    pub fn new() -> Self {
        Self::from_spawner(TileSpawner::new())
    }

    #[must_use]
    pub fn with_seed(seed: GameSeed) -> Self {
        Self::from_spawner(TileSpawner::with_seed(seed))
    }

    fn from_spawner(mut spawner: TileSpawner) -> Self {
        let board = spawner.initial_board();
        Self::from_parts(board, spawner)
    }

    /// Continues play from an arbitrary position, spawning with `seed`.
    #[must_use]
    pub fn from_board(board: Board, seed: GameSeed) -> Self {
        Self::from_parts(board, TileSpawner::with_seed(seed))
    }

    fn from_parts(board: Board, spawner: TileSpawner) -> Self {
        let session_state = if board.is_terminal() {
            SessionState::GameOver
        } else {
            SessionState::Playing
        };
        Self {
            board,
            spawner,
            stats: GameStats::starting_at(&board),
            session_state,
        }
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    #[must_use]
    pub fn session_state(&self) -> SessionState {
        self.session_state
    }

    #[must_use]
    pub fn won(&self) -> bool {
        self.stats.won()
    }

    #[must_use]
    pub fn result(&self) -> GameResult {
        self.stats.result()
    }

    pub fn toggle_pause(&mut self) {
        self.session_state = match self.session_state {
            SessionState::Playing => SessionState::Paused,
            SessionState::Paused => SessionState::Playing,
            SessionState::GameOver => SessionState::GameOver,
        };
    }

    /// Slides the board, then spawns a tile.
    ///
    /// A move that changes nothing is rejected and leaves the session untouched.
    pub fn try_move(&mut self, direction: Direction) -> Result<(), MoveError> {
        if !self.session_state.is_playing() {
            return Err(MoveError::NotPlaying);
        }
        let result = self.board.apply(direction);
        if !result.changed {
            return Err(MoveError::Illegal);
        }

        // a changed move always leaves at least one empty cell
        let board = self.spawner.spawn(result.board).unwrap_or(result.board);
        self.stats.record_move(result.score_delta, board.max_tile());
        self.board = board;
        if board.is_terminal() {
            self.session_state = SessionState::GameOver;
        }
        Ok(())
    }
}
