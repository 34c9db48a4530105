//! Live game state built on top of [`core`](crate::core).
//!
//! - [`GameSession`] - one game: board, score, move counter and session state
//! - [`TileSpawner`] - seeded random tile placement after each move
//! - [`GameSeed`] - 128-bit seed that makes a whole game reproducible
//! - [`GameStats`] / [`GameResult`] - running and final statistics
//!
//! # Example
//!
//! ```
//! use tilewise_engine::{Direction, GameSeed, GameSession};
//!
//! let mut session = GameSession::with_seed(GameSeed::from([1; 16]));
//! for dir in Direction::ALL {
//!     if session.try_move(dir).is_ok() {
//!         break;
//!     }
//! }
//! assert_eq!(session.stats().moves(), 1);
//! ```

pub use self::{game_session::*, game_stats::*, tile_spawner::*};

mod game_session;
mod game_stats;
mod tile_spawner;
