use std::{fmt, str::FromStr};

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::core::{board::Board, spawn::TWO_TILE_PROBABILITY};

/// Seed for a reproducible game.
///
/// Two sessions built from the same seed and fed the same moves see the same spawned tiles.
/// Serialized (and displayed) as 32 lowercase hex digits.
///
/// ```
/// use rand::Rng as _;
/// use tilewise_engine::{GameSeed, GameSession};
///
/// let seed: GameSeed = rand::rng().random();
/// let a = GameSession::with_seed(seed);
/// let b = GameSession::with_seed(seed);
/// assert_eq!(a.board(), b.board());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSeed([u8; 16]);

impl GameSeed {
    /// Derives `count` seeds from this one, for batches of independent games.
    #[must_use]
    pub fn derive_seeds(self, count: usize) -> Vec<GameSeed> {
        let mut rng = Pcg32::from_seed(self.0);
        (0..count).map(|_| rng.random()).collect()
    }
}

impl From<[u8; 16]> for GameSeed {
    fn from(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for GameSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", u128::from_be_bytes(self.0))
    }
}

/// A seed string that is not 32 hex digits.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid seed {input:?}: expected 32 hex digits")]
pub struct ParseSeedError {
    input: String,
}

impl FromStr for GameSeed {
    type Err = ParseSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let error = || ParseSeedError {
            input: s.to_owned(),
        };
        if s.len() != 32 || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(error());
        }
        let num = u128::from_str_radix(s, 16).map_err(|_| error())?;
        Ok(Self(num.to_be_bytes()))
    }
}

impl Serialize for GameSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for GameSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex = String::deserialize(deserializer)?;
        hex.parse().map_err(serde::de::Error::custom)
    }
}

impl Distribution<GameSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> GameSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        GameSeed(seed)
    }
}

/// Places random tiles: a uniformly chosen empty cell gets a 2 with probability 0.9, else a 4.
#[derive(Debug, Clone)]
pub struct TileSpawner {
    rng: Pcg32,
}

impl Default for TileSpawner {
    fn default() -> Self {
        Self::new()
    }
}

impl TileSpawner {
    /// Creates a spawner with a random seed.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::rng().random())
    }

    #[must_use]
    pub fn with_seed(seed: GameSeed) -> Self {
        Self {
            rng: Pcg32::from_seed(seed.0),
        }
    }

    /// Returns `board` with one new tile, or `None` when it has no empty cell.
    pub fn spawn(&mut self, board: Board) -> Option<Board> {
        let empty = board.empty_cells();
        if empty.is_empty() {
            return None;
        }
        let (row, col) = empty[self.rng.random_range(0..empty.len())];
        let value = if self.rng.random_bool(TWO_TILE_PROBABILITY) {
            2
        } else {
            4
        };
        Some(board.with_tile(row, col, value))
    }

    /// Empty grid with two spawned tiles, the starting position of a game.
    pub fn initial_board(&mut self) -> Board {
        let mut board = Board::EMPTY;
        for _ in 0..2 {
            if let Some(next) = self.spawn(board) {
                board = next;
            }
        }
        board
    }
}
