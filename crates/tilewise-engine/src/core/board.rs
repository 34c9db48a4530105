use std::{fmt, str::FromStr};

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use crate::{MalformedBoardError, ParseBoardError, core::direction::Direction};

/// Width and height of the grid.
pub const BOARD_SIZE: usize = 4;

/// Number of cells on the grid.
pub const CELL_COUNT: usize = BOARD_SIZE * BOARD_SIZE;

/// Tile value that counts as winning the game.
pub const WINNING_TILE: u32 = 2048;

/// Largest tile that can appear on a 4×4 grid (2^17).
pub const MAX_TILE: u32 = 1 << 17;

/// Largest tile sum a 4×4 grid can hold: 2^17 + 2^16 + ... + 2^2.
///
/// Two `MAX_TILE` tiles already sum past it, so a board within this bound never merges
/// beyond [`MAX_TILE`].
pub const MAX_TILE_SUM: u64 = (1 << 18) - 4;

/// Outcome of sliding a board in one direction.
///
/// `changed == false` means the move is illegal from the source board; in that case
/// `board` equals the source board and `score_delta` is 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveResult {
    pub board: Board,
    pub score_delta: u32,
    pub changed: bool,
}

/// 4×4 grid of tile values, stored row-major.
///
/// Each cell is either 0 (empty) or a power of two in `2..=MAX_TILE`, and the tiles sum to
/// at most [`MAX_TILE_SUM`]. Slides conserve the sum. Boards are small
/// `Copy` values: every transition returns a new board.
///
/// # Text form
///
/// [`FromStr`] accepts 16 integers in row-major order separated by whitespace, commas or
/// `/`; `.` stands for an empty cell. [`Display`](fmt::Display) prints the same form one row
/// per line, so printed boards parse back.
///
/// ```text
/// 2 . . .
/// . 4 . .
/// . . . .
/// . . 2 .
/// ```
///
/// # Serialization
///
/// Serialized as a 4×4 array of integers. Deserialization validates the tile invariant, so
/// snapshots entering from configuration files are rejected when malformed.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<i64>>", into = "[[u32; BOARD_SIZE]; BOARD_SIZE]")]
pub struct Board {
    cells: [[u32; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    pub const EMPTY: Self = Self {
        cells: [[0; BOARD_SIZE]; BOARD_SIZE],
    };

    /// Builds a board from tile values, validating the tile invariant.
    pub fn from_rows(rows: [[u32; BOARD_SIZE]; BOARD_SIZE]) -> Result<Self, MalformedBoardError> {
        for (row, cells) in rows.iter().enumerate() {
            for (col, &value) in cells.iter().enumerate() {
                validate_tile(row, col, i64::from(value))?;
            }
        }
        validate_sum(Self { cells: rows })
    }

    /// Builds a board from signed values as found in external snapshots.
    pub fn from_signed_rows(
        rows: [[i64; BOARD_SIZE]; BOARD_SIZE],
    ) -> Result<Self, MalformedBoardError> {
        let mut cells = [[0; BOARD_SIZE]; BOARD_SIZE];
        for (row, values) in rows.iter().enumerate() {
            for (col, &value) in values.iter().enumerate() {
                cells[row][col] = validate_tile(row, col, value)?;
            }
        }
        validate_sum(Self { cells })
    }

    #[must_use]
    pub fn rows(&self) -> &[[u32; BOARD_SIZE]; BOARD_SIZE] {
        &self.cells
    }

    #[must_use]
    pub fn tile(&self, row: usize, col: usize) -> u32 {
        self.cells[row][col]
    }

    /// Iterates over all cells in row-major order as `(row, col, value)`.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, u32)> + '_ {
        self.cells.iter().enumerate().flat_map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .map(move |(col, &value)| (row, col, value))
        })
    }

    /// Returns a copy of this board with `value` placed at `(row, col)`.
    ///
    /// The target cell is expected to be empty and `value` a valid tile.
    #[must_use]
    pub fn with_tile(self, row: usize, col: usize, value: u32) -> Self {
        debug_assert_eq!(self.cells[row][col], 0, "cell ({row}, {col}) is occupied");
        debug_assert!(validate_tile(row, col, i64::from(value)).is_ok());
        let mut cells = self.cells;
        cells[row][col] = value;
        Self { cells }
    }

    /// Empty cells as `(row, col)` in row-major order.
    #[must_use]
    pub fn empty_cells(&self) -> ArrayVec<(usize, usize), CELL_COUNT> {
        self.cells()
            .filter(|&(_, _, value)| value == 0)
            .map(|(row, col, _)| (row, col))
            .collect()
    }

    #[must_use]
    pub fn count_empty(&self) -> usize {
        self.cells.iter().flatten().filter(|&&v| v == 0).count()
    }

    #[must_use]
    pub fn max_tile(&self) -> u32 {
        self.cells.iter().flatten().copied().max().unwrap_or(0)
    }

    /// Sum of all tile values. Slides and merges never change it; only spawns do.
    #[must_use]
    pub fn tile_sum(&self) -> u64 {
        self.cells.iter().flatten().map(|&v| u64::from(v)).sum()
    }

    /// Mirrors the board left to right.
    #[must_use]
    pub fn reflect_horizontally(self) -> Self {
        let mut cells = self.cells;
        for row in &mut cells {
            row.reverse();
        }
        Self { cells }
    }

    /// Swaps rows and columns.
    #[must_use]
    pub fn transpose(self) -> Self {
        let mut cells = [[0; BOARD_SIZE]; BOARD_SIZE];
        for (row, values) in self.cells.iter().enumerate() {
            for (col, &value) in values.iter().enumerate() {
                cells[col][row] = value;
            }
        }
        Self { cells }
    }

    /// Slides every tile in `direction`, merging equal neighbours once per move.
    ///
    /// Only the left slide is implemented directly; the other three directions reuse it
    /// through reflection and transposition.
    #[must_use]
    pub fn apply(self, direction: Direction) -> MoveResult {
        let (board, score_delta) = match direction {
            Direction::Left => self.slide_left(),
            Direction::Right => self.slide_right(),
            Direction::Up => {
                let (board, score) = self.transpose().slide_left();
                (board.transpose(), score)
            }
            Direction::Down => {
                let (board, score) = self.transpose().slide_right();
                (board.transpose(), score)
            }
        };
        MoveResult {
            board,
            score_delta,
            changed: board != self,
        }
    }

    fn slide_left(self) -> (Self, u32) {
        let mut cells = self.cells;
        let mut score = 0;
        for row in &mut cells {
            let (merged, gained) = slide_row_left(*row);
            *row = merged;
            score += gained;
        }
        (Self { cells }, score)
    }

    fn slide_right(self) -> (Self, u32) {
        let (board, score) = self.reflect_horizontally().slide_left();
        (board.reflect_horizontally(), score)
    }

    /// Directions whose move changes the board, in [`Direction::ALL`] order.
    #[must_use]
    pub fn legal_directions(&self) -> ArrayVec<Direction, { Direction::LEN }> {
        Direction::ALL
            .into_iter()
            .filter(|&dir| self.apply(dir).changed)
            .collect()
    }

    /// Returns `true` when no cell is empty and no two neighbours hold equal values.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                let value = self.cells[row][col];
                if value == 0 {
                    return false;
                }
                if col + 1 < BOARD_SIZE && self.cells[row][col + 1] == value {
                    return false;
                }
                if row + 1 < BOARD_SIZE && self.cells[row + 1][col] == value {
                    return false;
                }
            }
        }
        true
    }
}

/// Compacts one row towards index 0, merging each equal adjacent pair at most once.
fn slide_row_left(row: [u32; BOARD_SIZE]) -> ([u32; BOARD_SIZE], u32) {
    let mut out = [0; BOARD_SIZE];
    let mut len = 0;
    let mut score = 0;
    let mut pending = None;
    for value in row.into_iter().filter(|&v| v != 0) {
        match pending {
            Some(prev) if prev == value => {
                out[len] = prev * 2;
                score += prev * 2;
                len += 1;
                pending = None;
            }
            Some(prev) => {
                out[len] = prev;
                len += 1;
                pending = Some(value);
            }
            None => pending = Some(value),
        }
    }
    if let Some(prev) = pending {
        out[len] = prev;
    }
    (out, score)
}

fn validate_tile(row: usize, col: usize, value: i64) -> Result<u32, MalformedBoardError> {
    if value < 0 {
        return Err(MalformedBoardError::NegativeTile { row, col, value });
    }
    if value == 0 {
        return Ok(0);
    }
    if value == 1 || value.count_ones() != 1 {
        return Err(MalformedBoardError::NotPowerOfTwo { row, col, value });
    }
    if value > i64::from(MAX_TILE) {
        return Err(MalformedBoardError::TileTooLarge { row, col, value });
    }
    // bounded by MAX_TILE above
    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    Ok(value as u32)
}

fn validate_sum(board: Board) -> Result<Board, MalformedBoardError> {
    let sum = board.tile_sum();
    if sum > MAX_TILE_SUM {
        return Err(MalformedBoardError::TileSumTooLarge { sum });
    }
    Ok(board)
}

impl TryFrom<Vec<Vec<i64>>> for Board {
    type Error = MalformedBoardError;

    fn try_from(rows: Vec<Vec<i64>>) -> Result<Self, Self::Error> {
        if rows.len() != BOARD_SIZE {
            return Err(MalformedBoardError::RowCount { rows: rows.len() });
        }
        let mut values = [[0; BOARD_SIZE]; BOARD_SIZE];
        for (row, cells) in rows.iter().enumerate() {
            values[row] = cells
                .as_slice()
                .try_into()
                .map_err(|_| MalformedBoardError::CellCount {
                    row,
                    cells: cells.len(),
                })?;
        }
        Self::from_signed_rows(values)
    }
}

impl From<Board> for [[u32; BOARD_SIZE]; BOARD_SIZE] {
    fn from(board: Board) -> Self {
        board.cells
    }
}

impl FromStr for Board {
    type Err = ParseBoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tokens = s
            .split(|c: char| c.is_whitespace() || c == ',' || c == '/')
            .filter(|token| !token.is_empty())
            .collect::<Vec<_>>();
        if tokens.len() != CELL_COUNT {
            return Err(ParseBoardError::CellCount {
                cells: tokens.len(),
            });
        }

        let mut values = [[0; BOARD_SIZE]; BOARD_SIZE];
        for (i, token) in tokens.into_iter().enumerate() {
            let value = if token == "." {
                0
            } else {
                token
                    .parse::<i64>()
                    .map_err(|_| ParseBoardError::InvalidCell {
                        token: token.to_owned(),
                    })?
            };
            values[i / BOARD_SIZE][i % BOARD_SIZE] = value;
        }
        Self::from_signed_rows(values).map_err(ParseBoardError::Malformed)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.cells.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for (j, &value) in row.iter().enumerate() {
                if j > 0 {
                    write!(f, " ")?;
                }
                if value == 0 {
                    write!(f, "{:>6}", ".")?;
                } else {
                    write!(f, "{value:>6}")?;
                }
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Board").field(&self.cells).finish()
    }
}

#[cfg(test)]
mod tests {
    use rand::{Rng as _, SeedableRng as _};
    use rand_pcg::Pcg32;

    use super::*;
    use crate::engine::TileSpawner;

    fn board(s: &str) -> Board {
        s.parse().unwrap()
    }

    fn single_row(row: [u32; 4]) -> Board {
        Board::from_rows([row, [0; 4], [0; 4], [0; 4]]).unwrap()
    }

    /// Boards reached by random play from a fixed seed.
    fn sample_boards(count: usize) -> Vec<Board> {
        let mut spawner = TileSpawner::with_seed([7; 16].into());
        let mut rng = Pcg32::seed_from_u64(11);
        let mut boards = Vec::with_capacity(count);
        let mut current = spawner.initial_board();
        while boards.len() < count {
            boards.push(current);
            let legal = current.legal_directions();
            if legal.is_empty() {
                current = spawner.initial_board();
                continue;
            }
            let dir = legal[rng.random_range(0..legal.len())];
            let moved = current.apply(dir).board;
            current = spawner.spawn(moved).unwrap_or(moved);
        }
        boards
    }

    #[test]
    fn test_merge_pair_moving_left() {
        let result = single_row([2, 2, 0, 0]).apply(Direction::Left);
        assert_eq!(result.board, single_row([4, 0, 0, 0]));
        assert_eq!(result.score_delta, 4);
        assert!(result.changed);
    }

    #[test]
    fn test_slide_without_merge() {
        let result = single_row([0, 0, 2, 4]).apply(Direction::Left);
        assert_eq!(result.board, single_row([2, 4, 0, 0]));
        assert_eq!(result.score_delta, 0);
        assert!(result.changed);
    }

    #[test]
    fn test_each_tile_merges_once() {
        let result = single_row([2, 2, 2, 2]).apply(Direction::Left);
        assert_eq!(result.board, single_row([4, 4, 0, 0]));
        assert_eq!(result.score_delta, 8);

        let result = single_row([4, 4, 8, 0]).apply(Direction::Left);
        assert_eq!(result.board, single_row([8, 8, 0, 0]));
        assert_eq!(result.score_delta, 8);
    }

    #[test]
    fn test_leftmost_pair_merges_first() {
        let result = single_row([2, 2, 2, 0]).apply(Direction::Left);
        assert_eq!(result.board, single_row([4, 2, 0, 0]));

        let result = single_row([2, 2, 2, 0]).apply(Direction::Right);
        assert_eq!(result.board, single_row([0, 0, 2, 4]));
    }

    #[test]
    fn test_merge_across_gaps() {
        let result = single_row([2, 0, 0, 2]).apply(Direction::Left);
        assert_eq!(result.board, single_row([4, 0, 0, 0]));
        assert_eq!(result.score_delta, 4);
    }

    #[test]
    fn test_vertical_moves() {
        let b = board(
            "
            2 . . .
            2 . . .
            4 . . .
            . . . .
            ",
        );
        let up = b.apply(Direction::Up);
        assert_eq!(up.board, board("4 . . . / 4 . . . / . . . . / . . . ."));
        assert_eq!(up.score_delta, 4);

        let down = b.apply(Direction::Down);
        assert_eq!(down.board, board(". . . . / . . . . / 4 . . . / 4 . . ."));
        assert_eq!(down.score_delta, 4);
    }

    #[test]
    fn test_blocked_move_is_unchanged() {
        let b = single_row([2, 4, 8, 16]);
        let result = b.apply(Direction::Left);
        assert!(!result.changed);
        assert_eq!(result.board, b);
        assert_eq!(result.score_delta, 0);
    }

    #[test]
    fn test_unchanged_moves_return_the_same_board() {
        for b in sample_boards(300) {
            for dir in Direction::ALL {
                let result = b.apply(dir);
                if !result.changed {
                    assert_eq!(result.board, b);
                    assert_eq!(result.score_delta, 0);
                }
            }
        }
    }

    /// Score of a move counted line by line: tiles in travel order, leading pairs merging.
    fn merged_value(b: Board, dir: Direction) -> u32 {
        let lines = match dir {
            Direction::Left => b,
            Direction::Right => b.reflect_horizontally(),
            Direction::Up => b.transpose(),
            Direction::Down => b.transpose().reflect_horizontally(),
        };
        let mut score = 0;
        for line in lines.rows() {
            let tiles = line.iter().copied().filter(|&v| v != 0).collect::<Vec<_>>();
            let mut i = 0;
            while i < tiles.len() {
                if i + 1 < tiles.len() && tiles[i] == tiles[i + 1] {
                    score += tiles[i] * 2;
                    i += 2;
                } else {
                    i += 1;
                }
            }
        }
        score
    }

    #[test]
    fn test_move_conserves_tile_sum() {
        for b in sample_boards(300) {
            for dir in Direction::ALL {
                let result = b.apply(dir);
                assert_eq!(result.board.tile_sum(), b.tile_sum());
                assert_eq!(result.score_delta, merged_value(b, dir), "{dir:?}\n{b}");
                // every merge of two v-tiles scores 2v and removes one tile
                let merged_tiles = b.count_empty().abs_diff(result.board.count_empty());
                assert_eq!(result.score_delta == 0, merged_tiles == 0);
            }
        }
    }

    #[test]
    fn test_score_counts_each_merged_tile() {
        let b = board(
            "
            2 2 2 2
            4 4 8 .
            . 16 . 16
            2 . . 2
            ",
        );
        assert_eq!(b.apply(Direction::Left).score_delta, 4 + 4 + 8 + 32 + 4);
        assert_eq!(b.apply(Direction::Right).score_delta, 4 + 4 + 8 + 32 + 4);
        assert_eq!(b.apply(Direction::Up).score_delta, 0);
        for dir in Direction::ALL {
            assert_eq!(b.apply(dir).score_delta, merged_value(b, dir));
        }
    }

    #[test]
    fn test_direction_symmetry() {
        for b in sample_boards(300) {
            assert_eq!(
                b.reflect_horizontally().apply(Direction::Left).board,
                b.apply(Direction::Right).board.reflect_horizontally()
            );
            assert_eq!(
                b.transpose().apply(Direction::Left).board,
                b.apply(Direction::Up).board.transpose()
            );
            assert_eq!(
                b.transpose().apply(Direction::Right).board,
                b.apply(Direction::Down).board.transpose()
            );
        }
    }

    #[test]
    fn test_terminal_iff_no_legal_direction() {
        for b in sample_boards(2000) {
            assert_eq!(b.is_terminal(), b.legal_directions().is_empty(), "{b}");
        }
    }

    #[test]
    fn test_packed_alternating_board_is_terminal() {
        let b = board(
            "
            2 4 2 4
            4 2 4 2
            2 4 2 4
            4 2 4 2
            ",
        );
        assert!(b.is_terminal());
        assert!(b.legal_directions().is_empty());
        assert!(b.empty_cells().is_empty());
    }

    #[test]
    fn test_full_board_with_equal_neighbours_is_not_terminal() {
        let b = board(
            "
            2 4 2 4
            4 2 4 2
            2 4 2 4
            4 2 4 4
            ",
        );
        assert!(!b.is_terminal());
        assert_eq!(
            b.legal_directions().as_slice(),
            &[Direction::Up, Direction::Down, Direction::Left, Direction::Right]
        );
    }

    #[test]
    fn test_empty_cells_in_row_major_order() {
        let b = board(
            "
            2 . 2 2
            2 2 2 2
            2 2 2 .
            . 2 2 2
            ",
        );
        assert_eq!(b.empty_cells().as_slice(), &[(0, 1), (2, 3), (3, 0)]);
        assert_eq!(b.count_empty(), 3);
    }

    #[test]
    fn test_with_tile_leaves_source_untouched() {
        let b = Board::EMPTY;
        let placed = b.with_tile(1, 2, 4);
        assert_eq!(placed.tile(1, 2), 4);
        assert_eq!(b, Board::EMPTY);
    }

    #[test]
    fn test_rejects_malformed_tiles() {
        assert_eq!(
            Board::from_signed_rows([[0, 0, 0, 0], [0, -2, 0, 0], [0; 4], [0; 4]]),
            Err(MalformedBoardError::NegativeTile {
                row: 1,
                col: 1,
                value: -2
            })
        );
        assert_eq!(
            Board::from_rows([[0, 0, 6, 0], [0; 4], [0; 4], [0; 4]]),
            Err(MalformedBoardError::NotPowerOfTwo {
                row: 0,
                col: 2,
                value: 6
            })
        );
        assert!(matches!(
            Board::from_rows([[1, 0, 0, 0], [0; 4], [0; 4], [0; 4]]),
            Err(MalformedBoardError::NotPowerOfTwo { .. })
        ));
        assert!(matches!(
            Board::from_rows([[1 << 18, 0, 0, 0], [0; 4], [0; 4], [0; 4]]),
            Err(MalformedBoardError::TileTooLarge { .. })
        ));
    }

    #[test]
    fn test_rejects_unreachable_tile_sum() {
        // merging these would produce a 2^18 tile
        assert_eq!(
            "131072 131072 . . / . . . . / . . . . / . . . .".parse::<Board>(),
            Err(ParseBoardError::Malformed(
                MalformedBoardError::TileSumTooLarge { sum: 1 << 18 }
            ))
        );
        assert!(matches!(
            Board::from_rows([[MAX_TILE, 0, MAX_TILE, 0], [0; 4], [0; 4], [0; 4]]),
            Err(MalformedBoardError::TileSumTooLarge { .. })
        ));
        assert!(
            serde_json::from_str::<Board>(
                "[[131072,0,0,0],[0,0,0,0],[0,0,0,0],[0,0,0,131072]]"
            )
            .is_err()
        );

        // the fullest reachable board sits exactly on the bound
        let fullest = board(
            "
            131072 65536 32768 16384
              1024  2048  4096  8192
               512   256   128    64
                 4     8    16    32
            ",
        );
        assert_eq!(fullest.tile_sum(), MAX_TILE_SUM);
        for dir in Direction::ALL {
            let moved = fullest.apply(dir).board;
            assert!(moved.max_tile() <= MAX_TILE);
            assert_eq!(moved.to_string().parse::<Board>(), Ok(moved));
        }
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            "2 2 2".parse::<Board>(),
            Err(ParseBoardError::CellCount { cells: 3 })
        );
        assert!(matches!(
            "2 x . . / . . . . / . . . . / . . . .".parse::<Board>(),
            Err(ParseBoardError::InvalidCell { .. })
        ));
        assert!(matches!(
            "3 . . . / . . . . / . . . . / . . . .".parse::<Board>(),
            Err(ParseBoardError::Malformed(_))
        ));
    }

    #[test]
    fn test_display_parses_back() {
        for b in sample_boards(50) {
            assert_eq!(b.to_string().parse::<Board>(), Ok(b));
        }
    }

    #[test]
    fn test_serde_validates_snapshots() {
        let b = board("2 . . . / . 4 . . / . . . . / . . . 2048");
        let json = serde_json::to_string(&b).unwrap();
        assert_eq!(json, "[[2,0,0,0],[0,4,0,0],[0,0,0,0],[0,0,0,2048]]");
        assert_eq!(serde_json::from_str::<Board>(&json).unwrap(), b);

        assert!(serde_json::from_str::<Board>("[[2,0,0,0],[0,0,0,0],[0,0,0,0]]").is_err());
        assert!(serde_json::from_str::<Board>("[[3,0,0,0],[0,0,0,0],[0,0,0,0],[0,0,0,0]]").is_err());
        assert!(
            serde_json::from_str::<Board>("[[-2,0,0,0],[0,0,0,0],[0,0,0,0],[0,0,0,0]]").is_err()
        );
    }
}
