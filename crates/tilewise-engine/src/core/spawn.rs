use arrayvec::ArrayVec;

use crate::core::board::{Board, CELL_COUNT};

/// Probability that a spawned tile is a 2.
pub const TWO_TILE_PROBABILITY: f64 = 0.9;

/// Probability that a spawned tile is a 4.
pub const FOUR_TILE_PROBABILITY: f64 = 0.1;

/// Maximum number of chance outcomes: two tile values for each empty cell.
pub const MAX_SPAWN_OUTCOMES: usize = CELL_COUNT * 2;

/// One possible tile appearance after a move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnOutcome {
    pub row: usize,
    pub col: usize,
    pub value: u32,
    pub probability: f64,
}

impl SpawnOutcome {
    /// Board with this outcome's tile placed.
    #[must_use]
    pub fn apply(&self, board: Board) -> Board {
        board.with_tile(self.row, self.col, self.value)
    }
}

/// Enumerates every tile that may appear on `board`, with its probability.
///
/// The empty cell is uniform among empty cells and the value is 2 with probability
/// [`TWO_TILE_PROBABILITY`] or 4 with [`FOUR_TILE_PROBABILITY`]. Outcomes are listed in
/// row-major cell order, the 2-tile before the 4-tile. A full board has no outcomes.
#[must_use]
pub fn spawn_distribution(board: &Board) -> ArrayVec<SpawnOutcome, MAX_SPAWN_OUTCOMES> {
    let empty = board.empty_cells();
    let mut outcomes = ArrayVec::new();
    if empty.is_empty() {
        return outcomes;
    }

    #[expect(clippy::cast_precision_loss)]
    let empty_count = empty.len() as f64;
    for (row, col) in empty {
        for (value, p) in [(2, TWO_TILE_PROBABILITY), (4, FOUR_TILE_PROBABILITY)] {
            outcomes.push(SpawnOutcome {
                row,
                col,
                value,
                probability: p / empty_count,
            });
        }
    }
    outcomes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probabilities_sum_to_one() {
        for s in [
            ". . . . / . . . . / . . . . / . . . .",
            "2 . . . / . . . . / . . . . / . . . 4",
            "2 4 2 4 / 4 2 4 2 / 2 4 2 4 / 4 2 4 .",
        ] {
            let board: Board = s.parse().unwrap();
            let outcomes = spawn_distribution(&board);
            assert_eq!(outcomes.len(), board.count_empty() * 2);
            let total: f64 = outcomes.iter().map(|o| o.probability).sum();
            assert!((total - 1.0).abs() < 1e-9, "{total}");
        }
    }

    #[test]
    fn test_single_empty_cell() {
        let board: Board = "2 4 2 4 / 4 2 4 2 / 2 4 2 4 / 4 2 4 .".parse().unwrap();
        let outcomes = spawn_distribution(&board);
        assert_eq!(outcomes.len(), 2);
        assert_eq!((outcomes[0].row, outcomes[0].col, outcomes[0].value), (3, 3, 2));
        assert!((outcomes[0].probability - 0.9).abs() < 1e-12);
        assert_eq!(outcomes[1].value, 4);
        assert!((outcomes[1].probability - 0.1).abs() < 1e-12);
        assert_eq!(outcomes[1].apply(board).tile(3, 3), 4);
    }

    #[test]
    fn test_probabilities_are_exact_shares() {
        for (s, empty) in [
            ("2 4 2 4 / 4 2 4 2 / 2 4 2 4 / 4 2 4 .", 1.0),
            ("2 4 2 4 / 4 2 4 2 / 2 4 2 4 / 4 2 . .", 2.0),
            (". . . . / . . . . / . . . . / . . . 2", 15.0),
        ] {
            let board: Board = s.parse().unwrap();
            for outcome in spawn_distribution(&board) {
                let share = if outcome.value == 2 { 0.9 } else { 0.1 };
                let expected: f64 = share / empty;
                assert_eq!(outcome.probability.to_bits(), f64::to_bits(expected));
            }
        }
    }

    #[test]
    fn test_full_board_has_no_outcomes() {
        let board: Board = "2 4 2 4 / 4 2 4 2 / 2 4 2 4 / 4 2 4 2".parse().unwrap();
        assert!(spawn_distribution(&board).is_empty());
    }

    #[test]
    fn test_outcomes_in_row_major_order() {
        let board: Board = "2 . 2 2 / 2 2 2 2 / 2 2 2 . / 2 2 2 2".parse().unwrap();
        let cells = spawn_distribution(&board)
            .iter()
            .map(|o| (o.row, o.col, o.value))
            .collect::<Vec<_>>();
        assert_eq!(cells, [(0, 1, 2), (0, 1, 4), (2, 3, 2), (2, 3, 4)]);
    }
}
