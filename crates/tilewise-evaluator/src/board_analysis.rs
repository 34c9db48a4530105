//! Lazily computed board metrics shared by the heuristic features.
//!
//! Each metric is computed at most once per [`BoardAnalysis`], so features reading the same
//! metric do not repeat the scan.

use std::cell::OnceCell;

use tilewise_engine::{BOARD_SIZE, Board};

/// Where the largest tile sits on the grid, best first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum TilePlacement {
    Corner,
    Edge,
    Inner,
}

/// Rows followed by columns: the 8 lines along which tiles slide.
pub type Lines = [[u32; BOARD_SIZE]; BOARD_SIZE * 2];

#[derive(Debug)]
pub struct BoardAnalysis {
    board: Board,
    lines: OnceCell<Lines>,
    is_terminal: OnceCell<bool>,
    empty_cells: OnceCell<u32>,
    max_tile: OnceCell<u32>,
    max_tile_placement: OnceCell<Option<TilePlacement>>,
    monotonicity: OnceCell<u32>,
    roughness: OnceCell<u32>,
    merge_pairs: OnceCell<u32>,
}

impl BoardAnalysis {
    #[must_use]
    pub fn from_board(board: &Board) -> Self {
        Self {
            board: *board,
            lines: OnceCell::new(),
            is_terminal: OnceCell::new(),
            empty_cells: OnceCell::new(),
            max_tile: OnceCell::new(),
            max_tile_placement: OnceCell::new(),
            monotonicity: OnceCell::new(),
            roughness: OnceCell::new(),
            merge_pairs: OnceCell::new(),
        }
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn lines(&self) -> &Lines {
        self.lines.get_or_init(|| {
            let mut lines = [[0; BOARD_SIZE]; BOARD_SIZE * 2];
            let (rows, columns) = lines.split_at_mut(BOARD_SIZE);
            rows.copy_from_slice(self.board.rows());
            columns.copy_from_slice(self.board.transpose().rows());
            lines
        })
    }

    #[must_use]
    pub fn is_terminal(&self) -> bool {
        *self.is_terminal.get_or_init(|| self.board.is_terminal())
    }

    #[must_use]
    pub fn empty_cells(&self) -> u32 {
        *self.empty_cells.get_or_init(|| {
            // at most 16
            #[expect(clippy::cast_possible_truncation)]
            let count = self.board.count_empty() as u32;
            count
        })
    }

    #[must_use]
    pub fn max_tile(&self) -> u32 {
        *self.max_tile.get_or_init(|| self.board.max_tile())
    }

    /// Best placement among the cells holding the largest tile; `None` on an empty board.
    #[must_use]
    pub fn max_tile_placement(&self) -> Option<TilePlacement> {
        *self.max_tile_placement.get_or_init(|| {
            let max = self.max_tile();
            if max == 0 {
                return None;
            }
            let last = BOARD_SIZE - 1;
            self.board
                .cells()
                .filter(|&(_, _, value)| value == max)
                .map(|(row, col, _)| {
                    let row_edge = row == 0 || row == last;
                    let col_edge = col == 0 || col == last;
                    match (row_edge, col_edge) {
                        (true, true) => TilePlacement::Corner,
                        (true, false) | (false, true) => TilePlacement::Edge,
                        (false, false) => TilePlacement::Inner,
                    }
                })
                .min()
        })
    }

    /// Sum over all 8 lines of the larger of (non-decreasing pairs, non-increasing pairs).
    ///
    /// Empty cells are skipped, so pairs are formed between consecutive tiles of a line.
    /// Equal pairs count towards both directions.
    #[must_use]
    pub fn monotonicity(&self) -> u32 {
        *self.monotonicity.get_or_init(|| {
            self.lines()
                .iter()
                .map(|line| {
                    let tiles = line.iter().copied().filter(|&v| v != 0);
                    let mut increasing = 0;
                    let mut decreasing = 0;
                    let mut prev = None;
                    for value in tiles {
                        if let Some(prev) = prev {
                            if prev <= value {
                                increasing += 1;
                            }
                            if prev >= value {
                                decreasing += 1;
                            }
                        }
                        prev = Some(value);
                    }
                    u32::max(increasing, decreasing)
                })
                .sum()
        })
    }

    /// Sum of `|log2 a - log2 b|` over horizontally and vertically adjacent non-empty cells.
    ///
    /// Tiles are powers of two, so the exponent is read from the bit position and empty cells
    /// never reach the logarithm.
    #[must_use]
    pub fn roughness(&self) -> u32 {
        *self.roughness.get_or_init(|| {
            self.lines()
                .iter()
                .flat_map(|line| line.windows(2))
                .filter(|pair| pair[0] != 0 && pair[1] != 0)
                .map(|pair| pair[0].trailing_zeros().abs_diff(pair[1].trailing_zeros()))
                .sum()
        })
    }

    /// Number of horizontally or vertically adjacent pairs holding the same tile.
    #[must_use]
    pub fn merge_pairs(&self) -> u32 {
        *self.merge_pairs.get_or_init(|| {
            let pairs = self
                .lines()
                .iter()
                .flat_map(|line| line.windows(2))
                .filter(|pair| pair[0] != 0 && pair[0] == pair[1])
                .count();
            // at most 24 adjacent pairs on the grid
            #[expect(clippy::cast_possible_truncation)]
            let pairs = pairs as u32;
            pairs
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyze(s: &str) -> BoardAnalysis {
        BoardAnalysis::from_board(&s.parse().unwrap())
    }

    #[test]
    fn test_lines_are_rows_then_columns() {
        let analysis = analyze("2 4 . . / . . . . / . . . . / 8 . . .");
        let lines = analysis.lines();
        assert_eq!(lines[0], [2, 4, 0, 0]);
        assert_eq!(lines[3], [8, 0, 0, 0]);
        assert_eq!(lines[4], [2, 0, 0, 8]);
        assert_eq!(lines[5], [4, 0, 0, 0]);
    }

    #[test]
    fn test_empty_board_metrics() {
        let analysis = BoardAnalysis::from_board(&Board::EMPTY);
        assert_eq!(analysis.empty_cells(), 16);
        assert_eq!(analysis.max_tile(), 0);
        assert_eq!(analysis.max_tile_placement(), None);
        assert_eq!(analysis.monotonicity(), 0);
        assert_eq!(analysis.roughness(), 0);
        assert_eq!(analysis.merge_pairs(), 0);
        assert!(!analysis.is_terminal());
    }

    #[test]
    fn test_monotonicity_of_sorted_row() {
        // row 0 is strictly increasing (3 pairs), columns hold a single tile each
        let analysis = analyze("2 4 8 16 / . . . . / . . . . / . . . .");
        assert_eq!(analysis.monotonicity(), 3);
    }

    #[test]
    fn test_monotonicity_counts_ties_both_ways() {
        let analysis = analyze("2 2 2 2 / . . . . / . . . . / . . . .");
        assert_eq!(analysis.monotonicity(), 3);

        // 2 <= 8 >= 4: one pair each way
        let analysis = analyze("2 8 4 . / . . . . / . . . . / . . . .");
        assert_eq!(analysis.monotonicity(), 1);
    }

    #[test]
    fn test_monotonicity_skips_gaps() {
        let analysis = analyze("2 . 4 8 / . . . . / . . . . / . . . .");
        assert_eq!(analysis.monotonicity(), 2);
    }

    #[test]
    fn test_roughness_skips_empty_cells() {
        // 2 next to an empty cell contributes nothing; 2-8 is |1-3| = 2; 8-2 vertical is 2
        let analysis = analyze("2 8 . . / . 2 . . / . . . . / . . . .");
        assert_eq!(analysis.roughness(), 4);

        let analysis = analyze("2 . . . / . . . . / . . . . / . . . 4");
        assert_eq!(analysis.roughness(), 0);
    }

    #[test]
    fn test_merge_pairs() {
        let analysis = analyze("2 2 . . / 2 4 4 . / . . . . / . . . .");
        // (0,0)-(0,1), (1,1)-(1,2), (0,0)-(1,0)
        assert_eq!(analysis.merge_pairs(), 3);

        let analysis = analyze("2 . 2 . / . . . . / . . . . / . . . .");
        assert_eq!(analysis.merge_pairs(), 0);
    }

    #[test]
    fn test_max_tile_placement() {
        assert_eq!(
            analyze(". . . . / . . . . / . . . . / . . . 64").max_tile_placement(),
            Some(TilePlacement::Corner)
        );
        assert_eq!(
            analyze(". . . . / 64 . . . / . . . . / . . . .").max_tile_placement(),
            Some(TilePlacement::Edge)
        );
        assert_eq!(
            analyze(". . . . / . 64 . . / . . . . / . . . .").max_tile_placement(),
            Some(TilePlacement::Inner)
        );
        // the best placement wins when the largest tile appears twice
        assert_eq!(
            analyze(". . . . / . 64 . . / . . . . / . . . 64").max_tile_placement(),
            Some(TilePlacement::Corner)
        );
    }
}
