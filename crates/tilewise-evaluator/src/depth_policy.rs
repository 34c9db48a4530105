use tilewise_engine::Board;

/// How deep to search before each move.
///
/// The search itself always runs to a fixed depth; a variable policy only picks that depth
/// from the current board between calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DepthPolicy {
    Fixed(usize),
    /// Deeper as tiles grow or the board fills up, kept within `min..=max`.
    Variable { min: usize, max: usize },
}

impl DepthPolicy {
    #[must_use]
    pub fn depth_for(&self, board: &Board) -> usize {
        match *self {
            Self::Fixed(depth) => depth,
            Self::Variable { min, max } => variable_depth(board).max(min).min(max),
        }
    }
}

fn variable_depth(board: &Board) -> usize {
    match board.max_tile() {
        1024.. => 6,
        512.. => 5,
        256.. => 4,
        _ if board.count_empty() <= 4 => 5,
        _ => 3,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(s: &str) -> Board {
        s.parse().unwrap()
    }

    #[test]
    fn test_fixed_ignores_board() {
        let policy = DepthPolicy::Fixed(4);
        assert_eq!(policy.depth_for(&Board::EMPTY), 4);
        assert_eq!(
            policy.depth_for(&board("1024 . . . / . . . . / . . . . / . . . .")),
            4
        );
    }

    #[test]
    fn test_variable_schedule() {
        let policy = DepthPolicy::Variable { min: 1, max: 10 };
        let cases = [
            ("2 . . . / . . . . / . . . . / . . . .", 3),
            ("2 4 8 16 / 4 8 16 32 / 8 16 32 . / . . . .", 3),
            ("2 4 8 16 / 4 8 16 32 / 8 16 32 64 / 2 . . .", 5),
            ("256 . . . / . . . . / . . . . / . . . .", 4),
            ("512 . . . / . . . . / . . . . / . . . .", 5),
            ("2048 . . . / . . . . / . . . . / . . . .", 6),
        ];
        for (s, expected) in cases {
            assert_eq!(policy.depth_for(&board(s)), expected, "{s}");
        }
    }

    #[test]
    fn test_variable_is_clamped() {
        let deep = board("1024 . . . / . . . . / . . . . / . . . .");
        let shallow = board("2 . . . / . . . . / . . . . / . . . .");
        let policy = DepthPolicy::Variable { min: 4, max: 5 };
        assert_eq!(policy.depth_for(&deep), 5);
        assert_eq!(policy.depth_for(&shallow), 4);
    }
}
