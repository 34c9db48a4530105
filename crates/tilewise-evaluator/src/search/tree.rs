use arrayvec::ArrayVec;
use tilewise_engine::{Board, Direction, spawn_distribution};

use crate::board_evaluator::BoardEvaluator;

use super::SearchStats;

/// Recursive node evaluation for a single search call.
#[derive(Debug)]
pub(super) struct TreeSearch<'a> {
    evaluator: &'a dyn BoardEvaluator,
    stats: SearchStats,
}

/// Boards reachable by one legal move, in [`Direction::ALL`] order.
fn moves(board: &Board) -> ArrayVec<(Direction, Board), { Direction::LEN }> {
    Direction::ALL
        .into_iter()
        .filter_map(|dir| {
            let result = board.apply(dir);
            result.changed.then_some((dir, result.board))
        })
        .collect()
}

/// Keeps the first child reaching the highest value.
fn improve(best: &mut Option<(f64, Direction)>, value: f64, dir: Direction) {
    if best.is_none_or(|(best_value, _)| value > best_value) {
        *best = Some((value, dir));
    }
}

impl<'a> TreeSearch<'a> {
    pub(super) fn new(evaluator: &'a dyn BoardEvaluator) -> Self {
        Self {
            evaluator,
            stats: SearchStats::default(),
        }
    }

    pub(super) fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Enters a node; returns the leaf value when the node is not expanded.
    fn enter(&mut self, board: &Board, depth: usize) -> Option<f64> {
        self.stats.nodes += 1;
        (depth == 0 || board.is_terminal()).then(|| self.evaluator.evaluate(board))
    }

    fn finish_max(&self, board: &Board, best: Option<(f64, Direction)>) -> (f64, Option<Direction>) {
        match best {
            Some((value, dir)) => (value, Some(dir)),
            None => (self.evaluator.evaluate(board), None),
        }
    }

    pub(super) fn expectimax_max(&mut self, board: &Board, depth: usize) -> (f64, Option<Direction>) {
        if let Some(value) = self.enter(board, depth) {
            return (value, None);
        }
        let mut best = None;
        for (dir, child) in moves(board) {
            let value = self.expectimax_chance(&child, depth - 1);
            improve(&mut best, value, dir);
        }
        self.finish_max(board, best)
    }

    pub(super) fn expectimax_chance(&mut self, board: &Board, depth: usize) -> f64 {
        if let Some(value) = self.enter(board, depth) {
            return value;
        }
        let outcomes = spawn_distribution(board);
        if outcomes.is_empty() {
            return self.evaluator.evaluate(board);
        }
        let mut expected = 0.0;
        for outcome in outcomes {
            let (value, _) = self.expectimax_max(&outcome.apply(*board), depth - 1);
            expected += outcome.probability * value;
        }
        expected
    }

    pub(super) fn minimax_max(&mut self, board: &Board, depth: usize) -> (f64, Option<Direction>) {
        if let Some(value) = self.enter(board, depth) {
            return (value, None);
        }
        let mut best = None;
        for (dir, child) in moves(board) {
            let value = self.minimax_min(&child, depth - 1);
            improve(&mut best, value, dir);
        }
        self.finish_max(board, best)
    }

    pub(super) fn minimax_min(&mut self, board: &Board, depth: usize) -> f64 {
        if let Some(value) = self.enter(board, depth) {
            return value;
        }
        let outcomes = spawn_distribution(board);
        if outcomes.is_empty() {
            return self.evaluator.evaluate(board);
        }
        let mut worst = f64::INFINITY;
        for outcome in outcomes {
            let (value, _) = self.minimax_max(&outcome.apply(*board), depth - 1);
            worst = worst.min(value);
        }
        worst
    }

    /// Max node of the pruned minimax tree.
    ///
    /// Once `alpha >= beta` the remaining children are skipped and the value found so far is
    /// returned. It is only a bound, and the parent never prefers it over what it already has.
    pub(super) fn alpha_beta_max(
        &mut self,
        board: &Board,
        depth: usize,
        mut alpha: f64,
        beta: f64,
    ) -> (f64, Option<Direction>) {
        if let Some(value) = self.enter(board, depth) {
            return (value, None);
        }
        let children = moves(board);
        let mut best = None;
        for (i, &(dir, child)) in children.iter().enumerate() {
            let value = self.alpha_beta_min(&child, depth - 1, alpha, beta);
            improve(&mut best, value, dir);
            alpha = alpha.max(value);
            if alpha >= beta {
                if i + 1 < children.len() {
                    self.stats.cutoffs += 1;
                }
                break;
            }
        }
        self.finish_max(board, best)
    }

    /// Min node of the pruned minimax tree; see [`Self::alpha_beta_max`].
    pub(super) fn alpha_beta_min(
        &mut self,
        board: &Board,
        depth: usize,
        alpha: f64,
        mut beta: f64,
    ) -> f64 {
        if let Some(value) = self.enter(board, depth) {
            return value;
        }
        let outcomes = spawn_distribution(board);
        if outcomes.is_empty() {
            return self.evaluator.evaluate(board);
        }
        let mut worst = f64::INFINITY;
        for (i, outcome) in outcomes.iter().enumerate() {
            let (value, _) = self.alpha_beta_max(&outcome.apply(*board), depth - 1, alpha, beta);
            worst = worst.min(value);
            beta = beta.min(value);
            if alpha >= beta {
                if i + 1 < outcomes.len() {
                    self.stats.cutoffs += 1;
                }
                break;
            }
        }
        worst
    }
}
