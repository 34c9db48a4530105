//! Plays whole games with a [`SearchEngine`].
//!
//! Independent games share nothing but the read-only engine. A batch runs on a fixed pool of
//! scoped worker threads, at most one per available core, each pulling the next unplayed seed.

use std::{
    num::NonZeroUsize,
    panic,
    sync::atomic::{AtomicUsize, Ordering},
    thread,
};

use tilewise_engine::{Board, GameResult, GameSeed, GameSession};

use crate::{
    depth_policy::DepthPolicy,
    search::{SearchEngine, SearchResult},
};

#[derive(Debug)]
pub struct SessionRunner<'a> {
    engine: SearchEngine<'a>,
    depth_policy: DepthPolicy,
}

impl<'a> SessionRunner<'a> {
    #[must_use]
    pub fn new(engine: SearchEngine<'a>, depth_policy: DepthPolicy) -> Self {
        Self {
            engine,
            depth_policy,
        }
    }

    #[must_use]
    pub fn engine(&self) -> &SearchEngine<'a> {
        &self.engine
    }

    #[must_use]
    pub fn depth_policy(&self) -> DepthPolicy {
        self.depth_policy
    }

    /// Searches `board` at the depth the policy picks for it.
    #[must_use]
    pub fn next_move(&self, board: &Board) -> SearchResult {
        let depth = self.depth_policy.depth_for(board);
        self.engine.search(board, depth)
    }

    /// Plays until the game ends, the engine finds no move, or `move_limit` moves were made.
    pub fn play(&self, session: &mut GameSession, move_limit: usize) -> GameResult {
        while session.session_state().is_playing() && session.stats().moves() < move_limit {
            let result = self.next_move(session.board());
            let Some(direction) = result.direction else {
                break;
            };
            if let Err(e) = session.try_move(direction) {
                log::warn!("engine chose {direction} but the game rejected it: {e}");
                break;
            }
            log::trace!(
                "move {}: {direction} (value {:.1}), score {}",
                session.stats().moves(),
                result.value,
                session.stats().score()
            );
        }

        let result = session.result();
        log::debug!(
            "game finished after {} moves: score {}, max tile {}",
            result.moves,
            result.final_score,
            result.max_tile
        );
        result
    }

    /// Plays one game per seed in parallel; results are in seed order.
    pub fn play_batch(&self, seeds: &[GameSeed], move_limit: usize) -> Vec<GameResult> {
        self.play_batch_with(seeds, move_limit, |_, _| {})
    }

    /// Like [`Self::play_batch`], calling `on_game_end` with the seed index as each game ends.
    pub fn play_batch_with<F>(
        &self,
        seeds: &[GameSeed],
        move_limit: usize,
        on_game_end: F,
    ) -> Vec<GameResult>
    where
        F: Fn(usize, &GameResult) + Sync,
    {
        let workers = thread::available_parallelism().map_or(1, NonZeroUsize::get);
        self.play_batch_on(workers, seeds, move_limit, on_game_end)
    }

    fn play_batch_on<F>(
        &self,
        workers: usize,
        seeds: &[GameSeed],
        move_limit: usize,
        on_game_end: F,
    ) -> Vec<GameResult>
    where
        F: Fn(usize, &GameResult) + Sync,
    {
        let workers = workers.clamp(1, seeds.len().max(1));
        log::debug!("playing {} games on {workers} workers", seeds.len());

        let next_seed = &AtomicUsize::new(0);
        let on_game_end = &on_game_end;
        let mut results = vec![GameResult::default(); seeds.len()];
        thread::scope(|s| {
            let handles = (0..workers)
                .map(|_| {
                    s.spawn(move || {
                        let mut finished = vec![];
                        loop {
                            let i = next_seed.fetch_add(1, Ordering::Relaxed);
                            let Some(seed) = seeds.get(i) else {
                                break;
                            };
                            let mut session = GameSession::with_seed(*seed);
                            let result = self.play(&mut session, move_limit);
                            on_game_end(i, &result);
                            finished.push((i, result));
                        }
                        finished
                    })
                })
                .collect::<Vec<_>>();
            for handle in handles {
                let finished = handle.join().unwrap_or_else(|e| panic::resume_unwind(e));
                for (i, result) in finished {
                    results[i] = result;
                }
            }
        });
        log::info!("finished {} games", results.len());
        results
    }
}
