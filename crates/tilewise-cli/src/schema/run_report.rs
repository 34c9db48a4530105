use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tilewise_engine::{GameResult, GameSeed};

use crate::schema::agent_config::AgentConfig;

/// Output of `tilewise run`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub config: AgentConfig,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub games: Vec<GameRecord>,
    pub summary: RunSummary,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    pub seed: GameSeed,
    #[serde(flatten)]
    pub result: GameResult,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub games: usize,
    pub mean_score: f64,
    pub median_score: f64,
    pub min_score: u64,
    pub max_score: u64,
    pub mean_moves: f64,
    pub win_rate: f64,
    /// Number of games by their largest tile.
    pub max_tile_counts: BTreeMap<u32, usize>,
}

impl RunSummary {
    /// Aggregates finished games; all figures are zero for an empty batch.
    #[expect(clippy::cast_precision_loss)]
    pub fn from_results<'a, I>(results: I) -> Self
    where
        I: IntoIterator<Item = &'a GameResult>,
    {
        let results = results.into_iter().collect::<Vec<_>>();
        let mut scores = results.iter().map(|r| r.final_score).collect::<Vec<_>>();
        scores.sort_unstable();

        let count = results.len();
        let mut max_tile_counts = BTreeMap::new();
        for result in &results {
            *max_tile_counts.entry(result.max_tile).or_insert(0) += 1;
        }

        let mean = |total: f64| {
            if count == 0 { 0.0 } else { total / count as f64 }
        };
        let median_score = match count {
            0 => 0.0,
            n if n % 2 == 1 => scores[n / 2] as f64,
            n => (scores[n / 2 - 1] as f64 + scores[n / 2] as f64) / 2.0,
        };

        Self {
            games: count,
            mean_score: mean(scores.iter().map(|&s| s as f64).sum()),
            median_score,
            min_score: scores.first().copied().unwrap_or(0),
            max_score: scores.last().copied().unwrap_or(0),
            mean_moves: mean(results.iter().map(|r| r.moves as f64).sum()),
            win_rate: mean(results.iter().filter(|r| r.won).count() as f64),
            max_tile_counts,
        }
    }
}
