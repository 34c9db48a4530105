use std::{iter, path::PathBuf};

use chrono::Utc;
use tilewise_engine::GameSeed;

use crate::{
    command::agent_arg::AgentArg,
    schema::run_report::{GameRecord, RunReport, RunSummary},
    util::Output,
};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct RunArg {
    #[clap(flatten)]
    agent: AgentArg,
    /// Number of games to play
    #[arg(long)]
    games: Option<usize>,
    /// Report file path (overrides `output_file` in the config)
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &RunArg) -> anyhow::Result<()> {
    let RunArg {
        agent,
        games,
        output,
    } = arg;

    let mut config = agent.load()?;
    if let Some(games) = games {
        config.num_games = *games;
    }
    if let Some(output) = output {
        config.output_file.clone_from(output);
        config.save_results = true;
    }
    config.validate()?;

    let base_seed = *config.seed.get_or_insert_with(rand::random::<GameSeed>);
    let seeds = base_seed.derive_seeds(config.num_games);
    let runner = config.session_runner();

    eprintln!(
        "Running {} games with {} ({:?}), seed {base_seed}",
        config.num_games,
        config.algorithm,
        runner.depth_policy()
    );

    let started_at = Utc::now();
    let results = runner.play_batch_with(&seeds, config.move_limit, |i, result| {
        eprintln!(
            "  game {i:3}: score {:7}, max tile {:6}, moves {:6}{}",
            result.final_score,
            result.max_tile,
            result.moves,
            if result.won { " (won)" } else { "" }
        );
    });
    let finished_at = Utc::now();

    let summary = RunSummary::from_results(&results);
    eprintln!();
    eprintln!("Summary ({} games):", summary.games);
    eprintln!("  Mean score:   {:.1}", summary.mean_score);
    eprintln!("  Median score: {:.1}", summary.median_score);
    eprintln!("  Min score:    {}", summary.min_score);
    eprintln!("  Max score:    {}", summary.max_score);
    eprintln!("  Win rate:     {:.1}%", summary.win_rate * 100.0);
    eprintln!("  Max tiles:");
    for (tile, count) in &summary.max_tile_counts {
        eprintln!("    {tile:6}: {count}");
    }
    eprintln!("  Elapsed:      {:.1}s", elapsed_secs(started_at, finished_at));

    let output_path = config.save_results.then(|| config.output_file.clone());
    let report = RunReport {
        games: iter::zip(seeds, results)
            .map(|(seed, result)| GameRecord { seed, result })
            .collect(),
        config,
        started_at,
        finished_at,
        summary,
    };
    Output::save_json(&report, output_path.clone())?;
    if let Some(path) = output_path {
        eprintln!("Report saved to {}", path.display());
    }

    Ok(())
}

#[expect(clippy::cast_precision_loss)]
fn elapsed_secs(start: chrono::DateTime<Utc>, end: chrono::DateTime<Utc>) -> f64 {
    (end - start).num_milliseconds() as f64 / 1000.0
}
