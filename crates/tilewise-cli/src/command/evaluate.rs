use std::{
    fs,
    io::{self, Write},
    path::Path,
};

use anyhow::Context as _;
use tilewise_engine::Board;
use tilewise_evaluator::board_evaluator::{BoardEvaluator as _, FeatureBasedBoardEvaluator};

use crate::{command::agent_arg::AgentArg, schema::agent_config::AgentConfig};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct EvaluateArg {
    #[clap(flatten)]
    agent: AgentArg,
    /// Board file, or the board itself (e.g. "2 2 . . / . 4 . . / . . . . / . . . 8")
    board: String,
}

pub(crate) fn run(arg: &EvaluateArg) -> anyhow::Result<()> {
    let EvaluateArg { agent, board } = arg;
    let config = agent.load()?;
    let board = read_board(board)?;
    let mut stdout = io::stdout().lock();
    write_evaluation(&mut stdout, &board, &config).context("Failed to write to stdout")?;
    Ok(())
}

/// Reads a board from a file when `input` names one, otherwise parses `input` itself.
///
/// Both the text form and a JSON 4×4 array are accepted.
fn read_board(input: &str) -> anyhow::Result<Board> {
    let path = Path::new(input);
    let (text, source) = if path.is_file() {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read board file: {}", path.display()))?;
        (text, path.display().to_string())
    } else {
        (input.to_owned(), "command line".to_owned())
    };

    let board = if text.trim_start().starts_with('[') {
        serde_json::from_str(&text).with_context(|| format!("Invalid board JSON ({source})"))?
    } else {
        text.parse()
            .with_context(|| format!("Invalid board ({source})"))?
    };
    Ok(board)
}

fn write_evaluation<W>(w: &mut W, board: &Board, config: &AgentConfig) -> io::Result<()>
where
    W: Write,
{
    let evaluator = FeatureBasedBoardEvaluator::from_weights(&config.weights);
    let engine = config.search_engine();
    let depth = config.depth_policy().depth_for(board);

    writeln!(w, "Board:")?;
    writeln!(w, "{board}")?;
    writeln!(w)?;

    writeln!(w, "Features:")?;
    for c in evaluator.contributions(board) {
        writeln!(
            w,
            "  {:<16} {:>10.3} x {:>8.2} = {:>12.2}",
            c.name,
            c.value,
            c.weight,
            c.weighted()
        )?;
    }
    writeln!(w, "Evaluation: {:.2}", evaluator.evaluate(board))?;
    writeln!(w)?;

    let legal = board.legal_directions();
    if legal.is_empty() {
        writeln!(w, "Legal moves: none (game over)")?;
        return Ok(());
    }
    let names = legal.iter().map(ToString::to_string).collect::<Vec<_>>();
    writeln!(w, "Legal moves: {}", names.join(", "))?;
    writeln!(w)?;

    writeln!(w, "Search ({}, depth {depth}):", engine.algorithm())?;
    for branch in engine.branch_values(board, depth) {
        let arrow = branch.direction.arrow();
        let name = branch.direction.to_string();
        if branch.legal {
            writeln!(w, "  {arrow} {name:<6} {:>12.2}", branch.value)?;
        } else {
            writeln!(w, "  {arrow} {name:<6} {:>12}", "illegal")?;
        }
    }

    let result = engine.search(board, depth);
    match result.direction {
        Some(direction) => writeln!(
            w,
            "Best move: {direction} (value {:.2}, {} nodes, {} cutoffs)",
            result.value, result.stats.nodes, result.stats.cutoffs
        )?,
        None => writeln!(w, "Best move: none")?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use tilewise_evaluator::search::SearchAlgorithm;

    use super::*;

    fn evaluation(board: &str, config: &AgentConfig) -> String {
        let board = read_board(board).unwrap();
        let mut out = Vec::new();
        write_evaluation(&mut out, &board, config).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_read_inline_and_json_boards() {
        let text = read_board("2 2 . . / . . . . / . . . . / . . . 4").unwrap();
        let json =
            read_board("[[2, 2, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 4]]").unwrap();
        assert_eq!(text, json);
    }

    #[test]
    fn test_read_board_rejects_bad_tiles() {
        assert!(read_board("3 . . . / . . . . / . . . . / . . . .").is_err());
        assert!(read_board("[[2, 0, 0, 0]]").is_err());
    }

    #[test]
    fn test_evaluation_report() {
        let config = AgentConfig {
            algorithm: SearchAlgorithm::Minimax,
            depth: 2,
            ..AgentConfig::default()
        };
        let out = evaluation("2 2 . . / . . . . / . . . . / . . . .", &config);
        assert!(out.contains("Features:"));
        assert!(out.contains("Empty Cells"), "{out}");
        assert!(out.contains("Legal moves: down, left, right"), "{out}");
        assert!(out.contains("Search (minimax, depth 2):"));
        assert!(out.contains("Best move: "));
        assert!(!out.contains("Best move: none"));
    }

    #[test]
    fn test_locked_board_report() {
        let out = evaluation(
            "2 4 2 4 / 4 2 4 2 / 2 4 2 4 / 4 2 4 2",
            &AgentConfig::default(),
        );
        assert!(out.contains("Evaluation: -inf"));
        assert!(out.contains("Legal moves: none (game over)"));
        assert!(!out.contains("Search ("));
    }

    #[test]
    fn test_illegal_branch_is_marked() {
        let out = evaluation(
            "2 . . . / . . . . / . . . . / . . . .",
            &AgentConfig {
                depth: 1,
                ..AgentConfig::default()
            },
        );
        assert_eq!(out.matches("illegal").count(), 2);
    }
}
