use clap::{ArgAction, Parser, Subcommand};

use crate::logger;

use self::{
    evaluate::EvaluateArg,
    init_config::InitConfigArg,
    play::{AutoPlayArg, ManualPlayArg},
    run::RunArg,
};

mod agent_arg;
mod evaluate;
mod init_config;
mod play;
mod run;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Print more log output to stderr (repeat for more detail)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
    /// Only print errors to stderr
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Play the game with the keyboard
    #[command(name = "play")]
    ManualPlay(#[clap(flatten)] ManualPlayArg),
    /// Watch the search agent play
    #[command(name = "auto-play")]
    AutoPlay(#[clap(flatten)] AutoPlayArg),
    /// Run a batch of games headless and write a JSON report
    Run(#[clap(flatten)] RunArg),
    /// Show the evaluation and search values of a board
    Evaluate(#[clap(flatten)] EvaluateArg),
    /// Write the default agent configuration
    InitConfig(#[clap(flatten)] InitConfigArg),
}

impl Mode {
    fn is_interactive(&self) -> bool {
        matches!(self, Mode::ManualPlay(_) | Mode::AutoPlay(_))
    }
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    let mode = args
        .mode
        .unwrap_or(Mode::ManualPlay(ManualPlayArg::default()));

    let mut filter = logger::level_filter(args.verbose, args.quiet);
    if mode.is_interactive() {
        // stderr shares the terminal with the TUI
        filter = filter.min(log::LevelFilter::Error);
    }
    logger::init(filter);

    match mode {
        Mode::ManualPlay(arg) => play::run_manual(&arg)?,
        Mode::AutoPlay(arg) => play::run_auto(&arg)?,
        Mode::Run(arg) => run::run(&arg)?,
        Mode::Evaluate(arg) => evaluate::run(&arg)?,
        Mode::InitConfig(arg) => init_config::run(&arg)?,
    }
    Ok(())
}
