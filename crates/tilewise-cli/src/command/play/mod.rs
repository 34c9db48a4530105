use tilewise_engine::GameSeed;

use crate::{
    command::{agent_arg::AgentArg, play::app::PlayApp},
    tui::Tui,
};

mod app;
mod screens;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct ManualPlayArg {
    /// Game seed (32 hex digits); random when omitted
    #[clap(long)]
    seed: Option<GameSeed>,
}

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct AutoPlayArg {
    #[clap(flatten)]
    agent: AgentArg,
    /// Start in turbo mode
    #[clap(long, default_value_t = false)]
    turbo: bool,
}

pub(crate) fn run_manual(arg: &ManualPlayArg) -> anyhow::Result<()> {
    let ManualPlayArg { seed } = arg;
    let mut app = PlayApp::manual(*seed);
    Tui::new().run(&mut app)?;
    Ok(())
}

pub(crate) fn run_auto(arg: &AutoPlayArg) -> anyhow::Result<()> {
    let AutoPlayArg { agent, turbo } = arg;
    let config = agent.load()?;
    let mut app = PlayApp::auto(&config, *turbo);
    Tui::new().run(&mut app)?;
    Ok(())
}
