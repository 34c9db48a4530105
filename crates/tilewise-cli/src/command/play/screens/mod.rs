use crossterm::event::Event;
use ratatui::Frame;
use tilewise_engine::GameSeed;

use crate::{
    command::play::screens::{auto::AutoPlayScreen, manual::ManualPlayScreen},
    schema::agent_config::AgentConfig,
};

mod auto;
mod manual;

#[derive(Debug)]
pub enum Screen {
    Manual(ManualPlayScreen),
    Auto(AutoPlayScreen),
}

impl Screen {
    pub fn manual(seed: Option<GameSeed>) -> Self {
        Screen::Manual(ManualPlayScreen::new(seed))
    }

    pub fn auto(config: &AgentConfig, turbo: bool) -> Self {
        Screen::Auto(AutoPlayScreen::new(config, turbo))
    }

    pub fn is_exiting(&self) -> bool {
        match self {
            Screen::Manual(screen) => screen.is_exiting(),
            Screen::Auto(screen) => screen.is_exiting(),
        }
    }

    pub fn draw(&self, frame: &mut Frame<'_>) {
        match self {
            Screen::Manual(screen) => screen.draw(frame),
            Screen::Auto(screen) => screen.draw(frame),
        }
    }

    pub fn handle_event(&mut self, event: &Event) {
        match self {
            Screen::Manual(screen) => screen.handle_event(event),
            Screen::Auto(screen) => screen.handle_event(event),
        }
    }

    pub fn update(&mut self) {
        match self {
            Screen::Manual(_) => {}
            Screen::Auto(screen) => screen.update(),
        }
    }
}
