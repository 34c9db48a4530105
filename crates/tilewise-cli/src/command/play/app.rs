use crossterm::event::Event;
use ratatui::Frame;
use tilewise_engine::GameSeed;

use crate::{
    command::play::screens::Screen,
    schema::agent_config::AgentConfig,
    tui::{App, RenderMode, Tui},
};

const FPS: f64 = 60.0;
/// Moves per second the agent makes outside turbo mode.
const AUTO_MOVE_RATE: f64 = 8.0;

#[derive(Debug)]
pub struct PlayApp {
    screen: Screen,
}

impl PlayApp {
    pub fn manual(seed: Option<GameSeed>) -> Self {
        Self {
            screen: Screen::manual(seed),
        }
    }

    pub fn auto(config: &AgentConfig, turbo: bool) -> Self {
        Self {
            screen: Screen::auto(config, turbo),
        }
    }
}

impl App for PlayApp {
    fn init(&mut self, tui: &mut Tui) {
        match self.screen {
            Screen::Manual(_) => {
                tui.set_tick_rate(None);
                tui.set_render_mode(RenderMode::OnDirty);
            }
            Screen::Auto(_) => {
                tui.set_tick_rate(Some(AUTO_MOVE_RATE));
                tui.set_render_mode(RenderMode::throttled_from_rate(FPS));
            }
        }
    }

    fn should_exit(&self) -> bool {
        self.screen.is_exiting()
    }

    fn handle_event(&mut self, _tui: &mut Tui, event: Event) {
        self.screen.handle_event(&event);
    }

    fn draw(&self, frame: &mut Frame) {
        self.screen.draw(frame);
    }

    fn update(&mut self, _tui: &mut Tui) {
        self.screen.update();
    }
}
