use crossterm::event::{Event, KeyCode, KeyEventKind};
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    style::{Color, Style},
    text::Text,
};
use tilewise_engine::{Direction, GameSeed, GameSession, SessionState};

use crate::view::widgets::SessionDisplay;

#[derive(Debug)]
pub struct ManualPlayScreen {
    session: GameSession,
    is_exiting: bool,
}

fn new_session(seed: Option<GameSeed>) -> GameSession {
    seed.map_or_else(GameSession::new, GameSession::with_seed)
}

fn key_direction(code: KeyCode) -> Option<Direction> {
    match code {
        KeyCode::Up | KeyCode::Char('w') => Some(Direction::Up),
        KeyCode::Down | KeyCode::Char('s') => Some(Direction::Down),
        KeyCode::Left | KeyCode::Char('a') => Some(Direction::Left),
        KeyCode::Right | KeyCode::Char('d') => Some(Direction::Right),
        _ => None,
    }
}

impl ManualPlayScreen {
    pub fn new(seed: Option<GameSeed>) -> Self {
        Self {
            session: new_session(seed),
            is_exiting: false,
        }
    }

    pub fn is_exiting(&self) -> bool {
        self.is_exiting
    }

    pub fn draw(&self, frame: &mut Frame<'_>) {
        let help_text = match self.session.session_state() {
            SessionState::Playing => {
                "Controls: ← ↑ ↓ → / WASD (Move) | p (Pause) | r (Restart) | q (Quit)"
            }
            SessionState::Paused => "Controls: p (Resume) | r (Restart) | q (Quit)",
            SessionState::GameOver => "Controls: r (Restart) | q (Quit)",
        };
        let help_text = Text::from(help_text)
            .style(Style::default().fg(Color::DarkGray))
            .centered();

        let [main_area, help_area] =
            Layout::vertical([Constraint::Length(18), Constraint::Length(1)])
                .areas::<2>(frame.area());
        frame.render_widget(SessionDisplay::new(&self.session), main_area);
        frame.render_widget(help_text, help_area);
    }

    pub fn handle_event(&mut self, event: &Event) {
        let Some(key) = event.as_key_event() else {
            return;
        };
        if key.kind != KeyEventKind::Press {
            return;
        }
        let state = self.session.session_state();
        match key.code {
            KeyCode::Char('p') if !state.is_game_over() => self.session.toggle_pause(),
            KeyCode::Char('r') => self.session = GameSession::new(),
            KeyCode::Char('q') => self.is_exiting = true,
            code if state.is_playing() => {
                if let Some(direction) = key_direction(code) {
                    // illegal moves are ignored
                    _ = self.session.try_move(direction);
                }
            }
            _ => {}
        }
    }
}
