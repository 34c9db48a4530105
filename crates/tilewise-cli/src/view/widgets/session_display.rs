use ratatui::{
    layout::{Constraint, Flex, Layout},
    prelude::{Buffer, Rect},
    style::Style,
    text::{Line, Text},
    widgets::{Block, Clear, Padding, Widget},
};
use tilewise_engine::{GameSession, SessionState};

use crate::view::widgets::{BoardDisplay, SessionStatsDisplay, color, style};

/// Board and statistics side by side, with a banner while paused or after the game ends.
#[derive(Debug)]
pub struct SessionDisplay<'a> {
    session: &'a GameSession,
    turbo: bool,
}

impl<'a> SessionDisplay<'a> {
    pub fn new(session: &'a GameSession) -> Self {
        Self {
            session,
            turbo: false,
        }
    }

    pub fn turbo(self, turbo: bool) -> Self {
        Self { turbo, ..self }
    }
}

impl Widget for SessionDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = match self.session.session_state() {
            SessionState::Playing if self.turbo => color::MAGENTA,
            SessionState::Playing => color::WHITE,
            SessionState::Paused => color::YELLOW,
            SessionState::GameOver => color::RED,
        };

        let board = BoardDisplay::new(self.session.board()).block(
            Block::bordered()
                .border_style(border_style)
                .padding(Padding::symmetric(1, 0))
                .style(Style::new().bg(color::GRID)),
        );
        let stats = SessionStatsDisplay::new(self.session).block(
            Block::bordered()
                .title(Line::from("STATS").centered())
                .padding(Padding::horizontal(1))
                .border_style(border_style)
                .style(style::DEFAULT),
        );

        let [board_column, stats_column] = Layout::horizontal([
            Constraint::Length(board.width()),
            Constraint::Length(stats.width()),
        ])
        .flex(Flex::Center)
        .spacing(1)
        .areas(area);
        let [board_area] = Layout::vertical([Constraint::Length(board.height())]).areas(board_column);
        let [stats_area] = Layout::vertical([Constraint::Length(stats.height())]).areas(stats_column);

        board.render(board_area, buf);
        stats.render(stats_area, buf);

        let banner = match self.session.session_state() {
            SessionState::Playing => None,
            SessionState::Paused => {
                Some(("PAUSED", Style::new().fg(color::BLACK).bg(color::YELLOW)))
            }
            SessionState::GameOver => {
                Some(("GAME OVER", Style::new().fg(color::WHITE).bg(color::RED)))
            }
        };
        if let Some((text, style)) = banner {
            let area = board_area.centered(
                Constraint::Length(board_area.width),
                Constraint::Length(3),
            );
            let block = Block::new().style(style);
            let inner = block.inner(area);
            Clear.render(area, buf);
            block.render(area, buf);
            Text::styled(text, style)
                .centered()
                .render(inner.centered_vertically(Constraint::Length(1)), buf);
        }
    }
}
