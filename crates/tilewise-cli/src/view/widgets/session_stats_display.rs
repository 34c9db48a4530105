use std::iter;

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::Line,
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};
use tilewise_engine::GameSession;

use crate::view::widgets::style;

pub struct SessionStatsDisplay<'a> {
    session: &'a GameSession,
    block: Option<BlockWidget<'a>>,
}

impl<'a> SessionStatsDisplay<'a> {
    pub fn new(session: &'a GameSession) -> Self {
        Self {
            session,
            block: None,
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        18 + super::block_horizontal_margin(self.block.as_ref())
    }

    #[expect(clippy::cast_possible_truncation)]
    pub fn height(&self) -> u16 {
        ROWS.len() as u16 + super::block_vertical_margin(self.block.as_ref())
    }
}

type Value = fn(&GameSession) -> String;

#[derive(Clone, Copy)]
enum Row {
    Empty,
    Label(&'static str),
    Value(Value),
    LabelValue(&'static str, Value),
}

const ROWS: &[Row] = &[
    Row::Label("SCORE:"),
    Row::Value(|session| session.stats().score().to_string()),
    Row::Empty,
    Row::LabelValue("MOVES:", |session| session.stats().moves().to_string()),
    Row::LabelValue("MAX TILE:", |session| {
        session.stats().max_tile().to_string()
    }),
    Row::LabelValue("EMPTY:", |session| {
        session.board().count_empty().to_string()
    }),
    Row::Empty,
    Row::LabelValue("2048:", |session| {
        let reached = if session.won() { "REACHED" } else { "-" };
        reached.to_owned()
    }),
];

impl Widget for SessionStatsDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let style = style::DEFAULT;
        let row_areas =
            Layout::vertical((0..ROWS.len()).map(|_| Constraint::Length(1))).split(area);

        for (row, area) in iter::zip(ROWS.iter().copied(), row_areas.iter().copied()) {
            match row {
                Row::Empty => {}
                Row::Label(label) => {
                    Line::styled(label, style).left_aligned().render(area, buf);
                }
                Row::Value(value) => {
                    Line::styled(value(self.session), style)
                        .right_aligned()
                        .render(area, buf);
                }
                Row::LabelValue(label, value) => {
                    let [label_area, value_area] = area.layout(&Layout::horizontal([
                        Constraint::Fill(1),
                        Constraint::Fill(1),
                    ]));
                    Line::styled(label, style)
                        .left_aligned()
                        .render(label_area, buf);
                    Line::styled(value(self.session), style)
                        .right_aligned()
                        .render(value_area, buf);
                }
            }
        }
    }
}
