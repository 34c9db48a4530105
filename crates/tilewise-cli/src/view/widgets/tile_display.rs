use ratatui::{
    layout::{Constraint, Rect},
    prelude::Buffer,
    style::Style,
    text::Line,
    widgets::{Block, Widget},
};

use crate::view::widgets::style;

/// One board cell, drawn as a filled box with the value centered.
#[derive(Debug)]
pub struct TileDisplay {
    style: Style,
    label: String,
}

impl TileDisplay {
    pub const WIDTH: u16 = 7;
    pub const HEIGHT: u16 = 3;

    pub fn from_value(value: u32) -> Self {
        if value == 0 {
            Self {
                style: style::EMPTY_TILE,
                label: String::new(),
            }
        } else {
            Self {
                style: style::tile(value),
                label: value.to_string(),
            }
        }
    }
}

impl Widget for TileDisplay {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Block::new().style(self.style).render(area, buf);
        let label_area = area.centered_vertically(Constraint::Length(1));
        Line::styled(self.label, self.style)
            .centered()
            .render(label_area, buf);
    }
}
