use ratatui::{layout::Rect, widgets::Block as BlockWidget};

pub use self::{
    board_display::*, session_display::*, session_stats_display::*, tile_display::*,
};

mod board_display;
mod session_display;
mod session_stats_display;
mod tile_display;

mod color {
    use ratatui::style::Color;

    pub const YELLOW: Color = Color::Rgb(255, 255, 0);
    pub const RED: Color = Color::Rgb(255, 0, 0);
    pub const MAGENTA: Color = Color::Rgb(255, 0, 255);
    pub const BLACK: Color = Color::Rgb(0, 0, 0);
    pub const WHITE: Color = Color::Rgb(255, 255, 255);

    pub const GRID: Color = Color::Rgb(187, 173, 160);
    pub const EMPTY_TILE: Color = Color::Rgb(205, 193, 180);
    pub const DARK_TEXT: Color = Color::Rgb(119, 110, 101);
    pub const LIGHT_TEXT: Color = Color::Rgb(249, 246, 242);
}

pub mod style {
    use ratatui::style::{Color, Modifier, Style};

    use crate::view::widgets::color;

    const fn fg_bg(fg: Color, bg: Color) -> Style {
        Style::new().fg(fg).bg(bg)
    }

    pub const DEFAULT: Style = fg_bg(color::WHITE, color::BLACK);
    pub const EMPTY_TILE: Style = fg_bg(color::EMPTY_TILE, color::EMPTY_TILE);

    /// Style of a non-empty tile by its value.
    pub const fn tile(value: u32) -> Style {
        let (fg, bg) = match value {
            2 => (color::DARK_TEXT, Color::Rgb(238, 228, 218)),
            4 => (color::DARK_TEXT, Color::Rgb(237, 224, 200)),
            8 => (color::LIGHT_TEXT, Color::Rgb(242, 177, 121)),
            16 => (color::LIGHT_TEXT, Color::Rgb(245, 149, 99)),
            32 => (color::LIGHT_TEXT, Color::Rgb(246, 124, 95)),
            64 => (color::LIGHT_TEXT, Color::Rgb(246, 94, 59)),
            128 => (color::LIGHT_TEXT, Color::Rgb(237, 207, 114)),
            256 => (color::LIGHT_TEXT, Color::Rgb(237, 204, 97)),
            512 => (color::LIGHT_TEXT, Color::Rgb(237, 200, 80)),
            1024 => (color::LIGHT_TEXT, Color::Rgb(237, 197, 63)),
            2048 => (color::LIGHT_TEXT, Color::Rgb(237, 194, 46)),
            _ => (color::LIGHT_TEXT, Color::Rgb(60, 58, 50)),
        };
        fg_bg(fg, bg).add_modifier(Modifier::BOLD)
    }
}

fn block_vertical_margin(block: Option<&BlockWidget>) -> u16 {
    let dummy_rect = Rect::new(0, 0, 100, 100);
    let inner_rect = block.map_or(dummy_rect, |block| block.inner(dummy_rect));
    dummy_rect.height - inner_rect.height
}

fn block_horizontal_margin(block: Option<&BlockWidget>) -> u16 {
    let dummy_rect = Rect::new(0, 0, 100, 100);
    let inner_rect = block.map_or(dummy_rect, |block| block.inner(dummy_rect));
    dummy_rect.width - inner_rect.width
}
