use std::iter;

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};
use tilewise_engine::{BOARD_SIZE, Board};

use crate::view::widgets::TileDisplay;

const GAP: u16 = 1;

#[derive(Debug)]
pub struct BoardDisplay<'a> {
    board: &'a Board,
    block: Option<BlockWidget<'a>>,
}

impl<'a> BoardDisplay<'a> {
    pub fn new(board: &'a Board) -> Self {
        Self { board, block: None }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    #[expect(clippy::cast_possible_truncation)]
    pub fn width(&self) -> u16 {
        let n = BOARD_SIZE as u16;
        n * TileDisplay::WIDTH + (n - 1) * GAP + super::block_horizontal_margin(self.block.as_ref())
    }

    #[expect(clippy::cast_possible_truncation)]
    pub fn height(&self) -> u16 {
        let n = BOARD_SIZE as u16;
        n * TileDisplay::HEIGHT + (n - 1) * GAP + super::block_vertical_margin(self.block.as_ref())
    }
}

impl Widget for BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let horizontal = Layout::horizontal([Constraint::Length(TileDisplay::WIDTH); BOARD_SIZE])
            .spacing(GAP)
            .flex(Flex::Center);
        let vertical =
            Layout::vertical([Constraint::Length(TileDisplay::HEIGHT); BOARD_SIZE]).spacing(GAP);

        let grid = area
            .layout::<BOARD_SIZE>(&vertical)
            .into_iter()
            .map(|row| row.layout::<BOARD_SIZE>(&horizontal));

        for (grid_row, row) in iter::zip(grid, self.board.rows()) {
            for (cell_area, value) in iter::zip(grid_row, row) {
                TileDisplay::from_value(*value).render(cell_area, buf);
            }
        }
    }
}
