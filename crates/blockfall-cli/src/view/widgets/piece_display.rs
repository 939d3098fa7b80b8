use blockfall_engine::{CellOffset, PieceKind};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use crate::view::widgets::{CellDisplay, Shade};

/// Preview of a piece kind in its spawn orientation.
#[derive(Debug)]
pub struct PieceDisplay<'a> {
    piece: Option<PieceKind>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> PieceDisplay<'a> {
    pub fn new() -> Self {
        Self {
            piece: None,
            block: None,
        }
    }

    pub fn piece(self, piece: PieceKind) -> Self {
        Self {
            piece: Some(piece),
            ..self
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        4 * CellDisplay::width() + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        2 * CellDisplay::height() + super::block_vertical_margin(self.block.as_ref())
    }
}

impl Widget for PieceDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &PieceDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let (width, height) = self.piece.map_or((0, 0), |piece| {
            let width = u16::try_from(piece.width()).unwrap_or(0);
            let height = u16::try_from(piece.height()).unwrap_or(0);
            (width, height)
        });
        let piece_area = area.centered(
            Constraint::Length(width * CellDisplay::width()),
            Constraint::Length(height * CellDisplay::height()),
        );

        let col_constraints = (0..width).map(|_| Constraint::Length(CellDisplay::width()));
        let row_constraints = (0..height).map(|_| Constraint::Length(CellDisplay::height()));
        let horizontal = Layout::horizontal(col_constraints).flex(Flex::Center);
        let vertical = Layout::vertical(row_constraints);
        let grid_rows = piece_area
            .layout_vec(&vertical)
            .into_iter()
            .map(|row| row.layout_vec(&horizontal));

        let Some(piece) = self.piece else {
            return;
        };
        let empty = CellDisplay::from_shade(Shade::Empty, false);
        let occupied = CellDisplay::from_shade(Shade::Block(piece), false);
        for (row, grid_row) in (0..).zip(grid_rows) {
            for (col, grid_cell) in (0..).zip(grid_row) {
                let cell = CellOffset::new(row, col);
                if piece.offsets().contains(&cell) {
                    Widget::render(&occupied, grid_cell, buf);
                } else {
                    Widget::render(&empty, grid_cell, buf);
                }
            }
        }
    }
}
