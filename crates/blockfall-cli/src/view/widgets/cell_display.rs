use blockfall_engine::{Cell, PieceKind};
use ratatui::{
    prelude::{Buffer, Rect},
    style::Style,
    widgets::{Paragraph, Widget},
};

use crate::view::widgets::style;

/// What a board cell shows once the falling piece and its ghost are overlaid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shade {
    Empty,
    Ghost,
    Block(PieceKind),
}

impl From<Cell> for Shade {
    fn from(cell: Cell) -> Self {
        match cell {
            Cell::Empty => Self::Empty,
            Cell::Filled(kind) => Self::Block(kind),
        }
    }
}

#[derive(Debug)]
pub struct CellDisplay {
    style: Style,
    symbol: &'static str,
}

impl CellDisplay {
    pub const fn new(style: Style, symbol: &'static str) -> Self {
        Self { style, symbol }
    }

    pub fn width() -> u16 {
        2
    }

    pub fn height() -> u16 {
        1
    }

    pub fn from_shade(shade: Shade, show_dots: bool) -> Self {
        match shade {
            Shade::Empty if show_dots => Self::new(style::EMPTY_DOT, "."),
            Shade::Empty => Self::new(style::EMPTY, ""),
            Shade::Ghost => Self::new(style::GHOST, "[]"),
            Shade::Block(kind) => {
                let style = match kind {
                    PieceKind::I => style::I_BLOCK,
                    PieceKind::O => style::O_BLOCK,
                    PieceKind::T => style::T_BLOCK,
                    PieceKind::S => style::S_BLOCK,
                    PieceKind::Z => style::Z_BLOCK,
                    PieceKind::J => style::J_BLOCK,
                    PieceKind::L => style::L_BLOCK,
                };
                Self::new(style, "")
            }
        }
    }
}

impl Widget for CellDisplay {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &CellDisplay {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // A Paragraph paints the whole area, not only the symbol.
        Paragraph::new(self.symbol)
            .style(self.style)
            .centered()
            .render(area, buf);
    }
}
