use std::iter;

use blockfall_engine::{COLS, Grid, Piece, ROWS};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block as BlockWidget, BlockExt, Widget},
};

use crate::view::widgets::{CellDisplay, Shade};

#[derive(Debug)]
pub struct BoardDisplay<'a> {
    grid: &'a Grid,
    ghost: Option<Piece>,
    falling_piece: Option<Piece>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> BoardDisplay<'a> {
    pub fn new(grid: &'a Grid) -> Self {
        Self {
            grid,
            ghost: None,
            falling_piece: None,
            block: None,
        }
    }

    pub fn ghost(self, piece: Option<Piece>) -> Self {
        Self {
            ghost: piece,
            ..self
        }
    }

    pub fn falling_piece(self, piece: Option<&Piece>) -> Self {
        Self {
            falling_piece: piece.copied(),
            ..self
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    #[expect(clippy::cast_possible_truncation)]
    pub fn width(&self) -> u16 {
        COLS as u16 * CellDisplay::width() + super::block_horizontal_margin(self.block.as_ref())
    }

    #[expect(clippy::cast_possible_truncation)]
    pub fn height(&self) -> u16 {
        ROWS as u16 * CellDisplay::height() + super::block_vertical_margin(self.block.as_ref())
    }

    /// The grid with the ghost and the falling piece drawn over it.
    pub fn shades(&self) -> [[Shade; COLS]; ROWS] {
        let mut shades = [[Shade::Empty; COLS]; ROWS];
        for (shade_row, row) in iter::zip(&mut shades, self.grid.rows()) {
            for (shade, cell) in iter::zip(shade_row, row) {
                *shade = Shade::from(*cell);
            }
        }

        let overlays = [
            self.ghost.map(|piece| (piece, Shade::Ghost)),
            self.falling_piece
                .map(|piece| (piece, Shade::Block(piece.kind()))),
        ];
        for (piece, overlay) in overlays.into_iter().flatten() {
            for (row, col) in piece.cells() {
                if let (Ok(row), Ok(col)) = (usize::try_from(row), usize::try_from(col))
                    && let Some(shade) = shades.get_mut(row).and_then(|r| r.get_mut(col))
                {
                    *shade = overlay;
                }
            }
        }
        shades
    }
}

impl Widget for BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let col_constraints = (0..COLS).map(|_| Constraint::Length(CellDisplay::width()));
        let row_constraints = (0..ROWS).map(|_| Constraint::Length(CellDisplay::height()));
        let horizontal = Layout::horizontal(col_constraints).flex(Flex::Center);
        let vertical = Layout::vertical(row_constraints);

        let grid_cells = area
            .layout::<ROWS>(&vertical)
            .into_iter()
            .map(|row| row.layout::<COLS>(&horizontal));

        for (grid_row, row) in iter::zip(grid_cells, self.shades()) {
            for (grid_cell, shade) in iter::zip(grid_row, row) {
                CellDisplay::from_shade(shade, true).render(grid_cell, buf);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use blockfall_engine::{Cell, PieceKind, Position};

    use super::*;

    #[test]
    fn test_shades_overlay_piece_on_ghost() {
        let mut grid = Grid::EMPTY;
        grid.set(19, 0, Cell::Filled(PieceKind::Z));
        let piece = Piece::new(PieceKind::O);
        let ghost = piece.drop_position(&grid);

        let shades = BoardDisplay::new(&grid)
            .ghost(Some(ghost))
            .falling_piece(Some(&piece))
            .shades();
        assert_eq!(shades[19][0], Shade::Block(PieceKind::Z));
        assert_eq!(shades[0][4], Shade::Block(PieceKind::O));
        assert_eq!(shades[1][5], Shade::Block(PieceKind::O));
        assert_eq!(shades[18][4], Shade::Ghost);
        assert_eq!(shades[19][5], Shade::Ghost);
        assert_eq!(shades[10][4], Shade::Empty);
    }

    #[test]
    fn test_falling_piece_hides_ghost() {
        let grid = Grid::EMPTY;
        let piece = Piece::with_anchor(PieceKind::I, Position::new(19, 3));

        let shades = BoardDisplay::new(&grid)
            .ghost(Some(piece.drop_position(&grid)))
            .falling_piece(Some(&piece))
            .shades();
        assert!((3..7).all(|col| shades[19][col] == Shade::Block(PieceKind::I)));
    }

    #[test]
    fn test_render_size() {
        let grid = Grid::EMPTY;
        let board = BoardDisplay::new(&grid).block(BlockWidget::bordered());
        assert_eq!(board.width(), 22);
        assert_eq!(board.height(), 22);

        let mut buf = Buffer::empty(Rect::new(0, 0, board.width(), board.height()));
        board.render(buf.area, &mut buf);
        assert!((1..3).any(|x| buf[(x, 1)].symbol() == "."));
    }
}
