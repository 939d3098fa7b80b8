use super::piece::{CellOffset, PieceKind, Position};

/// Number of rows in the playfield.
pub const ROWS: usize = 20;
/// Number of columns in the playfield.
pub const COLS: usize = 10;

/// A single cell of the settled board.
///
/// Filled cells remember the kind of the piece that was locked there, which
/// is all a renderer needs to pick a color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    /// No settled block.
    #[default]
    Empty,
    /// Block left behind by a locked piece.
    Filled(PieceKind),
}

impl Cell {
    #[must_use]
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    #[must_use]
    pub fn is_filled(self) -> bool {
        !self.is_empty()
    }

    #[must_use]
    pub fn kind(self) -> Option<PieceKind> {
        match self {
            Cell::Empty => None,
            Cell::Filled(kind) => Some(kind),
        }
    }
}

/// Settled blocks of the playfield.
///
/// The grid is a fixed `ROWS × COLS` matrix addressed as `(row, col)` with
/// row 0 at the top. A cell is filled only if a locked piece wrote it and its
/// row has not been cleared since.
///
/// # Example
///
/// ```
/// use blockfall_engine::{Cell, CellOffset, Grid, PieceKind, Position};
///
/// let mut grid = Grid::EMPTY;
/// let offsets = [CellOffset::new(0, 0), CellOffset::new(0, 1)];
/// let anchor = Position::new(19, 0);
///
/// assert!(grid.is_valid(&offsets, anchor));
/// grid.lock(&offsets, anchor, Cell::Filled(PieceKind::O));
/// assert!(!grid.is_valid(&offsets, anchor));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: [[Cell; COLS]; ROWS],
}

impl Default for Grid {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Grid {
    pub const ROWS: usize = ROWS;
    pub const COLS: usize = COLS;

    pub const EMPTY: Self = Self {
        rows: [[Cell::Empty; COLS]; ROWS],
    };

    /// Converts signed board coordinates into array indices, or `None` when
    /// they fall outside the playfield.
    fn index(row: i32, col: i32) -> Option<(usize, usize)> {
        let row = usize::try_from(row).ok().filter(|row| *row < ROWS)?;
        let col = usize::try_from(col).ok().filter(|col| *col < COLS)?;
        Some((row, col))
    }

    /// Returns the cell at `(row, col)`, or `None` outside the playfield.
    #[must_use]
    pub fn cell(&self, row: usize, col: usize) -> Option<Cell> {
        self.rows.get(row)?.get(col).copied()
    }

    /// Overwrites a single cell.
    ///
    /// Used to prepare positions before handing the grid to an engine.
    ///
    /// # Panics
    ///
    /// Panics if `(row, col)` is outside the playfield.
    pub fn set(&mut self, row: usize, col: usize, cell: Cell) {
        self.rows[row][col] = cell;
    }

    /// Iterates over the rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell; COLS]> {
        self.rows.iter()
    }

    #[must_use]
    pub fn is_row_full(&self, row: usize) -> bool {
        self.rows
            .get(row)
            .is_some_and(|cells| cells.iter().all(|cell| cell.is_filled()))
    }

    /// Total number of filled cells.
    #[must_use]
    pub fn filled_count(&self) -> usize {
        self.rows
            .iter()
            .flatten()
            .filter(|cell| cell.is_filled())
            .count()
    }

    /// Returns `true` if every offset, placed relative to `anchor`, lands
    /// inside the playfield on an empty cell.
    #[must_use]
    pub fn is_valid(&self, offsets: &[CellOffset], anchor: Position) -> bool {
        offsets.iter().all(|offset| {
            let (row, col) = anchor.cell(*offset);
            Self::index(row, col).is_some_and(|(row, col)| self.rows[row][col].is_empty())
        })
    }

    /// Writes `cell` at every offset placed relative to `anchor`.
    ///
    /// No collision check is done here: the position is expected to be one
    /// that already passed [`Self::is_valid`]. Offsets outside the playfield
    /// are skipped.
    pub fn lock(&mut self, offsets: &[CellOffset], anchor: Position, cell: Cell) {
        for offset in offsets {
            let (row, col) = anchor.cell(*offset);
            if let Some((row, col)) = Self::index(row, col) {
                self.rows[row][col] = cell;
            }
        }
    }

    /// Removes every full row and returns how many were removed.
    ///
    /// All full rows go at once. Remaining rows keep their relative order and
    /// settle downwards; one empty row enters at the top per removed row.
    pub fn clear_full_rows(&mut self) -> usize {
        let mut count = 0;
        for row in (0..ROWS).rev() {
            if self.is_row_full(row) {
                count += 1;
                continue;
            }
            if count > 0 {
                self.rows[row + count] = self.rows[row];
            }
        }
        self.rows[..count].fill([Cell::Empty; COLS]);
        count
    }
}
