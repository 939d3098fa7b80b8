use rand::{Rng, distr::StandardUniform, prelude::Distribution};
use serde::{Deserialize, Serialize};

use super::grid::{COLS, Grid};

/// Position of one block relative to a piece's anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CellOffset {
    pub row: i32,
    pub col: i32,
}

impl CellOffset {
    #[must_use]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }
}

/// Absolute board position.
///
/// Coordinates are signed so that candidate positions left of or above the
/// playfield can be expressed and then rejected by [`Grid::is_valid`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    #[must_use]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    #[must_use]
    pub const fn shifted(self, d_row: i32, d_col: i32) -> Self {
        Self::new(self.row + d_row, self.col + d_col)
    }

    /// Board coordinates of `offset` placed at this anchor.
    #[must_use]
    pub const fn cell(self, offset: CellOffset) -> (i32, i32) {
        (self.row + offset.row, self.col + offset.col)
    }
}

/// Offsets of the four blocks that make up a piece.
pub type PieceOffsets = [CellOffset; 4];

/// The seven piece shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[repr(u8)]
pub enum PieceKind {
    /// I-piece.
    I = 0,
    /// O-piece.
    O = 1,
    /// T-piece.
    T = 2,
    /// S-piece.
    S = 3,
    /// Z-piece.
    Z = 4,
    /// J-piece.
    J = 5,
    /// L-piece.
    L = 6,
}

impl Distribution<PieceKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceKind {
        PieceKind::ALL[rng.random_range(0..PieceKind::LEN)]
    }
}

const fn shape(cells: [(i32, i32); 4]) -> PieceOffsets {
    let mut offsets = [CellOffset::new(0, 0); 4];
    let mut i = 0;
    while i < 4 {
        offsets[i] = CellOffset::new(cells[i].0, cells[i].1);
        i += 1;
    }
    offsets
}

static PIECE_OFFSETS: [PieceOffsets; PieceKind::LEN] = [
    // I-piece
    shape([(0, 0), (0, 1), (0, 2), (0, 3)]),
    // O-piece
    shape([(0, 0), (0, 1), (1, 0), (1, 1)]),
    // T-piece
    shape([(0, 1), (1, 0), (1, 1), (1, 2)]),
    // S-piece
    shape([(0, 1), (0, 2), (1, 0), (1, 1)]),
    // Z-piece
    shape([(0, 0), (0, 1), (1, 1), (1, 2)]),
    // J-piece
    shape([(0, 0), (1, 0), (1, 1), (1, 2)]),
    // L-piece
    shape([(0, 2), (1, 0), (1, 1), (1, 2)]),
];

impl PieceKind {
    /// Number of piece types (7).
    pub const LEN: usize = 7;

    pub const ALL: [PieceKind; Self::LEN] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Offsets of the piece in its spawn orientation.
    #[must_use]
    pub fn offsets(self) -> &'static PieceOffsets {
        &PIECE_OFFSETS[self as usize]
    }

    /// Width of the spawn orientation in cells.
    #[must_use]
    pub fn width(self) -> i32 {
        let (min, max) = extent(self.offsets().iter().map(|offset| offset.col));
        max - min + 1
    }

    /// Height of the spawn orientation in cells.
    #[must_use]
    pub fn height(self) -> i32 {
        let (min, max) = extent(self.offsets().iter().map(|offset| offset.row));
        max - min + 1
    }

    /// Anchor at which a new piece of this kind enters the board: the top
    /// row, centered horizontally for the piece's width.
    #[must_use]
    #[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub fn spawn_position(self) -> Position {
        Position::new(0, (COLS as i32 - self.width()) / 2)
    }

    /// Returns the single character representation of this piece kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::I.as_char(), 'I');
    /// assert_eq!(PieceKind::T.as_char(), 'T');
    /// ```
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            PieceKind::I => 'I',
            PieceKind::O => 'O',
            PieceKind::T => 'T',
            PieceKind::S => 'S',
            PieceKind::Z => 'Z',
            PieceKind::J => 'J',
            PieceKind::L => 'L',
        }
    }

    /// Parses a piece kind from a single character.
    ///
    /// ```
    /// use blockfall_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_char('L'), Some(PieceKind::L));
    /// assert_eq!(PieceKind::from_char('X'), None);
    /// ```
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'I' => Some(PieceKind::I),
            'O' => Some(PieceKind::O),
            'T' => Some(PieceKind::T),
            'S' => Some(PieceKind::S),
            'Z' => Some(PieceKind::Z),
            'J' => Some(PieceKind::J),
            'L' => Some(PieceKind::L),
            _ => None,
        }
    }
}

/// Returns `(min, max)` of the values, `(0, 0)` for an empty iterator.
fn extent(values: impl Iterator<Item = i32>) -> (i32, i32) {
    values
        .fold(None, |acc: Option<(i32, i32)>, v| match acc {
            None => Some((v, v)),
            Some((min, max)) => Some((min.min(v), max.max(v))),
        })
        .unwrap_or((0, 0))
}

/// The falling piece.
///
/// Orientation is carried directly by the offsets: rotating transforms the
/// current offsets instead of indexing a per-shape orientation table.
/// Pieces are values; movement and rotation return new pieces and the
/// caller decides whether to adopt them.
///
/// # Example
///
/// ```
/// use blockfall_engine::{Grid, Piece, PieceKind};
///
/// let grid = Grid::EMPTY;
/// let piece = Piece::new(PieceKind::T);
/// let rotated = piece.moved(1, 0).rotated();
/// assert!(rotated.fits(&grid));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    kind: PieceKind,
    offsets: PieceOffsets,
    anchor: Position,
}

impl Piece {
    /// Creates a piece in its default orientation at the spawn position.
    #[must_use]
    pub fn new(kind: PieceKind) -> Self {
        Self::with_anchor(kind, kind.spawn_position())
    }

    /// Creates a piece in its default orientation at `anchor`.
    #[must_use]
    pub fn with_anchor(kind: PieceKind, anchor: Position) -> Self {
        Self {
            kind,
            offsets: *kind.offsets(),
            anchor,
        }
    }

    #[must_use]
    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    #[must_use]
    pub fn offsets(&self) -> &PieceOffsets {
        &self.offsets
    }

    #[must_use]
    pub fn anchor(&self) -> Position {
        self.anchor
    }

    /// Absolute `(row, col)` of every block.
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.offsets
            .iter()
            .map(move |offset| self.anchor.cell(*offset))
    }

    /// Returns `true` if the piece sits inside the board over empty cells.
    #[must_use]
    pub fn fits(&self, grid: &Grid) -> bool {
        grid.is_valid(&self.offsets, self.anchor)
    }

    #[must_use]
    pub fn moved(&self, d_row: i32, d_col: i32) -> Self {
        Self {
            anchor: self.anchor.shifted(d_row, d_col),
            ..*self
        }
    }

    /// Returns the piece turned 90° clockwise around its bounding box.
    ///
    /// The offsets are moved to the origin of their bounding box, mapped with
    /// `(r, c) -> (c, height - 1 - r)` and moved back, so the top-left corner
    /// of the bounding box stays put. The anchor does not change.
    #[must_use]
    pub fn rotated(&self) -> Self {
        let (min_row, max_row) = extent(self.offsets.iter().map(|offset| offset.row));
        let (min_col, _) = extent(self.offsets.iter().map(|offset| offset.col));
        let height = max_row - min_row + 1;

        let offsets = self.offsets.map(|CellOffset { row, col }| {
            let (r, c) = (row - min_row, col - min_col);
            CellOffset::new(c + min_row, height - 1 - r + min_col)
        });
        Self { offsets, ..*self }
    }

    /// Returns where the piece would come to rest if dropped straight down.
    #[must_use]
    pub fn drop_position(&self, grid: &Grid) -> Self {
        let mut dropped = *self;
        while dropped.moved(1, 0).fits(grid) {
            dropped = dropped.moved(1, 0);
        }
        dropped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::grid::Cell;

    fn sorted(offsets: &PieceOffsets) -> Vec<CellOffset> {
        let mut offsets = offsets.to_vec();
        offsets.sort();
        offsets
    }

    #[test]
    fn test_catalog_has_four_distinct_cells_each() {
        for kind in PieceKind::ALL {
            let mut cells = sorted(kind.offsets());
            cells.dedup();
            assert_eq!(cells.len(), 4, "{kind:?} should have 4 distinct cells");
            assert!(cells.iter().all(|c| c.row >= 0 && c.col >= 0));
        }
    }

    #[test]
    fn test_piece_kind_sizes() {
        assert_eq!((PieceKind::I.width(), PieceKind::I.height()), (4, 1));
        assert_eq!((PieceKind::O.width(), PieceKind::O.height()), (2, 2));
        for kind in [
            PieceKind::T,
            PieceKind::S,
            PieceKind::Z,
            PieceKind::J,
            PieceKind::L,
        ] {
            assert_eq!((kind.width(), kind.height()), (3, 2), "{kind:?}");
        }
    }

    #[test]
    fn test_spawn_positions_are_centered() {
        assert_eq!(PieceKind::I.spawn_position(), Position::new(0, 3));
        assert_eq!(PieceKind::O.spawn_position(), Position::new(0, 4));
        assert_eq!(PieceKind::T.spawn_position(), Position::new(0, 3));
        assert!(PieceKind::ALL.iter().all(|kind| Piece::new(*kind).fits(&Grid::EMPTY)));
    }

    #[test]
    fn test_piece_kind_char_conversion() {
        for kind in PieceKind::ALL {
            assert_eq!(PieceKind::from_char(kind.as_char()), Some(kind));
        }
        assert_eq!(PieceKind::from_char('x'), None);
        assert_eq!(PieceKind::from_char('i'), None);
    }

    #[test]
    fn test_piece_kind_serialization() {
        let json = serde_json::to_string(&PieceKind::S).unwrap();
        assert_eq!(json, "\"S\"");
        let kind: PieceKind = serde_json::from_str("\"L\"").unwrap();
        assert_eq!(kind, PieceKind::L);
        assert!(serde_json::from_str::<PieceKind>("\"X\"").is_err());
    }

    #[test]
    fn test_rotate_i_piece() {
        let piece = Piece::new(PieceKind::I).rotated();
        assert_eq!(
            sorted(piece.offsets()),
            vec![
                CellOffset::new(0, 0),
                CellOffset::new(1, 0),
                CellOffset::new(2, 0),
                CellOffset::new(3, 0),
            ]
        );
    }

    #[test]
    fn test_rotate_t_piece_clockwise() {
        // Pointing up becomes pointing right.
        let piece = Piece::new(PieceKind::T).rotated();
        assert_eq!(
            sorted(piece.offsets()),
            vec![
                CellOffset::new(0, 0),
                CellOffset::new(1, 0),
                CellOffset::new(1, 1),
                CellOffset::new(2, 0),
            ]
        );
    }

    #[test]
    fn test_rotation_is_periodic() {
        for kind in PieceKind::ALL {
            let piece = Piece::new(kind);
            let mut rotated = piece;
            for _ in 0..4 {
                rotated = rotated.rotated();
            }
            assert_eq!(sorted(rotated.offsets()), sorted(piece.offsets()), "{kind:?}");
            assert_eq!(rotated.anchor(), piece.anchor());
        }
    }

    #[test]
    fn test_o_piece_is_rotation_invariant() {
        let piece = Piece::new(PieceKind::O);
        assert_eq!(sorted(piece.rotated().offsets()), sorted(piece.offsets()));
    }

    #[test]
    fn test_other_pieces_change_on_rotation() {
        for kind in PieceKind::ALL.into_iter().filter(|k| *k != PieceKind::O) {
            let piece = Piece::new(kind);
            assert_ne!(
                sorted(piece.rotated().offsets()),
                sorted(piece.offsets()),
                "{kind:?}"
            );
        }
    }

    #[test]
    fn test_cells_are_absolute() {
        let piece = Piece::with_anchor(PieceKind::O, Position::new(5, 2));
        let mut cells = piece.cells().collect::<Vec<_>>();
        cells.sort_unstable();
        assert_eq!(cells, vec![(5, 2), (5, 3), (6, 2), (6, 3)]);
    }

    #[test]
    fn test_moved_out_of_bounds_does_not_fit() {
        let grid = Grid::EMPTY;
        let piece = Piece::with_anchor(PieceKind::I, Position::new(0, 0));
        assert!(piece.fits(&grid));
        assert!(!piece.moved(0, -1).fits(&grid));
        assert!(!piece.moved(-1, 0).fits(&grid));
        assert!(!piece.moved(0, 7).fits(&grid));
    }

    #[test]
    fn test_drop_position() {
        let mut grid = Grid::EMPTY;
        let piece = Piece::new(PieceKind::I);
        assert_eq!(piece.drop_position(&grid).anchor(), Position::new(19, 3));

        grid.set(10, 5, Cell::Filled(PieceKind::T));
        assert_eq!(piece.drop_position(&grid).anchor(), Position::new(9, 3));
    }
}
