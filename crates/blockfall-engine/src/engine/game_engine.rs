use std::mem;

use log::{debug, info};

use crate::{
    TransitionError,
    core::{
        grid::{Cell, Grid},
        piece::{Piece, PieceKind},
    },
};

use super::{
    GameStats, Intent,
    piece_generator::{PieceGenerator, PieceSeed},
};

/// Result of locking the falling piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockOutcome {
    /// Rows removed by this lock (0-4).
    pub lines_cleared: usize,
    /// Points added to the score by this lock.
    pub score_gained: usize,
    /// Whether the next piece entered the board. `false` means game over.
    pub spawned: bool,
}

/// Result of one gravity step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum TickOutcome {
    /// The piece moved down one row.
    Fell,
    /// The piece could not move down and was locked.
    Locked(LockOutcome),
    /// Nothing to do: the game is over or no piece has been spawned yet.
    Idle,
}

/// The falling-block game state and its transition rules.
///
/// The engine owns the grid, the falling piece, the lookahead piece and the
/// counters; every change goes through the methods below. It keeps no clock:
/// gravity happens only when the driver calls [`Self::tick`].
///
/// Rejected transitions return an error and leave the state unchanged. Once
/// the game is over, every transition is rejected with
/// [`TransitionError::GameOver`].
///
/// # Example
///
/// ```
/// use blockfall_engine::{Engine, TickOutcome};
///
/// let mut engine = Engine::new();
/// engine.spawn().unwrap();
///
/// engine.try_move(0, -1).ok();
/// engine.try_rotate().ok();
/// engine.hard_drop();
///
/// // The piece has landed, so the next gravity step locks it.
/// assert!(engine.tick().is_locked());
/// ```
#[derive(Debug, Clone)]
pub struct Engine {
    grid: Grid,
    falling_piece: Option<Piece>,
    next_piece: PieceKind,
    generator: PieceGenerator,
    stats: GameStats,
    game_over: bool,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// Creates an engine with an empty grid and a randomly seeded generator.
    ///
    /// No piece is falling until [`Self::spawn`] is called.
    #[must_use]
    pub fn new() -> Self {
        Self::with_generator(PieceGenerator::new())
    }

    #[must_use]
    pub fn with_seed(seed: PieceSeed) -> Self {
        Self::with_generator(PieceGenerator::with_seed(seed))
    }

    #[must_use]
    pub fn with_generator(generator: PieceGenerator) -> Self {
        Self::with_grid(Grid::EMPTY, generator)
    }

    /// Creates an engine that starts from a prepared grid.
    #[must_use]
    pub fn with_grid(grid: Grid, mut generator: PieceGenerator) -> Self {
        let next_piece = generator.next_kind();
        Self {
            grid,
            falling_piece: None,
            next_piece,
            generator,
            stats: GameStats::new(),
            game_over: false,
        }
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[must_use]
    pub fn falling_piece(&self) -> Option<&Piece> {
        self.falling_piece.as_ref()
    }

    /// Kind of the piece that enters after the current one locks.
    #[must_use]
    pub fn next_piece(&self) -> PieceKind {
        self.next_piece
    }

    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    #[must_use]
    pub fn score(&self) -> usize {
        self.stats.score()
    }

    #[must_use]
    pub fn level(&self) -> usize {
        self.stats.level()
    }

    #[must_use]
    pub fn total_cleared_lines(&self) -> usize {
        self.stats.total_cleared_lines()
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// Seed of the piece generator, if it is a random one.
    #[must_use]
    pub fn seed(&self) -> Option<PieceSeed> {
        self.generator.seed()
    }

    /// Where the falling piece would land if hard-dropped now.
    #[must_use]
    pub fn simulate_drop_position(&self) -> Option<Piece> {
        self.falling_piece
            .map(|piece| piece.drop_position(&self.grid))
    }

    fn ensure_running(&self) -> Result<(), TransitionError> {
        if self.game_over {
            return Err(TransitionError::GameOver);
        }
        Ok(())
    }

    fn current_piece(&self) -> Result<Piece, TransitionError> {
        self.ensure_running()?;
        self.falling_piece.ok_or(TransitionError::NoPiece)
    }

    fn set_falling_piece(&mut self, piece: Piece) -> Result<(), TransitionError> {
        if !piece.fits(&self.grid) {
            return Err(TransitionError::Collision);
        }
        self.falling_piece = Some(piece);
        Ok(())
    }

    /// Brings the lookahead piece onto the board and draws a new lookahead.
    ///
    /// The piece enters at the top row in its default orientation. If that
    /// position is blocked the game is over: the flag is set here and
    /// [`TransitionError::Collision`] is returned.
    pub fn spawn(&mut self) -> Result<(), TransitionError> {
        self.ensure_running()?;

        let kind = mem::replace(&mut self.next_piece, self.generator.next_kind());
        let piece = Piece::new(kind);
        if !piece.fits(&self.grid) {
            self.falling_piece = None;
            self.game_over = true;
            info!(
                "game over: {} blocked at spawn (score {}, lines {})",
                kind.as_char(),
                self.stats.score(),
                self.stats.total_cleared_lines()
            );
            return Err(TransitionError::Collision);
        }

        debug!(
            "spawned {} at {:?}, next {}",
            kind.as_char(),
            piece.anchor(),
            self.next_piece.as_char()
        );
        self.falling_piece = Some(piece);
        Ok(())
    }

    /// Moves the falling piece by `(d_row, d_col)` if the target is free.
    ///
    /// A failed `try_move(1, 0)` means the piece has landed.
    pub fn try_move(&mut self, d_row: i32, d_col: i32) -> Result<(), TransitionError> {
        let piece = self.current_piece()?;
        self.set_falling_piece(piece.moved(d_row, d_col))
    }

    /// Turns the falling piece 90° clockwise if the result is free.
    ///
    /// There are no wall kicks: a blocked rotation is simply rejected.
    pub fn try_rotate(&mut self) -> Result<(), TransitionError> {
        let piece = self.current_piece()?;
        self.set_falling_piece(piece.rotated())
    }

    /// Moves the falling piece straight down as far as it goes and returns the
    /// number of rows it fell.
    ///
    /// The piece is not locked; the next [`Self::tick`] does that.
    pub fn hard_drop(&mut self) -> usize {
        let mut rows = 0;
        while self.try_move(1, 0).is_ok() {
            rows += 1;
        }
        rows
    }

    /// Merges the falling piece into the grid, clears full rows, updates the
    /// score and spawns the next piece.
    pub fn lock_and_advance(&mut self) -> Result<LockOutcome, TransitionError> {
        let piece = self.current_piece()?;

        self.grid
            .lock(piece.offsets(), piece.anchor(), Cell::Filled(piece.kind()));
        self.falling_piece = None;

        let lines_cleared = self.grid.clear_full_rows();
        let level_before = self.stats.level();
        let score_gained = self.stats.record_lock(lines_cleared);
        debug!(
            "locked {} at {:?}: {lines_cleared} lines, +{score_gained}",
            piece.kind().as_char(),
            piece.anchor()
        );
        if self.stats.level() > level_before {
            info!("level up: {}", self.stats.level());
        }

        let spawned = self.spawn().is_ok();
        Ok(LockOutcome {
            lines_cleared,
            score_gained,
            spawned,
        })
    }

    /// One gravity step: move the piece down, or lock it if it has landed.
    pub fn tick(&mut self) -> TickOutcome {
        match self.try_move(1, 0) {
            Ok(()) => TickOutcome::Fell,
            Err(TransitionError::Collision) => match self.lock_and_advance() {
                Ok(outcome) => TickOutcome::Locked(outcome),
                Err(_) => TickOutcome::Idle,
            },
            Err(TransitionError::NoPiece | TransitionError::GameOver) => TickOutcome::Idle,
        }
    }

    /// Applies a piece intent.
    ///
    /// [`Intent::TogglePause`] belongs to the driver and is accepted without
    /// effect.
    pub fn apply(&mut self, intent: Intent) -> Result<(), TransitionError> {
        match intent {
            Intent::MoveLeft => self.try_move(0, -1),
            Intent::MoveRight => self.try_move(0, 1),
            Intent::RotateClockwise => self.try_rotate(),
            Intent::SoftDrop => self.try_move(1, 0),
            Intent::HardDrop => {
                self.current_piece()?;
                self.hard_drop();
                Ok(())
            }
            Intent::TogglePause => Ok(()),
        }
    }
}
