use std::time::Duration;

use log::info;
use serde::{Deserialize, Serialize};

use super::{
    Intent,
    game_engine::{Engine, TickOutcome},
    piece_generator::PieceSeed,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum SessionState {
    Playing,
    Paused,
    GameOver,
}

/// Gravity cadence as a function of level.
///
/// The interval between gravity steps is
/// `max(min_interval, base_interval - (level - 1) × interval_step)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FallSpeed {
    pub base_interval_ms: u64,
    pub interval_step_ms: u64,
    pub min_interval_ms: u64,
}

impl Default for FallSpeed {
    fn default() -> Self {
        Self {
            base_interval_ms: 500,
            interval_step_ms: 50,
            min_interval_ms: 50,
        }
    }
}

impl FallSpeed {
    /// Time between two gravity steps at `level` (1-based).
    #[must_use]
    pub fn interval(&self, level: usize) -> Duration {
        let steps = u64::try_from(level.saturating_sub(1)).unwrap_or(u64::MAX);
        let millis = self
            .base_interval_ms
            .saturating_sub(steps.saturating_mul(self.interval_step_ms))
            .max(self.min_interval_ms);
        Duration::from_millis(millis)
    }
}

/// Number of frames to wait for `interval`, at least one.
fn drop_frames(interval: Duration, fps: u64) -> u64 {
    let frames = interval.as_millis() * u128::from(fps) / 1000;
    u64::try_from(frames).unwrap_or(u64::MAX).max(1)
}

/// A game as the front end drives it.
///
/// The session wraps an [`Engine`] with the pause flag and a frame-counted
/// gravity schedule. The front end calls [`Self::increment_frame`] once per
/// frame at `fps` frames per second and forwards player input through
/// [`Self::handle_intent`]. While paused neither gravity nor piece input
/// reaches the engine.
#[derive(Debug, Clone)]
pub struct GameSession {
    engine: Engine,
    session_state: SessionState,
    speed: FallSpeed,
    fps: u64,
    total_frames: u64,
    drop_frames: u64,
}

impl GameSession {
    /// Starts a session with a randomly seeded engine.
    #[must_use]
    pub fn new(fps: u64, speed: FallSpeed) -> Self {
        Self::with_engine(Engine::new(), fps, speed)
    }

    #[must_use]
    pub fn with_seed(fps: u64, speed: FallSpeed, seed: PieceSeed) -> Self {
        Self::with_engine(Engine::with_seed(seed), fps, speed)
    }

    /// Starts a session on `engine`, spawning its first piece.
    ///
    /// # Panics
    ///
    /// Panics if `fps` is zero.
    #[must_use]
    pub fn with_engine(mut engine: Engine, fps: u64, speed: FallSpeed) -> Self {
        assert!(fps > 0, "fps must be positive");
        let session_state = match engine.spawn() {
            Ok(()) => SessionState::Playing,
            Err(_) => SessionState::GameOver,
        };
        info!(
            "game start (seed {})",
            engine
                .seed()
                .map_or_else(|| "scripted".to_owned(), PieceSeed::to_hex)
        );
        let drop_frames = drop_frames(speed.interval(engine.level()), fps);
        Self {
            engine,
            session_state,
            speed,
            fps,
            total_frames: 0,
            drop_frames,
        }
    }

    #[must_use]
    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    #[must_use]
    pub fn session_state(&self) -> SessionState {
        self.session_state
    }

    #[must_use]
    pub fn speed(&self) -> &FallSpeed {
        &self.speed
    }

    /// Current gravity interval, derived from the engine's level.
    #[must_use]
    pub fn fall_interval(&self) -> Duration {
        self.speed.interval(self.engine.level())
    }

    /// Play time, counted in frames while the game was running.
    #[must_use]
    pub fn duration(&self) -> Duration {
        const NANOS_PER_SEC: u64 = 1_000_000_000;
        let secs = self.total_frames / self.fps;
        let nanos = (self.total_frames % self.fps) * NANOS_PER_SEC / self.fps;
        Duration::new(secs, u32::try_from(nanos).unwrap_or(0))
    }

    pub fn toggle_pause(&mut self) {
        self.session_state = match self.session_state {
            SessionState::Playing => SessionState::Paused,
            SessionState::Paused => SessionState::Playing,
            SessionState::GameOver => SessionState::GameOver,
        };
    }

    /// Forwards an intent. Returns `true` if it changed anything.
    ///
    /// Only [`Intent::TogglePause`] is accepted while paused, and nothing
    /// after game over.
    pub fn handle_intent(&mut self, intent: Intent) -> bool {
        match self.session_state {
            SessionState::GameOver => false,
            _ if intent.is_toggle_pause() => {
                self.toggle_pause();
                true
            }
            SessionState::Paused => false,
            SessionState::Playing => self.engine.apply(intent).is_ok(),
        }
    }

    /// Advances one frame. Returns the gravity outcome when a gravity step
    /// ran on this frame.
    ///
    /// The countdown to the next step is taken from the level after each
    /// step, so a level-up speeds up the following step.
    pub fn increment_frame(&mut self) -> Option<TickOutcome> {
        if !self.session_state.is_playing() {
            return None;
        }

        self.total_frames += 1;
        self.drop_frames = self.drop_frames.saturating_sub(1);
        if self.drop_frames > 0 {
            return None;
        }

        let outcome = self.engine.tick();
        self.drop_frames = drop_frames(self.fall_interval(), self.fps);
        if self.engine.is_game_over() {
            self.session_state = SessionState::GameOver;
        }
        Some(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        PieceGenerator,
        core::{
            grid::{Cell, Grid},
            piece::{PieceKind, Position},
        },
    };

    const FAST: FallSpeed = FallSpeed {
        base_interval_ms: 1,
        interval_step_ms: 0,
        min_interval_ms: 1,
    };

    fn scripted_session(
        grid: Grid,
        kinds: &[PieceKind],
        fps: u64,
        speed: FallSpeed,
    ) -> GameSession {
        let engine = Engine::with_grid(grid, PieceGenerator::scripted(kinds.iter().copied()));
        GameSession::with_engine(engine, fps, speed)
    }

    fn anchor(session: &GameSession) -> Position {
        session.engine().falling_piece().unwrap().anchor()
    }

    #[test]
    fn test_fall_speed_interval() {
        let speed = FallSpeed::default();
        assert_eq!(speed.interval(1), Duration::from_millis(500));
        assert_eq!(speed.interval(2), Duration::from_millis(450));
        assert_eq!(speed.interval(9), Duration::from_millis(100));
        assert_eq!(speed.interval(10), Duration::from_millis(50));
        assert_eq!(speed.interval(11), Duration::from_millis(50));
        assert_eq!(speed.interval(1000), Duration::from_millis(50));
    }

    #[test]
    fn test_session_spawns_first_piece() {
        let session = scripted_session(Grid::EMPTY, &[PieceKind::T], 60, FallSpeed::default());
        assert!(session.session_state().is_playing());
        assert_eq!(anchor(&session), Position::new(0, 3));
    }

    #[test]
    fn test_gravity_cadence() {
        // 500 ms at 60 fps is 30 frames.
        let mut session = scripted_session(Grid::EMPTY, &[PieceKind::O], 60, FallSpeed::default());
        for _ in 0..29 {
            assert_eq!(session.increment_frame(), None);
        }
        assert_eq!(session.increment_frame(), Some(TickOutcome::Fell));
        assert_eq!(anchor(&session), Position::new(1, 4));

        for _ in 0..29 {
            assert_eq!(session.increment_frame(), None);
        }
        assert_eq!(session.increment_frame(), Some(TickOutcome::Fell));
        assert_eq!(session.duration(), Duration::from_secs(1));
    }

    #[test]
    fn test_pause_suspends_gravity_and_input() {
        let mut session = scripted_session(Grid::EMPTY, &[PieceKind::O], 60, FAST);
        assert!(session.handle_intent(Intent::TogglePause));
        assert!(session.session_state().is_paused());

        for _ in 0..100 {
            assert_eq!(session.increment_frame(), None);
        }
        assert!(!session.handle_intent(Intent::MoveLeft));
        assert!(!session.handle_intent(Intent::HardDrop));
        assert_eq!(anchor(&session), Position::new(0, 4));
        assert_eq!(session.duration(), Duration::ZERO);

        assert!(session.handle_intent(Intent::TogglePause));
        assert!(session.handle_intent(Intent::MoveLeft));
        assert_eq!(anchor(&session), Position::new(0, 3));
    }

    #[test]
    fn test_blocked_start_is_game_over() {
        let mut grid = Grid::EMPTY;
        grid.set(0, 4, Cell::Filled(PieceKind::S));
        let mut session = scripted_session(grid, &[PieceKind::O], 60, FAST);

        assert!(session.session_state().is_game_over());
        assert!(!session.handle_intent(Intent::TogglePause));
        assert!(!session.handle_intent(Intent::MoveLeft));
        assert_eq!(session.increment_frame(), None);
    }

    #[test]
    fn test_gravity_reaches_game_over() {
        let mut grid = Grid::EMPTY;
        for row in 2..Grid::ROWS {
            grid.set(row, 4, Cell::Filled(PieceKind::I));
        }
        let mut session = scripted_session(grid, &[PieceKind::O], 1000, FAST);

        let outcome = session.increment_frame();
        assert!(outcome.is_some_and(|outcome| outcome.is_locked()));
        assert!(session.session_state().is_game_over());
        assert!(session.engine().is_game_over());

        session.toggle_pause();
        assert!(session.session_state().is_game_over());
    }

    #[test]
    fn test_hard_drop_intent_then_gravity_locks() {
        let mut session = scripted_session(Grid::EMPTY, &[PieceKind::O], 1000, FAST);
        assert!(session.handle_intent(Intent::HardDrop));
        assert_eq!(anchor(&session), Position::new(18, 4));

        let outcome = session.increment_frame().unwrap();
        assert!(outcome.is_locked());
        assert_eq!(session.engine().grid().filled_count(), 4);
    }
}
