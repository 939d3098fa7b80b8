use log::info;

use super::{
    game_session::{FallSpeed, GameSession},
    piece_generator::PieceSeed,
};

/// Owner of the game that is currently being played.
///
/// The host holds the session settings and at most one live session. A seed
/// given with [`Self::with_seed`] applies to the first launch only; later
/// games draw fresh seeds.
#[derive(Debug, Clone)]
pub struct GameHost {
    fps: u64,
    speed: FallSpeed,
    seed: Option<PieceSeed>,
    session: Option<GameSession>,
}

impl GameHost {
    #[must_use]
    pub fn new(fps: u64, speed: FallSpeed) -> Self {
        Self {
            fps,
            speed,
            seed: None,
            session: None,
        }
    }

    #[must_use]
    pub fn with_seed(mut self, seed: Option<PieceSeed>) -> Self {
        self.seed = seed;
        self
    }

    #[must_use]
    pub fn fps(&self) -> u64 {
        self.fps
    }

    #[must_use]
    pub fn session(&self) -> Option<&GameSession> {
        self.session.as_ref()
    }

    pub fn session_mut(&mut self) -> Option<&mut GameSession> {
        self.session.as_mut()
    }

    /// Returns the live session, starting one if there is none.
    pub fn launch(&mut self) -> &mut GameSession {
        self.session.get_or_insert_with(|| {
            let session = match self.seed.take() {
                Some(seed) => GameSession::with_seed(self.fps, self.speed, seed),
                None => GameSession::new(self.fps, self.speed),
            };
            info!("session launched");
            session
        })
    }

    /// Discards the live session, if any, and starts a new one.
    pub fn restart(&mut self) -> &mut GameSession {
        if self.close().is_some() {
            info!("session restarted");
        }
        self.launch()
    }

    /// Ends the live session and hands it back.
    pub fn close(&mut self) -> Option<GameSession> {
        let session = self.session.take()?;
        info!(
            "session closed (score {}, lines {})",
            session.engine().score(),
            session.engine().total_cleared_lines()
        );
        Some(session)
    }
}
