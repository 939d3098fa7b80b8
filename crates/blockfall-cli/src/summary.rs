use std::path::Path;

use blockfall_engine::{FallSpeed, GameSession, PieceSeed};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::util;

/// Final figures of a played session, written as JSON when the player quits.
///
/// The seed, when present, reproduces the piece sequence with
/// `blockfall play --seed`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub seed: Option<PieceSeed>,
    pub score: usize,
    pub level: usize,
    pub lines: usize,
    pub pieces: usize,
    pub line_cleared_counter: [usize; 5],
    pub duration_ms: u64,
    pub fall_speed: FallSpeed,
    pub game_over: bool,
    pub finished_at: DateTime<Utc>,
}

impl SessionSummary {
    pub fn from_session(session: &GameSession, finished_at: DateTime<Utc>) -> Self {
        let engine = session.engine();
        let stats = engine.stats();
        Self {
            seed: engine.seed(),
            score: stats.score(),
            level: stats.level(),
            lines: stats.total_cleared_lines(),
            pieces: stats.completed_pieces(),
            line_cleared_counter: *stats.line_cleared_counter(),
            duration_ms: u64::try_from(session.duration().as_millis()).unwrap_or(u64::MAX),
            fall_speed: *session.speed(),
            game_over: session.session_state().is_game_over(),
            finished_at,
        }
    }

    pub fn save<P>(&self, path: P) -> anyhow::Result<()>
    where
        P: AsRef<Path>,
    {
        util::write_json_file("summary", path, self)
    }
}

#[cfg(test)]
mod tests {
    use blockfall_engine::Intent;

    use super::*;

    #[test]
    fn test_summary_from_session() {
        let seed = PieceSeed::from_bytes([0x42; 16]);
        let mut session = GameSession::with_seed(10, FallSpeed::default(), seed);
        session.handle_intent(Intent::HardDrop);
        // 500 ms at 10 fps is 5 frames: one gravity step that locks the piece.
        for _ in 0..5 {
            session.increment_frame();
        }

        let finished_at = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let summary = SessionSummary::from_session(&session, finished_at);
        assert_eq!(summary.seed, Some(seed));
        assert_eq!(summary.score, 0);
        assert_eq!(summary.level, 1);
        assert_eq!(summary.pieces, 1);
        assert_eq!(summary.line_cleared_counter, [1, 0, 0, 0, 0]);
        assert_eq!(summary.duration_ms, 500);
        assert!(!summary.game_over);
    }

    #[test]
    fn test_summary_json_fields() {
        let seed = PieceSeed::from_bytes([0; 16]);
        let session = GameSession::with_seed(60, FallSpeed::default(), seed);
        let finished_at = DateTime::from_timestamp(0, 0).unwrap();
        let summary = SessionSummary::from_session(&session, finished_at);
        let json = serde_json::to_value(summary).unwrap();

        assert_eq!(json["seed"], "0".repeat(32));
        assert_eq!(json["fall_speed"]["base_interval_ms"], 500);
        assert_eq!(json["finished_at"], "1970-01-01T00:00:00Z");
        assert_eq!(json["game_over"], false);
    }
}
