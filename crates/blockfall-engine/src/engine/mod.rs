//! Game rules and the layers that drive them.
//!
//! - [`Engine`] - Grid, falling piece, lookahead and counters, with every
//!   legal transition (spawn, move, rotate, hard drop, lock, tick)
//! - [`GameStats`] - Score, level and line counters
//! - [`PieceGenerator`] - Seeded random or scripted source of piece kinds
//! - [`Intent`] - Player inputs, decoupled from any input device
//! - [`GameSession`] - Pause state and frame-counted gravity around an engine
//! - [`GameHost`] - Owns the current session and starts, restarts or closes it
//!
//! # Game Flow
//!
//! 1. [`GameHost::launch`] creates a [`GameSession`], which spawns the first piece
//! 2. The front end forwards [`Intent`]s and calls
//!    [`GameSession::increment_frame`] once per frame
//! 3. Gravity moves the piece down; a landed piece locks, full rows clear and
//!    the next piece spawns
//! 4. The game is over when a spawn is blocked
//!
//! # Example
//!
//! ```
//! use blockfall_engine::{FallSpeed, GameHost, Intent};
//!
//! let mut host = GameHost::new(60, FallSpeed::default());
//! let session = host.launch();
//!
//! session.handle_intent(Intent::MoveLeft);
//! session.handle_intent(Intent::HardDrop);
//! for _ in 0..30 {
//!     session.increment_frame();
//! }
//! assert_eq!(session.engine().stats().completed_pieces(), 1);
//! ```

pub use self::{
    game_engine::*, game_host::*, game_session::*, game_stats::*, intent::*, piece_generator::*,
};

mod game_engine;
mod game_host;
mod game_session;
mod game_stats;
mod intent;
mod piece_generator;
