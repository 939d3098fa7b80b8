pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

/// Reason a state transition was rejected.
///
/// A rejected transition never changes the engine state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[derive(derive_more::Display, derive_more::Error, derive_more::IsVariant)]
pub enum TransitionError {
    #[display("piece colliding at target position")]
    Collision,
    #[display("no falling piece")]
    NoPiece,
    #[display("game is over")]
    GameOver,
}
