/// Discrete player inputs understood by the engine and its driver.
///
/// Front ends translate device input (key codes, buttons) into intents so the
/// game logic never sees raw input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::IsVariant)]
pub enum Intent {
    /// Shift the falling piece one column left.
    MoveLeft,
    /// Shift the falling piece one column right.
    MoveRight,
    /// Turn the falling piece 90° clockwise.
    RotateClockwise,
    /// Move the falling piece one row down.
    SoftDrop,
    /// Drop the falling piece to its landing position.
    HardDrop,
    /// Suspend or resume the game. Handled by the driver, not the engine.
    TogglePause,
}
