use crossterm::event::Event;
use ratatui::Frame;

use crate::tui::Tui;

/// An application driven by [`Tui::run`].
pub trait App {
    /// Called once before the loop starts. Configure the frame rate here.
    fn init(&mut self, tui: &mut Tui);

    fn should_exit(&self) -> bool;

    /// Handles a terminal event (key press, resize, ...).
    fn handle_event(&mut self, tui: &mut Tui, event: Event);

    fn draw(&self, frame: &mut Frame);

    /// Advances the application by one frame.
    fn update(&mut self, tui: &mut Tui);
}
