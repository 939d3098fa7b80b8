use std::time::Duration;

use crate::tui::{
    App,
    event_loop::{EventLoop, TuiEvent},
};

/// Runs an [`App`] on the terminal.
#[derive(Default, Debug)]
pub struct Tui {
    events: EventLoop,
}

impl Tui {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets how many times per second [`App::update`] is called.
    ///
    /// # Panics
    ///
    /// Panics if `fps` is zero.
    pub fn set_frame_rate(&mut self, fps: u64) {
        assert!(fps > 0, "frame rate must be positive");
        let nanos = 1_000_000_000 / fps;
        self.events.set_tick_interval(Some(Duration::from_nanos(nanos)));
    }

    /// Takes over the terminal and runs `app` until it asks to exit.
    ///
    /// Ticks go to [`App::update`], renders to [`App::draw`] and terminal
    /// events to [`App::handle_event`]. The terminal is restored on return,
    /// including on error.
    pub fn run<A>(mut self, app: &mut A) -> anyhow::Result<()>
    where
        A: App,
    {
        app.init(&mut self);

        ratatui::run(|terminal| {
            while !app.should_exit() {
                match self.events.next()? {
                    TuiEvent::Tick => app.update(&mut self),
                    TuiEvent::Render => {
                        terminal.draw(|frame| app.draw(frame))?;
                    }
                    TuiEvent::Crossterm(event) => app.handle_event(&mut self, event),
                }
            }
            Ok(())
        })
    }
}
