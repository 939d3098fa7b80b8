use std::time::{Duration, Instant};

use crossterm::event::{self, Event};

/// What the loop should do next.
#[derive(Debug, Clone, derive_more::IsVariant, derive_more::From)]
pub(super) enum TuiEvent {
    /// One frame of application time has passed.
    Tick,
    /// The screen is out of date.
    Render,
    /// Input or resize from the terminal.
    Crossterm(Event),
}

/// Frame clock multiplexed with terminal input.
///
/// Ticks are produced at a fixed interval when one is set. A render is
/// requested after every tick or terminal event, so an idle screen is not
/// redrawn.
#[derive(Debug)]
pub(super) struct EventLoop {
    tick_interval: Option<Duration>,
    last_tick: Instant,
    dirty: bool,
}

impl Default for EventLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl EventLoop {
    pub(super) fn new() -> Self {
        Self {
            tick_interval: None,
            last_tick: Instant::now(),
            // The first screen has to be drawn.
            dirty: true,
        }
    }

    pub(super) fn set_tick_interval(&mut self, interval: Option<Duration>) {
        self.tick_interval = interval;
    }

    /// Blocks until the next tick is due, a render is pending or a terminal
    /// event arrives.
    pub(super) fn next(&mut self) -> anyhow::Result<TuiEvent> {
        loop {
            let now = Instant::now();
            if self.tick_due(now) {
                self.last_tick = now;
                self.dirty = true;
                return Ok(TuiEvent::Tick);
            }

            if self.dirty {
                self.dirty = false;
                return Ok(TuiEvent::Render);
            }

            if let Some(timeout) = self.timeout(now)
                && !event::poll(timeout)?
            {
                continue;
            }

            self.dirty = true;
            return Ok(event::read()?.into());
        }
    }

    fn tick_due(&self, now: Instant) -> bool {
        self.tick_interval
            .is_some_and(|interval| now.duration_since(self.last_tick) >= interval)
    }

    /// Time left until the next tick, or `None` to wait for input only.
    fn timeout(&self, now: Instant) -> Option<Duration> {
        let next_tick_at = self.last_tick + self.tick_interval?;
        Some(next_tick_at.saturating_duration_since(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_without_interval_waits_for_input() {
        let events = EventLoop::new();
        let now = Instant::now();
        assert!(!events.tick_due(now + Duration::from_secs(60)));
        assert_eq!(events.timeout(now), None);
    }

    #[test]
    fn test_tick_due_after_interval() {
        let mut events = EventLoop::new();
        events.set_tick_interval(Some(Duration::from_millis(20)));
        let start = events.last_tick;

        assert!(!events.tick_due(start + Duration::from_millis(19)));
        assert!(events.tick_due(start + Duration::from_millis(20)));
        assert_eq!(
            events.timeout(start + Duration::from_millis(5)),
            Some(Duration::from_millis(15))
        );
        assert_eq!(
            events.timeout(start + Duration::from_millis(30)),
            Some(Duration::ZERO)
        );
    }

    #[test]
    fn test_first_event_is_render() {
        let mut events = EventLoop::new();
        assert!(events.next().unwrap().is_render());
    }
}
