//! Terminal runtime: a frame clock and the loop that feeds an [`App`].

pub use self::{app::App, runner::Tui};

mod app;
mod event_loop;
mod runner;
