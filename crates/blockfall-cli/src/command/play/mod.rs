use std::path::PathBuf;

use blockfall_engine::{FallSpeed, GameHost, PieceSeed};

use crate::{
    command::play::app::PlayApp, config::KeyMap, logging, summary::SessionSummary, tui::Tui,
};

mod app;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// Frames per second; gravity is counted in frames
    #[clap(long, default_value_t = 60, value_parser = clap::value_parser!(u64).range(1..=1000))]
    fps: u64,
    /// Seed of the first game, as 32 hex digits
    #[clap(long)]
    seed: Option<PieceSeed>,
    /// Key map file (JSON); unlisted actions keep their default keys
    #[clap(long)]
    keymap: Option<PathBuf>,
    /// Show where the falling piece will land
    #[clap(long)]
    ghost: bool,
    /// Write a JSON summary of the last game to this file on exit
    #[clap(long)]
    summary: Option<PathBuf>,
    /// Write log records to this file (filter with RUST_LOG)
    #[clap(long)]
    log_file: Option<PathBuf>,
    /// Gravity interval at level 1, in milliseconds
    #[clap(long, default_value_t = FallSpeed::default().base_interval_ms)]
    base_interval_ms: u64,
    /// Interval reduction per level, in milliseconds
    #[clap(long, default_value_t = FallSpeed::default().interval_step_ms)]
    interval_step_ms: u64,
    /// Shortest gravity interval, in milliseconds
    #[clap(long, default_value_t = FallSpeed::default().min_interval_ms)]
    min_interval_ms: u64,
}

impl Default for PlayArg {
    fn default() -> Self {
        let speed = FallSpeed::default();
        Self {
            fps: 60,
            seed: None,
            keymap: None,
            ghost: false,
            summary: None,
            log_file: None,
            base_interval_ms: speed.base_interval_ms,
            interval_step_ms: speed.interval_step_ms,
            min_interval_ms: speed.min_interval_ms,
        }
    }
}

impl PlayArg {
    fn fall_speed(&self) -> FallSpeed {
        FallSpeed {
            base_interval_ms: self.base_interval_ms,
            interval_step_ms: self.interval_step_ms,
            min_interval_ms: self.min_interval_ms,
        }
    }
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    if let Some(path) = &arg.log_file {
        logging::init(path)?;
    }

    let key_map = match &arg.keymap {
        Some(path) => KeyMap::load(path)?,
        None => KeyMap::default(),
    };
    let host = GameHost::new(arg.fps, arg.fall_speed()).with_seed(arg.seed);

    let mut app = PlayApp::new(host, key_map, arg.ghost);
    Tui::new().run(&mut app)?;

    let finished_at = chrono::Utc::now();
    if let Some(session) = app.into_host().close()
        && let Some(path) = &arg.summary
    {
        let summary = SessionSummary::from_session(&session, finished_at);
        summary.save(path)?;
        log::info!("summary written to {}", path.display());
    }
    Ok(())
}
