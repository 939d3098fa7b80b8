use std::{fs::File, path::Path};

use anyhow::Context;
use env_logger::{Env, Target};

/// Installs the global logger, writing to `path`.
///
/// The terminal belongs to the game screen, so log records go to a file.
/// `RUST_LOG` selects the filter; `info` is used when it is unset.
pub fn init(path: &Path) -> anyhow::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file: {}", path.display()))?;

    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .try_init()
        .context("Failed to install logger")?;

    log::debug!("logging to {}", path.display());
    Ok(())
}
