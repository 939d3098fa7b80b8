use clap::{Parser, Subcommand};

use self::{keys::KeysArg, play::PlayArg};

mod keys;
mod play;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What to do; plays a game when omitted
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Play a game in the terminal
    Play(#[clap(flatten)] PlayArg),
    /// Print the effective key bindings as JSON
    Keys(#[clap(flatten)] KeysArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode.unwrap_or(Mode::Play(PlayArg::default())) {
        Mode::Play(arg) => play::run(&arg)?,
        Mode::Keys(arg) => keys::run(&arg)?,
    }
    Ok(())
}
