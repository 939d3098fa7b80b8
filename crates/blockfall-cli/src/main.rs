mod command;
mod config;
mod logging;
mod summary;
mod tui;
mod util;
mod view;

fn main() -> anyhow::Result<()> {
    command::run()
}
