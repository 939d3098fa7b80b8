use std::path::PathBuf;

use crate::{config::KeyMap, util};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct KeysArg {
    /// Key map file (JSON) to read instead of the defaults
    #[clap(long)]
    keymap: Option<PathBuf>,
}

pub(crate) fn run(arg: &KeysArg) -> anyhow::Result<()> {
    let KeysArg { keymap } = arg;

    let key_map = match keymap {
        Some(path) => KeyMap::load(path)?,
        None => KeyMap::default(),
    };
    util::print_json(&key_map)
}
