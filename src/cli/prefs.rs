//! tsk display preference commands.

use std::path::PathBuf;

use serde::Serialize;

use crate::cli::BgAction;
use crate::cli::tasks::{load_store, push_load_warnings};
use crate::error::Result;
use crate::output::{emit_success, HumanOutput, OutputOptions};

pub struct BgOptions {
    pub action: Option<BgAction>,
    pub data_dir: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

#[derive(Serialize)]
struct BgOutput {
    enabled: bool,
}

pub fn run_bg(opts: BgOptions) -> Result<()> {
    let mut store = load_store(opts.data_dir, opts.config)?;

    let changed = match opts.action {
        None => None,
        Some(BgAction::On) => Some(true),
        Some(BgAction::Off) => Some(false),
        Some(BgAction::Toggle) => Some(!store.background_animation()),
    };
    if let Some(enabled) = changed {
        store.set_background_animation(enabled)?;
    }

    let enabled = store.background_animation();
    let header = match changed {
        Some(_) => "Background animation updated",
        None => "Background animation",
    };

    let mut human = HumanOutput::new(header);
    push_load_warnings(&mut human, &store);
    human.push_summary("Enabled", enabled.to_string());

    emit_success(
        OutputOptions {
            json: opts.json,
            quiet: opts.quiet,
        },
        "prefs bg",
        &BgOutput { enabled },
        Some(&human),
    )
}
