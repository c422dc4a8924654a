//! Command-line interface for tsk
//!
//! This module defines the CLI structure using clap derive macros.
//! Command implementations live in the submodules.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::error::Result;

mod prefs;
mod tasks;

/// tsk - a local task list with a soft-delete trash
///
/// Tasks live in a small per-user data directory. Deleting a task moves it
/// to a trash log it can be audited from; nothing is erased.
#[derive(Parser, Debug)]
#[command(name = "tsk")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Data directory holding the task files (defaults to the platform data dir)
    #[arg(long, global = true, env = "TSK_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Config file path (defaults to tsk.toml in the platform config dir)
    #[arg(long, global = true, env = "TSK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a task
    Add {
        /// Task text
        text: String,

        /// Priority: low, medium, high
        #[arg(long, default_value = "medium")]
        priority: String,

        /// Category label
        #[arg(long)]
        category: Option<String>,
    },

    /// Replace a task's text
    Edit {
        /// Task id
        id: u64,

        /// Replacement text
        text: String,
    },

    /// Flip a task between pending and completed
    Toggle {
        /// Task id
        id: u64,
    },

    /// Move a task to the trash
    Delete {
        /// Task id
        id: u64,
    },

    /// List pending and completed tasks, newest first
    List {
        /// Show only pending tasks
        #[arg(long, conflicts_with = "completed")]
        pending: bool,

        /// Show only completed tasks
        #[arg(long)]
        completed: bool,

        /// Restrict to a category label
        #[arg(long)]
        category: Option<String>,
    },

    /// Move batches of tasks to the trash
    #[command(subcommand)]
    Clear(ClearCommands),

    /// Completed/pending counts
    Stats,

    /// Show the trash log
    Trash,

    /// Display preferences
    #[command(subcommand)]
    Prefs(PrefsCommands),
}

#[derive(Subcommand, Debug)]
pub enum ClearCommands {
    /// Move every completed task to the trash
    Completed,

    /// Move every active task to the trash
    All,
}

#[derive(Subcommand, Debug)]
pub enum PrefsCommands {
    /// Show or set the background-animation flag
    Bg {
        /// Omit to show the current value
        #[arg(value_enum)]
        action: Option<BgAction>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum BgAction {
    On,
    Off,
    Toggle,
}

impl Cli {
    /// Execute the CLI command
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Add {
                text,
                priority,
                category,
            } => tasks::run_add(tasks::AddOptions {
                text,
                priority,
                category,
                data_dir: self.data_dir,
                config: self.config,
                json: self.json,
                quiet: self.quiet,
            }),
            Commands::Edit { id, text } => tasks::run_edit(tasks::EditOptions {
                id,
                text,
                data_dir: self.data_dir,
                config: self.config,
                json: self.json,
                quiet: self.quiet,
            }),
            Commands::Toggle { id } => tasks::run_toggle(tasks::ToggleOptions {
                id,
                data_dir: self.data_dir,
                config: self.config,
                json: self.json,
                quiet: self.quiet,
            }),
            Commands::Delete { id } => tasks::run_delete(tasks::DeleteOptions {
                id,
                data_dir: self.data_dir,
                config: self.config,
                json: self.json,
                quiet: self.quiet,
            }),
            Commands::List {
                pending,
                completed,
                category,
            } => tasks::run_list(tasks::ListOptions {
                pending,
                completed,
                category,
                data_dir: self.data_dir,
                config: self.config,
                json: self.json,
                quiet: self.quiet,
            }),
            Commands::Clear(cmd) => {
                let scope = match cmd {
                    ClearCommands::Completed => tasks::ClearScope::Completed,
                    ClearCommands::All => tasks::ClearScope::All,
                };
                tasks::run_clear(tasks::ClearOptions {
                    scope,
                    data_dir: self.data_dir,
                    config: self.config,
                    json: self.json,
                    quiet: self.quiet,
                })
            }
            Commands::Stats => tasks::run_stats(tasks::StatsOptions {
                data_dir: self.data_dir,
                config: self.config,
                json: self.json,
                quiet: self.quiet,
            }),
            Commands::Trash => tasks::run_trash(tasks::TrashOptions {
                data_dir: self.data_dir,
                config: self.config,
                json: self.json,
                quiet: self.quiet,
            }),
            Commands::Prefs(PrefsCommands::Bg { action }) => {
                prefs::run_bg(prefs::BgOptions {
                    action,
                    data_dir: self.data_dir,
                    config: self.config,
                    json: self.json,
                    quiet: self.quiet,
                })
            }
        }
    }
}
