//! tsk task command implementations.

use std::path::PathBuf;

use serde::Serialize;

use crate::config::{self, Config};
use crate::error::Result;
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::storage::FileStore;
use crate::store::TaskStore;
use crate::task::{DeletedTask, Priority, Task};

pub struct AddOptions {
    pub text: String,
    pub priority: String,
    pub category: Option<String>,
    pub data_dir: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

pub struct EditOptions {
    pub id: u64,
    pub text: String,
    pub data_dir: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

pub struct ToggleOptions {
    pub id: u64,
    pub data_dir: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

pub struct DeleteOptions {
    pub id: u64,
    pub data_dir: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

pub struct ListOptions {
    pub pending: bool,
    pub completed: bool,
    pub category: Option<String>,
    pub data_dir: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

#[derive(Debug, Clone, Copy)]
pub enum ClearScope {
    Completed,
    All,
}

pub struct ClearOptions {
    pub scope: ClearScope,
    pub data_dir: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

pub struct StatsOptions {
    pub data_dir: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

pub struct TrashOptions {
    pub data_dir: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

/// Load config, resolve the data directory, and bring up the store.
pub(super) fn load_store(
    data_dir: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<TaskStore<FileStore>> {
    let config = Config::load_or_default(config_path.as_deref())?;
    let dir = config::resolve_data_dir(data_dir, &config)?;
    TaskStore::load(FileStore::new(dir), config.seed.onboarding)
}

pub(super) fn push_load_warnings(human: &mut HumanOutput, store: &TaskStore<FileStore>) {
    for warning in store.load_warnings() {
        human.push_warning(warning.clone());
    }
}

fn options(json: bool, quiet: bool) -> OutputOptions {
    OutputOptions { json, quiet }
}

fn task_line(task: &Task) -> String {
    let mark = if task.completed { "x" } else { " " };
    let mut line = format!(
        "[{mark}][{}] {} {}",
        task.priority.as_str(),
        task.id,
        task.text
    );
    if let Some(category) = task.category.as_ref() {
        line.push_str(&format!(" (category: {category})"));
    }
    line
}

pub fn run_add(opts: AddOptions) -> Result<()> {
    let priority = Priority::parse(&opts.priority)?;
    let mut store = load_store(opts.data_dir, opts.config)?;

    let task = store.add_task(&opts.text, priority, opts.category.as_deref())?;

    let mut human = HumanOutput::new("Task added");
    push_load_warnings(&mut human, &store);
    human.push_summary("ID", task.id.to_string());
    human.push_summary("Priority", task.priority.as_str());
    if let Some(category) = task.category.as_ref() {
        human.push_summary("Category", category.clone());
    }

    emit_success(options(opts.json, opts.quiet), "add", &task, Some(&human))
}

pub fn run_edit(opts: EditOptions) -> Result<()> {
    let mut store = load_store(opts.data_dir, opts.config)?;

    let task = store.edit_task(opts.id, &opts.text)?;

    let mut human = HumanOutput::new("Task updated");
    push_load_warnings(&mut human, &store);
    human.push_summary("ID", task.id.to_string());
    human.push_summary("Text", task.text.clone());

    emit_success(options(opts.json, opts.quiet), "edit", &task, Some(&human))
}

pub fn run_toggle(opts: ToggleOptions) -> Result<()> {
    let mut store = load_store(opts.data_dir, opts.config)?;

    let task = store.toggle_completed(opts.id)?;

    let header = if task.completed {
        "Task completed"
    } else {
        "Task reopened"
    };
    let mut human = HumanOutput::new(header);
    push_load_warnings(&mut human, &store);
    human.push_summary("ID", task.id.to_string());
    human.push_summary("Text", task.text.clone());

    emit_success(options(opts.json, opts.quiet), "toggle", &task, Some(&human))
}

pub fn run_delete(opts: DeleteOptions) -> Result<()> {
    let mut store = load_store(opts.data_dir, opts.config)?;

    let snapshot = store.delete_task(opts.id)?;

    let mut human = HumanOutput::new("Task moved to trash");
    push_load_warnings(&mut human, &store);
    human.push_summary("ID", snapshot.task.id.to_string());
    human.push_summary("Text", snapshot.task.text.clone());
    human.push_summary("Deleted total", store.deleted_count().to_string());

    emit_success(
        options(opts.json, opts.quiet),
        "delete",
        &snapshot,
        Some(&human),
    )
}

#[derive(Serialize)]
struct ListOutput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pending: Option<Vec<Task>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    completed: Option<Vec<Task>>,
}

pub fn run_list(opts: ListOptions) -> Result<()> {
    let store = load_store(opts.data_dir, opts.config)?;
    let category = opts.category.as_deref();

    let show_pending = !opts.completed;
    let show_completed = !opts.pending;

    let pending: Option<Vec<Task>> = show_pending
        .then(|| store.visible_pending(category).into_iter().cloned().collect());
    let completed: Option<Vec<Task>> = show_completed
        .then(|| store.visible_completed(category).into_iter().cloned().collect());

    let mut human = HumanOutput::new("Tasks");
    push_load_warnings(&mut human, &store);
    if let Some(category) = category {
        human.push_summary("Category", category);
    }
    if let Some(tasks) = pending.as_ref() {
        human.push_summary("Pending", tasks.len().to_string());
        for task in tasks {
            human.push_detail(task_line(task));
        }
    }
    if let Some(tasks) = completed.as_ref() {
        human.push_summary("Completed", tasks.len().to_string());
        for task in tasks {
            human.push_detail(task_line(task));
        }
    }

    let output = ListOutput { pending, completed };
    emit_success(options(opts.json, opts.quiet), "list", &output, Some(&human))
}

#[derive(Serialize)]
struct ClearOutput {
    moved: usize,
}

pub fn run_clear(opts: ClearOptions) -> Result<()> {
    let mut store = load_store(opts.data_dir, opts.config)?;

    let (command, moved) = match opts.scope {
        ClearScope::Completed => ("clear completed", store.clear_completed()?),
        ClearScope::All => ("clear all", store.clear_all()?),
    };

    let header = if moved == 0 {
        "Nothing to clear"
    } else {
        "Tasks moved to trash"
    };
    let mut human = HumanOutput::new(header);
    push_load_warnings(&mut human, &store);
    human.push_summary("Moved", moved.to_string());
    human.push_summary("Deleted total", store.deleted_count().to_string());

    emit_success(
        options(opts.json, opts.quiet),
        command,
        &ClearOutput { moved },
        Some(&human),
    )
}

#[derive(Serialize)]
struct StatsOutput {
    completed: usize,
    pending: usize,
    deleted: u64,
}

pub fn run_stats(opts: StatsOptions) -> Result<()> {
    let store = load_store(opts.data_dir, opts.config)?;
    let stats = store.stats();

    let output = StatsOutput {
        completed: stats.completed,
        pending: stats.pending,
        deleted: store.deleted_count(),
    };

    let mut human = HumanOutput::new("Task stats");
    push_load_warnings(&mut human, &store);
    human.push_summary("Pending", output.pending.to_string());
    human.push_summary("Completed", output.completed.to_string());
    human.push_summary("Deleted", output.deleted.to_string());

    emit_success(options(opts.json, opts.quiet), "stats", &output, Some(&human))
}

#[derive(Serialize)]
struct TrashOutput<'a> {
    deleted_count: u64,
    entries: &'a [DeletedTask],
}

pub fn run_trash(opts: TrashOptions) -> Result<()> {
    let store = load_store(opts.data_dir, opts.config)?;

    let output = TrashOutput {
        deleted_count: store.deleted_count(),
        entries: store.trash(),
    };

    let mut human = HumanOutput::new("Trash");
    push_load_warnings(&mut human, &store);
    human.push_summary("Entries", store.trash().len().to_string());
    human.push_summary("Deleted total", store.deleted_count().to_string());
    for entry in store.trash() {
        human.push_detail(format!(
            "{} {} (deleted {})",
            entry.task.id,
            entry.task.text,
            entry.deleted_at.to_rfc3339()
        ));
    }

    emit_success(options(opts.json, opts.quiet), "trash", &output, Some(&human))
}
