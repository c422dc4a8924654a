//! Task store: the single owner of task-list state.
//!
//! Every mutation is written through to the storage adapter before the
//! call returns. When a durable write fails the in-memory change is
//! rolled back, so memory and storage never silently diverge at rest.

use chrono::Utc;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::query;
use crate::storage::{StorageAdapter, KEY_BG_ANIMATION, KEY_TASKS, KEY_TRASH, KEY_TRASH_COUNT};
use crate::task::{DeletedTask, Priority, Stats, Task};

/// Tasks seeded on first run when `seed.onboarding` is configured.
const ONBOARDING_TASKS: [&str; 3] = [
    "Add a task with `tsk add`",
    "Mark it done with `tsk toggle`",
    "Deleted tasks stay in `tsk trash`",
];

/// Owner of the active tasks, the trash log, the deleted counter, and the
/// display-preference flag.
///
/// One instance per session; construct it once and pass it where needed.
pub struct TaskStore<S: StorageAdapter> {
    adapter: S,
    tasks: Vec<Task>,
    trash: Vec<DeletedTask>,
    trash_count: u64,
    bg_animation: bool,
    load_warnings: Vec<String>,
}

impl<S: StorageAdapter> TaskStore<S> {
    /// Load state from the adapter.
    ///
    /// On first run (no key present) the store seeds the collections
    /// (empty, or with fixed onboarding tasks when `seed_onboarding` is
    /// set) and persists the seed immediately. A malformed payload for a single
    /// key falls back to that key's default and is recorded as a load
    /// warning; adapter read failures propagate.
    pub fn load(adapter: S, seed_onboarding: bool) -> Result<Self> {
        let raw_tasks = adapter.read(KEY_TASKS)?;
        let raw_trash = adapter.read(KEY_TRASH)?;
        let raw_count = adapter.read(KEY_TRASH_COUNT)?;
        let raw_bg = adapter.read(KEY_BG_ANIMATION)?;

        let first_run =
            raw_tasks.is_none() && raw_trash.is_none() && raw_count.is_none() && raw_bg.is_none();

        let mut store = Self {
            adapter,
            tasks: Vec::new(),
            trash: Vec::new(),
            trash_count: 0,
            bg_animation: true,
            load_warnings: Vec::new(),
        };

        if first_run {
            store.seed(seed_onboarding)?;
            return Ok(store);
        }

        if let Some(raw) = raw_tasks {
            match serde_json::from_str::<Vec<Task>>(&raw) {
                Ok(tasks) => store.tasks = tasks,
                Err(err) => store.warn(format!(
                    "stored tasks are unreadable, starting with an empty list: {err}"
                )),
            }
        }

        if let Some(raw) = raw_trash {
            match serde_json::from_str::<Vec<DeletedTask>>(&raw) {
                Ok(trash) => store.trash = trash,
                Err(err) => store.warn(format!(
                    "stored trash is unreadable, starting with an empty log: {err}"
                )),
            }
        }

        if let Some(raw) = raw_count {
            match raw.trim().parse::<u64>() {
                Ok(count) => store.trash_count = count,
                Err(_) => store.warn(format!(
                    "stored deleted counter '{}' is not a number, recounting from the log",
                    raw.trim()
                )),
            }
        }

        // The log never shrinks, so the counter can only lag behind it.
        let log_len = store.trash.len() as u64;
        if store.trash_count < log_len {
            store.warn(format!(
                "deleted counter {} is behind the trash log ({log_len} entries), bumping",
                store.trash_count
            ));
            store.trash_count = log_len;
        }

        if let Some(raw) = raw_bg {
            match raw.trim() {
                "true" => store.bg_animation = true,
                "false" => store.bg_animation = false,
                other => store.warn(format!(
                    "stored display flag '{other}' is not a boolean, keeping the default"
                )),
            }
        }

        Ok(store)
    }

    fn seed(&mut self, onboarding: bool) -> Result<()> {
        if onboarding {
            let now = Utc::now();
            let base_id = now.timestamp_millis().max(0) as u64;
            self.tasks = ONBOARDING_TASKS
                .iter()
                .enumerate()
                .map(|(offset, text)| Task {
                    id: base_id + offset as u64,
                    text: (*text).to_string(),
                    priority: Priority::Medium,
                    category: None,
                    completed: false,
                    created_at: now,
                })
                .collect();
        }
        self.persist_lifecycle()?;
        self.adapter
            .write(KEY_BG_ANIMATION, bool_literal(self.bg_animation))?;
        info!(tasks = self.tasks.len(), "seeded fresh task store");
        Ok(())
    }

    fn warn(&mut self, message: String) {
        debug!("load warning: {message}");
        self.load_warnings.push(message);
    }

    // =========================================================================
    // Mutations (write-through, revert on failed persist)
    // =========================================================================

    /// Add a task. Fails with `EmptyInput` on blank text.
    pub fn add_task(
        &mut self,
        text: &str,
        priority: Priority,
        category: Option<&str>,
    ) -> Result<Task> {
        let text = text.trim();
        if text.is_empty() {
            return Err(Error::EmptyInput);
        }

        let category = category
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string);

        let task = Task {
            id: self.next_id(),
            text: text.to_string(),
            priority,
            category,
            completed: false,
            created_at: Utc::now(),
        };

        self.tasks.push(task.clone());
        if let Err(err) = self.persist_tasks() {
            self.tasks.pop();
            return Err(err);
        }

        debug!(id = task.id, "task added");
        Ok(task)
    }

    /// Replace a task's text. A blank replacement is rejected and the
    /// original text is retained; a cancelled edit never alters the task.
    pub fn edit_task(&mut self, id: u64, new_text: &str) -> Result<Task> {
        let new_text = new_text.trim();
        if new_text.is_empty() {
            return Err(Error::EmptyInput);
        }

        let index = self.position(id)?;
        let previous = std::mem::replace(&mut self.tasks[index].text, new_text.to_string());
        if let Err(err) = self.persist_tasks() {
            self.tasks[index].text = previous;
            return Err(err);
        }

        debug!(id, "task edited");
        Ok(self.tasks[index].clone())
    }

    /// Flip a task's completed flag. `created_at` is untouched.
    pub fn toggle_completed(&mut self, id: u64) -> Result<Task> {
        let index = self.position(id)?;
        self.tasks[index].completed = !self.tasks[index].completed;
        if let Err(err) = self.persist_tasks() {
            self.tasks[index].completed = !self.tasks[index].completed;
            return Err(err);
        }

        debug!(id, completed = self.tasks[index].completed, "task toggled");
        Ok(self.tasks[index].clone())
    }

    /// Soft-delete a task: remove it from the active collection, append a
    /// snapshot to the trash log, and bump the counter, as one step.
    pub fn delete_task(&mut self, id: u64) -> Result<DeletedTask> {
        let index = self.position(id)?;
        let task = self.tasks.remove(index);
        let snapshot = DeletedTask {
            task,
            deleted_at: Utc::now(),
        };
        self.trash.push(snapshot.clone());
        self.trash_count += 1;

        if let Err(err) = self.persist_lifecycle() {
            self.trash.pop();
            self.trash_count -= 1;
            self.tasks.insert(index, snapshot.task);
            return Err(err);
        }

        debug!(id, "task moved to trash");
        Ok(snapshot)
    }

    /// Move every completed task to the trash. Returns the batch size;
    /// 0 means nothing was completed and nothing was written.
    pub fn clear_completed(&mut self) -> Result<usize> {
        if !self.tasks.iter().any(|task| task.completed) {
            return Ok(0);
        }
        self.move_to_trash(|task| task.completed)
    }

    /// Move every active task to the trash. Returns the batch size;
    /// 0 means the list was already empty and nothing was written.
    pub fn clear_all(&mut self) -> Result<usize> {
        if self.tasks.is_empty() {
            return Ok(0);
        }
        self.move_to_trash(|_| true)
    }

    fn move_to_trash(&mut self, select: impl Fn(&Task) -> bool) -> Result<usize> {
        let previous_tasks = self.tasks.clone();
        let previous_trash_len = self.trash.len();
        let previous_count = self.trash_count;

        let now = Utc::now();
        let mut kept = Vec::with_capacity(self.tasks.len());
        let mut moved = 0usize;
        for task in self.tasks.drain(..) {
            if select(&task) {
                self.trash.push(DeletedTask {
                    task,
                    deleted_at: now,
                });
                moved += 1;
            } else {
                kept.push(task);
            }
        }
        self.tasks = kept;
        self.trash_count += moved as u64;

        if let Err(err) = self.persist_lifecycle() {
            self.tasks = previous_tasks;
            self.trash.truncate(previous_trash_len);
            self.trash_count = previous_count;
            return Err(err);
        }

        debug!(moved, "tasks moved to trash");
        Ok(moved)
    }

    /// Persist the display-preference flag.
    pub fn set_background_animation(&mut self, enabled: bool) -> Result<()> {
        let previous = self.bg_animation;
        self.bg_animation = enabled;
        if let Err(err) = self.adapter.write(KEY_BG_ANIMATION, bool_literal(enabled)) {
            self.bg_animation = previous;
            return Err(err);
        }
        Ok(())
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Completed/pending counts. Pure read, no side effects.
    pub fn stats(&self) -> Stats {
        let completed = self.tasks.iter().filter(|task| task.completed).count();
        Stats {
            completed,
            pending: self.tasks.len() - completed,
        }
    }

    /// Active tasks in insertion order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Trash log in deletion order.
    pub fn trash(&self) -> &[DeletedTask] {
        &self.trash
    }

    /// Total tasks ever moved to the trash.
    pub fn deleted_count(&self) -> u64 {
        self.trash_count
    }

    /// Display-preference flag (defaults to true when never stored).
    pub fn background_animation(&self) -> bool {
        self.bg_animation
    }

    /// Warnings collected while loading (corrupt payloads, counter drift).
    pub fn load_warnings(&self) -> &[String] {
        &self.load_warnings
    }

    /// Pending tasks, newest first, optionally restricted to a category.
    pub fn visible_pending(&self, category: Option<&str>) -> Vec<&Task> {
        query::visible_pending(&self.tasks, category)
    }

    /// Completed tasks, newest first, optionally restricted to a category.
    pub fn visible_completed(&self, category: Option<&str>) -> Vec<&Task> {
        query::visible_completed(&self.tasks, category)
    }

    pub fn adapter(&self) -> &S {
        &self.adapter
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn position(&self, id: u64) -> Result<usize> {
        self.tasks
            .iter()
            .position(|task| task.id == id)
            .ok_or(Error::TaskNotFound(id))
    }

    /// Time-derived id, bumped past the highest active id so rapid adds
    /// within one millisecond stay unique.
    fn next_id(&self) -> u64 {
        let now = Utc::now().timestamp_millis().max(0) as u64;
        let max_active = self.tasks.iter().map(|task| task.id).max().unwrap_or(0);
        now.max(max_active + 1)
    }

    fn persist_tasks(&mut self) -> Result<()> {
        let payload = serde_json::to_string(&self.tasks)?;
        self.adapter.write(KEY_TASKS, &payload)
    }

    /// Persist all three lifecycle records. Payloads are encoded before the
    /// first write so a serialization failure leaves storage untouched.
    fn persist_lifecycle(&mut self) -> Result<()> {
        let tasks_payload = serde_json::to_string(&self.tasks)?;
        let trash_payload = serde_json::to_string(&self.trash)?;
        self.adapter.write(KEY_TASKS, &tasks_payload)?;
        self.adapter.write(KEY_TRASH, &trash_payload)?;
        self.adapter
            .write(KEY_TRASH_COUNT, &self.trash_count.to_string())
    }
}

fn bool_literal(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}
