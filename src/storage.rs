//! Durable key/value storage for the task list.
//!
//! State lives in four independent records, each a full replace on write:
//!
//! ```text
//! <data dir>/
//!   tasks                 # active tasks, JSON array
//!   trash                 # soft-deleted tasks, JSON array
//!   trash_count           # running deleted counter, integer literal
//!   background_animation  # display flag, "true"/"false"
//! ```
//!
//! The task store is written against the [`StorageAdapter`] trait, not a
//! concrete medium. [`FileStore`] is the production adapter (one file per
//! key, locked atomic writes); [`MemoryStore`] backs unit tests and
//! embedding without a filesystem.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::lock::{self, DEFAULT_LOCK_TIMEOUT_MS};

/// Key for the active task collection
pub const KEY_TASKS: &str = "tasks";

/// Key for the trash log
pub const KEY_TRASH: &str = "trash";

/// Key for the running deleted counter
pub const KEY_TRASH_COUNT: &str = "trash_count";

/// Key for the display-preference flag
pub const KEY_BG_ANIMATION: &str = "background_animation";

/// Abstract durable key/value store.
///
/// `read` returns `None` for a key that was never written. `write`
/// replaces the whole value; partial updates do not exist at this layer.
pub trait StorageAdapter {
    fn read(&self, key: &str) -> Result<Option<String>>;
    fn write(&mut self, key: &str, value: &str) -> Result<()>;
}

/// File-backed adapter: one file per key under a data directory.
///
/// Writes go through an exclusive lock on `<file>.lock` plus an atomic
/// temp-and-rename, so concurrent CLI invocations serialize and readers
/// never see a torn record.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root data directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the file backing a key
    pub fn key_path(&self, key: &str) -> PathBuf {
        self.root.join(key)
    }
}

impl StorageAdapter for FileStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.key_path(key)) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        lock::write_atomic_locked(
            self.key_path(key),
            value.as_bytes(),
            DEFAULT_LOCK_TIMEOUT_MS,
        )
    }
}

/// In-memory adapter for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageAdapter for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
