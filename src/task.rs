//! Task data types.
//!
//! A `Task` is a short text item with a priority, an optional category
//! label, and a completion flag. Soft-deleted tasks are retained as
//! `DeletedTask` snapshots in an append-only trash log.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

fn default_priority() -> Priority {
    Priority::Medium
}

/// Task priority level.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }

    /// Parse a priority from user input (case-insensitive).
    pub fn parse(input: &str) -> Result<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            other => Err(Error::InvalidArgument(format!(
                "unknown priority '{other}' (expected low|medium|high)"
            ))),
        }
    }
}

impl Default for Priority {
    fn default() -> Self {
        default_priority()
    }
}

/// A single active task.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Task {
    pub id: u64,
    pub text: String,
    #[serde(default = "default_priority")]
    pub priority: Priority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

/// A soft-deleted task: the original record plus the deletion timestamp.
///
/// Trash entries are terminal. They are never edited after insertion and
/// never used to reconstruct active state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeletedTask {
    #[serde(flatten)]
    pub task: Task,
    pub deleted_at: DateTime<Utc>,
}

/// Completed/pending counts derived from the active collection.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct Stats {
    pub completed: usize,
    pub pending: usize,
}
