//! Pending/completed projections over the active collection.
//!
//! Pure derivation for the view layer: no mutation, no persistence, no
//! caching. Results are recomputed from the current collection on every
//! call and ordered most-recently-created first (`created_at` descending,
//! ties broken by `id` descending).

use crate::task::Task;

/// Tasks not yet completed, optionally restricted to a category.
///
/// An empty or whitespace-only category applies no filter.
pub fn visible_pending<'a>(tasks: &'a [Task], category: Option<&str>) -> Vec<&'a Task> {
    visible(tasks, false, category)
}

/// Completed tasks, same filter and ordering as [`visible_pending`].
pub fn visible_completed<'a>(tasks: &'a [Task], category: Option<&str>) -> Vec<&'a Task> {
    visible(tasks, true, category)
}

fn visible<'a>(tasks: &'a [Task], completed: bool, category: Option<&str>) -> Vec<&'a Task> {
    let category = category.map(str::trim).filter(|value| !value.is_empty());

    let mut selected: Vec<&Task> = tasks
        .iter()
        .filter(|task| task.completed == completed)
        .filter(|task| match category {
            Some(wanted) => task.category.as_deref() == Some(wanted),
            None => true,
        })
        .collect();

    selected.sort_by(|left, right| {
        right
            .created_at
            .cmp(&left.created_at)
            .then_with(|| right.id.cmp(&left.id))
    });

    selected
}
