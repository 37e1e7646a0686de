//! Pure task-collection reconciliation: single-record replacement and the
//! completion ordering policy applied after every load and every update.

use shared::protocol::TaskRecord;

/// Replaces the task whose id matches `update.task_id` wholesale. All other
/// tasks keep their relative order. An unknown id is a no-op: no insertion,
/// no error. Replacing by id makes this idempotent.
pub fn apply_update(tasks: Vec<TaskRecord>, update: TaskRecord) -> Vec<TaskRecord> {
    tasks
        .into_iter()
        .map(|task| {
            if task.task_id == update.task_id {
                update.clone()
            } else {
                task
            }
        })
        .collect()
}

/// Sorts incomplete tasks before completed ones. `sort_by_key` is stable, so
/// tasks with equal `completed` keep their prior relative order; the stability
/// is load-bearing, not incidental.
pub fn sort_by_completion(tasks: &mut [TaskRecord]) {
    tasks.sort_by_key(|task| task.completed);
}

/// `(completed, total)` over the collection.
pub fn completion_counts(tasks: &[TaskRecord]) -> (usize, usize) {
    let completed = tasks.iter().filter(|task| task.completed).count();
    (completed, tasks.len())
}

pub fn progress_summary(tasks: &[TaskRecord]) -> String {
    let (completed, total) = completion_counts(tasks);
    format!("{completed}/{total} tasks done")
}

#[cfg(test)]
#[path = "tests/reconcile_tests.rs"]
mod tests;
