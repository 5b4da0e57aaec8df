use crate::models::Task;
use serde::Serialize;

/// Derived counters for the board. Always recomputed from the task
/// collection; never stored or updated incrementally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub total: usize,
    pub completed: usize,
    pub remaining: usize,
}

pub fn board_stats(tasks: &[Task]) -> Stats {
    let total = tasks.len();
    let completed = tasks.iter().filter(|task| task.completed).count();
    Stats {
        total,
        completed,
        remaining: total - completed,
    }
}
