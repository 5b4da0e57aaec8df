use crate::stats::Stats;
use serde::{Deserialize, Serialize};

/// A single task record. Display order is the board's insertion order;
/// `id` is process-unique and never reused.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: u64,
    pub text: String,
    pub completed: bool,
}

#[derive(Debug, Deserialize)]
pub struct AddTaskRequest {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct ToggleRequest {
    pub completed: bool,
}

#[derive(Debug, Serialize)]
pub struct TaskListResponse {
    pub tasks: Vec<Task>,
    pub stats: Stats,
}

#[derive(Debug, Serialize)]
pub struct TaskResponse {
    pub task: Task,
    pub stats: Stats,
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub stats: Stats,
}
