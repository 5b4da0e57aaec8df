use crate::models::Task;

/// Hard cap on stored task text, counted in characters. Input beyond the
/// cap is discarded, not rejected.
pub const MAX_TASK_LEN: usize = 100;

/// The ordered task collection. The board is the system of record; every
/// rendered row and counter is derived from it.
#[derive(Debug)]
pub struct TaskBoard {
    next_id: u64,
    tasks: Vec<Task>,
}

impl TaskBoard {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            tasks: Vec::new(),
        }
    }

    /// Adds a task from raw input. The pipeline mirrors the input field:
    /// cap at [`MAX_TASK_LEN`] characters first, then trim; input that is
    /// empty after trimming adds nothing and returns `None`.
    pub fn add(&mut self, input: &str) -> Option<&Task> {
        let capped: String = input.chars().take(MAX_TASK_LEN).collect();
        let text = capped.trim();
        if text.is_empty() {
            return None;
        }

        let id = self.next_id;
        self.next_id += 1;
        self.tasks.push(Task {
            id,
            text: text.to_string(),
            completed: false,
        });
        self.tasks.last()
    }

    /// Sets a task's completion state. Idempotent; the caller sends the
    /// checkbox's new state rather than a flip.
    pub fn set_completed(&mut self, id: u64, completed: bool) -> Option<&Task> {
        let task = self.tasks.iter_mut().find(|task| task.id == id)?;
        task.completed = completed;
        Some(task)
    }

    /// Detaches and returns the task with the given id.
    pub fn remove(&mut self, id: u64) -> Option<Task> {
        let index = self.tasks.iter().position(|task| task.id == id)?;
        Some(self.tasks.remove(index))
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

impl Default for TaskBoard {
    fn default() -> Self {
        Self::new()
    }
}
