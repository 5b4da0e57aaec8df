use crate::tasks::TaskBoard;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Shared application state. The board is memory-only and dies with the
/// process; the mutex serializes mutations, and stats are derived under
/// the same lock as the mutation they describe.
#[derive(Clone)]
pub struct AppState {
    pub board: Arc<Mutex<TaskBoard>>,
}

impl AppState {
    pub fn new(board: TaskBoard) -> Self {
        Self {
            board: Arc::new(Mutex::new(board)),
        }
    }
}
