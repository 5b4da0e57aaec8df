use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{delete, get, post},
    Router,
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/tasks", post(handlers::add_task_form))
        .route("/api/tasks", get(handlers::list_tasks).post(handlers::add_task))
        .route("/api/tasks/:id/toggle", post(handlers::toggle_task))
        .route("/api/tasks/:id", delete(handlers::delete_task))
        .route("/api/stats", get(handlers::get_stats))
        .with_state(state)
}
