use crate::errors::AppError;
use crate::models::{
    AddTaskRequest, DeleteResponse, TaskListResponse, TaskResponse, ToggleRequest,
};
use crate::state::AppState;
use crate::stats::{board_stats, Stats};
use crate::ui::render_index;
use axum::{
    extract::{Path, State},
    response::{Html, Redirect},
    Form, Json,
};
use tracing::debug;

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let board = state.board.lock().await;
    Html(render_index(&board))
}

pub async fn list_tasks(State(state): State<AppState>) -> Json<TaskListResponse> {
    let board = state.board.lock().await;
    Json(TaskListResponse {
        tasks: board.tasks().to_vec(),
        stats: board_stats(board.tasks()),
    })
}

pub async fn get_stats(State(state): State<AppState>) -> Json<Stats> {
    let board = state.board.lock().await;
    Json(board_stats(board.tasks()))
}

pub async fn add_task(
    State(state): State<AppState>,
    Json(payload): Json<AddTaskRequest>,
) -> Result<Json<TaskResponse>, AppError> {
    let mut board = state.board.lock().await;
    let task = board
        .add(&payload.text)
        .ok_or_else(|| AppError::bad_request("task text must not be empty"))?
        .clone();

    debug!(id = task.id, "task added");
    Ok(Json(TaskResponse {
        stats: board_stats(board.tasks()),
        task,
    }))
}

/// Form fallback for the add form when scripting is unavailable. An empty
/// submission redirects without adding anything, matching the silent skip
/// in the page itself.
pub async fn add_task_form(
    State(state): State<AppState>,
    Form(payload): Form<AddTaskRequest>,
) -> Redirect {
    let mut board = state.board.lock().await;
    board.add(&payload.text);
    Redirect::to("/")
}

pub async fn toggle_task(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(payload): Json<ToggleRequest>,
) -> Result<Json<TaskResponse>, AppError> {
    let mut board = state.board.lock().await;
    let task = board
        .set_completed(id, payload.completed)
        .ok_or_else(|| AppError::not_found(format!("no task with id {id}")))?
        .clone();

    Ok(Json(TaskResponse {
        stats: board_stats(board.tasks()),
        task,
    }))
}

pub async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<DeleteResponse>, AppError> {
    let mut board = state.board.lock().await;
    board
        .remove(id)
        .ok_or_else(|| AppError::not_found(format!("no task with id {id}")))?;

    debug!(id, "task removed");
    Ok(Json(DeleteResponse {
        stats: board_stats(board.tasks()),
    }))
}
