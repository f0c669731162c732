/// Task endpoints
///
/// Owner-scoped task CRUD. Every operation is keyed on the caller's
/// identity from the bearer token: listing returns only the caller's
/// tasks, and mutations hit `(id, owner)` in a single statement so a task
/// owned by someone else is indistinguishable from one that does not
/// exist.
///
/// # Endpoints
///
/// - `GET /tasks` - List the caller's tasks, newest first
/// - `POST /tasks` - Create a task
/// - `PUT /tasks/:id` - Partially update a task
/// - `DELETE /tasks/:id` - Delete a task

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    extract::Json,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension,
};
use serde::Serialize;
use taskhub_shared::{
    auth::middleware::AuthContext,
    models::task::{CreateTask, Task, UpdateTask},
};
use uuid::Uuid;

/// Task list response
#[derive(Debug, Serialize)]
pub struct TaskListResponse {
    /// The caller's tasks, newest first
    pub tasks: Vec<Task>,
}

/// Single-task response
#[derive(Debug, Serialize)]
pub struct TaskResponse {
    /// The task
    pub task: Task,
}

/// Deletion acknowledgement
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    /// Confirmation message
    pub message: String,
}

/// Lists the caller's tasks, newest first
pub async fn list_tasks(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<TaskListResponse>> {
    let tasks = Task::list_by_owner(&state.db, auth.user_id).await?;
    Ok(Json(TaskListResponse { tasks }))
}

/// Creates a task owned by the caller
///
/// # Errors
///
/// - `400 Bad Request`: Missing or blank title
pub async fn create_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(draft): Json<CreateTask>,
) -> ApiResult<(StatusCode, Json<TaskResponse>)> {
    let task = Task::create(&state.db, auth.user_id, draft).await?;

    tracing::info!(task_id = %task.id, owner = %auth.user_id, "Task created");

    Ok((StatusCode::CREATED, Json(TaskResponse { task })))
}

/// Partially updates a task owned by the caller
///
/// Absent fields are left untouched; `"dueDate": null` clears the due
/// date. An empty body returns the task unchanged.
///
/// # Errors
///
/// - `400 Bad Request`: Patch sets the title to blank
/// - `404 Not Found`: No task with this id belongs to the caller
pub async fn update_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
    Json(patch): Json<UpdateTask>,
) -> ApiResult<Json<TaskResponse>> {
    let task = Task::update(&state.db, auth.user_id, id, patch)
        .await?
        .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

    Ok(Json(TaskResponse { task }))
}

/// Deletes a task owned by the caller
///
/// # Errors
///
/// - `404 Not Found`: No task with this id belongs to the caller
pub async fn delete_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<DeleteResponse>> {
    let deleted = Task::delete(&state.db, auth.user_id, id).await?;
    if !deleted {
        return Err(ApiError::NotFound("Task not found".to_string()));
    }

    tracing::info!(task_id = %id, owner = %auth.user_id, "Task deleted");

    Ok(Json(DeleteResponse {
        message: "Task deleted".to_string(),
    }))
}
