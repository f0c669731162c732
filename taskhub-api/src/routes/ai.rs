/// AI generation endpoints
///
/// Turns a caller's free-text goal into persisted tasks, and exposes a
/// raw passthrough for free-form content.
///
/// # Endpoints
///
/// - `POST /ai/generate-tasks` - Generate and persist a batch of tasks
/// - `POST /ai/generate-content` - Generate free-form text, unparsed

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    extract::Json,
};
use axum::{extract::State, http::StatusCode, Extension};
use serde::{Deserialize, Serialize};
use taskhub_shared::{auth::middleware::AuthContext, models::task::Task};

/// Generation request, shared by both endpoints
#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    /// Free-text prompt
    #[serde(default)]
    pub prompt: String,
}

/// Generated-tasks response
#[derive(Debug, Serialize)]
pub struct GenerateTasksResponse {
    /// Always true on success
    pub success: bool,

    /// The persisted tasks, in the order the model emitted them
    pub tasks: Vec<Task>,
}

/// Generated-content response
#[derive(Debug, Serialize)]
pub struct GenerateContentResponse {
    /// Always true on success
    pub success: bool,

    /// The model's reply text
    pub content: String,
}

/// Generates tasks from a prompt and persists them for the caller
///
/// Drafts are persisted one by one in the order the model emitted them.
/// A persistence failure aborts the batch: tasks already written stay
/// written, the rest are never attempted, and the caller gets a 500.
///
/// # Endpoint
///
/// ```text
/// POST /ai/generate-tasks
/// Content-Type: application/json
///
/// { "prompt": "plan a weekend trip to the coast" }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Missing or blank prompt
/// - `500 Internal Server Error`: Upstream model or parse failure, body
///   carries the detail in an `error` field
pub async fn generate_tasks(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<GenerateRequest>,
) -> ApiResult<(StatusCode, Json<GenerateTasksResponse>)> {
    let prompt = req.prompt.trim();
    if prompt.is_empty() {
        return Err(ApiError::Validation("Prompt is required".to_string()));
    }

    let drafts = state.generator.generate_tasks(prompt).await?;

    tracing::info!(
        owner = %auth.user_id,
        count = drafts.len(),
        "Persisting generated tasks"
    );

    let mut tasks = Vec::with_capacity(drafts.len());
    for draft in drafts {
        let task = Task::create(&state.db, auth.user_id, draft).await?;
        tasks.push(task);
    }

    Ok((
        StatusCode::CREATED,
        Json(GenerateTasksResponse {
            success: true,
            tasks,
        }),
    ))
}

/// Generates free-form content from a prompt
///
/// The reply is returned verbatim; nothing is persisted.
///
/// # Errors
///
/// - `400 Bad Request`: Missing or blank prompt
/// - `500 Internal Server Error`: Upstream model failure
pub async fn generate_content(
    State(state): State<AppState>,
    Json(req): Json<GenerateRequest>,
) -> ApiResult<Json<GenerateContentResponse>> {
    let prompt = req.prompt.trim();
    if prompt.is_empty() {
        return Err(ApiError::Validation("Prompt is required".to_string()));
    }

    let content = state.generator.generate_content(prompt).await?;

    Ok(Json(GenerateContentResponse {
        success: true,
        content,
    }))
}
