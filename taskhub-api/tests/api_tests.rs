/// Integration tests for the TaskHub API
///
/// Tests that need no storage run against a router with a lazy pool and
/// a scripted generator. Tests marked `#[ignore]` need a running
/// Postgres reachable via DATABASE_URL:
///
/// ```bash
/// cargo test -p taskhub-api -- --ignored
/// ```

mod common;

use axum::http::StatusCode;
use common::{send_json, test_app, token_for, TestContext};
use serde_json::json;
use taskhub_api::ai::MockGenerator;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Routing, auth rejection, and validation (no database)
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_tasks_require_token() {
    let mut app = test_app(MockGenerator::replying("[]"));

    let (status, body) = send_json(&mut app, "GET", "/tasks", None, None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "No token, authorization denied");
}

#[tokio::test]
async fn test_tasks_reject_garbage_token() {
    let mut app = test_app(MockGenerator::replying("[]"));

    let (status, body) =
        send_json(&mut app, "GET", "/tasks", Some("not-a-real-token"), None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Token is not valid");
}

#[tokio::test]
async fn test_ai_routes_require_token() {
    let mut app = test_app(MockGenerator::replying("[]"));

    let (status, _) = send_json(
        &mut app,
        "POST",
        "/ai/generate-tasks",
        None,
        Some(json!({"prompt": "anything"})),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_generate_tasks_rejects_blank_prompt() {
    let mut app = test_app(MockGenerator::replying("[]"));
    let token = token_for(Uuid::new_v4());

    let (status, body) = send_json(
        &mut app,
        "POST",
        "/ai/generate-tasks",
        Some(&token),
        Some(json!({"prompt": "   "})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Prompt is required");
}

#[tokio::test]
async fn test_generate_tasks_rejects_missing_prompt() {
    let mut app = test_app(MockGenerator::replying("[]"));
    let token = token_for(Uuid::new_v4());

    let (status, body) = send_json(
        &mut app,
        "POST",
        "/ai/generate-tasks",
        Some(&token),
        Some(json!({})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Prompt is required");
}

#[tokio::test]
async fn test_generate_content_returns_reply() {
    let mut app = test_app(MockGenerator::replying("Here is some advice."));
    let token = token_for(Uuid::new_v4());

    let (status, body) = send_json(
        &mut app,
        "POST",
        "/ai/generate-content",
        Some(&token),
        Some(json!({"prompt": "give me advice"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["content"], "Here is some advice.");
}

#[tokio::test]
async fn test_generate_tasks_upstream_failure_shape() {
    let mut app = test_app(MockGenerator::failing());
    let token = token_for(Uuid::new_v4());

    let (status, body) = send_json(
        &mut app,
        "POST",
        "/ai/generate-tasks",
        Some(&token),
        Some(json!({"prompt": "plan my week"})),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "Failed to generate tasks");
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_register_rejects_invalid_email() {
    let mut app = test_app(MockGenerator::replying("[]"));

    let (status, _) = send_json(
        &mut app,
        "POST",
        "/auth/register",
        None,
        Some(json!({"email": "not-an-email", "password": "long-enough-password"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_register_rejects_short_password() {
    let mut app = test_app(MockGenerator::replying("[]"));

    let (status, _) = send_json(
        &mut app,
        "POST",
        "/auth/register",
        None,
        Some(json!({"email": "user@example.com", "password": "short"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_task_missing_title_is_json_400() {
    let mut app = test_app(MockGenerator::replying("[]"));
    let token = token_for(Uuid::new_v4());

    let (status, body) = send_json(&mut app, "POST", "/tasks", Some(&token), Some(json!({}))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn test_update_task_unknown_priority_is_json_400() {
    let mut app = test_app(MockGenerator::replying("[]"));
    let token = token_for(Uuid::new_v4());

    let (status, body) = send_json(
        &mut app,
        "PUT",
        &format!("/tasks/{}", Uuid::new_v4()),
        Some(&token),
        Some(json!({"priority": "urgent"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn test_create_book_missing_fields_is_json_400() {
    let mut app = test_app(MockGenerator::replying("[]"));

    let (status, body) = send_json(
        &mut app,
        "POST",
        "/books",
        None,
        Some(json!({"title": "No author or price"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn test_malformed_json_body_is_json_400() {
    use axum::body::Body;
    use axum::http::Request;
    use tower::Service as _;

    let mut app = test_app(MockGenerator::replying("[]"));
    let token = token_for(Uuid::new_v4());

    let request = Request::builder()
        .method("POST")
        .uri("/tasks")
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {}", token))
        .body(Body::from("{not json"))
        .unwrap();

    let response = app.call(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn test_health_is_public() {
    let mut app = test_app(MockGenerator::replying("[]"));

    // The lazy pool never connects, so health reports degraded but
    // still answers without a token.
    let (status, body) = send_json(&mut app, "GET", "/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["database"], "disconnected");
}

// ---------------------------------------------------------------------------
// Full stack against Postgres
// ---------------------------------------------------------------------------

#[tokio::test]
#[ignore = "requires a running Postgres via DATABASE_URL"]
async fn test_register_login_me_flow() {
    let ctx = TestContext::new().await.unwrap();
    let mut app = ctx.app.clone();

    let email = format!("flow-{}@example.com", Uuid::new_v4());
    let (status, body) = send_json(
        &mut app,
        "POST",
        "/auth/register",
        None,
        Some(json!({"email": email, "password": "a-decent-password"})),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert!(body["token"].is_string());
    assert_eq!(body["user"]["email"], email);
    assert!(body["user"].get("passwordHash").is_none());
    assert!(body["user"].get("password_hash").is_none());

    let (status, body) = send_json(
        &mut app,
        "POST",
        "/auth/login",
        None,
        Some(json!({"email": email, "password": "a-decent-password"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let token = body["token"].as_str().unwrap().to_string();

    let (status, body) = send_json(&mut app, "GET", "/auth/me", Some(&token), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["email"], email);

    // Wrong password looks identical to an unknown account
    let (status, _) = send_json(
        &mut app,
        "POST",
        "/auth/login",
        None,
        Some(json!({"email": email, "password": "wrong-password-here"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    ctx.cleanup().await.unwrap();
}

#[tokio::test]
#[ignore = "requires a running Postgres via DATABASE_URL"]
async fn test_task_crud_lifecycle() {
    let ctx = TestContext::new().await.unwrap();
    let mut app = ctx.app.clone();
    let token = ctx.jwt_token.clone();

    // Create with defaults
    let (status, body) = send_json(
        &mut app,
        "POST",
        "/tasks",
        Some(&token),
        Some(json!({"title": "  Buy milk  "})),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["task"]["title"], "Buy milk");
    assert_eq!(body["task"]["priority"], "medium");
    assert_eq!(body["task"]["completed"], false);
    assert_eq!(body["task"]["owner"], ctx.user.id.to_string());
    let task_id = body["task"]["id"].as_str().unwrap().to_string();

    // Blank title is rejected
    let (status, _) = send_json(
        &mut app,
        "POST",
        "/tasks",
        Some(&token),
        Some(json!({"title": "   "})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Listing shows the task
    let (status, body) = send_json(&mut app, "GET", "/tasks", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["tasks"]
        .as_array()
        .unwrap()
        .iter()
        .any(|t| t["id"] == task_id.as_str()));

    // Partial update leaves absent fields alone
    let (status, body) = send_json(
        &mut app,
        "PUT",
        &format!("/tasks/{}", task_id),
        Some(&token),
        Some(json!({"completed": true})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["task"]["completed"], true);
    assert_eq!(body["task"]["title"], "Buy milk");

    // The same patch applied again is idempotent
    let first = body;
    let (status, second) = send_json(
        &mut app,
        "PUT",
        &format!("/tasks/{}", task_id),
        Some(&token),
        Some(json!({"completed": true})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(second, first);

    // Delete, then delete again
    let (status, body) = send_json(
        &mut app,
        "DELETE",
        &format!("/tasks/{}", task_id),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Task deleted");

    let (status, _) = send_json(
        &mut app,
        "DELETE",
        &format!("/tasks/{}", task_id),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    ctx.cleanup().await.unwrap();
}

#[tokio::test]
#[ignore = "requires a running Postgres via DATABASE_URL"]
async fn test_tasks_are_owner_scoped() {
    let ctx = TestContext::new().await.unwrap();
    let mut app = ctx.app.clone();
    let (other_user, other_token) = ctx.second_user().await.unwrap();

    let (_, body) = send_json(
        &mut app,
        "POST",
        "/tasks",
        Some(&ctx.jwt_token),
        Some(json!({"title": "private task"})),
    )
    .await;
    let task_id = body["task"]["id"].as_str().unwrap().to_string();

    // The other user cannot see it
    let (status, body) = send_json(&mut app, "GET", "/tasks", Some(&other_token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["tasks"]
        .as_array()
        .unwrap()
        .iter()
        .all(|t| t["id"] != task_id.as_str()));

    // Update and delete by the other user are indistinguishable from a
    // missing task
    let (status, _) = send_json(
        &mut app,
        "PUT",
        &format!("/tasks/{}", task_id),
        Some(&other_token),
        Some(json!({"title": "hijacked"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send_json(
        &mut app,
        "DELETE",
        &format!("/tasks/{}", task_id),
        Some(&other_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // The owner still has it, untouched
    let (status, body) = send_json(
        &mut app,
        "PUT",
        &format!("/tasks/{}", task_id),
        Some(&ctx.jwt_token),
        Some(json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["task"]["title"], "private task");

    sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(other_user.id)
        .execute(&ctx.db)
        .await
        .unwrap();
    ctx.cleanup().await.unwrap();
}

#[tokio::test]
#[ignore = "requires a running Postgres via DATABASE_URL"]
async fn test_generate_tasks_persists_in_order() {
    let reply = r#"[
        {"title": "Research destinations", "priority": "high", "estimatedTime": "2 hours"},
        {"title": "Book flights", "priority": "medium"},
        {"title": "Pack bags", "priority": "low"}
    ]"#;
    let ctx = TestContext::with_generator(MockGenerator::replying(reply))
        .await
        .unwrap();
    let mut app = ctx.app.clone();

    let (status, body) = send_json(
        &mut app,
        "POST",
        "/ai/generate-tasks",
        Some(&ctx.jwt_token),
        Some(json!({"prompt": "plan a trip"})),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);

    let tasks = body["tasks"].as_array().unwrap();
    let titles: Vec<_> = tasks.iter().map(|t| t["title"].as_str().unwrap()).collect();
    assert_eq!(
        titles,
        vec!["Research destinations", "Book flights", "Pack bags"]
    );

    // Every generated task is owned by the caller and persisted
    for task in tasks {
        assert_eq!(task["owner"], ctx.user.id.to_string());
        assert!(task["id"].is_string());
    }

    let (_, body) = send_json(&mut app, "GET", "/tasks", Some(&ctx.jwt_token), None).await;
    assert_eq!(body["tasks"].as_array().unwrap().len(), 3);

    ctx.cleanup().await.unwrap();
}

#[tokio::test]
#[ignore = "requires a running Postgres via DATABASE_URL"]
async fn test_book_catalog_is_public() {
    let ctx = TestContext::new().await.unwrap();
    let mut app = ctx.app.clone();

    // No token anywhere in this test
    let (status, body) = send_json(
        &mut app,
        "POST",
        "/books",
        None,
        Some(json!({
            "title": "Systems Programming",
            "author": "A. Writer",
            "price": 42.50,
            "category": "Programming"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["book"]["inStock"], true);
    assert_eq!(body["book"]["coverImage"], "");
    let book_id = body["book"]["id"].as_str().unwrap().to_string();

    let (status, body) = send_json(&mut app, "GET", &format!("/books/{}", book_id), None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["book"]["title"], "Systems Programming");

    // Negative price patch is rejected
    let (status, _) = send_json(
        &mut app,
        "PATCH",
        &format!("/books/{}", book_id),
        None,
        Some(json!({"price": -1.0})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send_json(
        &mut app,
        "PATCH",
        &format!("/books/{}", book_id),
        None,
        Some(json!({"inStock": false})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["book"]["inStock"], false);

    let (status, body) = send_json(
        &mut app,
        "DELETE",
        &format!("/books/{}", book_id),
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Book deleted");

    let (status, _) = send_json(&mut app, "GET", &format!("/books/{}", book_id), None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
