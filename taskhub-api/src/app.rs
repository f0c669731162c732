/// Application state and router builder
///
/// This module defines the shared application state and provides
/// a function to build the Axum router with all routes and middleware.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use taskhub_api::{ai::{GeminiClient, TaskGenerator}, app::AppState, config::Config};
/// use sqlx::PgPool;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = PgPool::connect(&config.database.url).await?;
/// let generator = TaskGenerator::new(Arc::new(GeminiClient::new(&config.ai)?));
/// let state = AppState::new(pool, config, generator);
/// let app = taskhub_api::app::build_router(state);
/// # Ok(())
/// # }
/// ```

use axum::{
    extract::Request,
    middleware::Next,
    response::Response,
    routing::{delete, get, patch, post, put},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use taskhub_shared::auth::middleware::bearer_auth_middleware;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::{ai::TaskGenerator, config::Config};

/// Shared application state
///
/// This is cloned for each request handler via Axum's `State` extractor.
/// Uses Arc internally for cheap cloning.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,

    /// Application configuration
    pub config: Arc<Config>,

    /// AI task-generation service
    pub generator: TaskGenerator,
}

impl AppState {
    /// Creates new application state
    pub fn new(db: PgPool, config: Config, generator: TaskGenerator) -> Self {
        Self {
            db,
            config: Arc::new(config),
            generator,
        }
    }

    /// Gets JWT secret for token operations
    pub fn jwt_secret(&self) -> &str {
        &self.config.jwt.secret
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// ```text
/// /
/// ├── /health                       # Health check (public)
/// ├── /auth/
/// │   ├── POST /register            # Public
/// │   ├── POST /login               # Public
/// │   └── GET  /me                  # Authenticated
/// ├── /tasks/                       # Authenticated, owner-scoped
/// │   ├── GET    /
/// │   ├── POST   /
/// │   ├── PUT    /:id
/// │   └── DELETE /:id
/// ├── /ai/                          # Authenticated
/// │   ├── POST /generate-tasks
/// │   └── POST /generate-content
/// └── /books/                       # Public catalog, no auth
///     ├── GET    /
///     ├── POST   /
///     ├── GET    /:id
///     ├── PATCH  /:id
///     └── DELETE /:id
/// ```
///
/// # Middleware Stack
///
/// Applied in order (bottom to top):
/// 1. Logging (tower-http TraceLayer)
/// 2. CORS (permissive; browser clients run on other origins)
/// 3. Bearer authentication (per-route-group)
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    // Health check (public, no auth)
    let health_routes = Router::new().route("/health", get(routes::health::health_check));

    // Register and login are public; /me requires a token
    let auth_routes = Router::new()
        .route("/register", post(routes::auth::register))
        .route("/login", post(routes::auth::login))
        .route(
            "/me",
            get(routes::auth::me).layer(axum::middleware::from_fn_with_state(
                state.clone(),
                jwt_auth_layer,
            )),
        );

    // Task routes (require authentication, scoped to the caller)
    let task_routes = Router::new()
        .route("/", get(routes::tasks::list_tasks))
        .route("/", post(routes::tasks::create_task))
        .route("/:id", put(routes::tasks::update_task))
        .route("/:id", delete(routes::tasks::delete_task))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            jwt_auth_layer,
        ));

    // AI routes (require authentication)
    let ai_routes = Router::new()
        .route("/generate-tasks", post(routes::ai::generate_tasks))
        .route("/generate-content", post(routes::ai::generate_content))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            jwt_auth_layer,
        ));

    // Book catalog (public by design, no auth on any verb)
    let book_routes = Router::new()
        .route("/", get(routes::books::list_books))
        .route("/", post(routes::books::create_book))
        .route("/:id", get(routes::books::get_book))
        .route("/:id", patch(routes::books::update_book))
        .route("/:id", delete(routes::books::delete_book));

    Router::new()
        .merge(health_routes)
        .nest("/auth", auth_routes)
        .nest("/tasks", task_routes)
        .nest("/ai", ai_routes)
        .nest("/books", book_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// JWT authentication middleware layer
///
/// Thin adapter over the shared bearer middleware that supplies the
/// configured signing secret from state.
async fn jwt_auth_layer(
    state: axum::extract::State<AppState>,
    req: Request,
    next: Next,
) -> Response {
    use axum::response::IntoResponse;

    match bearer_auth_middleware(state.jwt_secret().to_string(), req, next).await {
        Ok(response) => response,
        Err(err) => err.into_response(),
    }
}
