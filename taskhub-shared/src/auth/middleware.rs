/// Authentication middleware for axum
///
/// Resolves the `Authorization: Bearer <token>` header to an [`AuthContext`]
/// stored in request extensions. Handlers extract it with axum's
/// `Extension` extractor and pass the user id explicitly into every
/// repository call; nothing downstream reads ambient auth state.
///
/// # Example
///
/// ```no_run
/// use axum::Extension;
/// use taskhub_shared::auth::middleware::AuthContext;
///
/// async fn handler(Extension(auth): Extension<AuthContext>) -> String {
///     format!("Hello, user {}!", auth.user_id)
/// }
/// ```

use axum::{
    extract::Request,
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use super::jwt::{validate_token, JwtError};

/// Caller identity resolved from a bearer token
///
/// This is the explicit identity parameter the repositories require; it is
/// never read from global state.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AuthContext {
    /// Authenticated user ID
    pub user_id: Uuid,
}

impl AuthContext {
    /// Creates an auth context from validated JWT claims
    pub fn from_claims(user_id: Uuid) -> Self {
        Self { user_id }
    }
}

/// Error type for the authentication middleware
#[derive(Debug)]
pub enum AuthError {
    /// Missing authorization header
    MissingCredentials,

    /// Header present but not a Bearer token
    InvalidFormat(String),

    /// Token validation failed
    InvalidToken(String),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AuthError::MissingCredentials => (
                StatusCode::UNAUTHORIZED,
                "No token, authorization denied".to_string(),
            ),
            AuthError::InvalidFormat(msg) => (StatusCode::UNAUTHORIZED, msg),
            AuthError::InvalidToken(msg) => (StatusCode::UNAUTHORIZED, msg),
        };

        (status, Json(json!({ "message": message }))).into_response()
    }
}

/// Bearer-token authentication middleware
///
/// On success, inserts an [`AuthContext`] into request extensions and calls
/// the next handler. All failures map to 401; a malformed header and an
/// invalid token are deliberately not distinguishable by status code.
pub async fn bearer_auth_middleware(
    secret: String,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AuthError::MissingCredentials)?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AuthError::InvalidFormat("Expected Bearer token".to_string()))?;

    let claims = validate_token(token, &secret).map_err(|e| match e {
        JwtError::Expired => AuthError::InvalidToken("Token expired".to_string()),
        _ => AuthError::InvalidToken("Token is not valid".to_string()),
    })?;

    req.extensions_mut()
        .insert(AuthContext::from_claims(claims.sub));

    Ok(next.run(req).await)
}
