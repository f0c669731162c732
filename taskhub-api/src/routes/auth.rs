/// Authentication endpoints
///
/// This module provides user authentication endpoints:
/// - Registration
/// - Login
/// - Current-user lookup
///
/// # Endpoints
///
/// - `POST /auth/register` - Register a new user, returns a token
/// - `POST /auth/login` - Login and get a token
/// - `GET /auth/me` - Return the authenticated user

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    extract::Json,
};
use axum::{extract::State, http::StatusCode, Extension};
use serde::{Deserialize, Serialize};
use taskhub_shared::{
    auth::{
        jwt::{create_token, Claims},
        middleware::AuthContext,
        password,
    },
    models::user::{CreateUser, User},
};
use validator::Validate;

/// Register request
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Email address
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Password (validated for minimum strength)
    pub password: String,
}

/// Login request
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// Email address
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Password
    pub password: String,
}

/// Token response, shared by register and login
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    /// Signed bearer token
    pub token: String,

    /// The authenticated user
    pub user: User,
}

/// Current-user response
#[derive(Debug, Serialize)]
pub struct MeResponse {
    /// The authenticated user
    pub user: User,
}

/// Registers a new user
///
/// # Endpoint
///
/// ```text
/// POST /auth/register
/// Content-Type: application/json
///
/// {
///   "email": "user@example.com",
///   "password": "SecureP@ss123"
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Invalid email or weak password
/// - `409 Conflict`: Email already registered
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<TokenResponse>)> {
    req.validate()
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    password::validate_password_strength(&req.password).map_err(ApiError::Validation)?;

    let password_hash = password::hash_password(&req.password)?;
    let user = User::create(
        &state.db,
        CreateUser {
            email: req.email,
            password_hash,
        },
    )
    .await?;

    let token = create_token(&Claims::new(user.id), state.jwt_secret())?;

    tracing::info!(user_id = %user.id, "User registered");

    Ok((StatusCode::CREATED, Json(TokenResponse { token, user })))
}

/// Authenticates a user and issues a token
///
/// A missing account and a wrong password produce the same response, so
/// the endpoint cannot be used to probe which emails are registered.
///
/// # Errors
///
/// - `401 Unauthorized`: Unknown email or wrong password
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<TokenResponse>> {
    req.validate()
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    let user = User::find_by_email(&state.db, &req.email)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Invalid credentials".to_string()))?;

    let valid = password::verify_password(&req.password, &user.password_hash)?;
    if !valid {
        return Err(ApiError::Unauthorized("Invalid credentials".to_string()));
    }

    let token = create_token(&Claims::new(user.id), state.jwt_secret())?;

    tracing::info!(user_id = %user.id, "User logged in");

    Ok(Json(TokenResponse { token, user }))
}

/// Returns the authenticated user
///
/// # Errors
///
/// - `401 Unauthorized`: Missing or invalid token
/// - `404 Not Found`: Token subject no longer exists
pub async fn me(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<MeResponse>> {
    let user = User::find_by_id(&state.db, auth.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    Ok(Json(MeResponse { user }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_request_rejects_bad_email() {
        let req = RegisterRequest {
            email: "not-an-email".to_string(),
            password: "long-enough-password".to_string(),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_register_request_accepts_valid_input() {
        let req = RegisterRequest {
            email: "user@example.com".to_string(),
            password: "long-enough-password".to_string(),
        };
        assert!(req.validate().is_ok());
    }
}
