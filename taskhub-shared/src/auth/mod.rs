/// Authentication primitives for TaskHub
///
/// - `jwt`: bearer token creation and validation (HS256)
/// - `password`: Argon2id hashing and verification
/// - `middleware`: axum middleware that resolves a bearer token to an
///   [`middleware::AuthContext`] carried in request extensions

pub mod jwt;
pub mod middleware;
pub mod password;
