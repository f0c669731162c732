/// API route handlers
///
/// Each submodule owns one resource group:
///
/// - `health`: Liveness and database connectivity check
/// - `auth`: Registration, login, and current-user lookup
/// - `tasks`: Owner-scoped task CRUD
/// - `books`: Public book catalog CRUD
/// - `ai`: AI-backed task and content generation

pub mod ai;
pub mod auth;
pub mod books;
pub mod health;
pub mod tasks;
