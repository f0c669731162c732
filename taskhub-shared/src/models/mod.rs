/// Database models for TaskHub
///
/// This module contains all database models and their CRUD operations.
///
/// # Models
///
/// - `user`: User accounts (identity for task ownership)
/// - `task`: Owner-scoped todo records
/// - `book`: Public book catalog (intentionally not owner-scoped)

pub mod book;
pub mod task;
pub mod user;
