//! # TaskHub Shared Library
//!
//! Types and business logic shared between the TaskHub API server and its
//! auxiliary binaries.
//!
//! ## Module Organization
//!
//! - `models`: Database models and their SQL operations
//! - `auth`: JWT tokens, password hashing, axum auth middleware
//! - `db`: Connection pool and migration helpers

pub mod auth;
pub mod db;
pub mod models;

/// Current version of the TaskHub shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
