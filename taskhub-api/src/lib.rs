//! # TaskHub API Server Library
//!
//! Core functionality for the TaskHub API server: an owner-scoped task
//! manager, a public book catalog, and an AI task-generation endpoint
//! backed by a hosted generative-language model.
//!
//! ## Modules
//!
//! - `app`: Application state and router builder
//! - `config`: Configuration management
//! - `error`: Error handling and HTTP response mapping
//! - `extract`: Request extractors aligned with the error contract
//! - `routes`: API route handlers
//! - `ai`: Prompt construction, model client, and response parsing

pub mod ai;
pub mod app;
pub mod config;
pub mod error;
pub mod extract;
pub mod routes;
