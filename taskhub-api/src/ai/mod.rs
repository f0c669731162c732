/// AI task generation
///
/// Turns a caller's free-text goal into a batch of task drafts by calling
/// a hosted generative-language model and parsing its reply. The pipeline
/// is one best-effort call per request: no retries, no caching, no rate
/// limiting.
///
/// - `client`: the [`TextGenerator`] trait, the Gemini HTTP client, and a
///   mock generator for tests
/// - `prompt`: instruction template, JSON-array extraction, and draft
///   parsing
///
/// # Flow
///
/// ```text
/// free text ─> build_prompt ─> TextGenerator::generate ─> raw reply
///           ─> extract_json_array ─> parse_drafts ─> Vec<CreateTask>
/// ```
///
/// Every failure along the way (transport, timeout, no array-shaped
/// substring, malformed JSON) surfaces as a [`GenerationError`]; nothing
/// is persisted on failure.

pub mod client;
pub mod prompt;

pub use client::{GeminiClient, MockGenerator, TextGenerator};

use std::sync::Arc;

use taskhub_shared::models::task::CreateTask;

/// Error type for AI generation
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    /// The upstream call failed or timed out
    #[error("Model request failed: {0}")]
    Request(String),

    /// The upstream answered with a non-success status
    #[error("Model endpoint returned {status}: {body}")]
    Upstream {
        /// HTTP status code
        status: u16,

        /// Response body (truncated upstream message)
        body: String,
    },

    /// The reply contained no text candidates
    #[error("Model response contained no text")]
    EmptyResponse,

    /// The reply text contained no JSON-array-shaped substring
    #[error("Failed to locate a JSON array in the model response")]
    MissingArray,

    /// The array substring failed to parse as task drafts
    #[error("Failed to parse model response: {0}")]
    Parse(String),
}

/// AI task-generation service
///
/// Wraps a [`TextGenerator`] with prompt construction and reply parsing.
/// Cheap to clone; handlers hold it in application state.
#[derive(Clone)]
pub struct TaskGenerator {
    client: Arc<dyn TextGenerator>,
}

impl TaskGenerator {
    /// Creates a generator backed by the given client
    pub fn new(client: Arc<dyn TextGenerator>) -> Self {
        Self { client }
    }

    /// Generates an ordered batch of task drafts from free text
    ///
    /// The drafts preserve the model's emission order. Persistence is the
    /// caller's job; this method touches no storage.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError`] when the upstream call fails, times
    /// out, or the reply cannot be parsed into drafts.
    pub async fn generate_tasks(&self, user_input: &str) -> Result<Vec<CreateTask>, GenerationError> {
        let prompt = prompt::build_prompt(user_input);
        let reply = self.client.generate(&prompt).await?;
        prompt::parse_drafts(&reply)
    }

    /// Generates free-form content from a prompt, unparsed
    pub async fn generate_content(&self, user_input: &str) -> Result<String, GenerationError> {
        self.client.generate(user_input).await
    }
}
