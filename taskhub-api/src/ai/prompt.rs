/// Prompt construction and reply parsing
///
/// The model is instructed to answer with nothing but a JSON array, but
/// in practice replies arrive wrapped in prose or markdown fences.
/// Extraction takes the widest array-shaped substring (first `[` to last
/// `]`) and parses that.

use serde::Deserialize;

use taskhub_shared::models::task::{CreateTask, Priority};

use crate::ai::GenerationError;

/// Builds the task-generation instruction around the user's input
pub fn build_prompt(user_input: &str) -> String {
    format!(
        r#"You are a productivity assistant specialized in creating actionable, well-structured tasks.
First, analyze the complexity and scope of the given input to determine the appropriate number of tasks:
- For very simple, single-action goals (e.g., 'buy milk', 'email John'): 1-2 tasks
- For medium complexity projects (e.g., 'plan weekend trip'): 3-5 tasks
- For complex projects or long-term goals (e.g., 'launch new product'): 6-10 tasks

Consider these factors when breaking down the input:
- Dependencies between tasks (what needs to be done first)
- Natural phases or stages of the project
- Level of detail needed for each task
- Whether subtasks might be needed
- Time frame and urgency

USER INPUT: {user_input}

Return your response ONLY as a JSON array of tasks with no additional text. Each task must include:
- title: Clear, concise task title (max 10 words)
- description: Detailed explanation including any dependencies or important considerations
- priority: "high" (urgent/critical path), "medium" (important but flexible), or "low" (can be delayed if needed)
- estimatedTime: Realistic time estimate (e.g., "30 min", "2 hours", "1 day")

FORMAT EXAMPLE:
[
  {{
    "title": "Task title here",
    "description": "Task description here",
    "priority": "medium",
    "estimatedTime": "1 hour"
  }},
  {{
    "title": "Another task",
    "description": "Another description",
    "priority": "high",
    "estimatedTime": "45 min"
  }}
]"#
    )
}

/// One task as emitted by the model
///
/// Only `title` is required; everything else falls back to the same
/// defaults a caller-supplied draft would get.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeneratedTask {
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    priority: Priority,
    #[serde(default)]
    estimated_time: String,
}

/// Extracts the widest array-shaped substring from reply text
pub fn extract_json_array(text: &str) -> Option<&str> {
    let start = text.find('[')?;
    let end = text.rfind(']')?;
    if end < start {
        return None;
    }
    Some(&text[start..=end])
}

/// Parses a model reply into an ordered batch of task drafts
///
/// # Errors
///
/// Returns [`GenerationError::MissingArray`] when no array-shaped
/// substring exists, or [`GenerationError::Parse`] when the substring is
/// not valid JSON for a list of tasks.
pub fn parse_drafts(reply: &str) -> Result<Vec<CreateTask>, GenerationError> {
    let json = extract_json_array(reply).ok_or(GenerationError::MissingArray)?;

    let generated: Vec<GeneratedTask> =
        serde_json::from_str(json).map_err(|e| GenerationError::Parse(e.to_string()))?;

    Ok(generated
        .into_iter()
        .map(|task| CreateTask {
            title: task.title,
            description: task.description,
            priority: task.priority,
            due_date: None,
            estimated_time: task.estimated_time,
        })
        .collect())
}
