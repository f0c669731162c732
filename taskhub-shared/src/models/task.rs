/// Task model and database operations
///
/// Tasks are the core entity of TaskHub. Every task has exactly one owner,
/// and every read/update/delete filters on `(id, owner_id)` in a single
/// statement: a task owned by someone else is indistinguishable from a task
/// that does not exist. This both prevents existence leakage and makes the
/// ownership check and the mutation atomic (no check-then-act race).
///
/// # Schema
///
/// ```sql
/// CREATE TYPE task_priority AS ENUM ('low', 'medium', 'high');
///
/// CREATE TABLE tasks (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     owner_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     title TEXT NOT NULL,
///     description TEXT NOT NULL DEFAULT '',
///     priority task_priority NOT NULL DEFAULT 'medium',
///     completed BOOLEAN NOT NULL DEFAULT FALSE,
///     due_date TIMESTAMPTZ,
///     estimated_time TEXT NOT NULL DEFAULT '',
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use taskhub_shared::models::task::{Task, CreateTask, Priority};
/// use sqlx::PgPool;
/// use uuid::Uuid;
///
/// # async fn example(pool: PgPool, owner: Uuid) -> Result<(), Box<dyn std::error::Error>> {
/// let task = Task::create(&pool, owner, CreateTask {
///     title: "Buy milk".to_string(),
///     ..Default::default()
/// }).await?;
///
/// assert_eq!(task.priority, Priority::Medium);
/// assert!(!task.completed);
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Error type for task repository operations
#[derive(Debug, thiserror::Error)]
pub enum TaskError {
    /// Title missing or blank after trimming
    #[error("Title is required")]
    BlankTitle,

    /// Underlying database failure
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Task priority level
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "task_priority", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Can be delayed if needed
    Low,

    /// Important but flexible (the default)
    #[default]
    Medium,

    /// Urgent or on the critical path
    High,
}

impl Priority {
    /// Priority as its wire/database string
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

/// Task record
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique task ID
    pub id: Uuid,

    /// Owning user. Immutable after creation.
    #[serde(rename = "owner")]
    pub owner_id: Uuid,

    /// Task title (non-empty)
    pub title: String,

    /// Free-form description
    pub description: String,

    /// Priority level
    pub priority: Priority,

    /// Whether the task is done
    pub completed: bool,

    /// Optional due date
    pub due_date: Option<DateTime<Utc>>,

    /// Free-form time estimate (e.g. "30 min")
    pub estimated_time: String,

    /// When the task was created. Immutable.
    pub created_at: DateTime<Utc>,
}

/// Draft for creating a new task
///
/// Submitted directly by a caller or produced by the AI generation adapter.
/// All fields except `title` carry the defaults from the schema.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTask {
    /// Task title (required, must be non-blank)
    pub title: String,

    /// Description (defaults to empty)
    #[serde(default)]
    pub description: String,

    /// Priority (defaults to medium)
    #[serde(default)]
    pub priority: Priority,

    /// Optional due date
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,

    /// Time estimate (defaults to empty)
    #[serde(default)]
    pub estimated_time: String,
}

impl CreateTask {
    /// Trims string fields and validates the title
    ///
    /// # Errors
    ///
    /// Returns `TaskError::BlankTitle` when the title is empty or
    /// whitespace-only after trimming.
    pub fn normalized(self) -> Result<Self, TaskError> {
        let title = self.title.trim().to_string();
        if title.is_empty() {
            return Err(TaskError::BlankTitle);
        }

        Ok(Self {
            title,
            description: self.description.trim().to_string(),
            estimated_time: self.estimated_time.trim().to_string(),
            ..self
        })
    }
}

/// Patch for partial task updates
///
/// Only fields present in the request are applied. Absent fields are left
/// untouched, which is why every field is `Option`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTask {
    /// New title
    pub title: Option<String>,

    /// New description
    pub description: Option<String>,

    /// New completion state
    pub completed: Option<bool>,

    /// New priority
    pub priority: Option<Priority>,

    /// New due date (Some(None) clears it)
    #[serde(default, with = "double_option")]
    pub due_date: Option<Option<DateTime<Utc>>>,

    /// New time estimate
    pub estimated_time: Option<String>,
}

impl UpdateTask {
    /// True when the patch carries no fields at all
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.completed.is_none()
            && self.priority.is_none()
            && self.due_date.is_none()
            && self.estimated_time.is_none()
    }
}

/// Serde helper distinguishing "field absent" from "field null".
///
/// `{"dueDate": null}` clears the due date; omitting the key leaves it
/// unchanged.
mod double_option {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<T, S>(value: &Option<Option<T>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        T: Serialize,
        S: Serializer,
    {
        match value {
            Some(inner) => inner.serialize(serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
    where
        T: Deserialize<'de>,
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(deserializer).map(Some)
    }
}

impl Task {
    /// Creates a new task owned by `owner_id`
    ///
    /// String fields are trimmed and defaults applied before insertion.
    ///
    /// # Errors
    ///
    /// Returns `TaskError::BlankTitle` when the title is missing or blank,
    /// or `TaskError::Database` on storage failure.
    pub async fn create(
        pool: &PgPool,
        owner_id: Uuid,
        draft: CreateTask,
    ) -> Result<Self, TaskError> {
        let draft = draft.normalized()?;

        let task = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (owner_id, title, description, priority, due_date, estimated_time)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, owner_id, title, description, priority, completed,
                      due_date, estimated_time, created_at
            "#,
        )
        .bind(owner_id)
        .bind(draft.title)
        .bind(draft.description)
        .bind(draft.priority)
        .bind(draft.due_date)
        .bind(draft.estimated_time)
        .fetch_one(pool)
        .await?;

        Ok(task)
    }

    /// Lists all tasks owned by `owner_id`, newest first
    pub async fn list_by_owner(pool: &PgPool, owner_id: Uuid) -> Result<Vec<Self>, sqlx::Error> {
        let tasks = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, owner_id, title, description, priority, completed,
                   due_date, estimated_time, created_at
            FROM tasks
            WHERE owner_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(owner_id)
        .fetch_all(pool)
        .await?;

        Ok(tasks)
    }

    /// Finds a task by `(id, owner_id)`
    ///
    /// Returns `None` both when the task is absent and when it exists but
    /// belongs to another user.
    pub async fn find_by_id_and_owner(
        pool: &PgPool,
        id: Uuid,
        owner_id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, owner_id, title, description, priority, completed,
                   due_date, estimated_time, created_at
            FROM tasks
            WHERE id = $1 AND owner_id = $2
            "#,
        )
        .bind(id)
        .bind(owner_id)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Applies a partial update to a task owned by `owner_id`
    ///
    /// Builds a single dynamic UPDATE keyed on `(id, owner_id)` so the
    /// ownership check and the mutation happen atomically. Only fields
    /// present in the patch are written; the update is idempotent.
    ///
    /// # Returns
    ///
    /// `None` when no task matches `(id, owner_id)` — the caller maps this
    /// to 404 regardless of whether the task exists under another owner.
    pub async fn update(
        pool: &PgPool,
        owner_id: Uuid,
        id: Uuid,
        patch: UpdateTask,
    ) -> Result<Option<Self>, TaskError> {
        // An empty patch is a no-op read with the same ownership semantics.
        if patch.is_empty() {
            return Ok(Self::find_by_id_and_owner(pool, id, owner_id).await?);
        }

        let title = match patch.title {
            Some(t) => {
                let t = t.trim().to_string();
                if t.is_empty() {
                    return Err(TaskError::BlankTitle);
                }
                Some(t)
            }
            None => None,
        };

        let mut sets = Vec::new();
        let mut bind_count = 2;

        for (present, column) in [
            (title.is_some(), "title"),
            (patch.description.is_some(), "description"),
            (patch.completed.is_some(), "completed"),
            (patch.priority.is_some(), "priority"),
            (patch.due_date.is_some(), "due_date"),
            (patch.estimated_time.is_some(), "estimated_time"),
        ] {
            if present {
                bind_count += 1;
                sets.push(format!("{} = ${}", column, bind_count));
            }
        }

        let query = format!(
            "UPDATE tasks SET {} WHERE id = $1 AND owner_id = $2 \
             RETURNING id, owner_id, title, description, priority, completed, \
             due_date, estimated_time, created_at",
            sets.join(", "),
        );

        let mut q = sqlx::query_as::<_, Task>(&query).bind(id).bind(owner_id);

        if let Some(title) = title {
            q = q.bind(title);
        }
        if let Some(description) = patch.description {
            q = q.bind(description.trim().to_string());
        }
        if let Some(completed) = patch.completed {
            q = q.bind(completed);
        }
        if let Some(priority) = patch.priority {
            q = q.bind(priority);
        }
        if let Some(due_date) = patch.due_date {
            q = q.bind(due_date);
        }
        if let Some(estimated_time) = patch.estimated_time {
            q = q.bind(estimated_time.trim().to_string());
        }

        let task = q.fetch_optional(pool).await?;

        Ok(task)
    }

    /// Deletes a task owned by `owner_id`
    ///
    /// Single atomic DELETE keyed on `(id, owner_id)`.
    ///
    /// # Returns
    ///
    /// `true` when a row was removed, `false` when nothing matched.
    pub async fn delete(pool: &PgPool, owner_id: Uuid, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
