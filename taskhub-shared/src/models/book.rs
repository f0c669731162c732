/// Book model and database operations
///
/// Books form a public catalog: there is no ownership scoping and no auth
/// on the book endpoints. That asymmetry with tasks is intentional (the
/// catalog is shared), so operations here key on `id` alone.
///
/// Negative prices are rejected with `BookError::NegativePrice` before any
/// write; the schema carries a matching CHECK constraint as a backstop.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE books (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     title TEXT NOT NULL,
///     author TEXT NOT NULL,
///     description TEXT NOT NULL DEFAULT '',
///     price DOUBLE PRECISION NOT NULL CHECK (price >= 0),
///     category TEXT NOT NULL,
///     in_stock BOOLEAN NOT NULL DEFAULT TRUE,
///     cover_image TEXT NOT NULL DEFAULT '',
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Categories suggested to catalog UIs. Not enforced server-side; any
/// category string is accepted.
pub const SUGGESTED_CATEGORIES: &[&str] = &[
    "Programming",
    "Database",
    "Fiction",
    "Non-Fiction",
    "Science",
    "Business",
];

/// Error type for book repository operations
#[derive(Debug, thiserror::Error)]
pub enum BookError {
    /// Price below zero
    #[error("Price must be non-negative")]
    NegativePrice,

    /// Required field missing or blank
    #[error("{0} is required")]
    MissingField(&'static str),

    /// Underlying database failure
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Book catalog record
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// Unique book ID
    pub id: Uuid,

    /// Book title
    pub title: String,

    /// Author name
    pub author: String,

    /// Free-form description
    pub description: String,

    /// Price, non-negative
    pub price: f64,

    /// Category (free string, see [`SUGGESTED_CATEGORIES`])
    pub category: String,

    /// Whether the book is currently in stock
    pub in_stock: bool,

    /// Cover image URL
    pub cover_image: String,

    /// When the record was created
    pub created_at: DateTime<Utc>,
}

/// Draft for creating a new book
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBook {
    /// Book title (required)
    pub title: String,

    /// Author name (required)
    pub author: String,

    /// Description (defaults to empty)
    #[serde(default)]
    pub description: String,

    /// Price (required, non-negative)
    pub price: f64,

    /// Category (required)
    pub category: String,

    /// Stock flag (defaults to true)
    #[serde(default = "default_in_stock")]
    pub in_stock: bool,

    /// Cover image URL (defaults to empty)
    #[serde(default)]
    pub cover_image: String,
}

fn default_in_stock() -> bool {
    true
}

impl CreateBook {
    /// Trims string fields and checks required fields and the price policy
    pub fn normalized(self) -> Result<Self, BookError> {
        let title = self.title.trim().to_string();
        if title.is_empty() {
            return Err(BookError::MissingField("title"));
        }
        let author = self.author.trim().to_string();
        if author.is_empty() {
            return Err(BookError::MissingField("author"));
        }
        let category = self.category.trim().to_string();
        if category.is_empty() {
            return Err(BookError::MissingField("category"));
        }
        if !(self.price >= 0.0) {
            return Err(BookError::NegativePrice);
        }

        Ok(Self {
            title,
            author,
            category,
            description: self.description.trim().to_string(),
            cover_image: self.cover_image.trim().to_string(),
            ..self
        })
    }
}

/// Patch for partial book updates
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBook {
    /// New title
    pub title: Option<String>,

    /// New author
    pub author: Option<String>,

    /// New description
    pub description: Option<String>,

    /// New price (non-negative)
    pub price: Option<f64>,

    /// New category
    pub category: Option<String>,

    /// New stock flag
    pub in_stock: Option<bool>,

    /// New cover image URL
    pub cover_image: Option<String>,
}

impl UpdateBook {
    /// True when the patch carries no fields
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.author.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.category.is_none()
            && self.in_stock.is_none()
            && self.cover_image.is_none()
    }
}

impl Book {
    /// Creates a new book
    pub async fn create(pool: &PgPool, draft: CreateBook) -> Result<Self, BookError> {
        let draft = draft.normalized()?;

        let book = sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (title, author, description, price, category, in_stock, cover_image)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, title, author, description, price, category, in_stock,
                      cover_image, created_at
            "#,
        )
        .bind(draft.title)
        .bind(draft.author)
        .bind(draft.description)
        .bind(draft.price)
        .bind(draft.category)
        .bind(draft.in_stock)
        .bind(draft.cover_image)
        .fetch_one(pool)
        .await?;

        Ok(book)
    }

    /// Lists the whole catalog, newest first
    pub async fn list(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        let books = sqlx::query_as::<_, Book>(
            r#"
            SELECT id, title, author, description, price, category, in_stock,
                   cover_image, created_at
            FROM books
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(books)
    }

    /// Finds a book by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let book = sqlx::query_as::<_, Book>(
            r#"
            SELECT id, title, author, description, price, category, in_stock,
                   cover_image, created_at
            FROM books
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(book)
    }

    /// Applies a partial update
    ///
    /// Single dynamic UPDATE; `None` when the book does not exist.
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        patch: UpdateBook,
    ) -> Result<Option<Self>, BookError> {
        if patch.is_empty() {
            return Ok(Self::find_by_id(pool, id).await?);
        }

        if let Some(price) = patch.price {
            if !(price >= 0.0) {
                return Err(BookError::NegativePrice);
            }
        }

        let mut sets = Vec::new();
        let mut bind_count = 1;

        for (present, column) in [
            (patch.title.is_some(), "title"),
            (patch.author.is_some(), "author"),
            (patch.description.is_some(), "description"),
            (patch.price.is_some(), "price"),
            (patch.category.is_some(), "category"),
            (patch.in_stock.is_some(), "in_stock"),
            (patch.cover_image.is_some(), "cover_image"),
        ] {
            if present {
                bind_count += 1;
                sets.push(format!("{} = ${}", column, bind_count));
            }
        }

        let query = format!(
            "UPDATE books SET {} WHERE id = $1 \
             RETURNING id, title, author, description, price, category, in_stock, \
             cover_image, created_at",
            sets.join(", "),
        );

        let mut q = sqlx::query_as::<_, Book>(&query).bind(id);

        if let Some(title) = patch.title {
            q = q.bind(title);
        }
        if let Some(author) = patch.author {
            q = q.bind(author);
        }
        if let Some(description) = patch.description {
            q = q.bind(description);
        }
        if let Some(price) = patch.price {
            q = q.bind(price);
        }
        if let Some(category) = patch.category {
            q = q.bind(category);
        }
        if let Some(in_stock) = patch.in_stock {
            q = q.bind(in_stock);
        }
        if let Some(cover_image) = patch.cover_image {
            q = q.bind(cover_image);
        }

        let book = q.fetch_optional(pool).await?;

        Ok(book)
    }

    /// Deletes a book
    ///
    /// Returns `true` when a row was removed.
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
