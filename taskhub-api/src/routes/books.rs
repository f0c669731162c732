/// Book catalog endpoints
///
/// The catalog is deliberately public: no endpoint here requires a
/// token, including the mutating ones. It exists as a contrast to the
/// owner-scoped task resource.
///
/// # Endpoints
///
/// - `GET /books` - List the catalog
/// - `POST /books` - Add a book
/// - `GET /books/:id` - Fetch one book
/// - `PATCH /books/:id` - Partially update a book
/// - `DELETE /books/:id` - Remove a book

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    extract::Json,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use serde::Serialize;
use taskhub_shared::models::book::{Book, CreateBook, UpdateBook};
use uuid::Uuid;

/// Book list response
#[derive(Debug, Serialize)]
pub struct BookListResponse {
    /// All books, newest first
    pub books: Vec<Book>,
}

/// Single-book response
#[derive(Debug, Serialize)]
pub struct BookResponse {
    /// The book
    pub book: Book,
}

/// Deletion acknowledgement
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    /// Confirmation message
    pub message: String,
}

/// Lists the catalog
pub async fn list_books(State(state): State<AppState>) -> ApiResult<Json<BookListResponse>> {
    let books = Book::list(&state.db).await?;
    Ok(Json(BookListResponse { books }))
}

/// Adds a book to the catalog
///
/// # Errors
///
/// - `400 Bad Request`: Missing required field or negative price
pub async fn create_book(
    State(state): State<AppState>,
    Json(draft): Json<CreateBook>,
) -> ApiResult<(StatusCode, Json<BookResponse>)> {
    let book = Book::create(&state.db, draft).await?;

    tracing::info!(book_id = %book.id, "Book created");

    Ok((StatusCode::CREATED, Json(BookResponse { book })))
}

/// Fetches one book
///
/// # Errors
///
/// - `404 Not Found`: No book with this id
pub async fn get_book(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<BookResponse>> {
    let book = Book::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Book not found".to_string()))?;

    Ok(Json(BookResponse { book }))
}

/// Partially updates a book
///
/// # Errors
///
/// - `400 Bad Request`: Patch sets a negative price
/// - `404 Not Found`: No book with this id
pub async fn update_book(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(patch): Json<UpdateBook>,
) -> ApiResult<Json<BookResponse>> {
    let book = Book::update(&state.db, id, patch)
        .await?
        .ok_or_else(|| ApiError::NotFound("Book not found".to_string()))?;

    Ok(Json(BookResponse { book }))
}

/// Removes a book
///
/// # Errors
///
/// - `404 Not Found`: No book with this id
pub async fn delete_book(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<DeleteResponse>> {
    let deleted = Book::delete(&state.db, id).await?;
    if !deleted {
        return Err(ApiError::NotFound("Book not found".to_string()));
    }

    tracing::info!(book_id = %id, "Book deleted");

    Ok(Json(DeleteResponse {
        message: "Book deleted".to_string(),
    }))
}
