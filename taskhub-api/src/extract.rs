/// Request extractors
///
/// axum's default `Json` extractor answers a malformed or incomplete body
/// with 422 and a plain-text payload. Every error this API emits is a
/// 400-class JSON object with a `message` field, so handlers take this
/// wrapper instead: body rejections (missing required key, unknown enum
/// value, syntax error) become `ApiError::Validation`.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::error::ApiError;

/// JSON body extractor mapped into the API error taxonomy
///
/// Drop-in replacement for `axum::Json` on both the request and response
/// side.
#[derive(Debug, Clone, Copy, Default)]
pub struct Json<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for Json<T>
where
    axum::Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let axum::Json(value) = axum::Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::Validation(rejection.body_text()))?;

        Ok(Self(value))
    }
}

impl<T> IntoResponse for Json<T>
where
    T: Serialize,
{
    fn into_response(self) -> Response {
        axum::Json(self.0).into_response()
    }
}
