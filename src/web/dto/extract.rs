//! Request extractors.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;

use crate::web::error::ApiError;

/// A JSON extractor that reports any parse failure as a malformed body.
///
/// Axum's own `Json` rejection text leaks serde detail and uses several
/// status codes; this extractor always answers 400 with
/// `"Invalid request body"` and logs the cause instead.
pub struct ContactJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ContactJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await.map_err(|e| {
            tracing::debug!(error = %e, "Failed to parse request body");
            ApiError::invalid_body()
        })?;

        Ok(ContactJson(value))
    }
}
