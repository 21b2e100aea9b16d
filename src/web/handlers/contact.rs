//! Contact form handler.

use axum::{extract::State, Json};
use std::sync::Arc;

use super::AppState;
use crate::contact::{ContactInput, ContactOutcome};
use crate::web::dto::{ContactJson, ContactRequest, MessageResponse};
use crate::web::error::{outcome_error, ApiError};

/// Submit the contact form.
///
/// Validates the submission and relays it by email to the site owner.
#[utoipa::path(
    post,
    path = "/api/contact",
    tag = "Contact",
    request_body = ContactRequest,
    responses(
        (status = 200, description = "Email sent", body = MessageResponse),
        (status = 400, description = "Invalid submission or malformed body", body = MessageResponse),
        (status = 429, description = "Rate limit exceeded", body = MessageResponse),
        (status = 500, description = "Email could not be sent", body = MessageResponse)
    )
)]
pub async fn submit_contact(
    State(state): State<Arc<AppState>>,
    ContactJson(req): ContactJson<ContactRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let input: ContactInput = req.into();

    let outcome = match tokio::time::timeout(state.request_timeout, state.service.submit(input))
        .await
    {
        Ok(outcome) => outcome,
        Err(_) => {
            tracing::error!(
                timeout_secs = state.request_timeout.as_secs(),
                "Contact submission timed out"
            );
            ContactOutcome::RelayFailed
        }
    };

    match outcome_error(&outcome) {
        Some(err) => Err(err),
        None => Ok(Json(MessageResponse::success(outcome.message()))),
    }
}
