//! Recovery from handler panics.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use std::any::Any;
use tower_http::catch_panic::CatchPanicLayer;

use crate::web::dto::MessageResponse;
use crate::web::error::INTERNAL_ERROR_MESSAGE;

/// Panic handler function type used by [`catch_panic_layer`].
pub type PanicHandler = fn(Box<dyn Any + Send + 'static>) -> Response;

/// Layer that turns a panicking handler into a generic 500 response.
pub fn catch_panic_layer() -> CatchPanicLayer<PanicHandler> {
    CatchPanicLayer::custom(handle_panic as PanicHandler)
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic payload"
    };
    tracing::error!(panic = %detail, "Recovered from panic in request handler");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(MessageResponse::failure(INTERNAL_ERROR_MESSAGE)),
    )
        .into_response()
}
