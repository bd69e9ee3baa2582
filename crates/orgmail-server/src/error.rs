//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by the event intake.
///
/// Agent failures answer `500` so the sender can redeliver the event.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("agent error: {0}")]
  Agent(#[from] orgmail_agents::Error),
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      ApiError::Agent(e) => {
        tracing::error!(error = %e, "event processing failed");
        (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
      }
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}
