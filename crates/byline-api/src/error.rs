//! API error type and [`axum::response::IntoResponse`] implementation.
//!
//! The taxonomy distinguishes soft denials (role/ownership mismatch → 303
//! back to the feed, never a hard fault) from hard not-found, validation,
//! and transport failures.

use axum::{
  Json,
  http::{HeaderValue, StatusCode, header},
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Where soft denials send the client.
pub const FEED_PATH: &str = "/feed";

#[derive(Debug, Error)]
pub enum Error {
  #[error("unauthorized")]
  Unauthorized,

  /// Authorization denial. Rendered as a redirect with a user-visible
  /// message, not as a 4xx.
  #[error("denied: {0}")]
  Denied(String),

  #[error("not found: {0}")]
  NotFound(String),

  /// A malformed create/update payload; carries the offending field.
  #[error("validation failed on {field}: {message}")]
  Validation {
    field:   &'static str,
    message: String,
  },

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),

  #[error("mail transport error: {0}")]
  Mail(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  /// Wrap any store backend error.
  pub fn store<E: std::error::Error + Send + Sync + 'static>(e: E) -> Self {
    Error::Store(Box::new(e))
  }
}

impl IntoResponse for Error {
  fn into_response(self) -> Response {
    match self {
      Error::Unauthorized => {
        let mut res =
          (StatusCode::UNAUTHORIZED, "Unauthorized").into_response();
        res.headers_mut().insert(
          header::WWW_AUTHENTICATE,
          HeaderValue::from_static("Basic realm=\"byline\""),
        );
        res
      }
      Error::Denied(message) => (
        StatusCode::SEE_OTHER,
        [(header::LOCATION, HeaderValue::from_static(FEED_PATH))],
        message,
      )
        .into_response(),
      Error::NotFound(message) => (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": message })),
      )
        .into_response(),
      Error::Validation { field, message } => (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(json!({ "errors": { field: message } })),
      )
        .into_response(),
      Error::Store(e) => {
        (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
      }
      Error::Mail(e) => {
        (StatusCode::BAD_GATEWAY, e.to_string()).into_response()
      }
    }
  }
}
