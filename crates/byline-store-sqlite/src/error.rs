//! Error type for `byline-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] byline_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("uuid parse error: {0}")]
  Uuid(#[from] uuid::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  #[error("username already taken: {0:?}")]
  UsernameTaken(String),

  #[error("email already registered: {0:?}")]
  EmailTaken(String),

  #[error("publisher name already taken: {0:?}")]
  PublisherNameTaken(String),

  #[error("article not found: {0}")]
  ArticleNotFound(uuid::Uuid),

  #[error("newsletter not found: {0}")]
  NewsletterNotFound(uuid::Uuid),
}

impl Error {
  /// The message of a violated SQLite uniqueness constraint, if that is what
  /// the wrapped database error was. Used to map duplicate usernames/emails/
  /// publisher names to their typed variants.
  pub(crate) fn constraint_message(&self) -> Option<&str> {
    if let Error::Database(tokio_rusqlite::Error::Rusqlite(
      rusqlite::Error::SqliteFailure(failure, Some(message)),
    )) = self
      && failure.code == rusqlite::ErrorCode::ConstraintViolation
    {
      return Some(message);
    }
    None
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
