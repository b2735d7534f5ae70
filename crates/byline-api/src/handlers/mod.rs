//! Route handlers, one module per resource.

pub mod articles;
pub mod feed;
pub mod newsletters;
pub mod notifications;
pub mod publishers;
pub mod subscriptions;
pub mod users;

use crate::error::Error;

/// Reject a blank (or all-whitespace) value with a field-level message.
pub(crate) fn require_non_empty(field: &'static str, value: &str) -> Result<(), Error> {
  if value.trim().is_empty() {
    return Err(Error::Validation {
      field,
      message: format!("{field} must not be empty"),
    });
  }
  Ok(())
}
