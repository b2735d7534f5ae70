//! The `Mailer` trait — the outbound email seam.
//!
//! Only the newsletter-approval fan-out uses it. The SMTP implementation
//! lives in `byline-api`; tests substitute a recording double.

use std::future::Future;

/// Abstraction over an email transport.
pub trait Mailer: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Send one message to every address in `recipients`.
  ///
  /// A transport failure must surface to the caller — the newsletter path
  /// is all-or-nothing, unlike in-store notification fan-out.
  fn send<'a>(
    &'a self,
    subject: &'a str,
    body: &'a str,
    from: &'a str,
    recipients: &'a [String],
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;
}
