//! SMTP implementation of the [`Mailer`] seam, via `lettre`.
//!
//! STARTTLS relay with optional credentials. Built once at startup; absent
//! `[smtp]` configuration means no mailer is constructed and newsletter
//! dispatch is skipped.

use byline_core::mail::Mailer;
use lettre::{
  AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
  message::header::ContentType, transport::smtp::authentication::Credentials,
};
use thiserror::Error;

use crate::SmtpConfig;

#[derive(Debug, Error)]
pub enum SmtpError {
  /// SMTP transport-level failure (authentication, connection, etc.).
  #[error("smtp transport error: {0}")]
  Transport(#[from] lettre::transport::smtp::Error),

  /// A recipient or sender address could not be parsed.
  #[error("email address parse error: {0}")]
  Address(#[from] lettre::address::AddressError),

  /// The message could not be assembled.
  #[error("email build error: {0}")]
  Build(#[from] lettre::error::Error),
}

/// Sends newsletter emails through an async SMTP relay.
pub struct SmtpMailer {
  transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailer {
  /// Build the relay transport from configuration.
  pub fn new(config: &SmtpConfig) -> Result<Self, SmtpError> {
    let mut builder =
      AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)?
        .port(config.port);

    if let (Some(user), Some(pass)) = (&config.username, &config.password) {
      builder = builder.credentials(Credentials::new(user.clone(), pass.clone()));
    }

    Ok(Self { transport: builder.build() })
  }
}

impl Mailer for SmtpMailer {
  type Error = SmtpError;

  async fn send<'a>(
    &'a self,
    subject: &'a str,
    body: &'a str,
    from: &'a str,
    recipients: &'a [String],
  ) -> Result<(), SmtpError> {
    let mut builder = Message::builder()
      .from(from.parse()?)
      .subject(subject)
      .header(ContentType::TEXT_PLAIN);

    for recipient in recipients {
      builder = builder.to(recipient.parse()?);
    }

    let email = builder.body(body.to_owned())?;
    self.transport.send(email).await?;
    Ok(())
  }
}
