//! HTTP Basic-auth extractor resolving credentials against the user store.
//!
//! Every request carries credentials; there is no session state. A
//! successful extraction yields the request-scoped identity and role that
//! the access policy and handlers dispatch on.

use argon2::{Argon2, PasswordHash, PasswordVerifier};
use axum::extract::FromRequestParts;
use axum::http::{HeaderMap, request::Parts};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as B64;
use byline_core::{mail::Mailer, store::NewsStore, user::User};

use crate::{AppState, error::Error};

/// The authenticated user, extracted per request.
pub struct CurrentUser(pub User);

/// Verify Basic credentials against the stored argon2 hash and return the
/// matching user.
pub async fn verify_auth<S>(headers: &HeaderMap, store: &S) -> Result<User, Error>
where
  S: NewsStore,
{
  let header_val = headers
    .get(axum::http::header::AUTHORIZATION)
    .and_then(|v| v.to_str().ok())
    .ok_or(Error::Unauthorized)?;

  let encoded = header_val
    .strip_prefix("Basic ")
    .ok_or(Error::Unauthorized)?;

  let decoded = B64.decode(encoded).map_err(|_| Error::Unauthorized)?;
  let creds   = std::str::from_utf8(&decoded).map_err(|_| Error::Unauthorized)?;

  let (username, password) = creds.split_once(':').ok_or(Error::Unauthorized)?;

  let user = store
    .get_user_by_username(username)
    .await
    .map_err(Error::store)?
    .ok_or(Error::Unauthorized)?;

  let parsed_hash = PasswordHash::new(&user.password_hash)
    .map_err(|_| Error::Unauthorized)?;

  Argon2::default()
    .verify_password(password.as_bytes(), &parsed_hash)
    .map_err(|_| Error::Unauthorized)?;

  Ok(user)
}

impl<S, M> FromRequestParts<AppState<S, M>> for CurrentUser
where
  S: NewsStore + 'static,
  M: Mailer + 'static,
{
  type Rejection = Error;

  async fn from_request_parts(
    parts: &mut Parts,
    state: &AppState<S, M>,
  ) -> Result<Self, Self::Rejection> {
    let user = verify_auth(&parts.headers, state.store.as_ref()).await?;
    Ok(CurrentUser(user))
  }
}
