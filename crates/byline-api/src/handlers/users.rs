//! Handlers for `/users` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/users` | Registration; open to anyone |
//! | `GET`  | `/users` | Optional `?role=reader\|journalist\|editor` |
//! | `GET`  | `/users/:id` | 404 if not found |

use argon2::{Argon2, PasswordHasher, password_hash::SaltString};
use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use byline_core::{
  mail::Mailer,
  store::NewsStore,
  user::{NewUser, Role, User},
};
use rand_core::OsRng;
use serde::Deserialize;
use uuid::Uuid;

use super::require_non_empty;
use crate::{AppState, auth::CurrentUser, error::Error};

// ─── Register ─────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct RegisterBody {
  pub username: String,
  pub email:    String,
  pub password: String,
  pub role:     Role,
}

/// `POST /users` — body: `{"username":..,"email":..,"password":..,"role":..}`
///
/// Duplicate usernames and emails are validation failures, checked up front;
/// the store's uniqueness constraints remain the backstop against races.
pub async fn register<S, M>(
  State(state): State<AppState<S, M>>,
  Json(body): Json<RegisterBody>,
) -> Result<impl IntoResponse, Error>
where
  S: NewsStore + 'static,
  M: Mailer + 'static,
{
  require_non_empty("username", &body.username)?;
  require_non_empty("password", &body.password)?;
  if !body.email.contains('@') {
    return Err(Error::Validation {
      field:   "email",
      message: "not a valid email address".to_owned(),
    });
  }

  if state
    .store
    .get_user_by_username(&body.username)
    .await
    .map_err(Error::store)?
    .is_some()
  {
    return Err(Error::Validation {
      field:   "username",
      message: "Username already taken.".to_owned(),
    });
  }
  if state
    .store
    .get_user_by_email(&body.email)
    .await
    .map_err(Error::store)?
    .is_some()
  {
    return Err(Error::Validation {
      field:   "email",
      message: "Email already registered.".to_owned(),
    });
  }

  let salt = SaltString::generate(&mut OsRng);
  let password_hash = Argon2::default()
    .hash_password(body.password.as_bytes(), &salt)
    .map_err(|e| Error::Store(format!("cannot hash password: {e}").into()))?
    .to_string();

  let user = state
    .store
    .create_user(NewUser {
      username: body.username,
      email: body.email,
      password_hash,
      role: body.role,
    })
    .await
    .map_err(Error::store)?;

  tracing::info!(user = %user.user_id, role = ?user.role, "registered");
  Ok((StatusCode::CREATED, Json(user)))
}

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ListParams {
  pub role: Option<Role>,
}

/// `GET /users[?role=<role>]` — used by readers to discover journalists.
pub async fn list<S, M>(
  State(state): State<AppState<S, M>>,
  _user: CurrentUser,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<User>>, Error>
where
  S: NewsStore + 'static,
  M: Mailer + 'static,
{
  let users = state
    .store
    .list_users(params.role)
    .await
    .map_err(Error::store)?;
  Ok(Json(users))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /users/:id`
pub async fn get_one<S, M>(
  State(state): State<AppState<S, M>>,
  _user: CurrentUser,
  Path(id): Path<Uuid>,
) -> Result<Json<User>, Error>
where
  S: NewsStore + 'static,
  M: Mailer + 'static,
{
  let user = state
    .store
    .get_user(id)
    .await
    .map_err(Error::store)?
    .ok_or_else(|| Error::NotFound(format!("user {id} not found")))?;
  Ok(Json(user))
}
