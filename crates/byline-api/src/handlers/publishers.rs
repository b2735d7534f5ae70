//! Handlers for `/publishers` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/publishers` | Editor; name must be unique |
//! | `GET`  | `/publishers` | Any authenticated user |

use axum::{
  Json,
  extract::State,
  http::StatusCode,
  response::IntoResponse,
};
use byline_core::{
  content::Publisher,
  mail::Mailer,
  policy::{Action, can_perform},
  store::NewsStore,
};
use serde::Deserialize;

use super::require_non_empty;
use crate::{AppState, auth::CurrentUser, error::Error};

// ─── Create ───────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CreateBody {
  pub name: String,
}

/// `POST /publishers` — editors only; the acting editor becomes the owner.
pub async fn create<S, M>(
  State(state): State<AppState<S, M>>,
  CurrentUser(actor): CurrentUser,
  Json(body): Json<CreateBody>,
) -> Result<impl IntoResponse, Error>
where
  S: NewsStore + 'static,
  M: Mailer + 'static,
{
  if !can_perform(&actor, Action::ManagePublishers) {
    return Err(Error::Denied("Only editors can manage publishers.".to_owned()));
  }

  require_non_empty("name", &body.name)?;

  if state
    .store
    .get_publisher_by_name(&body.name)
    .await
    .map_err(Error::store)?
    .is_some()
  {
    return Err(Error::Validation {
      field:   "name",
      message: "Publisher name already taken.".to_owned(),
    });
  }

  let publisher = state
    .store
    .create_publisher(body.name, Some(actor.user_id))
    .await
    .map_err(Error::store)?;

  Ok((StatusCode::CREATED, Json(publisher)))
}

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /publishers`
pub async fn list<S, M>(
  State(state): State<AppState<S, M>>,
  _user: CurrentUser,
) -> Result<Json<Vec<Publisher>>, Error>
where
  S: NewsStore + 'static,
  M: Mailer + 'static,
{
  let publishers = state.store.list_publishers().await.map_err(Error::store)?;
  Ok(Json(publishers))
}
