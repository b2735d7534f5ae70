//! Handlers for `/newsletters` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/newsletters` | Journalist; publisher is required |
//! | `POST` | `/newsletters/:id/approve` | Editor; dispatches the email batch |

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use byline_core::{
  content::{NewNewsletter, Newsletter},
  mail::Mailer,
  policy::{Action, can_perform},
  store::NewsStore,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::require_non_empty;
use crate::{AppState, auth::CurrentUser, error::Error, fanout};

// ─── Create ───────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CreateBody {
  pub title:        String,
  pub content:      String,
  pub publisher_id: Uuid,
}

/// `POST /newsletters` — journalists only; the named publisher must exist.
pub async fn create<S, M>(
  State(state): State<AppState<S, M>>,
  CurrentUser(actor): CurrentUser,
  Json(body): Json<CreateBody>,
) -> Result<impl IntoResponse, Error>
where
  S: NewsStore + 'static,
  M: Mailer + 'static,
{
  if !can_perform(&actor, Action::CreateNewsletter) {
    return Err(Error::Denied("Only journalists can create newsletters.".to_owned()));
  }

  require_non_empty("title", &body.title)?;
  require_non_empty("content", &body.content)?;

  state
    .store
    .get_publisher(body.publisher_id)
    .await
    .map_err(Error::store)?
    .ok_or_else(|| {
      Error::NotFound(format!("publisher {} not found", body.publisher_id))
    })?;

  let newsletter = state
    .store
    .create_newsletter(NewNewsletter {
      title:        body.title,
      content:      body.content,
      author_id:    actor.user_id,
      publisher_id: body.publisher_id,
    })
    .await
    .map_err(Error::store)?;

  Ok((StatusCode::CREATED, Json(newsletter)))
}

// ─── Approve ──────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ApproveResponse {
  pub newsletter:  Newsletter,
  /// How many subscriber addresses the email batch was sent to.
  pub emails_sent: usize,
}

/// `POST /newsletters/:id/approve` — editors only.
///
/// Approval flips the flag, then emails every subscriber of the newsletter's
/// publisher. A transport failure surfaces as a hard error; the approval
/// itself is already persisted at that point.
pub async fn approve<S, M>(
  State(state): State<AppState<S, M>>,
  CurrentUser(actor): CurrentUser,
  Path(id): Path<Uuid>,
) -> Result<Json<ApproveResponse>, Error>
where
  S: NewsStore + 'static,
  M: Mailer + 'static,
{
  if !can_perform(&actor, Action::ApproveNewsletter) {
    return Err(Error::Denied("Only editors can approve newsletters.".to_owned()));
  }

  state
    .store
    .get_newsletter(id)
    .await
    .map_err(Error::store)?
    .ok_or_else(|| Error::NotFound(format!("newsletter {id} not found")))?;

  let newsletter = state
    .store
    .approve_newsletter(id)
    .await
    .map_err(Error::store)?;

  let emails_sent = fanout::notify_on_newsletter_approval(
    state.store.as_ref(),
    state.mailer.as_deref(),
    &state.config.mail_from,
    &newsletter,
  )
  .await?;

  Ok(Json(ApproveResponse { newsletter, emails_sent }))
}
