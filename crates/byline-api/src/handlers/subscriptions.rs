//! Handlers for the subscription graph.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`    | `/subscriptions` | The caller's own edges |
//! | `POST`   | `/subscriptions/journalists/:id` | Reader; idempotent |
//! | `DELETE` | `/subscriptions/journalists/:id` | Reader; missing edge is fine |
//! | `POST`   | `/subscriptions/publishers/:id` | Reader; idempotent |
//! | `DELETE` | `/subscriptions/publishers/:id` | Reader; missing edge is fine |

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use byline_core::{
  mail::Mailer,
  policy::{Action, can_perform},
  store::NewsStore,
  subscription::{Subscription, SubscriptionTarget},
  user::{Role, User},
};
use serde::Serialize;
use serde_json::json;
use uuid::Uuid;

use crate::{AppState, auth::CurrentUser, error::Error};

/// Returned by the subscribe endpoints. `created` is false when the edge
/// already existed — re-subscribing is a successful no-op, not an error.
#[derive(Debug, Serialize)]
pub struct SubscribeResponse {
  pub subscription: Subscription,
  pub created:      bool,
  pub message:      &'static str,
}

fn gate_reader(actor: &User, action: Action<'_>, verb: &str) -> Result<(), Error> {
  if !can_perform(actor, action) {
    return Err(Error::Denied(format!("Only readers can {verb}.")));
  }
  Ok(())
}

async fn subscribe_response<S>(
  store: &S,
  actor: &User,
  target: SubscriptionTarget,
) -> Result<impl IntoResponse + use<S>, Error>
where
  S: NewsStore,
{
  let (subscription, created) = store
    .subscribe(actor.user_id, target)
    .await
    .map_err(Error::store)?;

  let (status, message) = if created {
    (StatusCode::CREATED, "Subscribed successfully.")
  } else {
    (StatusCode::OK, "Already subscribed.")
  };

  Ok((status, Json(SubscribeResponse { subscription, created, message })))
}

// ─── Journalist edges ─────────────────────────────────────────────────────────

/// `POST /subscriptions/journalists/:id`
///
/// The target must exist and actually be a journalist; a reader or editor id
/// here is a 404, same as an unknown id.
pub async fn subscribe_journalist<S, M>(
  State(state): State<AppState<S, M>>,
  CurrentUser(actor): CurrentUser,
  Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, Error>
where
  S: NewsStore + 'static,
  M: Mailer + 'static,
{
  gate_reader(&actor, Action::Subscribe, "subscribe")?;

  let target = state
    .store
    .get_user(id)
    .await
    .map_err(Error::store)?
    .filter(|u| u.role == Role::Journalist)
    .ok_or_else(|| Error::NotFound(format!("journalist {id} not found")))?;

  subscribe_response(
    state.store.as_ref(),
    &actor,
    SubscriptionTarget::Journalist(target.user_id),
  )
  .await
}

/// `DELETE /subscriptions/journalists/:id`
pub async fn unsubscribe_journalist<S, M>(
  State(state): State<AppState<S, M>>,
  CurrentUser(actor): CurrentUser,
  Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, Error>
where
  S: NewsStore + 'static,
  M: Mailer + 'static,
{
  gate_reader(&actor, Action::Unsubscribe, "unsubscribe")?;

  let removed = state
    .store
    .unsubscribe(actor.user_id, SubscriptionTarget::Journalist(id))
    .await
    .map_err(Error::store)?;

  Ok(Json(json!({ "removed": removed, "message": "Unsubscribed successfully." })))
}

// ─── Publisher edges ──────────────────────────────────────────────────────────

/// `POST /subscriptions/publishers/:id`
pub async fn subscribe_publisher<S, M>(
  State(state): State<AppState<S, M>>,
  CurrentUser(actor): CurrentUser,
  Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, Error>
where
  S: NewsStore + 'static,
  M: Mailer + 'static,
{
  gate_reader(&actor, Action::Subscribe, "subscribe")?;

  let target = state
    .store
    .get_publisher(id)
    .await
    .map_err(Error::store)?
    .ok_or_else(|| Error::NotFound(format!("publisher {id} not found")))?;

  subscribe_response(
    state.store.as_ref(),
    &actor,
    SubscriptionTarget::Publisher(target.publisher_id),
  )
  .await
}

/// `DELETE /subscriptions/publishers/:id`
pub async fn unsubscribe_publisher<S, M>(
  State(state): State<AppState<S, M>>,
  CurrentUser(actor): CurrentUser,
  Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, Error>
where
  S: NewsStore + 'static,
  M: Mailer + 'static,
{
  gate_reader(&actor, Action::Unsubscribe, "unsubscribe")?;

  let removed = state
    .store
    .unsubscribe(actor.user_id, SubscriptionTarget::Publisher(id))
    .await
    .map_err(Error::store)?;

  Ok(Json(json!({ "removed": removed, "message": "Unsubscribed successfully." })))
}

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /subscriptions` — the caller's own edges, in insertion order.
pub async fn list<S, M>(
  State(state): State<AppState<S, M>>,
  CurrentUser(actor): CurrentUser,
) -> Result<Json<Vec<Subscription>>, Error>
where
  S: NewsStore + 'static,
  M: Mailer + 'static,
{
  let edges = state
    .store
    .list_subscriptions(actor.user_id)
    .await
    .map_err(Error::store)?;
  Ok(Json(edges))
}
