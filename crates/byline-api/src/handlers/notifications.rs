//! Handler for `GET /notifications` — the caller's inbox, newest first.

use axum::{Json, extract::State};
use byline_core::{mail::Mailer, store::NewsStore, subscription::Notification};

use crate::{AppState, auth::CurrentUser, error::Error};

/// `GET /notifications`
pub async fn list<S, M>(
  State(state): State<AppState<S, M>>,
  CurrentUser(actor): CurrentUser,
) -> Result<Json<Vec<Notification>>, Error>
where
  S: NewsStore + 'static,
  M: Mailer + 'static,
{
  let notifications = state
    .store
    .notifications_for(actor.user_id)
    .await
    .map_err(Error::store)?;
  Ok(Json(notifications))
}
