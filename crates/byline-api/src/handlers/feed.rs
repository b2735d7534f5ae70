//! Handler for `GET /feed` — the per-role dashboard query.

use axum::{Json, extract::State};
use byline_core::{content::Article, mail::Mailer, store::NewsStore, user::Role};

use crate::{AppState, auth::CurrentUser, error::Error};

/// `GET /feed`
///
/// - Journalist: own articles, any approval state.
/// - Editor: the approval queue (everything unapproved).
/// - Reader: approved articles from subscribed journalists/publishers, or
///   every approved article when no subscriptions exist.
pub async fn handler<S, M>(
  State(state): State<AppState<S, M>>,
  CurrentUser(actor): CurrentUser,
) -> Result<Json<Vec<Article>>, Error>
where
  S: NewsStore + 'static,
  M: Mailer + 'static,
{
  let articles = match actor.role {
    Role::Journalist => state
      .store
      .list_articles_by_author(actor.user_id)
      .await
      .map_err(Error::store)?,
    Role::Editor => state
      .store
      .list_unapproved_articles()
      .await
      .map_err(Error::store)?,
    Role::Reader => state
      .store
      .reader_feed(actor.user_id)
      .await
      .map_err(Error::store)?,
  };

  Ok(Json(articles))
}
