//! Handlers for `/articles` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/articles` | Approved articles only; no auth required |
//! | `GET`  | `/articles/:id` | Readers are bounced off unapproved articles |
//! | `POST` | `/articles` | Journalist; fans out notifications |
//! | `PUT`  | `/articles/:id` | Owning journalist or editor |
//! | `DELETE` | `/articles/:id` | Owning journalist or editor |
//! | `POST` | `/articles/:id/approve` | Editor; idempotent |

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use byline_core::{
  content::{Article, ArticleUpdate, NewArticle},
  mail::Mailer,
  policy::{Action, can_perform},
  store::NewsStore,
  user::Role,
};
use serde::Deserialize;
use uuid::Uuid;

use super::require_non_empty;
use crate::{AppState, auth::CurrentUser, error::Error, fanout};

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /articles` — the public listing of approved articles.
pub async fn list<S, M>(
  State(state): State<AppState<S, M>>,
) -> Result<Json<Vec<Article>>, Error>
where
  S: NewsStore + 'static,
  M: Mailer + 'static,
{
  let articles = state
    .store
    .list_approved_articles()
    .await
    .map_err(Error::store)?;
  Ok(Json(articles))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /articles/:id`
///
/// Fetch-or-404. Readers cannot see unapproved articles; that is a soft
/// denial back to the feed, not a 404 — the article exists, they just may
/// not read it yet.
pub async fn get_one<S, M>(
  State(state): State<AppState<S, M>>,
  CurrentUser(actor): CurrentUser,
  Path(id): Path<Uuid>,
) -> Result<Json<Article>, Error>
where
  S: NewsStore + 'static,
  M: Mailer + 'static,
{
  let article = state
    .store
    .get_article(id)
    .await
    .map_err(Error::store)?
    .ok_or_else(|| Error::NotFound(format!("article {id} not found")))?;

  if !article.approved && actor.role == Role::Reader {
    return Err(Error::Denied("Article not approved yet.".to_owned()));
  }

  Ok(Json(article))
}

// ─── Create ───────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CreateBody {
  pub title:        String,
  pub content:      String,
  pub publisher_id: Option<Uuid>,
}

/// `POST /articles` — journalists only. The new article starts unapproved;
/// subscribers of the author (and of the publisher, if any) are notified
/// immediately.
pub async fn create<S, M>(
  State(state): State<AppState<S, M>>,
  CurrentUser(actor): CurrentUser,
  Json(body): Json<CreateBody>,
) -> Result<impl IntoResponse, Error>
where
  S: NewsStore + 'static,
  M: Mailer + 'static,
{
  if !can_perform(&actor, Action::CreateArticle) {
    return Err(Error::Denied("Only journalists can create articles.".to_owned()));
  }

  require_non_empty("title", &body.title)?;
  require_non_empty("content", &body.content)?;

  let publisher = match body.publisher_id {
    Some(id) => Some(
      state
        .store
        .get_publisher(id)
        .await
        .map_err(Error::store)?
        .ok_or_else(|| Error::NotFound(format!("publisher {id} not found")))?,
    ),
    None => None,
  };

  let article = state
    .store
    .create_article(NewArticle {
      title:        body.title,
      content:      body.content,
      created_by:   actor.user_id,
      publisher_id: publisher.as_ref().map(|p| p.publisher_id),
    })
    .await
    .map_err(Error::store)?;

  fanout::notify_on_new_article(
    state.store.as_ref(),
    &actor,
    publisher.as_ref(),
    &article,
  )
  .await
  .map_err(Error::store)?;

  Ok((StatusCode::CREATED, Json(article)))
}

// ─── Update ───────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct UpdateBody {
  pub title:   String,
  pub content: String,
}

/// `PUT /articles/:id` — the owning journalist or any editor.
pub async fn update<S, M>(
  State(state): State<AppState<S, M>>,
  CurrentUser(actor): CurrentUser,
  Path(id): Path<Uuid>,
  Json(body): Json<UpdateBody>,
) -> Result<Json<Article>, Error>
where
  S: NewsStore + 'static,
  M: Mailer + 'static,
{
  let article = state
    .store
    .get_article(id)
    .await
    .map_err(Error::store)?
    .ok_or_else(|| Error::NotFound(format!("article {id} not found")))?;

  if !can_perform(&actor, Action::UpdateArticle(&article)) {
    return Err(Error::Denied("You cannot edit this article.".to_owned()));
  }

  require_non_empty("title", &body.title)?;
  require_non_empty("content", &body.content)?;

  let updated = state
    .store
    .update_article(id, ArticleUpdate { title: body.title, content: body.content })
    .await
    .map_err(Error::store)?;

  Ok(Json(updated))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /articles/:id` — the owning journalist or any editor.
pub async fn delete<S, M>(
  State(state): State<AppState<S, M>>,
  CurrentUser(actor): CurrentUser,
  Path(id): Path<Uuid>,
) -> Result<StatusCode, Error>
where
  S: NewsStore + 'static,
  M: Mailer + 'static,
{
  let article = state
    .store
    .get_article(id)
    .await
    .map_err(Error::store)?
    .ok_or_else(|| Error::NotFound(format!("article {id} not found")))?;

  if !can_perform(&actor, Action::DeleteArticle(&article)) {
    return Err(Error::Denied("You cannot delete this article.".to_owned()));
  }

  state.store.delete_article(id).await.map_err(Error::store)?;
  tracing::info!(article = %id, actor = %actor.user_id, "article deleted");
  Ok(StatusCode::NO_CONTENT)
}

// ─── Approve ──────────────────────────────────────────────────────────────────

/// `POST /articles/:id/approve` — editors only; idempotent.
///
/// The role gate runs before the existence check, so a non-editor probing a
/// missing id still gets the soft denial rather than a 404.
pub async fn approve<S, M>(
  State(state): State<AppState<S, M>>,
  CurrentUser(actor): CurrentUser,
  Path(id): Path<Uuid>,
) -> Result<Json<Article>, Error>
where
  S: NewsStore + 'static,
  M: Mailer + 'static,
{
  if !can_perform(&actor, Action::ApproveArticle) {
    return Err(Error::Denied("Only editors can approve articles.".to_owned()));
  }

  state
    .store
    .get_article(id)
    .await
    .map_err(Error::store)?
    .ok_or_else(|| Error::NotFound(format!("article {id} not found")))?;

  let approved = state.store.approve_article(id).await.map_err(Error::store)?;
  Ok(Json(approved))
}
