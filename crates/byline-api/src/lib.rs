//! JSON API layer for Byline.
//!
//! Exposes an axum [`Router`] backed by any [`NewsStore`] and an optional
//! [`Mailer`] for newsletter dispatch. Requests authenticate with HTTP Basic
//! against the user store; role checks happen per handler through the core
//! access policy.

pub mod auth;
pub mod error;
pub mod fanout;
pub mod handlers;
pub mod smtp;

pub use error::Error;

use std::{path::PathBuf, sync::Arc};

use axum::{
  Router,
  routing::{get, post},
};
use byline_core::{mail::Mailer, store::NewsStore};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

// ─── Configuration ────────────────────────────────────────────────────────────

fn default_mail_from() -> String { "admin@byline.local".to_owned() }

fn default_smtp_port() -> u16 { 587 }

/// SMTP relay settings; absent entirely when outbound email is not
/// configured.
#[derive(Debug, Deserialize, Clone)]
pub struct SmtpConfig {
  pub host:     String,
  #[serde(default = "default_smtp_port")]
  pub port:     u16,
  pub username: Option<String>,
  pub password: Option<String>,
}

/// Runtime server configuration, deserialised from `config.toml`.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  pub store_path: PathBuf,
  /// RFC 5322 "From" address on outbound newsletter email.
  #[serde(default = "default_mail_from")]
  pub mail_from:  String,
  #[serde(default)]
  pub smtp:       Option<SmtpConfig>,
}

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
pub struct AppState<S: NewsStore, M: Mailer> {
  pub store:  Arc<S>,
  pub config: Arc<ServerConfig>,
  /// `None` when no `[smtp]` section is configured; newsletter approval then
  /// skips dispatch.
  pub mailer: Option<Arc<M>>,
}

impl<S: NewsStore, M: Mailer> Clone for AppState<S, M> {
  fn clone(&self) -> Self {
    Self {
      store:  self.store.clone(),
      config: self.config.clone(),
      mailer: self.mailer.clone(),
    }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the axum [`Router`] for the service.
pub fn router<S, M>(state: AppState<S, M>) -> Router
where
  S: NewsStore + 'static,
  M: Mailer + 'static,
{
  Router::new()
    // Accounts
    .route(
      "/users",
      post(handlers::users::register::<S, M>).get(handlers::users::list::<S, M>),
    )
    .route("/users/{id}", get(handlers::users::get_one::<S, M>))
    // Publishers
    .route(
      "/publishers",
      post(handlers::publishers::create::<S, M>)
        .get(handlers::publishers::list::<S, M>),
    )
    // Articles
    .route(
      "/articles",
      get(handlers::articles::list::<S, M>).post(handlers::articles::create::<S, M>),
    )
    .route(
      "/articles/{id}",
      get(handlers::articles::get_one::<S, M>)
        .put(handlers::articles::update::<S, M>)
        .delete(handlers::articles::delete::<S, M>),
    )
    .route("/articles/{id}/approve", post(handlers::articles::approve::<S, M>))
    // Newsletters
    .route("/newsletters", post(handlers::newsletters::create::<S, M>))
    .route(
      "/newsletters/{id}/approve",
      post(handlers::newsletters::approve::<S, M>),
    )
    // Subscription graph
    .route("/subscriptions", get(handlers::subscriptions::list::<S, M>))
    .route(
      "/subscriptions/journalists/{id}",
      post(handlers::subscriptions::subscribe_journalist::<S, M>)
        .delete(handlers::subscriptions::unsubscribe_journalist::<S, M>),
    )
    .route(
      "/subscriptions/publishers/{id}",
      post(handlers::subscriptions::subscribe_publisher::<S, M>)
        .delete(handlers::subscriptions::unsubscribe_publisher::<S, M>),
    )
    // Feeds
    .route("/feed", get(handlers::feed::handler::<S, M>))
    .route("/notifications", get(handlers::notifications::list::<S, M>))
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

// ─── Test doubles ─────────────────────────────────────────────────────────────


// ─── Integration tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use std::sync::Arc;

  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
  };
  use base64::Engine as _;
  use base64::engine::general_purpose::STANDARD as B64;
  use byline_core::{mail::Mailer, store::NewsStore};
  use byline_store_sqlite::SqliteStore;
  use serde_json::{Value, json};
  use tower::ServiceExt as _;
  use uuid::Uuid;

  use super::*;
  use crate::testing::{FailingMailer, RecordingMailer};

  fn test_config() -> ServerConfig {
    ServerConfig {
      host:       "127.0.0.1".to_owned(),
      port:       8080,
      store_path: PathBuf::from(":memory:"),
      mail_from:  "admin@byline.local".to_owned(),
      smtp:       None,
    }
  }

  async fn state_with<M: Mailer>(mailer: Option<M>) -> AppState<SqliteStore, M> {
    let store = SqliteStore::open_in_memory().await.unwrap();
    AppState {
      store:  Arc::new(store),
      config: Arc::new(test_config()),
      mailer: mailer.map(Arc::new),
    }
  }

  async fn make_state() -> AppState<SqliteStore, RecordingMailer> {
    state_with(Some(RecordingMailer::default())).await
  }

  fn basic(username: &str) -> String {
    format!("Basic {}", B64.encode(format!("{username}:pass123")))
  }

  async fn oneshot_raw<S, M>(
    state:  AppState<S, M>,
    method: &str,
    uri:    &str,
    auth:   Option<&str>,
    body:   Option<Value>,
  ) -> axum::response::Response
  where
    S: NewsStore + 'static,
    M: Mailer + 'static,
  {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(auth) = auth {
      builder = builder.header(header::AUTHORIZATION, auth);
    }
    let req = match body {
      Some(v) => builder
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(v.to_string()))
        .unwrap(),
      None => builder.body(Body::empty()).unwrap(),
    };
    router(state).oneshot(req).await.unwrap()
  }

  async fn json_body(resp: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
  }

  async fn text_body(resp: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
  }

  /// Register through the API (password "pass123") and return the new id.
  async fn register<M: Mailer + 'static>(
    state: &AppState<SqliteStore, M>,
    username: &str,
    role: &str,
  ) -> Uuid {
    let resp = oneshot_raw(
      state.clone(),
      "POST",
      "/users",
      None,
      Some(json!({
        "username": username,
        "email": format!("{username}@example.com"),
        "password": "pass123",
        "role": role,
      })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body = json_body(resp).await;
    Uuid::parse_str(body["user_id"].as_str().unwrap()).unwrap()
  }

  async fn create_article<M: Mailer + 'static>(
    state: &AppState<SqliteStore, M>,
    author: &str,
    title: &str,
    publisher_id: Option<Uuid>,
  ) -> Uuid {
    let mut body = json!({ "title": title, "content": "content" });
    if let Some(p) = publisher_id {
      body["publisher_id"] = json!(p.to_string());
    }
    let resp = oneshot_raw(
      state.clone(),
      "POST",
      "/articles",
      Some(&basic(author)),
      Some(body),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body = json_body(resp).await;
    Uuid::parse_str(body["article_id"].as_str().unwrap()).unwrap()
  }

  // ── Registration & auth ─────────────────────────────────────────────────────

  #[tokio::test]
  async fn register_then_duplicate_email_is_rejected() {
    let state = make_state().await;
    register(&state, "alice", "reader").await;

    let resp = oneshot_raw(
      state,
      "POST",
      "/users",
      None,
      Some(json!({
        "username": "alice2",
        "email": "alice@example.com",
        "password": "pass123",
        "role": "reader",
      })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = json_body(resp).await;
    assert_eq!(body["errors"]["email"], "Email already registered.");
  }

  #[tokio::test]
  async fn registration_never_leaks_the_password_hash() {
    let state = make_state().await;
    let resp = oneshot_raw(
      state,
      "POST",
      "/users",
      None,
      Some(json!({
        "username": "alice",
        "email": "alice@example.com",
        "password": "pass123",
        "role": "reader",
      })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body = json_body(resp).await;
    assert!(body.get("password_hash").is_none(), "body: {body}");
  }

  #[tokio::test]
  async fn unauthenticated_requests_return_401() {
    let state = make_state().await;
    let resp = oneshot_raw(state, "GET", "/feed", None, None).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert!(resp.headers().contains_key(header::WWW_AUTHENTICATE));
  }

  #[tokio::test]
  async fn wrong_password_returns_401() {
    let state = make_state().await;
    register(&state, "alice", "reader").await;

    let bad = format!("Basic {}", B64.encode("alice:wrong"));
    let resp = oneshot_raw(state, "GET", "/feed", Some(&bad), None).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
  }

  // ── The end-to-end scenario ─────────────────────────────────────────────────

  #[tokio::test]
  async fn subscribe_publish_notify_approve_flow() {
    let state = make_state().await;
    register(&state, "r1", "reader").await;
    let j1 = register(&state, "j1", "journalist").await;
    register(&state, "ed", "editor").await;

    // First subscribe creates the edge…
    let resp = oneshot_raw(
      state.clone(),
      "POST",
      &format!("/subscriptions/journalists/{j1}"),
      Some(&basic("r1")),
      None,
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body = json_body(resp).await;
    assert_eq!(body["created"], true);

    // …and the second is an idempotent no-op.
    let resp = oneshot_raw(
      state.clone(),
      "POST",
      &format!("/subscriptions/journalists/{j1}"),
      Some(&basic("r1")),
      None,
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;
    assert_eq!(body["created"], false);
    assert_eq!(body["message"], "Already subscribed.");

    let resp = oneshot_raw(
      state.clone(),
      "GET",
      "/subscriptions",
      Some(&basic("r1")),
      None,
    )
    .await;
    assert_eq!(json_body(resp).await.as_array().unwrap().len(), 1);

    // The article lands unapproved and fans out exactly one notification.
    let article = create_article(&state, "j1", "A1", None).await;

    let resp = oneshot_raw(
      state.clone(),
      "GET",
      "/notifications",
      Some(&basic("r1")),
      None,
    )
    .await;
    let inbox = json_body(resp).await;
    let inbox = inbox.as_array().unwrap();
    assert_eq!(inbox.len(), 1);
    assert_eq!(inbox[0]["message"], "j1 uploaded a new article: A1");

    // Editor approves; a second approval is idempotent and adds no
    // notifications.
    let resp = oneshot_raw(
      state.clone(),
      "POST",
      &format!("/articles/{article}/approve"),
      Some(&basic("ed")),
      None,
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(json_body(resp).await["approved"], true);

    let resp = oneshot_raw(
      state.clone(),
      "POST",
      &format!("/articles/{article}/approve"),
      Some(&basic("ed")),
      None,
    )
    .await;
    assert_eq!(json_body(resp).await["approved"], true);

    let resp = oneshot_raw(
      state,
      "GET",
      "/notifications",
      Some(&basic("r1")),
      None,
    )
    .await;
    assert_eq!(json_body(resp).await.as_array().unwrap().len(), 1);
  }

  // ── Soft denials ────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn reader_creating_an_article_is_soft_denied() {
    let state = make_state().await;
    register(&state, "r1", "reader").await;

    let resp = oneshot_raw(
      state.clone(),
      "POST",
      "/articles",
      Some(&basic("r1")),
      Some(json!({ "title": "Nope", "content": "c" })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers()[header::LOCATION], "/feed");
    assert_eq!(text_body(resp).await, "Only journalists can create articles.");

    // Nothing was persisted.
    let resp = oneshot_raw(state, "GET", "/articles", None, None).await;
    assert!(json_body(resp).await.as_array().unwrap().is_empty());
  }

  #[tokio::test]
  async fn non_editor_approval_redirects_without_mutation() {
    let state = make_state().await;
    register(&state, "j1", "journalist").await;
    let article = create_article(&state, "j1", "Mine", None).await;

    let resp = oneshot_raw(
      state.clone(),
      "POST",
      &format!("/articles/{article}/approve"),
      Some(&basic("j1")),
      None,
    )
    .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(text_body(resp).await, "Only editors can approve articles.");

    let resp = oneshot_raw(
      state,
      "GET",
      &format!("/articles/{article}"),
      Some(&basic("j1")),
      None,
    )
    .await;
    assert_eq!(json_body(resp).await["approved"], false);
  }

  #[tokio::test]
  async fn non_owner_journalist_cannot_delete() {
    let state = make_state().await;
    register(&state, "j1", "journalist").await;
    register(&state, "j2", "journalist").await;
    let article = create_article(&state, "j1", "Mine", None).await;

    let resp = oneshot_raw(
      state.clone(),
      "DELETE",
      &format!("/articles/{article}"),
      Some(&basic("j2")),
      None,
    )
    .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);

    // Still there; the owner may delete it.
    let resp = oneshot_raw(
      state.clone(),
      "DELETE",
      &format!("/articles/{article}"),
      Some(&basic("j1")),
      None,
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = oneshot_raw(
      state,
      "GET",
      &format!("/articles/{article}"),
      Some(&basic("j1")),
      None,
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn reader_is_bounced_off_unapproved_articles() {
    let state = make_state().await;
    register(&state, "r1", "reader").await;
    register(&state, "j1", "journalist").await;
    let article = create_article(&state, "j1", "Pending", None).await;

    let resp = oneshot_raw(
      state.clone(),
      "GET",
      &format!("/articles/{article}"),
      Some(&basic("r1")),
      None,
    )
    .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(text_body(resp).await, "Article not approved yet.");

    // The author still sees it.
    let resp = oneshot_raw(
      state,
      "GET",
      &format!("/articles/{article}"),
      Some(&basic("j1")),
      None,
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
  }

  // ── Feeds ───────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn reader_feed_falls_back_then_narrows() {
    let state = make_state().await;
    register(&state, "r1", "reader").await;
    let j1 = register(&state, "j1", "journalist").await;
    register(&state, "j2", "journalist").await;
    register(&state, "ed", "editor").await;

    let a1 = create_article(&state, "j1", "From j1", None).await;
    let a2 = create_article(&state, "j2", "From j2", None).await;
    for id in [a1, a2] {
      let resp = oneshot_raw(
        state.clone(),
        "POST",
        &format!("/articles/{id}/approve"),
        Some(&basic("ed")),
        None,
      )
      .await;
      assert_eq!(resp.status(), StatusCode::OK);
    }

    // No subscriptions: everything approved, newest first.
    let resp =
      oneshot_raw(state.clone(), "GET", "/feed", Some(&basic("r1")), None).await;
    let feed = json_body(resp).await;
    let feed = feed.as_array().unwrap().clone();
    assert_eq!(feed.len(), 2);
    assert_eq!(feed[0]["title"], "From j2");
    assert_eq!(feed[1]["title"], "From j1");

    // One journalist subscription narrows the feed to that journalist.
    oneshot_raw(
      state.clone(),
      "POST",
      &format!("/subscriptions/journalists/{j1}"),
      Some(&basic("r1")),
      None,
    )
    .await;

    let resp = oneshot_raw(state, "GET", "/feed", Some(&basic("r1")), None).await;
    let feed = json_body(resp).await;
    let feed = feed.as_array().unwrap().clone();
    assert_eq!(feed.len(), 1);
    assert_eq!(feed[0]["title"], "From j1");
  }

  #[tokio::test]
  async fn editor_feed_is_the_approval_queue() {
    let state = make_state().await;
    register(&state, "j1", "journalist").await;
    register(&state, "ed", "editor").await;

    let pending = create_article(&state, "j1", "Pending", None).await;
    let done = create_article(&state, "j1", "Done", None).await;
    oneshot_raw(
      state.clone(),
      "POST",
      &format!("/articles/{done}/approve"),
      Some(&basic("ed")),
      None,
    )
    .await;

    let resp = oneshot_raw(state, "GET", "/feed", Some(&basic("ed")), None).await;
    let feed = json_body(resp).await;
    let feed = feed.as_array().unwrap().clone();
    assert_eq!(feed.len(), 1);
    assert_eq!(feed[0]["article_id"], pending.to_string());
  }

  #[tokio::test]
  async fn journalist_feed_shows_own_articles_any_state() {
    let state = make_state().await;
    register(&state, "j1", "journalist").await;
    register(&state, "j2", "journalist").await;

    create_article(&state, "j1", "Mine", None).await;
    create_article(&state, "j2", "Not mine", None).await;

    let resp = oneshot_raw(state, "GET", "/feed", Some(&basic("j1")), None).await;
    let feed = json_body(resp).await;
    let feed = feed.as_array().unwrap().clone();
    assert_eq!(feed.len(), 1);
    assert_eq!(feed[0]["title"], "Mine");
  }

  // ── Subscription targets ────────────────────────────────────────────────────

  #[tokio::test]
  async fn subscribing_to_a_non_journalist_is_404() {
    let state = make_state().await;
    register(&state, "r1", "reader").await;
    let other_reader = register(&state, "r2", "reader").await;

    let resp = oneshot_raw(
      state.clone(),
      "POST",
      &format!("/subscriptions/journalists/{other_reader}"),
      Some(&basic("r1")),
      None,
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = oneshot_raw(
      state,
      "POST",
      &format!("/subscriptions/journalists/{}", Uuid::new_v4()),
      Some(&basic("r1")),
      None,
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn unsubscribe_of_a_missing_edge_is_not_an_error() {
    let state = make_state().await;
    register(&state, "r1", "reader").await;
    let j1 = register(&state, "j1", "journalist").await;

    let resp = oneshot_raw(
      state,
      "DELETE",
      &format!("/subscriptions/journalists/{j1}"),
      Some(&basic("r1")),
      None,
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(json_body(resp).await["removed"], 0);
  }

  #[tokio::test]
  async fn journalist_cannot_subscribe() {
    let state = make_state().await;
    let j1 = register(&state, "j1", "journalist").await;
    register(&state, "j2", "journalist").await;

    let resp = oneshot_raw(
      state,
      "POST",
      &format!("/subscriptions/journalists/{j1}"),
      Some(&basic("j2")),
      None,
    )
    .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(text_body(resp).await, "Only readers can subscribe.");
  }

  // ── Publishers ──────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn only_editors_create_publishers() {
    let state = make_state().await;
    register(&state, "j1", "journalist").await;
    register(&state, "ed", "editor").await;

    let resp = oneshot_raw(
      state.clone(),
      "POST",
      "/publishers",
      Some(&basic("j1")),
      Some(json!({ "name": "Weekly" })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);

    let resp = oneshot_raw(
      state.clone(),
      "POST",
      "/publishers",
      Some(&basic("ed")),
      Some(json!({ "name": "Weekly" })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    // Duplicate name is a field-level validation failure.
    let resp = oneshot_raw(
      state,
      "POST",
      "/publishers",
      Some(&basic("ed")),
      Some(json!({ "name": "Weekly" })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = json_body(resp).await;
    assert_eq!(body["errors"]["name"], "Publisher name already taken.");
  }

  // ── Newsletters ─────────────────────────────────────────────────────────────

  async fn newsletter_fixture<M: Mailer + 'static>(
    state: &AppState<SqliteStore, M>,
  ) -> Uuid {
    register(state, "r1", "reader").await;
    register(state, "r2", "reader").await;
    register(state, "j1", "journalist").await;
    register(state, "ed", "editor").await;

    let resp = oneshot_raw(
      state.clone(),
      "POST",
      "/publishers",
      Some(&basic("ed")),
      Some(json!({ "name": "Weekly" })),
    )
    .await;
    let publisher =
      Uuid::parse_str(json_body(resp).await["publisher_id"].as_str().unwrap())
        .unwrap();

    for reader in ["r1", "r2"] {
      oneshot_raw(
        state.clone(),
        "POST",
        &format!("/subscriptions/publishers/{publisher}"),
        Some(&basic(reader)),
        None,
      )
      .await;
    }

    let resp = oneshot_raw(
      state.clone(),
      "POST",
      "/newsletters",
      Some(&basic("j1")),
      Some(json!({
        "title": "Issue 1",
        "content": "the content",
        "publisher_id": publisher.to_string(),
      })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    Uuid::parse_str(json_body(resp).await["newsletter_id"].as_str().unwrap())
      .unwrap()
  }

  #[tokio::test]
  async fn newsletter_approval_emails_publisher_subscribers() {
    let state = make_state().await;
    let newsletter = newsletter_fixture(&state).await;

    let resp = oneshot_raw(
      state.clone(),
      "POST",
      &format!("/newsletters/{newsletter}/approve"),
      Some(&basic("ed")),
      None,
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;
    assert_eq!(body["newsletter"]["approved"], true);
    assert_eq!(body["emails_sent"], 2);

    let sent = state.mailer.as_ref().unwrap().sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].subject, "New Newsletter: Issue 1");
    assert_eq!(sent[0].body, "the content");
    assert_eq!(sent[0].recipients, vec!["r1@example.com", "r2@example.com"]);
  }

  #[tokio::test]
  async fn newsletter_transport_failure_is_a_hard_error() {
    let state = state_with(Some(FailingMailer)).await;
    let newsletter = newsletter_fixture(&state).await;

    let resp = oneshot_raw(
      state,
      "POST",
      &format!("/newsletters/{newsletter}/approve"),
      Some(&basic("ed")),
      None,
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
  }

  #[tokio::test]
  async fn newsletter_approval_without_a_mailer_still_succeeds() {
    let state: AppState<SqliteStore, RecordingMailer> = state_with(None).await;
    let newsletter = newsletter_fixture(&state).await;

    let resp = oneshot_raw(
      state,
      "POST",
      &format!("/newsletters/{newsletter}/approve"),
      Some(&basic("ed")),
      None,
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;
    assert_eq!(body["newsletter"]["approved"], true);
    assert_eq!(body["emails_sent"], 0);
  }
}
