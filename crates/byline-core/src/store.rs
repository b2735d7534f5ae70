//! The `NewsStore` trait — the persistence seam for the whole service.
//!
//! The trait is implemented by storage backends (e.g. `byline-store-sqlite`).
//! Higher layers (`byline-api`) depend on this abstraction, not on any
//! concrete backend.

use std::future::Future;

use uuid::Uuid;

use crate::{
  content::{Article, ArticleUpdate, NewArticle, NewNewsletter, Newsletter, Publisher},
  subscription::{Notification, Subscription, SubscriptionTarget},
  user::{NewUser, Role, User},
};

/// Abstraction over a Byline storage backend.
///
/// Uniqueness rules (username, email, publisher name, one subscription edge
/// per reader/target pair) are the backend's responsibility so that
/// concurrent writers cannot race a check-then-insert.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait NewsStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Users ─────────────────────────────────────────────────────────────

  /// Persist a new account. Fails on a duplicate username or email.
  fn create_user(
    &self,
    input: NewUser,
  ) -> impl Future<Output = Result<User, Self::Error>> + Send + '_;

  /// Retrieve a user by UUID. Returns `None` if not found.
  fn get_user(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<User>, Self::Error>> + Send + '_;

  /// Retrieve a user by username — the login lookup.
  fn get_user_by_username<'a>(
    &'a self,
    username: &'a str,
  ) -> impl Future<Output = Result<Option<User>, Self::Error>> + Send + 'a;

  /// Retrieve a user by email — the registration duplicate check.
  fn get_user_by_email<'a>(
    &'a self,
    email: &'a str,
  ) -> impl Future<Output = Result<Option<User>, Self::Error>> + Send + 'a;

  /// List all users, optionally filtered by role.
  fn list_users(
    &self,
    role: Option<Role>,
  ) -> impl Future<Output = Result<Vec<User>, Self::Error>> + Send + '_;

  // ── Publishers ────────────────────────────────────────────────────────

  /// Create a publisher with a unique name.
  fn create_publisher(
    &self,
    name: String,
    owner_id: Option<Uuid>,
  ) -> impl Future<Output = Result<Publisher, Self::Error>> + Send + '_;

  fn get_publisher(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Publisher>, Self::Error>> + Send + '_;

  /// Retrieve a publisher by its unique name.
  fn get_publisher_by_name<'a>(
    &'a self,
    name: &'a str,
  ) -> impl Future<Output = Result<Option<Publisher>, Self::Error>> + Send + 'a;

  fn list_publishers(
    &self,
  ) -> impl Future<Output = Result<Vec<Publisher>, Self::Error>> + Send + '_;

  // ── Articles ──────────────────────────────────────────────────────────

  /// Persist a new article. `approved` always starts false.
  fn create_article(
    &self,
    input: NewArticle,
  ) -> impl Future<Output = Result<Article, Self::Error>> + Send + '_;

  fn get_article(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Article>, Self::Error>> + Send + '_;

  /// Replace an article's title and content. Errors if the article does not
  /// exist. The approval flag is untouched.
  fn update_article(
    &self,
    id: Uuid,
    update: ArticleUpdate,
  ) -> impl Future<Output = Result<Article, Self::Error>> + Send + '_;

  /// Delete an article. Returns `false` if nothing matched.
  fn delete_article(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  /// Set the approval flag. Idempotent — approving an already-approved
  /// article is a no-op returning the unchanged row.
  fn approve_article(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Article, Self::Error>> + Send + '_;

  /// A journalist's own articles, any approval state, newest first.
  fn list_articles_by_author(
    &self,
    author_id: Uuid,
  ) -> impl Future<Output = Result<Vec<Article>, Self::Error>> + Send + '_;

  /// The editor approval queue: all unapproved articles, newest first.
  fn list_unapproved_articles(
    &self,
  ) -> impl Future<Output = Result<Vec<Article>, Self::Error>> + Send + '_;

  /// All approved articles, newest first.
  fn list_approved_articles(
    &self,
  ) -> impl Future<Output = Result<Vec<Article>, Self::Error>> + Send + '_;

  /// The reader feed: approved articles authored by a subscribed journalist
  /// or published under a subscribed publisher, deduplicated, newest first.
  /// A reader with no subscriptions at all gets every approved article.
  fn reader_feed(
    &self,
    reader_id: Uuid,
  ) -> impl Future<Output = Result<Vec<Article>, Self::Error>> + Send + '_;

  // ── Newsletters ───────────────────────────────────────────────────────

  fn create_newsletter(
    &self,
    input: NewNewsletter,
  ) -> impl Future<Output = Result<Newsletter, Self::Error>> + Send + '_;

  fn get_newsletter(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Newsletter>, Self::Error>> + Send + '_;

  /// Set the newsletter approval flag; idempotent like article approval.
  fn approve_newsletter(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Newsletter, Self::Error>> + Send + '_;

  // ── Subscription graph ────────────────────────────────────────────────

  /// Create a subscription edge, or return the existing one unchanged.
  ///
  /// The boolean is `true` only when a new edge was inserted. Must be atomic
  /// with respect to the uniqueness constraint: two concurrent calls for the
  /// same (reader, target) leave exactly one edge.
  fn subscribe(
    &self,
    reader_id: Uuid,
    target: SubscriptionTarget,
  ) -> impl Future<Output = Result<(Subscription, bool), Self::Error>> + Send + '_;

  /// Remove the matching edge. Returns the number of rows deleted — zero is
  /// not an error.
  fn unsubscribe(
    &self,
    reader_id: Uuid,
    target: SubscriptionTarget,
  ) -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;

  /// All edges owned by a reader, in insertion order.
  fn list_subscriptions(
    &self,
    reader_id: Uuid,
  ) -> impl Future<Output = Result<Vec<Subscription>, Self::Error>> + Send + '_;

  /// Edges targeting a journalist — the article fan-out read.
  fn journalist_followers(
    &self,
    journalist_id: Uuid,
  ) -> impl Future<Output = Result<Vec<Subscription>, Self::Error>> + Send + '_;

  /// Edges targeting a publisher — the article fan-out read.
  fn publisher_followers(
    &self,
    publisher_id: Uuid,
  ) -> impl Future<Output = Result<Vec<Subscription>, Self::Error>> + Send + '_;

  /// Non-empty email addresses of readers subscribed to a publisher — the
  /// newsletter dispatch read.
  fn publisher_subscriber_emails(
    &self,
    publisher_id: Uuid,
  ) -> impl Future<Output = Result<Vec<String>, Self::Error>> + Send + '_;

  // ── Notifications ─────────────────────────────────────────────────────

  /// Materialise one notification record. Called solely by the fan-out.
  fn create_notification(
    &self,
    recipient_id: Uuid,
    message: String,
  ) -> impl Future<Output = Result<Notification, Self::Error>> + Send + '_;

  /// A user's notifications, newest first.
  fn notifications_for(
    &self,
    recipient_id: Uuid,
  ) -> impl Future<Output = Result<Vec<Notification>, Self::Error>> + Send + '_;
}
