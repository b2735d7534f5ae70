//! Publishers and the two content kinds — articles and newsletters.
//!
//! Both content kinds carry an `approved` flag that starts false and is
//! flipped only through the editor-gated approval operations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ─── Publisher ───────────────────────────────────────────────────────────────

/// A named publishing organisation, optionally owned by a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Publisher {
  pub publisher_id: Uuid,
  pub name:         String,
  pub owner_id:     Option<Uuid>,
  pub created_at:   DateTime<Utc>,
}

// ─── Article ─────────────────────────────────────────────────────────────────

/// A news article authored by a journalist. Unapproved until an editor
/// flips the flag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
  pub article_id:   Uuid,
  pub title:        String,
  pub content:      String,
  pub approved:     bool,
  pub created_by:   Uuid,
  pub publisher_id: Option<Uuid>,
  pub created_at:   DateTime<Utc>,
}

/// Input to [`crate::store::NewsStore::create_article`].
/// `approved` is always false on creation; it is not accepted from callers.
#[derive(Debug, Clone)]
pub struct NewArticle {
  pub title:        String,
  pub content:      String,
  pub created_by:   Uuid,
  pub publisher_id: Option<Uuid>,
}

/// Mutable fields for [`crate::store::NewsStore::update_article`].
/// The approval flag has its own editor-gated operation and is not part of
/// a content update.
#[derive(Debug, Clone)]
pub struct ArticleUpdate {
  pub title:   String,
  pub content: String,
}

// ─── Newsletter ──────────────────────────────────────────────────────────────

/// A newsletter issue tied to a publisher. Approval triggers email dispatch
/// to the publisher's subscribers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Newsletter {
  pub newsletter_id: Uuid,
  pub title:         String,
  pub content:       String,
  pub author_id:     Uuid,
  pub publisher_id:  Uuid,
  pub approved:      bool,
  pub created_at:    DateTime<Utc>,
}

/// Input to [`crate::store::NewsStore::create_newsletter`].
#[derive(Debug, Clone)]
pub struct NewNewsletter {
  pub title:        String,
  pub content:      String,
  pub author_id:    Uuid,
  pub publisher_id: Uuid,
}
