//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! All timestamps are stored as RFC 3339 strings. UUIDs are stored as
//! hyphenated lowercase strings. Roles are stored as their lowercase names.

use byline_core::{
  content::{Article, Newsletter, Publisher},
  subscription::{Notification, Subscription},
  user::User,
};
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw strings read directly from a `users` row.
pub struct RawUser {
  pub user_id:       String,
  pub username:      String,
  pub email:         String,
  pub password_hash: String,
  pub role:          String,
  pub created_at:    String,
}

impl RawUser {
  pub fn into_user(self) -> Result<User> {
    Ok(User {
      user_id:       decode_uuid(&self.user_id)?,
      username:      self.username,
      email:         self.email,
      password_hash: self.password_hash,
      role:          self.role.parse()?,
      created_at:    decode_dt(&self.created_at)?,
    })
  }
}

/// Raw strings read directly from a `publishers` row.
pub struct RawPublisher {
  pub publisher_id: String,
  pub name:         String,
  pub owner_id:     Option<String>,
  pub created_at:   String,
}

impl RawPublisher {
  pub fn into_publisher(self) -> Result<Publisher> {
    Ok(Publisher {
      publisher_id: decode_uuid(&self.publisher_id)?,
      name:         self.name,
      owner_id:     self.owner_id.as_deref().map(decode_uuid).transpose()?,
      created_at:   decode_dt(&self.created_at)?,
    })
  }
}

/// Raw strings read directly from an `articles` row.
pub struct RawArticle {
  pub article_id:   String,
  pub title:        String,
  pub content:      String,
  pub approved:     bool,
  pub created_by:   String,
  pub publisher_id: Option<String>,
  pub created_at:   String,
}

impl RawArticle {
  pub fn into_article(self) -> Result<Article> {
    Ok(Article {
      article_id:   decode_uuid(&self.article_id)?,
      title:        self.title,
      content:      self.content,
      approved:     self.approved,
      created_by:   decode_uuid(&self.created_by)?,
      publisher_id: self.publisher_id.as_deref().map(decode_uuid).transpose()?,
      created_at:   decode_dt(&self.created_at)?,
    })
  }
}

/// Raw strings read directly from a `newsletters` row.
pub struct RawNewsletter {
  pub newsletter_id: String,
  pub title:         String,
  pub content:       String,
  pub author_id:     String,
  pub publisher_id:  String,
  pub approved:      bool,
  pub created_at:    String,
}

impl RawNewsletter {
  pub fn into_newsletter(self) -> Result<Newsletter> {
    Ok(Newsletter {
      newsletter_id: decode_uuid(&self.newsletter_id)?,
      title:         self.title,
      content:       self.content,
      author_id:     decode_uuid(&self.author_id)?,
      publisher_id:  decode_uuid(&self.publisher_id)?,
      approved:      self.approved,
      created_at:    decode_dt(&self.created_at)?,
    })
  }
}

/// Raw strings read directly from a `subscriptions` row.
pub struct RawSubscription {
  pub subscription_id: String,
  pub reader_id:       String,
  pub journalist_id:   Option<String>,
  pub publisher_id:    Option<String>,
  pub created_at:      String,
}

impl RawSubscription {
  pub fn into_subscription(self) -> Result<Subscription> {
    Ok(Subscription {
      subscription_id: decode_uuid(&self.subscription_id)?,
      reader_id:       decode_uuid(&self.reader_id)?,
      journalist_id:   self.journalist_id.as_deref().map(decode_uuid).transpose()?,
      publisher_id:    self.publisher_id.as_deref().map(decode_uuid).transpose()?,
      created_at:      decode_dt(&self.created_at)?,
    })
  }
}

/// Raw strings read directly from a `notifications` row.
pub struct RawNotification {
  pub notification_id: String,
  pub recipient_id:    String,
  pub message:         String,
  pub created_at:      String,
}

impl RawNotification {
  pub fn into_notification(self) -> Result<Notification> {
    Ok(Notification {
      notification_id: decode_uuid(&self.notification_id)?,
      recipient_id:    decode_uuid(&self.recipient_id)?,
      message:         self.message,
      created_at:      decode_dt(&self.created_at)?,
    })
  }
}
