//! Subscription edges and the notifications they fan out to.
//!
//! An edge connects one reader to exactly one target — a journalist or a
//! publisher. Uniqueness per (reader, target) is enforced by the store;
//! subscribing twice is an idempotent no-op.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ─── Target ──────────────────────────────────────────────────────────────────

/// What a reader subscribes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum SubscriptionTarget {
  Journalist(Uuid),
  Publisher(Uuid),
}

// ─── Subscription ────────────────────────────────────────────────────────────

/// A directed edge from a reader to a journalist or a publisher.
/// Exactly one of `journalist_id` / `publisher_id` is set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subscription {
  pub subscription_id: Uuid,
  pub reader_id:       Uuid,
  pub journalist_id:   Option<Uuid>,
  pub publisher_id:    Option<Uuid>,
  pub created_at:      DateTime<Utc>,
}

// ─── Notification ────────────────────────────────────────────────────────────

/// A materialised notification record. Immutable once created; readers can
/// only list their own.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
  pub notification_id: Uuid,
  pub recipient_id:    Uuid,
  pub message:         String,
  pub created_at:      DateTime<Utc>,
}
