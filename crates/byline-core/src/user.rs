//! User accounts and the role taxonomy.
//!
//! Roles are a closed enumeration so the access policy can match over them
//! exhaustively; there is no string-compare dispatch anywhere above the
//! storage layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// What a user is allowed to do in the system. Fixed at registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
  /// Consumes approved content; owns subscription edges.
  Reader,
  /// Authors articles and newsletters.
  Journalist,
  /// Approves content and manages publishers.
  Editor,
}

impl Role {
  /// The lowercase name stored in the database `role` column.
  /// Must match the `rename_all = "lowercase"` serde tags above.
  pub fn as_str(self) -> &'static str {
    match self {
      Role::Reader => "reader",
      Role::Journalist => "journalist",
      Role::Editor => "editor",
    }
  }
}

impl std::str::FromStr for Role {
  type Err = crate::Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "reader" => Ok(Role::Reader),
      "journalist" => Ok(Role::Journalist),
      "editor" => Ok(Role::Editor),
      other => Err(crate::Error::UnknownRole(other.to_owned())),
    }
  }
}

/// A registered account. The password hash is an argon2 PHC string and is
/// never serialised into API responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
  pub user_id:    Uuid,
  pub username:   String,
  pub email:      String,
  #[serde(skip_serializing)]
  pub password_hash: String,
  pub role:       Role,
  pub created_at: DateTime<Utc>,
}

/// Input to [`crate::store::NewsStore::create_user`].
/// The caller hashes the password; the store never sees plaintext.
#[derive(Debug, Clone)]
pub struct NewUser {
  pub username:      String,
  pub email:         String,
  pub password_hash: String,
  pub role:          Role,
}
