//! [`SqliteStore`] — the SQLite implementation of [`NewsStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use byline_core::{
  content::{Article, ArticleUpdate, NewArticle, NewNewsletter, Newsletter, Publisher},
  store::NewsStore,
  subscription::{Notification, Subscription, SubscriptionTarget},
  user::{NewUser, Role, User},
};

use crate::{
  encode::{
    encode_dt, encode_uuid, RawArticle, RawNewsletter, RawNotification,
    RawPublisher, RawSubscription, RawUser,
  },
  schema::SCHEMA,
  Error, Result,
};

// ─── Row mappers ─────────────────────────────────────────────────────────────

const USER_COLS: &str = "user_id, username, email, password_hash, role, created_at";
const ARTICLE_COLS: &str =
  "article_id, title, content, approved, created_by, publisher_id, created_at";

fn user_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawUser> {
  Ok(RawUser {
    user_id:       row.get(0)?,
    username:      row.get(1)?,
    email:         row.get(2)?,
    password_hash: row.get(3)?,
    role:          row.get(4)?,
    created_at:    row.get(5)?,
  })
}

fn publisher_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawPublisher> {
  Ok(RawPublisher {
    publisher_id: row.get(0)?,
    name:         row.get(1)?,
    owner_id:     row.get(2)?,
    created_at:   row.get(3)?,
  })
}

fn article_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawArticle> {
  Ok(RawArticle {
    article_id:   row.get(0)?,
    title:        row.get(1)?,
    content:      row.get(2)?,
    approved:     row.get(3)?,
    created_by:   row.get(4)?,
    publisher_id: row.get(5)?,
    created_at:   row.get(6)?,
  })
}

fn newsletter_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawNewsletter> {
  Ok(RawNewsletter {
    newsletter_id: row.get(0)?,
    title:         row.get(1)?,
    content:       row.get(2)?,
    author_id:     row.get(3)?,
    publisher_id:  row.get(4)?,
    approved:      row.get(5)?,
    created_at:    row.get(6)?,
  })
}

fn subscription_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawSubscription> {
  Ok(RawSubscription {
    subscription_id: row.get(0)?,
    reader_id:       row.get(1)?,
    journalist_id:   row.get(2)?,
    publisher_id:    row.get(3)?,
    created_at:      row.get(4)?,
  })
}

fn notification_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawNotification> {
  Ok(RawNotification {
    notification_id: row.get(0)?,
    recipient_id:    row.get(1)?,
    message:         row.get(2)?,
    created_at:      row.get(3)?,
  })
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Byline news store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Fetch the list of articles produced by `sql` with `params`; every query
  /// must select [`ARTICLE_COLS`] in order.
  async fn query_articles(
    &self,
    sql: &'static str,
    params: Vec<String>,
  ) -> Result<Vec<Article>> {
    let raws: Vec<RawArticle> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(sql)?;
        let rows = stmt
          .query_map(rusqlite::params_from_iter(params), article_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawArticle::into_article).collect()
  }
}

// ─── NewsStore impl ──────────────────────────────────────────────────────────

impl NewsStore for SqliteStore {
  type Error = Error;

  // ── Users ─────────────────────────────────────────────────────────────────

  async fn create_user(&self, input: NewUser) -> Result<User> {
    let user = User {
      user_id:       Uuid::new_v4(),
      username:      input.username,
      email:         input.email,
      password_hash: input.password_hash,
      role:          input.role,
      created_at:    Utc::now(),
    };

    let id_str   = encode_uuid(user.user_id);
    let username = user.username.clone();
    let email    = user.email.clone();
    let hash     = user.password_hash.clone();
    let role_str = user.role.as_str().to_owned();
    let at_str   = encode_dt(user.created_at);

    let outcome = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO users (user_id, username, email, password_hash, role, created_at)
           VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
          rusqlite::params![id_str, username, email, hash, role_str, at_str],
        )?;
        Ok(())
      })
      .await;

    match outcome {
      Ok(()) => Ok(user),
      Err(e) => {
        let err = Error::Database(e);
        let conflict = match err.constraint_message() {
          Some(m) if m.contains("users.username") => {
            Some(Error::UsernameTaken(user.username))
          }
          Some(m) if m.contains("users.email") => {
            Some(Error::EmailTaken(user.email))
          }
          _ => None,
        };
        Err(conflict.unwrap_or(err))
      }
    }
  }

  async fn get_user(&self, id: Uuid) -> Result<Option<User>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawUser> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!("SELECT {USER_COLS} FROM users WHERE user_id = ?1"),
            rusqlite::params![id_str],
            user_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawUser::into_user).transpose()
  }

  async fn get_user_by_username<'a>(&'a self, username: &'a str) -> Result<Option<User>> {
    let username = username.to_owned();

    let raw: Option<RawUser> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!("SELECT {USER_COLS} FROM users WHERE username = ?1"),
            rusqlite::params![username],
            user_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawUser::into_user).transpose()
  }

  async fn get_user_by_email<'a>(&'a self, email: &'a str) -> Result<Option<User>> {
    let email = email.to_owned();

    let raw: Option<RawUser> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!("SELECT {USER_COLS} FROM users WHERE email = ?1"),
            rusqlite::params![email],
            user_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawUser::into_user).transpose()
  }

  async fn list_users(&self, role: Option<Role>) -> Result<Vec<User>> {
    let role_str = role.map(Role::as_str).map(str::to_owned);

    let raws: Vec<RawUser> = self
      .conn
      .call(move |conn| {
        let rows = if let Some(r) = role_str {
          let mut stmt = conn.prepare(&format!(
            "SELECT {USER_COLS} FROM users WHERE role = ?1 ORDER BY username"
          ))?;
          stmt
            .query_map(rusqlite::params![r], user_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?
        } else {
          let mut stmt = conn
            .prepare(&format!("SELECT {USER_COLS} FROM users ORDER BY username"))?;
          stmt
            .query_map([], user_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?
        };
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawUser::into_user).collect()
  }

  // ── Publishers ────────────────────────────────────────────────────────────

  async fn create_publisher(
    &self,
    name: String,
    owner_id: Option<Uuid>,
  ) -> Result<Publisher> {
    let publisher = Publisher {
      publisher_id: Uuid::new_v4(),
      name,
      owner_id,
      created_at: Utc::now(),
    };

    let id_str    = encode_uuid(publisher.publisher_id);
    let name_arg  = publisher.name.clone();
    let owner_str = publisher.owner_id.map(encode_uuid);
    let at_str    = encode_dt(publisher.created_at);

    let outcome = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO publishers (publisher_id, name, owner_id, created_at)
           VALUES (?1, ?2, ?3, ?4)",
          rusqlite::params![id_str, name_arg, owner_str, at_str],
        )?;
        Ok(())
      })
      .await;

    match outcome {
      Ok(()) => Ok(publisher),
      Err(e) => {
        let err = Error::Database(e);
        let conflict = match err.constraint_message() {
          Some(m) if m.contains("publishers.name") => {
            Some(Error::PublisherNameTaken(publisher.name))
          }
          _ => None,
        };
        Err(conflict.unwrap_or(err))
      }
    }
  }

  async fn get_publisher(&self, id: Uuid) -> Result<Option<Publisher>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawPublisher> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            "SELECT publisher_id, name, owner_id, created_at
             FROM publishers WHERE publisher_id = ?1",
            rusqlite::params![id_str],
            publisher_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawPublisher::into_publisher).transpose()
  }

  async fn get_publisher_by_name<'a>(&'a self, name: &'a str) -> Result<Option<Publisher>> {
    let name = name.to_owned();

    let raw: Option<RawPublisher> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            "SELECT publisher_id, name, owner_id, created_at
             FROM publishers WHERE name = ?1",
            rusqlite::params![name],
            publisher_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawPublisher::into_publisher).transpose()
  }

  async fn list_publishers(&self) -> Result<Vec<Publisher>> {
    let raws: Vec<RawPublisher> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT publisher_id, name, owner_id, created_at
           FROM publishers ORDER BY name",
        )?;
        let rows = stmt
          .query_map([], publisher_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawPublisher::into_publisher).collect()
  }

  // ── Articles ──────────────────────────────────────────────────────────────

  async fn create_article(&self, input: NewArticle) -> Result<Article> {
    let article = Article {
      article_id:   Uuid::new_v4(),
      title:        input.title,
      content:      input.content,
      approved:     false,
      created_by:   input.created_by,
      publisher_id: input.publisher_id,
      created_at:   Utc::now(),
    };

    let id_str        = encode_uuid(article.article_id);
    let title         = article.title.clone();
    let content       = article.content.clone();
    let author_str    = encode_uuid(article.created_by);
    let publisher_str = article.publisher_id.map(encode_uuid);
    let at_str        = encode_dt(article.created_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO articles
             (article_id, title, content, approved, created_by, publisher_id, created_at)
           VALUES (?1, ?2, ?3, 0, ?4, ?5, ?6)",
          rusqlite::params![id_str, title, content, author_str, publisher_str, at_str],
        )?;
        Ok(())
      })
      .await?;

    Ok(article)
  }

  async fn get_article(&self, id: Uuid) -> Result<Option<Article>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawArticle> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!("SELECT {ARTICLE_COLS} FROM articles WHERE article_id = ?1"),
            rusqlite::params![id_str],
            article_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawArticle::into_article).transpose()
  }

  async fn update_article(&self, id: Uuid, update: ArticleUpdate) -> Result<Article> {
    let id_str = encode_uuid(id);

    let raw: Option<RawArticle> = self
      .conn
      .call(move |conn| {
        conn.execute(
          "UPDATE articles SET title = ?2, content = ?3 WHERE article_id = ?1",
          rusqlite::params![id_str, update.title, update.content],
        )?;
        Ok(
          conn
            .query_row(
              &format!("SELECT {ARTICLE_COLS} FROM articles WHERE article_id = ?1"),
              rusqlite::params![id_str],
              article_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw
      .ok_or(Error::ArticleNotFound(id))
      .and_then(RawArticle::into_article)
  }

  async fn delete_article(&self, id: Uuid) -> Result<bool> {
    let id_str = encode_uuid(id);

    let deleted = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM articles WHERE article_id = ?1",
          rusqlite::params![id_str],
        )?)
      })
      .await?;

    Ok(deleted > 0)
  }

  async fn approve_article(&self, id: Uuid) -> Result<Article> {
    let id_str = encode_uuid(id);

    let raw: Option<RawArticle> = self
      .conn
      .call(move |conn| {
        conn.execute(
          "UPDATE articles SET approved = 1 WHERE article_id = ?1",
          rusqlite::params![id_str],
        )?;
        Ok(
          conn
            .query_row(
              &format!("SELECT {ARTICLE_COLS} FROM articles WHERE article_id = ?1"),
              rusqlite::params![id_str],
              article_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw
      .ok_or(Error::ArticleNotFound(id))
      .and_then(RawArticle::into_article)
  }

  async fn list_articles_by_author(&self, author_id: Uuid) -> Result<Vec<Article>> {
    self
      .query_articles(
        "SELECT article_id, title, content, approved, created_by, publisher_id, created_at
         FROM articles WHERE created_by = ?1 ORDER BY created_at DESC",
        vec![encode_uuid(author_id)],
      )
      .await
  }

  async fn list_unapproved_articles(&self) -> Result<Vec<Article>> {
    self
      .query_articles(
        "SELECT article_id, title, content, approved, created_by, publisher_id, created_at
         FROM articles WHERE approved = 0 ORDER BY created_at DESC",
        vec![],
      )
      .await
  }

  async fn list_approved_articles(&self) -> Result<Vec<Article>> {
    self
      .query_articles(
        "SELECT article_id, title, content, approved, created_by, publisher_id, created_at
         FROM articles WHERE approved = 1 ORDER BY created_at DESC",
        vec![],
      )
      .await
  }

  async fn reader_feed(&self, reader_id: Uuid) -> Result<Vec<Article>> {
    let reader_str = encode_uuid(reader_id);

    // Both the subscription count and the article read happen in one store
    // call, so the feed is computed against a single read snapshot.
    let raws: Vec<RawArticle> = self
      .conn
      .call(move |conn| {
        let edges: i64 = conn.query_row(
          "SELECT COUNT(*) FROM subscriptions WHERE reader_id = ?1",
          rusqlite::params![reader_str],
          |row| row.get(0),
        )?;

        let rows = if edges == 0 {
          // No subscriptions: the feed falls back to every approved article.
          let mut stmt = conn.prepare(&format!(
            "SELECT {ARTICLE_COLS} FROM articles
             WHERE approved = 1 ORDER BY created_at DESC"
          ))?;
          stmt
            .query_map([], article_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?
        } else {
          let mut stmt = conn.prepare(
            "SELECT DISTINCT a.article_id, a.title, a.content, a.approved,
                    a.created_by, a.publisher_id, a.created_at
             FROM articles a
             JOIN subscriptions s ON s.reader_id = ?1
              AND (s.journalist_id = a.created_by
                   OR (s.publisher_id IS NOT NULL
                       AND s.publisher_id = a.publisher_id))
             WHERE a.approved = 1
             ORDER BY a.created_at DESC",
          )?;
          stmt
            .query_map(rusqlite::params![reader_str], article_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?
        };
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawArticle::into_article).collect()
  }

  // ── Newsletters ───────────────────────────────────────────────────────────

  async fn create_newsletter(&self, input: NewNewsletter) -> Result<Newsletter> {
    let newsletter = Newsletter {
      newsletter_id: Uuid::new_v4(),
      title:         input.title,
      content:       input.content,
      author_id:     input.author_id,
      publisher_id:  input.publisher_id,
      approved:      false,
      created_at:    Utc::now(),
    };

    let id_str        = encode_uuid(newsletter.newsletter_id);
    let title         = newsletter.title.clone();
    let content       = newsletter.content.clone();
    let author_str    = encode_uuid(newsletter.author_id);
    let publisher_str = encode_uuid(newsletter.publisher_id);
    let at_str        = encode_dt(newsletter.created_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO newsletters
             (newsletter_id, title, content, author_id, publisher_id, approved, created_at)
           VALUES (?1, ?2, ?3, ?4, ?5, 0, ?6)",
          rusqlite::params![id_str, title, content, author_str, publisher_str, at_str],
        )?;
        Ok(())
      })
      .await?;

    Ok(newsletter)
  }

  async fn get_newsletter(&self, id: Uuid) -> Result<Option<Newsletter>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawNewsletter> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            "SELECT newsletter_id, title, content, author_id, publisher_id, approved, created_at
             FROM newsletters WHERE newsletter_id = ?1",
            rusqlite::params![id_str],
            newsletter_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawNewsletter::into_newsletter).transpose()
  }

  async fn approve_newsletter(&self, id: Uuid) -> Result<Newsletter> {
    let id_str = encode_uuid(id);

    let raw: Option<RawNewsletter> = self
      .conn
      .call(move |conn| {
        conn.execute(
          "UPDATE newsletters SET approved = 1 WHERE newsletter_id = ?1",
          rusqlite::params![id_str],
        )?;
        Ok(
          conn
            .query_row(
              "SELECT newsletter_id, title, content, author_id, publisher_id, approved, created_at
               FROM newsletters WHERE newsletter_id = ?1",
              rusqlite::params![id_str],
              newsletter_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw
      .ok_or(Error::NewsletterNotFound(id))
      .and_then(RawNewsletter::into_newsletter)
  }

  // ── Subscription graph ────────────────────────────────────────────────────

  async fn subscribe(
    &self,
    reader_id: Uuid,
    target: SubscriptionTarget,
  ) -> Result<(Subscription, bool)> {
    let reader_str = encode_uuid(reader_id);
    let new_id_str = encode_uuid(Uuid::new_v4());
    let at_str     = encode_dt(Utc::now());

    // The insert and the re-read run in one store call against the partial
    // unique indexes, so two concurrent subscribes for the same (reader,
    // target) leave exactly one edge and both callers get it back.
    let (raw, created): (RawSubscription, bool) = match target {
      SubscriptionTarget::Journalist(journalist_id) => {
        let target_str = encode_uuid(journalist_id);
        self
          .conn
          .call(move |conn| {
            let inserted = conn.execute(
              "INSERT INTO subscriptions
                 (subscription_id, reader_id, journalist_id, publisher_id, created_at)
               VALUES (?1, ?2, ?3, NULL, ?4)
               ON CONFLICT DO NOTHING",
              rusqlite::params![new_id_str, reader_str, target_str, at_str],
            )?;
            let row = conn.query_row(
              "SELECT subscription_id, reader_id, journalist_id, publisher_id, created_at
               FROM subscriptions WHERE reader_id = ?1 AND journalist_id = ?2",
              rusqlite::params![reader_str, target_str],
              subscription_row,
            )?;
            Ok((row, inserted > 0))
          })
          .await?
      }
      SubscriptionTarget::Publisher(publisher_id) => {
        let target_str = encode_uuid(publisher_id);
        self
          .conn
          .call(move |conn| {
            let inserted = conn.execute(
              "INSERT INTO subscriptions
                 (subscription_id, reader_id, journalist_id, publisher_id, created_at)
               VALUES (?1, ?2, NULL, ?3, ?4)
               ON CONFLICT DO NOTHING",
              rusqlite::params![new_id_str, reader_str, target_str, at_str],
            )?;
            let row = conn.query_row(
              "SELECT subscription_id, reader_id, journalist_id, publisher_id, created_at
               FROM subscriptions WHERE reader_id = ?1 AND publisher_id = ?2",
              rusqlite::params![reader_str, target_str],
              subscription_row,
            )?;
            Ok((row, inserted > 0))
          })
          .await?
      }
    };

    Ok((raw.into_subscription()?, created))
  }

  async fn unsubscribe(
    &self,
    reader_id: Uuid,
    target: SubscriptionTarget,
  ) -> Result<u64> {
    let reader_str = encode_uuid(reader_id);

    let removed = match target {
      SubscriptionTarget::Journalist(journalist_id) => {
        let target_str = encode_uuid(journalist_id);
        self
          .conn
          .call(move |conn| {
            Ok(conn.execute(
              "DELETE FROM subscriptions WHERE reader_id = ?1 AND journalist_id = ?2",
              rusqlite::params![reader_str, target_str],
            )?)
          })
          .await?
      }
      SubscriptionTarget::Publisher(publisher_id) => {
        let target_str = encode_uuid(publisher_id);
        self
          .conn
          .call(move |conn| {
            Ok(conn.execute(
              "DELETE FROM subscriptions WHERE reader_id = ?1 AND publisher_id = ?2",
              rusqlite::params![reader_str, target_str],
            )?)
          })
          .await?
      }
    };

    Ok(removed as u64)
  }

  async fn list_subscriptions(&self, reader_id: Uuid) -> Result<Vec<Subscription>> {
    let reader_str = encode_uuid(reader_id);

    let raws: Vec<RawSubscription> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT subscription_id, reader_id, journalist_id, publisher_id, created_at
           FROM subscriptions WHERE reader_id = ?1 ORDER BY created_at",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![reader_str], subscription_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws
      .into_iter()
      .map(RawSubscription::into_subscription)
      .collect()
  }

  async fn journalist_followers(&self, journalist_id: Uuid) -> Result<Vec<Subscription>> {
    let target_str = encode_uuid(journalist_id);

    let raws: Vec<RawSubscription> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT subscription_id, reader_id, journalist_id, publisher_id, created_at
           FROM subscriptions WHERE journalist_id = ?1 ORDER BY created_at",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![target_str], subscription_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws
      .into_iter()
      .map(RawSubscription::into_subscription)
      .collect()
  }

  async fn publisher_followers(&self, publisher_id: Uuid) -> Result<Vec<Subscription>> {
    let target_str = encode_uuid(publisher_id);

    let raws: Vec<RawSubscription> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT subscription_id, reader_id, journalist_id, publisher_id, created_at
           FROM subscriptions WHERE publisher_id = ?1 ORDER BY created_at",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![target_str], subscription_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws
      .into_iter()
      .map(RawSubscription::into_subscription)
      .collect()
  }

  async fn publisher_subscriber_emails(&self, publisher_id: Uuid) -> Result<Vec<String>> {
    let target_str = encode_uuid(publisher_id);

    let emails = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT u.email FROM subscriptions s
           JOIN users u ON u.user_id = s.reader_id
           WHERE s.publisher_id = ?1 AND u.email != ''
           ORDER BY s.created_at",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![target_str], |row| row.get(0))?
          .collect::<rusqlite::Result<Vec<String>>>()?;
        Ok(rows)
      })
      .await?;

    Ok(emails)
  }

  // ── Notifications ─────────────────────────────────────────────────────────

  async fn create_notification(
    &self,
    recipient_id: Uuid,
    message: String,
  ) -> Result<Notification> {
    let notification = Notification {
      notification_id: Uuid::new_v4(),
      recipient_id,
      message,
      created_at: Utc::now(),
    };

    let id_str        = encode_uuid(notification.notification_id);
    let recipient_str = encode_uuid(recipient_id);
    let message_arg   = notification.message.clone();
    let at_str        = encode_dt(notification.created_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO notifications (notification_id, recipient_id, message, created_at)
           VALUES (?1, ?2, ?3, ?4)",
          rusqlite::params![id_str, recipient_str, message_arg, at_str],
        )?;
        Ok(())
      })
      .await?;

    Ok(notification)
  }

  async fn notifications_for(&self, recipient_id: Uuid) -> Result<Vec<Notification>> {
    let recipient_str = encode_uuid(recipient_id);

    let raws: Vec<RawNotification> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT notification_id, recipient_id, message, created_at
           FROM notifications WHERE recipient_id = ?1 ORDER BY created_at DESC",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![recipient_str], notification_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws
      .into_iter()
      .map(RawNotification::into_notification)
      .collect()
  }
}
