//! SQL schema for the Byline SQLite store.
//!
//! Executed once at connection startup via `PRAGMA user_version`. Future
//! migrations will be gated on that version number.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS users (
    user_id       TEXT PRIMARY KEY,
    username      TEXT NOT NULL UNIQUE,
    email         TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL,   -- argon2 PHC string
    role          TEXT NOT NULL,   -- 'reader' | 'journalist' | 'editor'
    created_at    TEXT NOT NULL    -- ISO 8601 UTC; server-assigned
);

CREATE TABLE IF NOT EXISTS publishers (
    publisher_id TEXT PRIMARY KEY,
    name         TEXT NOT NULL UNIQUE,
    owner_id     TEXT REFERENCES users(user_id) ON DELETE SET NULL,
    created_at   TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS articles (
    article_id   TEXT PRIMARY KEY,
    title        TEXT NOT NULL,
    content      TEXT NOT NULL,
    approved     INTEGER NOT NULL DEFAULT 0,
    created_by   TEXT NOT NULL REFERENCES users(user_id) ON DELETE CASCADE,
    publisher_id TEXT REFERENCES publishers(publisher_id) ON DELETE SET NULL,
    created_at   TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS newsletters (
    newsletter_id TEXT PRIMARY KEY,
    title         TEXT NOT NULL,
    content       TEXT NOT NULL,
    author_id     TEXT NOT NULL REFERENCES users(user_id) ON DELETE CASCADE,
    publisher_id  TEXT NOT NULL REFERENCES publishers(publisher_id) ON DELETE CASCADE,
    approved      INTEGER NOT NULL DEFAULT 0,
    created_at    TEXT NOT NULL
);

-- One edge per (reader, target); exactly one target column is set.
CREATE TABLE IF NOT EXISTS subscriptions (
    subscription_id TEXT PRIMARY KEY,
    reader_id       TEXT NOT NULL REFERENCES users(user_id) ON DELETE CASCADE,
    journalist_id   TEXT REFERENCES users(user_id) ON DELETE CASCADE,
    publisher_id    TEXT REFERENCES publishers(publisher_id) ON DELETE CASCADE,
    created_at      TEXT NOT NULL,
    CHECK ((journalist_id IS NULL) != (publisher_id IS NULL))
);

CREATE UNIQUE INDEX IF NOT EXISTS subs_reader_journalist_idx
    ON subscriptions(reader_id, journalist_id) WHERE journalist_id IS NOT NULL;
CREATE UNIQUE INDEX IF NOT EXISTS subs_reader_publisher_idx
    ON subscriptions(reader_id, publisher_id) WHERE publisher_id IS NOT NULL;

-- Notifications are append-only; no UPDATE or DELETE is ever issued.
CREATE TABLE IF NOT EXISTS notifications (
    notification_id TEXT PRIMARY KEY,
    recipient_id    TEXT NOT NULL REFERENCES users(user_id) ON DELETE CASCADE,
    message         TEXT NOT NULL,
    created_at      TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS articles_author_idx      ON articles(created_by);
CREATE INDEX IF NOT EXISTS articles_publisher_idx   ON articles(publisher_id);
CREATE INDEX IF NOT EXISTS articles_approved_idx    ON articles(approved, created_at);
CREATE INDEX IF NOT EXISTS subs_journalist_idx      ON subscriptions(journalist_id);
CREATE INDEX IF NOT EXISTS subs_publisher_idx       ON subscriptions(publisher_id);
CREATE INDEX IF NOT EXISTS notifications_recipient_idx ON notifications(recipient_id);

PRAGMA user_version = 1;
";
