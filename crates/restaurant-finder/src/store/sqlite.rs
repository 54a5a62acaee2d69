//! SQLite-backed preference store.
//!
//! One `users` row per user and one `preferences` row per user, with list
//! fields stored as JSON arrays.

use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use rusqlite::{Connection, OpenFlags, OptionalExtension, params};

use super::PreferenceStore;
use crate::error::{FinderError, Result};
use crate::model::{PreferenceUpdate, Preferences, PriceRange};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS users (
    id TEXT PRIMARY KEY,
    created_at TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS preferences (
    user_id TEXT PRIMARY KEY REFERENCES users(id),
    cuisines_liked TEXT NOT NULL DEFAULT '[]',
    cuisines_disliked TEXT NOT NULL DEFAULT '[]',
    dietary_restrictions TEXT NOT NULL DEFAULT '[]',
    price_range TEXT,
    liked_place_ids TEXT NOT NULL DEFAULT '[]',
    disliked_place_ids TEXT NOT NULL DEFAULT '[]',
    updated_at TEXT NOT NULL
);
";

#[derive(Clone)]
pub struct SqlitePreferenceStore {
    conn: Arc<Mutex<Connection>>,
}

/// Raw column values of one preferences row
struct PreferenceRow {
    cuisines_liked: String,
    cuisines_disliked: String,
    dietary_restrictions: String,
    price_range: Option<String>,
    liked_place_ids: String,
    disliked_place_ids: String,
}

impl PreferenceRow {
    fn into_preferences(self) -> Result<Preferences> {
        Ok(Preferences {
            cuisines_liked: serde_json::from_str(&self.cuisines_liked)?,
            cuisines_disliked: serde_json::from_str(&self.cuisines_disliked)?,
            dietary_restrictions: serde_json::from_str(&self.dietary_restrictions)?,
            price_range: self.price_range.as_deref().and_then(PriceRange::parse),
            liked_place_ids: serde_json::from_str(&self.liked_place_ids)?,
            disliked_place_ids: serde_json::from_str(&self.disliked_place_ids)?,
        })
    }
}

impl SqlitePreferenceStore {
    /// Open (or create) the database at `path`; `:memory:` opens a
    /// private in-memory database.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.as_os_str() == ":memory:" {
            return Self::in_memory();
        }

        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_CREATE
                | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        conn.pragma_update(None, "journal_mode", "WAL")?;

        tracing::info!(path = %path.display(), "Opened preference database");
        Self::with_connection(conn)
    }

    pub fn in_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Run `f` against the connection on the blocking pool
    async fn with_conn<T, F>(&self, f: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut Connection) -> Result<T> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let mut guard = conn
                .lock()
                .map_err(|_| FinderError::Store("connection mutex poisoned".into()))?;
            f(&mut guard)
        })
        .await
        .map_err(|e| FinderError::Store(e.to_string()))?
    }
}

fn read_preferences(conn: &Connection, user_id: &str) -> Result<Option<Preferences>> {
    let row = conn
        .query_row(
            "SELECT cuisines_liked, cuisines_disliked, dietary_restrictions, price_range,
                    liked_place_ids, disliked_place_ids
             FROM preferences WHERE user_id = ?1",
            params![user_id],
            |r| {
                Ok(PreferenceRow {
                    cuisines_liked: r.get(0)?,
                    cuisines_disliked: r.get(1)?,
                    dietary_restrictions: r.get(2)?,
                    price_range: r.get(3)?,
                    liked_place_ids: r.get(4)?,
                    disliked_place_ids: r.get(5)?,
                })
            },
        )
        .optional()?;

    row.map(PreferenceRow::into_preferences).transpose()
}

#[async_trait]
impl PreferenceStore for SqlitePreferenceStore {
    async fn upsert(&self, user_id: &str, update: PreferenceUpdate) -> Result<()> {
        let user_id = user_id.to_string();
        self.with_conn(move |conn| {
            let now = Utc::now().to_rfc3339();
            let tx = conn.transaction()?;

            tx.execute(
                "INSERT OR IGNORE INTO users (id, created_at) VALUES (?1, ?2)",
                params![user_id, now],
            )?;

            let mut prefs = read_preferences(&tx, &user_id)?.unwrap_or_default();
            prefs.merge(update);

            tx.execute(
                "INSERT INTO preferences (
                    user_id, cuisines_liked, cuisines_disliked, dietary_restrictions,
                    price_range, liked_place_ids, disliked_place_ids, updated_at
                 ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
                 ON CONFLICT(user_id) DO UPDATE SET
                    cuisines_liked = excluded.cuisines_liked,
                    cuisines_disliked = excluded.cuisines_disliked,
                    dietary_restrictions = excluded.dietary_restrictions,
                    price_range = excluded.price_range,
                    liked_place_ids = excluded.liked_place_ids,
                    disliked_place_ids = excluded.disliked_place_ids,
                    updated_at = excluded.updated_at",
                params![
                    user_id,
                    serde_json::to_string(&prefs.cuisines_liked)?,
                    serde_json::to_string(&prefs.cuisines_disliked)?,
                    serde_json::to_string(&prefs.dietary_restrictions)?,
                    prefs.price_range.map(|p| p.as_str()),
                    serde_json::to_string(&prefs.liked_place_ids)?,
                    serde_json::to_string(&prefs.disliked_place_ids)?,
                    now,
                ],
            )?;

            tx.commit()?;
            tracing::debug!(user_id = %user_id, "Saved preferences");
            Ok(())
        })
        .await
    }

    async fn fetch(&self, user_id: &str) -> Result<Preferences> {
        let user_id = user_id.to_string();
        self.with_conn(move |conn| Ok(read_preferences(conn, &user_id)?.unwrap_or_default()))
            .await
    }
}
