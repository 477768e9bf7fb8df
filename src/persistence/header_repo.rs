//! Header cache repository for `SQLite` persistence.

use std::sync::Arc;

use chrono::Utc;

use crate::models::header::HeaderCacheEntry;
use crate::models::profile::ProfileSnapshot;
use crate::{AppError, Result};

use super::db::Database;

/// Repository wrapper around `SQLite` for header cache records.
#[derive(Clone)]
pub struct HeaderRepo {
    db: Arc<Database>,
}

/// Internal row struct for `SQLite` deserialization.
#[derive(sqlx::FromRow)]
struct HeaderRow {
    user_id: String,
    display_name: String,
    handle: String,
    photo_fingerprint: String,
    image_png: Vec<u8>,
    updated_at: String,
}

impl HeaderRow {
    /// Convert a database row into the domain model.
    fn into_entry(self) -> Result<HeaderCacheEntry> {
        let updated_at = chrono::DateTime::parse_from_rfc3339(&self.updated_at)
            .map_err(|e| AppError::Db(format!("invalid updated_at: {e}")))?
            .with_timezone(&Utc);

        Ok(HeaderCacheEntry {
            snapshot: ProfileSnapshot {
                user_id: self.user_id,
                display_name: self.display_name,
                handle: self.handle,
                photo_fingerprint: self.photo_fingerprint,
            },
            image_png: self.image_png,
            updated_at,
        })
    }
}

impl HeaderRepo {
    /// Create a new repository instance.
    #[must_use]
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Retrieve the cached header for a user.
    ///
    /// Returns `Ok(None)` if no header has been rendered yet.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Db` if the query fails.
    pub async fn get(&self, user_id: &str) -> Result<Option<HeaderCacheEntry>> {
        let row: Option<HeaderRow> =
            sqlx::query_as("SELECT * FROM header_cache WHERE user_id = ?1")
                .bind(user_id)
                .fetch_optional(self.db.as_ref())
                .await?;

        row.map(HeaderRow::into_entry).transpose()
    }

    /// Insert or replace the cached header for the entry's user.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Db` if the write fails.
    pub async fn upsert(&self, entry: &HeaderCacheEntry) -> Result<()> {
        let updated_at = entry.updated_at.to_rfc3339();

        sqlx::query(
            "INSERT INTO header_cache (user_id, display_name, handle, photo_fingerprint,
             image_png, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             ON CONFLICT(user_id) DO UPDATE SET
                 display_name = excluded.display_name,
                 handle = excluded.handle,
                 photo_fingerprint = excluded.photo_fingerprint,
                 image_png = excluded.image_png,
                 updated_at = excluded.updated_at",
        )
        .bind(&entry.snapshot.user_id)
        .bind(&entry.snapshot.display_name)
        .bind(&entry.snapshot.handle)
        .bind(&entry.snapshot.photo_fingerprint)
        .bind(&entry.image_png)
        .bind(&updated_at)
        .execute(self.db.as_ref())
        .await?;

        Ok(())
    }
}
