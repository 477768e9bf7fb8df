//! Published-artifact registry for `SQLite` persistence.
//!
//! Keeps the ordered list of references a user's generations have produced.
//! The header cache clears it when a genuine profile change makes the old
//! stickers stale; hosts read it to suggest or forget previous stickers.

use std::sync::Arc;

use chrono::Utc;

use crate::platform::ArtifactRef;
use crate::Result;

use super::db::Database;

/// Repository wrapper around `SQLite` for artifact reference records.
#[derive(Clone)]
pub struct ArtifactRepo {
    db: Arc<Database>,
}

impl ArtifactRepo {
    /// Create a new repository instance.
    #[must_use]
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Append a newly published reference for an owner.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Db` if the insert fails.
    pub async fn append(&self, owner_user_id: &str, reference: &ArtifactRef) -> Result<()> {
        let published_at = Utc::now().to_rfc3339();

        sqlx::query(
            "INSERT INTO artifact_ref (owner_user_id, reference, published_at)
             VALUES (?1, ?2, ?3)",
        )
        .bind(owner_user_id)
        .bind(&reference.0)
        .bind(&published_at)
        .execute(self.db.as_ref())
        .await?;

        Ok(())
    }

    /// List an owner's references in publication order, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Db` if the query fails.
    pub async fn list(&self, owner_user_id: &str) -> Result<Vec<ArtifactRef>> {
        let rows: Vec<(String,)> = sqlx::query_as(
            "SELECT reference FROM artifact_ref WHERE owner_user_id = ?1 ORDER BY id",
        )
        .bind(owner_user_id)
        .fetch_all(self.db.as_ref())
        .await?;

        Ok(rows.into_iter().map(|(r,)| ArtifactRef(r)).collect())
    }

    /// Drop every reference stored for an owner, returning how many went.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Db` if the delete fails.
    pub async fn clear(&self, owner_user_id: &str) -> Result<u64> {
        let result = sqlx::query("DELETE FROM artifact_ref WHERE owner_user_id = ?1")
            .bind(owner_user_id)
            .execute(self.db.as_ref())
            .await?;

        Ok(result.rows_affected())
    }

    /// Remove one stored reference. Returns `false` when it was not present.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Db` if the delete fails.
    pub async fn remove(&self, owner_user_id: &str, reference: &ArtifactRef) -> Result<bool> {
        let result = sqlx::query(
            "DELETE FROM artifact_ref WHERE owner_user_id = ?1 AND reference = ?2",
        )
        .bind(owner_user_id)
        .bind(&reference.0)
        .execute(self.db.as_ref())
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
