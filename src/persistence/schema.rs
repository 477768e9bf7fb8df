//! `SQLite` schema bootstrap logic.
//!
//! All table definitions use `CREATE TABLE IF NOT EXISTS` — safe to
//! re-run on every startup. Produces a convergent result.

use sqlx::SqlitePool;

use crate::Result;

/// Apply all table definitions to the connected `SQLite` database.
///
/// # Errors
///
/// Returns `AppError::Db` if any DDL statement fails.
pub async fn bootstrap_schema(pool: &SqlitePool) -> Result<()> {
    let ddl = r"
CREATE TABLE IF NOT EXISTS header_cache (
    user_id            TEXT PRIMARY KEY NOT NULL,
    display_name       TEXT NOT NULL,
    handle             TEXT NOT NULL,
    photo_fingerprint  TEXT NOT NULL,
    image_png          BLOB NOT NULL,
    updated_at         TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS artifact_ref (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,
    owner_user_id   TEXT NOT NULL,
    reference       TEXT NOT NULL,
    published_at    TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_artifact_ref_owner ON artifact_ref(owner_user_id);
";

    sqlx::raw_sql(ddl).execute(pool).await?;
    Ok(())
}
