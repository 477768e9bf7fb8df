//! Persistence layer modules.

pub mod artifact_repo;
pub mod db;
pub mod header_repo;
pub mod schema;

/// Re-export the database pool type for convenience.
pub use sqlx::SqlitePool;
