//! Cached header entry model.

use chrono::{DateTime, Utc};

use super::profile::ProfileSnapshot;

/// One persisted header image, keyed by user.
///
/// Written exclusively by the header cache manager; consumers only ever read
/// the PNG bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderCacheEntry {
    /// Profile observation the image was rendered from.
    pub snapshot: ProfileSnapshot,
    /// Rendered header band, PNG-encoded.
    pub image_png: Vec<u8>,
    /// Last rebuild time.
    pub updated_at: DateTime<Utc>,
}

impl HeaderCacheEntry {
    /// Build a fresh entry stamped with the current time.
    #[must_use]
    pub fn new(snapshot: ProfileSnapshot, image_png: Vec<u8>) -> Self {
        Self {
            snapshot,
            image_png,
            updated_at: Utc::now(),
        }
    }
}
