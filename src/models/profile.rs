//! User identity and profile snapshot models.

use serde::{Deserialize, Serialize};

/// User identity as observed by the host alongside an incoming request.
///
/// Chat platforms deliver the current display name and handle with every
/// update; the profile photo is the only part of the snapshot that needs a
/// separate platform call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserInfo {
    /// Platform-scoped user identifier.
    pub id: String,
    /// Full display name.
    pub display_name: String,
    /// Short handle, without the `@` prefix.
    pub handle: String,
}

/// Complete profile observation a header is rendered from.
///
/// Captured once per generation and immutable afterwards. A header cache
/// entry is reusable iff its stored snapshot equals the freshly observed one
/// field for field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct ProfileSnapshot {
    /// Platform-scoped user identifier.
    pub user_id: String,
    /// Full display name drawn on the header.
    pub display_name: String,
    /// Handle drawn on the header, without the `@` prefix.
    pub handle: String,
    /// Identifier that changes iff the underlying photo changes: the
    /// platform's photo fingerprint, or the fallback-picture fingerprint when
    /// the user has no reachable photo.
    pub photo_fingerprint: String,
}

impl ProfileSnapshot {
    /// Complete a host-observed identity with the resolved photo fingerprint.
    #[must_use]
    pub fn from_observation(user: &UserInfo, photo_fingerprint: String) -> Self {
        Self {
            user_id: user.id.clone(),
            display_name: user.display_name.clone(),
            handle: user.handle.clone(),
            photo_fingerprint,
        }
    }
}
