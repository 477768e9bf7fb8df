//! Host platform capabilities consumed by the generation pipeline.
//!
//! The chat transport, its network client, and the artifact store live in the
//! host integration; the core only sees this trait. Every method is a
//! suspension point of the pipeline and therefore sits behind a cancellation
//! checkpoint.

use std::fmt::{Display, Formatter};

use async_trait::async_trait;
use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// Result type for capability calls.
pub type PlatformResult<T> = std::result::Result<T, PlatformError>;

/// Opaque reference to one published artifact in an external slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArtifactRef(pub String);

impl Display for ArtifactRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Reference to a user's current profile photo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoRef {
    /// Identifier used to download the photo bytes.
    pub id: String,
    /// Identifier that changes iff the photo content changes.
    pub fingerprint: String,
}

/// Profile data as the platform currently reports it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteProfile {
    /// Full display name.
    pub display_name: String,
    /// Short handle, without the `@` prefix.
    pub handle: String,
    /// Current profile photo, if the user has one the bot can see.
    pub photo: Option<PhotoRef>,
}

/// Structured reason code for a capability failure.
///
/// Callers branch on the code, never on message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformErrorKind {
    /// The addressed slot does not exist yet.
    SlotMissing,
    /// The addressed entity is already gone.
    NotFound,
    /// Any other transport or API failure.
    Other,
}

/// Failure reported by a host capability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformError {
    /// Structured reason code.
    pub kind: PlatformErrorKind,
    /// Human-readable detail for logs and operator escalation.
    pub message: String,
}

impl PlatformError {
    /// Build an error with the given reason code.
    #[must_use]
    pub fn new(kind: PlatformErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Convenience constructor for [`PlatformErrorKind::Other`].
    #[must_use]
    pub fn other(message: impl Into<String>) -> Self {
        Self::new(PlatformErrorKind::Other, message)
    }
}

impl Display for PlatformError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            PlatformErrorKind::SlotMissing => write!(f, "slot missing: {}", self.message),
            PlatformErrorKind::NotFound => write!(f, "not found: {}", self.message),
            PlatformErrorKind::Other => f.write_str(&self.message),
        }
    }
}

impl std::error::Error for PlatformError {}

/// I/O capabilities the host platform integration must provide.
#[async_trait]
pub trait Platform: Send + Sync {
    /// Observe a user's current profile.
    async fn fetch_profile(&self, user_id: &str) -> PlatformResult<RemoteProfile>;

    /// Download the bytes of a profile photo.
    async fn fetch_photo_bytes(&self, photo: &PhotoRef) -> PlatformResult<Bytes>;

    /// Publish an image into a slot, returning its reference.
    async fn publish_image(&self, slot_id: &str, image_png: Bytes) -> PlatformResult<ArtifactRef>;

    /// Enumerate a slot's references, oldest first.
    ///
    /// Fails with [`PlatformErrorKind::SlotMissing`] when the slot has never
    /// been created.
    async fn list_references(&self, slot_id: &str) -> PlatformResult<Vec<ArtifactRef>>;

    /// Remove one published reference.
    ///
    /// Fails with [`PlatformErrorKind::NotFound`] when the reference is
    /// already gone; callers treat that as success.
    async fn delete_reference(&self, reference: &ArtifactRef) -> PlatformResult<()>;

    /// Create a slot by uploading a seed image. First use only.
    async fn create_slot(&self, slot_id: &str, seed_png: Bytes) -> PlatformResult<()>;
}
