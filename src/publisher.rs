//! Single-canonical-artifact publishing with slot bootstrap and cleanup.

use std::sync::Arc;

use bytes::Bytes;
use tracing::{debug, info};

use crate::persistence::artifact_repo::ArtifactRepo;
use crate::platform::{ArtifactRef, Platform, PlatformErrorKind};
use crate::Result;

/// Publishes finished stickers and keeps each owner's slot at exactly one
/// canonical reference.
pub struct ArtifactPublisher {
    platform: Arc<dyn Platform>,
    artifacts: ArtifactRepo,
    seed_png: Bytes,
}

impl ArtifactPublisher {
    /// Create a publisher. `seed_png` is uploaded when a slot has to be
    /// bootstrapped on first use.
    #[must_use]
    pub fn new(platform: Arc<dyn Platform>, artifacts: ArtifactRepo, seed_png: Vec<u8>) -> Self {
        Self {
            platform,
            artifacts,
            seed_png: Bytes::from(seed_png),
        }
    }

    /// Publish a sticker into the owner's slot, record the reference in the
    /// local registry, and retire every older reference.
    ///
    /// At most one publisher runs per owner at a time — the task supervisor
    /// never runs two tasks for the same owner concurrently — so the
    /// publish-then-enumerate cycle does not race itself.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Platform` when a capability fails (removals that
    /// report the target already gone are treated as success) and
    /// `AppError::Db` when recording the reference fails.
    pub async fn publish(
        &self,
        slot_id: &str,
        owner_user_id: &str,
        image_png: Vec<u8>,
    ) -> Result<ArtifactRef> {
        self.ensure_slot(slot_id).await?;

        let reference = self
            .platform
            .publish_image(slot_id, Bytes::from(image_png))
            .await?;
        self.artifacts.append(owner_user_id, &reference).await?;
        info!(slot_id, %reference, "artifact published");

        self.retire_stale(slot_id, &reference).await?;
        Ok(reference)
    }

    /// Bootstrap the slot with the seed image when it does not exist yet.
    async fn ensure_slot(&self, slot_id: &str) -> Result<()> {
        match self.platform.list_references(slot_id).await {
            Ok(_) => Ok(()),
            Err(err) if err.kind == PlatformErrorKind::SlotMissing => {
                info!(slot_id, "slot missing; bootstrapping with seed image");
                self.platform
                    .create_slot(slot_id, self.seed_png.clone())
                    .await?;
                Ok(())
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Remove every reference except the newest. A target that is already
    /// gone counts as removed.
    async fn retire_stale(&self, slot_id: &str, newest: &ArtifactRef) -> Result<()> {
        let references = self.platform.list_references(slot_id).await?;
        for reference in references.iter().filter(|r| *r != newest) {
            match self.platform.delete_reference(reference).await {
                Ok(()) => debug!(slot_id, %reference, "stale reference retired"),
                Err(err) if err.kind == PlatformErrorKind::NotFound => {
                    debug!(slot_id, %reference, "stale reference already gone");
                }
                Err(err) => return Err(err.into()),
            }
        }
        Ok(())
    }
}
