//! Per-user header cache with fingerprint-based invalidation.
//!
//! A cached header is reused only when the freshly observed profile snapshot
//! equals the stored one field for field. A genuine profile change also
//! invalidates the owner's previously published artifacts and notifies the
//! host through the registered hook; a mere cache-load failure rebuilds
//! silently without invalidating anything.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::models::header::HeaderCacheEntry;
use crate::models::profile::ProfileSnapshot;
use crate::persistence::artifact_repo::ArtifactRepo;
use crate::persistence::header_repo::HeaderRepo;
use crate::platform::{PhotoRef, Platform};
use crate::render::Renderer;
use crate::Result;

/// Callback fired with the user id when a genuine profile change invalidates
/// previously published artifacts.
pub type InvalidationHook = Arc<dyn Fn(&str) + Send + Sync>;

/// Decides between reusing a cached header and rebuilding it.
pub struct HeaderCache {
    headers: HeaderRepo,
    artifacts: ArtifactRepo,
    platform: Arc<dyn Platform>,
    renderer: Arc<dyn Renderer>,
    invalidation_hook: Option<InvalidationHook>,
}

impl HeaderCache {
    /// Create a cache manager over the given collaborators.
    #[must_use]
    pub fn new(
        headers: HeaderRepo,
        artifacts: ArtifactRepo,
        platform: Arc<dyn Platform>,
        renderer: Arc<dyn Renderer>,
        invalidation_hook: Option<InvalidationHook>,
    ) -> Self {
        Self {
            headers,
            artifacts,
            platform,
            renderer,
            invalidation_hook,
        }
    }

    /// Return the header PNG for `observed`, rebuilding when the profile
    /// changed or the cached bytes are unusable.
    ///
    /// `photo` is downloaded on a rebuild; `None` paints the fallback
    /// picture. Returns `Ok(None)` when `cancel` fired at a checkpoint
    /// before the rebuild finished.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Db` on persistence failures, `AppError::Platform`
    /// on a failed photo download, and `AppError::Render` on a failed paint.
    pub async fn header_for(
        &self,
        observed: &ProfileSnapshot,
        photo: Option<&PhotoRef>,
        cancel: &CancellationToken,
    ) -> Result<Option<Vec<u8>>> {
        let user_id = observed.user_id.as_str();
        let stored = self.headers.get(user_id).await?;

        let profile_changed = match &stored {
            Some(entry) if entry.snapshot == *observed => {
                // Reuse only when the bytes still decode; a corrupt blob is
                // recovered locally by rebuilding without invalidating.
                if image::load_from_memory(&entry.image_png).is_ok() {
                    debug!(user_id, "header cache hit");
                    return Ok(Some(entry.image_png.clone()));
                }
                warn!(user_id, "cached header bytes unreadable; rebuilding");
                false
            }
            Some(_) => true,
            // First observation of this user; nothing to invalidate.
            None => false,
        };

        if cancel.is_cancelled() {
            debug!(user_id, "cancelled before photo download");
            return Ok(None);
        }

        let photo_png = match photo {
            Some(reference) => Some(self.platform.fetch_photo_bytes(reference).await?),
            None => None,
        };

        if cancel.is_cancelled() {
            debug!(user_id, "cancelled before header render");
            return Ok(None);
        }

        let image_png = self.renderer.render_header(observed, photo_png.as_deref())?;
        let entry = HeaderCacheEntry::new(observed.clone(), image_png.clone());
        self.headers.upsert(&entry).await?;

        if profile_changed {
            let dropped = self.artifacts.clear(user_id).await?;
            info!(user_id, dropped, "profile changed; stale artifacts invalidated");
            if let Some(hook) = &self.invalidation_hook {
                hook(user_id);
            }
        }

        Ok(Some(image_png))
    }
}
