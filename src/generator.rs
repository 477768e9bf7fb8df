//! Host-facing generation façade wiring the pipeline together.

use std::sync::Arc;

use chrono::Utc;
use chrono_tz::Tz;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::config::GlobalConfig;
use crate::header_cache::{HeaderCache, InvalidationHook};
use crate::models::profile::{ProfileSnapshot, UserInfo};
use crate::persistence::artifact_repo::ArtifactRepo;
use crate::persistence::db::Database;
use crate::persistence::header_repo::HeaderRepo;
use crate::platform::{ArtifactRef, Platform};
use crate::publisher::ArtifactPublisher;
use crate::render::Renderer;
use crate::supervisor::{TaskOutcome, TaskSupervisor};
use crate::{AppError, Result};

/// One sticker request as the host observed it.
#[derive(Debug, Clone)]
pub struct StickerRequest {
    /// Identity delivered with the triggering update.
    pub user: UserInfo,
    /// Text to lay out on the sticker body.
    pub text: String,
    /// Footer timezone; falls back to the configured default.
    pub timezone: Option<Tz>,
}

/// Terminal result of a generation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerateOutcome {
    /// The sticker was published under this reference.
    Published(ArtifactRef),
    /// A newer request for the same user superseded this one; nothing was
    /// delivered.
    Superseded,
}

/// Generation façade: owns the capability handle, renderer, header cache,
/// publisher, and the per-user task supervisor.
pub struct StickerGenerator {
    config: Arc<GlobalConfig>,
    platform: Arc<dyn Platform>,
    renderer: Arc<dyn Renderer>,
    header_cache: Arc<HeaderCache>,
    publisher: Arc<ArtifactPublisher>,
    artifacts: ArtifactRepo,
    supervisor: TaskSupervisor,
    default_tz: Tz,
}

impl StickerGenerator {
    /// Assemble the pipeline on top of a connected database.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if the configured timezone is invalid and
    /// `AppError::Io` if the seed picture cannot be read.
    pub fn new(
        config: Arc<GlobalConfig>,
        platform: Arc<dyn Platform>,
        renderer: Arc<dyn Renderer>,
        db: Arc<Database>,
        invalidation_hook: Option<InvalidationHook>,
    ) -> Result<Self> {
        let default_tz = config.timezone()?;
        let seed_png = std::fs::read(&config.assets.seed_picture)
            .map_err(|err| AppError::Io(format!("failed to read seed picture: {err}")))?;

        let headers = HeaderRepo::new(Arc::clone(&db));
        let artifacts = ArtifactRepo::new(Arc::clone(&db));
        let header_cache = Arc::new(HeaderCache::new(
            headers,
            artifacts.clone(),
            Arc::clone(&platform),
            Arc::clone(&renderer),
            invalidation_hook,
        ));
        let publisher = Arc::new(ArtifactPublisher::new(
            Arc::clone(&platform),
            artifacts.clone(),
            seed_png,
        ));

        Ok(Self {
            config,
            platform,
            renderer,
            header_cache,
            publisher,
            artifacts,
            supervisor: TaskSupervisor::new(),
            default_tz,
        })
    }

    /// Generate and publish a sticker for the request.
    ///
    /// A request arriving while an older one for the same user is still in
    /// flight cancels the older one cooperatively; the older caller resolves
    /// to [`GenerateOutcome::Superseded`].
    ///
    /// # Errors
    ///
    /// Returns `AppError::Layout` when the text cannot be wrapped — surface
    /// its message to the requesting user verbatim — and other `AppError`
    /// variants for platform, render, or persistence failures.
    pub async fn generate(&self, request: StickerRequest) -> Result<GenerateOutcome> {
        let owner = request.user.id.clone();
        let tz = request.timezone.unwrap_or(self.default_tz);
        let slot_id = self.config.slot_for(&owner);

        let platform = Arc::clone(&self.platform);
        let renderer = Arc::clone(&self.renderer);
        let header_cache = Arc::clone(&self.header_cache);
        let publisher = Arc::clone(&self.publisher);

        let handle = self
            .supervisor
            .submit(&owner, move |cancel| {
                run_pipeline(
                    request,
                    tz,
                    slot_id,
                    platform,
                    renderer,
                    header_cache,
                    publisher,
                    cancel,
                )
            })
            .await;

        match handle.outcome().await {
            Some(result) => result.map(GenerateOutcome::Published),
            None => Ok(GenerateOutcome::Superseded),
        }
    }

    /// Previously published references for an owner, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Db` if the query fails.
    pub async fn stored_artifacts(&self, owner_user_id: &str) -> Result<Vec<ArtifactRef>> {
        self.artifacts.list(owner_user_id).await
    }

    /// Drop one stored reference. Returns `false` when it was not stored.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Db` if the delete fails.
    pub async fn forget_artifact(
        &self,
        owner_user_id: &str,
        reference: &ArtifactRef,
    ) -> Result<bool> {
        self.artifacts.remove(owner_user_id, reference).await
    }
}

/// The checkpointed generation pipeline run inside one supervised task.
#[allow(clippy::too_many_arguments)] // Internal plumbing; not part of public API width.
async fn run_pipeline(
    request: StickerRequest,
    tz: Tz,
    slot_id: String,
    platform: Arc<dyn Platform>,
    renderer: Arc<dyn Renderer>,
    header_cache: Arc<HeaderCache>,
    publisher: Arc<ArtifactPublisher>,
    cancel: CancellationToken,
) -> Result<TaskOutcome<ArtifactRef>> {
    if cancel.is_cancelled() {
        return Ok(TaskOutcome::Cancelled);
    }

    let remote = platform.fetch_profile(&request.user.id).await?;
    let fingerprint = remote.photo.as_ref().map_or_else(
        || renderer.fallback_fingerprint().to_owned(),
        |photo| photo.fingerprint.clone(),
    );

    // The update's identity wins over the remote copy when present; some
    // platforms omit profile data from updates entirely.
    let mut user = request.user.clone();
    if user.display_name.is_empty() {
        user.display_name = remote.display_name;
    }
    if user.handle.is_empty() {
        user.handle = remote.handle;
    }
    if user.handle.is_empty() {
        user.handle = user.display_name.clone();
    }
    let snapshot = ProfileSnapshot::from_observation(&user, fingerprint);

    if cancel.is_cancelled() {
        debug!(user_id = %snapshot.user_id, "cancelled after profile fetch");
        return Ok(TaskOutcome::Cancelled);
    }

    let Some(header_png) = header_cache
        .header_for(&snapshot, remote.photo.as_ref(), &cancel)
        .await?
    else {
        return Ok(TaskOutcome::Cancelled);
    };

    if cancel.is_cancelled() {
        debug!(user_id = %snapshot.user_id, "cancelled before composition");
        return Ok(TaskOutcome::Cancelled);
    }

    let timestamp = Utc::now().with_timezone(&tz);
    let sticker_png = renderer.compose_sticker(&request.text, &header_png, timestamp)?;

    if cancel.is_cancelled() {
        debug!(user_id = %snapshot.user_id, "cancelled before publish");
        return Ok(TaskOutcome::Cancelled);
    }

    let reference = publisher
        .publish(&slot_id, &snapshot.user_id, sticker_png)
        .await?;
    Ok(TaskOutcome::Completed(reference))
}
