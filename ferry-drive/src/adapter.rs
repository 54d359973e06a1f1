use std::sync::Arc;
use tracing::instrument;

use crate::{
    driver, DriveConfig, DriveError, DriveResult, DriveSession, ObjectId, SourceBlob, UploadStream,
};

/// The main drive adapter — this is what services embed.
///
/// Owns a session handle and the target folder; exposes the chunked upload
/// plus the two name lookups. One adapter may run uploads sequentially;
/// concurrent uploads need an adapter (and session) each.
pub struct DriveAdapter {
    session: Arc<dyn DriveSession>,
    config: DriveConfig,
}

impl DriveAdapter {
    /// Create a new adapter over an owned session
    pub fn new<S: DriveSession + 'static>(session: S, config: DriveConfig) -> Self {
        Self {
            session: Arc::new(session),
            config,
        }
    }

    /// Create an adapter over a shared session handle
    pub fn from_shared(session: Arc<dyn DriveSession>, config: DriveConfig) -> Self {
        Self { session, config }
    }

    /// Upload `blob` as a new remote object in the configured folder.
    ///
    /// Returns a stream of progress percentages (one per confirmed chunk,
    /// strictly increasing, final value `100.0`) followed by exactly one
    /// terminal item: `Ok(UploadEvent::Completed)` with the new object id, or
    /// `Err` with the failure cause. An empty blob creates the object and
    /// completes with no progress items.
    ///
    /// A failed append leaves the partially written object on the remote —
    /// there is no rollback and no resume; retrying means a fresh upload,
    /// which creates a distinct object. Dropping the stream between events
    /// abandons the upload without a terminal item.
    pub fn upload(&self, blob: SourceBlob) -> UploadStream {
        driver::run_upload(
            Arc::clone(&self.session),
            self.config.folder_id.clone(),
            blob,
        )
    }

    /// Id of the first object named `name` in the configured folder.
    ///
    /// Returns [`DriveError::NotFound`] when nothing matches — distinct from
    /// a transport failure, which surfaces as the session's own error.
    #[instrument(skip(self))]
    pub async fn find_file(&self, name: &str) -> DriveResult<ObjectId> {
        match self
            .session
            .find_object(name, &self.config.folder_id)
            .await?
        {
            Some(id) => Ok(id),
            None => Err(DriveError::not_found(name)),
        }
    }

    /// Whether an object named `name` exists in the configured folder
    #[instrument(skip(self))]
    pub async fn exist_file(&self, name: &str) -> DriveResult<bool> {
        Ok(self
            .session
            .find_object(name, &self.config.folder_id)
            .await?
            .is_some())
    }

    /// Get configuration
    pub fn config(&self) -> &DriveConfig {
        &self.config
    }
}
