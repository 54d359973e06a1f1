use async_trait::async_trait;
use bytes::Bytes;

use crate::{ContentRange, DriveResult, ObjectId};

/// Authorized handle to the remote drive — the seam between the upload
/// pipeline and whatever owns credentials and transport.
///
/// A session is built by the authorization layer before an upload runs; the
/// pipeline borrows it for the duration of one upload and never closes or
/// re-authorizes it. Sequential reuse across uploads must be safe.
/// Implementations are not required to support concurrent uploads over a
/// single handle — callers running uploads in parallel need a handle each.
#[async_trait]
pub trait DriveSession: Send + Sync {
    /// Create an empty remote object under `parent_id` and return the
    /// identifier the remote assigned to it.
    async fn create_object(
        &self,
        name: &str,
        parent_id: &str,
        mime_type: &str,
    ) -> DriveResult<ObjectId>;

    /// Append one byte range to an existing object. `range` addresses the
    /// slice on the wire as `bytes {start}-{end-1}/{total}`.
    async fn append_range(
        &self,
        id: &ObjectId,
        parent_id: &str,
        data: Bytes,
        range: ContentRange,
    ) -> DriveResult<()>;

    /// First object named `name` under `parent_id`, if any
    async fn find_object(&self, name: &str, parent_id: &str) -> DriveResult<Option<ObjectId>>;
}
