use std::sync::Arc;
use tracing::{debug, error, info};

use crate::{planner, ContentRange, DriveSession, SourceBlob, UploadEvent, UploadStream};

/// Drive one blob to the remote as a sequence of byte-range appends.
///
/// The returned stream yields one `Progress` item per confirmed chunk and
/// exactly one terminal item: `Completed` with the new object id, or `Err`
/// with the failure cause. Chunk N+1 is never submitted before chunk N is
/// acknowledged.
pub(crate) fn run_upload(
    session: Arc<dyn DriveSession>,
    folder_id: String,
    blob: SourceBlob,
) -> UploadStream {
    let stream = async_stream::stream! {
        let total = blob.size();
        info!("Starting chunked upload of '{}' ({} bytes)", blob.name(), total);

        let remote_id = match session
            .create_object(blob.name(), &folder_id, blob.mime_type())
            .await
        {
            Ok(id) => id,
            Err(e) => {
                error!("Object creation failed for '{}': {}", blob.name(), e);
                yield Err(e);
                return;
            }
        };
        debug!("Created remote object {}", remote_id);

        let chunk_size = planner::plan_chunk_size(total);
        let mut cursor: u64 = 0;

        while cursor < total {
            let end = (cursor + chunk_size).min(total);
            let range = ContentRange::new(cursor, end, total);
            let data = blob.slice(cursor, end);

            if let Err(e) = session
                .append_range(&remote_id, &folder_id, data, range)
                .await
            {
                // The object stays partially written on the remote; a retry
                // means a fresh upload, not a resume.
                error!("Append failed at {}: {}", range, e);
                yield Err(e);
                return;
            }

            cursor = end;
            let progress = cursor as f64 / total as f64 * 100.0;
            debug!("Upload progress: {:.2}%", progress);
            yield Ok(UploadEvent::Progress(progress));
        }

        info!(
            "Upload of '{}' complete, remote object {}",
            blob.name(),
            remote_id
        );
        yield Ok(UploadEvent::Completed(remote_id));
    };
    Box::pin(stream)
}
