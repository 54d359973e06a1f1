use std::sync::Arc;

use futures_util::StreamExt;

use ferry_drive::{
    plan_chunk_size, DriveAdapter, DriveConfig, DriveError, MemoryDriveSession, ObjectId,
    SourceBlob, UploadEvent,
};

const FOLDER: &str = "folder-under-test";

/// Test factory functions
fn fixture(session: MemoryDriveSession) -> (Arc<MemoryDriveSession>, DriveAdapter) {
    let session = Arc::new(session);
    let adapter = DriveAdapter::from_shared(session.clone(), DriveConfig::new(FOLDER));
    (session, adapter)
}

fn patterned_blob(name: &str, size: usize) -> SourceBlob {
    let data: Vec<u8> = (0..size).map(|i| (i % 251) as u8).collect();
    SourceBlob::new(name, "text/csv", data)
}

async fn run_upload(
    adapter: &DriveAdapter,
    blob: SourceBlob,
) -> Vec<Result<UploadEvent, DriveError>> {
    adapter.upload(blob).collect().await
}

fn progress_values(items: &[Result<UploadEvent, DriveError>]) -> Vec<f64> {
    items
        .iter()
        .filter_map(|item| match item {
            Ok(UploadEvent::Progress(pct)) => Some(*pct),
            _ => None,
        })
        .collect()
}

fn completed_id(items: &[Result<UploadEvent, DriveError>]) -> Option<ObjectId> {
    items.iter().find_map(|item| match item {
        Ok(UploadEvent::Completed(id)) => Some(id.clone()),
        _ => None,
    })
}

/// A. Empty blob: object created, zero progress events, immediate completion
#[tokio::test]
async fn empty_blob_completes_without_progress() {
    let (session, adapter) = fixture(MemoryDriveSession::new());

    let items = run_upload(&adapter, SourceBlob::new("empty.csv", "text/csv", Vec::new())).await;

    assert_eq!(items.len(), 1);
    let id = completed_id(&items).expect("completion event");

    let object = session.object(&id).await.expect("object created");
    assert!(object.data.is_empty());
    assert!(object.descriptors.is_empty());
    assert_eq!(session.object_count().await, 1);
}

/// B. 5 MiB blob: single append covering the whole payload, one progress
/// event of exactly 100.0, then completion
#[tokio::test]
async fn small_blob_uploads_as_one_chunk() {
    let (session, adapter) = fixture(MemoryDriveSession::new());
    let size = 5 * 1024 * 1024;
    let blob = patterned_blob("report.csv", size);
    let payload: Vec<u8> = (0..size).map(|i| (i % 251) as u8).collect();

    let items = run_upload(&adapter, blob).await;

    assert_eq!(progress_values(&items), vec![100.0]);
    let id = completed_id(&items).expect("completion event");

    let object = session.object(&id).await.expect("object created");
    assert_eq!(object.descriptors, vec!["bytes 0-5242879/5242880"]);
    assert_eq!(object.ranges, vec![(0, size as u64)]);
    assert_eq!(object.data, payload);
    assert_eq!(object.mime_type, "text/csv");
    assert_eq!(object.parent_id, FOLDER);
}

/// C. 100 MiB blob: progress event count matches ceil(size / planned chunk)
#[tokio::test]
async fn large_blob_emits_one_progress_event_per_chunk() {
    let (_session, adapter) = fixture(MemoryDriveSession::new());
    let size: u64 = 100 * 1024 * 1024;
    let blob = SourceBlob::new("big.csv", "text/csv", vec![0u8; size as usize]);

    let items = run_upload(&adapter, blob).await;

    let chunk = plan_chunk_size(size);
    let expected = size.div_ceil(chunk) as usize;
    let progress = progress_values(&items);
    assert_eq!(progress.len(), expected);
    assert_eq!(*progress.last().unwrap(), 100.0);
    assert!(completed_id(&items).is_some());
}

/// Progress values strictly increase and end at exactly 100.0 before the
/// completion event; appended ranges are contiguous from 0 and sum to the
/// payload size
#[tokio::test]
async fn progress_is_monotonic_and_ranges_are_contiguous() {
    let (session, adapter) = fixture(MemoryDriveSession::new());
    let size: u64 = 20 * 1024 * 1024;
    let blob = SourceBlob::new("chunks.csv", "text/csv", vec![1u8; size as usize]);

    let items = run_upload(&adapter, blob).await;

    let progress = progress_values(&items);
    assert!(progress.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(*progress.last().unwrap(), 100.0);

    // Completion is the last item, after every progress event
    assert!(matches!(
        items.last(),
        Some(Ok(UploadEvent::Completed(_)))
    ));

    let id = completed_id(&items).unwrap();
    let object = session.object(&id).await.unwrap();

    let mut cursor = 0;
    for &(start, end) in &object.ranges {
        assert_eq!(start, cursor);
        assert!(end > start);
        cursor = end;
    }
    assert_eq!(cursor, size);
    let appended: u64 = object.ranges.iter().map(|(s, e)| e - s).sum();
    assert_eq!(appended, size);
}

/// Re-running the same blob creates a new remote object — no dedup
#[tokio::test]
async fn reupload_creates_a_distinct_object() {
    let (session, adapter) = fixture(MemoryDriveSession::new());
    let blob = patterned_blob("same.csv", 1024);

    let first = run_upload(&adapter, blob.clone()).await;
    let second = run_upload(&adapter, blob).await;

    let first_id = completed_id(&first).unwrap();
    let second_id = completed_id(&second).unwrap();
    assert_ne!(first_id, second_id);
    assert_eq!(session.object_count().await, 2);
}

/// D. Append fails on the third chunk: exactly two progress events, then one
/// error terminal carrying the cause; completion never fires
#[tokio::test]
async fn append_failure_terminates_after_two_progress_events() {
    let (session, adapter) = fixture(MemoryDriveSession::new().fail_append_at(2));
    let size: u64 = 20 * 1024 * 1024;
    let blob = SourceBlob::new("doomed.csv", "text/csv", vec![2u8; size as usize]);

    let items = run_upload(&adapter, blob).await;

    assert_eq!(items.len(), 3);
    assert_eq!(progress_values(&items).len(), 2);
    assert!(completed_id(&items).is_none());
    assert!(matches!(
        items.last(),
        Some(Err(DriveError::AppendRange { .. }))
    ));

    // The partially written object stays on the remote
    assert_eq!(session.object_count().await, 1);
    let id = session.created_ids().await.pop().unwrap();
    let object = session.object(&id).await.unwrap();
    assert_eq!(object.ranges.len(), 2);
}

/// Object creation failure aborts before any append
#[tokio::test]
async fn create_failure_yields_error_before_any_append() {
    let (session, adapter) = fixture(MemoryDriveSession::new().fail_create());
    let blob = patterned_blob("rejected.csv", 1024);

    let items = run_upload(&adapter, blob).await;

    assert_eq!(items.len(), 1);
    assert!(matches!(
        items.first(),
        Some(Err(DriveError::CreateObject { .. }))
    ));
    assert_eq!(session.object_count().await, 0);
}

/// E. Lookups on an empty folder: find is NotFound, exist is false
#[tokio::test]
async fn lookups_on_empty_folder_report_absence() {
    let (_session, adapter) = fixture(MemoryDriveSession::new());

    let result = adapter.find_file("missing.csv").await;
    assert!(matches!(result, Err(DriveError::NotFound { name }) if name == "missing.csv"));

    assert!(!adapter.exist_file("missing.csv").await.unwrap());
}

/// Lookups after an upload resolve to the uploaded object
#[tokio::test]
async fn lookups_resolve_uploaded_objects() {
    let (_session, adapter) = fixture(MemoryDriveSession::new());
    let blob = patterned_blob("present.csv", 2048);

    let items = run_upload(&adapter, blob).await;
    let uploaded = completed_id(&items).unwrap();

    let found = adapter.find_file("present.csv").await.unwrap();
    assert_eq!(found, uploaded);
    assert!(adapter.exist_file("present.csv").await.unwrap());
}
