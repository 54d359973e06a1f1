use axum::{
    extract::{DefaultBodyLimit, Multipart, Path, State},
    routing::{get, post},
    Json, Router,
};
use futures_util::StreamExt;
use serde_json::{json, Value};
use tracing::{debug, info};

use ferry_drive::{SourceBlob, UploadEvent};

use crate::{error::ApiError, state::DriveState};

const CSV_MIME: &str = "text/csv";

/// Ceiling on one multipart request
const MAX_UPLOAD_BYTES: usize = 500 * 1024 * 1024;

/// Routes for upload and the two name lookups
pub fn drive_router(state: DriveState) -> Router {
    Router::new()
        .route(
            "/drive/upload",
            post(upload_file).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .route("/drive/find/{file_name}", get(find_file))
        .route("/drive/exist/{file_name}", get(exist_file))
        .with_state(state)
}

/// `POST /drive/upload` — multipart upload of one CSV file.
///
/// Drains the upload stream server-side, logging progress, and answers with
/// the remote object id once the terminal event arrives.
async fn upload_file(
    State(state): State<DriveState>,
    mut multipart: Multipart,
) -> Result<Json<Value>, ApiError> {
    let blob = extract_csv_field(&mut multipart).await?;
    info!("Accepted upload of '{}' ({} bytes)", blob.name(), blob.size());

    let mut events = state.adapter.upload(blob);
    let mut object_id = None;
    while let Some(event) = events.next().await {
        match event? {
            UploadEvent::Progress(pct) => debug!("Current progress: {:.2}%", pct),
            UploadEvent::Completed(id) => object_id = Some(id),
        }
    }

    let id = object_id
        .ok_or_else(|| ApiError::internal("upload stream ended without a terminal event"))?;
    Ok(Json(json!({ "fileId": id })))
}

/// `GET /drive/find/{file_name}` — id of the first match, 404 when absent
async fn find_file(
    State(state): State<DriveState>,
    Path(file_name): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = state.adapter.find_file(&file_name).await?;
    Ok(Json(json!({ "fileId": id })))
}

/// `GET /drive/exist/{file_name}` — boolean presence check
async fn exist_file(
    State(state): State<DriveState>,
    Path(file_name): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let exist = state.adapter.exist_file(&file_name).await?;
    Ok(Json(json!({ "exist": exist })))
}

/// Pull the `file` field out of the form and gate it on the CSV content type
/// before anything touches the drive.
async fn extract_csv_field(multipart: &mut Multipart) -> Result<SourceBlob, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("malformed multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let file_name = field.file_name().unwrap_or("upload.csv").to_string();
        let content_type = field.content_type().unwrap_or_default().to_string();
        if content_type != CSV_MIME {
            return Err(ApiError::bad_request("only CSV uploads are accepted"));
        }

        let data = field
            .bytes()
            .await
            .map_err(|e| ApiError::bad_request(format!("failed to read file field: {e}")))?;
        return Ok(SourceBlob::new(file_name, content_type, data));
    }

    Err(ApiError::bad_request("missing 'file' field"))
}
