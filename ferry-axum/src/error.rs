use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use ferry_drive::DriveError;
use serde_json::json;

/// Error surface of the drive routes
#[derive(Debug)]
pub enum ApiError {
    /// Request rejected before reaching the drive (validation, bad multipart)
    BadRequest(String),
    /// Failure surfaced by the drive pipeline
    Drive(DriveError),
    /// Broken invariant inside the serving layer
    Internal(String),
}

impl From<DriveError> for ApiError {
    fn from(e: DriveError) -> Self {
        Self::Drive(e)
    }
}

impl ApiError {
    pub fn bad_request<S: Into<String>>(message: S) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal(message.into())
    }

    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            ApiError::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, "BadRequest", message.clone())
            }
            ApiError::Drive(e) => {
                let (status, name) = match e {
                    DriveError::NotFound { .. } => (StatusCode::NOT_FOUND, "NotFound"),
                    DriveError::Authorization { .. } => (StatusCode::UNAUTHORIZED, "Unauthorized"),
                    _ => (StatusCode::BAD_GATEWAY, "BadGateway"),
                };
                (status, name, e.to_string())
            }
            ApiError::Internal(message) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "GeneralError",
                message.clone(),
            ),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, name, message) = self.parts();
        (
            status,
            Json(json!({
                "name": name,
                "code": status.as_u16(),
                "message": message,
            })),
        )
            .into_response()
    }
}
