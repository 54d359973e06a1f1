use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{header, Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::{ContentRange, DriveError, DriveResult, DriveSession, ObjectId};

/// Connection settings for [`RestDriveSession`].
///
/// The token is pre-acquired — acquiring and refreshing credentials is the
/// authorization layer's job, not this crate's.
#[derive(Debug, Clone)]
pub struct RestConfig {
    /// Metadata API base, e.g. `https://www.googleapis.com/drive/v3`
    pub api_url: String,
    /// Upload API base, e.g. `https://www.googleapis.com/upload/drive/v3`
    pub upload_url: String,
    /// Bearer token presented on every call
    pub access_token: String,
}

impl RestConfig {
    pub fn new<A, U, T>(api_url: A, upload_url: U, access_token: T) -> Self
    where
        A: Into<String>,
        U: Into<String>,
        T: Into<String>,
    {
        Self {
            api_url: api_url.into(),
            upload_url: upload_url.into(),
            access_token: access_token.into(),
        }
    }

    /// Build from `FERRY_API_URL`, `FERRY_UPLOAD_URL` and `FERRY_TOKEN`
    pub fn from_env() -> DriveResult<Self> {
        let var = |key: &str| {
            std::env::var(key)
                .map_err(|_| DriveError::authorization(format!("missing environment variable {key}")))
        };
        Ok(Self {
            api_url: var("FERRY_API_URL")?,
            upload_url: var("FERRY_UPLOAD_URL")?,
            access_token: var("FERRY_TOKEN")?,
        })
    }
}

/// [`DriveSession`] over a drive-style REST API.
///
/// Object creation is a JSON `POST {api}/files`; each range append is a
/// `PATCH {upload}/files/{id}` carrying a `Content-Range` header; lookups
/// query `GET {api}/files` with a name/parent search expression.
pub struct RestDriveSession {
    client: Client,
    config: RestConfig,
}

#[derive(Deserialize)]
struct FileResource {
    id: String,
}

#[derive(Deserialize)]
struct FileList {
    #[serde(default)]
    files: Vec<FileResource>,
}

impl RestDriveSession {
    pub fn new(config: RestConfig) -> DriveResult<Self> {
        if config.access_token.is_empty() {
            return Err(DriveError::authorization("empty access token"));
        }
        let client = Client::builder().build().map_err(DriveError::backend)?;
        Ok(Self { client, config })
    }

    /// Build a session from environment configuration
    pub fn from_env() -> DriveResult<Self> {
        Self::new(RestConfig::from_env()?)
    }
}

async fn status_error(response: reqwest::Response) -> std::io::Error {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    std::io::Error::new(
        std::io::ErrorKind::Other,
        format!("drive API returned {status}: {body}"),
    )
}

fn is_auth_status(status: StatusCode) -> bool {
    status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN
}

#[async_trait]
impl DriveSession for RestDriveSession {
    #[instrument(skip(self))]
    async fn create_object(
        &self,
        name: &str,
        parent_id: &str,
        mime_type: &str,
    ) -> DriveResult<ObjectId> {
        let url = format!("{}/files", self.config.api_url);
        let body = serde_json::json!({
            "name": name,
            "parents": [parent_id],
            "mimeType": mime_type,
        });

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.access_token)
            .query(&[("fields", "id")])
            .json(&body)
            .send()
            .await
            .map_err(|e| DriveError::create_object(name, e))?;

        if is_auth_status(response.status()) {
            return Err(DriveError::authorization(format!(
                "create rejected with {}",
                response.status()
            )));
        }
        if !response.status().is_success() {
            return Err(DriveError::create_object(name, status_error(response).await));
        }

        let file: FileResource = response
            .json()
            .await
            .map_err(|e| DriveError::create_object(name, e))?;
        debug!("Created remote object {}", file.id);
        Ok(ObjectId::from_string(file.id))
    }

    #[instrument(skip(self, data), fields(bytes = data.len()))]
    async fn append_range(
        &self,
        id: &ObjectId,
        parent_id: &str,
        data: Bytes,
        range: ContentRange,
    ) -> DriveResult<()> {
        let url = format!("{}/files/{}", self.config.upload_url, id);

        let response = self
            .client
            .patch(&url)
            .bearer_auth(&self.config.access_token)
            .query(&[("uploadType", "media"), ("addParents", parent_id)])
            .header(header::CONTENT_RANGE, range.to_string())
            .body(data)
            .send()
            .await
            .map_err(|e| DriveError::append_range(range, e))?;

        if is_auth_status(response.status()) {
            return Err(DriveError::authorization(format!(
                "append rejected with {}",
                response.status()
            )));
        }
        if !response.status().is_success() {
            return Err(DriveError::append_range(range, status_error(response).await));
        }
        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_object(&self, name: &str, parent_id: &str) -> DriveResult<Option<ObjectId>> {
        let url = format!("{}/files", self.config.api_url);
        let query = format!("name='{name}' and '{parent_id}' in parents and trashed=false");

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.config.access_token)
            .query(&[
                ("q", query.as_str()),
                ("fields", "files(id, name)"),
                ("spaces", "drive"),
            ])
            .send()
            .await
            .map_err(DriveError::backend)?;

        if is_auth_status(response.status()) {
            return Err(DriveError::authorization(format!(
                "lookup rejected with {}",
                response.status()
            )));
        }
        if !response.status().is_success() {
            return Err(DriveError::backend(status_error(response).await));
        }

        let list: FileList = response.json().await.map_err(DriveError::backend)?;
        Ok(list.files.into_iter().next().map(|f| ObjectId::from_string(f.id)))
    }
}
