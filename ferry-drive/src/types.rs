use bytes::Bytes;
use futures_core::Stream;
use serde::{Deserialize, Serialize};
use std::pin::Pin;

use crate::DriveError;

/// Stream of upload events. An `Err` item is the failure terminal; the stream
/// ends after yielding either `Err` or [`UploadEvent::Completed`].
pub type UploadStream = Pin<Box<dyn Stream<Item = Result<UploadEvent, DriveError>> + Send>>;

/// Identifier the remote store assigns to an object at creation time
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectId(pub String);

impl ObjectId {
    /// Create from an identifier returned by the remote
    pub fn from_string(id: String) -> Self {
        Self(id)
    }

    /// Get the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Event emitted while an upload is in flight
#[derive(Debug, Clone, PartialEq)]
pub enum UploadEvent {
    /// Percentage of confirmed bytes, in `[0, 100]`; one per confirmed chunk
    Progress(f64),
    /// All bytes confirmed; carries the remote object id. Final event.
    Completed(ObjectId),
}

/// Immutable in-memory payload for one upload.
///
/// The caller owns the bytes; the pipeline only slices them. `Bytes` makes
/// every slice a cheap reference into the same buffer.
#[derive(Debug, Clone)]
pub struct SourceBlob {
    name: String,
    mime_type: String,
    data: Bytes,
}

impl SourceBlob {
    pub fn new<N, M, B>(name: N, mime_type: M, data: B) -> Self
    where
        N: Into<String>,
        M: Into<String>,
        B: Into<Bytes>,
    {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            data: data.into(),
        }
    }

    /// Display name the remote object is created under
    pub fn name(&self) -> &str {
        &self.name
    }

    /// MIME type string passed through to object creation
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// Total payload size in bytes
    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }

    /// Slice the `[start, end)` byte range of the payload
    pub fn slice(&self, start: u64, end: u64) -> Bytes {
        self.data.slice(start as usize..end as usize)
    }
}

/// Byte range of one append, with exclusive `end`.
///
/// Renders as the wire descriptor `bytes {start}-{end-1}/{total}` — the end
/// byte is inclusive on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentRange {
    pub start: u64,
    pub end: u64,
    pub total: u64,
}

impl ContentRange {
    pub fn new(start: u64, end: u64, total: u64) -> Self {
        Self { start, end, total }
    }

    /// Number of bytes the range covers
    pub fn len(&self) -> u64 {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }
}

impl std::fmt::Display for ContentRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "bytes {}-{}/{}",
            self.start,
            self.end.saturating_sub(1),
            self.total
        )
    }
}
