//! # ferry-drive: chunked uploads to drive-style remote storage
//!
//! `ferry-drive` pushes a large in-memory payload to a drive-style object
//! store as a sequence of byte-range appends over an authorized session,
//! reporting progress after every confirmed chunk.
//!
//! ## Key Features
//!
//! - **Chunked transfer**: a size-derived chunk plan splits the payload into
//!   `Content-Range`-addressed appends, submitted strictly one at a time
//! - **Progress stream**: one percentage per confirmed chunk, then exactly one
//!   terminal event (completion with the remote object id, or the failure cause)
//! - **Backend agnostic**: the [`DriveSession`] trait is the only seam — the
//!   bundled [`RestDriveSession`] talks to a drive REST API, and
//!   [`MemoryDriveSession`] keeps everything in memory for tests
//! - **Name lookups**: find/exists queries scoped to the configured folder
//!
//! ## Quick Start
//!
//! ```rust
//! use ferry_drive::prelude::*;
//! use futures_util::StreamExt;
//!
//! # #[tokio::main]
//! # async fn main() -> DriveResult<()> {
//! let adapter = DriveAdapter::new(MemoryDriveSession::new(), DriveConfig::new("folder-1"));
//! let blob = SourceBlob::new("report.csv", "text/csv", &b"a,b\n1,2\n"[..]);
//!
//! let mut events = adapter.upload(blob);
//! while let Some(event) = events.next().await {
//!     match event? {
//!         UploadEvent::Progress(pct) => println!("{pct:.2}%"),
//!         UploadEvent::Completed(id) => println!("uploaded as {id}"),
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Semantics worth knowing
//!
//! Uploads are sequential and not resumable: a failed append terminates the
//! stream with the cause and leaves the partially written object on the
//! remote — retrying means a fresh upload, which creates a distinct object.
//! An empty payload still creates the object and completes immediately with
//! no progress events.

pub mod adapter;
mod config;
mod driver;
mod error;
mod memory;
pub mod planner;
mod rest;
pub mod session;
mod types;

// Re-export main types for clean API
pub use adapter::DriveAdapter;
pub use config::DriveConfig;
pub use error::{DriveError, DriveResult};
pub use memory::{MemoryDriveSession, StoredObject};
pub use planner::plan_chunk_size;
pub use rest::{RestConfig, RestDriveSession};
pub use session::DriveSession;
pub use types::{ContentRange, ObjectId, SourceBlob, UploadEvent, UploadStream};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{
        DriveAdapter, DriveConfig, DriveError, DriveResult, DriveSession, MemoryDriveSession,
        ObjectId, SourceBlob, UploadEvent, UploadStream,
    };
}
