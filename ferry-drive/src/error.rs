use thiserror::Error;

use crate::ContentRange;

/// Result type for drive operations
pub type DriveResult<T> = Result<T, DriveError>;

/// Errors that can occur during drive operations
#[derive(Error, Debug)]
pub enum DriveError {
    /// The session could not be established or was rejected by the remote.
    /// Fatal before any remote mutation.
    #[error("Authorization failed: {reason}")]
    Authorization { reason: String },

    /// The remote object could not be created. Fatal before any append.
    #[error("Failed to create remote object '{name}': {source}")]
    CreateObject {
        name: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A byte-range append failed. Fatal to the upload; the remote object is
    /// left partially written and no compensating delete is attempted.
    #[error("Failed to append range {range}: {source}")]
    AppendRange {
        range: ContentRange,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A lookup by name found no match. Distinct from a transport failure.
    #[error("File not found: {name}")]
    NotFound { name: String },

    /// Transport or serialization fault from a session implementation
    #[error("Drive backend error: {source}")]
    Backend {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl DriveError {
    /// Create an authorization error
    pub fn authorization<S: Into<String>>(reason: S) -> Self {
        Self::Authorization {
            reason: reason.into(),
        }
    }

    /// Create an object-creation error from any error type
    pub fn create_object<S, E>(name: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::CreateObject {
            name: name.into(),
            source: Box::new(source),
        }
    }

    /// Create an append error for the range that failed
    pub fn append_range<E>(range: ContentRange, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::AppendRange {
            range,
            source: Box::new(source),
        }
    }

    /// Create a not-found error for a name lookup
    pub fn not_found<S: Into<String>>(name: S) -> Self {
        Self::NotFound { name: name.into() }
    }

    /// Create a backend error from any error type
    pub fn backend<E>(source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Backend {
            source: Box::new(source),
        }
    }
}
