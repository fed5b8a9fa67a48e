use crate::source::SourceKind;
use thiserror::Error;

/// Errors raised while fetching one of the upstream feeds.
#[derive(Debug, Clone, Error)]
pub enum SourceError {
    #[error("{kind} is unavailable: {message}")]
    Unavailable { kind: SourceKind, message: String },
    #[error("{kind} returned an invalid payload: {message}")]
    InvalidPayload { kind: SourceKind, message: String },
}

impl SourceError {
    /// The upstream feed this error originated from.
    pub fn kind(&self) -> SourceKind {
        match self {
            Self::Unavailable { kind, .. } | Self::InvalidPayload { kind, .. } => *kind,
        }
    }
}

#[derive(Debug, Clone, Error)]
pub enum StorageError {
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
    #[error("storage operation timed out: {0}")]
    Timeout(String),
    #[error("storage query failed: {0}")]
    Query(String),
    #[error("stored data is invalid: {0}")]
    InvalidData(String),
}

#[derive(Debug, Clone, Error)]
pub enum RenderError {
    #[error("font could not be loaded: {0}")]
    Font(String),
    #[error("summary image could not be written: {0}")]
    Io(String),
}

/// Failure of a whole refresh cycle. A cycle aborts on the first error;
/// upserts already applied stay in place.
#[derive(Debug, Clone, Error)]
pub enum RefreshError {
    #[error(transparent)]
    Source(#[from] SourceError),
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
    #[error("summary render failed: {0}")]
    Render(#[from] RenderError),
}

#[derive(Debug, Clone, Error)]
pub enum QueryError {
    #[error("unrecognized sort key: {0}")]
    InvalidSortKey(String),
}
