use crate::error::RefreshError;
use async_trait::async_trait;

/// Outcome of a refresh cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RefreshReport {
    /// Records written to the repository.
    pub upserted: u64,
    /// Catalog rows dropped for missing required fields.
    pub skipped: u64,
}

/// One full ingestion, enrichment, and persistence pass, triggered
/// on demand by the refresh endpoint.
#[async_trait]
pub trait Mirror: Send + Sync + 'static {
    async fn refresh(&self) -> Result<RefreshReport, RefreshError>;
}
