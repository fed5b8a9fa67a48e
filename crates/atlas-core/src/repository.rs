use crate::country::CountryRecord;
use crate::error::StorageError;
use crate::query::{ListFilter, SortKey};
use async_trait::async_trait;
use jiff::Timestamp;
use serde::Serialize;

type Result<T> = std::result::Result<T, StorageError>;

/// Aggregate view of the mirrored collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MirrorStatus {
    pub total: u64,
    /// Max `last_refreshed_at` over all records, `None` when empty.
    pub last_refreshed_at: Option<Timestamp>,
}

/// The single-owner persistence gateway for mirrored country records.
///
/// Any storage engine can sit behind this trait; the refresh pipeline and
/// the HTTP surface only ever touch the collection through it.
#[async_trait]
pub trait CountryRepository: Send + Sync + 'static {
    /// Inserts the record, or updates the existing row whose name matches
    /// case-insensitively. Row identity is preserved on update.
    async fn upsert_by_name(&self, record: CountryRecord) -> Result<()>;

    /// Lists records matching `filter`, ordered by `sort` when given.
    /// Without a sort the backend's natural order is returned.
    async fn list(&self, filter: &ListFilter, sort: Option<SortKey>)
        -> Result<Vec<CountryRecord>>;

    /// Case-insensitive lookup by name.
    async fn find_by_name(&self, name: &str) -> Result<Option<CountryRecord>>;

    /// Case-insensitive delete by name.
    /// Returns `true` if a record existed and was removed.
    async fn remove(&self, name: &str) -> Result<bool>;

    async fn status(&self) -> Result<MirrorStatus>;
}
