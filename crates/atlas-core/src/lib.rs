//! Core types and traits for the Atlas country mirror service.
//!
//! This crate provides the shared domain model and the seams between the
//! ingestion, refresh, storage, render, and gateway crates.

pub mod country;
pub mod error;
pub mod mirror;
pub mod query;
pub mod render;
pub mod repository;
pub mod source;

pub use country::CountryRecord;
pub use error::{QueryError, RefreshError, RenderError, SourceError, StorageError};
pub use mirror::{Mirror, RefreshReport};
pub use query::{ListFilter, SortDirection, SortField, SortKey};
pub use render::SummaryRenderer;
pub use repository::{CountryRepository, MirrorStatus};
pub use source::{CountrySource, RateSource, RateTable, RawCountry, RawCurrency, SourceKind};
