//! The refresh-and-merge pipeline: external-data ingestion, per-record
//! enrichment, and upsert into the country repository.

pub mod enrich;
pub mod gdp;
pub mod service;

pub use enrich::enrich;
pub use gdp::{FixedMultiplier, GdpMultiplier, UniformMultiplier, GDP_MULTIPLIER_RANGE};
pub use service::RefreshService;
