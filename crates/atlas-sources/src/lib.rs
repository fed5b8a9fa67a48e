//! Ingestion adapters for the two upstream feeds: the countries catalog
//! and the USD exchange-rate table.
//!
//! Both clients share the same failure contract: transport errors,
//! timeouts, non-2xx statuses, and undecodable payloads all surface as a
//! [`SourceError`](atlas_core::SourceError) naming the feed that failed.
//! There is no retry; a single failed attempt aborts the refresh cycle.

pub mod exchange_rates;
pub mod rest_countries;

pub use exchange_rates::{OpenErApiClient, EXCHANGE_RATE_API};
pub use rest_countries::{RestCountriesClient, COUNTRIES_API};

use atlas_core::{SourceError, SourceKind};
use std::time::Duration;

/// Bound on each upstream request, connection setup included.
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(15);

pub(crate) fn default_client() -> reqwest::Client {
    reqwest::Client::builder()
        .user_agent(concat!("atlas/", env!("CARGO_PKG_VERSION")))
        .timeout(FETCH_TIMEOUT)
        .build()
        .expect("failed to build HTTP client")
}

pub(crate) fn unavailable(kind: SourceKind, err: reqwest::Error) -> SourceError {
    SourceError::Unavailable {
        kind,
        message: err.to_string(),
    }
}

pub(crate) fn invalid_payload(kind: SourceKind, err: reqwest::Error) -> SourceError {
    SourceError::InvalidPayload {
        kind,
        message: err.to_string(),
    }
}
