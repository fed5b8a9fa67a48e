use crate::{default_client, invalid_payload, unavailable};
use async_trait::async_trait;
use atlas_core::{RateSource, RateTable, SourceError, SourceKind};
use serde::Deserialize;
use tracing::debug;

/// Production endpoint for the USD-based exchange-rate table.
pub const EXCHANGE_RATE_API: &str = "https://open.er-api.com/v6/latest/USD";

/// Envelope of the exchange-rate feed; only `rates` is of interest.
#[derive(Debug, Deserialize)]
struct RatesResponse {
    rates: RateTable,
}

/// HTTP client for the exchange-rate feed.
#[derive(Debug, Clone)]
pub struct OpenErApiClient {
    client: reqwest::Client,
    endpoint: String,
}

impl OpenErApiClient {
    /// Creates a client against the production endpoint.
    pub fn new() -> Self {
        Self::with_endpoint(EXCHANGE_RATE_API)
    }

    /// Creates a client against a custom endpoint.
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            client: default_client(),
            endpoint: endpoint.into(),
        }
    }
}

impl Default for OpenErApiClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RateSource for OpenErApiClient {
    async fn fetch_exchange_rates(&self) -> Result<RateTable, SourceError> {
        debug!(endpoint = %self.endpoint, "fetching exchange rates");

        let response = self
            .client
            .get(&self.endpoint)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|err| unavailable(SourceKind::ExchangeRates, err))?;

        let body: RatesResponse = response
            .json()
            .await
            .map_err(|err| invalid_payload(SourceKind::ExchangeRates, err))?;

        debug!(count = body.rates.len(), "fetched exchange rates");
        Ok(body.rates)
    }
}
