use crate::error::SourceError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::Display;

/// Currency code mapped to its rate against 1 USD.
pub type RateTable = HashMap<String, f64>;

/// Which upstream feed a fetch touched. Carried by [`SourceError`] so the
/// gateway can tell the caller which side failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Countries,
    ExchangeRates,
}

impl Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceKind::Countries => f.write_str("Countries API"),
            SourceKind::ExchangeRates => f.write_str("Exchange Rate API"),
        }
    }
}

/// Country data as returned by the external catalog, pre-enrichment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawCountry {
    pub name: String,
    #[serde(default)]
    pub capital: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    /// Absent in malformed catalog rows; such rows are skipped by the
    /// refresh pipeline.
    #[serde(default)]
    pub population: Option<i64>,
    #[serde(default)]
    pub flag: Option<String>,
    #[serde(default)]
    pub currencies: Option<Vec<RawCurrency>>,
}

impl RawCountry {
    /// Code of the first listed currency, if the record has one.
    pub fn primary_currency_code(&self) -> Option<&str> {
        self.currencies
            .as_deref()
            .and_then(<[RawCurrency]>::first)
            .and_then(|currency| currency.code.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawCurrency {
    #[serde(default)]
    pub code: Option<String>,
}

#[async_trait]
pub trait CountrySource: Send + Sync + 'static {
    /// Fetches the full raw country catalog.
    async fn fetch_countries(&self) -> Result<Vec<RawCountry>, SourceError>;
}

#[async_trait]
pub trait RateSource: Send + Sync + 'static {
    /// Fetches the USD-based exchange rate table.
    async fn fetch_exchange_rates(&self) -> Result<RateTable, SourceError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primary_currency_code_takes_first() {
        let raw = RawCountry {
            name: "Testland".to_string(),
            capital: None,
            region: None,
            population: Some(1),
            flag: None,
            currencies: Some(vec![
                RawCurrency {
                    code: Some("EUR".to_string()),
                },
                RawCurrency {
                    code: Some("USD".to_string()),
                },
            ]),
        };

        assert_eq!(raw.primary_currency_code(), Some("EUR"));
    }

    #[test]
    fn primary_currency_code_handles_missing_lists_and_codes() {
        let mut raw = RawCountry {
            name: "Testland".to_string(),
            capital: None,
            region: None,
            population: Some(1),
            flag: None,
            currencies: None,
        };
        assert_eq!(raw.primary_currency_code(), None);

        raw.currencies = Some(vec![]);
        assert_eq!(raw.primary_currency_code(), None);

        raw.currencies = Some(vec![RawCurrency { code: None }]);
        assert_eq!(raw.primary_currency_code(), None);
    }
}
