use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// A mirrored country record, as persisted and served by the API.
///
/// `name` is the identifier: storage keeps the casing of the most recent
/// refresh, while every lookup and the upsert match are case-insensitive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryRecord {
    pub name: String,
    pub capital: Option<String>,
    pub region: Option<String>,
    pub population: i64,
    /// First currency code of the source record, if any.
    pub currency_code: Option<String>,
    /// Units of the country's currency per 1 USD. `None` when the code was
    /// not found in the rate table.
    pub exchange_rate: Option<f64>,
    /// `None` when the rate was unresolved; `Some(0.0)` when the source
    /// record carries no currency at all.
    pub estimated_gdp: Option<f64>,
    pub flag_url: Option<String>,
    /// Set on every successful upsert.
    pub last_refreshed_at: Timestamp,
}
