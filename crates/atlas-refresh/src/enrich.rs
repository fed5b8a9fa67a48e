use crate::gdp::GdpMultiplier;
use atlas_core::{CountryRecord, RateTable, RawCountry};
use jiff::Timestamp;
use tracing::warn;

/// Derives the upsert payload for one raw catalog record.
///
/// Returns `None` for a malformed record with no population; the caller
/// skips those. A currency code absent from the rate table leaves both
/// derived fields unset (an enrichment gap, not a failure), while a record
/// with no currency at all gets an explicit zero GDP.
pub fn enrich(
    raw: &RawCountry,
    rates: &RateTable,
    multiplier: &dyn GdpMultiplier,
    now: Timestamp,
) -> Option<CountryRecord> {
    let population = raw.population?;
    let currency_code = raw.primary_currency_code().map(str::to_owned);

    let (exchange_rate, estimated_gdp) = match currency_code.as_deref() {
        Some(code) => match rates.get(code) {
            Some(&rate) => {
                let gdp = population as f64 * multiplier.draw() / rate;
                (Some(rate), Some(gdp))
            }
            None => {
                warn!(country = %raw.name, code, "currency code missing from rate table");
                (None, None)
            }
        },
        None => (None, Some(0.0)),
    };

    Some(CountryRecord {
        name: raw.name.clone(),
        capital: raw.capital.clone(),
        region: raw.region.clone(),
        population,
        currency_code,
        exchange_rate,
        estimated_gdp,
        flag_url: raw.flag.clone(),
        last_refreshed_at: now,
    })
}
