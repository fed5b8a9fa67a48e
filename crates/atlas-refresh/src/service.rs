use crate::enrich::enrich;
use crate::gdp::GdpMultiplier;
use async_trait::async_trait;
use atlas_core::{
    CountryRepository, CountrySource, ListFilter, Mirror, RateSource, RefreshError, RefreshReport,
    SortDirection, SortField, SortKey, SummaryRenderer,
};
use jiff::Timestamp;
use std::sync::Arc;
use tracing::{info, warn};

/// How many records the summary card shows.
const SUMMARY_TOP_N: usize = 5;

/// A concrete implementation of the [`Mirror`] trait.
///
/// One refresh cycle fetches both upstream feeds concurrently, enriches
/// each raw record, and applies the upserts sequentially. Either fetch
/// failing aborts the cycle before any write; a write failing mid-loop
/// leaves the prefix applied (no transaction wraps the loop). The summary
/// render runs as a side effect once the loop completes.
pub struct RefreshService<C, X, R> {
    countries: C,
    rates: X,
    repository: Arc<R>,
    renderer: Arc<dyn SummaryRenderer>,
    multiplier: Arc<dyn GdpMultiplier>,
}

impl<C, X, R> RefreshService<C, X, R>
where
    C: CountrySource,
    X: RateSource,
    R: CountryRepository,
{
    pub fn new(
        countries: C,
        rates: X,
        repository: Arc<R>,
        renderer: Arc<dyn SummaryRenderer>,
        multiplier: Arc<dyn GdpMultiplier>,
    ) -> Self {
        Self {
            countries,
            rates,
            repository,
            renderer,
            multiplier,
        }
    }
}

#[async_trait]
impl<C, X, R> Mirror for RefreshService<C, X, R>
where
    C: CountrySource,
    X: RateSource,
    R: CountryRepository,
{
    async fn refresh(&self) -> Result<RefreshReport, RefreshError> {
        let (raw_countries, rates) = tokio::try_join!(
            self.countries.fetch_countries(),
            self.rates.fetch_exchange_rates()
        )?;
        info!(
            countries = raw_countries.len(),
            rates = rates.len(),
            "upstream fetch complete"
        );

        let now = Timestamp::now();
        let mut report = RefreshReport::default();

        for raw in &raw_countries {
            let Some(record) = enrich(raw, &rates, self.multiplier.as_ref(), now) else {
                warn!(country = %raw.name, "skipping catalog row without population");
                report.skipped += 1;
                continue;
            };
            self.repository.upsert_by_name(record).await?;
            report.upserted += 1;
        }

        let status = self.repository.status().await?;
        let mut top = self
            .repository
            .list(
                &ListFilter::default(),
                Some(SortKey::new(SortField::Gdp, SortDirection::Desc)),
            )
            .await?;
        top.truncate(SUMMARY_TOP_N);
        self.renderer.render(&top, &status).await?;

        info!(
            upserted = report.upserted,
            skipped = report.skipped,
            "refresh cycle complete"
        );
        Ok(report)
    }
}
