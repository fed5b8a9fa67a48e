use async_trait::async_trait;
use atlas_core::error::StorageError;
use atlas_core::query::{ListFilter, SortDirection, SortField, SortKey};
use atlas_core::repository::{CountryRepository, MirrorStatus};
use atlas_core::CountryRecord;
use dashmap::DashMap;
use std::cmp::Ordering;

type Result<T> = std::result::Result<T, StorageError>;

/// In-memory implementation of the repository using DashMap.
///
/// Entries are keyed by the lowercased name, which gives the same
/// case-insensitive upsert/lookup semantics as the MySQL unique key while
/// keeping the stored casing of the most recent write.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCountryRepository {
    storage: DashMap<String, CountryRecord>,
}

impl InMemoryCountryRepository {
    /// Creates a new, empty in-memory repository.
    pub fn new() -> Self {
        Self {
            storage: DashMap::new(),
        }
    }
}

fn matches(filter: &ListFilter, record: &CountryRecord) -> bool {
    let region_ok = filter.region.as_deref().is_none_or(|wanted| {
        record
            .region
            .as_deref()
            .is_some_and(|region| region.eq_ignore_ascii_case(wanted))
    });
    let currency_ok = filter.currency_code.as_deref().is_none_or(|wanted| {
        record
            .currency_code
            .as_deref()
            .is_some_and(|code| code.eq_ignore_ascii_case(wanted))
    });
    region_ok && currency_ok
}

// NULL orders below any value, matching MySQL's treatment in ORDER BY.
fn compare_optional(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
    }
}

fn compare(a: &CountryRecord, b: &CountryRecord, key: SortKey) -> Ordering {
    let ordering = match key.field {
        SortField::Gdp => compare_optional(a.estimated_gdp, b.estimated_gdp),
        SortField::Population => a.population.cmp(&b.population),
        SortField::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
    };
    match key.direction {
        SortDirection::Asc => ordering,
        SortDirection::Desc => ordering.reverse(),
    }
}

#[async_trait]
impl CountryRepository for InMemoryCountryRepository {
    async fn upsert_by_name(&self, record: CountryRecord) -> Result<()> {
        self.storage.insert(record.name.to_lowercase(), record);
        Ok(())
    }

    async fn list(
        &self,
        filter: &ListFilter,
        sort: Option<SortKey>,
    ) -> Result<Vec<CountryRecord>> {
        let mut records: Vec<CountryRecord> = self
            .storage
            .iter()
            .filter(|entry| matches(filter, entry.value()))
            .map(|entry| entry.value().clone())
            .collect();

        if let Some(key) = sort {
            records.sort_by(|a, b| compare(a, b, key));
        }

        Ok(records)
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<CountryRecord>> {
        Ok(self
            .storage
            .get(&name.to_lowercase())
            .map(|entry| entry.value().clone()))
    }

    async fn remove(&self, name: &str) -> Result<bool> {
        Ok(self.storage.remove(&name.to_lowercase()).is_some())
    }

    async fn status(&self) -> Result<MirrorStatus> {
        let last_refreshed_at = self
            .storage
            .iter()
            .map(|entry| entry.value().last_refreshed_at)
            .max();

        Ok(MirrorStatus {
            total: self.storage.len() as u64,
            last_refreshed_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::Timestamp;

    fn record(name: &str, region: Option<&str>, code: Option<&str>, gdp: Option<f64>) -> CountryRecord {
        CountryRecord {
            name: name.to_string(),
            capital: None,
            region: region.map(str::to_owned),
            population: name.len() as i64,
            currency_code: code.map(str::to_owned),
            exchange_rate: None,
            estimated_gdp: gdp,
            flag_url: None,
            last_refreshed_at: Timestamp::UNIX_EPOCH,
        }
    }

    async fn seeded() -> InMemoryCountryRepository {
        let repo = InMemoryCountryRepository::new();
        for r in [
            record("France", Some("Europe"), Some("EUR"), Some(10.0)),
            record("Germany", Some("Europe"), Some("EUR"), Some(30.0)),
            record("Japan", Some("Asia"), Some("JPY"), Some(20.0)),
            record("Atlantis", None, None, None),
        ] {
            repo.upsert_by_name(r).await.unwrap();
        }
        repo
    }

    #[tokio::test]
    async fn upsert_and_find_are_case_insensitive() {
        let repo = InMemoryCountryRepository::new();

        repo.upsert_by_name(record("France", None, None, None))
            .await
            .unwrap();

        assert!(repo.find_by_name("FRANCE").await.unwrap().is_some());
        assert!(repo.find_by_name("france").await.unwrap().is_some());
        assert!(repo.find_by_name("Spain").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn upsert_replaces_same_name_in_any_casing() {
        let repo = InMemoryCountryRepository::new();

        repo.upsert_by_name(record("France", None, None, Some(1.0)))
            .await
            .unwrap();
        repo.upsert_by_name(record("FRANCE", None, None, Some(2.0)))
            .await
            .unwrap();

        assert_eq!(repo.status().await.unwrap().total, 1);
        let stored = repo.find_by_name("france").await.unwrap().unwrap();
        assert_eq!(stored.name, "FRANCE");
        assert_eq!(stored.estimated_gdp, Some(2.0));
    }

    #[tokio::test]
    async fn list_filters_are_case_insensitive_and_and_combined() {
        let repo = seeded().await;

        let filter = ListFilter {
            region: Some("europe".to_string()),
            currency_code: Some("eur".to_string()),
        };
        let records = repo.list(&filter, None).await.unwrap();

        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.region.as_deref() == Some("Europe")));

        let filter = ListFilter {
            region: Some("europe".to_string()),
            currency_code: Some("jpy".to_string()),
        };
        assert!(repo.list(&filter, None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn records_without_the_filtered_field_never_match() {
        let repo = seeded().await;

        let filter = ListFilter {
            region: Some("Europe".to_string()),
            currency_code: None,
        };
        let names: Vec<String> = repo
            .list(&filter, None)
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.name)
            .collect();

        assert!(!names.contains(&"Atlantis".to_string()));
    }

    #[tokio::test]
    async fn sort_by_name_desc_is_non_increasing() {
        let repo = seeded().await;

        let records = repo
            .list(
                &ListFilter::default(),
                Some(SortKey::new(SortField::Name, SortDirection::Desc)),
            )
            .await
            .unwrap();
        let names: Vec<String> = records.into_iter().map(|r| r.name).collect();

        assert_eq!(names, vec!["Japan", "Germany", "France", "Atlantis"]);
    }

    #[tokio::test]
    async fn sort_by_gdp_desc_puts_unresolved_last() {
        let repo = seeded().await;

        let records = repo
            .list(
                &ListFilter::default(),
                Some(SortKey::new(SortField::Gdp, SortDirection::Desc)),
            )
            .await
            .unwrap();
        let names: Vec<String> = records.into_iter().map(|r| r.name).collect();

        assert_eq!(names, vec!["Germany", "Japan", "France", "Atlantis"]);
    }

    #[tokio::test]
    async fn remove_is_case_insensitive() {
        let repo = seeded().await;

        assert!(repo.remove("JAPAN").await.unwrap());
        assert!(!repo.remove("JAPAN").await.unwrap());
        assert!(repo.find_by_name("Japan").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn status_on_empty_collection() {
        let repo = InMemoryCountryRepository::new();

        let status = repo.status().await.unwrap();

        assert_eq!(status.total, 0);
        assert_eq!(status.last_refreshed_at, None);
    }

    #[tokio::test]
    async fn status_reports_max_refresh_time() {
        let repo = InMemoryCountryRepository::new();
        let newer = Timestamp::from_second(1_000).unwrap();

        let mut old = record("France", None, None, None);
        old.last_refreshed_at = Timestamp::UNIX_EPOCH;
        let mut new = record("Japan", None, None, None);
        new.last_refreshed_at = newer;

        repo.upsert_by_name(old).await.unwrap();
        repo.upsert_by_name(new).await.unwrap();

        let status = repo.status().await.unwrap();
        assert_eq!(status.total, 2);
        assert_eq!(status.last_refreshed_at, Some(newer));
    }
}
