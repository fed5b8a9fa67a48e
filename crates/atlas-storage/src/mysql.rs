use async_trait::async_trait;
use atlas_core::error::StorageError;
use atlas_core::query::{ListFilter, SortDirection, SortField, SortKey};
use atlas_core::repository::{CountryRepository, MirrorStatus};
use atlas_core::CountryRecord;
use jiff::Timestamp;
use sqlx::mysql::MySqlRow;
use sqlx::{MySqlPool, Row};

type Result<T> = std::result::Result<T, StorageError>;

const SELECT_COLUMNS: &str = "name, capital, region, population, currency_code, \
     exchange_rate, estimated_gdp, flag_url, last_refreshed_at";

/// MySQL implementation of the repository contract.
///
/// The upsert leans on the case-insensitive unique key over `name`
/// (`ON DUPLICATE KEY UPDATE`), so a refresh never creates a second row for
/// a name that differs only in casing, and row identity survives updates.
#[derive(Debug, Clone)]
pub struct MySqlCountryRepository {
    pool: MySqlPool,
}

impl MySqlCountryRepository {
    /// Creates a repository from an existing MySQL connection pool.
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Creates a repository by opening a new MySQL connection pool.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = MySqlPool::connect(database_url)
            .await
            .map_err(map_sqlx_error)?;
        Ok(Self::new(pool))
    }

    /// Applies the `countries` DDL; safe to call on every startup.
    pub async fn ensure_schema(&self) -> Result<()> {
        sqlx::query(include_str!("../ddl/mysql/countries.sql"))
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        Ok(())
    }

    /// Returns a reference to the underlying pool.
    pub fn pool(&self) -> &MySqlPool {
        &self.pool
    }
}

fn map_sqlx_error(err: sqlx::Error) -> StorageError {
    let message = err.to_string();

    match err {
        sqlx::Error::PoolTimedOut => StorageError::Timeout(message),
        sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed
        | sqlx::Error::Io(_)
        | sqlx::Error::Tls(_) => StorageError::Unavailable(message),
        sqlx::Error::ColumnIndexOutOfBounds { .. }
        | sqlx::Error::ColumnNotFound(_)
        | sqlx::Error::ColumnDecode { .. }
        | sqlx::Error::TypeNotFound { .. }
        | sqlx::Error::Decode(_)
        | sqlx::Error::RowNotFound => StorageError::InvalidData(message),
        _ => StorageError::Query(message),
    }
}

fn parse_refreshed_at(seconds: i64) -> Result<Timestamp> {
    Timestamp::from_second(seconds).map_err(|e| {
        StorageError::InvalidData(format!(
            "invalid last_refreshed_at timestamp '{}': {e}",
            seconds
        ))
    })
}

fn record_from_row(row: &MySqlRow) -> Result<CountryRecord> {
    let refreshed_raw: i64 = row.try_get("last_refreshed_at").map_err(map_sqlx_error)?;

    Ok(CountryRecord {
        name: row.try_get("name").map_err(map_sqlx_error)?,
        capital: row.try_get("capital").map_err(map_sqlx_error)?,
        region: row.try_get("region").map_err(map_sqlx_error)?,
        population: row.try_get("population").map_err(map_sqlx_error)?,
        currency_code: row.try_get("currency_code").map_err(map_sqlx_error)?,
        exchange_rate: row.try_get("exchange_rate").map_err(map_sqlx_error)?,
        estimated_gdp: row.try_get("estimated_gdp").map_err(map_sqlx_error)?,
        flag_url: row.try_get("flag_url").map_err(map_sqlx_error)?,
        last_refreshed_at: parse_refreshed_at(refreshed_raw)?,
    })
}

fn order_by_clause(sort: SortKey) -> &'static str {
    match (sort.field, sort.direction) {
        (SortField::Gdp, SortDirection::Asc) => " ORDER BY estimated_gdp ASC",
        (SortField::Gdp, SortDirection::Desc) => " ORDER BY estimated_gdp DESC",
        (SortField::Population, SortDirection::Asc) => " ORDER BY population ASC",
        (SortField::Population, SortDirection::Desc) => " ORDER BY population DESC",
        (SortField::Name, SortDirection::Asc) => " ORDER BY name ASC",
        (SortField::Name, SortDirection::Desc) => " ORDER BY name DESC",
    }
}

#[async_trait]
impl CountryRepository for MySqlCountryRepository {
    async fn upsert_by_name(&self, record: CountryRecord) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO countries
                (name, capital, region, population, currency_code,
                 exchange_rate, estimated_gdp, flag_url, last_refreshed_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?) AS incoming
            ON DUPLICATE KEY UPDATE
                name = incoming.name,
                capital = incoming.capital,
                region = incoming.region,
                population = incoming.population,
                currency_code = incoming.currency_code,
                exchange_rate = incoming.exchange_rate,
                estimated_gdp = incoming.estimated_gdp,
                flag_url = incoming.flag_url,
                last_refreshed_at = incoming.last_refreshed_at
            "#,
        )
        .bind(&record.name)
        .bind(&record.capital)
        .bind(&record.region)
        .bind(record.population)
        .bind(&record.currency_code)
        .bind(record.exchange_rate)
        .bind(record.estimated_gdp)
        .bind(&record.flag_url)
        .bind(record.last_refreshed_at.as_second())
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(())
    }

    async fn list(
        &self,
        filter: &ListFilter,
        sort: Option<SortKey>,
    ) -> Result<Vec<CountryRecord>> {
        let mut sql = format!("SELECT {SELECT_COLUMNS} FROM countries");

        let mut clauses = Vec::new();
        if filter.region.is_some() {
            clauses.push("LOWER(region) = LOWER(?)");
        }
        if filter.currency_code.is_some() {
            clauses.push("LOWER(currency_code) = LOWER(?)");
        }
        if !clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&clauses.join(" AND "));
        }
        if let Some(key) = sort {
            sql.push_str(order_by_clause(key));
        }

        let mut query = sqlx::query(&sql);
        if let Some(region) = &filter.region {
            query = query.bind(region);
        }
        if let Some(code) = &filter.currency_code {
            query = query.bind(code);
        }

        let rows = query.fetch_all(&self.pool).await.map_err(map_sqlx_error)?;
        rows.iter().map(record_from_row).collect()
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<CountryRecord>> {
        let row = sqlx::query(&format!(
            "SELECT {SELECT_COLUMNS} FROM countries WHERE LOWER(name) = LOWER(?) LIMIT 1"
        ))
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        row.as_ref().map(record_from_row).transpose()
    }

    async fn remove(&self, name: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM countries WHERE LOWER(name) = LOWER(?)")
            .bind(name)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn status(&self) -> Result<MirrorStatus> {
        let row = sqlx::query(
            "SELECT COUNT(*) AS total, MAX(last_refreshed_at) AS last_refreshed_at FROM countries",
        )
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        let total: i64 = row.try_get("total").map_err(map_sqlx_error)?;
        let refreshed_raw: Option<i64> =
            row.try_get("last_refreshed_at").map_err(map_sqlx_error)?;
        let last_refreshed_at = refreshed_raw.map(parse_refreshed_at).transpose()?;

        Ok(MirrorStatus {
            total: total as u64,
            last_refreshed_at,
        })
    }
}
