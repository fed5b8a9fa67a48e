use crate::error::AppError;
use atlas_core::query::ACCEPTED_SORT_KEYS;
use atlas_core::{ListFilter, MirrorStatus, SortKey};
use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[derive(Serialize)]
pub struct RefreshResponse {
    pub message: &'static str,
    pub count: u64,
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

#[derive(Serialize)]
pub struct StatusResponse {
    pub total_countries: u64,
    pub last_refreshed_at: Option<Timestamp>,
}

impl From<MirrorStatus> for StatusResponse {
    fn from(status: MirrorStatus) -> Self {
        Self {
            total_countries: status.total,
            last_refreshed_at: status.last_refreshed_at,
        }
    }
}

/// Query parameters of `GET /countries`. Unknown parameters are ignored;
/// an unrecognized `sort` value is a validation failure.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub region: Option<String>,
    pub currency: Option<String>,
    pub sort: Option<String>,
}

impl ListQuery {
    /// Splits the query into a repository filter and sort key.
    pub fn into_parts(self) -> Result<(ListFilter, Option<SortKey>), AppError> {
        let sort = self
            .sort
            .as_deref()
            .map(|value| {
                SortKey::parse(value).map_err(|_| {
                    let mut details = BTreeMap::new();
                    details.insert(
                        "sort".to_string(),
                        format!("sort must be one of: {}", ACCEPTED_SORT_KEYS.join(", ")),
                    );
                    AppError::Validation(details)
                })
            })
            .transpose()?;

        let filter = ListFilter {
            region: self.region,
            currency_code: self.currency,
        };

        Ok((filter, sort))
    }
}
