use crate::error::QueryError;
use std::fmt::Display;
use std::str::FromStr;

/// Case-insensitive equality filters for listing, AND-combined when both
/// are present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListFilter {
    pub region: Option<String>,
    pub currency_code: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Gdp,
    Population,
    Name,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

/// A parsed `sort` query value.
///
/// Accepted spellings are the bare field (`gdp`, `population`, `name`) and
/// the suffixed forms (`gdp_asc`, `gdp_desc`, ...). A bare field falls back
/// to its natural direction: descending for gdp and population, ascending
/// for name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortKey {
    pub field: SortField,
    pub direction: SortDirection,
}

/// Every spelling [`SortKey::parse`] accepts, for validation messages.
pub const ACCEPTED_SORT_KEYS: [&str; 9] = [
    "gdp",
    "gdp_asc",
    "gdp_desc",
    "population",
    "population_asc",
    "population_desc",
    "name",
    "name_asc",
    "name_desc",
];

impl SortKey {
    pub fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    /// Parses a `sort` query value.
    pub fn parse(value: &str) -> Result<Self, QueryError> {
        let key = match value {
            "gdp" | "gdp_desc" => Self::new(SortField::Gdp, SortDirection::Desc),
            "gdp_asc" => Self::new(SortField::Gdp, SortDirection::Asc),
            "population" | "population_desc" => {
                Self::new(SortField::Population, SortDirection::Desc)
            }
            "population_asc" => Self::new(SortField::Population, SortDirection::Asc),
            "name" | "name_asc" => Self::new(SortField::Name, SortDirection::Asc),
            "name_desc" => Self::new(SortField::Name, SortDirection::Desc),
            other => return Err(QueryError::InvalidSortKey(other.to_string())),
        };
        Ok(key)
    }
}

impl FromStr for SortKey {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Display for SortField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortField::Gdp => f.write_str("gdp"),
            SortField::Population => f.write_str("population"),
            SortField::Name => f.write_str("name"),
        }
    }
}

impl Display for SortDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortDirection::Asc => f.write_str("asc"),
            SortDirection::Desc => f.write_str("desc"),
        }
    }
}
