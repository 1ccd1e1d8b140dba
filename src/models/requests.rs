use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::{FavoriteEntry, FilterSpec};

/// Query parameters accepted by the search and awards endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub cpv_code: Option<String>,
    #[serde(default)]
    pub min_value: Option<f64>,
    #[serde(default)]
    pub max_value: Option<f64>,
    #[serde(default)]
    pub limit: Option<i64>,
}

impl SearchQuery {
    /// Normalize the raw parameters into a validated filter.
    pub fn into_spec(self) -> FilterSpec {
        FilterSpec::new(
            self.country,
            self.cpv_code,
            self.min_value,
            self.max_value,
            self.limit,
        )
    }
}

/// Query parameters accepted by the statistics endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsQuery {
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub cpv_code: Option<String>,
}

impl StatsQuery {
    /// Statistics aggregate over every matching record, so no limit applies.
    pub fn into_spec(self) -> FilterSpec {
        FilterSpec::new(self.country, self.cpv_code, None, None, None)
    }
}

/// Tender payload posted to the add-favorite endpoint
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FavoritePayload {
    #[validate(length(min = 1))]
    pub id: String,
    #[validate(length(min = 1))]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub value: f64,
}

impl FavoritePayload {
    pub fn into_entry(self) -> FavoriteEntry {
        FavoriteEntry {
            id: self.id,
            title: self.title,
            description: self.description,
            country: self.country,
            value: self.value,
        }
    }
}
