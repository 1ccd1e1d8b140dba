use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Default number of records returned when no limit is given
pub const DEFAULT_LIMIT: usize = 100;
/// Hard cap on the number of records a single query may return
pub const MAX_LIMIT: usize = 1000;

/// A single procurement notice, either an open tender or an awarded contract.
///
/// Records are immutable once loaded; the corpus is only ever replaced
/// wholesale. Field names match the JSON emitted to dashboards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TenderRecord {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub country_code: String,
    #[serde(default)]
    pub country_name: String,
    pub cpv_code: String,
    #[serde(default)]
    pub value_eur: f64,
    pub publication_date: NaiveDate,
    pub deadline_date: NaiveDate,
    #[serde(default)]
    pub days_to_deadline: i64,
    #[serde(default)]
    pub is_award: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub winner: Option<String>,
}

impl TenderRecord {
    /// Days from `today` until `deadline`; negative once the deadline has passed.
    pub fn days_until(deadline: NaiveDate, today: NaiveDate) -> i64 {
        (deadline - today).num_days()
    }
}

/// Which half of the corpus a query runs against.
///
/// Tenders and awards are disjoint: a record is in exactly one corpus,
/// decided by its `is_award` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Corpus {
    Tenders,
    Awards,
}

impl Corpus {
    pub fn is_award(self) -> bool {
        matches!(self, Corpus::Awards)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Corpus::Tenders => "tenders",
            Corpus::Awards => "awards",
        }
    }
}

/// Validated filter parameters for a single query.
///
/// Built once per request from the raw query string. The limit is always
/// clamped into [1, MAX_LIMIT]; a missing, zero or negative limit falls back
/// to DEFAULT_LIMIT so a malformed request never yields a silently empty
/// page. An inverted value range (min > max) is kept as-is: the conjunction
/// simply matches nothing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpv_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_value: Option<f64>,
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    DEFAULT_LIMIT
}

impl FilterSpec {
    pub fn new(
        country: Option<String>,
        cpv_code: Option<String>,
        min_value: Option<f64>,
        max_value: Option<f64>,
        limit: Option<i64>,
    ) -> Self {
        Self {
            country: normalize(country),
            cpv_code: normalize(cpv_code),
            min_value,
            max_value,
            limit: clamp_limit(limit),
        }
    }
}

impl Default for FilterSpec {
    fn default() -> Self {
        Self {
            country: None,
            cpv_code: None,
            min_value: None,
            max_value: None,
            limit: DEFAULT_LIMIT,
        }
    }
}

/// Empty strings in the query string mean "not filtered", same as absence.
fn normalize(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Clamp a requested limit into [1, MAX_LIMIT]; zero or negative requests
/// are treated as the default rather than rejected.
pub fn clamp_limit(requested: Option<i64>) -> usize {
    match requested {
        Some(n) if n > 0 => (n as usize).min(MAX_LIMIT),
        _ => DEFAULT_LIMIT,
    }
}

/// Count and summed value for one partition of the corpus.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupStat {
    pub key: String,
    pub count: usize,
    pub total_value: f64,
}

/// KPI summary and chart-ready aggregates for a filtered record set.
///
/// Derived per request, never persisted. Group vectors are ordered by
/// descending summed value with ties broken ascending by key, so equal
/// inputs always serialize identically.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatisticsResult {
    pub total_count: usize,
    pub total_value: f64,
    pub average_value: f64,
    pub urgent_count: usize,
    pub by_country: Vec<GroupStat>,
    pub by_category: Vec<GroupStat>,
    pub by_month: Vec<GroupStat>,
}

/// A tender saved to one identity's favorites set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FavoriteEntry {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub value: f64,
}
