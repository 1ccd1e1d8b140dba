use std::path::Path;
use std::time::Duration;

use chrono::NaiveDate;
use reqwest::Client;
use serde_json::Value;
use thiserror::Error;

use crate::models::TenderRecord;

/// Errors that can occur when loading the tender corpus
#[derive(Debug, Error)]
pub enum TedError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    #[error("Seed file error: {0}")]
    SeedFile(#[from] std::io::Error),

    #[error("Malformed seed file: {0}")]
    SeedParse(#[from] serde_json::Error),
}

/// Client for the TED notice search API.
///
/// Fetches the corpus at startup (and on refresh) with an expert query
/// built from the configured country and CPV scope. Individual notices
/// that fail to parse are skipped; only transport and API-level failures
/// abort a fetch.
pub struct TedClient {
    base_url: String,
    page_size: usize,
    client: Client,
}

impl TedClient {
    pub fn new(base_url: String, timeout_secs: u64, page_size: usize) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url,
            page_size,
            client,
        }
    }

    /// Build the expert query for the notice search.
    fn build_query(country: Option<&str>, cpv_prefix: Option<&str>) -> String {
        let mut clauses = vec!["publication-date>=today(-30)".to_string()];
        if let Some(code) = country {
            clauses.push(format!("place-of-performance={}", code));
        }
        if let Some(prefix) = cpv_prefix {
            clauses.push(format!("classification-cpv={}*", prefix));
        }
        clauses.join(" AND ")
    }

    /// Fetch up to `max_records` notices, page by page.
    pub async fn fetch_notices(
        &self,
        country: Option<&str>,
        cpv_prefix: Option<&str>,
        max_records: usize,
    ) -> Result<Vec<TenderRecord>, TedError> {
        let query = Self::build_query(country, cpv_prefix);
        let encoded_query = urlencoding::encode(&query);
        let today = chrono::Utc::now().date_naive();

        let mut records: Vec<TenderRecord> = Vec::new();
        let mut page = 1;

        loop {
            let url = format!(
                "{}/notices/search?q={}&page={}&limit={}",
                self.base_url.trim_end_matches('/'),
                encoded_query,
                page,
                self.page_size
            );

            tracing::debug!("Fetching notices from: {}", url);

            let response = self.client.get(&url).send().await?;

            if !response.status().is_success() {
                return Err(TedError::ApiError(format!(
                    "Notice search failed: {}",
                    response.status()
                )));
            }

            let json: Value = response.json().await?;

            let notices = json
                .get("notices")
                .and_then(|n| n.as_array())
                .ok_or_else(|| TedError::InvalidResponse("Missing notices array".into()))?;

            if notices.is_empty() {
                break;
            }

            let page_len = notices.len();
            records.extend(notices.iter().filter_map(|doc| parse_notice(doc, today)));

            if records.len() >= max_records || page_len < self.page_size {
                break;
            }
            page += 1;
        }

        records.truncate(max_records);

        tracing::debug!("Fetched {} tender records", records.len());

        Ok(records)
    }

    /// Load the corpus from a local JSON seed file instead of the API.
    ///
    /// `days_to_deadline` is recomputed against the load date, so a stale
    /// seed still reports deadlines correctly.
    pub fn load_seed<P: AsRef<Path>>(path: P) -> Result<Vec<TenderRecord>, TedError> {
        let raw = std::fs::read_to_string(path)?;
        let mut records: Vec<TenderRecord> = serde_json::from_str(&raw)?;

        let today = chrono::Utc::now().date_naive();
        for record in &mut records {
            record.days_to_deadline = TenderRecord::days_until(record.deadline_date, today);
        }

        Ok(records)
    }
}

/// Map one raw notice document into a TenderRecord.
///
/// Returns None when a required field is missing or malformed; the caller
/// skips such notices rather than failing the page.
fn parse_notice(doc: &Value, today: NaiveDate) -> Option<TenderRecord> {
    let id = doc.get("id")?.as_str()?.to_string();
    let title = doc.get("title")?.as_str()?.to_string();
    let country_code = doc.get("country_code")?.as_str()?.to_string();
    let cpv_code = doc.get("cpv_code")?.as_str()?.to_string();
    let publication_date = parse_date(doc.get("publication_date")?)?;
    let deadline_date = parse_date(doc.get("deadline_date")?)?;

    let description = doc
        .get("description")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    let country_name = doc
        .get("country_name")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    let value_eur = doc.get("value_eur").and_then(Value::as_f64).unwrap_or(0.0);
    let is_award = doc.get("is_award").and_then(Value::as_bool).unwrap_or(false);
    let winner = doc
        .get("winner")
        .and_then(Value::as_str)
        .map(str::to_string)
        .filter(|_| is_award);

    Some(TenderRecord {
        id,
        title,
        description,
        country_code,
        country_name,
        cpv_code,
        value_eur,
        publication_date,
        deadline_date,
        days_to_deadline: TenderRecord::days_until(deadline_date, today),
        is_award,
        winner,
    })
}

fn parse_date(value: &Value) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.as_str()?, "%Y-%m-%d").ok()
}
