use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};

use crate::models::{GroupStat, StatisticsResult, TenderRecord};

/// Deadline window for the urgent KPI, in days
const URGENT_WINDOW_DAYS: i64 = 7;
/// Leading CPV digits that identify the top-level category
const CATEGORY_PREFIX_LEN: usize = 2;

/// Compute the KPI summary and grouped aggregates for a record set.
///
/// Pure function of its input: same records, same output, no side effects.
/// An empty set yields zeroed totals with an average of 0 rather than a
/// division error.
pub fn summarize(records: &[TenderRecord]) -> StatisticsResult {
    let total_count = records.len();
    let total_value: f64 = records.iter().map(|r| r.value_eur).sum();
    let average_value = if total_count > 0 {
        total_value / total_count as f64
    } else {
        0.0
    };
    let urgent_count = records
        .iter()
        .filter(|r| r.days_to_deadline <= URGENT_WINDOW_DAYS)
        .count();

    StatisticsResult {
        total_count,
        total_value,
        average_value,
        urgent_count,
        by_country: group_by(records, |r| r.country_code.clone()),
        by_category: group_by(records, |r| category_key(&r.cpv_code)),
        by_month: group_by(records, |r| month_key(r.publication_date)),
    }
}

/// Top-level CPV category for a code ("48612000" -> "48").
///
/// Codes shorter than the prefix group under themselves; an empty code
/// groups under the empty key.
#[inline]
pub fn category_key(cpv_code: &str) -> String {
    cpv_code.chars().take(CATEGORY_PREFIX_LEN).collect()
}

/// Publication month bucket, e.g. "2025-03".
#[inline]
pub fn month_key(date: NaiveDate) -> String {
    format!("{:04}-{:02}", date.year(), date.month())
}

/// Partition records by key and report count plus summed value per
/// partition, largest spend first. Ties break ascending by key so the
/// ordering is deterministic for equal sums.
fn group_by<F>(records: &[TenderRecord], key_fn: F) -> Vec<GroupStat>
where
    F: Fn(&TenderRecord) -> String,
{
    let mut groups: BTreeMap<String, (usize, f64)> = BTreeMap::new();
    for record in records {
        let entry = groups.entry(key_fn(record)).or_insert((0, 0.0));
        entry.0 += 1;
        entry.1 += record.value_eur;
    }

    let mut stats: Vec<GroupStat> = groups
        .into_iter()
        .map(|(key, (count, total_value))| GroupStat {
            key,
            count,
            total_value,
        })
        .collect();

    stats.sort_by(|a, b| {
        b.total_value
            .partial_cmp(&a.total_value)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.key.cmp(&b.key))
    });

    stats
}
