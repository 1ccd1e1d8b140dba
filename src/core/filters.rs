use crate::models::{FilterSpec, TenderRecord};

/// Check the country predicate: exact ISO-2 match, unfiltered when absent.
#[inline]
pub fn matches_country(record: &TenderRecord, spec: &FilterSpec) -> bool {
    match &spec.country {
        Some(code) => record.country_code == *code,
        None => true,
    }
}

/// Check the CPV predicate.
///
/// CPV codes are hierarchical, so this is a prefix match: filtering on "48"
/// rolls up every IT subcategory (48100000, 48600000, ...).
#[inline]
pub fn matches_cpv(record: &TenderRecord, spec: &FilterSpec) -> bool {
    match &spec.cpv_code {
        Some(prefix) => record.cpv_code.starts_with(prefix.as_str()),
        None => true,
    }
}

/// Check the value range predicate, inclusive on both ends.
///
/// A missing bound is unbounded on that side. An inverted range (min > max)
/// falls out naturally as a constraint nothing satisfies.
#[inline]
pub fn matches_value_range(record: &TenderRecord, spec: &FilterSpec) -> bool {
    if let Some(min) = spec.min_value {
        if record.value_eur < min {
            return false;
        }
    }
    if let Some(max) = spec.max_value {
        if record.value_eur > max {
            return false;
        }
    }
    true
}

/// Conjunction of all filter predicates.
///
/// The predicates are independent, so evaluation order never changes the
/// result; the cheapest checks run first.
#[inline]
pub fn matches_filter(record: &TenderRecord, spec: &FilterSpec) -> bool {
    matches_country(record, spec) && matches_cpv(record, spec) && matches_value_range(record, spec)
}
