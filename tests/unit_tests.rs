// Unit tests for the tender query and aggregation engine

use std::sync::Arc;

use chrono::NaiveDate;
use procure_intel::core::{summarize, QueryEngine};
use procure_intel::models::{clamp_limit, Corpus, FilterSpec, TenderRecord, DEFAULT_LIMIT, MAX_LIMIT};
use procure_intel::services::{CacheKey, TenderStore, TokenVerifier};

fn create_record(id: &str, country: &str, cpv: &str, value: f64, is_award: bool) -> TenderRecord {
    TenderRecord {
        id: id.to_string(),
        title: format!("Tender {}", id),
        description: String::new(),
        country_code: country.to_string(),
        country_name: String::new(),
        cpv_code: cpv.to_string(),
        value_eur: value,
        publication_date: NaiveDate::from_ymd_opt(2025, 5, 1).unwrap(),
        deadline_date: NaiveDate::from_ymd_opt(2025, 8, 1).unwrap(),
        days_to_deadline: 30,
        is_award,
        winner: None,
    }
}

fn engine_over(records: Vec<TenderRecord>) -> QueryEngine {
    QueryEngine::new(Arc::new(TenderStore::new(records)))
}

#[test]
fn test_result_length_never_exceeds_clamped_limit() {
    let corpus: Vec<TenderRecord> = (0..2500)
        .map(|i| create_record(&format!("t{}", i), "DE", "48000000", 1000.0, false))
        .collect();
    let engine = engine_over(corpus);

    for requested in [Some(-5), Some(0), Some(1), Some(50), Some(1000), Some(99999), None] {
        let spec = FilterSpec::new(None, None, None, None, requested);
        let results = engine.search(&spec, Corpus::Tenders);
        assert!(results.len() <= clamp_limit(requested));
    }
}

#[test]
fn test_limit_clamp_bounds() {
    assert_eq!(clamp_limit(Some(0)), DEFAULT_LIMIT);
    assert_eq!(clamp_limit(Some(-1)), DEFAULT_LIMIT);
    assert_eq!(clamp_limit(Some(5000)), MAX_LIMIT);
    assert_eq!(clamp_limit(Some(7)), 7);
}

#[test]
fn test_country_filter_is_exact_match() {
    let engine = engine_over(vec![
        create_record("t1", "DE", "48000000", 100.0, false),
        create_record("t2", "FR", "48000000", 200.0, false),
        create_record("t3", "DE", "45000000", 300.0, false),
    ]);

    let spec = FilterSpec::new(Some("DE".to_string()), None, None, None, None);
    let results = engine.search(&spec, Corpus::Tenders);

    assert_eq!(results.len(), 2);
    assert!(results.iter().all(|r| r.country_code == "DE"));
}

#[test]
fn test_cpv_filter_is_prefix_match() {
    let engine = engine_over(vec![
        create_record("t1", "DE", "48100000", 100.0, false),
        create_record("t2", "FR", "48612000", 200.0, false),
        create_record("t3", "DE", "45000000", 300.0, false),
    ]);

    let spec = FilterSpec::new(None, Some("48".to_string()), None, None, None);
    let results = engine.search(&spec, Corpus::Tenders);

    assert_eq!(results.len(), 2);
    assert!(results.iter().all(|r| r.cpv_code.starts_with("48")));
}

#[test]
fn test_value_range_bounds_are_inclusive() {
    let engine = engine_over(vec![
        create_record("t1", "DE", "48000000", 100.0, false),
        create_record("t2", "DE", "48000000", 200.0, false),
        create_record("t3", "DE", "48000000", 300.0, false),
    ]);

    let spec = FilterSpec::new(None, None, Some(100.0), Some(200.0), None);
    let results = engine.search(&spec, Corpus::Tenders);

    let ids: Vec<&str> = results.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["t1", "t2"]);
}

#[test]
fn test_summarize_total_value_is_the_exact_sum() {
    let records = vec![
        create_record("t1", "DE", "48000000", 100.0, false),
        create_record("t2", "DE", "48000000", 200.0, false),
        create_record("t3", "FR", "45000000", 300.0, false),
    ];

    let stats = summarize(&records);
    let expected: f64 = records.iter().map(|r| r.value_eur).sum();

    assert_eq!(stats.total_value, expected);
    // repeated calls must not drift
    assert_eq!(summarize(&records).total_value, expected);
}

#[test]
fn test_summarize_three_record_scenario() {
    // values 100/200/300, countries DE/DE/FR
    let records = vec![
        create_record("t1", "DE", "48000000", 100.0, false),
        create_record("t2", "DE", "48000000", 200.0, false),
        create_record("t3", "FR", "45000000", 300.0, false),
    ];

    let stats = summarize(&records);

    assert_eq!(stats.total_count, 3);
    assert_eq!(stats.total_value, 600.0);
    assert_eq!(stats.average_value, 200.0);

    // DE and FR both sum to 300; the tie breaks ascending by country code
    assert_eq!(stats.by_country[0].key, "DE");
    assert_eq!(stats.by_country[0].count, 2);
    assert_eq!(stats.by_country[0].total_value, 300.0);
    assert_eq!(stats.by_country[1].key, "FR");
    assert_eq!(stats.by_country[1].count, 1);
    assert_eq!(stats.by_country[1].total_value, 300.0);
}

#[test]
fn test_summarize_empty_set_is_all_zeroes() {
    let stats = summarize(&[]);

    assert_eq!(stats.total_count, 0);
    assert_eq!(stats.total_value, 0.0);
    assert_eq!(stats.average_value, 0.0);
    assert_eq!(stats.urgent_count, 0);
}

#[test]
fn test_awards_and_tenders_corpora_are_disjoint() {
    let engine = engine_over(vec![
        create_record("t1", "DE", "48000000", 100.0, false),
        create_record("a1", "DE", "48000000", 200.0, true),
        create_record("t2", "FR", "45000000", 300.0, false),
        create_record("a2", "FR", "45000000", 400.0, true),
    ]);

    let tenders = engine.search(&FilterSpec::default(), Corpus::Tenders);
    let awards = engine.search(&FilterSpec::default(), Corpus::Awards);

    assert_eq!(tenders.len(), 2);
    assert_eq!(awards.len(), 2);
    for tender in &tenders {
        assert!(awards.iter().all(|a| a.id != tender.id));
    }
}

#[test]
fn test_inverted_value_range_yields_empty_without_error() {
    let engine = engine_over(vec![create_record("t1", "DE", "48000000", 500.0, false)]);

    let spec = FilterSpec::new(None, None, Some(1000.0), Some(10.0), None);
    assert!(engine.search(&spec, Corpus::Tenders).is_empty());
}

#[test]
fn test_token_verifier_round_trip() {
    use jsonwebtoken::{encode, EncodingKey, Header};

    #[derive(serde::Serialize)]
    struct Claims {
        email: String,
        exp: i64,
    }

    let secret = "unit-test-secret";
    let verifier = TokenVerifier::new(secret);
    let token = encode(
        &Header::default(),
        &Claims {
            email: "analyst@test.com".to_string(),
            exp: chrono::Utc::now().timestamp() + 3600,
        },
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap();

    assert_eq!(verifier.resolve(&token).unwrap(), "analyst@test.com");
    assert!(verifier.resolve("garbage").is_err());
}

#[test]
fn test_stats_cache_key_includes_corpus_and_filters() {
    let spec = FilterSpec::new(Some("DE".to_string()), Some("48".to_string()), None, None, None);

    let tenders_key = CacheKey::stats(Corpus::Tenders, &spec);
    let awards_key = CacheKey::stats(Corpus::Awards, &spec);

    assert_ne!(tenders_key, awards_key);
    assert!(tenders_key.contains("DE"));
    assert!(tenders_key.contains("48"));
}
