//! Integration tests for ratesync
//!
//! These tests verify end-to-end functionality.
//! Some tests require GCP credentials to run.

use std::fs;
use std::path::PathBuf;

use ratesync::adapter::coinapi::transformer::CoinApiTransformer;
use ratesync::domain::services::rates_transformer::RatesTransformer;

/// Get the path to test fixtures
fn fixtures_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

#[test]
fn test_fixture_file_exists() {
    let sample = fixtures_path().join("coinapi_rates.json");
    assert!(sample.exists(), "coinapi_rates.json fixture should exist");
}

#[test]
fn test_fixture_file_valid_json() {
    let sample = fixtures_path().join("coinapi_rates.json");
    let content = fs::read_to_string(&sample).expect("Failed to read coinapi_rates.json");

    let json: serde_json::Value = serde_json::from_str(&content).unwrap();
    let rates = json
        .get("rates")
        .and_then(|r| r.as_array())
        .expect("fixture should have a rates array");

    for rate in rates {
        assert!(rate.get("time").is_some(), "Each rate should have time");
        assert!(
            rate.get("asset_id_quote").is_some(),
            "Each rate should have asset_id_quote"
        );
        assert!(rate.get("rate").is_some(), "Each rate should have rate");
    }

    assert_eq!(rates.len(), 3, "coinapi_rates.json should have 3 rates");
}

#[test]
fn test_transform_fixture() {
    let raw = fs::read(fixtures_path().join("coinapi_rates.json")).unwrap();

    let output = CoinApiTransformer.transform(&raw).unwrap();
    let content = String::from_utf8(output).unwrap();
    let lines: Vec<&str> = content.lines().collect();

    assert_eq!(lines.len(), 3);
    assert_eq!(
        lines[0],
        r#"{"symbol":"EUR","rate":0.9268,"date":"2024-04-01"}"#
    );
    assert_eq!(
        lines[2],
        r#"{"symbol":"USDC.E","rate":0.9998,"date":"2024-04-01"}"#
    );
}

/// Integration test that requires GCP credentials
/// Run with: cargo test --test integration_test -- --ignored
#[test]
#[ignore]
fn test_bigquery_provision_e2e() {
    // This test requires:
    // - GOOGLE_APPLICATION_CREDENTIALS env var set
    // - RATESYNC_TEST_PROJECT, RATESYNC_TEST_BUCKET env vars set

    let project = std::env::var("RATESYNC_TEST_PROJECT")
        .expect("RATESYNC_TEST_PROJECT env var required for E2E test");
    let bucket = std::env::var("RATESYNC_TEST_BUCKET")
        .expect("RATESYNC_TEST_BUCKET env var required for E2E test");

    let args = ratesync::driver::cli::ProvisionArgs {
        project_id: project,
        location: "us-west1".to_string(),
        source_bucket_id: bucket,
        dataset_id: format!("ratesync_e2e_{}", std::process::id()),
        events_table_id: "events".to_string(),
        rates_table_id: "rates".to_string(),
        result_table_id: "volume".to_string(),
        credentials: None,
        dry_run: false,
    };

    let runtime = tokio::runtime::Runtime::new().unwrap();
    let summary = runtime
        .block_on(async {
            let workflow = ratesync::driver::ProvisionWorkflow::new(args.to_config()?);
            workflow.execute(&args).await
        })
        .unwrap();

    assert_eq!(summary.created_tables.len(), 3);
}
