//! File-backed Rates Fetcher
//!
//! ローカルに保存したAPIレスポンスを返す（オフライン実行・テスト用）

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use log::info;
use std::path::PathBuf;

use crate::domain::repositories::rates_repository::RatesFetcher;

/// Returns the same file for every date
pub struct FileRatesFetcher {
    path: PathBuf,
}

impl FileRatesFetcher {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl RatesFetcher for FileRatesFetcher {
    async fn fetch(&self, date: NaiveDate) -> Result<Vec<u8>> {
        info!(
            "Reading rates for {} from {}",
            date,
            self.path.display()
        );
        tokio::fs::read(&self.path)
            .await
            .with_context(|| format!("Failed to read rates file {}", self.path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_fetch_reads_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("rates.json");
        std::fs::write(&path, r#"{"rates":[]}"#).unwrap();

        let fetcher = FileRatesFetcher::new(&path);
        let data = fetcher
            .fetch(NaiveDate::from_ymd_opt(2024, 4, 1).unwrap())
            .await
            .unwrap();

        assert_eq!(data, br#"{"rates":[]}"#);
    }

    #[tokio::test]
    async fn test_fetch_missing_file() {
        let fetcher = FileRatesFetcher::new("/nonexistent/rates.json");
        let result = fetcher
            .fetch(NaiveDate::from_ymd_opt(2024, 4, 1).unwrap())
            .await;

        assert!(result.is_err());
    }
}
