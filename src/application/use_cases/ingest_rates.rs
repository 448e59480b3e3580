//! # Ingest Rates Use Case
//!
//! 為替レートの取得・変換・アップロード

use std::sync::Arc;

use anyhow::{Context, Result};
use log::{debug, info};

use crate::application::dto::ingest_config::IngestConfig;
use crate::domain::repositories::object_repository::ObjectStore;
use crate::domain::repositories::rates_repository::RatesFetcher;
use crate::domain::services::rates_transformer::RatesTransformer;

/// 取り込み結果のサマリー
#[derive(Debug, Clone)]
pub struct IngestSummary {
    /// 書き込み先のオブジェクトパス
    pub object_path: String,
    /// 書き込んだレコード数
    pub record_count: usize,
    /// 書き込んだバイト数
    pub byte_count: usize,
}

/// 為替レート取り込みユースケース
///
/// 取得 → 変換 → アップロードを順に実行し、最初のエラーで中断する
pub struct IngestRatesUseCase<F: RatesFetcher, T: RatesTransformer, S: ObjectStore> {
    fetcher: Arc<F>,
    transformer: Arc<T>,
    store: Arc<S>,
}

impl<F: RatesFetcher, T: RatesTransformer, S: ObjectStore> IngestRatesUseCase<F, T, S> {
    /// 新しいユースケースを作成
    ///
    /// # Arguments
    ///
    /// * `fetcher` - レート取得元
    /// * `transformer` - レート変換器
    /// * `store` - 書き込み先のオブジェクトストア
    pub fn new(fetcher: Arc<F>, transformer: Arc<T>, store: Arc<S>) -> Self {
        Self {
            fetcher,
            transformer,
            store,
        }
    }

    /// 取得と変換のみを行い、改行区切りのレコードを返す
    ///
    /// # Errors
    ///
    /// 取得または変換に失敗した場合にエラーを返す
    pub async fn prepare(&self, config: &IngestConfig) -> Result<Vec<u8>> {
        info!("Running exchange rates ingestion for {}", config.date);

        let raw = self
            .fetcher
            .fetch(config.date)
            .await
            .context("Failed to fetch rates data")?;
        debug!("Fetched {} bytes of rates data", raw.len());

        let transformed = self
            .transformer
            .transform(&raw)
            .context("Failed to transform rates data")?;
        debug!("Transformed rates:\n{}", String::from_utf8_lossy(&transformed));

        Ok(transformed)
    }

    /// 取得・変換・アップロードを実行する
    ///
    /// # Errors
    ///
    /// いずれかのステップが失敗した場合にエラーを返す
    pub async fn execute(&self, config: &IngestConfig) -> Result<IngestSummary> {
        let data = self.prepare(config).await?;

        let object_path = config.object_path();
        let record_count = count_records(&data);
        let byte_count = data.len();

        self.store
            .upload(&object_path, data)
            .await
            .with_context(|| format!("Failed to upload {}", object_path))?;

        info!(
            "Uploaded {} records ({} bytes) to {}",
            record_count, byte_count, object_path
        );

        Ok(IngestSummary {
            object_path,
            record_count,
            byte_count,
        })
    }
}

/// 改行区切りデータのレコード数
pub fn count_records(data: &[u8]) -> usize {
    data.split(|b| *b == b'\n')
        .filter(|line| !line.is_empty())
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use std::sync::Mutex;

    use crate::adapter::coinapi::transformer::CoinApiTransformer;
    use crate::domain::errors::PipelineError;

    const PAYLOAD: &str = r#"{"rates":[
        {"time":"2024-04-01T00:00:00Z","asset_id_quote":"EUR","rate":0.92},
        {"time":"2024-04-01T00:00:00Z","asset_id_quote":"JPY","rate":151.3}
    ]}"#;

    struct MockFetcher {
        payload: Option<&'static str>,
        requested: Mutex<Vec<NaiveDate>>,
    }

    impl MockFetcher {
        fn returning(payload: &'static str) -> Self {
            Self {
                payload: Some(payload),
                requested: Mutex::new(Vec::new()),
            }
        }

        fn failing() -> Self {
            Self {
                payload: None,
                requested: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl RatesFetcher for MockFetcher {
        async fn fetch(&self, date: NaiveDate) -> Result<Vec<u8>> {
            self.requested.lock().unwrap().push(date);
            match self.payload {
                Some(p) => Ok(p.as_bytes().to_vec()),
                None => Err(PipelineError::Transport("connection refused".to_string()).into()),
            }
        }
    }

    #[derive(Default)]
    struct MockObjectStore {
        objects: Mutex<Vec<(String, Vec<u8>)>>,
    }

    #[async_trait]
    impl ObjectStore for MockObjectStore {
        async fn upload(&self, path: &str, data: Vec<u8>) -> Result<()> {
            self.objects.lock().unwrap().push((path.to_string(), data));
            Ok(())
        }
    }

    fn test_config() -> IngestConfig {
        IngestConfig::new("2024-04-01", "bucket".to_string(), "key".to_string()).unwrap()
    }

    #[tokio::test]
    async fn test_execute_uploads_transformed_records() {
        let fetcher = Arc::new(MockFetcher::returning(PAYLOAD));
        let store = Arc::new(MockObjectStore::default());
        let use_case =
            IngestRatesUseCase::new(fetcher.clone(), Arc::new(CoinApiTransformer), store.clone());

        let summary = use_case.execute(&test_config()).await.unwrap();

        assert_eq!(summary.object_path, "raw/exchange-rates/2024-04-01.json");
        assert_eq!(summary.record_count, 2);

        let objects = store.objects.lock().unwrap();
        assert_eq!(objects.len(), 1);
        assert_eq!(objects[0].0, "raw/exchange-rates/2024-04-01.json");
        assert_eq!(
            String::from_utf8(objects[0].1.clone()).unwrap(),
            "{\"symbol\":\"EUR\",\"rate\":0.92,\"date\":\"2024-04-01\"}\n\
             {\"symbol\":\"JPY\",\"rate\":151.3,\"date\":\"2024-04-01\"}\n"
        );
        assert_eq!(
            *fetcher.requested.lock().unwrap(),
            vec![NaiveDate::from_ymd_opt(2024, 4, 1).unwrap()]
        );
    }

    #[tokio::test]
    async fn test_fetch_failure_skips_upload() {
        let store = Arc::new(MockObjectStore::default());
        let use_case = IngestRatesUseCase::new(
            Arc::new(MockFetcher::failing()),
            Arc::new(CoinApiTransformer),
            store.clone(),
        );

        let err = use_case.execute(&test_config()).await.unwrap_err();

        assert!(err.to_string().contains("Failed to fetch rates data"));
        assert!(store.objects.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_payload_skips_upload() {
        let store = Arc::new(MockObjectStore::default());
        let use_case = IngestRatesUseCase::new(
            Arc::new(MockFetcher::returning("{\"rates\": [")),
            Arc::new(CoinApiTransformer),
            store.clone(),
        );

        let err = use_case.execute(&test_config()).await.unwrap_err();

        assert!(matches!(
            err.downcast_ref::<PipelineError>(),
            Some(PipelineError::Parse(_))
        ));
        assert!(store.objects.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_prepare_does_not_upload() {
        let store = Arc::new(MockObjectStore::default());
        let use_case = IngestRatesUseCase::new(
            Arc::new(MockFetcher::returning(PAYLOAD)),
            Arc::new(CoinApiTransformer),
            store.clone(),
        );

        let data = use_case.prepare(&test_config()).await.unwrap();

        assert_eq!(count_records(&data), 2);
        assert!(store.objects.lock().unwrap().is_empty());
    }

    #[test]
    fn test_count_records() {
        assert_eq!(count_records(b""), 0);
        assert_eq!(count_records(b"{}\n"), 1);
        assert_eq!(count_records(b"{}\n{}\n"), 2);
    }
}
