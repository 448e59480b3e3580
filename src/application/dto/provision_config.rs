//! # Provision Configuration DTO
//!
//! ウェアハウス構築パイプラインの設定

use crate::domain::errors::PipelineError;
use crate::domain::repositories::warehouse_repository::TableRef;

/// 必須パラメータが空でないことを確認する
///
/// 空白のみの値も空とみなす
pub fn require_non_empty(name: &str, value: String) -> Result<String, PipelineError> {
    if value.trim().is_empty() {
        return Err(PipelineError::Config(format!("{} is required", name)));
    }
    Ok(value)
}

/// ウェアハウス構築設定
///
/// 起動時に一度だけ作成され、以後変更されない
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionConfig {
    /// GCPプロジェクトID
    pub project_id: String,
    /// BigQueryロケーション（例: "us-west1"）
    pub location: String,
    /// ロード元のCloud Storageバケット
    pub source_bucket_id: String,
    /// 作成するデータセット名
    pub dataset_id: String,
    pub events_table_id: String,
    pub rates_table_id: String,
    pub result_table_id: String,
}

impl ProvisionConfig {
    /// 設定を検証して作成します。
    ///
    /// # 例
    ///
    /// ```
    /// use ratesync::application::dto::provision_config::ProvisionConfig;
    ///
    /// let config = ProvisionConfig::new(
    ///     "my-gcp-project".to_string(),
    ///     "us-west1".to_string(),
    ///     "my-source-bucket".to_string(),
    ///     "analytics".to_string(),
    ///     "events".to_string(),
    ///     "rates".to_string(),
    ///     "daily_volume".to_string(),
    /// )
    /// .unwrap();
    ///
    /// assert_eq!(config.result_table().to_string(), "analytics.daily_volume");
    /// ```
    ///
    /// 必須パラメータが空の場合は失敗します：
    ///
    /// ```
    /// # use ratesync::application::dto::provision_config::ProvisionConfig;
    /// let result = ProvisionConfig::new(
    ///     "".to_string(),
    ///     "us-west1".to_string(),
    ///     "bucket".to_string(),
    ///     "analytics".to_string(),
    ///     "events".to_string(),
    ///     "rates".to_string(),
    ///     "daily_volume".to_string(),
    /// );
    /// assert!(result.is_err());
    /// ```
    ///
    /// # Errors
    ///
    /// いずれかのパラメータが空の場合に `PipelineError::Config` を返す
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        project_id: String,
        location: String,
        source_bucket_id: String,
        dataset_id: String,
        events_table_id: String,
        rates_table_id: String,
        result_table_id: String,
    ) -> Result<Self, PipelineError> {
        Ok(Self {
            project_id: require_non_empty("projectId", project_id)?,
            location: require_non_empty("location", location)?,
            source_bucket_id: require_non_empty("sourceBucketId", source_bucket_id)?,
            dataset_id: require_non_empty("datasetId", dataset_id)?,
            events_table_id: require_non_empty("eventsTableId", events_table_id)?,
            rates_table_id: require_non_empty("ratesTableId", rates_table_id)?,
            result_table_id: require_non_empty("resultTableId", result_table_id)?,
        })
    }

    pub fn events_table(&self) -> TableRef {
        TableRef::new(&self.dataset_id, &self.events_table_id)
    }

    pub fn rates_table(&self) -> TableRef {
        TableRef::new(&self.dataset_id, &self.rates_table_id)
    }

    pub fn result_table(&self) -> TableRef {
        TableRef::new(&self.dataset_id, &self.result_table_id)
    }
}
