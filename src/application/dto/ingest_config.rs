//! # Ingest Configuration DTO
//!
//! 為替レート取り込みパイプラインの設定

use chrono::NaiveDate;

use super::provision_config::require_non_empty;
use crate::domain::entities::rate_record::DATE_FORMAT;
use crate::domain::errors::PipelineError;

/// `YYYY-MM-DD` 形式の日付を解析する
///
/// ゼロ埋めされていない値（`2024-4-1`）など、書式どおりに往復しない値は拒否する
pub fn parse_date(value: &str) -> Result<NaiveDate, PipelineError> {
    let date = NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|e| PipelineError::Config(format!("invalid date '{}': {}", value, e)))?;

    if date.format(DATE_FORMAT).to_string() != value {
        return Err(PipelineError::Config(format!(
            "invalid date '{}': expected YYYY-MM-DD",
            value
        )));
    }

    Ok(date)
}

/// 取り込み設定
#[derive(Clone, PartialEq, Eq)]
pub struct IngestConfig {
    /// 取得対象日
    pub date: NaiveDate,
    /// 出力先のCloud Storageバケット
    pub bucket_name: String,
    /// 為替APIのアクセスキー
    pub api_key: String,
}

// APIキーをログに出さない
impl std::fmt::Debug for IngestConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IngestConfig")
            .field("date", &self.date)
            .field("bucket_name", &self.bucket_name)
            .field("api_key", &"***")
            .finish()
    }
}

impl IngestConfig {
    /// 設定を検証して作成する
    ///
    /// # Errors
    ///
    /// パラメータが空、または日付が `YYYY-MM-DD` でない場合に `PipelineError::Config` を返す
    pub fn new(date: &str, bucket_name: String, api_key: String) -> Result<Self, PipelineError> {
        let date = require_non_empty("date", date.to_string())?;
        Ok(Self {
            date: parse_date(&date)?,
            bucket_name: require_non_empty("bucketName", bucket_name)?,
            api_key: require_non_empty("apiKey", api_key)?,
        })
    }

    /// 取り込み結果を書き込むオブジェクトパス
    pub fn object_path(&self) -> String {
        format!("raw/exchange-rates/{}.json", self.date.format(DATE_FORMAT))
    }
}
