//! # Pipeline Errors
//!
//! パイプライン共通のエラー分類

use thiserror::Error;

/// パイプラインエラー
///
/// どのエラーもリトライされず、発生した時点でパイプラインを中断する
#[derive(Debug, Error)]
pub enum PipelineError {
    /// 必須パラメータの欠落や不正な形式
    #[error("invalid configuration: {0}")]
    Config(String),

    /// ネットワーク・HTTPの失敗
    #[error("transport error: {0}")]
    Transport(String),

    /// 不正なペイロード
    #[error("failed to parse payload: {0}")]
    Parse(String),

    /// マネージドサービスが操作を拒否した
    #[error("{operation} failed: {message}")]
    Service { operation: String, message: String },

    /// 非同期ジョブが失敗状態で終了した
    #[error("job {job_id} completed with error: {message}")]
    JobFailed { job_id: String, message: String },
}

impl PipelineError {
    /// 設定エラーかどうか
    pub fn is_config(&self) -> bool {
        matches!(self, PipelineError::Config(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_message() {
        let err = PipelineError::Config("date is required".to_string());
        assert_eq!(err.to_string(), "invalid configuration: date is required");
        assert!(err.is_config());
    }

    #[test]
    fn test_job_failed_message() {
        let err = PipelineError::JobFailed {
            job_id: "job-123".to_string(),
            message: "Already Exists: Table".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "job job-123 completed with error: Already Exists: Table"
        );
        assert!(!err.is_config());
    }

    #[test]
    fn test_service_error_message() {
        let err = PipelineError::Service {
            operation: "create dataset".to_string(),
            message: "409 Already Exists".to_string(),
        };
        assert_eq!(err.to_string(), "create dataset failed: 409 Already Exists");
    }

    #[test]
    fn test_downcast_through_anyhow() {
        let err: anyhow::Error = PipelineError::Parse("bad json".to_string()).into();
        let err = err.context("Failed to transform rates");

        let inner = err.downcast_ref::<PipelineError>();
        assert!(matches!(inner, Some(PipelineError::Parse(_))));
    }
}
