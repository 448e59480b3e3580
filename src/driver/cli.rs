//! CLI Argument Parsing
//!
//! CLIの引数解析

use clap::Parser;

use crate::adapter::coinapi::fetcher::DEFAULT_BASE_URL;
use crate::application::dto::ingest_config::IngestConfig;
use crate::application::dto::provision_config::ProvisionConfig;
use crate::domain::errors::PipelineError;

/// BigQueryにデータセットとテーブルを作成し、集計するCLI
#[derive(Parser, Debug, Clone)]
#[command(name = "ratesync-provision")]
#[command(about = "Create BigQuery dataset and tables, load source files and aggregate", long_about = None)]
pub struct ProvisionArgs {
    /// Google Cloud project ID to create tables in
    #[arg(long = "projectId", alias = "project-id")]
    pub project_id: String,

    /// GCP data and compute location of created entities
    #[arg(long, default_value = "us-west1")]
    pub location: String,

    /// Google Storage bucket ID to populate tables from
    #[arg(long = "sourceBucketId", alias = "source-bucket-id")]
    pub source_bucket_id: String,

    /// Name of the BigQuery dataset to be created
    #[arg(long = "datasetId", alias = "dataset-id")]
    pub dataset_id: String,

    /// Name of the event data BigQuery table to be created
    #[arg(long = "eventsTableId", alias = "events-table-id")]
    pub events_table_id: String,

    /// Name of the exchange rates data BigQuery table to be created
    #[arg(long = "ratesTableId", alias = "rates-table-id")]
    pub rates_table_id: String,

    /// Name of the BigQuery table with aggregated data to be created
    #[arg(long = "resultTableId", alias = "result-table-id")]
    pub result_table_id: String,

    /// Service account key path (defaults to Application Default Credentials)
    #[arg(long)]
    pub credentials: Option<String>,

    /// Dry run mode - print the plan and query without touching BigQuery
    #[arg(long)]
    pub dry_run: bool,
}

impl ProvisionArgs {
    /// 引数を検証済みの設定に変換する
    pub fn to_config(&self) -> Result<ProvisionConfig, PipelineError> {
        ProvisionConfig::new(
            self.project_id.clone(),
            self.location.clone(),
            self.source_bucket_id.clone(),
            self.dataset_id.clone(),
            self.events_table_id.clone(),
            self.rates_table_id.clone(),
            self.result_table_id.clone(),
        )
    }
}

/// 為替レートを取得してCloud Storageにアップロードする CLI
#[derive(Parser, Debug, Clone)]
#[command(name = "ratesync-ingest")]
#[command(about = "Fetch daily exchange rates and upload them to Cloud Storage", long_about = None)]
pub struct IngestArgs {
    /// Date in YYYY-MM-DD format to fetch exchange rates for
    #[arg(long)]
    pub date: String,

    /// Name of the target Google Storage bucket
    #[arg(long = "bucketName", alias = "bucket-name")]
    pub bucket_name: String,

    /// Exchange rates API access key
    #[arg(long = "apiKey", alias = "api-key", env = "COINAPI_KEY", hide_env_values = true)]
    pub api_key: String,

    /// Exchange rates API base URL
    #[arg(long = "apiBaseUrl", alias = "api-base-url", default_value = DEFAULT_BASE_URL)]
    pub api_base_url: String,

    /// Read the API response from a local file instead of calling the API
    #[arg(long = "ratesFile", alias = "rates-file")]
    pub rates_file: Option<String>,

    /// Service account key path (defaults to Application Default Credentials)
    #[arg(long)]
    pub credentials: Option<String>,

    /// Dry run mode - print the records instead of uploading
    #[arg(long)]
    pub dry_run: bool,
}

impl IngestArgs {
    /// 引数を検証済みの設定に変換する
    pub fn to_config(&self) -> Result<IngestConfig, PipelineError> {
        IngestConfig::new(&self.date, self.bucket_name.clone(), self.api_key.clone())
    }
}
