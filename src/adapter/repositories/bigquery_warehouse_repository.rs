//! BigQuery Warehouse Repository Implementation
//!
//! WarehouseRepositoryのBigQuery実装

use anyhow::Result;
use async_trait::async_trait;
use chrono::{Months, Utc};
use google_cloud_bigquery::http::dataset::{Dataset, DatasetReference};
use google_cloud_bigquery::http::job::{
    Job, JobConfiguration, JobConfigurationLoad, JobConfigurationQuery, JobReference, JobType,
    WriteDisposition,
};
use google_cloud_bigquery::http::table::Table;
use log::info;
use std::sync::Arc;

use crate::adapter::bigquery::client::BigQueryApi;
use crate::adapter::bigquery::job_waiter::{error_chain_to_string, JobWaiter};
use crate::adapter::bigquery::models::{to_bq_schema, to_source_format, to_table_reference};
use crate::domain::entities::table_schema::{LoadSource, TableSchema};
use crate::domain::errors::PipelineError;
use crate::domain::repositories::warehouse_repository::{TableRef, WarehouseRepository};

/// テーブルの有効期限（作成からの月数）
pub const TABLE_EXPIRATION_MONTHS: u32 = 1;

fn service_error(operation: &str, e: anyhow::Error) -> anyhow::Error {
    PipelineError::Service {
        operation: operation.to_string(),
        message: error_chain_to_string(&e),
    }
    .into()
}

fn new_job_id(kind: &str) -> String {
    format!("ratesync_{}_{}", kind, uuid::Uuid::new_v4().simple())
}

/// BigQueryウェアハウスリポジトリ
pub struct BigQueryWarehouseRepository {
    api: Arc<dyn BigQueryApi>,
    project_id: String,
    waiter: JobWaiter,
}

impl BigQueryWarehouseRepository {
    /// 新しいリポジトリを作成
    pub fn new(api: Arc<dyn BigQueryApi>, project_id: String) -> Self {
        Self {
            api,
            project_id,
            waiter: JobWaiter::default(),
        }
    }

    /// ジョブのポーリング間隔を差し替える
    pub fn with_waiter(mut self, waiter: JobWaiter) -> Self {
        self.waiter = waiter;
        self
    }

    fn job(&self, kind: &str, location: Option<String>, job: JobType) -> Job {
        Job {
            job_reference: JobReference {
                project_id: self.project_id.clone(),
                job_id: new_job_id(kind),
                location,
            },
            configuration: JobConfiguration {
                job,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    async fn run_job(&self, operation: &str, job: Job) -> Result<()> {
        let submitted = self
            .api
            .insert_job(&job)
            .await
            .map_err(|e| service_error(operation, e))?;
        self.waiter.wait(self.api.as_ref(), submitted).await?;
        Ok(())
    }
}

#[async_trait]
impl WarehouseRepository for BigQueryWarehouseRepository {
    async fn create_dataset(&self, dataset_id: &str, location: &str) -> Result<()> {
        let dataset = Dataset {
            dataset_reference: DatasetReference {
                project_id: self.project_id.clone(),
                dataset_id: dataset_id.to_string(),
            },
            location: location.to_string(),
            ..Default::default()
        };

        self.api
            .create_dataset(&dataset)
            .await
            .map_err(|e| service_error("create dataset", e))?;

        info!("Successfully created dataset {}", dataset_id);
        Ok(())
    }

    async fn create_table(&self, table: &TableRef, schema: &TableSchema) -> Result<()> {
        info!("Creating table {}", table);

        let expiration = Utc::now()
            .checked_add_months(Months::new(TABLE_EXPIRATION_MONTHS))
            .ok_or_else(|| anyhow::anyhow!("Can't compute table expiration time"))?;

        let metadata = Table {
            table_reference: to_table_reference(&self.project_id, table),
            schema: Some(to_bq_schema(schema)),
            expiration_time: Some(expiration.timestamp_millis()),
            ..Default::default()
        };

        self.api
            .create_table(&metadata)
            .await
            .map_err(|e| service_error("create table", e))
    }

    async fn load_external_files(
        &self,
        table: &TableRef,
        source: &LoadSource,
        schema: &TableSchema,
    ) -> Result<()> {
        info!(
            "Loading data from {} ({:?}) into {}",
            source.uri, source.format, table
        );

        let load = JobConfigurationLoad {
            source_uris: vec![source.uri.clone()],
            source_format: Some(to_source_format(source.format)),
            skip_leading_rows: source.format.skip_leading_rows(),
            schema: Some(to_bq_schema(schema)),
            destination_table: to_table_reference(&self.project_id, table),
            // 空でないテーブルへのロードは失敗させる
            write_disposition: Some(WriteDisposition::WriteEmpty),
            ..Default::default()
        };

        self.run_job("load job", self.job("load", None, JobType::Load(load)))
            .await
    }

    async fn run_query(&self, sql: &str, destination: &TableRef, location: &str) -> Result<()> {
        info!("Aggregating events and rates data into {}", destination);

        let query = JobConfigurationQuery {
            query: sql.to_string(),
            destination_table: Some(to_table_reference(&self.project_id, destination)),
            write_disposition: Some(WriteDisposition::WriteEmpty),
            use_legacy_sql: Some(false),
            ..Default::default()
        };

        self.run_job(
            "query job",
            self.job("query", Some(location.to_string()), JobType::Query(query)),
        )
        .await
    }
}
