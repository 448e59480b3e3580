//! BigQuery Client Abstractions
//!
//! クライアントの抽象化と実装

use anyhow::{Context, Result};
use async_trait::async_trait;
use google_cloud_bigquery::client::Client;
use google_cloud_bigquery::http::dataset::Dataset;
use google_cloud_bigquery::http::job::get::GetJobRequest;
use google_cloud_bigquery::http::job::Job;
use google_cloud_bigquery::http::table::Table;

#[cfg(test)]
use mockall::automock;

use super::models::JobSnapshot;

/// Trait over the BigQuery REST operations the warehouse needs
/// This enables mocking in tests while using the real client in production
#[cfg_attr(test, automock)]
#[async_trait]
pub trait BigQueryApi: Send + Sync {
    /// Create a dataset; fails if it already exists
    async fn create_dataset(&self, dataset: &Dataset) -> Result<()>;

    /// Create a table; fails if it already exists
    async fn create_table(&self, table: &Table) -> Result<()>;

    /// Submit an asynchronous job
    async fn insert_job(&self, job: &Job) -> Result<JobSnapshot>;

    /// Fetch the current state of a job
    async fn get_job(
        &self,
        project_id: &str,
        job_id: &str,
        location: Option<String>,
    ) -> Result<JobSnapshot>;
}

/// BigQuery client that owns the Client instance
pub struct OwnedBigQueryClient {
    client: Client,
}

impl OwnedBigQueryClient {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[async_trait]
impl BigQueryApi for OwnedBigQueryClient {
    async fn create_dataset(&self, dataset: &Dataset) -> Result<()> {
        self.client
            .dataset()
            .create(dataset)
            .await
            .context("BigQuery dataset creation failed")?;
        Ok(())
    }

    async fn create_table(&self, table: &Table) -> Result<()> {
        self.client
            .table()
            .create(table)
            .await
            .context("BigQuery table creation failed")?;
        Ok(())
    }

    async fn insert_job(&self, job: &Job) -> Result<JobSnapshot> {
        let created = self
            .client
            .job()
            .create(job)
            .await
            .context("BigQuery job submission failed")?;
        Ok(JobSnapshot::from(&created))
    }

    async fn get_job(
        &self,
        project_id: &str,
        job_id: &str,
        location: Option<String>,
    ) -> Result<JobSnapshot> {
        let job = self
            .client
            .job()
            .get(project_id, job_id, &GetJobRequest { location })
            .await
            .context("BigQuery job status request failed")?;
        Ok(JobSnapshot::from(&job))
    }
}
