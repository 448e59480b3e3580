//! Workflow Orchestration
//!
//! ワークフローのオーケストレーション（依存性の組み立て）

use anyhow::Result;
use log::info;

use std::sync::Arc;

use crate::adapter::auth::{create_bigquery_client, create_storage_client};
use crate::adapter::bigquery::client::OwnedBigQueryClient;
use crate::adapter::coinapi::fetcher::CoinApiFetcher;
use crate::adapter::coinapi::file_fetcher::FileRatesFetcher;
use crate::adapter::coinapi::transformer::CoinApiTransformer;
use crate::adapter::repositories::bigquery_warehouse_repository::BigQueryWarehouseRepository;
use crate::adapter::repositories::dry_run_warehouse_repository::DryRunWarehouseRepository;
use crate::adapter::storage::dry_run_object_store::DryRunObjectStore;
use crate::adapter::storage::gcs_object_store::GcsObjectStore;
use crate::application::dto::ingest_config::IngestConfig;
use crate::application::dto::provision_config::ProvisionConfig;
use crate::application::use_cases::ingest_rates::{IngestRatesUseCase, IngestSummary};
use crate::application::use_cases::provision_warehouse::{
    ProvisionSummary, ProvisionWarehouseUseCase,
};
use crate::domain::repositories::object_repository::ObjectStore;
use crate::domain::repositories::rates_repository::RatesFetcher;
use crate::domain::repositories::warehouse_repository::WarehouseRepository;

use super::cli::{IngestArgs, ProvisionArgs};

/// Warehouse Provisioning Workflow
pub struct ProvisionWorkflow {
    config: ProvisionConfig,
}

impl ProvisionWorkflow {
    /// Create a new workflow instance with injected configuration
    pub fn new(config: ProvisionConfig) -> Self {
        Self { config }
    }

    /// Execute the workflow against BigQuery, or against the dry-run warehouse
    pub async fn execute(&self, args: &ProvisionArgs) -> Result<ProvisionSummary> {
        info!(
            "Initializing program to create dataset and tables in BigQuery: project={} dataset={} events={} rates={} result={}",
            self.config.project_id,
            self.config.dataset_id,
            self.config.events_table_id,
            self.config.rates_table_id,
            self.config.result_table_id
        );
        info!("Dry run: {}", args.dry_run);

        if args.dry_run {
            return self.run(Arc::new(DryRunWarehouseRepository::new())).await;
        }

        let client = create_bigquery_client(args.credentials.as_deref()).await?;
        println!("✓ Created BigQuery client");

        let warehouse = BigQueryWarehouseRepository::new(
            Arc::new(OwnedBigQueryClient::new(client)),
            self.config.project_id.clone(),
        );

        self.run(Arc::new(warehouse)).await
    }

    /// Run all provisioning steps with the given warehouse
    pub async fn run<W: WarehouseRepository>(&self, warehouse: Arc<W>) -> Result<ProvisionSummary> {
        println!("✓ Using configuration:");
        println!("  Project: {}", self.config.project_id);
        println!("  Location: {}", self.config.location);
        println!("  Dataset: {}", self.config.dataset_id);

        let use_case = ProvisionWarehouseUseCase::new(warehouse);
        let summary = use_case.execute(&self.config).await?;

        println!("✓ Created {} tables", summary.created_tables.len());
        println!("✓ Loaded {} tables", summary.loaded_tables.len());
        if let Some(result_table) = &summary.result_table {
            println!("✓ Aggregated data into {}", result_table);
        }

        Ok(summary)
    }
}

/// Rates Ingestion Workflow
pub struct IngestWorkflow {
    config: IngestConfig,
}

impl IngestWorkflow {
    /// Create a new workflow instance with injected configuration
    pub fn new(config: IngestConfig) -> Self {
        Self { config }
    }

    /// Execute the workflow, choosing the fetcher and the store from the arguments
    pub async fn execute(&self, args: &IngestArgs) -> Result<IngestSummary> {
        info!("Running exchange rates ingestion: {:?}", self.config);

        match &args.rates_file {
            Some(path) => {
                println!("✓ Reading rates from {}", path);
                self.execute_with(Arc::new(FileRatesFetcher::new(path)), args)
                    .await
            }
            None => {
                let fetcher = CoinApiFetcher::with_base_url(
                    args.api_base_url.clone(),
                    self.config.api_key.clone(),
                );
                self.execute_with(Arc::new(fetcher), args).await
            }
        }
    }

    async fn execute_with<F: RatesFetcher>(
        &self,
        fetcher: Arc<F>,
        args: &IngestArgs,
    ) -> Result<IngestSummary> {
        if args.dry_run {
            println!("✓ Dry-run mode (not actually uploading)");
            return self
                .run(fetcher, Arc::new(DryRunObjectStore::new()))
                .await;
        }

        let client = create_storage_client(args.credentials.as_deref()).await?;
        println!("✓ Created Cloud Storage client");

        let store = GcsObjectStore::new(client, self.config.bucket_name.clone());
        self.run(fetcher, Arc::new(store)).await
    }

    /// Run fetch, transform and upload with the given collaborators
    pub async fn run<F: RatesFetcher, S: ObjectStore>(
        &self,
        fetcher: Arc<F>,
        store: Arc<S>,
    ) -> Result<IngestSummary> {
        let use_case = IngestRatesUseCase::new(fetcher, Arc::new(CoinApiTransformer), store);
        let summary = use_case.execute(&self.config).await?;

        println!(
            "✓ Wrote {} records ({} bytes) to {}/{}",
            summary.record_count, summary.byte_count, self.config.bucket_name, summary.object_path
        );

        Ok(summary)
    }
}
