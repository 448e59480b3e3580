//! Dry-run Warehouse Repository
//!
//! BigQueryに触れずに操作内容を記録・表示するWarehouseRepository実装

use anyhow::Result;
use async_trait::async_trait;
use log::info;
use std::sync::Mutex;

use crate::domain::entities::table_schema::{LoadSource, TableSchema};
use crate::domain::repositories::warehouse_repository::{TableRef, WarehouseRepository};

/// 記録された操作
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WarehouseOperation {
    CreateDataset { dataset_id: String, location: String },
    CreateTable { table: TableRef, columns: Vec<&'static str> },
    Load { table: TableRef, uri: String },
    Query { destination: TableRef, location: String, sql: String },
}

/// ドライラン用のウェアハウスリポジトリ
#[derive(Default)]
pub struct DryRunWarehouseRepository {
    operations: Mutex<Vec<WarehouseOperation>>,
}

impl DryRunWarehouseRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// 記録済みの操作を実行順に返す
    pub fn operations(&self) -> Vec<WarehouseOperation> {
        self.operations
            .lock()
            .map(|ops| ops.clone())
            .unwrap_or_default()
    }

    fn record(&self, operation: WarehouseOperation) -> Result<()> {
        self.operations
            .lock()
            .map_err(|_| anyhow::anyhow!("dry-run warehouse lock poisoned"))?
            .push(operation);
        Ok(())
    }
}

#[async_trait]
impl WarehouseRepository for DryRunWarehouseRepository {
    async fn create_dataset(&self, dataset_id: &str, location: &str) -> Result<()> {
        info!("DRY RUN MODE - Would create dataset {} in {}", dataset_id, location);
        self.record(WarehouseOperation::CreateDataset {
            dataset_id: dataset_id.to_string(),
            location: location.to_string(),
        })
    }

    async fn create_table(&self, table: &TableRef, schema: &TableSchema) -> Result<()> {
        info!(
            "DRY RUN MODE - Would create table {} with columns {:?}",
            table,
            schema.field_names()
        );
        self.record(WarehouseOperation::CreateTable {
            table: table.clone(),
            columns: schema.field_names(),
        })
    }

    async fn load_external_files(
        &self,
        table: &TableRef,
        source: &LoadSource,
        _schema: &TableSchema,
    ) -> Result<()> {
        info!("DRY RUN MODE - Would load {} into {}", source.uri, table);
        self.record(WarehouseOperation::Load {
            table: table.clone(),
            uri: source.uri.clone(),
        })
    }

    async fn run_query(&self, sql: &str, destination: &TableRef, location: &str) -> Result<()> {
        info!(
            "DRY RUN MODE - Would run query into {} ({})",
            destination, location
        );
        println!("{}", sql);
        self.record(WarehouseOperation::Query {
            destination: destination.clone(),
            location: location.to_string(),
            sql: sql.to_string(),
        })
    }
}
