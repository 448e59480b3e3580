//! # Provision Warehouse Use Case
//!
//! データセット・テーブルの作成、ファイルのロード、集計クエリの実行

use std::fmt;
use std::sync::Arc;

use anyhow::{Context, Result};
use log::info;

use crate::application::dto::provision_config::ProvisionConfig;
use crate::domain::entities::table_schema::{LoadSource, SchemaCatalog, TableSchema};
use crate::domain::repositories::warehouse_repository::{TableRef, WarehouseRepository};
use crate::domain::services::aggregation_query::AggregationQuery;

/// 構築手順の1ステップ
#[derive(Debug, Clone, PartialEq)]
pub enum ProvisionStep {
    CreateDataset {
        dataset_id: String,
        location: String,
    },
    CreateTable {
        table: TableRef,
        schema: TableSchema,
    },
    LoadFiles {
        table: TableRef,
        source: LoadSource,
        schema: TableSchema,
    },
    RunQuery {
        sql: String,
        destination: TableRef,
        location: String,
    },
}

impl fmt::Display for ProvisionStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProvisionStep::CreateDataset {
                dataset_id,
                location,
            } => write!(f, "create dataset {} in {}", dataset_id, location),
            ProvisionStep::CreateTable { table, schema } => {
                write!(f, "create table {} ({} columns)", table, schema.len())
            }
            ProvisionStep::LoadFiles { table, source, .. } => {
                write!(f, "load {} ({:?}) into {}", source.uri, source.format, table)
            }
            ProvisionStep::RunQuery { destination, .. } => {
                write!(f, "run aggregation query into {}", destination)
            }
        }
    }
}

/// 構築結果のサマリー
#[derive(Debug, Clone, Default)]
pub struct ProvisionSummary {
    /// 作成したテーブル
    pub created_tables: Vec<TableRef>,
    /// ロードしたテーブル
    pub loaded_tables: Vec<TableRef>,
    /// 集計結果の書き込み先
    pub result_table: Option<TableRef>,
}

/// ウェアハウス構築ユースケース
///
/// 各ステップを順に実行し、最初のエラーで中断する。
/// 先に作成したデータセットやテーブルはロールバックしない
pub struct ProvisionWarehouseUseCase<W: WarehouseRepository> {
    warehouse: Arc<W>,
}

impl<W: WarehouseRepository> ProvisionWarehouseUseCase<W> {
    /// 新しいユースケースを作成
    ///
    /// # Arguments
    ///
    /// * `warehouse` - ウェアハウスリポジトリ
    pub fn new(warehouse: Arc<W>) -> Self {
        Self { warehouse }
    }

    /// 実行手順を組み立てる
    pub fn plan(config: &ProvisionConfig) -> Vec<ProvisionStep> {
        let query = AggregationQuery::new(
            &config.dataset_id,
            &config.events_table_id,
            &config.rates_table_id,
        );

        vec![
            ProvisionStep::CreateDataset {
                dataset_id: config.dataset_id.clone(),
                location: config.location.clone(),
            },
            ProvisionStep::CreateTable {
                table: config.events_table(),
                schema: SchemaCatalog::EVENTS,
            },
            ProvisionStep::LoadFiles {
                table: config.events_table(),
                source: SchemaCatalog::events_source(&config.source_bucket_id),
                schema: SchemaCatalog::EVENTS,
            },
            ProvisionStep::CreateTable {
                table: config.rates_table(),
                schema: SchemaCatalog::RATES,
            },
            ProvisionStep::LoadFiles {
                table: config.rates_table(),
                source: SchemaCatalog::rates_source(&config.source_bucket_id),
                schema: SchemaCatalog::RATES,
            },
            ProvisionStep::CreateTable {
                table: config.result_table(),
                schema: SchemaCatalog::RESULT,
            },
            ProvisionStep::RunQuery {
                sql: query.render(),
                destination: config.result_table(),
                location: config.location.clone(),
            },
        ]
    }

    /// 構築を実行する
    ///
    /// # Errors
    ///
    /// いずれかのステップが失敗した時点でエラーを返す
    pub async fn execute(&self, config: &ProvisionConfig) -> Result<ProvisionSummary> {
        let mut summary = ProvisionSummary::default();

        for step in Self::plan(config) {
            info!("Step: {}", step);
            self.apply(&step)
                .await
                .with_context(|| format!("Failed to {}", step))?;

            match step {
                ProvisionStep::CreateTable { table, .. } => summary.created_tables.push(table),
                ProvisionStep::LoadFiles { table, .. } => summary.loaded_tables.push(table),
                ProvisionStep::RunQuery { destination, .. } => {
                    summary.result_table = Some(destination)
                }
                ProvisionStep::CreateDataset { .. } => {}
            }
        }

        Ok(summary)
    }

    async fn apply(&self, step: &ProvisionStep) -> Result<()> {
        match step {
            ProvisionStep::CreateDataset {
                dataset_id,
                location,
            } => self.warehouse.create_dataset(dataset_id, location).await,
            ProvisionStep::CreateTable { table, schema } => {
                self.warehouse.create_table(table, schema).await
            }
            ProvisionStep::LoadFiles {
                table,
                source,
                schema,
            } => {
                self.warehouse
                    .load_external_files(table, source, schema)
                    .await
            }
            ProvisionStep::RunQuery {
                sql,
                destination,
                location,
            } => self.warehouse.run_query(sql, destination, location).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    use crate::domain::errors::PipelineError;

    /// 呼び出しを記録し、指定した操作で失敗するモック
    struct MockWarehouseRepository {
        calls: Mutex<Vec<String>>,
        fail_on: Option<&'static str>,
    }

    impl MockWarehouseRepository {
        fn new(fail_on: Option<&'static str>) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                fail_on,
            }
        }

        fn record(&self, call: String) -> Result<()> {
            let failing = self.fail_on.is_some_and(|prefix| call.starts_with(prefix));
            self.calls.lock().unwrap().push(call);
            if failing {
                return Err(PipelineError::JobFailed {
                    job_id: "job-1".to_string(),
                    message: "Cannot append to non-empty table".to_string(),
                }
                .into());
            }
            Ok(())
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl WarehouseRepository for MockWarehouseRepository {
        async fn create_dataset(&self, dataset_id: &str, location: &str) -> Result<()> {
            self.record(format!("dataset:{}@{}", dataset_id, location))
        }

        async fn create_table(&self, table: &TableRef, schema: &TableSchema) -> Result<()> {
            self.record(format!("table:{}:{}", table, schema.len()))
        }

        async fn load_external_files(
            &self,
            table: &TableRef,
            source: &LoadSource,
            _schema: &TableSchema,
        ) -> Result<()> {
            self.record(format!("load:{}<-{}", table, source.uri))
        }

        async fn run_query(&self, _sql: &str, destination: &TableRef, location: &str) -> Result<()> {
            self.record(format!("query:{}@{}", destination, location))
        }
    }

    fn test_config() -> ProvisionConfig {
        ProvisionConfig::new(
            "test-project".to_string(),
            "us-west1".to_string(),
            "source-bucket".to_string(),
            "ds".to_string(),
            "events".to_string(),
            "rates".to_string(),
            "result".to_string(),
        )
        .unwrap()
    }

    #[test]
    fn test_plan_order() {
        let steps = ProvisionWarehouseUseCase::<MockWarehouseRepository>::plan(&test_config());
        let described: Vec<String> = steps.iter().map(|s| s.to_string()).collect();

        assert_eq!(
            described,
            vec![
                "create dataset ds in us-west1",
                "create table ds.events (16 columns)",
                "load gs://source-bucket/raw/events/*.csv (Csv) into ds.events",
                "create table ds.rates (3 columns)",
                "load gs://source-bucket/raw/exchange-rates/*.json (NewlineDelimitedJson) into ds.rates",
                "create table ds.result (4 columns)",
                "run aggregation query into ds.result",
            ]
        );
    }

    #[tokio::test]
    async fn test_execute_success() {
        let repo = Arc::new(MockWarehouseRepository::new(None));
        let use_case = ProvisionWarehouseUseCase::new(repo.clone());

        let summary = use_case.execute(&test_config()).await.unwrap();

        assert_eq!(
            repo.calls(),
            vec![
                "dataset:ds@us-west1",
                "table:ds.events:16",
                "load:ds.events<-gs://source-bucket/raw/events/*.csv",
                "table:ds.rates:3",
                "load:ds.rates<-gs://source-bucket/raw/exchange-rates/*.json",
                "table:ds.result:4",
                "query:ds.result@us-west1",
            ]
        );
        assert_eq!(summary.created_tables.len(), 3);
        assert_eq!(summary.loaded_tables.len(), 2);
        assert_eq!(summary.result_table, Some(TableRef::new("ds", "result")));
    }

    #[tokio::test]
    async fn test_execute_stops_at_first_failed_load() {
        let repo = Arc::new(MockWarehouseRepository::new(Some("load:ds.events")));
        let use_case = ProvisionWarehouseUseCase::new(repo.clone());

        let err = use_case.execute(&test_config()).await.unwrap_err();

        assert!(err.to_string().contains("Failed to load"));
        assert!(matches!(
            err.downcast_ref::<PipelineError>(),
            Some(PipelineError::JobFailed { .. })
        ));
        // 後続のステップは実行されない
        assert_eq!(repo.calls().len(), 3);
        assert!(!repo.calls().iter().any(|c| c.starts_with("query:")));
    }

    #[tokio::test]
    async fn test_execute_propagates_failed_query() {
        let repo = Arc::new(MockWarehouseRepository::new(Some("query:")));
        let use_case = ProvisionWarehouseUseCase::new(repo.clone());

        let result = use_case.execute(&test_config()).await;

        assert!(result.is_err());
        assert_eq!(repo.calls().len(), 7);
    }

    #[tokio::test]
    async fn test_execute_existing_dataset_aborts() {
        let repo = Arc::new(MockWarehouseRepository::new(Some("dataset:")));
        let use_case = ProvisionWarehouseUseCase::new(repo.clone());

        assert!(use_case.execute(&test_config()).await.is_err());
        assert_eq!(repo.calls(), vec!["dataset:ds@us-west1"]);
    }
}
