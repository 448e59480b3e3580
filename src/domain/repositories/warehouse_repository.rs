//! # Warehouse Repository Trait
//!
//! データセット・テーブルの作成、外部ファイルのロード、クエリ実行を抽象化

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::entities::table_schema::{LoadSource, TableSchema};

/// テーブル参照（プロジェクトはリポジトリ実装側が保持する）
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TableRef {
    pub dataset_id: String,
    pub table_id: String,
}

impl TableRef {
    pub fn new(dataset_id: impl Into<String>, table_id: impl Into<String>) -> Self {
        Self {
            dataset_id: dataset_id.into(),
            table_id: table_id.into(),
        }
    }
}

impl std::fmt::Display for TableRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.dataset_id, self.table_id)
    }
}

/// ウェアハウスリポジトリ
///
/// どの操作も冪等ではない。既存のデータセット・テーブルや
/// 空でないロード先はエラーになる
#[async_trait]
pub trait WarehouseRepository: Send + Sync {
    /// データセットを作成する
    ///
    /// # Errors
    ///
    /// データセットが既に存在する場合にエラーを返す
    async fn create_dataset(&self, dataset_id: &str, location: &str) -> Result<()>;

    /// スキーマ付きでテーブルを作成する（作成から1か月で失効）
    ///
    /// # Errors
    ///
    /// テーブルが既に存在する場合にエラーを返す
    async fn create_table(&self, table: &TableRef, schema: &TableSchema) -> Result<()>;

    /// 外部ファイルをテーブルにロードし、ジョブ終了まで待機する
    ///
    /// # Errors
    ///
    /// ロード先が空でない場合、またはジョブが失敗で終了した場合にエラーを返す
    async fn load_external_files(
        &self,
        table: &TableRef,
        source: &LoadSource,
        schema: &TableSchema,
    ) -> Result<()>;

    /// SQLを実行して結果を `destination` に書き込み、ジョブ終了まで待機する
    ///
    /// # Errors
    ///
    /// ジョブが失敗で終了した場合にエラーを返す
    async fn run_query(&self, sql: &str, destination: &TableRef, location: &str) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_ref_display() {
        let table = TableRef::new("analytics", "events");
        assert_eq!(table.to_string(), "analytics.events");
    }
}
