//! # Domain Entities
//!
//! パイプライン間で受け渡す不変のレコードを定義するモジュール
//!
//! ## エンティティ
//!
//! - **TableSchema / SchemaCatalog**: BigQueryテーブルの固定定義
//! - **Quote / NormalizedRateRecord**: 為替レートの観測値と正規化済みレコード

pub mod rate_record;
pub mod table_schema;
