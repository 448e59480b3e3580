//! Repository Implementations
//!
//! Domain層のRepositoryトレイトの実装

pub mod bigquery_warehouse_repository;
pub mod dry_run_warehouse_repository;
