//! # Use Cases
//!
//! アプリケーションのビジネスフロー（ユースケース）
//!
//! ## ユースケース
//!
//! - **ProvisionWarehouseUseCase**: データセット・テーブル作成、ロード、集計
//! - **IngestRatesUseCase**: 為替レートの取得・変換・アップロード

pub mod ingest_rates;
pub mod provision_warehouse;
