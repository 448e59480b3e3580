//! # Data Transfer Objects
//!
//! 起動時に検証される設定オブジェクト

pub mod ingest_config;
pub mod provision_config;
