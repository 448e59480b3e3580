//! Adapter Layer
//!
//! 外部システム（BigQuery, Cloud Storage, 為替API）との統合

pub mod auth;
pub mod bigquery;
pub mod coinapi;
pub mod repositories;
pub mod storage;
