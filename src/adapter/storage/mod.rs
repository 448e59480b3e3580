//! Cloud Storage Adapter Modules
//!
//! Cloud Storage統合のためのアダプターモジュール

pub mod dry_run_object_store;
pub mod gcs_object_store;
