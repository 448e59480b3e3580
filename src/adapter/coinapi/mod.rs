//! CoinAPI Adapter Modules
//!
//! 為替レートAPIとの統合

pub mod fetcher;
pub mod file_fetcher;
pub mod models;
pub mod transformer;
