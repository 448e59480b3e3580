//! # Object Store Trait
//!
//! オブジェクトストレージへの書き込みを抽象化

use anyhow::Result;
use async_trait::async_trait;

/// オブジェクトストア
///
/// 対象バケットは実装側が保持する
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// `path` にバイト列を書き込む
    ///
    /// # Errors
    ///
    /// 書き込みに失敗した場合にエラーを返す
    async fn upload(&self, path: &str, data: Vec<u8>) -> Result<()>;
}
