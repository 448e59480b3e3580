//! # Rates Fetcher Trait
//!
//! 外部の為替レートAPIからの取得を抽象化

use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;

/// レート取得元
///
/// 指定日の生ペイロードをそのまま返す
#[async_trait]
pub trait RatesFetcher: Send + Sync {
    /// 指定日のレートデータを取得する
    ///
    /// # Errors
    ///
    /// リクエスト作成・通信・ボディ読み取りのいずれかに失敗した場合にエラーを返す
    async fn fetch(&self, date: NaiveDate) -> Result<Vec<u8>>;
}
