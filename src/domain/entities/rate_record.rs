//! # Rate Record Entity
//!
//! 為替レートのドメインエンティティ

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// 日付の文字列表現（`YYYY-MM-DD`）
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// 為替レートの1件の観測値
#[derive(Debug, Clone, PartialEq)]
pub struct Quote {
    /// 観測時刻（オフセット付き）
    pub time: DateTime<FixedOffset>,
    /// 通貨コード
    pub symbol: String,
    pub rate: f64,
}

/// 正規化済みレートレコード
///
/// Cloud Storage / BigQuery に格納する形式。フィールド順は `symbol, rate, date`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedRateRecord {
    pub symbol: String,
    pub rate: f64,
    pub date: String,
}

impl NormalizedRateRecord {
    /// 観測値から正規化レコードを作成
    ///
    /// 日付は観測時刻自身のオフセットにおける暦日に切り捨てる
    pub fn from_quote(quote: &Quote) -> Self {
        Self {
            symbol: quote.symbol.clone(),
            rate: quote.rate,
            date: quote.time.date_naive().format(DATE_FORMAT).to_string(),
        }
    }
}
