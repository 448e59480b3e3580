//! # Rates Transformer
//!
//! 生ペイロードを改行区切りの正規化レコードへ変換するサービス

use anyhow::{Context, Result};

use crate::domain::entities::rate_record::NormalizedRateRecord;

/// レート変換器
///
/// 入力の観測値1件につき1レコードを、順序を保って出力する。
/// フィルタリングや重複排除は行わない
pub trait RatesTransformer: Send + Sync {
    /// ペイロードを変換する
    ///
    /// # Errors
    ///
    /// ペイロードが不正な場合にエラーを返す
    fn transform(&self, raw: &[u8]) -> Result<Vec<u8>>;
}

/// レコードを1行1件のJSONとして直列化する
///
/// 各行は `\n` で終わる。空の入力は空のバイト列になる
pub fn to_ndjson(records: &[NormalizedRateRecord]) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    for record in records {
        serde_json::to_writer(&mut buf, record).context("Failed to marshal rate record")?;
        buf.push(b'\n');
    }
    Ok(buf)
}
