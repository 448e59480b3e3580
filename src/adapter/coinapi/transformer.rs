//! CoinAPI Rates Transformer
//!
//! CoinAPIのレスポンスを正規化レコードに変換

use anyhow::Result;
use log::error;

use super::models::CoinApiResponse;
use crate::domain::entities::rate_record::{NormalizedRateRecord, Quote};
use crate::domain::errors::PipelineError;
use crate::domain::services::rates_transformer::{to_ndjson, RatesTransformer};

/// Transformer for `GET /v1/exchangerate/USD` responses
#[derive(Debug, Clone, Copy, Default)]
pub struct CoinApiTransformer;

impl CoinApiTransformer {
    /// Parse the payload into quotes, keeping the API order
    pub fn parse(raw: &[u8]) -> Result<Vec<Quote>, PipelineError> {
        let response: CoinApiResponse = serde_json::from_slice(raw).map_err(|e| {
            error!("Failed to parse input data: {}", e);
            PipelineError::Parse(e.to_string())
        })?;

        Ok(response.rates.into_iter().map(Quote::from).collect())
    }
}

impl RatesTransformer for CoinApiTransformer {
    fn transform(&self, raw: &[u8]) -> Result<Vec<u8>> {
        let records: Vec<NormalizedRateRecord> = Self::parse(raw)?
            .iter()
            .map(NormalizedRateRecord::from_quote)
            .collect();

        to_ndjson(&records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transform(raw: &str) -> Result<String> {
        let out = CoinApiTransformer.transform(raw.as_bytes())?;
        Ok(String::from_utf8(out)?)
    }

    #[test]
    fn test_single_quote() {
        let out = transform(
            r#"{"rates":[{"time":"2024-04-01T00:00:00Z","asset_id_quote":"EUR","rate":0.92}]}"#,
        )
        .unwrap();

        assert_eq!(out, "{\"symbol\":\"EUR\",\"rate\":0.92,\"date\":\"2024-04-01\"}\n");
    }

    #[test]
    fn test_one_record_per_quote_in_order() {
        let out = transform(
            r#"{"rates":[
                {"time":"2024-04-02T10:15:00Z","asset_id_quote":"MATIC","rate":1.1},
                {"time":"2024-04-02T10:15:00Z","asset_id_quote":"BTC","rate":0.0000145},
                {"time":"2024-04-02T10:15:00Z","asset_id_quote":"MATIC","rate":1.1}
            ]}"#,
        )
        .unwrap();

        let symbols: Vec<String> = out
            .lines()
            .map(|line| {
                let record: NormalizedRateRecord = serde_json::from_str(line).unwrap();
                assert_eq!(record.date, "2024-04-02");
                record.symbol
            })
            .collect();

        // 重複もそのまま出力する
        assert_eq!(symbols, vec!["MATIC", "BTC", "MATIC"]);
    }

    #[test]
    fn test_empty_rates() {
        assert_eq!(transform(r#"{"rates":[]}"#).unwrap(), "");
    }

    #[test]
    fn test_malformed_payload_is_parse_error() {
        let err = CoinApiTransformer
            .transform(b"<html>502 Bad Gateway</html>")
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<PipelineError>(),
            Some(PipelineError::Parse(_))
        ));
    }

    #[test]
    fn test_invalid_timestamp_is_parse_error() {
        let result = CoinApiTransformer::parse(
            br#"{"rates":[{"time":"yesterday","asset_id_quote":"EUR","rate":0.92}]}"#,
        );
        assert!(matches!(result, Err(PipelineError::Parse(_))));
    }

    #[test]
    fn test_missing_rate_is_parse_error() {
        let result =
            CoinApiTransformer::parse(br#"{"rates":[{"time":"2024-04-01T00:00:00Z","asset_id_quote":"EUR"}]}"#);
        assert!(result.is_err());
    }
}
