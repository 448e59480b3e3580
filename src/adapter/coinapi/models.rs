use chrono::{DateTime, FixedOffset};
use serde::Deserialize;

use crate::domain::entities::rate_record::Quote;

// Response of GET /v1/exchangerate/{asset_id_base}?time=...
#[derive(Debug, Deserialize)]
pub struct CoinApiResponse {
    #[serde(default)]
    pub rates: Vec<CoinApiRate>,
}

#[derive(Debug, Deserialize)]
pub struct CoinApiRate {
    pub time: DateTime<FixedOffset>,
    pub asset_id_quote: String,
    pub rate: f64,
}

impl From<CoinApiRate> for Quote {
    fn from(rate: CoinApiRate) -> Self {
        Quote {
            time: rate.time,
            symbol: rate.asset_id_quote,
            rate: rate.rate,
        }
    }
}
