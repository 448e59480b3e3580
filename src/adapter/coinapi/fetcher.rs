//! CoinAPI Rates Fetcher
//!
//! 為替レートAPIからの取得（HTTP GET 1回）

use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use log::{debug, error};
use reqwest::{Client, Url};

use crate::domain::entities::rate_record::DATE_FORMAT;
use crate::domain::errors::PipelineError;
use crate::domain::repositories::rates_repository::RatesFetcher;

pub const DEFAULT_BASE_URL: &str = "https://rest.coinapi.io/v1";
pub const API_KEY_HEADER: &str = "X-CoinAPI-Key";

/// Base currency every quote is expressed against
pub const ASSET_ID_BASE: &str = "USD";

/// Build `<base>/exchangerate/USD?time=<date>`
pub fn rates_endpoint(base_url: &str, date: NaiveDate) -> Result<Url, PipelineError> {
    let raw = format!(
        "{}/exchangerate/{}",
        base_url.trim_end_matches('/'),
        ASSET_ID_BASE
    );
    let mut url = Url::parse(&raw)
        .map_err(|e| PipelineError::Config(format!("invalid API base URL '{}': {}", base_url, e)))?;
    url.query_pairs_mut()
        .append_pair("time", &date.format(DATE_FORMAT).to_string());
    Ok(url)
}

/// Fetcher backed by the CoinAPI REST API
pub struct CoinApiFetcher {
    client: Client,
    base_url: String,
    api_key: String,
}

impl CoinApiFetcher {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(DEFAULT_BASE_URL.to_string(), api_key)
    }

    pub fn with_base_url(base_url: String, api_key: String) -> Self {
        Self {
            client: Client::new(),
            base_url,
            api_key,
        }
    }
}

#[async_trait]
impl RatesFetcher for CoinApiFetcher {
    async fn fetch(&self, date: NaiveDate) -> Result<Vec<u8>> {
        let url = rates_endpoint(&self.base_url, date)?;
        debug!("Requesting rates for {}", date);

        let response = self
            .client
            .get(url)
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await
            .map_err(|e| {
                error!("Failed to do request: {}", e);
                PipelineError::Transport(e.to_string())
            })?;

        let status = response.status();
        let body = response.bytes().await.map_err(|e| {
            error!("Failed to read response body: {}", e);
            PipelineError::Transport(e.to_string())
        })?;

        if !status.is_success() {
            error!("Rates API responded with {}", status);
            return Err(PipelineError::Transport(format!(
                "rates API responded with {}: {}",
                status,
                String::from_utf8_lossy(&body)
            ))
            .into());
        }

        Ok(body.to_vec())
    }
}
