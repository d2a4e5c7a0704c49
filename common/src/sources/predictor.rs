use crate::{Error, PredictionResponse, Result};
use log::debug;
use reqwest::Client;
use serde_json::Value;

pub const PREDICT_PATH: &str = "api/predict";

/// Client for the remote prediction API. One call per [`PredictorClient::predict`],
/// no retries and no timeout beyond what `reqwest` applies by default.
#[derive(Debug, Clone)]
pub struct PredictorClient {
    client: Client,
    api_url: String,
}

impl PredictorClient {
    pub fn new(api_url: &str) -> Self {
        Self::with_client(api_url, Client::new())
    }

    pub fn with_client(api_url: &str, client: Client) -> Self {
        PredictorClient {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    pub fn endpoint(&self) -> String {
        format!("{}/{PREDICT_PATH}", self.api_url)
    }

    pub async fn predict(&self, ticker: &str, model: &str) -> Result<PredictionResponse> {
        let url = self.endpoint();
        debug!("Fetching prediction from: {url} ticker={ticker} model={model}");

        let response = self
            .client
            .get(&url)
            .query(&[("ticker", ticker), ("model", model)])
            .send()
            .await
            .map_err(Error::Network)?;

        let status = response.status();
        let body = response.text().await.map_err(Error::Network)?;

        if !status.is_success() {
            return Err(Error::Backend {
                status: status.as_u16(),
                body,
            });
        }

        let raw: Value = serde_json::from_str(&body)?;
        debug!("Received {} bytes of prediction payload", body.len());

        Ok(PredictionResponse::from_value(raw))
    }
}
