use anyhow::{Result, anyhow};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use tracing::{debug, instrument};

use crate::core::currency::CurrencyRateProvider;

pub const DEFAULT_BASE_URL: &str = "https://api.exchangerate-api.com";

// ExchangeRateApiProvider implementation for CurrencyRateProvider
pub struct ExchangeRateApiProvider {
    base_url: String,
}

impl ExchangeRateApiProvider {
    pub fn new(base_url: &str) -> Self {
        ExchangeRateApiProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct LatestRatesResponse {
    #[serde(default)]
    base: Option<String>,
    rates: HashMap<String, f64>,
}

#[async_trait]
impl CurrencyRateProvider for ExchangeRateApiProvider {
    #[instrument(name = "ExchangeRateFetch", skip(self))]
    async fn get_rate(&self, from: &str, to: &str) -> Result<Option<f64>> {
        let url = format!("{}/v4/latest/{}", self.base_url, from);
        debug!("Requesting exchange rates from {}", url);

        let client = reqwest::Client::builder()
            .user_agent("fxconv/1.0")
            .build()?;

        let response = client
            .get(&url)
            .send()
            .await
            .map_err(|e| anyhow!("Request error: {} for base currency: {}", e, from))?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "HTTP error: {} for base currency: {}",
                response.status(),
                from
            ));
        }

        let text = response.text().await?;

        let data: LatestRatesResponse = serde_json::from_str(&text)
            .map_err(|e| anyhow!("Failed to parse JSON response for {}: {}", from, e))?;
        debug!(base = ?data.base, count = data.rates.len(), "Received rate table");

        let rate = data.rates.get(to).copied();
        if rate.is_none() {
            debug!("No rate for {} in {} table", to, from);
        }
        Ok(rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn create_mock_server(from: &str, status: u16, body: &str) -> MockServer {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(format!("/v4/latest/{from}")))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(&mock_server)
            .await;
        mock_server
    }

    #[tokio::test]
    async fn test_successful_rate_fetch() {
        let mock_response = r#"{
            "provider": "https://www.exchangerate-api.com",
            "base": "EUR",
            "date": "2026-10-17",
            "time_last_updated": 1792195201,
            "rates": { "EUR": 1, "USD": 1.0871, "JPY": 161.42 }
        }"#;
        let mock_server = create_mock_server("EUR", 200, mock_response).await;
        let provider = ExchangeRateApiProvider::new(&mock_server.uri());

        let rate = provider
            .get_rate("EUR", "USD")
            .await
            .expect("Failed to get rate");
        assert_eq!(rate, Some(1.0871));

        let same = provider.get_rate("EUR", "EUR").await.unwrap();
        assert_eq!(same, Some(1.0));
    }

    #[tokio::test]
    async fn test_trailing_slash_in_base_url() {
        let mock_server = create_mock_server("GBP", 200, r#"{"rates": {"CHF": 1.07}}"#).await;
        let provider = ExchangeRateApiProvider::new(&format!("{}/", mock_server.uri()));

        assert_eq!(provider.get_rate("GBP", "CHF").await.unwrap(), Some(1.07));
    }

    #[tokio::test]
    async fn test_missing_target_rate() {
        let mock_server = create_mock_server("EUR", 200, r#"{"rates": {"USD": 1.08}}"#).await;
        let provider = ExchangeRateApiProvider::new(&mock_server.uri());

        let rate = provider
            .get_rate("EUR", "MAD")
            .await
            .expect("A table without the target is not an error");
        assert!(rate.is_none());
    }

    #[tokio::test]
    async fn test_api_error_response() {
        let mock_server = create_mock_server("EUR", 500, "").await;
        let provider = ExchangeRateApiProvider::new(&mock_server.uri());

        let result = provider.get_rate("EUR", "USD").await;
        assert_eq!(
            result.unwrap_err().to_string(),
            "HTTP error: 500 Internal Server Error for base currency: EUR"
        );
    }

    #[tokio::test]
    async fn test_malformed_response() {
        let mock_server =
            create_mock_server("EUR", 200, r#"{"result": "error", "error-type": "unknown"}"#)
                .await;
        let provider = ExchangeRateApiProvider::new(&mock_server.uri());

        let result = provider.get_rate("EUR", "USD").await;
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Failed to parse JSON response for EUR")
        );
    }
}
