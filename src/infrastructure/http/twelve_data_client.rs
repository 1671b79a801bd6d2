use super::HttpUtils;
use crate::config::DashboardConfig;
use crate::domain::errors::{AppError, ConfigurationError, DomainError, NetworkError};
use crate::domain::logging::LogComponent;
use crate::domain::market_data::{RawSeriesRow, SeriesNormalizer, SeriesQuery, SeriesSource, SeriesTable};
use crate::{log_debug, log_info};
use gloo_net::http::Request;
use serde::Deserialize;

/// Body of `GET /time_series`. On failure the provider still answers with a
/// JSON object carrying `status: "error"`, `code` and `message`.
#[derive(Debug, Deserialize)]
struct TimeSeriesResponse {
    status: Option<String>,
    code: Option<u16>,
    message: Option<String>,
    values: Option<Vec<RawSeriesRow>>,
}

/// REST client for the Twelve Data time-series endpoint
#[derive(Debug, Clone)]
pub struct TwelveDataClient {
    base_url: String,
    api_key: Option<String>,
    timezone: String,
}

impl TwelveDataClient {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>, timezone: impl Into<String>) -> Self {
        Self { base_url: base_url.into(), api_key, timezone: timezone.into() }
    }

    pub fn from_config(config: &DashboardConfig) -> Self {
        Self::new(
            config.api_base_url.clone(),
            config.require_api_key().ok().map(str::to_string),
            config.timezone.clone(),
        )
    }

    /// Fails with `MissingConfiguration` when no API key was supplied
    pub fn series_url(&self, query: &SeriesQuery) -> Result<String, ConfigurationError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(ConfigurationError::MissingConfiguration("DATA_API_KEY"))?;
        let output_size = query.output_size.to_string();
        Ok(HttpUtils::build_url_with_params(
            &format!("{}/time_series", self.base_url.trim_end_matches('/')),
            &[
                ("symbol", query.pair.symbol()),
                ("interval", query.interval.to_api_str()),
                ("apikey", api_key),
                ("outputsize", &output_size),
                ("timezone", &self.timezone),
            ],
        ))
    }

    /// Turns a response body into a normalized table, newest row first
    pub fn parse_time_series(body: &str) -> Result<SeriesTable, AppError> {
        let response: TimeSeriesResponse = serde_json::from_str(body)
            .map_err(|e| NetworkError::MalformedPayload(format!("invalid JSON: {}", e)))?;

        if response.status.as_deref() == Some("error") {
            return Err(NetworkError::ApiError {
                code: response.code,
                message: response.message.unwrap_or_else(|| "unknown error".to_string()),
            }
            .into());
        }

        let values = response
            .values
            .ok_or_else(|| NetworkError::MalformedPayload("response has no 'values' field".to_string()))?;

        if values.is_empty() {
            return Err(DomainError::EmptySeries.into());
        }

        Ok(SeriesNormalizer::normalize(&values))
    }
}

impl SeriesSource for TwelveDataClient {
    async fn fetch_series(&self, query: &SeriesQuery) -> Result<SeriesTable, AppError> {
        log_info!(
            LogComponent::Infrastructure("TwelveData"),
            "📡 Fetching {} bars for {} @ {}",
            query.output_size,
            query.pair,
            query.interval
        );

        let url = self.series_url(query)?;
        let response = Request::get(&url)
            .send()
            .await
            .map_err(|e| NetworkError::HttpRequestFailed(format!("{:?}", e)))?;

        if !response.ok() {
            return Err(NetworkError::HttpStatus {
                status: response.status(),
                status_text: response.status_text(),
            }
            .into());
        }

        let body = response
            .text()
            .await
            .map_err(|e| NetworkError::HttpRequestFailed(format!("failed to read body: {:?}", e)))?;
        log_debug!(LogComponent::Infrastructure("TwelveData"), "received {} bytes", body.len());

        let mut table = Self::parse_time_series(&body)?;
        table.truncate(query.output_size);

        log_info!(
            LogComponent::Infrastructure("TwelveData"),
            "✅ Loaded {} bars for {}",
            table.len(),
            query.pair
        );

        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::market_data::{CurrencyPair, TimeInterval};

    #[test]
    fn series_url_carries_every_parameter() {
        let client = TwelveDataClient::new(
            "https://api.twelvedata.com/",
            Some("secret".to_string()),
            "Africa/Lagos",
        );
        let query = SeriesQuery::new(CurrencyPair::GbpJpy, TimeInterval::OneDay, 200);
        assert_eq!(
            client.series_url(&query).unwrap(),
            "https://api.twelvedata.com/time_series?symbol=GBP%2FJPY&interval=1day\
             &apikey=secret&outputsize=200&timezone=Africa%2FLagos"
        );
    }
}
