use crate::error::ApiError;
use async_trait::async_trait;
use chrono::NaiveDate;
use configuration::ApiConfig;
use core_types::PriceObservation;
use rust_decimal::Decimal;
use serde_json::{Number, Value};
use std::str::FromStr;
use std::time::Duration;

pub mod error;
pub mod responses;
// --- Public API ---
pub use responses::{ApiErrorResponse, Dataset, DatasetResponse};

/// Continuous futures contracts live in the `CHRIS` database.
const CONTINUOUS_FUTURES_DATABASE: &str = "CHRIS";
const DATE_COLUMN: &str = "Date";
const SETTLE_COLUMN: &str = "Settle";

/// The interface for a source of daily settlement prices.
/// The backfill depends on this trait, so the vendor client can be swapped
/// out for a mock in tests.
#[async_trait]
pub trait MarketDataClient: Send + Sync {
    /// Fetches the full settlement history of one contract, e.g. `CME_ES1`.
    async fn fetch_contract(&self, contract_id: &str) -> Result<Vec<PriceObservation>, ApiError>;
}

/// A `MarketDataClient` for the Nasdaq Data Link (formerly Quandl) time-series API.
#[derive(Clone)]
pub struct QuandlClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl QuandlClient {
    pub fn new(api_config: &ApiConfig) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(60))
            .build()?;
        Ok(Self {
            client,
            base_url: api_config.base_url.trim_end_matches('/').to_string(),
            api_key: api_config.api_key.clone(),
        })
    }

    fn dataset_url(&self, contract_id: &str) -> String {
        format!(
            "{}/datasets/{}/{}.json",
            self.base_url, CONTINUOUS_FUTURES_DATABASE, contract_id
        )
    }
}

#[async_trait]
impl MarketDataClient for QuandlClient {
    async fn fetch_contract(&self, contract_id: &str) -> Result<Vec<PriceObservation>, ApiError> {
        let mut request = self.client.get(self.dataset_url(contract_id));
        if !self.api_key.is_empty() {
            request = request.query(&[("api_key", self.api_key.as_str())]);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let message = match serde_json::from_str::<ApiErrorResponse>(&text) {
                Ok(err) => format!("{} ({}): {}", status, err.quandl_error.code, err.quandl_error.message),
                Err(_) => format!("{}: {}", status, text),
            };
            return Err(ApiError::ApiError(message));
        }

        let body: DatasetResponse = serde_json::from_str(&text)
            .map_err(|e| ApiError::Deserialization(e.to_string()))?;
        let prices = parse_settlements(contract_id, &body.dataset)?;

        tracing::info!(contract_id, rows = prices.len(), "Fetched settlement history.");
        Ok(prices)
    }
}

/// Converts a dataset into settlement observations.
///
/// The `Date` and `Settle` columns are located by name. Rows without a settle
/// price are skipped.
pub fn parse_settlements(
    contract_id: &str,
    dataset: &Dataset,
) -> Result<Vec<PriceObservation>, ApiError> {
    let column = |name: &str| {
        dataset
            .column_names
            .iter()
            .position(|c| c.eq_ignore_ascii_case(name))
            .ok_or_else(|| ApiError::InvalidData(format!("dataset has no '{name}' column")))
    };
    let date_idx = column(DATE_COLUMN)?;
    let settle_idx = column(SETTLE_COLUMN)?;

    let mut prices = Vec::with_capacity(dataset.data.len());
    let mut skipped = 0usize;
    for row in &dataset.data {
        let date = match row.get(date_idx) {
            Some(Value::String(s)) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .map_err(|e| ApiError::InvalidData(format!("invalid date '{s}': {e}")))?,
            other => {
                return Err(ApiError::InvalidData(format!("invalid date value: {other:?}")));
            }
        };
        let price = match row.get(settle_idx) {
            Some(Value::Number(n)) => parse_decimal(n)?,
            Some(Value::Null) | None => {
                skipped += 1;
                continue;
            }
            Some(other) => {
                return Err(ApiError::InvalidData(format!("invalid settle value: {other}")));
            }
        };
        prices.push(PriceObservation::new(contract_id, date, price));
    }

    if skipped > 0 {
        tracing::debug!(contract_id, skipped, "Skipped rows without a settle price.");
    }
    Ok(prices)
}

fn parse_decimal(n: &Number) -> Result<Decimal, ApiError> {
    let s = n.to_string();
    Decimal::from_str(&s)
        .or_else(|_| Decimal::from_scientific(&s))
        .map_err(|e| ApiError::Deserialization(format!("invalid settle price '{s}': {e}")))
}
