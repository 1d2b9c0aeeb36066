use crate::error::CoreError;
use serde::Deserialize;

/// Parameters for the statistics engine.
///
/// Deserialized from the `[analytics]` section of the application config.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AnalyticsParams {
    /// Number of trading days used to annualize daily figures.
    pub trading_days_per_year: u32,
    /// Number of daily returns in one trailing-volatility window.
    pub trailing_window: usize,
}

impl Default for AnalyticsParams {
    fn default() -> Self {
        Self {
            trading_days_per_year: 252,
            trailing_window: 252,
        }
    }
}

impl AnalyticsParams {
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.trading_days_per_year == 0 {
            return Err(CoreError::InvalidParameters(
                "analytics.trading_days_per_year must be positive".to_string(),
            ));
        }
        // A sample standard deviation needs at least two points.
        if self.trailing_window < 2 {
            return Err(CoreError::InvalidParameters(
                "analytics.trailing_window must be at least 2".to_string(),
            ));
        }
        Ok(())
    }
}
