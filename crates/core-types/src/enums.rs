use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The summary statistics the analytics engine knows how to rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Statistic {
    AnnualizedVolatility,
    TrailingVolatility,
    LargestSingleDayReturn,
    LargestAnnualReturn,
    SharpeRatio,
}

impl Statistic {
    pub const ALL: [Statistic; 5] = [
        Statistic::AnnualizedVolatility,
        Statistic::TrailingVolatility,
        Statistic::LargestSingleDayReturn,
        Statistic::LargestAnnualReturn,
        Statistic::SharpeRatio,
    ];

    /// The kebab-case name used on the command line and in JSON output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Statistic::AnnualizedVolatility => "annualized-volatility",
            Statistic::TrailingVolatility => "trailing-volatility",
            Statistic::LargestSingleDayReturn => "largest-single-day-return",
            Statistic::LargestAnnualReturn => "largest-annual-return",
            Statistic::SharpeRatio => "sharpe-ratio",
        }
    }

    /// Column header used when the statistic is rendered as a table.
    pub fn column_name(&self) -> &'static str {
        match self {
            Statistic::AnnualizedVolatility => "annualized_vol",
            Statistic::TrailingVolatility => "trailing_1yr_vol",
            Statistic::LargestSingleDayReturn => "single_day_return",
            Statistic::LargestAnnualReturn => "annual_return",
            Statistic::SharpeRatio => "sharpe_ratio",
        }
    }
}

impl fmt::Display for Statistic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Statistic {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        Statistic::ALL
            .into_iter()
            .find(|stat| stat.as_str() == normalized)
            .ok_or_else(|| {
                let expected = Statistic::ALL
                    .iter()
                    .map(|stat| stat.as_str())
                    .collect::<Vec<_>>()
                    .join(", ");
                CoreError::UnknownStatistic(s.to_string(), expected)
            })
    }
}
