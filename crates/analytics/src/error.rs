use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

/// Malformed price input. These are reported to the caller and never retried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DataError {
    #[error("No price observations were supplied")]
    EmptyInput,

    #[error("Duplicate observation for contract '{contract_id}' on {date}")]
    DuplicateObservation { contract_id: String, date: NaiveDate },

    #[error("Non-positive price {price} for contract '{contract_id}' on {date} precedes a return")]
    NonPositivePrice {
        contract_id: String,
        date: NaiveDate,
        price: Decimal,
    },
}

#[derive(Error, Debug)]
pub enum AnalyticsError {
    #[error("Invalid price data: {0}")]
    Data(#[from] DataError),

    #[error("Invalid analytics parameters: {0}")]
    InvalidParameters(String),

    #[error("Error in calculation: {0}")]
    Calculation(String),
}
