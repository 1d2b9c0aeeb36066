use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single daily settlement price for one futures contract.
///
/// Rows of the `contracts` table map onto this struct, with the `name`
/// column read into `contract_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct PriceObservation {
    #[sqlx(rename = "name")]
    pub contract_id: String,
    pub date: NaiveDate,
    pub price: Decimal,
}

impl PriceObservation {
    pub fn new(contract_id: impl Into<String>, date: NaiveDate, price: Decimal) -> Self {
        Self {
            contract_id: contract_id.into(),
            date,
            price,
        }
    }
}

/// A simple daily return derived from two consecutive price observations.
///
/// `daily_return` is `None` for the first observation of a contract: there is
/// no prior price, which is not the same thing as a zero return.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReturnObservation {
    pub contract_id: String,
    pub date: NaiveDate,
    pub daily_return: Option<Decimal>,
}
