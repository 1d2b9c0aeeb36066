use crate::error::{AnalyticsError, DataError};
use crate::series::GroupedSeries;
use chrono::NaiveDate;
use core_types::{PriceObservation, ReturnObservation};
use rust_decimal::Decimal;

/// Daily returns partitioned by contract, each group in date order.
pub type ReturnSeries = GroupedSeries<String, ReturnObservation>;

/// Derives simple daily returns from settlement prices.
///
/// Observations may arrive in any order and with contracts interleaved. They
/// are partitioned by contract and sorted by date; each contract's first
/// observation gets an undefined return, every later one
/// `price[i] / price[i-1] - 1`.
///
/// # Errors
///
/// * `DataError::EmptyInput` - `prices` is empty.
/// * `DataError::DuplicateObservation` - a contract has two prices on one date.
/// * `DataError::NonPositivePrice` - a price that a return would divide by is zero or negative.
pub fn compute_returns(prices: &[PriceObservation]) -> Result<ReturnSeries, AnalyticsError> {
    if prices.is_empty() {
        return Err(DataError::EmptyInput.into());
    }

    let mut grouped: GroupedSeries<String, &PriceObservation> = prices
        .iter()
        .map(|obs| (obs.contract_id.clone(), obs))
        .collect();
    grouped.sort_groups_by_key(|obs| obs.date);

    let series = grouped.try_map_groups(|contract_id, observations| {
        contract_returns(contract_id, &observations)
    })?;

    tracing::debug!(
        contracts = series.len(),
        observations = prices.len(),
        "Computed daily returns."
    );
    Ok(series)
}

/// Returns for one contract whose observations are already in date order.
fn contract_returns(
    contract_id: &str,
    observations: &[&PriceObservation],
) -> Result<Vec<ReturnObservation>, AnalyticsError> {
    if let Some(pair) = observations.windows(2).find(|w| w[0].date == w[1].date) {
        return Err(DataError::DuplicateObservation {
            contract_id: contract_id.to_string(),
            date: pair[0].date,
        }
        .into());
    }

    let mut returns = Vec::with_capacity(observations.len());
    if let Some(first) = observations.first() {
        returns.push(ReturnObservation {
            contract_id: contract_id.to_string(),
            date: first.date,
            daily_return: None,
        });
    }

    for pair in observations.windows(2) {
        let (prev, curr) = (pair[0], pair[1]);
        let daily_return = simple_return(contract_id, prev.date, prev.price, curr.price)?;
        returns.push(ReturnObservation {
            contract_id: contract_id.to_string(),
            date: curr.date,
            daily_return: Some(daily_return),
        });
    }

    Ok(returns)
}

fn simple_return(
    contract_id: &str,
    prev_date: NaiveDate,
    prev_price: Decimal,
    price: Decimal,
) -> Result<Decimal, AnalyticsError> {
    if prev_price <= Decimal::ZERO {
        return Err(DataError::NonPositivePrice {
            contract_id: contract_id.to_string(),
            date: prev_date,
            price: prev_price,
        }
        .into());
    }
    let ratio = price.checked_div(prev_price).ok_or_else(|| {
        AnalyticsError::Calculation(format!(
            "price ratio overflow for '{contract_id}' after {prev_date}"
        ))
    })?;
    Ok(ratio - Decimal::ONE)
}

/// The defined returns of one contract, in date order.
pub fn defined_returns(observations: &[ReturnObservation]) -> Vec<Decimal> {
    observations.iter().filter_map(|obs| obs.daily_return).collect()
}

/// The defined returns of one contract paired with their dates, in date order.
pub fn dated_returns(observations: &[ReturnObservation]) -> Vec<(NaiveDate, Decimal)> {
    observations
        .iter()
        .filter_map(|obs| obs.daily_return.map(|r| (obs.date, r)))
        .collect()
}
