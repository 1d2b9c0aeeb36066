//! Descriptive statistics over ordered slices of returns.

use rust_decimal::prelude::*;

/// Arithmetic mean, `None` for an empty slice.
pub fn mean(values: &[Decimal]) -> Option<Decimal> {
    if values.is_empty() {
        return None;
    }
    let sum: Decimal = values.iter().sum();
    Some(sum / Decimal::from(values.len()))
}

/// Sample standard deviation (N-1 denominator), `None` for fewer than two values.
pub fn sample_std_dev(values: &[Decimal]) -> Option<Decimal> {
    if values.len() < 2 {
        return None;
    }
    let mean = mean(values)?;
    let variance = values
        .iter()
        .map(|v| (*v - mean) * (*v - mean))
        .sum::<Decimal>()
        / Decimal::from(values.len() - 1);
    variance.sqrt()
}

/// Rolling sample standard deviation over every full window of `window`
/// values, sliding one value at a time.
///
/// Yields nothing when `values` is shorter than the window. The iterator is
/// double-ended, so `next_back()` computes just the most recent window.
pub fn rolling_std_dev(
    values: &[Decimal],
    window: usize,
) -> impl DoubleEndedIterator<Item = Option<Decimal>> + '_ {
    // `windows(0)` panics; a window that small has no standard deviation anyway.
    let size = window.max(2);
    values.windows(size).map(sample_std_dev)
}
