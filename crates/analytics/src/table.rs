use chrono::NaiveDate;
use core_types::Statistic;
use rust_decimal::Decimal;
use serde::{Serialize, Serializer};
use std::cmp::Ordering;

/// One row of a ranked statistic table.
pub trait StatisticRow {
    fn contract_id(&self) -> &str;

    /// The value the table is ranked by. `None` when the statistic is undefined.
    fn value(&self) -> Option<Decimal>;

    /// Column headers, matching `cells`.
    fn headers(statistic: Statistic) -> Vec<String>
    where
        Self: Sized;

    /// The row rendered for display.
    fn cells(&self) -> Vec<String>;
}

/// A contract left out of a table because it has too little history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Exclusion {
    pub contract_id: String,
    /// Defined returns the statistic needs.
    pub required: usize,
    /// Defined returns the contract has.
    pub available: usize,
}

/// A ranked table: one row per contract, highest statistic first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatisticTable<R> {
    pub statistic: Statistic,
    pub rows: Vec<R>,
    pub excluded: Vec<Exclusion>,
}

impl<R: StatisticRow> StatisticTable<R> {
    pub(crate) fn new(statistic: Statistic) -> Self {
        Self {
            statistic,
            rows: Vec::new(),
            excluded: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, row: R) {
        self.rows.push(row);
    }

    pub(crate) fn exclude(&mut self, contract_id: &str, required: usize, available: usize) {
        record_exclusion(self.statistic, &mut self.excluded, contract_id, required, available);
    }

    /// Sorts rows by value, descending. The sort is stable, so ties keep the
    /// order contracts were first seen in; undefined values go last.
    pub(crate) fn ranked(mut self) -> Self {
        self.rows.sort_by(|a, b| compare_descending(a.value(), b.value()));
        self
    }

    pub fn headers(&self) -> Vec<String> {
        R::headers(self.statistic)
    }

    pub fn cells(&self) -> Vec<Vec<String>> {
        self.rows.iter().map(StatisticRow::cells).collect()
    }
}

fn record_exclusion(
    statistic: Statistic,
    excluded: &mut Vec<Exclusion>,
    contract_id: &str,
    required: usize,
    available: usize,
) {
    tracing::warn!(
        statistic = %statistic,
        contract_id,
        required,
        available,
        "Insufficient history, contract excluded."
    );
    excluded.push(Exclusion {
        contract_id: contract_id.to_string(),
        required,
        available,
    });
}

fn compare_descending(a: Option<Decimal>, b: Option<Decimal>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Annualized or trailing volatility of one contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VolatilityRow {
    pub contract_id: String,
    pub volatility: Decimal,
}

impl StatisticRow for VolatilityRow {
    fn contract_id(&self) -> &str {
        &self.contract_id
    }

    fn value(&self) -> Option<Decimal> {
        Some(self.volatility)
    }

    fn headers(statistic: Statistic) -> Vec<String> {
        vec!["name".to_string(), statistic.column_name().to_string()]
    }

    fn cells(&self) -> Vec<String> {
        vec![self.contract_id.clone(), format!("{:.6}", self.volatility)]
    }
}

/// The largest daily return of one contract and the day it happened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SingleDayReturnRow {
    pub contract_id: String,
    pub date: NaiveDate,
    pub single_day_return: Decimal,
}

impl StatisticRow for SingleDayReturnRow {
    fn contract_id(&self) -> &str {
        &self.contract_id
    }

    fn value(&self) -> Option<Decimal> {
        Some(self.single_day_return)
    }

    fn headers(statistic: Statistic) -> Vec<String> {
        vec![
            "name".to_string(),
            "date".to_string(),
            statistic.column_name().to_string(),
        ]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.contract_id.clone(),
            self.date.to_string(),
            format!("{:.6}", self.single_day_return),
        ]
    }
}

/// The calendar year with the highest annualized return for one contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnnualReturnRow {
    pub contract_id: String,
    pub year: i32,
    /// `((1 + mean daily return)^trading_days - 1) * 100`, unrounded.
    /// `None` when the compounded value does not fit in a `Decimal`.
    #[serde(rename = "annual_return", serialize_with = "serialize_percent")]
    pub annual_return_pct: Option<Decimal>,
    /// Defined daily returns that fell in `year`.
    pub trading_days: usize,
}

impl AnnualReturnRow {
    /// The percentage rounded to two places with a `%` suffix, e.g. `12.34%`.
    /// An undefined value reads `NaN`.
    pub fn formatted(&self) -> String {
        format_percent(self.annual_return_pct)
    }
}

fn format_percent(pct: Option<Decimal>) -> String {
    match pct {
        Some(pct) => format!("{:.2}%", pct.round_dp(2)),
        None => "NaN".to_string(),
    }
}

fn serialize_percent<S: Serializer>(
    pct: &Option<Decimal>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match pct {
        Some(_) => serializer.serialize_str(&format_percent(*pct)),
        None => serializer.serialize_none(),
    }
}

impl StatisticRow for AnnualReturnRow {
    fn contract_id(&self) -> &str {
        &self.contract_id
    }

    fn value(&self) -> Option<Decimal> {
        self.annual_return_pct
    }

    fn headers(statistic: Statistic) -> Vec<String> {
        vec![
            "name".to_string(),
            "date".to_string(),
            statistic.column_name().to_string(),
            "trading_days".to_string(),
        ]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.contract_id.clone(),
            self.year.to_string(),
            self.formatted(),
            self.trading_days.to_string(),
        ]
    }
}

/// Annualized Sharpe ratio of one contract. `None` when returns never vary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SharpeRatioRow {
    pub contract_id: String,
    pub sharpe_ratio: Option<Decimal>,
}

impl StatisticRow for SharpeRatioRow {
    fn contract_id(&self) -> &str {
        &self.contract_id
    }

    fn value(&self) -> Option<Decimal> {
        self.sharpe_ratio
    }

    fn headers(statistic: Statistic) -> Vec<String> {
        vec!["name".to_string(), statistic.column_name().to_string()]
    }

    fn cells(&self) -> Vec<String> {
        let value = match self.sharpe_ratio {
            Some(ratio) => format!("{:.6}", ratio),
            None => "NaN".to_string(),
        };
        vec![self.contract_id.clone(), value]
    }
}

/// The result of any one statistic, for callers that pick the statistic at runtime.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StatisticReport {
    AnnualizedVolatility(StatisticTable<VolatilityRow>),
    TrailingVolatility(StatisticTable<VolatilityRow>),
    LargestSingleDayReturn(StatisticTable<SingleDayReturnRow>),
    LargestAnnualReturn(StatisticTable<AnnualReturnRow>),
    SharpeRatio(StatisticTable<SharpeRatioRow>),
}

impl StatisticReport {
    pub fn statistic(&self) -> Statistic {
        match self {
            StatisticReport::AnnualizedVolatility(t) => t.statistic,
            StatisticReport::TrailingVolatility(t) => t.statistic,
            StatisticReport::LargestSingleDayReturn(t) => t.statistic,
            StatisticReport::LargestAnnualReturn(t) => t.statistic,
            StatisticReport::SharpeRatio(t) => t.statistic,
        }
    }

    pub fn headers(&self) -> Vec<String> {
        match self {
            StatisticReport::AnnualizedVolatility(t) => t.headers(),
            StatisticReport::TrailingVolatility(t) => t.headers(),
            StatisticReport::LargestSingleDayReturn(t) => t.headers(),
            StatisticReport::LargestAnnualReturn(t) => t.headers(),
            StatisticReport::SharpeRatio(t) => t.headers(),
        }
    }

    pub fn cells(&self) -> Vec<Vec<String>> {
        match self {
            StatisticReport::AnnualizedVolatility(t) => t.cells(),
            StatisticReport::TrailingVolatility(t) => t.cells(),
            StatisticReport::LargestSingleDayReturn(t) => t.cells(),
            StatisticReport::LargestAnnualReturn(t) => t.cells(),
            StatisticReport::SharpeRatio(t) => t.cells(),
        }
    }

    pub fn excluded(&self) -> &[Exclusion] {
        match self {
            StatisticReport::AnnualizedVolatility(t) => &t.excluded,
            StatisticReport::TrailingVolatility(t) => &t.excluded,
            StatisticReport::LargestSingleDayReturn(t) => &t.excluded,
            StatisticReport::LargestAnnualReturn(t) => &t.excluded,
            StatisticReport::SharpeRatio(t) => &t.excluded,
        }
    }

    /// Lists `contract_id` as excluded, e.g. when the store had no prices for it.
    pub(crate) fn exclude(&mut self, contract_id: &str, required: usize, available: usize) {
        let statistic = self.statistic();
        record_exclusion(statistic, self.excluded_mut(), contract_id, required, available);
    }

    /// Orders the exclusions by their position in `contract_ids`. Ids not in
    /// the list keep their relative order at the end.
    pub(crate) fn sort_excluded_by(&mut self, contract_ids: &[String]) {
        let position = |e: &Exclusion| {
            contract_ids
                .iter()
                .position(|id| *id == e.contract_id)
                .unwrap_or(contract_ids.len())
        };
        self.excluded_mut().sort_by_key(position);
    }

    fn excluded_mut(&mut self) -> &mut Vec<Exclusion> {
        match self {
            StatisticReport::AnnualizedVolatility(t) => &mut t.excluded,
            StatisticReport::TrailingVolatility(t) => &mut t.excluded,
            StatisticReport::LargestSingleDayReturn(t) => &mut t.excluded,
            StatisticReport::LargestAnnualReturn(t) => &mut t.excluded,
            StatisticReport::SharpeRatio(t) => &mut t.excluded,
        }
    }

    /// Ranked `(contract_id, value)` pairs, whatever the row type.
    pub fn values(&self) -> Vec<(String, Option<Decimal>)> {
        fn pairs<R: StatisticRow>(table: &StatisticTable<R>) -> Vec<(String, Option<Decimal>)> {
            table
                .rows
                .iter()
                .map(|row| (row.contract_id().to_string(), row.value()))
                .collect()
        }
        match self {
            StatisticReport::AnnualizedVolatility(t) => pairs(t),
            StatisticReport::TrailingVolatility(t) => pairs(t),
            StatisticReport::LargestSingleDayReturn(t) => pairs(t),
            StatisticReport::LargestAnnualReturn(t) => pairs(t),
            StatisticReport::SharpeRatio(t) => pairs(t),
        }
    }
}
