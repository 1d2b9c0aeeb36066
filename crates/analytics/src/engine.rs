use crate::error::AnalyticsError;
use crate::returns::{ReturnSeries, compute_returns, dated_returns, defined_returns};
use crate::stats::{mean, rolling_std_dev, sample_std_dev};
use crate::table::{
    AnnualReturnRow, SharpeRatioRow, SingleDayReturnRow, StatisticReport, StatisticTable,
    VolatilityRow,
};
use chrono::Datelike;
use core_types::{AnalyticsParams, PriceObservation, Statistic};
use rust_decimal::prelude::*;
use std::collections::{BTreeMap, HashSet};

/// Defined returns needed for a sample standard deviation.
const MIN_RETURNS_FOR_STD_DEV: usize = 2;

/// A stateless calculator for ranked per-contract statistics.
///
/// Every operation takes the full `ReturnSeries` of a contract root and
/// returns one row per contract, highest value first. Contracts without
/// enough history are listed in the table's `excluded` instead of failing
/// the whole computation.
#[derive(Debug, Clone)]
pub struct StatisticsEngine {
    params: AnalyticsParams,
    /// `sqrt(trading_days_per_year)`.
    annualization_factor: Decimal,
}

impl StatisticsEngine {
    /// Creates an engine, validating the parameters.
    pub fn new(params: AnalyticsParams) -> Result<Self, AnalyticsError> {
        params
            .validate()
            .map_err(|e| AnalyticsError::InvalidParameters(e.to_string()))?;
        let annualization_factor = Decimal::from(params.trading_days_per_year)
            .sqrt()
            .ok_or_else(|| {
                AnalyticsError::Calculation(
                    "Failed to calculate square root of trading days".to_string(),
                )
            })?;
        Ok(Self {
            params,
            annualization_factor,
        })
    }

    pub fn params(&self) -> &AnalyticsParams {
        &self.params
    }

    /// Computes returns from raw prices and runs `statistic` on them.
    pub fn analyze(
        &self,
        statistic: Statistic,
        prices: &[PriceObservation],
    ) -> Result<StatisticReport, AnalyticsError> {
        let series = compute_returns(prices)?;
        self.compute(statistic, &series)
    }

    /// Runs `statistic` for the contracts of one root.
    ///
    /// Identical to `compute`, except that every id in `contract_ids` with no
    /// observations in `series` is listed as excluded, and exclusions follow
    /// the order of `contract_ids`.
    pub fn compute_contracts(
        &self,
        statistic: Statistic,
        contract_ids: &[String],
        series: &ReturnSeries,
    ) -> Result<StatisticReport, AnalyticsError> {
        let mut report = self.compute(statistic, series)?;
        let present: HashSet<&String> = series.keys().collect();
        let required = self.required_returns(statistic);
        for contract_id in contract_ids.iter().filter(|id| !present.contains(id)) {
            report.exclude(contract_id, required, 0);
        }
        report.sort_excluded_by(contract_ids);
        Ok(report)
    }

    /// Defined returns a contract needs before `statistic` is computed for it.
    pub fn required_returns(&self, statistic: Statistic) -> usize {
        match statistic {
            Statistic::AnnualizedVolatility | Statistic::SharpeRatio => MIN_RETURNS_FOR_STD_DEV,
            Statistic::TrailingVolatility => self.params.trailing_window,
            Statistic::LargestSingleDayReturn | Statistic::LargestAnnualReturn => 1,
        }
    }

    /// Runs the named statistic.
    pub fn compute(
        &self,
        statistic: Statistic,
        series: &ReturnSeries,
    ) -> Result<StatisticReport, AnalyticsError> {
        let report = match statistic {
            Statistic::AnnualizedVolatility => {
                StatisticReport::AnnualizedVolatility(self.annualized_volatility(series)?)
            }
            Statistic::TrailingVolatility => {
                StatisticReport::TrailingVolatility(self.trailing_volatility(series)?)
            }
            Statistic::LargestSingleDayReturn => {
                StatisticReport::LargestSingleDayReturn(self.largest_single_day_return(series)?)
            }
            Statistic::LargestAnnualReturn => {
                StatisticReport::LargestAnnualReturn(self.largest_annual_return(series)?)
            }
            Statistic::SharpeRatio => StatisticReport::SharpeRatio(self.sharpe_ratio(series)?),
        };
        Ok(report)
    }

    /// Sample standard deviation of all defined returns, annualized by
    /// `sqrt(trading_days_per_year)`.
    pub fn annualized_volatility(
        &self,
        series: &ReturnSeries,
    ) -> Result<StatisticTable<VolatilityRow>, AnalyticsError> {
        let mut table = StatisticTable::new(Statistic::AnnualizedVolatility);

        for (contract_id, observations) in series.groups() {
            let returns = defined_returns(observations);
            let Some(std_dev) = sample_std_dev(&returns) else {
                table.exclude(contract_id, MIN_RETURNS_FOR_STD_DEV, returns.len());
                continue;
            };
            table.push(VolatilityRow {
                contract_id: contract_id.clone(),
                volatility: std_dev * self.annualization_factor,
            });
        }

        Ok(table.ranked())
    }

    /// Sample standard deviation of the most recent `trailing_window` returns.
    ///
    /// This is the last value of a rolling standard deviation; like the rolling
    /// series it is a daily figure and is not annualized.
    pub fn trailing_volatility(
        &self,
        series: &ReturnSeries,
    ) -> Result<StatisticTable<VolatilityRow>, AnalyticsError> {
        let window = self.params.trailing_window;
        let mut table = StatisticTable::new(Statistic::TrailingVolatility);

        for (contract_id, observations) in series.groups() {
            let returns = defined_returns(observations);
            match rolling_std_dev(&returns, window).next_back().flatten() {
                Some(volatility) if returns.len() >= window => table.push(VolatilityRow {
                    contract_id: contract_id.clone(),
                    volatility,
                }),
                _ => table.exclude(contract_id, window, returns.len()),
            }
        }

        Ok(table.ranked())
    }

    /// The maximum daily return and its date. The earliest date wins a tie.
    pub fn largest_single_day_return(
        &self,
        series: &ReturnSeries,
    ) -> Result<StatisticTable<SingleDayReturnRow>, AnalyticsError> {
        let mut table = StatisticTable::new(Statistic::LargestSingleDayReturn);

        for (contract_id, observations) in series.groups() {
            let dated = dated_returns(observations);
            let best = dated.iter().fold(None, |best: Option<(_, Decimal)>, &(date, r)| {
                match best {
                    Some((_, max)) if r <= max => best,
                    _ => Some((date, r)),
                }
            });
            match best {
                Some((date, single_day_return)) => table.push(SingleDayReturnRow {
                    contract_id: contract_id.clone(),
                    date,
                    single_day_return,
                }),
                None => table.exclude(contract_id, 1, 0),
            }
        }

        Ok(table.ranked())
    }

    /// The calendar year with the largest annualized mean daily return.
    ///
    /// Each year's mean daily return is compounded over a full
    /// `trading_days_per_year`, however many days the year actually had; the
    /// row's `trading_days` says how many went into the mean. The earliest year
    /// wins a tie.
    ///
    /// A year whose compounded return does not fit in a `Decimal` has an
    /// undefined value. Prices are positive, so such a year exceeds every
    /// representable one and is reported as the contract's best year; the row
    /// then ranks after all defined rows.
    pub fn largest_annual_return(
        &self,
        series: &ReturnSeries,
    ) -> Result<StatisticTable<AnnualReturnRow>, AnalyticsError> {
        let mut table = StatisticTable::new(Statistic::LargestAnnualReturn);

        for (contract_id, observations) in series.groups() {
            let mut by_year: BTreeMap<i32, Vec<Decimal>> = BTreeMap::new();
            for (date, r) in dated_returns(observations) {
                by_year.entry(date.year()).or_default().push(r);
            }

            let mut best: Option<AnnualReturnRow> = None;
            for (year, returns) in &by_year {
                let Some(mean_return) = mean(returns) else {
                    continue;
                };
                let annual_return_pct = self.annualize_pct(mean_return);
                if annual_return_pct.is_none() {
                    tracing::warn!(
                        contract_id = %contract_id,
                        year,
                        "Annualized return overflows, value undefined."
                    );
                }
                if best
                    .as_ref()
                    .is_none_or(|b| exceeds(annual_return_pct, b.annual_return_pct))
                {
                    best = Some(AnnualReturnRow {
                        contract_id: contract_id.clone(),
                        year: *year,
                        annual_return_pct,
                        trading_days: returns.len(),
                    });
                }
            }

            match best {
                Some(row) => table.push(row),
                None => table.exclude(contract_id, 1, 0),
            }
        }

        Ok(table.ranked())
    }

    /// `((1 + mean)^trading_days - 1) * 100`, or `None` on overflow.
    fn annualize_pct(&self, mean_return: Decimal) -> Option<Decimal> {
        (Decimal::ONE + mean_return)
            .checked_powu(u64::from(self.params.trading_days_per_year))?
            .checked_sub(Decimal::ONE)?
            .checked_mul(Decimal::ONE_HUNDRED)
    }

    /// `mean / sample_std_dev * sqrt(trading_days_per_year)`, without a
    /// risk-free offset. Undefined (`None`) when the returns never vary.
    pub fn sharpe_ratio(
        &self,
        series: &ReturnSeries,
    ) -> Result<StatisticTable<SharpeRatioRow>, AnalyticsError> {
        let mut table = StatisticTable::new(Statistic::SharpeRatio);

        for (contract_id, observations) in series.groups() {
            let returns = defined_returns(observations);
            let (Some(mean_return), Some(std_dev)) = (mean(&returns), sample_std_dev(&returns))
            else {
                table.exclude(contract_id, MIN_RETURNS_FOR_STD_DEV, returns.len());
                continue;
            };

            let sharpe_ratio = if std_dev.is_zero() {
                tracing::debug!(contract_id = %contract_id, "Zero return volatility, Sharpe ratio undefined.");
                None
            } else {
                Some(mean_return / std_dev * self.annualization_factor)
            };
            table.push(SharpeRatioRow {
                contract_id: contract_id.clone(),
                sharpe_ratio,
            });
        }

        Ok(table.ranked())
    }
}

/// Whether `candidate` beats the current best annual return. An undefined
/// (overflowed) value beats any defined one; the first undefined year stays.
fn exceeds(candidate: Option<Decimal>, current: Option<Decimal>) -> bool {
    match (candidate, current) {
        (Some(c), Some(b)) => c > b,
        (None, Some(_)) => true,
        (_, None) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};
    use rust_decimal_macros::dec;

    fn engine() -> StatisticsEngine {
        StatisticsEngine::new(AnalyticsParams::default()).unwrap()
    }

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2019, 1, 1).unwrap()
    }

    /// Consecutive daily prices for one contract, starting on `start()`.
    fn prices(id: &str, values: &[Decimal]) -> Vec<PriceObservation> {
        values
            .iter()
            .enumerate()
            .map(|(i, p)| PriceObservation::new(id, start() + Duration::days(i as i64), *p))
            .collect()
    }

    /// A deterministic, non-constant price path of `n` observations.
    fn zigzag(id: &str, n: usize) -> Vec<PriceObservation> {
        let values: Vec<Decimal> = (0..n)
            .map(|i| dec!(100) + Decimal::from((i * 7) % 11) - Decimal::from((i * 3) % 5))
            .collect();
        prices(id, &values)
    }

    fn series(observations: &[PriceObservation]) -> ReturnSeries {
        compute_returns(observations).unwrap()
    }

    fn assert_close(a: Decimal, b: Decimal) {
        assert!((a - b).abs() < dec!(0.000000001), "{a} != {b}");
    }

    fn assert_ranked(report: &StatisticReport) {
        let values = report.values();
        for pair in values.windows(2) {
            if let (Some(a), Some(b)) = (pair[0].1, pair[1].1) {
                assert!(a >= b, "rows out of order: {values:?}");
            }
        }
    }

    #[test]
    fn rejects_a_zero_trailing_window() {
        let params = AnalyticsParams {
            trading_days_per_year: 252,
            trailing_window: 0,
        };
        assert!(matches!(
            StatisticsEngine::new(params),
            Err(AnalyticsError::InvalidParameters(_))
        ));
    }

    #[test]
    fn annualized_volatility_scales_sample_std_dev_by_sqrt_252() {
        let data = zigzag("A", 40);
        let s = series(&data);
        let table = engine().annualized_volatility(&s).unwrap();

        let raw = sample_std_dev(&defined_returns(s.get(&"A".to_string()).unwrap())).unwrap();
        let factor = Decimal::from(252).sqrt().unwrap();
        assert_eq!(table.rows.len(), 1);
        assert_close(table.rows[0].volatility, raw * factor);
        assert_close(table.rows[0].volatility / factor, raw);
    }

    #[test]
    fn volatility_excludes_contracts_with_fewer_than_two_returns() {
        let mut data = prices("SHORT", &[dec!(10), dec!(11)]);
        data.extend(zigzag("LONG", 10));
        let table = engine().annualized_volatility(&series(&data)).unwrap();

        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0].contract_id, "LONG");
        assert_eq!(
            table.excluded,
            vec![crate::Exclusion {
                contract_id: "SHORT".to_string(),
                required: 2,
                available: 1,
            }]
        );
    }

    #[test]
    fn constant_prices_have_zero_volatility() {
        let table = engine()
            .annualized_volatility(&series(&prices("C", &[dec!(50), dec!(50), dec!(50)])))
            .unwrap();
        assert_eq!(table.rows[0].volatility, Decimal::ZERO);
    }

    #[test]
    fn trailing_volatility_over_exactly_one_window_equals_full_sample() {
        // 253 prices -> 252 defined returns.
        let s = series(&zigzag("W", 253));
        let trailing = engine().trailing_volatility(&s).unwrap();
        let full = sample_std_dev(&defined_returns(s.get(&"W".to_string()).unwrap())).unwrap();

        assert_eq!(trailing.rows.len(), 1);
        assert_eq!(trailing.rows[0].volatility, full);

        let annualized = engine().annualized_volatility(&s).unwrap();
        assert_close(
            annualized.rows[0].volatility,
            trailing.rows[0].volatility * Decimal::from(252).sqrt().unwrap(),
        );
    }

    #[test]
    fn trailing_volatility_needs_a_full_window() {
        let table = engine().trailing_volatility(&series(&zigzag("W", 252))).unwrap();
        assert!(table.rows.is_empty());
        assert_eq!(table.excluded[0].required, 252);
        assert_eq!(table.excluded[0].available, 251);
    }

    #[test]
    fn trailing_volatility_uses_the_most_recent_window() {
        let data = zigzag("W", 300);
        let s = series(&data);
        let returns = defined_returns(s.get(&"W".to_string()).unwrap());
        let table = engine().trailing_volatility(&s).unwrap();

        let expected = sample_std_dev(&returns[returns.len() - 252..]).unwrap();
        assert_eq!(table.rows[0].volatility, expected);
    }

    #[test]
    fn largest_single_day_return_picks_earliest_of_ties() {
        let data = prices("X1", &[dec!(100), dec!(110), dec!(99), dec!(108.9)]);
        let table = engine().largest_single_day_return(&series(&data)).unwrap();

        assert_eq!(table.rows.len(), 1);
        let row = &table.rows[0];
        assert_eq!(row.contract_id, "X1");
        assert_eq!(row.date, start() + Duration::days(1));
        assert_eq!(row.single_day_return, dec!(0.10));
    }

    #[test]
    fn largest_single_day_return_is_a_member_and_a_maximum() {
        let mut data = zigzag("A", 60);
        data.extend(zigzag("B", 30));
        let s = series(&data);
        let table = engine().largest_single_day_return(&s).unwrap();

        for row in &table.rows {
            let returns = defined_returns(s.get(&row.contract_id).unwrap());
            assert!(returns.contains(&row.single_day_return));
            assert!(returns.iter().all(|r| *r <= row.single_day_return));
        }
    }

    #[test]
    fn largest_single_day_return_excludes_single_observations() {
        let mut data = prices("ONE", &[dec!(5)]);
        data.extend(prices("TWO", &[dec!(5), dec!(6)]));
        let table = engine().largest_single_day_return(&series(&data)).unwrap();
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.excluded[0].contract_id, "ONE");
    }

    #[test]
    fn largest_annual_return_picks_best_year() {
        let d = |y, m, day| NaiveDate::from_ymd_opt(y, m, day).unwrap();
        let data = vec![
            PriceObservation::new("G1", d(2018, 12, 28), dec!(100)),
            PriceObservation::new("G1", d(2018, 12, 31), dec!(100)),
            // 2019: one day of +1%
            PriceObservation::new("G1", d(2019, 1, 2), dec!(101)),
            // 2020: +2% then -2%
            PriceObservation::new("G1", d(2020, 1, 2), dec!(103.02)),
            PriceObservation::new("G1", d(2020, 1, 3), dec!(100.9596)),
        ];
        let table = engine().largest_annual_return(&series(&data)).unwrap();

        let row = &table.rows[0];
        assert_eq!(row.year, 2019);
        assert_eq!(row.trading_days, 1);
        let expected = (dec!(1.01).powu(252) - Decimal::ONE) * Decimal::ONE_HUNDRED;
        assert_close(row.annual_return_pct.unwrap(), expected);
        assert_eq!(row.formatted(), format!("{:.2}%", expected.round_dp(2)));
    }

    #[test]
    fn largest_annual_return_ties_go_to_the_earliest_year() {
        let d = |y, m, day| NaiveDate::from_ymd_opt(y, m, day).unwrap();
        let data = vec![
            PriceObservation::new("T", d(2019, 12, 30), dec!(10)),
            PriceObservation::new("T", d(2019, 12, 31), dec!(10)),
            PriceObservation::new("T", d(2020, 1, 2), dec!(10)),
        ];
        let table = engine().largest_annual_return(&series(&data)).unwrap();
        assert_eq!(table.rows[0].year, 2019);
        assert_eq!(table.rows[0].annual_return_pct, Some(Decimal::ZERO));
    }

    #[test]
    fn overflowing_annual_return_is_undefined_for_that_contract_only() {
        let d = |y, m, day| NaiveDate::from_ymd_opt(y, m, day).unwrap();
        let data = vec![
            PriceObservation::new("OK1", d(2020, 1, 2), dec!(100)),
            PriceObservation::new("OK1", d(2020, 1, 3), dec!(101)),
            PriceObservation::new("OK1", d(2020, 1, 6), dec!(102)),
            // 1.29^252 fits in a Decimal, the percentage does not.
            PriceObservation::new("HOT", d(2020, 1, 2), dec!(100)),
            PriceObservation::new("HOT", d(2020, 1, 3), dec!(129)),
            // 1.4^252 does not fit at all.
            PriceObservation::new("HOTTER", d(2020, 1, 2), dec!(100)),
            PriceObservation::new("HOTTER", d(2020, 1, 3), dec!(140)),
        ];

        let report = engine()
            .analyze(Statistic::LargestAnnualReturn, &data)
            .unwrap();
        let StatisticReport::LargestAnnualReturn(table) = &report else {
            panic!("unexpected report {report:?}");
        };

        let ids: Vec<_> = table.rows.iter().map(|r| r.contract_id.as_str()).collect();
        assert_eq!(ids, vec!["OK1", "HOT", "HOTTER"]);
        assert!(table.rows[0].annual_return_pct.is_some());
        assert_eq!(table.rows[1].annual_return_pct, None);
        assert_eq!(table.rows[1].year, 2020);
        assert_eq!(table.rows[2].annual_return_pct, None);
        assert_eq!(table.rows[2].formatted(), "NaN");
        assert!(table.excluded.is_empty());
    }

    #[test]
    fn overflowing_year_beats_every_defined_year() {
        let d = |y, m, day| NaiveDate::from_ymd_opt(y, m, day).unwrap();
        let data = vec![
            PriceObservation::new("MIX", d(2019, 6, 3), dec!(100)),
            PriceObservation::new("MIX", d(2019, 6, 4), dec!(101)),
            PriceObservation::new("MIX", d(2020, 6, 1), dec!(141.4)),
            PriceObservation::new("MIX", d(2021, 6, 1), dec!(142)),
        ];
        let table = engine().largest_annual_return(&series(&data)).unwrap();

        assert_eq!(table.rows[0].year, 2020);
        assert_eq!(table.rows[0].annual_return_pct, None);
    }

    #[test]
    fn contracts_without_prices_are_listed_as_excluded() {
        let mut data = prices("R1", &[dec!(10)]);
        data.extend(prices("R3", &[dec!(10), dec!(11), dec!(10.5)]));
        data.extend(prices("R4", &[dec!(7)]));
        let ids = ["R1", "R2", "R3", "R4"].map(String::from);

        for statistic in Statistic::ALL {
            let report = engine()
                .compute_contracts(statistic, &ids, &series(&data))
                .unwrap();
            let missing = report
                .excluded()
                .iter()
                .find(|e| e.contract_id == "R2")
                .unwrap();
            assert_eq!(missing.available, 0);
            assert_eq!(missing.required, engine().required_returns(statistic));
        }

        let report = engine()
            .compute_contracts(Statistic::AnnualizedVolatility, &ids, &series(&data))
            .unwrap();
        let excluded: Vec<_> = report.excluded().iter().map(|e| e.contract_id.as_str()).collect();
        assert_eq!(excluded, vec!["R1", "R2", "R4"]);
        let ranked: Vec<_> = report.values().into_iter().map(|(id, _)| id).collect();
        assert_eq!(ranked, vec!["R3"]);
    }

    #[test]
    fn sharpe_ratio_matches_formula() {
        let s = series(&zigzag("S", 50));
        let returns = defined_returns(s.get(&"S".to_string()).unwrap());
        let expected = mean(&returns).unwrap() / sample_std_dev(&returns).unwrap()
            * Decimal::from(252).sqrt().unwrap();

        let table = engine().sharpe_ratio(&s).unwrap();
        assert_close(table.rows[0].sharpe_ratio.unwrap(), expected);
    }

    #[test]
    fn constant_series_has_undefined_sharpe_ratio() {
        let data = prices("FLAT", &[dec!(50), dec!(50), dec!(50)]);
        let s = series(&data);
        let returns: Vec<_> = s
            .get(&"FLAT".to_string())
            .unwrap()
            .iter()
            .map(|r| r.daily_return)
            .collect();
        assert_eq!(returns, vec![None, Some(Decimal::ZERO), Some(Decimal::ZERO)]);

        let table = engine().sharpe_ratio(&s).unwrap();
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0].sharpe_ratio, None);
    }

    #[test]
    fn undefined_sharpe_ranks_after_defined_ones() {
        let mut data = prices("FLAT", &[dec!(50), dec!(50), dec!(50)]);
        data.extend(prices("DOWN", &[dec!(50), dec!(49), dec!(47)]));
        data.extend(prices("UP", &[dec!(50), dec!(51), dec!(53)]));
        let table = engine().sharpe_ratio(&series(&data)).unwrap();

        let order: Vec<_> = table.rows.iter().map(|r| r.contract_id.as_str()).collect();
        assert_eq!(order, vec!["UP", "DOWN", "FLAT"]);
    }

    #[test]
    fn only_contracts_with_history_appear_in_the_table() {
        let mut data = prices("R1", &[dec!(10)]);
        data.extend(prices("R2", &[dec!(10), dec!(11)]));
        data.extend(zigzag("R3", 5));
        data.extend(prices("R4", &[dec!(10)]));

        let report = engine().analyze(Statistic::AnnualizedVolatility, &data).unwrap();
        let rows: Vec<_> = report.values().into_iter().map(|(id, _)| id).collect();
        assert_eq!(rows, vec!["R3"]);

        let excluded: Vec<_> = report.excluded().iter().map(|e| e.contract_id.as_str()).collect();
        assert_eq!(excluded, vec!["R1", "R2", "R4"]);
    }

    #[test]
    fn every_statistic_is_ranked_and_deterministic() {
        let mut data = zigzag("A", 300);
        data.extend(zigzag("B", 260).into_iter().map(|mut o| {
            o.price *= dec!(1.5);
            o.contract_id = "B".to_string();
            o
        }));
        data.extend(prices("C", &[dec!(20), dec!(22), dec!(21), dec!(25), dec!(24)]));
        data.reverse();

        for statistic in Statistic::ALL {
            let first = engine().analyze(statistic, &data).unwrap();
            let second = engine().analyze(statistic, &data).unwrap();
            assert_eq!(first, second);
            assert_eq!(first.statistic(), statistic);
            assert_ranked(&first);
            assert_eq!(
                serde_json::to_string(&first).unwrap(),
                serde_json::to_string(&second).unwrap()
            );
        }
    }

    #[test]
    fn bad_prices_fail_the_whole_analysis() {
        let data = prices("NEG", &[dec!(-1), dec!(2)]);
        assert!(matches!(
            engine().analyze(Statistic::SharpeRatio, &data),
            Err(AnalyticsError::Data(_))
        ));
    }
}
