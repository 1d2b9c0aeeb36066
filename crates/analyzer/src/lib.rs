use crate::error::AnalyzerError;
use analytics::{StatisticReport, StatisticsEngine, compute_returns};
use configuration::ContractResolver;
use core_types::{PriceObservation, Statistic};
use database::PriceSeriesStore;

pub mod error;

/// Runs statistics for a contract root end to end, from root resolution
/// through the ranked report.
///
/// Errors from the resolver and the store are passed through unchanged.
pub struct Analyzer<S> {
    resolver: ContractResolver,
    store: S,
    engine: StatisticsEngine,
}

impl<S: PriceSeriesStore> Analyzer<S> {
    pub fn new(resolver: ContractResolver, store: S, engine: StatisticsEngine) -> Self {
        Self {
            resolver,
            store,
            engine,
        }
    }

    /// Fetches the settlement prices of every contract of `root`.
    pub async fn fetch_root(&self, root: &str) -> Result<Vec<PriceObservation>, AnalyzerError> {
        let (_, prices) = self.load(root).await?;
        Ok(prices)
    }

    /// Computes one statistic for every contract of `root`.
    ///
    /// Resolved contracts the store has no prices for are listed as excluded.
    pub async fn run(
        &self,
        root: &str,
        statistic: Statistic,
    ) -> Result<StatisticReport, AnalyzerError> {
        let (contract_ids, prices) = self.load(root).await?;
        let series = compute_returns(&prices)?;
        Ok(self.engine.compute_contracts(statistic, &contract_ids, &series)?)
    }

    /// Computes all five statistics, fetching and deriving returns only once.
    pub async fn run_all(&self, root: &str) -> Result<Vec<StatisticReport>, AnalyzerError> {
        let (contract_ids, prices) = self.load(root).await?;
        let series = compute_returns(&prices)?;
        Statistic::ALL
            .into_iter()
            .map(|statistic| {
                Ok(self
                    .engine
                    .compute_contracts(statistic, &contract_ids, &series)?)
            })
            .collect()
    }

    async fn load(&self, root: &str) -> Result<(Vec<String>, Vec<PriceObservation>), AnalyzerError> {
        let contract_ids = self.resolver.resolve(root)?;
        let prices = self.store.fetch(&contract_ids).await?;
        if prices.is_empty() {
            return Err(AnalyzerError::NoData(root.to_string()));
        }
        tracing::info!(root, contracts = contract_ids.len(), rows = prices.len(), "Loaded contract root.");
        Ok((contract_ids, prices))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use analytics::{AnalyticsError, DataError};
    use chrono::{Duration, NaiveDate};
    use configuration::{AnalyticsParams, ContractsConfig};
    use configuration::error::ConfigError;
    use database::InMemoryPriceStore;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use std::collections::HashMap;

    fn series(id: &str, prices: &[Decimal]) -> Vec<PriceObservation> {
        let start = NaiveDate::from_ymd_opt(2020, 2, 3).unwrap();
        prices
            .iter()
            .enumerate()
            .map(|(i, p)| PriceObservation::new(id, start + Duration::days(i as i64), *p))
            .collect()
    }

    fn analyzer(store: InMemoryPriceStore) -> Analyzer<InMemoryPriceStore> {
        let resolver = ContractResolver::new(&ContractsConfig {
            default_depth: Some(4),
            depths: HashMap::from([("NQ".to_string(), 2)]),
        });
        let engine = StatisticsEngine::new(AnalyticsParams::default()).unwrap();
        Analyzer::new(resolver, store, engine)
    }

    #[tokio::test]
    async fn only_the_contract_with_history_is_ranked() {
        let mut prices = series("R1", &[dec!(10)]);
        prices.extend(series("R3", &[dec!(10), dec!(11), dec!(10.5), dec!(12)]));
        prices.extend(series("R4", &[dec!(7)]));
        // Not part of root R; must not be fetched.
        prices.extend(series("Q1", &[dec!(1), dec!(2), dec!(3)]));

        let report = analyzer(InMemoryPriceStore::new(prices))
            .run("R", Statistic::AnnualizedVolatility)
            .await
            .unwrap();

        let rows: Vec<_> = report.values().into_iter().map(|(id, _)| id).collect();
        assert_eq!(rows, vec!["R3"]);
        let excluded: Vec<_> = report.excluded().iter().map(|e| e.contract_id.clone()).collect();
        assert_eq!(excluded, vec!["R1", "R2", "R4"]);
        // R2 has no rows in the store at all.
        assert_eq!(report.excluded()[1].available, 0);
    }

    #[tokio::test]
    async fn configured_depth_limits_the_contracts_fetched() {
        let mut prices = series("NQ1", &[dec!(1), dec!(2), dec!(3)]);
        prices.extend(series("NQ2", &[dec!(1), dec!(1.5), dec!(2)]));
        prices.extend(series("NQ3", &[dec!(1), dec!(9), dec!(1)]));

        let fetched = analyzer(InMemoryPriceStore::new(prices))
            .fetch_root("NQ")
            .await
            .unwrap();
        assert!(fetched.iter().all(|o| o.contract_id != "NQ3"));
        assert_eq!(fetched.len(), 6);
    }

    #[tokio::test]
    async fn run_all_produces_every_statistic_in_order() {
        let prices = series("G1", &[dec!(100), dec!(101), dec!(99), dec!(102)]);
        let reports = analyzer(InMemoryPriceStore::new(prices)).run_all("G").await.unwrap();

        let statistics: Vec<_> = reports.iter().map(StatisticReport::statistic).collect();
        assert_eq!(statistics, Statistic::ALL.to_vec());
    }

    #[tokio::test]
    async fn root_without_prices_is_no_data() {
        let err = analyzer(InMemoryPriceStore::default())
            .run("CL", Statistic::SharpeRatio)
            .await
            .unwrap_err();
        assert!(matches!(err, AnalyzerError::NoData(root) if root == "CL"));
    }

    #[tokio::test]
    async fn run_all_lists_missing_contracts_under_every_statistic() {
        let prices = series("G1", &[dec!(100), dec!(101), dec!(99), dec!(102)]);
        let reports = analyzer(InMemoryPriceStore::new(prices)).run_all("G").await.unwrap();

        for report in &reports {
            let missing: Vec<_> = report
                .excluded()
                .iter()
                .filter(|e| e.available == 0)
                .map(|e| e.contract_id.as_str())
                .collect();
            assert_eq!(missing, vec!["G2", "G3", "G4"], "{}", report.statistic());
        }
    }

    #[tokio::test]
    async fn bad_prices_surface_as_data_errors() {
        let prices = series("B1", &[dec!(0), dec!(1)]);
        let err = analyzer(InMemoryPriceStore::new(prices))
            .run("B", Statistic::SharpeRatio)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AnalyzerError::Analytics(AnalyticsError::Data(DataError::NonPositivePrice { .. }))
        ));
    }

    #[tokio::test]
    async fn resolver_errors_pass_through() {
        let resolver = ContractResolver::new(&ContractsConfig::default());
        let engine = StatisticsEngine::new(AnalyticsParams::default()).unwrap();
        let analyzer = Analyzer::new(resolver, InMemoryPriceStore::default(), engine);

        let err = analyzer.run("CME_XX", Statistic::SharpeRatio).await.unwrap_err();
        assert!(matches!(err, AnalyzerError::Config(ConfigError::UnknownRoot(_))));
    }
}
