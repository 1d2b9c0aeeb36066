use crate::error::DbError;
use async_trait::async_trait;
use core_types::PriceObservation;
use std::collections::HashSet;

/// Anything that can hand out settlement prices by contract identifier.
///
/// Implementations must return observations for exactly the requested
/// contracts and nothing else. Ordering is not guaranteed; the analytics
/// crate sorts what it receives.
#[async_trait]
pub trait PriceSeriesStore: Send + Sync {
    async fn fetch(&self, contract_ids: &[String]) -> Result<Vec<PriceObservation>, DbError>;
}

/// A `PriceSeriesStore` over a vector held in memory. Used by tests and by
/// callers that already have their prices loaded.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPriceStore {
    observations: Vec<PriceObservation>,
}

impl InMemoryPriceStore {
    pub fn new(observations: Vec<PriceObservation>) -> Self {
        Self { observations }
    }
}

#[async_trait]
impl PriceSeriesStore for InMemoryPriceStore {
    async fn fetch(&self, contract_ids: &[String]) -> Result<Vec<PriceObservation>, DbError> {
        let wanted: HashSet<&str> = contract_ids.iter().map(String::as_str).collect();
        Ok(self
            .observations
            .iter()
            .filter(|obs| wanted.contains(obs.contract_id.as_str()))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn obs(id: &str, day: u32) -> PriceObservation {
        PriceObservation::new(id, NaiveDate::from_ymd_opt(2021, 3, day).unwrap(), dec!(10))
    }

    #[tokio::test]
    async fn returns_only_requested_contracts() {
        let store = InMemoryPriceStore::new(vec![
            obs("CME_GC1", 1),
            obs("CME_GC2", 1),
            obs("CME_GC10", 1),
            obs("CME_GC1", 2),
        ]);

        let fetched = store
            .fetch(&["CME_GC1".to_string(), "CME_GC3".to_string()])
            .await
            .unwrap();
        assert_eq!(fetched.len(), 2);
        assert!(fetched.iter().all(|o| o.contract_id == "CME_GC1"));
    }

    #[tokio::test]
    async fn empty_request_fetches_nothing() {
        let store = InMemoryPriceStore::new(vec![obs("A1", 1)]);
        assert!(store.fetch(&[]).await.unwrap().is_empty());
    }
}
