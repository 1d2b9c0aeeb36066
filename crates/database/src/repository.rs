use crate::DbError;
use crate::store::PriceSeriesStore;
use async_trait::async_trait;
use core_types::PriceObservation;
use sqlx::postgres::{PgPool, Postgres};
use sqlx::QueryBuilder;

/// Rows per multi-row INSERT; 3 binds each keeps well under PostgreSQL's
/// 65535 bind-parameter limit.
const INSERT_CHUNK_SIZE: usize = 1000;

/// The `DbRepository` provides a high-level, application-specific interface
/// to the `contracts` table. It encapsulates all SQL queries and data access logic.
#[derive(Debug, Clone)]
pub struct DbRepository {
    pool: PgPool,
}

impl DbRepository {
    /// Creates a new `DbRepository` with a shared database connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Fetches every settlement price for the given contracts.
    pub async fn get_prices(&self, contract_ids: &[String]) -> Result<Vec<PriceObservation>, DbError> {
        let prices = sqlx::query_as::<_, PriceObservation>(
            r#"
            SELECT name, date, price
            FROM contracts
            WHERE name = ANY($1)
            ORDER BY name, date
            "#,
        )
        .bind(contract_ids)
        .fetch_all(&self.pool)
        .await?;

        tracing::info!(contracts = contract_ids.len(), rows = prices.len(), "Fetched settlement prices.");
        Ok(prices)
    }

    /// Fetches the settlement prices of a single contract, e.g. `CME_ES3`.
    pub async fn get_contract_prices(&self, contract_id: &str) -> Result<Vec<PriceObservation>, DbError> {
        let prices = sqlx::query_as::<_, PriceObservation>(
            "SELECT name, date, price FROM contracts WHERE name = $1 ORDER BY date",
        )
        .bind(contract_id)
        .fetch_all(&self.pool)
        .await?;

        if prices.is_empty() {
            return Err(DbError::NotFound);
        }
        Ok(prices)
    }

    /// Saves settlement prices in a single transaction.
    /// Uses `ON CONFLICT DO NOTHING` to be idempotent, so a backfill can be re-run
    /// without causing errors if the data already exists.
    ///
    /// Returns the number of rows actually inserted.
    pub async fn save_prices(&self, prices: &[PriceObservation]) -> Result<u64, DbError> {
        let mut tx = self.pool.begin().await?;
        let mut inserted = 0;

        for chunk in prices.chunks(INSERT_CHUNK_SIZE) {
            let mut builder: QueryBuilder<Postgres> =
                QueryBuilder::new("INSERT INTO contracts (name, date, price) ");
            builder.push_values(chunk, |mut row, obs| {
                row.push_bind(&obs.contract_id)
                    .push_bind(obs.date)
                    .push_bind(obs.price);
            });
            builder.push(" ON CONFLICT (name, date) DO NOTHING");

            inserted += builder.build().execute(&mut *tx).await?.rows_affected();
        }

        tx.commit().await?;
        tracing::debug!(rows = prices.len(), inserted, "Saved settlement prices.");
        Ok(inserted)
    }
}

#[async_trait]
impl PriceSeriesStore for DbRepository {
    async fn fetch(&self, contract_ids: &[String]) -> Result<Vec<PriceObservation>, DbError> {
        self.get_prices(contract_ids).await
    }
}
