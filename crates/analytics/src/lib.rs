//! # Analytics Engine
//!
//! Ranked risk/return statistics over daily settlement prices of the contracts
//! of one futures root.
//!
//! ## Architectural Principles
//!
//! - **Pure Logic:** No I/O. Prices come in as a slice of `PriceObservation`,
//!   ranked tables come out. Fetching and rendering live in other crates.
//! - **Explicit Undefined Values:** A contract's first return is `None`, not
//!   zero; a Sharpe ratio over constant prices is `None`, not a division fault.
//! - **Exclude, Don't Fail:** Contracts with too little history are listed in
//!   the table's `excluded` instead of aborting the computation. Only malformed
//!   input (`DataError`) fails it.
//!
//! ## Public API
//!
//! - `compute_returns`: partitions prices by contract and derives daily returns.
//! - `StatisticsEngine`: the five statistics, each returning a `StatisticTable`.
//! - `GroupedSeries`: the per-contract partition the statistics iterate over.
//! - `AnalyticsError` / `DataError`: the errors this crate can return.

// Declare the modules that constitute this crate.
pub mod engine;
pub mod error;
pub mod returns;
pub mod series;
pub mod stats;
pub mod table;

// Re-export the key components to create a clean, public-facing API.
pub use engine::StatisticsEngine;
pub use error::{AnalyticsError, DataError};
pub use returns::{ReturnSeries, compute_returns};
pub use series::GroupedSeries;
pub use table::{
    AnnualReturnRow, Exclusion, SharpeRatioRow, SingleDayReturnRow, StatisticReport,
    StatisticRow, StatisticTable, VolatilityRow,
};
