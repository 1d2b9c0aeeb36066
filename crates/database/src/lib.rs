//! # Price Database Crate
//!
//! This crate is the application's interface to the PostgreSQL price store:
//! one `contracts` table of daily settlement prices keyed by contract and date.
//!
//! ## Architectural Principles
//!
//! - **Adapter:** Encapsulates all SQL. The rest of the application sees
//!   `PriceObservation`s and the `PriceSeriesStore` trait.
//! - **Asynchronous & Pooled:** All operations are asynchronous and share a
//!   connection pool (`PgPool`).
//! - **Explicit Configuration:** The pool is built from a `DatabaseConfig`
//!   passed in by the caller.
//!
//! ## Public API
//!
//! - `connect` / `run_migrations`: build the pool and bring the schema up to date.
//! - `DbRepository`: fetches and saves settlement prices.
//! - `PriceSeriesStore`: the fetch interface the analyzer depends on, with an
//!   `InMemoryPriceStore` implementation.
//! - `DbError`: the specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod connection;
pub mod error;
pub mod repository;
pub mod store;

// Re-export the key components to create a clean, public-facing API.
pub use connection::{connect, run_migrations};
pub use error::DbError;
pub use repository::DbRepository;
pub use store::{InMemoryPriceStore, PriceSeriesStore};
