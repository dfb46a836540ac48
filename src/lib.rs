//! Vendord - vendor management and performance tracking.
//!
//! This crate provides a small HTTP service for keeping vendor and
//! purchase-order records, with four vendor performance metrics that are
//! recomputed automatically whenever a purchase order is saved as completed.
//!
//! # Architecture
//!
//! - **[`domain`]** - Entities and the pure metric math
//!   - `PerformanceMetrics::compute` - aggregates a vendor's full
//!     purchase-order set into the four metrics
//! - **[`store`]** - Storage traits with SQLite (Diesel) and in-memory
//!   backends
//! - **[`service`]** - The recalculation engine and token issuance
//! - **[`api`]** - axum router, CRUD handlers, and error mapping
//!
//! # Modules
//!
//! - [`config`] - Configuration loading from TOML files
//! - [`db`] - Connection pool, schema, and embedded migrations
//! - [`error`] - Error types for the crate
//! - [`app`] - Server wiring and startup
//!
//! # Example
//!
//! ```no_run
//! use vendord::app::App;
//! use vendord::config::Config;
//!
//! # async fn run() -> vendord::error::Result<()> {
//! let config = Config::default();
//! App::run(config).await
//! # }
//! ```

pub mod api;
pub mod app;
pub mod cli;
pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod service;
pub mod store;

#[cfg(feature = "testkit")]
pub mod testkit;
