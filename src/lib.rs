//! spendtrack - budget tracking and spend aggregation engine
//!
//! This library implements the core of a personal finance tracker: given a
//! user's transactions, categories, and monthly per-category budgets, it
//! buckets spend by time period, aggregates income/expense totals, grades
//! each budget (under, near-limit, over), and derives alert events for the
//! presentation layer to render.
//!
//! # Architecture
//!
//! - `config`: user settings (thresholds, trend window)
//! - `error`: structured error values
//! - `models`: core data models (transactions, categories, budgets, money)
//! - `storage`: in-memory snapshot store
//! - `services`: validation-bearing operations over the store
//! - `reports`: pure derived computations (trends, budget statuses, alerts)
//!
//! The engine in `reports` is pure and synchronous: it works on entity
//! slices, keeps no state, and recomputes every result from its inputs.
//! HTTP routing, sessions, and rendering live outside this crate.
//!
//! # Example
//!
//! ```rust,ignore
//! use spendtrack::models::Month;
//! use spendtrack::reports::{derive_alerts, evaluate};
//!
//! let statuses = evaluate(&budgets, &transactions, &categories, Month::new(2024, 6)?)?;
//! let alerts: Vec<_> = derive_alerts(&statuses, &categories, &transactions).collect();
//! ```

pub mod config;
pub mod error;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{TrackerError, TrackerResult};
