//! pocketplan - budget reconciliation and allocation engine
//!
//! Matches expenses to budgets, reconciles a period into a single summary,
//! classifies financial health and splits surpluses into savings, goals and
//! personal spending with an exact-sum guarantee.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Path resolution and user settings
//! - `error`: Custom error types
//! - `models`: Core data models (transactions, budgets, accounts, goals, money, periods)
//! - `services`: The reconciliation and allocation engine
//! - `storage`: JSON ledger snapshot and goal persistence
//! - `display`: Terminal formatting
//! - `cli`: Command handlers for the `pocketplan` binary
//!
//! # Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use pocketplan::models::{Budget, Money, ReconcilePeriod, Transaction};
//! use pocketplan::services::{allocate, classify, reconcile, AllocationPlan, FinancialHealthStatus};
//!
//! let day = NaiveDate::from_ymd_opt(2025, 1, 10).unwrap();
//! let budgets = vec![Budget::monthly("Food", "Food", Money::from_units(5000))];
//! let transactions = vec![
//!     Transaction::expense(Money::from_units(1000), "Food", "Groceries", day),
//!     Transaction::income(Money::from_units(10000), "Salary", "", day),
//! ];
//!
//! let data = reconcile(&budgets, &transactions, ReconcilePeriod::month(2025, 0), None);
//! assert_eq!(classify(&data).status, FinancialHealthStatus::StrongSurplus);
//!
//! let split = allocate(data.surplus(), &AllocationPlan::conservative());
//! assert_eq!(split.savings + split.goals + split.personal, data.surplus());
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{PocketError, PocketResult};
