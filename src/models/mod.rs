//! Core data models for pocketplan
//!
//! Plain records handed to the engine by the storage collaborator: accounts,
//! budgets, transactions and savings goals, plus the money and period types
//! they are measured in.

pub mod account;
pub mod budget;
pub mod date;
pub mod goal;
pub mod ids;
pub mod money;
pub mod period;
pub mod transaction;

pub use account::{Account, AccountType};
pub use budget::{Budget, BudgetValidationError};
pub use date::parse_calendar_date;
pub use goal::SavingsGoal;
pub use ids::{AccountId, BudgetId, GoalId, TransactionId};
pub use money::Money;
pub use period::{PeriodType, ReconcilePeriod};
pub use transaction::{Recurrence, Transaction, TransactionKind};
