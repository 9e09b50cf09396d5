//! Budget model
//!
//! A spending limit for a category over a monthly or yearly period. The stored
//! `spent` value is a cache written by other tools; the reconciler always
//! recomputes it from transactions.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::BudgetId;
use super::money::Money;
use super::period::PeriodType;

/// A user-defined budget
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    #[serde(default)]
    pub id: BudgetId,

    /// Display name, also used as a keyword dictionary key
    pub name: String,

    /// Category key matched against transactions
    pub category: String,

    /// Spending limit for one period
    pub limit: Money,

    /// Stored spend, informational only
    #[serde(default)]
    pub spent: Money,

    #[serde(default)]
    pub period: PeriodType,

    #[serde(default = "default_active")]
    pub is_active: bool,

    /// Day of the month the budget resets on
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reset_day: Option<u32>,
}

fn default_active() -> bool {
    true
}

impl Budget {
    /// Create an active monthly budget
    pub fn monthly(name: impl Into<String>, category: impl Into<String>, limit: Money) -> Self {
        Self {
            id: BudgetId::new(),
            name: name.into(),
            category: category.into(),
            limit,
            spent: Money::zero(),
            period: PeriodType::Monthly,
            is_active: true,
            reset_day: None,
        }
    }

    /// Create an active yearly budget
    pub fn yearly(name: impl Into<String>, category: impl Into<String>, limit: Money) -> Self {
        Self {
            period: PeriodType::Yearly,
            ..Self::monthly(name, category, limit)
        }
    }

    /// Builder-style deactivation
    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }

    /// Whether this budget takes part in a reconciliation of `period_type`
    pub fn participates_in(&self, period_type: PeriodType) -> bool {
        self.is_active && self.period == period_type
    }

    /// Validate the budget definition
    pub fn validate(&self) -> Result<(), BudgetValidationError> {
        if self.name.trim().is_empty() {
            return Err(BudgetValidationError::EmptyName);
        }
        if !self.limit.is_positive() {
            return Err(BudgetValidationError::NonPositiveLimit);
        }
        if let Some(day) = self.reset_day {
            if !(1..=31).contains(&day) {
                return Err(BudgetValidationError::InvalidResetDay(day));
            }
        }
        Ok(())
    }
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}] {} {}", self.name, self.category, self.limit, self.period)
    }
}

/// Validation errors for budgets
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BudgetValidationError {
    EmptyName,
    NonPositiveLimit,
    InvalidResetDay(u32),
}

impl fmt::Display for BudgetValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Budget name cannot be empty"),
            Self::NonPositiveLimit => write!(f, "Budget limit must be positive"),
            Self::InvalidResetDay(day) => write!(f, "Invalid reset day: {}", day),
        }
    }
}

impl std::error::Error for BudgetValidationError {}
