//! Savings goal model
//!
//! Goals are owned by the storage collaborator; the engine only proposes
//! updated copies of them when an allocation is applied.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::GoalId;
use super::money::Money;

/// A savings goal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsGoal {
    #[serde(default)]
    pub id: GoalId,

    pub name: String,

    /// Amount to reach; zero means open-ended
    #[serde(default)]
    pub target_amount: Money,

    #[serde(default)]
    pub current_amount: Money,

    /// Lower values are funded first
    #[serde(default)]
    pub priority: u32,

    #[serde(default = "default_active")]
    pub is_active: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<NaiveDate>,
}

fn default_active() -> bool {
    true
}

impl SavingsGoal {
    pub fn new(name: impl Into<String>, target_amount: Money) -> Self {
        Self {
            id: GoalId::new(),
            name: name.into(),
            target_amount,
            current_amount: Money::zero(),
            priority: 0,
            is_active: true,
            deadline: None,
        }
    }

    pub fn with_priority(mut self, priority: u32) -> Self {
        self.priority = priority;
        self
    }

    /// Open-ended goals have no target
    pub fn is_open_ended(&self) -> bool {
        !self.target_amount.is_positive()
    }

    /// Amount still needed to reach the target, `None` for open-ended goals
    pub fn remaining_need(&self) -> Option<Money> {
        if self.is_open_ended() {
            None
        } else {
            Some((self.target_amount - self.current_amount).clamp_non_negative())
        }
    }

    pub fn is_complete(&self) -> bool {
        self.remaining_need().is_some_and(|need| need.is_zero())
    }

    /// Progress toward the target, as a percentage
    pub fn progress_percentage(&self) -> f64 {
        if self.is_open_ended() {
            return 0.0;
        }
        (self.current_amount.as_f64() / self.target_amount.as_f64()) * 100.0
    }
}

impl fmt::Display for SavingsGoal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_open_ended() {
            write!(f, "{}: {}", self.name, self.current_amount)
        } else {
            write!(f, "{}: {} / {}", self.name, self.current_amount, self.target_amount)
        }
    }
}
