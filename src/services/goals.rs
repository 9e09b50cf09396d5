//! Goal contributions
//!
//! Applying an allocation is a two-phase operation. `plan_goal_update` computes
//! the tentative goal list without side effects; `commit_goal_update` writes it
//! through a `GoalStore` and restores the previous snapshot if the write fails.

use serde::Serialize;
use thiserror::Error;

use super::allocator::PlanAllocation;
use crate::error::{PocketError, PocketResult};
use crate::models::{GoalId, Money, SavingsGoal};

/// Name of the goal that receives the savings bucket
pub const SAVINGS_GOAL_NAME: &str = "Savings";

/// Persistence boundary for savings goals
pub trait GoalStore {
    fn load_goals(&self) -> PocketResult<Vec<SavingsGoal>>;
    fn save_goals(&mut self, goals: &[SavingsGoal]) -> PocketResult<()>;
}

/// Money credited to one goal
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalContribution {
    pub goal_id: GoalId,
    pub goal_name: String,
    pub amount: Money,
}

/// A tentative goal update and the snapshot it replaces
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalUpdate {
    #[serde(skip)]
    pub snapshot: Vec<SavingsGoal>,
    pub goals: Vec<SavingsGoal>,
    pub contributions: Vec<GoalContribution>,
    /// The savings goal did not exist and was added
    pub created_savings_goal: bool,
    /// Part of the goals bucket no goal could absorb
    pub unassigned: Money,
}

impl GoalUpdate {
    pub fn contributed(&self) -> Money {
        self.contributions.iter().map(|c| c.amount).sum()
    }
}

/// Failed commit; `rolled_back` tells whether the snapshot was restored
#[derive(Error, Debug)]
#[error("Failed to save goal contributions: {source}")]
pub struct GoalCommitError {
    #[source]
    pub source: PocketError,
    pub rolled_back: bool,
}

/// Compute goal balances after applying an allocation
///
/// The savings bucket goes to the active goal named "Savings", creating it if
/// needed. The goals bucket fills the other active goals with a target in
/// priority order, never beyond what a goal still needs. The personal bucket
/// is not stored.
pub fn plan_goal_update(goals: &[SavingsGoal], allocation: &PlanAllocation) -> GoalUpdate {
    let mut tentative = goals.to_vec();
    let mut contributions = Vec::new();
    let mut created_savings_goal = false;

    let mut savings_idx = tentative
        .iter()
        .position(|g| g.is_active && g.name.eq_ignore_ascii_case(SAVINGS_GOAL_NAME));

    if allocation.savings.is_positive() {
        let idx = match savings_idx {
            Some(idx) => idx,
            None => {
                tentative.push(SavingsGoal::new(SAVINGS_GOAL_NAME, Money::zero()));
                created_savings_goal = true;
                tentative.len() - 1
            }
        };
        savings_idx = Some(idx);
        let goal = &mut tentative[idx];
        goal.current_amount += allocation.savings;
        contributions.push(GoalContribution {
            goal_id: goal.id,
            goal_name: goal.name.clone(),
            amount: allocation.savings,
        });
    }

    // The savings goal is fed by the savings bucket only
    let mut order: Vec<usize> = (0..tentative.len())
        .filter(|&i| Some(i) != savings_idx)
        .filter(|&i| tentative[i].is_active)
        .filter(|&i| tentative[i].remaining_need().is_some_and(|n| n.is_positive()))
        .collect();
    order.sort_by_key(|&i| tentative[i].priority);

    let mut left = allocation.goals;
    for i in order {
        if !left.is_positive() {
            break;
        }
        let goal = &mut tentative[i];
        let need = goal.remaining_need().unwrap_or_default();
        let amount = need.min(left);
        goal.current_amount += amount;
        left -= amount;
        contributions.push(GoalContribution {
            goal_id: goal.id,
            goal_name: goal.name.clone(),
            amount,
        });
    }

    GoalUpdate {
        snapshot: goals.to_vec(),
        goals: tentative,
        contributions,
        created_savings_goal,
        unassigned: left,
    }
}

/// Persist a tentative update, rolling back to the snapshot on failure
pub fn commit_goal_update<S: GoalStore + ?Sized>(
    store: &mut S,
    update: GoalUpdate,
) -> Result<Vec<SavingsGoal>, GoalCommitError> {
    match store.save_goals(&update.goals) {
        Ok(()) => {
            tracing::debug!(
                contributions = update.contributions.len(),
                contributed = %update.contributed(),
                "Committed goal update"
            );
            Ok(update.goals)
        }
        Err(source) => {
            let rolled_back = match store.save_goals(&update.snapshot) {
                Ok(()) => true,
                Err(e) => {
                    tracing::warn!(error = %e, "Could not restore goals after a failed write");
                    false
                }
            };
            Err(GoalCommitError {
                source,
                rolled_back,
            })
        }
    }
}
