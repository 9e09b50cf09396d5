//! Service layer for pocketplan
//!
//! The reconciliation and allocation engine. Every function here is
//! synchronous and pure: it borrows its inputs and returns owned records.
//! Goal persistence goes through the `GoalStore` trait.

pub mod allocator;
pub mod dashboard;
pub mod goals;
pub mod health;
pub mod keywords;
pub mod matcher;
pub mod reconciler;
pub mod recurring;
pub mod suggestions;

pub use allocator::{allocate, AllocationPlan, PlanAllocation, PlanRegistry};
pub use dashboard::{aggregate, BudgetStatus, BudgetStatusKind, DashboardInfo, TransactionStats};
pub use goals::{commit_goal_update, plan_goal_update, GoalCommitError, GoalStore, GoalUpdate};
pub use health::{classify, classify_totals, FinancialHealthStatus, HealthAssessment, HealthThresholds};
pub use keywords::{KeywordDictionary, KeywordGroup};
pub use matcher::{match_budget, BudgetMatch, BudgetMatcher, MatchTier};
pub use reconciler::{reconcile, BudgetPeriodData, PeriodReconciler};
pub use recurring::pending_recurring_amount;
pub use suggestions::{BudgetSuggestion, SuggestionKind, SuggestionService, SuggestionSettings};
