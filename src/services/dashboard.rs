//! Dashboard aggregation
//!
//! Combines account balances, a reconciled period and the pending recurring
//! total into the summary shown on the dashboard.

use serde::Serialize;

use super::reconciler::BudgetPeriodData;
use crate::models::{Account, Money, ReconcilePeriod, Transaction};

/// Raw transaction totals for a period
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionStats {
    pub income_count: usize,
    pub expense_count: usize,
    pub total_income: Money,
    pub total_expenses: Money,
    /// Income already reflected in some account balance
    pub income_in_balances: Money,
}

impl TransactionStats {
    /// Count and sum the period's transactions
    pub fn from_transactions(transactions: &[Transaction], period: ReconcilePeriod) -> Self {
        transactions
            .iter()
            .filter(|t| period.contains(t.date))
            .fold(Self::default(), |mut stats, t| {
                if t.is_income() {
                    stats.income_count += 1;
                    stats.total_income += t.amount;
                    if t.is_included_in_account_balance {
                        stats.income_in_balances += t.amount;
                    }
                } else {
                    stats.expense_count += 1;
                    stats.total_expenses += t.amount;
                }
                stats
            })
    }

    pub fn transaction_count(&self) -> usize {
        self.income_count + self.expense_count
    }

    /// Income not yet reflected in any account balance
    pub fn income_outside_balances(&self) -> Money {
        self.total_income - self.income_in_balances
    }
}

/// Where spending stands against the budget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum BudgetStatusKind {
    /// Spending is below the budget
    #[serde(rename = "restante")]
    Remaining,
    /// Spending is above the budget
    #[serde(rename = "excedente")]
    Exceeded,
    #[serde(rename = "neutral")]
    Neutral,
}

impl BudgetStatusKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Remaining => "restante",
            Self::Exceeded => "excedente",
            Self::Neutral => "neutral",
        }
    }
}

/// Budget status with the absolute difference between budget and spending
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BudgetStatus {
    pub kind: BudgetStatusKind,
    pub amount: Money,
}

impl BudgetStatus {
    fn from_totals(budget_total: Money, total_spent: Money) -> Self {
        let kind = match budget_total.cmp(&total_spent) {
            std::cmp::Ordering::Greater => BudgetStatusKind::Remaining,
            std::cmp::Ordering::Less => BudgetStatusKind::Exceeded,
            std::cmp::Ordering::Equal => BudgetStatusKind::Neutral,
        };
        Self {
            kind,
            amount: (budget_total - total_spent).abs(),
        }
    }
}

/// One line of the end-of-month projection breakdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectionLine {
    BaseBalance,
    PendingRecurring,
    ProjectedResult,
}

impl ProjectionLine {
    pub fn label(&self) -> &'static str {
        match self {
            Self::BaseBalance => "Monthly balance",
            Self::PendingRecurring => "Pending recurring",
            Self::ProjectedResult => "Projected result",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProjectionRow {
    pub line: ProjectionLine,
    pub amount: Money,
}

/// The final dashboard summary
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardInfo {
    pub period_id: String,
    /// Sum of account balances, negative balances included
    pub available_cash: Money,
    /// `income_total - total_spent`
    pub monthly_balance: Money,
    pub budget_status: BudgetStatus,
    /// `max(0, income_total - budget_total)`
    pub monthly_surplus: Money,
    pub has_surplus: bool,
    pub pending_recurring: Money,
    /// `monthly_balance - pending_recurring`
    pub end_of_month_projection: Money,
    /// Base balance, pending recurring, projected result, in that order
    pub projection_breakdown: [ProjectionRow; 3],
    pub stats: TransactionStats,
}

/// Build the dashboard summary
pub fn aggregate(
    stats: &TransactionStats,
    data: &BudgetPeriodData,
    accounts: &[Account],
    pending_recurring: Money,
) -> DashboardInfo {
    let available_cash: Money = accounts.iter().map(|a| a.balance).sum();
    let monthly_balance = data.income_total - data.total_spent;
    let monthly_surplus = (data.income_total - data.budget_total).clamp_non_negative();
    let end_of_month_projection = monthly_balance - pending_recurring;

    DashboardInfo {
        period_id: data.period_id.clone(),
        available_cash,
        monthly_balance,
        budget_status: BudgetStatus::from_totals(data.budget_total, data.total_spent),
        monthly_surplus,
        has_surplus: monthly_surplus.is_positive(),
        pending_recurring,
        end_of_month_projection,
        projection_breakdown: [
            ProjectionRow {
                line: ProjectionLine::BaseBalance,
                amount: monthly_balance,
            },
            ProjectionRow {
                line: ProjectionLine::PendingRecurring,
                amount: pending_recurring,
            },
            ProjectionRow {
                line: ProjectionLine::ProjectedResult,
                amount: end_of_month_projection,
            },
        ],
        stats: stats.clone(),
    }
}
