//! Period reconciliation
//!
//! Aggregates one period's budgets, expenses and income into a single
//! authoritative `BudgetPeriodData`. Every period expense ends up in exactly
//! one of the budgeted/unbudgeted lists, so
//! `spent_budgeted + spent_unbudgeted == total_spent` always holds.

use serde::Serialize;

use super::matcher::{BudgetMatcher, MatchTier};
use crate::models::{Budget, BudgetId, Money, ReconcilePeriod, Transaction};

/// An expense together with the budget it counts against
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetedExpense {
    pub transaction: Transaction,
    pub budget_id: BudgetId,
    pub budget_name: String,
    pub tier: MatchTier,
}

/// Recomputed spend for one participating budget
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetUsage {
    pub budget_id: BudgetId,
    pub name: String,
    pub category: String,
    pub limit: Money,
    pub spent: Money,
    pub remaining: Money,
    /// Share of the limit already spent, as a percentage
    pub used_percentage: f64,
}

impl BudgetUsage {
    fn new(budget: &Budget, spent: Money) -> Self {
        Self {
            budget_id: budget.id,
            name: budget.name.clone(),
            category: budget.category.clone(),
            limit: budget.limit,
            spent,
            remaining: budget.limit - spent,
            used_percentage: percentage(spent, budget.limit),
        }
    }

    pub fn is_over_limit(&self) -> bool {
        self.spent > self.limit
    }
}

/// Aggregate view of one reconciliation period
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetPeriodData {
    pub period: ReconcilePeriod,
    /// `YYYY-MM` or `YYYY`
    pub period_id: String,
    pub budget_total: Money,
    pub active_budget_count: usize,
    pub spent_budgeted: Money,
    pub spent_unbudgeted: Money,
    pub total_spent: Money,
    /// `budget_total - spent_budgeted`
    pub remaining: Money,
    /// `remaining` as a percentage of `budget_total`, 0 without budgets
    pub remaining_percentage: f64,
    pub income_total: Money,
    /// `income_total - budget_total`
    pub income_surplus: Money,
    /// Budgets promise more than the period's income
    pub has_income_budget_gap: bool,
    pub budgeted_expenses: Vec<BudgetedExpense>,
    pub unbudgeted_expenses: Vec<Transaction>,
    pub budget_usage: Vec<BudgetUsage>,
}

impl BudgetPeriodData {
    /// Positive part of `income_surplus`, the amount available to allocate
    pub fn surplus(&self) -> Money {
        self.income_surplus.clamp_non_negative()
    }

    /// Budgeted spending exceeds the total of the limits
    pub fn is_over_budget(&self) -> bool {
        self.spent_budgeted > self.budget_total
    }

    pub fn expense_count(&self) -> usize {
        self.budgeted_expenses.len() + self.unbudgeted_expenses.len()
    }
}

/// Reconciles budgets and transactions for a period
#[derive(Debug, Clone, Copy, Default)]
pub struct PeriodReconciler {
    matcher: BudgetMatcher,
}

impl PeriodReconciler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_matcher(matcher: BudgetMatcher) -> Self {
        Self { matcher }
    }

    /// Build the period summary
    ///
    /// `income_override` replaces the sum of the period's income transactions
    /// when the income figure is sourced elsewhere.
    pub fn reconcile(
        &self,
        budgets: &[Budget],
        transactions: &[Transaction],
        period: ReconcilePeriod,
        income_override: Option<Money>,
    ) -> BudgetPeriodData {
        let period_type = period.period_type();
        let participating: Vec<&Budget> = budgets
            .iter()
            .filter(|b| b.participates_in(period_type))
            .collect();

        let in_period: Vec<&Transaction> = transactions
            .iter()
            .filter(|t| period.contains(t.date))
            .collect();

        let budget_total: Money = participating.iter().map(|b| b.limit).sum();

        let mut budgeted_expenses = Vec::new();
        let mut unbudgeted_expenses = Vec::new();
        let mut spent_per_budget = vec![Money::zero(); participating.len()];

        for expense in in_period.iter().copied().filter(|t| t.is_expense()) {
            match self.matcher.match_expense(expense, &participating) {
                Some(hit) => {
                    if let Some(idx) = participating.iter().position(|b| std::ptr::eq(*b, hit.budget)) {
                        spent_per_budget[idx] += expense.amount;
                    }
                    budgeted_expenses.push(BudgetedExpense {
                        transaction: expense.clone(),
                        budget_id: hit.budget.id,
                        budget_name: hit.budget.name.clone(),
                        tier: hit.tier,
                    });
                }
                None => unbudgeted_expenses.push(expense.clone()),
            }
        }

        let spent_budgeted: Money = budgeted_expenses.iter().map(|e| e.transaction.amount).sum();
        let spent_unbudgeted: Money = unbudgeted_expenses.iter().map(|t| t.amount).sum();
        let total_spent = spent_budgeted + spent_unbudgeted;

        let income_total = income_override.unwrap_or_else(|| {
            in_period
                .iter()
                .filter(|t| t.is_income())
                .map(|t| t.amount)
                .sum()
        });

        let remaining = budget_total - spent_budgeted;
        let budget_usage = participating
            .iter()
            .zip(spent_per_budget)
            .map(|(budget, spent)| BudgetUsage::new(budget, spent))
            .collect();

        let data = BudgetPeriodData {
            period,
            period_id: period.id(),
            budget_total,
            active_budget_count: participating.len(),
            spent_budgeted,
            spent_unbudgeted,
            total_spent,
            remaining,
            remaining_percentage: percentage(remaining, budget_total),
            income_total,
            income_surplus: income_total - budget_total,
            has_income_budget_gap: budget_total > income_total,
            budgeted_expenses,
            unbudgeted_expenses,
            budget_usage,
        };

        tracing::debug!(
            period = %data.period_id,
            budgets = data.active_budget_count,
            budget_total = %data.budget_total,
            spent_budgeted = %data.spent_budgeted,
            spent_unbudgeted = %data.spent_unbudgeted,
            income_total = %data.income_total,
            "Reconciled period"
        );

        data
    }
}

/// Reconcile with the built-in keyword dictionary
pub fn reconcile(
    budgets: &[Budget],
    transactions: &[Transaction],
    period: ReconcilePeriod,
    income_override: Option<Money>,
) -> BudgetPeriodData {
    PeriodReconciler::new().reconcile(budgets, transactions, period, income_override)
}

/// `part / whole` as a percentage, 0 when `whole` is zero
fn percentage(part: Money, whole: Money) -> f64 {
    if whole.is_zero() {
        0.0
    } else {
        part.as_f64() / whole.as_f64() * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn jan(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, day).unwrap()
    }

    fn january() -> ReconcilePeriod {
        ReconcilePeriod::month(2025, 0)
    }

    fn units(n: i64) -> Money {
        Money::from_units(n)
    }

    fn expense(amount: i64, category: &str, description: &str) -> Transaction {
        Transaction::expense(units(amount), category, description, jan(10))
    }

    #[test]
    fn test_scenario_basic_partition() {
        let budgets = vec![
            Budget::monthly("Food", "Food", units(5000)),
            Budget::monthly("Transport", "Transport", units(2000)),
        ];
        let transactions = vec![
            expense(1000, "Food", "Groceries"),
            expense(500, "Transport", "Bus pass"),
            expense(800, "Entertainment", "Cinema tickets"),
            Transaction::income(units(10000), "Salary", "January pay", jan(1)),
        ];

        let data = reconcile(&budgets, &transactions, january(), None);

        assert_eq!(data.period_id, "2025-01");
        assert_eq!(data.budget_total, units(7000));
        assert_eq!(data.active_budget_count, 2);
        assert_eq!(data.spent_budgeted, units(1500));
        assert_eq!(data.spent_unbudgeted, units(800));
        assert_eq!(data.total_spent, units(2300));
        assert_eq!(data.remaining, units(5500));
        assert_eq!(data.income_total, units(10000));
        assert_eq!(data.income_surplus, units(3000));
        assert!(!data.has_income_budget_gap);
        assert_eq!(data.unbudgeted_expenses.len(), 1);
        assert_eq!(data.unbudgeted_expenses[0].category, "Entertainment");
        assert!((data.remaining_percentage - 5500.0 / 7000.0 * 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_scenario_keyword_matching() {
        let budgets = vec![Budget::monthly("comida", "Comida", units(3000))];
        let transactions = vec![
            expense(500, "Dining", "Restaurant dinner"),
            expense(300, "Food", ""),
        ];

        let data = reconcile(&budgets, &transactions, january(), None);

        assert_eq!(data.spent_budgeted, units(800));
        assert_eq!(data.spent_unbudgeted, Money::zero());
        assert!(data
            .budgeted_expenses
            .iter()
            .all(|e| e.tier == MatchTier::Keyword && e.budget_name == "comida"));
    }

    #[test]
    fn test_scenario_inactive_budgets_excluded() {
        let budgets = vec![
            Budget::monthly("Food", "Food", units(2000)),
            Budget::monthly("Transport", "Transport", units(1000)).inactive(),
        ];
        let transactions = vec![expense(500, "Food", ""), expense(300, "Transport", "")];

        let data = reconcile(&budgets, &transactions, january(), None);

        assert_eq!(data.budget_total, units(2000));
        assert_eq!(data.active_budget_count, 1);
        assert_eq!(data.spent_budgeted, units(500));
        assert_eq!(data.spent_unbudgeted, units(300));
    }

    #[test]
    fn test_period_filtering() {
        let budgets = vec![Budget::monthly("Food", "Food", units(1000))];
        let transactions = vec![
            expense(100, "Food", ""),
            Transaction::expense(units(200), "Food", "", NaiveDate::from_ymd_opt(2025, 2, 1).unwrap()),
            Transaction::expense(units(400), "Food", "", NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()),
            Transaction::income(units(50), "Gift", "", NaiveDate::from_ymd_opt(2024, 12, 31).unwrap()),
        ];

        let data = reconcile(&budgets, &transactions, january(), None);
        assert_eq!(data.total_spent, units(100));
        assert_eq!(data.income_total, Money::zero());
        assert!(data.has_income_budget_gap);
    }

    #[test]
    fn test_yearly_reconciliation_uses_yearly_budgets() {
        let budgets = vec![
            Budget::monthly("Food", "Food", units(500)),
            Budget::yearly("Travel", "Travel", units(6000)),
        ];
        let transactions = vec![
            expense(100, "Food", ""),
            Transaction::expense(units(900), "Travel", "Flights", NaiveDate::from_ymd_opt(2025, 7, 3).unwrap()),
        ];

        let data = reconcile(&budgets, &transactions, ReconcilePeriod::year(2025), None);

        assert_eq!(data.period_id, "2025");
        assert_eq!(data.budget_total, units(6000));
        assert_eq!(data.spent_budgeted, units(900));
        // Food only has a monthly budget, so it is unbudgeted in the yearly view
        assert_eq!(data.spent_unbudgeted, units(100));
    }

    #[test]
    fn test_income_override() {
        let transactions = vec![Transaction::income(units(10000), "Salary", "", jan(1))];
        let data = reconcile(&[], &transactions, january(), Some(units(12000)));
        assert_eq!(data.income_total, units(12000));
    }

    #[test]
    fn test_empty_inputs() {
        let data = reconcile(&[], &[], january(), None);
        assert_eq!(data.budget_total, Money::zero());
        assert_eq!(data.remaining_percentage, 0.0);
        assert_eq!(data.total_spent, Money::zero());
        assert!(!data.has_income_budget_gap);
        assert!(data.budget_usage.is_empty());
    }

    #[test]
    fn test_budget_usage_ignores_stored_spent() {
        let mut food = Budget::monthly("Food", "Food", units(1000));
        food.spent = units(999);
        let budgets = vec![food, Budget::monthly("Transport", "Transport", units(200))];
        let transactions = vec![
            expense(250, "Food", ""),
            expense(150, "Food", ""),
            expense(300, "Transport", "Taxi"),
        ];

        let data = reconcile(&budgets, &transactions, january(), None);

        assert_eq!(data.budget_usage[0].spent, units(400));
        assert_eq!(data.budget_usage[0].remaining, units(600));
        assert!((data.budget_usage[0].used_percentage - 40.0).abs() < 1e-9);
        assert!(data.budget_usage[1].is_over_limit());
        assert_eq!(data.budget_usage[1].remaining, units(-100));
        assert!(!data.is_over_budget());
    }

    #[test]
    fn test_partition_completeness() {
        let budgets = vec![
            Budget::monthly("Food", "Food", units(900)),
            Budget::monthly("Fun", "Entertainment", units(300)).inactive(),
            Budget::monthly("Transport", "Transport", units(400)),
            Budget::yearly("Housing", "Housing", units(12000)),
        ];
        let categories = ["Food", "Entertainment", "Transport", "Housing", "Dining", "Gifts", ""];
        let descriptions = ["", "uber", "pizza night", "rent", "netflix", "misc"];

        let mut transactions = Vec::new();
        for (i, category) in categories.iter().enumerate() {
            for (j, description) in descriptions.iter().enumerate() {
                let amount = Money::from_cents((i as i64 + 1) * 1013 + j as i64 * 7);
                let day = (i + j) as u32 % 28 + 1;
                transactions.push(Transaction::expense(amount, *category, *description, jan(day)));
            }
        }
        transactions.push(Transaction::income(units(3000), "Salary", "", jan(2)));

        let data = reconcile(&budgets, &transactions, january(), None);

        let expected_total: Money = transactions
            .iter()
            .filter(|t| t.is_expense())
            .map(|t| t.amount)
            .sum();
        assert_eq!(data.spent_budgeted + data.spent_unbudgeted, expected_total);
        assert_eq!(data.total_spent, expected_total);
        assert_eq!(data.expense_count(), categories.len() * descriptions.len());

        let mut seen: Vec<_> = data
            .budgeted_expenses
            .iter()
            .map(|e| e.transaction.id)
            .chain(data.unbudgeted_expenses.iter().map(|t| t.id))
            .collect();
        seen.sort_by_key(|id| *id.as_uuid());
        seen.dedup();
        assert_eq!(seen.len(), data.expense_count());

        let usage_total: Money = data.budget_usage.iter().map(|u| u.spent).sum();
        assert_eq!(usage_total, data.spent_budgeted);
    }
}
