//! Budget suggestions
//!
//! Looks at a trailing window of monthly expense history and proposes limit
//! changes for existing budgets and new budgets for material categories that
//! nothing covers. Per-budget checks run first, then the uncovered categories;
//! the output keeps that discovery order and is capped.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::matcher::BudgetMatcher;
use crate::models::{Budget, BudgetId, Money, PeriodType, ReconcilePeriod, Transaction};

/// Thresholds driving suggestion generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuggestionSettings {
    /// Number of calendar months in the history window, current month included
    pub window_months: usize,
    /// Window total an uncovered category must exceed to get a budget
    pub materiality: Money,
    /// Every suggested amount is rounded up to a multiple of this
    pub rounding_step: Money,
    pub max_suggestions: usize,
    /// Spend at or below this share of the limit leaves room to reduce it
    pub reduce_ratio: f64,
    /// Average spend at or above this share of the limit calls for more room
    pub increase_ratio: f64,
    /// Factor applied to the average when proposing a new limit
    pub headroom: f64,
}

impl Default for SuggestionSettings {
    fn default() -> Self {
        Self {
            window_months: 3,
            materiality: Money::from_units(1000),
            rounding_step: Money::from_units(100),
            max_suggestions: 5,
            reduce_ratio: 0.85,
            increase_ratio: 0.95,
            headroom: 1.10,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionKind {
    IncreaseLimit,
    ReduceLimit,
    ReallocateLeftover,
    CreateBudget,
}

impl SuggestionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::IncreaseLimit => "increase_limit",
            Self::ReduceLimit => "reduce_limit",
            Self::ReallocateLeftover => "reallocate_leftover",
            Self::CreateBudget => "create_budget",
        }
    }
}

/// One proposed change
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetSuggestion {
    pub kind: SuggestionKind,
    /// The budget concerned, `None` for `CreateBudget`
    pub budget_id: Option<BudgetId>,
    /// Budget name, or the category for `CreateBudget`
    pub name: String,
    pub category: String,
    pub current_limit: Option<Money>,
    /// Proposed limit, or the leftover to reallocate
    pub suggested_amount: Money,
    pub average_spend: Money,
    pub message: String,
}

/// Generates budget suggestions from expense history
#[derive(Debug, Clone, Default)]
pub struct SuggestionService {
    settings: SuggestionSettings,
    matcher: BudgetMatcher,
}

impl SuggestionService {
    pub fn new(settings: SuggestionSettings) -> Self {
        Self {
            settings,
            matcher: BudgetMatcher::new(),
        }
    }

    pub fn with_matcher(mut self, matcher: BudgetMatcher) -> Self {
        self.matcher = matcher;
        self
    }

    pub fn settings(&self) -> &SuggestionSettings {
        &self.settings
    }

    /// Suggestions for the window ending with the month of `today`
    pub fn suggest(
        &self,
        budgets: &[Budget],
        transactions: &[Transaction],
        today: NaiveDate,
    ) -> Vec<BudgetSuggestion> {
        let window_len = self.settings.window_months.max(1);
        let window = ReconcilePeriod::trailing_months(today, window_len);
        let current_index = window.len() - 1;

        let active: Vec<&Budget> = budgets
            .iter()
            .filter(|b| b.participates_in(PeriodType::Monthly))
            .collect();

        // spend[budget][month]
        let mut spend = vec![vec![Money::zero(); window.len()]; active.len()];
        // (category, window total) for expenses no budget covers, first-seen order
        let mut uncovered: Vec<(String, Money)> = Vec::new();

        for expense in transactions.iter().filter(|t| t.is_expense()) {
            let Some(month) = window.iter().position(|p| p.contains(expense.date)) else {
                continue;
            };
            match self.matcher.match_expense(expense, &active) {
                Some(hit) => {
                    if let Some(idx) = active.iter().position(|b| std::ptr::eq(*b, hit.budget)) {
                        spend[idx][month] += expense.amount;
                    }
                }
                // Covered by a budget of another period type
                None if self.matcher.match_expense(expense, budgets).is_some() => {}
                None => {
                    let category = expense.category.trim();
                    if category.is_empty() {
                        continue;
                    }
                    let key = category.to_lowercase();
                    match uncovered
                        .iter_mut()
                        .find(|(c, _)| c.to_lowercase() == key)
                    {
                        Some((_, total)) => *total += expense.amount,
                        None => uncovered.push((category.to_string(), expense.amount)),
                    }
                }
            }
        }

        let mut suggestions = Vec::new();

        for (budget, months) in active.iter().zip(&spend) {
            let total: Money = months.iter().sum();
            let average = total.scale(1.0 / window_len as f64);
            if let Some(s) = self.budget_suggestion(budget, months, months[current_index], average) {
                suggestions.push(s);
            }
        }

        for (category, total) in uncovered {
            if total <= self.settings.materiality {
                continue;
            }
            let average = total.scale(1.0 / window_len as f64);
            let amount = self.round(average);
            suggestions.push(BudgetSuggestion {
                kind: SuggestionKind::CreateBudget,
                budget_id: None,
                name: category.clone(),
                message: format!(
                    "{} has no budget; {} spent over {} months. Create one of {}",
                    category, total, window_len, amount
                ),
                category,
                current_limit: None,
                suggested_amount: amount,
                average_spend: average,
            });
        }

        suggestions.truncate(self.settings.max_suggestions);

        tracing::debug!(
            today = %today,
            count = suggestions.len(),
            "Generated budget suggestions"
        );

        suggestions
    }

    fn budget_suggestion(
        &self,
        budget: &Budget,
        months: &[Money],
        current: Money,
        average: Money,
    ) -> Option<BudgetSuggestion> {
        let limit = budget.limit;
        if !limit.is_positive() {
            return None;
        }
        let share = |amount: Money| amount.as_f64() / limit.as_f64();
        let build = |kind, suggested_amount, message| BudgetSuggestion {
            kind,
            budget_id: Some(budget.id),
            name: budget.name.clone(),
            category: budget.category.clone(),
            current_limit: Some(limit),
            suggested_amount,
            average_spend: average,
            message,
        };

        if share(average) >= self.settings.increase_ratio {
            let amount = self.round(average.scale(self.settings.headroom));
            return Some(build(
                SuggestionKind::IncreaseLimit,
                amount,
                format!(
                    "{} averages {} against a limit of {}. Raise it to {}",
                    budget.name, average, limit, amount
                ),
            ));
        }

        let comfortably_under = average.is_positive()
            && share(average) <= self.settings.reduce_ratio
            && months.iter().all(|m| share(*m) <= self.settings.reduce_ratio);
        if comfortably_under {
            let amount = self.round(average.scale(self.settings.headroom));
            if amount < limit {
                return Some(build(
                    SuggestionKind::ReduceLimit,
                    amount,
                    format!(
                        "{} consistently stays under its limit of {}. Lower it to {}",
                        budget.name, limit, amount
                    ),
                ));
            }
        }

        if current.is_positive() && share(current) < self.settings.reduce_ratio {
            let amount = self.round(limit - current);
            return Some(build(
                SuggestionKind::ReallocateLeftover,
                amount,
                format!(
                    "{} has {} left this month that could go elsewhere",
                    budget.name, amount
                ),
            ));
        }

        None
    }

    fn round(&self, amount: Money) -> Money {
        amount.round_up_to(self.settings.rounding_step)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn units(n: i64) -> Money {
        Money::from_units(n)
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 20).unwrap()
    }

    fn month_day(month_offset: i32) -> NaiveDate {
        // 0 = January 2025, -1 = December 2024, ...
        match month_offset {
            0 => NaiveDate::from_ymd_opt(2025, 1, 10).unwrap(),
            -1 => NaiveDate::from_ymd_opt(2024, 12, 10).unwrap(),
            -2 => NaiveDate::from_ymd_opt(2024, 11, 10).unwrap(),
            _ => NaiveDate::from_ymd_opt(2024, 10, 10).unwrap(),
        }
    }

    fn history(category: &str, amounts: [i64; 3]) -> Vec<Transaction> {
        amounts
            .iter()
            .zip([-2, -1, 0])
            .filter(|(amount, _)| **amount > 0)
            .map(|(amount, offset)| {
                Transaction::expense(units(*amount), category, "", month_day(offset))
            })
            .collect()
    }

    fn suggest(budgets: &[Budget], transactions: &[Transaction]) -> Vec<BudgetSuggestion> {
        SuggestionService::default().suggest(budgets, transactions, today())
    }

    #[test]
    fn test_increase_limit() {
        let budgets = vec![Budget::monthly("Food", "Food", units(1000))];
        let result = suggest(&budgets, &history("Food", [1000, 1000, 1000]));

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].kind, SuggestionKind::IncreaseLimit);
        assert_eq!(result[0].average_spend, units(1000));
        assert_eq!(result[0].suggested_amount, units(1100));
        assert_eq!(result[0].budget_id, Some(budgets[0].id));
    }

    #[test]
    fn test_reduce_limit() {
        let budgets = vec![Budget::monthly("Food", "Food", units(1000))];
        let result = suggest(&budgets, &history("Food", [500, 500, 500]));

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].kind, SuggestionKind::ReduceLimit);
        // 550 rounded up to the next hundred
        assert_eq!(result[0].suggested_amount, units(600));
    }

    #[test]
    fn test_leftover_when_one_month_ran_high() {
        let budgets = vec![Budget::monthly("Food", "Food", units(1000))];
        let result = suggest(&budgets, &history("Food", [900, 900, 300]));

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].kind, SuggestionKind::ReallocateLeftover);
        assert_eq!(result[0].suggested_amount, units(700));
    }

    #[test]
    fn test_no_suggestion_without_spend() {
        let budgets = vec![Budget::monthly("Food", "Food", units(1000))];
        assert!(suggest(&budgets, &[]).is_empty());
    }

    #[test]
    fn test_create_budget_for_material_category() {
        let budgets = vec![Budget::monthly("Food", "Food", units(1000))];
        let mut transactions = history("Gifts", [600, 400, 500]);
        transactions.extend(history("Pets", [400, 300, 300]));

        let result = suggest(&budgets, &transactions);

        // Pets totals exactly 1000, which does not exceed the threshold
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].kind, SuggestionKind::CreateBudget);
        assert_eq!(result[0].category, "Gifts");
        assert_eq!(result[0].suggested_amount, units(500));
        assert!(result[0].budget_id.is_none());
    }

    #[test]
    fn test_expenses_outside_window_are_ignored() {
        let budgets = vec![Budget::monthly("Food", "Food", units(1000))];
        let transactions = vec![Transaction::expense(units(5000), "Gifts", "", month_day(-3))];
        assert!(suggest(&budgets, &transactions).is_empty());
    }

    #[test]
    fn test_inactive_budgets_do_not_cover_categories() {
        let budgets = vec![Budget::monthly("Travel", "Travel", units(500)).inactive()];
        let result = suggest(&budgets, &history("Travel", [800, 800, 800]));

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].kind, SuggestionKind::CreateBudget);
        assert_eq!(result[0].suggested_amount, units(800));
    }

    #[test]
    fn test_budget_checks_come_first_and_output_is_capped() {
        let names = ["Food", "Transport", "Health", "Housing", "Utilities", "Education"];
        let budgets: Vec<Budget> = names
            .iter()
            .map(|n| Budget::monthly(*n, *n, units(100)))
            .collect();
        let mut transactions = history("Gifts", [2000, 2000, 2000]);
        for name in names {
            transactions.extend(history(name, [200, 200, 200]));
        }

        let result = suggest(&budgets, &transactions);

        assert_eq!(result.len(), 5);
        assert!(result.iter().all(|s| s.kind == SuggestionKind::IncreaseLimit));
        let order: Vec<_> = result.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(order, &names[..5]);
    }

    #[test]
    fn test_custom_settings() {
        let settings = SuggestionSettings {
            materiality: units(100),
            rounding_step: units(10),
            ..SuggestionSettings::default()
        };
        let transactions = history("Gifts", [50, 50, 50]);
        let result = SuggestionService::new(settings).suggest(&[], &transactions, today());

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].suggested_amount, units(50));
    }

    #[test]
    fn test_yearly_budget_covers_its_category() {
        let budgets = vec![Budget::yearly("Travel", "Travel", units(20000))];
        let result = suggest(&budgets, &history("Travel", [800, 800, 800]));

        assert!(result.is_empty());
    }

    #[test]
    fn test_uncovered_categories_group_case_insensitively() {
        let settings = SuggestionSettings {
            materiality: units(100),
            ..SuggestionSettings::default()
        };
        let mut transactions = history("ALIMENTACIÓN", [60, 0, 0]);
        transactions.extend(history("Alimentación", [0, 60, 0]));
        let result = SuggestionService::new(settings).suggest(&[], &transactions, today());

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].kind, SuggestionKind::CreateBudget);
        assert_eq!(result[0].category, "ALIMENTACIÓN");
        assert_eq!(result[0].average_spend, units(40));
    }
}
