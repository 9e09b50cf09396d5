//! Period display formatting
//!
//! Reconciliation summaries, health assessments and the dashboard.

use tabled::Tabled;

use super::report::{format_bar, format_percentage, heading, key_values, money, table, truncate};
use crate::services::dashboard::DashboardInfo;
use crate::services::health::HealthAssessment;
use crate::services::reconciler::BudgetPeriodData;

#[derive(Tabled)]
struct UsageRow {
    #[tabled(rename = "Budget")]
    name: String,
    #[tabled(rename = "Limit")]
    limit: String,
    #[tabled(rename = "Spent")]
    spent: String,
    #[tabled(rename = "Remaining")]
    remaining: String,
    #[tabled(rename = "Used")]
    used: String,
}

#[derive(Tabled)]
struct ExpenseRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

/// Format a reconciled period with per-budget usage and unbudgeted expenses
pub fn format_reconciliation(data: &BudgetPeriodData, symbol: &str) -> String {
    let mut output = heading(&format!("Period {}", data.period_id));

    output.push_str(&key_values(&[
        ("Budgets", data.active_budget_count.to_string()),
        ("Budget total", money(data.budget_total, symbol)),
        ("Spent (budgeted)", money(data.spent_budgeted, symbol)),
        ("Spent (unbudgeted)", money(data.spent_unbudgeted, symbol)),
        ("Total spent", money(data.total_spent, symbol)),
        (
            "Remaining",
            format!(
                "{} ({})",
                money(data.remaining, symbol),
                format_percentage(data.remaining_percentage)
            ),
        ),
        ("Income", money(data.income_total, symbol)),
        ("Income surplus", money(data.income_surplus, symbol)),
    ]));

    if data.has_income_budget_gap {
        output.push_str("\n  Warning: budgets exceed income for this period\n");
    }

    if !data.budget_usage.is_empty() {
        output.push('\n');
        output.push_str(&table(data.budget_usage.iter().map(|u| UsageRow {
            name: truncate(&u.name, 24),
            limit: money(u.limit, symbol),
            spent: money(u.spent, symbol),
            remaining: money(u.remaining, symbol),
            used: format!(
                "{} {}",
                format_bar(u.used_percentage, 100.0, 10),
                format_percentage(u.used_percentage)
            ),
        })));
        output.push('\n');
    }

    if !data.unbudgeted_expenses.is_empty() {
        output.push_str(&format!(
            "\nUnbudgeted expenses ({})\n",
            data.unbudgeted_expenses.len()
        ));
        output.push_str(&table(data.unbudgeted_expenses.iter().map(|t| ExpenseRow {
            date: t.date.to_string(),
            category: truncate(&t.category, 20),
            description: truncate(&t.description, 32),
            amount: money(t.amount, symbol),
        })));
        output.push('\n');
    }

    output
}

/// Format a health assessment for a period
pub fn format_health(assessment: &HealthAssessment, data: &BudgetPeriodData, symbol: &str) -> String {
    let mut output = heading(&format!("Financial health {}", data.period_id));
    output.push_str(&key_values(&[
        ("Status", assessment.status.to_string()),
        ("Coverage ratio", format!("{:.2}", assessment.coverage_ratio)),
        ("Income", money(data.income_total, symbol)),
        ("Budget total", money(data.budget_total, symbol)),
    ]));
    output
}

/// Format the dashboard summary and the projection breakdown
pub fn format_dashboard(info: &DashboardInfo, symbol: &str) -> String {
    let mut output = heading(&format!("Dashboard {}", info.period_id));

    output.push_str(&key_values(&[
        ("Available cash", money(info.available_cash, symbol)),
        ("Monthly balance", money(info.monthly_balance, symbol)),
        (
            "Budget status",
            format!(
                "{} {}",
                info.budget_status.kind.as_str(),
                money(info.budget_status.amount, symbol)
            ),
        ),
        ("Monthly surplus", money(info.monthly_surplus, symbol)),
        ("Transactions", info.stats.transaction_count().to_string()),
    ]));

    output.push_str("\nEnd of month projection\n");
    let rows: Vec<(&str, String)> = info
        .projection_breakdown
        .iter()
        .map(|row| (row.line.label(), money(row.amount, symbol)))
        .collect();
    output.push_str(&key_values(&rows));

    output
}
