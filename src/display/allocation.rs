//! Allocation and plan display formatting

use tabled::Tabled;

use super::report::{heading, key_values, money, table};
use crate::services::allocator::{AllocationPlan, PlanAllocation, PlanRegistry};
use crate::services::goals::GoalUpdate;
use crate::services::suggestions::BudgetSuggestion;

#[derive(Tabled)]
struct PlanRow {
    #[tabled(rename = "Id")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Savings")]
    savings: String,
    #[tabled(rename = "Goals")]
    goals: String,
    #[tabled(rename = "Personal")]
    personal: String,
}

#[derive(Tabled)]
struct SuggestionRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Kind")]
    kind: String,
    #[tabled(rename = "Budget")]
    name: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

fn share(value: f64) -> String {
    format!("{:.0}%", value * 100.0)
}

/// Format the available allocation plans, marking the default
pub fn format_plan_list(registry: &PlanRegistry, default_plan: &str) -> String {
    table(registry.iter().map(|plan| PlanRow {
        id: if plan.id.eq_ignore_ascii_case(default_plan) {
            format!("{} *", plan.id)
        } else {
            plan.id.clone()
        },
        name: plan.name.clone(),
        savings: share(plan.savings),
        goals: share(plan.goals),
        personal: share(plan.personal),
    }))
}

/// Format an allocation, with the goal contributions when it was applied
pub fn format_allocation(
    allocation: &PlanAllocation,
    plan: &AllocationPlan,
    update: Option<&GoalUpdate>,
    symbol: &str,
) -> String {
    let mut output = heading(&format!("Allocation ({})", plan.name));

    if allocation.is_empty() {
        output.push_str("  Nothing to allocate: no surplus this period.\n");
        return output;
    }

    output.push_str(&key_values(&[
        ("Available", money(allocation.available, symbol)),
        (
            "Savings",
            format!("{} ({})", money(allocation.savings, symbol), share(plan.savings)),
        ),
        (
            "Goals",
            format!("{} ({})", money(allocation.goals, symbol), share(plan.goals)),
        ),
        (
            "Personal",
            format!("{} ({})", money(allocation.personal, symbol), share(plan.personal)),
        ),
    ]));

    if let Some(update) = update {
        output.push_str("\nApplied to goals\n");
        let lines: Vec<(&str, String)> = update
            .contributions
            .iter()
            .map(|c| (c.goal_name.as_str(), format!("+{}", money(c.amount, symbol))))
            .collect();
        output.push_str(&key_values(&lines));
        if update.unassigned.is_positive() {
            output.push_str(&format!(
                "  {} of the goals share had no goal to go to\n",
                money(update.unassigned, symbol)
            ));
        }
    }

    output
}

/// Format budget suggestions as a numbered table followed by their messages
pub fn format_suggestions(suggestions: &[BudgetSuggestion], symbol: &str) -> String {
    if suggestions.is_empty() {
        return "No suggestions. Budgets match recent spending.\n".to_string();
    }

    let mut output = table(suggestions.iter().enumerate().map(|(i, s)| SuggestionRow {
        index: i + 1,
        kind: s.kind.as_str().to_string(),
        name: s.name.clone(),
        amount: money(s.suggested_amount, symbol),
    }));
    output.push('\n');
    for (i, s) in suggestions.iter().enumerate() {
        output.push_str(&format!("{}. {}\n", i + 1, s.message));
    }
    output
}
