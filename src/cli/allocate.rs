//! Allocation CLI commands

use clap::Args;
use serde_json::json;

use super::{parse_amount, CliContext};
use crate::display::{format_allocation, format_plan_list};
use crate::error::{PocketError, PocketResult};
use crate::services::allocator::allocate;
use crate::services::goals::{commit_goal_update, plan_goal_update};
use crate::services::reconciler::reconcile;
use crate::storage::JsonGoalStore;

#[derive(Args, Debug, Clone, Default)]
pub struct AllocateArgs {
    /// Amount to split; defaults to the period's income surplus
    pub amount: Option<String>,

    /// Allocation plan id, defaults to the configured plan
    #[arg(long)]
    pub plan: Option<String>,

    /// Period whose surplus is allocated (YYYY-MM or YYYY)
    #[arg(short, long)]
    pub period: Option<String>,

    /// Credit the savings and goals buckets to the ledger's goals
    #[arg(long)]
    pub apply: bool,
}

/// Handle `allocate`
pub fn handle_allocate_command(ctx: &CliContext, args: AllocateArgs) -> PocketResult<()> {
    let registry = ctx.settings.plan_registry();
    let plan_id = args.plan.as_deref().unwrap_or(&ctx.settings.default_plan);
    let plan = registry
        .get(plan_id)
        .ok_or_else(|| PocketError::plan_not_found(plan_id))?;

    let available = match args.amount.as_deref() {
        Some(amount) => parse_amount(amount)?,
        None => {
            let period = ctx.period(args.period.as_deref())?;
            reconcile(&ctx.ledger.budgets, &ctx.ledger.transactions, period, None).surplus()
        }
    };

    let allocation = allocate(available, plan);

    let update = if args.apply && !allocation.is_empty() {
        let update = plan_goal_update(&ctx.ledger.goals, &allocation);
        let mut store = JsonGoalStore::new(&ctx.ledger_path);
        commit_goal_update(&mut store, update.clone()).map_err(|e| {
            let state = if e.rolled_back {
                "goals were restored"
            } else {
                "goals could not be restored"
            };
            PocketError::Storage(format!("{} ({})", e, state))
        })?;
        tracing::info!(plan = %plan.id, available = %available, "Applied allocation to goals");
        Some(update)
    } else {
        None
    };

    if ctx.json {
        return ctx.print_json(&json!({
            "plan": plan,
            "allocation": allocation,
            "goalUpdate": update,
        }));
    }
    print!(
        "{}",
        format_allocation(&allocation, plan, update.as_ref(), ctx.symbol())
    );
    Ok(())
}

/// Handle `plans`
pub fn handle_plans_command(ctx: &CliContext) -> PocketResult<()> {
    let registry = ctx.settings.plan_registry();

    if ctx.json {
        let plans: Vec<_> = registry.iter().collect();
        return ctx.print_json(&plans);
    }
    println!("{}", format_plan_list(&registry, &ctx.settings.default_plan));
    Ok(())
}
