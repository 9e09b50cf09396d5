//! Period CLI commands
//!
//! `reconcile`, `health` and `dashboard` all start from the same reconciled
//! period.

use clap::Args;
use serde_json::json;

use super::{parse_amount, CliContext};
use crate::display::{format_dashboard, format_health, format_reconciliation};
use crate::error::PocketResult;
use crate::models::ReconcilePeriod;
use crate::services::dashboard::{aggregate, TransactionStats};
use crate::services::health::classify_with;
use crate::services::reconciler::{reconcile, BudgetPeriodData};
use crate::services::recurring::pending_recurring_amount;

/// Period selection shared by the period commands
#[derive(Args, Debug, Clone, Default)]
pub struct PeriodArgs {
    /// Period to reconcile (YYYY-MM or YYYY), defaults to the current month
    #[arg(short, long)]
    pub period: Option<String>,

    /// Use this income figure instead of the period's income transactions
    #[arg(short, long)]
    pub income: Option<String>,
}

impl PeriodArgs {
    pub(crate) fn reconcile(&self, ctx: &CliContext) -> PocketResult<BudgetPeriodData> {
        let period = ctx.period(self.period.as_deref())?;
        let income = self.income.as_deref().map(parse_amount).transpose()?;
        Ok(reconcile(
            &ctx.ledger.budgets,
            &ctx.ledger.transactions,
            period,
            income,
        ))
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct DashboardArgs {
    #[command(flatten)]
    pub period: PeriodArgs,

    /// Day to project from (YYYY-MM-DD), defaults to today
    #[arg(short, long)]
    pub today: Option<String>,
}

/// Handle `reconcile`
pub fn handle_reconcile_command(ctx: &CliContext, args: PeriodArgs) -> PocketResult<()> {
    let data = args.reconcile(ctx)?;

    if ctx.json {
        return ctx.print_json(&data);
    }
    print!("{}", format_reconciliation(&data, ctx.symbol()));
    Ok(())
}

/// Handle `health`
pub fn handle_health_command(ctx: &CliContext, args: PeriodArgs) -> PocketResult<()> {
    let data = args.reconcile(ctx)?;
    let assessment = classify_with(&data, &ctx.settings.health);

    if ctx.json {
        return ctx.print_json(&json!({
            "periodId": data.period_id,
            "status": assessment.status,
            "coverageRatio": assessment.coverage_ratio,
            "incomeTotal": data.income_total,
            "budgetTotal": data.budget_total,
        }));
    }
    print!("{}", format_health(&assessment, &data, ctx.symbol()));
    Ok(())
}

/// Handle `dashboard`
pub fn handle_dashboard_command(ctx: &CliContext, args: DashboardArgs) -> PocketResult<()> {
    let today = ctx.date(args.today.as_deref())?;
    let period = match args.period.period.as_deref() {
        Some(p) => ctx.period(Some(p))?,
        None => ReconcilePeriod::month_of(today),
    };
    let income = args.period.income.as_deref().map(parse_amount).transpose()?;

    let transactions = &ctx.ledger.transactions;
    let data = reconcile(&ctx.ledger.budgets, transactions, period, income);
    let stats = TransactionStats::from_transactions(transactions, period);
    let pending = pending_recurring_amount(transactions, today);
    let info = aggregate(&stats, &data, &ctx.ledger.accounts, pending);

    if ctx.json {
        return ctx.print_json(&info);
    }
    print!("{}", format_dashboard(&info, ctx.symbol()));
    Ok(())
}
