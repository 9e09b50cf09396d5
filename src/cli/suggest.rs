//! Suggestion CLI command

use clap::Args;

use super::CliContext;
use crate::display::format_suggestions;
use crate::error::PocketResult;
use crate::services::suggestions::SuggestionService;

#[derive(Args, Debug, Clone, Default)]
pub struct SuggestArgs {
    /// Day the history window ends on (YYYY-MM-DD), defaults to today
    #[arg(short, long)]
    pub today: Option<String>,
}

/// Handle `suggest`
pub fn handle_suggest_command(ctx: &CliContext, args: SuggestArgs) -> PocketResult<()> {
    let today = ctx.date(args.today.as_deref())?;
    let service = SuggestionService::new(ctx.settings.suggestions.clone());
    let suggestions = service.suggest(&ctx.ledger.budgets, &ctx.ledger.transactions, today);

    if ctx.json {
        return ctx.print_json(&suggestions);
    }
    print!("{}", format_suggestions(&suggestions, ctx.symbol()));
    Ok(())
}
