use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use pocketplan::cli::{
    handle_allocate_command, handle_dashboard_command, handle_health_command,
    handle_plans_command, handle_reconcile_command, handle_suggest_command, AllocateArgs,
    CliContext, DashboardArgs, PeriodArgs, SuggestArgs,
};
use pocketplan::config::{PocketPaths, Settings};
use pocketplan::storage::Ledger;

#[derive(Parser)]
#[command(
    name = "pocketplan",
    version,
    about = "Budget reconciliation and surplus allocation",
    long_about = "pocketplan matches expenses to budgets, reconciles a month or year \
                  against income, classifies financial health and splits any surplus \
                  into savings, goals and personal spending."
)]
struct Cli {
    /// Ledger file (JSON); defaults to ledger.json in the data directory
    #[arg(long, global = true, env = "POCKETPLAN_LEDGER")]
    ledger: Option<PathBuf>,

    /// Print JSON instead of tables
    #[arg(long, global = true)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Reconcile budgets, expenses and income for a period
    Reconcile(PeriodArgs),

    /// Classify financial health for a period
    Health(PeriodArgs),

    /// Show the dashboard summary with the end-of-month projection
    Dashboard(DashboardArgs),

    /// Split a surplus into savings, goals and personal buckets
    Allocate(AllocateArgs),

    /// List allocation plans
    Plans,

    /// Suggest budget changes from recent spending
    Suggest(SuggestArgs),

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Priority: RUST_LOG env var > --verbose flag > default (warn)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();

    let paths = PocketPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    if let Commands::Config = cli.command {
        return show_config(&paths, &settings, cli.ledger.as_ref(), cli.json);
    }

    let (ledger, ledger_path) = match cli.ledger {
        Some(path) => (
            Ledger::load(&path).with_context(|| format!("loading {}", path.display()))?,
            path,
        ),
        None => {
            let path = paths.ledger_file();
            (Ledger::load_or_default(&path)?, path)
        }
    };

    let ctx = CliContext {
        settings,
        ledger,
        ledger_path,
        json: cli.json,
        today: chrono::Local::now().date_naive(),
    };

    match cli.command {
        Commands::Reconcile(args) => handle_reconcile_command(&ctx, args)?,
        Commands::Health(args) => handle_health_command(&ctx, args)?,
        Commands::Dashboard(args) => handle_dashboard_command(&ctx, args)?,
        Commands::Allocate(args) => handle_allocate_command(&ctx, args)?,
        Commands::Plans => handle_plans_command(&ctx)?,
        Commands::Suggest(args) => handle_suggest_command(&ctx, args)?,
        Commands::Config => {}
    }

    Ok(())
}

fn show_config(
    paths: &PocketPaths,
    settings: &Settings,
    ledger: Option<&PathBuf>,
    json: bool,
) -> Result<()> {
    let ledger = ledger.cloned().unwrap_or_else(|| paths.ledger_file());

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "baseDir": paths.base_dir(),
                "settingsFile": paths.settings_file(),
                "ledgerFile": ledger,
                "settings": settings,
            }))?
        );
        return Ok(());
    }

    println!("pocketplan Configuration");
    println!("========================");
    println!();
    println!("Paths:");
    println!("  Base directory: {}", paths.base_dir().display());
    println!("  Settings file:  {}", paths.settings_file().display());
    println!("  Ledger file:    {}", ledger.display());
    println!();
    println!("Settings:");
    println!("  Currency symbol: {}", settings.currency_symbol);
    println!("  Default plan:    {}", settings.default_plan);
    println!("  Custom plans:    {}", settings.custom_plans.len());
    println!(
        "  Balanced window: {}",
        settings
            .health
            .balanced_epsilon
            .format_with_symbol(&settings.currency_symbol)
    );

    Ok(())
}
