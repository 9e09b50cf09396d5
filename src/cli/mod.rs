//! CLI command handlers
//!
//! This module bridges clap argument parsing with the service layer. Every
//! handler receives a loaded `CliContext` and prints either a table view or
//! JSON.

pub mod allocate;
pub mod period;
pub mod suggest;

pub use allocate::{handle_allocate_command, handle_plans_command, AllocateArgs};
pub use period::{
    handle_dashboard_command, handle_health_command, handle_reconcile_command, DashboardArgs,
    PeriodArgs,
};
pub use suggest::{handle_suggest_command, SuggestArgs};

use std::path::PathBuf;

use chrono::NaiveDate;
use serde::Serialize;

use crate::config::Settings;
use crate::error::{PocketError, PocketResult};
use crate::models::{parse_calendar_date, Money, ReconcilePeriod};
use crate::storage::Ledger;

/// Everything a command handler needs
#[derive(Debug)]
pub struct CliContext {
    pub settings: Settings,
    pub ledger: Ledger,
    pub ledger_path: PathBuf,
    /// Print JSON instead of tables
    pub json: bool,
    /// The local calendar day the command runs on
    pub today: NaiveDate,
}

impl CliContext {
    pub fn symbol(&self) -> &str {
        &self.settings.currency_symbol
    }

    /// The requested period, or the month containing today
    pub fn period(&self, period: Option<&str>) -> PocketResult<ReconcilePeriod> {
        match period {
            Some(s) => ReconcilePeriod::parse(s).map_err(|e| {
                PocketError::Validation(format!(
                    "Invalid period '{}': {}. Use YYYY-MM or YYYY",
                    s, e
                ))
            }),
            None => Ok(ReconcilePeriod::month_of(self.today)),
        }
    }

    /// The requested day, or today
    pub fn date(&self, date: Option<&str>) -> PocketResult<NaiveDate> {
        match date {
            Some(s) => parse_date(s),
            None => Ok(self.today),
        }
    }

    /// Print a record as pretty JSON
    pub fn print_json<T: Serialize + ?Sized>(&self, value: &T) -> PocketResult<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }
}

/// Parse an amount such as "1234.56" or "$1,234.56"
pub fn parse_amount(s: &str) -> PocketResult<Money> {
    Money::parse(s).map_err(|e| {
        PocketError::Validation(format!(
            "Invalid amount '{}'. Use a format like '1234.56'. Error: {}",
            s, e
        ))
    })
}

/// Parse a calendar date, accepting the same formats as the ledger
pub fn parse_date(s: &str) -> PocketResult<NaiveDate> {
    parse_calendar_date(s)
        .ok_or_else(|| PocketError::Validation(format!("Invalid date '{}'. Use YYYY-MM-DD", s)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> CliContext {
        CliContext {
            settings: Settings::default(),
            ledger: Ledger::default(),
            ledger_path: PathBuf::from("ledger.json"),
            json: false,
            today: NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
        }
    }

    #[test]
    fn test_period_defaults_to_current_month() {
        let ctx = context();
        assert_eq!(ctx.period(None).unwrap(), ReconcilePeriod::month(2025, 2));
        assert_eq!(ctx.period(Some("2024")).unwrap(), ReconcilePeriod::year(2024));
        assert!(ctx.period(Some("2024-13")).unwrap_err().is_validation());
    }

    #[test]
    fn test_date_and_amount_parsing() {
        let ctx = context();
        assert_eq!(ctx.date(None).unwrap(), ctx.today);
        assert_eq!(
            ctx.date(Some("2025-01-31")).unwrap(),
            NaiveDate::from_ymd_opt(2025, 1, 31).unwrap()
        );
        assert!(parse_date("someday").is_err());
        assert_eq!(parse_amount("$1,000.50").unwrap(), Money::from_cents(100_050));
        assert!(parse_amount("lots").unwrap_err().is_validation());
    }
}
