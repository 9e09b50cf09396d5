//! Display formatting for terminal output
//!
//! Human-readable renderings of the engine's records. `--json` output
//! bypasses this module and serializes the records directly.

pub mod allocation;
pub mod period;
pub mod report;

pub use allocation::{format_allocation, format_plan_list, format_suggestions};
pub use period::{format_dashboard, format_health, format_reconciliation};
