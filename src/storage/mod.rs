//! Storage layer for pocketplan
//!
//! The engine never talks to storage directly. The CLI loads a `Ledger`
//! snapshot from one JSON file and hands its slices to the services; goal
//! writes go back through `JsonGoalStore`.

pub mod file_io;

pub use file_io::{read_json, read_json_required, write_json_atomic};

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::PocketResult;
use crate::models::{Account, Budget, SavingsGoal, Transaction};
use crate::services::goals::GoalStore;

/// Everything the engine reads, as stored in `ledger.json`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ledger {
    #[serde(default)]
    pub accounts: Vec<Account>,
    /// Budgets in the user's configured order
    #[serde(default)]
    pub budgets: Vec<Budget>,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub goals: Vec<SavingsGoal>,
}

impl Ledger {
    /// Load a ledger that must exist
    pub fn load(path: impl AsRef<Path>) -> PocketResult<Self> {
        let ledger: Self = read_json_required(path.as_ref())?;
        ledger.log_loaded(path.as_ref());
        Ok(ledger)
    }

    /// Load a ledger, or start empty when the file does not exist yet
    pub fn load_or_default(path: impl AsRef<Path>) -> PocketResult<Self> {
        let ledger: Self = read_json(path.as_ref())?;
        ledger.log_loaded(path.as_ref());
        Ok(ledger)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> PocketResult<()> {
        write_json_atomic(path, self)
    }

    fn log_loaded(&self, path: &Path) {
        tracing::debug!(
            path = %path.display(),
            accounts = self.accounts.len(),
            budgets = self.budgets.len(),
            transactions = self.transactions.len(),
            goals = self.goals.len(),
            "Loaded ledger"
        );
        for budget in &self.budgets {
            if let Err(e) = budget.validate() {
                tracing::warn!(budget = %budget.name, error = %e, "Budget failed validation");
            }
        }
    }
}

/// Goal store backed by the `goals` list of a ledger file
#[derive(Debug, Clone)]
pub struct JsonGoalStore {
    path: PathBuf,
}

impl JsonGoalStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl GoalStore for JsonGoalStore {
    fn load_goals(&self) -> PocketResult<Vec<SavingsGoal>> {
        Ok(Ledger::load_or_default(&self.path)?.goals)
    }

    fn save_goals(&mut self, goals: &[SavingsGoal]) -> PocketResult<()> {
        let mut ledger = Ledger::load_or_default(&self.path)?;
        ledger.goals = goals.to_vec();
        ledger.save(&self.path)
    }
}
