//! User settings for pocketplan
//!
//! Display preferences, the default allocation plan, custom plans and the
//! thresholds used by the health classifier and the suggestion service.

use serde::{Deserialize, Serialize};

use super::paths::PocketPaths;
use crate::error::PocketError;
use crate::services::allocator::{AllocationPlan, PlanRegistry};
use crate::services::health::HealthThresholds;
use crate::services::suggestions::SuggestionSettings;

/// User settings for pocketplan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol used when printing amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Plan used by `allocate` when none is given
    #[serde(default = "default_plan")]
    pub default_plan: String,

    /// Extra allocation plans on top of the built-in ones
    #[serde(default)]
    pub custom_plans: Vec<AllocationPlan>,

    #[serde(default)]
    pub health: HealthThresholds,

    #[serde(default)]
    pub suggestions: SuggestionSettings,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_plan() -> String {
    "balanced".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            default_plan: default_plan(),
            custom_plans: Vec::new(),
            health: HealthThresholds::default(),
            suggestions: SuggestionSettings::default(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &PocketPaths) -> Result<Self, PocketError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| PocketError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                PocketError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &PocketPaths) -> Result<(), PocketError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| PocketError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| PocketError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// Built-in plans plus the valid custom plans
    pub fn plan_registry(&self) -> PlanRegistry {
        PlanRegistry::with_custom(&self.custom_plans)
    }
}
