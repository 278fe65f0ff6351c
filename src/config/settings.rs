//! User settings for the cashflow report tool
//!
//! Currency rendering, category direction rules and import preferences.
//! Settings are handed to the engine explicitly; nothing reads them from
//! global state.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::paths::ReportPaths;
use crate::display::{FormatOptions, NegativeStyle};
use crate::error::CashflowError;
use crate::models::{Direction, UNKNOWN_TRANSFER};
use crate::reports::CategoryRules;

/// User settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol placed before every amount
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// How a negative net flow is rendered
    #[serde(default)]
    pub negative_style: NegativeStyle,

    /// Maximum rows printed per section (None = all)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row_limit: Option<usize>,

    /// strftime format of dates in imported CSV files
    #[serde(default = "default_date_format")]
    pub input_date_format: String,

    /// Direction for records that only carry a category
    #[serde(default = "default_category_directions")]
    pub category_directions: BTreeMap<String, Direction>,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

fn default_category_directions() -> BTreeMap<String, Direction> {
    BTreeMap::from([(UNKNOWN_TRANSFER.to_string(), Direction::Outflow)])
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            negative_style: NegativeStyle::default(),
            row_limit: None,
            input_date_format: default_date_format(),
            category_directions: default_category_directions(),
        }
    }
}

impl Settings {
    /// Formatter options derived from these settings
    pub fn format_options(&self) -> FormatOptions {
        FormatOptions {
            currency_symbol: self.currency_symbol.clone(),
            negative_style: self.negative_style,
            row_limit: self.row_limit,
        }
    }

    /// Classifier rules derived from these settings
    pub fn category_rules(&self) -> CategoryRules {
        self.category_directions.iter().collect()
    }

    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &ReportPaths) -> Result<Self, CashflowError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| CashflowError::Io(format!("Failed to read settings file: {}", e)))?;

        serde_json::from_str(&contents)
            .map_err(|e| CashflowError::Config(format!("Failed to parse settings file: {}", e)))
    }

    /// Save settings to disk
    pub fn save(&self, paths: &ReportPaths) -> Result<(), CashflowError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| CashflowError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| CashflowError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}
