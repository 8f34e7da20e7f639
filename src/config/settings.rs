//! User settings for spendtrack
//!
//! Tunables for the reporting engine, stored as a YAML file. Defaults
//! match the thresholds the dashboards were built around: 90% near-limit
//! warning, a six-month trend window, dollar amounts.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{TrackerError, TrackerResult};

fn default_near_limit_percent() -> u8 {
    90
}

fn default_trend_months() -> usize {
    6
}

fn default_currency() -> String {
    "$".to_string()
}

/// User settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Percentage of a budget ceiling at which a near-limit alert fires
    #[serde(default = "default_near_limit_percent")]
    pub near_limit_percent: u8,

    /// How many months the monthly trend window covers
    #[serde(default = "default_trend_months")]
    pub trend_months: usize,

    /// Currency symbol for formatted amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            near_limit_percent: default_near_limit_percent(),
            trend_months: default_trend_months(),
            currency_symbol: default_currency(),
        }
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn load(path: &Path) -> TrackerResult<Self> {
        let contents = fs::read_to_string(path)?;
        let settings: Settings = serde_yaml::from_str(&contents)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings, writing defaults to the path if no file exists yet
    pub fn load_or_create(path: &Path) -> TrackerResult<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            let settings = Self::default();
            settings.save(path)?;
            Ok(settings)
        }
    }

    /// Save settings to a YAML file
    pub fn save(&self, path: &Path) -> TrackerResult<()> {
        self.validate()?;
        let contents = serde_yaml::to_string(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Validate setting values
    pub fn validate(&self) -> TrackerResult<()> {
        if self.near_limit_percent == 0 || self.near_limit_percent > 100 {
            return Err(TrackerError::Config(format!(
                "near_limit_percent must be within 1-100, got {}",
                self.near_limit_percent
            )));
        }

        if self.trend_months == 0 {
            return Err(TrackerError::Config(
                "trend_months must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}
