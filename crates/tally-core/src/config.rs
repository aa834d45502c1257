//! Settings loaded from TOML
//!
//! Resolution order:
//! 1. An explicit path, when given (it must exist)
//! 2. The user override at `<data_local_dir>/tally/config/tally.toml`
//! 3. The defaults embedded in the binary
//!
//! Keys missing from a file keep their default value.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::DEFAULT_MONTHLY_BUDGET;

const DEFAULT_CONFIG: &str = include_str!("../../../config/tally.toml");

#[derive(Debug, Clone, PartialEq)]
pub struct BudgetSettings {
    /// Budget used when none has been stored
    pub default_monthly_budget: f64,
    pub currency_symbol: String,
}

impl Default for BudgetSettings {
    fn default() -> Self {
        Self {
            default_monthly_budget: DEFAULT_MONTHLY_BUDGET,
            currency_symbol: "₹".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AdviceSettings {
    pub model: String,
    pub temperature: f32,
    pub top_p: f32,
    pub timeout: Duration,
}

impl Default for AdviceSettings {
    fn default() -> Self {
        Self {
            model: "llama3.2".to_string(),
            temperature: 0.7,
            top_p: 0.95,
            timeout: Duration::from_secs(60),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Settings {
    pub budget: BudgetSettings,
    pub advice: AdviceSettings,
}

impl Settings {
    /// Load from the user override location, else the embedded defaults
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load with an explicit override path
    ///
    /// An explicit path must exist. Without one, a missing user override
    /// falls through to the embedded defaults.
    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        let candidate = match path {
            Some(p) if !p.exists() => {
                return Err(Error::Config(format!("Settings file not found: {}", p.display())));
            }
            Some(p) => Some(p.to_path_buf()),
            None => default_config_path().filter(|p| p.exists()),
        };

        match candidate {
            Some(p) => {
                debug!(path = %p.display(), "Loading settings");
                let content = fs::read_to_string(&p).map_err(|e| {
                    Error::Config(format!("Failed to read {}: {}", p.display(), e))
                })?;
                parse_settings(&content)
            }
            None => parse_settings(DEFAULT_CONFIG),
        }
    }

    /// Embedded defaults only
    pub fn embedded() -> Result<Self> {
        parse_settings(DEFAULT_CONFIG)
    }

    /// Format an amount with the configured currency symbol
    pub fn money(&self, amount: f64) -> String {
        let sign = if amount < 0.0 { "-" } else { "" };
        format!("{}{}{:.2}", sign, self.budget.currency_symbol, amount.abs())
    }
}

/// Default override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("tally").join("config").join("tally.toml"))
}

#[derive(Debug, Deserialize)]
struct RawSettings {
    budget: Option<RawBudget>,
    advice: Option<RawAdvice>,
}

#[derive(Debug, Deserialize)]
struct RawBudget {
    default_monthly_budget: Option<f64>,
    currency_symbol: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawAdvice {
    model: Option<String>,
    temperature: Option<f32>,
    top_p: Option<f32>,
    timeout_secs: Option<u64>,
}

fn parse_settings(content: &str) -> Result<Settings> {
    let raw: RawSettings = toml::from_str(content)?;
    let mut settings = Settings::default();

    if let Some(budget) = raw.budget {
        if let Some(amount) = budget.default_monthly_budget {
            if !amount.is_finite() || amount < 0.0 {
                return Err(Error::Config(format!(
                    "default_monthly_budget must be a non-negative number, got {}",
                    amount
                )));
            }
            settings.budget.default_monthly_budget = amount;
        }
        if let Some(symbol) = budget.currency_symbol {
            settings.budget.currency_symbol = symbol;
        }
    }

    if let Some(advice) = raw.advice {
        if let Some(model) = advice.model {
            settings.advice.model = model;
        }
        if let Some(temperature) = advice.temperature {
            settings.advice.temperature = temperature;
        }
        if let Some(top_p) = advice.top_p {
            settings.advice.top_p = top_p;
        }
        if let Some(secs) = advice.timeout_secs {
            settings.advice.timeout = Duration::from_secs(secs);
        }
    }

    Ok(settings)
}
