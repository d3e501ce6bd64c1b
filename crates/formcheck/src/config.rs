// File: formcheck/src/config.rs
// Purpose: Form configuration parsing from formcheck.toml

use anyhow::{bail, Context, Result};
use formcheck_rules::password::DEFAULT_MIN_LENGTH;
use formcheck_rules::MoneyFormat;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::messages::{Locale, MessageResolver};

/// Per-form settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormConfig {
    /// Language of the default messages
    #[serde(default)]
    pub locale: Locale,

    /// Minimum length enforced by the `password` rule (8, or 6 for lenient forms)
    #[serde(default = "default_password_min_length")]
    pub password_min_length: usize,

    /// Separators used by the `money` rule
    #[serde(default)]
    pub money: MoneyFormat,

    /// Drop spaces from digit/number/email/password/date input as it is typed
    #[serde(default = "default_true")]
    pub strip_whitespace: bool,
}

fn default_password_min_length() -> usize {
    DEFAULT_MIN_LENGTH
}

fn default_true() -> bool {
    true
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            locale: Locale::default(),
            password_min_length: default_password_min_length(),
            money: MoneyFormat::default(),
            strip_whitespace: true,
        }
    }
}

impl FormConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        // Missing file means defaults
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    /// Load configuration from default path (./formcheck.toml)
    pub fn load_default() -> Result<Self> {
        Self::load("formcheck.toml")
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the money rule cannot round-trip
    pub fn validate(&self) -> Result<()> {
        let MoneyFormat {
            thousands_separator,
            decimal_separator,
        } = self.money;

        if thousands_separator == decimal_separator {
            bail!(
                "money separators must differ, both are {:?}",
                thousands_separator
            );
        }
        if thousands_separator.is_ascii_digit() || decimal_separator.is_ascii_digit() {
            bail!(
                "money separators cannot be digits (thousands {:?}, decimal {:?})",
                thousands_separator,
                decimal_separator
            );
        }
        Ok(())
    }

    pub fn message_resolver(&self) -> MessageResolver {
        MessageResolver::new(self.locale).with_password_min_length(self.password_min_length)
    }
}
