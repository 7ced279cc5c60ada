//! # Configuration State
//!
//! Storefront configuration loaded once at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`PEDAL_*`)
//! 2. Defaults (this file)
//!
//! ## Environment Variables
//! ```text
//! PEDAL_DB_PATH        SQLite file (default: platform data dir/pedal.db)
//! PEDAL_STORE_NAME     Name shown in the header and checkout summary
//! PEDAL_USER_EMAIL     Sign this shopper in at startup
//! PEDAL_SHIPPING_FEE   Flat shipping fee in whole Rupiah (default: 0)
//! ```
//!
//! Read-only after startup, so commands take it by shared reference.

use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

use pedal_core::Money;

/// Invalid configuration values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{var} must be a whole, non-negative number of Rupiah, got '{value}'")]
    InvalidAmount { var: &'static str, value: String },

    #[error("{var} must not be empty")]
    Empty { var: &'static str },
}

/// Storefront configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigState {
    /// Store name (displayed in the header and checkout summary)
    pub store_name: String,

    /// Explicit database file; `None` uses the platform data directory.
    #[serde(skip)]
    pub database_path: Option<PathBuf>,

    /// Shopper to sign in at startup.
    pub user_email: Option<String>,

    /// Flat shipping fee added at checkout.
    pub shipping_fee: Money,
}

impl Default for ConfigState {
    fn default() -> Self {
        ConfigState {
            store_name: "Pedal Fixie Store".to_string(),
            database_path: None,
            user_email: None,
            shipping_fee: Money::zero(),
        }
    }
}

impl ConfigState {
    /// Builds the configuration from `PEDAL_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = ConfigState::default();

        if let Some(name) = lookup("PEDAL_STORE_NAME") {
            let name = name.trim();
            if name.is_empty() {
                return Err(ConfigError::Empty {
                    var: "PEDAL_STORE_NAME",
                });
            }
            config.store_name = name.to_string();
        }

        if let Some(path) = lookup("PEDAL_DB_PATH") {
            if !path.trim().is_empty() {
                config.database_path = Some(PathBuf::from(path.trim()));
            }
        }

        if let Some(email) = lookup("PEDAL_USER_EMAIL") {
            if !email.trim().is_empty() {
                config.user_email = Some(email.trim().to_string());
            }
        }

        if let Some(fee) = lookup("PEDAL_SHIPPING_FEE") {
            let units = fee
                .trim()
                .parse::<i64>()
                .ok()
                .filter(|units| *units >= 0)
                .ok_or_else(|| ConfigError::InvalidAmount {
                    var: "PEDAL_SHIPPING_FEE",
                    value: fee.clone(),
                })?;
            config.shipping_fee = Money::from_units(units);
        }

        Ok(config)
    }
}
