//! Configuration management for the adapter.
//!
//! Defaults are embedded from `verizon-adapter.toml` at the repository root;
//! deployments override individual values via `VERIZON_ADAPTER__*`
//! environment variables. The resolved [`AdapterConfig`] is read once per
//! auction and passed explicitly into the build operation, so the bidding
//! core itself never touches ambient configuration.

use config::{Config, Environment, File, FileFormat};
use error_stack::{Report, ResultExt};
use serde::Deserialize;
use validator::Validate;

use crate::constants::DEFAULT_ENDPOINT;
use crate::error::AdapterError;

/// Adapter options, namespaced under `[verizonmedia]`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AdapterConfig {
    /// SSP auction endpoint. Defaults to the production endpoint.
    #[serde(default = "default_endpoint")]
    #[validate(url)]
    pub endpoint: String,
    /// When true, all eligible slots of an auction are combined into one
    /// request; otherwise one request per slot is emitted.
    #[serde(default)]
    pub single_request: bool,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            single_request: false,
        }
    }
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub verizonmedia: AdapterConfig,
}

impl Settings {
    /// Loads the embedded defaults plus environment overrides.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError::Config`] when the configuration cannot be
    /// parsed or fails validation.
    pub fn new() -> Result<Self, Report<AdapterError>> {
        Self::from_toml(include_str!("../../../verizon-adapter.toml"))
    }

    /// Parses settings from a TOML string, applying environment overrides.
    ///
    /// A missing `[verizonmedia]` table or missing fields are not errors;
    /// they resolve to the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError::Config`] on unparseable input or an invalid
    /// endpoint URL.
    pub fn from_toml(toml_str: &str) -> Result<Self, Report<AdapterError>> {
        let environment = Environment::default()
            .prefix("VERIZON_ADAPTER")
            .separator("__");

        let toml = File::from_str(toml_str, FileFormat::Toml);
        let config = Config::builder()
            .add_source(toml)
            .add_source(environment)
            .build()
            .change_context(AdapterError::Config {
                message: "failed to assemble configuration sources".to_string(),
            })?;

        let settings: Self = config.try_deserialize().change_context(AdapterError::Config {
            message: "failed to deserialize configuration".to_string(),
        })?;

        settings
            .verizonmedia
            .validate()
            .change_context(AdapterError::Config {
                message: "invalid adapter configuration".to_string(),
            })?;

        Ok(settings)
    }
}
