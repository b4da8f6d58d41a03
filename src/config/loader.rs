//! Configuration Loader
//!
//! Handles YAML file discovery, environment detection, and configuration
//! merging: base file, then `casetrack-config.<environment>.yaml`, then
//! `CASETRACK__*` environment variables.

use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use config::{Config, Environment, File};
use tracing::debug;

use super::{CasetrackConfig, ConfigResult};

const BASE_FILE_STEM: &str = "casetrack-config";

/// Loaded configuration plus the context it was loaded in
pub struct ConfigManager {
    config: CasetrackConfig,
    environment: String,
    config_directory: PathBuf,
}

impl ConfigManager {
    /// Load configuration with environment auto-detection
    pub fn load() -> ConfigResult<Arc<ConfigManager>> {
        Self::load_from_directory(None)
    }

    /// Load configuration from a specific directory
    pub fn load_from_directory(config_dir: Option<PathBuf>) -> ConfigResult<Arc<ConfigManager>> {
        let environment = Self::detect_environment();
        Self::load_from_directory_with_env(config_dir, &environment)
    }

    /// Load configuration from a specific directory with explicit environment
    ///
    /// Useful for testing without modifying global environment variables.
    pub fn load_from_directory_with_env(
        config_dir: Option<PathBuf>,
        environment: &str,
    ) -> ConfigResult<Arc<ConfigManager>> {
        let config_directory = config_dir.unwrap_or_else(|| PathBuf::from("config"));

        debug!(
            environment = environment,
            directory = %config_directory.display(),
            "loading configuration"
        );

        let base_file = config_directory.join(format!("{BASE_FILE_STEM}.yaml"));
        let env_file = config_directory.join(format!("{BASE_FILE_STEM}.{environment}.yaml"));

        let config: CasetrackConfig = Config::builder()
            .add_source(File::from(base_file))
            .add_source(File::from(env_file).required(false))
            .add_source(
                Environment::with_prefix("CASETRACK")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        config.validate()?;

        debug!(
            environment = environment,
            database_host = %config.database.host,
            pool = config.database.pool,
            "configuration loaded"
        );

        Ok(Arc::new(ConfigManager {
            config,
            environment: environment.to_string(),
            config_directory,
        }))
    }

    /// Get the loaded configuration
    pub fn config(&self) -> &CasetrackConfig {
        &self.config
    }

    /// Environment the configuration was loaded for
    pub fn environment(&self) -> &str {
        &self.environment
    }

    /// Directory the configuration was loaded from
    pub fn config_directory(&self) -> &PathBuf {
        &self.config_directory
    }

    /// Configuration rendered for logs with the password masked
    pub fn debug_config(&self) -> serde_json::Value {
        let mut value = serde_json::to_value(&self.config).unwrap_or_default();
        if let Some(password) = value.pointer_mut("/database/password") {
            *password = serde_json::Value::String("*****".to_string());
        }
        value
    }

    /// Detect the running environment from environment variables
    pub fn detect_environment() -> String {
        env::var("CASETRACK_ENV")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string())
    }
}
