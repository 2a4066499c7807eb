//! Configuration Loader
//!
//! Environment-aware loading: file discovery per environment, prefixed
//! environment variables, and the plain variables a deployment usually sets.

use config::{Config, Environment, File};
use std::collections::HashMap;
use std::env;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::RegistryBotConfig;
use crate::error::Result;

const ENV_PREFIX: &str = "REGISTRY_BOT";
const BASE_FILE_STEM: &str = "registry_bot";

/// Builds a [`RegistryBotConfig`] from files and environment
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config_directory: PathBuf,
    environment: String,
    /// Replaces the process environment when set; used by tests
    vars: Option<HashMap<String, String>>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self {
            config_directory: PathBuf::from("config"),
            environment: detect_environment(),
            vars: None,
        }
    }

    pub fn with_directory(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config_directory = dir.into();
        self
    }

    pub fn with_environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = environment.into();
        self
    }

    /// Read variables from `vars` instead of the process environment
    pub fn with_vars(mut self, vars: HashMap<String, String>) -> Self {
        self.vars = Some(vars);
        self
    }

    pub fn environment(&self) -> &str {
        &self.environment
    }

    pub fn load(&self) -> Result<RegistryBotConfig> {
        if self.vars.is_none() {
            // A missing .env file is the normal case in production
            dotenvy::dotenv().ok();
        }

        let base = self.file_path(BASE_FILE_STEM);
        let env_specific = self.file_path(&format!("{BASE_FILE_STEM}.{}", self.environment));
        debug!(
            environment = %self.environment,
            base = %base.display(),
            overlay = %env_specific.display(),
            "Loading configuration"
        );

        let config: RegistryBotConfig = Config::builder()
            .add_source(File::from(base).required(false))
            .add_source(File::from(env_specific).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true)
                    .source(self.vars.clone()),
            )
            .set_override_option("database.url", self.var("DATABASE_URL"))?
            .set_override_option("telegram.bot_token", self.var("BOT_TOKEN"))?
            .build()?
            .try_deserialize()?;

        config.validate()?;

        debug!(environment = %self.environment, "Configuration validated");

        Ok(config)
    }

    fn file_path(&self, stem: &str) -> PathBuf {
        Path::new(&self.config_directory).join(format!("{stem}.toml"))
    }

    fn var(&self, key: &str) -> Option<String> {
        match &self.vars {
            Some(vars) => vars.get(key).cloned(),
            None => env::var(key).ok(),
        }
        .filter(|value| !value.is_empty())
    }
}

/// Current deployment environment name
pub fn detect_environment() -> String {
    env::var("REGISTRY_BOT_ENV")
        .or_else(|_| env::var("APP_ENV"))
        .unwrap_or_else(|_| "development".to_string())
}
