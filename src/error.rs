//! # Registry Error Types
//!
//! Structured errors for the store, configuration and handler layers.
//! A missing user is never an error: lookups return `Ok(None)`.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RegistryError {
    /// The pool could not be established at startup.
    #[error("Database connection error: {url}: {source}")]
    Connection {
        url: String,
        #[source]
        source: sqlx::Error,
    },

    /// Idempotent table creation failed.
    #[error("Schema error: {0}")]
    Schema(#[source] sqlx::Error),

    /// A store operation failed after startup.
    #[error("Storage error: {operation}: {source}")]
    Storage {
        operation: &'static str,
        #[source]
        source: sqlx::Error,
    },

    #[error("Registry store is not connected: {operation}")]
    NotConnected { operation: &'static str },

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl RegistryError {
    pub fn storage(operation: &'static str, source: sqlx::Error) -> Self {
        Self::Storage { operation, source }
    }

    /// Startup failures abort the process instead of being reported to a user.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::Connection { .. } | Self::Schema(_) | Self::Configuration(_)
        )
    }
}

impl From<config::ConfigError> for RegistryError {
    fn from(err: config::ConfigError) -> Self {
        Self::Configuration(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, RegistryError>;
