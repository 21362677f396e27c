//! Logging bootstrap for applications embedding the flair libraries
//!
//! The libraries only emit `tracing` events. Applications that do not install
//! their own subscriber can call [`init_logging`] once at startup.

use figment::{
    providers::{Env, Serialized},
    Figment,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Logging setup errors
#[derive(Error, Debug)]
pub enum LoggingError {
    /// Settings could not be extracted from the environment
    #[error("Invalid logging settings: {0}")]
    Settings(String),

    /// A global subscriber is already installed
    #[error("Failed to initialize logging: {0}")]
    Init(String),
}

/// Logging level and output format
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Filter directive used when `RUST_LOG` is unset
    pub level: String,
    /// `pretty` or `json`
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl LoggingSettings {
    /// Read settings from `FLAIR_LOG_LEVEL` and `FLAIR_LOG_FORMAT`
    pub fn from_env() -> Result<Self, LoggingError> {
        Figment::from(Serialized::defaults(Self::default()))
            .merge(Env::prefixed("FLAIR_LOG_"))
            .extract()
            .map_err(|e| LoggingError::Settings(e.to_string()))
    }
}

/// Install a global `tracing` subscriber
pub fn init_logging(settings: &LoggingSettings) -> Result<(), LoggingError> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&settings.level));

    let registry = tracing_subscriber::registry().with(env_filter);

    match settings.format.as_str() {
        "pretty" => registry
            .with(tracing_subscriber::fmt::layer().pretty())
            .try_init(),
        _ => registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init(),
    }
    .map_err(|e| LoggingError::Init(e.to_string()))?;

    tracing::debug!(
        level = %settings.level,
        format = %settings.format,
        "Logging initialized"
    );
    Ok(())
}
