//! Logging configuration.

use serde::{Deserialize, Serialize};

/// Log level.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// The `tracing` filter directive for the fluidfx crates at this level.
    pub fn directive(&self) -> &'static str {
        match self {
            LogLevel::Trace => "fluidfx=trace",
            LogLevel::Debug => "fluidfx=debug",
            LogLevel::Info => "fluidfx=info",
            LogLevel::Warn => "fluidfx=warn",
            LogLevel::Error => "fluidfx=error",
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: LogLevel,
}
