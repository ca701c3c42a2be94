//! fluidfx configuration system.
//!
//! Provides TOML-based configuration for the fluid effect, live reload,
//! and range validation. All config sections use sensible defaults so
//! partial configs work out of the box.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use fluidfx_config::{load_config, config_to_json};
//!
//! let config = load_config(None).expect("failed to load config");
//! let json = config_to_json(&config);
//! println!("{json}");
//! ```

pub mod colors;
pub mod reload;
pub mod schema;
pub mod toml_loader;
pub mod validation;
pub mod watcher;

// Re-export core types for convenience
pub use reload::ReloadManager;
pub use schema::{EffectConfig, FluidFxConfig};
pub use watcher::ConfigWatcher;

use fluidfx_common::ConfigError;
use std::path::Path;

/// Load config from an explicit path, or from the platform default path.
///
/// The default path is created from the commented template if it does not
/// exist yet. Validation problems are logged as warnings by the loader and
/// never reject the file.
pub fn load_config(path: Option<&Path>) -> Result<FluidFxConfig, ConfigError> {
    match path {
        Some(path) => toml_loader::load_from_path(path),
        None => toml_loader::load_default(),
    }
}

/// Serialize a config to a pretty-printed JSON string.
pub fn config_to_json(config: &FluidFxConfig) -> String {
    serde_json::to_string_pretty(config)
        .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize config: {e}\"}}"))
}
