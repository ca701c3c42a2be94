//! Pointer input configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Pointer handling settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PointerConfig {
    /// Forcing is cleared when the pointer has not moved for this long.
    pub idle_timeout_ms: u64,
}

impl Default for PointerConfig {
    fn default() -> Self {
        Self {
            idle_timeout_ms: 100,
        }
    }
}

impl PointerConfig {
    pub fn idle_timeout(&self) -> Duration {
        Duration::from_millis(self.idle_timeout_ms)
    }
}
