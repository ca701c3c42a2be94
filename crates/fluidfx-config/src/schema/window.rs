//! Window configuration types.

use serde::{Deserialize, Serialize};

/// Window appearance settings for the interactive viewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Static window title.
    pub title: String,
    /// Initial inner width in logical pixels.
    pub width: u32,
    /// Initial inner height in logical pixels.
    pub height: u32,
    /// Present with FIFO (vsync) instead of the lowest-latency mode available.
    pub vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "fluidfx".into(),
            width: 1280,
            height: 720,
            vsync: true,
        }
    }
}
