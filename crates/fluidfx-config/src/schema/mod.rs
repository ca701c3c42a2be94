//! Configuration schema types for fluidfx.
//!
//! All structs use `serde(default)` so partial configs work correctly.

mod effect;
mod logging;
mod pointer;
mod window;

pub use effect::*;
pub use logging::*;
pub use pointer::*;
pub use window::*;

use serde::{Deserialize, Serialize};

/// Root configuration for fluidfx.
///
/// Only override what you want to change.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FluidFxConfig {
    pub effect: EffectConfig,
    pub pointer: PointerConfig,
    pub window: WindowConfig,
    pub logging: LoggingConfig,
}
