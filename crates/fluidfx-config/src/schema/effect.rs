//! Fluid effect knobs.
//!
//! This record is read once per frame by the renderer. Values are passed
//! through to the shader programs as-is; out-of-range values only produce
//! validation warnings at load time.

use serde::{Deserialize, Serialize};

/// Tunable scalars and palette of the fluid effect.
///
/// camelCase aliases (`brushSize`, `fluidDecay`, ...) are accepted so
/// configs exported from web front-ends load unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectConfig {
    /// Pointer brush radius in pixels.
    #[serde(alias = "brushSize")]
    pub brush_size: f32,
    /// Pointer forcing multiplier.
    #[serde(alias = "brushStrength")]
    pub brush_strength: f32,
    /// How far the fluid velocity warps the color field.
    #[serde(alias = "distortionAmount")]
    pub distortion_amount: f32,
    /// Per-frame velocity multiplier (1.0 = no decay).
    #[serde(alias = "fluidDecay")]
    pub fluid_decay: f32,
    /// Per-frame trail multiplier (1.0 = trails never fade).
    #[serde(alias = "trailLength")]
    pub trail_length: f32,
    /// Extra multiplier applied away from a resting pointer.
    #[serde(alias = "stopDecay")]
    pub stop_decay: f32,
    pub color1: String,
    pub color2: String,
    pub color3: String,
    pub color4: String,
    #[serde(alias = "colorIntensity")]
    pub color_intensity: f32,
    /// Width of the transitions between palette colors.
    pub softness: f32,
}

impl Default for EffectConfig {
    fn default() -> Self {
        Self {
            brush_size: 25.0,
            brush_strength: 0.5,
            distortion_amount: 2.5,
            fluid_decay: 0.98,
            trail_length: 0.8,
            stop_decay: 0.85,
            color1: "#b8fff7".into(),
            color2: "#6e3466".into(),
            color3: "#0133ff".into(),
            color4: "#66d1fe".into(),
            color_intensity: 1.0,
            softness: 1.0,
        }
    }
}

impl EffectConfig {
    /// The four palette entries in blend order.
    pub fn palette(&self) -> [&str; 4] {
        [&self.color1, &self.color2, &self.color3, &self.color4]
    }
}
