//! Uniform Bridge: per-frame copies of the effect config, pointer, time and
//! resolution in the byte layout the shader programs expect.
//!
//! Both blocks are rebuilt from a config snapshot every frame, so edits to
//! the config take effect on the next frame without any dirty tracking.

use fluidfx_common::PhysicalSize;
use fluidfx_config::colors::parse_color;
use fluidfx_config::EffectConfig;

use crate::frame::FrameInputs;
use crate::pointer::PointerForcing;

/// Elapsed time wraps at 6 hours to avoid f32 precision loss.
pub const TIME_WRAP_SECS: f32 = 21_600.0;

/// Uniform block of the simulation program.
///
/// Layout: 64 bytes, 16-byte aligned (wgpu requirement).
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SimulationUniforms {
    /// Surface size in pixels.
    pub resolution: [f32; 2],
    /// Frames rendered since the last resize. Zero selects the cold start.
    pub frame: u32,
    pub _padding0: u32,
    /// Current position (xy) and previous position (zw) of the pointer in
    /// pixels, bottom-left origin.
    pub pointer: [f32; 4],
    /// Positive while the pointer is forcing the field.
    pub pointer_active: f32,
    pub brush_size: f32,
    pub brush_strength: f32,
    pub fluid_decay: f32,
    pub trail_length: f32,
    pub stop_decay: f32,
    pub _padding1: [f32; 2],
}

impl SimulationUniforms {
    /// Copy the simulation knobs out of `effect`, with no pointer forcing.
    pub fn from_config(effect: &EffectConfig) -> Self {
        Self {
            resolution: [1.0, 1.0],
            frame: 0,
            _padding0: 0,
            pointer: [0.0; 4],
            pointer_active: 0.0,
            brush_size: effect.brush_size,
            brush_strength: effect.brush_strength,
            fluid_decay: effect.fluid_decay,
            trail_length: effect.trail_length,
            stop_decay: effect.stop_decay,
            _padding1: [0.0; 2],
        }
    }

    pub fn update_viewport(&mut self, size: PhysicalSize) {
        self.resolution = [size.width as f32, size.height as f32];
    }

    pub fn update_pointer(&mut self, forcing: &PointerForcing) {
        self.pointer = forcing.to_uniform();
        self.pointer_active = forcing.active;
    }

    /// Saturates at `u32::MAX`; only `frame < 1` is significant to the shader.
    pub fn set_frame(&mut self, frame: u64) {
        self.frame = u32::try_from(frame).unwrap_or(u32::MAX);
    }

    pub fn is_cold_start(&self) -> bool {
        self.frame < 1
    }
}

/// Uniform block of the composite program.
///
/// Layout: 96 bytes, 16-byte aligned.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CompositeUniforms {
    pub resolution: [f32; 2],
    /// Elapsed seconds, wrapped at [`TIME_WRAP_SECS`].
    pub time: f32,
    pub distortion_amount: f32,
    /// Palette as sRGB-encoded RGBA in `[0, 1]`, blended without conversion.
    pub color1: [f32; 4],
    pub color2: [f32; 4],
    pub color3: [f32; 4],
    pub color4: [f32; 4],
    pub color_intensity: f32,
    pub softness: f32,
    pub _padding: [f32; 2],
}

impl CompositeUniforms {
    /// Copy the composite knobs and palette out of `effect`.
    ///
    /// A palette entry that fails to parse falls back to the default color
    /// of the same slot; load-time validation has already warned about it.
    pub fn from_config(effect: &EffectConfig) -> Self {
        let [color1, color2, color3, color4] = resolve_palette(effect);
        Self {
            resolution: [1.0, 1.0],
            time: 0.0,
            distortion_amount: effect.distortion_amount,
            color1,
            color2,
            color3,
            color4,
            color_intensity: effect.color_intensity,
            softness: effect.softness,
            _padding: [0.0; 2],
        }
    }

    pub fn update_viewport(&mut self, size: PhysicalSize) {
        self.resolution = [size.width as f32, size.height as f32];
    }

    /// Set the elapsed time, wrapping at ~6 hours.
    pub fn set_time(&mut self, elapsed: f32) {
        self.time = elapsed.rem_euclid(TIME_WRAP_SECS);
    }
}

fn resolve_palette(effect: &EffectConfig) -> [[f32; 4]; 4] {
    let configured = effect.palette();
    std::array::from_fn(|slot| {
        parse_color(configured[slot])
            .or_else(|_| parse_color(EffectConfig::default().palette()[slot]))
            .map(|color| color.to_f32_array())
            .unwrap_or([0.0, 0.0, 0.0, 1.0])
    })
}

/// Build both uniform blocks for one frame.
pub fn bridge_uniforms(
    inputs: &FrameInputs,
    frame: u64,
    size: PhysicalSize,
) -> (SimulationUniforms, CompositeUniforms) {
    let mut simulation = SimulationUniforms::from_config(&inputs.effect);
    simulation.update_viewport(size);
    simulation.update_pointer(&inputs.pointer);
    simulation.set_frame(frame);

    let mut composite = CompositeUniforms::from_config(&inputs.effect);
    composite.update_viewport(size);
    composite.set_time(inputs.time);

    (simulation, composite)
}
