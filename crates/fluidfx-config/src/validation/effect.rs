//! Effect knob and palette validation.

use crate::colors::validate_color;
use crate::schema::FluidFxConfig;

use super::helpers::validate_range_f32;

pub(crate) fn validate_effect(errors: &mut Vec<String>, config: &FluidFxConfig) {
    let e = &config.effect;
    validate_range_f32(errors, "effect.brush_size", e.brush_size, 0.0, 500.0);
    validate_range_f32(errors, "effect.brush_strength", e.brush_strength, 0.0, 10.0);
    validate_range_f32(errors, "effect.distortion_amount", e.distortion_amount, 0.0, 20.0);
    validate_range_f32(errors, "effect.fluid_decay", e.fluid_decay, 0.0, 1.0);
    validate_range_f32(errors, "effect.trail_length", e.trail_length, 0.0, 1.0);
    validate_range_f32(errors, "effect.stop_decay", e.stop_decay, 0.0, 1.0);
    validate_range_f32(errors, "effect.color_intensity", e.color_intensity, 0.0, 10.0);
    validate_range_f32(errors, "effect.softness", e.softness, 0.0, 2.0);
}

pub(crate) fn validate_palette(errors: &mut Vec<String>, config: &FluidFxConfig) {
    for (i, color) in config.effect.palette().iter().enumerate() {
        if !validate_color(color) {
            errors.push(format!("effect.color{} = {color:?} is not a valid color", i + 1));
        }
    }
}
