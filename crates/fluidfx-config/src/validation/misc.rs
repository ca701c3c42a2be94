//! Pointer and window validation.

use crate::schema::FluidFxConfig;

use super::helpers::validate_range;

pub(crate) fn validate_pointer(errors: &mut Vec<String>, config: &FluidFxConfig) {
    validate_range(
        errors,
        "pointer.idle_timeout_ms",
        config.pointer.idle_timeout_ms,
        1,
        10_000,
    );
}

pub(crate) fn validate_window(errors: &mut Vec<String>, config: &FluidFxConfig) {
    validate_range(errors, "window.width", config.window.width as u64, 1, 16_384);
    validate_range(errors, "window.height", config.window.height as u64, 1, 16_384);
}
