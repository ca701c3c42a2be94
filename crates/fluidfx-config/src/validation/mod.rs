//! Configuration range validation.
//!
//! Each section has its own submodule; this orchestrator calls them all
//! and collects errors into a single `ConfigError`. Callers treat the
//! result as a warning: the renderer never rejects out-of-range knobs.

mod effect;
mod helpers;
mod misc;


use crate::schema::FluidFxConfig;
use fluidfx_common::ConfigError;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &FluidFxConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    effect::validate_effect(&mut errors, config);
    effect::validate_palette(&mut errors, config);
    misc::validate_pointer(&mut errors, config);
    misc::validate_window(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}
