//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> String {
    r##"# fluidfx configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.
# Edits are picked up live while the viewer is running.

[effect]
# brush_size = 25.0         # pointer radius in pixels
# brush_strength = 0.5
# distortion_amount = 2.5
# fluid_decay = 0.98        # 0.0-1.0, velocity kept per frame
# trail_length = 0.8        # 0.0-1.0, trail kept per frame
# stop_decay = 0.85         # 0.0-1.0, extra fade once the pointer rests
# color1 = "#b8fff7"
# color2 = "#6e3466"
# color3 = "#0133ff"
# color4 = "#66d1fe"
# color_intensity = 1.0
# softness = 1.0

[pointer]
# idle_timeout_ms = 100

[window]
# title = "fluidfx"
# width = 1280
# height = 720
# vsync = true

[logging]
# level = "info"            # trace, debug, info, warn, error
"##
    .to_string()
}
