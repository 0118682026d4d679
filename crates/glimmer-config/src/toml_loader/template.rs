//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> &'static str {
    r#"# Glimmer Configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.

[bloom]
# default, soft, desaturated, saturated, blurry, subtle
preset = "saturated"
# scale_factor = 1        # 1-8, intermediate surface size multiplier

# Individual overrides on top of the preset:
# threshold = 0.25        # 0.0-<1.0
# blur_amount = 4.0       # >0.0-100.0
# bloom_intensity = 2.0   # 0.0-10.0
# base_intensity = 1.0    # 0.0-10.0
# bloom_saturation = 2.0  # 0.0-10.0
# base_saturation = 0.0   # 0.0-10.0

[render]
# backend = "gpu"                   # gpu, cpu
# back_buffer_format = "rgba8-unorm" # rgba8-unorm, bgra8-unorm
#                                   # rgba16-float, rgba32-float (cpu only)

[logging]
# level = "info"          # trace, debug, info, warn, error
"#
}
