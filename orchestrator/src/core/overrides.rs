//! The fixed set of configuration overrides applied before a demo run

use shared::{FieldOverride, FieldPath, SharedResult};

pub const EMPIRICAL_LINE_PATH: &str = "general_options.empirical_line";
pub const DEBUG_MODE_PATH: &str = "general_options.debug_mode";
pub const EMULATOR_BASE_PATH: &str = "processors.general_inversion_parameters.filepaths.emulator_base";

/// Build the demo overrides in the order they must be applied:
/// empirical line on, debug mode off, then the emulator location.
pub fn demo_overrides(emulator_base: &str) -> SharedResult<Vec<FieldOverride>> {
    Ok(vec![
        FieldOverride::new(EMPIRICAL_LINE_PATH.parse::<FieldPath>()?, true),
        FieldOverride::new(DEBUG_MODE_PATH.parse::<FieldPath>()?, false),
        FieldOverride::new(EMULATOR_BASE_PATH.parse::<FieldPath>()?, emulator_base),
    ])
}
