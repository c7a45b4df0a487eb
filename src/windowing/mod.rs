//! VOI windowing: choosing a window and applying it

mod applicator;
mod presets;
mod resolver;

pub use applicator::{apply, LinearWindow};
pub use presets::{normalize_body_part, WindowPresetTable};
pub use resolver::{parse_window_values, preset_windowing, resolve_windowing};
