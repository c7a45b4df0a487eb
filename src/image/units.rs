//! Stored value to physical unit conversion

use super::matrix::{PhysicalMatrix, RawView};
use crate::types::RescaleParams;

/// `physical = raw * slope + intercept`, unclamped
///
/// With CT rescale parameters the result is in Hounsfield units.
#[must_use]
pub fn to_physical_units(raw: &RawView<'_>, slope: f64, intercept: f64) -> PhysicalMatrix {
    let rescale = RescaleParams::new(slope, intercept);

    PhysicalMatrix {
        width: raw.width(),
        height: raw.height(),
        channels: raw.channels(),
        data: raw.map_samples(|v| rescale.apply(v) as f32),
    }
}
