//! Choosing the window to render with
//!
//! Priority: explicit Window Width / Window Center on the object, then the
//! body-part preset table, then [`Windowing::fallback`]. Missing or malformed
//! calibration data never aborts extraction.

use super::presets::{normalize_body_part, WindowPresetTable};
use crate::dicom::{read_tag, DataSet, TagIdentifier};
use crate::types::Windowing;
use tracing::{debug, error, warn};

/// Parse a backslash-delimited multi-value ("400\100") into floats
///
/// A single bad token invalidates the whole value.
#[must_use]
pub fn parse_window_values(input: &str) -> Vec<f32> {
    if input.trim().is_empty() {
        return Vec::new();
    }

    input
        .split('\\')
        .map(|token| token.trim().parse::<f32>())
        .collect::<Result<Vec<_>, _>>()
        .unwrap_or_else(|e| {
            error!("Failed to parse windowing value '{input}'. reason: {e}");
            Vec::new()
        })
}

pub fn resolve_windowing<S: DataSet + ?Sized>(
    dataset: &S,
    presets: Option<&WindowPresetTable>,
) -> Windowing {
    let width = read_tag(dataset, TagIdentifier::WindowWidth)
        .map(|v| parse_window_values(&v))
        .unwrap_or_default();
    let level = read_tag(dataset, TagIdentifier::WindowCenter)
        .map(|v| parse_window_values(&v))
        .unwrap_or_default();

    if width.is_empty() || level.is_empty() {
        warn!("window width or level not set; falling back to window presets");
        return preset_windowing(dataset, presets);
    }

    if width.len() != level.len() {
        warn!(
            "Mismatch between window level (size: {}) and window width (size: {}); falling back to window presets.",
            level.len(),
            width.len()
        );
        return preset_windowing(dataset, presets);
    }

    Windowing::new(width, level)
}

/// Preset for the examined body part, or the fallback window
pub fn preset_windowing<S: DataSet + ?Sized>(
    dataset: &S,
    presets: Option<&WindowPresetTable>,
) -> Windowing {
    lookup_preset(dataset, presets).unwrap_or_else(|| {
        debug!("returning default windowing values");
        Windowing::fallback()
    })
}

fn lookup_preset<S: DataSet + ?Sized>(
    dataset: &S,
    presets: Option<&WindowPresetTable>,
) -> Option<Windowing> {
    let Some(presets) = presets else {
        warn!("No window preset table available");
        return None;
    };

    let body_part = read_tag(dataset, TagIdentifier::BodyPartExamined).ok()?;
    let key = normalize_body_part(&body_part)?;

    match presets.get(&key) {
        Some(windowing) if windowing.is_usable() => {
            debug!("Using window preset for body part '{key}': {windowing}");
            Some(windowing.clone())
        }
        Some(windowing) => {
            warn!("Window preset for '{key}' is malformed ({windowing}); ignoring it");
            None
        }
        None => {
            debug!("No window preset for body part '{key}'");
            None
        }
    }
}
