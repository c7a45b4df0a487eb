//! Mapping physical units onto 8-bit intensities

use crate::error::{ExportError, Result};
use crate::image::PhysicalMatrix;
use crate::types::Windowing;
use image::{DynamicImage, GrayImage, RgbImage};
use tracing::debug;

/// Linear VOI window spanning `[level - width/2, level + width/2]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearWindow {
    level: f64,
    min: f64,
    range: f64,
}

impl LinearWindow {
    #[must_use]
    pub fn new(width: f32, level: f32) -> Self {
        let width = f64::from(width);
        let level = f64::from(level);
        let min = level - width / 2.0;
        let max = level + width / 2.0;
        Self {
            level,
            min,
            range: max - min,
        }
    }

    /// Gain of the linear map
    #[must_use]
    pub fn alpha(&self) -> f64 {
        255.0 / self.range
    }

    /// Offset of the linear map
    #[must_use]
    pub fn beta(&self) -> f64 {
        -self.min * 255.0 / self.range
    }

    /// Intensity for one physical value
    ///
    /// A window without positive width degenerates to a threshold at the level.
    #[inline(always)]
    #[must_use]
    // Hot path: called for every sample
    pub fn apply(&self, value: f32) -> u8 {
        let value = f64::from(value);
        if self.range <= 0.0 {
            return if value < self.level { 0 } else { u8::MAX };
        }

        // Same map as value * alpha + beta, with less rounding error
        let scaled = ((value - self.min) * 255.0 / self.range).round();
        scaled.clamp(0.0, 255.0) as u8
    }
}

/// Window `physical` with the primary (index 0) window of `windowing`
pub fn apply(physical: &PhysicalMatrix, windowing: &Windowing) -> Result<DynamicImage> {
    let (width, level) = windowing.primary().ok_or_else(|| {
        ExportError::ExtractionFailed(format!("Cannot apply empty windowing {windowing}"))
    })?;
    let window = LinearWindow::new(width, level);
    debug!(
        "Applying window width={width}, level={level} (alpha={:.4}, beta={:.4})",
        window.alpha(),
        window.beta()
    );

    let pixels: Vec<u8> = physical.data.iter().map(|&v| window.apply(v)).collect();

    let image = match physical.channels {
        1 => GrayImage::from_raw(physical.width, physical.height, pixels)
            .map(DynamicImage::ImageLuma8),
        3 => RgbImage::from_raw(physical.width, physical.height, pixels)
            .map(DynamicImage::ImageRgb8),
        other => {
            return Err(ExportError::ExtractionFailed(format!(
                "Unsupported samples per pixel for output: {other}"
            )));
        }
    };

    image.ok_or_else(|| {
        ExportError::ExtractionFailed("Failed to create image buffer".to_string())
    })
}
