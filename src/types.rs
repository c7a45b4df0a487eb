//! Domain types shared across the export pipeline

use crate::dicom::PhotometricInterpretation;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ImageDimensions {
    pub width: u64,
    pub height: u64,
}

impl ImageDimensions {
    #[must_use]
    pub fn new(width: u64, height: u64) -> Self {
        Self { width, height }
    }

    #[inline]
    #[must_use]
    pub fn pixel_count(&self) -> u64 {
        self.width * self.height
    }

    #[inline]
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.width > 0 && self.height > 0
    }
}

impl fmt::Display for ImageDimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{width}x{height}", width = self.width, height = self.height)
    }
}

/// Rescale parameters for converting stored values to physical units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RescaleParams {
    pub slope: f64,
    pub intercept: f64,
}

impl RescaleParams {
    #[must_use]
    pub fn new(slope: f64, intercept: f64) -> Self {
        Self { slope, intercept }
    }

    #[inline(always)]
    #[must_use]
    // Hot path: called for every sample during conversion
    pub fn apply(&self, raw: f64) -> f64 {
        raw.mul_add(self.slope, self.intercept)
    }
}

impl Default for RescaleParams {
    fn default() -> Self {
        Self::new(1.0, 0.0)
    }
}

impl fmt::Display for RescaleParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "slope={slope}, intercept={intercept}",
            slope = self.slope,
            intercept = self.intercept
        )
    }
}

/// Pixel Representation (0028,0103)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PixelRepresentation {
    #[default]
    Unsigned,
    /// Two's complement
    Signed,
}

impl From<u16> for PixelRepresentation {
    fn from(value: u16) -> Self {
        if value == 1 { Self::Signed } else { Self::Unsigned }
    }
}

/// Window widths and levels, index 0 being the primary window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Windowing {
    pub width: Vec<f32>,
    pub level: Vec<f32>,
}

impl Windowing {
    pub const DEFAULT_WIDTH: f32 = 400.0;
    pub const DEFAULT_LEVEL: f32 = 40.0;

    #[must_use]
    pub fn new(width: Vec<f32>, level: Vec<f32>) -> Self {
        Self { width, level }
    }

    /// Soft-tissue window used when nothing better is known
    #[must_use]
    pub fn fallback() -> Self {
        Self::new(vec![Self::DEFAULT_WIDTH], vec![Self::DEFAULT_LEVEL])
    }

    /// Non-empty and paired
    #[inline]
    #[must_use]
    pub fn is_usable(&self) -> bool {
        !self.width.is_empty() && self.width.len() == self.level.len()
    }

    /// (width, level) of the primary window
    #[must_use]
    pub fn primary(&self) -> Option<(f32, f32)> {
        Some((*self.width.first()?, *self.level.first()?))
    }
}

impl Default for Windowing {
    fn default() -> Self {
        Self::fallback()
    }
}

impl fmt::Display for Windowing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "width={:?}, level={:?}", self.width, self.level)
    }
}

/// Everything the extraction strategy needs to render one frame
#[derive(Debug, Clone, Serialize)]
pub struct ImageData {
    pub dimensions: ImageDimensions,
    pub bytes_per_pixel: i32,
    pub samples_per_pixel: u16,
    #[serde(skip)]
    pub pixel_data: Vec<u8>,
    pub slope: f64,
    pub intercept: f64,
    pub photometric_interpretation: PhotometricInterpretation,
    pub pixel_representation: PixelRepresentation,
    pub windowing: Windowing,
}

impl ImageData {
    #[inline]
    #[must_use]
    pub fn rescale(&self) -> RescaleParams {
        RescaleParams::new(self.slope, self.intercept)
    }

    /// Buffer length implied by dimensions and sample layout
    #[must_use]
    pub fn expected_buffer_length(&self) -> Option<usize> {
        let bytes_per_pixel = u64::try_from(self.bytes_per_pixel).ok()?;
        let len = self
            .dimensions
            .pixel_count()
            .checked_mul(bytes_per_pixel)?
            .checked_mul(u64::from(self.samples_per_pixel))?;
        usize::try_from(len).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_rescale_to_hounsfield() {
        let rescale = RescaleParams::new(1.0, -1024.0);
        assert_relative_eq!(rescale.apply(0.0), -1024.0);
        assert_relative_eq!(rescale.apply(2000.0), 976.0);
    }

    #[test]
    fn test_windowing_usability() {
        assert!(Windowing::fallback().is_usable());
        assert!(!Windowing::new(vec![], vec![]).is_usable());
        assert!(!Windowing::new(vec![400.0, 100.0], vec![40.0]).is_usable());
        assert_eq!(Windowing::fallback().primary(), Some((400.0, 40.0)));
    }

    #[test]
    fn test_expected_buffer_length() {
        let data = ImageData {
            dimensions: ImageDimensions::new(4, 3),
            bytes_per_pixel: 2,
            samples_per_pixel: 1,
            pixel_data: vec![],
            slope: 1.0,
            intercept: 0.0,
            photometric_interpretation: PhotometricInterpretation::Monochrome2,
            pixel_representation: PixelRepresentation::Unsigned,
            windowing: Windowing::fallback(),
        };
        assert_eq!(data.expected_buffer_length(), Some(24));
    }

    #[test]
    fn test_pixel_representation_from_tag_value() {
        assert_eq!(PixelRepresentation::from(0), PixelRepresentation::Unsigned);
        assert_eq!(PixelRepresentation::from(1), PixelRepresentation::Signed);
    }
}
