use anyhow::{bail, Result};
use crate::dicom::PhotometricInterpretation;
use crate::types::{ImageData, ImageDimensions};

#[inline]
pub fn validate_dimensions(dimensions: &ImageDimensions) -> Result<()> {
    if !dimensions.is_valid() {
        bail!("Invalid image dimensions {dimensions}");
    }

    Ok(())
}

#[inline]
pub fn validate_photometric_samples(
    photometric_interpretation: &PhotometricInterpretation,
    samples_per_pixel: u16,
) -> Result<()> {
    let is_valid = match (photometric_interpretation, samples_per_pixel) {
        (pi, 1) => pi.is_grayscale() || *pi == PhotometricInterpretation::Unknown,
        (pi, 3) => !pi.is_grayscale(),
        _ => false,
    };

    if !is_valid {
        bail!(
            "Inconsistent photometric interpretation {} with samples per pixel {}",
            photometric_interpretation,
            samples_per_pixel
        );
    }

    Ok(())
}

#[inline]
pub fn validate_bytes_per_pixel(bytes_per_pixel: i32) -> Result<()> {
    if !matches!(bytes_per_pixel, 1 | 2) {
        bail!(
            "Unsupported bytes per pixel: {bytes_per_pixel} (expected 1 or 2)"
        );
    }

    Ok(())
}

/// The buffer must hold at least one full frame; anything past it is ignored
#[inline]
pub fn validate_buffer_length(actual: usize, expected: Option<usize>) -> Result<()> {
    let Some(expected) = expected else {
        bail!("Pixel buffer size overflows");
    };

    if actual < expected {
        bail!("Pixel buffer holds {actual} bytes, expected {expected}");
    }

    Ok(())
}

pub fn validate_image_data(data: &ImageData) -> Result<()> {
    validate_dimensions(&data.dimensions)?;
    validate_bytes_per_pixel(data.bytes_per_pixel)?;
    validate_photometric_samples(&data.photometric_interpretation, data.samples_per_pixel)?;
    validate_buffer_length(data.pixel_data.len(), data.expected_buffer_length())?;
    if !data.windowing.is_usable() {
        bail!("Unusable windowing {}", data.windowing);
    }
    Ok(())
}
