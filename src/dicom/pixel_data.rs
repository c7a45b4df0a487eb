//! DICOM pixel data extraction
//!
//! Native 16-bit words are taken from the values the parser already decoded;
//! everything else goes through `dicom-pixeldata`. Either way the buffer is
//! little-endian. Geometry and calibration attributes are read alongside, so a
//! [`PixelSource`] answers everything needed to build the image data.

use super::{DicomFile, PhotometricInterpretation};
use crate::types::{PixelRepresentation, RescaleParams};
use anyhow::{Context, Result};
use dicom::core::value::{PrimitiveValue, Value};
use dicom::dictionary_std::tags;
use dicom::pixeldata::PixelDecoder;

/// Decoded frame buffer plus the attributes describing its layout
pub trait PixelSource {
    /// (columns, rows)
    fn dimensions(&self) -> (u64, u64);

    /// Length in bytes of one decoded frame
    fn buffer_length(&self) -> usize;

    fn get_buffer(&self) -> Result<Vec<u8>>;

    fn samples_per_pixel(&self) -> u16;

    /// Bytes per pixel across all samples
    fn pixel_size(&self) -> u16;

    fn slope(&self) -> f64;

    fn intercept(&self) -> f64;

    fn photometric_type(&self) -> PhotometricInterpretation;

    fn pixel_representation(&self) -> PixelRepresentation;
}

/// [`PixelSource`] over an opened DICOM file
pub struct DicomPixelSource<'a> {
    obj: &'a DicomFile,
    rows: u32,
    cols: u32,
    samples_per_pixel: u16,
    bits_allocated: u16,
    rescale: RescaleParams,
    photometric_interpretation: PhotometricInterpretation,
    pixel_representation: PixelRepresentation,
}

impl<'a> DicomPixelSource<'a> {
    pub fn new(obj: &'a DicomFile) -> Result<Self> {
        let rows = obj
            .get(tags::ROWS)
            .and_then(|e| e.to_int::<u32>().ok())
            .context("Missing or invalid Rows tag")?;

        let cols = obj
            .get(tags::COLUMNS)
            .and_then(|e| e.to_int::<u32>().ok())
            .context("Missing or invalid Columns tag")?;

        let bits_allocated = obj
            .get(tags::BITS_ALLOCATED)
            .and_then(|e| e.to_int::<u16>().ok())
            .context("Missing or invalid Bits Allocated tag")?;

        let samples_per_pixel = obj
            .get(tags::SAMPLES_PER_PIXEL)
            .and_then(|e| e.to_int::<u16>().ok())
            .unwrap_or(1);

        let pixel_representation = obj
            .get(tags::PIXEL_REPRESENTATION)
            .and_then(|e| e.to_int::<u16>().ok())
            .map_or(PixelRepresentation::Unsigned, PixelRepresentation::from);

        // Absent rescale tags mean stored values are already in output units
        let slope = obj
            .get(tags::RESCALE_SLOPE)
            .and_then(|e| e.to_float64().ok())
            .unwrap_or(1.0);

        let intercept = obj
            .get(tags::RESCALE_INTERCEPT)
            .and_then(|e| e.to_float64().ok())
            .unwrap_or(0.0);

        let photometric_interpretation = obj
            .get(tags::PHOTOMETRIC_INTERPRETATION)
            .and_then(|e| e.value().to_str().ok())
            .and_then(|s| s.parse().ok())
            .unwrap_or(PhotometricInterpretation::Monochrome2);

        Ok(Self {
            obj,
            rows,
            cols,
            samples_per_pixel,
            bits_allocated,
            rescale: RescaleParams::new(slope, intercept),
            photometric_interpretation,
            pixel_representation,
        })
    }
}

impl PixelSource for DicomPixelSource<'_> {
    fn dimensions(&self) -> (u64, u64) {
        (u64::from(self.cols), u64::from(self.rows))
    }

    fn buffer_length(&self) -> usize {
        self.cols as usize * self.rows as usize * usize::from(self.pixel_size())
    }

    fn get_buffer(&self) -> Result<Vec<u8>> {
        extract_pixel_data(self.obj)
    }

    fn samples_per_pixel(&self) -> u16 {
        self.samples_per_pixel
    }

    fn pixel_size(&self) -> u16 {
        (self.bits_allocated / 8) * self.samples_per_pixel
    }

    fn slope(&self) -> f64 {
        self.rescale.slope
    }

    fn intercept(&self) -> f64 {
        self.rescale.intercept
    }

    fn photometric_type(&self) -> PhotometricInterpretation {
        self.photometric_interpretation
    }

    fn pixel_representation(&self) -> PixelRepresentation {
        self.pixel_representation
    }
}

/// Frame buffer of `obj` as little-endian bytes
pub fn extract_pixel_data(obj: &DicomFile) -> Result<Vec<u8>> {
    let pixel_data = obj.get(tags::PIXEL_DATA).context("Missing pixel data")?;

    // The parser has already decoded OW words in the file's byte order
    if let Value::Primitive(PrimitiveValue::U16(words)) = pixel_data.value() {
        return Ok(words.iter().flat_map(|w| w.to_le_bytes()).collect());
    }

    extract_decoded_pixel_data(obj)
}

/// Extract decoded pixel data (handles compression)
fn extract_decoded_pixel_data(obj: &DicomFile) -> Result<Vec<u8>> {
    let decoded_pixel_data = obj
        .decode_pixel_data()
        .context("Failed to decode pixel data")?;

    // Raw samples, no LUTs applied
    Ok(decoded_pixel_data.data().to_vec())
}
