//! Two-dimensional sample buffers
//!
//! Samples are stored row-major with channels interleaved, matching the
//! layout of decoded DICOM pixel data.

use crate::types::{ImageData, PixelRepresentation};
use anyhow::{bail, Context, Result};

/// Stored values of one frame, typed by their on-disk width
#[derive(Debug, Clone, PartialEq)]
pub enum Samples<'a> {
    U8(&'a [u8]),
    I8(Vec<i8>),
    U16(Vec<u16>),
    I16(Vec<i16>),
}

/// Typed view over the raw pixel buffer of an [`ImageData`]
#[derive(Debug, Clone)]
pub struct RawView<'a> {
    width: u32,
    height: u32,
    channels: u16,
    samples: Samples<'a>,
}

impl<'a> RawView<'a> {
    /// Build a view over the first frame of `data`
    ///
    /// One byte per sample selects 8-bit samples, two bytes select 16-bit
    /// little-endian samples; both are signed when Pixel Representation says so.
    pub fn from_image_data(data: &'a ImageData) -> Result<Self> {
        let width = u32::try_from(data.dimensions.width).context("Image width out of range")?;
        let height = u32::try_from(data.dimensions.height).context("Image height out of range")?;
        let frame_len = data
            .expected_buffer_length()
            .context("Pixel buffer size overflows")?;

        let frame = data
            .pixel_data
            .get(..frame_len)
            .with_context(|| {
                format!(
                    "Pixel buffer holds {} bytes, expected {frame_len}",
                    data.pixel_data.len()
                )
            })?;

        let samples = match (data.bytes_per_pixel, data.pixel_representation) {
            (1, PixelRepresentation::Unsigned) => Samples::U8(frame),
            (1, PixelRepresentation::Signed) => {
                Samples::I8(frame.iter().map(|&b| i8::from_le_bytes([b])).collect())
            }
            (2, PixelRepresentation::Unsigned) => Samples::U16(
                frame
                    .chunks_exact(2)
                    .map(|chunk| u16::from_le_bytes([chunk[0], chunk[1]]))
                    .collect(),
            ),
            (2, PixelRepresentation::Signed) => Samples::I16(
                frame
                    .chunks_exact(2)
                    .map(|chunk| i16::from_le_bytes([chunk[0], chunk[1]]))
                    .collect(),
            ),
            (other, _) => bail!("Unsupported bytes per pixel: {other}"),
        };

        Ok(Self {
            width,
            height,
            channels: data.samples_per_pixel,
            samples,
        })
    }

    #[inline]
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    #[must_use]
    pub fn channels(&self) -> u16 {
        self.channels
    }

    #[inline]
    #[must_use]
    pub fn samples(&self) -> &Samples<'a> {
        &self.samples
    }

    #[must_use]
    pub fn len(&self) -> usize {
        match &self.samples {
            Samples::U8(s) => s.len(),
            Samples::I8(s) => s.len(),
            Samples::U16(s) => s.len(),
            Samples::I16(s) => s.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Apply `f` to every sample, widened to f64
    pub fn map_samples<T>(&self, f: impl Fn(f64) -> T) -> Vec<T> {
        match &self.samples {
            Samples::U8(s) => s.iter().map(|&v| f(f64::from(v))).collect(),
            Samples::I8(s) => s.iter().map(|&v| f(f64::from(v))).collect(),
            Samples::U16(s) => s.iter().map(|&v| f(f64::from(v))).collect(),
            Samples::I16(s) => s.iter().map(|&v| f(f64::from(v))).collect(),
        }
    }
}

/// Samples in physical units (Hounsfield units for CT)
#[derive(Debug, Clone, PartialEq)]
pub struct PhysicalMatrix {
    pub width: u32,
    pub height: u32,
    pub channels: u16,
    pub data: Vec<f32>,
}
