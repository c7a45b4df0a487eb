//! Modality-specific image extraction
//!
//! A strategy turns filled [`ImageData`] into an 8-bit raster. Only CT has one;
//! the factory rejects every other modality up front.

use super::matrix::RawView;
use super::units::to_physical_units;
use crate::dicom::validation::validate_image_data;
use crate::dicom::Modality;
use crate::error::{ExportError, Result};
use crate::types::ImageData;
use crate::windowing;
use image::DynamicImage;
use tracing::debug;

pub trait ExtractionStrategy: Send + Sync {
    /// Render the first frame of `data` into an 8-bit image
    fn extract(&self, data: &ImageData) -> Result<DynamicImage>;

    fn name(&self) -> &'static str;
}

/// Hounsfield conversion followed by VOI windowing
#[derive(Debug, Default, Clone, Copy)]
pub struct CtStrategy;

impl ExtractionStrategy for CtStrategy {
    fn extract(&self, data: &ImageData) -> Result<DynamicImage> {
        validate_image_data(data).map_err(|e| ExportError::ExtractionFailed(format!("{e:#}")))?;

        let raw = RawView::from_image_data(data)
            .map_err(|e| ExportError::ExtractionFailed(format!("{e:#}")))?;
        debug!(
            "Extracting {}x{} image with {} channel(s), {} byte(s) per sample",
            raw.width(),
            raw.height(),
            raw.channels(),
            data.bytes_per_pixel
        );

        let hounsfield = to_physical_units(&raw, data.slope, data.intercept);
        let mut image = windowing::apply(&hounsfield, &data.windowing)?;

        if data.photometric_interpretation.should_invert() {
            debug!("Inverting {} image", data.photometric_interpretation);
            image.invert();
        }

        Ok(image)
    }

    fn name(&self) -> &'static str {
        "CT"
    }
}

pub struct StrategyFactory;

impl StrategyFactory {
    /// Select the extraction strategy for `modality`
    pub fn create(modality: Modality) -> Result<Box<dyn ExtractionStrategy>> {
        match modality {
            Modality::ComputedTomography => Ok(Box::new(CtStrategy)),
            Modality::UltrasoundBoneDensitometry
            | Modality::BiomagneticImaging
            | Modality::XrayBoneDensitometry
            | Modality::ComputedRadiography
            | Modality::Diaphanography
            | Modality::DigitalRadiography
            | Modality::IntraOralRadiography
            | Modality::Mammography
            | Modality::MagneticResonance
            | Modality::Plan
            | Modality::PositronEmissionTomography
            | Modality::RtImage
            | Modality::RtDose
            | Modality::RtStruct
            | Modality::RtPlan
            | Modality::RtRecord
            | Modality::Segmentation
            | Modality::Ultrasound => Err(ExportError::UnsupportedForExport(
                modality.code().to_string(),
            )),
        }
    }
}
