//! The DICOM image object and its load pipeline
//!
//! A [`DicomImage`] starts [`LoadState::Unloaded`]. The first call to
//! [`DicomImage::load`] runs the whole pipeline once and records the outcome;
//! later calls return that outcome without touching the file again.

use crate::dicom::{
    open_dicom_file, read_tag, resolve_modality, DataSet, DicomFile, DicomPixelSource, Modality,
    PixelSource, TagIdentifier,
};
use crate::error::{ExportError, Result};
use crate::image::{write_image, StrategyFactory};
use crate::types::{ImageData, ImageDimensions};
use crate::windowing::{resolve_windowing, WindowPresetTable};
use image::DynamicImage;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, error, info};

/// Result of a successful load
#[derive(Debug, Clone)]
pub struct LoadedImage {
    pub modality: Modality,
    pub data: ImageData,
    pub image: DynamicImage,
}

#[derive(Debug, Clone, Default)]
pub enum LoadState {
    #[default]
    Unloaded,
    Loaded(Box<LoadedImage>),
    Failed(ExportError),
}

impl LoadState {
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Unloaded)
    }

    fn outcome(&self) -> Result<&LoadedImage> {
        match self {
            Self::Loaded(loaded) => Ok(&**loaded),
            Self::Failed(e) => Err(e.clone()),
            Self::Unloaded => Err(ExportError::MetadataUnavailable(
                "image has not been loaded".to_string(),
            )),
        }
    }
}

/// One DICOM file on its way to a windowed 8-bit image
#[derive(Debug)]
pub struct DicomImage {
    path: PathBuf,
    output_path: Option<PathBuf>,
    presets: Option<Arc<WindowPresetTable>>,
    dataset: Option<DicomFile>,
    state: LoadState,
}

impl DicomImage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            output_path: None,
            presets: None,
            dataset: None,
            state: LoadState::Unloaded,
        }
    }

    /// Use `presets` when the object carries no usable window
    #[must_use]
    pub fn with_presets(mut self, presets: Arc<WindowPresetTable>) -> Self {
        self.presets = Some(presets);
        self
    }

    /// Write the rendered image to `path` as part of loading
    #[must_use]
    pub fn with_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = Some(path.into());
        self
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn state(&self) -> &LoadState {
        &self.state
    }

    /// Filled image data, present only after a successful load
    #[must_use]
    pub fn image_data(&self) -> Option<&ImageData> {
        match &self.state {
            LoadState::Loaded(loaded) => Some(&loaded.data),
            LoadState::Unloaded | LoadState::Failed(_) => None,
        }
    }

    #[must_use]
    pub fn image(&self) -> Option<&DynamicImage> {
        match &self.state {
            LoadState::Loaded(loaded) => Some(&loaded.image),
            LoadState::Unloaded | LoadState::Failed(_) => None,
        }
    }

    /// Run the pipeline, once
    ///
    /// # Errors
    ///
    /// Every non-recoverable [`ExportError`]; the same error is returned on
    /// every later call.
    pub fn load(&mut self) -> Result<&LoadedImage> {
        if !self.state.is_terminal() {
            self.state = match self.run_pipeline() {
                Ok(loaded) => LoadState::Loaded(Box::new(loaded)),
                Err(e) => {
                    error!("Failed to load {}: {e}", self.path.display());
                    LoadState::Failed(e)
                }
            };
        }

        self.state.outcome()
    }

    /// Read a tag from the opened dataset
    ///
    /// The dataset is opened by [`load`](Self::load); before that every tag
    /// reads as not found.
    pub fn read_tag(&self, tag: TagIdentifier) -> Result<String> {
        match &self.dataset {
            Some(dataset) => read_tag(dataset, tag),
            None => Err(ExportError::TagNotFound(tag.address())),
        }
    }

    fn run_pipeline(&mut self) -> Result<LoadedImage> {
        info!("Loading {}", self.path.display());

        let dataset: &DicomFile = self.dataset.insert(open_dicom_file(&self.path)?);

        // Absent Modality is as unusable as an unknown one
        let code = read_tag(dataset, TagIdentifier::Modality)
            .map_err(|_| ExportError::UnsupportedModality(String::new()))?;
        let modality = resolve_modality(&code)?;
        let strategy = StrategyFactory::create(modality)?;
        debug!("Using {} extraction strategy", strategy.name());

        let source = DicomPixelSource::new(dataset)
            .map_err(|e| ExportError::ExtractionFailed(format!("{e:#}")))?;
        let data = fill_image_data(&source, dataset, self.presets.as_deref())?;
        let image = strategy.extract(&data)?;

        if let Some(output_path) = &self.output_path {
            write_image(&image, output_path)?;
        }

        Ok(LoadedImage {
            modality,
            data,
            image,
        })
    }
}

/// Gather everything the extraction strategy needs from `source` and `dataset`
///
/// # Errors
///
/// `PixelBufferFetchFailed` when the buffer cannot be fetched, and
/// `ExtractionFailed` for a source without samples.
pub fn fill_image_data<P, S>(
    source: &P,
    dataset: &S,
    presets: Option<&WindowPresetTable>,
) -> Result<ImageData>
where
    P: PixelSource + ?Sized,
    S: DataSet + ?Sized,
{
    let pixel_data = source
        .get_buffer()
        .map_err(|e| ExportError::PixelBufferFetchFailed(format!("{e:#}")))?;

    let samples_per_pixel = source.samples_per_pixel();
    if samples_per_pixel == 0 {
        return Err(ExportError::ExtractionFailed(
            "Samples per pixel is zero".to_string(),
        ));
    }

    let (width, height) = source.dimensions();
    let data = ImageData {
        dimensions: ImageDimensions::new(width, height),
        bytes_per_pixel: i32::from(source.pixel_size() / samples_per_pixel),
        samples_per_pixel,
        pixel_data,
        slope: source.slope(),
        intercept: source.intercept(),
        photometric_interpretation: source.photometric_type(),
        pixel_representation: source.pixel_representation(),
        windowing: resolve_windowing(dataset, presets),
    };

    debug!(
        "Image data: {}, {} byte(s) x {} sample(s), frame {} of {} buffer bytes, window {}",
        data.dimensions,
        data.bytes_per_pixel,
        data.samples_per_pixel,
        source.buffer_length(),
        data.pixel_data.len(),
        data.windowing
    );

    Ok(data)
}
