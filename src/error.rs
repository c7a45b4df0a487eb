use crate::dicom::TagAddress;
use thiserror::Error;

/// Result type for export operations
pub type Result<T, E = ExportError> = std::result::Result<T, E>;

/// Failure taxonomy of the export pipeline
///
/// `TagNotFound` and `PresetLoadOrParseFailed` are recoverable and are turned
/// into fallbacks inside the pipeline; every other variant is terminal for a
/// `load()` call.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExportError {
    /// Attribute absent from the dataset or without a readable value
    #[error("DICOM tag not found: {0}")]
    TagNotFound(TagAddress),

    /// Modality code is not one this application knows about
    #[error("Incorrect or unsupported modality: '{0}'")]
    UnsupportedModality(String),

    /// Modality is known, but no extraction strategy exists for it
    #[error("Modality '{0}' is not supported for export, only CT images can be exported")]
    UnsupportedForExport(String),

    /// The decoder rejected the file
    #[error("Failed to read DICOM file: {0}")]
    DatasetReadFailed(String),

    /// Pixel buffer could not be fetched or decoded
    #[error("Failed to extract pixel data: {0}")]
    PixelBufferFetchFailed(String),

    /// Window preset table could not be read or parsed
    #[error("Failed to load window presets: {0}")]
    PresetLoadOrParseFailed(String),

    /// Image data was incomplete or inconsistent
    #[error("Failed to extract image data: {0}")]
    ExtractionFailed(String),

    /// Rendered image could not be encoded or written
    #[error("Failed to write image to disk: {0}")]
    OutputWriteFailed(String),

    /// Metadata requested from an object that holds no image data
    #[error("Image metadata unavailable: {0}")]
    MetadataUnavailable(String),
}

impl ExportError {
    /// Whether the pipeline may recover from this error with a fallback
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::TagNotFound(_) | Self::PresetLoadOrParseFailed(_)
        )
    }
}

impl From<image::ImageError> for ExportError {
    fn from(e: image::ImageError) -> Self {
        ExportError::OutputWriteFailed(e.to_string())
    }
}
