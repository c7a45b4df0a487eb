//! DICOM file access: tag registry, attribute reading, modality
//! classification and pixel data extraction.

mod dataset;
mod modality;
mod photometric;
mod pixel_data;
mod tags;
pub(crate) mod validation;

// Re-export public API
pub use dataset::{read_tag, DataSet};
pub use modality::{resolve_modality, Modality};
pub use photometric::PhotometricInterpretation;
pub use pixel_data::{extract_pixel_data, DicomPixelSource, PixelSource};
pub use tags::{resolve, TagAddress, TagIdentifier};

use crate::error::{ExportError, Result};
use dicom::object::{open_file, FileDicomObject, InMemDicomObject, StandardDataDictionary};
use std::path::Path;

/// An opened DICOM file
pub type DicomFile = FileDicomObject<InMemDicomObject<StandardDataDictionary>>;

/// Open and parse a DICOM file
pub fn open_dicom_file(file_path: &Path) -> Result<DicomFile> {
    open_file(file_path).map_err(|e| {
        ExportError::DatasetReadFailed(format!("{}: {e}", file_path.display()))
    })
}
