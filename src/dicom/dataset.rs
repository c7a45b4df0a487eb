//! Attribute access over a parsed dataset

use super::tags::{TagAddress, TagIdentifier};
use crate::error::{ExportError, Result};
use dicom::core::{DataDictionary, Tag};
use dicom::object::{FileDicomObject, InMemDicomObject};
use tracing::{debug, warn};

/// Read-only view of a dataset keyed by (group, element)
pub trait DataSet {
    fn has_element(&self, group: u16, element: u16) -> bool;

    /// Decoded value bytes of the element, `None` if absent or unreadable
    fn get_value(&self, group: u16, element: u16) -> Option<Vec<u8>>;
}

impl<D> DataSet for InMemDicomObject<D>
where
    D: DataDictionary + Clone,
{
    fn has_element(&self, group: u16, element: u16) -> bool {
        self.get(Tag(group, element)).is_some()
    }

    fn get_value(&self, group: u16, element: u16) -> Option<Vec<u8>> {
        self.get(Tag(group, element))
            .and_then(|e| e.value().to_str().ok())
            .map(|s| s.as_bytes().to_vec())
    }
}

impl<D> DataSet for FileDicomObject<InMemDicomObject<D>>
where
    D: DataDictionary + Clone,
{
    fn has_element(&self, group: u16, element: u16) -> bool {
        (**self).has_element(group, element)
    }

    fn get_value(&self, group: u16, element: u16) -> Option<Vec<u8>> {
        (**self).get_value(group, element)
    }
}

/// Read an attribute as its raw string content
///
/// Value padding (trailing spaces and NULs) is stripped.
pub fn read_tag<S: DataSet + ?Sized>(dataset: &S, tag: TagIdentifier) -> Result<String> {
    let TagAddress { group, element } = tag.address();

    if !dataset.has_element(group, element) {
        warn!("DICOM tag not found: ({group:04x},{element:04x})");
        return Err(ExportError::TagNotFound(tag.address()));
    }

    let Some(bytes) = dataset.get_value(group, element) else {
        warn!("DICOM tag ({group:04x},{element:04x}): failed to extract data element value");
        return Err(ExportError::TagNotFound(tag.address()));
    };

    debug!("Read DICOM tag ({group:04x},{element:04x})");
    let value = String::from_utf8_lossy(&bytes);
    Ok(value.trim_end_matches([' ', '\0']).to_string())
}
