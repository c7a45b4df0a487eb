//! Body-part keyed window presets
//!
//! The table is a JSON object mapping a normalized body-part name to a
//! [`Windowing`]:
//!
//! ```json
//! { "Brain": { "width": [80], "level": [40] } }
//! ```

use crate::error::{ExportError, Result};
use crate::types::Windowing;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, error};

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct WindowPresetTable {
    presets: HashMap<String, Windowing>,
}

impl WindowPresetTable {
    /// Read and parse a preset table from disk
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            ExportError::PresetLoadOrParseFailed(format!("{}: {e}", path.display()))
        })?;
        let table = Self::from_json(&contents).map_err(|e| match e {
            ExportError::PresetLoadOrParseFailed(msg) => {
                ExportError::PresetLoadOrParseFailed(format!("{}: {msg}", path.display()))
            }
            other => other,
        })?;

        debug!("Loaded {} window presets from {}", table.len(), path.display());
        Ok(table)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| ExportError::PresetLoadOrParseFailed(e.to_string()))
    }

    /// Look up a preset by its normalized body-part key
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Windowing> {
        self.presets.get(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.presets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }
}

impl FromIterator<(String, Windowing)> for WindowPresetTable {
    fn from_iter<I: IntoIterator<Item = (String, Windowing)>>(iter: I) -> Self {
        Self {
            presets: iter.into_iter().collect(),
        }
    }
}

/// Lowercase the whole value, then uppercase its first letter ("BRAIN" -> "Brain")
#[must_use]
pub fn normalize_body_part(value: &str) -> Option<String> {
    let lower = value.to_lowercase();
    let mut chars = lower.chars();
    let Some(first) = chars.next() else {
        error!("Failed to normalize body part tag. reason: tag is empty");
        return None;
    };

    Some(first.to_uppercase().chain(chars).collect())
}
