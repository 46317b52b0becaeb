use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::idx::IdxDataType;

/// Label code and image count for one class folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassSummary {
    /// Folder name.
    pub label: String,
    /// Value written to the label file for every image of this class.
    pub code: u32,
    pub count: usize,
}

/// What a finished conversion wrote.
///
/// The class table is the only record of which folder name maps to which
/// label code, so callers usually keep it next to the IDX files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionSummary {
    pub images_path: PathBuf,
    pub labels_path: PathBuf,
    pub data_type: IdxDataType,
    pub sample_count: usize,
    pub height: u32,
    pub width: u32,
    pub classes: Vec<ClassSummary>,
    /// Wall-clock duration of the conversion in milliseconds.
    pub elapsed_ms: u64,
}
