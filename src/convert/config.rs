use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Suffix appended to the base name for the image tensor file.
pub const IMAGES_SUFFIX: &str = "_images.idx3-long";
/// Suffix appended to the base name for the label tensor file.
pub const LABELS_SUFFIX: &str = "_labels.idx3-long";

/// Parameters for a single directory → IDX conversion.
///
/// # Fields
/// - `input_root`       — folder whose immediate subfolders are the classes
/// - `output_root`      — existing folder that receives the two IDX files
/// - `output_base_name` — file stem, e.g. `train` → `train_images.idx3-long`
/// - `grayscale`        — one byte per pixel/label (0x08) instead of
///                        4-byte integers (0x0C)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConvertConfig {
    pub input_root: PathBuf,
    pub output_root: PathBuf,
    pub output_base_name: String,
    #[serde(default = "default_grayscale")]
    pub grayscale: bool,
}

impl ConvertConfig {
    pub fn new(
        input_root: impl Into<PathBuf>,
        output_root: impl Into<PathBuf>,
        output_base_name: impl Into<String>,
        grayscale: bool,
    ) -> Self {
        ConvertConfig {
            input_root: input_root.into(),
            output_root: output_root.into(),
            output_base_name: output_base_name.into(),
            grayscale,
        }
    }

    pub fn images_path(&self) -> PathBuf {
        self.output_root
            .join(format!("{}{}", self.output_base_name, IMAGES_SUFFIX))
    }

    pub fn labels_path(&self) -> PathBuf {
        self.output_root
            .join(format!("{}{}", self.output_base_name, LABELS_SUFFIX))
    }
}

fn default_grayscale() -> bool {
    true
}

fn default_splits() -> Vec<String> {
    vec!["train".to_owned(), "test".to_owned()]
}

/// A batch of conversions described in a JSON file.
///
/// Each split name is both the subfolder of `images_root` that is converted
/// and the base name of its output files in `idx_folder`:
///
/// ```json
/// { "images_root": "data/png", "idx_folder": "data/idx", "grayscale": true }
/// ```
///
/// converts `data/png/train` and `data/png/test` into
/// `data/idx/train_*.idx3-long` and `data/idx/test_*.idx3-long`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionPlan {
    pub images_root: PathBuf,
    pub idx_folder: PathBuf,
    #[serde(default = "default_grayscale")]
    pub grayscale: bool,
    #[serde(default = "default_splits")]
    pub splits: Vec<String>,
}

impl ConversionPlan {
    /// Deserializes a `ConversionPlan` from a JSON file.
    pub fn load_json(path: &Path) -> Result<ConversionPlan> {
        let file = std::fs::File::open(path).map_err(|e| Error::io(path, e))?;
        let reader = std::io::BufReader::new(file);
        serde_json::from_reader(reader).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Serializes the plan to a pretty-printed JSON file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let file = std::fs::File::create(path).map_err(|e| Error::io(path, e))?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// One conversion job per split, in the order listed.
    pub fn jobs(&self) -> Vec<ConvertConfig> {
        self.splits
            .iter()
            .map(|split| {
                ConvertConfig::new(
                    self.images_root.join(split),
                    &self.idx_folder,
                    split.as_str(),
                    self.grayscale,
                )
            })
            .collect()
    }
}
