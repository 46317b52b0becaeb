use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::dataset::pixel::read_dimensions;
use crate::error::{Error, Result};

/// One class folder: its name, the label code assigned to it and the image
/// files it directly contains, sorted by file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassDir {
    pub label: String,
    /// 1-based position of the class in sorted order.
    pub code: u32,
    pub files: Vec<PathBuf>,
}

/// Result of the first (header-only) pass over a dataset root.
///
/// Classes are sorted by folder name so label codes are stable across runs
/// and platforms. `height`/`width` come from the first image of the first
/// class and every other image has already been checked against them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetLayout {
    pub classes: Vec<ClassDir>,
    pub height: u32,
    pub width: u32,
}

impl DatasetLayout {
    /// Total number of images across all classes.
    pub fn sample_count(&self) -> usize {
        self.classes.iter().map(|c| c.files.len()).sum()
    }

    pub fn class_count(&self) -> usize {
        self.classes.len()
    }
}

/// Scans `root` for class folders without decoding pixel data.
///
/// Immediate subdirectories become classes; regular files inside them are
/// images. Anything else (stray files in the root, nested folders inside a
/// class) is skipped with a warning.
///
/// # Errors
/// - `InvalidInput`  — `root` is not a directory
/// - `DatasetEmpty`  — no class folders, or the first class has no images
/// - `ImageDecode`   — an image header cannot be read
/// - `ShapeMismatch` — an image differs in size from the first one
pub fn scan_dataset(root: &Path) -> Result<DatasetLayout> {
    if !root.is_dir() {
        return Err(Error::InvalidInput { path: root.to_path_buf() });
    }

    let mut classes: Vec<ClassDir> = Vec::new();
    for dir in sorted_entries(root)? {
        if !dir.is_dir() {
            warn!(path = %dir.display(), "skipping non-directory entry in dataset root");
            continue;
        }
        let files = list_images(&dir)?;
        let label = dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        debug!(class = %label, images = files.len(), "found class folder");
        classes.push(ClassDir {
            label,
            code: classes.len() as u32 + 1,
            files,
        });
    }

    let first = match classes.first() {
        None => {
            return Err(Error::DatasetEmpty {
                path: root.to_path_buf(),
                reason: "no class subdirectories".to_owned(),
            })
        }
        Some(class) => match class.files.first() {
            None => {
                return Err(Error::DatasetEmpty {
                    path: root.to_path_buf(),
                    reason: format!("first class '{}' contains no images", class.label),
                })
            }
            Some(path) => path.clone(),
        },
    };

    let (width, height) = read_dimensions(&first)?;

    for path in classes.iter().flat_map(|c| c.files.iter()).skip(1) {
        let (w, h) = read_dimensions(path)?;
        if (w, h) != (width, height) {
            return Err(Error::ShapeMismatch {
                path: path.clone(),
                expected_width: width,
                expected_height: height,
                actual_width: w,
                actual_height: h,
            });
        }
    }

    Ok(DatasetLayout {
        classes,
        height,
        width,
    })
}

/// Lists the entries of `dir` sorted by file name.
fn sorted_entries(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut paths = fs::read_dir(dir)
        .map_err(|e| Error::io(dir, e))?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<Vec<_>>>()
        .map_err(|e| Error::io(dir, e))?;
    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(paths)
}

fn list_images(class_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for path in sorted_entries(class_dir)? {
        if path.is_file() {
            files.push(path);
        } else {
            warn!(path = %path.display(), "skipping non-file entry inside class folder");
        }
    }
    Ok(files)
}
