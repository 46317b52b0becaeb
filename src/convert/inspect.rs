use std::collections::BTreeMap;
use std::path::Path;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::idx::{load_labeled_samples, IdxDataType, IdxTensor};

/// Shape and label histogram of an images/labels IDX pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PairReport {
    pub data_type: IdxDataType,
    pub sample_count: usize,
    pub image_dims: Vec<u32>,
    /// Number of samples per label code.
    pub label_counts: BTreeMap<u32, usize>,
}

/// Reads both files, checks that they describe the same samples and counts
/// how many samples carry each label.
pub fn inspect_pair(images_path: &Path, labels_path: &Path) -> Result<PairReport> {
    let images = IdxTensor::read(images_path)?;
    let labels = IdxTensor::read(labels_path)?;

    if images.data_type != labels.data_type {
        return Err(Error::malformed(format!(
            "image file has element type 0x{:02X} but label file has 0x{:02X}",
            images.data_type.code(),
            labels.data_type.code()
        )));
    }

    let samples = load_labeled_samples(&images, &labels)?;
    let mut label_counts = BTreeMap::new();
    for sample in &samples {
        *label_counts.entry(sample.label).or_insert(0) += 1;
    }

    Ok(PairReport {
        data_type: images.data_type,
        sample_count: samples.len(),
        image_dims: images.dims,
        label_counts,
    })
}
