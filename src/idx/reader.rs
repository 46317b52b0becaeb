//! Reading side of the IDX format: enough to validate a converted pair and
//! hand `(pixels, label)` samples to a training loop.
//!
//! Both element types written by this crate are accepted. Every element is
//! widened to `u32`, so a byte tensor and an int tensor of the same images
//! compare equal on their low byte.
use std::path::Path;

use crate::error::{Error, Result};
use crate::idx::data_type::IdxDataType;
use crate::idx::header::IdxHeader;

/// A fully decoded IDX tensor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdxTensor {
    pub data_type: IdxDataType,
    pub dims: Vec<u32>,
    /// Flat row-major payload, one entry per element.
    pub data: Vec<u32>,
}

/// One image paired with the label stored at the same position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabeledSample {
    pub pixels: Vec<u32>,
    pub label: u32,
}

impl IdxTensor {
    /// Parses an in-memory IDX file.
    pub fn parse(bytes: &[u8]) -> Result<IdxTensor> {
        let header = IdxHeader::parse(bytes)?;

        let element_count = header
            .dims
            .iter()
            .try_fold(1usize, |acc, &d| acc.checked_mul(d as usize))
            .ok_or_else(|| {
                Error::malformed(format!("dimensions {:?} overflow usize", header.dims))
            })?;
        let width = header.data_type.element_width();
        let payload_len = element_count
            .checked_mul(width)
            .ok_or_else(|| Error::malformed("payload length overflows usize"))?;

        let payload = &bytes[header.byte_len()..];
        if payload.len() != payload_len {
            return Err(Error::malformed(format!(
                "header declares {:?} elements of {} byte(s) ({} payload bytes), \
                 but {} payload bytes are present",
                header.dims,
                width,
                payload_len,
                payload.len()
            )));
        }

        let data = match header.data_type {
            IdxDataType::UnsignedByte => payload.iter().map(|&b| b as u32).collect(),
            IdxDataType::Int => payload
                .chunks_exact(4)
                .map(|c| u32::from_be_bytes([c[0], c[1], c[2], c[3]]))
                .collect(),
        };

        Ok(IdxTensor {
            data_type: header.data_type,
            dims: header.dims,
            data,
        })
    }

    /// Reads and parses an IDX file from disk.
    pub fn read(path: &Path) -> Result<IdxTensor> {
        let bytes = std::fs::read(path).map_err(|e| Error::io(path, e))?;
        IdxTensor::parse(&bytes)
    }

    /// Number of items along the first dimension.
    pub fn len(&self) -> usize {
        self.dims.first().copied().unwrap_or(0) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Elements per item (product of all dimensions after the first).
    pub fn item_size(&self) -> usize {
        self.dims.iter().skip(1).map(|&d| d as usize).product()
    }
}

/// Pairs each image in `images` with the label at the same index in `labels`.
///
/// `labels` must be one-dimensional and both tensors must agree on the
/// number of items.
pub fn load_labeled_samples(images: &IdxTensor, labels: &IdxTensor) -> Result<Vec<LabeledSample>> {
    if labels.dims.len() != 1 {
        return Err(Error::malformed(format!(
            "label tensor must have 1 dimension, got {}",
            labels.dims.len()
        )));
    }
    if images.len() != labels.len() {
        return Err(Error::malformed(format!(
            "image file declares {} items but label file declares {}",
            images.len(),
            labels.len()
        )));
    }

    let item_size = images.item_size();
    if item_size == 0 {
        return Ok(labels
            .data
            .iter()
            .map(|&label| LabeledSample { pixels: Vec::new(), label })
            .collect());
    }

    Ok(images
        .data
        .chunks_exact(item_size)
        .zip(labels.data.iter())
        .map(|(pixels, &label)| LabeledSample {
            pixels: pixels.to_vec(),
            label,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn label_file(labels: &[u8]) -> Vec<u8> {
        let mut bytes = vec![0, 0, 0x08, 1];
        bytes.extend_from_slice(&(labels.len() as u32).to_be_bytes());
        bytes.extend_from_slice(labels);
        bytes
    }

    #[test]
    fn test_parse_byte_images() {
        let mut bytes = vec![0, 0, 0x08, 3, 0, 0, 0, 2, 0, 0, 0, 1, 0, 0, 0, 2];
        bytes.extend_from_slice(&[10, 20, 30, 40]);
        let t = IdxTensor::parse(&bytes).unwrap();
        assert_eq!(t.dims, vec![2, 1, 2]);
        assert_eq!(t.item_size(), 2);
        assert_eq!(t.data, vec![10, 20, 30, 40]);
        assert!(!t.is_empty());
    }

    #[test]
    fn test_parse_zero_item_tensor() {
        let bytes = vec![0, 0, 0x08, 3, 0, 0, 0, 0, 0, 0, 0, 4, 0, 0, 0, 4];
        let t = IdxTensor::parse(&bytes).unwrap();
        assert!(t.is_empty());
        assert_eq!(t.item_size(), 16);
        assert!(t.data.is_empty());
    }

    #[test]
    fn test_parse_int_labels() {
        let bytes = vec![0, 0, 0x0C, 1, 0, 0, 0, 2, 0, 0, 0, 1, 0, 0, 0, 2];
        let t = IdxTensor::parse(&bytes).unwrap();
        assert_eq!(t.data_type, IdxDataType::Int);
        assert_eq!(t.data, vec![1, 2]);
    }

    #[test]
    fn test_parse_rejects_trailing_bytes() {
        let mut bytes = label_file(&[1, 2]);
        bytes.push(9);
        assert!(IdxTensor::parse(&bytes).is_err());
    }

    #[test]
    fn test_parse_rejects_short_payload() {
        let mut bytes = label_file(&[1, 2, 3]);
        bytes.pop();
        let err = IdxTensor::parse(&bytes).unwrap_err();
        assert!(err.to_string().contains("payload"));
    }

    #[test]
    fn test_samples_pair_by_position() {
        let images = IdxTensor {
            data_type: IdxDataType::UnsignedByte,
            dims: vec![3, 1, 1],
            data: vec![7, 8, 9],
        };
        let labels = IdxTensor::parse(&label_file(&[1, 1, 2])).unwrap();
        let samples = load_labeled_samples(&images, &labels).unwrap();
        assert_eq!(samples.len(), 3);
        assert_eq!(samples[2], LabeledSample { pixels: vec![9], label: 2 });
    }

    #[test]
    fn test_samples_reject_count_mismatch() {
        let images = IdxTensor {
            data_type: IdxDataType::UnsignedByte,
            dims: vec![2, 1, 1],
            data: vec![7, 8],
        };
        let labels = IdxTensor::parse(&label_file(&[1])).unwrap();
        assert!(load_labeled_samples(&images, &labels).is_err());
    }
}
