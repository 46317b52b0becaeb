use crate::error::{Error, Result};
use crate::idx::data_type::IdxDataType;

/// IDX header: two reserved zero bytes, the element type code, the number of
/// dimensions, then one big-endian `u32` per dimension.
///
/// ```text
/// bytes  0-1:   0x00 0x00   (reserved)
/// byte   2:     type code   (0x08 uint8, 0x0C int32)
/// byte   3:     N           (number of dimensions)
/// bytes  4..:   N × u32     (dimension sizes, big-endian)
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdxHeader {
    pub data_type: IdxDataType,
    pub dims: Vec<u32>,
}

impl IdxHeader {
    pub fn new(data_type: IdxDataType, dims: Vec<u32>) -> Self {
        IdxHeader { data_type, dims }
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.byte_len());
        bytes.extend_from_slice(&[0x00, 0x00, self.data_type.code(), self.dims.len() as u8]);
        for dim in &self.dims {
            bytes.extend_from_slice(&dim.to_be_bytes());
        }
        bytes
    }

    /// Length of the encoded header in bytes.
    pub fn byte_len(&self) -> usize {
        4 + 4 * self.dims.len()
    }

    /// Product of all dimensions, i.e. the number of payload elements.
    pub fn element_count(&self) -> u64 {
        self.dims.iter().map(|&d| d as u64).product()
    }

    /// Parses and validates a header from the start of `bytes`.
    pub fn parse(bytes: &[u8]) -> Result<IdxHeader> {
        if bytes.len() < 4 {
            return Err(Error::malformed(format!(
                "expected at least 4 header bytes, got {}",
                bytes.len()
            )));
        }
        if bytes[0] != 0x00 || bytes[1] != 0x00 {
            return Err(Error::malformed(format!(
                "bytes 0-1 must be 0x00 0x00 (reserved), got 0x{:02X} 0x{:02X}",
                bytes[0], bytes[1]
            )));
        }
        let data_type = IdxDataType::from_code(bytes[2]).ok_or_else(|| {
            Error::malformed(format!("unsupported element type code 0x{:02X}", bytes[2]))
        })?;
        let n_dims = bytes[3] as usize;
        if n_dims == 0 {
            return Err(Error::malformed("header declares zero dimensions"));
        }

        let header_len = 4 + 4 * n_dims;
        if bytes.len() < header_len {
            return Err(Error::malformed(format!(
                "header declares {} dimensions ({} bytes) but only {} bytes are present",
                n_dims,
                header_len,
                bytes.len()
            )));
        }

        let dims = bytes[4..header_len]
            .chunks_exact(4)
            .map(|c| u32::from_be_bytes([c[0], c[1], c[2], c[3]]))
            .collect();

        Ok(IdxHeader { data_type, dims })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_header_layout() {
        let header = IdxHeader::new(IdxDataType::UnsignedByte, vec![5, 4, 4]);
        assert_eq!(
            header.encode(),
            vec![0, 0, 0x08, 3, 0, 0, 0, 5, 0, 0, 0, 4, 0, 0, 0, 4]
        );
        assert_eq!(header.element_count(), 80);
    }

    #[test]
    fn test_dimensions_are_big_endian() {
        let header = IdxHeader::new(IdxDataType::Int, vec![0x0102_0304]);
        assert_eq!(header.encode(), vec![0, 0, 0x0C, 1, 1, 2, 3, 4]);
    }

    #[test]
    fn test_parse_rejects_nonzero_reserved() {
        let err = IdxHeader::parse(&[0, 1, 0x08, 1, 0, 0, 0, 0]).unwrap_err();
        assert!(err.to_string().contains("reserved"));
    }

    #[test]
    fn test_parse_rejects_truncated_dims() {
        assert!(IdxHeader::parse(&[0, 0, 0x08, 3, 0, 0, 0, 1]).is_err());
    }
}
