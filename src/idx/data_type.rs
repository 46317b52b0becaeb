use serde::{Deserialize, Serialize};

/// Element type of an IDX tensor, stored in byte 2 of the header.
///
/// Only the two codes this crate produces are modelled:
/// - `UnsignedByte` (0x08) — one byte per element
/// - `Int`          (0x0C) — signed 32-bit big-endian integer per element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IdxDataType {
    UnsignedByte,
    Int,
}

impl IdxDataType {
    /// Grayscale mode writes bytes, wide mode writes full 32-bit values.
    pub fn for_grayscale(grayscale: bool) -> Self {
        if grayscale {
            IdxDataType::UnsignedByte
        } else {
            IdxDataType::Int
        }
    }

    pub fn code(self) -> u8 {
        match self {
            IdxDataType::UnsignedByte => 0x08,
            IdxDataType::Int => 0x0C,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0x08 => Some(IdxDataType::UnsignedByte),
            0x0C => Some(IdxDataType::Int),
            _ => None,
        }
    }

    /// Bytes occupied by one element in the payload.
    pub fn element_width(self) -> usize {
        match self {
            IdxDataType::UnsignedByte => 1,
            IdxDataType::Int => 4,
        }
    }

    /// Largest value an element can hold without truncation.
    pub fn max_value(self) -> u32 {
        match self {
            IdxDataType::UnsignedByte => u8::MAX as u32,
            IdxDataType::Int => u32::MAX,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_match_idx_convention() {
        assert_eq!(IdxDataType::UnsignedByte.code(), 0x08);
        assert_eq!(IdxDataType::Int.code(), 0x0C);
        assert_eq!(IdxDataType::from_code(0x0C), Some(IdxDataType::Int));
        assert_eq!(IdxDataType::from_code(0x0D), None);
    }

    #[test]
    fn test_grayscale_selects_byte_type() {
        assert_eq!(IdxDataType::for_grayscale(true), IdxDataType::UnsignedByte);
        assert_eq!(IdxDataType::for_grayscale(false), IdxDataType::Int);
        assert_eq!(IdxDataType::for_grayscale(false).element_width(), 4);
    }
}
