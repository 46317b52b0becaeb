use std::io::Write;

use crate::error::{Error, Result};
use crate::idx::data_type::IdxDataType;
use crate::idx::header::IdxHeader;

/// Streaming IDX encoder.
///
/// The header is written as soon as the writer is created; elements are then
/// appended one at a time, so a tensor never has to be held in memory.
/// `finish` checks that exactly `header.element_count()` elements were
/// written and hands back the underlying writer; flushing is left to the
/// caller, who knows which file it is writing.
pub struct IdxWriter<W: Write> {
    inner: W,
    data_type: IdxDataType,
    expected: u64,
    written: u64,
}

impl<W: Write> IdxWriter<W> {
    pub fn new(mut inner: W, header: &IdxHeader) -> std::io::Result<Self> {
        inner.write_all(&header.encode())?;
        Ok(IdxWriter {
            inner,
            data_type: header.data_type,
            expected: header.element_count(),
            written: 0,
        })
    }

    /// Writes one element. In `UnsignedByte` mode only the low 8 bits of
    /// `value` are kept; in `Int` mode all 32 bits go out big-endian.
    pub fn write_element(&mut self, value: u32) -> std::io::Result<()> {
        match self.data_type {
            IdxDataType::UnsignedByte => self.inner.write_all(&[(value & 0xFF) as u8])?,
            IdxDataType::Int => self.inner.write_all(&value.to_be_bytes())?,
        }
        self.written += 1;
        Ok(())
    }

    pub fn write_elements(&mut self, values: &[u32]) -> std::io::Result<()> {
        for &v in values {
            self.write_element(v)?;
        }
        Ok(())
    }

    pub fn elements_written(&self) -> u64 {
        self.written
    }

    /// Verifies the element count against the header and returns the
    /// underlying writer.
    pub fn finish(self) -> Result<W> {
        if self.written != self.expected {
            return Err(Error::ElementCount {
                expected: self.expected,
                written: self.written,
            });
        }
        Ok(self.inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_mode_keeps_low_bits() {
        let header = IdxHeader::new(IdxDataType::UnsignedByte, vec![2]);
        let mut w = IdxWriter::new(Vec::new(), &header).unwrap();
        w.write_elements(&[0xFF12_3456, 7]).unwrap();
        assert_eq!(w.elements_written(), 2);
        let bytes = w.finish().unwrap();
        assert_eq!(&bytes[8..], &[0x56, 7]);
    }

    #[test]
    fn test_int_mode_writes_big_endian() {
        let header = IdxHeader::new(IdxDataType::Int, vec![1]);
        let mut w = IdxWriter::new(Vec::new(), &header).unwrap();
        w.write_element(0xFF12_3456).unwrap();
        let bytes = w.finish().unwrap();
        assert_eq!(&bytes[..4], &[0, 0, 0x0C, 1]);
        assert_eq!(&bytes[8..], &[0xFF, 0x12, 0x34, 0x56]);
    }

    #[test]
    fn test_finish_rejects_short_payload() {
        let header = IdxHeader::new(IdxDataType::UnsignedByte, vec![3, 2]);
        let mut w = IdxWriter::new(Vec::new(), &header).unwrap();
        w.write_elements(&[1, 2, 3]).unwrap();
        match w.finish() {
            Err(Error::ElementCount { expected, written }) => {
                assert_eq!(expected, 6);
                assert_eq!(written, 3);
            }
            other => panic!("expected ElementCount, got {:?}", other.map(|_| ())),
        }
    }
}
