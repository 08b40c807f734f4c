use super::error::CodecError;
use super::layout::{Block, BlockSizes};
use super::record::Record;

/// Output buffer reserved up front to the exact encoded length.
pub struct GeometryWriter {
    buffer: Vec<u8>,
}

impl GeometryWriter {
    pub fn with_exact_capacity(len: usize) -> Result<Self, CodecError> {
        let mut buffer = Vec::new();
        buffer
            .try_reserve_exact(len)
            .map_err(|_| CodecError::AllocationFailed { bytes: len })?;
        Ok(Self { buffer })
    }

    /// Fail unless exactly `expected` bytes have been written so far.
    pub fn require_position(&self, expected: usize) -> Result<(), CodecError> {
        if self.buffer.len() != expected {
            return Err(CodecError::LengthMismatch {
                declared: expected,
                actual: self.buffer.len(),
            });
        }
        Ok(())
    }

    pub fn write_u32_ne(&mut self, value: u32) {
        self.buffer.extend_from_slice(&value.to_ne_bytes());
    }

    pub fn write_header(&mut self, sizes: &BlockSizes) {
        for block in Block::ORDER {
            self.write_u32_ne(sizes.get(block));
        }
    }

    pub fn write_records<T: Record>(&mut self, records: &[T]) {
        for record in records {
            record.write_ne(&mut self.buffer);
        }
    }

    pub fn finish(self) -> Vec<u8> {
        self.buffer
    }
}

#[cfg(test)]
mod tests {
    use super::GeometryWriter;
    use crate::codec::error::CodecError;
    use crate::codec::layout::{BlockSizes, HEADER_SIZE};

    #[test]
    fn header_occupies_sixteen_bytes() {
        let mut writer = GeometryWriter::with_exact_capacity(HEADER_SIZE).unwrap();
        writer.write_header(&BlockSizes {
            vertex_block_size: 1,
            index_block_size: 2,
            normal_block_size: 3,
            uv_block_size: 4,
        });
        assert!(writer.require_position(HEADER_SIZE).is_ok());

        let bytes = writer.finish();
        assert_eq!(&bytes[0..4], &1u32.to_ne_bytes());
        assert_eq!(&bytes[12..16], &4u32.to_ne_bytes());
    }

    #[test]
    fn records_are_appended_in_order() {
        let mut writer = GeometryWriter::with_exact_capacity(8).unwrap();
        writer.write_records(&[5i32, -1]);
        let bytes = writer.finish();
        assert_eq!(&bytes[0..4], &5i32.to_ne_bytes());
        assert_eq!(&bytes[4..8], &(-1i32).to_ne_bytes());
    }

    #[test]
    fn require_position_reports_drift() {
        let mut writer = GeometryWriter::with_exact_capacity(8).unwrap();
        writer.write_u32_ne(1);
        assert!(writer.require_position(4).is_ok());
        assert_eq!(
            writer.require_position(8).unwrap_err(),
            CodecError::LengthMismatch {
                declared: 8,
                actual: 4,
            }
        );
    }

    #[test]
    fn impossible_capacity_is_reported() {
        let err = GeometryWriter::with_exact_capacity(usize::MAX).err();
        assert!(err.is_some());
    }
}
