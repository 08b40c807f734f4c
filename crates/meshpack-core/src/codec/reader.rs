use std::ops::Range;

use super::error::CodecError;
use super::layout::{self, Block, BlockSizes};
use super::record::Record;

pub struct GeometryReader<'a> {
    buffer: &'a [u8],
}

impl<'a> GeometryReader<'a> {
    pub fn new(buffer: &'a [u8]) -> Self {
        Self { buffer }
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn require_len(&self, needed: usize) -> Result<(), CodecError> {
        if self.buffer.len() < needed {
            return Err(CodecError::TooShort {
                needed,
                actual: self.buffer.len(),
            });
        }
        Ok(())
    }

    pub fn read_slice(&self, range: Range<usize>) -> Result<&'a [u8], CodecError> {
        self.buffer.get(range.clone()).ok_or(CodecError::TooShort {
            needed: range.end,
            actual: self.buffer.len(),
        })
    }

    pub fn read_u32_ne(&self, range: Range<usize>) -> Result<u32, CodecError> {
        let bytes = self.read_slice(range)?;
        if bytes.len() != layout::HEADER_FIELD_SIZE {
            return Err(CodecError::TooShort {
                needed: layout::HEADER_FIELD_SIZE,
                actual: bytes.len(),
            });
        }
        Ok(u32::from_ne_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    pub fn read_header(&self) -> Result<BlockSizes, CodecError> {
        self.require_len(layout::HEADER_SIZE)?;
        Ok(BlockSizes {
            vertex_block_size: self.read_u32_ne(layout::VERTEX_BLOCK_SIZE_RANGE)?,
            index_block_size: self.read_u32_ne(layout::INDEX_BLOCK_SIZE_RANGE)?,
            normal_block_size: self.read_u32_ne(layout::NORMAL_BLOCK_SIZE_RANGE)?,
            uv_block_size: self.read_u32_ne(layout::UV_BLOCK_SIZE_RANGE)?,
        })
    }

    /// Reinterpret `range` as a sequence of `T` records, in encoded order.
    pub fn read_records<T: Record>(
        &self,
        block: Block,
        range: Range<usize>,
    ) -> Result<Vec<T>, CodecError> {
        let bytes = self.read_slice(range)?;
        if bytes.len() % T::STRIDE != 0 {
            return Err(CodecError::MisalignedBlock {
                block,
                size: bytes.len(),
                stride: T::STRIDE,
            });
        }

        let mut records = Vec::new();
        records
            .try_reserve_exact(bytes.len() / T::STRIDE)
            .map_err(|_| CodecError::AllocationFailed { bytes: bytes.len() })?;
        for chunk in bytes.chunks_exact(T::STRIDE) {
            let record = T::read_ne(chunk).ok_or(CodecError::MisalignedBlock {
                block,
                size: bytes.len(),
                stride: T::STRIDE,
            })?;
            records.push(record);
        }
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::GeometryReader;
    use crate::Vec2;
    use crate::codec::error::CodecError;
    use crate::codec::layout::{Block, HEADER_SIZE};

    #[test]
    fn read_header_too_short() {
        let buffer = [0u8; HEADER_SIZE - 1];
        let reader = GeometryReader::new(&buffer);
        let err = reader.read_header().unwrap_err();
        assert_eq!(
            err,
            CodecError::TooShort {
                needed: HEADER_SIZE,
                actual: HEADER_SIZE - 1,
            }
        );
    }

    #[test]
    fn read_header_native_endian() {
        let mut buffer = Vec::new();
        for value in [12u32, 4, 0, 8] {
            buffer.extend_from_slice(&value.to_ne_bytes());
        }
        let sizes = GeometryReader::new(&buffer).read_header().unwrap();
        assert_eq!(sizes.vertex_block_size, 12);
        assert_eq!(sizes.index_block_size, 4);
        assert_eq!(sizes.normal_block_size, 0);
        assert_eq!(sizes.uv_block_size, 8);
    }

    #[test]
    fn read_slice_out_of_bounds() {
        let buffer = [0u8; 4];
        let reader = GeometryReader::new(&buffer);
        let err = reader.read_slice(2..9).unwrap_err();
        assert_eq!(
            err,
            CodecError::TooShort {
                needed: 9,
                actual: 4,
            }
        );
    }

    #[test]
    fn read_records_rejects_partial_record() {
        let buffer = [0u8; 12];
        let reader = GeometryReader::new(&buffer);
        let err = reader.read_records::<Vec2>(Block::Uvs, 0..12).unwrap_err();
        assert!(matches!(
            err,
            CodecError::MisalignedBlock {
                block: Block::Uvs,
                ..
            }
        ));
    }

    #[test]
    fn read_records_empty_range() {
        let buffer = [0u8; 4];
        let reader = GeometryReader::new(&buffer);
        let records = reader.read_records::<i32>(Block::Indices, 4..4).unwrap();
        assert!(records.is_empty());
    }
}
