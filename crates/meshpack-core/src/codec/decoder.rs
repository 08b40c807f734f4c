use super::error::CodecError;
use super::layout::{Block, BlockOffsets, BlockSizes};
use super::reader::GeometryReader;
use crate::GeometryArrays;

/// Read the four block sizes from the 16-byte header.
///
/// Only the header is inspected; the rest of the buffer is not validated.
pub fn read_header(buffer: &[u8]) -> Result<BlockSizes, CodecError> {
    GeometryReader::new(buffer).read_header()
}

/// Validate the header against the buffer and resolve block offsets.
pub(crate) fn validate_layout(
    reader: &GeometryReader<'_>,
) -> Result<(BlockSizes, BlockOffsets), CodecError> {
    let sizes = reader.read_header()?;
    sizes.validate_strides()?;

    let offsets = BlockOffsets::compute(&sizes)?;
    if offsets.total_len() != reader.len() {
        return Err(CodecError::LengthMismatch {
            declared: offsets.total_len(),
            actual: reader.len(),
        });
    }
    Ok((sizes, offsets))
}

/// Decode a geometry buffer into caller-owned arrays.
///
/// The buffer must be exactly header plus declared blocks; anything else is
/// rejected without a partial result.
///
/// # Examples
/// ```
/// use meshpack_core::{GeometryArrays, Vec3, decode, encode};
///
/// let arrays = GeometryArrays {
///     positions: vec![Vec3::new(1.0, 2.0, 3.0)],
///     ..GeometryArrays::default()
/// };
/// let bytes = encode(&arrays)?;
/// assert_eq!(decode(&bytes)?, arrays);
/// # Ok::<(), meshpack_core::CodecError>(())
/// ```
pub fn decode(buffer: &[u8]) -> Result<GeometryArrays, CodecError> {
    let reader = GeometryReader::new(buffer);
    let (sizes, offsets) = validate_layout(&reader)?;
    log::trace!("decoding geometry buffer: {sizes:?}");

    let arrays = GeometryArrays {
        positions: reader.read_records(Block::Vertices, offsets.range(Block::Vertices))?,
        indices: reader.read_records(Block::Indices, offsets.range(Block::Indices))?,
        normals: reader.read_records(Block::Normals, offsets.range(Block::Normals))?,
        uvs: reader.read_records(Block::Uvs, offsets.range(Block::Uvs))?,
    };

    log::debug!(
        "decoded {} bytes: {} positions, {} indices, {} normals, {} uvs",
        buffer.len(),
        arrays.positions.len(),
        arrays.indices.len(),
        arrays.normals.len(),
        arrays.uvs.len()
    );
    Ok(arrays)
}

#[cfg(test)]
mod tests {
    use super::{decode, read_header};
    use crate::codec::error::{CodecError, ErrorKind};
    use crate::codec::layout::{Block, HEADER_SIZE};
    use crate::{Vec2, Vec3};

    fn header(sizes: [u32; 4]) -> Vec<u8> {
        sizes.iter().flat_map(|size| size.to_ne_bytes()).collect()
    }

    #[test]
    fn decode_hand_built_buffer() {
        let mut buffer = header([12, 8, 0, 8]);
        for value in [1.0f32, 2.0, 3.0] {
            buffer.extend_from_slice(&value.to_ne_bytes());
        }
        for index in [0i32, 7] {
            buffer.extend_from_slice(&index.to_ne_bytes());
        }
        for value in [0.5f32, 1.0] {
            buffer.extend_from_slice(&value.to_ne_bytes());
        }

        let arrays = decode(&buffer).unwrap();
        assert_eq!(arrays.positions, vec![Vec3::new(1.0, 2.0, 3.0)]);
        assert_eq!(arrays.indices, vec![0, 7]);
        assert!(arrays.normals.is_empty());
        assert_eq!(arrays.uvs, vec![Vec2::new(0.5, 1.0)]);
    }

    #[test]
    fn decode_empty_header() {
        let arrays = decode(&header([0, 0, 0, 0])).unwrap();
        assert!(arrays.is_empty());
    }

    #[test]
    fn decode_short_buffer() {
        let err = decode(&[0u8; 5]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedInput);
        assert!(err.to_string().contains("buffer too short"));
    }

    #[test]
    fn decode_misaligned_vertex_block() {
        let mut buffer = header([10, 0, 0, 0]);
        buffer.resize(HEADER_SIZE + 10, 0);
        let err = decode(&buffer).unwrap_err();
        assert_eq!(
            err,
            CodecError::MisalignedBlock {
                block: Block::Vertices,
                size: 10,
                stride: 12,
            }
        );
    }

    #[test]
    fn decode_declared_length_larger_than_buffer() {
        let mut buffer = header([0, 8, 0, 0]);
        buffer.extend_from_slice(&[0u8; 4]);
        let err = decode(&buffer).unwrap_err();
        assert_eq!(
            err,
            CodecError::LengthMismatch {
                declared: HEADER_SIZE + 8,
                actual: HEADER_SIZE + 4,
            }
        );
    }

    #[test]
    fn decode_huge_header_fields_fail_cleanly() {
        let buffer = header([u32::MAX - 3, u32::MAX - 3, u32::MAX - 3, u32::MAX - 7]);
        let err = decode(&buffer).unwrap_err();
        assert!(matches!(
            err.kind(),
            ErrorKind::MalformedInput | ErrorKind::ArithmeticOverflow
        ));
    }

    #[test]
    fn read_header_ignores_body() {
        let mut buffer = header([24, 4, 12, 8]);
        buffer.push(0xff);
        let sizes = read_header(&buffer).unwrap();
        assert_eq!(sizes.vertex_block_size, 24);
        assert_eq!(sizes.uv_block_size, 8);
    }
}
