use serde::{Deserialize, Serialize};

use crate::codec::CodecError;
use crate::codec::decoder::validate_layout;
use crate::codec::layout::Block;
use crate::codec::reader::GeometryReader;

/// Layout report for a validated geometry buffer.
///
/// # Examples
/// ```
/// use meshpack_core::{GeometryArrays, encode, inspect};
///
/// let bytes = encode(&GeometryArrays { indices: vec![0, 1, 2], ..Default::default() })?;
/// let summary = inspect(&bytes)?;
/// assert_eq!(summary.triangles, 1);
/// assert_eq!(summary.blocks[1].offset, 16);
/// # Ok::<(), meshpack_core::CodecError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeometrySummary {
    /// Total buffer length in bytes (header included).
    pub total_bytes: usize,
    /// Whole triangles described by the index block.
    pub triangles: usize,
    /// Per-block layout in wire order.
    pub blocks: Vec<BlockSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockSummary {
    pub block: Block,
    /// Start offset from the beginning of the buffer.
    pub offset: usize,
    pub bytes: usize,
    pub elements: usize,
}

/// Validate `buffer` like [`crate::decode`] and describe its layout without
/// materializing the arrays.
pub fn inspect(buffer: &[u8]) -> Result<GeometrySummary, CodecError> {
    let reader = GeometryReader::new(buffer);
    let (sizes, offsets) = validate_layout(&reader)?;

    let blocks = Block::ORDER
        .into_iter()
        .map(|block| BlockSummary {
            block,
            offset: offsets.start(block),
            bytes: offsets.range(block).len(),
            elements: sizes.element_count(block),
        })
        .collect();

    Ok(GeometrySummary {
        total_bytes: buffer.len(),
        triangles: sizes.element_count(Block::Indices) / 3,
        blocks,
    })
}
