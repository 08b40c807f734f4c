use std::fmt;
use std::ops::Range;

use serde::{Deserialize, Serialize};

use super::error::CodecError;

pub const HEADER_FIELD_SIZE: usize = 4;
pub const HEADER_SIZE: usize = 4 * HEADER_FIELD_SIZE;

pub const VERTEX_BLOCK_SIZE_RANGE: Range<usize> = 0..4;
pub const INDEX_BLOCK_SIZE_RANGE: Range<usize> = 4..8;
pub const NORMAL_BLOCK_SIZE_RANGE: Range<usize> = 8..12;
pub const UV_BLOCK_SIZE_RANGE: Range<usize> = 12..16;

pub const VEC3_STRIDE: usize = 12;
pub const INDEX_STRIDE: usize = 4;
pub const VEC2_STRIDE: usize = 8;

/// Data blocks of a geometry buffer, in wire order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Block {
    Vertices,
    Indices,
    Normals,
    Uvs,
}

impl Block {
    pub const ORDER: [Block; 4] = [Block::Vertices, Block::Indices, Block::Normals, Block::Uvs];

    pub fn stride(self) -> usize {
        match self {
            Block::Vertices | Block::Normals => VEC3_STRIDE,
            Block::Indices => INDEX_STRIDE,
            Block::Uvs => VEC2_STRIDE,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Block::Vertices => "vertex",
            Block::Indices => "index",
            Block::Normals => "normal",
            Block::Uvs => "uv",
        }
    }

    pub fn header_range(self) -> Range<usize> {
        match self {
            Block::Vertices => VERTEX_BLOCK_SIZE_RANGE,
            Block::Indices => INDEX_BLOCK_SIZE_RANGE,
            Block::Normals => NORMAL_BLOCK_SIZE_RANGE,
            Block::Uvs => UV_BLOCK_SIZE_RANGE,
        }
    }

    fn position(self) -> usize {
        match self {
            Block::Vertices => 0,
            Block::Indices => 1,
            Block::Normals => 2,
            Block::Uvs => 3,
        }
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Byte sizes of the four data blocks, as stored in the header.
///
/// # Examples
/// ```
/// use meshpack_core::{Block, BlockSizes};
///
/// let sizes = BlockSizes::from_counts(2, 3, 0, 1).unwrap();
/// assert_eq!(sizes.vertex_block_size, 24);
/// assert_eq!(sizes.element_count(Block::Indices), 3);
/// assert_eq!(sizes.total_len().unwrap(), 16 + 24 + 12 + 8);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BlockSizes {
    pub vertex_block_size: u32,
    pub index_block_size: u32,
    pub normal_block_size: u32,
    pub uv_block_size: u32,
}

impl BlockSizes {
    /// Build header sizes from element counts, rejecting blocks that do not
    /// fit a 4-byte size field.
    pub fn from_counts(
        positions: usize,
        indices: usize,
        normals: usize,
        uvs: usize,
    ) -> Result<Self, CodecError> {
        Ok(Self {
            vertex_block_size: block_size(Block::Vertices, positions)?,
            index_block_size: block_size(Block::Indices, indices)?,
            normal_block_size: block_size(Block::Normals, normals)?,
            uv_block_size: block_size(Block::Uvs, uvs)?,
        })
    }

    pub fn get(&self, block: Block) -> u32 {
        match block {
            Block::Vertices => self.vertex_block_size,
            Block::Indices => self.index_block_size,
            Block::Normals => self.normal_block_size,
            Block::Uvs => self.uv_block_size,
        }
    }

    /// Block size in bytes as an offset-friendly `usize`.
    pub fn byte_len(&self, block: Block) -> Result<usize, CodecError> {
        usize::try_from(self.get(block)).map_err(|_| CodecError::Overflow { block })
    }

    pub fn element_count(&self, block: Block) -> usize {
        self.get(block) as usize / block.stride()
    }

    /// Every block size must be a whole number of records.
    pub fn validate_strides(&self) -> Result<(), CodecError> {
        for block in Block::ORDER {
            let size = self.byte_len(block)?;
            if size % block.stride() != 0 {
                return Err(CodecError::MisalignedBlock {
                    block,
                    size,
                    stride: block.stride(),
                });
            }
        }
        Ok(())
    }

    pub fn total_len(&self) -> Result<usize, CodecError> {
        BlockOffsets::compute(self).map(|offsets| offsets.total_len())
    }
}

fn block_size(block: Block, count: usize) -> Result<u32, CodecError> {
    count
        .checked_mul(block.stride())
        .and_then(|bytes| u32::try_from(bytes).ok())
        .ok_or(CodecError::Overflow { block })
}

/// Start offsets of each block, derived from the header sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockOffsets {
    starts: [usize; 4],
    end: usize,
}

impl BlockOffsets {
    pub fn compute(sizes: &BlockSizes) -> Result<Self, CodecError> {
        let mut starts = [0usize; 4];
        let mut cursor = HEADER_SIZE;
        for block in Block::ORDER {
            starts[block.position()] = cursor;
            cursor = cursor
                .checked_add(sizes.byte_len(block)?)
                .ok_or(CodecError::Overflow { block })?;
        }
        Ok(Self {
            starts,
            end: cursor,
        })
    }

    pub fn start(&self, block: Block) -> usize {
        self.starts[block.position()]
    }

    pub fn range(&self, block: Block) -> Range<usize> {
        let start = self.start(block);
        let end = match block {
            Block::Uvs => self.end,
            _ => self.starts[block.position() + 1],
        };
        start..end
    }

    pub fn total_len(&self) -> usize {
        self.end
    }
}
