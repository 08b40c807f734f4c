use super::error::CodecError;
use super::layout::{Block, BlockOffsets, BlockSizes};
use super::writer::GeometryWriter;
use crate::GeometryArrays;
use crate::mesh::MeshAttributes;

fn block_sizes<M: MeshAttributes + ?Sized>(mesh: &M) -> Result<BlockSizes, CodecError> {
    BlockSizes::from_counts(
        mesh.positions().len(),
        mesh.indices().len(),
        mesh.normals().len(),
        mesh.uvs().len(),
    )
}

/// Exact byte length `encode` would produce for `arrays`.
pub fn encoded_len(arrays: &GeometryArrays) -> Result<usize, CodecError> {
    block_sizes(arrays)?.total_len()
}

/// Encode geometry into a freshly allocated buffer.
///
/// # Examples
/// ```
/// use meshpack_core::{GeometryArrays, encode};
///
/// let bytes = encode(&GeometryArrays::default())?;
/// assert_eq!(bytes, vec![0u8; 16]);
/// # Ok::<(), meshpack_core::CodecError>(())
/// ```
pub fn encode(arrays: &GeometryArrays) -> Result<Vec<u8>, CodecError> {
    encode_attributes(arrays)
}

/// Encode straight from a host mesh's attribute slices.
pub(crate) fn encode_attributes<M: MeshAttributes + ?Sized>(
    mesh: &M,
) -> Result<Vec<u8>, CodecError> {
    let sizes = block_sizes(mesh)?;
    let offsets = BlockOffsets::compute(&sizes)?;
    log::trace!("encoding geometry buffer: {sizes:?}");

    let mut writer = GeometryWriter::with_exact_capacity(offsets.total_len())?;
    writer.write_header(&sizes);
    for block in Block::ORDER {
        writer.require_position(offsets.start(block))?;
        match block {
            Block::Vertices => writer.write_records(mesh.positions()),
            Block::Indices => writer.write_records(mesh.indices()),
            Block::Normals => writer.write_records(mesh.normals()),
            Block::Uvs => writer.write_records(mesh.uvs()),
        }
    }
    writer.require_position(offsets.total_len())?;

    let buffer = writer.finish();
    log::debug!(
        "encoded {} positions, {} indices, {} normals, {} uvs into {} bytes",
        mesh.positions().len(),
        mesh.indices().len(),
        mesh.normals().len(),
        mesh.uvs().len(),
        buffer.len()
    );
    Ok(buffer)
}
