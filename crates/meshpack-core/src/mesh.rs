//! Boundary with the host mesh type.
//!
//! The host exposes its attribute arrays through [`MeshAttributes`] and
//! rebuilds itself from decoded arrays through [`FromGeometry`]. Topology
//! assignment and attribute binding stay on the host side.

use crate::codec::encoder::encode_attributes;
use crate::codec::{CodecError, decode};
use crate::{GeometryArrays, Vec2, Vec3};

/// Export side of a host mesh: the four attribute arrays in codec form.
pub trait MeshAttributes {
    fn positions(&self) -> &[Vec3];
    fn indices(&self) -> &[i32];
    fn normals(&self) -> &[Vec3];
    fn uvs(&self) -> &[Vec2];
}

/// Import side of a host mesh.
pub trait FromGeometry: Sized {
    fn from_geometry(arrays: GeometryArrays) -> Self;
}

impl MeshAttributes for GeometryArrays {
    fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    fn indices(&self) -> &[i32] {
        &self.indices
    }

    fn normals(&self) -> &[Vec3] {
        &self.normals
    }

    fn uvs(&self) -> &[Vec2] {
        &self.uvs
    }
}

impl FromGeometry for GeometryArrays {
    fn from_geometry(arrays: GeometryArrays) -> Self {
        arrays
    }
}

/// Encode a host mesh without copying its attributes into [`GeometryArrays`].
pub fn serialize_mesh<M: MeshAttributes + ?Sized>(mesh: &M) -> Result<Vec<u8>, CodecError> {
    encode_attributes(mesh)
}

/// Decode a buffer and hand the arrays to the host mesh constructor.
///
/// # Examples
/// ```
/// use meshpack_core::{FromGeometry, GeometryArrays, Vec3, deserialize_mesh, encode};
///
/// struct PointCloud(Vec<Vec3>);
///
/// impl FromGeometry for PointCloud {
///     fn from_geometry(arrays: GeometryArrays) -> Self {
///         PointCloud(arrays.positions)
///     }
/// }
///
/// let bytes = encode(&GeometryArrays {
///     positions: vec![Vec3::new(0.0, 1.0, 2.0)],
///     ..GeometryArrays::default()
/// })?;
/// let cloud: PointCloud = deserialize_mesh(&bytes)?;
/// assert_eq!(cloud.0.len(), 1);
/// # Ok::<(), meshpack_core::CodecError>(())
/// ```
pub fn deserialize_mesh<M: FromGeometry>(buffer: &[u8]) -> Result<M, CodecError> {
    decode(buffer).map(M::from_geometry)
}
