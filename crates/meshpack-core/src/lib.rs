//! meshpack core library: a fixed-layout binary codec for triangle meshes.
//!
//! A geometry buffer is a 16-byte header of four native-endian `u32` block
//! sizes followed by four unpadded blocks: vertex positions, triangle
//! indices, vertex normals and texture coordinates. The codec is pure and
//! byte-oriented; file access and JSON interchange live in the CLI crate.
//!
//! Invariants:
//! - Header fields are byte counts, each a whole multiple of its block stride.
//! - A buffer is exactly header plus the declared blocks, nothing more or less.
//! - `decode(encode(a)) == a` element for element, order preserved.
//!
//! The format is native-endian and unversioned: producer and consumer are
//! expected to share the same build environment.
//!
//! # Examples
//! ```
//! use meshpack_core::{GeometryArrays, Vec2, Vec3, decode, encode};
//!
//! let arrays = GeometryArrays {
//!     positions: vec![Vec3::new(0.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 1.0, 0.0)],
//!     indices: vec![0, 1, 2],
//!     normals: Vec::new(),
//!     uvs: vec![Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0)],
//! };
//! let bytes = encode(&arrays)?;
//! assert_eq!(bytes.len(), 16 + 36 + 12 + 16);
//! assert_eq!(decode(&bytes)?, arrays);
//! # Ok::<(), meshpack_core::CodecError>(())
//! ```

use serde::{Deserialize, Serialize};

mod codec;
mod mesh;
mod summary;

pub use codec::layout::{Block, BlockOffsets, BlockSizes, HEADER_SIZE};
pub use codec::{CodecError, ErrorKind, decode, encode, encoded_len, read_header};
pub use mesh::{FromGeometry, MeshAttributes, deserialize_mesh, serialize_mesh};
pub use summary::{BlockSummary, GeometrySummary, inspect};

/// Three-component `f32` record used for positions and normals.
///
/// # Examples
/// ```
/// use meshpack_core::Vec3;
///
/// let normal = Vec3::new(0.0, 0.0, 1.0);
/// assert_eq!(normal.z, 1.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// Two-component `f32` record used for texture coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Decoded mesh attributes, owned by the caller.
///
/// The four sequences are independent: normals or UVs may be empty, and
/// index values are not checked against the position count.
///
/// # Examples
/// ```
/// use meshpack_core::GeometryArrays;
///
/// let arrays = GeometryArrays {
///     indices: vec![0, 1, 2, 2, 1, 3],
///     ..GeometryArrays::default()
/// };
/// assert_eq!(arrays.triangle_count(), 2);
/// assert!(!arrays.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GeometryArrays {
    /// Vertex positions.
    #[serde(default)]
    pub positions: Vec<Vec3>,
    /// Flat triangle list, three indices per triangle.
    #[serde(default)]
    pub indices: Vec<i32>,
    /// Vertex normals (may be empty).
    #[serde(default)]
    pub normals: Vec<Vec3>,
    /// Texture coordinates for the single UV channel (may be empty).
    #[serde(default)]
    pub uvs: Vec<Vec2>,
}

impl GeometryArrays {
    /// Whole triangles in the index list; a trailing partial triangle is not counted.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
            && self.indices.is_empty()
            && self.normals.is_empty()
            && self.uvs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrays_json_uses_named_components() {
        let arrays = GeometryArrays {
            positions: vec![Vec3::new(1.0, 2.0, 3.0)],
            indices: vec![0],
            normals: vec![],
            uvs: vec![Vec2::new(0.5, 0.25)],
        };

        let value = serde_json::to_value(&arrays).expect("arrays json");
        assert_eq!(value["positions"][0]["y"], 2.0);
        assert_eq!(value["uvs"][0]["x"], 0.5);
        assert!(value["normals"].as_array().expect("normals array").is_empty());
    }

    #[test]
    fn arrays_json_missing_fields_default_to_empty() {
        let arrays: GeometryArrays =
            serde_json::from_str(r#"{"positions":[{"x":0,"y":0,"z":0}]}"#).expect("parse");
        assert_eq!(arrays.positions.len(), 1);
        assert!(arrays.indices.is_empty());
        assert!(arrays.normals.is_empty());
        assert!(arrays.uvs.is_empty());
    }

    #[test]
    fn triangle_count_ignores_partial_triangle() {
        let arrays = GeometryArrays {
            indices: vec![0, 1, 2, 3],
            ..GeometryArrays::default()
        };
        assert_eq!(arrays.triangle_count(), 1);
    }
}
