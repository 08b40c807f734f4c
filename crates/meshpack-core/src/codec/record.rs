//! Fixed-size plain-data records stored in the data blocks.

use super::layout::{INDEX_STRIDE, VEC2_STRIDE, VEC3_STRIDE};
use crate::{Vec2, Vec3};

/// A block element with a fixed native-endian byte representation.
///
/// `read_ne` returns `None` when `bytes` holds fewer than `STRIDE` bytes.
pub trait Record: Copy {
    const STRIDE: usize;

    fn read_ne(bytes: &[u8]) -> Option<Self>;
    fn write_ne(&self, out: &mut Vec<u8>);
}

impl Record for Vec3 {
    const STRIDE: usize = VEC3_STRIDE;

    fn read_ne(bytes: &[u8]) -> Option<Self> {
        Some(Vec3 {
            x: f32_at(bytes, 0)?,
            y: f32_at(bytes, 4)?,
            z: f32_at(bytes, 8)?,
        })
    }

    fn write_ne(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.x.to_ne_bytes());
        out.extend_from_slice(&self.y.to_ne_bytes());
        out.extend_from_slice(&self.z.to_ne_bytes());
    }
}

impl Record for Vec2 {
    const STRIDE: usize = VEC2_STRIDE;

    fn read_ne(bytes: &[u8]) -> Option<Self> {
        Some(Vec2 {
            x: f32_at(bytes, 0)?,
            y: f32_at(bytes, 4)?,
        })
    }

    fn write_ne(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.x.to_ne_bytes());
        out.extend_from_slice(&self.y.to_ne_bytes());
    }
}

impl Record for i32 {
    const STRIDE: usize = INDEX_STRIDE;

    fn read_ne(bytes: &[u8]) -> Option<Self> {
        word_at(bytes, 0).map(i32::from_ne_bytes)
    }

    fn write_ne(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.to_ne_bytes());
    }
}

fn word_at(bytes: &[u8], offset: usize) -> Option<[u8; 4]> {
    bytes.get(offset..offset + 4)?.try_into().ok()
}

fn f32_at(bytes: &[u8], offset: usize) -> Option<f32> {
    word_at(bytes, offset).map(f32::from_ne_bytes)
}
