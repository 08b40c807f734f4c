use thiserror::Error;

use super::layout::Block;

/// Errors returned by geometry encoding and decoding.
///
/// # Examples
/// ```
/// use meshpack_core::{CodecError, ErrorKind};
///
/// let err = CodecError::TooShort { needed: 16, actual: 3 };
/// assert_eq!(err.kind(), ErrorKind::MalformedInput);
/// assert!(err.to_string().contains("buffer too short"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("buffer too short: need {needed} bytes, got {actual}")]
    TooShort { needed: usize, actual: usize },
    #[error("misaligned {block} block: {size} bytes is not a multiple of stride {stride}")]
    MisalignedBlock {
        block: Block,
        size: usize,
        stride: usize,
    },
    #[error("buffer length mismatch: header declares {declared} bytes, got {actual}")]
    LengthMismatch { declared: usize, actual: usize },
    #[error("{block} block size overflows the addressable range")]
    Overflow { block: Block },
    #[error("allocation of {bytes} bytes failed")]
    AllocationFailed { bytes: usize },
}

/// Coarse classification of [`CodecError`] variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The buffer violates the wire layout.
    MalformedInput,
    /// Memory for the output could not be reserved.
    ResourceExhausted,
    /// Sizes or offsets do not fit the addressable range.
    ArithmeticOverflow,
}

impl CodecError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CodecError::TooShort { .. }
            | CodecError::MisalignedBlock { .. }
            | CodecError::LengthMismatch { .. } => ErrorKind::MalformedInput,
            CodecError::Overflow { .. } => ErrorKind::ArithmeticOverflow,
            CodecError::AllocationFailed { .. } => ErrorKind::ResourceExhausted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CodecError, ErrorKind};
    use crate::codec::layout::Block;

    #[test]
    fn misaligned_names_block() {
        let err = CodecError::MisalignedBlock {
            block: Block::Normals,
            size: 13,
            stride: 12,
        };
        assert_eq!(err.kind(), ErrorKind::MalformedInput);
        assert!(err.to_string().contains("normal block"));
    }

    #[test]
    fn overflow_kind() {
        let err = CodecError::Overflow { block: Block::Uvs };
        assert_eq!(err.kind(), ErrorKind::ArithmeticOverflow);
    }

    #[test]
    fn allocation_kind() {
        let err = CodecError::AllocationFailed { bytes: usize::MAX };
        assert_eq!(err.kind(), ErrorKind::ResourceExhausted);
    }
}
