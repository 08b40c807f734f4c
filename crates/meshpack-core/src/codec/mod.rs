//! Geometry buffer codec.
//!
//! The codec follows a layered structure:
//! - `layout`: header fields, block order, strides and offsets (source of truth)
//! - `reader` / `writer`: bounds-checked byte access and buffer building
//! - `record`: fixed-size element conversion (native-endian)
//! - `decoder` / `encoder`: the two public transforms
//! - `error`: explicit errors naming the violated invariant
//!
//! Both transforms are pure and contain no I/O. Offsets are only ever
//! computed through `layout`, so encode and decode cannot disagree on where a
//! block starts.

pub mod decoder;
pub mod encoder;
pub mod error;
pub mod layout;
pub mod reader;
pub mod record;
pub mod writer;

pub use decoder::{decode, read_header};
pub use encoder::{encode, encoded_len};
pub use error::{CodecError, ErrorKind};
