//! # tagwire
//!
//! A compact, deterministic, type-driven binary encoding for Rust.
//!
//! - Every value is written as a one-byte prefix tag followed by a payload whose shape the tag identifies
//! - The codec for a value is chosen by its static type through the [`Encoding`] trait; there is no run-time lookup
//! - Tuples, fixed-size arrays and derived records share one aggregate format: `[tag][count][element...]`
//! - The encoded size of a value is known before writing, so destinations can be sized exactly once
//! - Encoding and decoding never allocate and never panic on malformed input
//!
//! ## Wire format
//!
//! | Prefix          | Payload                                         |
//! |-----------------|-------------------------------------------------|
//! | `0x00..=0x7f`   | none (positive fixint, also `false`/`true`)     |
//! | `0x80..=0x83`   | `u8`/`u16`/`u32`/`u64`, little-endian           |
//! | `0x84..=0x87`   | `i8`/`i16`/`i32`/`i64`, little-endian           |
//! | `0x88`, `0x89`  | `f32`, `f64`, little-endian IEEE-754            |
//! | `0xb9`          | structure: `count` then `count` field encodings |
//! | `0xba`          | array/tuple: `count` then `count` elements      |
//! | `0xc0..=0xff`   | none (negative fixint, `-64..=-1`)              |
//!
//! ## Deriving
//!
//! `#[derive(Encoding)]` encodes a struct as a structure aggregate with its
//! fields in declaration order. Type parameters of any name are supported.
//!
//! ```rust
//! use tagwire::{decode, encode, Encoding};
//!
//! #[derive(Encoding, Debug, Default, PartialEq)]
//! struct Channel<R, W> {
//!     rx: R,
//!     tx: W,
//! }
//!
//! let value = Channel { rx: 3u8, tx: (-1i16, true) };
//! let mut buf = encode(&value).unwrap();
//! assert_eq!(&buf[..], &[0xb9, 0x02, 0x03, 0xba, 0x02, 0xff, 0x01]);
//! let decoded: Channel<u8, (i16, bool)> = decode(&mut buf).unwrap();
//! assert_eq!(decoded, value);
//! ```
//!
//! Enums have no wire format and are rejected at compile time:
//!
//! ```compile_fail
//! use tagwire::Encoding;
//!
//! #[derive(Encoding)]
//! enum Shape {
//!     Point,
//!     Circle(u32),
//! }
//! ```
//!
//! So are unions:
//!
//! ```compile_fail
//! use tagwire::Encoding;
//!
//! #[derive(Encoding)]
//! union Bits {
//!     int: u32,
//!     float: f32,
//! }
//! ```
//!
//! ## Feature Flags
//!
//! - `derive` (default) — Re-exports `#[derive(Encoding)]` for structs.

pub mod aggregate;
pub mod core;
pub mod io;
mod serializer;

pub use crate::aggregate::Index;
pub use crate::core::EncodingByte;
pub use crate::io::{BufferReader, BufferWriter, Reader, StreamReader, StreamWriter, Writer};
pub use crate::serializer::{Deserializer, Serializer};
#[cfg(feature = "derive")]
pub use tagwire_derive::Encoding;

use bytes::{Bytes, BytesMut};
use tracing::{debug, trace};

/// Errors that can occur during encoding or decoding operations.
#[derive(Debug, thiserror::Error)]
pub enum EncoderError {
    /// The source ran out of bytes before the value was complete.
    #[error("Insufficient data in source")]
    InsufficientData,
    /// A fixed-capacity sink cannot accept the requested bytes.
    #[error("Sink capacity exceeded: requested {requested} bytes, {remaining} remaining")]
    CapacityExceeded { requested: usize, remaining: usize },
    /// The underlying stream failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// The prefix tag is not one the target type's codec accepts.
    #[error("Unexpected encoding byte 0x{actual:02X}")]
    UnexpectedEncodingByte { actual: u8 },
    /// An aggregate's stored element count differs from the static arity.
    #[error("Container size mismatch: expected {expected}, got {actual}")]
    ContainerSizeMismatch { expected: u64, actual: u64 },
}

/// Broad classification of an [`EncoderError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The sink or source could not accept or produce the requested bytes.
    Io,
    /// The bytes do not have the shape the static type requires.
    Structural,
}

impl EncoderError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            EncoderError::InsufficientData
            | EncoderError::CapacityExceeded { .. }
            | EncoderError::Io(_) => ErrorKind::Io,
            EncoderError::UnexpectedEncodingByte { .. }
            | EncoderError::ContainerSizeMismatch { .. } => ErrorKind::Structural,
        }
    }
}

/// The result type used throughout this crate for encode/decode operations.
pub type Result<T> = std::result::Result<T, EncoderError>;

/// The codec contract for a single static type.
///
/// An implementation describes how to pick the prefix tag for a value, how many
/// bytes the full encoding takes, which tags it can interpret, and how to write
/// and read the payload that follows the tag. The provided [`write`](Encoding::write)
/// and [`read`](Encoding::read) methods bind these into the tag-then-payload
/// entry points used by every codec, including aggregates recursing into their
/// elements.
///
/// Most users should use `#[derive(Encoding)]` for their own structs.
///
/// # Invariants
/// - `write` produces exactly `size()` bytes.
/// - `prefix` and `size` are pure functions of the value.
pub trait Encoding {
    /// The tag that heads the encoding of this value.
    fn prefix(&self) -> EncodingByte;

    /// Total encoded size in bytes, prefix included.
    fn size(&self) -> usize;

    /// Returns true if this codec can interpret a payload introduced by `prefix`.
    fn matches(prefix: EncodingByte) -> bool;

    /// Writes the payload for a value whose prefix has already been written.
    fn write_payload<W: Writer + ?Sized>(&self, prefix: EncodingByte, writer: &mut W) -> Result<()>;

    /// Reads the payload following `prefix` into `self`.
    ///
    /// On error `self` may be partially overwritten and must not be relied upon.
    fn read_payload<R: Reader + ?Sized>(&mut self, prefix: EncodingByte, reader: &mut R) -> Result<()>;

    /// Writes the prefix tag followed by the payload.
    fn write<W: Writer + ?Sized>(&self, writer: &mut W) -> Result<()> {
        let prefix = self.prefix();
        writer.write_u8(prefix.into())?;
        self.write_payload(prefix, writer)
    }

    /// Reads a prefix tag, checks it against [`matches`](Encoding::matches), then reads the payload.
    fn read<R: Reader + ?Sized>(&mut self, reader: &mut R) -> Result<()> {
        let prefix = EncodingByte::from(reader.read_u8()?);
        if !Self::matches(prefix) {
            return Err(EncoderError::UnexpectedEncodingByte {
                actual: prefix.into(),
            });
        }
        self.read_payload(prefix, reader)
    }
}

/// Returns the number of bytes `value` encodes to.
pub fn encoded_size<T: Encoding + ?Sized>(value: &T) -> usize {
    value.size()
}

/// Convenience function to encode a value to bytes.
///
/// The output buffer is allocated once with the exact encoded size.
///
/// # Example
/// ```rust
/// use tagwire::{encode, decode};
///
/// let value = (7u8, (-3i32, true));
/// let mut buf = encode(&value).unwrap();
/// let decoded: (u8, (i32, bool)) = decode(&mut buf).unwrap();
/// assert_eq!(value, decoded);
/// ```
pub fn encode<T: Encoding + ?Sized>(value: &T) -> Result<Bytes> {
    let size = value.size();
    let mut writer = BytesMut::with_capacity(size);
    value
        .write(&mut writer)
        .inspect_err(|error| debug!(%error, "encode failed"))?;
    debug_assert_eq!(writer.len(), size, "written bytes differ from computed size");
    trace!(size, "encoded value");
    Ok(writer.freeze())
}

/// Encodes a value into an arbitrary [`Writer`].
pub fn encode_into<T: Encoding + ?Sized, W: Writer + ?Sized>(value: &T, writer: &mut W) -> Result<()> {
    let size = value.size();
    writer.prepare(size)?;
    value
        .write(writer)
        .inspect_err(|error| debug!(%error, "encode failed"))?;
    trace!(size, "encoded value");
    Ok(())
}

/// Encodes a value into a fixed slice and returns the number of bytes written.
///
/// Fails with [`EncoderError::CapacityExceeded`] before writing anything if the
/// slice is too small.
///
/// # Example
/// ```rust
/// use tagwire::encode_to_slice;
///
/// let mut buf = [0u8; 8];
/// let written = encode_to_slice(&(1u8, 2u8), &mut buf).unwrap();
/// assert_eq!(&buf[..written], &[0xba, 0x02, 0x01, 0x02]);
/// ```
pub fn encode_to_slice<T: Encoding + ?Sized>(value: &T, buffer: &mut [u8]) -> Result<usize> {
    let mut writer = BufferWriter::new(buffer);
    encode_into(value, &mut writer)?;
    Ok(writer.position())
}

/// Convenience function to decode a value from bytes.
///
/// The bytes consumed by the value are removed from the front of `reader`.
pub fn decode<T: Encoding + Default>(reader: &mut Bytes) -> Result<T> {
    let mut value = T::default();
    decode_from(&mut value, reader)?;
    Ok(value)
}

/// Decodes into caller-supplied storage from an arbitrary [`Reader`].
pub fn decode_from<T: Encoding + ?Sized, R: Reader + ?Sized>(value: &mut T, reader: &mut R) -> Result<()> {
    value
        .read(reader)
        .inspect_err(|error| debug!(%error, "decode failed"))?;
    trace!(size = value.size(), "decoded value");
    Ok(())
}
