use crate::{EncoderError, Encoding, Reader, Result, Writer};

/// Prefix tag written as the first byte of every encoded value.
///
/// Tags are stable and part of the wire format. They are totally ordered by
/// their byte value. Most users do not need to use these directly.
///
/// - `0x00..=0x7f` are positive fixints: the value is the tag itself.
/// - `0xc0..=0xff` are negative fixints: the tag reinterpreted as `i8`.
/// - Everything in between names a payload shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EncodingByte(u8);

impl EncodingByte {
    pub const POSITIVE_FIXINT_MIN: EncodingByte = EncodingByte(0x00);
    pub const POSITIVE_FIXINT_MAX: EncodingByte = EncodingByte(0x7f);
    ///< Shares its value with the fixint 0
    pub const FALSE: EncodingByte = EncodingByte(0x00);
    ///< Shares its value with the fixint 1
    pub const TRUE: EncodingByte = EncodingByte(0x01);
    pub const U8: EncodingByte = EncodingByte(0x80);
    pub const U16: EncodingByte = EncodingByte(0x81);
    pub const U32: EncodingByte = EncodingByte(0x82);
    pub const U64: EncodingByte = EncodingByte(0x83);
    pub const I8: EncodingByte = EncodingByte(0x84);
    pub const I16: EncodingByte = EncodingByte(0x85);
    pub const I32: EncodingByte = EncodingByte(0x86);
    pub const I64: EncodingByte = EncodingByte(0x87);
    pub const F32: EncodingByte = EncodingByte(0x88);
    pub const F64: EncodingByte = EncodingByte(0x89);
    ///< Derived record: count followed by fields in declaration order
    pub const STRUCTURE: EncodingByte = EncodingByte(0xb9);
    ///< Tuple or fixed array: count followed by elements in index order
    pub const ARRAY: EncodingByte = EncodingByte(0xba);
    pub const NEGATIVE_FIXINT_MIN: EncodingByte = EncodingByte(0xc0);
    pub const NEGATIVE_FIXINT_MAX: EncodingByte = EncodingByte(0xff);

    /// Builds a positive fixint tag. Returns `None` for values above `0x7f`.
    pub const fn positive_fixint(value: u8) -> Option<EncodingByte> {
        if value <= Self::POSITIVE_FIXINT_MAX.0 {
            Some(EncodingByte(value))
        } else {
            None
        }
    }

    /// Builds a negative fixint tag. Returns `None` outside `-64..=-1`.
    pub const fn negative_fixint(value: i8) -> Option<EncodingByte> {
        if value >= -64 && value < 0 {
            Some(EncodingByte(value as u8))
        } else {
            None
        }
    }

    pub const fn is_positive_fixint(self) -> bool {
        self.0 <= Self::POSITIVE_FIXINT_MAX.0
    }

    pub const fn is_negative_fixint(self) -> bool {
        self.0 >= Self::NEGATIVE_FIXINT_MIN.0
    }

    pub const fn is_fixint(self) -> bool {
        self.is_positive_fixint() || self.is_negative_fixint()
    }

    /// Payload width in bytes for unsigned integer tags.
    pub const fn unsigned_width(self) -> Option<usize> {
        match self {
            Self::U8 => Some(1),
            Self::U16 => Some(2),
            Self::U32 => Some(4),
            Self::U64 => Some(8),
            _ => None,
        }
    }

    /// Payload width in bytes for signed integer tags.
    pub const fn signed_width(self) -> Option<usize> {
        match self {
            Self::I8 => Some(1),
            Self::I16 => Some(2),
            Self::I32 => Some(4),
            Self::I64 => Some(8),
            _ => None,
        }
    }

    /// Size of the prefix plus any fixed-width payload the tag implies.
    ///
    /// Tags with variable payloads (structures, arrays) report only the prefix byte.
    pub const fn base_size(self) -> usize {
        match self {
            Self::U8 | Self::I8 => 2,
            Self::U16 | Self::I16 => 3,
            Self::U32 | Self::I32 | Self::F32 => 5,
            Self::U64 | Self::I64 | Self::F64 => 9,
            _ => 1,
        }
    }
}

impl From<u8> for EncodingByte {
    fn from(byte: u8) -> Self {
        EncodingByte(byte)
    }
}

impl From<EncodingByte> for u8 {
    fn from(prefix: EncodingByte) -> Self {
        prefix.0
    }
}

fn unexpected(prefix: EncodingByte) -> EncoderError {
    EncoderError::UnexpectedEncodingByte {
        actual: prefix.into(),
    }
}

// --- Integers ---
/// Picks the narrowest tag able to carry `value`.
#[inline]
fn unsigned_prefix(value: u64) -> EncodingByte {
    if let Some(fixint) = u8::try_from(value).ok().and_then(EncodingByte::positive_fixint) {
        fixint
    } else if value <= u8::MAX as u64 {
        EncodingByte::U8
    } else if value <= u16::MAX as u64 {
        EncodingByte::U16
    } else if value <= u32::MAX as u64 {
        EncodingByte::U32
    } else {
        EncodingByte::U64
    }
}

#[inline]
fn signed_prefix(value: i64) -> EncodingByte {
    if (0..=0x7f).contains(&value) {
        EncodingByte(value as u8)
    } else if let Some(fixint) = i8::try_from(value).ok().and_then(EncodingByte::negative_fixint) {
        fixint
    } else if i8::try_from(value).is_ok() {
        EncodingByte::I8
    } else if i16::try_from(value).is_ok() {
        EncodingByte::I16
    } else if i32::try_from(value).is_ok() {
        EncodingByte::I32
    } else {
        EncodingByte::I64
    }
}

// Truncating casts below are exact: the prefix was chosen for the value's range.
fn write_unsigned<W: Writer + ?Sized>(prefix: EncodingByte, value: u64, writer: &mut W) -> Result<()> {
    match prefix {
        EncodingByte::U8 => writer.write_bytes(&(value as u8).to_le_bytes()),
        EncodingByte::U16 => writer.write_bytes(&(value as u16).to_le_bytes()),
        EncodingByte::U32 => writer.write_bytes(&(value as u32).to_le_bytes()),
        EncodingByte::U64 => writer.write_bytes(&value.to_le_bytes()),
        p if p.is_positive_fixint() => Ok(()),
        other => Err(unexpected(other)),
    }
}

fn read_unsigned<R: Reader + ?Sized>(prefix: EncodingByte, reader: &mut R) -> Result<u64> {
    match prefix {
        EncodingByte::U8 => Ok(u8::from_le_bytes(reader.read_array()?) as u64),
        EncodingByte::U16 => Ok(u16::from_le_bytes(reader.read_array()?) as u64),
        EncodingByte::U32 => Ok(u32::from_le_bytes(reader.read_array()?) as u64),
        EncodingByte::U64 => Ok(u64::from_le_bytes(reader.read_array()?)),
        p if p.is_positive_fixint() => Ok(p.0 as u64),
        other => Err(unexpected(other)),
    }
}

fn write_signed<W: Writer + ?Sized>(prefix: EncodingByte, value: i64, writer: &mut W) -> Result<()> {
    match prefix {
        EncodingByte::I8 => writer.write_bytes(&(value as i8).to_le_bytes()),
        EncodingByte::I16 => writer.write_bytes(&(value as i16).to_le_bytes()),
        EncodingByte::I32 => writer.write_bytes(&(value as i32).to_le_bytes()),
        EncodingByte::I64 => writer.write_bytes(&value.to_le_bytes()),
        p if p.is_fixint() => Ok(()),
        other => Err(unexpected(other)),
    }
}

fn read_signed<R: Reader + ?Sized>(prefix: EncodingByte, reader: &mut R) -> Result<i64> {
    match prefix {
        EncodingByte::I8 => Ok(i8::from_le_bytes(reader.read_array()?) as i64),
        EncodingByte::I16 => Ok(i16::from_le_bytes(reader.read_array()?) as i64),
        EncodingByte::I32 => Ok(i32::from_le_bytes(reader.read_array()?) as i64),
        EncodingByte::I64 => Ok(i64::from_le_bytes(reader.read_array()?)),
        p if p.is_positive_fixint() => Ok(p.0 as i64),
        p if p.is_negative_fixint() => Ok(p.0 as i8 as i64),
        other => Err(unexpected(other)),
    }
}

/// Encodes unsigned integers using the narrowest tag that holds the value.
///
/// - `0..=127` are encoded as a single fixint tag byte
/// - Larger values use `U8`, `U16`, `U32` or `U64` with the value in little-endian
/// - Decoding accepts any unsigned tag no wider than the target type
macro_rules! impl_unsigned {
    ($($t:ty),*) => {$(
        impl Encoding for $t {
            #[inline]
            fn prefix(&self) -> EncodingByte {
                unsigned_prefix(*self as u64)
            }

            #[inline]
            fn size(&self) -> usize {
                self.prefix().base_size()
            }

            fn matches(prefix: EncodingByte) -> bool {
                prefix.is_positive_fixint()
                    || prefix
                        .unsigned_width()
                        .is_some_and(|width| width <= std::mem::size_of::<$t>())
            }

            fn write_payload<W: Writer + ?Sized>(&self, prefix: EncodingByte, writer: &mut W) -> Result<()> {
                write_unsigned(prefix, *self as u64, writer)
            }

            fn read_payload<R: Reader + ?Sized>(&mut self, prefix: EncodingByte, reader: &mut R) -> Result<()> {
                if !Self::matches(prefix) {
                    return Err(unexpected(prefix));
                }
                let value = read_unsigned(prefix, reader)?;
                *self = <$t>::try_from(value).map_err(|_| unexpected(prefix))?;
                Ok(())
            }
        }
    )*};
}

/// Encodes signed integers; `-64..=127` fit in a single fixint tag byte.
macro_rules! impl_signed {
    ($($t:ty),*) => {$(
        impl Encoding for $t {
            #[inline]
            fn prefix(&self) -> EncodingByte {
                signed_prefix(*self as i64)
            }

            #[inline]
            fn size(&self) -> usize {
                self.prefix().base_size()
            }

            fn matches(prefix: EncodingByte) -> bool {
                prefix.is_fixint()
                    || prefix
                        .signed_width()
                        .is_some_and(|width| width <= std::mem::size_of::<$t>())
            }

            fn write_payload<W: Writer + ?Sized>(&self, prefix: EncodingByte, writer: &mut W) -> Result<()> {
                write_signed(prefix, *self as i64, writer)
            }

            fn read_payload<R: Reader + ?Sized>(&mut self, prefix: EncodingByte, reader: &mut R) -> Result<()> {
                if !Self::matches(prefix) {
                    return Err(unexpected(prefix));
                }
                let value = read_signed(prefix, reader)?;
                *self = <$t>::try_from(value).map_err(|_| unexpected(prefix))?;
                Ok(())
            }
        }
    )*};
}

impl_unsigned!(u8, u16, u32, u64, usize);
impl_signed!(i8, i16, i32, i64, isize);

// --- bool ---
/// Encodes a `bool` as a single tag byte: `FALSE` or `TRUE`.
impl Encoding for bool {
    fn prefix(&self) -> EncodingByte {
        if *self {
            EncodingByte::TRUE
        } else {
            EncodingByte::FALSE
        }
    }

    fn size(&self) -> usize {
        1
    }

    fn matches(prefix: EncodingByte) -> bool {
        prefix == EncodingByte::FALSE || prefix == EncodingByte::TRUE
    }

    fn write_payload<W: Writer + ?Sized>(&self, _prefix: EncodingByte, _writer: &mut W) -> Result<()> {
        Ok(())
    }

    fn read_payload<R: Reader + ?Sized>(&mut self, prefix: EncodingByte, _reader: &mut R) -> Result<()> {
        match prefix {
            EncodingByte::FALSE => *self = false,
            EncodingByte::TRUE => *self = true,
            other => return Err(unexpected(other)),
        }
        Ok(())
    }
}

// --- Floats ---
impl Encoding for f32 {
    fn prefix(&self) -> EncodingByte {
        EncodingByte::F32
    }

    fn size(&self) -> usize {
        EncodingByte::F32.base_size()
    }

    fn matches(prefix: EncodingByte) -> bool {
        prefix == EncodingByte::F32
    }

    fn write_payload<W: Writer + ?Sized>(&self, _prefix: EncodingByte, writer: &mut W) -> Result<()> {
        writer.write_bytes(&self.to_le_bytes())
    }

    fn read_payload<R: Reader + ?Sized>(&mut self, prefix: EncodingByte, reader: &mut R) -> Result<()> {
        if prefix != EncodingByte::F32 {
            return Err(unexpected(prefix));
        }
        *self = f32::from_le_bytes(reader.read_array()?);
        Ok(())
    }
}

/// `f64` also accepts `F32` payloads, widening them on read.
impl Encoding for f64 {
    fn prefix(&self) -> EncodingByte {
        EncodingByte::F64
    }

    fn size(&self) -> usize {
        EncodingByte::F64.base_size()
    }

    fn matches(prefix: EncodingByte) -> bool {
        prefix == EncodingByte::F32 || prefix == EncodingByte::F64
    }

    fn write_payload<W: Writer + ?Sized>(&self, _prefix: EncodingByte, writer: &mut W) -> Result<()> {
        writer.write_bytes(&self.to_le_bytes())
    }

    fn read_payload<R: Reader + ?Sized>(&mut self, prefix: EncodingByte, reader: &mut R) -> Result<()> {
        *self = match prefix {
            EncodingByte::F32 => f32::from_le_bytes(reader.read_array()?) as f64,
            EncodingByte::F64 => f64::from_le_bytes(reader.read_array()?),
            other => return Err(unexpected(other)),
        };
        Ok(())
    }
}

// --- Box<T> ---
/// Encodes a `Box<T>` exactly like the inner value.
impl<T: Encoding + ?Sized> Encoding for Box<T> {
    fn prefix(&self) -> EncodingByte {
        (**self).prefix()
    }

    fn size(&self) -> usize {
        (**self).size()
    }

    fn matches(prefix: EncodingByte) -> bool {
        T::matches(prefix)
    }

    fn write_payload<W: Writer + ?Sized>(&self, prefix: EncodingByte, writer: &mut W) -> Result<()> {
        (**self).write_payload(prefix, writer)
    }

    fn read_payload<R: Reader + ?Sized>(&mut self, prefix: EncodingByte, reader: &mut R) -> Result<()> {
        (**self).read_payload(prefix, reader)
    }
}
