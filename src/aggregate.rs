//! Fixed-arity aggregates: tuples, arrays and derived records.
//!
//! Every aggregate shares one payload shape, whatever its element types:
//!
//! ```text
//! +-----+---------+-----//-----+
//! | TAG | U64:N   | N ELEMENTS |
//! +-----+---------+-----//-----+
//! ```
//!
//! `TAG` is [`EncodingByte::ARRAY`] for tuples and arrays and
//! [`EncodingByte::STRUCTURE`] for derived records. Elements are full
//! encodings (tag and payload) of each element in ascending index order.
//! Size, write and read walk the elements in the same order, which keeps the
//! computed size equal to the written size.

use crate::{EncoderError, Encoding, EncodingByte, Reader, Result, Writer};

/// Zero-sized marker carrying the static arity `N` of an aggregate.
///
/// It supplies the arity-dependent steps of the aggregate format: the size of
/// the tag and count header, writing the count, and checking a decoded count.
/// Generated code and the tuple/array impls call these instead of repeating
/// the count logic.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Index<const N: usize>;

impl<const N: usize> Index<N> {
    /// The element count.
    pub const ARITY: usize = N;

    const COUNT: u64 = N as u64;

    /// Size of `prefix` followed by the encoded element count.
    #[inline]
    pub fn header_size(prefix: EncodingByte) -> usize {
        prefix.base_size() + Self::COUNT.size()
    }

    #[inline]
    pub fn write_count<W: Writer + ?Sized>(writer: &mut W) -> Result<()> {
        Self::COUNT.write(writer)
    }

    /// Reads the element count and rejects anything but `N`.
    ///
    /// Nothing past the count is consumed on mismatch.
    pub fn read_count<R: Reader + ?Sized>(reader: &mut R) -> Result<()> {
        let mut count = 0u64;
        count.read(reader)?;
        if count != Self::COUNT {
            return Err(EncoderError::ContainerSizeMismatch {
                expected: Self::COUNT,
                actual: count,
            });
        }
        Ok(())
    }
}

// --- Array ---
/// Encodes a fixed-size array like a tuple of `N` elements of the same type.
impl<T: Encoding, const N: usize> Encoding for [T; N] {
    #[inline]
    fn prefix(&self) -> EncodingByte {
        EncodingByte::ARRAY
    }

    fn size(&self) -> usize {
        Index::<N>::header_size(EncodingByte::ARRAY) + self.iter().map(Encoding::size).sum::<usize>()
    }

    #[inline]
    fn matches(prefix: EncodingByte) -> bool {
        prefix == EncodingByte::ARRAY
    }

    fn write_payload<W: Writer + ?Sized>(&self, _prefix: EncodingByte, writer: &mut W) -> Result<()> {
        Index::<N>::write_count(writer)?;
        for element in self {
            element.write(writer)?;
        }
        Ok(())
    }

    fn read_payload<R: Reader + ?Sized>(&mut self, _prefix: EncodingByte, reader: &mut R) -> Result<()> {
        Index::<N>::read_count(reader)?;
        for element in self.iter_mut() {
            element.read(reader)?;
        }
        Ok(())
    }
}

// --- Tuple ---
/// Implements encoding/decoding for tuples of 0 to 12 elements.
///
/// Each element is visited by its tuple index in ascending order; the same
/// index list drives size, write and read.
macro_rules! impl_tuple {
    ($len:literal => $($T:ident : $idx:tt),*) => {
        impl<$($T: Encoding),*> Encoding for ($($T,)*) {
            #[inline]
            fn prefix(&self) -> EncodingByte {
                EncodingByte::ARRAY
            }

            fn size(&self) -> usize {
                Index::<{ $len }>::header_size(EncodingByte::ARRAY) $(+ self.$idx.size())*
            }

            #[inline]
            fn matches(prefix: EncodingByte) -> bool {
                prefix == EncodingByte::ARRAY
            }

            fn write_payload<W: Writer + ?Sized>(&self, _prefix: EncodingByte, writer: &mut W) -> Result<()> {
                Index::<{ $len }>::write_count(writer)?;
                $(self.$idx.write(writer)?;)*
                Ok(())
            }

            fn read_payload<R: Reader + ?Sized>(&mut self, _prefix: EncodingByte, reader: &mut R) -> Result<()> {
                Index::<{ $len }>::read_count(reader)?;
                $(self.$idx.read(reader)?;)*
                Ok(())
            }
        }
    };
}

impl_tuple!(0 =>);
impl_tuple!(1 => T0: 0);
impl_tuple!(2 => T0: 0, T1: 1);
impl_tuple!(3 => T0: 0, T1: 1, T2: 2);
impl_tuple!(4 => T0: 0, T1: 1, T2: 2, T3: 3);
impl_tuple!(5 => T0: 0, T1: 1, T2: 2, T3: 3, T4: 4);
impl_tuple!(6 => T0: 0, T1: 1, T2: 2, T3: 3, T4: 4, T5: 5);
impl_tuple!(7 => T0: 0, T1: 1, T2: 2, T3: 3, T4: 4, T5: 5, T6: 6);
impl_tuple!(8 => T0: 0, T1: 1, T2: 2, T3: 3, T4: 4, T5: 5, T6: 6, T7: 7);
impl_tuple!(9 => T0: 0, T1: 1, T2: 2, T3: 3, T4: 4, T5: 5, T6: 6, T7: 7, T8: 8);
impl_tuple!(10 => T0: 0, T1: 1, T2: 2, T3: 3, T4: 4, T5: 5, T6: 6, T7: 7, T8: 8, T9: 9);
impl_tuple!(11 => T0: 0, T1: 1, T2: 2, T3: 3, T4: 4, T5: 5, T6: 6, T7: 7, T8: 8, T9: 9, T10: 10);
impl_tuple!(12 => T0: 0, T1: 1, T2: 2, T3: 3, T4: 4, T5: 5, T6: 6, T7: 7, T8: 8, T9: 9, T10: 10, T11: 11);
