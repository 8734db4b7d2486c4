//! Byte sinks and sources the codecs write to and read from.
//!
//! Codecs only ever see these two traits, through generics, so a value can be
//! encoded into a growable buffer, a fixed slice or a stream without any
//! change to the codec.

use crate::{EncoderError, Result};
use bytes::{Buf, BufMut, Bytes, BytesMut};

/// A destination for encoded bytes.
pub trait Writer {
    /// Appends all of `bytes`, or fails without a partial write where the sink allows it.
    fn write_bytes(&mut self, bytes: &[u8]) -> Result<()>;

    /// Called once with the full encoded size before a value is written.
    ///
    /// Growable sinks reserve space here; fixed sinks reject values that cannot fit.
    fn prepare(&mut self, _size: usize) -> Result<()> {
        Ok(())
    }

    #[inline]
    fn write_u8(&mut self, byte: u8) -> Result<()> {
        self.write_bytes(&[byte])
    }
}

/// A source of encoded bytes.
pub trait Reader {
    /// Fills `buf` completely or fails with [`EncoderError::InsufficientData`].
    fn read_bytes(&mut self, buf: &mut [u8]) -> Result<()>;

    #[inline]
    fn read_u8(&mut self) -> Result<u8> {
        let [byte] = self.read_array::<1>()?;
        Ok(byte)
    }

    #[inline]
    fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut buf = [0u8; N];
        self.read_bytes(&mut buf)?;
        Ok(buf)
    }
}

impl<W: Writer + ?Sized> Writer for &mut W {
    fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        (**self).write_bytes(bytes)
    }

    fn prepare(&mut self, size: usize) -> Result<()> {
        (**self).prepare(size)
    }
}

impl<R: Reader + ?Sized> Reader for &mut R {
    fn read_bytes(&mut self, buf: &mut [u8]) -> Result<()> {
        (**self).read_bytes(buf)
    }
}

// --- Growable sinks ---
impl Writer for Vec<u8> {
    fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.extend_from_slice(bytes);
        Ok(())
    }

    fn prepare(&mut self, size: usize) -> Result<()> {
        self.reserve(size);
        Ok(())
    }
}

impl Writer for BytesMut {
    fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.put_slice(bytes);
        Ok(())
    }

    fn prepare(&mut self, size: usize) -> Result<()> {
        self.reserve(size);
        Ok(())
    }
}

// --- Consuming sources ---
/// Reads from the front of the slice, advancing it past consumed bytes.
impl Reader for &[u8] {
    fn read_bytes(&mut self, buf: &mut [u8]) -> Result<()> {
        if self.len() < buf.len() {
            return Err(EncoderError::InsufficientData);
        }
        let (head, tail) = self.split_at(buf.len());
        buf.copy_from_slice(head);
        *self = tail;
        Ok(())
    }
}

impl Reader for Bytes {
    fn read_bytes(&mut self, buf: &mut [u8]) -> Result<()> {
        if self.remaining() < buf.len() {
            return Err(EncoderError::InsufficientData);
        }
        self.copy_to_slice(buf);
        Ok(())
    }
}

/// A fixed-capacity sink over a caller-provided slice.
///
/// Writes that do not fit fail with [`EncoderError::CapacityExceeded`] and leave
/// the slice untouched past the current position.
#[derive(Debug)]
pub struct BufferWriter<'a> {
    buffer: &'a mut [u8],
    position: usize,
}

impl<'a> BufferWriter<'a> {
    pub fn new(buffer: &'a mut [u8]) -> Self {
        Self {
            buffer,
            position: 0,
        }
    }

    /// Number of bytes written so far.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    pub fn remaining(&self) -> usize {
        self.buffer.len() - self.position
    }

    /// The written prefix of the buffer.
    pub fn written(&self) -> &[u8] {
        &self.buffer[..self.position]
    }

    fn check(&self, requested: usize) -> Result<()> {
        let remaining = self.remaining();
        if requested > remaining {
            return Err(EncoderError::CapacityExceeded {
                requested,
                remaining,
            });
        }
        Ok(())
    }
}

impl Writer for BufferWriter<'_> {
    fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.check(bytes.len())?;
        let end = self.position + bytes.len();
        self.buffer[self.position..end].copy_from_slice(bytes);
        self.position = end;
        Ok(())
    }

    fn prepare(&mut self, size: usize) -> Result<()> {
        self.check(size)
    }
}

/// A position-tracking source over a borrowed slice.
#[derive(Debug, Clone)]
pub struct BufferReader<'a> {
    buffer: &'a [u8],
    position: usize,
}

impl<'a> BufferReader<'a> {
    pub fn new(buffer: &'a [u8]) -> Self {
        Self {
            buffer,
            position: 0,
        }
    }

    /// Number of bytes consumed so far.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn remaining(&self) -> usize {
        self.buffer.len() - self.position
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }
}

impl Reader for BufferReader<'_> {
    fn read_bytes(&mut self, buf: &mut [u8]) -> Result<()> {
        if self.remaining() < buf.len() {
            return Err(EncoderError::InsufficientData);
        }
        let end = self.position + buf.len();
        buf.copy_from_slice(&self.buffer[self.position..end]);
        self.position = end;
        Ok(())
    }
}

/// Adapts any [`std::io::Write`] into a [`Writer`].
#[derive(Debug)]
pub struct StreamWriter<W> {
    inner: W,
}

impl<W: std::io::Write> StreamWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: std::io::Write> Writer for StreamWriter<W> {
    fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.inner.write_all(bytes)?;
        Ok(())
    }
}

/// Adapts any [`std::io::Read`] into a [`Reader`].
///
/// End of stream is reported as [`EncoderError::InsufficientData`].
#[derive(Debug)]
pub struct StreamReader<R> {
    inner: R,
}

impl<R: std::io::Read> StreamReader<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: std::io::Read> Reader for StreamReader<R> {
    fn read_bytes(&mut self, buf: &mut [u8]) -> Result<()> {
        self.inner.read_exact(buf).map_err(|error| {
            if error.kind() == std::io::ErrorKind::UnexpectedEof {
                EncoderError::InsufficientData
            } else {
                EncoderError::Io(error)
            }
        })
    }
}
