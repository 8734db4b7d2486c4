use crate::{Encoding, Reader, Result, Writer};
use tracing::{debug, trace};

/// Writes successive values to one [`Writer`].
///
/// Each value's size is computed once and handed to [`Writer::prepare`] before
/// any of its bytes are written, so a fixed sink rejects an oversized value
/// up front instead of part way through.
///
/// # Example
/// ```rust
/// use tagwire::{BufferWriter, Serializer};
///
/// let mut buf = [0u8; 16];
/// let mut serializer = Serializer::new(BufferWriter::new(&mut buf));
/// serializer.write(&(1u16, -1i8)).unwrap();
/// assert_eq!(serializer.writer().written(), &[0xba, 0x02, 0x01, 0xff]);
/// ```
#[derive(Debug)]
pub struct Serializer<W> {
    writer: W,
}

impl<W: Writer> Serializer<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn write<T: Encoding + ?Sized>(&mut self, value: &T) -> Result<()> {
        let size = value.size();
        self.writer.prepare(size)?;
        value
            .write(&mut self.writer)
            .inspect_err(|error| debug!(%error, size, "serializer write failed"))?;
        trace!(size, "serialized value");
        Ok(())
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    pub fn writer_mut(&mut self) -> &mut W {
        &mut self.writer
    }

    pub fn into_writer(self) -> W {
        self.writer
    }
}

/// Reads successive values from one [`Reader`].
#[derive(Debug)]
pub struct Deserializer<R> {
    reader: R,
}

impl<R: Reader> Deserializer<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    /// Reads into existing storage; on error `value` is left partially written.
    pub fn read<T: Encoding + ?Sized>(&mut self, value: &mut T) -> Result<()> {
        value
            .read(&mut self.reader)
            .inspect_err(|error| debug!(%error, "deserializer read failed"))?;
        trace!(size = value.size(), "deserialized value");
        Ok(())
    }

    /// Reads a fresh value starting from `T::default()`.
    pub fn decode<T: Encoding + Default>(&mut self) -> Result<T> {
        let mut value = T::default();
        self.read(&mut value)?;
        Ok(value)
    }

    pub fn reader(&self) -> &R {
        &self.reader
    }

    pub fn reader_mut(&mut self) -> &mut R {
        &mut self.reader
    }

    pub fn into_reader(self) -> R {
        self.reader
    }
}
