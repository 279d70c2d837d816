//! Blocks for raw byte runs.

use crate::{ByteView, ByteViewMut, Error, ReadBlock, WriteBlock};
use bytes::Bytes;

/// Fails with [Error::OutOfRange] if a payload of `len` bytes does not fit a slot of `size`.
pub(crate) fn fits(offset: usize, len: usize, size: usize) -> Result<(), Error> {
    if len > size {
        return Err(Error::OutOfRange {
            start: offset,
            len,
            capacity: size,
        });
    }
    Ok(())
}

/// A run of exactly `N` bytes, where `N` is chosen at construction.
///
/// Shorter payloads are padded with zeros. Longer payloads fail with [Error::OutOfRange].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixedBuffer(pub usize);

impl ReadBlock for FixedBuffer {
    type Value = Bytes;

    fn fixed_size(&self) -> Option<usize> {
        Some(self.0)
    }

    fn size(&self, _: &ByteView<'_>, _: usize) -> Result<usize, Error> {
        Ok(self.0)
    }

    fn read(&self, view: &ByteView<'_>, offset: usize) -> Result<Bytes, Error> {
        view.read(offset, Some(self.0))
    }
}

impl WriteBlock for FixedBuffer {
    type Value = Bytes;

    fn fixed_size(&self) -> Option<usize> {
        Some(self.0)
    }

    fn size(&self, _: &Bytes) -> Result<usize, Error> {
        Ok(self.0)
    }

    fn write(&self, view: &mut ByteViewMut<'_>, offset: usize, value: &Bytes) -> Result<(), Error> {
        fits(offset, value.len(), self.0)?;
        view.write(value, offset)?;
        view.zero(offset + value.len(), self.0 - value.len())
    }
}

/// A raw run of bytes without any length prefix (write only).
///
/// The encoded size is the length of the value, so the layout can only be read back when the
/// length is known from context (e.g. with [FixedBuffer]).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Buffer;

impl WriteBlock for Buffer {
    type Value = Bytes;

    fn size(&self, value: &Bytes) -> Result<usize, Error> {
        Ok(value.len())
    }

    fn write(&self, view: &mut ByteViewMut<'_>, offset: usize, value: &Bytes) -> Result<(), Error> {
        view.write(value, offset)
    }
}
