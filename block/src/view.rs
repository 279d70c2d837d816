//! Bounds-checked views over byte buffers.
//!
//! Views are the only place in the crate that index raw memory. Every access is validated
//! against the capacity of the underlying buffer and fails with [Error::OutOfRange] instead of
//! panicking. Views never grow: a [crate::Writer] grows by replacing its buffer and handing out
//! a fresh view for each block call.

use crate::Error;
use bytes::Bytes;

/// Checks that `[start, start + len)` lies within `[0, capacity)`.
#[inline]
fn check(start: usize, len: usize, capacity: usize) -> Result<(), Error> {
    match start.checked_add(len) {
        Some(end) if end <= capacity => Ok(()),
        _ => Err(Error::OutOfRange {
            start,
            len,
            capacity,
        }),
    }
}

/// Resolves an optional length into a concrete one (the remainder if `None`).
#[inline]
fn resolve(start: usize, len: Option<usize>, capacity: usize) -> Result<usize, Error> {
    match len {
        Some(len) => {
            check(start, len, capacity)?;
            Ok(len)
        }
        None => {
            check(start, 0, capacity)?;
            Ok(capacity - start)
        }
    }
}

/// A read-only, bounds-checked view over a byte buffer.
#[derive(Clone, Copy, Debug)]
pub struct ByteView<'a> {
    buf: &'a [u8],
}

impl<'a> ByteView<'a> {
    /// Creates a view over `buf`.
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf }
    }

    /// Returns the capacity of the view.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns true if the view has no capacity.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Borrows `len` bytes starting at `start` (the remainder if `len` is `None`).
    pub fn slice(&self, start: usize, len: Option<usize>) -> Result<&'a [u8], Error> {
        let len = resolve(start, len, self.buf.len())?;
        Ok(&self.buf[start..start + len])
    }

    /// Copies `len` bytes starting at `start` (the remainder if `len` is `None`).
    ///
    /// The returned buffer is independent of the view.
    pub fn read(&self, start: usize, len: Option<usize>) -> Result<Bytes, Error> {
        self.slice(start, len).map(Bytes::copy_from_slice)
    }

    /// Reads the byte at `index`.
    pub fn read_byte(&self, index: usize) -> Result<u8, Error> {
        check(index, 1, self.buf.len())?;
        Ok(self.buf[index])
    }

    /// Reads `N` bytes starting at `start` into an array.
    pub fn read_array<const N: usize>(&self, start: usize) -> Result<[u8; N], Error> {
        let mut dst = [0u8; N];
        dst.copy_from_slice(self.slice(start, Some(N))?);
        Ok(dst)
    }
}

impl AsRef<[u8]> for ByteView<'_> {
    fn as_ref(&self) -> &[u8] {
        self.buf
    }
}

/// A mutable, bounds-checked view over a byte buffer.
///
/// Writes overwrite in place and never extend the buffer.
#[derive(Debug)]
pub struct ByteViewMut<'a> {
    buf: &'a mut [u8],
}

impl<'a> ByteViewMut<'a> {
    /// Creates a mutable view over `buf`.
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self { buf }
    }

    /// Returns the capacity of the view.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns true if the view has no capacity.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Reborrows the view as read-only.
    pub fn as_view(&self) -> ByteView<'_> {
        ByteView::new(self.buf)
    }

    /// Copies `len` bytes starting at `start` (the remainder if `len` is `None`).
    pub fn read(&self, start: usize, len: Option<usize>) -> Result<Bytes, Error> {
        self.as_view().read(start, len)
    }

    /// Reads the byte at `index`.
    pub fn read_byte(&self, index: usize) -> Result<u8, Error> {
        self.as_view().read_byte(index)
    }

    /// Copies `content` into `[offset, offset + content.len())`.
    ///
    /// Accepts raw slices, [Bytes] and other views alike, without an intermediate copy.
    pub fn write(&mut self, content: impl AsRef<[u8]>, offset: usize) -> Result<(), Error> {
        let content = content.as_ref();
        check(offset, content.len(), self.buf.len())?;
        self.buf[offset..offset + content.len()].copy_from_slice(content);
        Ok(())
    }

    /// Writes a single byte at `index`.
    pub fn write_byte(&mut self, index: usize, value: u8) -> Result<(), Error> {
        check(index, 1, self.buf.len())?;
        self.buf[index] = value;
        Ok(())
    }

    /// Sets `len` bytes starting at `offset` to zero.
    pub fn zero(&mut self, offset: usize, len: usize) -> Result<(), Error> {
        check(offset, len, self.buf.len())?;
        self.buf[offset..offset + len].fill(0);
        Ok(())
    }
}

impl AsRef<[u8]> for ByteViewMut<'_> {
    fn as_ref(&self) -> &[u8] {
        self.buf
    }
}
