//! Sequential encoding into a growable buffer.

use crate::{
    config::{grown_capacity, WriterConfig},
    ByteViewMut, Error, WriteBlock,
};
use bytes::{Bytes, BytesMut};
use tracing::{debug, trace};

/// A forward-only cursor that encodes one block at a time.
///
/// The writer exclusively owns a zero-initialized buffer. When a value does not fit, the buffer
/// is replaced by a larger one (see [grown_capacity]) holding a copy of everything written so
/// far.
#[derive(Clone, Debug)]
pub struct Writer {
    buf: BytesMut,
    offset: usize,
}

impl Default for Writer {
    fn default() -> Self {
        Self::new()
    }
}

impl Writer {
    /// Creates a writer with the default initial capacity.
    pub fn new() -> Self {
        Self::with_config(WriterConfig::default())
    }

    /// Creates a writer from a configuration.
    pub fn with_config(cfg: WriterConfig) -> Self {
        Self::with_capacity(cfg.initial_capacity)
    }

    /// Creates a writer whose first buffer holds `capacity` bytes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: BytesMut::zeroed(capacity),
            offset: 0,
        }
    }

    /// Returns the number of bytes written.
    pub fn len(&self) -> usize {
        self.offset
    }

    /// Returns true if nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.offset == 0
    }

    /// Returns the size of the current buffer.
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Encodes `value` at the cursor and advances past it.
    ///
    /// On failure the cursor does not move (bytes past the cursor may have been modified, but
    /// they are never part of the output unless overwritten by a later write).
    pub fn write<B: WriteBlock + ?Sized>(&mut self, block: &B, value: &B::Value) -> Result<(), Error> {
        let size = block.size(value)?;
        let end = self.offset.checked_add(size).ok_or(Error::OutOfRange {
            start: self.offset,
            len: size,
            capacity: self.buf.len(),
        })?;
        if end > self.buf.len() {
            self.grow(end, size)?;
        }
        block.write(&mut ByteViewMut::new(&mut self.buf), self.offset, value)?;
        self.offset = end;
        Ok(())
    }

    /// Consumes the writer, returning exactly the bytes written.
    pub fn finalize(mut self) -> Bytes {
        self.buf.truncate(self.offset);
        trace!(len = self.offset, "finalized");
        self.buf.freeze()
    }

    /// Replaces the buffer with one holding at least `min` bytes.
    fn grow(&mut self, min: usize, size: usize) -> Result<(), Error> {
        let capacity = grown_capacity(min).ok_or(Error::OutOfRange {
            start: self.offset,
            len: size,
            capacity: self.buf.len(),
        })?;
        let mut buf = BytesMut::zeroed(capacity);
        buf[..self.offset].copy_from_slice(&self.buf[..self.offset]);
        debug!(
            offset = self.offset,
            old = self.buf.len(),
            new = capacity,
            "grew buffer"
        );
        self.buf = buf;
        Ok(())
    }
}
