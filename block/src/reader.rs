//! Sequential decoding of a buffer.

use crate::{ByteView, Error, ReadBlock};
use bytes::Bytes;
use tracing::debug;

/// A forward-only cursor that decodes one block at a time.
///
/// The reader owns its buffer and lends a [ByteView] of it to each block for the duration of a
/// single call.
#[derive(Clone, Debug)]
pub struct Reader {
    data: Bytes,
    offset: usize,
}

impl Reader {
    /// Creates a reader positioned at the start of `data`.
    pub fn new(data: impl Into<Bytes>) -> Self {
        Self {
            data: data.into(),
            offset: 0,
        }
    }

    /// Returns the position of the cursor.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Returns the number of bytes left after the cursor.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.offset
    }

    /// Decodes the value at the cursor and advances past it.
    ///
    /// Fails with [Error::UnexpectedEof] if the value (or the data needed to size it) extends
    /// beyond the end of the buffer. On failure the cursor does not move.
    pub fn read<B: ReadBlock + ?Sized>(&mut self, block: &B) -> Result<B::Value, Error> {
        let view = ByteView::new(&self.data);
        let size = block.size(&view, self.offset).map_err(|err| match err {
            Error::OutOfRange { start, len, .. } => {
                self.eof(start.saturating_add(len).saturating_sub(self.offset))
            }
            err => err,
        })?;
        let end = match self.offset.checked_add(size) {
            Some(end) if end <= self.data.len() => end,
            _ => return Err(self.eof(size)),
        };
        let value = block.read(&view, self.offset)?;
        self.offset = end;
        Ok(value)
    }

    /// Succeeds only if every byte of the buffer has been consumed.
    pub fn read_eof(&self) -> Result<(), Error> {
        let remaining = self.remaining();
        if remaining > 0 {
            debug!(offset = self.offset, remaining, "trailing bytes");
            return Err(Error::ExpectedEof(remaining));
        }
        Ok(())
    }

    fn eof(&self, needed: usize) -> Error {
        debug!(offset = self.offset, needed, len = self.data.len(), "unexpected end of file");
        Error::UnexpectedEof {
            offset: self.offset,
            needed,
            len: self.data.len(),
        }
    }
}
