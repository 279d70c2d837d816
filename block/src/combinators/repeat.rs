//! Homogeneous runs of a single block.

use crate::{block::checked_end, ByteView, ByteViewMut, Error, ReadBlock, Uint16, WriteBlock};

/// Size in bytes of the [ArrayOf] count prefix.
const COUNT_SIZE: usize = 2;

/// Exactly `count` copies of `block`, laid out back to back.
///
/// The count is not stored in the stream: it must be known from context (a header field, a
/// constant of the format, ...). Writing a value list of any other length fails with
/// [Error::ArityMismatch].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Repeat<B> {
    count: usize,
    block: B,
}

impl<B> Repeat<B> {
    /// Creates a block repeating `block` `count` times.
    pub fn new(count: usize, block: B) -> Self {
        Self { count, block }
    }

    /// Returns the number of repetitions.
    pub fn count(&self) -> usize {
        self.count
    }
}

impl<B: ReadBlock> ReadBlock for Repeat<B> {
    type Value = Vec<B::Value>;

    fn fixed_size(&self) -> Option<usize> {
        self.block.fixed_size()?.checked_mul(self.count)
    }

    fn size(&self, view: &ByteView<'_>, offset: usize) -> Result<usize, Error> {
        if let Some(size) = self.block.fixed_size() {
            return checked_total(size, self.count);
        }
        let mut cursor = offset;
        for _ in 0..self.count {
            cursor = checked_end(cursor, self.block.size(view, cursor)?)?;
        }
        Ok(cursor - offset)
    }

    fn read(&self, view: &ByteView<'_>, offset: usize) -> Result<Self::Value, Error> {
        // Don't trust the count for preallocation: it may come from untrusted input.
        let mut values = Vec::with_capacity(self.count.min(view.len()));
        let mut cursor = offset;
        for _ in 0..self.count {
            let size = self.block.size(view, cursor)?;
            values.push(self.block.read(view, cursor)?);
            cursor = checked_end(cursor, size)?;
        }
        Ok(values)
    }
}

impl<B: WriteBlock> WriteBlock for Repeat<B> {
    type Value = Vec<B::Value>;

    fn fixed_size(&self) -> Option<usize> {
        self.block.fixed_size()?.checked_mul(self.count)
    }

    fn size(&self, value: &Self::Value) -> Result<usize, Error> {
        if value.len() != self.count {
            return Err(Error::ArityMismatch {
                expected: self.count,
                found: value.len(),
            });
        }
        write_size(&self.block, value)
    }

    fn write(
        &self,
        view: &mut ByteViewMut<'_>,
        offset: usize,
        value: &Self::Value,
    ) -> Result<(), Error> {
        if value.len() != self.count {
            return Err(Error::ArityMismatch {
                expected: self.count,
                found: value.len(),
            });
        }
        write_all(&self.block, view, offset, value)
    }
}

/// Returns the size of `count` items of `size` bytes each.
fn checked_total(size: usize, count: usize) -> Result<usize, Error> {
    size.checked_mul(count).ok_or(Error::OutOfRange {
        start: 0,
        len: size,
        capacity: usize::MAX,
    })
}

/// Returns the total encoded size of `values`.
fn write_size<B: WriteBlock>(block: &B, values: &[B::Value]) -> Result<usize, Error> {
    if let Some(size) = block.fixed_size() {
        return checked_total(size, values.len());
    }
    let mut total = 0;
    for value in values {
        total = checked_end(total, block.size(value)?)?;
    }
    Ok(total)
}

/// Writes `values` back to back starting at `offset`.
fn write_all<B: WriteBlock>(
    block: &B,
    view: &mut ByteViewMut<'_>,
    offset: usize,
    values: &[B::Value],
) -> Result<(), Error> {
    let mut cursor = offset;
    for value in values {
        block.write(view, cursor, value)?;
        cursor = checked_end(cursor, block.size(value)?)?;
    }
    Ok(())
}

/// A self-describing array: a big-endian `u16` count followed by that many items.
///
/// Arrays hold at most 65535 items. [ArrayOf::with_max] lowers that limit, which bounds the
/// work done when decoding untrusted input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ArrayOf<B> {
    item: B,
    max: usize,
}

impl<B> ArrayOf<B> {
    /// Creates an array of `item` blocks.
    pub fn new(item: B) -> Self {
        Self {
            item,
            max: u16::MAX as usize,
        }
    }

    /// Rejects arrays holding more than `max` items (capped at 65535).
    pub fn with_max(mut self, max: usize) -> Self {
        self.max = max.min(u16::MAX as usize);
        self
    }

    /// Returns the maximum number of items.
    pub fn max(&self) -> usize {
        self.max
    }

    fn check_count(&self, count: usize) -> Result<(), Error> {
        if count > self.max {
            return Err(Error::LengthExceeded(count, self.max));
        }
        Ok(())
    }
}

impl<B: ReadBlock> ArrayOf<B> {
    /// Reads the count prefix and returns the block describing the items that follow.
    fn items(&self, view: &ByteView<'_>, offset: usize) -> Result<Repeat<&B>, Error> {
        let count = Uint16.read(view, offset)? as usize;
        self.check_count(count)?;
        Ok(Repeat::new(count, &self.item))
    }
}

impl<B: ReadBlock> ReadBlock for ArrayOf<B> {
    type Value = Vec<B::Value>;

    fn size(&self, view: &ByteView<'_>, offset: usize) -> Result<usize, Error> {
        let items = self.items(view, offset)?;
        let start = checked_end(offset, COUNT_SIZE)?;
        checked_end(COUNT_SIZE, ReadBlock::size(&items, view, start)?)
    }

    fn read(&self, view: &ByteView<'_>, offset: usize) -> Result<Self::Value, Error> {
        self.items(view, offset)?
            .read(view, checked_end(offset, COUNT_SIZE)?)
    }
}

impl<B: WriteBlock> WriteBlock for ArrayOf<B> {
    type Value = Vec<B::Value>;

    fn size(&self, value: &Self::Value) -> Result<usize, Error> {
        self.check_count(value.len())?;
        checked_end(COUNT_SIZE, write_size(&self.item, value)?)
    }

    fn write(
        &self,
        view: &mut ByteViewMut<'_>,
        offset: usize,
        value: &Self::Value,
    ) -> Result<(), Error> {
        self.check_count(value.len())?;
        Uint16.write(view, offset, &(value.len() as u16))?;
        write_all(&self.item, view, checked_end(offset, COUNT_SIZE)?, value)
    }
}
