//! Core block traits.
//!
//! A block is an immutable, stateless descriptor of one field's byte layout. Read blocks decode
//! a value from a [ByteView] at an offset, write blocks encode a value into a [ByteViewMut] at
//! an offset. Both report how many bytes the field occupies:
//!
//! - *Fixed* blocks occupy a constant number of bytes and return it from `fixed_size()`.
//! - *Variable* blocks compute their size, either by peeking at the buffer (read side) or by
//!   inspecting the value (write side).
//!
//! Library primitives implement both traits, so the same value serves as a read/write pair.
//! [Pair] joins two distinct blocks when the halves must differ.

use crate::{ByteView, ByteViewMut, Error};

/// A block that decodes a value from a view.
pub trait ReadBlock {
    /// The decoded value.
    type Value;

    /// The constant encoded size, if the block is fixed.
    ///
    /// Fixed blocks MUST return the same value from [ReadBlock::size] for every input.
    fn fixed_size(&self) -> Option<usize> {
        None
    }

    /// Returns the number of bytes the value at `offset` occupies.
    ///
    /// This method MUST return exactly the number of bytes consumed by [ReadBlock::read] at the
    /// same position and MUST NOT have side effects.
    fn size(&self, view: &ByteView<'_>, offset: usize) -> Result<usize, Error>;

    /// Decodes the value at `offset`.
    fn read(&self, view: &ByteView<'_>, offset: usize) -> Result<Self::Value, Error>;
}

/// A block that encodes a value into a view.
pub trait WriteBlock {
    /// The value to encode.
    type Value;

    /// The constant encoded size, if the block is fixed.
    fn fixed_size(&self) -> Option<usize> {
        None
    }

    /// Returns the number of bytes `value` occupies once encoded.
    ///
    /// This method MUST return exactly the number of bytes written by [WriteBlock::write].
    fn size(&self, value: &Self::Value) -> Result<usize, Error>;

    /// Encodes `value` at `offset`.
    ///
    /// The caller is responsible for ensuring the view has room for [WriteBlock::size] bytes.
    fn write(
        &self,
        view: &mut ByteViewMut<'_>,
        offset: usize,
        value: &Self::Value,
    ) -> Result<(), Error>;
}

/// Returns `start + len`, failing with [Error::OutOfRange] if the sum does not fit in a `usize`.
///
/// Combinators accumulate member sizes with this so that oversized layouts surface as errors.
#[inline]
pub(crate) fn checked_end(start: usize, len: usize) -> Result<usize, Error> {
    start.checked_add(len).ok_or(Error::OutOfRange {
        start,
        len,
        capacity: usize::MAX,
    })
}

/// Implements both block traits for a fixed-size block.
///
/// The read body is evaluated with the view and offset bound to the given names, the write
/// body with the view, offset and value bound.
macro_rules! impl_fixed_block {
    (
        $block:ty, $value:ty, $size:expr,
        read($rview:ident, $roffset:ident) $read:block,
        write($wview:ident, $woffset:ident, $wvalue:ident) $write:block
    ) => {
        impl $crate::ReadBlock for $block {
            type Value = $value;

            #[inline]
            fn fixed_size(&self) -> Option<usize> {
                Some($size)
            }

            #[inline]
            fn size(&self, _: &$crate::ByteView<'_>, _: usize) -> Result<usize, $crate::Error> {
                Ok($size)
            }

            #[inline]
            fn read(
                &self,
                $rview: &$crate::ByteView<'_>,
                $roffset: usize,
            ) -> Result<Self::Value, $crate::Error> {
                $read
            }
        }

        impl $crate::WriteBlock for $block {
            type Value = $value;

            #[inline]
            fn fixed_size(&self) -> Option<usize> {
                Some($size)
            }

            #[inline]
            fn size(&self, _: &Self::Value) -> Result<usize, $crate::Error> {
                Ok($size)
            }

            #[inline]
            fn write(
                &self,
                $wview: &mut $crate::ByteViewMut<'_>,
                $woffset: usize,
                $wvalue: &Self::Value,
            ) -> Result<(), $crate::Error> {
                $write
            }
        }
    };
}
pub(crate) use impl_fixed_block;

// Forwarding implementations so that blocks can be passed by reference or boxed (e.g. as the
// output of a runtime selector).
macro_rules! impl_forward {
    ($($wrapper:ty),*) => {
        $(
            impl<B: ReadBlock + ?Sized> ReadBlock for $wrapper {
                type Value = B::Value;

                #[inline]
                fn fixed_size(&self) -> Option<usize> {
                    (**self).fixed_size()
                }

                #[inline]
                fn size(&self, view: &ByteView<'_>, offset: usize) -> Result<usize, Error> {
                    (**self).size(view, offset)
                }

                #[inline]
                fn read(&self, view: &ByteView<'_>, offset: usize) -> Result<Self::Value, Error> {
                    (**self).read(view, offset)
                }
            }

            impl<B: WriteBlock + ?Sized> WriteBlock for $wrapper {
                type Value = B::Value;

                #[inline]
                fn fixed_size(&self) -> Option<usize> {
                    (**self).fixed_size()
                }

                #[inline]
                fn size(&self, value: &Self::Value) -> Result<usize, Error> {
                    (**self).size(value)
                }

                #[inline]
                fn write(
                    &self,
                    view: &mut ByteViewMut<'_>,
                    offset: usize,
                    value: &Self::Value,
                ) -> Result<(), Error> {
                    (**self).write(view, offset, value)
                }
            }
        )*
    };
}
impl_forward!(&B, Box<B>, std::sync::Arc<B>);

/// Joins a read block and a write block describing the same field.
///
/// Reads are delegated to `R` and writes to `W`.
#[derive(Clone, Copy, Debug, Default)]
pub struct Pair<R, W> {
    /// The read half.
    pub reader: R,

    /// The write half.
    pub writer: W,
}

impl<R, W> Pair<R, W> {
    /// Creates a new pair.
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }
}

impl<R: ReadBlock, W> ReadBlock for Pair<R, W> {
    type Value = R::Value;

    fn fixed_size(&self) -> Option<usize> {
        self.reader.fixed_size()
    }

    fn size(&self, view: &ByteView<'_>, offset: usize) -> Result<usize, Error> {
        self.reader.size(view, offset)
    }

    fn read(&self, view: &ByteView<'_>, offset: usize) -> Result<Self::Value, Error> {
        self.reader.read(view, offset)
    }
}

impl<R, W: WriteBlock> WriteBlock for Pair<R, W> {
    type Value = W::Value;

    fn fixed_size(&self) -> Option<usize> {
        self.writer.fixed_size()
    }

    fn size(&self, value: &Self::Value) -> Result<usize, Error> {
        self.writer.size(value)
    }

    fn write(
        &self,
        view: &mut ByteViewMut<'_>,
        offset: usize,
        value: &Self::Value,
    ) -> Result<(), Error> {
        self.writer.write(view, offset, value)
    }
}
