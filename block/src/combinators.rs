//! Blocks built from other blocks.
//!
//! The constructor functions below are the usual way to assemble a layout:
//!
//! ```
//! use commonware_block::{
//!     combinators::{array_of, sequence},
//!     EncodedString, Reader, Uint8, Writer,
//! };
//!
//! let header = sequence((Uint8, EncodedString, array_of(Uint8)));
//! let value = (1, "hi".to_string(), vec![7, 8]);
//!
//! let mut writer = Writer::new();
//! writer.write(&header, &value).unwrap();
//! let encoded = writer.finalize();
//! assert_eq!(encoded.as_ref(), &[1, 2, b'h', b'i', 0, 2, 7, 8]);
//!
//! let mut reader = Reader::new(encoded);
//! assert_eq!(reader.read(&header).unwrap(), value);
//! reader.read_eof().unwrap();
//! ```

mod dynamic;
mod repeat;
mod sequence;
mod transform;

pub use dynamic::{Choice, DynamicRead, DynamicWrite};
pub use repeat::{ArrayOf, Repeat};
pub use sequence::{Sequence, SequenceOf};
pub use transform::Transform;

use crate::{ByteView, Error, Pair, ReadBlock, WriteBlock};

/// Concatenates a tuple of 1 to 12 blocks.
pub fn sequence<T>(blocks: T) -> Sequence<T> {
    Sequence(blocks)
}

/// Concatenates a list of blocks sharing a value type.
pub fn sequence_of<B>(blocks: Vec<B>) -> SequenceOf<B> {
    SequenceOf(blocks)
}

/// Repeats `block` exactly `count` times.
pub fn repeat<B>(count: usize, block: B) -> Repeat<B> {
    Repeat::new(count, block)
}

/// A `u16` count followed by that many `item` blocks.
pub fn array_of<B>(item: B) -> ArrayOf<B> {
    ArrayOf::new(item)
}

/// Maps the value of a block that is both read and written.
pub fn transform<B, F, G, O>(block: B, to_outer: F, to_inner: G) -> Transform<B, F, G, O>
where
    B: ReadBlock + WriteBlock,
    F: Fn(<B as ReadBlock>::Value) -> O,
    G: Fn(&O) -> <B as WriteBlock>::Value,
{
    Transform::new(block, to_outer, to_inner)
}

/// Maps the value of a block that is only read.
pub fn transform_read<B, F, O>(block: B, to_outer: F) -> Transform<B, F, (), O>
where
    B: ReadBlock,
    F: Fn(B::Value) -> O,
{
    Transform::new(block, to_outer, ())
}

/// Maps the value of a block that is only written.
pub fn transform_write<B, G, O>(block: B, to_inner: G) -> Transform<B, (), G, O>
where
    B: WriteBlock,
    G: Fn(&O) -> B::Value,
{
    Transform::new(block, (), to_inner)
}

/// A field whose layout is chosen at run time, on both the read and the write side.
pub fn dynamic<S, R, T, W>(read: S, write: T) -> Pair<DynamicRead<S, R>, DynamicWrite<T, W>>
where
    S: Fn(&ByteView<'_>, usize) -> Result<R, Error>,
    R: ReadBlock,
    T: Fn(&W::Value) -> W,
    W: WriteBlock,
{
    Pair::new(DynamicRead::new(read), DynamicWrite::new(write))
}

/// A read-only field whose layout is chosen by peeking at the buffer.
pub fn dynamic_read<S, R>(select: S) -> DynamicRead<S, R>
where
    S: Fn(&ByteView<'_>, usize) -> Result<R, Error>,
    R: ReadBlock,
{
    DynamicRead::new(select)
}

/// A write-only field whose layout is chosen by inspecting the value.
pub fn dynamic_write<T, W>(select: T) -> DynamicWrite<T, W>
where
    T: Fn(&W::Value) -> W,
    W: WriteBlock,
{
    DynamicWrite::new(select)
}
