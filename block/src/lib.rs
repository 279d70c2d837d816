//! Describe binary layouts with composable blocks.
//!
//! # Overview
//!
//! A block is a stateless descriptor of how one field is laid out in a byte buffer: how many
//! bytes it occupies, how to decode it and how to encode it. Layouts are assembled from
//! primitive blocks with combinators, then applied one block at a time by a [Reader] (decode)
//! or a [Writer] (encode). The same layout describes both directions, so anything written can
//! be read back with the blocks that wrote it.
//!
//! # Blocks
//!
//! - Fixed numerics: [Uint8], [Uint16] / [Uint32] (big-endian, with `Le` variants), [Float64]
//!   (little-endian) and [EncodedBoolean].
//! - Variable-width integers: [EncodedUint] (1, 3 or 5 bytes).
//! - Strings and buffers: [EncodedString] (length-prefixed UTF-8), [FixedString],
//!   [FixedBuffer], plus the write-only raw runs [RawString] and [Buffer].
//! - Combinators: [combinators::sequence()], [combinators::repeat()], [combinators::array_of()],
//!   [combinators::transform()] and [combinators::dynamic()].
//!
//! Every access to a buffer goes through a bounds-checked [ByteView] (or [ByteViewMut]):
//! malformed input produces an [Error], never a panic.
//!
//! # Example
//!
//! ```
//! use commonware_block::{EncodedString, Reader, Uint16, Uint8, Writer};
//!
//! let mut writer = Writer::new();
//! writer.write(&Uint8, &12).unwrap();
//! writer.write(&Uint16, &3110).unwrap();
//! writer.write(&EncodedString, &"hello world".to_string()).unwrap();
//! let encoded = writer.finalize();
//! assert_eq!(
//!     encoded.as_ref(),
//!     b"\x0C\x0C\x26\x0Bhello world"
//! );
//!
//! let mut reader = Reader::new(encoded);
//! assert_eq!(reader.read(&Uint8).unwrap(), 12);
//! assert_eq!(reader.read(&Uint16).unwrap(), 3110);
//! assert_eq!(reader.read(&EncodedString).unwrap(), "hello world");
//! reader.read_eof().unwrap();
//! ```

pub mod block;
pub mod combinators;
pub mod config;
pub mod error;
pub mod reader;
pub mod types;
pub mod varint;
pub mod view;
pub mod writer;

// Re-export main types and traits
pub use block::{Pair, ReadBlock, WriteBlock};
pub use combinators::{ArrayOf, Choice, Repeat, Sequence, SequenceOf, Transform};
pub use error::Error;
pub use reader::Reader;
pub use types::{
    bytes::{Buffer, FixedBuffer},
    primitives::{
        EncodedBoolean, Float64, Uint16, Uint16Be, Uint16Le, Uint32, Uint32Be, Uint32Le, Uint8,
    },
    string::{EncodedString, FixedString, RawString},
};
pub use varint::EncodedUint;
pub use view::{ByteView, ByteViewMut};
pub use writer::Writer;
