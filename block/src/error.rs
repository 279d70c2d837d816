//! Error types for block operations

use thiserror::Error;

/// Error type for block operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("out of range: [{start}, {start}+{len}) exceeds capacity {capacity}")]
    OutOfRange {
        start: usize,
        len: usize,
        capacity: usize,
    },
    #[error("unexpected end of file: {needed} bytes needed at offset {offset} of {len}")]
    UnexpectedEof {
        offset: usize,
        needed: usize,
        len: usize,
    },
    #[error("expected end of file but found {0} more bytes")]
    ExpectedEof(usize),
    #[error("arity mismatch: expected {expected} values, found {found}")]
    ArityMismatch { expected: usize, found: usize },
    #[error("invalid utf-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),
    #[error("length exceeded: {0} > {1}")]
    LengthExceeded(usize, usize), // found, max
}

impl Error {
    /// Returns true if the error was caused by running off the end of a buffer.
    ///
    /// Blocks applied directly to a view report short or oversized accesses as
    /// [Error::OutOfRange] (the [crate::Reader] turns these into [Error::UnexpectedEof]). Callers
    /// driving blocks by hand can use this to tell a truncated buffer, which may succeed once
    /// more data arrives, apart from malformed content that never will.
    ///
    /// ```
    /// use commonware_block::{ByteView, EncodedString, ReadBlock};
    ///
    /// // Prefix announces 5 bytes, only 2 have arrived
    /// let partial = [5u8, b'h', b'e'];
    /// let err = EncodedString.read(&ByteView::new(&partial), 0).unwrap_err();
    /// assert!(err.is_out_of_range());
    ///
    /// // Complete, but not UTF-8
    /// let invalid = [2u8, 0xC3, 0x28];
    /// let err = EncodedString.read(&ByteView::new(&invalid), 0).unwrap_err();
    /// assert!(!err.is_out_of_range());
    /// ```
    pub fn is_out_of_range(&self) -> bool {
        matches!(self, Self::OutOfRange { .. })
    }
}
