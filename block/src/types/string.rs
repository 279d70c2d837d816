//! Blocks for UTF-8 strings.

use crate::{types::bytes::fits, varint, ByteView, ByteViewMut, Error, ReadBlock, WriteBlock};

/// A UTF-8 string stored in a slot of exactly `N` bytes.
///
/// Shorter strings are padded with NUL bytes, which are stripped again when reading. Strings
/// whose byte length exceeds the slot fail with [Error::OutOfRange].
///
/// Trailing NULs are indistinguishable from padding: a value ending in `'\0'` (e.g. `"a\0"`)
/// reads back without them (`"a"`). Values without trailing NULs round-trip exactly.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixedString(pub usize);

impl ReadBlock for FixedString {
    type Value = String;

    fn fixed_size(&self) -> Option<usize> {
        Some(self.0)
    }

    fn size(&self, _: &ByteView<'_>, _: usize) -> Result<usize, Error> {
        Ok(self.0)
    }

    fn read(&self, view: &ByteView<'_>, offset: usize) -> Result<String, Error> {
        let raw = view.slice(offset, Some(self.0))?;
        let end = raw.iter().rposition(|b| *b != 0).map_or(0, |i| i + 1);
        Ok(std::str::from_utf8(&raw[..end])?.to_owned())
    }
}

impl WriteBlock for FixedString {
    type Value = String;

    fn fixed_size(&self) -> Option<usize> {
        Some(self.0)
    }

    fn size(&self, _: &String) -> Result<usize, Error> {
        Ok(self.0)
    }

    fn write(&self, view: &mut ByteViewMut<'_>, offset: usize, value: &String) -> Result<(), Error> {
        fits(offset, value.len(), self.0)?;
        view.write(value, offset)?;
        view.zero(offset + value.len(), self.0 - value.len())
    }
}

/// A UTF-8 string prefixed with its byte length as an [varint::EncodedUint].
///
/// This is the canonical variable-length string encoding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EncodedString;

impl EncodedString {
    /// Returns the byte length of `value`, checked against the range of the prefix.
    fn prefix(value: &str) -> Result<u32, Error> {
        u32::try_from(value.len())
            .map_err(|_| Error::LengthExceeded(value.len(), u32::MAX as usize))
    }
}

impl ReadBlock for EncodedString {
    type Value = String;

    fn size(&self, view: &ByteView<'_>, offset: usize) -> Result<usize, Error> {
        let len = varint::read(view, offset)? as usize;
        let prefix = ReadBlock::size(&varint::EncodedUint, view, offset)?;
        Ok(prefix + len)
    }

    fn read(&self, view: &ByteView<'_>, offset: usize) -> Result<String, Error> {
        let len = varint::read(view, offset)? as usize;
        let prefix = ReadBlock::size(&varint::EncodedUint, view, offset)?;
        let raw = view.slice(offset + prefix, Some(len))?;
        Ok(std::str::from_utf8(raw)?.to_owned())
    }
}

impl WriteBlock for EncodedString {
    type Value = String;

    fn size(&self, value: &String) -> Result<usize, Error> {
        let len = Self::prefix(value)?;
        Ok(varint::size(len) + value.len())
    }

    fn write(&self, view: &mut ByteViewMut<'_>, offset: usize, value: &String) -> Result<(), Error> {
        let len = Self::prefix(value)?;
        varint::write(view, offset, len)?;
        view.write(value, offset + varint::size(len))
    }
}

/// The raw UTF-8 bytes of a string, without any length prefix (write only).
///
/// The encoded size is the byte length of the value. Read it back with [FixedString] when the
/// length is known from context.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RawString;

impl WriteBlock for RawString {
    type Value = String;

    fn size(&self, value: &String) -> Result<usize, Error> {
        Ok(value.len())
    }

    fn write(&self, view: &mut ByteViewMut<'_>, offset: usize, value: &String) -> Result<(), Error> {
        view.write(value, offset)
    }
}
