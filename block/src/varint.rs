//! Compact variable-width unsigned integers.
//!
//! The first byte (the tag) determines the width of the encoding:
//! - `0x00..=0xFD`: the tag is the value itself (1 byte)
//! - `0xFE`: the value follows as a big-endian `u16` (3 bytes)
//! - `0xFF`: the value follows as a big-endian `u32` (5 bytes)
//!
//! Writers always choose the shortest form. Readers accept any form, so `FE 00 05` decodes to
//! `5` even though `05` is canonical.
//!
//! Common lengths and counts (below 254) therefore cost a single byte, while the full `u32`
//! range stays representable.

use crate::{ByteView, ByteViewMut, Error, ReadBlock, Uint16, Uint32, WriteBlock};

/// Largest value encoded in the tag byte itself.
const MAX_INLINE: u8 = 0xFD;

/// Tag announcing a 2-byte value.
const TAG_U16: u8 = 0xFE;

/// Tag announcing a 4-byte value.
const TAG_U32: u8 = 0xFF;

/// Returns the number of bytes (1, 3 or 5) the encoding of `value` occupies.
#[inline]
pub fn size(value: u32) -> usize {
    if value <= MAX_INLINE as u32 {
        1
    } else if value <= u16::MAX as u32 {
        3
    } else {
        5
    }
}

/// Returns the number of bytes (1, 3 or 5) the encoding starting with `tag` occupies.
#[inline]
pub fn size_of_tag(tag: u8) -> usize {
    match tag {
        TAG_U16 => 3,
        TAG_U32 => 5,
        _ => 1,
    }
}

/// Encodes `value` at `offset`.
pub fn write(view: &mut ByteViewMut<'_>, offset: usize, value: u32) -> Result<(), Error> {
    if value <= MAX_INLINE as u32 {
        return view.write_byte(offset, value as u8);
    }
    if let Ok(value) = u16::try_from(value) {
        view.write_byte(offset, TAG_U16)?;
        return Uint16.write(view, offset + 1, &value);
    }
    view.write_byte(offset, TAG_U32)?;
    Uint32.write(view, offset + 1, &value)
}

/// Decodes the value at `offset`.
pub fn read(view: &ByteView<'_>, offset: usize) -> Result<u32, Error> {
    match view.read_byte(offset)? {
        TAG_U16 => Uint16.read(view, offset + 1).map(u32::from),
        TAG_U32 => Uint32.read(view, offset + 1),
        tag => Ok(tag as u32),
    }
}

/// A variable-width unsigned integer (see the module documentation).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EncodedUint;

impl ReadBlock for EncodedUint {
    type Value = u32;

    /// Peeks at the tag only.
    #[inline]
    fn size(&self, view: &ByteView<'_>, offset: usize) -> Result<usize, Error> {
        view.read_byte(offset).map(size_of_tag)
    }

    #[inline]
    fn read(&self, view: &ByteView<'_>, offset: usize) -> Result<u32, Error> {
        read(view, offset)
    }
}

impl WriteBlock for EncodedUint {
    type Value = u32;

    #[inline]
    fn size(&self, value: &u32) -> Result<usize, Error> {
        Ok(size(*value))
    }

    #[inline]
    fn write(&self, view: &mut ByteViewMut<'_>, offset: usize, value: &u32) -> Result<(), Error> {
        write(view, offset, *value)
    }
}
