//! Fixed-size numeric blocks.
//!
//! # Byte order
//!
//! Integers default to big-endian (network order): [Uint16] and [Uint32] are re-exports of
//! [Uint16Be] and [Uint32Be]. Little-endian variants are provided for formats that need them.
//!
//! [Float64] is always little-endian. Readers and writers built from this crate therefore agree
//! on the layout regardless of the host.

use crate::block::impl_fixed_block;

/// An unsigned 8-bit integer (1 byte).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Uint8;

impl_fixed_block!(
    Uint8, u8, 1,
    read(view, offset) { view.read_byte(offset) },
    write(view, offset, value) { view.write_byte(offset, *value) }
);

// Fixed-width unsigned integers with an explicit byte order.
macro_rules! impl_uint {
    ($block:ident, $type:ty, $from:ident, $to:ident, $doc:literal) => {
        #[doc = $doc]
        #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
        pub struct $block;

        impl_fixed_block!(
            $block, $type, std::mem::size_of::<$type>(),
            read(view, offset) { Ok(<$type>::$from(view.read_array(offset)?)) },
            write(view, offset, value) { view.write(value.$to(), offset) }
        );
    };
}

impl_uint!(Uint16Be, u16, from_be_bytes, to_be_bytes, "An unsigned 16-bit big-endian integer.");
impl_uint!(Uint16Le, u16, from_le_bytes, to_le_bytes, "An unsigned 16-bit little-endian integer.");
impl_uint!(Uint32Be, u32, from_be_bytes, to_be_bytes, "An unsigned 32-bit big-endian integer.");
impl_uint!(Uint32Le, u32, from_le_bytes, to_le_bytes, "An unsigned 32-bit little-endian integer.");

// The default byte order is big-endian.
pub use Uint16Be as Uint16;
pub use Uint32Be as Uint32;

/// An IEEE-754 double (8 bytes, little-endian).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Float64;

impl_fixed_block!(
    Float64, f64, 8,
    read(view, offset) { Ok(f64::from_le_bytes(view.read_array(offset)?)) },
    write(view, offset, value) { view.write(value.to_le_bytes(), offset) }
);

/// A boolean stored as a single byte.
///
/// Writes `0` or `1`. Any non-zero byte reads as `true`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EncodedBoolean;

impl_fixed_block!(
    EncodedBoolean, bool, 1,
    read(view, offset) { Ok(view.read_byte(offset)? != 0) },
    write(view, offset, value) { view.write_byte(offset, u8::from(*value)) }
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ByteView, ByteViewMut, Error, ReadBlock, WriteBlock};
    use paste::paste;

    fn encode<B: WriteBlock>(block: &B, value: &B::Value) -> Vec<u8> {
        let mut buf = vec![0u8; block.size(value).unwrap()];
        block
            .write(&mut ByteViewMut::new(&mut buf), 0, value)
            .unwrap();
        buf
    }

    fn decode<B: ReadBlock>(block: &B, buf: &[u8]) -> B::Value {
        let view = ByteView::new(buf);
        assert_eq!(block.size(&view, 0).unwrap(), buf.len());
        block.read(&view, 0).unwrap()
    }

    macro_rules! impl_uint_test {
        ($block:ident, $type:ty) => {
            paste! {
                #[test]
                fn [<test_ $block:snake>]() {
                    let expected_len = std::mem::size_of::<$type>();
                    assert_eq!(ReadBlock::fixed_size(&$block), Some(expected_len));
                    assert_eq!(WriteBlock::fixed_size(&$block), Some(expected_len));
                    for value in [0 as $type, 1, 42, <$type>::MAX / 3, <$type>::MAX] {
                        let encoded = encode(&$block, &value);
                        assert_eq!(encoded.len(), expected_len);
                        assert_eq!(decode(&$block, &encoded), value);
                    }
                }
            }
        };
    }

    impl_uint_test!(Uint8, u8);
    impl_uint_test!(Uint16Be, u16);
    impl_uint_test!(Uint16Le, u16);
    impl_uint_test!(Uint32Be, u32);
    impl_uint_test!(Uint32Le, u32);

    #[test]
    fn test_byte_order() {
        assert_eq!(encode(&Uint16, &0x0102), [0x01, 0x02]);
        assert_eq!(encode(&Uint16Le, &0x0102), [0x02, 0x01]);
        assert_eq!(encode(&Uint32, &0x01020304), [0x01, 0x02, 0x03, 0x04]);
        assert_eq!(encode(&Uint32Le, &0x01020304), [0x04, 0x03, 0x02, 0x01]);
        assert_eq!(encode(&Uint16, &3110), [0x0C, 0x26]);
    }

    #[test]
    fn test_float64() {
        assert_eq!(
            encode(&Float64, &1.0),
            [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xF0, 0x3F]
        );
        for value in [0.0, -0.0, 1.5, -273.15, f64::MAX, f64::MIN_POSITIVE, f64::INFINITY] {
            let decoded = decode(&Float64, &encode(&Float64, &value));
            assert_eq!(decoded.to_bits(), value.to_bits());
        }
        assert!(decode(&Float64, &encode(&Float64, &f64::NAN)).is_nan());
    }

    #[test]
    fn test_encoded_boolean() {
        assert_eq!(encode(&EncodedBoolean, &true), [1]);
        assert_eq!(encode(&EncodedBoolean, &false), [0]);
        assert!(decode(&EncodedBoolean, &[1]));
        assert!(!decode(&EncodedBoolean, &[0]));
        assert!(decode(&EncodedBoolean, &[0xFF]));
    }

    #[test]
    fn test_offsets() {
        let mut buf = [0u8; 7];
        let mut view = ByteViewMut::new(&mut buf);
        Uint8.write(&mut view, 0, &0xAA).unwrap();
        Uint16.write(&mut view, 1, &0xBBCC).unwrap();
        Uint32Le.write(&mut view, 3, &0x11223344).unwrap();
        assert_eq!(buf, [0xAA, 0xBB, 0xCC, 0x44, 0x33, 0x22, 0x11]);

        let view = ByteView::new(&buf);
        assert_eq!(Uint8.read(&view, 0).unwrap(), 0xAA);
        assert_eq!(Uint16.read(&view, 1).unwrap(), 0xBBCC);
        assert_eq!(Uint32Le.read(&view, 3).unwrap(), 0x11223344);
    }

    #[test]
    fn test_out_of_range() {
        let buf = [0u8; 3];
        let view = ByteView::new(&buf);
        assert!(matches!(
            Uint32.read(&view, 0),
            Err(Error::OutOfRange { start: 0, len: 4, capacity: 3 })
        ));
        assert!(Uint16.read(&view, 2).unwrap_err().is_out_of_range());
        assert!(Uint8.read(&view, 3).unwrap_err().is_out_of_range());

        let mut buf = [0u8; 1];
        let mut view = ByteViewMut::new(&mut buf);
        assert!(Uint16.write(&mut view, 0, &1).unwrap_err().is_out_of_range());
        assert!(Float64.write(&mut view, 0, &1.0).unwrap_err().is_out_of_range());
    }
}
