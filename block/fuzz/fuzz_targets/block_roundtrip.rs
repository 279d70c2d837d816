#![no_main]

use arbitrary::Arbitrary;
use bytes::Bytes;
use commonware_block::{
    combinators::{array_of, repeat, sequence},
    EncodedBoolean, EncodedString, EncodedUint, Error, FixedBuffer, FixedString, Float64,
    RawString, ReadBlock, Reader, Uint16, Uint16Le, Uint32, Uint32Le, Uint8, WriteBlock, Writer,
};
use libfuzzer_sys::fuzz_target;
use std::fmt::Debug;

/// Encodes `value`, checks the reported sizes, and decodes it back.
fn encode_decode<B>(block: &B, value: &<B as WriteBlock>::Value) -> <B as ReadBlock>::Value
where
    B: ReadBlock + WriteBlock,
{
    let size = WriteBlock::size(block, value).expect("failed to size value");
    let mut writer = Writer::new();
    writer.write(block, value).expect("failed to write value");
    assert_eq!(writer.len(), size);
    let encoded = writer.finalize();
    assert_eq!(encoded.len(), size);

    let mut reader = Reader::new(encoded);
    let decoded = reader.read(block).expect("failed to read value");
    assert_eq!(reader.offset(), size);
    reader.read_eof().expect("trailing bytes");
    decoded
}

fn roundtrip<B, V>(block: B, value: V)
where
    B: ReadBlock<Value = V> + WriteBlock<Value = V>,
    V: PartialEq + Debug,
{
    assert_eq!(encode_decode(&block, &value), value);
}

#[derive(Arbitrary, Debug)]
enum FuzzInput {
    U8(u8),
    U16(u16),
    U16Le(u16),
    U32(u32),
    U32Le(u32),
    F64(f64),
    Bool(bool),
    Varint(u32),
    String(String),
    RawString(String),
    FixedString { value: String, slot: u8 },
    FixedBuffer { value: Vec<u8>, slot: u8 },
    Array(Vec<u8>),
    Repeat(Vec<u32>),
    Record(u8, u16, String, Vec<u32>),
}

fn fuzz(input: FuzzInput) {
    match input {
        FuzzInput::U8(v) => roundtrip(Uint8, v),
        FuzzInput::U16(v) => roundtrip(Uint16, v),
        FuzzInput::U16Le(v) => roundtrip(Uint16Le, v),
        FuzzInput::U32(v) => roundtrip(Uint32, v),
        FuzzInput::U32Le(v) => roundtrip(Uint32Le, v),
        FuzzInput::F64(v) => {
            // NaN != NaN, so compare bit patterns
            assert_eq!(encode_decode(&Float64, &v).to_bits(), v.to_bits());
        }
        FuzzInput::Bool(v) => roundtrip(EncodedBoolean, v),
        FuzzInput::Varint(v) => roundtrip(EncodedUint, v),
        FuzzInput::String(v) => roundtrip(EncodedString, v),
        FuzzInput::RawString(value) => {
            let mut writer = Writer::new();
            writer.write(&RawString, &value).expect("failed to write value");
            assert_eq!(writer.len(), value.len());
            let mut reader = Reader::new(writer.finalize());
            let decoded = reader.read(&FixedString(value.len())).expect("failed to read value");
            assert_eq!(decoded, value.trim_end_matches('\0'));
            reader.read_eof().expect("trailing bytes");
        }
        FuzzInput::FixedString { value, slot } => {
            let block = FixedString(slot as usize);
            if value.len() > block.0 {
                let mut writer = Writer::new();
                assert!(matches!(
                    writer.write(&block, &value),
                    Err(Error::OutOfRange { .. })
                ));
                assert!(writer.is_empty());
                return;
            }
            // Trailing NULs are indistinguishable from padding
            let decoded = encode_decode(&block, &value);
            assert_eq!(decoded, value.trim_end_matches('\0'));
        }
        FuzzInput::FixedBuffer { value, slot } => {
            let block = FixedBuffer(slot as usize);
            let value = Bytes::from(value);
            if value.len() > block.0 {
                let mut writer = Writer::new();
                assert!(writer.write(&block, &value).is_err());
                return;
            }
            let decoded = encode_decode(&block, &value);
            assert_eq!(decoded[..value.len()], value[..]);
            assert!(decoded[value.len()..].iter().all(|b| *b == 0));
        }
        FuzzInput::Array(mut v) => {
            v.truncate(u16::MAX as usize);
            roundtrip(array_of(Uint8), v)
        }
        FuzzInput::Repeat(v) => roundtrip(repeat(v.len(), EncodedUint), v),
        FuzzInput::Record(a, b, c, mut d) => {
            d.truncate(u16::MAX as usize);
            roundtrip(
                sequence((Uint8, Uint16, EncodedString, array_of(Uint32))),
                (a, b, c, d),
            )
        }
    };
}

fuzz_target!(|input: FuzzInput| {
    fuzz(input);
});
