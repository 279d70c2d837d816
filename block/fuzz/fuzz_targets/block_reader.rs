#![no_main]

use commonware_block::{
    combinators::{array_of, sequence},
    EncodedString, EncodedUint, Error, FixedString, Reader, Uint16, Uint8,
};
use libfuzzer_sys::fuzz_target;

// Decoding arbitrary bytes must fail cleanly, never panic.
fuzz_target!(|data: &[u8]| {
    let record = sequence((
        Uint8,
        EncodedUint,
        EncodedString,
        FixedString(4),
        array_of(array_of(Uint16)),
    ));
    let mut reader = Reader::new(data.to_vec());
    loop {
        let offset = reader.offset();
        match reader.read(&record) {
            Ok(_) => assert!(reader.offset() > offset),
            Err(Error::UnexpectedEof { .. }) | Err(Error::InvalidUtf8(_)) => {
                assert_eq!(reader.offset(), offset);
                break;
            }
            Err(err) => panic!("unexpected error: {err}"),
        }
    }
    if reader.remaining() > 0 {
        assert!(reader.read_eof().is_err());
    }
});
