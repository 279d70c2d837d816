//! Integration tests for layouts assembled from combinators.

use commonware_block::{
    combinators::{array_of, dynamic, repeat, sequence, transform, transform_read, transform_write},
    ByteView, Choice, EncodedBoolean, EncodedString, Error, FixedString, ReadBlock, Reader,
    Uint32, Uint8, WriteBlock, Writer,
};

#[derive(Debug, Clone, PartialEq)]
struct Entry {
    directory: bool,
    name: String,
    size: u32,
}

fn entry() -> impl ReadBlock<Value = Entry> + WriteBlock<Value = Entry> {
    transform(
        sequence((EncodedBoolean, EncodedString, Uint32)),
        |(directory, name, size)| Entry {
            directory,
            name,
            size,
        },
        |entry: &Entry| (entry.directory, entry.name.clone(), entry.size),
    )
}

#[derive(Debug, Clone, PartialEq)]
enum Message {
    Ping(u32),
    Text(String),
}

const PING: u8 = 0;
const TEXT: u8 = 1;

// A tag byte selects the payload layout.
fn message() -> impl ReadBlock<Value = Message> + WriteBlock<Value = Message> {
    dynamic(
        |view: &ByteView<'_>, offset| {
            Ok(match Uint8.read(view, offset)? {
                PING => Choice::First(transform_read(sequence((Uint8, Uint32)), |(_, v)| {
                    Message::Ping(v)
                })),
                _ => Choice::Second(transform_read(sequence((Uint8, EncodedString)), |(_, s)| {
                    Message::Text(s)
                })),
            })
        },
        |message: &Message| match message {
            Message::Ping(_) => Choice::First(transform_write(
                sequence((Uint8, Uint32)),
                |message: &Message| match message {
                    Message::Ping(v) => (PING, *v),
                    Message::Text(_) => unreachable!(),
                },
            )),
            Message::Text(_) => Choice::Second(transform_write(
                sequence((Uint8, EncodedString)),
                |message: &Message| match message {
                    Message::Text(s) => (TEXT, s.clone()),
                    Message::Ping(_) => unreachable!(),
                },
            )),
        },
    )
}

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}

#[test]
fn test_struct_layout() {
    init_logging();
    let listing = array_of(entry());
    let value = vec![
        Entry {
            directory: true,
            name: "src".to_string(),
            size: 0,
        },
        Entry {
            directory: false,
            name: "Cargo.toml".to_string(),
            size: 1_024,
        },
    ];

    let mut writer = Writer::new();
    writer.write(&listing, &value).unwrap();
    let encoded = writer.finalize();
    assert_eq!(encoded.len(), 2 + (1 + 4 + 4) + (1 + 11 + 4));
    assert_eq!(&encoded[..6], &[0, 2, 1, 3, b's', b'r']);

    let mut reader = Reader::new(encoded);
    assert_eq!(reader.read(&listing).unwrap(), value);
    reader.read_eof().unwrap();
}

#[test]
fn test_tagged_messages() {
    init_logging();
    let block = message();
    let messages = vec![
        Message::Ping(7),
        Message::Text("hi".to_string()),
        Message::Ping(u32::MAX),
    ];

    let mut writer = Writer::new();
    for message in &messages {
        writer.write(&block, message).unwrap();
    }
    let encoded = writer.finalize();
    assert_eq!(
        encoded.as_ref(),
        &[0, 0, 0, 0, 7, 1, 2, b'h', b'i', 0, 0xFF, 0xFF, 0xFF, 0xFF]
    );

    let mut reader = Reader::new(encoded);
    for message in &messages {
        assert_eq!(&reader.read(&block).unwrap(), message);
    }
    reader.read_eof().unwrap();
}

#[test]
fn test_tagged_message_truncated() {
    let block = message();

    // Empty input: the tag itself is missing
    let mut reader = Reader::new(Vec::<u8>::new());
    assert!(matches!(
        reader.read(&block),
        Err(Error::UnexpectedEof { needed: 1, .. })
    ));

    // A ping tag followed by a short payload
    let mut reader = Reader::new(vec![PING, 0, 0]);
    assert_eq!(
        reader.read(&block),
        Err(Error::UnexpectedEof {
            offset: 0,
            needed: 5,
            len: 3
        })
    );
}

#[test]
fn test_header_and_records() {
    init_logging();
    // A header announces how many fixed-width records follow.
    let header = sequence((FixedString(4), Uint8));
    let record = sequence((Uint8, Uint32));
    let records: Vec<(u8, u32)> = (0..100).map(|i| (i as u8, i * 1_000)).collect();

    let mut writer = Writer::new();
    writer
        .write(&header, &("BLK1".to_string(), records.len() as u8))
        .unwrap();
    writer
        .write(&repeat(records.len(), record), &records)
        .unwrap();
    let encoded = writer.finalize();
    assert_eq!(encoded.len(), 5 + 100 * 5);

    let mut reader = Reader::new(encoded);
    let (magic, count) = reader.read(&header).unwrap();
    assert_eq!(magic, "BLK1");
    assert_eq!(reader.read(&repeat(count as usize, record)).unwrap(), records);
    reader.read_eof().unwrap();
}
