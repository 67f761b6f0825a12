use byteorder::LittleEndian;
use pretty_assertions::assert_eq;
use rayform::{ByteCursor, ByteWriter, Corruption, DecodeError, LenWidth};

#[test]
fn test_cursor_reads() {
    let buf = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0xFF];
    let mut cur = ByteCursor::new(&buf);

    assert_eq!(cur.position(), 0);
    assert_eq!(cur.remaining(), 9);
    assert!(!cur.is_at_end());

    assert_eq!(cur.read_u8().unwrap(), 0x01);
    assert_eq!(cur.read_u16::<LittleEndian>().unwrap(), 0x0302);
    assert_eq!(cur.read_u32::<LittleEndian>().unwrap(), 0x07060504);
    assert_eq!(cur.position(), 7);

    assert_eq!(cur.read_bytes(2).unwrap(), &[0x08, 0xFF]);
    assert!(cur.is_at_end());
    assert_eq!(cur.remaining(), 0);
}

#[test]
fn test_cursor_u64_and_skip() {
    let buf = 0x1122_3344_5566_7788u64.to_le_bytes();
    let mut cur = ByteCursor::new(&buf);
    assert_eq!(cur.read_u64::<LittleEndian>().unwrap(), 0x1122_3344_5566_7788);

    let mut cur = ByteCursor::new(&buf);
    cur.skip(4).unwrap();
    assert_eq!(cur.read_u32::<LittleEndian>().unwrap(), 0x1122_3344);
    assert!(cur.skip(1).is_err());
}

#[test]
fn test_cursor_peek_does_not_advance() {
    let buf = 0xAFBF_0C01u32.to_le_bytes();
    let cur = ByteCursor::new(&buf);
    assert_eq!(cur.peek_u32::<LittleEndian>().unwrap(), 0xAFBF_0C01);
    assert_eq!(cur.position(), 0);

    let mut cur = ByteCursor::new(&buf);
    assert_eq!(cur.peek_u32::<LittleEndian>().unwrap(), 0xAFBF_0C01);
    assert_eq!(cur.read_u32::<LittleEndian>().unwrap(), 0xAFBF_0C01);

    let short = ByteCursor::new(&buf[..3]);
    assert_eq!(
        short.peek_u32::<LittleEndian>().unwrap_err(),
        DecodeError::OutOfBounds { offset: 0, requested: 4, available: 3 },
    );
}

#[test]
fn test_cursor_out_of_bounds_detail() {
    let buf = [1u8, 2, 3, 4, 5];
    let mut cur = ByteCursor::new(&buf);
    cur.read_bytes(3).unwrap();

    let err = cur.read_u32::<LittleEndian>().unwrap_err();
    assert_eq!(
        err,
        DecodeError::OutOfBounds { offset: 3, requested: 4, available: 2 },
    );

    // The failed read consumed nothing.
    assert_eq!(cur.position(), 3);
    assert_eq!(cur.read_u16::<LittleEndian>().unwrap(), 0x0504);
}

#[test]
fn test_cursor_read_to_end() {
    let buf = [9u8, 8, 7, 6];
    let mut cur = ByteCursor::new(&buf);
    cur.skip(1).unwrap();
    assert_eq!(cur.read_to_end(), &[8, 7, 6]);
    assert!(cur.is_at_end());
    assert!(cur.read_to_end().is_empty());
}

#[test]
fn test_prefixed_bytes_and_str() {
    let mut w = ByteWriter::new();
    w.write_prefixed_bytes::<LittleEndian>(LenWidth::U8, b"abc");
    w.write_prefixed_str::<LittleEndian>(LenWidth::U16, "defg");
    w.write_prefixed_bytes::<LittleEndian>(LenWidth::U32, b"");
    let bytes = w.into_bytes();
    assert_eq!(bytes, vec![3, b'a', b'b', b'c', 4, 0, b'd', b'e', b'f', b'g', 0, 0, 0, 0]);

    let mut cur = ByteCursor::new(&bytes);
    assert_eq!(cur.read_prefixed_bytes::<LittleEndian>(LenWidth::U8).unwrap(), b"abc");
    assert_eq!(cur.read_prefixed_str::<LittleEndian>(LenWidth::U16).unwrap(), "defg");
    assert_eq!(cur.read_prefixed_bytes::<LittleEndian>(LenWidth::U32).unwrap(), b"");
    assert!(cur.is_at_end());
}

#[test]
fn test_prefixed_str_rejects_bad_utf8() {
    // Length 2, then an invalid UTF-8 sequence.
    let bytes = [2u8, 0xC3, 0x28];
    let mut cur = ByteCursor::new(&bytes);
    let err = cur.read_prefixed_str::<LittleEndian>(LenWidth::U8).unwrap_err();
    assert_eq!(
        err,
        DecodeError::CorruptContainer {
            reason: Corruption::MalformedString { offset: 0 },
        },
    );
}

#[test]
fn test_prefixed_bytes_truncated_rejected() {
    // Prefix claims 5 bytes, only 2 follow.
    let bytes = [5u8, 1, 2];
    let mut cur = ByteCursor::new(&bytes);
    let err = cur.read_prefixed_bytes::<LittleEndian>(LenWidth::U8).unwrap_err();
    assert_eq!(
        err,
        DecodeError::OutOfBounds { offset: 1, requested: 5, available: 2 },
    );
}

#[test]
fn test_writer_integers() {
    let mut w = ByteWriter::with_capacity(15);
    assert!(w.is_empty());
    w.write_u8(0xAB);
    w.write_u16::<LittleEndian>(0x0102);
    w.write_u32::<LittleEndian>(0x0304_0506);
    w.write_u64::<LittleEndian>(0x0708_090A_0B0C_0D0E);
    assert_eq!(w.len(), 15);

    let bytes = w.into_bytes();
    let mut cur = ByteCursor::new(&bytes);
    assert_eq!(cur.read_u8().unwrap(), 0xAB);
    assert_eq!(cur.read_u16::<LittleEndian>().unwrap(), 0x0102);
    assert_eq!(cur.read_u32::<LittleEndian>().unwrap(), 0x0304_0506);
    assert_eq!(cur.read_u64::<LittleEndian>().unwrap(), 0x0708_090A_0B0C_0D0E);
}

#[test]
#[should_panic(expected = "does not fit")]
fn test_prefix_width_overflow_panics() {
    let mut w = ByteWriter::new();
    w.write_prefixed_bytes::<LittleEndian>(LenWidth::U8, &[0u8; 300]);
}

#[test]
fn test_len_width_max() {
    assert_eq!(LenWidth::U8.max_len(), 255);
    assert_eq!(LenWidth::U16.max_len(), 65535);
    assert_eq!(LenWidth::U32.max_len(), u32::MAX as usize);
}
