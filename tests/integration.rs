//! Integration tests: field resolution, nested blocks, transforms, gaps, strict/lenient reads.

use binspect::{
    compute_gaps, ArrayField, BinaryFile, ByteRange, ByteSource, Endianness, Field, IntField, LiteralField,
    NestedBlockField, Position, ReadError, Reader, ReaderOpts, StringField, Transform, Value,
};
use std::io::Write;

fn int(bits: u32, signed: bool, name: &str, start: u64) -> Field {
    IntField::new(bits, signed, name, start).expect("int field").into()
}

fn block(start: u64, len: impl Into<binspect::LengthSource>, name: &str, sub: Vec<Field>) -> NestedBlockField {
    NestedBlockField::new(start, len, name, sub).expect("block field")
}

fn reader(fields: Vec<Field>) -> Reader {
    Reader::new(fields, ReaderOpts::default()).expect("reader")
}

fn lenient(fields: Vec<Field>) -> Reader {
    Reader::new(fields, ReaderOpts::default().lenient()).expect("reader")
}

// --- Integers ---

#[test]
fn test_int_roundtrip_all_widths() {
    let cases: [(u32, bool, i128); 8] = [
        (8, false, 0xab),
        (8, true, -5),
        (16, false, 0xbeef),
        (16, true, -1234),
        (32, false, 0xdead_beef),
        (32, true, -2_000_000_000),
        (64, false, 0x0123_4567_89ab_cdef),
        (64, true, i64::MIN as i128),
    ];
    for (bits, signed, expected) in cases {
        let size = (bits / 8) as usize;
        for endianness in [Endianness::Little, Endianness::Big] {
            let le = (expected as u128).to_le_bytes();
            let mut bytes: Vec<u8> = vec![0xcc; 3];
            let mut raw = le[..size].to_vec();
            if endianness == Endianness::Big {
                raw.reverse();
            }
            bytes.extend_from_slice(&raw);

            let r = reader(vec![int(bits, signed, "v", 3)]);
            let result = r.read_slice(&bytes, endianness).expect("read");
            let v = result.get("v").expect("value");
            if signed {
                assert_eq!(v, &Value::Signed(expected as i64), "{} bits {:?}", bits, endianness);
            } else {
                assert_eq!(v, &Value::Unsigned(expected as u64), "{} bits {:?}", bits, endianness);
            }
            assert_eq!(result.entry("v").unwrap().range, ByteRange::new(3, bits as u64 / 8));
        }
    }
}

#[test]
fn test_invalid_width_rejected_at_construction() {
    assert_eq!(IntField::new(24, false, "x", 0).unwrap_err(), ReadError::InvalidWidth(24));
    assert_eq!(
        ArrayField::new(12, false, 4u64, "a", 0).unwrap_err(),
        ReadError::InvalidWidth(12)
    );
}

#[test]
fn test_duplicate_names_rejected_at_construction() {
    let err = Reader::new(vec![int(8, false, "a", 0), int(8, false, "a", 1)], ReaderOpts::default()).unwrap_err();
    assert_eq!(err, ReadError::DuplicateFieldName("a".to_string()));

    let err = NestedBlockField::new(0, 2u64, "b", vec![int(8, false, "x", 0), int(8, false, "x", 1)]).unwrap_err();
    assert_eq!(err, ReadError::DuplicateFieldName("x".to_string()));

    // Nested blocks are their own namespace.
    let sub = vec![int(8, false, "a", 0)];
    Reader::new(vec![int(8, false, "a", 0), block(0, 1u64, "b", sub).into()], ReaderOpts::default())
        .expect("same name in child block is fine");
}

#[test]
fn test_int_out_of_bounds() {
    let err = reader(vec![int(32, false, "x", 2)]).read_slice(&[0; 4], Endianness::Little).unwrap_err();
    assert_eq!(err.root(), &ReadError::OutOfBounds { start: 2, length: 4, available: 4 });
    assert_eq!(err.field_path(), vec!["x"]);
}

// --- Nested blocks ---

#[test]
fn test_block_length_from_earlier_field() {
    let bytes = [0x04, 0x00, 0x00, 0x00, 0x03, 0xaa, 0xbb, 0xcc];
    let r = reader(vec![
        int(32, false, "n", 0),
        block(4, "n", "body", vec![int(8, false, "first", 0), int(8, false, "last", 3)]).into(),
    ]);
    let result = r.read_slice(&bytes, Endianness::Little).expect("read");
    let entry = result.entry("body").expect("body");
    assert_eq!(entry.range, ByteRange::new(4, 4));
    let body = entry.value.as_block().expect("block");
    assert_eq!(body.source_len(), 4);
    assert_eq!(body.get("first").and_then(Value::as_u64), Some(0x03));
    assert_eq!(body.get("last").and_then(Value::as_u64), Some(0xcc));
}

#[test]
fn test_block_length_past_end_is_out_of_bounds() {
    let bytes = [0x05, 0x00, 0x00, 0x00, 0x03, 0xaa, 0xbb, 0xcc];
    let r = reader(vec![int(32, false, "n", 0), block(4, "n", "body", vec![]).into()]);
    let err = r.read_slice(&bytes, Endianness::Little).unwrap_err();
    assert!(matches!(err, ReadError::Field { ref name, index: 1, .. } if name == "body"));
    assert!(matches!(err.root(), ReadError::OutOfBounds { start: 4, length: 5, .. }));
}

#[test]
fn test_xor_transform_before_subfields() {
    let raw = [0x73, 0x00, 0x73 ^ 0x41];
    let sub = vec![int(8, false, "a", 0), int(8, false, "b", 1), int(8, false, "c", 2)];
    let r = reader(vec![block(0, 3u64, "body", sub).with_transform(Transform::xor(0x73)).into()]);
    let result = r.read_slice(&raw, Endianness::Little).expect("read");
    assert_eq!(result.path("body.a").and_then(Value::as_u64), Some(0x00));
    assert_eq!(result.path("body.b").and_then(Value::as_u64), Some(0x73));
    assert_eq!(result.path("body.c").and_then(Value::as_u64), Some(0x41));
}

#[test]
fn test_xor_transform_on_int_field() {
    let bytes = [0xaa, 0xbb, 0x34 ^ 0x73, 0x12 ^ 0x73];
    let field = IntField::new(16, false, "version", 2).unwrap().with_transform(Transform::xor(0x73));
    let r = Reader::new(vec![field.into()], ReaderOpts::default().with_gaps()).expect("reader");
    let result = r.read_slice(&bytes, Endianness::Little).expect("read");
    assert_eq!(result.get("version").and_then(Value::as_u64), Some(0x1234));
    assert_eq!(result.entry("version").unwrap().range, ByteRange::new(2, 2));
    assert_eq!(result.gaps().unwrap(), &[ByteRange::new(0, 2)]);
}

#[test]
fn test_transforms_on_arrays_and_strings() {
    let mut bytes = vec![0x01 ^ 0xff, 0x02 ^ 0xff];
    bytes.extend(b"olleh");
    bytes.extend([b'o' ^ 0x73, b'k' ^ 0x73, 0x73, 0x99]);
    let r = reader(vec![
        ArrayField::new(8, false, 2u64, "pair", 0).unwrap().with_transform(Transform::not()).into(),
        StringField::fixed(5u64, "word", 2).with_transform(Transform::reverse()).into(),
        StringField::cstring("tag", 7, None).with_transform(Transform::xor(0x73)).into(),
    ]);
    let result = r.read_slice(&bytes, Endianness::Little).expect("read");
    let pair = result.get("pair").and_then(Value::as_array).expect("array");
    assert_eq!(pair, &[Value::Unsigned(1), Value::Unsigned(2)]);
    assert_eq!(result.get("word").and_then(Value::as_bytes), Some(&b"hello"[..]));
    // The terminator is found after the transform and still counts toward the range.
    assert_eq!(result.get("tag").and_then(Value::as_bytes), Some(&b"ok"[..]));
    assert_eq!(result.entry("tag").unwrap().range, ByteRange::new(7, 3));
}

#[test]
fn test_transform_does_not_change_parent_occupancy() {
    // A transform that grows the buffer must still claim only the original bytes.
    let grow = Transform::new("double", |b| b.iter().flat_map(|&x| [x, x]).collect());
    let sub = vec![int(32, false, "wide", 0)];
    let r = Reader::new(
        vec![block(2, 2u64, "body", sub).with_transform(grow).into()],
        ReaderOpts::default().with_gaps(),
    )
    .expect("reader");
    let result = r.read_slice(&[0, 0, 0x11, 0x22, 0, 0], Endianness::Big).expect("read");
    assert_eq!(result.occupied(), vec![ByteRange::new(2, 2)]);
    assert_eq!(result.gaps().unwrap(), &[ByteRange::new(0, 2), ByteRange::new(4, 2)]);
    assert_eq!(result.path("body.wide").and_then(Value::as_u64), Some(0x1111_2222));
}

#[test]
fn test_child_block_cannot_see_parent_fields() {
    let sub = vec![block(0, "n", "inner", vec![]).into()];
    let r = reader(vec![int(8, false, "n", 0), block(1, 2u64, "outer", sub).into()]);
    let err = r.read_slice(&[1, 2, 3], Endianness::Little).unwrap_err();
    assert_eq!(err.field_path(), vec!["outer", "inner"]);
    assert_eq!(err.root(), &ReadError::UnresolvedReference("n".to_string()));
}

#[test]
fn test_zero_length_block() {
    let r = Reader::new(
        vec![int(8, false, "n", 0), block(1, "n", "empty", vec![]).into()],
        ReaderOpts::default().with_gaps(),
    )
    .expect("reader");
    let result = r.read_slice(&[0, 9, 9], Endianness::Little).expect("read");
    let empty = result.get("empty").and_then(Value::as_block).expect("block");
    assert!(empty.is_empty());
    assert_eq!(result.entry("empty").unwrap().range, ByteRange::new(1, 0));
    assert_eq!(result.gaps().unwrap(), &[ByteRange::new(1, 2)]);
}

#[test]
fn test_nested_inherits_endianness() {
    let sub = vec![int(16, false, "x", 0)];
    let r = reader(vec![block(0, 2u64, "b", sub).into()]);
    let be = r.read_slice(&[0x12, 0x34], Endianness::Big).expect("read");
    assert_eq!(be.path("b.x").and_then(Value::as_u64), Some(0x1234));
    let le = r.read_slice(&[0x12, 0x34], Endianness::Little).expect("read");
    assert_eq!(le.path("b.x").and_then(Value::as_u64), Some(0x3412));
}

#[test]
fn test_block_value_is_not_a_length() {
    let r = reader(vec![block(0, 1u64, "b", vec![]).into(), block(0, "b", "c", vec![]).into()]);
    let err = r.read_slice(&[1], Endianness::Little).unwrap_err();
    assert!(matches!(err.root(), ReadError::NonIntegerLength { name, .. } if name == "b"));
}

#[test]
fn test_negative_value_is_not_a_length() {
    let r = reader(vec![int(8, true, "n", 0), block(1, "n", "b", vec![]).into()]);
    let err = r.read_slice(&[0xff, 0], Endianness::Little).unwrap_err();
    assert_eq!(
        err.root(),
        &ReadError::NonIntegerLength { name: "n".to_string(), found: "-1".to_string() }
    );
}

// --- Ordering and references ---

#[test]
fn test_forward_reference_fails_in_both_modes() {
    let fields = || vec![block(4, "n", "body", vec![]).into(), int(32, false, "n", 0)];
    let bytes = [1, 0, 0, 0, 0xaa];

    let err = reader(fields()).read_slice(&bytes, Endianness::Little).unwrap_err();
    assert_eq!(err.root(), &ReadError::UnresolvedReference("n".to_string()));

    let result = lenient(fields()).read_slice(&bytes, Endianness::Little).expect("lenient read");
    assert_eq!(result.errors().len(), 1);
    assert_eq!(result.errors()[0].name, "body");
    assert_eq!(result.errors()[0].index, 0);
    assert_eq!(result.errors()[0].error, ReadError::UnresolvedReference("n".to_string()));
    assert_eq!(result.get("n").and_then(Value::as_u64), Some(1));
}

#[test]
fn test_order_is_load_bearing() {
    let bytes = [2, 0xaa, 0xbb];
    let ordered = reader(vec![int(8, false, "n", 0), block(1, "n", "b", vec![]).into()]);
    assert!(ordered.read_slice(&bytes, Endianness::Little).is_ok());

    let swapped = reader(vec![block(1, "n", "b", vec![]).into(), int(8, false, "n", 0)]);
    let err = swapped.read_slice(&bytes, Endianness::Little).unwrap_err();
    assert_eq!(err.root(), &ReadError::UnresolvedReference("n".to_string()));
}

#[test]
fn test_position_from_pointer_field() {
    let bytes = [0x04, 0, 0, 0, 0x2a];
    let r = reader(vec![
        int(8, false, "ptr", 0),
        Field::from(IntField::new(8, false, "target", 0).unwrap().with_position(Position::ValueOf("ptr".into()))),
    ]);
    let result = r.read_slice(&bytes, Endianness::Little).expect("read");
    assert_eq!(result.get("target").and_then(Value::as_u64), Some(0x2a));
    assert_eq!(result.entry("target").unwrap().range.start, 4);
}

fn pointed(bits: u32, name: &str, pointer: &str) -> Field {
    IntField::new(bits, false, name, 0).unwrap().with_position(Position::ValueOf(pointer.into())).into()
}

#[test]
fn test_pointer_must_be_declared_earlier() {
    let r = reader(vec![pointed(8, "target", "ptr"), int(8, false, "ptr", 0)]);
    let err = r.read_slice(&[1, 0x2a], Endianness::Little).unwrap_err();
    assert_eq!(err.root(), &ReadError::UnresolvedReference("ptr".to_string()));
    assert_eq!(err.field_path(), vec!["target"]);
}

#[test]
fn test_pointer_must_be_non_negative_integer() {
    let negative = reader(vec![int(8, true, "ptr", 0), pointed(8, "target", "ptr")]);
    let err = negative.read_slice(&[0xfe, 0], Endianness::Little).unwrap_err();
    assert_eq!(
        err.root(),
        &ReadError::NonIntegerLength { name: "ptr".to_string(), found: "-2".to_string() }
    );

    let to_block = reader(vec![block(0, 1u64, "ptr", vec![]).into(), pointed(8, "target", "ptr")]);
    let err = to_block.read_slice(&[0, 0], Endianness::Little).unwrap_err();
    assert!(matches!(err.root(), ReadError::NonIntegerLength { name, .. } if name == "ptr"));
}

#[test]
fn test_next_position_follows_previous_field() {
    let next = |bits, name: &str| -> Field { IntField::new(bits, false, name, 0).unwrap().with_position(Position::Next).into() };
    let r = reader(vec![next(8, "a"), next(16, "b"), int(8, false, "c", 0), next(8, "d")]);
    let result = r.read_slice(&[1, 0x02, 0x03, 4], Endianness::Big).expect("read");
    assert_eq!(result.get("b").and_then(Value::as_u64), Some(0x0203));
    assert_eq!(result.entry("b").unwrap().range.start, 1);
    // `d` follows `c`, which jumped back to offset 0.
    assert_eq!(result.entry("d").unwrap().range.start, 1);
}

#[test]
fn test_next_position_skips_failed_fields() {
    let next = |bits, name: &str| -> Field { IntField::new(bits, false, name, 0).unwrap().with_position(Position::Next).into() };
    let r = lenient(vec![int(16, false, "a", 0), int(32, false, "bad", 100), next(8, "c")]);
    let result = r.read_slice(&[1, 2, 3], Endianness::Little).expect("lenient read");
    assert_eq!(result.errors().len(), 1);
    assert_eq!(result.errors()[0].name, "bad");
    // `c` resumes after `a`, the last field that decoded.
    assert_eq!(result.entry("c").unwrap().range, ByteRange::new(2, 1));
    assert_eq!(result.get("c").and_then(Value::as_u64), Some(3));
}

#[test]
fn test_overlapping_fields_permitted() {
    let r = Reader::new(
        vec![int(32, false, "whole", 0), int(16, false, "low", 0), int(8, false, "b2", 2)],
        ReaderOpts::default().with_gaps(),
    )
    .expect("reader");
    let result = r.read_slice(&[1, 2, 3, 4, 5], Endianness::Little).expect("read");
    assert_eq!(result.get("low").and_then(Value::as_u64), Some(0x0201));
    assert_eq!(result.gaps().unwrap(), &[ByteRange::new(4, 1)]);
}

// --- Strict vs lenient ---

#[test]
fn test_lenient_continues_past_failures() {
    let bytes = [0x10, 0x01, 0x02];
    let fields = vec![
        int(8, false, "len", 0),
        block(1, "len", "too_long", vec![]).into(),
        int(8, false, "after", 2),
        block(1, "too_long", "dependent", vec![]).into(),
    ];
    let result = lenient(fields).read_slice(&bytes, Endianness::Little).expect("read");
    assert_eq!(result.get("after").and_then(Value::as_u64), Some(0x02));
    assert!(result.get("too_long").is_none());
    let errors = result.errors();
    assert_eq!(errors.len(), 2);
    assert_eq!((errors[0].name.as_str(), errors[0].index), ("too_long", 1));
    assert!(matches!(errors[0].error, ReadError::OutOfBounds { .. }));
    assert_eq!((errors[1].name.as_str(), errors[1].index), ("dependent", 3));
    assert_eq!(errors[1].error, ReadError::UnresolvedReference("too_long".to_string()));
    assert!(!result.is_complete());
}

#[test]
fn test_strict_returns_no_partial_result() {
    let r = reader(vec![int(8, false, "ok", 0), int(32, false, "bad", 0)]);
    let err = r.read_slice(&[1], Endianness::Little).unwrap_err();
    assert!(matches!(err, ReadError::Field { ref name, index: 1, .. } if name == "bad"));
}

#[test]
fn test_lenient_nested_errors_stay_in_child() {
    let sub = vec![int(8, false, "x", 0), int(32, false, "y", 0)];
    let result = lenient(vec![block(0, 2u64, "b", sub).into()])
        .read_slice(&[7, 8], Endianness::Little)
        .expect("read");
    assert!(result.errors().is_empty());
    let b = result.get("b").and_then(Value::as_block).expect("block");
    assert_eq!(b.get("x").and_then(Value::as_u64), Some(7));
    assert_eq!(b.errors().len(), 1);
    assert!(!result.is_complete());
}

// --- Gaps ---

#[test]
fn test_empty_field_list() {
    let r = Reader::new(vec![], ReaderOpts::default().with_gaps()).expect("reader");
    let result = r.read_slice(&[0; 10], Endianness::Little).expect("read");
    assert!(result.is_empty());
    assert_eq!(result.gaps().unwrap(), &[ByteRange::new(0, 10)]);

    let without = reader(vec![]).read_slice(&[0; 10], Endianness::Little).expect("read");
    assert!(without.gaps().is_none());
}

#[test]
fn test_gaps_and_occupied_partition_source() {
    let bytes: Vec<u8> = (0..64).collect();
    let layouts: Vec<Vec<Field>> = vec![
        vec![int(32, false, "a", 4), int(16, false, "b", 20), int(8, false, "c", 63)],
        vec![int(64, false, "a", 0), int(32, false, "b", 2), block(30, 10u64, "blk", vec![]).into()],
        vec![block(0, 64u64, "all", vec![]).into()],
        vec![int(8, false, "a", 10), int(8, false, "b", 11), int(8, false, "c", 10)],
    ];
    for fields in layouts {
        let r = Reader::new(fields, ReaderOpts::default().with_gaps()).expect("reader");
        let result = r.read_slice(&bytes, Endianness::Little).expect("read");
        let gaps = result.gaps().unwrap();
        let occupied = result.occupied();
        for offset in 0..bytes.len() as u64 {
            let in_gap = gaps.iter().filter(|g| g.contains(offset)).count();
            let in_field = occupied.iter().any(|r| r.contains(offset));
            assert!(in_gap <= 1, "gaps overlap at {}", offset);
            assert_ne!(in_gap == 1, in_field, "offset {} not covered exactly once", offset);
        }
        assert_eq!(gaps, compute_gaps(&occupied, bytes.len() as u64).as_slice());
    }
}

#[test]
fn test_gap_bytes() {
    let bytes = [0xaa, 1, 0xbb, 0xcc];
    let r = Reader::new(vec![int(8, false, "x", 1)], ReaderOpts::default().with_gaps()).expect("reader");
    let source = ByteSource::new(&bytes, Endianness::Little);
    let result = r.read(&source).expect("read");
    let gaps = result.gap_bytes(&source).expect("gap bytes");
    assert_eq!(gaps, vec![(ByteRange::new(0, 1), &[0xaa][..]), (ByteRange::new(2, 2), &[0xbb, 0xcc][..])]);
}

// --- Arrays, strings, literals ---

#[test]
fn test_array_count_from_field() {
    let bytes = [3, 0x01, 0x00, 0x02, 0x00, 0xff, 0xff];
    let r = reader(vec![
        int(8, false, "count", 0),
        ArrayField::new(16, true, "count", "items", 1).unwrap().into(),
    ]);
    let result = r.read_slice(&bytes, Endianness::Little).expect("read");
    let items = result.get("items").and_then(Value::as_array).expect("array");
    assert_eq!(items, &[Value::Signed(1), Value::Signed(2), Value::Signed(-1)]);
    assert_eq!(result.entry("items").unwrap().range, ByteRange::new(1, 6));
    assert_eq!(result.entry("items").unwrap().kind, "i16[]");
}

#[test]
fn test_array_huge_count_fails_without_allocating() {
    let r = reader(vec![ArrayField::new(64, false, u64::MAX / 4, "a", 0).unwrap().into()]);
    let err = r.read_slice(&[0; 16], Endianness::Little).unwrap_err();
    assert!(matches!(err.root(), ReadError::OutOfBounds { .. }));
}

#[test]
fn test_cstring_and_fixed_string() {
    let bytes = b"MAGIC\0hi\0\0rest";
    let r = reader(vec![
        StringField::cstring("name", 0, None).into(),
        StringField::fixed(4u64, "tag", 6).into(),
        StringField::cstring("tail", 10, None).into(),
    ]);
    let result = r.read_slice(bytes, Endianness::Little).expect("read");
    assert_eq!(result.get("name").and_then(Value::as_bytes), Some(&b"MAGIC"[..]));
    assert_eq!(result.entry("name").unwrap().range, ByteRange::new(0, 6));
    assert_eq!(result.get("tag").and_then(Value::as_text).as_deref(), Some("hi"));
    // No terminator: runs to the end of the source.
    assert_eq!(result.get("tail").and_then(Value::as_bytes), Some(&b"rest"[..]));
    assert_eq!(result.entry("tail").unwrap().range, ByteRange::new(10, 4));
}

#[test]
fn test_cstring_max_length() {
    let r = reader(vec![StringField::cstring("s", 0, Some(3)).into()]);
    let result = r.read_slice(b"abcdef\0", Endianness::Little).expect("read");
    assert_eq!(result.get("s").and_then(Value::as_bytes), Some(&b"abc"[..]));
    assert_eq!(result.entry("s").unwrap().range.length, 3);
}

#[test]
fn test_literal_match_and_mismatch() {
    let r = reader(vec![LiteralField::new(*b"MZ", "magic", 0).into()]);
    let ok = r.read_slice(b"MZ\x90\x00", Endianness::Little).expect("read");
    assert_eq!(ok.get("magic").and_then(Value::as_bytes), Some(&b"MZ"[..]));

    let err = r.read_slice(b"ZM\x90\x00", Endianness::Little).unwrap_err();
    assert_eq!(
        err.root(),
        &ReadError::LiteralMismatch { expected: b"MZ".to_vec(), found: b"ZM".to_vec() }
    );
}

// --- Files ---

#[test]
fn test_read_binary_file() {
    let mut tmp = tempfile::NamedTempFile::new().expect("tempfile");
    tmp.write_all(&[0x00, 0x00, 0x00, 0x2a, 0xff]).expect("write");
    let file = BinaryFile::open(tmp.path(), "answer", Endianness::Big).expect("open");
    assert_eq!(file.source().label(), "answer");

    let r = Reader::new(vec![int(32, false, "v", 0)], ReaderOpts::default().with_gaps()).expect("reader");
    let result = r.read_binary(&file).expect("read");
    assert_eq!(result.get("v").and_then(Value::as_u64), Some(42));
    assert_eq!(result.gaps().unwrap(), &[ByteRange::new(4, 1)]);
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    assert!(BinaryFile::open(dir.path().join("nope.bin"), "nope", Endianness::Little).is_err());
}

// --- Threading ---

fn assert_send_sync<T: Send + Sync>() {}

#[test]
fn test_reader_and_source_are_send_sync() {
    assert_send_sync::<Reader>();
    assert_send_sync::<ByteSource<'static>>();
    assert_send_sync::<Transform>();
}
