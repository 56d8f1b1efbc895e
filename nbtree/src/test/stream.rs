use super::builder::Builder;
use crate::error::{ErrorKind, Result};
use crate::stream::{self, DecodeOpts, Decoder, Encoder, Flavor};
use crate::{
    compound, list, ByteArray, Compound, IntArray, List, LongArray, NamedTag, Tag, Value,
};

const FLAVORS: [Flavor; 3] = [Flavor::BigEndian, Flavor::LittleEndian, Flavor::Network];

fn every_kind() -> Compound {
    compound! {
        "byte" => i8::MIN,
        "short" => i16::MAX,
        "int" => i32::MIN,
        "negative int" => -1,
        "long" => i64::MAX,
        "float" => f32::MIN_POSITIVE,
        "double" => -0.5f64,
        "bytes" => ByteArray::new(vec![-128, 0, 127]),
        "string" => "héllo wörld ✓",
        "list" => list![1i16, 2i16, 3i16],
        "nested" => compound! { "inner" => compound! { "deep" => 1i8 } },
        "ints" => IntArray::new(vec![i32::MIN, -1, 0, 300, i32::MAX]),
        "longs" => LongArray::new(vec![i64::MIN, 0, i64::MAX]),
        "empty list" => List::new(),
        "typed empty list" => List::with_kind(Tag::Compound),
    }
}

#[test]
fn round_trip_every_kind_in_every_flavor() -> Result<()> {
    let root = NamedTag::new("root", every_kind());
    for flavor in FLAVORS {
        let bytes = stream::to_bytes(&root, flavor)?;
        let back = stream::from_bytes(&bytes, flavor)?;
        assert_eq!(back.as_ref(), Some(&root), "flavor {:?}", flavor);
    }
    Ok(())
}

#[test]
fn round_trip_keeps_list_kind_of_empty_list() -> Result<()> {
    let root = NamedTag::new("", compound! { "l" => List::with_kind(Tag::Long) });
    for flavor in FLAVORS {
        let bytes = stream::to_bytes(&root, flavor)?;
        let back = stream::from_bytes(&bytes, flavor)?.unwrap();
        let list = back.value().as_compound().unwrap().get("l").unwrap();
        assert_eq!(list.as_list().unwrap().kind(), Some(Tag::Long));
    }
    Ok(())
}

#[test]
fn round_trip_nameless() -> Result<()> {
    let value = Value::from(every_kind());
    for flavor in FLAVORS {
        let bytes = stream::to_bytes_nameless(&value, flavor)?;
        assert_eq!(stream::from_bytes_nameless(&bytes, flavor)?, Some(value.clone()));
    }
    Ok(())
}

#[test]
fn big_endian_byte_layout() -> Result<()> {
    let root = NamedTag::new("", compound! { "a" => 1i8 });
    let bytes = stream::to_bytes(&root, Flavor::BigEndian)?;
    assert_eq!(bytes, [10, 0, 0, 1, 0, 1, b'a', 1, 0]);
    Ok(())
}

#[test]
fn little_endian_byte_layout() -> Result<()> {
    let root = NamedTag::new("", compound! { "a" => 258i16 });
    let bytes = stream::to_bytes(&root, Flavor::LittleEndian)?;
    assert_eq!(bytes, [10, 0, 0, 2, 1, 0, b'a', 2, 1, 0]);
    Ok(())
}

#[test]
fn network_ints_and_lengths_are_varints() -> Result<()> {
    let bytes = stream::to_bytes_nameless(&Value::Int(-1), Flavor::Network)?;
    assert_eq!(bytes, [3, 0xff, 0xff, 0xff, 0xff, 0x0f]);

    let bytes = stream::to_bytes_nameless(&Value::Int(300), Flavor::Network)?;
    assert_eq!(bytes, [3, 0xac, 0x02]);

    let bytes = stream::to_bytes(&NamedTag::new("ab", "x"), Flavor::Network)?;
    assert_eq!(bytes, [8, 2, b'a', b'b', 1, b'x']);

    let ints = Value::from(IntArray::new(vec![1, -1]));
    let bytes = stream::to_bytes_nameless(&ints, Flavor::Network)?;
    assert_eq!(bytes, [11, 2, 1, 0xff, 0xff, 0xff, 0xff, 0x0f]);
    Ok(())
}

#[test]
fn network_shorts_and_longs_stay_fixed_width() -> Result<()> {
    let bytes = stream::to_bytes_nameless(&Value::Short(1), Flavor::Network)?;
    assert_eq!(bytes, [2, 1, 0]);

    let bytes = stream::to_bytes_nameless(&Value::Long(1), Flavor::Network)?;
    assert_eq!(bytes, [4, 1, 0, 0, 0, 0, 0, 0, 0]);
    Ok(())
}

#[test]
fn decodes_builder_payload() -> Result<()> {
    let payload = Builder::new()
        .start_compound("Level")
        .byte("hardcore", 1)
        .short("health", 20)
        .long("seed", -42)
        .string("name", "world")
        .int_array("pos", &[1, 2, 3])
        .start_list("items", Tag::Int, 2)
        .int_payload(5)
        .int_payload(6)
        .end_compound()
        .build();

    let tag = stream::from_bytes(&payload, Flavor::BigEndian)?.unwrap();
    assert_eq!(tag.name(), "Level");

    let level = tag.value().as_compound().unwrap();
    assert_eq!(level.get_as::<bool>("hardcore"), Some(true));
    assert_eq!(level.get_as::<i16>("health"), Some(20));
    assert_eq!(level.get_as::<i64>("seed"), Some(-42));
    assert_eq!(level.get_as::<&str>("name"), Some("world"));
    assert_eq!(level.get_as::<&IntArray>("pos").unwrap(), &[1, 2, 3]);
    assert_eq!(level.get_as::<&List>("items"), Some(&list![5, 6]));
    Ok(())
}

#[test]
fn unknown_list_kind_is_empty_list() -> Result<()> {
    let payload = Builder::new()
        .start_compound("")
        .start_list("l", Tag::End, 0)
        .end_compound()
        .build();
    let tag = stream::from_bytes(&payload, Flavor::BigEndian)?.unwrap();
    assert_eq!(tag.value().as_compound().unwrap().get("l"), Some(&Value::List(List::new())));

    let payload = Builder::new()
        .tag(Tag::List)
        .name("l")
        .raw_bytes(&[99])
        .int_payload(3)
        .build();
    let tag = stream::from_bytes(&payload, Flavor::BigEndian)?.unwrap();
    let list = tag.value().as_list().unwrap();
    assert!(list.is_empty());
    assert_eq!(list.kind(), None);
    Ok(())
}

#[test]
fn unknown_root_tag_is_none() -> Result<()> {
    assert_eq!(stream::from_bytes(&[42, 0, 0], Flavor::BigEndian)?, None);
    assert_eq!(stream::from_bytes(&[0], Flavor::BigEndian)?, None);
    assert_eq!(stream::from_bytes(&[], Flavor::BigEndian)?, None);
    Ok(())
}

#[test]
fn truncated_int_is_zero_filled() -> Result<()> {
    let data = [1u8];
    let mut decoder = Decoder::new(&data, Flavor::BigEndian);
    assert_eq!(decoder.read_i32()?, 0x0100_0000);
    assert!(decoder.is_exhausted());

    let mut decoder = Decoder::new(&data, Flavor::LittleEndian);
    assert_eq!(decoder.read_i32()?, 1);
    Ok(())
}

#[test]
fn truncated_string_is_zero_padded() -> Result<()> {
    let payload = Builder::new()
        .tag(Tag::String)
        .name("s")
        .raw_bytes(&[0, 4, b'a', b'b'])
        .build();
    let tag = stream::from_bytes(&payload, Flavor::BigEndian)?.unwrap();
    assert_eq!(tag.value(), "ab\0\0");
    Ok(())
}

#[test]
fn truncated_collections_stop_at_end_of_input() -> Result<()> {
    let payload = Builder::new()
        .tag(Tag::IntArray)
        .name("a")
        .int_payload(1000)
        .int_payload(7)
        .build();
    let tag = stream::from_bytes(&payload, Flavor::BigEndian)?.unwrap();
    assert_eq!(tag.value().as_int_array().unwrap(), &[7]);

    let payload = Builder::new()
        .tag(Tag::ByteArray)
        .name("b")
        .int_payload(10)
        .raw_bytes(&[1, 2])
        .build();
    let tag = stream::from_bytes(&payload, Flavor::BigEndian)?.unwrap();
    assert_eq!(tag.value().as_byte_array().unwrap(), &[1, 2]);

    let payload = Builder::new()
        .start_list("l", Tag::Short, 5)
        .short_payload(3)
        .build();
    let tag = stream::from_bytes(&payload, Flavor::BigEndian)?.unwrap();
    assert_eq!(tag.value().as_list(), Some(&list![3i16]));
    Ok(())
}

#[test]
fn truncated_compound_ends_at_end_of_input() -> Result<()> {
    let payload = Builder::new().start_compound("").int("x", 5).build();
    let tag = stream::from_bytes(&payload, Flavor::BigEndian)?.unwrap();
    assert_eq!(tag.value(), &Value::from(compound! { "x" => 5 }));
    Ok(())
}

#[test]
fn strict_mode_reports_eof() {
    let strict = DecodeOpts::new().strict(true);

    let payload = Builder::new().start_compound("").int("x", 5).build();
    let err = stream::from_bytes_with_opts(&payload, Flavor::BigEndian, strict).unwrap_err();
    assert!(err.is_eof());

    let data = [1u8];
    let err = Decoder::with_opts(&data, Flavor::BigEndian, strict)
        .read_i32()
        .unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::UnexpectedEof);

    let payload = Builder::new()
        .tag(Tag::IntArray)
        .name("a")
        .int_payload(2)
        .int_payload(7)
        .build();
    let err = stream::from_bytes_with_opts(&payload, Flavor::BigEndian, strict).unwrap_err();
    assert!(err.is_eof());
}

#[test]
fn strict_mode_rejects_invalid_utf8() -> Result<()> {
    let payload = Builder::new()
        .tag(Tag::String)
        .name("s")
        .raw_bytes(&[0, 2, 0xc3, 0x28])
        .build();

    let strict = DecodeOpts::new().strict(true);
    assert!(stream::from_bytes_with_opts(&payload, Flavor::BigEndian, strict).is_err());

    let tag = stream::from_bytes(&payload, Flavor::BigEndian)?.unwrap();
    assert_eq!(tag.value(), "\u{fffd}(");
    Ok(())
}

#[test]
fn nesting_beyond_depth_limit_is_an_error() {
    let mut builder = Builder::new();
    for _ in 0..10 {
        builder = builder.start_compound("c");
    }
    for _ in 0..10 {
        builder = builder.end_compound();
    }
    let payload = builder.build();

    let opts = DecodeOpts::new().max_depth(5);
    let err = stream::from_bytes_with_opts(&payload, Flavor::BigEndian, opts).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::DepthLimit);

    let opts = DecodeOpts::new().max_depth(10);
    assert!(stream::from_bytes_with_opts(&payload, Flavor::BigEndian, opts).is_ok());
}

#[test]
fn nested_lists_count_towards_depth_limit() {
    let mut builder = Builder::new().tag(Tag::List).name("l");
    for _ in 0..10 {
        builder = builder.tag(Tag::List).int_payload(1);
    }
    let payload = builder.tag(Tag::End).int_payload(0).build();

    let opts = DecodeOpts::new().max_depth(5);
    let err = stream::from_bytes_with_opts(&payload, Flavor::BigEndian, opts).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::DepthLimit);

    assert!(stream::from_bytes(&payload, Flavor::BigEndian).is_ok());
}

fn nested_compounds(depth: usize) -> Vec<u8> {
    let mut builder = Builder::new();
    for _ in 0..depth {
        builder = builder.start_compound("c");
    }
    for _ in 0..depth {
        builder = builder.end_compound();
    }
    builder.build()
}

#[test]
fn deep_nesting_stops_at_default_depth_limit() {
    let payload = nested_compounds(10_000);
    let err = stream::from_bytes(&payload, Flavor::BigEndian).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::DepthLimit);

    let mut builder = Builder::new().tag(Tag::List).name("l");
    for _ in 0..10_000 {
        builder = builder.tag(Tag::List).int_payload(1);
    }
    let payload = builder.tag(Tag::End).int_payload(0).build();
    let err = stream::from_bytes(&payload, Flavor::BigEndian).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::DepthLimit);
}

#[test]
fn default_depth_limit_fits_a_small_thread_stack() {
    let decoded = std::thread::Builder::new()
        .stack_size(1 << 20)
        .spawn(|| {
            let at_limit = nested_compounds(stream::MAX_DEPTH);
            let past_limit = nested_compounds(stream::MAX_DEPTH + 1);
            (
                stream::from_bytes(&at_limit, Flavor::BigEndian).is_ok(),
                stream::from_bytes(&past_limit, Flavor::BigEndian)
                    .map_err(|e| e.kind().clone()),
            )
        })
        .unwrap()
        .join()
        .unwrap();

    assert!(decoded.0);
    assert_eq!(decoded.1.unwrap_err(), ErrorKind::DepthLimit);
}

fn nested_value(depth: usize) -> Value {
    let mut value = Value::Compound(Compound::new());
    for _ in 1..depth {
        let mut parent = Compound::new();
        parent.set("c", value);
        value = Value::Compound(parent);
    }
    value
}

#[test]
fn encoder_refuses_nesting_beyond_default_depth_limit() -> Result<()> {
    let root = NamedTag::new("", nested_value(stream::MAX_DEPTH));
    let bytes = stream::to_bytes(&root, Flavor::LittleEndian)?;
    assert!(stream::from_bytes(&bytes, Flavor::LittleEndian)?.is_some());

    let root = NamedTag::new("", nested_value(stream::MAX_DEPTH + 1));
    let err = stream::to_bytes(&root, Flavor::LittleEndian).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::DepthLimit);

    let mut lists = Value::List(List::new());
    for _ in 0..stream::MAX_DEPTH {
        lists = Value::List(list![lists]);
    }
    let err = stream::to_bytes_nameless(&lists, Flavor::Network).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::DepthLimit);
    Ok(())
}

#[test]
fn length_beyond_limit_is_an_error() {
    let payload = Builder::new()
        .tag(Tag::LongArray)
        .name("a")
        .int_payload(1_000_000)
        .build();
    let opts = DecodeOpts::new().max_seq_len(1000);
    let err = stream::from_bytes_with_opts(&payload, Flavor::BigEndian, opts).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::LengthTooLarge);
}

#[test]
fn duplicate_names_keep_the_first() -> Result<()> {
    let payload = Builder::new()
        .start_compound("")
        .int("a", 1)
        .int("b", 2)
        .int("a", 3)
        .end_compound()
        .build();
    let tag = stream::from_bytes(&payload, Flavor::BigEndian)?.unwrap();
    let compound = tag.value().as_compound().unwrap();
    assert_eq!(compound.len(), 2);
    assert_eq!(compound.get_as::<i32>("a"), Some(1));
    assert_eq!(compound.names().collect::<Vec<_>>(), ["a", "b"]);
    Ok(())
}

#[test]
fn heterogeneous_list_is_not_encoded() {
    let mixed = List::from_values(vec![Value::Int(1), Value::from("two")]);
    assert!(!mixed.is_valid());

    let root = NamedTag::new("", compound! { "mixed" => mixed });
    let err = stream::to_bytes(&root, Flavor::BigEndian).unwrap_err();
    assert_eq!(
        err.kind(),
        &ErrorKind::KindMismatch {
            expected: Tag::Int,
            found: Tag::String
        }
    );
}

#[test]
fn overlong_string_is_not_encoded() {
    let long = "x".repeat(u16::MAX as usize + 1);
    let err = stream::to_bytes(&NamedTag::new("", long.as_str()), Flavor::BigEndian).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::LengthTooLarge);

    assert!(stream::to_bytes(&NamedTag::new("", long.as_str()), Flavor::Network).is_ok());

    // Network lengths are bounded by what the decoder accepts by default.
    let longer = "x".repeat(stream::MAX_SEQ_LEN + 1);
    let err = stream::to_bytes_nameless(&Value::from(longer), Flavor::Network).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::LengthTooLarge);
}

#[test]
fn decoder_reads_consecutive_tags() -> Result<()> {
    let mut encoder = Encoder::new(Vec::new(), Flavor::LittleEndian);
    encoder.write_tag(&NamedTag::new("first", 1i8))?;
    encoder.write_tag(&NamedTag::new("second", 2i8))?;
    let bytes = encoder.into_inner();

    let mut decoder = Decoder::new(&bytes, Flavor::LittleEndian);
    assert_eq!(decoder.read_tag()?, Some(NamedTag::new("first", 1i8)));
    assert_eq!(decoder.read_tag()?, Some(NamedTag::new("second", 2i8)));
    assert!(decoder.is_exhausted());
    assert_eq!(decoder.read_tag()?, None);
    Ok(())
}

#[test]
fn invalid_varint_is_an_error() {
    let data = [3, 0x80, 0x80, 0x80, 0x80, 0x80, 0x01];
    assert!(stream::from_bytes_nameless(&data, Flavor::Network).is_err());
}
