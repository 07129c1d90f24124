use super::builder::Builder;
use crate::binary::{decode_binary, decode_binary_with, encode_binary, write_binary};
use crate::error::{ErrorKind, Result};
use crate::{Compound, DecodeOptions, List, NamedTag, Tag, Value};

fn decode(payload: &[u8]) -> Result<NamedTag> {
    let (tag, consumed) = decode_binary(payload, 0)?;
    assert_eq!(consumed, payload.len());
    Ok(tag)
}

fn err_kind(payload: &[u8]) -> ErrorKind {
    decode_binary(payload, 0).unwrap_err().kind().clone()
}

#[test]
fn empty_payload() {
    let payload = Builder::new().build();
    assert_eq!(err_kind(&payload), ErrorKind::TruncatedInput);
}

#[test]
fn simple_byte() -> Result<()> {
    let payload = Builder::new().byte("a", 5).build();
    assert_eq!(payload, [1, 0, 1, b'a', 5]);

    let tag = decode(&payload)?;
    assert_eq!(tag.name(), "a");
    assert_eq!(tag.value(), &Value::Byte(5));
    assert_eq!(tag.byte_len(), 5);
    Ok(())
}

#[test]
fn simple_scalars() -> Result<()> {
    let payload = Builder::new().short("abc", 1234).build();
    assert_eq!(decode(&payload)?, NamedTag::new("abc", Value::Short(1234)));

    let payload = Builder::new().int("abc", 50345).build();
    assert_eq!(decode(&payload)?, NamedTag::new("abc", Value::Int(50345)));

    let payload = Builder::new().long("abc", i32::MAX as i64 + 1).build();
    assert_eq!(
        decode(&payload)?,
        NamedTag::new("abc", Value::Long(i32::MAX as i64 + 1))
    );

    let payload = Builder::new().float("float", 1.23).build();
    assert_eq!(decode(&payload)?, NamedTag::new("float", Value::Float(1.23)));

    let payload = Builder::new().double("double", 1.23456).build();
    assert_eq!(
        decode(&payload)?,
        NamedTag::new("double", Value::Double(1.23456))
    );

    let payload = Builder::new().string("str", "something").build();
    assert_eq!(decode(&payload)?, NamedTag::new("str", "something"));
    Ok(())
}

#[test]
fn utf8_string() -> Result<()> {
    let payload = Builder::new().string("😈", "héllo").build();
    let tag = decode(&payload)?;
    assert_eq!(tag.name(), "😈");
    assert_eq!(tag.value().as_str(), Some("héllo"));
    assert_eq!(tag.byte_len(), payload.len());
    Ok(())
}

#[test]
fn invalid_unicode() {
    let bs = [255, 255, 255];
    let payload = Builder::new()
        .tag(Tag::String)
        .name("invalid")
        .raw_str_len(bs.len())
        .raw_bytes(&bs)
        .build();

    assert!(matches!(err_kind(&payload), ErrorKind::Nonunicode(_)));
}

#[test]
fn arrays() -> Result<()> {
    let payload = Builder::new().byte_array("bytes", &[1, -2, 3]).build();
    assert_eq!(
        decode(&payload)?.value(),
        &Value::ByteArray(vec![1, -2, 3])
    );

    let payload = Builder::new().int_array("ints", &[1, 2, -3]).build();
    assert_eq!(decode(&payload)?.value(), &Value::IntArray(vec![1, 2, -3]));

    let payload = Builder::new()
        .long_array("longs", &[1, i64::MIN, i64::MAX])
        .build();
    assert_eq!(
        decode(&payload)?.value(),
        &Value::LongArray(vec![1, i64::MIN, i64::MAX])
    );
    Ok(())
}

#[test]
fn nested_compound() -> Result<()> {
    let payload = Builder::new()
        .start_compound("")
        .int("z", 1)
        .start_compound("inner")
        .string("name", "steve")
        .end_compound()
        .byte("a", 2)
        .end_compound()
        .build();

    let tag = decode(&payload)?;
    let root = tag.value().as_compound().unwrap();

    // order of the input, not alphabetical
    assert_eq!(root.keys().collect::<Vec<_>>(), ["z", "inner", "a"]);
    let inner = root.get("inner").unwrap().as_compound().unwrap();
    assert_eq!(inner.get("name").unwrap().as_str(), Some("steve"));
    Ok(())
}

#[test]
fn list_of_compounds() -> Result<()> {
    let payload = Builder::new()
        .start_compound("")
        .start_list("items", Tag::Compound, 2)
        .start_anon_compound()
        .string("id", "stone")
        .end_compound()
        .start_anon_compound()
        .string("id", "dirt")
        .end_compound()
        .end_compound()
        .build();

    let tag = decode(&payload)?;
    let items = tag
        .value()
        .as_compound()
        .and_then(|c| c.get("items"))
        .and_then(Value::as_list)
        .unwrap();

    assert_eq!(items.element_tag(), Tag::Compound);
    assert_eq!(items.len(), 2);
    let ids: Vec<_> = items
        .iter()
        .map(|c| c.as_compound().unwrap().get("id").unwrap().as_str().unwrap())
        .collect();
    assert_eq!(ids, ["stone", "dirt"]);
    Ok(())
}

#[test]
fn list_of_scalars() -> Result<()> {
    let payload = Builder::new()
        .start_list("l", Tag::Short, 3)
        .short_payload(1)
        .short_payload(2)
        .short_payload(3)
        .build();

    let tag = decode(&payload)?;
    let list = tag.value().as_list().unwrap();
    assert_eq!(list.element_tag(), Tag::Short);
    assert_eq!(
        list.iter().collect::<Vec<_>>(),
        [&Value::Short(1), &Value::Short(2), &Value::Short(3)]
    );
    Ok(())
}

#[test]
fn empty_list_round_trips() -> Result<()> {
    let tag = NamedTag::new("l", List::default());
    let bytes = encode_binary(&tag)?;

    assert_eq!(bytes, Builder::new().start_list("l", Tag::End, 0).build());
    let back = decode(&bytes)?;
    assert_eq!(back.value().as_list().unwrap().element_tag(), Tag::End);
    assert_eq!(back, tag);
    Ok(())
}

#[test]
fn decode_at_offset() -> Result<()> {
    let payload = Builder::new().byte("a", 1).int("b", 2).build();

    let (first, consumed) = decode_binary(&payload, 0)?;
    assert_eq!(first, NamedTag::new("a", Value::Byte(1)));

    let (second, rest) = decode_binary(&payload, consumed)?;
    assert_eq!(second, NamedTag::new("b", Value::Int(2)));
    assert_eq!(consumed + rest, payload.len());
    Ok(())
}

#[test]
fn offset_past_end() {
    let payload = Builder::new().byte("a", 1).build();
    let err = decode_binary(&payload, 10).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::TruncatedInput);
}

#[test]
fn end_tag_alone() -> Result<()> {
    let (tag, consumed) = decode_binary(&[0, 99, 99], 0)?;
    assert_eq!(tag.tag(), Tag::End);
    assert_eq!(consumed, 1);
    assert_eq!(tag.byte_len(), 1);
    Ok(())
}

#[test]
fn unknown_tag() {
    let payload = Builder::new().raw_bytes(&[13]).name("x").build();
    assert_eq!(err_kind(&payload), ErrorKind::UnknownTagKind(13));

    let payload = Builder::new()
        .start_compound("")
        .raw_bytes(&[200])
        .build();
    assert_eq!(err_kind(&payload), ErrorKind::UnknownTagKind(200));
}

#[test]
fn truncated_everywhere() {
    let payload = Builder::new()
        .start_compound("root")
        .int("i", 1)
        .string("s", "text")
        .long_array("l", &[1, 2])
        .start_list("list", Tag::Double, 1)
        .double_payload(0.5)
        .end_compound()
        .build();

    assert!(decode_binary(&payload, 0).is_ok());
    for len in 0..payload.len() {
        let err = decode_binary(&payload[..len], 0).unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::TruncatedInput, "length {}", len);
    }
}

#[test]
fn negative_lengths() {
    let payload = Builder::new()
        .tag(Tag::ByteArray)
        .name("b")
        .int_payload(-1)
        .build();
    assert_eq!(err_kind(&payload), ErrorKind::InvalidLength);

    let payload = Builder::new()
        .tag(Tag::IntArray)
        .name("i")
        .int_payload(-5)
        .build();
    assert_eq!(err_kind(&payload), ErrorKind::InvalidLength);

    let payload = Builder::new()
        .tag(Tag::LongArray)
        .name("l")
        .int_payload(i32::MIN)
        .build();
    assert_eq!(err_kind(&payload), ErrorKind::InvalidLength);

    let payload = Builder::new().start_list("l", Tag::Int, -1).build();
    assert_eq!(err_kind(&payload), ErrorKind::InvalidLength);
}

#[test]
fn huge_array_does_not_allocate() {
    let payload = Builder::new()
        .tag(Tag::LongArray)
        .name("l")
        .int_payload(i32::MAX)
        .long_payload(1)
        .build();
    assert_eq!(err_kind(&payload), ErrorKind::TruncatedInput);
}

#[test]
fn list_of_end_with_elements() {
    let payload = Builder::new().start_list("l", Tag::End, 3).build();
    assert_eq!(err_kind(&payload), ErrorKind::InvalidLength);
}

#[test]
fn depth_limit() {
    let mut builder = Builder::new();
    for _ in 0..5 {
        builder = builder.start_compound("c");
    }
    for _ in 0..5 {
        builder = builder.end_compound();
    }
    let payload = builder.build();

    let opts = DecodeOptions { max_depth: 5 };
    assert!(decode_binary_with(&payload, 0, &opts).is_ok());

    let opts = DecodeOptions { max_depth: 4 };
    let err = decode_binary_with(&payload, 0, &opts).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::DepthExceeded);
}

// A list of lists nested `depth` deep, the innermost one empty.
fn nested_lists(depth: usize) -> Vec<u8> {
    let mut builder = Builder::new().start_list("", Tag::List, 1);
    for _ in 0..depth - 2 {
        builder = builder.tag(Tag::List).int_payload(1);
    }
    builder.tag(Tag::End).int_payload(0).build()
}

#[test]
fn deep_lists_hit_limit_not_stack() {
    // far beyond the default limit, and the input ends before the lists do
    let mut builder = Builder::new().start_list("", Tag::List, 1);
    for _ in 0..10_000 {
        builder = builder.tag(Tag::List).int_payload(1);
    }
    let payload = builder.build();

    assert_eq!(err_kind(&payload), ErrorKind::DepthExceeded);
}

#[test]
fn default_depth_fits_small_stack() {
    let handle = std::thread::Builder::new()
        .stack_size(2 * 1024 * 1024)
        .spawn(|| {
            for depth in [511, 512] {
                let payload = nested_lists(depth);
                let (_, consumed) = decode_binary(&payload, 0).unwrap();
                assert_eq!(consumed, payload.len());
            }

            for depth in [513, 600, 100_000] {
                assert_eq!(err_kind(&nested_lists(depth)), ErrorKind::DepthExceeded);
            }
        })
        .unwrap();

    handle.join().unwrap();
}

fn sample() -> NamedTag {
    let mut inner = Compound::new();
    inner.insert("name", "héllo wörld").unwrap();
    inner.insert("empty", Compound::new()).unwrap();

    let compounds =
        List::from_values(vec![inner.clone().into(), Compound::new().into()]).unwrap();
    let strings = List::from_values(vec!["a".into(), "bc".into()]).unwrap();

    let root = Compound::from_pairs([
        ("byte", Value::Byte(-1)),
        ("short", Value::Short(i16::MIN)),
        ("int", Value::Int(i32::MAX)),
        ("long", Value::Long(-7)),
        ("float", Value::Float(0.25)),
        ("double", Value::Double(-1e300)),
        ("bytes", Value::ByteArray(vec![1, 2, 3])),
        ("string", Value::String(String::new())),
        ("compounds", Value::List(compounds)),
        ("strings", Value::List(strings)),
        ("empty", Value::List(List::new(Tag::Int))),
        ("inner", Value::Compound(inner)),
        ("ints", Value::IntArray(vec![-1, 0, 1])),
        ("longs", Value::LongArray(vec![])),
    ])
    .unwrap();

    NamedTag::new("level", root)
}

#[test]
fn round_trip() -> Result<()> {
    let tag = sample();
    let bytes = encode_binary(&tag)?;
    assert_eq!(decode(&bytes)?, tag);
    Ok(())
}

#[test]
fn byte_len_matches_encoding() -> Result<()> {
    let tag = sample();
    assert_eq!(tag.byte_len(), encode_binary(&tag)?.len());

    for (name, value) in tag.value().as_compound().unwrap().iter() {
        let child = NamedTag::new(name, value.clone());
        assert_eq!(child.byte_len(), encode_binary(&child)?.len(), "{}", name);
    }
    Ok(())
}

#[test]
fn write_binary_to_writer() -> Result<()> {
    let tag = sample();
    let mut out = Vec::new();
    write_binary(&mut out, &tag)?;
    assert_eq!(out, encode_binary(&tag)?);
    Ok(())
}

#[test]
fn encode_matches_builder() -> Result<()> {
    let mut root = Compound::new();
    root.insert("a", Value::Short(3)).unwrap();
    root.insert("b", Value::IntArray(vec![7])).unwrap();

    let expected = Builder::new()
        .start_compound("")
        .short("a", 3)
        .int_array("b", &[7])
        .end_compound()
        .build();

    assert_eq!(encode_binary(&NamedTag::new("", root))?, expected);
    Ok(())
}

#[test]
fn end_inside_compound_is_rejected() {
    let mut root = Compound::new();
    assert!(root.insert("oops", Value::End).is_err());
    assert!(root.is_empty());
}

#[test]
fn name_too_long() {
    let name = "x".repeat(u16::MAX as usize + 1);
    let err = encode_binary(&NamedTag::new(name, Value::Byte(0))).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::InvalidLength);
}
