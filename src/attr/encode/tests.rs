use std::io::{self, Write};

use crate::attr::{CodecError, EncodeOptions, Item, ItemEncoder, TagLayout, Value, encode_line};

const EMPTY: &str = r#"{"B":null,"BOOL":null,"BS":null,"L":null,"M":null,"N":null,"NS":null,"NULL":null,"S":null,"SS":null}"#;

fn single(value: Value) -> Item {
	Item::from([("k".to_owned(), value)])
}

fn encode_full(value: Value) -> String {
	let mut encoder = ItemEncoder::new(Vec::new());
	encoder.write_item(&single(value)).expect("item encodes");
	String::from_utf8(encoder.into_inner()).expect("output is utf-8")
}

fn blobs() -> Value {
	Value::Bs(vec![b"foo".to_vec(), b"bar".to_vec()])
}

#[test]
fn encodes_every_variant_with_all_ten_tags() {
	let cases: Vec<(&str, Value, &str)> = vec![
		("bytes", Value::b("foo"), r#"{"k":{"B":"Zm9v","BOOL":null,"BS":null,"L":null,"M":null,"N":null,"NS":null,"NULL":null,"S":null,"SS":null}}"#),
		("bool", Value::Bool(true), r#"{"k":{"B":null,"BOOL":true,"BS":null,"L":null,"M":null,"N":null,"NS":null,"NULL":null,"S":null,"SS":null}}"#),
		("binary-set", blobs(), r#"{"k":{"B":null,"BOOL":null,"BS":["Zm9v","YmFy"],"L":null,"M":null,"N":null,"NS":null,"NULL":null,"S":null,"SS":null}}"#),
		(
			"attr-list",
			Value::L(vec![Value::s("str"), blobs()]),
			r#"{"k":{"B":null,"BOOL":null,"BS":null,"L":[{"B":null,"BOOL":null,"BS":null,"L":null,"M":null,"N":null,"NS":null,"NULL":null,"S":"str","SS":null},{"B":null,"BOOL":null,"BS":["Zm9v","YmFy"],"L":null,"M":null,"N":null,"NS":null,"NULL":null,"S":null,"SS":null}],"M":null,"N":null,"NS":null,"NULL":null,"S":null,"SS":null}}"#,
		),
		(
			"attr-map",
			Value::M(Item::from([("key1".to_owned(), Value::s("str")), ("key2".to_owned(), blobs())])),
			r#"{"k":{"B":null,"BOOL":null,"BS":null,"L":null,"M":{"key1":{"B":null,"BOOL":null,"BS":null,"L":null,"M":null,"N":null,"NS":null,"NULL":null,"S":"str","SS":null},"key2":{"B":null,"BOOL":null,"BS":["Zm9v","YmFy"],"L":null,"M":null,"N":null,"NS":null,"NULL":null,"S":null,"SS":null}},"N":null,"NS":null,"NULL":null,"S":null,"SS":null}}"#,
		),
		("number", Value::n("123.456"), r#"{"k":{"B":null,"BOOL":null,"BS":null,"L":null,"M":null,"N":"123.456","NS":null,"NULL":null,"S":null,"SS":null}}"#),
		(
			"number-set",
			Value::Ns(vec!["123".to_owned(), "456".to_owned()]),
			r#"{"k":{"B":null,"BOOL":null,"BS":null,"L":null,"M":null,"N":null,"NS":["123","456"],"NULL":null,"S":null,"SS":null}}"#,
		),
		("null", Value::Null, r#"{"k":{"B":null,"BOOL":null,"BS":null,"L":null,"M":null,"N":null,"NS":null,"NULL":true,"S":null,"SS":null}}"#),
		("string", Value::s("foo"), r#"{"k":{"B":null,"BOOL":null,"BS":null,"L":null,"M":null,"N":null,"NS":null,"NULL":null,"S":"foo","SS":null}}"#),
		(
			"string-set",
			Value::Ss(vec!["foo".to_owned(), "bar".to_owned()]),
			r#"{"k":{"B":null,"BOOL":null,"BS":null,"L":null,"M":null,"N":null,"NS":null,"NULL":null,"S":null,"SS":["foo","bar"]}}"#,
		),
		("empty-attr-list", Value::L(Vec::new()), r#"{"k":{"B":null,"BOOL":null,"BS":null,"L":[],"M":null,"N":null,"NS":null,"NULL":null,"S":null,"SS":null}}"#),
	];

	for (name, value, expected) in cases {
		assert_eq!(encode_full(value), format!("{expected}\n"), "case {name}");
	}
}

#[test]
fn unset_value_renders_all_tags_null() {
	assert_eq!(encode_full(Value::Unset), format!("{{\"k\":{EMPTY}}}\n"));
}

#[test]
fn empty_collections_are_arrays_not_null() {
	let line = encode_full(Value::Ss(Vec::new()));
	let json: serde_json::Value = serde_json::from_str(line.trim_end()).expect("valid json");
	assert_eq!(json["k"]["SS"], serde_json::json!([]));
	assert!(json["k"]["L"].is_null());

	let line = encode_full(Value::M(Item::new()));
	let json: serde_json::Value = serde_json::from_str(line.trim_end()).expect("valid json");
	assert_eq!(json["k"]["M"], serde_json::json!({}));
}

#[test]
fn every_value_object_has_exactly_ten_keys() {
	let nested = Value::L(vec![Value::M(Item::from([("x".to_owned(), Value::Unset)])), Value::Null]);
	let line = encode_full(nested);
	let json: serde_json::Value = serde_json::from_str(line.trim_end()).expect("valid json");

	let outer = json["k"].as_object().expect("value object");
	assert_eq!(outer.len(), 10);
	let list = outer["L"].as_array().expect("list payload");
	for element in list {
		assert_eq!(element.as_object().map(|object| object.len()), Some(10));
	}
	assert_eq!(list[0]["M"]["x"].as_object().map(|object| object.len()), Some(10));
}

#[test]
fn consecutive_items_are_separate_lines() {
	let mut encoder = ItemEncoder::new(Vec::new());
	encoder.write_item(&single(Value::s("a"))).expect("first item");
	encoder.write_item(&Item::new()).expect("empty item");
	encoder.write_item(&single(Value::n("1"))).expect("third item");

	let out = String::from_utf8(encoder.into_inner()).expect("utf-8");
	let lines: Vec<_> = out.split_terminator('\n').collect();
	assert_eq!(lines.len(), 3);
	assert_eq!(lines[1], "{}");
	assert!(out.ends_with("}\n"));
	assert!(!out.ends_with("\n\n"));
}

#[test]
fn strings_with_newlines_stay_on_one_line() {
	let line = encode_full(Value::s("a\nb\r\n"));
	assert_eq!(line.matches('\n').count(), 1);
	assert!(line.contains(r#""S":"a\nb\r\n""#));
}

#[test]
fn compact_layout_keeps_only_populated_tag() {
	let options = EncodeOptions { layout: TagLayout::Compact };
	let item = Item::from([
		("a".to_owned(), Value::L(vec![Value::s("str"), Value::Unset])),
		("b".to_owned(), Value::Null),
		("c".to_owned(), Value::b("foo")),
	]);

	let line = encode_line(&item, &options).expect("compact line");
	assert_eq!(line, r#"{"a":{"L":[{"S":"str"},{}]},"b":{"NULL":true},"c":{"B":"Zm9v"}}"#);
}

struct BrokenPipe;

impl Write for BrokenPipe {
	fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
		Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
	}

	fn flush(&mut self) -> io::Result<()> {
		Ok(())
	}
}

#[test]
fn write_failure_is_surfaced_as_io_error() {
	let mut encoder = ItemEncoder::new(BrokenPipe);
	let err = encoder.write_item(&single(Value::s("x"))).expect_err("write should fail");
	assert!(matches!(err, CodecError::Io(ref io) if io.kind() == io::ErrorKind::BrokenPipe));
	assert!(!err.is_item_error());
}
