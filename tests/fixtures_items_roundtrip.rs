#![allow(missing_docs)]

use std::fs::File;
use std::io::{BufReader, Cursor};
use std::path::{Path, PathBuf};

use dynline::attr::{EncodeOptions, Item, ItemDecoder, ItemEncoder, TagLayout, Value, open_reader};

#[test]
fn fixture_items_decode_to_expected_values() {
	let items = read_fixture("items.jsonl");
	assert_eq!(items.len(), 4);

	assert_eq!(items[0]["name"], Value::s("alpha"));
	assert_eq!(items[0]["tags"], Value::Ss(vec!["x".to_owned(), "y".to_owned()]));
	assert_eq!(items[1]["blob"], Value::b("foo"));
	assert_eq!(items[1]["flags"], Value::L(vec![Value::Bool(true), Value::Null]));
	assert_eq!(items[2]["id"], Value::n("3"));

	let meta = Item::from([
		("owner".to_owned(), Value::s("bob")),
		("scores".to_owned(), Value::Ns(vec!["1.5".to_owned(), "2".to_owned()])),
	]);
	assert_eq!(items[2]["meta"], Value::M(meta));
	assert_eq!(items[3]["gone"], Value::Unset);
}

#[test]
fn fixture_items_survive_both_layouts() {
	let items = read_fixture("items.jsonl");

	for layout in [TagLayout::Full, TagLayout::Compact] {
		let mut encoder = ItemEncoder::with_options(Vec::new(), EncodeOptions { layout });
		for item in &items {
			encoder.write_item(item).expect("item encodes");
		}

		let text = encoder.into_inner();
		assert_eq!(text.iter().filter(|byte| **byte == b'\n').count(), items.len());

		let decoded: Vec<Item> = ItemDecoder::new(Cursor::new(text))
			.collect::<dynline::attr::Result<_>>()
			.expect("encoded stream decodes");
		assert_eq!(decoded, items, "layout {layout:?}");
	}
}

fn read_fixture(name: &str) -> Vec<Item> {
	let file = File::open(fixture_path(name)).expect("fixture opens");
	let (_, reader) = open_reader(BufReader::new(file)).expect("reader opens");
	ItemDecoder::new(reader).collect::<dynline::attr::Result<_>>().expect("fixture decodes")
}

fn fixture_path(name: &str) -> PathBuf {
	Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures").join(name)
}
