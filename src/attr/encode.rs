use std::io::Write;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};

use crate::attr::{CodecError, Item, Result, Tag, Value};

/// Shape of each value object on the wire.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TagLayout {
	/// All ten tag keys, unused ones set to `null`.
	#[default]
	Full,
	/// Only the populated tag; unset values become `{}`.
	Compact,
}

/// Encoder behavior switches.
#[derive(Debug, Clone, Copy, Default)]
pub struct EncodeOptions {
	/// Value object layout.
	pub layout: TagLayout,
}

/// Writes items as JSON Lines, one object per line.
///
/// Each line is rendered into an internal buffer and handed to the writer
/// with a single `write_all`. Write errors abort the item and are returned
/// as-is; nothing is retried.
pub struct ItemEncoder<W> {
	writer: W,
	options: EncodeOptions,
	line: Vec<u8>,
}

impl<W: Write> ItemEncoder<W> {
	/// Encoder using the full ten-key layout.
	pub fn new(writer: W) -> Self {
		Self::with_options(writer, EncodeOptions::default())
	}

	/// Encoder with explicit options.
	pub fn with_options(writer: W, options: EncodeOptions) -> Self {
		Self {
			writer,
			options,
			line: Vec::new(),
		}
	}

	/// Append one item followed by a single `\n`.
	pub fn write_item(&mut self, item: &Item) -> Result<()> {
		self.line.clear();
		serde_json::to_writer(
			&mut self.line,
			&WireItem {
				item,
				layout: self.options.layout,
			},
		)
		.map_err(CodecError::Encode)?;
		self.line.push(b'\n');
		self.writer.write_all(&self.line)?;
		Ok(())
	}

	/// Flush the underlying writer.
	pub fn flush(&mut self) -> Result<()> {
		self.writer.flush()?;
		Ok(())
	}

	/// Borrow the underlying writer.
	pub fn get_ref(&self) -> &W {
		&self.writer
	}

	/// Unwrap the underlying writer.
	pub fn into_inner(self) -> W {
		self.writer
	}
}

/// Render one item as a JSON object, without the trailing newline.
pub fn encode_line(item: &Item, options: &EncodeOptions) -> Result<String> {
	serde_json::to_string(&WireItem {
		item,
		layout: options.layout,
	})
	.map_err(CodecError::Encode)
}

struct WireItem<'a> {
	item: &'a Item,
	layout: TagLayout,
}

impl Serialize for WireItem<'_> {
	fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
		let mut map = serializer.serialize_map(Some(self.item.len()))?;
		for (name, value) in self.item {
			map.serialize_entry(name, &WireValue { value, layout: self.layout })?;
		}
		map.end()
	}
}

struct WireValue<'a> {
	value: &'a Value,
	layout: TagLayout,
}

impl Serialize for WireValue<'_> {
	fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
		let populated = self.value.tag();
		let payload = Payload {
			value: self.value,
			layout: self.layout,
		};

		match self.layout {
			TagLayout::Full => {
				let mut map = serializer.serialize_map(Some(Tag::ALL.len()))?;
				for tag in Tag::ALL {
					if populated == Some(tag) {
						map.serialize_entry(tag.as_str(), &payload)?;
					} else {
						map.serialize_entry(tag.as_str(), &())?;
					}
				}
				map.end()
			}
			TagLayout::Compact => {
				let mut map = serializer.serialize_map(Some(usize::from(populated.is_some())))?;
				if let Some(tag) = populated {
					map.serialize_entry(tag.as_str(), &payload)?;
				}
				map.end()
			}
		}
	}
}

struct Payload<'a> {
	value: &'a Value,
	layout: TagLayout,
}

impl Serialize for Payload<'_> {
	fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
		let layout = self.layout;
		match self.value {
			Value::Unset => serializer.serialize_unit(),
			Value::B(bytes) => serializer.serialize_str(&STANDARD.encode(bytes)),
			Value::Bool(flag) => serializer.serialize_bool(*flag),
			Value::Bs(blobs) => serializer.collect_seq(blobs.iter().map(|blob| STANDARD.encode(blob))),
			Value::L(values) => serializer.collect_seq(values.iter().map(|value| WireValue { value, layout })),
			Value::M(item) => WireItem { item, layout }.serialize(serializer),
			Value::N(text) | Value::S(text) => serializer.serialize_str(text),
			Value::Ns(texts) | Value::Ss(texts) => serializer.collect_seq(texts),
			Value::Null => serializer.serialize_bool(true),
		}
	}
}

#[cfg(test)]
mod tests;
