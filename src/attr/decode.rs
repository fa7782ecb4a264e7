use std::io::BufRead;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde_json::{Map, Value as JsonValue};

use crate::attr::{AttrPath, CodecError, Item, PathStep, Result, Tag, Value};

/// What to do with a value object that populates more than one tag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MultiTagPolicy {
	/// Fail the item with [`CodecError::MultipleTags`].
	#[default]
	Reject,
	/// Keep the first populated tag in wire order, ignore the rest.
	FirstInTagOrder,
}

/// Runtime limits and behavior switches for line decoding.
#[derive(Debug, Clone, Copy)]
pub struct DecodeOptions {
	/// Maximum nested list/map depth.
	pub max_depth: u32,
	/// Handling of multiply populated value objects.
	pub multi_tag: MultiTagPolicy,
}

impl Default for DecodeOptions {
	fn default() -> Self {
		Self {
			max_depth: 32,
			multi_tag: MultiTagPolicy::Reject,
		}
	}
}

/// Reads JSON Lines items one line at a time.
///
/// Blank lines are skipped. Missing tag keys are accepted, so both the full
/// ten-key layout and trimmed hand-written objects decode. After an item
/// error the next call resumes at the following line.
pub struct ItemDecoder<R> {
	reader: R,
	options: DecodeOptions,
	line: u64,
	buf: Vec<u8>,
}

impl<R: BufRead> ItemDecoder<R> {
	/// Decoder with default options.
	pub fn new(reader: R) -> Self {
		Self::with_options(reader, DecodeOptions::default())
	}

	/// Decoder with explicit options.
	pub fn with_options(reader: R, options: DecodeOptions) -> Self {
		Self {
			reader,
			options,
			line: 0,
			buf: Vec::new(),
		}
	}

	/// Read the next item; `Ok(None)` once input is exhausted.
	pub fn read_item(&mut self) -> Result<Option<Item>> {
		loop {
			self.buf.clear();
			if self.reader.read_until(b'\n', &mut self.buf)? == 0 {
				return Ok(None);
			}
			self.line += 1;

			// Raw bytes: invalid UTF-8 surfaces as a per-line JSON error.
			let text = self.buf.trim_ascii_end();
			if text.is_empty() {
				continue;
			}

			return decode_at(text, self.line, &self.options).map(Some);
		}
	}

	/// 1-based number of the last line read, 0 before the first read.
	pub fn line(&self) -> u64 {
		self.line
	}

	/// Unwrap the underlying reader.
	pub fn into_inner(self) -> R {
		self.reader
	}
}

impl<R: BufRead> Iterator for ItemDecoder<R> {
	type Item = Result<crate::attr::Item>;

	fn next(&mut self) -> Option<Self::Item> {
		self.read_item().transpose()
	}
}

/// Decode one JSON object line into an item. Errors report line 1.
pub fn decode_line(text: &str, options: &DecodeOptions) -> Result<Item> {
	decode_at(text.as_bytes(), 1, options)
}

fn decode_at(text: &[u8], line: u64, options: &DecodeOptions) -> Result<Item> {
	let parsed: JsonValue = serde_json::from_slice(text).map_err(|source| CodecError::Json { line, source })?;
	let object = match parsed {
		JsonValue::Object(object) => object,
		other => {
			return Err(CodecError::NotAnObject {
				line,
				found: json_kind(&other),
			});
		}
	};

	let ctx = LineCtx { line, options };
	ctx.item(object, &mut AttrPath::default())
}

struct LineCtx<'a> {
	line: u64,
	options: &'a DecodeOptions,
}

impl LineCtx<'_> {
	fn item(&self, object: Map<String, JsonValue>, path: &mut AttrPath) -> Result<Item> {
		let mut item = Item::new();
		for (name, raw) in object {
			path.push(PathStep::Key(name.clone()));
			let value = self.value(raw, path)?;
			path.pop();
			item.insert(name, value);
		}
		Ok(item)
	}

	fn value(&self, raw: JsonValue, path: &mut AttrPath) -> Result<Value> {
		let mut object = match raw {
			JsonValue::Object(object) => object,
			other => {
				return Err(CodecError::NotAValue {
					line: self.line,
					path: path.clone(),
					found: json_kind(&other),
				});
			}
		};

		let mut chosen: Option<(Tag, JsonValue)> = None;
		for tag in Tag::ALL {
			let Some(payload) = object.remove(tag.as_str()) else {
				continue;
			};
			if !is_populated(tag, &payload) {
				continue;
			}

			if let Some((first, _)) = &chosen {
				if self.options.multi_tag == MultiTagPolicy::Reject {
					return Err(CodecError::MultipleTags {
						line: self.line,
						path: path.clone(),
						first: *first,
						second: tag,
					});
				}
				continue;
			}
			chosen = Some((tag, payload));
		}

		// Keys left in `object` are not tags and are ignored.
		let Some((tag, payload)) = chosen else {
			return Ok(Value::Unset);
		};

		path.push(PathStep::Tag(tag));
		let value = self.payload(tag, payload, path);
		path.pop();
		value
	}

	fn payload(&self, tag: Tag, payload: JsonValue, path: &mut AttrPath) -> Result<Value> {
		let value = match tag {
			Tag::B => {
				let text = self.string(payload, path, tag, tag.expected_json())?;
				Value::B(self.binary(&text, path)?)
			}
			Tag::Bool => match payload {
				JsonValue::Bool(flag) => Value::Bool(flag),
				other => return Err(self.type_error(path, tag, tag.expected_json(), &other)),
			},
			Tag::Bs => {
				let elements = self.array(payload, path, tag)?;
				let mut blobs = Vec::with_capacity(elements.len());
				for (index, element) in elements.into_iter().enumerate() {
					path.push(PathStep::Index(index));
					let text = self.string(element, path, tag, "base64 string")?;
					blobs.push(self.binary(&text, path)?);
					path.pop();
				}
				Value::Bs(blobs)
			}
			Tag::L => {
				self.check_depth(path)?;
				let elements = self.array(payload, path, tag)?;
				let mut values = Vec::with_capacity(elements.len());
				for (index, element) in elements.into_iter().enumerate() {
					path.push(PathStep::Index(index));
					values.push(self.value(element, path)?);
					path.pop();
				}
				Value::L(values)
			}
			Tag::M => {
				self.check_depth(path)?;
				match payload {
					JsonValue::Object(object) => Value::M(self.item(object, path)?),
					other => return Err(self.type_error(path, tag, tag.expected_json(), &other)),
				}
			}
			Tag::N => Value::N(self.string(payload, path, tag, tag.expected_json())?),
			Tag::Ns => Value::Ns(self.strings(payload, path, tag, "number string")?),
			Tag::Null => match payload {
				JsonValue::Bool(true) => Value::Null,
				other => return Err(self.type_error(path, tag, "true", &other)),
			},
			Tag::S => Value::S(self.string(payload, path, tag, tag.expected_json())?),
			Tag::Ss => Value::Ss(self.strings(payload, path, tag, "string")?),
		};
		Ok(value)
	}

	fn check_depth(&self, path: &AttrPath) -> Result<()> {
		if path.depth() > self.options.max_depth {
			return Err(CodecError::DepthExceeded {
				line: self.line,
				path: path.clone(),
				max_depth: self.options.max_depth,
			});
		}
		Ok(())
	}

	fn array(&self, payload: JsonValue, path: &AttrPath, tag: Tag) -> Result<Vec<JsonValue>> {
		match payload {
			JsonValue::Array(elements) => Ok(elements),
			other => Err(self.type_error(path, tag, tag.expected_json(), &other)),
		}
	}

	fn strings(&self, payload: JsonValue, path: &mut AttrPath, tag: Tag, expected: &'static str) -> Result<Vec<String>> {
		let elements = self.array(payload, path, tag)?;
		let mut out = Vec::with_capacity(elements.len());
		for (index, element) in elements.into_iter().enumerate() {
			match element {
				JsonValue::String(text) => out.push(text),
				other => {
					return Err(self.type_error(&path.with(PathStep::Index(index)), tag, expected, &other));
				}
			}
		}
		Ok(out)
	}

	fn string(&self, payload: JsonValue, path: &AttrPath, tag: Tag, expected: &'static str) -> Result<String> {
		match payload {
			JsonValue::String(text) => Ok(text),
			other => Err(self.type_error(path, tag, expected, &other)),
		}
	}

	fn binary(&self, text: &str, path: &AttrPath) -> Result<Vec<u8>> {
		STANDARD.decode(text).map_err(|source| CodecError::Base64 {
			line: self.line,
			path: path.clone(),
			source,
		})
	}

	fn type_error(&self, path: &AttrPath, tag: Tag, expected: &'static str, found: &JsonValue) -> CodecError {
		CodecError::TagType {
			line: self.line,
			path: path.clone(),
			tag,
			expected,
			found: json_kind(found),
		}
	}
}

fn is_populated(tag: Tag, payload: &JsonValue) -> bool {
	match payload {
		JsonValue::Null => false,
		JsonValue::Bool(false) => tag != Tag::Null,
		_ => true,
	}
}

fn json_kind(value: &JsonValue) -> &'static str {
	match value {
		JsonValue::Null => "null",
		JsonValue::Bool(_) => "boolean",
		JsonValue::Number(_) => "number",
		JsonValue::String(_) => "string",
		JsonValue::Array(_) => "array",
		JsonValue::Object(_) => "object",
	}
}
