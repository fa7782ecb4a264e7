use thiserror::Error;

use crate::attr::{AttrPath, Tag};

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, CodecError>;

/// Errors produced while encoding or decoding JSON Lines items.
#[derive(Debug, Error)]
pub enum CodecError {
	/// Underlying stream failure.
	#[error("io: {0}")]
	Io(#[from] std::io::Error),
	/// Line is not valid JSON.
	#[error("line {line}: invalid json: {source}")]
	Json {
		/// 1-based input line.
		line: u64,
		/// Parser error with column context.
		source: serde_json::Error,
	},
	/// Serializing an item to JSON failed.
	#[error("encode: {0}")]
	Encode(serde_json::Error),
	/// Line parsed but is not a JSON object.
	#[error("line {line}: expected item object, got {found}")]
	NotAnObject {
		/// 1-based input line.
		line: u64,
		/// JSON type that was found.
		found: &'static str,
	},
	/// Attribute or element is not a value object.
	#[error("line {line}: {path}: expected value object, got {found}")]
	NotAValue {
		/// 1-based input line.
		line: u64,
		/// Location of the offending value.
		path: AttrPath,
		/// JSON type that was found.
		found: &'static str,
	},
	/// Tag payload has the wrong JSON type.
	#[error("line {line}: {path}: expected {expected}, got {found}")]
	TagType {
		/// 1-based input line.
		line: u64,
		/// Location of the offending payload.
		path: AttrPath,
		/// Tag whose payload was rejected.
		tag: Tag,
		/// Expected JSON shape.
		expected: &'static str,
		/// JSON type that was found.
		found: &'static str,
	},
	/// Binary payload is not valid standard base64.
	#[error("line {line}: {path}: invalid base64: {source}")]
	Base64 {
		/// 1-based input line.
		line: u64,
		/// Location of the offending payload.
		path: AttrPath,
		/// Base64 decoder error.
		source: base64::DecodeError,
	},
	/// Value object populates more than one tag.
	#[error("line {line}: {path}: multiple tags populated ({first}, {second})")]
	MultipleTags {
		/// 1-based input line.
		line: u64,
		/// Location of the offending value.
		path: AttrPath,
		/// First populated tag in wire order.
		first: Tag,
		/// Second populated tag in wire order.
		second: Tag,
	},
	/// List/map nesting exceeded the configured limit.
	#[error("line {line}: {path}: nesting depth exceeded (max={max_depth})")]
	DepthExceeded {
		/// 1-based input line.
		line: u64,
		/// Location where the limit was hit.
		path: AttrPath,
		/// Configured depth ceiling.
		max_depth: u32,
	},
}

impl CodecError {
	/// Input line for item-level decode errors.
	pub fn line(&self) -> Option<u64> {
		match self {
			Self::Io(_) | Self::Encode(_) => None,
			Self::Json { line, .. }
			| Self::NotAnObject { line, .. }
			| Self::NotAValue { line, .. }
			| Self::TagType { line, .. }
			| Self::Base64 { line, .. }
			| Self::MultipleTags { line, .. }
			| Self::DepthExceeded { line, .. } => Some(*line),
		}
	}

	/// Stable lowercase label for reports.
	pub fn kind(&self) -> &'static str {
		match self {
			Self::Io(_) => "io",
			Self::Json { .. } => "json",
			Self::Encode(_) => "encode",
			Self::NotAnObject { .. } => "not_an_object",
			Self::NotAValue { .. } => "not_a_value",
			Self::TagType { .. } => "tag_type",
			Self::Base64 { .. } => "base64",
			Self::MultipleTags { .. } => "multiple_tags",
			Self::DepthExceeded { .. } => "depth_exceeded",
		}
	}

	/// True for errors confined to one input item; the stream can continue.
	pub fn is_item_error(&self) -> bool {
		!matches!(self, Self::Io(_) | Self::Encode(_))
	}
}
