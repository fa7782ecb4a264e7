mod compression;
mod decode;
mod encode;
mod error;
mod path;
mod value;
mod wire;

/// Stream compression detection and wrapping.
pub use compression::{Compression, OutputSink, ZSTD_MAGIC, detect, open_reader};
/// Line decoder, options, and single-line entry point.
pub use decode::{DecodeOptions, ItemDecoder, MultiTagPolicy, decode_line};
/// Line encoder, options, and single-line entry point.
pub use encode::{EncodeOptions, ItemEncoder, TagLayout, encode_line};
/// Error and result aliases.
pub use error::{CodecError, Result};
/// Attribute location rendering used in error context.
pub use path::{AttrPath, PathStep};
/// Item and value model.
pub use value::{Item, Value};
/// Wire tag table.
pub use wire::Tag;
