use std::io::{BufRead, BufReader, Cursor, Read, Write};

use crate::attr::Result;

/// zstd frame magic used to recognise compressed dumps.
pub const ZSTD_MAGIC: [u8; 4] = [0x28, 0xB5, 0x2F, 0xFD];

/// Compression mode of a JSON Lines stream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Compression {
	/// Raw uncompressed stream.
	#[default]
	None,
	/// zstd-compressed stream.
	Zstd,
}

impl Compression {
	/// Render compression mode as a stable lowercase label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::None => "none",
			Self::Zstd => "zstd",
		}
	}
}

/// Detect compression from the leading bytes of a stream.
pub fn detect(prefix: &[u8]) -> Compression {
	if prefix.starts_with(&ZSTD_MAGIC) { Compression::Zstd } else { Compression::None }
}

/// Sniff the stream magic and return a line reader over the decoded text.
///
/// The sniffed bytes are chained back in front of the stream, so nothing is
/// lost for uncompressed input.
pub fn open_reader<'a, R: BufRead + 'a>(mut reader: R) -> Result<(Compression, Box<dyn BufRead + 'a>)> {
	let mut prefix = Vec::with_capacity(ZSTD_MAGIC.len());
	(&mut reader).take(ZSTD_MAGIC.len() as u64).read_to_end(&mut prefix)?;

	let compression = detect(&prefix);
	let stream = Cursor::new(prefix).chain(reader);
	let out: Box<dyn BufRead + 'a> = match compression {
		Compression::None => Box::new(stream),
		Compression::Zstd => Box::new(BufReader::new(zstd::stream::read::Decoder::with_buffer(stream)?)),
	};
	Ok((compression, out))
}

/// Output stream that optionally zstd-compresses everything written to it.
///
/// Call [`OutputSink::finish`] when done; dropping a zstd sink without it
/// leaves the last frame incomplete.
pub enum OutputSink<W: Write> {
	/// Pass-through writer.
	Plain(W),
	/// zstd frame encoder.
	Zstd(zstd::stream::write::Encoder<'static, W>),
}

impl<W: Write> OutputSink<W> {
	/// Wrap `writer` according to `compression`.
	pub fn new(writer: W, compression: Compression, level: i32) -> Result<Self> {
		Ok(match compression {
			Compression::None => Self::Plain(writer),
			Compression::Zstd => Self::Zstd(zstd::stream::write::Encoder::new(writer, level)?),
		})
	}

	/// Finish any compressed frame, flush, and return the inner writer.
	pub fn finish(self) -> Result<W> {
		let mut writer = match self {
			Self::Plain(writer) => writer,
			Self::Zstd(encoder) => encoder.finish()?,
		};
		writer.flush()?;
		Ok(writer)
	}
}

impl<W: Write> Write for OutputSink<W> {
	fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
		match self {
			Self::Plain(writer) => writer.write(buf),
			Self::Zstd(encoder) => encoder.write(buf),
		}
	}

	fn flush(&mut self) -> std::io::Result<()> {
		match self {
			Self::Plain(writer) => writer.flush(),
			Self::Zstd(encoder) => encoder.flush(),
		}
	}
}
