use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use dynline::attr::{CodecError, Compression, DecodeOptions, MultiTagPolicy, OutputSink, Result, open_reader};
use serde::Serialize;

/// Item-level failure handling for streaming commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ErrorPolicy {
	/// Abort on the first malformed item.
	Stop,
	/// Report malformed items and keep going.
	Skip,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum MultiTagArg {
	Reject,
	First,
}

/// Decoder flags shared by every command that reads items.
#[derive(clap::Args)]
pub struct DecodeArgs {
	/// Maximum nested list/map depth.
	#[arg(long = "max-depth", default_value_t = DecodeOptions::default().max_depth)]
	pub max_depth: u32,
	/// Handling of value objects with more than one populated tag.
	#[arg(long = "multi-tag", value_enum, default_value_t = MultiTagArg::Reject)]
	pub multi_tag: MultiTagArg,
}

impl DecodeArgs {
	pub(crate) fn options(&self) -> DecodeOptions {
		DecodeOptions {
			max_depth: self.max_depth,
			multi_tag: match self.multi_tag {
				MultiTagArg::Reject => MultiTagPolicy::Reject,
				MultiTagArg::First => MultiTagPolicy::FirstInTagOrder,
			},
		}
	}
}

/// Open a file, or stdin for `-`, detecting zstd compression.
pub(crate) fn open_input(path: &Path) -> Result<(Compression, Box<dyn BufRead>)> {
	if path == Path::new("-") {
		return open_reader(BufReader::new(io::stdin()));
	}
	open_reader(BufReader::new(File::open(path)?))
}

/// Open a file, or stdout when `path` is `None`, optionally zstd-compressed.
pub(crate) fn open_output(path: Option<&Path>, compression: Compression, level: i32) -> Result<OutputSink<Box<dyn Write>>> {
	let writer: Box<dyn Write> = match path {
		Some(path) => Box::new(BufWriter::new(File::create(path)?)),
		None => Box::new(BufWriter::new(io::stdout())),
	};
	OutputSink::new(writer, compression, level)
}

/// Display label for an input argument.
pub(crate) fn input_label(path: &Path) -> String {
	if path == Path::new("-") { "<stdin>".to_owned() } else { path.display().to_string() }
}

/// Print a pretty JSON report to stdout.
pub(crate) fn emit_json<T: Serialize>(payload: &T) -> Result<()> {
	let text = serde_json::to_string_pretty(payload).map_err(CodecError::Encode)?;
	println!("{text}");
	Ok(())
}
