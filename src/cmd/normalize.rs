use std::path::PathBuf;

use dynline::attr::{Compression, EncodeOptions, ItemDecoder, ItemEncoder, Result, TagLayout};
use tracing::{debug, warn};

use crate::cmd::util::{DecodeArgs, ErrorPolicy, input_label, open_input, open_output};

#[derive(clap::Args)]
pub struct Args {
	/// Input JSON Lines file, `-` for stdin. zstd input is detected.
	#[arg(default_value = "-")]
	pub input: PathBuf,
	/// Output file; stdout when omitted.
	#[arg(long, short)]
	pub output: Option<PathBuf>,
	/// Emit only the populated tag of each value.
	#[arg(long)]
	pub compact: bool,
	/// zstd-compress the output.
	#[arg(long)]
	pub zstd: bool,
	/// zstd compression level used with `--zstd`.
	#[arg(long = "zstd-level", default_value_t = 3)]
	pub zstd_level: i32,
	/// Stop at the first malformed item or skip it with a warning.
	#[arg(long, value_enum, default_value_t = ErrorPolicy::Stop)]
	pub errors: ErrorPolicy,
	#[command(flatten)]
	pub decode: DecodeArgs,
}

/// Re-encode every decodable item in canonical layout.
pub fn run(args: Args) -> Result<()> {
	let (compression, reader) = open_input(&args.input)?;
	debug!(input = %input_label(&args.input), compression = compression.as_str(), "normalize input opened");

	let out_compression = if args.zstd { Compression::Zstd } else { Compression::None };
	let sink = open_output(args.output.as_deref(), out_compression, args.zstd_level)?;
	let layout = if args.compact { TagLayout::Compact } else { TagLayout::Full };

	let mut decoder = ItemDecoder::with_options(reader, args.decode.options());
	let mut encoder = ItemEncoder::with_options(sink, EncodeOptions { layout });

	let mut written = 0_u64;
	let mut skipped = 0_u64;
	let mut failure = None;
	loop {
		match decoder.read_item() {
			Ok(Some(item)) => {
				encoder.write_item(&item)?;
				written += 1;
			}
			Ok(None) => break,
			Err(err) if err.is_item_error() && args.errors == ErrorPolicy::Skip => {
				warn!(line = decoder.line(), kind = err.kind(), "skipping item: {err}");
				skipped += 1;
			}
			Err(err) => {
				failure = Some(err);
				break;
			}
		}
	}

	// Output is finished on every path, including a stopped stream.
	let finished = encoder.into_inner().finish();
	if let Some(err) = failure {
		debug!(written, "normalize stopped");
		return Err(err);
	}
	finished?;

	if skipped > 0 {
		warn!(written, skipped, "normalize skipped malformed items");
	} else {
		debug!(written, "normalize finished");
	}
	Ok(())
}
