use std::path::PathBuf;
use std::process::ExitCode;

use dynline::attr::{ItemDecoder, Result};
use serde::Serialize;
use tracing::debug;

use crate::cmd::util::{DecodeArgs, emit_json, input_label, open_input};

#[derive(clap::Args)]
pub struct Args {
	/// Input JSON Lines file, `-` for stdin. zstd input is detected.
	#[arg(default_value = "-")]
	pub input: PathBuf,
	/// Print the report as JSON.
	#[arg(long)]
	pub json: bool,
	#[command(flatten)]
	pub decode: DecodeArgs,
}

#[derive(Serialize)]
struct ValidateJson {
	input: String,
	compression: &'static str,
	items: u64,
	ok: u64,
	failed: u64,
	failures: Vec<FailureJson>,
}

#[derive(Serialize)]
struct FailureJson {
	line: Option<u64>,
	kind: &'static str,
	message: String,
}

/// Decode the whole stream, reporting every malformed item.
///
/// Item errors never abort the scan; stream IO errors do.
pub fn run(args: Args) -> Result<ExitCode> {
	let (compression, reader) = open_input(&args.input)?;
	let mut decoder = ItemDecoder::with_options(reader, args.decode.options());

	let mut ok = 0_u64;
	let mut failures = Vec::new();
	loop {
		match decoder.read_item() {
			Ok(Some(_)) => ok += 1,
			Ok(None) => break,
			Err(err) if err.is_item_error() => failures.push(FailureJson {
				line: err.line(),
				kind: err.kind(),
				message: err.to_string(),
			}),
			Err(err) => return Err(err),
		}
	}
	debug!(ok, failed = failures.len(), lines = decoder.line(), "validate finished");

	let failed = failures.len() as u64;
	let code = if failures.is_empty() { ExitCode::SUCCESS } else { ExitCode::FAILURE };

	if args.json {
		emit_json(&ValidateJson {
			input: input_label(&args.input),
			compression: compression.as_str(),
			items: ok + failed,
			ok,
			failed,
			failures,
		})?;
		return Ok(code);
	}

	println!("input: {}", input_label(&args.input));
	println!("compression: {}", compression.as_str());
	println!("items: {}", ok + failed);
	println!("ok: {ok}");
	println!("failed: {failed}");
	if !failures.is_empty() {
		println!("failures:");
		for failure in &failures {
			println!("  {}", failure.message);
		}
	}

	Ok(code)
}
