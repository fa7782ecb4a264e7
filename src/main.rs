#![allow(missing_docs)]

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod cmd;

#[derive(Parser)]
#[command(name = "dynline", about = "Table item JSON Lines tools")]
struct Cli {
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	/// Decode items and re-encode them in canonical tag layout.
	Normalize(cmd::normalize::Args),
	/// Decode every item and report the ones that fail.
	Validate(cmd::validate::Args),
	/// Count items, attributes, and tag usage.
	Stats(cmd::stats::Args),
}

fn main() -> ExitCode {
	init_tracing();

	match run() {
		Ok(code) => code,
		Err(err) => {
			eprintln!("error: {err}");
			ExitCode::FAILURE
		}
	}
}

fn run() -> dynline::attr::Result<ExitCode> {
	let cli = Cli::parse();

	match cli.command {
		Commands::Normalize(args) => cmd::normalize::run(args).map(|()| ExitCode::SUCCESS),
		Commands::Validate(args) => cmd::validate::run(args),
		Commands::Stats(args) => cmd::stats::run(args).map(|()| ExitCode::SUCCESS),
	}
}

fn init_tracing() {
	let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
	let _ = tracing_subscriber::fmt()
		.with_env_filter(env_filter)
		.with_target(false)
		.with_writer(std::io::stderr)
		.try_init();
}
