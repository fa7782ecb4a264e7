use std::collections::HashMap;
use std::path::PathBuf;

use dynline::attr::{Item, ItemDecoder, Result, Tag, Value};
use serde::Serialize;
use tracing::warn;

use crate::cmd::util::{DecodeArgs, ErrorPolicy, emit_json, input_label, open_input};

#[derive(clap::Args)]
pub struct Args {
	/// Input JSON Lines file, `-` for stdin. zstd input is detected.
	#[arg(default_value = "-")]
	pub input: PathBuf,
	/// Print the report as JSON.
	#[arg(long)]
	pub json: bool,
	/// Stop at the first malformed item or skip it with a warning.
	#[arg(long, value_enum, default_value_t = ErrorPolicy::Stop)]
	pub errors: ErrorPolicy,
	#[command(flatten)]
	pub decode: DecodeArgs,
}

#[derive(Debug, Default)]
struct TagStats {
	items: u64,
	failed: u64,
	attributes: u64,
	values: u64,
	max_depth: u32,
	tags: HashMap<&'static str, u64>,
}

#[derive(Serialize)]
struct StatsJson {
	input: String,
	compression: &'static str,
	items: u64,
	failed: u64,
	attributes: u64,
	values: u64,
	max_depth: u32,
	tags: Vec<TagCountJson>,
}

#[derive(Serialize)]
struct TagCountJson {
	tag: &'static str,
	count: u64,
}

/// Print item, attribute, and per-tag counts over all nesting levels.
pub fn run(args: Args) -> Result<()> {
	let (compression, reader) = open_input(&args.input)?;
	let mut decoder = ItemDecoder::with_options(reader, args.decode.options());

	let mut stats = TagStats::default();
	loop {
		match decoder.read_item() {
			Ok(Some(item)) => {
				stats.items += 1;
				stats.attributes += item.len() as u64;
				tally_item(&item, 0, &mut stats);
			}
			Ok(None) => break,
			Err(err) if err.is_item_error() && args.errors == ErrorPolicy::Skip => {
				warn!(line = decoder.line(), kind = err.kind(), "skipping item: {err}");
				stats.failed += 1;
			}
			Err(err) => return Err(err),
		}
	}

	let mut entries: Vec<_> = stats.tags.iter().map(|(tag, count)| (*tag, *count)).collect();
	entries.sort_by(|left, right| right.1.cmp(&left.1).then_with(|| left.0.cmp(right.0)));

	if args.json {
		return emit_json(&StatsJson {
			input: input_label(&args.input),
			compression: compression.as_str(),
			items: stats.items,
			failed: stats.failed,
			attributes: stats.attributes,
			values: stats.values,
			max_depth: stats.max_depth,
			tags: entries.into_iter().map(|(tag, count)| TagCountJson { tag, count }).collect(),
		});
	}

	println!("input: {}", input_label(&args.input));
	println!("compression: {}", compression.as_str());
	println!("items: {}", stats.items);
	println!("failed: {}", stats.failed);
	println!("attributes: {}", stats.attributes);
	println!("values: {}", stats.values);
	println!("max_depth: {}", stats.max_depth);
	println!("tags:");
	for (tag, count) in entries {
		println!("  {tag}: {count}");
	}

	Ok(())
}

fn tally_item(item: &Item, depth: u32, stats: &mut TagStats) {
	for value in item.values() {
		tally_value(value, depth, stats);
	}
}

fn tally_value(value: &Value, depth: u32, stats: &mut TagStats) {
	stats.values += 1;
	let label = value.tag().map_or("unset", Tag::as_str);
	*stats.tags.entry(label).or_insert(0) += 1;

	match value {
		Value::L(values) => {
			stats.max_depth = stats.max_depth.max(depth + 1);
			for element in values {
				tally_value(element, depth + 1, stats);
			}
		}
		Value::M(item) => {
			stats.max_depth = stats.max_depth.max(depth + 1);
			tally_item(item, depth + 1, stats);
		}
		_ => {}
	}
}

#[cfg(test)]
mod tests {
	use dynline::attr::{Item, Value};

	use super::{TagStats, tally_item};

	#[test]
	fn tally_counts_nested_values_and_depth() {
		let item = Item::from([
			("id".to_owned(), Value::n("1")),
			(
				"list".to_owned(),
				Value::L(vec![Value::s("a"), Value::M(Item::from([("x".to_owned(), Value::Unset)]))]),
			),
		]);

		let mut stats = TagStats::default();
		tally_item(&item, 0, &mut stats);

		assert_eq!(stats.values, 5);
		assert_eq!(stats.max_depth, 2);
		assert_eq!(stats.tags.get("N"), Some(&1));
		assert_eq!(stats.tags.get("L"), Some(&1));
		assert_eq!(stats.tags.get("M"), Some(&1));
		assert_eq!(stats.tags.get("S"), Some(&1));
		assert_eq!(stats.tags.get("unset"), Some(&1));
	}
}
