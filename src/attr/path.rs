use std::fmt;

use crate::attr::Tag;

/// One step from the item root to a nested value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathStep {
	/// Attribute or map key.
	Key(String),
	/// Tag slot inside a value object.
	Tag(Tag),
	/// Zero-based list or set element.
	Index(usize),
}

/// Location of a value inside an item, rendered like `k.L[1].BS[0]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttrPath {
	/// Ordered steps from the item root.
	pub steps: Vec<PathStep>,
}

impl AttrPath {
	pub(crate) fn push(&mut self, step: PathStep) {
		self.steps.push(step);
	}

	pub(crate) fn pop(&mut self) {
		self.steps.pop();
	}

	pub(crate) fn with(&self, step: PathStep) -> Self {
		let mut out = self.clone();
		out.push(step);
		out
	}

	/// Number of list/map levels entered so far.
	pub(crate) fn depth(&self) -> u32 {
		let nested = self.steps.iter().filter(|step| matches!(step, PathStep::Tag(Tag::L | Tag::M))).count();
		u32::try_from(nested).unwrap_or(u32::MAX)
	}
}

impl fmt::Display for AttrPath {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if self.steps.is_empty() {
			return f.write_str("<item>");
		}

		for (idx, step) in self.steps.iter().enumerate() {
			match step {
				PathStep::Key(key) if is_plain_key(key) => {
					if idx > 0 {
						f.write_str(".")?;
					}
					f.write_str(key)?;
				}
				PathStep::Key(key) => {
					let quoted = serde_json::to_string(key).map_err(|_| fmt::Error)?;
					write!(f, "[{quoted}]")?;
				}
				PathStep::Tag(tag) => {
					if idx > 0 {
						f.write_str(".")?;
					}
					f.write_str(tag.as_str())?;
				}
				PathStep::Index(index) => write!(f, "[{index}]")?,
			}
		}
		Ok(())
	}
}

fn is_plain_key(key: &str) -> bool {
	!key.is_empty() && key.bytes().all(|byte| byte.is_ascii_alphanumeric() || byte == b'_' || byte == b'-')
}
