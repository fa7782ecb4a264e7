/// Wire tag naming one value case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tag {
	/// Binary blob.
	B,
	/// Boolean.
	Bool,
	/// Binary set.
	Bs,
	/// List.
	L,
	/// Map.
	M,
	/// Number.
	N,
	/// Number set.
	Ns,
	/// Explicit null.
	Null,
	/// String.
	S,
	/// String set.
	Ss,
}

impl Tag {
	/// All tags in wire key order.
	pub const ALL: [Tag; 10] = [
		Tag::B,
		Tag::Bool,
		Tag::Bs,
		Tag::L,
		Tag::M,
		Tag::N,
		Tag::Ns,
		Tag::Null,
		Tag::S,
		Tag::Ss,
	];

	/// JSON key for this tag.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::B => "B",
			Self::Bool => "BOOL",
			Self::Bs => "BS",
			Self::L => "L",
			Self::M => "M",
			Self::N => "N",
			Self::Ns => "NS",
			Self::Null => "NULL",
			Self::S => "S",
			Self::Ss => "SS",
		}
	}

	/// Look up a tag by its exact JSON key.
	pub fn from_key(key: &str) -> Option<Self> {
		Self::ALL.into_iter().find(|tag| tag.as_str() == key)
	}

	/// Short description of the JSON type the tag expects.
	pub(crate) fn expected_json(self) -> &'static str {
		match self {
			Self::B => "base64 string",
			Self::Bool => "boolean",
			Self::Bs => "array of base64 strings",
			Self::L => "array of value objects",
			Self::M => "object of value objects",
			Self::N => "number string",
			Self::Ns => "array of number strings",
			Self::Null => "boolean",
			Self::S => "string",
			Self::Ss => "array of strings",
		}
	}
}

impl std::fmt::Display for Tag {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

#[cfg(test)]
mod tests {
	use super::Tag;

	#[test]
	fn wire_order_is_lexicographic_key_order() {
		let keys: Vec<_> = Tag::ALL.iter().map(|tag| tag.as_str()).collect();
		let mut sorted = keys.clone();
		sorted.sort_unstable();
		assert_eq!(keys, sorted);
	}

	#[test]
	fn from_key_is_case_sensitive() {
		assert_eq!(Tag::from_key("NS"), Some(Tag::Ns));
		assert_eq!(Tag::from_key("NULL"), Some(Tag::Null));
		assert_eq!(Tag::from_key("ns"), None);
		assert_eq!(Tag::from_key("X"), None);
	}
}
