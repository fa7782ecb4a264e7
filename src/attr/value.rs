use std::collections::BTreeMap;

use crate::attr::Tag;

/// One table record: attribute name to value.
pub type Item = BTreeMap<String, Value>;

/// Tagged attribute value.
///
/// Exactly one case is active at a time. [`Value::Unset`] is the zero value
/// with no tag populated and maps to the all-null wire object; it is not the
/// same as [`Value::Null`], which is the explicit `NULL: true` marker.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Value {
	/// No tag populated.
	#[default]
	Unset,
	/// Binary blob (`B`).
	B(Vec<u8>),
	/// Boolean (`BOOL`).
	Bool(bool),
	/// Set of binary blobs (`BS`).
	Bs(Vec<Vec<u8>>),
	/// Ordered heterogeneous list (`L`).
	L(Vec<Value>),
	/// Nested map (`M`).
	M(Item),
	/// Decimal number carried as text (`N`).
	N(String),
	/// Set of number strings (`NS`).
	Ns(Vec<String>),
	/// Explicit null marker (`NULL`).
	Null,
	/// UTF-8 text (`S`).
	S(String),
	/// Set of strings (`SS`).
	Ss(Vec<String>),
}

impl Value {
	/// Build a string value.
	pub fn s(text: impl Into<String>) -> Self {
		Self::S(text.into())
	}

	/// Build a number value from its decimal text.
	pub fn n(number: impl Into<String>) -> Self {
		Self::N(number.into())
	}

	/// Build a binary value.
	pub fn b(bytes: impl Into<Vec<u8>>) -> Self {
		Self::B(bytes.into())
	}

	/// Wire tag of the populated case, `None` for [`Value::Unset`].
	pub fn tag(&self) -> Option<Tag> {
		let tag = match self {
			Self::Unset => return None,
			Self::B(_) => Tag::B,
			Self::Bool(_) => Tag::Bool,
			Self::Bs(_) => Tag::Bs,
			Self::L(_) => Tag::L,
			Self::M(_) => Tag::M,
			Self::N(_) => Tag::N,
			Self::Ns(_) => Tag::Ns,
			Self::Null => Tag::Null,
			Self::S(_) => Tag::S,
			Self::Ss(_) => Tag::Ss,
		};
		Some(tag)
	}

	/// True when no tag is populated.
	pub fn is_unset(&self) -> bool {
		matches!(self, Self::Unset)
	}
}

impl From<bool> for Value {
	fn from(value: bool) -> Self {
		Self::Bool(value)
	}
}

impl From<&str> for Value {
	fn from(value: &str) -> Self {
		Self::S(value.to_owned())
	}
}

impl From<String> for Value {
	fn from(value: String) -> Self {
		Self::S(value)
	}
}

impl From<Vec<u8>> for Value {
	fn from(value: Vec<u8>) -> Self {
		Self::B(value)
	}
}

impl From<Vec<Value>> for Value {
	fn from(value: Vec<Value>) -> Self {
		Self::L(value)
	}
}

impl From<Item> for Value {
	fn from(value: Item) -> Self {
		Self::M(value)
	}
}
