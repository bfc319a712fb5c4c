//! Record identifiers and indifferent key lookup.

use std::borrow::{Borrow, Cow};
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Identifier of a static record.
///
/// Ids are normalized to their string form on construction, so `1`, `"1"` and
/// `'1'` all name the same record. Cloning is cheap.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordId(Arc<str>);

impl RecordId {
	/// Creates an id from anything string-like.
	pub fn new(id: impl Into<Arc<str>>) -> Self {
		Self(id.into())
	}

	/// Returns the id as a string slice.
	#[inline]
	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl Borrow<str> for RecordId {
	fn borrow(&self) -> &str {
		&self.0
	}
}

impl AsRef<str> for RecordId {
	fn as_ref(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for RecordId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl fmt::Debug for RecordId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "RecordId({:?})", &*self.0)
	}
}

impl From<&str> for RecordId {
	fn from(id: &str) -> Self {
		Self(Arc::from(id))
	}
}

impl From<String> for RecordId {
	fn from(id: String) -> Self {
		Self(Arc::from(id))
	}
}

impl From<Cow<'_, str>> for RecordId {
	fn from(id: Cow<'_, str>) -> Self {
		Self(Arc::from(id))
	}
}

impl From<&RecordId> for RecordId {
	fn from(id: &RecordId) -> Self {
		id.clone()
	}
}

impl From<char> for RecordId {
	fn from(id: char) -> Self {
		Self(Arc::from(id.encode_utf8(&mut [0; 4]) as &str))
	}
}

impl Serialize for RecordId {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.serialize_str(&self.0)
	}
}

impl<'de> Deserialize<'de> for RecordId {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		String::deserialize(deserializer).map(Self::from)
	}
}

/// A value usable as a registry lookup key.
///
/// Every representation of the same token yields the same key string, which
/// is what makes lookups indifferent to how the caller spells an id.
pub trait RecordKey {
	/// Returns the normalized key string.
	fn record_key(&self) -> Cow<'_, str>;
}

impl RecordKey for str {
	fn record_key(&self) -> Cow<'_, str> {
		Cow::Borrowed(self)
	}
}

impl RecordKey for String {
	fn record_key(&self) -> Cow<'_, str> {
		Cow::Borrowed(self)
	}
}

impl RecordKey for Cow<'_, str> {
	fn record_key(&self) -> Cow<'_, str> {
		Cow::Borrowed(self)
	}
}

impl RecordKey for RecordId {
	fn record_key(&self) -> Cow<'_, str> {
		Cow::Borrowed(&self.0)
	}
}

impl RecordKey for char {
	fn record_key(&self) -> Cow<'_, str> {
		Cow::Owned(self.to_string())
	}
}

impl<K: RecordKey + ?Sized> RecordKey for &K {
	fn record_key(&self) -> Cow<'_, str> {
		(**self).record_key()
	}
}

macro_rules! integer_keys {
	($($ty:ty),* $(,)?) => {
		$(
			impl RecordKey for $ty {
				fn record_key(&self) -> Cow<'_, str> {
					Cow::Owned(self.to_string())
				}
			}

			impl From<$ty> for RecordId {
				fn from(id: $ty) -> Self {
					Self(Arc::from(id.to_string()))
				}
			}
		)*
	};
}

integer_keys!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);
