//! Dynamically typed attribute values.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::error::{RegistryError, Result};
use crate::key::RecordId;

/// The value of a record attribute read or written by name.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
	/// Absent value.
	#[default]
	Null,
	/// Boolean value.
	Bool(bool),
	/// Integer value.
	Int(i64),
	/// Floating point value.
	Float(f64),
	/// String value.
	String(String),
	/// Sequence of values.
	List(Vec<Value>),
}

impl Value {
	/// Returns true for [`Value::Null`].
	pub fn is_null(&self) -> bool {
		matches!(self, Value::Null)
	}

	/// Returns the boolean value if this is a `Bool` variant.
	pub fn as_bool(&self) -> Option<bool> {
		match self {
			Value::Bool(v) => Some(*v),
			_ => None,
		}
	}

	/// Returns the integer value if this is an `Int` variant.
	pub fn as_int(&self) -> Option<i64> {
		match self {
			Value::Int(v) => Some(*v),
			_ => None,
		}
	}

	/// Returns the string value if this is a `String` variant.
	pub fn as_str(&self) -> Option<&str> {
		match self {
			Value::String(v) => Some(v),
			_ => None,
		}
	}

	/// Interprets the value as a foreign id.
	///
	/// Strings and integers name a record; everything else does not.
	pub fn as_record_id(&self) -> Option<RecordId> {
		match self {
			Value::String(v) => Some(RecordId::from(v.as_str())),
			Value::Int(v) => Some(RecordId::from(*v)),
			_ => None,
		}
	}

	/// Returns the type name of this value.
	pub fn type_name(&self) -> &'static str {
		match self {
			Value::Null => "null",
			Value::Bool(_) => "bool",
			Value::Int(_) => "int",
			Value::Float(_) => "float",
			Value::String(_) => "string",
			Value::List(_) => "list",
		}
	}
}

/// Conversion of a field into a [`Value`].
pub trait ToValue {
	/// Returns the attribute value of `self`.
	fn to_value(&self) -> Value;
}

/// Conversion of a [`Value`] back into a field.
pub trait FromValue: Sized {
	/// Type name reported when the conversion fails.
	const EXPECTED: &'static str;

	/// Converts `value`, handing it back unchanged on a type mismatch.
	fn from_value(value: Value) -> std::result::Result<Self, Value>;
}

/// Converts `value` for the named attribute, reporting mismatches as
/// [`RegistryError::AttributeType`].
pub fn decode<T: FromValue>(attribute: &str, value: Value) -> Result<T> {
	T::from_value(value).map_err(|found| RegistryError::AttributeType {
		attribute: attribute.to_owned(),
		expected: T::EXPECTED,
		found: found.type_name(),
	})
}

impl ToValue for Value {
	fn to_value(&self) -> Value {
		self.clone()
	}
}

impl FromValue for Value {
	const EXPECTED: &'static str = "any";

	fn from_value(value: Value) -> std::result::Result<Self, Value> {
		Ok(value)
	}
}

impl ToValue for bool {
	fn to_value(&self) -> Value {
		Value::Bool(*self)
	}
}

impl FromValue for bool {
	const EXPECTED: &'static str = "bool";

	fn from_value(value: Value) -> std::result::Result<Self, Value> {
		match value {
			Value::Bool(v) => Ok(v),
			other => Err(other),
		}
	}
}

impl ToValue for str {
	fn to_value(&self) -> Value {
		Value::String(self.to_owned())
	}
}

impl ToValue for String {
	fn to_value(&self) -> Value {
		Value::String(self.clone())
	}
}

impl FromValue for String {
	const EXPECTED: &'static str = "string";

	fn from_value(value: Value) -> std::result::Result<Self, Value> {
		match value {
			Value::String(v) => Ok(v),
			other => Err(other),
		}
	}
}

impl ToValue for Cow<'_, str> {
	fn to_value(&self) -> Value {
		Value::String(self.to_string())
	}
}

impl FromValue for Cow<'static, str> {
	const EXPECTED: &'static str = "string";

	fn from_value(value: Value) -> std::result::Result<Self, Value> {
		String::from_value(value).map(Cow::Owned)
	}
}

impl ToValue for RecordId {
	fn to_value(&self) -> Value {
		Value::String(self.as_str().to_owned())
	}
}

impl FromValue for RecordId {
	const EXPECTED: &'static str = "record id";

	fn from_value(value: Value) -> std::result::Result<Self, Value> {
		value.as_record_id().ok_or(value)
	}
}

impl ToValue for f64 {
	fn to_value(&self) -> Value {
		Value::Float(*self)
	}
}

impl FromValue for f64 {
	const EXPECTED: &'static str = "float";

	fn from_value(value: Value) -> std::result::Result<Self, Value> {
		match value {
			Value::Float(v) => Ok(v),
			Value::Int(v) => Ok(v as f64),
			other => Err(other),
		}
	}
}

impl ToValue for f32 {
	fn to_value(&self) -> Value {
		Value::Float(f64::from(*self))
	}
}

impl FromValue for f32 {
	const EXPECTED: &'static str = "float";

	fn from_value(value: Value) -> std::result::Result<Self, Value> {
		f64::from_value(value).map(|v| v as f32)
	}
}

impl<T: ToValue + ?Sized> ToValue for &T {
	fn to_value(&self) -> Value {
		(**self).to_value()
	}
}

impl<T: ToValue> ToValue for Option<T> {
	fn to_value(&self) -> Value {
		self.as_ref().map_or(Value::Null, ToValue::to_value)
	}
}

impl<T: FromValue> FromValue for Option<T> {
	const EXPECTED: &'static str = T::EXPECTED;

	fn from_value(value: Value) -> std::result::Result<Self, Value> {
		match value {
			Value::Null => Ok(None),
			other => T::from_value(other).map(Some),
		}
	}
}

impl<T: ToValue> ToValue for Vec<T> {
	fn to_value(&self) -> Value {
		Value::List(self.iter().map(ToValue::to_value).collect())
	}
}

impl<T: ToValue> ToValue for [T] {
	fn to_value(&self) -> Value {
		Value::List(self.iter().map(ToValue::to_value).collect())
	}
}

impl<T: FromValue> FromValue for Vec<T> {
	const EXPECTED: &'static str = "list";

	fn from_value(value: Value) -> std::result::Result<Self, Value> {
		let Value::List(items) = value else {
			return Err(value);
		};
		items.into_iter().map(T::from_value).collect()
	}
}

macro_rules! integer_values {
	($($ty:ty),* $(,)?) => {
		$(
			impl ToValue for $ty {
				fn to_value(&self) -> Value {
					Value::Int(i64::from(*self))
				}
			}

			impl FromValue for $ty {
				const EXPECTED: &'static str = stringify!($ty);

				fn from_value(value: Value) -> std::result::Result<Self, Value> {
					match value {
						Value::Int(v) => <$ty>::try_from(v).map_err(|_| Value::Int(v)),
						// Foreign ids are written as strings.
						Value::String(s) => s.parse::<$ty>().map_err(|_| Value::String(s)),
						other => Err(other),
					}
				}
			}
		)*
	};
}

integer_values!(u8, u16, u32, i8, i16, i32, i64);

macro_rules! value_from {
	($($ty:ty),* $(,)?) => {
		$(
			impl From<$ty> for Value {
				fn from(v: $ty) -> Self {
					v.to_value()
				}
			}
		)*
	};
}

value_from!(bool, u8, u16, u32, i8, i16, i32, i64, f32, f64, String, RecordId);

impl From<&str> for Value {
	fn from(v: &str) -> Self {
		Value::String(v.to_owned())
	}
}

impl<T: ToValue> From<Option<T>> for Value {
	fn from(v: Option<T>) -> Self {
		v.to_value()
	}
}
