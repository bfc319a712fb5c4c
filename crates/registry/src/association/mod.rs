//! `belongs_to_static` references between record types.
//!
//! An association stores only the target's id in a foreign key attribute of
//! the owner and resolves it through the target registry on every read. The
//! owner never holds a pointer to the target record.

use std::borrow::Cow;

use heck::ToUpperCamelCase;

use crate::error::Result;
use crate::index::Registry;
use crate::key::RecordId;
use crate::record::{Attributes, StaticRecord, unknown_attribute};
use crate::value::Value;


/// Reader/writer pair for a foreign-id reference to records of `T`.
///
/// The target is given as an explicit registry reference. `class_name` is
/// carried for diagnostics only.
pub struct BelongsToStatic<'r, T> {
	name: Cow<'static, str>,
	class_name: Cow<'static, str>,
	foreign_key: Cow<'static, str>,
	target: &'r Registry<T>,
}

impl<'r, T: StaticRecord> BelongsToStatic<'r, T> {
	/// Declares an association called `name` resolving through `target`.
	///
	/// Defaults: `class_name` is the UpperCamelCase form of `name`,
	/// `foreign_key` is `"{name}_id"`.
	pub fn new(name: impl Into<Cow<'static, str>>, target: &'r Registry<T>) -> Self {
		let name = name.into();
		Self {
			class_name: Cow::Owned(name.to_upper_camel_case()),
			foreign_key: Cow::Owned(format!("{name}_id")),
			name,
			target,
		}
	}

	/// Declares an association whose options are all known up front.
	///
	/// Borrows the strings instead of deriving defaults, so it allocates
	/// nothing. Generated accessors use this.
	pub const fn from_parts(
		name: &'static str,
		class_name: &'static str,
		foreign_key: &'static str,
		target: &'r Registry<T>,
	) -> Self {
		Self {
			name: Cow::Borrowed(name),
			class_name: Cow::Borrowed(class_name),
			foreign_key: Cow::Borrowed(foreign_key),
			target,
		}
	}

	/// Overrides the target class name.
	pub fn with_class_name(mut self, class_name: impl Into<Cow<'static, str>>) -> Self {
		self.class_name = class_name.into();
		self
	}

	/// Overrides the foreign key attribute.
	pub fn with_foreign_key(mut self, foreign_key: impl Into<Cow<'static, str>>) -> Self {
		self.foreign_key = foreign_key.into();
		self
	}

	/// Returns the association name.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Returns the target class name.
	pub fn class_name(&self) -> &str {
		&self.class_name
	}

	/// Returns the foreign key attribute name.
	pub fn foreign_key(&self) -> &str {
		&self.foreign_key
	}

	/// Returns the registry targets are resolved through.
	pub fn target(&self) -> &'r Registry<T> {
		self.target
	}

	/// Verifies that `S` exposes the foreign key attribute.
	pub fn check_owner<S: Attributes>(&self) -> Result<()> {
		if S::has_attribute(&self.foreign_key) {
			Ok(())
		} else {
			Err(unknown_attribute::<S>(&self.foreign_key))
		}
	}

	/// Returns the foreign id stored on `owner`, if any.
	pub fn foreign_id<S: Attributes>(&self, owner: &S) -> Option<RecordId> {
		owner
			.read_attribute(&self.foreign_key)
			.and_then(|value| value.as_record_id())
	}

	/// Resolves the referenced record.
	///
	/// Returns `None` when no foreign id is stored or the id names no record in
	/// the target registry. Never fails.
	pub fn read<S: Attributes>(&self, owner: &S) -> Option<&'r T> {
		let id = self.foreign_id(owner)?;
		let target: &'r Registry<T> = self.target;
		let found = target.find_by_id(&id);
		if found.is_none() {
			tracing::debug!(
				association = %self.name,
				class_name = %self.class_name,
				registry = target.label(),
				foreign_id = %id,
				"dangling static association"
			);
		}
		found
	}

	/// Stores the id of `value` (or null) in the owner's foreign key.
	pub fn write<S: Attributes>(&self, owner: &mut S, value: Option<&T>) -> Result<()> {
		let id = value.map_or(Value::Null, |record| Value::from(record.id().clone()));
		owner.write_attribute(&self.foreign_key, id)
	}
}

impl<T> Clone for BelongsToStatic<'_, T> {
	fn clone(&self) -> Self {
		Self {
			name: self.name.clone(),
			class_name: self.class_name.clone(),
			foreign_key: self.foreign_key.clone(),
			target: self.target,
		}
	}
}

impl<T> std::fmt::Debug for BelongsToStatic<'_, T> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("BelongsToStatic")
			.field("name", &self.name)
			.field("class_name", &self.class_name)
			.field("foreign_key", &self.foreign_key)
			.field("target", &self.target.label())
			.finish()
	}
}
