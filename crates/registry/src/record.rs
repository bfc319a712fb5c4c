//! Traits implemented by record types.

use crate::error::{RegistryError, Result};
use crate::index::Registry;
use crate::key::{RecordId, RecordKey};
use crate::value::Value;

/// A type whose instances live in a [`Registry`].
///
/// Usually derived with `#[derive(StaticRecord)]`.
pub trait StaticRecord: Sized {
	/// Constructs a record with the given id and default attributes.
	fn new(id: RecordId) -> Self;

	/// Returns the record's id.
	fn id(&self) -> &RecordId;
}

/// Read and write access to attributes by name.
///
/// This is the capability association accessors and `pluck` rely on. The
/// owner of a `belongs_to_static` reference only needs this trait; it does not
/// have to be a static record itself.
pub trait Attributes {
	/// Type name used in error messages.
	const TYPE_NAME: &'static str;

	/// Names of every readable attribute, in declaration order.
	const ATTRIBUTES: &'static [&'static str];

	/// Returns true if `name` is a readable attribute.
	fn has_attribute(name: &str) -> bool {
		Self::ATTRIBUTES.contains(&name)
	}

	/// Reads an attribute, or `None` if the type has no such attribute.
	fn read_attribute(&self, name: &str) -> Option<Value>;

	/// Writes an attribute.
	///
	/// Fails with [`RegistryError::UnknownAttribute`] for names the type does not
	/// expose, [`RegistryError::ReadOnlyAttribute`] for the id and read-only
	/// fields, and [`RegistryError::AttributeType`] when the value does not fit.
	fn write_attribute(&mut self, name: &str, value: Value) -> Result<()>;
}

/// Builds the error for a write to an attribute `T` does not expose.
pub fn unknown_attribute<T: Attributes + ?Sized>(name: &str) -> RegistryError {
	RegistryError::UnknownAttribute {
		owner: T::TYPE_NAME,
		attribute: name.to_owned(),
	}
}

/// Builds the error for a write to a read-only attribute.
pub fn read_only_attribute(name: &str) -> RegistryError {
	RegistryError::ReadOnlyAttribute {
		attribute: name.to_owned(),
	}
}

/// A record type bound to its process-wide registry.
///
/// Implement by pointing [`registry`](Self::registry) at a `LazyLock` static,
/// or derive with `#[record(registry = PATH)]`. The provided methods forward to
/// that registry.
pub trait Registered: StaticRecord + 'static {
	/// Returns the registry holding every record of this type.
	fn registry() -> &'static Registry<Self>;

	/// Returns every record in registration order.
	fn all() -> Vec<&'static Self> {
		Self::registry().all()
	}

	/// Finds a record, failing with [`RegistryError::RecordNotFound`] on a miss.
	fn find(id: impl RecordKey) -> Result<&'static Self> {
		Self::registry().find(id)
	}

	/// Finds a record, returning `None` on a miss.
	fn find_by_id(id: impl RecordKey) -> Option<&'static Self> {
		Self::registry().find_by_id(id)
	}

	/// Returns the records whose id is in `ids`, in registration order.
	fn where_ids<I>(ids: I) -> Vec<&'static Self>
	where
		I: IntoIterator,
		I::Item: RecordKey,
	{
		Self::registry().where_ids(ids)
	}

	/// Projects an attribute across every record.
	fn pluck(attribute: &str) -> Result<Vec<Value>>
	where
		Self: Attributes,
	{
		Self::registry().pluck(attribute)
	}
}
