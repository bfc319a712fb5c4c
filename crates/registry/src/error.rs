use thiserror::Error;

use crate::key::RecordId;

/// Errors surfaced by registries and attribute access.
///
/// All of these are definition or lookup contract violations; none are retried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
	/// A record was registered twice under the same id.
	#[error("duplicate id in {registry}: {id}")]
	DuplicateId { registry: &'static str, id: RecordId },
	/// A strict lookup named an id with no record.
	#[error("record not found in {registry}: {id}")]
	RecordNotFound { registry: &'static str, id: RecordId },
	/// The record type exposes no attribute of this name.
	#[error("unknown attribute reference on {owner}: {attribute}")]
	UnknownAttribute { owner: &'static str, attribute: String },
	/// The attribute exists but cannot be written.
	#[error("attribute is read-only: {attribute}")]
	ReadOnlyAttribute { attribute: String },
	/// A written value does not fit the attribute.
	#[error("attribute {attribute} expects {expected}, got {found}")]
	AttributeType {
		attribute: String,
		expected: &'static str,
		found: &'static str,
	},
}

pub type Result<T, E = RegistryError> = std::result::Result<T, E>;
