//! Per-type record registry.
//!
//! A [`Registry`] is built once, usually inside a `LazyLock`, and queried
//! through shared references afterwards:
//!
//! ```rust,ignore
//! static COLORS: LazyLock<Registry<Color>> = LazyLock::new(|| {
//!     Registry::<Color>::builder("Color")
//!         .record("red")
//!         .record_with("blue", |c| c.hex = "#0000ff".into())
//!         .build_or_panic()
//! });
//! ```

mod builder;

use indexmap::IndexMap;
use rustc_hash::{FxBuildHasher, FxHashSet};
use serde::{Serialize, Serializer};

pub use builder::RegistryBuilder;

use crate::error::{RegistryError, Result};
use crate::key::{RecordId, RecordKey};
use crate::record::{Attributes, StaticRecord};
use crate::value::Value;


/// Ordered, uniquely keyed collection of the records of one type.
pub struct Registry<R> {
	label: &'static str,
	records: IndexMap<RecordId, R, FxBuildHasher>,
}

impl<R> Registry<R> {
	/// Returns the registry label.
	#[inline]
	pub fn label(&self) -> &'static str {
		self.label
	}
}

impl<R: StaticRecord> Registry<R> {
	/// Creates an empty registry. `label` names it in errors and logs.
	pub fn new(label: &'static str) -> Self {
		Self {
			label,
			records: IndexMap::default(),
		}
	}

	/// Returns a builder for a registry with the given label.
	pub fn builder(label: &'static str) -> RegistryBuilder<R> {
		RegistryBuilder::new(label)
	}

	/// Registers a record with default attributes.
	pub fn insert(&mut self, id: impl Into<RecordId>) -> Result<&R> {
		self.try_register(id, |_| Ok(()))
	}

	/// Constructs a record, runs `init` on it, then registers it.
	///
	/// Fails with [`RegistryError::DuplicateId`] if the id is taken; `init` is
	/// not run in that case.
	pub fn register(&mut self, id: impl Into<RecordId>, init: impl FnOnce(&mut R)) -> Result<&R> {
		self.try_register(id, |record| {
			init(record);
			Ok(())
		})
	}

	/// Like [`register`](Self::register), with a fallible `init`.
	///
	/// Nothing is inserted when `init` fails.
	pub fn try_register(
		&mut self,
		id: impl Into<RecordId>,
		init: impl FnOnce(&mut R) -> Result<()>,
	) -> Result<&R> {
		let id = id.into();
		if self.records.contains_key(id.as_str()) {
			return Err(RegistryError::DuplicateId {
				registry: self.label,
				id,
			});
		}

		let mut record = R::new(id.clone());
		init(&mut record)?;

		tracing::trace!(registry = self.label, id = %id, "registered static record");
		let (index, _) = self.records.insert_full(id, record);
		Ok(&self.records[index])
	}

	/// Finds a record, failing with [`RegistryError::RecordNotFound`] on a miss.
	pub fn find(&self, id: impl RecordKey) -> Result<&R> {
		let key = id.record_key();
		self.records
			.get(&*key)
			.ok_or_else(|| RegistryError::RecordNotFound {
				registry: self.label,
				id: RecordId::from(key),
			})
	}

	/// Finds a record, returning `None` on a miss.
	#[inline]
	pub fn find_by_id(&self, id: impl RecordKey) -> Option<&R> {
		self.records.get(&*id.record_key())
	}

	/// Returns true if a record with this id exists.
	#[inline]
	pub fn contains(&self, id: impl RecordKey) -> bool {
		self.records.contains_key(&*id.record_key())
	}

	/// Returns every record in registration order.
	pub fn all(&self) -> Vec<&R> {
		self.records.values().collect()
	}

	/// Returns the records whose id is in `ids`.
	///
	/// The result follows registration order, not the order of `ids`. Ids with
	/// no record are ignored.
	pub fn where_ids<I>(&self, ids: I) -> Vec<&R>
	where
		I: IntoIterator,
		I::Item: RecordKey,
	{
		let wanted: FxHashSet<String> = ids
			.into_iter()
			.map(|id| id.record_key().into_owned())
			.collect();
		if wanted.is_empty() {
			return Vec::new();
		}
		self.records
			.iter()
			.filter(|(id, _)| wanted.contains(id.as_str()))
			.map(|(_, record)| record)
			.collect()
	}

	/// Projects `attribute` across every record, in registration order.
	///
	/// The attribute is checked against [`Attributes::ATTRIBUTES`] before any
	/// record is read, so a failure never yields partial output.
	pub fn pluck(&self, attribute: &str) -> Result<Vec<Value>>
	where
		R: Attributes,
	{
		if !R::has_attribute(attribute) {
			return Err(RegistryError::UnknownAttribute {
				owner: self.label,
				attribute: attribute.to_owned(),
			});
		}
		Ok(self
			.records
			.values()
			.map(|record| record.read_attribute(attribute).unwrap_or_default())
			.collect())
	}

	/// Returns the ids in registration order.
	pub fn ids(&self) -> impl Iterator<Item = &RecordId> + '_ {
		self.records.keys()
	}

	/// Returns an iterator over records in registration order.
	#[inline]
	pub fn iter(&self) -> impl Iterator<Item = &R> + '_ {
		self.records.values()
	}

	/// Returns the number of records.
	#[inline]
	pub fn len(&self) -> usize {
		self.records.len()
	}

	/// Returns true if no record has been registered.
	#[inline]
	pub fn is_empty(&self) -> bool {
		self.records.is_empty()
	}
}

impl<'a, R> IntoIterator for &'a Registry<R> {
	type Item = &'a R;
	type IntoIter = indexmap::map::Values<'a, RecordId, R>;

	fn into_iter(self) -> Self::IntoIter {
		self.records.values()
	}
}

impl<R> std::fmt::Debug for Registry<R> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Registry")
			.field("label", &self.label)
			.field("ids", &self.records.keys().collect::<Vec<_>>())
			.finish()
	}
}

/// Serializes as the ordered sequence of records.
impl<R: Serialize> Serialize for Registry<R> {
	fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
		serializer.collect_seq(self.records.values())
	}
}
