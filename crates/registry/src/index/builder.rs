use super::Registry;
use crate::error::{RegistryError, Result};
use crate::key::RecordId;
use crate::record::StaticRecord;

/// Builder for constructing a [`Registry`] in one expression.
///
/// Records are registered in call order. The first failure is kept and
/// reported by [`build`](Self::build); later records are skipped.
///
/// # Example
///
/// ```rust,ignore
/// let colors = Registry::<Color>::builder("Color")
///     .record("red")
///     .record_with("blue", |c| c.hex = "#0000ff".into())
///     .build()?;
/// ```
pub struct RegistryBuilder<R: StaticRecord> {
	registry: Registry<R>,
	error: Option<RegistryError>,
	skipped: usize,
}

impl<R: StaticRecord> RegistryBuilder<R> {
	/// Creates a new builder with the given label for error messages.
	pub fn new(label: &'static str) -> Self {
		Self {
			registry: Registry::new(label),
			error: None,
			skipped: 0,
		}
	}

	/// Adds a record with default attributes.
	pub fn record(self, id: impl Into<RecordId>) -> Self {
		self.try_record_with(id, |_| Ok(()))
	}

	/// Adds a record initialized by `init`.
	pub fn record_with(self, id: impl Into<RecordId>, init: impl FnOnce(&mut R)) -> Self {
		self.try_record_with(id, |record| {
			init(record);
			Ok(())
		})
	}

	/// Adds a record initialized by a fallible `init`.
	pub fn try_record_with(
		mut self,
		id: impl Into<RecordId>,
		init: impl FnOnce(&mut R) -> Result<()>,
	) -> Self {
		if self.error.is_some() {
			self.skipped += 1;
			return self;
		}
		if let Err(e) = self.registry.try_register(id, init) {
			self.error = Some(e);
		}
		self
	}

	/// Finishes the registry, or returns the first registration error.
	pub fn build(self) -> Result<Registry<R>> {
		if let Some(e) = self.error {
			if self.skipped > 0 {
				tracing::warn!(
					registry = self.registry.label(),
					skipped = self.skipped,
					"static registry build aborted; later records skipped"
				);
			}
			return Err(e);
		}
		tracing::debug!(
			registry = self.registry.label(),
			records = self.registry.len(),
			"built static registry"
		);
		Ok(self.registry)
	}

	/// Finishes the registry, panicking on the first registration error.
	///
	/// Intended for `LazyLock` initializers, where a duplicate id is a
	/// definition bug that must surface as soon as the registry is touched.
	///
	/// # Panics
	///
	/// Panics if any record failed to register.
	pub fn build_or_panic(self) -> Registry<R> {
		let label = self.registry.label();
		match self.build() {
			Ok(registry) => registry,
			Err(e) => panic!("static registry {label}: {e}"),
		}
	}
}
