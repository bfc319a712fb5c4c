//! Static reference-data registries.
//!
//! This crate provides the building blocks for fixed, known-at-startup sets of
//! records (status codes, categories, roles) that are queried like model
//! instances but never persisted:
//! - [`Registry`]: per-type, insertion-ordered index with unique ids
//! - [`RecordId`] / [`RecordKey`]: ids and indifferent key lookup
//! - [`StaticRecord`] / [`Attributes`]: what a record type provides
//! - [`BelongsToStatic`]: by-id references resolved through a target registry
//! - [`Registered`]: class-level queries for a type bound to its registry
//!
//! With the `derive` feature, `#[derive(StaticRecord)]` generates the trait
//! impls and `belongs_to_static` accessors:
//!
//! ```rust,ignore
//! #[derive(Debug, StaticRecord)]
//! #[record(registry = COLORS)]
//! pub struct Color {
//!     id: RecordId,
//!     hex: String,
//! }
//!
//! static COLORS: LazyLock<Registry<Color>> = LazyLock::new(|| {
//!     Registry::<Color>::builder("Color")
//!         .record_with("red", |c| c.hex = "#ff0000".into())
//!         .record_with("blue", |c| c.hex = "#0000ff".into())
//!         .build_or_panic()
//! });
//!
//! #[derive(Debug, StaticRecord)]
//! #[belongs_to_static(color)]
//! pub struct Swatch {
//!     id: RecordId,
//!     color_id: Option<RecordId>,
//! }
//! ```

mod association;
mod error;
mod index;
mod key;
mod record;
pub mod value;

pub use association::BelongsToStatic;
pub use error::{RegistryError, Result};
pub use index::{Registry, RegistryBuilder};
pub use key::{RecordId, RecordKey};
pub use record::{Attributes, Registered, StaticRecord, read_only_attribute, unknown_attribute};
#[cfg(feature = "derive")]
pub use refset_macros::StaticRecord;
pub use value::{FromValue, ToValue, Value};
