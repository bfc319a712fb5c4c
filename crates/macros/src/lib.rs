//! Procedural macros for refset static records.
//!
//! Provides `#[derive(StaticRecord)]`, which implements the record traits
//! and generates `belongs_to_static` accessors.

use proc_macro::TokenStream;

/// `#[belongs_to_static(...)]` attribute parsing and accessor generation.
mod association;
mod record;

/// Derives `StaticRecord` and `Attributes` for a struct with named fields.
///
/// Field attributes:
/// * `#[record(id)]` - marks the id field (defaults to the field named `id`)
/// * `#[record(readonly)]` - readable by name but not writable
/// * `#[record(skip)]` - not exposed as an attribute at all
///
/// Container attributes:
/// * `#[record(registry = PATH)]` - implements `Registered` for the type
/// * `#[belongs_to_static(name, registry = PATH, class_name = Type, foreign_key = "field")]`
///   - generates `name()`, `set_name(..)` and `name_association()`; every
///   option but `name` is optional
///
/// Every field other than the id must implement `Default`; exposed fields must
/// implement `ToValue`, writable ones `FromValue` as well.
///
/// ```ignore
/// #[derive(StaticRecord)]
/// #[record(registry = PRODUCTS)]
/// #[belongs_to_static(category, registry = CATEGORIES)]
/// pub struct Product {
///     id: RecordId,
///     #[record(readonly)]
///     name: &'static str,
///     category_id: Option<RecordId>,
/// }
/// ```
#[proc_macro_derive(StaticRecord, attributes(record, belongs_to_static))]
pub fn derive_static_record(input: TokenStream) -> TokenStream {
	record::derive_static_record(input)
}
