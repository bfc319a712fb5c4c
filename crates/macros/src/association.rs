use heck::ToUpperCamelCase;
use proc_macro2::TokenStream as TokenStream2;
use quote::{format_ident, quote};
use syn::{Attribute, Ident, LitStr, Path, Visibility};

use crate::record::{Access, RecordField};

/// One parsed `#[belongs_to_static(...)]` declaration.
pub(crate) struct Association {
	name: Ident,
	class: Path,
	foreign_key: String,
	registry: Option<Path>,
}

impl Association {
	/// Parses the attribute and checks the foreign key against the struct fields.
	pub fn parse(attr: &Attribute, fields: &[RecordField]) -> syn::Result<Self> {
		let mut name: Option<Ident> = None;
		let mut class: Option<Path> = None;
		let mut foreign_key: Option<LitStr> = None;
		let mut registry: Option<Path> = None;

		attr.parse_nested_meta(|meta| {
			if meta.path.is_ident("registry") {
				registry = Some(meta.value()?.parse()?);
			} else if meta.path.is_ident("class_name") {
				class = Some(meta.value()?.parse()?);
			} else if meta.path.is_ident("foreign_key") {
				foreign_key = Some(meta.value()?.parse()?);
			} else if !meta.input.peek(syn::Token![=]) {
				let Some(ident) = meta.path.get_ident() else {
					return Err(meta.error("association name must be an identifier"));
				};
				if name.is_some() {
					return Err(meta.error("association name given twice"));
				}
				name = Some(ident.clone());
			} else {
				return Err(meta.error("unknown belongs_to_static option"));
			}
			Ok(())
		})?;

		let Some(name) = name else {
			return Err(syn::Error::new_spanned(
				attr,
				"belongs_to_static needs an association name",
			));
		};

		let class = match class {
			Some(class) => class,
			None => {
				let camel = format_ident!("{}", name.to_string().to_upper_camel_case());
				Path::from(camel)
			}
		};

		let (foreign_key, fk_span) = match foreign_key {
			Some(lit) => (lit.value(), lit.span()),
			None => (format!("{name}_id"), name.span()),
		};

		match fields.iter().find(|f| f.name == foreign_key) {
			None => {
				return Err(syn::Error::new(
					fk_span,
					format!("foreign key `{foreign_key}` is not a field of this struct"),
				));
			}
			Some(field) if field.access != Access::ReadWrite => {
				return Err(syn::Error::new(
					fk_span,
					format!("foreign key `{foreign_key}` must be a writable attribute"),
				));
			}
			Some(_) => {}
		}

		Ok(Self {
			name,
			class,
			foreign_key,
			registry,
		})
	}

	/// Generates the association constructor, reader and writer.
	pub fn expand(&self, vis: &Visibility) -> TokenStream2 {
		let Self {
			name,
			class,
			foreign_key,
			registry,
		} = self;

		let name_str = name.to_string();
		let class_str = class
			.segments
			.last()
			.map(|s| s.ident.to_string())
			.unwrap_or_default();
		let association_fn = format_ident!("{}_association", name);
		let setter = format_ident!("set_{}", name);

		let target = match registry {
			Some(path) => quote! {
				{
					let registry: &'static ::refset_registry::Registry<#class> = &#path;
					registry
				}
			},
			None => quote! {
				<#class as ::refset_registry::Registered>::registry()
			},
		};

		let reader_doc = format!("Resolves `{name_str}` through the `{class_str}` registry.");
		let setter_doc = format!("Stores the id of `{name_str}` in `{foreign_key}`.");

		quote! {
			#[doc = concat!("Association descriptor for `", #name_str, "`.")]
			#vis fn #association_fn() -> ::refset_registry::BelongsToStatic<'static, #class> {
				::refset_registry::BelongsToStatic::from_parts(
					#name_str,
					#class_str,
					#foreign_key,
					#target,
				)
			}

			#[doc = #reader_doc]
			#vis fn #name(&self) -> ::core::option::Option<&'static #class> {
				Self::#association_fn().read(self)
			}

			#[doc = #setter_doc]
			#vis fn #setter(
				&mut self,
				value: ::core::option::Option<&#class>,
			) -> ::refset_registry::Result<()> {
				Self::#association_fn().write(self, value)
			}
		}
	}
}
