//! `#[derive(StaticRecord)]` implementation.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::ext::IdentExt;
use syn::{Data, DeriveInput, Fields, Ident, Path, parse_macro_input};

use crate::association::Association;

/// How a field is exposed through `Attributes`.
#[derive(Clone, Copy, PartialEq, Eq)]
pub(crate) enum Access {
	ReadWrite,
	ReadOnly,
	Hidden,
}

pub(crate) struct RecordField {
	pub ident: Ident,
	pub name: String,
	pub access: Access,
	pub is_id: bool,
}

pub fn derive_static_record(input: TokenStream) -> TokenStream {
	let input = parse_macro_input!(input as DeriveInput);
	expand(&input)
		.unwrap_or_else(syn::Error::into_compile_error)
		.into()
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
	if !input.generics.params.is_empty() {
		return Err(syn::Error::new_spanned(
			&input.generics,
			"StaticRecord cannot be derived for generic types",
		));
	}

	let Data::Struct(data) = &input.data else {
		return Err(syn::Error::new_spanned(
			input,
			"StaticRecord can only be derived for structs",
		));
	};
	let Fields::Named(named) = &data.fields else {
		return Err(syn::Error::new_spanned(
			&data.fields,
			"StaticRecord requires named fields",
		));
	};

	let mut fields = Vec::with_capacity(named.named.len());
	for field in &named.named {
		let Some(ident) = field.ident.clone() else {
			continue;
		};
		let mut access = Access::ReadWrite;
		let mut is_id = false;
		for attr in field.attrs.iter().filter(|a| a.path().is_ident("record")) {
			attr.parse_nested_meta(|meta| {
				if meta.path.is_ident("id") {
					is_id = true;
					Ok(())
				} else if meta.path.is_ident("readonly") {
					access = Access::ReadOnly;
					Ok(())
				} else if meta.path.is_ident("skip") {
					access = Access::Hidden;
					Ok(())
				} else {
					Err(meta.error("unknown record field attribute"))
				}
			})?;
		}
		let name = ident.unraw().to_string();
		fields.push(RecordField {
			ident,
			name,
			access,
			is_id,
		});
	}

	let id_index = resolve_id_field(input, &mut fields)?;

	let mut registry: Option<Path> = None;
	for attr in input.attrs.iter().filter(|a| a.path().is_ident("record")) {
		attr.parse_nested_meta(|meta| {
			if meta.path.is_ident("registry") {
				registry = Some(meta.value()?.parse()?);
				Ok(())
			} else {
				Err(meta.error("unknown record attribute"))
			}
		})?;
	}

	let associations = input
		.attrs
		.iter()
		.filter(|a| a.path().is_ident("belongs_to_static"))
		.map(|attr| Association::parse(attr, &fields))
		.collect::<syn::Result<Vec<_>>>()?;

	let ident = &input.ident;
	let vis = &input.vis;
	let type_name = ident.unraw().to_string();
	let id_ident = &fields[id_index].ident;

	let defaults = fields.iter().filter(|f| !f.is_id).map(|f| {
		let field = &f.ident;
		quote! { #field: ::core::default::Default::default() }
	});

	let exposed: Vec<_> = fields.iter().filter(|f| f.access != Access::Hidden).collect();
	let attribute_names = exposed.iter().map(|f| f.name.as_str());
	let read_arms = exposed.iter().map(|f| {
		let field = &f.ident;
		let name = &f.name;
		quote! {
			#name => ::core::option::Option::Some(::refset_registry::ToValue::to_value(&self.#field)),
		}
	});
	let write_arms = exposed.iter().map(|f| {
		let field = &f.ident;
		let name = &f.name;
		if f.access == Access::ReadWrite {
			quote! {
				#name => {
					self.#field = ::refset_registry::value::decode(name, value)?;
					::core::result::Result::Ok(())
				}
			}
		} else {
			quote! {
				#name => ::core::result::Result::Err(::refset_registry::read_only_attribute(name)),
			}
		}
	});

	let registered = registry.map(|path| {
		quote! {
			impl ::refset_registry::Registered for #ident {
				fn registry() -> &'static ::refset_registry::Registry<Self> {
					&#path
				}
			}
		}
	});

	let accessors = (!associations.is_empty()).then(|| {
		let methods = associations.iter().map(|a| a.expand(vis));
		quote! {
			impl #ident {
				#(#methods)*
			}
		}
	});

	Ok(quote! {
		impl ::refset_registry::StaticRecord for #ident {
			fn new(id: ::refset_registry::RecordId) -> Self {
				Self {
					#id_ident: id,
					#(#defaults,)*
				}
			}

			fn id(&self) -> &::refset_registry::RecordId {
				&self.#id_ident
			}
		}

		impl ::refset_registry::Attributes for #ident {
			const TYPE_NAME: &'static str = #type_name;
			const ATTRIBUTES: &'static [&'static str] = &[#(#attribute_names),*];

			fn read_attribute(&self, name: &str) -> ::core::option::Option<::refset_registry::Value> {
				match name {
					#(#read_arms)*
					_ => ::core::option::Option::None,
				}
			}

			#[allow(unused_variables, unreachable_code)]
			fn write_attribute(
				&mut self,
				name: &str,
				value: ::refset_registry::Value,
			) -> ::refset_registry::Result<()> {
				match name {
					#(#write_arms)*
					_ => ::core::result::Result::Err(::refset_registry::unknown_attribute::<Self>(name)),
				}
			}
		}

		#registered

		#accessors
	})
}

/// Picks the id field and forces it read-only.
///
/// An explicit `#[record(id)]` wins; otherwise the field named `id` is used.
fn resolve_id_field(input: &DeriveInput, fields: &mut [RecordField]) -> syn::Result<usize> {
	let marked: Vec<usize> = (0..fields.len()).filter(|&i| fields[i].is_id).collect();
	let index = match marked.as_slice() {
		[] => fields.iter().position(|f| f.name == "id").ok_or_else(|| {
			syn::Error::new_spanned(
				&input.ident,
				"StaticRecord needs an `id: RecordId` field or a field marked #[record(id)]",
			)
		})?,
		[index] => *index,
		[_, second, ..] => {
			return Err(syn::Error::new_spanned(
				&fields[*second].ident,
				"only one field may be marked #[record(id)]",
			));
		}
	};

	let id = &mut fields[index];
	if id.access == Access::Hidden {
		return Err(syn::Error::new_spanned(&id.ident, "the id field cannot be skipped"));
	}
	id.is_id = true;
	id.access = Access::ReadOnly;
	Ok(index)
}
