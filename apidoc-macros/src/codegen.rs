//! Code generation for `Model` implementations.
//!
//! Object and enum descriptors are built once per type inside a function-local
//! `OnceLock`. Field types are referenced as `fn` pointers, never called here,
//! so a type can mention itself without recursing while its descriptor is
//! being initialized.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{Field, Ident, Type};

use crate::parse::FieldConfig;
use crate::rename::RenameRule;

/// Strips the `r#` prefix from raw identifiers (`r#type` becomes `type`).
pub fn strip_raw_prefix(ident: &str) -> &str {
    ident.strip_prefix("r#").unwrap_or(ident)
}

/// `Some("...")` or `None` as a `Option<&'static str>` expression.
fn optional_str(value: Option<&str>) -> TokenStream {
    match value {
        Some(text) => quote! { ::core::option::Option::Some(#text) },
        None => quote! { ::core::option::Option::None },
    }
}

/// The `FieldDescriptor` builder chain for one named field.
pub fn field_descriptor(
    field: &Field,
    config: &FieldConfig,
    rename_all: Option<RenameRule>,
) -> TokenStream {
    let declared = field
        .ident
        .as_ref()
        .map(|ident| strip_raw_prefix(&ident.to_string()).to_string())
        .unwrap_or_default();
    let ty = &field.ty;

    // Skipped fields never evaluate their type, so it need not implement Model.
    let descriptor_fn = if config.skip {
        quote! { ::apidoc::model::skipped_descriptor }
    } else {
        quote! { <#ty as ::apidoc::Model>::descriptor }
    };

    let mut chain = quote! {
        ::apidoc::model::FieldDescriptor::new(#declared, #descriptor_fn)
    };

    let renamed = config
        .rename
        .clone()
        .or_else(|| rename_all.map(|rule| rule.apply_to_field(&declared)))
        .filter(|name| *name != declared);
    if let Some(name) = renamed {
        chain = quote! { #chain.rename(#name) };
    }
    if config.skip {
        chain = quote! { #chain.skip() };
    }
    if config.flatten {
        chain = quote! { #chain.flatten() };
    }
    if config.required {
        chain = quote! { #chain.required() };
    }
    if let Some(example) = &config.example {
        chain = quote! { #chain.example(#example) };
    }
    if let Some(values) = &config.enum_values {
        chain = quote! { #chain.enum_values(#values) };
    }
    if let Some(description) = &config.description {
        chain = quote! { #chain.description(#description) };
    }

    chain
}

/// `impl Model` documenting the type as a definition with the given fields.
pub fn object_impl(
    ident: &Ident,
    name: &str,
    description: Option<&str>,
    fields: &[TokenStream],
) -> TokenStream {
    let description = optional_str(description);

    quote! {
        #[automatically_derived]
        impl ::apidoc::Model for #ident {
            fn descriptor() -> ::apidoc::TypeDescriptor {
                static DESCRIPTOR: ::std::sync::OnceLock<::apidoc::model::ObjectDescriptor> =
                    ::std::sync::OnceLock::new();
                ::apidoc::TypeDescriptor::Object(DESCRIPTOR.get_or_init(|| {
                    ::apidoc::model::ObjectDescriptor {
                        name: #name,
                        module_path: ::core::module_path!(),
                        description: #description,
                        fields: ::std::vec![#(#fields),*],
                    }
                }))
            }
        }
    }
}

/// `impl Model` documenting a unit-only enum as a string enumeration.
pub fn enum_impl(
    ident: &Ident,
    name: &str,
    description: Option<&str>,
    variants: &[String],
) -> TokenStream {
    let description = optional_str(description);

    quote! {
        #[automatically_derived]
        impl ::apidoc::Model for #ident {
            fn descriptor() -> ::apidoc::TypeDescriptor {
                static DESCRIPTOR: ::std::sync::OnceLock<::apidoc::model::EnumDescriptor> =
                    ::std::sync::OnceLock::new();
                ::apidoc::TypeDescriptor::Enum(DESCRIPTOR.get_or_init(|| {
                    ::apidoc::model::EnumDescriptor {
                        name: #name,
                        module_path: ::core::module_path!(),
                        description: #description,
                        variants: ::std::vec![#(#variants),*],
                    }
                }))
            }
        }
    }
}

/// `impl Model` delegating to the single wrapped type.
///
/// The inner descriptor is resolved through a re-entrancy guard, so newtypes
/// that reach each other terminate.
pub fn transparent_impl(ident: &Ident, inner: &Type) -> TokenStream {
    quote! {
        #[automatically_derived]
        impl ::apidoc::Model for #ident {
            fn descriptor() -> ::apidoc::TypeDescriptor {
                ::apidoc::model::transparent_descriptor::<Self>(
                    <#inner as ::apidoc::Model>::descriptor,
                )
            }
        }
    }
}

/// Formats generated code using prettyplease.
#[cfg(test)]
pub fn format_tokens(tokens: TokenStream) -> String {
    match syn::parse_file(&tokens.to_string()) {
        Ok(file) => prettyplease::unparse(&file),
        Err(_) => tokens.to_string(),
    }
}
