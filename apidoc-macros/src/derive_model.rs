//! Implementation of the `#[derive(Model)]` macro.

use proc_macro2::{TokenStream, TokenTree};
use quote::ToTokens;
use syn::{parse2, Data, DataEnum, DataStruct, DeriveInput, Error, Fields, Ident, Result, Type};

use crate::codegen::{enum_impl, field_descriptor, object_impl, strip_raw_prefix, transparent_impl};
use crate::parse::{ContainerConfig, FieldConfig};

/// Main implementation for the `#[derive(Model)]` macro.
pub fn derive_model_impl(input: TokenStream) -> TokenStream {
    match derive_model_inner(input) {
        Ok(tokens) => tokens,
        Err(err) => err.to_compile_error(),
    }
}

fn derive_model_inner(input: TokenStream) -> Result<TokenStream> {
    let input: DeriveInput = parse2(input)?;

    if !input.generics.params.is_empty() {
        return Err(Error::new_spanned(
            &input.generics,
            "Model cannot be derived for generic types",
        ));
    }

    let config = ContainerConfig::from_attrs(&input.attrs)?;

    match &input.data {
        Data::Struct(data) => derive_struct(&input, data, &config),
        Data::Enum(data) => derive_enum(&input, data, &config),
        Data::Union(_) => Err(Error::new_spanned(
            &input.ident,
            "Model cannot be derived for unions",
        )),
    }
}

fn derive_struct(input: &DeriveInput, data: &DataStruct, config: &ContainerConfig) -> Result<TokenStream> {
    let ident = &input.ident;

    match &data.fields {
        Fields::Named(named) => {
            if config.transparent {
                let mut serialized = Vec::new();
                for field in &named.named {
                    if !FieldConfig::from_attrs(&field.attrs)?.skip {
                        serialized.push(field);
                    }
                }
                return match serialized.as_slice() {
                    [single] => transparent(ident, &single.ty),
                    _ => Err(Error::new_spanned(
                        ident,
                        "transparent models must have exactly one serialized field",
                    )),
                };
            }

            let fields = named
                .named
                .iter()
                .map(|field| {
                    let field_config = FieldConfig::from_attrs(&field.attrs)?;
                    Ok(field_descriptor(field, &field_config, config.rename_all))
                })
                .collect::<Result<Vec<_>>>()?;

            let name = config
                .rename
                .clone()
                .unwrap_or_else(|| strip_raw_prefix(&ident.to_string()).to_string());

            Ok(object_impl(ident, &name, config.description.as_deref(), &fields))
        }
        Fields::Unnamed(unnamed) if unnamed.unnamed.len() == 1 => {
            transparent(ident, &unnamed.unnamed[0].ty)
        }
        Fields::Unnamed(unnamed) => Err(Error::new_spanned(
            unnamed,
            "Model can only be derived for tuple structs with exactly one field",
        )),
        Fields::Unit => Err(Error::new_spanned(
            ident,
            "Model cannot be derived for unit structs",
        )),
    }
}

/// A transparent model whose inner type names the model itself has no finite
/// schema.
fn transparent(ident: &Ident, inner: &Type) -> Result<TokenStream> {
    if mentions_self(inner.to_token_stream(), ident) {
        return Err(Error::new_spanned(
            inner,
            "transparent models cannot contain themselves, use a struct with named fields",
        ));
    }
    Ok(transparent_impl(ident, inner))
}

fn mentions_self(tokens: TokenStream, ident: &Ident) -> bool {
    tokens.into_iter().any(|tree| match tree {
        TokenTree::Ident(name) => name == *ident || name == "Self",
        TokenTree::Group(group) => mentions_self(group.stream(), ident),
        _ => false,
    })
}

fn derive_enum(input: &DeriveInput, data: &DataEnum, config: &ContainerConfig) -> Result<TokenStream> {
    let ident = &input.ident;
    let mut variants = Vec::with_capacity(data.variants.len());

    for variant in &data.variants {
        if !matches!(variant.fields, Fields::Unit) {
            return Err(Error::new_spanned(
                variant,
                "Model can only be derived for enums whose variants are all unit variants",
            ));
        }

        let variant_config = FieldConfig::from_attrs(&variant.attrs)?;
        if variant_config.skip {
            continue;
        }

        let declared = strip_raw_prefix(&variant.ident.to_string()).to_string();
        let name = variant_config
            .rename
            .or_else(|| config.rename_all.map(|rule| rule.apply_to_variant(&declared)))
            .unwrap_or(declared);
        variants.push(name);
    }

    let name = config
        .rename
        .clone()
        .unwrap_or_else(|| strip_raw_prefix(&ident.to_string()).to_string());

    Ok(enum_impl(ident, &name, config.description.as_deref(), &variants))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::format_tokens;
    use quote::quote;

    #[test]
    fn test_derive_parses_basic_struct() {
        let input = quote! {
            pub struct Widget {
                #[apidoc(example = "5")]
                id: i64,
                name: String,
            }
        };

        let result = derive_model_impl(input);
        assert!(!result.to_string().contains("compile_error"));

        let formatted = format_tokens(result);
        assert!(formatted.contains("TypeDescriptor::Object"));
        assert!(formatted.contains(".example(\"5\")"));
    }

    #[test]
    fn test_derive_rejects_generics() {
        let input = quote! {
            struct Page<T> { items: Vec<T> }
        };
        let result = derive_model_impl(input).to_string();
        assert!(result.contains("compile_error"));
        assert!(result.contains("generic types"));
    }

    #[test]
    fn test_derive_rejects_lifetimes() {
        let input = quote! {
            struct View<'a> { name: &'a str }
        };
        assert!(derive_model_impl(input).to_string().contains("compile_error"));
    }

    #[test]
    fn test_derive_rejects_unit_struct() {
        let result = derive_model_impl(quote! { struct Marker; }).to_string();
        assert!(result.contains("unit structs"));
    }

    #[test]
    fn test_derive_rejects_unions() {
        let result = derive_model_impl(quote! { union Bits { a: u32, b: f32 } }).to_string();
        assert!(result.contains("unions"));
    }

    #[test]
    fn test_derive_rejects_data_enums() {
        let input = quote! {
            enum Shape { Circle { radius: f64 }, Square(f64) }
        };
        let result = derive_model_impl(input).to_string();
        assert!(result.contains("unit variants"));
    }

    #[test]
    fn test_derive_rejects_multi_field_tuple_struct() {
        let result = derive_model_impl(quote! { struct Pair(u8, u8); }).to_string();
        assert!(result.contains("exactly one field"));
    }

    #[test]
    fn test_newtype_is_transparent() {
        let formatted = format_tokens(derive_model_impl(quote! { struct WidgetId(u64); }));
        assert!(formatted.contains("transparent_descriptor::<Self>"));
        assert!(formatted.contains("<u64 as ::apidoc::Model>::descriptor"));
        assert!(!formatted.contains("OnceLock"));
    }

    #[test]
    fn test_derive_rejects_self_containing_newtype() {
        for input in [
            quote! { struct Tree(Vec<Tree>); },
            quote! { struct List(Option<Box<List>>); },
            quote! { struct Nested(std::collections::HashMap<String, Vec<Self>>); },
        ] {
            let result = derive_model_impl(input).to_string();
            assert!(result.contains("compile_error"));
            assert!(result.contains("cannot contain themselves"));
        }
    }

    #[test]
    fn test_derive_rejects_self_containing_transparent_struct() {
        let input = quote! {
            #[serde(transparent)]
            struct Forest {
                trees: Vec<Forest>,
            }
        };
        let result = derive_model_impl(input).to_string();
        assert!(result.contains("cannot contain themselves"));
    }

    #[test]
    fn test_self_containing_named_struct_is_allowed() {
        let result = derive_model_impl(quote! { struct Tree { children: Vec<Tree> } });
        assert!(!result.to_string().contains("compile_error"));
    }

    #[test]
    fn test_serde_transparent_struct() {
        let input = quote! {
            #[serde(transparent)]
            struct Tags {
                values: Vec<String>,
                #[serde(skip)]
                cache: Option<String>,
            }
        };
        let formatted = format_tokens(derive_model_impl(input));
        assert!(formatted.contains("<Vec<String> as ::apidoc::Model>::descriptor"));
    }

    #[test]
    fn test_enum_variants_follow_rename_rules() {
        let input = quote! {
            #[serde(rename_all = "snake_case")]
            enum Kind {
                Physical,
                OnlineOnly,
                #[serde(rename = "gift")]
                GiftCard,
                #[serde(skip)]
                Internal,
            }
        };
        let formatted = format_tokens(derive_model_impl(input));
        assert!(formatted.contains("\"physical\""));
        assert!(formatted.contains("\"online_only\""));
        assert!(formatted.contains("\"gift\""));
        assert!(!formatted.contains("\"internal\""));
    }

    #[test]
    fn test_container_rename_sets_definition_name() {
        let input = quote! {
            #[apidoc(rename = "Item")]
            struct Product { id: u64 }
        };
        let formatted = format_tokens(derive_model_impl(input));
        assert!(formatted.contains("name: \"Item\""));
    }

    #[test]
    fn test_unknown_apidoc_attribute_reports_error() {
        let input = quote! {
            struct Product {
                #[apidoc(minimum = 1)]
                id: u64,
            }
        };
        let result = derive_model_impl(input).to_string();
        assert!(result.contains("compile_error"));
        assert!(result.contains("minimum"));
    }
}
