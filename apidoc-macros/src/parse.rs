//! Attribute parsing for `#[derive(Model)]`.
//!
//! Both `#[serde(...)]` and `#[apidoc(...)]` attributes are read. Serde
//! attributes that do not affect the schema are skipped; unknown `apidoc`
//! attributes are an error.

use syn::{
    meta::ParseNestedMeta, parenthesized, Attribute, Error, Expr, ExprLit, Lit,
    LitStr, Meta, Result, Token,
};

use crate::rename::RenameRule;

/// Parsed container-level configuration.
#[derive(Debug, Default)]
pub struct ContainerConfig {
    /// Definition name override.
    pub rename: Option<String>,
    pub rename_all: Option<RenameRule>,
    /// `#[serde(transparent)]`: documented as the single field's type.
    pub transparent: bool,
    pub description: Option<String>,
}

impl ContainerConfig {
    /// Parse container configuration from a list of attributes.
    pub fn from_attrs(attrs: &[Attribute]) -> Result<Self> {
        let mut config = ContainerConfig {
            description: doc_comment(attrs),
            ..ContainerConfig::default()
        };

        for attr in attrs {
            if attr.path().is_ident("serde") {
                config.parse_serde_attr(attr)?;
            } else if attr.path().is_ident("apidoc") {
                config.parse_apidoc_attr(attr)?;
            }
        }

        Ok(config)
    }

    fn parse_serde_attr(&mut self, attr: &Attribute) -> Result<()> {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("rename") {
                if let Some(name) = serialized_name(&meta)? {
                    self.rename = Some(name.value());
                }
            } else if meta.path.is_ident("rename_all") {
                if let Some(rule) = serialized_name(&meta)? {
                    self.rename_all = Some(parse_rename_rule(&rule)?);
                }
            } else if meta.path.is_ident("transparent") {
                self.transparent = true;
            } else {
                skip_meta_value(&meta)?;
            }
            Ok(())
        })
    }

    fn parse_apidoc_attr(&mut self, attr: &Attribute) -> Result<()> {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("rename") {
                let value: LitStr = meta.value()?.parse()?;
                self.rename = Some(value.value());
            } else if meta.path.is_ident("rename_all") {
                let value: LitStr = meta.value()?.parse()?;
                self.rename_all = Some(parse_rename_rule(&value)?);
            } else if meta.path.is_ident("description") {
                let value: LitStr = meta.value()?.parse()?;
                self.description = Some(value.value());
            } else {
                return Err(meta.error(format!(
                    "unknown apidoc container attribute: `{}`",
                    path_name(&meta)
                )));
            }
            Ok(())
        })
    }
}

/// Parsed field (or enum variant) configuration.
#[derive(Debug, Default)]
pub struct FieldConfig {
    pub rename: Option<String>,
    pub skip: bool,
    pub flatten: bool,
    pub required: bool,
    /// Raw example text.
    pub example: Option<String>,
    /// `|`-separated allowed values.
    pub enum_values: Option<String>,
    pub description: Option<String>,
}

impl FieldConfig {
    /// Parse field configuration from a list of attributes.
    pub fn from_attrs(attrs: &[Attribute]) -> Result<Self> {
        let mut config = FieldConfig {
            description: doc_comment(attrs),
            ..FieldConfig::default()
        };

        for attr in attrs {
            if attr.path().is_ident("serde") {
                config.parse_serde_attr(attr)?;
            } else if attr.path().is_ident("apidoc") {
                config.parse_apidoc_attr(attr)?;
            }
        }

        Ok(config)
    }

    fn parse_serde_attr(&mut self, attr: &Attribute) -> Result<()> {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("rename") {
                if let Some(name) = serialized_name(&meta)? {
                    self.rename = Some(name.value());
                }
            } else if meta.path.is_ident("skip") || meta.path.is_ident("skip_serializing") {
                self.skip = true;
            } else if meta.path.is_ident("flatten") {
                self.flatten = true;
            } else {
                skip_meta_value(&meta)?;
            }
            Ok(())
        })
    }

    fn parse_apidoc_attr(&mut self, attr: &Attribute) -> Result<()> {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("rename") {
                let value: LitStr = meta.value()?.parse()?;
                self.rename = Some(value.value());
            } else if meta.path.is_ident("skip") {
                self.skip = true;
            } else if meta.path.is_ident("flatten") {
                self.flatten = true;
            } else if meta.path.is_ident("required") {
                self.required = true;
            } else if meta.path.is_ident("example") {
                self.example = Some(literal_text(&meta)?);
            } else if meta.path.is_ident("enum") {
                let value: LitStr = meta.value()?.parse()?;
                self.enum_values = Some(value.value());
            } else if meta.path.is_ident("description") {
                let value: LitStr = meta.value()?.parse()?;
                self.description = Some(value.value());
            } else {
                return Err(meta.error(format!(
                    "unknown apidoc field attribute: `{}`",
                    path_name(&meta)
                )));
            }
            Ok(())
        })
    }
}

/// Concatenated `///` doc comment lines, or `None` when there are none.
pub fn doc_comment(attrs: &[Attribute]) -> Option<String> {
    let lines: Vec<String> = attrs
        .iter()
        .filter(|attr| attr.path().is_ident("doc"))
        .filter_map(|attr| match &attr.meta {
            Meta::NameValue(name_value) => match &name_value.value {
                Expr::Lit(ExprLit {
                    lit: Lit::Str(text),
                    ..
                }) => Some(text.value()),
                _ => None,
            },
            _ => None,
        })
        .map(|line| line.strip_prefix(' ').unwrap_or(&line).to_string())
        .collect();

    let joined = lines.join("\n");
    let trimmed = joined.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// The serialized name of `rename = "..."` or `rename(serialize = "...")`.
fn serialized_name(meta: &ParseNestedMeta) -> Result<Option<LitStr>> {
    if meta.input.peek(Token![=]) {
        return Ok(Some(meta.value()?.parse()?));
    }

    let mut found: Option<LitStr> = None;
    meta.parse_nested_meta(|inner| {
        if inner.path.is_ident("serialize") {
            found = Some(inner.value()?.parse()?);
        } else {
            skip_meta_value(&inner)?;
        }
        Ok(())
    })?;
    Ok(found)
}

/// Consumes the value of a meta item this macro does not interpret.
fn skip_meta_value(meta: &ParseNestedMeta) -> Result<()> {
    if meta.input.peek(Token![=]) {
        let _: Expr = meta.value()?.parse()?;
    } else if meta.input.peek(syn::token::Paren) {
        let _content;
        parenthesized!(_content in meta.input);
    }
    Ok(())
}

fn parse_rename_rule(value: &LitStr) -> Result<RenameRule> {
    RenameRule::from_name(&value.value()).ok_or_else(|| {
        Error::new(
            value.span(),
            format!(
                "unknown rename rule `{}`. Expected one of: {}",
                value.value(),
                RenameRule::NAMES.join(", ")
            ),
        )
    })
}

/// A literal value as text: strings verbatim, numbers and booleans as written.
fn literal_text(meta: &ParseNestedMeta) -> Result<String> {
    let lit: Lit = meta.value()?.parse()?;
    match lit {
        Lit::Str(text) => Ok(text.value()),
        Lit::Int(int) => Ok(int.base10_digits().to_string()),
        Lit::Float(float) => Ok(float.base10_digits().to_string()),
        Lit::Bool(flag) => Ok(flag.value.to_string()),
        other => Err(Error::new(
            other.span(),
            "expected a string, number, or boolean literal",
        )),
    }
}

fn path_name(meta: &ParseNestedMeta) -> String {
    meta.path
        .get_ident()
        .map(|ident| ident.to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::{parse_quote, DeriveInput};

    fn container(input: DeriveInput) -> ContainerConfig {
        ContainerConfig::from_attrs(&input.attrs).unwrap()
    }

    fn field(input: DeriveInput) -> FieldConfig {
        let syn::Data::Struct(data) = input.data else {
            panic!("expected a struct");
        };
        let first = data.fields.iter().next().expect("one field");
        FieldConfig::from_attrs(&first.attrs).unwrap()
    }

    #[test]
    fn test_container_serde_and_docs() {
        let config = container(parse_quote! {
            /// A sellable item.
            ///
            /// Second paragraph.
            #[derive(Serialize)]
            #[serde(rename = "Item", rename_all = "camelCase", deny_unknown_fields)]
            struct Product { id: u64 }
        });

        assert_eq!(config.rename.as_deref(), Some("Item"));
        assert_eq!(config.rename_all, Some(RenameRule::Camel));
        assert_eq!(
            config.description.as_deref(),
            Some("A sellable item.\n\nSecond paragraph.")
        );
    }

    #[test]
    fn test_unknown_rename_rule_is_an_error() {
        let input: DeriveInput = parse_quote! {
            #[serde(rename_all = "Sentence case")]
            struct Product { id: u64 }
        };
        let err = ContainerConfig::from_attrs(&input.attrs).unwrap_err();
        assert!(err.to_string().contains("unknown rename rule"));
    }

    #[test]
    fn test_field_serde_attributes() {
        let config = field(parse_quote! {
            struct Product {
                #[serde(rename(serialize = "image_ids", deserialize = "images"), default)]
                #[serde(skip_serializing_if = "Vec::is_empty", with = "ids")]
                images: Vec<String>,
            }
        });
        assert_eq!(config.rename.as_deref(), Some("image_ids"));
        assert!(!config.skip);
    }

    #[test]
    fn test_field_skip_variants() {
        let skip = field(parse_quote! { struct A { #[serde(skip)] a: u8 } });
        let skip_serializing = field(parse_quote! { struct A { #[serde(skip_serializing)] a: u8 } });
        let skip_deserializing = field(parse_quote! { struct A { #[serde(skip_deserializing)] a: u8 } });
        let apidoc_skip = field(parse_quote! { struct A { #[apidoc(skip)] a: u8 } });

        assert!(skip.skip);
        assert!(skip_serializing.skip);
        assert!(!skip_deserializing.skip);
        assert!(apidoc_skip.skip);
    }

    #[test]
    fn test_field_apidoc_attributes() {
        let config = field(parse_quote! {
            struct Product {
                /// Product kind.
                #[apidoc(example = "Physical", enum = "Physical|Online", required)]
                kind: String,
            }
        });
        assert_eq!(config.example.as_deref(), Some("Physical"));
        assert_eq!(config.enum_values.as_deref(), Some("Physical|Online"));
        assert!(config.required);
        assert_eq!(config.description.as_deref(), Some("Product kind."));
    }

    #[test]
    fn test_numeric_example_literals() {
        let config = field(parse_quote! { struct A { #[apidoc(example = 5)] a: u8 } });
        assert_eq!(config.example.as_deref(), Some("5"));

        let config = field(parse_quote! { struct A { #[apidoc(example = 2.5)] a: f32 } });
        assert_eq!(config.example.as_deref(), Some("2.5"));

        let config = field(parse_quote! { struct A { #[apidoc(example = true)] a: bool } });
        assert_eq!(config.example.as_deref(), Some("true"));
    }

    #[test]
    fn test_explicit_description_overrides_doc_comment() {
        let config = field(parse_quote! {
            struct A {
                /// From the doc comment.
                #[apidoc(description = "Explicit")]
                a: u8,
            }
        });
        assert_eq!(config.description.as_deref(), Some("Explicit"));
    }

    #[test]
    fn test_unknown_apidoc_attribute_is_an_error() {
        let input: DeriveInput = parse_quote! {
            struct A { #[apidoc(minimum = 3)] a: u8 }
        };
        let syn::Data::Struct(data) = input.data else {
            unreachable!()
        };
        let first = data.fields.iter().next().unwrap();
        let err = FieldConfig::from_attrs(&first.attrs).unwrap_err();
        assert!(err.to_string().contains("unknown apidoc field attribute: `minimum`"));
    }
}
