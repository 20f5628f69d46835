//! Derive macro for describing Rust types to the `apidoc` Swagger generator.
//!
//! ## Examples
//!
//! ```ignore
//! use apidoc::Model;
//!
//! /// A sellable item.
//! #[derive(Model)]
//! #[serde(rename_all = "camelCase")]
//! pub struct Product {
//!     #[apidoc(example = "5", required)]
//!     pub id: u64,
//!     #[apidoc(example = "Physical", enum = "Physical|Online")]
//!     pub kind: String,
//!     #[serde(skip)]
//!     pub cache: Vec<u8>,
//! }
//! ```

use proc_macro::TokenStream;

mod codegen;
mod derive_model;
mod parse;
mod rename;

/// Derive macro implementing `apidoc::Model`.
///
/// Structs with named fields become definitions, single-field tuple structs
/// (and `#[serde(transparent)]` structs) document as their inner type, and
/// enums whose variants are all unit variants become string enumerations.
/// Generic types, unions, unit structs, and enums with data are rejected.
///
/// ## Container attributes
///
/// - `#[serde(rename = "...")]` / `#[apidoc(rename = "...")]` - Definition name
/// - `#[serde(rename_all = "...")]` / `#[apidoc(rename_all = "...")]` - Field or variant case
/// - `#[apidoc(description = "...")]` - Description (defaults to the doc comment)
///
/// ## Field attributes
///
/// - `#[serde(rename = "...")]` / `#[apidoc(rename = "...")]` - Property name
/// - `#[serde(skip)]`, `#[serde(skip_serializing)]`, `#[apidoc(skip)]` - Exclude the field
/// - `#[serde(flatten)]` / `#[apidoc(flatten)]` - Merge a nested object's fields
/// - `#[apidoc(required)]` - List the property as required
/// - `#[apidoc(example = "...")]` - Example, parsed by the property's type
/// - `#[apidoc(enum = "a|b")]` - Allowed values
/// - `#[apidoc(description = "...")]` - Description (defaults to the doc comment)
///
/// Other serde attributes are accepted and ignored.
#[proc_macro_derive(Model, attributes(apidoc, serde))]
pub fn derive_model(input: TokenStream) -> TokenStream {
    derive_model::derive_model_impl(input.into()).into()
}
