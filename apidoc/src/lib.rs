//! Swagger 2.0 document synthesis.
//!
//! Describe endpoints as plain records, derive [`Model`] for the types they
//! send and receive, and generate a complete Swagger document whose
//! `definitions` table holds every reachable type exactly once.
//!
//! ## Modules
//!
//! - [`model`] - The [`Model`] trait and the type descriptors it produces
//! - [`definitions`] - The de-duplicated definitions table
//! - [`paths`] - Per-endpoint operation building
//! - [`generator`] - [`SwaggerGenerator`], the entry point
//!
//! ## Examples
//!
//! ```rust
//! use apidoc::{Endpoint, Info, Model, Param, ParamType, Response, RestMethod, SwaggerGenerator};
//!
//! #[derive(Model)]
//! struct Widget {
//!     #[apidoc(example = "5")]
//!     id: i64,
//!     name: String,
//! }
//!
//! let doc = SwaggerGenerator::new(Info::new("Widgets", "1.0.0"))
//!     .add_endpoint(
//!         Endpoint::new(RestMethod::Get, "/widgets/{id}")
//!             .with_param(Param::path("id", ParamType::Integer))
//!             .with_response(Response::new("200", "OK").with_body::<Widget>()),
//!     )
//!     .generate_value()
//!     .unwrap();
//!
//! assert_eq!(doc["definitions"]["Widget"]["properties"]["id"]["example"], 5);
//! assert_eq!(
//!     doc["paths"]["/widgets/{id}"]["get"]["responses"]["200"]["schema"]["$ref"],
//!     "#/definitions/Widget"
//! );
//! ```

// Lets derive output (which names `::apidoc`) resolve inside this crate's tests.
extern crate self as apidoc;

pub mod config;
pub mod definitions;
pub mod document;
pub mod endpoint;
pub mod error;
pub mod generator;
pub mod introspect;
pub mod method;
pub mod model;
pub mod paths;
pub mod registry;
pub mod schema;

pub use apidoc_macros::Model;
pub use config::{GeneratorConfig, MediaTypeMerge, MediaTypes, OutputFormat};
pub use definitions::{DefinitionTable, TypeIdentity};
pub use document::{
    ApiKeyLocation, Contact, Info, License, OAuth2Flow, Operation, Parameter, ResponseObject,
    Scheme, SecurityKind, SecurityScheme, SwaggerDocument,
};
pub use endpoint::{
    CollectionFormat, Endpoint, Param, ParamItems, ParamLocation, ParamType, Response,
    SecurityRequirement,
};
pub use error::{ConfigError, GenerateError};
pub use generator::SwaggerGenerator;
pub use method::RestMethod;
pub use model::{Model, TypeDescriptor, TypeRef};
pub use paths::PathBuilder;
pub use registry::EndpointRegistry;
pub use schema::{Definition, SchemaObject};
