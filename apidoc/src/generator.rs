//! Swagger 2.0 document generator.
//!
//! [`SwaggerGenerator`] assembles a [`SwaggerDocument`] from endpoint
//! records in two passes: every body and response type is registered in the
//! definitions table first, then one operation is built per endpoint.

use std::collections::BTreeMap;
use tracing::{debug, error, info, instrument, warn};

use crate::config::{GeneratorConfig, MediaTypeMerge, OutputFormat};
use crate::definitions::{DefinitionTable, TypeIdentity};
use crate::document::{Info, Scheme, SecurityScheme, SwaggerDocument, SWAGGER_VERSION};
use crate::endpoint::Endpoint;
use crate::error::GenerateError;
use crate::paths::PathBuilder;
use crate::registry::EndpointRegistry;

/// Generator for Swagger 2.0 documents.
///
/// ## Examples
///
/// ```rust
/// use apidoc::{Endpoint, Info, Model, OutputFormat, Response, RestMethod, SwaggerGenerator};
///
/// #[derive(Model)]
/// struct User {
///     id: u64,
///     name: String,
/// }
///
/// let json = SwaggerGenerator::new(Info::new("My API", "1.0.0"))
///     .add_endpoint(
///         Endpoint::new(RestMethod::Get, "/users")
///             .with_description("Get all users")
///             .with_response(Response::new("200", "OK").with_body::<Vec<User>>()),
///     )
///     .generate(OutputFormat::Json)
///     .unwrap();
///
/// assert!(json.contains("#/definitions/User"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct SwaggerGenerator {
    config: GeneratorConfig,
    endpoints: Vec<Endpoint>,
}

impl SwaggerGenerator {
    /// Creates a generator with the given info and default settings.
    pub fn new(info: Info) -> Self {
        Self::from_config(GeneratorConfig::new(info))
    }

    pub fn from_config(config: GeneratorConfig) -> Self {
        Self {
            config,
            endpoints: Vec::new(),
        }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn endpoints(&self) -> &[Endpoint] {
        &self.endpoints
    }

    /// Adds an endpoint to the document.
    pub fn add_endpoint(mut self, endpoint: Endpoint) -> Self {
        self.endpoints.push(endpoint);
        self
    }

    /// Adds multiple endpoints to the document.
    pub fn add_endpoints(mut self, endpoints: impl IntoIterator<Item = Endpoint>) -> Self {
        self.endpoints.extend(endpoints);
        self
    }

    /// Adds every endpoint currently in `registry`.
    pub fn add_registry(self, registry: &EndpointRegistry) -> Self {
        self.add_endpoints(registry.snapshot())
    }

    /// Sets the `host` field.
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.config.host = Some(host.into());
        self
    }

    /// Sets the `basePath` field.
    pub fn with_base_path(mut self, base_path: impl Into<String>) -> Self {
        self.config.base_path = Some(base_path.into());
        self
    }

    /// Appends a transfer protocol to `schemes`.
    pub fn with_scheme(mut self, scheme: Scheme) -> Self {
        self.config.schemes.push(scheme);
        self
    }

    /// Sets how definition keys are derived from model types.
    pub fn with_identity(mut self, identity: TypeIdentity) -> Self {
        self.config.identity = identity;
        self
    }

    /// Sets how per-endpoint media types combine with the defaults.
    pub fn with_media_type_merge(mut self, merge: MediaTypeMerge) -> Self {
        self.config.media_types.merge = merge;
        self
    }

    /// Adds a named entry to `securityDefinitions`.
    pub fn add_security_definition(mut self, name: impl Into<String>, scheme: SecurityScheme) -> Self {
        self.config.security_definitions.insert(name.into(), scheme);
        self
    }

    /// Builds the document, or `None` when there are no endpoints.
    #[instrument(skip(self), fields(endpoints = self.endpoints.len()))]
    pub fn build_document(&self) -> Option<SwaggerDocument> {
        if self.endpoints.is_empty() {
            warn!("No endpoints found, skipping document generation");
            return None;
        }
        info!("Generating Swagger document");

        let mut definitions = DefinitionTable::new(self.config.identity);
        for endpoint in &self.endpoints {
            let bodies = endpoint
                .body
                .iter()
                .chain(endpoint.responses.iter().filter_map(|r| r.body.as_ref()));
            for body in bodies {
                if let Some(key) = definitions.register(&body.descriptor()) {
                    debug!(key = %key, body = body.type_name(), "Registered body type");
                }
            }
        }

        let builder = PathBuilder::new(self.config.identity, &self.config.media_types);
        let mut paths: BTreeMap<String, BTreeMap<String, _>> = BTreeMap::new();
        for endpoint in &self.endpoints {
            paths
                .entry(endpoint.path.clone())
                .or_default()
                .insert(endpoint.method.as_path_key().to_string(), builder.build(endpoint));
        }

        info!(
            paths = paths.len(),
            definitions = definitions.len(),
            "Generated Swagger document"
        );

        Some(SwaggerDocument {
            swagger: SWAGGER_VERSION.to_string(),
            info: self.config.info.clone(),
            host: self.config.host.clone(),
            base_path: self.config.base_path.clone(),
            schemes: self.config.schemes.clone(),
            paths,
            definitions: definitions.into_definitions(),
            security_definitions: self.config.security_definitions.clone(),
        })
    }

    /// Generates the document as a string.
    ///
    /// ## Errors
    ///
    /// Returns [`GenerateError::NoEndpoints`] when there is nothing to
    /// document, or a serialization error.
    pub fn generate(&self, format: OutputFormat) -> Result<String, GenerateError> {
        let document = self.build_document().ok_or(GenerateError::NoEndpoints)?;

        match format {
            OutputFormat::Json => {
                serde_json::to_string_pretty(&document).map_err(GenerateError::JsonSerialize)
            }
            OutputFormat::Yaml => {
                serde_yaml::to_string(&document).map_err(GenerateError::YamlSerialize)
            }
        }
    }

    /// Generates the document as a `serde_json::Value`.
    ///
    /// Useful when you need to manipulate the document before serialization.
    pub fn generate_value(&self) -> Result<serde_json::Value, GenerateError> {
        let document = self.build_document().ok_or(GenerateError::NoEndpoints)?;
        serde_json::to_value(&document).map_err(GenerateError::JsonSerialize)
    }

    /// Generates the document in the configured format as bytes.
    ///
    /// Never fails: errors are logged and yield an empty vector.
    pub fn generate_docs(&self) -> Vec<u8> {
        match self.generate(self.config.format) {
            Ok(text) => text.into_bytes(),
            Err(GenerateError::NoEndpoints) => Vec::new(),
            Err(err) => {
                error!(error = %err, "Failed to serialize Swagger document");
                Vec::new()
            }
        }
    }
}
