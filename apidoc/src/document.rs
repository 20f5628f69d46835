//! Swagger 2.0 document structure.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::endpoint::{CollectionFormat, Param, ParamItems, ParamLocation, ParamType, SecurityRequirement};
use crate::schema::{Definition, SchemaObject};

/// The Swagger specification version emitted in every document.
pub const SWAGGER_VERSION: &str = "2.0";

/// Metadata about the API for the `info` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Info {
    /// The title of the API.
    pub title: String,
    /// The version of the API (e.g., "1.0.0").
    pub version: String,
    /// A description of the API.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// A URL to the Terms of Service for the API.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terms_of_service: Option<String>,
    /// Contact information for the API.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<Contact>,
    /// License information for the API.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<License>,
}

impl Info {
    /// Creates a new `Info` with the required fields.
    pub fn new(title: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            version: version.into(),
            description: None,
            terms_of_service: None,
            contact: None,
            license: None,
        }
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the terms of service URL.
    pub fn with_terms_of_service(mut self, url: impl Into<String>) -> Self {
        self.terms_of_service = Some(url.into());
        self
    }

    /// Sets the contact information.
    pub fn with_contact(mut self, contact: Contact) -> Self {
        self.contact = Some(contact);
        self
    }

    /// Sets the license information.
    pub fn with_license(mut self, license: License) -> Self {
        self.license = Some(license);
        self
    }
}

impl Default for Info {
    fn default() -> Self {
        Self::new("API", "1.0.0")
    }
}

/// Contact information for the API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// License information for the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct License {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Transfer protocol of the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scheme {
    Http,
    Https,
    Ws,
    Wss,
}

/// Where an API key is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiKeyLocation {
    Header,
    Query,
}

/// OAuth2 flow of a security scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OAuth2Flow {
    Implicit,
    Password,
    Application,
    AccessCode,
}

/// Kind-specific part of a security scheme.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SecurityKind {
    #[serde(rename = "basic")]
    Basic,
    #[serde(rename = "apiKey")]
    ApiKey {
        name: String,
        #[serde(rename = "in")]
        location: ApiKeyLocation,
    },
    #[serde(rename = "oauth2", rename_all = "camelCase")]
    OAuth2 {
        flow: OAuth2Flow,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        authorization_url: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        token_url: Option<String>,
        #[serde(default)]
        scopes: BTreeMap<String, String>,
    },
}

/// An entry of `securityDefinitions`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecurityScheme {
    #[serde(flatten)]
    pub kind: SecurityKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl SecurityScheme {
    pub fn basic() -> Self {
        Self {
            kind: SecurityKind::Basic,
            description: None,
        }
    }

    pub fn api_key(name: impl Into<String>, location: ApiKeyLocation) -> Self {
        Self {
            kind: SecurityKind::ApiKey {
                name: name.into(),
                location,
            },
            description: None,
        }
    }

    pub fn oauth2(flow: OAuth2Flow) -> Self {
        Self {
            kind: SecurityKind::OAuth2 {
                flow,
                authorization_url: None,
                token_url: None,
                scopes: BTreeMap::new(),
            },
            description: None,
        }
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Wire shape of one operation parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "in")]
    pub location: ParamLocation,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub required: bool,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub param_type: Option<ParamType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<ParamItems>,
    #[serde(rename = "enum", default, skip_serializing_if = "Vec::is_empty")]
    pub enum_values: Vec<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_items: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_items: Option<u64>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub unique_items: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multiple_of: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection_format: Option<CollectionFormat>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<SchemaObject>,
}

impl Parameter {
    /// The synthetic `body` parameter carrying a request body schema.
    pub fn body(schema: SchemaObject) -> Self {
        Self {
            name: "body".to_string(),
            location: ParamLocation::Body,
            description: Some("body".to_string()),
            required: true,
            param_type: None,
            format: None,
            items: None,
            enum_values: Vec::new(),
            default: None,
            minimum: None,
            maximum: None,
            min_length: None,
            max_length: None,
            pattern: None,
            max_items: None,
            min_items: None,
            unique_items: false,
            multiple_of: None,
            collection_format: None,
            schema: Some(schema),
        }
    }
}

impl From<&Param> for Parameter {
    fn from(param: &Param) -> Self {
        Self {
            name: param.name.clone(),
            location: param.location,
            description: param.description.clone(),
            required: param.required,
            param_type: Some(param.param_type),
            format: param.format.clone(),
            items: param.items.clone(),
            enum_values: param.enum_values.clone(),
            default: param.default.clone(),
            minimum: param.minimum,
            maximum: param.maximum,
            min_length: param.min_length,
            max_length: param.max_length,
            pattern: param.pattern.clone(),
            max_items: param.max_items,
            min_items: param.min_items,
            unique_items: param.unique_items,
            multiple_of: param.multiple_of,
            collection_format: param.collection_format,
            schema: None,
        }
    }
}

/// Wire shape of one response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseObject {
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<SchemaObject>,
}

/// One operation under a path item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    pub description: String,
    pub summary: String,
    pub operation_id: String,
    pub consumes: Vec<String>,
    pub produces: Vec<String>,
    pub tags: Vec<String>,
    pub parameters: Vec<Parameter>,
    pub responses: BTreeMap<String, ResponseObject>,
    pub security: Vec<SecurityRequirement>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub deprecated: bool,
}

/// Method key (`get`, `post`, ...) to operation.
pub type PathItem = BTreeMap<String, Operation>;

/// The complete generated document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwaggerDocument {
    pub swagger: String,
    pub info: Info,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_path: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub schemes: Vec<Scheme>,
    pub paths: BTreeMap<String, PathItem>,
    pub definitions: BTreeMap<String, Definition>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub security_definitions: BTreeMap<String, SecurityScheme>,
}

impl SwaggerDocument {
    /// Every `$ref` target used anywhere in the document.
    pub fn referenced_keys(&self) -> Vec<&str> {
        let mut keys = Vec::new();
        for operation in self.paths.values().flat_map(|item| item.values()) {
            for parameter in &operation.parameters {
                keys.extend(parameter.schema.as_ref().and_then(SchemaObject::referenced_key));
            }
            for response in operation.responses.values() {
                keys.extend(response.schema.as_ref().and_then(SchemaObject::referenced_key));
            }
        }
        for definition in self.definitions.values() {
            keys.extend(definition.properties.values().filter_map(SchemaObject::referenced_key));
        }
        keys
    }

    /// `$ref` targets that have no entry in `definitions`.
    pub fn dangling_references(&self) -> Vec<&str> {
        self.referenced_keys()
            .into_iter()
            .filter(|key| !self.definitions.contains_key(*key))
            .collect()
    }
}
