//! Endpoint, parameter, and response records consumed by the generator.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use strum::{Display, EnumString};

use crate::method::RestMethod;
use crate::model::{Model, TypeRef};

/// A security requirement: scheme name to required scopes.
pub type SecurityRequirement = BTreeMap<String, Vec<String>>;

/// Where a parameter is carried in the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum ParamLocation {
    Path,
    Query,
    Header,
    FormData,
    Body,
}

/// Swagger data type of a non-body parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ParamType {
    String,
    Integer,
    Number,
    Boolean,
    Array,
    File,
}

/// Serialization of array-valued parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum CollectionFormat {
    /// Comma separated (`foo,bar`).
    Csv,
    /// Space separated.
    Ssv,
    /// Tab separated.
    Tsv,
    /// Pipe separated.
    Pipes,
    /// Repeated parameter instances (`foo=bar&foo=baz`).
    Multi,
}

/// Item type of an array parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamItems {
    #[serde(rename = "type")]
    pub item_type: ParamType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(rename = "enum", default, skip_serializing_if = "Vec::is_empty")]
    pub enum_values: Vec<Value>,
}

impl ParamItems {
    pub fn new(item_type: ParamType) -> Self {
        Self {
            item_type,
            format: None,
            enum_values: Vec::new(),
        }
    }

    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    pub fn with_enum(mut self, values: impl IntoIterator<Item = impl Into<Value>>) -> Self {
        self.enum_values = values.into_iter().map(Into::into).collect();
        self
    }
}

/// One request input of an endpoint.
///
/// ## Examples
///
/// ```rust
/// use apidoc::{Param, ParamType};
///
/// let id = Param::path("id", ParamType::Integer).with_description("widget id");
/// assert!(id.required);
///
/// let limit = Param::query("limit", ParamType::Integer).with_range(Some(1.0), Some(100.0));
/// assert!(!limit.required);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: String,
    pub location: ParamLocation,
    pub param_type: ParamType,
    pub description: Option<String>,
    pub required: bool,
    pub format: Option<String>,
    pub items: Option<ParamItems>,
    pub enum_values: Vec<Value>,
    pub default: Option<Value>,
    pub minimum: Option<f64>,
    pub maximum: Option<f64>,
    pub min_length: Option<u64>,
    pub max_length: Option<u64>,
    pub pattern: Option<String>,
    pub min_items: Option<u64>,
    pub max_items: Option<u64>,
    pub unique_items: bool,
    pub multiple_of: Option<f64>,
    pub collection_format: Option<CollectionFormat>,
}

impl Param {
    /// Creates an optional parameter.
    pub fn new(name: impl Into<String>, location: ParamLocation, param_type: ParamType) -> Self {
        Self {
            name: name.into(),
            location,
            param_type,
            description: None,
            required: false,
            format: None,
            items: None,
            enum_values: Vec::new(),
            default: None,
            minimum: None,
            maximum: None,
            min_length: None,
            max_length: None,
            pattern: None,
            min_items: None,
            max_items: None,
            unique_items: false,
            multiple_of: None,
            collection_format: None,
        }
    }

    /// A path parameter. Path parameters are always required.
    pub fn path(name: impl Into<String>, param_type: ParamType) -> Self {
        Self::new(name, ParamLocation::Path, param_type).required()
    }

    /// A query string parameter.
    pub fn query(name: impl Into<String>, param_type: ParamType) -> Self {
        Self::new(name, ParamLocation::Query, param_type)
    }

    /// A request header parameter.
    pub fn header(name: impl Into<String>, param_type: ParamType) -> Self {
        Self::new(name, ParamLocation::Header, param_type)
    }

    /// A `formData` parameter. Its presence adds `multipart/form-data` to `consumes`.
    pub fn form(name: impl Into<String>, param_type: ParamType) -> Self {
        Self::new(name, ParamLocation::FormData, param_type)
    }

    /// Marks the parameter as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Sets the parameter description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the `format` modifier, such as `int64` or `date-time`.
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    /// Sets the item type; used with [`ParamType::Array`].
    pub fn with_items(mut self, items: ParamItems) -> Self {
        self.items = Some(items);
        self
    }

    /// Restricts the parameter to the given values.
    pub fn with_enum(mut self, values: impl IntoIterator<Item = impl Into<Value>>) -> Self {
        self.enum_values = values.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the value the server assumes when the parameter is absent.
    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Sets the inclusive `minimum` and `maximum` for numeric parameters.
    pub fn with_range(mut self, minimum: Option<f64>, maximum: Option<f64>) -> Self {
        self.minimum = minimum;
        self.maximum = maximum;
        self
    }

    /// Sets `minLength` and `maxLength` for string parameters.
    pub fn with_length(mut self, min_length: Option<u64>, max_length: Option<u64>) -> Self {
        self.min_length = min_length;
        self.max_length = max_length;
        self
    }

    /// Sets the regular expression a string parameter must match.
    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    /// Sets `minItems` and `maxItems` for array parameters.
    pub fn with_item_count(mut self, min_items: Option<u64>, max_items: Option<u64>) -> Self {
        self.min_items = min_items;
        self.max_items = max_items;
        self
    }

    /// Requires array items to be unique.
    pub fn unique_items(mut self) -> Self {
        self.unique_items = true;
        self
    }

    /// Requires numeric values to be a multiple of `multiple_of`.
    pub fn with_multiple_of(mut self, multiple_of: f64) -> Self {
        self.multiple_of = Some(multiple_of);
        self
    }

    /// Sets how array values are serialized.
    pub fn with_collection_format(mut self, format: CollectionFormat) -> Self {
        self.collection_format = Some(format);
        self
    }
}

/// One possible response of an endpoint.
#[derive(Debug, Clone)]
pub struct Response {
    /// Status code key, e.g. `"200"` or `"default"`.
    pub code: String,
    pub description: String,
    /// Type of the response body; `None` for responses without content.
    pub body: Option<TypeRef>,
}

impl Response {
    pub fn new(code: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            description: description.into(),
            body: None,
        }
    }

    /// Sets the body type.
    pub fn with_body<T: Model>(mut self) -> Self {
        self.body = Some(TypeRef::of::<T>());
        self
    }

    /// Sets the body type from a representative value.
    pub fn with_body_of<T: Model>(self, _value: &T) -> Self {
        self.with_body::<T>()
    }
}

/// One documented HTTP operation.
///
/// ## Examples
///
/// ```rust
/// use apidoc::{Endpoint, Model, Param, ParamType, Response, RestMethod};
///
/// #[derive(Model)]
/// struct Widget {
///     id: i64,
/// }
///
/// let endpoint = Endpoint::new(RestMethod::Get, "/widgets/{id}")
///     .with_description("Fetch a widget")
///     .with_tag("widgets")
///     .with_param(Param::path("id", ParamType::Integer))
///     .with_response(Response::new("200", "OK").with_body::<Widget>());
///
/// assert_eq!(endpoint.path_params(), vec!["id"]);
/// ```
#[derive(Debug, Clone)]
pub struct Endpoint {
    pub method: RestMethod,
    /// Path template with `{name}` placeholders.
    pub path: String,
    pub summary: Option<String>,
    pub description: String,
    pub tags: Vec<String>,
    pub params: Vec<Param>,
    /// Request body type; becomes a synthetic `body` parameter.
    pub body: Option<TypeRef>,
    pub responses: Vec<Response>,
    /// Media types added to the defaults of `consumes`.
    pub consumes: Vec<String>,
    /// Media types added to the defaults of `produces`.
    pub produces: Vec<String>,
    pub security: Vec<SecurityRequirement>,
    pub deprecated: bool,
}

impl Endpoint {
    pub fn new(method: RestMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            summary: None,
            description: String::new(),
            tags: Vec::new(),
            params: Vec::new(),
            body: None,
            responses: Vec::new(),
            consumes: Vec::new(),
            produces: Vec::new(),
            security: Vec::new(),
            deprecated: false,
        }
    }

    /// Sets the summary. Defaults to the description when unset.
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Sets tags (replacing any existing).
    pub fn with_tags(mut self, tags: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_param(mut self, param: Param) -> Self {
        self.params.push(param);
        self
    }

    pub fn with_params(mut self, params: impl IntoIterator<Item = Param>) -> Self {
        self.params.extend(params);
        self
    }

    /// Sets the request body type.
    pub fn with_body<T: Model>(mut self) -> Self {
        self.body = Some(TypeRef::of::<T>());
        self
    }

    /// Sets the request body type from a representative value.
    pub fn with_body_of<T: Model>(self, _value: &T) -> Self {
        self.with_body::<T>()
    }

    pub fn with_response(mut self, response: Response) -> Self {
        self.responses.push(response);
        self
    }

    pub fn with_responses(mut self, responses: impl IntoIterator<Item = Response>) -> Self {
        self.responses.extend(responses);
        self
    }

    pub fn with_consumes(mut self, media_types: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.consumes = media_types.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_produces(mut self, media_types: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.produces = media_types.into_iter().map(Into::into).collect();
        self
    }

    /// Adds a security requirement naming one scheme and its scopes.
    pub fn with_security(
        mut self,
        scheme: impl Into<String>,
        scopes: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        let mut requirement = SecurityRequirement::new();
        requirement.insert(scheme.into(), scopes.into_iter().map(Into::into).collect());
        self.security.push(requirement);
        self
    }

    /// Marks the endpoint as deprecated.
    pub fn deprecated(mut self) -> Self {
        self.deprecated = true;
        self
    }

    /// Extracts `{name}` placeholders from the path template, in order.
    pub fn path_params(&self) -> Vec<&str> {
        let mut params = Vec::new();
        let mut rest = self.path.as_str();

        while let Some(start) = rest.find('{') {
            let after = &rest[start + 1..];
            let Some(end) = after.find('}') else {
                break;
            };
            let name = &after[..end];
            if !name.is_empty() {
                params.push(name);
            }
            rest = &after[end + 1..];
        }

        params
    }

    /// Template placeholders with no matching `path` parameter.
    pub fn unmatched_path_params(&self) -> Vec<&str> {
        self.path_params()
            .into_iter()
            .filter(|name| {
                !self
                    .params
                    .iter()
                    .any(|p| p.location == ParamLocation::Path && p.name == *name)
            })
            .collect()
    }
}
