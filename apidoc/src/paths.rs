//! Per-endpoint operation building.
//!
//! Runs after every body and response type is registered, so it only derives
//! reference names and never walks fields again.

use std::collections::BTreeMap;
use tracing::warn;

use crate::config::MediaTypes;
use crate::definitions::{enum_schema, TypeIdentity};
use crate::document::{Operation, Parameter, ResponseObject};
use crate::endpoint::{Endpoint, ParamLocation};
use crate::introspect::{self, Shape};
use crate::model::TypeDescriptor;
use crate::schema::SchemaObject;

const MULTIPART_FORM_DATA: &str = "multipart/form-data";

/// Schema for a body or response of `descriptor`.
///
/// Objects become `$ref`s and sequences `{type: array, items}`; scalars and
/// enumerations are inline. `None` for types with no serialized form.
pub fn reference_schema(descriptor: &TypeDescriptor, identity: TypeIdentity) -> Option<SchemaObject> {
    let schema = match introspect::classify(descriptor) {
        Shape::Object(object) => SchemaObject::reference(&identity.key_for(object)),
        Shape::Array(element) => SchemaObject::array_of(reference_schema(element, identity)?),
        Shape::Enum(enumeration) => enum_schema(enumeration),
        Shape::Leaf {
            schema_type,
            format,
        } => SchemaObject::leaf(schema_type, format),
        Shape::Ignored(_) => return None,
    };
    Some(schema)
}

/// `lowercase(method)-path`, e.g. `get-/widgets/{id}`.
pub fn operation_id(endpoint: &Endpoint) -> String {
    format!("{}-{}", endpoint.method.as_path_key(), endpoint.path)
}

/// Builds the operation object of each endpoint.
#[derive(Debug, Clone, Copy)]
pub struct PathBuilder<'a> {
    identity: TypeIdentity,
    media_types: &'a MediaTypes,
}

impl<'a> PathBuilder<'a> {
    pub fn new(identity: TypeIdentity, media_types: &'a MediaTypes) -> Self {
        Self {
            identity,
            media_types,
        }
    }

    pub fn build(&self, endpoint: &Endpoint) -> Operation {
        for name in endpoint.unmatched_path_params() {
            warn!(
                path = %endpoint.path,
                param = name,
                "Path template parameter has no matching path parameter"
            );
        }
        if endpoint.body.is_some() && !endpoint.method.has_body() {
            warn!(
                method = %endpoint.method,
                path = %endpoint.path,
                "Request body declared on a method that usually carries none"
            );
        }

        Operation {
            description: endpoint.description.clone(),
            summary: endpoint
                .summary
                .clone()
                .unwrap_or_else(|| endpoint.description.clone()),
            operation_id: operation_id(endpoint),
            consumes: self.consumes(endpoint),
            produces: self.produces(endpoint),
            tags: endpoint.tags.clone(),
            parameters: self.parameters(endpoint),
            responses: self.responses(endpoint),
            security: endpoint.security.clone(),
            deprecated: endpoint.deprecated,
        }
    }

    /// Default request media types, with `multipart/form-data` first when
    /// any parameter is a form field, merged with the endpoint's overrides.
    pub fn consumes(&self, endpoint: &Endpoint) -> Vec<String> {
        let has_form_data = endpoint
            .params
            .iter()
            .any(|param| param.location == ParamLocation::FormData);

        let mut defaults = Vec::with_capacity(self.media_types.consumes.len() + 1);
        if has_form_data {
            defaults.push(MULTIPART_FORM_DATA.to_string());
        }
        defaults.extend(self.media_types.consumes.iter().cloned());

        self.media_types.merge.merge(&defaults, &endpoint.consumes)
    }

    pub fn produces(&self, endpoint: &Endpoint) -> Vec<String> {
        self.media_types
            .merge
            .merge(&self.media_types.produces, &endpoint.produces)
    }

    /// Declared parameters in order, then the synthetic body parameter.
    pub fn parameters(&self, endpoint: &Endpoint) -> Vec<Parameter> {
        let mut parameters: Vec<Parameter> = endpoint.params.iter().map(Parameter::from).collect();

        if let Some(body) = &endpoint.body {
            match reference_schema(&body.descriptor(), self.identity) {
                Some(schema) => parameters.push(Parameter::body(schema)),
                None => warn!(
                    path = %endpoint.path,
                    body = body.type_name(),
                    "Request body type has no serialized form, omitting body parameter"
                ),
            }
        }

        parameters
    }

    /// Responses keyed by status code. A later response with the same code
    /// replaces an earlier one.
    pub fn responses(&self, endpoint: &Endpoint) -> BTreeMap<String, ResponseObject> {
        endpoint
            .responses
            .iter()
            .map(|response| {
                let schema = response
                    .body
                    .as_ref()
                    .and_then(|body| reference_schema(&body.descriptor(), self.identity));
                (
                    response.code.clone(),
                    ResponseObject {
                        description: response.description.clone(),
                        schema,
                    },
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MediaTypeMerge;
    use crate::endpoint::{Param, ParamType, Response};
    use crate::method::RestMethod;
    use crate::Model;
    use serde_json::json;

    #[derive(Model)]
    struct Widget {
        id: i64,
    }

    #[derive(Model)]
    enum Status {
        Active,
        Retired,
    }

    fn builder(media_types: &MediaTypes) -> PathBuilder<'_> {
        PathBuilder::new(TypeIdentity::Name, media_types)
    }

    #[test]
    fn test_operation_id_and_summary_default() {
        let media_types = MediaTypes::default();
        let endpoint =
            Endpoint::new(RestMethod::Get, "/widgets/{id}").with_description("Fetch a widget");
        let operation = builder(&media_types).build(&endpoint);

        assert_eq!(operation.operation_id, "get-/widgets/{id}");
        assert_eq!(operation.summary, "Fetch a widget");
        assert_eq!(operation.description, "Fetch a widget");
    }

    #[test]
    fn test_explicit_summary_wins() {
        let media_types = MediaTypes::default();
        let endpoint = Endpoint::new(RestMethod::Get, "/widgets")
            .with_summary("List")
            .with_description("List every widget");
        assert_eq!(builder(&media_types).build(&endpoint).summary, "List");
    }

    #[test]
    fn test_default_media_types() {
        let media_types = MediaTypes::default();
        let endpoint = Endpoint::new(RestMethod::Get, "/widgets");
        let operation = builder(&media_types).build(&endpoint);

        assert_eq!(operation.consumes, vec!["application/json"]);
        assert_eq!(operation.produces, vec!["application/json", "application/xml"]);
    }

    #[test]
    fn test_form_data_prepends_multipart() {
        let media_types = MediaTypes::default();
        let endpoint = Endpoint::new(RestMethod::Post, "/upload")
            .with_param(Param::form("file", ParamType::File).required());
        assert_eq!(
            builder(&media_types).consumes(&endpoint),
            vec!["multipart/form-data", "application/json"]
        );
    }

    #[test]
    fn test_overrides_append_to_defaults() {
        let media_types = MediaTypes::default();
        let endpoint = Endpoint::new(RestMethod::Post, "/widgets")
            .with_consumes(["application/json"])
            .with_produces(["text/csv"]);
        let builder = builder(&media_types);

        assert_eq!(
            builder.consumes(&endpoint),
            vec!["application/json", "application/json"]
        );
        assert_eq!(
            builder.produces(&endpoint),
            vec!["application/json", "application/xml", "text/csv"]
        );
    }

    #[test]
    fn test_replace_policy() {
        let media_types = MediaTypes {
            merge: MediaTypeMerge::Replace,
            ..MediaTypes::default()
        };
        let endpoint = Endpoint::new(RestMethod::Get, "/report").with_produces(["text/csv"]);
        assert_eq!(builder(&media_types).produces(&endpoint), vec!["text/csv"]);
    }

    #[test]
    fn test_body_parameter_follows_declared_params() {
        let media_types = MediaTypes::default();
        let endpoint = Endpoint::new(RestMethod::Put, "/widgets/{id}")
            .with_param(Param::path("id", ParamType::Integer))
            .with_body::<Widget>();
        let parameters = builder(&media_types).parameters(&endpoint);

        assert_eq!(parameters.len(), 2);
        assert_eq!(parameters[0].name, "id");
        assert_eq!(parameters[1].name, "body");
        assert_eq!(
            serde_json::to_value(&parameters[1].schema).unwrap(),
            json!({"$ref": "#/definitions/Widget"})
        );
    }

    #[test]
    fn test_sequence_body_is_array_of_reference() {
        let media_types = MediaTypes::default();
        let endpoint = Endpoint::new(RestMethod::Post, "/widgets/batch").with_body::<Vec<Widget>>();
        let parameters = builder(&media_types).parameters(&endpoint);

        assert_eq!(
            serde_json::to_value(&parameters[0].schema).unwrap(),
            json!({"type": "array", "items": {"$ref": "#/definitions/Widget"}})
        );
    }

    #[test]
    fn test_response_schemas() {
        let media_types = MediaTypes::default();
        let endpoint = Endpoint::new(RestMethod::Get, "/widgets")
            .with_response(Response::new("200", "OK").with_body::<Vec<Widget>>())
            .with_response(Response::new("204", "No Content"))
            .with_response(Response::new("400", "Bad Request").with_body::<String>());
        let responses = builder(&media_types).responses(&endpoint);

        assert_eq!(
            serde_json::to_value(&responses).unwrap(),
            json!({
                "200": {
                    "description": "OK",
                    "schema": {"type": "array", "items": {"$ref": "#/definitions/Widget"}}
                },
                "204": {"description": "No Content"},
                "400": {"description": "Bad Request", "schema": {"type": "string"}}
            })
        );
    }

    #[test]
    fn test_reference_schema_for_enum_is_inline() {
        let schema = reference_schema(&Status::descriptor(), TypeIdentity::Name).unwrap();
        assert_eq!(
            serde_json::to_value(&schema).unwrap(),
            json!({"type": "string", "enum": ["Active", "Retired"]})
        );
    }

    #[test]
    fn test_reference_schema_unwraps_pointers() {
        let schema =
            reference_schema(&<Option<Box<Widget>> as Model>::descriptor(), TypeIdentity::Name)
                .unwrap();
        assert_eq!(schema.referenced_key(), Some("Widget"));
        assert!(reference_schema(&<() as Model>::descriptor(), TypeIdentity::Name).is_none());
    }

    #[tracing_test::traced_test]
    #[test]
    fn test_unmatched_template_param_is_logged() {
        let media_types = MediaTypes::default();
        let endpoint = Endpoint::new(RestMethod::Get, "/widgets/{id}");
        let operation = builder(&media_types).build(&endpoint);

        assert!(operation.parameters.is_empty());
        assert!(logs_contain("Path template parameter has no matching path parameter"));
    }

    #[tracing_test::traced_test]
    #[test]
    fn test_body_on_get_is_logged_and_kept() {
        let media_types = MediaTypes::default();
        let endpoint = Endpoint::new(RestMethod::Get, "/search").with_body::<Widget>();
        let operation = builder(&media_types).build(&endpoint);

        assert_eq!(operation.parameters.len(), 1);
        assert_eq!(operation.parameters[0].name, "body");
        assert!(logs_contain("Request body declared on a method that usually carries none"));
    }

    #[tracing_test::traced_test]
    #[test]
    fn test_body_on_post_is_not_logged() {
        let media_types = MediaTypes::default();
        let endpoint = Endpoint::new(RestMethod::Post, "/widgets").with_body::<Widget>();
        builder(&media_types).build(&endpoint);

        assert!(!logs_contain("usually carries none"));
    }

    #[test]
    fn test_deprecated_flag_carries_over() {
        let media_types = MediaTypes::default();
        let endpoint = Endpoint::new(RestMethod::Delete, "/legacy").deprecated();
        let value = serde_json::to_value(builder(&media_types).build(&endpoint)).unwrap();
        assert_eq!(value["deprecated"], true);
        assert_eq!(value["security"], json!([]));
    }
}
