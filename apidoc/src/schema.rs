//! Swagger 2.0 schema fragments and definition entries.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Builds the pointer string for a definition key.
pub fn definition_ref(key: &str) -> String {
    format!("#/definitions/{key}")
}

/// A schema fragment: an inline type, a `$ref`, or an array of either.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchemaObject {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(rename = "$ref", skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<SchemaObject>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<Value>,
    #[serde(rename = "enum", default, skip_serializing_if = "Vec::is_empty")]
    pub enum_values: Vec<Value>,
}

impl SchemaObject {
    /// `{"$ref": "#/definitions/<key>"}`.
    pub fn reference(key: &str) -> Self {
        Self {
            reference: Some(definition_ref(key)),
            ..Self::default()
        }
    }

    /// `{"type": "array", "items": <items>}`.
    pub fn array_of(items: SchemaObject) -> Self {
        Self {
            schema_type: Some("array".to_string()),
            items: Some(Box::new(items)),
            ..Self::default()
        }
    }

    /// An inline leaf with an optional type and format.
    pub fn leaf(schema_type: Option<&str>, format: Option<&str>) -> Self {
        Self {
            schema_type: schema_type.map(str::to_string),
            format: format.map(str::to_string),
            ..Self::default()
        }
    }

    pub fn with_example(mut self, example: Option<Value>) -> Self {
        self.example = example;
        self
    }

    pub fn with_enum(mut self, values: Vec<Value>) -> Self {
        self.enum_values = values;
        self
    }

    pub fn with_description(mut self, description: Option<&str>) -> Self {
        self.description = description.map(str::to_string);
        self
    }

    /// The definition key this fragment points at, directly or through `items`.
    pub fn referenced_key(&self) -> Option<&str> {
        if let Some(reference) = &self.reference {
            return reference.strip_prefix("#/definitions/");
        }
        self.items.as_deref().and_then(SchemaObject::referenced_key)
    }
}

/// One entry in the document's `definitions` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Definition {
    #[serde(rename = "type")]
    pub schema_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub properties: BTreeMap<String, SchemaObject>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
    /// Set when a flattened map merges arbitrary keys into the object.
    #[serde(
        rename = "additionalProperties",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub additional_properties: Option<bool>,
}

impl Definition {
    /// An object definition with no properties yet.
    pub fn object() -> Self {
        Self {
            schema_type: "object".to_string(),
            description: None,
            properties: BTreeMap::new(),
            required: Vec::new(),
            additional_properties: None,
        }
    }
}

impl Default for Definition {
    fn default() -> Self {
        Self::object()
    }
}
