//! The accumulating, de-duplicated `definitions` table.
//!
//! Every object type reachable from a body or response is registered exactly
//! once under its identity key. Registration inserts the (empty) entry before
//! walking the type's fields, so a type that reaches itself again, directly or
//! through other types, finds its key already present and stops.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, trace, warn};

use crate::introspect::{self, Shape};
use crate::model::{EnumDescriptor, FieldDescriptor, ObjectDescriptor, Primitive, TypeDescriptor};
use crate::schema::{Definition, SchemaObject};

/// How a type is identified in the `definitions` table.
///
/// The key doubles as the deduplication key, so two types that map to the
/// same key share one definition: the first registration wins and later ones
/// are dropped with a warning.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeIdentity {
    /// The unqualified type name (`Widget`). Distinct types with the same
    /// name in different modules collide.
    #[default]
    Name,
    /// Module path and type name joined with `.` (`shop.models.Widget`).
    Qualified,
}

impl TypeIdentity {
    /// The definition key for an object type.
    pub fn key_for(&self, object: &ObjectDescriptor) -> String {
        match self {
            Self::Name => object.name.to_string(),
            Self::Qualified => format!("{}.{}", object.module_path.replace("::", "."), object.name),
        }
    }
}

/// Mapping from identity key to definition, filled by recursive registration.
#[derive(Debug, Clone, Default)]
pub struct DefinitionTable {
    identity: TypeIdentity,
    entries: BTreeMap<String, Definition>,
    /// Qualified name of the type that claimed each key.
    origins: HashMap<String, String>,
}

impl DefinitionTable {
    pub fn new(identity: TypeIdentity) -> Self {
        Self {
            identity,
            entries: BTreeMap::new(),
            origins: HashMap::new(),
        }
    }

    pub fn identity(&self) -> TypeIdentity {
        self.identity
    }

    /// Registers the object type behind `descriptor`, looking through
    /// pointers and sequences.
    ///
    /// Returns the definition key, or `None` when the type is not an object
    /// (scalars and enumerations are documented inline).
    pub fn register(&mut self, descriptor: &TypeDescriptor) -> Option<String> {
        match introspect::classify(descriptor) {
            Shape::Object(object) => Some(self.register_object(object)),
            Shape::Array(element) => self.register(element),
            _ => None,
        }
    }

    /// Registers an object type and, recursively, every object it reaches.
    ///
    /// A no-op (apart from returning the key) when the key is already taken.
    pub fn register_object(&mut self, object: &'static ObjectDescriptor) -> String {
        let key = self.identity.key_for(object);

        if let Some(origin) = self.origins.get(&key) {
            let qualified = object.qualified_name();
            if *origin != qualified {
                warn!(
                    key = %key,
                    kept = %origin,
                    dropped = %qualified,
                    "Definition key collision, keeping the first registration"
                );
            }
            return key;
        }

        debug!(key = %key, fields = object.fields.len(), "Registering definition");
        self.origins.insert(key.clone(), object.qualified_name());
        let mut definition = Definition::object();
        definition.description = object.description.map(str::to_string);
        self.entries.insert(key.clone(), definition);

        let mut flattening = vec![object];
        self.populate(&key, object, &mut flattening);
        key
    }

    /// Walks `object`'s fields into the definition stored under `key`.
    ///
    /// Flattened fields recurse into the same key; `flattening` holds the
    /// objects currently being walked so a flatten cycle stops.
    fn populate(
        &mut self,
        key: &str,
        object: &'static ObjectDescriptor,
        flattening: &mut Vec<&'static ObjectDescriptor>,
    ) {
        for field in &object.fields {
            let Some(name) = field.property_name() else {
                trace!(owner = object.name, field = field.ident, "Skipping excluded field");
                continue;
            };
            let descriptor = field.descriptor();

            if field.flatten {
                if let Some(nested) = descriptor.as_object() {
                    if flattening.iter().any(|seen| std::ptr::eq(*seen, nested)) {
                        warn!(
                            owner = object.name,
                            field = field.ident,
                            "Flatten cycle detected, skipping field"
                        );
                        continue;
                    }
                    flattening.push(nested);
                    self.populate(key, nested, flattening);
                    flattening.pop();
                    continue;
                }

                // Serde merges the entries of a flattened map into the owner,
                // so the field name never appears on the wire.
                if matches!(descriptor.deref_pointers(), TypeDescriptor::Primitive(Primitive::Map)) {
                    if let Some(definition) = self.entries.get_mut(key) {
                        definition.additional_properties = Some(true);
                    }
                }
                trace!(
                    owner = object.name,
                    field = field.ident,
                    kind = descriptor.kind_name(),
                    "Flattened field is not an object, emitting no property"
                );
                continue;
            }

            let Some(property) = self.property_schema(field, &descriptor) else {
                trace!(
                    owner = object.name,
                    field = field.ident,
                    kind = descriptor.kind_name(),
                    "Skipping field with no serialized form"
                );
                continue;
            };

            if let Some(definition) = self.entries.get_mut(key) {
                definition.properties.insert(name.to_string(), property);
                if field.required && !definition.required.iter().any(|r| r == name) {
                    definition.required.push(name.to_string());
                }
            }
        }
    }

    fn property_schema(
        &mut self,
        field: &FieldDescriptor,
        descriptor: &TypeDescriptor,
    ) -> Option<SchemaObject> {
        let mut schema = self.value_schema(field, descriptor)?;
        if field.description.is_some() {
            schema = schema.with_description(field.description);
        }
        Some(schema)
    }

    /// Schema for a value of `descriptor` carrying `field`'s metadata.
    ///
    /// Examples and enum values attach to the innermost leaf, so an array of
    /// scalars yields `{type: array, items: {type, example}}`.
    fn value_schema(
        &mut self,
        field: &FieldDescriptor,
        descriptor: &TypeDescriptor,
    ) -> Option<SchemaObject> {
        let schema = match introspect::classify(descriptor) {
            Shape::Ignored(_) => return None,
            Shape::Object(nested) => SchemaObject::reference(&self.register_object(nested)),
            Shape::Array(element) => SchemaObject::array_of(self.value_schema(field, element)?),
            Shape::Enum(enumeration) => {
                enum_schema(enumeration).with_example(field.example.map(Into::into))
            }
            Shape::Leaf {
                schema_type,
                format,
            } => SchemaObject::leaf(schema_type, format)
                .with_example(introspect::example(field.example, descriptor))
                .with_enum(
                    field
                        .enum_values
                        .map(|raw| introspect::enum_values(raw, descriptor))
                        .unwrap_or_default(),
                ),
        };
        Some(schema)
    }

    /// Whether a definition is stored under `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// The definition stored under `key`.
    pub fn get(&self, key: &str) -> Option<&Definition> {
        self.entries.get(key)
    }

    /// Number of registered definitions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when nothing has been registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// The table as it will appear in the document.
    pub fn definitions(&self) -> &BTreeMap<String, Definition> {
        &self.entries
    }

    /// Consumes the table, returning the `definitions` map.
    pub fn into_definitions(self) -> BTreeMap<String, Definition> {
        self.entries
    }
}

/// Inline `{type: string, enum: [...]}` for a unit-only enum.
pub(crate) fn enum_schema(enumeration: &EnumDescriptor) -> SchemaObject {
    SchemaObject::leaf(Some("string"), None)
        .with_enum(enumeration.variants.iter().map(|v| (*v).into()).collect())
        .with_description(enumeration.description)
}
