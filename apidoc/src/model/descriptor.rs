//! Closed classification of the type kinds that matter to a schema.

/// Lazily evaluated descriptor of a field's type.
///
/// Struct fields hold their type behind a function pointer so that
/// self-referential models can describe themselves without recursing.
pub type DescriptorFn = fn() -> TypeDescriptor;

/// Scalar kinds that map straight onto a Swagger data type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    /// Any signed or unsigned integer.
    Integer,
    /// `f32` / `f64`.
    Number,
    /// `bool`.
    Boolean,
    /// Strings and `char`.
    String,
    /// Key/value maps, documented as a free-form object.
    Map,
    /// A dynamically typed value such as `serde_json::Value`. Carries no type.
    Any,
}

impl Primitive {
    /// The Swagger `type` keyword for this primitive, if it has one.
    pub fn schema_type(&self) -> Option<&'static str> {
        match self {
            Self::Integer => Some("integer"),
            Self::Number => Some("number"),
            Self::Boolean => Some("boolean"),
            Self::String => Some("string"),
            Self::Map => Some("object"),
            Self::Any => None,
        }
    }
}

/// Well-known temporal types that get a fixed schema instead of introspection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Temporal {
    /// A point in time, documented as `{type: string, format: date-time}`.
    DateTime,
    /// A calendar date, documented as `{type: string, format: date}`.
    Date,
    /// A span of time, documented as `{type: integer}`.
    Duration,
}

impl Temporal {
    /// The `(type, format)` pair used for this temporal kind.
    pub fn schema_type(&self) -> (&'static str, Option<&'static str>) {
        match self {
            Self::DateTime => ("string", Some("date-time")),
            Self::Date => ("string", Some("date")),
            Self::Duration => ("integer", None),
        }
    }
}

/// Introspection result for one Rust type.
///
/// Produced by [`Model::descriptor`](crate::Model::descriptor). Object and
/// enum descriptors are built once per type and shared as `&'static`
/// references; the wrapper variants are cheap to rebuild.
#[derive(Debug, Clone)]
pub enum TypeDescriptor {
    /// A scalar leaf.
    Primitive(Primitive),
    /// A homogeneous sequence of the inner type.
    Array(Box<TypeDescriptor>),
    /// An optional or boxed value, documented as its pointee.
    Pointer(Box<TypeDescriptor>),
    /// A date-time, date, or duration.
    Temporal(Temporal),
    /// A struct with named fields, registered as a definition.
    Object(&'static ObjectDescriptor),
    /// A unit-only enum, documented inline as a string enumeration.
    Enum(&'static EnumDescriptor),
    /// A kind with no serialized form (`PhantomData`, channels, function pointers).
    Ignored(&'static str),
}

impl TypeDescriptor {
    /// Strips every pointer layer (`Option<Box<T>>` documents as `T`).
    pub fn deref_pointers(&self) -> &TypeDescriptor {
        let mut current = self;
        while let Self::Pointer(inner) = current {
            current = inner;
        }
        current
    }

    /// Returns `true` when the type, after pointer unwrapping, is a sequence.
    pub fn is_sequence(&self) -> bool {
        matches!(self.deref_pointers(), Self::Array(_))
    }

    /// The type a body or response schema points at: pointers are stripped,
    /// then one sequence layer, then pointers again.
    pub fn referent(&self) -> &TypeDescriptor {
        match self.deref_pointers() {
            Self::Array(element) => element.deref_pointers(),
            other => other,
        }
    }

    /// The object descriptor behind pointer layers, if this is an object.
    pub fn as_object(&self) -> Option<&'static ObjectDescriptor> {
        match self.deref_pointers() {
            Self::Object(object) => Some(object),
            _ => None,
        }
    }

    /// Short kind label for log lines.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Primitive(_) => "primitive",
            Self::Array(_) => "array",
            Self::Pointer(_) => "pointer",
            Self::Temporal(_) => "temporal",
            Self::Object(_) => "object",
            Self::Enum(_) => "enum",
            Self::Ignored(_) => "ignored",
        }
    }
}

/// Structure of a model with named fields.
#[derive(Debug)]
pub struct ObjectDescriptor {
    /// Unqualified type name, e.g. `Widget`.
    pub name: &'static str,
    /// `module_path!()` of the defining module.
    pub module_path: &'static str,
    /// Doc comment of the type.
    pub description: Option<&'static str>,
    /// Fields in declaration order.
    pub fields: Vec<FieldDescriptor>,
}

impl ObjectDescriptor {
    /// `module::path::Name`.
    pub fn qualified_name(&self) -> String {
        format!("{}::{}", self.module_path, self.name)
    }
}

/// A unit-only enum documented as a string enumeration.
#[derive(Debug)]
pub struct EnumDescriptor {
    /// Unqualified type name.
    pub name: &'static str,
    /// `module_path!()` of the defining module.
    pub module_path: &'static str,
    /// Doc comment of the type.
    pub description: Option<&'static str>,
    /// Serialized variant names, in declaration order.
    pub variants: Vec<&'static str>,
}

/// Per-field metadata extracted from a model's attributes.
///
/// Built by `#[derive(Model)]`, or by hand with the `const` builder methods:
///
/// ```rust
/// use apidoc::model::FieldDescriptor;
/// use apidoc::Model;
///
/// let field = FieldDescriptor::new("id", <i64 as Model>::descriptor)
///     .example("5")
///     .required();
/// assert_eq!(field.property_name(), Some("id"));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct FieldDescriptor {
    /// Declared field name.
    pub ident: &'static str,
    /// Serialized name override.
    pub rename: Option<&'static str>,
    /// Excluded from the schema entirely.
    pub skip: bool,
    /// Contents are merged into the owning definition instead of nesting.
    pub flatten: bool,
    /// Listed in the owning definition's `required` array.
    pub required: bool,
    /// Raw example text, parsed according to the resolved schema type.
    pub example: Option<&'static str>,
    /// `|`-separated allowed values.
    pub enum_values: Option<&'static str>,
    /// Property description.
    pub description: Option<&'static str>,
    /// The field's type.
    pub ty: DescriptorFn,
}

impl FieldDescriptor {
    /// A field serialized under its declared name with no extra metadata.
    pub const fn new(ident: &'static str, ty: DescriptorFn) -> Self {
        Self {
            ident,
            rename: None,
            skip: false,
            flatten: false,
            required: false,
            example: None,
            enum_values: None,
            description: None,
            ty,
        }
    }

    /// Serializes the field under `name`.
    pub const fn rename(mut self, name: &'static str) -> Self {
        self.rename = Some(name);
        self
    }

    /// Excludes the field from the schema.
    pub const fn skip(mut self) -> Self {
        self.skip = true;
        self
    }

    /// Merges the nested object's fields into the owner.
    pub const fn flatten(mut self) -> Self {
        self.flatten = true;
        self
    }

    /// Lists the field in the owner's `required` array.
    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Attaches a raw example, parsed against the field's schema type.
    pub const fn example(mut self, example: &'static str) -> Self {
        self.example = Some(example);
        self
    }

    /// Restricts the field to `|`-separated values.
    pub const fn enum_values(mut self, values: &'static str) -> Self {
        self.enum_values = Some(values);
        self
    }

    /// Sets the property description.
    pub const fn description(mut self, description: &'static str) -> Self {
        self.description = Some(description);
        self
    }

    /// The schema property name, or `None` when the field is skipped.
    pub fn property_name(&self) -> Option<&'static str> {
        if self.skip {
            return None;
        }
        Some(self.rename.unwrap_or(self.ident))
    }

    /// Evaluates the field's type descriptor.
    pub fn descriptor(&self) -> TypeDescriptor {
        (self.ty)()
    }
}
