//! Type introspection for documented models.
//!
//! Rust has no runtime reflection, so every type that can appear in a request
//! or response body describes itself through the [`Model`] trait. The result is
//! a [`TypeDescriptor`], a closed classification of the kinds that matter to a
//! Swagger schema: primitives, sequences, pointers, temporal values, objects,
//! enumerations, and kinds with no serialized form.
//!
//! Implementations ship for the standard scalar, collection and smart-pointer
//! types, `chrono`'s date and time types, and `serde_json::Value`. User types
//! derive the trait:
//!
//! ```rust
//! use apidoc::{Model, TypeDescriptor};
//!
//! #[derive(Model)]
//! struct Widget {
//!     #[apidoc(example = "5")]
//!     id: i64,
//!     name: String,
//! }
//!
//! match Widget::descriptor() {
//!     TypeDescriptor::Object(object) => {
//!         assert_eq!(object.name, "Widget");
//!         assert_eq!(object.fields.len(), 2);
//!     }
//!     _ => unreachable!(),
//! }
//! ```

mod descriptor;
mod impls;

use std::any::TypeId;
use std::cell::RefCell;
use std::fmt;

use tracing::warn;

pub use descriptor::{
    DescriptorFn, EnumDescriptor, FieldDescriptor, ObjectDescriptor, Primitive, Temporal,
    TypeDescriptor,
};

/// A type that can describe its own schema-relevant shape.
pub trait Model: 'static {
    /// Returns the descriptor for this type.
    fn descriptor() -> TypeDescriptor;
}

/// Placeholder type for fields excluded from the schema.
///
/// Skipped fields keep their metadata without requiring their type to
/// implement [`Model`].
pub fn skipped_descriptor() -> TypeDescriptor {
    TypeDescriptor::Ignored("skipped")
}

thread_local! {
    static RESOLVING: RefCell<Vec<TypeId>> = const { RefCell::new(Vec::new()) };
}

/// Pops the transparent type off the resolving stack, even on unwind.
struct ResolvingGuard(TypeId);

impl Drop for ResolvingGuard {
    fn drop(&mut self) {
        RESOLVING.with(|stack| stack.borrow_mut().retain(|seen| *seen != self.0));
    }
}

/// Descriptor of a transparent model `T` wrapping the type behind `inner`.
///
/// Transparent models have no definition of their own to break a cycle, so
/// when resolving `inner` reaches `T` again the repeated occurrence is
/// documented as an untyped value.
pub fn transparent_descriptor<T: Model>(inner: DescriptorFn) -> TypeDescriptor {
    let id = TypeId::of::<T>();
    let reentered = RESOLVING.with(|stack| {
        let mut stack = stack.borrow_mut();
        if stack.contains(&id) {
            true
        } else {
            stack.push(id);
            false
        }
    });

    if reentered {
        warn!(
            model = std::any::type_name::<T>(),
            "Transparent model reaches itself, documenting the cycle as untyped"
        );
        return TypeDescriptor::Primitive(Primitive::Any);
    }

    let _guard = ResolvingGuard(id);
    inner()
}

/// A reference to a body or response type, captured by type rather than value.
#[derive(Clone, Copy)]
pub struct TypeRef {
    descriptor: DescriptorFn,
    type_name: &'static str,
}

impl TypeRef {
    /// Captures `T`.
    pub fn of<T: Model>() -> Self {
        Self {
            descriptor: T::descriptor,
            type_name: std::any::type_name::<T>(),
        }
    }

    /// Captures the type of a representative value. The value itself is not
    /// inspected.
    pub fn of_val<T: Model>(_value: &T) -> Self {
        Self::of::<T>()
    }

    /// Evaluates the captured type's descriptor.
    pub fn descriptor(&self) -> TypeDescriptor {
        (self.descriptor)()
    }

    /// The Rust type name, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

impl fmt::Debug for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TypeRef").field(&self.type_name).finish()
    }
}
