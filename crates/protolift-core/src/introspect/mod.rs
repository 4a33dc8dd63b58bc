//! Runtime type introspection abstraction.
//!
//! The reconstruction algorithm never talks to a host runtime directly. It
//! sees types through [`TypeDescriptor`] / [`FieldDescriptor`] values and asks
//! a [`TypeProvider`] for the few dynamic operations it needs:
//!
//! - resolve a fully-qualified name to a descriptor
//! - build a minimal instance through the zero-argument factory
//! - read an integer-valued field off such an instance
//! - read the numeric value of an enum constant
//!
//! One adapter is shipped: [`catalog::ClassCatalog`], backed by a JSON dump of
//! class layouts. Other hosts plug in by implementing [`TypeProvider`].

pub mod catalog;

use crate::error::Result;
use serde::{Deserialize, Serialize};

pub use catalog::{CatalogInstance, ClassCatalog, ClassEntry, ConstantEntry, FieldEntry};

/// Kind of a generated type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    /// A message class
    Message,
    /// An enumeration class
    Enum,
}

/// A declared field of a generated type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Declared field name, as it appears in the runtime layout
    pub name: String,
    /// Fully-qualified runtime type name
    pub type_name: String,
    /// Fully-qualified element type, for collections
    pub element_type: Option<String>,
}

impl FieldDescriptor {
    /// Creates a field with no element type
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            element_type: None,
        }
    }

    /// Sets the collection element type
    pub fn element(mut self, element_type: impl Into<String>) -> Self {
        self.element_type = Some(element_type.into());
        self
    }

    /// Simple name of the declared runtime type
    pub fn type_simple_name(&self) -> &str {
        simple_name(&self.type_name)
    }

    /// Field name with every `_` separator removed
    pub fn stripped_name(&self) -> String {
        self.name.replace('_', "")
    }
}

/// Introspected view of a generated type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDescriptor {
    /// Fully-qualified type name
    pub name: String,
    /// Message or enum
    pub kind: TypeKind,
    /// Declared fields in stable declaration order
    pub fields: Vec<FieldDescriptor>,
}

impl TypeDescriptor {
    /// Creates a message descriptor
    pub fn message(name: impl Into<String>, fields: Vec<FieldDescriptor>) -> Self {
        Self {
            name: name.into(),
            kind: TypeKind::Message,
            fields,
        }
    }

    /// Creates an enum descriptor
    pub fn enumeration(name: impl Into<String>, fields: Vec<FieldDescriptor>) -> Self {
        Self {
            name: name.into(),
            kind: TypeKind::Enum,
            fields,
        }
    }

    /// Returns true for enumeration types
    pub fn is_enum(&self) -> bool {
        self.kind == TypeKind::Enum
    }

    /// Simple (unqualified) type name
    pub fn simple_name(&self) -> &str {
        simple_name(&self.name)
    }
}

/// Host capabilities the reconstruction depends on.
///
/// Implementations are expected to be deterministic and to return promptly.
/// `probe_int` must not fail: a field that cannot be read as an integer is
/// reported as `false`.
pub trait TypeProvider {
    /// Minimal instance produced by the type's zero-argument factory
    type Instance;

    /// Resolve a fully-qualified name
    fn resolve(&self, name: &str) -> Result<TypeDescriptor>;

    /// Build a minimal instance of `ty`
    fn instantiate(&self, ty: &TypeDescriptor) -> Result<Self::Instance>;

    /// Read `field` as a plain integer off `instance`
    fn read_int(&self, instance: &Self::Instance, field: &FieldDescriptor) -> Result<i32>;

    /// Returns true if `field` reads as a plain integer off `instance`
    fn probe_int(&self, instance: &Self::Instance, field: &FieldDescriptor) -> bool {
        self.read_int(instance, field).is_ok()
    }

    /// Numeric value of the `index`-th enum constant in declaration order
    fn enum_number(&self, ty: &TypeDescriptor, index: usize) -> Result<i32>;
}

impl<P: TypeProvider + ?Sized> TypeProvider for &P {
    type Instance = P::Instance;

    fn resolve(&self, name: &str) -> Result<TypeDescriptor> {
        (**self).resolve(name)
    }

    fn instantiate(&self, ty: &TypeDescriptor) -> Result<Self::Instance> {
        (**self).instantiate(ty)
    }

    fn read_int(&self, instance: &Self::Instance, field: &FieldDescriptor) -> Result<i32> {
        (**self).read_int(instance, field)
    }

    fn probe_int(&self, instance: &Self::Instance, field: &FieldDescriptor) -> bool {
        (**self).probe_int(instance, field)
    }

    fn enum_number(&self, ty: &TypeDescriptor, index: usize) -> Result<i32> {
        (**self).enum_number(ty, index)
    }
}

/// Strip the package and any outer class from a fully-qualified name.
///
/// `com.example.Outer$Inner` becomes `Inner`, `int` stays `int`.
pub fn simple_name(qualified: &str) -> &str {
    let tail = qualified.rsplit('.').next().unwrap_or(qualified);
    tail.rsplit('$').next().unwrap_or(tail)
}
