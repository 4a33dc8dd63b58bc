//! Class catalog adapter.
//!
//! A catalog is a JSON dump of generated class layouts, written by a dumper
//! running next to the host runtime. It records exactly what reflection would
//! report: declared fields in order, which of them carry a readable integer
//! constant, whether the class has a zero-argument factory, and enum constant
//! numbers. Message entries list declared fields; enum entries list public
//! fields, which the generator emits as the constants followed by their
//! `_VALUE` mirrors.
//!
//! ```json
//! {
//!   "types": [
//!     {
//!       "name": "com.example.Foo",
//!       "kind": "message",
//!       "fields": [
//!         { "name": "bitField0_", "type": "int" },
//!         { "name": "LABEL_FIELD_NUMBER", "type": "int", "value": 1 },
//!         { "name": "label_", "type": "long" }
//!       ]
//!     }
//!   ]
//! }
//! ```

use super::{FieldDescriptor, TypeDescriptor, TypeKind, TypeProvider};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

/// One declared field in a catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldEntry {
    /// Declared field name
    pub name: String,
    /// Fully-qualified runtime type
    #[serde(rename = "type")]
    pub type_name: String,
    /// Collection element type
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub element: Option<String>,
    /// Integer value readable off a minimal instance
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<i32>,
}

/// One enum constant in a catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstantEntry {
    /// Constant name
    pub name: String,
    /// Value returned by the constant's number accessor; absent when it throws
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<i32>,
}

/// A single class in the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassEntry {
    /// Fully-qualified class name
    pub name: String,
    /// Message or enum
    pub kind: TypeKind,
    /// Whether the zero-argument factory exists
    #[serde(default = "default_factory")]
    pub factory: bool,
    /// Declared fields in declaration order
    #[serde(default)]
    pub fields: Vec<FieldEntry>,
    /// Enum constants in declaration order
    #[serde(default)]
    pub constants: Vec<ConstantEntry>,
}

fn default_factory() -> bool {
    true
}

impl ClassEntry {
    fn descriptor(&self) -> TypeDescriptor {
        let fields = self
            .fields
            .iter()
            .map(|f| FieldDescriptor {
                name: f.name.clone(),
                type_name: f.type_name.clone(),
                element_type: f.element.clone(),
            })
            .collect();

        TypeDescriptor {
            name: self.name.clone(),
            kind: self.kind,
            fields,
        }
    }
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    types: Vec<ClassEntry>,
}

/// Minimal instance handed out by [`ClassCatalog`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogInstance {
    type_name: String,
}

impl CatalogInstance {
    /// Name of the instantiated class
    pub fn type_name(&self) -> &str {
        &self.type_name
    }
}

/// [`TypeProvider`] backed by a class layout dump
#[derive(Debug, Clone, Default)]
pub struct ClassCatalog {
    classes: HashMap<String, ClassEntry>,
}

impl ClassCatalog {
    /// Creates an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a catalog from JSON text
    pub fn from_json_str(json: &str) -> Result<Self> {
        let file: CatalogFile = serde_json::from_str(json)?;
        let mut catalog = Self::new();
        for entry in file.types {
            catalog.insert(entry);
        }
        Ok(catalog)
    }

    /// Reads and parses a catalog file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| Error::file_read(path, e))?;
        let catalog = Self::from_json_str(&json)?;
        debug!("Loaded {} classes from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    /// Adds a class, replacing any previous entry of the same name
    pub fn insert(&mut self, entry: ClassEntry) {
        self.classes.insert(entry.name.clone(), entry);
    }

    /// Merges another catalog into this one; entries from `other` win
    pub fn extend(&mut self, other: ClassCatalog) {
        self.classes.extend(other.classes);
    }

    /// Number of classes
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Returns true if the catalog holds no classes
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Returns true if `name` is known
    pub fn contains(&self, name: &str) -> bool {
        self.classes.contains_key(name)
    }

    fn entry(&self, name: &str) -> Result<&ClassEntry> {
        self.classes
            .get(name)
            .ok_or_else(|| Error::type_not_found(name))
    }
}

impl TypeProvider for ClassCatalog {
    type Instance = CatalogInstance;

    fn resolve(&self, name: &str) -> Result<TypeDescriptor> {
        self.entry(name).map(ClassEntry::descriptor)
    }

    fn instantiate(&self, ty: &TypeDescriptor) -> Result<CatalogInstance> {
        let entry = self.entry(&ty.name)?;
        if !entry.factory {
            return Err(Error::missing_factory(&ty.name));
        }
        Ok(CatalogInstance {
            type_name: entry.name.clone(),
        })
    }

    fn read_int(&self, instance: &CatalogInstance, field: &FieldDescriptor) -> Result<i32> {
        self.entry(&instance.type_name)?
            .fields
            .iter()
            .find(|f| f.name == field.name)
            .and_then(|f| f.value)
            .ok_or_else(|| Error::field_read(&instance.type_name, &field.name))
    }

    fn enum_number(&self, ty: &TypeDescriptor, index: usize) -> Result<i32> {
        self.entry(&ty.name)?
            .constants
            .get(index)
            .and_then(|c| c.number)
            .ok_or_else(|| Error::enum_constant(&ty.name, index))
    }
}
