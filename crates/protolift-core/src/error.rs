//! Error types for the protolift-core library.
//!
//! This module provides error handling using the `thiserror` crate. Every
//! variant here aborts a reconstruction; expected probe misses during field
//! window detection are not errors and never show up as one.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for protolift operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for all protolift operations
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// A root or dependency type name could not be resolved
    #[error("type '{name}' could not be resolved")]
    TypeNotFound {
        /// The fully-qualified name that was looked up
        name: String,
    },

    /// The type has no zero-argument factory to build a minimal instance
    #[error("type '{type_name}' has no zero-argument factory")]
    MissingFactory {
        /// The type that could not be instantiated
        type_name: String,
    },

    /// An integer read failed outside of window probing
    #[error("failed to read integer field '{field}' of '{type_name}'")]
    FieldRead {
        /// The declaring type
        type_name: String,
        /// The field that could not be read
        field: String,
    },

    /// A collection field did not declare its element type
    #[error("collection field '{field}' of '{type_name}' has no element type")]
    MissingElementType {
        /// The declaring type
        type_name: String,
        /// The collection field
        field: String,
    },

    /// An enum constant was missing or had no numeric value
    #[error("enum '{type_name}' has no numbered constant at index {index}")]
    EnumConstant {
        /// The enum type
        type_name: String,
        /// Declaration index of the constant
        index: usize,
    },

    /// Failed to read input file
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        /// Path to the file that failed to read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The class catalog is not valid JSON or does not match the catalog layout
    #[error("failed to parse class catalog: {0}")]
    CatalogParse(#[from] serde_json::Error),

    /// A schema writer rejected its input
    #[error("failed to write schema output")]
    Write(#[from] std::fmt::Error),
}

impl Error {
    /// Creates a new type resolution error
    pub fn type_not_found(name: impl Into<String>) -> Self {
        Self::TypeNotFound { name: name.into() }
    }

    /// Creates a new missing factory error
    pub fn missing_factory(type_name: impl Into<String>) -> Self {
        Self::MissingFactory {
            type_name: type_name.into(),
        }
    }

    /// Creates a new field read error
    pub fn field_read(type_name: impl Into<String>, field: impl Into<String>) -> Self {
        Self::FieldRead {
            type_name: type_name.into(),
            field: field.into(),
        }
    }

    /// Creates a new missing element type error
    pub fn missing_element_type(type_name: impl Into<String>, field: impl Into<String>) -> Self {
        Self::MissingElementType {
            type_name: type_name.into(),
            field: field.into(),
        }
    }

    /// Creates a new enum constant error
    pub fn enum_constant(type_name: impl Into<String>, index: usize) -> Self {
        Self::EnumConstant {
            type_name: type_name.into(),
            index,
        }
    }

    /// Creates a new file read error
    pub fn file_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileRead {
            path: path.into(),
            source,
        }
    }

    /// Returns true if a type name failed to resolve
    pub fn is_unresolved(&self) -> bool {
        matches!(self, Self::TypeNotFound { .. })
    }
}
