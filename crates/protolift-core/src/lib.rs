//! # protolift-core
//!
//! A library for reconstructing Protocol Buffer schemas from the runtime
//! layout of generated message classes, when the original `.proto` sources
//! are gone.
//!
//! This crate provides the core functionality for:
//! - Describing generated classes through a host-neutral introspection trait
//! - Recovering schema fields from the generator's field layout convention
//! - Walking every message and enum type reachable from a root type
//! - Rendering the recovered types as proto-like schema text
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`introspect`]: Type descriptors, the [`TypeProvider`] trait and the class catalog adapter
//! - [`proto`]: Field layout heuristic, worklist driver and schema writers
//! - [`error`]: Error types and handling
//!
//! ## Example
//!
//! ```no_run
//! use protolift_core::{ClassCatalog, Reconstructor};
//!
//! let catalog = ClassCatalog::from_path("./classes.json")?;
//! let reconstructor = Reconstructor::new(catalog);
//! println!("{}", reconstructor.reconstruct("com.example.Order")?);
//! # Ok::<(), protolift_core::Error>(())
//! ```
//!
//! ## Extensibility
//!
//! The library provides several traits for customization:
//!
//! - [`TypeProvider`]: Plug in another host's introspection facility
//! - [`WindowDetector`]: Override the generator's field layout convention
//! - [`SchemaWriter`]: Customize how recovered blocks are written
//!

#![deny(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unreachable_pub)]

pub mod error;
pub mod introspect;
pub mod proto;

// Re-export primary types for convenience
pub use error::{Error, Result};
pub use introspect::{ClassCatalog, FieldDescriptor, TypeDescriptor, TypeKind, TypeProvider};
pub use proto::{
    FixedWindow, NullWriter, ProbeWindow, Reconstructor, ReconstructorConfig, SchemaWriter,
    StatsWriter, TextWriter, WindowDetector,
};

/// Crate version for programmatic access
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
