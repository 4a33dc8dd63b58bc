//! Proto schema reconstruction module.
//!
//! This module rebuilds a proto-like schema for a generated message class and
//! every message or enum class it transitively references.
//!
//! ## Architecture
//!
//! The reconstruction process is handled by [`Reconstructor`], which:
//!
//! 1. Seeds a pending queue with the root type name
//! 2. Resolves each dequeued name through a [`TypeProvider`]
//! 3. Recovers enum constants, or message fields via [`FieldLayout`]
//! 4. Hands each finished block to a [`SchemaWriter`] and queues newly
//!    referenced types
//!
//! Each type is emitted once no matter how many fields reference it, which
//! also makes cyclic references terminate.
//!
//! ## Extensibility
//!
//! The [`SchemaWriter`] trait allows customization of how blocks are written,
//! and the [`WindowDetector`] trait isolates the generator-specific layout
//! convention used to find field pairs.

mod block;
mod layout;
mod types;
mod writer;

use crate::error::Result;
use crate::introspect::{TypeDescriptor, TypeProvider};
use std::collections::{HashSet, VecDeque};
use tracing::{debug, trace};

pub use block::{EnumBlock, EnumValue, FieldLine, Label, MessageBlock};
pub use layout::{
    FieldLayout, FixedWindow, ProbeWindow, RecoveredMessage, WindowDetector,
    GENERATED_TRAILING_FIELDS,
};
pub use types::{is_scalar, keyword};
pub use writer::{NullWriter, SchemaWriter, StatsWriter, TextWriter};

/// Configuration for schema reconstruction
#[derive(Debug, Clone)]
pub struct ReconstructorConfig {
    /// Indentation string (default: 2 spaces)
    pub indent_str: String,
    /// Simple type names of specialized string list containers
    pub string_list_types: Vec<String>,
    /// Simple type names of generic list containers
    pub list_types: Vec<String>,
}

impl Default for ReconstructorConfig {
    fn default() -> Self {
        Self {
            indent_str: "  ".to_string(),
            string_list_types: vec!["LazyStringList".to_string()],
            list_types: vec!["List".to_string()],
        }
    }
}

impl ReconstructorConfig {
    /// Creates a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the indentation string
    pub fn indent_str(mut self, s: impl Into<String>) -> Self {
        self.indent_str = s.into();
        self
    }

    /// Sets the string list container names
    pub fn string_list_types<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.string_list_types = names.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the generic list container names
    pub fn list_types<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.list_types = names.into_iter().map(Into::into).collect();
        self
    }

    pub(crate) fn is_string_list(&self, simple_name: &str) -> bool {
        self.string_list_types.iter().any(|n| n == simple_name)
    }

    pub(crate) fn is_list(&self, simple_name: &str) -> bool {
        self.list_types.iter().any(|n| n == simple_name)
    }
}

/// Worklist state owned by a single reconstruction call
#[derive(Debug, Default)]
struct Traversal {
    /// Names waiting to be dispatched; may hold duplicates
    pending: VecDeque<String>,
    /// Names whose block was already written
    finished: HashSet<String>,
}

impl Traversal {
    fn seeded(root: &str) -> Self {
        let mut traversal = Self::default();
        traversal.pending.push_back(root.to_string());
        traversal
    }
}

/// Reconstructs schemas for generated classes reachable from a root type
#[derive(Debug)]
pub struct Reconstructor<P, D = ProbeWindow> {
    provider: P,
    detector: D,
    config: ReconstructorConfig,
}

impl<P: TypeProvider> Reconstructor<P> {
    /// Creates a reconstructor using the standard generated field layout
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            detector: ProbeWindow::default(),
            config: ReconstructorConfig::default(),
        }
    }
}

impl<P: TypeProvider, D: WindowDetector> Reconstructor<P, D> {
    /// Replaces the field window policy
    pub fn with_detector<E: WindowDetector>(self, detector: E) -> Reconstructor<P, E> {
        Reconstructor {
            provider: self.provider,
            detector,
            config: self.config,
        }
    }

    /// Creates a new reconstructor with custom config
    pub fn with_config(mut self, config: ReconstructorConfig) -> Self {
        self.config = config;
        self
    }

    /// Returns the type provider
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Returns the configuration
    pub fn config(&self) -> &ReconstructorConfig {
        &self.config
    }

    /// Reconstruct the schema of `root` and its dependencies as a string
    pub fn reconstruct(&self, root: &str) -> Result<String> {
        let mut output = String::new();
        let mut writer = TextWriter::new(&mut output, &self.config.indent_str);
        self.reconstruct_with(root, &mut writer)?;
        Ok(output)
    }

    /// Reconstruct starting from an already resolved descriptor
    pub fn reconstruct_type(&self, root: &TypeDescriptor) -> Result<String> {
        self.reconstruct(&root.name)
    }

    /// Reconstruct, handing every finished block to `writer` in visitation order.
    ///
    /// On error nothing further is written; blocks already handed to `writer`
    /// stay there.
    pub fn reconstruct_with<W: SchemaWriter>(&self, root: &str, writer: &mut W) -> Result<()> {
        let mut traversal = Traversal::seeded(root);
        let layout = FieldLayout::new(&self.provider, &self.detector, &self.config);

        while let Some(name) = traversal.pending.pop_front() {
            let ty = self.provider.resolve(&name)?;
            if traversal.finished.contains(&ty.name) {
                trace!("Skipping finished type {}", ty.name);
                continue;
            }

            if ty.is_enum() {
                let block = self.build_enum(&ty)?;
                debug!("Recovered enum {} ({} values)", ty.name, block.values.len());
                writer.write_enum(&block)?;
            } else {
                let recovered = layout.recover(&ty)?;
                debug!(
                    "Recovered message {} ({} fields, {} references)",
                    ty.name,
                    recovered.block.fields.len(),
                    recovered.dependencies.len()
                );
                writer.write_message(&recovered.block)?;
                traversal.pending.extend(recovered.dependencies);
            }

            traversal.finished.insert(ty.name);
        }

        debug!(
            "Reconstructed {} types reachable from {}",
            traversal.finished.len(),
            root
        );
        Ok(())
    }

    /// Build an enum block.
    ///
    /// The generator declares `2N` public fields for `N` constants: the
    /// constants themselves, then their `_VALUE` mirrors. Names come from the
    /// first half; numbers come from the constants' number accessor.
    fn build_enum(&self, ty: &TypeDescriptor) -> Result<EnumBlock> {
        let count = ty.fields.len() / 2;
        let values = ty.fields[..count]
            .iter()
            .enumerate()
            .map(|(i, field)| {
                Ok(EnumValue {
                    name: field.name.clone(),
                    number: self.provider.enum_number(ty, i)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(EnumBlock {
            name: ty.simple_name().to_string(),
            values,
        })
    }
}
