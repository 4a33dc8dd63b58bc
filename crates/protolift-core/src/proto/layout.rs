//! Field layout heuristic for generated message classes.
//!
//! Generated message classes declare their schema fields as adjacent pairs:
//! an integer constant holding the field number, immediately followed by the
//! value holder whose declared type is the field's runtime type.
//!
//! ```text
//!   [internal prefix ...] (NUMBER, value) (NUMBER, value) ... [3 internal fields]
//! ```
//!
//! The length of the prefix differs between generated classes, so the window
//! start is found by probing. The three trailing fields are bookkeeping the
//! generator always appends. Nothing checks that a given class actually
//! follows this layout; one that doesn't yields truncated or wrong fields.

use super::block::{FieldLine, Label, MessageBlock};
use super::types;
use super::ReconstructorConfig;
use crate::error::{Error, Result};
use crate::introspect::{simple_name, FieldDescriptor, TypeDescriptor, TypeProvider};
use std::ops::Range;
use tracing::trace;

/// Number of internal fields the generator appends after the last field pair
pub const GENERATED_TRAILING_FIELDS: usize = 3;

/// Policy locating the schema-visible field pairs in a declared field list
pub trait WindowDetector {
    /// Returns the index range holding `(number, value)` pairs
    fn detect<P: TypeProvider>(&self, provider: &P, ty: &TypeDescriptor) -> Result<Range<usize>>;
}

/// Finds the window start by probing for the first integer-readable field.
///
/// A fresh minimal instance is built for every probed index; failing to build
/// one is fatal. If no field reads as an integer the window is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeWindow {
    trailing: usize,
}

impl Default for ProbeWindow {
    fn default() -> Self {
        Self {
            trailing: GENERATED_TRAILING_FIELDS,
        }
    }
}

impl ProbeWindow {
    /// Creates a detector for the standard generated layout
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of trailing internal fields
    pub fn trailing(mut self, trailing: usize) -> Self {
        self.trailing = trailing;
        self
    }
}

impl WindowDetector for ProbeWindow {
    fn detect<P: TypeProvider>(&self, provider: &P, ty: &TypeDescriptor) -> Result<Range<usize>> {
        let mut start = ty.fields.len();
        for (i, field) in ty.fields.iter().enumerate() {
            let instance = provider.instantiate(ty)?;
            if provider.probe_int(&instance, field) {
                start = i;
                break;
            }
            trace!("Probe miss at {}.{}", ty.name, field.name);
        }

        Ok(start..ty.fields.len().saturating_sub(self.trailing))
    }
}

/// Skips a known number of leading and trailing fields without probing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedWindow {
    leading: usize,
    trailing: usize,
}

impl FixedWindow {
    /// Creates a fixed window
    pub fn new(leading: usize, trailing: usize) -> Self {
        Self { leading, trailing }
    }
}

impl WindowDetector for FixedWindow {
    fn detect<P: TypeProvider>(&self, _provider: &P, ty: &TypeDescriptor) -> Result<Range<usize>> {
        let len = ty.fields.len();
        Ok(self.leading.min(len)..len.saturating_sub(self.trailing))
    }
}

/// Fields recovered from one message class
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecoveredMessage {
    /// The message block
    pub block: MessageBlock,
    /// Fully-qualified names of referenced message and enum types, in discovery order
    pub dependencies: Vec<String>,
}

/// Recovers schema fields from message descriptors
pub struct FieldLayout<'a, P, D> {
    provider: &'a P,
    detector: &'a D,
    config: &'a ReconstructorConfig,
}

impl<'a, P: TypeProvider, D: WindowDetector> FieldLayout<'a, P, D> {
    /// Creates a heuristic over the given provider and window policy
    pub fn new(provider: &'a P, detector: &'a D, config: &'a ReconstructorConfig) -> Self {
        Self {
            provider,
            detector,
            config,
        }
    }

    /// Recover the field lines of `ty`
    pub fn recover(&self, ty: &TypeDescriptor) -> Result<RecoveredMessage> {
        let window = self.detector.detect(self.provider, ty)?;
        trace!("Field window of {} is {:?}", ty.name, window);

        let mut fields = Vec::new();
        let mut dependencies = Vec::new();
        let mut cursor = window.start;

        // The value holder may land on index `window.end` for odd windows.
        while cursor < window.end {
            let (Some(number_holder), Some(value_holder)) =
                (ty.fields.get(cursor), ty.fields.get(cursor + 1))
            else {
                break;
            };
            cursor += 2;

            let instance = self.provider.instantiate(ty)?;
            let number = self.provider.read_int(&instance, number_holder)?;

            let line = self.classify(ty, value_holder, number, &mut dependencies)?;
            trace!(
                "{}: {} {} {} = {}",
                ty.name,
                line.label.as_str(),
                line.type_name,
                line.name,
                line.number
            );
            fields.push(line);
        }

        Ok(RecoveredMessage {
            block: MessageBlock {
                name: ty.simple_name().to_string(),
                fields,
            },
            dependencies,
        })
    }

    fn classify(
        &self,
        ty: &TypeDescriptor,
        field: &FieldDescriptor,
        number: i32,
        dependencies: &mut Vec<String>,
    ) -> Result<FieldLine> {
        let type_simple = field.type_simple_name();
        let name = field.stripped_name();

        if self.config.is_string_list(type_simple) {
            return Ok(FieldLine {
                label: Label::Repeated,
                type_name: "string".to_string(),
                name,
                number,
            });
        }

        if self.config.is_list(type_simple) {
            let element = field
                .element_type
                .as_deref()
                .ok_or_else(|| Error::missing_element_type(&ty.name, &field.name))?;
            return Ok(FieldLine {
                label: Label::Repeated,
                type_name: Self::type_text(element, dependencies),
                name,
                number,
            });
        }

        Ok(FieldLine {
            label: Label::Optional,
            type_name: Self::type_text(&field.type_name, dependencies),
            name,
            number,
        })
    }

    /// Scalar keyword, or the simple name of a referenced type after queueing it
    fn type_text(qualified: &str, dependencies: &mut Vec<String>) -> String {
        let simple = simple_name(qualified);
        if types::is_scalar(simple) {
            types::scalar_type_text(simple)
        } else {
            dependencies.push(qualified.to_string());
            simple.to_string()
        }
    }
}
