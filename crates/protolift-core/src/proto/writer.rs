//! Extensible schema writing traits.
//!
//! The reconstructor hands every finished block to a [`SchemaWriter`] the
//! moment the type is fully processed, in visitation order. [`TextWriter`]
//! renders the proto-like text; the other writers exist for tooling.

use super::block::{EnumBlock, MessageBlock};
use std::fmt::{Result, Write};

/// Trait for receiving recovered schema blocks.
///
/// # Example
///
/// ```
/// use protolift_core::proto::{MessageBlock, SchemaWriter};
///
/// struct NameCollector(Vec<String>);
///
/// impl SchemaWriter for NameCollector {
///     fn write_message(&mut self, message: &MessageBlock) -> std::fmt::Result {
///         self.0.push(message.name.clone());
///         Ok(())
///     }
/// }
/// ```
pub trait SchemaWriter {
    /// Write a message block
    fn write_message(&mut self, message: &MessageBlock) -> Result {
        let _ = message;
        Ok(())
    }

    /// Write an enum block
    fn write_enum(&mut self, enum_block: &EnumBlock) -> Result {
        let _ = enum_block;
        Ok(())
    }
}

/// A no-op writer that discards all output
pub struct NullWriter;

impl SchemaWriter for NullWriter {}

/// A writer that collects statistics about the recovered schema
#[derive(Debug, Default)]
pub struct StatsWriter {
    /// Number of messages
    pub message_count: usize,
    /// Number of message fields
    pub field_count: usize,
    /// Number of enums
    pub enum_count: usize,
    /// Number of enum values
    pub value_count: usize,
}

impl SchemaWriter for StatsWriter {
    fn write_message(&mut self, message: &MessageBlock) -> Result {
        self.message_count += 1;
        self.field_count += message.fields.len();
        Ok(())
    }

    fn write_enum(&mut self, enum_block: &EnumBlock) -> Result {
        self.enum_count += 1;
        self.value_count += enum_block.values.len();
        Ok(())
    }
}

/// Renders blocks as schema text.
///
/// Lines are joined with `\n` and every block is closed by `}` plus a blank
/// line, so the text ends in `}\n` and blocks are separated by one empty line.
pub struct TextWriter<'a, W: Write> {
    writer: &'a mut W,
    indent_str: &'a str,
    started: bool,
}

impl<'a, W: Write> TextWriter<'a, W> {
    /// Creates a text writer with the given field indentation
    pub fn new(writer: &'a mut W, indent_str: &'a str) -> Self {
        Self {
            writer,
            indent_str,
            started: false,
        }
    }

    fn open(&mut self, keyword: &str, name: &str) -> Result {
        if self.started {
            self.writer.write_char('\n')?;
        }
        self.started = true;
        write!(self.writer, "{} {} {{", keyword, name)
    }

    fn close(&mut self) -> Result {
        self.writer.write_str("\n}\n")
    }
}

impl<W: Write> SchemaWriter for TextWriter<'_, W> {
    fn write_message(&mut self, message: &MessageBlock) -> Result {
        self.open("message", &message.name)?;
        for field in &message.fields {
            write!(
                self.writer,
                "\n{}{} {} {} = {};",
                self.indent_str,
                field.label.as_str(),
                field.type_name,
                field.name,
                field.number
            )?;
        }
        self.close()
    }

    fn write_enum(&mut self, enum_block: &EnumBlock) -> Result {
        self.open("enum", &enum_block.name)?;
        for value in &enum_block.values {
            write!(
                self.writer,
                "\n{}{} = {};",
                self.indent_str, value.name, value.number
            )?;
        }
        self.close()
    }
}
