//! Recovered schema blocks, one per processed type.

/// Field cardinality keyword
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Label {
    /// Singular field
    Optional,
    /// List field
    Repeated,
}

impl Label {
    /// Returns the keyword as written in the schema
    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Optional => "optional",
            Label::Repeated => "repeated",
        }
    }
}

/// A recovered message field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldLine {
    /// Cardinality
    pub label: Label,
    /// Scalar keyword or referenced type's simple name
    pub type_name: String,
    /// Field name with separators stripped
    pub name: String,
    /// Field number as read from the runtime
    pub number: i32,
}

/// A recovered enum constant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumValue {
    /// Constant name
    pub name: String,
    /// Constant number
    pub number: i32,
}

/// A recovered message type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageBlock {
    /// Simple type name
    pub name: String,
    /// Fields in declaration order
    pub fields: Vec<FieldLine>,
}

/// A recovered enum type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumBlock {
    /// Simple type name
    pub name: String,
    /// Constants in declaration order
    pub values: Vec<EnumValue>,
}
