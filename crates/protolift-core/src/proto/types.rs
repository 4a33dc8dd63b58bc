//! Scalar runtime type names and their schema keywords.

/// Runtime scalar simple name to schema keyword.
///
/// `Double` maps to `Double`, unlike every other entry. The casing is kept as
/// the generator-side tool emitted it.
const SCALAR_KEYWORDS: &[(&str, &str)] = &[
    ("float", "float"),
    ("Float", "float"),
    ("double", "double"),
    ("Double", "Double"),
    ("int", "int64"),
    ("Integer", "int64"),
    ("long", "int64"),
    ("Long", "int64"),
    ("boolean", "bool"),
    ("Boolean", "bool"),
    // Unsafe: generated string fields are declared as Object, and so is
    // anything else the generator erases.
    ("Object", "string"),
    ("ByteString", "bytes"),
];

/// Scalar simple names with no keyword of their own
const UNMAPPED_SCALARS: &[&str] = &["LazyStringList"];

/// Returns true if `simple_name` names a scalar, never a message or enum
pub fn is_scalar(simple_name: &str) -> bool {
    keyword(simple_name).is_some() || UNMAPPED_SCALARS.contains(&simple_name)
}

/// Schema keyword for a scalar simple name
pub fn keyword(simple_name: &str) -> Option<&'static str> {
    SCALAR_KEYWORDS
        .iter()
        .find(|(runtime, _)| *runtime == simple_name)
        .map(|(_, keyword)| *keyword)
}

/// Schema type text for a scalar: its keyword, or the simple name unchanged
pub(crate) fn scalar_type_text(simple_name: &str) -> String {
    keyword(simple_name).unwrap_or(simple_name).to_string()
}
