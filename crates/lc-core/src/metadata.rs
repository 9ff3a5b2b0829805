//! Typed metadata values and type tags.
//!
//! Metadata rows are persisted as `(key, value, type)` text triples. Inside
//! the crate a value is a [`MetadataValue`] and a tag a [`TypeTag`]; both are
//! rendered to their canonical text form only when a row is written. Values
//! are never parsed back from text on read.

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A metadata value before serialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetadataValue {
    Int(i64),
    Float(f64),
    Bool(bool),
    Text(String),
    List(Vec<MetadataValue>),
}

impl MetadataValue {
    /// Canonical stored text.
    ///
    /// Floats always carry a decimal point or exponent (`3.0`, not `3`) so an
    /// integral float never reads back like an integer. Lists, including
    /// nested lists, become JSON arrays.
    pub fn to_text(&self) -> String {
        match self {
            MetadataValue::Int(v) => v.to_string(),
            MetadataValue::Float(v) => format!("{:?}", v),
            MetadataValue::Bool(v) => v.to_string(),
            MetadataValue::Text(v) => v.clone(),
            MetadataValue::List(_) => self.to_json().to_string(),
        }
    }

    /// JSON form, used for list rendering.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            MetadataValue::Int(v) => serde_json::Value::from(*v),
            MetadataValue::Float(v) => serde_json::Number::from_f64(*v)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            MetadataValue::Bool(v) => serde_json::Value::Bool(*v),
            MetadataValue::Text(v) => serde_json::Value::String(v.clone()),
            MetadataValue::List(items) => {
                serde_json::Value::Array(items.iter().map(MetadataValue::to_json).collect())
            }
        }
    }

    /// Build a list value from anything convertible item by item.
    pub fn list<T: Into<MetadataValue>>(items: impl IntoIterator<Item = T>) -> Self {
        MetadataValue::List(items.into_iter().map(Into::into).collect())
    }
}

impl fmt::Display for MetadataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

impl From<i64> for MetadataValue {
    fn from(v: i64) -> Self {
        MetadataValue::Int(v)
    }
}

impl From<f64> for MetadataValue {
    fn from(v: f64) -> Self {
        MetadataValue::Float(v)
    }
}

impl From<bool> for MetadataValue {
    fn from(v: bool) -> Self {
        MetadataValue::Bool(v)
    }
}

impl From<&str> for MetadataValue {
    fn from(v: &str) -> Self {
        MetadataValue::Text(v.to_string())
    }
}

impl From<String> for MetadataValue {
    fn from(v: String) -> Self {
        MetadataValue::Text(v)
    }
}

impl<T: Into<MetadataValue>> From<Vec<T>> for MetadataValue {
    fn from(v: Vec<T>) -> Self {
        MetadataValue::list(v)
    }
}

/// Unit or category label stored in a metadata row's `type` column.
///
/// The tag is descriptive only; it never drives value parsing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum TypeTag {
    /// `int`
    Int,
    /// `float`
    Float,
    /// `str`
    Str,
    /// `bool`
    Bool,
    /// `list`
    List,
    /// `mm`
    Millimetres,
    /// `matrix`
    Matrix,
    /// Any other caller label, stored verbatim.
    Custom(String),
}

impl TypeTag {
    /// Stored text of the tag.
    pub fn as_str(&self) -> &str {
        match self {
            TypeTag::Int => "int",
            TypeTag::Float => "float",
            TypeTag::Str => "str",
            TypeTag::Bool => "bool",
            TypeTag::List => "list",
            TypeTag::Millimetres => "mm",
            TypeTag::Matrix => "matrix",
            TypeTag::Custom(label) => label,
        }
    }

    /// Interpret a caller-supplied label.
    ///
    /// Any casing of `bool` or `boolean` becomes [`TypeTag::Bool`]; the
    /// canonical labels map to their variants; everything else is kept as
    /// written. Surrounding whitespace is trimmed and an empty label is
    /// rejected.
    pub fn parse_caller(label: &str) -> CoreResult<Self> {
        let label = label.trim();
        if label.is_empty() {
            return Err(CoreError::InvalidTypeTag {
                message: "type must not be empty".to_string(),
            });
        }
        if label.eq_ignore_ascii_case("bool") || label.eq_ignore_ascii_case("boolean") {
            return Ok(TypeTag::Bool);
        }
        Ok(TypeTag::from(label.to_string()))
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for TypeTag {
    fn from(label: String) -> Self {
        match label.as_str() {
            "int" => TypeTag::Int,
            "float" => TypeTag::Float,
            "str" => TypeTag::Str,
            "bool" => TypeTag::Bool,
            "list" => TypeTag::List,
            "mm" => TypeTag::Millimetres,
            "matrix" => TypeTag::Matrix,
            _ => TypeTag::Custom(label),
        }
    }
}

impl From<TypeTag> for String {
    fn from(tag: TypeTag) -> Self {
        match tag {
            TypeTag::Custom(label) => label,
            other => other.as_str().to_string(),
        }
    }
}

/// One `(key, value, type)` triple waiting to be attached to an entity row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetadataEntry {
    pub key: String,
    pub value: MetadataValue,
    #[serde(rename = "type")]
    pub tag: TypeTag,
}

impl MetadataEntry {
    pub fn new(key: impl Into<String>, value: impl Into<MetadataValue>, tag: TypeTag) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            tag,
        }
    }

    /// Build an entry from free-form caller input.
    ///
    /// All three fields are trimmed and must be non-empty. The value is kept
    /// as text; the tag goes through [`TypeTag::parse_caller`].
    pub fn from_caller(key: &str, value: &str, tag: &str) -> CoreResult<Self> {
        let key = key.trim();
        let value = value.trim();
        if key.is_empty() {
            return Err(CoreError::InvalidMetadata {
                message: "key must not be empty".to_string(),
            });
        }
        if value.is_empty() {
            return Err(CoreError::InvalidMetadata {
                message: format!("value for '{}' must not be empty", key),
            });
        }
        let tag = TypeTag::parse_caller(tag).map_err(|_| CoreError::InvalidMetadata {
            message: format!("type for '{}' must not be empty", key),
        })?;
        Ok(Self::new(key, value, tag))
    }

    /// Stored text of the value.
    pub fn value_text(&self) -> String {
        self.value.to_text()
    }
}

#[cfg(test)]
#[path = "metadata_test.rs"]
mod tests;
