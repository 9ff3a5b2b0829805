//! Strongly-typed table name wrapper.

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::ops::Deref;

/// Whether `name` can be spliced into SQL as a bare identifier.
///
/// Table and column names cannot be bound as statement parameters, so every
/// name that reaches a `format!`-built statement must pass this check.
pub fn is_valid_identifier(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with(|c: char| c.is_ascii_digit())
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Check `name` with [`is_valid_identifier`], returning it on success.
pub fn validate_identifier(name: &str) -> CoreResult<&str> {
    if is_valid_identifier(name) {
        Ok(name)
    } else {
        Err(CoreError::InvalidIdentifier {
            name: name.to_string(),
        })
    }
}

/// Name of a catalog table, guaranteed to be a plain SQL identifier.
///
/// Prevents accidental mixing of table names with column names or natural
/// keys, and makes it safe to interpolate the name into statements.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TableName(String);

impl TableName {
    /// Validate and wrap a table name.
    pub fn parse(name: impl Into<String>) -> CoreResult<Self> {
        let s = name.into();
        validate_identifier(&s)?;
        Ok(Self(s))
    }

    /// Wrap a name known at compile time.
    ///
    /// Only used for the catalog's own tables, whose names are literals.
    pub(crate) fn from_static(name: &'static str) -> Self {
        debug_assert!(is_valid_identifier(name), "invalid static table name {name}");
        Self(name.to_string())
    }

    /// Return the underlying name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper and return the inner `String`.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for TableName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Deref for TableName {
    type Target = str;
    fn deref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for TableName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for TableName {
    type Error = CoreError;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for TableName {
    type Error = CoreError;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl From<TableName> for String {
    fn from(name: TableName) -> Self {
        name.0
    }
}

impl PartialEq<str> for TableName {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for TableName {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_name_parse() {
        let name = TableName::parse("materials").unwrap();
        assert_eq!(name.as_str(), "materials");
        assert_eq!(name, "materials");
    }

    #[test]
    fn test_table_name_rejects_injection() {
        assert!(TableName::parse("materials; DROP TABLE panels").is_err());
        assert!(TableName::parse("catalog_meta.schema_version").is_err());
        assert!(TableName::parse("").is_err());
        assert!(TableName::parse("1panels").is_err());
    }

    #[test]
    fn test_identifier_check() {
        assert!(is_valid_identifier("file_path_measurement"));
        assert!(is_valid_identifier("_hidden"));
        assert!(!is_valid_identifier("name-panel"));
        assert!(!is_valid_identifier("naïve"));
        assert!(validate_identifier("key value").is_err());
    }

    #[test]
    fn test_table_name_deref() {
        let name = TableName::parse("samples").unwrap();
        assert!(name.ends_with('s'));
        assert_eq!(format!("{}", name), "samples");
    }

    #[test]
    fn test_table_name_borrow() {
        use std::collections::HashMap;
        let mut map: HashMap<TableName, i32> = HashMap::new();
        map.insert(TableName::parse("panels").unwrap(), 42);
        assert_eq!(map.get("panels"), Some(&42));
    }

    #[test]
    fn test_table_name_serde_validates() {
        let name: TableName = serde_json::from_str(r#""datasets""#).unwrap();
        assert_eq!(name, "datasets");
        assert!(serde_json::from_str::<TableName>(r#""data sets""#).is_err());
        assert_eq!(serde_json::to_string(&name).unwrap(), r#""datasets""#);
    }
}
