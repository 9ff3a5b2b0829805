//! Naming conventions that tie an entity table to its companions.
//!
//! Every catalog table is plural (`materials`). Its metadata table, its
//! foreign-key column in child tables, and the suffix applied to its columns
//! when read are all derived from the singular form, which is the plural
//! name with one trailing `s` removed. The rule is not pluralization-aware:
//! callers must pass plural table names, and a name without a trailing `s`
//! silently comes back unchanged.

/// Singular form of a plural table name (`panels` -> `panel`).
pub fn singular(entity: &str) -> &str {
    entity.strip_suffix('s').unwrap_or(entity)
}

/// Name of the metadata table for `entity` (`panels` -> `panel_metadata`).
pub fn metadata_table(entity: &str) -> String {
    format!("{}_metadata", singular(entity))
}

/// Name of the column that references `entity` from another table
/// (`panels` -> `panel_id`).
pub fn fk_column(entity: &str) -> String {
    format!("{}_id", singular(entity))
}

/// `column` with the singular of `entity` appended (`name`, `panels` ->
/// `name_panel`).
pub fn suffixed(column: &str, entity: &str) -> String {
    format!("{}_{}", column, singular(entity))
}

/// The `_<singular>` suffix on its own, as used for join suffix pairs.
pub fn suffix(entity: &str) -> String {
    format!("_{}", singular(entity))
}

#[cfg(test)]
#[path = "naming_test.rs"]
mod tests;
