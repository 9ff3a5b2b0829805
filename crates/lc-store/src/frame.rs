//! In-memory tabular results.
//!
//! A [`Frame`] is an ordered set of named columns over rows of [`Cell`]s. It
//! carries exactly the operations the reader and joiner need: dropping
//! all-null columns, renaming, setting pivoted cells, filtering, and an inner
//! join with suffixing of overlapping column names.

use crate::error::{CatalogError, CatalogResult};
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::fmt;

/// A single value in a [`Frame`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Null,
    Int(i64),
    Float(f64),
    Bool(bool),
    Text(String),
}

impl Cell {
    pub fn is_null(&self) -> bool {
        matches!(self, Cell::Null)
    }

    /// Integer view, accepting integral floats.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Cell::Int(n) => Some(*n),
            Cell::Float(f) if f.fract() == 0.0 => Some(*f as i64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Text form used for display and natural-key comparison. `Null` has none.
    pub fn to_text(&self) -> Option<String> {
        match self {
            Cell::Null => None,
            Cell::Int(n) => Some(n.to_string()),
            Cell::Float(f) => Some(f.to_string()),
            Cell::Bool(b) => Some(b.to_string()),
            Cell::Text(s) => Some(s.clone()),
        }
    }

    fn join_key(&self) -> Option<JoinKey> {
        match self {
            Cell::Null => None,
            Cell::Text(s) => Some(JoinKey::Text(s.clone())),
            Cell::Bool(b) => Some(JoinKey::Bool(*b)),
            Cell::Int(_) | Cell::Float(_) => match self.as_i64() {
                Some(n) => Some(JoinKey::Int(n)),
                None => self.to_text().map(JoinKey::Text),
            },
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_text() {
            Some(text) => f.write_str(&text),
            None => f.write_str("null"),
        }
    }
}

impl From<i64> for Cell {
    fn from(n: i64) -> Self {
        Cell::Int(n)
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::Text(s.to_string())
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Self {
        Cell::Text(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum JoinKey {
    Int(i64),
    Bool(bool),
    Text(String),
}

/// Ordered named columns over rows of cells.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Frame {
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl Frame {
    /// Empty frame with the given columns.
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Build a frame, checking that every row has one cell per column and
    /// that column names are unique.
    pub fn from_parts(columns: Vec<String>, rows: Vec<Vec<Cell>>) -> CatalogResult<Self> {
        ensure_unique(&columns)?;
        if let Some(bad) = rows.iter().position(|r| r.len() != columns.len()) {
            return Err(CatalogError::QueryError(format!(
                "row {bad} has {} cells, expected {}",
                rows[bad].len(),
                columns.len()
            )));
        }
        Ok(Self { columns, rows })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Cell at `row` in column `name`.
    pub fn get(&self, row: usize, name: &str) -> Option<&Cell> {
        let idx = self.column_index(name)?;
        self.rows.get(row).map(|r| &r[idx])
    }

    /// Every cell of column `name`, in row order.
    pub fn column(&self, name: &str) -> Option<Vec<&Cell>> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().map(|r| &r[idx]).collect())
    }

    /// Append a row. The row must have one cell per column.
    pub fn push_row(&mut self, row: Vec<Cell>) -> CatalogResult<()> {
        if row.len() != self.columns.len() {
            return Err(CatalogError::QueryError(format!(
                "row has {} cells, expected {}",
                row.len(),
                self.columns.len()
            )));
        }
        self.rows.push(row);
        Ok(())
    }

    /// Set one cell, appending column `name` (null-filled) if it is new.
    pub fn set(&mut self, row: usize, name: &str, value: Cell) {
        let idx = match self.column_index(name) {
            Some(idx) => idx,
            None => {
                self.columns.push(name.to_string());
                for r in &mut self.rows {
                    r.push(Cell::Null);
                }
                self.columns.len() - 1
            }
        };
        if let Some(r) = self.rows.get_mut(row) {
            r[idx] = value;
        }
    }

    /// Remove every column whose cells are all null.
    ///
    /// A frame with no rows keeps its columns.
    pub fn drop_null_columns(&mut self) {
        if self.rows.is_empty() {
            return;
        }
        let keep: Vec<bool> = (0..self.columns.len())
            .map(|i| self.rows.iter().any(|r| !r[i].is_null()))
            .collect();
        self.retain_columns(&keep);
    }

    /// Remove the named columns; names not present are ignored.
    pub fn drop_columns(&mut self, names: &[&str]) {
        let keep: Vec<bool> = self
            .columns
            .iter()
            .map(|c| !names.contains(&c.as_str()))
            .collect();
        self.retain_columns(&keep);
    }

    fn retain_columns(&mut self, keep: &[bool]) {
        let mut flags = keep.iter();
        self.columns.retain(|_| *flags.next().unwrap_or(&true));
        for row in &mut self.rows {
            let mut flags = keep.iter();
            row.retain(|_| *flags.next().unwrap_or(&true));
        }
    }

    /// Rename every column through `f`.
    pub fn rename_columns<F: Fn(&str) -> String>(&mut self, f: F) -> CatalogResult<()> {
        let renamed: Vec<String> = self.columns.iter().map(|c| f(c)).collect();
        ensure_unique(&renamed)?;
        self.columns = renamed;
        Ok(())
    }

    /// Rows for which `keep` returns true, in their original order.
    pub fn filter_rows<F: Fn(&Frame, usize) -> bool>(&self, keep: F) -> Frame {
        let rows = (0..self.rows.len())
            .filter(|&i| keep(self, i))
            .map(|i| self.rows[i].clone())
            .collect();
        Frame {
            columns: self.columns.clone(),
            rows,
        }
    }

    /// Inner join on `self[left_key] == right[right_key]`.
    ///
    /// Output has one row per matching pair, ordered by left row then right
    /// row. Null keys never match. Columns present on both sides get
    /// `suffixes.0` (left) and `suffixes.1` (right) appended; when both keys
    /// share one name the right copy is dropped. A duplicate that survives
    /// suffixing is an error.
    pub fn inner_join(
        &self,
        right: &Frame,
        left_key: &str,
        right_key: &str,
        suffixes: (&str, &str),
    ) -> CatalogResult<Frame> {
        let left_idx = self.column_index(left_key).ok_or_else(|| missing(left_key))?;
        let right_idx = right
            .column_index(right_key)
            .ok_or_else(|| missing(right_key))?;
        let shared_key = left_key == right_key;

        let right_cols: Vec<usize> = (0..right.columns.len())
            .filter(|&i| !(shared_key && i == right_idx))
            .collect();

        let right_names: HashSet<&str> = right_cols
            .iter()
            .map(|&i| right.columns[i].as_str())
            .collect();
        let left_names: HashSet<&str> = self.columns.iter().map(String::as_str).collect();

        let mut columns: Vec<String> = self
            .columns
            .iter()
            .map(|c| {
                if right_names.contains(c.as_str()) {
                    format!("{c}{}", suffixes.0)
                } else {
                    c.clone()
                }
            })
            .collect();
        columns.extend(right_cols.iter().map(|&i| {
            let c = &right.columns[i];
            if left_names.contains(c.as_str()) {
                format!("{c}{}", suffixes.1)
            } else {
                c.clone()
            }
        }));
        ensure_unique(&columns)?;

        let mut index: HashMap<JoinKey, Vec<usize>> = HashMap::new();
        for (i, row) in right.rows.iter().enumerate() {
            if let Some(key) = row[right_idx].join_key() {
                index.entry(key).or_default().push(i);
            }
        }

        let mut rows = Vec::new();
        for left_row in &self.rows {
            let Some(key) = left_row[left_idx].join_key() else {
                continue;
            };
            let Some(matches) = index.get(&key) else {
                continue;
            };
            for &m in matches {
                let mut row = left_row.clone();
                row.extend(right_cols.iter().map(|&i| right.rows[m][i].clone()));
                rows.push(row);
            }
        }

        Ok(Frame { columns, rows })
    }

    /// Rows as JSON objects keyed by column name.
    pub fn to_json_rows(&self) -> Vec<serde_json::Map<String, serde_json::Value>> {
        self.rows
            .iter()
            .map(|row| {
                self.columns
                    .iter()
                    .zip(row)
                    .map(|(c, cell)| (c.clone(), cell_to_json(cell)))
                    .collect()
            })
            .collect()
    }
}

fn cell_to_json(cell: &Cell) -> serde_json::Value {
    match cell {
        Cell::Null => serde_json::Value::Null,
        Cell::Int(n) => serde_json::Value::from(*n),
        Cell::Float(f) => serde_json::Number::from_f64(*f)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        Cell::Bool(b) => serde_json::Value::Bool(*b),
        Cell::Text(s) => serde_json::Value::String(s.clone()),
    }
}

fn missing(column: &str) -> CatalogError {
    CatalogError::QueryError(format!("join column '{column}' not found"))
}

fn ensure_unique(columns: &[String]) -> CatalogResult<()> {
    let mut seen = HashSet::with_capacity(columns.len());
    for c in columns {
        if !seen.insert(c.as_str()) {
            return Err(CatalogError::QueryError(format!(
                "duplicate column '{c}' after suffixing"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "frame_test.rs"]
mod tests;
