//! Shared utilities for CLI commands

use anyhow::{bail, Context, Result};
use lc_core::{schema_for, Entity, EntitySchema, MetadataEntry};
use lc_store::{find_ids_by_name, CatalogDb, Frame, ParentLink};

use crate::cli::OutputFormat;

/// Resolve a table name to its schema descriptor.
pub(crate) fn table_schema(table: &str) -> Result<EntitySchema> {
    schema_for(table).with_context(|| format!("Unknown table '{table}'"))
}

/// Parse `--meta` values of the form `KEY=VALUE` or `KEY:TYPE=VALUE`.
///
/// The type defaults to `str`. Only the first `=` separates key from value,
/// so values may contain `=` and `:`.
pub(crate) fn parse_metadata(raw: &[String]) -> Result<Vec<MetadataEntry>> {
    raw.iter()
        .map(|item| {
            let Some((lhs, value)) = item.split_once('=') else {
                bail!("Invalid metadata '{item}': expected KEY=VALUE or KEY:TYPE=VALUE");
            };
            let (key, tag) = lhs.split_once(':').unwrap_or((lhs, "str"));
            MetadataEntry::from_caller(key, value, tag)
                .with_context(|| format!("Invalid metadata '{item}'"))
        })
        .collect()
}

/// Split `COLUMN=VALUE` criteria into parallel key and value lists.
pub(crate) fn parse_criteria(raw: &[String]) -> Result<(Vec<String>, Vec<String>)> {
    let mut keys = Vec::with_capacity(raw.len());
    let mut values = Vec::with_capacity(raw.len());
    for item in raw {
        let Some((key, value)) = item.split_once('=') else {
            bail!("Invalid criterion '{item}': expected COLUMN=VALUE");
        };
        keys.push(key.trim().to_string());
        values.push(value.to_string());
    }
    Ok((keys, values))
}

/// Parse a `TABLE` or `TABLE:FK_COLUMN` parent argument.
pub(crate) fn parse_parent(raw: &str) -> Result<ParentLink> {
    match raw.split_once(':') {
        Some((table, fk)) if !fk.trim().is_empty() => {
            Ok(ParentLink::with_fk(table_schema(table)?, fk.trim()))
        }
        Some(_) => bail!("Invalid parent '{raw}': empty foreign key column"),
        None => Ok(ParentLink::new(table_schema(raw)?)),
    }
}

/// Parse a 3x3 matrix written as `a,b,c;d,e,f;g,h,i`.
pub(crate) fn parse_transform(raw: &str) -> Result<[[f64; 3]; 3]> {
    let rows: Vec<&str> = raw.split(';').collect();
    if rows.len() != 3 {
        bail!("Transform must have 3 rows separated by ';', got {}", rows.len());
    }
    let mut matrix = [[0.0; 3]; 3];
    for (i, row) in rows.iter().enumerate() {
        let values: Vec<&str> = row.split(',').collect();
        if values.len() != 3 {
            bail!("Transform row {} must have 3 values, got {}", i + 1, values.len());
        }
        for (j, value) in values.iter().enumerate() {
            matrix[i][j] = value
                .trim()
                .parse()
                .with_context(|| format!("Invalid transform value '{value}'"))?;
        }
    }
    Ok(matrix)
}

/// Look up the id of the `entity` row named `name`.
pub(crate) fn resolve_name(db: &CatalogDb, entity: Entity, name: &str) -> Result<i64> {
    let ids = find_ids_by_name(db.conn(), &entity.schema(), &[name.to_string()])
        .with_context(|| format!("Failed to resolve {} '{name}'", entity.schema().singular()))?;
    ids.into_iter()
        .next()
        .with_context(|| format!("No id returned for '{name}'"))
}

/// Calculate column widths for table output.
pub(crate) fn calculate_column_widths(headers: &[&str], rows: &[Vec<String>]) -> Vec<usize> {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (w, cell) in widths.iter_mut().zip(row.iter()) {
            *w = (*w).max(cell.chars().count());
        }
    }
    widths
}

/// Print a formatted table to stdout.
///
/// Prints a left-aligned header row, a separator line of dashes, and each
/// data row. Columns are separated by two spaces.
pub(crate) fn print_table(headers: &[&str], rows: &[Vec<String>]) {
    let widths = calculate_column_widths(headers, rows);

    let header_parts: Vec<String> = headers
        .iter()
        .zip(&widths)
        .map(|(h, &w)| format!("{:<width$}", h, width = w))
        .collect();
    println!("{}", header_parts.join("  ").trim_end());

    let sep_parts: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
    println!("{}", sep_parts.join("  "));

    for row in rows {
        let row_parts: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(cell, &w)| format!("{:<width$}", cell, width = w))
            .collect();
        println!("{}", row_parts.join("  ").trim_end());
    }
}

/// Print rendered rows as a table followed by a row count.
pub(crate) fn print_rows(columns: &[String], rows: &[Vec<String>]) {
    if rows.is_empty() {
        println!("(0 rows)");
        return;
    }
    let headers: Vec<&str> = columns.iter().map(String::as_str).collect();
    print_table(&headers, rows);
    println!("\n({} rows)", rows.len());
}

/// Print a frame as a table or JSON, keeping cell types in JSON.
pub(crate) fn print_frame(frame: &Frame, output: OutputFormat) -> Result<()> {
    match output {
        OutputFormat::Table => {
            print_rows(frame.columns(), &frame_rows(frame));
            Ok(())
        }
        OutputFormat::Json => {
            let output = serde_json::to_string_pretty(&frame.to_json_rows())
                .context("Failed to serialize JSON output")?;
            println!("{output}");
            Ok(())
        }
    }
}

/// Render every cell of `frame` for table output; nulls print as `null`.
pub(crate) fn frame_rows(frame: &Frame) -> Vec<Vec<String>> {
    frame
        .rows()
        .iter()
        .map(|row| row.iter().map(ToString::to_string).collect())
        .collect()
}

#[cfg(test)]
#[path = "common_test.rs"]
mod tests;
