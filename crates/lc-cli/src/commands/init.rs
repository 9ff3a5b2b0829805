//! Init command implementation - writes labcat.yml and creates the catalog

use anyhow::{Context, Result};
use lc_core::config::MEMORY_PATH;
use lc_core::Config;
use lc_store::CatalogDb;
use std::fs;
use std::path::Path;

use crate::cli::InitArgs;

/// Execute the init command
pub(crate) fn execute(args: &InitArgs) -> Result<()> {
    if args.name.trim().is_empty() {
        anyhow::bail!("Catalog name cannot be empty");
    }

    let dir = Path::new(&args.dir);
    let config_path = dir.join("labcat.yml");
    if config_path.exists() || dir.join("labcat.yaml").exists() {
        anyhow::bail!(
            "A labcat config already exists in '{}'. Remove it or choose another directory.",
            dir.display()
        );
    }

    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;

    // Escape YAML special characters in interpolated values
    let safe_name = args.name.replace('\\', "\\\\").replace('"', "\\\"");
    let safe_db_path = args.database_path.replace('\\', "\\\\").replace('"', "\\\"");
    let config_content = format!(
        r#"name: "{safe_name}"

database:
  path: "{safe_db_path}"
  read_only: false

reader:
  pivot: combined   # or split: separate <key> and <key>_type columns
"#
    );
    fs::write(&config_path, config_content)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;

    // Round-trip through the loader so a bad name or path fails here.
    let config = Config::load(&config_path).context("Generated config is invalid")?;
    let database_path = config.database_path_absolute(dir);
    if database_path != MEMORY_PATH {
        CatalogDb::open(Path::new(&database_path))
            .with_context(|| format!("Failed to create catalog at {database_path}"))?;
    }

    println!("Initialized catalog '{}'", config.name);
    println!("  config:   {}", config_path.display());
    println!("  database: {database_path}");
    Ok(())
}
