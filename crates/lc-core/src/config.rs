//! Configuration types and parsing for labcat.yml

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable that overrides the configured database path.
pub const DATABASE_ENV_VAR: &str = "LABCAT_DATABASE";

/// Path DuckDB treats as a private in-memory database.
pub const MEMORY_PATH: &str = ":memory:";

/// Main catalog configuration from labcat.yml
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Catalog name, shown in CLI output
    pub name: String,

    /// Database location
    #[serde(default)]
    pub database: DatabaseConfig,

    /// How entity frames are rendered
    #[serde(default)]
    pub reader: ReaderConfig,
}

/// Database connection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatabaseConfig {
    /// DuckDB file, relative to the config directory, or `:memory:`
    #[serde(default = "default_db_path")]
    pub path: String,

    /// Open the database without write access
    #[serde(default)]
    pub read_only: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
            read_only: false,
        }
    }
}

fn default_db_path() -> String {
    MEMORY_PATH.to_string()
}

/// Frame rendering options
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReaderConfig {
    /// How pivoted metadata cells are laid out
    #[serde(default)]
    pub pivot: PivotStyle,
}

/// Layout of pivoted metadata columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PivotStyle {
    /// One column per key holding `"<value> <type>"`.
    #[default]
    Combined,
    /// A `<key>` column with the value and a `<key>_type` column with the tag.
    Split,
}

impl std::fmt::Display for PivotStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PivotStyle::Combined => write!(f, "combined"),
            PivotStyle::Split => write!(f, "split"),
        }
    }
}

impl Config {
    /// Load configuration from a file path
    pub fn load(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Err(CoreError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| CoreError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        let config: Config = serde_yaml::from_str(&content)?;
        config.validate()?;
        log::debug!("Loaded config '{}' from {}", config.name, path.display());
        Ok(config)
    }

    /// Load configuration from a directory
    /// Looks for labcat.yml or labcat.yaml
    pub fn load_from_dir(dir: &Path) -> CoreResult<Self> {
        let yml_path = dir.join("labcat.yml");
        let yaml_path = dir.join("labcat.yaml");

        if yml_path.exists() {
            Self::load(&yml_path)
        } else if yaml_path.exists() {
            Self::load(&yaml_path)
        } else {
            Err(CoreError::ConfigNotFound {
                path: yml_path.display().to_string(),
            })
        }
    }

    /// Validate the configuration
    fn validate(&self) -> CoreResult<()> {
        if self.name.trim().is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "Catalog name cannot be empty".to_string(),
            });
        }

        if self.database.path.trim().is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "database.path cannot be empty (use ':memory:' for an in-memory catalog)"
                    .to_string(),
            });
        }

        if self.database.read_only && self.database.path == MEMORY_PATH {
            return Err(CoreError::ConfigInvalid {
                message: "An in-memory database cannot be opened read-only".to_string(),
            });
        }

        Ok(())
    }

    /// Configured database path, resolved against `root` unless it is
    /// absolute or `:memory:`.
    pub fn database_path_absolute(&self, root: &Path) -> String {
        resolve_against(&self.database.path, root)
    }

    /// Resolve the database path to open.
    ///
    /// Priority: CLI flag > LABCAT_DATABASE env var > config file > `:memory:`
    pub fn resolve_database_path(
        cli_path: Option<&str>,
        config: Option<(&Config, &Path)>,
    ) -> String {
        if let Some(path) = cli_path {
            log::debug!("Database path from command line: {path}");
            return path.to_string();
        }
        if let Some(path) = std::env::var(DATABASE_ENV_VAR)
            .ok()
            .filter(|v| !v.trim().is_empty())
        {
            log::debug!("Database path from {DATABASE_ENV_VAR}: {path}");
            return path;
        }
        if let Some((cfg, root)) = config {
            let path = cfg.database_path_absolute(root);
            log::debug!("Database path from config '{}': {path}", cfg.name);
            return path;
        }
        log::debug!("No database configured, using {MEMORY_PATH}");
        default_db_path()
    }
}

fn resolve_against(path: &str, root: &Path) -> String {
    if path == MEMORY_PATH || Path::new(path).is_absolute() {
        return path.to_string();
    }
    let joined: PathBuf = root.join(path);
    joined.display().to_string()
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
