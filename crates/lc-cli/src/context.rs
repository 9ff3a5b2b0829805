//! Runtime context for CLI commands

use anyhow::{Context, Result};
use lc_core::{Config, CoreError, PivotStyle};
use lc_store::CatalogDb;
use std::path::{Path, PathBuf};

use crate::cli::GlobalArgs;

/// Open catalog plus the settings commands read from labcat.yml
pub(crate) struct CatalogContext {
    /// Catalog connection
    pub db: CatalogDb,

    /// Default metadata layout for `show --metadata`
    pub pivot: PivotStyle,

    /// Resolved database path, for messages
    pub database_path: String,
}

impl CatalogContext {
    /// Load the config (if any), resolve the database path, and open it.
    pub fn open(args: &GlobalArgs) -> Result<Self> {
        let loaded = load_config(args)?;
        let config = loaded.as_ref().map(|(cfg, root)| (cfg, root.as_path()));

        let database_path = Config::resolve_database_path(args.database.as_deref(), config);
        let read_only = args.database.is_none()
            && std::env::var(lc_core::config::DATABASE_ENV_VAR).is_err()
            && config.is_some_and(|(cfg, _)| cfg.database.read_only);
        log::debug!("Opening catalog at {database_path} (read_only={read_only})");

        let db = CatalogDb::open_path(&database_path, read_only)
            .with_context(|| format!("Failed to open catalog at {database_path}"))?;

        Ok(Self {
            db,
            pivot: config.map(|(cfg, _)| cfg.reader.pivot).unwrap_or_default(),
            database_path,
        })
    }
}

/// The config named by `--config`, else labcat.yml in the current directory.
///
/// A missing default config is not an error; a missing `--config` file is.
/// Returns the config together with the directory its paths resolve against.
fn load_config(args: &GlobalArgs) -> Result<Option<(Config, PathBuf)>> {
    if let Some(path) = &args.config {
        let path = Path::new(path);
        let config = Config::load(path).context("Failed to load configuration file")?;
        let root = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        return Ok(Some((config, root)));
    }

    let cwd = std::env::current_dir().context("Failed to read current directory")?;
    match Config::load_from_dir(&cwd) {
        Ok(config) => Ok(Some((config, cwd))),
        Err(CoreError::ConfigNotFound { .. }) => Ok(None),
        Err(e) => Err(e).context("Failed to load labcat.yml"),
    }
}
