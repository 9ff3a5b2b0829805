//! Measurement file description.
//!
//! The catalog never reads measurement volumes itself. A [`FileProbe`]
//! supplies the dimensions and element type of a file, and the loaders store
//! them as metadata.

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Shape and type of a measurement file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileInfo {
    pub height: i64,
    pub width: i64,
    pub depth: i64,
    pub dtype: String,
    pub file_type: String,
}

impl FileInfo {
    /// File type recorded for `path`: its extension with the leading dot
    /// (`.tif`), or `folder` for a path without one (a directory of slices).
    pub fn file_type_for(path: &Path) -> String {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if !ext.is_empty() => format!(".{}", ext),
            _ => "folder".to_string(),
        }
    }
}

/// Source of [`FileInfo`] for a measurement path.
pub trait FileProbe {
    fn probe(&self, path: &Path) -> CoreResult<FileInfo>;
}

/// Probe that reports caller-supplied dimensions.
///
/// Used where the volume is not readable locally, e.g. when cataloguing
/// files that live on an acquisition machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManualProbe {
    pub height: i64,
    pub width: i64,
    pub depth: i64,
    pub dtype: String,
}

impl FileProbe for ManualProbe {
    fn probe(&self, path: &Path) -> CoreResult<FileInfo> {
        if self.dtype.trim().is_empty() {
            return Err(CoreError::Probe {
                path: path.display().to_string(),
                message: "dtype must not be empty".to_string(),
            });
        }
        Ok(FileInfo {
            height: self.height,
            width: self.width,
            depth: self.depth,
            dtype: self.dtype.trim().to_string(),
            file_type: FileInfo::file_type_for(path),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_file_type_from_extension() {
        assert_eq!(FileInfo::file_type_for(Path::new("/data/scan1.tif")), ".tif");
        assert_eq!(FileInfo::file_type_for(Path::new("vol.raw")), ".raw");
    }

    #[test]
    fn test_file_type_folder_without_extension() {
        assert_eq!(FileInfo::file_type_for(Path::new("/data/slices")), "folder");
        assert_eq!(FileInfo::file_type_for(&PathBuf::from("/data/")), "folder");
    }

    #[test]
    fn test_manual_dimensions_reported() {
        let probe = ManualProbe {
            height: 512,
            width: 512,
            depth: 300,
            dtype: "uint16".to_string(),
        };
        let info = probe.probe(Path::new("/data/scan1.tif")).unwrap();
        assert_eq!(info.depth, 300);
        assert_eq!(info.dtype, "uint16");
        assert_eq!(info.file_type, ".tif");
    }

    #[test]
    fn test_manual_dimensions_require_dtype() {
        let probe = ManualProbe {
            height: 1,
            width: 1,
            depth: 1,
            dtype: " ".to_string(),
        };
        assert!(matches!(
            probe.probe(Path::new("a.tif")),
            Err(CoreError::Probe { .. })
        ));
    }
}
