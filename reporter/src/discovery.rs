//! Input discovery utilities
//!
//! Functions for finding scan summary files.

use std::path::{Path, PathBuf};

/// Discover all summary files from an input path
///
/// If the path is a file, returns a vec containing just that file.
/// If the path is a directory, returns all .json files in it (non-recursive),
/// sorted by path.
pub fn discover_summary_files(input_path: &Path) -> Result<Vec<PathBuf>, DiscoveryError> {
    if input_path.is_file() {
        Ok(vec![input_path.to_path_buf()])
    } else if input_path.is_dir() {
        discover_in_directory(input_path)
    } else {
        Err(DiscoveryError::InvalidPath(input_path.to_path_buf()))
    }
}

fn discover_in_directory(dir_path: &Path) -> Result<Vec<PathBuf>, DiscoveryError> {
    let mut files = Vec::new();

    let entries = std::fs::read_dir(dir_path).map_err(|source| DiscoveryError::ReadDir {
        path: dir_path.to_path_buf(),
        source,
    })?;

    for entry in entries {
        let entry = entry.map_err(|source| DiscoveryError::ReadEntry {
            path: dir_path.to_path_buf(),
            source,
        })?;
        let path = entry.path();

        if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

/// Errors that can occur during input discovery
#[derive(Debug, thiserror::Error)]
pub enum DiscoveryError {
    /// Path is neither a file nor a directory
    #[error("Invalid path: {}", .0.display())]
    InvalidPath(PathBuf),

    #[error("Failed to read directory {}: {source}", path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read entry in {}: {source}", path.display())]
    ReadEntry {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
