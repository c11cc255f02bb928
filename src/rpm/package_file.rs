//! Package file reading
//!
//! A package file lists one package name per line. Blank lines and lines
//! starting with `#` are ignored.

use crate::error::{Result, YumError};
use std::fs;
use std::io;
use std::path::Path;

/// Read package names from a file, in file order
pub fn read_package_file(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => YumError::FileNotFound {
            path: path.to_path_buf(),
        },
        _ => YumError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;

    let packages = filter_package_lines(&content);
    log::debug!("Read {} package(s) from {}", packages.len(), path.display());
    Ok(packages)
}

/// Trim lines and drop blanks and comments
pub fn filter_package_lines(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(String::from)
        .collect()
}
