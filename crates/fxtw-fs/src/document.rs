//! Template reading and atomic replacement.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

/// Filesystem error with the path it concerns.
#[derive(Debug, thiserror::Error)]
pub enum FsError {
    /// Reading a template failed.
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Writing a template failed.
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Listing a directory during traversal failed.
    #[error("Failed to scan {}: {source}", path.display())]
    Scan {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// An HTML template loaded into memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Location on disk.
    pub path: PathBuf,
    /// Full UTF-8 contents.
    pub text: String,
}

impl Document {
    /// Read a template as UTF-8.
    ///
    /// # Errors
    ///
    /// Returns `FsError::Read` if the file can't be read or isn't valid UTF-8.
    pub fn read(path: &Path) -> Result<Self, FsError> {
        let text = fs::read_to_string(path).map_err(|source| FsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self {
            path: path.to_path_buf(),
            text,
        })
    }

    /// Replace the file contents with `text`.
    ///
    /// The new contents go to a temporary file in the same directory, which
    /// is then renamed over the original. A failed write leaves the original
    /// untouched.
    ///
    /// # Errors
    ///
    /// Returns `FsError::Write` if the temporary file can't be created,
    /// written or renamed.
    pub fn write(&self, text: &str) -> Result<(), FsError> {
        let to_error = |source| FsError::Write {
            path: self.path.clone(),
            source,
        };
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut file = NamedTempFile::new_in(dir).map_err(to_error)?;
        file.write_all(text.as_bytes()).map_err(to_error)?;
        if let Ok(metadata) = fs::metadata(&self.path) {
            // Keep the original permissions on the replacement
            let _ = fs::set_permissions(file.path(), metadata.permissions());
        }
        file.persist(&self.path).map_err(|e| to_error(e.error))?;
        Ok(())
    }
}
