//! Template discovery by filesystem walking.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::document::FsError;

/// File extension of convertible templates.
const TEMPLATE_EXTENSION: &str = "html";

/// Discovers HTML templates below a traversal root.
///
/// Directories are visited in lexical order of their entry names, so the
/// returned paths are stable across runs. Directories whose name appears in
/// the exclusion list are never entered.
pub struct Scanner {
    root: PathBuf,
    exclude: Vec<String>,
}

impl Scanner {
    /// Create a new Scanner.
    ///
    /// # Arguments
    ///
    /// * `root` - Directory to walk, or a single template file
    /// * `exclude` - Directory names to skip (e.g., `node_modules`)
    #[must_use]
    pub fn new(root: PathBuf, exclude: Vec<String>) -> Self {
        Self { root, exclude }
    }

    /// Scan the root and return template paths.
    ///
    /// A root that is itself a file is returned as-is when it has the template
    /// extension. Returns an empty Vec if the root doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns `FsError::Scan` if an existing directory or one of its entries
    /// can't be read.
    pub fn scan(&self) -> Result<Vec<PathBuf>, FsError> {
        let metadata = match fs::metadata(&self.root) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::warn!(path = %self.root.display(), "Traversal root does not exist");
                return Ok(Vec::new());
            }
            Err(source) => {
                return Err(FsError::Scan {
                    path: self.root.clone(),
                    source,
                });
            }
        };

        let mut paths = Vec::new();
        if metadata.is_dir() {
            self.scan_directory(&self.root, &mut paths)?;
        } else if is_template(&self.root) {
            paths.push(self.root.clone());
        } else {
            tracing::debug!(path = %self.root.display(), "Not an HTML file, skipping");
        }
        Ok(paths)
    }

    fn scan_directory(&self, dir_path: &Path, paths: &mut Vec<PathBuf>) -> Result<(), FsError> {
        let to_error = |source| FsError::Scan {
            path: dir_path.to_path_buf(),
            source,
        };

        // Cache file_type to avoid repeated stat calls while sorting
        let mut entries = fs::read_dir(dir_path)
            .map_err(to_error)?
            .map(|entry| {
                let entry = entry?;
                let is_dir = entry.file_type()?.is_dir();
                Ok((entry.file_name(), entry.path(), is_dir))
            })
            .collect::<io::Result<Vec<_>>>()
            .map_err(to_error)?;
        entries.sort_by(|a, b| a.0.cmp(&b.0));

        for (name, path, is_dir) in entries {
            if is_dir {
                let name = name.to_string_lossy();
                if self.exclude.iter().any(|excluded| *excluded == name) {
                    tracing::debug!(path = %path.display(), "Skipping excluded directory");
                    continue;
                }
                self.scan_directory(&path, paths)?;
            } else if is_template(&path) {
                paths.push(path);
            }
        }
        Ok(())
    }
}

fn is_template(path: &Path) -> bool {
    path.extension().is_some_and(|e| e == TEMPLATE_EXTENSION)
}
