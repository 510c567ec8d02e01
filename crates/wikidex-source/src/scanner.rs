//! Document discovery by filesystem walking.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use wikidex_index::Document;
use wikidex_index::title::humanize_file_name;

/// A built page found on disk.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SourceDocument {
    /// Output URL with leading slash (e.g. `/guide/setup.html`).
    pub url: String,
    /// Path to the file on disk.
    pub source_path: PathBuf,
    /// Title derived from the file name (e.g. `Release Notes`).
    pub title: String,
}

impl SourceDocument {
    /// Create a document for a URL, deriving the title from its file name.
    #[must_use]
    pub fn new(url: impl Into<String>, source_path: impl Into<PathBuf>) -> Self {
        let url = url.into();
        let file_name = url.rsplit('/').next().unwrap_or_default();
        let title = humanize_file_name(file_name);
        Self {
            url,
            source_path: source_path.into(),
            title,
        }
    }
}

impl Document for SourceDocument {
    fn url(&self) -> &str {
        &self.url
    }

    fn title(&self) -> Option<&str> {
        Some(&self.title)
    }
}

/// Error returned when scanning fails.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    /// Source directory does not exist.
    #[error("Source directory not found: {}", .0.display())]
    NotFound(PathBuf),
    /// Source directory could not be read.
    #[error("I/O error reading {}: {source}", path.display())]
    Io {
        /// Directory that failed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
}

/// Discovers built documents by walking the filesystem.
///
/// Hidden files and directories (leading `.`) are skipped, as are excluded
/// directories such as the index output directory when it lives inside the
/// source tree.
#[derive(Debug)]
pub struct Scanner {
    source_dir: PathBuf,
    extensions: Vec<String>,
    excluded: Vec<PathBuf>,
}

impl Scanner {
    /// Create a scanner collecting `.html` files under `source_dir`.
    #[must_use]
    pub fn new(source_dir: PathBuf) -> Self {
        Self {
            source_dir,
            extensions: vec!["html".to_owned()],
            excluded: Vec::new(),
        }
    }

    /// Collect files with these extensions instead (without dot).
    #[must_use]
    pub fn with_extensions(mut self, extensions: impl IntoIterator<Item = String>) -> Self {
        self.extensions = extensions.into_iter().collect();
        self
    }

    /// Skip a directory and everything below it.
    #[must_use]
    pub fn exclude(mut self, dir: &Path) -> Self {
        self.excluded
            .push(fs::canonicalize(dir).unwrap_or_else(|_| dir.to_path_buf()));
        self
    }

    /// Scan the source directory and return its documents.
    ///
    /// Unreadable subdirectories are logged and skipped.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::NotFound`] if the source directory does not exist
    /// and [`ScanError::Io`] if it cannot be read.
    pub fn scan(&self) -> Result<Vec<SourceDocument>, ScanError> {
        if !self.source_dir.is_dir() {
            return Err(ScanError::NotFound(self.source_dir.clone()));
        }

        let mut documents = Vec::new();
        let entries = read_sorted(&self.source_dir).map_err(|source| ScanError::Io {
            path: self.source_dir.clone(),
            source,
        })?;
        self.scan_entries(entries, "", &mut documents);

        tracing::debug!(
            source_dir = %self.source_dir.display(),
            documents = documents.len(),
            "Scanned documents"
        );
        Ok(documents)
    }

    fn scan_directory(
        &self,
        dir_path: &Path,
        url_prefix: &str,
        documents: &mut Vec<SourceDocument>,
    ) {
        match read_sorted(dir_path) {
            Ok(entries) => self.scan_entries(entries, url_prefix, documents),
            Err(err) => {
                tracing::warn!(
                    path = %dir_path.display(),
                    error = %err,
                    "Skipping unreadable directory"
                );
            }
        }
    }

    fn scan_entries(
        &self,
        entries: Vec<(PathBuf, String, bool)>,
        url_prefix: &str,
        documents: &mut Vec<SourceDocument>,
    ) {
        for (path, name, is_dir) in entries {
            if name.starts_with('.') {
                continue;
            }

            let url = format!("{url_prefix}/{name}");
            if is_dir {
                if !self.is_excluded(&path) {
                    self.scan_directory(&path, &url, documents);
                }
            } else if self.has_document_extension(&path) {
                documents.push(SourceDocument::new(url, path));
            }
        }
    }

    fn has_document_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
    }

    fn is_excluded(&self, dir: &Path) -> bool {
        if self.excluded.is_empty() {
            return false;
        }
        let dir = fs::canonicalize(dir).unwrap_or_else(|_| dir.to_path_buf());
        self.excluded.contains(&dir)
    }
}

/// Read a directory as `(path, name, is_dir)` entries sorted by name.
fn read_sorted(dir: &Path) -> std::io::Result<Vec<(PathBuf, String, bool)>> {
    let mut entries: Vec<_> = fs::read_dir(dir)?
        .filter_map(Result::ok)
        .map(|e| {
            let is_dir = e.file_type().is_ok_and(|t| t.is_dir());
            let name = e.file_name().to_string_lossy().into_owned();
            (e.path(), name, is_dir)
        })
        .collect();
    entries.sort_by(|a, b| a.1.cmp(&b.1));
    Ok(entries)
}
