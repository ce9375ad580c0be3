//! Discovery of candidate source files under a root directory.

use globset::{Glob, GlobSet, GlobSetBuilder};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::ScanError;

/// Suffixes recognized as C++ sources and headers.
pub const DEFAULT_EXTENSIONS: &[&str] = &[".cpp", ".hpp", ".cxx", ".hxx", ".cc"];

/// Walks a directory tree and collects files with recognized suffixes.
#[derive(Debug, Clone)]
pub struct FileSetDiscovery {
    extensions: Vec<String>,
    excluded: GlobSet,
    follow_links: bool,
}

impl Default for FileSetDiscovery {
    fn default() -> Self {
        Self::new(DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect())
    }
}

impl FileSetDiscovery {
    pub fn new(extensions: Vec<String>) -> Self {
        Self {
            extensions,
            excluded: GlobSet::empty(),
            follow_links: false,
        }
    }

    /// Skip files whose path relative to the root matches any pattern.
    pub fn excluding(mut self, patterns: &[String]) -> Result<Self, globset::Error> {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            builder.add(Glob::new(pattern)?);
        }
        self.excluded = builder.build()?;
        Ok(self)
    }

    pub fn follow_links(mut self, follow: bool) -> Self {
        self.follow_links = follow;
        self
    }

    /// Whether the file name ends in one of the recognized suffixes.
    pub fn is_candidate(&self, path: &Path) -> bool {
        let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
        self.extensions.iter().any(|ext| name.ends_with(ext.as_str()))
    }

    fn is_excluded(&self, root: &Path, path: &Path) -> bool {
        let rel = path.strip_prefix(root).unwrap_or(path);
        self.excluded.is_match(rel)
    }

    /// Collect candidate files under `root`.
    ///
    /// Entries are visited in file-name order within each directory, so the
    /// result is stable across runs. A root that is a single file yields that
    /// file when it is a candidate.
    pub fn discover(&self, root: &Path) -> Result<Vec<PathBuf>, ScanError> {
        // Check the root up front so a missing path reports NotFound
        std::fs::metadata(root).map_err(|source| ScanError::DiscoveryFailure {
            path: root.to_path_buf(),
            source,
        })?;

        let mut files = Vec::new();
        let walker = WalkDir::new(root)
            .follow_links(self.follow_links)
            .sort_by_file_name();

        for entry in walker {
            let entry = match entry {
                Ok(e) => e,
                Err(err) if err.depth() == 0 => return Err(ScanError::from_walk(root, err)),
                Err(err) => {
                    tracing::warn!(error = %err, "skipping unreadable directory entry");
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            if !self.is_candidate(path) {
                continue;
            }
            if self.is_excluded(root, path) {
                tracing::debug!(path = %path.display(), "excluded by pattern");
                continue;
            }
            files.push(path.to_path_buf());
        }

        Ok(files)
    }
}
