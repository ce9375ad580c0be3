//! Repository-wide analysis that orchestrates discovery and extraction.

use rayon::prelude::*;
use std::path::{Path, PathBuf};

use crate::config::ScanConfig;

use super::tagger::SemanticTagger;
use super::{
    Extraction, FileOutcome, FileSetDiscovery, FunctionExtractor, ScanError, ScanResult,
};

/// Scans every discovered file and aggregates the records.
pub struct RepositoryAnalyzer {
    discovery: FileSetDiscovery,
    extractor: FunctionExtractor,
    parallel: bool,
}

impl Default for RepositoryAnalyzer {
    fn default() -> Self {
        Self::new(FileSetDiscovery::default(), FunctionExtractor::default())
    }
}

impl RepositoryAnalyzer {
    pub fn new(discovery: FileSetDiscovery, extractor: FunctionExtractor) -> Self {
        Self {
            discovery,
            extractor,
            parallel: false,
        }
    }

    /// Build an analyzer from configuration.
    pub fn from_config(config: &ScanConfig) -> anyhow::Result<Self> {
        let discovery = FileSetDiscovery::new(config.extensions.clone())
            .excluding(&config.excluded_paths)
            .map_err(|e| anyhow::anyhow!("compiling excluded_paths: {}", e))?
            .follow_links(config.follow_links);
        let extractor =
            FunctionExtractor::new(SemanticTagger::new(&config.keywords), config.preview_chars);

        Ok(Self::new(discovery, extractor).parallel(config.parallel))
    }

    /// Process files on the rayon pool. Output order is unchanged.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn discover(&self, root: &Path) -> Result<Vec<PathBuf>, ScanError> {
        self.discovery.discover(root)
    }

    /// Discover and scan everything under `root`.
    ///
    /// Only a discovery failure is returned as an error; per-file problems
    /// end up in the result's diagnostics.
    pub fn analyze(&self, root: &Path) -> Result<ScanResult, ScanError> {
        let files = self.discover(root)?;
        Ok(self.analyze_files(&files))
    }

    pub fn analyze_files(&self, files: &[PathBuf]) -> ScanResult {
        self.analyze_files_with(files, &|_| {})
    }

    /// Scan `files`, calling `on_file` after each one finishes.
    pub fn analyze_files_with(
        &self,
        files: &[PathBuf],
        on_file: &(dyn Fn(&Path) + Sync),
    ) -> ScanResult {
        let total = files.len();
        let scan = |(idx, path): (usize, &PathBuf)| {
            tracing::debug!(file = %path.display(), "analyzing file {}/{}", idx + 1, total);
            let outcome = self.analyze_file(path);
            on_file(path);
            outcome
        };

        // Indexed collect keeps discovery order in both modes
        let outcomes: Vec<FileOutcome> = if self.parallel {
            files.par_iter().enumerate().map(scan).collect()
        } else {
            files.iter().enumerate().map(scan).collect()
        };

        let mut result = ScanResult::new();
        for outcome in outcomes {
            log_outcome(&outcome);
            result.absorb(outcome);
        }

        tracing::info!(
            functions = result.function_count(),
            files = result.files_scanned,
            skipped = result.files_skipped,
            "analysis complete"
        );
        result
    }

    /// Read and scan a single file.
    ///
    /// Invalid UTF-8 is replaced rather than rejected.
    pub fn analyze_file(&self, path: &Path) -> FileOutcome {
        let bytes = match std::fs::read(path) {
            Ok(b) => b,
            Err(source) => {
                return FileOutcome::Skipped {
                    path: path.to_path_buf(),
                    error: ScanError::FileReadFailure {
                        path: path.to_path_buf(),
                        source,
                    },
                }
            }
        };
        let content = String::from_utf8_lossy(&bytes);
        let file_path = path.to_string_lossy();

        FileOutcome::Scanned {
            path: path.to_path_buf(),
            extractions: self.extractor.extract(&content, &file_path),
        }
    }
}

fn log_outcome(outcome: &FileOutcome) {
    match outcome {
        FileOutcome::Skipped { error, .. } => {
            tracing::warn!(%error, "skipping file");
        }
        FileOutcome::Scanned { path, extractions } => {
            for extraction in extractions {
                match extraction {
                    Extraction::Clean(_) => {}
                    Extraction::Degraded { issues, .. } => {
                        for issue in issues {
                            tracing::warn!(file = %path.display(), %issue, "degraded record");
                        }
                    }
                    Extraction::Discarded(error) => {
                        tracing::warn!(file = %path.display(), %error, "discarded candidate");
                    }
                }
            }
        }
    }
}
