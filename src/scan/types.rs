//! Core types for scan results.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::PathBuf;

use super::{DiagnosticKind, ScanError};

/// A single function parameter in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "type")]
    pub param_type: String,
}

impl Parameter {
    pub fn new(name: impl Into<String>, param_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            param_type: param_type.into(),
        }
    }
}

/// A function definition found in a source file.
///
/// Records are built once the body span is resolved. Downstream consumers
/// only ever fill in `description`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionRecord {
    /// Simple (unqualified) function name.
    pub name: String,
    pub file_path: String,
    /// First body line (1-indexed, inclusive).
    pub line_start: usize,
    /// Last body line (1-indexed, inclusive).
    pub line_end: usize,
    pub parameters: Vec<Parameter>,
    pub return_type: String,
    /// Body excerpt, capped and suffixed with `...` when cut.
    pub body_preview: String,
    /// Algorithmic keywords found in the body.
    pub tags: BTreeSet<String>,
    pub includes_math: bool,
    pub namespace: Option<String>,
    pub class_name: Option<String>,
    pub full_qualified_name: String,
    /// Filled in by an external describer, never by the scanner.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl FunctionRecord {
    /// Number of lines spanned by the body.
    pub fn body_lines(&self) -> usize {
        self.line_end - self.line_start + 1
    }

    /// Query text for retrieving related reference material.
    ///
    /// Uses the description when one is attached, otherwise the name
    /// followed by the detected tags.
    pub fn search_query(&self) -> String {
        if let Some(desc) = self.description.as_deref().filter(|d| !d.trim().is_empty()) {
            return desc.to_string();
        }
        let mut query = self.name.clone();
        for tag in &self.tags {
            query.push(' ');
            query.push_str(tag);
        }
        query
    }
}

/// Outcome of one signature candidate within a file.
#[derive(Debug)]
pub enum Extraction {
    /// Record extracted with no issues.
    Clean(FunctionRecord),
    /// Record kept, but some parameters fell back to placeholders.
    Degraded {
        record: FunctionRecord,
        issues: Vec<ScanError>,
    },
    /// Candidate dropped (e.g. its body never closes).
    Discarded(ScanError),
}

impl Extraction {
    pub fn record(&self) -> Option<&FunctionRecord> {
        match self {
            Extraction::Clean(record) | Extraction::Degraded { record, .. } => Some(record),
            Extraction::Discarded(_) => None,
        }
    }

    pub fn into_record(self) -> Option<FunctionRecord> {
        match self {
            Extraction::Clean(record) | Extraction::Degraded { record, .. } => Some(record),
            Extraction::Discarded(_) => None,
        }
    }
}

/// Outcome of scanning a single file.
#[derive(Debug)]
pub enum FileOutcome {
    Scanned {
        path: PathBuf,
        extractions: Vec<Extraction>,
    },
    Skipped {
        path: PathBuf,
        error: ScanError,
    },
}

/// A recoverable condition noted during the scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub file: String,
    /// 1-indexed, 0 when the condition covers the whole file.
    pub line: usize,
    pub message: String,
}

impl Diagnostic {
    pub fn from_error(file: &str, error: &ScanError) -> Self {
        Self {
            kind: error.kind(),
            file: file.to_string(),
            line: error.line(),
            message: error.to_string(),
        }
    }
}

/// Aggregated results of scanning a repository.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanResult {
    /// Records in file-discovery order, then source order.
    pub functions: Vec<FunctionRecord>,
    #[serde(default)]
    pub diagnostics: Vec<Diagnostic>,
    pub files_scanned: usize,
    pub files_skipped: usize,
    /// Records kept with placeholder parameters.
    pub degraded: usize,
    /// Candidates dropped because their body never closed.
    pub discarded: usize,
}

impl ScanResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one file's outcome into the totals.
    pub fn absorb(&mut self, outcome: FileOutcome) {
        match outcome {
            FileOutcome::Scanned { path, extractions } => {
                let file = path.to_string_lossy().to_string();
                self.files_scanned += 1;
                for extraction in extractions {
                    match extraction {
                        Extraction::Clean(record) => self.functions.push(record),
                        Extraction::Degraded { record, issues } => {
                            self.degraded += 1;
                            self.diagnostics
                                .extend(issues.iter().map(|e| Diagnostic::from_error(&file, e)));
                            self.functions.push(record);
                        }
                        Extraction::Discarded(error) => {
                            self.discarded += 1;
                            self.diagnostics.push(Diagnostic::from_error(&file, &error));
                        }
                    }
                }
            }
            FileOutcome::Skipped { path, error } => {
                self.files_skipped += 1;
                self.diagnostics
                    .push(Diagnostic::from_error(&path.to_string_lossy(), &error));
            }
        }
    }

    pub fn function_count(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str) -> FunctionRecord {
        FunctionRecord {
            name: name.to_string(),
            file_path: "a.cpp".to_string(),
            line_start: 2,
            line_end: 4,
            parameters: vec![],
            return_type: "void".to_string(),
            body_preview: String::new(),
            tags: BTreeSet::new(),
            includes_math: false,
            namespace: None,
            class_name: Some("A".to_string()),
            full_qualified_name: format!("A::{}", name),
            description: None,
        }
    }

    #[test]
    fn test_search_query_falls_back_to_tags() {
        let mut rec = record("run");
        rec.tags.insert("sort".to_string());
        rec.tags.insert("hash".to_string());
        assert_eq!(rec.search_query(), "run hash sort");

        rec.description = Some("Sorts entries by key.".to_string());
        assert_eq!(rec.search_query(), "Sorts entries by key.");
        assert_eq!(rec.body_lines(), 3);
    }

    #[test]
    fn test_absorb_counts_each_outcome() {
        let mut result = ScanResult::new();
        result.absorb(FileOutcome::Scanned {
            path: PathBuf::from("a.cpp"),
            extractions: vec![
                Extraction::Clean(record("one")),
                Extraction::Degraded {
                    record: record("two"),
                    issues: vec![ScanError::MalformedParameter {
                        name: "A::two".to_string(),
                        segment: "int".to_string(),
                        line: 5,
                    }],
                },
                Extraction::Discarded(ScanError::UnterminatedBody {
                    name: "A::three".to_string(),
                    line: 9,
                }),
            ],
        });
        result.absorb(FileOutcome::Skipped {
            path: PathBuf::from("b.cpp"),
            error: ScanError::FileReadFailure {
                path: PathBuf::from("b.cpp"),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
            },
        });

        assert_eq!(result.function_count(), 2);
        assert_eq!(result.files_scanned, 1);
        assert_eq!(result.files_skipped, 1);
        assert_eq!(result.degraded, 1);
        assert_eq!(result.discarded, 1);
        assert_eq!(result.diagnostics.len(), 3);
        assert_eq!(result.diagnostics[2].kind, DiagnosticKind::FileReadFailure);
        assert_eq!(result.diagnostics[2].file, "b.cpp");
    }
}
