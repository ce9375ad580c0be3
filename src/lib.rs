//! cppscan - heuristic C++ function scanner.
//!
//! cppscan walks a C++ source tree and turns every scoped function
//! definition it recognizes into a [`FunctionRecord`]: qualified name,
//! parameters, return type, line span, a body preview and keyword tags.
//! Recognition is lexical (line regexes and brace counting), so it needs no
//! compiler, no include paths and no build configuration.
//!
//! # Architecture
//!
//! - `scan`: discovery, signature matching, body extraction and tagging
//! - `config`: YAML configuration
//! - `report`: output formatting (text, JSON) and the analysis file
//! - `describe`: hand-off point for natural-language descriptions
//! - `cli`: the `cppscan` command
//!
//! # Example
//!
//! ```no_run
//! use cppscan::RepositoryAnalyzer;
//!
//! let result = RepositoryAnalyzer::default().analyze("engine/src".as_ref())?;
//! for f in &result.functions {
//!     println!("{} {}:{}", f.full_qualified_name, f.file_path, f.line_start);
//! }
//! # Ok::<(), cppscan::ScanError>(())
//! ```

pub mod cli;
pub mod config;
pub mod describe;
pub mod report;
pub mod scan;

pub use config::ScanConfig;
pub use describe::{attach_descriptions, Describer};
pub use scan::{
    Diagnostic, DiagnosticKind, Extraction, FileOutcome, FileSetDiscovery, FunctionExtractor,
    FunctionRecord, Parameter, QualifiedName, RepositoryAnalyzer, ScanError, ScanResult,
    SemanticTagger, Vocabulary,
};
