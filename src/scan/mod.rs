//! Heuristic scanning of C++ sources for scoped function definitions.
//!
//! The pipeline, per file:
//!
//! ```text
//! discovery ─▶ signature match ─▶ qualified name + parameters ─▶ body span ─▶ tags
//! ```
//!
//! Everything is lexical: a line-level regex decides whether a line opens a
//! definition, and brace counting finds where the body ends. There is no
//! grammar and no symbol table.

mod analyzer;
mod body;
mod discovery;
mod error;
mod extract;
mod params;
mod qualified;
mod signature;
mod tagger;
mod types;

pub use analyzer::RepositoryAnalyzer;
pub use body::{
    closing_line, extract_body, preview, Body, DEFAULT_PREVIEW_CHARS, TRUNCATION_MARKER,
};
pub use discovery::{FileSetDiscovery, DEFAULT_EXTENSIONS};
pub use error::{DiagnosticKind, ScanError};
pub use extract::FunctionExtractor;
pub use params::{parse_parameters, ParameterList, PLACEHOLDER_NAME};
pub use qualified::QualifiedName;
pub use signature::{match_signature, rejection, Rejection, Signature};
pub use tagger::{
    SemanticTagger, Tags, Vocabulary, DEFAULT_ALGORITHM_KEYWORDS, DEFAULT_MATH_KEYWORDS,
};
pub use types::{
    Diagnostic, Extraction, FileOutcome, FunctionRecord, Parameter, ScanResult,
};
