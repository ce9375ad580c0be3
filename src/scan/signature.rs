//! Recognition of lines that open a scoped function definition.
//!
//! A signature line looks like:
//!
//! ```text
//! [static|virtual|inline|explicit|friend|template<...>]* RET  Scope::name(PARAMS) [const] [noexcept] [: init-list] {
//! ```
//!
//! The qualified name must contain at least one `::`, so free functions never
//! match. Destructors, operator overloads and names that are reserved
//! keywords match the shape but are rejected.

use lazy_static::lazy_static;
use phf::phf_set;
use regex::Regex;

lazy_static! {
    /// Shape of a definition-opening line. Groups: return type, qualified name, parameters.
    static ref SIGNATURE_PATTERN: Regex = Regex::new(concat!(
        r"^(?:(?:static|virtual|inline|explicit|friend|template\s*<[^>]*>)\s+)*",
        r"([^;{]*?)\s+",
        r"((?:[A-Za-z_]\w*(?:\s*<[^>]*>)?\s*::\s*)+",
        r"(?:~\s*[A-Za-z_]\w*|operator\b\s*(?:\(\)|[^\s(]+)|[A-Za-z_]\w*(?:\s*<[^>]*>)?))",
        r"\s*\(([^)]*)\)\s*(?:const)?\s*(?:noexcept)?\s*(?::[^;{]*?)?\s*\{",
    ))
    .unwrap();
}

/// Names that can never be a function name.
static RESERVED_KEYWORDS: phf::Set<&'static str> = phf_set! {
    "if", "else", "for", "while", "do", "switch", "case", "default",
    "break", "continue", "return", "goto", "try", "catch", "throw",
    "new", "delete", "sizeof", "typedef", "struct", "class", "enum",
    "union", "namespace", "using", "public", "private", "protected",
    "virtual", "static", "const", "volatile", "inline", "explicit",
    "friend", "template", "typename", "auto", "register", "extern",
};

/// The parts of an accepted signature line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    pub return_type: String,
    pub qualified_name: String,
    /// Raw text between the parentheses.
    pub raw_parameters: String,
    /// Byte offset in the original line just past the opening `{`.
    pub body_offset: usize,
}

/// Why a signature-shaped line was not accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    Keyword,
    Destructor,
    OperatorOverload,
}

/// Match a line against the signature shape.
///
/// Returns None both for lines of another shape and for rejected names.
pub fn match_signature(line: &str) -> Option<Signature> {
    let trimmed = line.trim();
    let caps = SIGNATURE_PATTERN.captures(trimmed)?;

    let qualified_name = caps.get(2)?.as_str().trim();
    let simple_name = qualified_name.rsplit("::").next().unwrap_or("").trim();
    if let Some(reason) = rejection(simple_name) {
        tracing::trace!(name = qualified_name, ?reason, "rejected signature");
        return None;
    }

    let leading = line.len() - line.trim_start().len();
    Some(Signature {
        return_type: caps.get(1).map(|m| m.as_str().trim()).unwrap_or("").to_string(),
        qualified_name: qualified_name.to_string(),
        raw_parameters: caps.get(3).map(|m| m.as_str()).unwrap_or("").to_string(),
        body_offset: leading + caps.get(0)?.end(),
    })
}

/// Classify a simple name that must not produce a record.
pub fn rejection(simple_name: &str) -> Option<Rejection> {
    if simple_name.starts_with('~') {
        return Some(Rejection::Destructor);
    }
    if is_operator_name(simple_name) {
        return Some(Rejection::OperatorOverload);
    }
    if RESERVED_KEYWORDS.contains(simple_name) {
        return Some(Rejection::Keyword);
    }
    None
}

/// `operator` followed by a symbol, a space or nothing (`operator==`,
/// `operator()`, `operator bool`), but not identifiers like `operatorCount`.
fn is_operator_name(name: &str) -> bool {
    match name.strip_prefix("operator") {
        Some(rest) => !rest.starts_with(|c: char| c.is_alphanumeric() || c == '_'),
        None => false,
    }
}
