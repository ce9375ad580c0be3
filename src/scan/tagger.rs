//! Keyword tagging of function bodies.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Default algorithmic vocabulary.
pub const DEFAULT_ALGORITHM_KEYWORDS: &[&str] = &[
    "sort",
    "search",
    "hash",
    "tree",
    "graph",
    "dynamic programming",
    "dp",
];

/// Default mathematical vocabulary.
pub const DEFAULT_MATH_KEYWORDS: &[&str] =
    &["sqrt", "pow", "matrix", "vector", "eigen", "sin", "cos", "tan"];

/// Keyword lists used by the tagger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vocabulary {
    #[serde(default = "default_algorithm")]
    pub algorithm: Vec<String>,
    #[serde(default = "default_math")]
    pub math: Vec<String>,
}

fn default_algorithm() -> Vec<String> {
    DEFAULT_ALGORITHM_KEYWORDS.iter().map(|s| s.to_string()).collect()
}

fn default_math() -> Vec<String> {
    DEFAULT_MATH_KEYWORDS.iter().map(|s| s.to_string()).collect()
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self {
            algorithm: default_algorithm(),
            math: default_math(),
        }
    }
}

/// Tags detected in a body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tags {
    pub keywords: BTreeSet<String>,
    pub includes_math: bool,
}

/// Matches a fixed vocabulary against body text.
///
/// Matching is case-insensitive substring search with no word boundaries,
/// so `"dp"` also fires on `"dpi"` and `"tan"` on `"distance"`.
#[derive(Debug, Clone)]
pub struct SemanticTagger {
    algorithm: Vec<String>,
    math: Vec<String>,
}

impl SemanticTagger {
    pub fn new(vocabulary: &Vocabulary) -> Self {
        Self {
            algorithm: lowercase_all(&vocabulary.algorithm),
            math: lowercase_all(&vocabulary.math),
        }
    }

    pub fn tag(&self, body: &str) -> Tags {
        let body = body.to_lowercase();
        Tags {
            keywords: self
                .algorithm
                .iter()
                .filter(|k| body.contains(k.as_str()))
                .cloned()
                .collect(),
            includes_math: self.math.iter().any(|k| body.contains(k.as_str())),
        }
    }
}

impl Default for SemanticTagger {
    fn default() -> Self {
        Self::new(&Vocabulary::default())
    }
}

fn lowercase_all(words: &[String]) -> Vec<String> {
    words
        .iter()
        .map(|w| w.trim().to_lowercase())
        .filter(|w| !w.is_empty())
        .collect()
}
