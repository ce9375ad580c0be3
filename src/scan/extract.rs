//! Per-file extraction of function records.

use super::body::{extract_body, preview, DEFAULT_PREVIEW_CHARS};
use super::params::parse_parameters;
use super::qualified::QualifiedName;
use super::signature::match_signature;
use super::tagger::SemanticTagger;
use super::{Extraction, FunctionRecord, ScanError};

/// Runs the line scan over one file's text.
#[derive(Debug, Clone)]
pub struct FunctionExtractor {
    tagger: SemanticTagger,
    preview_chars: usize,
}

impl Default for FunctionExtractor {
    fn default() -> Self {
        Self::new(SemanticTagger::default(), DEFAULT_PREVIEW_CHARS)
    }
}

impl FunctionExtractor {
    pub fn new(tagger: SemanticTagger, preview_chars: usize) -> Self {
        Self {
            tagger,
            preview_chars,
        }
    }

    /// Scan `content` line by line.
    ///
    /// After an accepted definition, scanning resumes on the line after its
    /// closing brace. After a discarded one, it resumes on the line after the
    /// signature.
    pub fn extract(&self, content: &str, file_path: &str) -> Vec<Extraction> {
        let lines: Vec<&str> = content.lines().collect();
        let mut extractions = Vec::new();
        let mut i = 0;

        while i < lines.len() {
            let Some(signature) = match_signature(lines[i]) else {
                i += 1;
                continue;
            };
            let Some(qualified) = QualifiedName::parse(&signature.qualified_name) else {
                i += 1;
                continue;
            };

            let Some(body) = extract_body(&lines, i, signature.body_offset) else {
                extractions.push(Extraction::Discarded(ScanError::UnterminatedBody {
                    name: signature.qualified_name,
                    line: i + 1,
                }));
                i += 1;
                continue;
            };

            let params = parse_parameters(&signature.raw_parameters);
            let tags = self.tagger.tag(&body.text);

            let record = FunctionRecord {
                name: qualified.name().to_string(),
                file_path: file_path.to_string(),
                line_start: body.line_start,
                line_end: body.line_end,
                parameters: params.parameters,
                return_type: signature.return_type,
                body_preview: preview(&body.text, self.preview_chars),
                tags: tags.keywords,
                includes_math: tags.includes_math,
                namespace: qualified.namespace().map(str::to_string),
                class_name: qualified.class_name().map(str::to_string),
                full_qualified_name: signature.qualified_name,
                description: None,
            };

            if params.malformed.is_empty() {
                extractions.push(Extraction::Clean(record));
            } else {
                let issues = params
                    .malformed
                    .into_iter()
                    .map(|segment| ScanError::MalformedParameter {
                        name: record.full_qualified_name.clone(),
                        segment,
                        line: i + 1,
                    })
                    .collect();
                extractions.push(Extraction::Degraded { record, issues });
            }

            i = body.next_line;
        }

        extractions
    }

    /// Convenience wrapper returning only the kept records.
    pub fn records(&self, content: &str, file_path: &str) -> Vec<FunctionRecord> {
        self.extract(content, file_path)
            .into_iter()
            .filter_map(Extraction::into_record)
            .collect()
    }
}
