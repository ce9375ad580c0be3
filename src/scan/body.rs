//! Brace-depth scanning to find where a function body ends.
//!
//! The scanner counts every `{` and `}` it sees. Braces inside string or
//! character literals and comments are counted too, which can shift the
//! detected end of a body.

/// Default cap on preview length, in characters.
pub const DEFAULT_PREVIEW_CHARS: usize = 500;

/// Appended to previews that were cut at the cap.
pub const TRUNCATION_MARKER: &str = "...";

/// A resolved function body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Body {
    /// First body line (1-indexed).
    pub line_start: usize,
    /// Line holding the closing brace (1-indexed).
    pub line_end: usize,
    /// Code after the opening brace up to the closing one. For multi-line
    /// bodies this starts with the rest of the signature line when that rest
    /// is not blank.
    pub text: String,
    /// 0-indexed line where scanning should resume.
    pub next_line: usize,
}

/// Find the body opened on `lines[sig_index]` at byte `body_offset`.
///
/// The rest of the signature line is scanned first, so one-line definitions
/// resolve to a body on the signature line itself. Otherwise that rest is
/// kept at the head of the body text, so its braces and keywords are seen by
/// whoever recounts or tags the body. Returns None when the input ends before
/// the depth returns to zero.
pub fn extract_body(lines: &[&str], sig_index: usize, body_offset: usize) -> Option<Body> {
    let mut depth = 1usize;

    let rest = lines[sig_index].get(body_offset..).unwrap_or("");
    if let Some(close) = find_close(rest, &mut depth) {
        return Some(Body {
            line_start: sig_index + 1,
            line_end: sig_index + 1,
            text: rest[..close].to_string(),
            next_line: sig_index + 1,
        });
    }

    for (j, line) in lines.iter().enumerate().skip(sig_index + 1) {
        if find_close(line, &mut depth).is_some() {
            let following = lines[sig_index + 1..=j].join("\n");
            let text = if rest.trim().is_empty() {
                following
            } else {
                format!("{}\n{}", rest, following)
            };
            return Some(Body {
                line_start: sig_index + 2,
                line_end: j + 1,
                text,
                next_line: j + 1,
            });
        }
    }

    None
}

/// Recount `text` from depth 1 and return the 0-indexed line where the
/// depth first reaches zero.
pub fn closing_line(text: &str) -> Option<usize> {
    let mut depth = 1usize;
    text.lines()
        .position(|line| find_close(line, &mut depth).is_some())
}

/// Advance `depth` across `text`; return the byte index where it hits zero.
fn find_close(text: &str, depth: &mut usize) -> Option<usize> {
    for (idx, ch) in text.char_indices() {
        match ch {
            '{' => *depth += 1,
            '}' => {
                *depth -= 1;
                if *depth == 0 {
                    return Some(idx);
                }
            }
            _ => {}
        }
    }
    None
}

/// Cap `text` at `max_chars` characters, marking the cut.
pub fn preview(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}{}", &text[..idx], TRUNCATION_MARKER),
        None => text.to_string(),
    }
}
