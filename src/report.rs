//! Output formatting for scan results.
//!
//! Supports two output formats plus the on-disk analysis file:
//! - Pretty: colored terminal output for human readability
//! - JSON: structured report for programmatic consumption
//! - `cpp_analysis.json`: the bare record array, for caching and inspection

use colored::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::scan::{Diagnostic, DiagnosticKind, FunctionRecord, ScanResult};

/// File name written by `save_analysis`.
pub const ANALYSIS_FILE_NAME: &str = "cpp_analysis.json";

// =============================================================================
// JSON Format
// =============================================================================

/// Top-level JSON report.
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonReport {
    pub version: String,
    pub path: String,
    pub files_scanned: usize,
    pub files_skipped: usize,
    pub function_count: usize,
    pub degraded: usize,
    pub discarded: usize,
    pub functions: Vec<FunctionRecord>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<Diagnostic>,
}

impl JsonReport {
    pub fn new(path: &str, result: &ScanResult) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            path: path.to_string(),
            files_scanned: result.files_scanned,
            files_skipped: result.files_skipped,
            function_count: result.function_count(),
            degraded: result.degraded,
            discarded: result.discarded,
            functions: result.functions.clone(),
            diagnostics: result.diagnostics.clone(),
        }
    }
}

/// Write results in JSON format to stdout.
pub fn write_json(path: &str, result: &ScanResult) -> anyhow::Result<()> {
    let report = JsonReport::new(path, result);
    let json = serde_json::to_string_pretty(&report)?;
    println!("{}", json);
    Ok(())
}

// =============================================================================
// Analysis file
// =============================================================================

/// Write `records` to `<dir>/cpp_analysis.json`, creating `dir` if needed.
pub fn save_analysis(records: &[FunctionRecord], dir: &Path) -> anyhow::Result<PathBuf> {
    fs::create_dir_all(dir)
        .map_err(|e| anyhow::anyhow!("creating output directory {}: {}", dir.display(), e))?;

    let path = dir.join(ANALYSIS_FILE_NAME);
    let json = serde_json::to_string_pretty(records)?;
    fs::write(&path, json).map_err(|e| anyhow::anyhow!("writing {}: {}", path.display(), e))?;

    tracing::info!(path = %path.display(), records = records.len(), "saved analysis");
    Ok(path)
}

/// Read back a file written by `save_analysis`.
pub fn load_analysis(path: &Path) -> anyhow::Result<Vec<FunctionRecord>> {
    let content = fs::read_to_string(path)?;
    let records: Vec<FunctionRecord> = serde_json::from_str(&content)
        .map_err(|e| anyhow::anyhow!("parsing {}: {}", path.display(), e))?;
    Ok(records)
}

// =============================================================================
// Pretty Format
// =============================================================================

/// One-line signature such as `geo::Vec2::scale(double factor) -> void`.
pub fn format_signature(record: &FunctionRecord) -> String {
    let params: Vec<String> = record
        .parameters
        .iter()
        .map(|p| format!("{} {}", p.param_type, p.name))
        .collect();

    let mut sig = format!("{}({})", record.full_qualified_name, params.join(", "));
    if !record.return_type.is_empty() {
        sig.push_str(" -> ");
        sig.push_str(&record.return_type);
    }
    sig
}

fn make_relative_path(file_path: &str, base_path: &Path) -> String {
    if base_path.to_string_lossy().is_empty() {
        return file_path.to_string();
    }

    let file = Path::new(file_path);

    // If they're the same (single file scan), return just the filename
    if file == base_path {
        return file
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| file_path.to_string());
    }

    file.strip_prefix(base_path)
        .map(|p| p.to_string_lossy().replace('\\', "/"))
        .unwrap_or_else(|_| file_path.to_string())
}

/// Write results in pretty (human-readable) format.
pub fn write_pretty(path: &Path, result: &ScanResult, show_diagnostics: bool) {
    // Header
    println!();
    print!("  ");
    print!("{}", "cppscan".cyan().bold());
    println!(" v{}", env!("CARGO_PKG_VERSION"));
    println!();

    print!("  {}", "Scanning: ".dimmed());
    println!("{}", path.display());
    println!();

    if !result.functions.is_empty() {
        write_functions(path, &result.functions);
        println!();
    }

    if !result.diagnostics.is_empty() {
        write_diagnostics(path, &result.diagnostics, show_diagnostics);
        println!();
    }

    write_summary(result);
    println!();
}

fn write_functions(base: &Path, functions: &[FunctionRecord]) {
    println!("  {} ({}):", "Functions".bold(), functions.len());
    println!();

    for f in functions {
        print!("    {}", make_relative_path(&f.file_path, base).blue());
        println!("{}", format!(":{}-{}", f.line_start, f.line_end).dimmed());

        print!("      {}", format_signature(f));
        if !f.tags.is_empty() {
            let tags: Vec<&str> = f.tags.iter().map(String::as_str).collect();
            print!("  {}", format!("[{}]", tags.join(", ")).green());
        }
        if f.includes_math {
            print!("  {}", "math".magenta());
        }
        println!();
    }
}

fn write_diagnostics(base: &Path, diagnostics: &[Diagnostic], show_details: bool) {
    println!("  {} ({}):", "Diagnostics".yellow(), diagnostics.len());

    if !show_details {
        println!("    {}", "(use --show-diagnostics to see details)".dimmed());
        return;
    }

    println!();
    for d in diagnostics {
        write_kind_tag(d.kind);
        print!("{}", make_relative_path(&d.file, base).blue());
        if d.line > 0 {
            print!("{}", format!(":{}", d.line).dimmed());
        }
        println!();
        println!("            {}", d.message);
    }
}

fn write_kind_tag(kind: DiagnosticKind) {
    match kind {
        DiagnosticKind::DiscoveryFailure | DiagnosticKind::FileReadFailure => {
            print!("    {} ", "SKIP ".red())
        }
        DiagnosticKind::UnterminatedBody => print!("    {} ", "DROP ".yellow()),
        DiagnosticKind::MalformedParameter => print!("    {} ", "WARN ".yellow()),
    }
}

fn write_summary(result: &ScanResult) {
    print!("  {}", "Files: ".dimmed());
    print!("{} scanned", result.files_scanned);
    if result.files_skipped > 0 {
        print!(", {}", format!("{} skipped", result.files_skipped).red());
    }
    println!();

    print!("  {}", "Functions: ".dimmed());
    let count = result.function_count();
    if count > 0 {
        print!("{}", count.to_string().green().bold());
    } else {
        print!("{}", count.to_string().yellow());
    }
    if result.degraded > 0 {
        print!("  {}", format!("({} degraded)", result.degraded).dimmed());
    }
    if result.discarded > 0 {
        print!("  {}", format!("({} discarded)", result.discarded).dimmed());
    }
    println!();
}
