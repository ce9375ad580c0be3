//! Command-line interface for cppscan.

use clap::{ArgAction, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};

use crate::config::{self, ScanConfig};
use crate::report;
use crate::scan::{RepositoryAnalyzer, ScanResult};

/// Exit codes.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILED: i32 = 1;
pub const EXIT_ERROR: i32 = 2;

/// Config file names searched for in the working directory.
const DEFAULT_CONFIG_NAMES: &[&str] = &["cppscan.yaml", ".cppscan.yaml", "config.yaml"];

/// Commented configuration written by `cppscan init`.
pub const DEFAULT_CONFIG_TEMPLATE: &str = include_str!("templates/default.yaml");

/// Heuristic C++ function scanner.
///
/// cppscan walks a source tree and extracts every scoped function
/// definition (`ns::Class::method`) it can recognize lexically: qualified
/// name, parameters, return type, body span and a short body preview,
/// tagged with algorithm and math keywords found in the body.
#[derive(Parser)]
#[command(name = "cppscan")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace); RUST_LOG wins when set
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scan a C++ source tree for function definitions
    Scan(ScanArgs),
    /// Write a default cppscan configuration file
    Init(InitArgs),
}

/// Arguments for the scan command.
#[derive(Parser)]
pub struct ScanArgs {
    /// Root to scan (file or directory); overrides repo_path from the config
    pub path: Option<PathBuf>,

    /// Path to config YAML file (default: auto-discover)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output format: pretty or json
    #[arg(short, long, default_value = "pretty")]
    pub format: String,

    /// Directory that receives cpp_analysis.json (overrides output_path)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Scan files one at a time instead of on the thread pool
    #[arg(long)]
    pub sequential: bool,

    /// Maximum characters kept in each body preview
    #[arg(long)]
    pub preview_chars: Option<usize>,

    /// List every diagnostic in pretty output
    #[arg(long)]
    pub show_diagnostics: bool,

    /// Exit with status 1 when no functions are found
    #[arg(long)]
    pub fail_on_empty: bool,
}

/// Arguments for the init command.
#[derive(Parser)]
pub struct InitArgs {
    /// Output file path
    #[arg(short, long, default_value = "cppscan.yaml")]
    pub output: PathBuf,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

/// Look for a config file in the current directory.
fn discover_config() -> Option<PathBuf> {
    DEFAULT_CONFIG_NAMES
        .iter()
        .map(PathBuf::from)
        .find(|path| path.is_file())
}

/// Load the config named by `--config`, an auto-discovered one, or defaults.
fn load_config(explicit: Option<&Path>) -> anyhow::Result<ScanConfig> {
    let path = match explicit {
        Some(p) => Some(p.to_path_buf()),
        None => discover_config(),
    };

    match path {
        Some(p) => {
            let config = ScanConfig::parse_file(&p)
                .map_err(|e| anyhow::anyhow!("parsing config {}: {}", p.display(), e))?;
            tracing::debug!(config = %p.display(), "loaded configuration");
            Ok(config)
        }
        None => Ok(ScanConfig::default()),
    }
}

fn apply_overrides(config: &mut ScanConfig, args: &ScanArgs) {
    if args.sequential {
        config.parallel = false;
    }
    if let Some(n) = args.preview_chars {
        config.preview_chars = n;
    }
    if let Some(dir) = &args.output {
        config.output_path = Some(dir.clone());
    }
}

/// Scan `files`, drawing a progress bar on stderr.
fn analyze_with_progress(
    analyzer: &RepositoryAnalyzer,
    files: &[PathBuf],
) -> anyhow::Result<ScanResult> {
    let bar = ProgressBar::new(files.len() as u64);
    bar.set_style(
        ProgressStyle::with_template("  {bar:30.cyan/blue} {pos}/{len} files {msg}")?
            .progress_chars("=> "),
    );

    let on_file = |path: &Path| {
        if let Some(name) = path.file_name() {
            bar.set_message(name.to_string_lossy().to_string());
        }
        bar.inc(1);
    };
    let result = analyzer.analyze_files_with(files, &on_file);

    bar.finish_and_clear();
    Ok(result)
}

/// Run the scan command.
pub fn run_scan(args: &ScanArgs) -> anyhow::Result<i32> {
    // Validate format
    if args.format != "pretty" && args.format != "json" {
        eprintln!(
            "Error: invalid format {:?}, must be 'pretty' or 'json'",
            args.format
        );
        return Ok(EXIT_ERROR);
    }
    let pretty = args.format == "pretty";

    let mut config = match load_config(args.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Ok(EXIT_ERROR);
        }
    };
    apply_overrides(&mut config, args);

    if let Err(e) = config::validate(&config) {
        eprintln!("Error: invalid config: {}", e);
        return Ok(EXIT_ERROR);
    }

    let root = match config.resolve_root(args.path.as_deref()) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("Pass a PATH or set repo_path in the config (see 'cppscan init')");
            return Ok(EXIT_ERROR);
        }
    };

    let analyzer = RepositoryAnalyzer::from_config(&config)?;

    // Discovery failure is the only fatal scan error
    let files = match analyzer.discover(&root) {
        Ok(files) => files,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Ok(EXIT_ERROR);
        }
    };

    if files.is_empty() {
        eprintln!("Warning: no files to scan");
    }

    let result = if pretty && !files.is_empty() {
        analyze_with_progress(&analyzer, &files)?
    } else {
        analyzer.analyze_files(&files)
    };

    // Output results
    if pretty {
        report::write_pretty(&root, &result, args.show_diagnostics);
    } else {
        report::write_json(&root.to_string_lossy(), &result)?;
    }

    if let Some(dir) = &config.output_path {
        let written = report::save_analysis(&result.functions, dir)?;
        if pretty {
            println!("  Saved {}", written.display());
            println!();
        }
    }

    if args.fail_on_empty && result.is_empty() {
        Ok(EXIT_FAILED)
    } else {
        Ok(EXIT_SUCCESS)
    }
}

/// Run the init command.
pub fn run_init(args: &InitArgs) -> anyhow::Result<i32> {
    // Check if output already exists
    if args.output.exists() && !args.force {
        eprintln!("Error: file already exists: {}", args.output.display());
        eprintln!("Use --force to overwrite or --output to choose another path");
        return Ok(EXIT_ERROR);
    }

    // Create output directory if needed
    if let Some(parent) = args.output.parent() {
        if !parent.as_os_str().is_empty() && parent != Path::new(".") {
            if let Err(e) = std::fs::create_dir_all(parent) {
                eprintln!("Error: failed to create directory: {}", e);
                return Ok(EXIT_ERROR);
            }
        }
    }

    if let Err(e) = std::fs::write(&args.output, DEFAULT_CONFIG_TEMPLATE) {
        eprintln!("Error: failed to write config: {}", e);
        return Ok(EXIT_ERROR);
    }

    println!("Created {}", args.output.display());
    println!();
    println!("Next steps:");
    println!("  1. Set repo_path in {} (or pass a PATH)", args.output.display());
    println!("  2. Run: cppscan scan --config {}", args.output.display());

    Ok(EXIT_SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_scan_args() {
        let cli = Cli::try_parse_from([
            "cppscan",
            "-vv",
            "scan",
            "engine",
            "--format",
            "json",
            "--sequential",
            "--preview-chars",
            "80",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Scan(args) => {
                assert_eq!(args.path, Some(PathBuf::from("engine")));
                assert_eq!(args.format, "json");
                assert!(args.sequential);
                assert_eq!(args.preview_chars, Some(80));
                assert!(args.output.is_none());
            }
            _ => panic!("expected scan command"),
        }
    }

    #[test]
    fn test_apply_overrides() {
        let cli = Cli::try_parse_from([
            "cppscan", "scan", "--sequential", "--preview-chars", "12", "--output", "out",
        ])
        .unwrap();
        let Commands::Scan(args) = cli.command else {
            panic!("expected scan command");
        };

        let mut config = ScanConfig::default();
        apply_overrides(&mut config, &args);
        assert!(!config.parallel);
        assert_eq!(config.preview_chars, 12);
        assert_eq!(config.output_path, Some(PathBuf::from("out")));
    }

    #[test]
    fn test_init_refuses_overwrite_without_force() {
        let temp = TempDir::new().unwrap();
        let output = temp.path().join("conf").join("cppscan.yaml");

        let args = InitArgs {
            output: output.clone(),
            force: false,
        };
        assert_eq!(run_init(&args).unwrap(), EXIT_SUCCESS);
        assert_eq!(
            std::fs::read_to_string(&output).unwrap(),
            DEFAULT_CONFIG_TEMPLATE
        );

        std::fs::write(&output, "parallel: false\n").unwrap();
        assert_eq!(run_init(&args).unwrap(), EXIT_ERROR);
        assert_eq!(std::fs::read_to_string(&output).unwrap(), "parallel: false\n");

        let forced = InitArgs {
            output: output.clone(),
            force: true,
        };
        assert_eq!(run_init(&forced).unwrap(), EXIT_SUCCESS);
        assert_eq!(
            std::fs::read_to_string(&output).unwrap(),
            DEFAULT_CONFIG_TEMPLATE
        );
    }

    #[test]
    fn test_scan_json_writes_analysis() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("src");
        std::fs::create_dir_all(&src).unwrap();
        std::fs::write(
            src.join("a.cpp"),
            "int Graph::bfs(int start) {\n    return start;\n}\n",
        )
        .unwrap();
        let out = temp.path().join("docs");
        let config = temp.path().join("scan.yaml");
        std::fs::write(&config, "parallel: false\n").unwrap();

        let args = ScanArgs {
            path: Some(src),
            config: Some(config),
            format: "json".to_string(),
            output: Some(out.clone()),
            sequential: false,
            preview_chars: None,
            show_diagnostics: false,
            fail_on_empty: true,
        };
        assert_eq!(run_scan(&args).unwrap(), EXIT_SUCCESS);

        let records = report::load_analysis(&out.join(report::ANALYSIS_FILE_NAME)).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].full_qualified_name, "Graph::bfs");
    }

    #[test]
    fn test_scan_missing_root_is_error() {
        let temp = TempDir::new().unwrap();
        let config = temp.path().join("scan.yaml");
        std::fs::write(&config, "").unwrap();

        let args = ScanArgs {
            path: Some(temp.path().join("nope")),
            config: Some(config),
            format: "json".to_string(),
            output: None,
            sequential: true,
            preview_chars: None,
            show_diagnostics: false,
            fail_on_empty: false,
        };
        assert_eq!(run_scan(&args).unwrap(), EXIT_ERROR);
    }

    #[test]
    fn test_invalid_format() {
        let args = ScanArgs {
            path: None,
            config: None,
            format: "xml".to_string(),
            output: None,
            sequential: false,
            preview_chars: None,
            show_diagnostics: false,
            fail_on_empty: false,
        };
        assert_eq!(run_scan(&args).unwrap(), EXIT_ERROR);
    }
}
