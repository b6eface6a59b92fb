//! hdrdoc — extract documentation from C headers.
//!
//! - **stdin mode**: `hdrdoc < widget.h` prints one record
//! - **file mode**: `hdrdoc -o docs/api -f markdown include/*.h`

use anyhow::{Context, Result};
use clap::Parser;
use hdrdoc::render::{self, Renderer};
use hdrdoc::{parse_header, Catalog, ExtractOptions, HeaderFile, Settings};
use std::collections::HashSet;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(
    name = "hdrdoc",
    about = "Extract documented functions and types from C headers"
)]
struct Cli {
    /// Header files, directories or glob patterns. If omitted, reads from stdin.
    files: Vec<String>,

    /// Write one file per header into this directory instead of stdout
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Output format: json (default), markdown
    #[arg(short = 'f', long)]
    format: Option<String>,

    /// Keep functions whose name starts with `_` or contains "internal"
    #[arg(long, overrides_with = "no_include_private")]
    include_private: bool,

    /// Hide private functions even when the settings file keeps them
    #[arg(long, overrides_with = "include_private")]
    no_include_private: bool,

    /// Settings file (defaults to ./hdrdoc.json when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log debug diagnostics to stderr
    #[arg(short = 'v', long, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors
    #[arg(short = 'q', long)]
    quiet: bool,
}

/// Settings after layering the file under the CLI flags.
struct Resolved {
    options: ExtractOptions,
    format: String,
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let cwd = std::env::current_dir().context("failed to resolve working directory")?;
    let settings = Settings::discover(cli.config.as_deref(), &cwd)?;
    let resolved = resolve(&cli, settings);
    let renderer = render::create_renderer(&resolved.format)?;

    if cli.files.is_empty() {
        return stdin_mode(renderer.as_ref(), &resolved);
    }
    file_mode(&cli.files, renderer.as_ref(), &resolved)
}

fn init_tracing(quiet: bool, verbose: bool) -> Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("HDRDOC_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}

fn resolve(cli: &Cli, settings: Settings) -> Resolved {
    let format = match &cli.format {
        Some(format) => format.clone(),
        None if !settings.format.is_empty() => settings.format.clone(),
        None => "json".to_string(),
    };
    Resolved {
        options: ExtractOptions {
            include_private: match (cli.include_private, cli.no_include_private) {
                (true, _) => true,
                (_, true) => false,
                _ => settings.include_private,
            },
        },
        format,
        output: cli.output.clone().or(settings.output_dir),
    }
}

/// stdin mode: parse one header from stdin and print it.
fn stdin_mode(renderer: &dyn Renderer, resolved: &Resolved) -> Result<()> {
    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .context("failed to read stdin")?;

    let header = parse_header(&input, "<stdin>", "<stdin>", &resolved.options);
    print!("{}", renderer.render(&header)?);
    Ok(())
}

/// file mode: parse every input, then write one file each or print them all.
fn file_mode(patterns: &[String], renderer: &dyn Renderer, resolved: &Resolved) -> Result<()> {
    let input_files = expand_globs(patterns)?;
    let catalog = Catalog::build(&input_files, &resolved.options);
    for skipped in catalog.skipped() {
        tracing::debug!(path = %skipped.path().display(), "not in output");
    }
    let headers = catalog.into_headers();

    match &resolved.output {
        Some(dir) => write_outputs(dir, &headers, renderer),
        None => {
            print!("{}", renderer.render_all(&headers)?);
            Ok(())
        }
    }
}

fn write_outputs(output_dir: &Path, headers: &[HeaderFile], renderer: &dyn Renderer) -> Result<()> {
    fs::create_dir_all(output_dir)
        .with_context(|| format!("failed to create output directory: {}", output_dir.display()))?;

    for header in headers {
        let name = derive_output_name(header.filename());
        let out_path = output_dir.join(format!("{}.{}", name, renderer.file_extension()));
        fs::write(&out_path, renderer.render(header)?)
            .with_context(|| format!("failed to write {}", out_path.display()))?;
        tracing::info!(path = %out_path.display(), "wrote");
    }
    Ok(())
}

/// File extensions recognized as headers.
const SUPPORTED_EXTENSIONS: &[&str] = &["h"];

/// Expand glob patterns into a list of real file paths.
/// Bare directories are scanned (non-recursively) for headers.
///
/// Inputs keep their command-line order, which decides which of two
/// same-named headers wins. Directory and glob matches are sorted.
fn expand_globs(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for pattern in patterns {
        let path = Path::new(pattern);
        if path.is_file() {
            files.push(path.to_path_buf());
            continue;
        }
        if path.is_dir() {
            let entries = fs::read_dir(path)
                .with_context(|| format!("failed to read directory: {}", path.display()))?;
            let mut headers: Vec<_> = entries
                .flatten()
                .map(|entry| entry.path())
                .filter(|p| {
                    p.is_file()
                        && p.extension()
                            .and_then(|e| e.to_str())
                            .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext))
                })
                .collect();
            headers.sort();
            files.extend(headers);
            continue;
        }
        let mut matches: Vec<_> = glob::glob(pattern)
            .with_context(|| format!("invalid glob pattern: {}", pattern))?
            .filter_map(|r| r.ok())
            .filter(|p| p.is_file())
            .collect();
        if matches.is_empty() {
            // Kept so the catalog reports it as unreadable.
            tracing::warn!(pattern = %pattern, "no files matched");
            files.push(path.to_path_buf());
        }
        matches.sort();
        files.extend(matches);
    }
    let mut seen = HashSet::new();
    files.retain(|p| seen.insert(p.clone()));
    Ok(files)
}

/// "include/widget.h" → "widget"
fn derive_output_name(filename: &str) -> String {
    filename
        .strip_suffix(".h")
        .unwrap_or(filename)
        .to_string()
}
