//! protolift - Reconstruct Protocol Buffer schemas from generated class layouts
//!
//! This tool loads a class catalog dumped from a host runtime and rebuilds
//! human-readable `.proto` schemas for the requested root message types.

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, ValueEnum};
use protolift_core::introspect::simple_name;
use protolift_core::proto::GENERATED_TRAILING_FIELDS;
use protolift_core::{
    ClassCatalog, FixedWindow, ProbeWindow, Reconstructor, ReconstructorConfig, StatsWriter,
    TypeProvider, WindowDetector,
};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, trace, Level};
use tracing_subscriber::EnvFilter;
use walkdir::WalkDir;

/// Reconstruct Protocol Buffer schemas from generated class layouts
#[derive(Parser, Debug)]
#[command(name = "protolift")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(flatten)]
    input: CatalogSource,

    /// Fully-qualified names of the root message types
    #[arg(required = true)]
    roots: Vec<String>,

    /// Output directory for reconstructed .proto files (stdout if omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Output format
    #[arg(long, value_enum, default_value = "proto")]
    format: OutputFormat,

    /// Spaces used to indent fields
    #[arg(long, default_value = "2")]
    indent: usize,

    /// Skip this many leading fields instead of probing for the first field number
    #[arg(long)]
    leading: Option<usize>,

    /// Number of trailing internal fields to ignore
    #[arg(long, default_value_t = GENERATED_TRAILING_FIELDS)]
    trailing: usize,

    /// Dry run - don't write files, just show what would be written
    #[arg(long)]
    dry_run: bool,

    /// Overwrite existing files with different content
    #[arg(long)]
    force: bool,
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
struct CatalogSource {
    /// Path to a class catalog JSON file
    #[arg(short, long)]
    catalog: Option<PathBuf>,

    /// Path to a directory of class catalog JSON files to merge
    #[arg(short = 'd', long)]
    catalog_dir: Option<PathBuf>,
}

/// Output format for reconstructed schemas
#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Proto-like schema text
    Proto,
    /// Counts of recovered types and fields
    Stats,
}

/// Result of writing one schema file
#[derive(Debug, PartialEq, Eq)]
enum WriteOutcome {
    Written,
    Unchanged,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_target(false)
        .init();

    let catalog = if let Some(ref file) = cli.input.catalog {
        ClassCatalog::from_path(file)
            .with_context(|| format!("Failed to load catalog: {}", file.display()))?
    } else if let Some(ref directory) = cli.input.catalog_dir {
        load_catalog_dir(directory)?
    } else {
        bail!("Either --catalog or --catalog-dir must be specified")
    };
    info!("Catalog holds {} classes", catalog.len());

    let config = ReconstructorConfig::new().indent_str(" ".repeat(cli.indent));
    let reconstructor = Reconstructor::new(catalog).with_config(config);

    // Dispatch based on window policy
    match cli.leading {
        Some(leading) => run(
            &cli,
            &reconstructor.with_detector(FixedWindow::new(leading, cli.trailing)),
        ),
        None => run(
            &cli,
            &reconstructor.with_detector(ProbeWindow::new().trailing(cli.trailing)),
        ),
    }
}

/// Merge every `*.json` catalog below a directory, in file name order
fn load_catalog_dir(directory: &Path) -> Result<ClassCatalog> {
    if !directory.is_dir() {
        bail!("Path is not a directory: {}", directory.display());
    }

    let mut catalog = ClassCatalog::new();
    let mut files = 0;

    for entry in WalkDir::new(directory)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some("json") {
            trace!("Skipping {}", path.display());
            continue;
        }

        let part = ClassCatalog::from_path(path)
            .with_context(|| format!("Failed to load catalog: {}", path.display()))?;
        catalog.extend(part);
        files += 1;
    }

    if files == 0 {
        bail!("No catalog files found in {}", directory.display());
    }

    debug!("Merged {} catalog files from {}", files, directory.display());
    Ok(catalog)
}

/// Reconstruct every root; failures are logged and reported at the end
fn run<P: TypeProvider, D: WindowDetector>(
    cli: &Cli,
    reconstructor: &Reconstructor<P, D>,
) -> Result<()> {
    let mut failed = 0;

    for root in &cli.roots {
        if let Err(e) = process_root(cli, reconstructor, root) {
            error!("Failed to reconstruct {}: {:#}", root, e);
            failed += 1;
        }
    }

    if failed > 0 {
        bail!("{} of {} root types failed", failed, cli.roots.len());
    }
    Ok(())
}

fn process_root<P: TypeProvider, D: WindowDetector>(
    cli: &Cli,
    reconstructor: &Reconstructor<P, D>,
    root: &str,
) -> Result<()> {
    match cli.format {
        OutputFormat::Stats => {
            let mut stats = StatsWriter::default();
            reconstructor.reconstruct_with(root, &mut stats)?;
            println!(
                "{}: {} messages, {} fields, {} enums, {} values",
                root, stats.message_count, stats.field_count, stats.enum_count, stats.value_count
            );
        }
        OutputFormat::Proto => {
            let content = reconstructor.reconstruct(root)?;

            let Some(ref output_dir) = cli.output else {
                print!("{}", content);
                return Ok(());
            };

            let output_path = output_dir.join(output_filename(root, &cli.roots));
            if cli.dry_run {
                println!("Would write: {}", output_path.display());
                if cli.verbose > 0 {
                    println!("---");
                    println!("{}", content);
                    println!("---");
                }
                return Ok(());
            }

            match write_schema_file(&output_path, &content, cli.force)? {
                WriteOutcome::Written => println!("Wrote {}", output_path.display()),
                WriteOutcome::Unchanged => info!("Unchanged {}", output_path.display()),
            }
        }
    }

    Ok(())
}

/// `com.example.Outer$Order` becomes `Order.proto`, or
/// `com.example.Outer.Order.proto` when another root shares the simple name
fn output_filename(root: &str, roots: &[String]) -> String {
    let simple = simple_name(root);
    let shared = roots
        .iter()
        .filter(|other| other.as_str() != root && simple_name(other) == simple)
        .count();

    if shared == 0 {
        format!("{}.proto", simple)
    } else {
        format!("{}.proto", root.replace('$', "."))
    }
}

fn content_hash(content: &str) -> blake3::Hash {
    blake3::hash(content.as_bytes())
}

/// Write a schema file, leaving identical files untouched
fn write_schema_file(output_path: &Path, content: &str, force: bool) -> Result<WriteOutcome> {
    // Create parent directories
    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    if output_path.exists() {
        let existing = fs::read_to_string(output_path)
            .with_context(|| format!("Failed to read file: {}", output_path.display()))?;
        if content_hash(&existing) == content_hash(content) {
            return Ok(WriteOutcome::Unchanged);
        }
        if !force {
            bail!(
                "File already exists: {} (use --force to overwrite)",
                output_path.display()
            );
        }
    }

    fs::write(output_path, content)
        .with_context(|| format!("Failed to write file: {}", output_path.display()))?;

    Ok(WriteOutcome::Written)
}
