//! Batch processing command for multiple purchase order files.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error, warn};

use pofix_core::OrderProcessor;

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Glob pattern of HTML files
    #[arg(required = true)]
    input: String,

    /// Output directory (default: next to each input)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,

    /// Trim whitespace around text cells
    #[arg(long)]
    trim: bool,

    /// Cut values that do not fit their column
    #[arg(long)]
    truncate: bool,
}

/// Result of processing a single file.
struct ProcessResult {
    path: PathBuf,
    output_path: Option<PathBuf>,
    error: Option<String>,
    processing_time_ms: u64,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let mut config = super::load_config(config_path)?;
    super::process::apply_overrides(&mut config, args.trim, args.truncate);

    // Expand glob pattern
    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| is_html(p))
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    eprintln!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let processor = OrderProcessor::from_config(&config);
    let mut results = Vec::with_capacity(files.len());

    for path in files {
        let file_start = Instant::now();
        let output_path = output_path_for(&path, args.output_dir.as_deref());

        let result = processor
            .process_file(&path)
            .map_err(anyhow::Error::from)
            .and_then(|output| Ok(fs::write(&output_path, output)?));

        let processing_time_ms = file_start.elapsed().as_millis() as u64;

        match result {
            Ok(()) => {
                debug!("Wrote output to {}", output_path.display());
                results.push(ProcessResult {
                    path,
                    output_path: Some(output_path),
                    error: None,
                    processing_time_ms,
                });
            }
            Err(e) => {
                let error_msg = e.to_string();
                if args.continue_on_error {
                    warn!("Failed to process {}: {}", path.display(), error_msg);
                    results.push(ProcessResult {
                        path,
                        output_path: None,
                        error: Some(error_msg),
                        processing_time_ms,
                    });
                } else {
                    pb.abandon();
                    error!("Failed to process {}: {}", path.display(), error_msg);
                    anyhow::bail!("Processing failed for {}: {}", path.display(), error_msg);
                }
            }
        }

        pb.inc(1);
    }

    pb.finish_and_clear();

    let successful: Vec<_> = results.iter().filter(|r| r.error.is_none()).collect();
    let failed: Vec<_> = results.iter().filter(|r| r.error.is_some()).collect();

    for result in &successful {
        if let Some(output_path) = &result.output_path {
            eprintln!(
                "  {} {} -> {} ({}ms)",
                style("✓").green(),
                result.path.display(),
                output_path.display(),
                result.processing_time_ms
            );
        }
    }

    eprintln!();
    eprintln!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    eprintln!(
        "   {} successful, {} failed",
        style(successful.len()).green(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        eprintln!();
        eprintln!("{}", style("Failed files:").red());
        for result in &failed {
            eprintln!(
                "  - {}: {}",
                result.path.display(),
                result.error.as_deref().unwrap_or("unknown error")
            );
        }
        anyhow::bail!("{} of {} files failed", failed.len(), results.len());
    }

    Ok(())
}

fn is_html(path: &Path) -> bool {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    matches!(ext.to_lowercase().as_str(), "html" | "htm")
}

/// `<stem>.txt`, either beside the input or inside `output_dir`.
fn output_path_for(input: &Path, output_dir: Option<&Path>) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("order");
    let file_name = format!("{}.txt", stem);

    match output_dir {
        Some(dir) => dir.join(file_name),
        None => input.with_file_name(file_name),
    }
}
