//! Batch command - build a corpus from many page files.

use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error, warn};

use excursia_core::{Aggregator, Category};

use super::{load_config, read_pages};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Page files or glob pattern
    #[arg(required = true)]
    input: String,

    /// Output corpus JSON
    #[arg(short, long, required = true)]
    output: PathBuf,

    /// Also write a per-file summary CSV
    #[arg(long)]
    summary: Option<PathBuf>,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,
}

/// Result of reading and ingesting a single file.
struct FileResult {
    path: PathBuf,
    pages: usize,
    categories: Vec<Category>,
    error: Option<String>,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    // Expand glob pattern
    let mut files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            let ext = p.extension().and_then(|e| e.to_str()).unwrap_or("");
            ext.eq_ignore_ascii_case("json")
        })
        .collect();
    files.sort();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let mut aggregator = Aggregator::new(&config);
    let mut results = Vec::with_capacity(files.len());

    for path in files {
        match read_pages(&path) {
            Ok(pages) => {
                let count = pages.len();
                let categories = pages
                    .into_iter()
                    .filter_map(|page| aggregator.process(page))
                    .collect();
                debug!("Ingested {} pages from {}", count, path.display());
                results.push(FileResult {
                    path,
                    pages: count,
                    categories,
                    error: None,
                });
            }
            Err(e) => {
                let error_msg = e.to_string();
                if args.continue_on_error {
                    warn!("Failed to read {}: {}", path.display(), error_msg);
                    results.push(FileResult {
                        path,
                        pages: 0,
                        categories: Vec::new(),
                        error: Some(error_msg),
                    });
                } else {
                    error!("Failed to read {}: {}", path.display(), error_msg);
                    anyhow::bail!("Processing failed: {}", error_msg);
                }
            }
        }

        pb.inc(1);
    }

    pb.finish_with_message("Complete");

    let (corpus, report) = aggregator.finish();
    corpus.save(&args.output)?;

    if let Some(summary_path) = &args.summary {
        write_summary(summary_path, &results)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    let failed: Vec<_> = results.iter().filter(|r| r.error.is_some()).collect();

    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    println!(
        "   {} excursions, {} services, {} contact, {} generic, {} skipped",
        style(report.bookable).green(),
        report.services,
        report.contacts,
        report.generic,
        style(report.skipped.len()).red()
    );

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for result in &failed {
            println!(
                "  - {}: {}",
                result.path.display(),
                result.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    for skipped in &report.skipped {
        println!("  - skipped {}: {}", skipped.address, skipped.reason);
    }

    println!(
        "{} Corpus saved to {}",
        style("✓").green(),
        args.output.display()
    );

    Ok(())
}

fn write_summary(path: &Path, results: &[FileResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record(["filename", "status", "pages", "categories", "error"])?;

    for result in results {
        let filename = result.path.file_name().and_then(|s| s.to_str()).unwrap_or("");
        let categories = result
            .categories
            .iter()
            .map(|c| c.label())
            .collect::<Vec<_>>()
            .join(";");
        let status = if result.error.is_some() { "error" } else { "success" };

        wtr.write_record([
            filename,
            status,
            &result.pages.to_string(),
            &categories,
            result.error.as_deref().unwrap_or(""),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
