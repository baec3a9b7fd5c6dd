//! Reclassify command - rebuild a corpus from its own pages.

use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use excursia_core::{Corpus, reclassify_with_progress};

use super::load_config;

/// Arguments for the reclassify command.
#[derive(Args)]
pub struct ReclassifyArgs {
    /// Input corpus JSON
    #[arg(required = true)]
    input: PathBuf,

    /// Output corpus JSON
    #[arg(short, long, required = true)]
    output: PathBuf,

    /// Write the ingest report (counts and skipped pages) as JSON
    #[arg(long)]
    report: Option<PathBuf>,

    /// Hide the progress bar
    #[arg(short, long)]
    quiet: bool,
}

pub async fn run(args: ReclassifyArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    let corpus = Corpus::from_file(&args.input)?;
    info!(
        "Loaded {} pages, {} items, {} services from {}",
        corpus.pages.len(),
        corpus.excursions.len(),
        corpus.services.len(),
        args.input.display()
    );

    let pb = if args.quiet {
        ProgressBar::hidden()
    } else {
        ProgressBar::new(corpus.pages.len() as u64)
    };
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} pages")?
            .progress_chars("=>-"),
    );

    let result = reclassify_with_progress(corpus, &config, |done, _| pb.set_position(done as u64));
    pb.finish_and_clear();

    result.corpus.save(&args.output)?;

    if let Some(report_path) = &args.report {
        std::fs::write(report_path, serde_json::to_string_pretty(&result.report)?)?;
    }

    let report = &result.report;
    println!(
        "{} Reclassified {} pages in {:?}",
        style("✓").green(),
        report.processed() + report.skipped.len(),
        start.elapsed()
    );
    println!(
        "   {} excursions, {} services, {} contact, {} generic",
        style(report.bookable).green(),
        report.services,
        report.contacts,
        report.generic
    );
    println!(
        "   Corpus now holds {} excursions, {} services, {} pages",
        result.corpus.excursions.len(),
        result.corpus.services.len(),
        result.corpus.pages.len()
    );

    if !report.skipped.is_empty() {
        println!();
        println!("{}", style("Skipped pages:").red());
        for skipped in &report.skipped {
            println!("  - {}: {}", skipped.address, skipped.reason);
        }
    }

    println!(
        "{} Saved to {}",
        style("✓").green(),
        args.output.display()
    );

    Ok(())
}
