//! Stats command - collection sizes and catalog coverage of a corpus.

use std::path::PathBuf;

use clap::Args;
use console::style;
use serde_json::json;

use excursia_core::catalog::{CatalogStats, CorpusStats, build_catalog};
use excursia_core::Corpus;

use super::{OutputFormat, load_config};

/// Arguments for the stats command.
#[derive(Args)]
pub struct StatsArgs {
    /// Input corpus JSON
    #[arg(required = true)]
    input: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,
}

pub async fn run(args: StatsArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    let corpus = Corpus::from_file(&args.input)?;
    let corpus_stats = CorpusStats::from_corpus(&corpus);
    let catalog_stats = CatalogStats::from_catalog(&build_catalog(&corpus, &config.catalog));

    match args.format {
        OutputFormat::Json => {
            let output = json!({
                "corpus": corpus_stats,
                "catalog": catalog_stats,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Text => {
            println!("{}", style("Corpus:").bold());
            println!("  Pages:          {}", corpus_stats.pages);
            println!("  Excursions:     {}", corpus_stats.excursions);
            println!("  With logistics: {}", corpus_stats.excursions_with_logistics);
            println!("  Services:       {}", corpus_stats.services);
            println!("  Images:         {}", corpus_stats.images);
            println!("  Contact fields: {}", corpus_stats.contact_fields);
            println!();
            println!("{}", style("Catalog:").bold());
            println!("  Entries:        {}", catalog_stats.total);
            println!("  With price:     {}", catalog_stats.with_price);
            println!("  With duration:  {}", catalog_stats.with_duration);
            println!("  Total images:   {}", catalog_stats.total_images);
        }
    }

    Ok(())
}
