//! Catalog command - export cleaned excursion records.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;
use console::style;
use tracing::info;

use excursia_core::catalog::{Catalog, CatalogStats, build_catalog, excursion_urls};
use excursia_core::Corpus;

use super::load_config;

/// Arguments for the catalog command.
#[derive(Args)]
pub struct CatalogArgs {
    /// Input corpus JSON
    #[arg(required = true)]
    input: PathBuf,

    /// Output catalog JSON
    #[arg(short, long, required = true)]
    output: PathBuf,

    /// Also write a tab-separated summary
    #[arg(long)]
    summary: Option<PathBuf>,

    /// Also write the sorted list of excursion URLs, one per line
    #[arg(long)]
    urls: Option<PathBuf>,
}

pub async fn run(args: CatalogArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    let corpus = Corpus::from_file(&args.input)?;
    let catalog = build_catalog(&corpus, &config.catalog);

    fs::write(&args.output, serde_json::to_string_pretty(&catalog)?)?;
    println!(
        "{} Exported {} excursions to {}",
        style("✓").green(),
        catalog.total,
        args.output.display()
    );

    if let Some(summary_path) = &args.summary {
        write_summary(summary_path, &catalog)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    if let Some(urls_path) = &args.urls {
        let urls = excursion_urls(&corpus, &config.catalog);
        let mut content = urls.join("\n");
        if !content.is_empty() {
            content.push('\n');
        }
        fs::write(urls_path, content)?;
        info!("Wrote {} URLs to {}", urls.len(), urls_path.display());
        println!(
            "{} {} URLs written to {}",
            style("✓").green(),
            urls.len(),
            urls_path.display()
        );
    }

    let stats = CatalogStats::from_catalog(&catalog);
    println!();
    println!("{}", style("Catalog statistics:").bold());
    println!("  With price:            {}", stats.with_price);
    println!("  With duration:         {}", stats.with_duration);
    println!("  With pickup points:    {}", stats.with_pickup_points);
    println!("  With additional costs: {}", stats.with_additional_costs);
    println!("  Total images:          {}", stats.total_images);

    Ok(())
}

fn write_summary(path: &Path, catalog: &Catalog) -> anyhow::Result<()> {
    let mut wtr = csv::WriterBuilder::new().delimiter(b'\t').from_path(path)?;

    wtr.write_record(["URL", "Название", "Цена", "Продолжительность", "Изображений", "Категория"])?;

    for entry in &catalog.excursions {
        wtr.write_record([
            entry.url.as_str(),
            entry.title.as_str(),
            entry.price.as_deref().unwrap_or(""),
            entry.duration.as_deref().unwrap_or(""),
            &entry.image_count.to_string(),
            entry.category.as_str(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
