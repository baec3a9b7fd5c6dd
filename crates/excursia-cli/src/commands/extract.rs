//! Extract command - pull booking details out of a single page.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use console::style;
use tracing::debug;

use excursia_core::extract::{ExcursionExtractor, ItemExtractor};
use excursia_core::{BookableItem, Category, PageClassifier};

use super::{OutputFormat, load_config, read_page};

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Page JSON file
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Extract even if the page does not classify as an excursion
    #[arg(long)]
    force: bool,
}

pub async fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }
    let page = read_page(&args.input)?;

    let category = PageClassifier::new(config.classifier.clone()).classify(&page);
    if category != Category::BookableItem && !args.force {
        anyhow::bail!(
            "{} is classified as {}, not an excursion. Use --force to extract anyway.",
            page.address,
            category
        );
    }

    let fields = ExcursionExtractor::new(&config.extraction).extract(&page)?;
    debug!("Extracted fields for {}", page.address);
    let item = BookableItem::from_page(page, fields);

    let content = match args.format {
        OutputFormat::Json => serde_json::to_string_pretty(&item)?,
        OutputFormat::Text => format_item_text(&item),
    };

    if let Some(output_path) = &args.output {
        fs::write(output_path, &content)?;
        eprintln!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", content);
    }

    Ok(())
}

fn format_item_text(item: &BookableItem) -> String {
    let mut output = String::new();

    output.push_str(&format!("Excursion: {}\n", item.title));
    output.push_str(&format!("URL: {}\n", item.address));
    output.push_str(&format!("Price: {}\n", item.price.as_deref().unwrap_or("-")));
    output.push_str(&format!("Duration: {}\n", item.duration.as_deref().unwrap_or("-")));

    if let Some(points) = &item.pickup_points {
        output.push_str("\nPickup points:\n");
        for point in points {
            output.push_str(&format!("  {}: {}\n", point.location, point.price_display));
        }
    }

    if let Some(costs) = &item.additional_costs {
        output.push_str("\nAdditional costs:\n");
        for cost in costs {
            output.push_str(&format!("  {} - {}\n", cost.price_display, cost.description));
        }
    }

    output
}
