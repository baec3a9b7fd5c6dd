//! Classify command - show the category of a single page.

use std::path::PathBuf;

use clap::Args;
use console::style;
use serde_json::json;

use excursia_core::PageClassifier;

use super::{OutputFormat, load_config, read_page};

/// Arguments for the classify command.
#[derive(Args)]
pub struct ClassifyArgs {
    /// Page JSON file
    #[arg(required = true)]
    input: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,
}

pub async fn run(args: ClassifyArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }
    let page = read_page(&args.input)?;

    let classifier = PageClassifier::new(config.classifier);
    let score = classifier.score(&page);
    let category = score.category();

    match args.format {
        OutputFormat::Json => {
            let output = json!({
                "url": page.address,
                "category": category,
                "score": score,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Text => {
            println!("{} {}", style("Category:").bold(), category);
            println!("  bookable: {}", score.bookable);
            println!("  service:  {}", score.service);
            println!("  contact:  {}", score.contact);
            if score.has_price_signal {
                println!("  {} price amount present", style("+").green());
            }
            if score.has_duration_signal {
                println!("  {} duration amount present", style("+").green());
            }
        }
    }

    Ok(())
}
