//! CLI application for excursion corpus processing.

mod commands;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{batch, catalog, classify, config, extract, reclassify, stats};

/// Excursia - Classify crawled excursion pages and extract booking details
#[derive(Parser)]
#[command(name = "excursia")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rebuild a corpus by reclassifying its pages
    Reclassify(reclassify::ReclassifyArgs),

    /// Build a corpus from page files
    Batch(batch::BatchArgs),

    /// Classify a single page file
    Classify(classify::ClassifyArgs),

    /// Extract booking details from a single page file
    Extract(extract::ExtractArgs),

    /// Export the excursion catalog from a corpus
    Catalog(catalog::CatalogArgs),

    /// Show corpus statistics
    Stats(stats::StatsArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose)?;

    let config_path = cli.config.as_deref();
    match cli.command {
        Commands::Reclassify(args) => reclassify::run(args, config_path).await,
        Commands::Batch(args) => batch::run(args, config_path).await,
        Commands::Classify(args) => classify::run(args, config_path).await,
        Commands::Extract(args) => extract::run(args, config_path).await,
        Commands::Catalog(args) => catalog::run(args, config_path).await,
        Commands::Stats(args) => stats::run(args, config_path).await,
        Commands::Config(args) => config::run(args, config_path).await,
    }
}

/// Install a stderr subscriber; stdout is reserved for command output.
fn init_logging(verbose: u8) -> anyhow::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level(verbose))
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

/// Each `-v` lowers the threshold by one level, starting from warnings.
fn log_level(verbose: u8) -> Level {
    match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}
