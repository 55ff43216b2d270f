//! Command-line front end: search a storefront (or parse a saved page) and
//! print the first products found.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use storefront_parser::extractors::decode_document;
use storefront_parser::present::{render_json, render_text};
use storefront_parser::{scrape, ExtractionRequest, HttpFetcher, ProductExtractor, ScraperConfig};

#[derive(Parser)]
#[command(
    name = "storefront-parser",
    about = "Extract product titles and prices from storefront search results",
    version
)]
struct Cli {
    /// Search keyword.
    #[arg(short, long, default_value = "laptop")]
    query: String,

    /// Number of products to keep (defaults to the configured limit).
    #[arg(short, long)]
    limit: Option<usize>,

    /// Parse a saved HTML page instead of fetching.
    #[arg(long)]
    html: Option<PathBuf>,

    /// JSON config file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Skip the listing-card strategy.
    #[arg(long)]
    no_listing_cards: bool,

    /// Print the full report as JSON.
    #[arg(long)]
    json: bool,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let mut config = match &cli.config {
        Some(path) => ScraperConfig::from_path(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => ScraperConfig::default(),
    }
    .with_env_overrides()
    .context("applying environment overrides")?;
    config.enable_listing_cards = !cli.no_listing_cards;

    let request = ExtractionRequest::new(cli.query.trim(), cli.limit.unwrap_or(config.limit));
    anyhow::ensure!(!request.query.is_empty(), "query must not be empty");

    let extractor = ProductExtractor::new(&config).context("building extractor")?;

    let report = match &cli.html {
        Some(path) => {
            let bytes =
                std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
            let html = decode_document(&bytes);
            extractor.extract(Some(&*html), &request)
        }
        None => {
            let fetcher = HttpFetcher::new(&config).context("building fetcher")?;
            scrape(&fetcher, &extractor, &request)
        }
    };

    if cli.json {
        println!("{}", render_json(&report)?);
    } else {
        print!("{}", render_text(&report.records));
    }

    Ok(())
}
