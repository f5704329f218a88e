//! klik-crawler - KlikIndomaret catalog crawler CLI
//!
//! Drives a headless Chromium session through the storefront and decodes
//! the rendered pages into structured catalog data.

use anyhow::Result;
use clap::{Parser, Subcommand};
use klik_crawler::commands::{CategoriesCommand, CrawlCommand, ProductsCommand};
use klik_crawler::config::{Config, OutputFormat};
use klik_crawler::klik::query::{ListingQuery, Provider, SortBy};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "klik-crawler",
    version,
    about = "KlikIndomaret catalog crawler CLI",
    long_about = "Extracts category and product listing data from KlikIndomaret by driving a headless Chromium session and decoding the rendered pages."
)]
struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, default_value = "table", global = true)]
    format: OutputFormat,

    /// Directory to write JSON result files into instead of printing
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    /// Bounded wait for page readiness markers, in seconds
    #[arg(long, default_value = "10", global = true, env = "KLIK_TIMEOUT")]
    timeout: u64,

    /// Delay between page interactions in milliseconds
    #[arg(long, default_value = "2000", global = true, env = "KLIK_DELAY")]
    delay: u64,

    /// Run the browser with a visible window
    #[arg(long, global = true)]
    no_headless: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args)]
struct ListingArgs {
    /// Number of products per page
    #[arg(long)]
    page_size: Option<u32>,

    /// Sort order: promo, popular, newest, alpha-asc, alpha-desc, price-asc, price-desc
    #[arg(short, long)]
    sort: Option<SortBy>,

    /// Filter by product brand ID
    #[arg(long)]
    brand: Option<String>,

    /// Minimum price in Rupiah (requires --max-price)
    #[arg(long)]
    min_price: Option<u64>,

    /// Maximum price in Rupiah (requires --min-price)
    #[arg(long)]
    max_price: Option<u64>,

    /// Raw attribute filter passed through to the site
    #[arg(long)]
    attributes: Option<String>,

    /// Product provider: store or warehouse
    #[arg(long)]
    provider: Option<Provider>,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode the storefront category tree
    #[command(alias = "cat")]
    Categories,

    /// Fetch a single listing page from a category
    #[command(alias = "p")]
    Products {
        /// Whole or part of the category page URL
        category: String,

        /// Page number
        #[arg(long, default_value = "1")]
        page: u32,

        #[command(flatten)]
        listing: ListingArgs,
    },

    /// Crawl every page of one or more categories
    #[command(alias = "c")]
    Crawl {
        /// Category page URLs (whole or partial)
        #[arg(required = true)]
        categories: Vec<String>,

        #[command(flatten)]
        listing: ListingArgs,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new(Level::DEBUG.to_string())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };

    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    // Load config with layered overrides
    let mut config = Config::load(cli.config.as_deref())?.with_env();

    // Apply CLI overrides
    config.format = cli.format;
    config.wait_timeout_secs = cli.timeout;
    config.delay_ms = cli.delay;

    if cli.no_headless {
        config.headless = false;
    }

    let output = cli.output.as_deref();

    match cli.command {
        Commands::Categories => {
            let cmd = CategoriesCommand::new(config);
            let result = cmd.execute().await?;
            println!("{}", result);
        }

        Commands::Products { category, page, listing } => {
            let mut query = build_query(&config, category, &listing)?;
            query.page = page;

            let cmd = ProductsCommand::new(config);
            let result = cmd.execute(&query, output).await?;
            println!("{}", result);
        }

        Commands::Crawl { categories, listing } => {
            let template = build_query(&config, String::new(), &listing)?;

            let cmd = CrawlCommand::new(config);
            let result = cmd.execute(&categories, &template, output).await?;
            println!("{}", result);
        }
    }

    Ok(())
}

/// Builds a listing query from config defaults and CLI filter flags.
fn build_query(config: &Config, category: String, args: &ListingArgs) -> Result<ListingQuery> {
    let price_range = match (args.min_price, args.max_price) {
        (Some(min), Some(max)) => Some((min, max)),
        (None, None) => None,
        _ => anyhow::bail!("--min-price and --max-price must be given together"),
    };

    let mut query = ListingQuery::new(category);
    query.page_size = args.page_size.unwrap_or(config.page_size);
    query.sort_by = args.sort.unwrap_or(config.sort_by);
    query.brand_id = args.brand.clone();
    query.price_range = price_range;
    query.attributes = args.attributes.clone();
    query.provider = args.provider;

    Ok(query)
}
