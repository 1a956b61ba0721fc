//! amz-harvest - Extract product records from Amazon search result pages
//!
//! Fetches a search page with browser TLS fingerprint emulation (or reads a
//! saved one) and writes title, price and link for the leading results.

use amz_harvest::amazon::regions::Region;
use amz_harvest::commands::{deliver, ExtractCommand, SearchCommand};
use amz_harvest::config::{Config, OutputFormat};
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "amz-harvest",
    version,
    about = "Extract product records from Amazon search result pages",
    long_about = "Extracts title, detail-page link and price from the leading cards of an Amazon search page and exports them as CSV, JSON or a table."
)]
struct Cli {
    /// Amazon storefront to search
    #[arg(short, long, global = true, env = "AMZ_REGION")]
    region: Option<Region>,

    /// Proxy URL (e.g., socks5://host:port)
    #[arg(long, global = true, env = "AMZ_PROXY")]
    proxy: Option<String>,

    /// Delay before the request in milliseconds
    #[arg(long, global = true, env = "AMZ_DELAY")]
    delay: Option<u64>,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true)]
    format: Option<OutputFormat>,

    /// Write output to this file instead of stdout
    #[arg(short, long, global = true, env = "AMZ_OUTPUT")]
    output: Option<PathBuf>,

    /// Do not prefix written files with a UTF-8 byte order mark
    #[arg(long, global = true)]
    no_bom: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search and extract the leading products
    #[command(alias = "s")]
    Search {
        /// Search keyword
        keyword: String,

        /// Number of leading result cards to extract
        #[arg(short, long)]
        max: Option<usize>,
    },

    /// Extract products from a saved search page
    #[command(alias = "x")]
    Extract {
        /// Saved HTML of a search results page
        snapshot: PathBuf,

        /// Number of leading result cards to extract
        #[arg(short, long)]
        max: Option<usize>,
    },

    /// List supported regions
    Regions,
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

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Load config with layered overrides
    let mut config = Config::load(cli.config.as_deref())?.with_env();

    // Apply CLI overrides
    if let Some(region) = cli.region {
        config.region = region;
    }
    if let Some(delay) = cli.delay {
        config.delay_ms = delay;
    }
    if let Some(format) = cli.format {
        config.format = format;
    }
    if let Some(proxy) = cli.proxy {
        config.proxy = Some(proxy);
    }
    if let Some(output) = cli.output {
        config.output = Some(output);
    }
    if cli.no_bom {
        config.bom = false;
    }

    match cli.command {
        Commands::Search { keyword, max } => {
            if let Some(max) = max {
                config.max_results = max;
            }

            let output = SearchCommand::new(config.clone()).execute(&keyword).await?;
            deliver(&config, &output)?;
        }

        Commands::Extract { snapshot, max } => {
            if let Some(max) = max {
                config.max_results = max;
            }

            let output = ExtractCommand::new(config.clone()).execute(&snapshot)?;
            deliver(&config, &output)?;
        }

        Commands::Regions => {
            println!("Supported Amazon regions:\n");
            println!("{:<6} {:<20} {:<10}", "Code", "Domain", "Separator");
            println!("{:-<6} {:-<20} {:-<10}", "", "", "");

            for region in Region::all() {
                println!(
                    "{:<6} {:<20} {:<10}",
                    region.code(),
                    region.domain(),
                    format!("{:?}", region.thousands_separator())
                );
            }
        }
    }

    Ok(())
}
