//! # sitecrawl CLI
//!
//! Command-line interface for the same-domain website crawler.
//!
//! ## Subcommands
//!
//! - `crawl`: crawl a registered site (or an ad-hoc URL) breadth-first and
//!   save the discovered URLs
//! - `sites`: list the sites registered in a sites file
//!
//! Sites are configured in a JSON registry file (default `sites.json`);
//! passing an absolute URL instead of a site name crawls it with default
//! settings. Discovered URLs are written one per line for downstream
//! capture tooling, or as JSON records with depth and timestamp.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{info, instrument, warn};
use tracing_subscriber::EnvFilter;

use sitecrawl::crawler::{Crawler, SiteConfig, SiteRegistry};
use sitecrawl::renderer::{HttpRenderer, RendererConfig};
use sitecrawl::{url_source, urls};

/// Default output file for discovered URLs
const DEFAULT_CRAWL_OUTPUT: &str = "data/urls.txt";

/// Default crawl depth for ad-hoc URL crawls
const DEFAULT_MAX_DEPTH: u32 = 2;

/// Default politeness delay for ad-hoc URL crawls
const DEFAULT_CRAWL_DELAY_MS: u64 = 500;

#[derive(Parser)]
#[command(author, version, about = "A same-domain breadth-first website crawler", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Crawl a site and save the discovered URLs
    Crawl(CrawlArgs),

    /// List registered sites
    Sites(SitesArgs),
}

#[derive(Args, Debug)]
struct CrawlArgs {
    /// Site name from the registry, or an absolute URL for an ad-hoc crawl
    #[arg(required = true)]
    site: String,

    /// Override the configured maximum crawl depth
    #[arg(short = 'd', long)]
    max_depth: Option<u32>,

    /// Override the configured politeness delay in milliseconds
    #[arg(long)]
    delay: Option<u64>,

    /// Output file for discovered URLs
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Sites registry file
    #[arg(long, default_value = "sites.json")]
    sites_file: PathBuf,

    /// Write full crawl records as JSON instead of a plain URL list
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug)]
struct SitesArgs {
    /// Sites registry file
    #[arg(long, default_value = "sites.json")]
    sites_file: PathBuf,

    /// Show full configuration for each site
    #[arg(long)]
    details: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("sitecrawl=info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Crawl(args)) => {
            crawl_command(args).await?;
        }
        Some(Commands::Sites(args)) => {
            sites_command(args).await?;
        }
        None => {
            let _ = Cli::parse_from(["--help"]);
        }
    }

    Ok(())
}

#[instrument(skip(args))]
async fn crawl_command(args: CrawlArgs) -> anyhow::Result<()> {
    let config = resolve_site_config(&args).await?;

    println!("Crawling {} ({})...", config.name, config.base_url);
    println!("Max depth: {}", config.max_depth);

    let renderer = HttpRenderer::new(RendererConfig::default())?;

    // Ctrl-C stops the crawl between page visits; whatever was discovered
    // up to that point is still saved.
    let cancel = Arc::new(AtomicBool::new(false));
    tokio::spawn({
        let cancel = Arc::clone(&cancel);
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("interrupt received, stopping after the current page");
                cancel.store(true, Ordering::SeqCst);
            }
        }
    });

    let mut crawler = Crawler::new(&renderer, config).with_cancel_flag(cancel);
    let results = crawler.crawl().await?;

    println!("Crawled {} pages", results.len());

    let output = args
        .output
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CRAWL_OUTPUT));

    if args.json {
        if let Some(parent) = output.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        let json = serde_json::to_string_pretty(&results)?;
        tokio::fs::write(&output, json).await?;
    } else {
        url_source::save_crawl_results(&results, &output).await?;
    }

    println!("URLs saved to {}", output.display());
    Ok(())
}

#[instrument(skip(args))]
async fn sites_command(args: SitesArgs) -> anyhow::Result<()> {
    let registry = SiteRegistry::load(&args.sites_file).await?;

    println!("Registered sites: {}", registry.len());

    for site in registry.sites() {
        if args.details {
            println!("Name: {}", site.name);
            println!("Base URL: {}", site.base_url);
            println!("Max depth: {}", site.max_depth);
            println!("Allowed paths: {:?}", site.allowed_paths);
            println!("Excluded paths: {:?}", site.excluded_paths);
            println!("Crawl delay: {}ms", site.crawl_delay_ms);
            println!();
        } else {
            println!("{} - {} (depth {})", site.name, site.base_url, site.max_depth);
        }
    }

    Ok(())
}

/// Resolve the crawl configuration from the registry or from an ad-hoc URL
async fn resolve_site_config(args: &CrawlArgs) -> anyhow::Result<SiteConfig> {
    let mut config = if urls::is_valid_url(&args.site) {
        let name = urls::domain(&args.site).unwrap_or_else(|| "adhoc".to_string());
        SiteConfig::builder(name, args.site.clone())
            .max_depth(DEFAULT_MAX_DEPTH)
            .crawl_delay_ms(DEFAULT_CRAWL_DELAY_MS)
            .build()
    } else {
        let registry = SiteRegistry::load(&args.sites_file).await.map_err(|e| {
            warn!(sites_file = %args.sites_file.display(), "failed to load sites registry");
            e
        })?;
        registry.get(&args.site)?.clone()
    };

    if let Some(max_depth) = args.max_depth {
        config.max_depth = max_depth;
    }
    if let Some(delay) = args.delay {
        config.crawl_delay_ms = delay;
    }

    Ok(config)
}
