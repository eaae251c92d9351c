//! Service-Scout main entry point
//!
//! This is the command-line interface for the physician group service harvester.

use anyhow::Context;
use clap::Parser;
use service_scout::assembler::RecordAssembler;
use service_scout::classifier::{Classifier, Lexicon};
use service_scout::config::{load_config_or_default, resolve_api_key, validate, Config};
use service_scout::crawler::{build_http_client, CrawlOptions, HttpFetcher, PageFetcher, SiteCrawler};
use service_scout::input::{load_rows, InputRow};
use service_scout::output::{
    analyze_directory, print_quality_report, print_statistics, RecordWriter,
};
use service_scout::search::{Enricher, SearchProvider, SerpApiClient, SiteResolver};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Service-Scout: finds physician group websites and lists the services they offer
///
/// Each row of the input table is resolved to a website through a search API,
/// the site is crawled to a bounded depth, and the services found are written
/// to one JSON file per group.
#[derive(Parser, Debug)]
#[command(name = "service-scout")]
#[command(version)]
#[command(about = "Harvest offered services from physician group websites", long_about = None)]
struct Cli {
    /// Input table (.csv, .xlsx, .xls) with `Physician Group Name` and `Address` columns
    #[arg(value_name = "INPUT", required_unless_present = "analyze")]
    input: Option<PathBuf>,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Directory for the JSON records (overrides the config file)
    #[arg(short, long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Process at most this many rows
    #[arg(long, value_name = "N")]
    max_rows: Option<usize>,

    /// Maximum link hops from each homepage (overrides the config file)
    #[arg(long, value_name = "N")]
    max_depth: Option<u32>,

    /// Also collect social media, reviews, competitors and location data
    #[arg(long)]
    enrich: bool,

    /// Render pages in headless Chromium (requires the `browser` feature)
    #[arg(long)]
    render: bool,

    /// Log file (overrides the config file)
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and input, show what would be done, and exit
    #[arg(long, conflicts_with = "analyze")]
    dry_run: bool,

    /// Grade the services in an existing output directory and exit
    #[arg(long, value_name = "DIR", conflicts_with_all = ["enrich", "render"])]
    analyze: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    let mut config = load_config_or_default(cli.config.as_deref())
        .context("Failed to load configuration")?;
    apply_overrides(&mut config, &cli);
    validate(&config).context("Invalid configuration")?;

    let log_file = cli
        .log_file
        .clone()
        .or_else(|| config.logging.file.as_ref().map(PathBuf::from));
    setup_logging(cli.verbose, cli.quiet, log_file.as_deref())?;

    if let Some(directory) = &cli.analyze {
        return handle_analyze(&config, directory);
    }

    let input = cli
        .input
        .as_deref()
        .context("An input file is required")?;
    tracing::info!("Loading input from: {}", input.display());
    let rows = load_rows(input).with_context(|| format!("Failed to load {}", input.display()))?;

    if cli.dry_run {
        handle_dry_run(&config, &cli, &rows);
        return Ok(());
    }

    if cli.render {
        #[cfg(feature = "browser")]
        {
            let fetcher = service_scout::crawler::BrowserFetcher::launch(&config.crawler).await?;
            let result = handle_scrape(&config, &cli, &rows, &fetcher).await;
            fetcher.close().await;
            result?;
        }
        #[cfg(not(feature = "browser"))]
        anyhow::bail!("--render requires building with the `browser` feature");
    } else {
        let fetcher = HttpFetcher::from_config(&config.crawler)?;
        handle_scrape(&config, &cli, &rows, &fetcher).await?;
    }

    Ok(())
}

fn apply_overrides(config: &mut Config, cli: &Cli) {
    if let Some(dir) = &cli.output_dir {
        config.output.directory = dir.to_string_lossy().into_owned();
    }
    if let Some(depth) = cli.max_depth {
        config.crawler.max_depth = depth;
    }
}

/// Sets up console logging, plus an uncoloured copy to `log_file` if given
fn setup_logging(verbose: u8, quiet: bool, log_file: Option<&Path>) -> anyhow::Result<()> {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("service_scout=info,warn"),
            1 => EnvFilter::new("service_scout=debug,info"),
            2 => EnvFilter::new("service_scout=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    let file_layer = match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            Some(
                fmt::layer()
                    .with_ansi(false)
                    .with_target(false)
                    .with_writer(Mutex::new(file)),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_thread_ids(false))
        .with(file_layer)
        .init();

    Ok(())
}

/// Handles the --dry-run mode: shows configuration and the rows that would be processed
fn handle_dry_run(config: &Config, cli: &Cli, rows: &[InputRow]) {
    println!("=== Service-Scout Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Max depth: {}", config.crawler.max_depth);
    println!("  Request timeout: {}s", config.crawler.request_timeout_secs);
    println!("  Fetcher: {}", if cli.render { "headless browser" } else { "direct HTTP" });
    let delay = if cli.enrich {
        config.crawler.enrich_row_delay_ms
    } else {
        config.crawler.row_delay_ms
    };
    println!("  Delay between rows: {}ms", delay);

    println!("\nSearch:");
    println!("  Endpoint: {}", config.search.endpoint);
    let key_state = if resolve_api_key(&config.search).is_some() {
        "found"
    } else {
        "MISSING (no websites will be resolved)"
    };
    println!("  API key ({}): {}", config.search.api_key_env, key_state);
    println!("  Enrichment: {}", if cli.enrich { "on" } else { "off" });

    println!("\nOutput:");
    println!("  Directory: {}", config.output.directory);

    let limit = cli.max_rows.unwrap_or(rows.len()).min(rows.len());
    println!("\nInput Rows ({} of {}):", limit, rows.len());
    for row in rows.iter().take(limit) {
        let marker = if row.has_group_name() { "-" } else { "x" };
        println!("  {} [{}] {} | {}", marker, row.row_number, row.group_name, row.address);
    }

    println!("\n✓ Configuration is valid");
}

/// Handles the --analyze mode: grades previously written records
fn handle_analyze(config: &Config, directory: &Path) -> anyhow::Result<()> {
    let lexicon = Lexicon::from_config(&config.keywords);
    let report = analyze_directory(directory, &lexicon)
        .with_context(|| format!("Failed to analyze {}", directory.display()))?;
    print_quality_report(&report);
    Ok(())
}

/// Handles the main scrape: resolve, crawl, optionally enrich, write
async fn handle_scrape(
    config: &Config,
    cli: &Cli,
    rows: &[InputRow],
    fetcher: &dyn PageFetcher,
) -> anyhow::Result<()> {
    let api_key = resolve_api_key(&config.search);
    if api_key.is_none() {
        tracing::warn!(
            "No search API key provided. Set {} or search.api-key in the config file.",
            config.search.api_key_env
        );
    }

    let client = build_http_client(&config.crawler)?;
    let provider: Option<Arc<dyn SearchProvider>> =
        SerpApiClient::from_config(client, &config.search, api_key)?
            .map(|c| Arc::new(c) as Arc<dyn SearchProvider>);

    let resolver = SiteResolver::new(provider.clone(), &config.search);
    let classifier = Classifier::from_config(&config.keywords);
    let writer = RecordWriter::new(&config.output.directory, config.output.pretty)?;
    let options = CrawlOptions::from_config(&config.crawler, fetcher.renders());
    let crawler = SiteCrawler::new(fetcher, &classifier, options);

    let enricher = match (&provider, cli.enrich) {
        (Some(provider), true) => Some(Enricher::new(
            provider.clone(),
            Duration::from_millis(config.search.platform_delay_ms),
        )),
        _ => None,
    };

    let row_delay = if enricher.is_some() {
        config.crawler.enrich_row_delay_ms
    } else {
        config.crawler.row_delay_ms
    };

    let mut assembler = RecordAssembler::new(
        &resolver,
        crawler,
        &writer,
        config.crawler.max_depth,
        Duration::from_millis(row_delay),
    );
    if let Some(enricher) = &enricher {
        assembler = assembler.with_enricher(enricher);
    }

    tracing::info!("Output directory: {}", writer.directory().display());
    let stats = assembler.run(rows, cli.max_rows).await;

    println!();
    print_statistics(&stats);
    Ok(())
}
