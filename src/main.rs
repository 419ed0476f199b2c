//! Menu Scraper main entry point
//!
//! This is the command-line interface for scraping restaurant menus.

use anyhow::Context;
use clap::Parser;
use menu_scraper::config::{load_config, validate, Config, EngineKind};
use menu_scraper::extract::ExtractorRegistry;
use menu_scraper::logging::init_logging;
use menu_scraper::menu::{output_stem, COMBINED_STEM};
use menu_scraper::output::{menu_output_path, print_statistics, BatchStatistics};
use menu_scraper::scrape::{self, scrape_with_retry, Coordinator, RetryPolicy};
use menu_scraper::{RenderingSession, ScrapeError};
use std::path::PathBuf;

/// Menu Scraper: restaurant menus from JavaScript-rendered sites
///
/// Drives a headless browser through each restaurant's menu page, extracts
/// every item, and writes `<name>_menu.json` and `<name>_menu.csv` files.
/// With no restaurants given, scrapes A&W, McDonalds and Burger King.
#[derive(Parser, Debug)]
#[command(name = "menu-scraper")]
#[command(version = "1.0.0")]
#[command(about = "Scrapes restaurant menus from JavaScript-rendered sites", long_about = None)]
struct Cli {
    /// Restaurants to scrape (free-form, case-insensitive)
    #[arg(value_name = "RESTAURANT")]
    restaurants: Vec<String>,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Directory for the JSON and CSV output
    #[arg(short, long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Upstream proxy, as a URL or host:port
    #[arg(long, value_name = "ADDR")]
    proxy: Option<String>,

    /// Browser engine to drive
    #[arg(long, value_enum)]
    engine: Option<EngineKind>,

    /// Show the browser window instead of running headless
    #[arg(long)]
    headed: bool,

    /// Scrape a single restaurant, retrying the whole attempt on failure
    #[arg(long, value_name = "NAME", conflicts_with = "restaurants")]
    single: Option<String>,

    /// Validate config and show what would be scraped without opening a browser
    #[arg(long)]
    dry_run: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration, then let the command line override it
    let mut config = match &cli.config {
        Some(path) => load_config(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => Config::default(),
    };
    apply_overrides(&mut config, &cli);
    validate(&config).context("Invalid configuration")?;

    let _log_guard = init_logging(&config.logging.directory, cli.verbose, cli.quiet)
        .with_context(|| {
            format!(
                "Failed to create log directory {}",
                config.logging.directory.display()
            )
        })?;

    if let Some(path) = &cli.config {
        tracing::info!("Configuration loaded from: {}", path.display());
    }

    let registry = ExtractorRegistry::with_defaults();

    let names = match &cli.single {
        Some(name) => vec![name.clone()],
        None => config.restaurants_or_default(),
    };

    if cli.dry_run {
        handle_dry_run(&config, &registry, &names);
        return Ok(());
    }

    match &cli.single {
        Some(name) => handle_single(&config, &registry, name),
        None => handle_batch(&config, &registry, &names),
    }
}

/// Applies command-line flags on top of the loaded configuration
fn apply_overrides(config: &mut Config, cli: &Cli) {
    if !cli.restaurants.is_empty() {
        config.restaurants = cli.restaurants.clone();
    }
    if let Some(dir) = &cli.output_dir {
        config.output.directory = dir.clone();
    }
    if let Some(proxy) = &cli.proxy {
        config.session.proxy = Some(proxy.clone());
    }
    if let Some(engine) = cli.engine {
        config.session.engine = engine;
    }
    if cli.headed {
        config.session.headless = false;
    }
}

/// Handles the --dry-run mode: shows the resolved plan
fn handle_dry_run(config: &Config, registry: &ExtractorRegistry, names: &[String]) {
    println!("=== Menu Scraper Dry Run ===\n");

    println!("Session:");
    println!("  Engine: {}", config.session.engine);
    println!("  Headless: {}", config.session.headless);
    println!(
        "  Proxy: {}",
        config.session.proxy.as_deref().unwrap_or("none")
    );
    println!(
        "  Window: {}x{}",
        config.session.window_width, config.session.window_height
    );
    println!(
        "  Page load timeout: {}s",
        config.session.page_load_timeout_secs
    );

    println!("\nRestaurants ({}):", names.len());
    let mut resolved = 0;
    for name in names {
        match registry.resolve(name) {
            Some((id, extractor)) => {
                resolved += 1;
                println!("  - {} -> {} ({})", name, id, extractor.menu_url());
            }
            None => println!("  - {} -> no extractor, would fail", name),
        }
    }

    println!("\nOutput ({}):", config.output.directory.display());
    let mut stems: Vec<String> = names.iter().map(|n| output_stem(n)).collect();
    if names.len() > 1 {
        stems.push(COMBINED_STEM.to_string());
    }
    for stem in &stems {
        println!(
            "  - {}",
            menu_output_path(&config.output.directory, stem, "json").display()
        );
        println!(
            "  - {}",
            menu_output_path(&config.output.directory, stem, "csv").display()
        );
    }

    println!("\n✓ Configuration is valid");
    println!(
        "✓ Would scrape {} of {} restaurants",
        resolved,
        names.len()
    );
}

/// Handles the default batch mode
fn handle_batch(
    config: &Config,
    registry: &ExtractorRegistry,
    names: &[String],
) -> anyhow::Result<()> {
    tracing::info!("Scraping {} restaurants: {:?}", names.len(), names);

    let result = match scrape::run(config, registry, names) {
        Ok(result) => result,
        Err(e) => {
            tracing::error!("Could not start a browser session: {}", e);
            return Err(e.into());
        }
    };

    print_statistics(&BatchStatistics::from_batch(&result));
    Ok(())
}

/// Handles the --single mode: one restaurant, retried as a whole
fn handle_single(config: &Config, registry: &ExtractorRegistry, name: &str) -> anyhow::Result<()> {
    let coordinator = Coordinator::new(
        registry,
        config.loader.clone(),
        config.output.directory.clone(),
    );
    let policy = RetryPolicy::from(&config.retry);

    match scrape_with_retry(
        || RenderingSession::open(&config.session),
        &coordinator,
        name,
        &policy,
    ) {
        Ok(items) => {
            println!("✓ Scraped {} items from {}", items.len(), name);
            Ok(())
        }
        Err(ScrapeError::Setup(e)) => Err(e.into()),
        Err(e) => {
            println!("✗ Failed to scrape {}: {}", name, e);
            Ok(())
        }
    }
}
