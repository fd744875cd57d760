//! partharvest CLI
//!
//! Discovers catalog categories and harvests their product listings into
//! per-category CSV tables.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use partharvest::{
    config::Config,
    error::{AppError, Result},
    events::LogReporter,
    models::CategoryDescriptor,
    pipeline,
    services::CategoryDiscoverer,
    storage::CsvDirSink,
    utils::{http, url},
};

/// partharvest - LCSC catalog harvester
#[derive(Parser, Debug)]
#[command(name = "partharvest", version, about = "LCSC catalog harvester")]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "data/config.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List categories discovered on the index page
    Discover {
        /// Inclusive lower bound on category ids
        #[arg(long)]
        id_start: Option<u32>,

        /// Inclusive upper bound on category ids
        #[arg(long)]
        id_end: Option<u32>,
    },

    /// Harvest records into per-scope tables
    Harvest {
        /// Harvest one category URL instead of running discovery
        #[arg(long)]
        category: Option<String>,

        /// Inclusive lower bound on category ids
        #[arg(long)]
        id_start: Option<u32>,

        /// Inclusive upper bound on category ids
        #[arg(long)]
        id_end: Option<u32>,

        /// Page source variant: api or text
        #[arg(long)]
        source: Option<String>,

        /// Cap on pages per category (0 = no cap)
        #[arg(long)]
        max_pages: Option<u32>,

        /// Deduplication scope: category or run
        #[arg(long)]
        scope: Option<String>,

        /// Output directory for CSV tables
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Validate the configuration file
    Validate,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Build the descriptor for an explicitly given category URL.
fn descriptor_from_url(category_url: &str) -> Result<CategoryDescriptor> {
    let id = url::parse_category_id(category_url)
        .ok_or_else(|| AppError::CategoryId(category_url.to_string()))?;
    Ok(CategoryDescriptor {
        id,
        url: category_url.to_string(),
        name: String::new(),
    })
}

/// Main entry point for the CLI application.
fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = Config::load_or_default(&cli.config);

    match cli.command {
        Command::Discover { id_start, id_end } => {
            if id_start.is_some() {
                config.discovery.id_start = id_start;
            }
            if id_end.is_some() {
                config.discovery.id_end = id_end;
            }
            config.validate()?;

            let client = http::create_client(&config.fetch)?;
            let discoverer = CategoryDiscoverer::new(
                client,
                config.endpoints.clone(),
                config.discovery.clone(),
            );
            let categories = discoverer.discover()?;
            if categories.is_empty() {
                return Err(AppError::NoCategories(config.endpoints.index_url.clone()));
            }

            for category in &categories {
                log::info!("{:>6}  {}  {}", category.id, category.name, category.url);
            }
            log::info!("{} categories in range", categories.len());
        }

        Command::Harvest {
            category,
            id_start,
            id_end,
            source,
            max_pages,
            scope,
            output,
        } => {
            if id_start.is_some() {
                config.discovery.id_start = id_start;
            }
            if id_end.is_some() {
                config.discovery.id_end = id_end;
            }
            if let Some(source) = source {
                config.harvest.source = source.parse()?;
            }
            if let Some(max_pages) = max_pages {
                config.harvest.max_pages = max_pages;
            }
            if let Some(scope) = scope {
                config.harvest.dedup_scope = scope.parse()?;
            }
            if let Some(output) = output {
                config.output.dir = output;
            }
            config.validate()?;

            let categories = match category {
                Some(category_url) => vec![descriptor_from_url(&category_url)?],
                None => {
                    let client = http::create_client(&config.fetch)?;
                    let discoverer = CategoryDiscoverer::new(
                        client,
                        config.endpoints.clone(),
                        config.discovery.clone(),
                    );
                    let categories = discoverer.discover()?;
                    if categories.is_empty() {
                        return Err(AppError::NoCategories(
                            config.endpoints.index_url.clone(),
                        ));
                    }
                    categories
                }
            };

            log::info!("Harvesting {} categories...", categories.len());

            let mut sink = CsvDirSink::new(&config.output.dir);
            let stats =
                pipeline::run_harvest(&config, &categories, &LogReporter, &mut sink)?;

            log::info!(
                "Harvested {} records into {} table(s) from {} categories in {}s",
                stats.record_count,
                stats.tables_written,
                stats.category_count,
                stats.duration_secs()
            );
            log::info!("Output directory: {}", config.output.dir.display());
        }

        Command::Validate => {
            log::info!("Validating configuration...");
            config.validate()?;
            log::info!("Config OK");
        }
    }

    Ok(())
}
