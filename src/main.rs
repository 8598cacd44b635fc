use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use maprun_league::config::Config;
use maprun_league::league::LeagueTable;
use maprun_league::maprun::{CacheConfig, CachedSource, MapRunClient};

const EXIT_SUCCESS: i32 = 0;
const EXIT_NETWORK: i32 = 2;
const EXIT_CONFIG: i32 = 4;
const EXIT_PUBLISH: i32 = 5;
const EXIT_OUTPUT: i32 = 6;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compute the league, print HTML and publish it (default if no subcommand)
    Publish {
        /// Where to write the HTML when publishing is disabled
        #[arg(short, long, default_value = "results.html")]
        output: PathBuf,
    },
    /// Compute the league and print it to the terminal
    Show {
        /// Output JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Write a starter config file
    Init {
        /// Path of the new config file (defaults to ./config.yaml)
        path: Option<PathBuf>,
    },
    /// Remove cached event results
    ClearCache,
}

#[derive(Parser, Debug)]
#[command(name = "maprun-league")]
#[command(about = "MapRun league standings calculator", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ./config.yaml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Always fetch fresh results, ignoring the on-disk cache
    #[arg(long, global = true)]
    no_cache: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

fn init_logging(verbose: bool) {
    let log_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("maprun_league={}", log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn load_and_validate(path: Option<PathBuf>) -> Config {
    let config = match maprun_league::config::load_config(path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    if let Err(errors) = maprun_league::config::validate_config(&config) {
        eprintln!("Config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    tracing::debug!(
        events = config.events.len(),
        max_points = config.scoring.max_points,
        max_events_to_count = config.scoring.max_events_to_count,
        "Loaded config"
    );
    config
}

async fn compute(config: &Config, no_cache: bool) -> LeagueTable {
    let client = match MapRunClient::new() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to create MapRun client: {}", e);
            std::process::exit(EXIT_NETWORK);
        }
    };

    let source = CachedSource::new(
        client,
        maprun_league::maprun::get_cache_path(),
        CacheConfig { enabled: !no_cache },
        &config.events,
        chrono::Utc::now(),
    );

    match maprun_league::fetch::process_league(&source, config).await {
        Ok(table) => table,
        Err(e) => {
            eprintln!("Error processing league: {:#}", e);
            std::process::exit(EXIT_NETWORK);
        }
    }
}

#[tokio::main]
async fn main() {
    // Install rustls crypto provider (required for rustls 0.23+)
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    let cli = Cli::parse();
    init_logging(cli.verbose);

    let command = cli.command.unwrap_or(Commands::Publish {
        output: PathBuf::from("results.html"),
    });
    let start_time = Instant::now();

    match command {
        Commands::Init { path } => {
            let path = path
                .or(cli.config)
                .unwrap_or_else(|| PathBuf::from("config.yaml"));
            if let Err(e) = maprun_league::config::write_default_config(&path) {
                eprintln!("Config error: {:#}", e);
                std::process::exit(EXIT_CONFIG);
            }
            println!("Wrote starter config to {}", path.display());
        }
        Commands::ClearCache => {
            if let Err(e) = maprun_league::maprun::clear_cache() {
                eprintln!("Failed to clear cache: {:#}", e);
                std::process::exit(EXIT_OUTPUT);
            }
            tracing::info!("Cache cleared");
        }
        Commands::Show { json } => {
            let config = load_and_validate(cli.config);
            let table = compute(&config, cli.no_cache).await;

            if json {
                match maprun_league::output::format_json(&table, &config.events) {
                    Ok(out) => println!("{}", out),
                    Err(e) => {
                        eprintln!("Failed to serialize league: {}", e);
                        std::process::exit(EXIT_OUTPUT);
                    }
                }
            } else {
                let use_colors = maprun_league::output::should_use_colors();
                println!(
                    "{}",
                    maprun_league::output::format_table(&table, config.events.len(), use_colors)
                );
            }
        }
        Commands::Publish { output } => {
            let config = load_and_validate(cli.config);
            tracing::info!("Processing league results...");
            let table = compute(&config, cli.no_cache).await;

            let html = maprun_league::output::render_html(
                &table,
                &config.events,
                &config.scoring,
                &chrono::Local::now(),
            );
            println!("{}", html);

            if config.publisher.enabled {
                tracing::info!(url = %config.publisher.url, "Publishing results");
                let password = match maprun_league::publisher::resolve_password(&config.publisher) {
                    Ok(p) => p,
                    Err(e) => {
                        eprintln!("Publisher error: {:#}", e);
                        std::process::exit(EXIT_CONFIG);
                    }
                };
                if let Err(e) =
                    maprun_league::publisher::publish(&html, &config.publisher, &password).await
                {
                    eprintln!("Error publishing results: {:#}", e);
                    std::process::exit(EXIT_PUBLISH);
                }
                tracing::info!("Successfully published results");
            } else {
                tracing::info!(path = %output.display(), "Publisher is disabled, writing results");
                if let Err(e) = maprun_league::output::write_output(&output, &html) {
                    eprintln!("Failed to write {}: {:#}", output.display(), e);
                    std::process::exit(EXIT_OUTPUT);
                }
            }
        }
    }

    tracing::debug!(elapsed = ?start_time.elapsed(), "Done");
    std::process::exit(EXIT_SUCCESS);
}
