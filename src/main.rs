use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cinedex::{config::Config, database::Database, models::SeedBundle, web::WebServer};

#[derive(Parser)]
#[command(name = "cinedex")]
#[command(version = "0.1.0")]
#[command(about = "A read-only movie and TV series catalog API")]
#[command(long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Listening IP address
    #[arg(short = 'H', long, value_name = "IP")]
    host: Option<String>,

    /// Listening port
    #[arg(short, long, value_name = "PORT")]
    port: Option<u16>,

    /// Database URL (overrides config file)
    #[arg(short = 'd', long, value_name = "URL")]
    database_url: Option<String>,

    /// Log level
    #[arg(short = 'v', long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Load catalog documents from a JSON file into the store
    Seed {
        /// JSON file with `{"movies": [...], "series": [...]}`
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging with specified level
    let log_filter = if cli.log_level == "trace" {
        format!("cinedex={},tower_http=trace", cli.log_level)
    } else {
        format!("cinedex={}", cli.log_level)
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting cinedex v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration from specified file
    std::env::set_var("CONFIG_FILE", &cli.config);
    let mut config = Config::load()?;
    info!("Configuration loaded from: {}", cli.config);

    // Override config with CLI arguments
    if let Some(host) = cli.host {
        config.web.host = host;
    }
    if let Some(port) = cli.port {
        config.web.port = port;
    }
    if let Some(database_url) = cli.database_url {
        config.database.url = database_url;
    }

    info!("Using database: {}", config.database.url);

    let database = Database::new(&config.database).await?;
    database.migrate().await?;
    info!("Database connection established and migrations applied");

    match cli.command {
        Some(Command::Seed { file }) => seed(&database, &file).await,
        None => {
            let web_server = WebServer::new(&config, database)?;
            info!(
                "Starting web server on {}:{}",
                web_server.host(),
                web_server.port()
            );
            web_server.serve().await
        }
    }
}

/// Out-of-band ingestion: load a document bundle through the store adapter.
async fn seed(database: &Database, path: &Path) -> Result<()> {
    let contents = tokio::fs::read_to_string(path).await?;
    let bundle: SeedBundle = serde_json::from_str(&contents)?;

    for movie in &bundle.movies {
        database.insert_movie(movie).await?;
    }
    for series in &bundle.series {
        database.insert_series(series).await?;
    }

    info!(
        "Seeded {} movies and {} series from {}",
        bundle.movies.len(),
        bundle.series.len(),
        path.display()
    );
    Ok(())
}
