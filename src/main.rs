//! Quotehub CLI - serve and manage the quote database

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use quotehub::config::{self, QuotehubConfig};
use quotehub::output::{init_quiet, is_quiet};
use quotehub::storage::{QuoteRepository, SqliteStore};
use quotehub::Quote;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "quotehub")]
#[command(version)]
#[command(about = "Quote records over HTTP - CRUD and search backed by SQLite")]
#[command(long_about = r#"
Quotehub stores quotes (author, tags, text) and serves them over a JSON API.

Example usage:
  quotehub init --port 8080
  quotehub import --file quotes.json
  quotehub serve
  curl "http://localhost:8080/api/Quotes/SearchQuotes?author=lin&tags=wisdom"
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to the config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a config file
    Init {
        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,

        /// Address to listen on
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,

        /// Overwrite an existing config
        #[arg(short, long)]
        force: bool,
    },

    /// Run the HTTP API
    Serve {
        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,

        /// Address to listen on
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Insert quotes from a JSON array file (ids are ignored)
    Import {
        /// JSON file containing an array of quotes
        #[arg(short, long)]
        file: PathBuf,

        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,
    },

    /// Print every stored quote as JSON
    List {
        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,
    },

    /// Show statistics about the stored quotes
    Stats {
        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,
    },
}

fn open_store(config: &QuotehubConfig, database: Option<PathBuf>) -> anyhow::Result<SqliteStore> {
    let path = config.prepare_database(database)?;
    tracing::debug!("Opening database {:?}", path);
    Ok(SqliteStore::open(&path)?)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging; RUST_LOG wins when set
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    let config = QuotehubConfig::load(cli.config.as_deref())?;
    init_quiet(config.quiet);

    match cli.command {
        Commands::Init { database, host, port, force } => {
            let path = cli.config.unwrap_or_else(config::default_config_path);
            let new_config = QuotehubConfig {
                database: Some(
                    database
                        .unwrap_or_else(|| config::default_database_path_in(std::path::Path::new(".")))
                        .to_string_lossy()
                        .to_string(),
                ),
                host,
                port,
                quiet: None,
            };
            new_config.save(&path, force)?;
            tracing::info!("Wrote config to {}", path.display());
            if !is_quiet() {
                println!("✅ Config written to {}", path.display());
            }
        }

        Commands::Serve { database, host, port } => {
            let addr = config.listen_addr(host, port)?;
            let store = open_store(&config, database)?;
            tracing::info!("Serving {} quotes", store.count()?);
            quotehub::server::start_server(addr, Arc::new(store)).await?;
        }

        Commands::Import { file, database } => {
            let contents = std::fs::read_to_string(&file)?;
            let quotes: Vec<Quote> = serde_json::from_str(&contents)?;
            let store = open_store(&config, database)?;

            let inserted = store.insert_many(&quotes)?;
            tracing::info!("Imported {} quotes from {}", inserted.len(), file.display());
            if !is_quiet() {
                println!("📥 Imported {} quotes from {}", inserted.len(), file.display());
            }
        }

        Commands::List { database } => {
            let store = open_store(&config, database)?;
            let quotes = store.list()?;
            println!("{}", serde_json::to_string_pretty(&quotes)?);
        }

        Commands::Stats { database } => {
            let store = open_store(&config, database)?;
            let stats = store.stats()?;

            println!("📊 Quotehub Statistics");
            println!("------------------------------------");
            println!("{}", stats);
        }
    }

    Ok(())
}
