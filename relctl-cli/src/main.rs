//! relctl CLI - relational data-modeling demos over SQLite
//!
//! Three independent schemas share one database:
//! - `roster`: guests attending events with a role per attendance
//! - `projects`: projects owning tasks, tasks assigned to employees
//! - `library`: books by authors in genres, with aggregate and set queries
//!
//! Every schema is created and seeded on first use; `reset` drops and
//! recreates it.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use sqlx::SqlitePool;
use tracing::debug;

mod commands;
mod config;
mod output;
mod tracing_setup;

use config::{ConfigArgs, RelctlConfig};
use output::OutputFormat;

#[derive(Parser, Debug)]
#[command(
    name = "relctl",
    author,
    version,
    about = "Relational data-modeling demos: guest rosters, projects and a book library",
    long_about = "Run join-entity, cascade, aggregate and set-operation queries against \
                  three small seeded schemas stored in one SQLite database."
)]
struct Cli {
    /// SQLite database URL (e.g. sqlite://relctl.db or sqlite::memory:)
    #[arg(long, global = true, env = "RELCTL_DATABASE_URL")]
    database_url: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Output JSON instead of human-readable text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Guests, events and the roles guests hold at events
    Roster(commands::roster::RosterArgs),
    /// Projects, their tasks and assigned employees
    Projects(commands::projects::ProjectsArgs),
    /// Books, authors and genres
    Library(commands::library::LibraryArgs),
    /// Configuration file management
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = RelctlConfig::load()?;

    tracing_setup::init(&tracing_setup::TracingConfig {
        debug: cli.debug,
        default_level: config.log_level.clone(),
    })?;

    let database_url = config.resolve_database_url(cli.database_url.as_deref());
    let format = OutputFormat::from_flag(cli.json);

    match cli.command {
        Commands::Config(args) => config::run_config(args, &config, &database_url),
        Commands::Roster(args) => {
            let pool = connect(&database_url).await?;
            let result = commands::run_roster(args, &pool, format).await;
            pool.close().await;
            result
        }
        Commands::Projects(args) => {
            let pool = connect(&database_url).await?;
            let result = commands::run_projects(args, &pool, format).await;
            pool.close().await;
            result
        }
        Commands::Library(args) => {
            let pool = connect(&database_url).await?;
            let result = commands::run_library(args, &pool, format).await;
            pool.close().await;
            result
        }
    }
}

async fn connect(database_url: &str) -> Result<SqlitePool> {
    debug!(%database_url, "Connecting to database");
    relctl_store::create_pool(database_url)
        .await
        .with_context(|| format!("Failed to open database: {database_url}"))
}
