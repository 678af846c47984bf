//! # Rolodex CLI (`rolo`)
//!
//! The `rolo` binary is the operational interface for the contact book. It
//! provides commands for schema provisioning, running the HTTP API, and
//! inspecting contacts from the shell.
//!
//! ## Usage
//!
//! ```bash
//! rolo <command>
//! ```
//!
//! Database parameters come from the environment (or a `.env` file) — see
//! the [`config`](rolodex::config) module for the full variable table.
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `rolo init` | Provision the `contacts` table and indexes (idempotent) |
//! | `rolo serve` | Provision, then start the JSON HTTP API |
//! | `rolo list` | Print stored contacts (`--skip`, `--limit`) |
//! | `rolo search "<query>"` | Case-insensitive substring search |
//! | `rolo birthdays` | Contacts with a birthday in the next N days |

use anyhow::Result;
use chrono::Local;
use clap::{Parser, Subcommand};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use rolodex::birthdays;
use rolodex::config::Config;
use rolodex::db;
use rolodex::migrate;
use rolodex::models::Contact;
use rolodex::server;
use rolodex::store::postgres::PgContactStore;
use rolodex::store::ContactStore;

/// Rolodex — a contact-book service with birthday tracking.
#[derive(Parser)]
#[command(
    name = "rolo",
    about = "Rolodex — a contact-book service with birthday tracking",
    version,
    long_about = "Rolodex stores contact records (name, email, phone, birthday, notes) in \
    Postgres and exposes CRUD, substring search, and an upcoming-birthday view over a JSON \
    HTTP API and this CLI."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Initialize the database schema.
    ///
    /// Creates the `contacts` table, the unique email index, and the name
    /// index. This command is idempotent — running it multiple times is
    /// safe.
    Init,

    /// Start the JSON HTTP API server.
    ///
    /// Provisions the schema first, then binds to `ROLODEX_BIND`
    /// (default `127.0.0.1:8080`) and serves until terminated.
    Serve,

    /// Print stored contacts in id order.
    List {
        /// Number of records to skip from the start.
        #[arg(long, default_value_t = 0)]
        skip: i64,

        /// Maximum number of records to print.
        #[arg(long, default_value_t = 100)]
        limit: i64,
    },

    /// Search contacts by name or email substring (case-insensitive).
    Search {
        /// The search query string.
        query: String,
    },

    /// Show contacts with a birthday in the next days.
    Birthdays {
        /// Window length in days (inclusive of today and the last day).
        #[arg(long, default_value_t = birthdays::DEFAULT_WINDOW_DAYS)]
        window: i64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env()?;

    match cli.command {
        Commands::Init => {
            let pool = db::connect(&config).await?;
            migrate::run_migrations(&pool).await?;
            println!("Database initialized successfully.");
        }
        Commands::Serve => {
            tracing_subscriber::fmt()
                .with_env_filter(
                    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
                )
                .init();

            let pool = db::connect(&config).await?;
            migrate::run_migrations(&pool).await?;
            let store = Arc::new(PgContactStore::new(pool));
            server::run_server(&config, store).await?;
        }
        Commands::List { skip, limit } => {
            let pool = db::connect(&config).await?;
            let store = PgContactStore::new(pool);
            let contacts = store.list(skip, limit).await?;
            print_contacts(&contacts);
        }
        Commands::Search { query } => {
            let pool = db::connect(&config).await?;
            let store = PgContactStore::new(pool);
            let contacts = store.search(&query).await?;
            if contacts.is_empty() {
                println!("No results.");
            } else {
                print_contacts(&contacts);
            }
        }
        Commands::Birthdays { window } => {
            let pool = db::connect(&config).await?;
            let store = PgContactStore::new(pool);
            let contacts = store.list(0, i64::MAX).await?;
            let today = Local::now().date_naive();
            let upcoming = birthdays::upcoming_birthdays(today, &contacts, window);
            if upcoming.is_empty() {
                println!("No birthdays in the next {} days.", window);
            } else {
                print_contacts(&upcoming);
            }
        }
    }

    Ok(())
}

fn print_contacts(contacts: &[Contact]) {
    for contact in contacts {
        println!("[{}] {} {}", contact.id, contact.first_name, contact.last_name);
        println!("  email:    {}", contact.email);
        println!("  phone:    {}", contact.phone_number);
        println!("  birthday: {}", contact.birthday);
        if let Some(info) = &contact.additional_info {
            println!("  info:     {}", info);
        }
        println!();
    }
}
