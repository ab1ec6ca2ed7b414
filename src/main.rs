mod commands;
mod render;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use meetsync_core::config::MeetSyncConfig;
use meetsync_core::identity::UserIdentity;
use meetsync_core::store::EventStore;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser)]
#[command(name = "meetsync")]
#[command(about = "Create scheduling polls, collect availability and find the best time to meet")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new event with candidate times
    New {
        /// Event title (prompted for if omitted)
        title: Option<String>,

        /// Candidate time, e.g. "2025-03-20 09:00-10:00" (repeatable)
        #[arg(short, long = "option")]
        options: Vec<String>,

        /// Length of options given without an end time (e.g. "1h", "90m")
        #[arg(long)]
        duration: Option<String>,

        #[arg(short, long)]
        description: Option<String>,

        #[arg(short, long)]
        location: Option<String>,
    },
    /// List your events
    List {
        /// Include events you haven't created or answered
        #[arg(short, long)]
        all: bool,
    },
    /// Show an event's options, responses and best times
    Show { id: String },
    /// Submit your availability for an event
    Respond {
        id: String,

        /// Time option number (as shown by `show`) or id (repeatable)
        #[arg(short, long)]
        select: Vec<String>,

        /// Name to respond as (defaults to your remembered name)
        #[arg(short, long)]
        name: Option<String>,

        #[arg(short, long)]
        comment: Option<String>,
    },
    /// Delete an event
    Delete { id: String },
    /// Show your identity
    Whoami,
    /// Set the name you respond and create events as
    Name { name: String },
    /// Show paths and settings
    Config {
        /// Name to sign new events with until you set one
        #[arg(long)]
        default_name: Option<String>,
    },
}

fn main() -> Result<()> {
    init_logging()?;

    let cli = Cli::parse();
    let mut config = MeetSyncConfig::load().context("Couldn't load configuration")?;

    let store = EventStore::new(config.slot_store());
    let mut identity = UserIdentity::load_or_create(config.slot_store())
        .context("Couldn't load your identity")?;

    match cli.command {
        Commands::New {
            title,
            options,
            duration,
            description,
            location,
        } => commands::new::run(
            &store,
            &mut identity,
            &config,
            commands::new::NewEventArgs {
                title,
                options,
                duration,
                description,
                location,
            },
        ),
        Commands::List { all } => commands::list::run(&store, &identity, all),
        Commands::Show { id } => commands::show::run(&store, &id),
        Commands::Respond {
            id,
            select,
            name,
            comment,
        } => commands::respond::run(&store, &mut identity, &id, &select, name, comment),
        Commands::Delete { id } => commands::delete::run(&store, &id),
        Commands::Whoami => commands::identity::whoami(&identity),
        Commands::Name { name } => commands::identity::set_name(&mut identity, &name),
        Commands::Config { default_name } => commands::config::run(&mut config, default_name),
    }
}

/// Log to stderr, filtered by RUST_LOG (warnings only by default).
fn init_logging() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to set up logging: {}", e))
}
