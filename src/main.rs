use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "burnup")]
#[command(about = "Burnup - hierarchical progress tracking with weekly burn-up charts")]
#[command(version)]
struct Cli {
    /// Path to the project directory (default: .burnup in current dir)
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// Output as JSON for machine consumption
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new project with a single root item
    Init {
        /// Title of the root item
        #[arg(long, default_value = "Project Root")]
        title: String,
    },

    /// Add a sub-item under an existing item
    Add {
        /// Parent item id
        parent: u64,

        /// Title (default: "<parent title>.<n>")
        #[arg(long)]
        title: Option<String>,
    },

    /// Rename an item
    Rename {
        id: u64,
        title: String,
    },

    /// Log progress and remaining effort on an item
    Log {
        id: u64,

        /// Date of the entry, YYYY-MM-DD (default: today)
        #[arg(long)]
        date: Option<String>,

        /// Work done since the previous entry
        #[arg(long, short)]
        progress: f64,

        /// Work still remaining
        #[arg(long, short)]
        remaining: f64,

        /// Contributor (default: project.default_contributor)
        #[arg(long, short)]
        user: Option<String>,
    },

    /// Remove a logged entry
    Remove {
        id: u64,

        /// Date of the entry to remove
        #[arg(long)]
        date: String,

        /// Contributor (default: project.default_contributor)
        #[arg(long, short)]
        user: Option<String>,

        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },

    /// Show an item, its children and its records
    Show {
        /// Item id (default: root)
        id: Option<u64>,
    },

    /// Print the whole project as an outline
    Tree,

    /// Weekly Progress / Remaining / Total for an item and its sub-items
    Series {
        /// Item id (default: root)
        id: Option<u64>,

        /// Also print each contributor's series
        #[arg(long)]
        by_contributor: bool,
    },

    /// Rolled-up summary table of an item's sub-items
    Table {
        /// Item id (default: root)
        id: Option<u64>,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let project_dir = cli.dir.unwrap_or_else(|| PathBuf::from(".burnup"));

    match cli.command {
        Commands::Init { title } => commands::init::run(&project_dir, &title),
        Commands::Add { parent, title } => {
            commands::add::run(&project_dir, parent, title.as_deref(), cli.json).map(|_| ())
        }
        Commands::Rename { id, title } => commands::rename::run(&project_dir, id, &title),
        Commands::Log {
            id,
            date,
            progress,
            remaining,
            user,
        } => commands::log::run(
            &project_dir,
            id,
            date.as_deref(),
            progress,
            remaining,
            user.as_deref(),
        ),
        Commands::Remove { id, date, user, yes } => {
            commands::remove::run(&project_dir, id, &date, user.as_deref(), yes).map(|_| ())
        }
        Commands::Show { id } => commands::show::run(&project_dir, id, cli.json),
        Commands::Tree => commands::tree::run(&project_dir, cli.json),
        Commands::Series { id, by_contributor } => {
            commands::series::run(&project_dir, id, by_contributor, cli.json).map(|_| ())
        }
        Commands::Table { id } => commands::table::run(&project_dir, id, cli.json).map(|_| ()),
    }
}
