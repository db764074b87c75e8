mod config;
mod saved;
mod templates;
mod ui;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

use config::ProjectConfig;
use promptlib_catalog::Catalog;
use promptlib_logging::{init_tracing, LogFormat};
use promptlib_store::{FileStorage, SavedPromptStore};
use saved::{handle_saved_command, SavedAction};
use templates::{handle_categories_command, handle_templates_command};

#[derive(Parser, Debug)]
#[command(
    name = "promptlib",
    about = "Prompt templates and saved prompts for image generation",
    version,
    author
)]
struct Cli {
    /// Log output format
    #[arg(long, value_enum, default_value = "pretty", global = true)]
    log_format: LogFormatChoice,

    /// Log level (overridden by RUST_LOG)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Directory holding saved prompts (default: platform data dir)
    #[arg(long, global = true)]
    storage_dir: Option<PathBuf>,

    /// Template catalog to use instead of the built-in one
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Browse the template catalog
    Templates {
        /// Category ID, or "all"
        #[arg(short, long, default_value = "all")]
        category: String,

        /// Search title, description, tags and prompt text
        #[arg(short, long, default_value = "")]
        search: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List template categories
    Categories {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage saved prompts
    Saved {
        #[command(subcommand)]
        action: SavedAction,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogFormatChoice {
    Pretty,
    Json,
    Compact,
}

impl From<LogFormatChoice> for LogFormat {
    fn from(choice: LogFormatChoice) -> Self {
        match choice {
            LogFormatChoice::Pretty => LogFormat::Pretty,
            LogFormatChoice::Json => LogFormat::Json,
            LogFormatChoice::Compact => LogFormat::Compact,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let working_dir = std::env::current_dir().context("Failed to get current directory")?;
    let config = ProjectConfig::load(&working_dir)?.unwrap_or_default();

    init_tracing(
        config.log_level(cli.log_level.as_deref()),
        cli.log_format.into(),
    );

    let catalog = match config.catalog(cli.catalog.as_deref()) {
        Some(path) => Catalog::load(&path)
            .with_context(|| format!("Failed to load catalog {}", path.display()))?,
        None => Catalog::builtin().context("Built-in catalog is invalid")?,
    };

    match cli.command {
        Command::Templates {
            category,
            search,
            json,
        } => handle_templates_command(&catalog, &category, &search, json),
        Command::Categories { json } => handle_categories_command(&catalog, json),
        Command::Saved { action } => {
            let storage = match config.storage_dir(cli.storage_dir.as_deref()) {
                Some(dir) => FileStorage::new(dir),
                None => FileStorage::open_default(),
            };
            tracing::debug!(dir = %storage.dir().display(), "Using saved prompt storage");

            let mut store = SavedPromptStore::open(storage);
            handle_saved_command(&mut store, &catalog, action)
        }
    }
}
