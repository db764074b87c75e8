use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::Colorize;

use promptlib_catalog::Catalog;
use promptlib_store::{
    KeyValueStorage, NewSavedPrompt, Persisted, SavedPrompt, SavedPromptStore, SavedPromptUpdate,
};

use crate::ui::{format_timestamp, truncate};

#[derive(Subcommand, Debug)]
pub enum SavedAction {
    /// List saved prompts, most recent first
    List {
        /// Only prompts in this category (exact match)
        #[arg(long)]
        category: Option<String>,

        /// Search name, prompt text and category
        #[arg(long)]
        search: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Save a new prompt
    Add {
        #[arg(long)]
        name: String,

        #[arg(long)]
        prompt: String,

        #[arg(long)]
        negative_prompt: Option<String>,

        /// Aspect ratio, e.g. 16:9
        #[arg(long)]
        aspect_ratio: Option<String>,

        #[arg(long)]
        category: Option<String>,
    },

    /// Save a catalog template as a new prompt
    FromTemplate {
        /// Template ID (see `promptlib templates`)
        template_id: String,
    },

    /// Change fields of a saved prompt
    Update {
        id: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        prompt: Option<String>,

        #[arg(long)]
        negative_prompt: Option<String>,

        #[arg(long)]
        aspect_ratio: Option<String>,

        #[arg(long)]
        category: Option<String>,
    },

    /// Delete a saved prompt
    Delete { id: String },

    /// Delete every saved prompt
    Clear,

    /// Write all saved prompts as JSON
    Export {
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Add prompts from a JSON export
    Import { file: PathBuf },
}

pub fn handle_saved_command<S: KeyValueStorage>(
    store: &mut SavedPromptStore<S>,
    catalog: &Catalog,
    action: SavedAction,
) -> Result<()> {
    if let Some(e) = store.load_error() {
        eprintln!(
            "{} {}",
            "Could not load saved prompts, starting empty:".bright_yellow(),
            e
        );
    }

    match action {
        SavedAction::List {
            category,
            search,
            json,
        } => {
            let mut prompts = match category {
                Some(ref category) => store.get_by_category(category),
                None => store.get_all(),
            };
            if let Some(ref query) = search {
                let matches = store.search(query);
                prompts.retain(|p| matches.contains(p));
            }

            if json {
                println!("{}", serde_json::to_string_pretty(&prompts)?);
            } else if prompts.is_empty() {
                println!("{}", "No saved prompts.".dimmed());
            } else {
                print_saved_table(&prompts);
            }
        }
        SavedAction::Add {
            name,
            prompt,
            negative_prompt,
            aspect_ratio,
            category,
        } => {
            let new = NewSavedPrompt {
                name,
                prompt,
                negative_prompt,
                aspect_ratio,
                category,
            };
            let saved = store.add(new);
            report_write(&saved);
            println!("{} {}", "Saved".bright_green(), saved.value.id);
        }
        SavedAction::FromTemplate { template_id } => {
            let template = catalog
                .template(&template_id)
                .with_context(|| format!("Unknown template: {}", template_id))?;
            let saved = store.add(NewSavedPrompt::from(template));
            report_write(&saved);
            println!(
                "{} {} ({})",
                "Saved".bright_green(),
                saved.value.id,
                template.title
            );
        }
        SavedAction::Update {
            id,
            name,
            prompt,
            negative_prompt,
            aspect_ratio,
            category,
        } => {
            let changes = SavedPromptUpdate {
                name,
                prompt,
                negative_prompt,
                aspect_ratio,
                category,
            };
            if changes.is_empty() {
                println!("{}", "Nothing to update.".dimmed());
                return Ok(());
            }

            match store.update(&id, changes) {
                Ok(updated) => {
                    report_write(&updated);
                    println!("{} {}", "Updated".bright_green(), updated.value.id);
                }
                Err(e) => println!("{}", e.to_string().bright_yellow()),
            }
        }
        SavedAction::Delete { id } => {
            let deleted = store.delete(&id);
            report_write(&deleted);
            if deleted.value {
                println!("{} {}", "Deleted".bright_green(), id);
            } else {
                println!("{}", format!("No saved prompt with id {}", id).bright_yellow());
            }
        }
        SavedAction::Clear => {
            let count = store.len();
            let cleared = store.clear();
            report_write(&cleared);
            println!("{} {} saved prompt(s)", "Cleared".bright_green(), count);
        }
        SavedAction::Export { output } => {
            let exported = store.export()?;
            match output {
                Some(path) => {
                    std::fs::write(&path, exported)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    eprintln!(
                        "{} {} prompt(s) to {}",
                        "Exported".bright_green(),
                        store.len(),
                        path.display()
                    );
                }
                None => println!("{}", exported),
            }
        }
        SavedAction::Import { file } => {
            let payload = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;

            match store.import(&payload) {
                Ok(imported) => {
                    report_write(&imported);
                    println!(
                        "{} {} prompt(s)",
                        "Imported".bright_green(),
                        imported.value
                    );
                }
                Err(e) => println!(
                    "{} {}",
                    "Import rejected:".bright_yellow(),
                    e.to_string().dimmed()
                ),
            }
        }
    }

    Ok(())
}

/// Warn when a change stayed in memory only.
fn report_write<T>(result: &Persisted<T>) {
    if let Err(ref e) = result.write {
        eprintln!("{} {}", "Warning: change was not saved:".bright_yellow(), e);
    }
}

fn print_saved_table(prompts: &[SavedPrompt]) {
    println!(
        "{:<38} {:<18} {:<12} {:<8} {}",
        "ID".dimmed(),
        "SAVED".dimmed(),
        "CATEGORY".dimmed(),
        "RATIO".dimmed(),
        "NAME".dimmed(),
    );

    for p in prompts {
        println!(
            "{:<38} {:<18} {:<12} {:<8} {}",
            p.id,
            format_timestamp(p.timestamp),
            p.category.as_deref().unwrap_or("-"),
            p.aspect_ratio.as_deref().unwrap_or("-"),
            p.name.bold()
        );
        println!("  {}", truncate(&p.prompt, 80).dimmed());
        if let Some(ref negative) = p.negative_prompt {
            println!("  {} {}", "not:".dimmed(), truncate(negative, 74).dimmed());
        }
    }
}
