use anyhow::Result;
use colored::Colorize;

use promptlib_catalog::{Catalog, CategoryFilter, Difficulty, PromptTemplate};

use crate::ui::truncate;

pub fn handle_templates_command(
    catalog: &Catalog,
    category: &str,
    search: &str,
    json: bool,
) -> Result<()> {
    let filter: CategoryFilter = category.parse()?;
    let templates = catalog.filter(&filter, search);

    if json {
        println!("{}", serde_json::to_string_pretty(&templates)?);
    } else if templates.is_empty() {
        println!("{}", "No templates match.".dimmed());
    } else {
        print_templates_table(&templates);
    }

    Ok(())
}

pub fn handle_categories_command(catalog: &Catalog, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(catalog.categories())?);
        return Ok(());
    }

    println!(
        "{:<12} {:<24} {:<10} {}",
        "ID".dimmed(),
        "NAME".dimmed(),
        "ICON".dimmed(),
        "TEMPLATES".dimmed(),
    );
    for category in catalog.categories() {
        let count = catalog
            .templates()
            .iter()
            .filter(|t| t.category == category.id)
            .count();
        println!(
            "{:<12} {:<24} {:<10} {}",
            category.id, category.name, category.icon, count
        );
    }

    Ok(())
}

fn print_templates_table(templates: &[&PromptTemplate]) {
    println!(
        "{:<26} {:<10} {:<10} {}",
        "ID".dimmed(),
        "CATEGORY".dimmed(),
        "LEVEL".dimmed(),
        "TITLE".dimmed(),
    );

    for t in templates {
        let level = match t.difficulty {
            Some(Difficulty::Easy) => "easy".bright_green().to_string(),
            Some(Difficulty::Medium) => "medium".bright_yellow().to_string(),
            Some(Difficulty::Advanced) => "advanced".bright_red().to_string(),
            None => "-".dimmed().to_string(),
        };
        println!("{:<26} {:<10} {:<10} {}", t.id, t.category, level, t.title);
        println!("  {}", truncate(&t.description, 80).dimmed());
    }
}
