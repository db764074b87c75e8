use std::fs;

use promptlib_catalog::{Catalog, CatalogError, CategoryFilter, Difficulty};
use tempfile::TempDir;

fn ids(catalog: &Catalog, category: &str, query: &str) -> Vec<String> {
    let filter: CategoryFilter = category.parse().unwrap();
    catalog
        .filter(&filter, query)
        .into_iter()
        .map(|t| t.id.clone())
        .collect()
}

// ============================================================
// Built-in catalog
// ============================================================

#[test]
fn test_every_builtin_template_has_known_category() {
    let catalog = Catalog::builtin().unwrap();
    for template in catalog.templates() {
        assert!(
            catalog.category(&template.category).is_some(),
            "template {} has unknown category {}",
            template.id,
            template.category
        );
    }
}

#[test]
fn test_people_pose_finds_pose_transfer() {
    let catalog = Catalog::builtin().unwrap();
    assert_eq!(ids(&catalog, "people", "pose"), vec!["pose-transfer"]);
    assert_eq!(ids(&catalog, "people", " POSE"), vec!["pose-transfer"]);
    assert!(ids(&catalog, "people", "pose  ").is_empty());
}

#[test]
fn test_all_with_empty_query_is_full_catalog() {
    let catalog = Catalog::builtin().unwrap();
    let all = ids(&catalog, "all", "");
    let expected: Vec<String> = catalog.templates().iter().map(|t| t.id.clone()).collect();
    assert_eq!(all, expected);
}

#[test]
fn test_all_still_applies_search() {
    let catalog = Catalog::builtin().unwrap();
    let result = ids(&catalog, "all", "watercolor");
    assert_eq!(result, vec!["watercolor-painting"]);
}

#[test]
fn test_category_results_preserve_catalog_order() {
    let catalog = Catalog::builtin().unwrap();
    let people = ids(&catalog, "people", "");
    let expected: Vec<String> = catalog
        .templates()
        .iter()
        .filter(|t| t.category == "people")
        .map(|t| t.id.clone())
        .collect();
    assert_eq!(people, expected);
    assert!(people.len() > 1);
}

#[test]
fn test_unknown_category_yields_nothing() {
    let catalog = Catalog::builtin().unwrap();
    assert!(ids(&catalog, "animals", "").is_empty());
}

// ============================================================
// Loading replacement tables
// ============================================================

#[test]
fn test_load_custom_catalog_from_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("catalog.toml");
    fs::write(
        &path,
        r#"
[[categories]]
id = "logo"
name = "Logos"
icon = "star"

[[templates]]
id = "flat-logo"
title = "Flat Logo"
category = "logo"
prompt = "Minimal flat vector logo of a fox"
description = "Simple brand mark."
tags = ["vector", "brand"]
difficulty = "easy"
"#,
    )
    .unwrap();

    let catalog = Catalog::load(&path).unwrap();
    assert_eq!(catalog.categories().len(), 1);
    let template = catalog.template("flat-logo").unwrap();
    assert_eq!(template.difficulty, Some(Difficulty::Easy));
    assert_eq!(template.example_image, None);
    assert_eq!(ids(&catalog, "logo", "BRAND"), vec!["flat-logo"]);
}

#[test]
fn test_load_missing_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let result = Catalog::load(&dir.path().join("nope.toml"));
    assert!(matches!(result, Err(CatalogError::Io(_))));
}

#[test]
fn test_unknown_fields_are_rejected() {
    let result = Catalog::from_toml_str("version = 2\n");
    assert!(matches!(result, Err(CatalogError::Parse(_))));
}
