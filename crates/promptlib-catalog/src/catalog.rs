use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::query::{filter_templates, CategoryFilter};
use crate::types::{Category, PromptTemplate};

/// The catalog table compiled into the crate.
const BUILTIN_CATALOG: &str = include_str!("../data/templates.toml");

/// Errors that can occur while loading a catalog table
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse catalog: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Duplicate category id: {0}")]
    DuplicateCategory(String),

    #[error("Duplicate template id: {0}")]
    DuplicateTemplate(String),

    #[error("Template '{template}' references unknown category '{category}'")]
    UnknownCategory { template: String, category: String },
}

/// On-disk shape of a catalog table.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogFile {
    #[serde(default)]
    categories: Vec<Category>,
    #[serde(default)]
    templates: Vec<PromptTemplate>,
}

/// A validated, read-only set of categories and templates.
#[derive(Debug, Clone)]
pub struct Catalog {
    categories: Vec<Category>,
    templates: Vec<PromptTemplate>,
}

impl Catalog {
    /// The catalog shipped with promptlib.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_toml_str(BUILTIN_CATALOG)
    }

    /// Load a catalog table from a TOML file.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path)?;
        let catalog = Self::from_toml_str(&content)?;
        tracing::debug!(
            path = %path.display(),
            templates = catalog.templates.len(),
            "Loaded catalog"
        );
        Ok(catalog)
    }

    /// Parse and validate a catalog table.
    pub fn from_toml_str(content: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = toml::from_str(content)?;
        Self::new(file.categories, file.templates)
    }

    /// Build a catalog, checking id uniqueness and category references.
    pub fn new(
        categories: Vec<Category>,
        templates: Vec<PromptTemplate>,
    ) -> Result<Self, CatalogError> {
        let mut category_ids = HashSet::new();
        for category in &categories {
            if !category_ids.insert(category.id.as_str()) {
                return Err(CatalogError::DuplicateCategory(category.id.clone()));
            }
        }

        let mut template_ids = HashSet::new();
        for template in &templates {
            if !template_ids.insert(template.id.as_str()) {
                return Err(CatalogError::DuplicateTemplate(template.id.clone()));
            }
            if !category_ids.contains(template.category.as_str()) {
                return Err(CatalogError::UnknownCategory {
                    template: template.id.clone(),
                    category: template.category.clone(),
                });
            }
        }

        Ok(Self {
            categories,
            templates,
        })
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn templates(&self) -> &[PromptTemplate] {
        &self.templates
    }

    pub fn template(&self, id: &str) -> Option<&PromptTemplate> {
        self.templates.iter().find(|t| t.id == id)
    }

    /// Templates to display for the given category selector and search box text.
    pub fn filter(&self, category: &CategoryFilter, query: &str) -> Vec<&PromptTemplate> {
        filter_templates(&self.templates, category, query)
    }
}
