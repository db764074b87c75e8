//! Category + free-text filtering over a template list.

use crate::types::PromptTemplate;

/// The category selector used by the template browser.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    /// No category restriction
    #[default]
    All,
    /// Only templates whose category id matches exactly
    Only(String),
}

impl CategoryFilter {
    fn admits(&self, template: &PromptTemplate) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(id) => template.category == *id,
        }
    }
}

impl std::str::FromStr for CategoryFilter {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "all" {
            Ok(CategoryFilter::All)
        } else {
            Ok(CategoryFilter::Only(s.to_string()))
        }
    }
}

impl std::fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CategoryFilter::All => write!(f, "all"),
            CategoryFilter::Only(id) => write!(f, "{}", id),
        }
    }
}

/// Filter `templates` by category, then by a case-insensitive substring query.
///
/// A query that is blank after trimming matches everything; otherwise the
/// query as typed (surrounding whitespace included) must occur in a field.
/// Results keep the order of `templates`; an unknown category id simply
/// yields nothing.
pub fn filter_templates<'a>(
    templates: &'a [PromptTemplate],
    category: &CategoryFilter,
    query: &str,
) -> Vec<&'a PromptTemplate> {
    let needle = if query.trim().is_empty() {
        None
    } else {
        Some(query.to_lowercase())
    };

    templates
        .iter()
        .filter(|t| category.admits(t))
        .filter(|t| match needle {
            Some(ref needle) => t.contains_lowercase(needle),
            None => true,
        })
        .collect()
}
