//! # promptlib-catalog
//!
//! The read-only prompt template catalog.
//!
//! Templates and their categories live in a TOML table. The built-in table is
//! compiled into the crate; [`Catalog::load`] reads a replacement from disk.
//! Query logic never depends on which table is loaded.
//!
//! ## Key Types
//!
//! - [`Catalog`] - Validated set of categories and templates
//! - [`PromptTemplate`] - A single template
//! - [`CategoryFilter`] - Category selector (`all` or one category id)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use promptlib_catalog::{Catalog, CategoryFilter};
//!
//! let catalog = Catalog::builtin()?;
//! let people: CategoryFilter = "people".parse()?;
//! for template in catalog.filter(&people, "pose") {
//!     println!("{}: {}", template.id, template.title);
//! }
//! ```

mod catalog;
mod query;
mod types;

pub use catalog::{Catalog, CatalogError};
pub use query::{filter_templates, CategoryFilter};
pub use types::{Category, Difficulty, PromptTemplate};
