//! Query layer over the document store.
//!
//! Each repository owns one slice of the read surface: [`catalog`] builds the
//! per-category list pipelines and resolves detail lookups, [`categories`]
//! derives the genre taxonomy, [`search`] unions keyword/genre matches across
//! both collections.

pub mod catalog;
pub mod categories;
pub mod search;

pub use catalog::{CatalogRepository, Collection, DetailOutcome, ListCategory, MOVIES, SERIES};
pub use categories::CategoryRepository;
pub use search::SearchRepository;
