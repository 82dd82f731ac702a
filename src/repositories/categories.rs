//! Genre taxonomy derived from the stored documents.
//!
//! Stored genre entries are composite strings ("Action & Adventure"), so the
//! taxonomy is built by splitting every entry into atomic names, counting
//! one per document per atomic name, and merging movie and series counts
//! under canonical names.

use std::collections::{HashMap, HashSet};

use chrono::Utc;
use sqlx::{FromRow, SqlitePool};

use crate::errors::RepositoryResult;
use crate::models::Category;
use crate::repositories::{Collection, MOVIES, SERIES};

/// Separator between atomic genre names inside one stored entry.
const GENRE_SEPARATOR: &str = " & ";

/// Known spelling variants folded into one canonical name.
const GENRE_ALIASES: &[(&str, &str)] = &[("Sci-Fi", "Science Fiction")];

#[derive(Debug, FromRow)]
struct GenreRow {
    genres: String,
    backdrop_path: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CategoryRepository {
    pool: SqlitePool,
}

impl CategoryRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// The full genre taxonomy over released entities, sorted by name.
    pub async fn list_categories(&self) -> RepositoryResult<Vec<Category>> {
        let movie_rows = self.genre_rows(MOVIES, true).await?;
        let series_rows = self.genre_rows(SERIES, false).await?;
        aggregate(movie_rows, series_rows)
    }

    async fn genre_rows(
        &self,
        collection: Collection,
        with_backdrop: bool,
    ) -> RepositoryResult<Vec<GenreRow>> {
        // Categories only ever show movie backdrops; the series query skips
        // the document lookup entirely.
        let backdrop = if with_backdrop {
            "json_extract(document, '$.backdrops[0].backdrop_path')"
        } else {
            "NULL"
        };

        let sql = format!(
            "SELECT genres, {backdrop} AS backdrop_path FROM {table} WHERE {release_column} <= ?",
            backdrop = backdrop,
            table = collection.table,
            release_column = collection.release_column,
        );

        let today = Utc::now().date_naive();
        let rows = sqlx::query_as::<_, GenreRow>(&sql)
            .bind(today)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }
}

fn aggregate(
    movie_rows: Vec<GenreRow>,
    series_rows: Vec<GenreRow>,
) -> RepositoryResult<Vec<Category>> {
    let mut merged: HashMap<String, Category> = HashMap::new();

    for row in &movie_rows {
        let entries: Vec<String> = serde_json::from_str(&row.genres)?;
        for name in atomic_genres(&entries) {
            let category = merged
                .entry(name.clone())
                .or_insert_with(|| empty_category(name));
            category.movies_count += 1;
            if category.backdrop_path.is_none() {
                category.backdrop_path = row.backdrop_path.clone();
            }
        }
    }

    for row in &series_rows {
        let entries: Vec<String> = serde_json::from_str(&row.genres)?;
        for name in atomic_genres(&entries) {
            let category = merged
                .entry(name.clone())
                .or_insert_with(|| empty_category(name));
            category.series_count += 1;
        }
    }

    let mut categories: Vec<Category> = merged
        .into_values()
        .map(|mut category| {
            category.total = category.movies_count + category.series_count;
            category
        })
        .collect();

    categories.sort_by(|a, b| {
        a.name
            .to_lowercase()
            .cmp(&b.name.to_lowercase())
            .then_with(|| a.name.cmp(&b.name))
    });

    Ok(categories)
}

fn empty_category(name: String) -> Category {
    Category {
        name,
        movies_count: 0,
        series_count: 0,
        total: 0,
        backdrop_path: None,
    }
}

/// Split one document's genre entries into canonical atomic names, deduped
/// so a document counts at most once per category even when the same atom
/// appears in several composite entries.
fn atomic_genres(entries: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut atoms = Vec::new();
    for entry in entries {
        for atom in entry.split(GENRE_SEPARATOR) {
            let atom = atom.trim();
            if atom.is_empty() {
                continue;
            }
            let name = canonical_genre(atom);
            if seen.insert(name.clone()) {
                atoms.push(name);
            }
        }
    }
    atoms
}

fn canonical_genre(name: &str) -> String {
    GENRE_ALIASES
        .iter()
        .find(|(alias, _)| *alias == name)
        .map(|(_, canonical)| (*canonical).to_string())
        .unwrap_or_else(|| name.to_string())
}
