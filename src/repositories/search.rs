//! Keyword/genre search across both collections.
//!
//! Each collection is filtered, counted and paginated independently; the two
//! pages are then merged and re-sorted by release year. A merged page can
//! therefore hold up to twice the page size while the pagination totals come
//! from the combined counts. Clients depend on this exact behavior.

use std::cmp::Reverse;

use chrono::{NaiveDate, Utc};
use sqlx::SqlitePool;

use crate::errors::RepositoryResult;
use crate::models::{total_pages, ListItem, Page};
use crate::repositories::catalog::{list_projection, ListRow};
use crate::repositories::{Collection, MOVIES, SERIES};
use crate::utils::escape_like;

#[derive(Debug, Clone)]
pub struct SearchRepository {
    pool: SqlitePool,
}

impl SearchRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Search released entities by title substring and/or genre token.
    /// Callers validate that at least one of `keywords`/`genre` is present.
    pub async fn search(
        &self,
        keywords: Option<&str>,
        genre: Option<&str>,
        page: u32,
        page_size: u32,
    ) -> RepositoryResult<Page<ListItem>> {
        let today = Utc::now().date_naive();

        let movie_total = self.count_matches(MOVIES, keywords, genre, today).await?;
        let series_total = self.count_matches(SERIES, keywords, genre, today).await?;
        let total = movie_total + series_total;

        let movie_rows = self
            .match_page(MOVIES, keywords, genre, page, page_size, today)
            .await?;
        let series_rows = self
            .match_page(SERIES, keywords, genre, page, page_size, today)
            .await?;

        let mut items: Vec<ListItem> = movie_rows
            .into_iter()
            .map(|row| row.into_search_item(MOVIES.type_tag))
            .chain(
                series_rows
                    .into_iter()
                    .map(|row| row.into_search_item(SERIES.type_tag)),
            )
            .collect();

        // Most recent first; the sort key is the projected year, so ordering
        // within a year is whatever the stable merge produced. Unknown dates
        // go last.
        items.sort_by_key(|item| Reverse(release_year(item)));

        // A queried genre overrides whatever genre the projection picked.
        if let Some(genre) = genre {
            for item in &mut items {
                item.genre = Some(genre.to_string());
            }
        }

        Ok(Page {
            current_page: page,
            total_pages: total_pages(total, page_size),
            items,
        })
    }

    async fn count_matches(
        &self,
        collection: Collection,
        keywords: Option<&str>,
        genre: Option<&str>,
        today: NaiveDate,
    ) -> RepositoryResult<i64> {
        let sql = format!(
            "SELECT COUNT(*) FROM {table} WHERE {conditions}",
            table = collection.table,
            conditions = conditions(collection, keywords.is_some(), genre.is_some()),
        );

        // Bind order mirrors `conditions`.
        let mut query = sqlx::query_scalar::<_, i64>(&sql).bind(today);
        if let Some(keywords) = keywords {
            query = query.bind(title_pattern(keywords));
        }
        if let Some(genre) = genre {
            let [exact, prefix, suffix, middle] = genre_patterns(genre);
            query = query.bind(exact).bind(prefix).bind(suffix).bind(middle);
        }
        Ok(query.fetch_one(&self.pool).await?)
    }

    async fn match_page(
        &self,
        collection: Collection,
        keywords: Option<&str>,
        genre: Option<&str>,
        page: u32,
        page_size: u32,
        today: NaiveDate,
    ) -> RepositoryResult<Vec<ListRow>> {
        let sql = format!(
            "SELECT {projection} FROM {table} WHERE {conditions} \
             ORDER BY {release_column} DESC, id ASC LIMIT ? OFFSET ?",
            projection = list_projection(collection),
            table = collection.table,
            conditions = conditions(collection, keywords.is_some(), genre.is_some()),
            release_column = collection.release_column,
        );

        // Bind order mirrors `conditions`, then LIMIT/OFFSET.
        let mut query = sqlx::query_as::<_, ListRow>(&sql).bind(today);
        if let Some(keywords) = keywords {
            query = query.bind(title_pattern(keywords));
        }
        if let Some(genre) = genre {
            let [exact, prefix, suffix, middle] = genre_patterns(genre);
            query = query.bind(exact).bind(prefix).bind(suffix).bind(middle);
        }

        let offset = i64::from(page.saturating_sub(1)) * i64::from(page_size);
        let query = query.bind(i64::from(page_size)).bind(offset);
        Ok(query.fetch_all(&self.pool).await?)
    }
}

/// WHERE clause for a search over one collection. Placeholders bind in
/// order: release date, then the title pattern, then the four genre
/// patterns.
fn conditions(collection: Collection, with_keywords: bool, with_genre: bool) -> String {
    let mut conditions = vec![format!("{} <= ?", collection.release_column)];

    if with_keywords {
        conditions.push("LOWER(title) LIKE ? ESCAPE '\\'".to_string());
    }

    if with_genre {
        // Token match against the composite genre entries: the query must
        // equal a full " & "-separated atom of some entry, so "Action"
        // matches "Action & Adventure" but never "Reaction".
        conditions.push(format!(
            "EXISTS (SELECT 1 FROM json_each({table}.genres) AS entry \
             WHERE LOWER(entry.value) = ? \
                OR LOWER(entry.value) LIKE ? ESCAPE '\\' \
                OR LOWER(entry.value) LIKE ? ESCAPE '\\' \
                OR LOWER(entry.value) LIKE ? ESCAPE '\\')",
            table = collection.table,
        ));
    }

    conditions.join(" AND ")
}

/// Case-insensitive substring pattern over the title.
fn title_pattern(keywords: &str) -> String {
    format!("%{}%", escape_like(&keywords.to_lowercase()))
}

/// The four ways a genre token can sit inside a composite entry: the whole
/// entry, a leading atom, a trailing atom, or between separators.
fn genre_patterns(genre: &str) -> [String; 4] {
    let exact = genre.to_lowercase();
    let escaped = escape_like(&exact);
    [
        exact,
        format!("{} & %", escaped),
        format!("% & {}", escaped),
        format!("% & {} & %", escaped),
    ]
}

/// Year used for the merged re-sort; items without a release date sort last.
fn release_year(item: &ListItem) -> i32 {
    item.release
        .as_deref()
        .and_then(|year| year.parse().ok())
        .unwrap_or(i32::MIN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_pattern_is_lowercased_and_escaped() {
        assert_eq!(title_pattern("The Matrix"), "%the matrix%");
        assert_eq!(title_pattern("100%"), "%100\\%%");
    }

    #[test]
    fn genre_patterns_anchor_on_separators() {
        let [exact, prefix, suffix, middle] = genre_patterns("Action");
        assert_eq!(exact, "action");
        assert_eq!(prefix, "action & %");
        assert_eq!(suffix, "% & action");
        assert_eq!(middle, "% & action & %");
    }

    #[test]
    fn conditions_compose_in_bind_order() {
        let all = conditions(MOVIES, true, true);
        assert!(all.starts_with("release_date <= ?"));
        assert!(all.contains("LOWER(title) LIKE ?"));
        assert!(all.contains("json_each(movies.genres)"));

        let genre_only = conditions(SERIES, false, true);
        assert!(genre_only.starts_with("first_air_date <= ?"));
        assert!(!genre_only.contains("title"));
        assert!(genre_only.contains("json_each(series.genres)"));
    }

    #[test]
    fn items_without_a_year_sort_last() {
        let item = |release: Option<&str>| ListItem {
            imdb_id: "tt1".to_string(),
            media_type: "Movie".to_string(),
            title: "t".to_string(),
            genre: None,
            release: release.map(str::to_string),
            rating: 0.0,
            poster_path: None,
            backdrop_path: None,
        };

        let mut items = vec![item(None), item(Some("1999")), item(Some("2021"))];
        items.sort_by_key(|i| Reverse(release_year(i)));

        let years: Vec<Option<&str>> = items.iter().map(|i| i.release.as_deref()).collect();
        assert_eq!(years, vec![Some("2021"), Some("1999"), None]);
    }
}
