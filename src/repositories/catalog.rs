//! Catalog list queries and detail lookups.
//!
//! Every list endpoint is the same pipeline with different knobs: filter on
//! the collection's release column against today, order by the category's
//! sort key, paginate, and project the handful of fields the list views
//! need. The projection runs in the store (`json_extract` over the document)
//! so pages never deserialize full documents; shaping into view models
//! (capitalization, year truncation, rating rounding) happens here.

use chrono::{NaiveDate, Utc};
use sqlx::{FromRow, SqlitePool};

use crate::errors::RepositoryResult;
use crate::models::{
    first_genre, round_rating, total_pages, year_string, ListItem, Page, UpcomingListItem,
};
use crate::utils::capitalize_first;

/// Descriptor for one of the two stored collections.
///
/// The two tables are shaped identically apart from the name of the release
/// column, so all queries are written once and parameterized over this.
#[derive(Debug, Clone, Copy)]
pub struct Collection {
    pub table: &'static str,
    pub release_column: &'static str,
    /// Literal tag used for search results ("Movie" / "TV").
    pub type_tag: &'static str,
    /// Name used in client-facing messages ("Movie" / "Series").
    pub resource: &'static str,
}

pub const MOVIES: Collection = Collection {
    table: "movies",
    release_column: "release_date",
    type_tag: "Movie",
    resource: "Movie",
};

pub const SERIES: Collection = Collection {
    table: "series",
    release_column: "first_air_date",
    type_tag: "TV",
    resource: "Series",
};

/// The list categories the catalog understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListCategory {
    Popular,
    Latest,
    Top,
    Upcoming,
}

impl ListCategory {
    pub fn parse(segment: &str) -> Option<Self> {
        match segment {
            "popular" => Some(Self::Popular),
            "latest" => Some(Self::Latest),
            "top" => Some(Self::Top),
            "upcoming" => Some(Self::Upcoming),
            _ => None,
        }
    }

    /// Upcoming selects not-yet-released entries; everything else is gated
    /// to already-released.
    fn release_predicate(self) -> &'static str {
        match self {
            Self::Upcoming => ">",
            _ => "<=",
        }
    }

    /// Sort key per category, always with the internal id as a secondary key
    /// so pagination is reproducible across equal primary values.
    fn order_clause(self, release_column: &str) -> String {
        match self {
            Self::Popular => "popularity DESC, id ASC".to_string(),
            Self::Latest => format!("{} DESC, id ASC", release_column),
            Self::Top => "vote_average DESC, id ASC".to_string(),
            Self::Upcoming => format!("{} ASC, id ASC", release_column),
        }
    }
}

/// Outcome of a detail lookup.
#[derive(Debug)]
pub enum DetailOutcome {
    /// Released entity: the full stored document, unprojected.
    Found(serde_json::Value),
    /// The entity exists but its release date is in the future (or absent);
    /// the document is withheld.
    NotReleased,
    NotFound,
}

/// Row shape shared by every list projection.
#[derive(Debug, FromRow)]
pub(crate) struct ListRow {
    pub imdb_id: String,
    pub media_type: String,
    pub title: String,
    pub genre: Option<String>,
    pub release_date: Option<NaiveDate>,
    pub vote_average: Option<f64>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub company: Option<String>,
}

impl ListRow {
    pub(crate) fn into_list_item(self) -> ListItem {
        ListItem {
            imdb_id: self.imdb_id,
            media_type: capitalize_first(&self.media_type),
            title: self.title,
            genre: first_genre(self.genre),
            release: year_string(self.release_date),
            rating: round_rating(self.vote_average),
            poster_path: self.poster_path,
            backdrop_path: self.backdrop_path,
        }
    }

    fn into_upcoming_item(self) -> UpcomingListItem {
        UpcomingListItem {
            imdb_id: self.imdb_id,
            media_type: capitalize_first(&self.media_type),
            title: self.title,
            genre: first_genre(self.genre),
            release: self.release_date,
            rating: round_rating(self.vote_average),
            poster_path: self.poster_path,
            backdrop_path: self.backdrop_path,
            company: self.company,
        }
    }

    /// Search results carry a fixed collection tag instead of the stored
    /// type field.
    pub(crate) fn into_search_item(self, type_tag: &str) -> ListItem {
        ListItem {
            imdb_id: self.imdb_id,
            media_type: type_tag.to_string(),
            title: self.title,
            genre: first_genre(self.genre),
            release: year_string(self.release_date),
            rating: round_rating(self.vote_average),
            poster_path: self.poster_path,
            backdrop_path: self.backdrop_path,
        }
    }
}

/// Projection pushed into the store for all list queries. The release column
/// is aliased so both collections decode into the same row type.
pub(crate) fn list_projection(collection: Collection) -> String {
    format!(
        r#"imdb_id, media_type, title,
           json_extract(genres, '$[0]') AS genre,
           {release_column} AS release_date,
           vote_average,
           json_extract(document, '$.posters[0].poster_path') AS poster_path,
           json_extract(document, '$.backdrops[0].backdrop_path') AS backdrop_path,
           json_extract(document, '$.production_companies[0].company_name') AS company"#,
        release_column = collection.release_column
    )
}

#[derive(Debug, Clone)]
pub struct CatalogRepository {
    pool: SqlitePool,
}

impl CatalogRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Top-of-list slice for the home overview endpoints: no count, no
    /// pagination metadata, just the first `limit` items.
    pub async fn overview(
        &self,
        collection: Collection,
        category: ListCategory,
        limit: u32,
    ) -> RepositoryResult<Vec<ListItem>> {
        let today = Utc::now().date_naive();
        let rows = self.page_rows(collection, category, 1, limit, today).await?;
        Ok(rows.into_iter().map(ListRow::into_list_item).collect())
    }

    /// One page of a category list, with the total computed by an
    /// independent count over the same filter.
    pub async fn list(
        &self,
        collection: Collection,
        category: ListCategory,
        page: u32,
        page_size: u32,
    ) -> RepositoryResult<Page<ListItem>> {
        let today = Utc::now().date_naive();
        let total = self.count(collection, category, today).await?;
        let rows = self
            .page_rows(collection, category, page, page_size, today)
            .await?;

        Ok(Page {
            current_page: page,
            total_pages: total_pages(total, page_size),
            items: rows.into_iter().map(ListRow::into_list_item).collect(),
        })
    }

    /// One page of the upcoming list. Same pipeline as [`list`] with the
    /// upcoming filter/sort, but items keep the raw release date and the
    /// first production company.
    ///
    /// [`list`]: Self::list
    pub async fn list_upcoming(
        &self,
        collection: Collection,
        page: u32,
        page_size: u32,
    ) -> RepositoryResult<Page<UpcomingListItem>> {
        let category = ListCategory::Upcoming;
        let today = Utc::now().date_naive();
        let total = self.count(collection, category, today).await?;
        let rows = self
            .page_rows(collection, category, page, page_size, today)
            .await?;

        Ok(Page {
            current_page: page,
            total_pages: total_pages(total, page_size),
            items: rows.into_iter().map(ListRow::into_upcoming_item).collect(),
        })
    }

    /// Look up a single document by external id and apply the release gate:
    /// the full document is only handed out once the entity is released.
    pub async fn details(
        &self,
        collection: Collection,
        imdb_id: &str,
    ) -> RepositoryResult<DetailOutcome> {
        #[derive(FromRow)]
        struct DetailRow {
            release_date: Option<NaiveDate>,
            document: String,
        }

        let sql = format!(
            "SELECT {release_column} AS release_date, document FROM {table} WHERE imdb_id = ?",
            release_column = collection.release_column,
            table = collection.table,
        );

        let row = sqlx::query_as::<_, DetailRow>(&sql)
            .bind(imdb_id)
            .fetch_optional(&self.pool)
            .await?;

        let Some(row) = row else {
            return Ok(DetailOutcome::NotFound);
        };

        let today = Utc::now().date_naive();
        match row.release_date {
            Some(date) if date <= today => {
                let document = serde_json::from_str(&row.document)?;
                Ok(DetailOutcome::Found(document))
            }
            _ => Ok(DetailOutcome::NotReleased),
        }
    }

    async fn count(
        &self,
        collection: Collection,
        category: ListCategory,
        today: NaiveDate,
    ) -> RepositoryResult<i64> {
        let sql = format!(
            "SELECT COUNT(*) FROM {table} WHERE {release_column} {predicate} ?",
            table = collection.table,
            release_column = collection.release_column,
            predicate = category.release_predicate(),
        );

        let total = sqlx::query_scalar::<_, i64>(&sql)
            .bind(today)
            .fetch_one(&self.pool)
            .await?;
        Ok(total)
    }

    async fn page_rows(
        &self,
        collection: Collection,
        category: ListCategory,
        page: u32,
        page_size: u32,
        today: NaiveDate,
    ) -> RepositoryResult<Vec<ListRow>> {
        let sql = format!(
            "SELECT {projection} FROM {table} \
             WHERE {release_column} {predicate} ? \
             ORDER BY {order} LIMIT ? OFFSET ?",
            projection = list_projection(collection),
            table = collection.table,
            release_column = collection.release_column,
            predicate = category.release_predicate(),
            order = category.order_clause(collection.release_column),
        );

        let offset = i64::from(page.saturating_sub(1)) * i64::from(page_size);
        let rows = sqlx::query_as::<_, ListRow>(&sql)
            .bind(today)
            .bind(i64::from(page_size))
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_categories() {
        assert_eq!(ListCategory::parse("popular"), Some(ListCategory::Popular));
        assert_eq!(ListCategory::parse("latest"), Some(ListCategory::Latest));
        assert_eq!(ListCategory::parse("top"), Some(ListCategory::Top));
        assert_eq!(
            ListCategory::parse("upcoming"),
            Some(ListCategory::Upcoming)
        );
        assert_eq!(ListCategory::parse("Popular"), None);
        assert_eq!(ListCategory::parse("details"), None);
    }

    #[test]
    fn sort_keys_carry_the_id_tie_break() {
        for category in [
            ListCategory::Popular,
            ListCategory::Latest,
            ListCategory::Top,
            ListCategory::Upcoming,
        ] {
            let order = category.order_clause("release_date");
            assert!(order.ends_with("id ASC"), "no tie-break in {:?}", order);
        }
    }

    #[test]
    fn upcoming_inverts_the_release_gate() {
        assert_eq!(ListCategory::Popular.release_predicate(), "<=");
        assert_eq!(ListCategory::Latest.release_predicate(), "<=");
        assert_eq!(ListCategory::Top.release_predicate(), "<=");
        assert_eq!(ListCategory::Upcoming.release_predicate(), ">");
    }
}
