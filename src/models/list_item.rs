//! Client-facing view models and the shaping rules that produce them.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

/// Compact list projection of a movie or series.
#[derive(Debug, Clone, Serialize)]
pub struct ListItem {
    pub imdb_id: String,
    #[serde(rename = "type")]
    pub media_type: String,
    pub title: String,
    pub genre: Option<String>,
    /// 4-digit release year, when the release date is known.
    pub release: Option<String>,
    pub rating: f64,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
}

/// List projection for the upcoming endpoints: the full release date is kept
/// and the first production company is carried along.
#[derive(Debug, Clone, Serialize)]
pub struct UpcomingListItem {
    pub imdb_id: String,
    #[serde(rename = "type")]
    pub media_type: String,
    pub title: String,
    pub genre: Option<String>,
    pub release: Option<NaiveDate>,
    pub rating: f64,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub company: Option<String>,
}

/// One entry of the genre taxonomy.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Category {
    pub name: String,
    pub movies_count: i64,
    pub series_count: i64,
    pub total: i64,
    pub backdrop_path: Option<String>,
}

/// A page of results plus pagination metadata.
///
/// `current_page` is whatever the caller asked for and is never clamped; a
/// page past the end simply has no items.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub current_page: u32,
    pub total_pages: u32,
    pub items: Vec<T>,
}

/// `ceil(total / page_size)`; zero matches yield zero pages.
pub fn total_pages(total: i64, page_size: u32) -> u32 {
    (total.max(0) as u64).div_ceil(page_size as u64) as u32
}

/// Round a stored vote average to one decimal place, defaulting to 0.0 when
/// the document carries none.
pub fn round_rating(vote_average: Option<f64>) -> f64 {
    match vote_average {
        Some(avg) => (avg * 10.0).round() / 10.0,
        None => 0.0,
    }
}

/// The 4-digit year of a release date, as the clients expect it in list
/// views.
pub fn year_string(date: Option<NaiveDate>) -> Option<String> {
    date.map(|d| format!("{:04}", d.year()))
}

/// List views show a single genre: the first atomic name of the first
/// stored entry, so `"Action & Adventure"` surfaces as `"Action"`.
pub fn first_genre(entry: Option<String>) -> Option<String> {
    entry.and_then(|entry| {
        entry
            .split(" & ")
            .map(str::trim)
            .find(|atom| !atom.is_empty())
            .map(str::to_string)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_pages_is_a_ceiling() {
        assert_eq!(total_pages(0, 24), 0);
        assert_eq!(total_pages(1, 24), 1);
        assert_eq!(total_pages(24, 24), 1);
        assert_eq!(total_pages(25, 24), 2);
        assert_eq!(total_pages(48, 24), 2);
        assert_eq!(total_pages(7, 10), 1);
    }

    #[test]
    fn rating_rounds_to_one_decimal() {
        assert_eq!(round_rating(Some(7.666)), 7.7);
        assert_eq!(round_rating(Some(7.64)), 7.6);
        assert_eq!(round_rating(Some(8.0)), 8.0);
        assert_eq!(round_rating(None), 0.0);
    }

    #[test]
    fn year_is_four_digits() {
        let date = NaiveDate::from_ymd_opt(2020, 1, 1);
        assert_eq!(year_string(date), Some("2020".to_string()));
        assert_eq!(year_string(None), None);
    }

    #[test]
    fn list_genre_is_the_first_atom() {
        assert_eq!(
            first_genre(Some("Action & Adventure".to_string())),
            Some("Action".to_string())
        );
        assert_eq!(first_genre(Some("Drama".to_string())), Some("Drama".to_string()));
        assert_eq!(first_genre(None), None);
        assert_eq!(first_genre(Some("  ".to_string())), None);
    }
}
