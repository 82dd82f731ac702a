//! Catalog document types.
//!
//! These mirror the shape of the stored documents. Only `imdb_id`, `tmdb_id`,
//! `title` and `type` are required; everything else tolerates absence so that
//! partially-populated metadata can still be loaded. Release dates are typed
//! as [`NaiveDate`]; the adapter refuses to store anything it could not
//! parse, which is what keeps date ordering in the store trustworthy.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod list_item;

pub use list_item::{
    first_genre, round_rating, total_pages, year_string, Category, ListItem, Page,
    UpcomingListItem,
};

/// A single movie document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Movie {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub imdb_id: String,
    pub tmdb_id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub media_type: String,
    #[serde(default)]
    pub backdrops: Vec<BackdropImage>,
    #[serde(default)]
    pub budget: Option<i64>,
    #[serde(default)]
    pub cast: Vec<CastMember>,
    #[serde(default)]
    pub collection: Vec<CollectionEntry>,
    #[serde(default)]
    pub country: Vec<String>,
    #[serde(default)]
    pub crew: Vec<CrewMember>,
    /// Composite genre strings; one entry may hold several atomic genres
    /// joined by `" & "` (e.g. `"Action & Adventure"`).
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub homepage: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub popularity: Option<f64>,
    #[serde(default)]
    pub posters: Vec<PosterImage>,
    #[serde(default)]
    pub production_companies: Vec<ProductionCompany>,
    #[serde(default)]
    pub production_countries: Vec<String>,
    #[serde(default)]
    pub release: Option<NaiveDate>,
    #[serde(default)]
    pub release_dates: Vec<ReleaseDateEntry>,
    #[serde(default)]
    pub revenue: Option<i64>,
    #[serde(default)]
    pub reviews: Vec<Review>,
    #[serde(default)]
    pub runtime: Option<i64>,
    #[serde(default)]
    pub tagline: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub vote_count: Option<i64>,
}

/// A single TV series document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Series {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub imdb_id: String,
    pub tmdb_id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub media_type: String,
    #[serde(default)]
    pub backdrops: Vec<BackdropImage>,
    #[serde(default)]
    pub cast: Vec<CastMember>,
    #[serde(default)]
    pub created_by: Vec<String>,
    #[serde(default)]
    pub crew: Vec<CrewMember>,
    #[serde(default)]
    pub episodes_count: Option<i64>,
    #[serde(default)]
    pub first_air_date: Option<NaiveDate>,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub homepage: Option<String>,
    #[serde(default)]
    pub in_production: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default)]
    pub networks: Vec<Network>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub popularity: Option<f64>,
    #[serde(default)]
    pub posters: Vec<PosterImage>,
    #[serde(default)]
    pub production_companies: Vec<ProductionCompany>,
    #[serde(default)]
    pub production_countries: Vec<String>,
    #[serde(default)]
    pub reviews: Vec<Review>,
    #[serde(default)]
    pub seasons_count: Option<i64>,
    #[serde(default)]
    pub seasons_list: Vec<Season>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub tagline: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub vote_count: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PosterImage {
    #[serde(default)]
    pub height: Option<i64>,
    #[serde(default)]
    pub width: Option<i64>,
    #[serde(default)]
    pub aspect_ratio: Option<f64>,
    #[serde(default)]
    pub vote_count: Option<i64>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub poster_path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackdropImage {
    #[serde(default)]
    pub height: Option<i64>,
    #[serde(default)]
    pub width: Option<i64>,
    #[serde(default)]
    pub aspect_ratio: Option<f64>,
    #[serde(default)]
    pub vote_count: Option<i64>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CastMember {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub character: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrewMember {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionEntry {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductionCompany {
    #[serde(default)]
    pub company_country: Option<String>,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub company_logo: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Network {
    #[serde(default)]
    pub network_country: Option<String>,
    #[serde(default)]
    pub network_name: Option<String>,
    #[serde(default)]
    pub network_logo: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReleaseDateEntry {
    #[serde(default)]
    pub iso: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Season {
    #[serde(default)]
    pub season_id: Option<i64>,
    #[serde(default)]
    pub season_name: Option<String>,
    #[serde(default)]
    pub season_number: Option<i64>,
    #[serde(default)]
    pub episode_count: Option<i64>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub air_date: Option<String>,
    #[serde(default)]
    pub episodes: Vec<Episode>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Episode {
    #[serde(default)]
    pub episode_id: Option<i64>,
    #[serde(default)]
    pub episode_name: Option<String>,
    #[serde(default)]
    pub episode_number: Option<i64>,
    #[serde(default)]
    pub season_number: Option<i64>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub vote_count: Option<i64>,
    #[serde(default)]
    pub air_date: Option<String>,
    #[serde(default)]
    pub runtime: Option<i64>,
    #[serde(default)]
    pub still_path: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
}

/// Input shape for the `seed` subcommand: a bundle of documents to load
/// through the store adapter.
#[derive(Debug, Clone, Deserialize)]
pub struct SeedBundle {
    #[serde(default)]
    pub movies: Vec<Movie>,
    #[serde(default)]
    pub series: Vec<Series>,
}
