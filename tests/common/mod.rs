//! Shared test harness: an in-memory store behind the real router, plus
//! document fixture builders.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use chrono::{Duration, NaiveDate, Utc};
use serde_json::Value;
use tower::ServiceExt;

use cinedex::config::DatabaseConfig;
use cinedex::database::Database;
use cinedex::models::{BackdropImage, Movie, PosterImage, ProductionCompany, Series};
use cinedex::web::{AppState, WebServer};

pub async fn test_database() -> Database {
    let config = DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        // A single connection keeps every query on the same in-memory db.
        max_connections: Some(1),
    };
    let database = Database::new(&config).await.expect("in-memory database");
    database.migrate().await.expect("migrations");
    database
}

pub async fn test_app() -> (Router, Database) {
    let database = test_database().await;
    let app = WebServer::router(AppState::new(database.clone()));
    (app, database)
}

pub fn date(s: &str) -> NaiveDate {
    s.parse().expect("valid date")
}

pub fn days_ago(days: i64) -> NaiveDate {
    Utc::now().date_naive() - Duration::days(days)
}

pub fn days_ahead(days: i64) -> NaiveDate {
    Utc::now().date_naive() + Duration::days(days)
}

pub fn movie(imdb_id: &str, title: &str, release: Option<NaiveDate>) -> Movie {
    Movie {
        id: None,
        imdb_id: imdb_id.to_string(),
        tmdb_id: format!("tmdb-{}", imdb_id),
        title: title.to_string(),
        media_type: "movie".to_string(),
        backdrops: vec![],
        budget: None,
        cast: vec![],
        collection: vec![],
        country: vec![],
        crew: vec![],
        genres: vec![],
        homepage: None,
        keywords: vec![],
        languages: vec![],
        overview: None,
        popularity: None,
        posters: vec![],
        production_companies: vec![],
        production_countries: vec![],
        release,
        release_dates: vec![],
        revenue: None,
        reviews: vec![],
        runtime: None,
        tagline: None,
        vote_average: None,
        vote_count: None,
    }
}

pub fn series(imdb_id: &str, title: &str, first_air_date: Option<NaiveDate>) -> Series {
    Series {
        id: None,
        imdb_id: imdb_id.to_string(),
        tmdb_id: format!("tmdb-{}", imdb_id),
        title: title.to_string(),
        media_type: "series".to_string(),
        backdrops: vec![],
        cast: vec![],
        created_by: vec![],
        crew: vec![],
        episodes_count: None,
        first_air_date,
        genres: vec![],
        homepage: None,
        in_production: None,
        keywords: vec![],
        languages: vec![],
        networks: vec![],
        overview: None,
        popularity: None,
        posters: vec![],
        production_companies: vec![],
        production_countries: vec![],
        reviews: vec![],
        seasons_count: None,
        seasons_list: vec![],
        status: None,
        tagline: None,
        vote_average: None,
        vote_count: None,
    }
}

pub fn poster(path: &str) -> PosterImage {
    PosterImage {
        height: Some(1500),
        width: Some(1000),
        aspect_ratio: Some(0.667),
        vote_count: Some(10),
        vote_average: Some(5.5),
        poster_path: Some(path.to_string()),
    }
}

pub fn backdrop(path: &str) -> BackdropImage {
    BackdropImage {
        height: Some(1080),
        width: Some(1920),
        aspect_ratio: Some(1.778),
        vote_count: Some(10),
        vote_average: Some(5.5),
        backdrop_path: Some(path.to_string()),
    }
}

pub fn company(name: &str) -> ProductionCompany {
    ProductionCompany {
        company_country: Some("US".to_string()),
        company_name: Some(name.to_string()),
        company_logo: None,
    }
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();

    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = if body_bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body_bytes).unwrap_or(Value::Null)
    };

    (status, json)
}
