//! End-to-end tests for the genre taxonomy endpoint.

mod common;

use axum::http::StatusCode;
use common::{backdrop, date, days_ahead, get, movie, series, test_app};

#[tokio::test]
async fn categories_split_count_alias_and_sort() {
    let (app, db) = test_app().await;

    let mut action_adventure = movie("tt0000001", "A", Some(date("2010-01-01")));
    action_adventure.genres = vec!["Action & Adventure".to_string()];
    action_adventure.backdrops = vec![backdrop("/a.jpg")];
    db.insert_movie(&action_adventure).await.unwrap();

    let mut scifi = movie("tt0000002", "B", Some(date("2011-01-01")));
    scifi.genres = vec!["Sci-Fi".to_string()];
    scifi.backdrops = vec![backdrop("/b.jpg")];
    db.insert_movie(&scifi).await.unwrap();

    // Unreleased documents contribute nothing.
    let mut unreleased = movie("tt0000003", "C", Some(days_ahead(100)));
    unreleased.genres = vec!["Horror".to_string()];
    db.insert_movie(&unreleased).await.unwrap();

    let mut science_fiction = series("tt0000004", "D", Some(date("2012-01-01")));
    science_fiction.genres = vec!["Science Fiction".to_string()];
    db.insert_series(&science_fiction).await.unwrap();

    let mut action = series("tt0000005", "E", Some(date("2013-01-01")));
    action.genres = vec!["Action".to_string()];
    db.insert_series(&action).await.unwrap();

    let (status, body) = get(&app, "/search/categories").await;
    assert_eq!(status, StatusCode::OK);

    // Bare array, sorted by name.
    let categories = body.as_array().unwrap();
    let names: Vec<&str> = categories
        .iter()
        .map(|c| c["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Action", "Adventure", "Science Fiction"]);

    let action = &categories[0];
    assert_eq!(action["movies_count"], 1);
    assert_eq!(action["series_count"], 1);
    assert_eq!(action["total"], 2);
    assert_eq!(action["backdrop_path"], "/a.jpg");

    // The composite "Action & Adventure" entry also feeds Adventure.
    let adventure = &categories[1];
    assert_eq!(adventure["movies_count"], 1);
    assert_eq!(adventure["series_count"], 0);
    assert_eq!(adventure["total"], 1);
    assert_eq!(adventure["backdrop_path"], "/a.jpg");

    // "Sci-Fi" folds into "Science Fiction" before the merge.
    let science_fiction = &categories[2];
    assert_eq!(science_fiction["movies_count"], 1);
    assert_eq!(science_fiction["series_count"], 1);
    assert_eq!(science_fiction["total"], 2);
    assert_eq!(science_fiction["backdrop_path"], "/b.jpg");
}

#[tokio::test]
async fn one_document_counts_once_per_category() {
    let (app, db) = test_app().await;

    let mut m = movie("tt0000001", "Repetitive", Some(date("2015-01-01")));
    m.genres = vec![
        "Action & Adventure".to_string(),
        "Action".to_string(),
        "Adventure & Action".to_string(),
    ];
    db.insert_movie(&m).await.unwrap();

    let (_, body) = get(&app, "/search/categories").await;
    let categories = body.as_array().unwrap();
    assert_eq!(categories.len(), 2);
    for category in categories {
        assert_eq!(category["movies_count"], 1, "{}", category["name"]);
        assert_eq!(category["total"], 1);
    }
}

#[tokio::test]
async fn series_only_categories_carry_no_backdrop() {
    let (app, db) = test_app().await;

    let mut docu = series("tt0000001", "Factual", Some(date("2018-01-01")));
    docu.genres = vec!["Documentary".to_string()];
    docu.backdrops = vec![backdrop("/ignored.jpg")];
    db.insert_series(&docu).await.unwrap();

    let (_, body) = get(&app, "/search/categories").await;
    let categories = body.as_array().unwrap();
    assert_eq!(categories.len(), 1);
    assert_eq!(categories[0]["name"], "Documentary");
    assert_eq!(categories[0]["backdrop_path"], serde_json::Value::Null);
    assert_eq!(categories[0]["series_count"], 1);
}

#[tokio::test]
async fn empty_catalog_yields_an_empty_taxonomy() {
    let (app, _db) = test_app().await;
    let (status, body) = get(&app, "/search/categories").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 0);
}
