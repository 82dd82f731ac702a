//! Search endpoints: free-text/genre search and the category taxonomy.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use super::{parse_page, upstream};
use crate::errors::{ApiError, ApiResult};
use crate::models::{Category, ListItem, Page};
use crate::web::{AppState, StatusEnvelope};

const ITEMS_PER_PAGE: u32 = 24;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub keywords: Option<String>,
    pub genre: Option<String>,
    pub page: Option<String>,
}

pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> ApiResult<Json<StatusEnvelope<Page<ListItem>>>> {
    // Blank parameters count as absent.
    let keywords = params
        .keywords
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());
    let genre = params
        .genre
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());

    if keywords.is_none() && genre.is_none() {
        return Err(ApiError::invalid_request(
            "Either keywords or genre parameter is required",
        ));
    }

    let page = parse_page(params.page.as_deref());
    let result = state
        .search
        .search(keywords, genre, page, ITEMS_PER_PAGE)
        .await
        .map_err(upstream("Failed to fetch search results"))?;

    Ok(Json(StatusEnvelope::ok(result)))
}

/// The genre taxonomy, served as a bare array.
pub async fn categories(State(state): State<AppState>) -> ApiResult<Json<Vec<Category>>> {
    let categories = state
        .categories
        .list_categories()
        .await
        .map_err(upstream("Failed to fetch categories"))?;
    Ok(Json(categories))
}
