//! Home overview endpoints: the top 10 of each category, unpaginated.

use axum::{
    extract::{Path, State},
    Json,
};

use super::upstream;
use crate::errors::{ApiError, ApiResult};
use crate::models::ListItem;
use crate::repositories::{Collection, ListCategory, MOVIES, SERIES};
use crate::web::{AppState, ResultsEnvelope};

const OVERVIEW_SIZE: u32 = 10;

pub async fn movies_overview(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> ApiResult<Json<ResultsEnvelope<ListItem>>> {
    overview(state, MOVIES, &category).await
}

pub async fn series_overview(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> ApiResult<Json<ResultsEnvelope<ListItem>>> {
    overview(state, SERIES, &category).await
}

async fn overview(
    state: AppState,
    collection: Collection,
    category: &str,
) -> ApiResult<Json<ResultsEnvelope<ListItem>>> {
    // The home surface has no upcoming list.
    let category = ListCategory::parse(category)
        .filter(|c| *c != ListCategory::Upcoming)
        .ok_or_else(|| ApiError::not_found("Not found"))?;

    let results = state
        .catalog
        .overview(collection, category, OVERVIEW_SIZE)
        .await
        .map_err(upstream(overview_error(collection, category)))?;

    Ok(Json(ResultsEnvelope { results }))
}

fn overview_error(collection: Collection, category: ListCategory) -> &'static str {
    match (collection.table, category) {
        ("movies", ListCategory::Popular) => "Failed to fetch popular movies",
        ("movies", ListCategory::Latest) => "Failed to fetch latest movies",
        ("movies", _) => "Failed to fetch top movies",
        (_, ListCategory::Popular) => "Failed to fetch popular series",
        (_, ListCategory::Latest) => "Failed to fetch latest series",
        (_, _) => "Failed to fetch top series",
    }
}
