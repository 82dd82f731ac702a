//! Series list and detail endpoints: the movie surface mirrored over
//! `first_air_date`.

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
    Json,
};

use super::{parse_page, upstream};
use crate::errors::{ApiError, ApiResult};
use crate::repositories::{DetailOutcome, ListCategory, SERIES};
use crate::web::{AppState, DetailEnvelope, StatusEnvelope};

const ITEMS_PER_PAGE: u32 = 24;

pub async fn list(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> ApiResult<Response> {
    list_category(state, &category, 1).await
}

pub async fn list_page(
    State(state): State<AppState>,
    Path((category, page)): Path<(String, String)>,
) -> ApiResult<Response> {
    list_category(state, &category, parse_page(Some(&page))).await
}

async fn list_category(state: AppState, category: &str, page: u32) -> ApiResult<Response> {
    let category =
        ListCategory::parse(category).ok_or_else(|| ApiError::not_found("Not found"))?;

    match category {
        ListCategory::Upcoming => {
            let result = state
                .catalog
                .list_upcoming(SERIES, page, ITEMS_PER_PAGE)
                .await
                .map_err(upstream("Failed to fetch upcoming series"))?;
            Ok(Json(StatusEnvelope::ok(result)).into_response())
        }
        _ => {
            let result = state
                .catalog
                .list(SERIES, category, page, ITEMS_PER_PAGE)
                .await
                .map_err(upstream(list_error(category)))?;
            Ok(Json(StatusEnvelope::ok(result)).into_response())
        }
    }
}

pub async fn details(
    State(state): State<AppState>,
    Path(imdb_id): Path<String>,
) -> ApiResult<Json<DetailEnvelope>> {
    let outcome = state
        .catalog
        .details(SERIES, &imdb_id)
        .await
        .map_err(upstream("Failed to fetch series details"))?;

    match outcome {
        DetailOutcome::Found(document) => Ok(Json(DetailEnvelope::found(document))),
        DetailOutcome::NotReleased => Ok(Json(DetailEnvelope::not_released(SERIES.resource))),
        DetailOutcome::NotFound => Err(ApiError::not_found("Series not found")),
    }
}

fn list_error(category: ListCategory) -> &'static str {
    match category {
        ListCategory::Popular => "Failed to fetch popular series",
        ListCategory::Latest => "Failed to fetch latest series",
        ListCategory::Top => "Failed to fetch top rated series",
        ListCategory::Upcoming => "Failed to fetch upcoming series",
    }
}
