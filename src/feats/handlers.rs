use axum::{
    extract::{Path, Query, State},
    Json,
};
use tracing::instrument;

use crate::error::ApiError;
use crate::pagination::pages_for;
use crate::state::AppState;

use super::dto::{FeatFilterOptions, FeatJson, FeatListQuery, FeatListResponse};
use super::repo;

#[instrument(skip(state))]
pub async fn list_feats(
    State(state): State<AppState>,
    Query(query): Query<FeatListQuery>,
) -> Result<Json<FeatListResponse>, ApiError> {
    let page = query.page.max(1);
    let per_page = query.per_page.max(1);
    let filter = query.into_filter();

    let total = repo::count(&state.db, &filter).await?;
    let feats = repo::list(&state.db, &filter, per_page, (page - 1) * per_page).await?;

    Ok(Json(FeatListResponse {
        feats: feats.into_iter().map(FeatJson::from).collect(),
        total,
        pages: pages_for(total, per_page),
        current_page: page,
    }))
}

#[instrument(skip(state))]
pub async fn get_feat(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<FeatJson>, ApiError> {
    let feat = repo::get(&state.db, id)
        .await?
        .ok_or(ApiError::NotFound("Feat"))?;
    Ok(Json(feat.into()))
}

#[instrument(skip(state))]
pub async fn feat_filters(
    State(state): State<AppState>,
) -> Result<Json<FeatFilterOptions>, ApiError> {
    let categories = repo::distinct_categories(&state.db).await?;
    Ok(Json(FeatFilterOptions { categories }))
}
