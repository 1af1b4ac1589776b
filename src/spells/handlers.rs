use axum::{
    extract::{Path, Query, State},
    Json,
};
use tracing::instrument;

use crate::error::ApiError;
use crate::pagination::pages_for;
use crate::state::AppState;

use super::dto::{
    flatten_classes, SpellFilterOptions, SpellJson, SpellListQuery, SpellListResponse,
};
use super::repo;

#[instrument(skip(state))]
pub async fn list_spells(
    State(state): State<AppState>,
    Query(query): Query<SpellListQuery>,
) -> Result<Json<SpellListResponse>, ApiError> {
    let page = query.page.max(1);
    let per_page = query.per_page.max(1);
    let filter = query.into_filter();

    let total = repo::count(&state.db, &filter).await?;
    let spells = repo::list(&state.db, &filter, per_page, (page - 1) * per_page).await?;

    Ok(Json(SpellListResponse {
        spells: spells.into_iter().map(SpellJson::from).collect(),
        total,
        pages: pages_for(total, per_page),
        current_page: page,
    }))
}

#[instrument(skip(state))]
pub async fn get_spell(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<SpellJson>, ApiError> {
    let spell = repo::get(&state.db, id)
        .await?
        .ok_or(ApiError::NotFound("Spell"))?;
    Ok(Json(spell.into()))
}

#[instrument(skip(state))]
pub async fn spell_filters(
    State(state): State<AppState>,
) -> Result<Json<SpellFilterOptions>, ApiError> {
    let schools = repo::distinct_schools(&state.db).await?;
    let classes = flatten_classes(repo::class_lists(&state.db).await?);

    Ok(Json(SpellFilterOptions {
        schools,
        classes,
        levels: (0..10).collect(),
    }))
}
