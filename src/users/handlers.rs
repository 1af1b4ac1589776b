use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use tracing::{info, instrument, warn};

use crate::error::ApiError;
use crate::state::AppState;

use super::dto::{
    CreateUserRequest, SetAssociationRequest, UserFeatItem, UserFeatsResponse, UserResponse,
    UserSpellItem, UserSpellsResponse,
};
use super::repo;

#[instrument(skip(state, payload))]
pub async fn create_user(
    State(state): State<AppState>,
    payload: Option<Json<CreateUserRequest>>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    // A body that fails to parse gets the same validation error as one
    // with the fields missing, so error bodies stay uniform JSON.
    let payload = payload.map(|Json(p)| p).unwrap_or_default();
    let username = payload.username.unwrap_or_default();
    let email = payload.email.unwrap_or_default();
    if username.is_empty() || email.is_empty() {
        return Err(ApiError::Validation(
            "Username and email are required".into(),
        ));
    }

    // Username first, then email: the first violated constraint wins.
    if repo::find_by_username(&state.db, &username).await?.is_some() {
        warn!(%username, "username taken");
        return Err(ApiError::Conflict("Username already exists".into()));
    }
    if repo::find_by_email(&state.db, &email).await?.is_some() {
        warn!(%email, "email taken");
        return Err(ApiError::Conflict("Email already exists".into()));
    }

    let user = match repo::create(&state.db, &username, &email).await {
        Ok(u) => u,
        // Concurrent create can slip past the checks above; the unique
        // constraint still reports it as a conflict, not a server error.
        Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
            return Err(ApiError::Conflict("Username or email already exists".into()));
        }
        Err(e) => return Err(e.into()),
    };

    info!(user_id = user.id, %user.username, "user created");
    Ok((StatusCode::CREATED, Json(user.into())))
}

#[instrument(skip(state))]
pub async fn get_user_spells(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
) -> Result<Json<UserSpellsResponse>, ApiError> {
    let rows = repo::list_spells_for_user(&state.db, user_id).await?;
    Ok(Json(UserSpellsResponse {
        spells: rows.into_iter().map(UserSpellItem::from).collect(),
    }))
}

#[instrument(skip(state, body))]
pub async fn set_user_spell(
    State(state): State<AppState>,
    Path((user_id, spell_id)): Path<(i32, i32)>,
    body: Option<Json<SetAssociationRequest>>,
) -> Result<Json<Value>, ApiError> {
    let body = body.map(|Json(b)| b).unwrap_or_default();
    repo::upsert_user_spell(&state.db, user_id, spell_id, body.is_favorite, body.notes).await?;
    Ok(Json(json!({ "message": "Spell added to user" })))
}

#[instrument(skip(state))]
pub async fn get_user_feats(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
) -> Result<Json<UserFeatsResponse>, ApiError> {
    let rows = repo::list_feats_for_user(&state.db, user_id).await?;
    Ok(Json(UserFeatsResponse {
        feats: rows.into_iter().map(UserFeatItem::from).collect(),
    }))
}

#[instrument(skip(state, body))]
pub async fn set_user_feat(
    State(state): State<AppState>,
    Path((user_id, feat_id)): Path<(i32, i32)>,
    body: Option<Json<SetAssociationRequest>>,
) -> Result<Json<Value>, ApiError> {
    let body = body.map(|Json(b)| b).unwrap_or_default();
    repo::upsert_user_feat(&state.db, user_id, feat_id, body.is_favorite, body.notes).await?;
    Ok(Json(json!({ "message": "Feat added to user" })))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use sqlx::PgPool;

    use super::*;
    use crate::config::AppConfig;

    fn test_state(db: PgPool) -> AppState {
        AppState::from_parts(
            db,
            Arc::new(AppConfig {
                database_url: String::new(),
                spells_file: "data/spells.json".into(),
                feats_file: "data/feats.json".into(),
            }),
        )
    }

    fn body(username: &str, email: &str) -> Option<Json<CreateUserRequest>> {
        Some(Json(CreateUserRequest {
            username: Some(username.into()),
            email: Some(email.into()),
        }))
    }

    #[sqlx::test]
    async fn duplicate_username_is_a_conflict(pool: PgPool) {
        let state = test_state(pool);

        let (status, _) = create_user(State(state.clone()), body("a", "a@x.com"))
            .await
            .unwrap();
        assert_eq!(status, StatusCode::CREATED);

        let err = create_user(State(state), body("a", "b@x.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Conflict(_)));
        assert_eq!(err.to_string(), "Username already exists");
    }

    #[sqlx::test]
    async fn duplicate_email_is_a_conflict(pool: PgPool) {
        let state = test_state(pool);

        create_user(State(state.clone()), body("a", "a@x.com"))
            .await
            .unwrap();

        let err = create_user(State(state), body("b", "a@x.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Conflict(_)));
        assert_eq!(err.to_string(), "Email already exists");
    }

    #[sqlx::test]
    async fn missing_or_unparseable_body_is_a_validation_error(pool: PgPool) {
        let state = test_state(pool);

        let err = create_user(State(state), None).await.unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
        assert_eq!(err.to_string(), "Username and email are required");
    }
}
