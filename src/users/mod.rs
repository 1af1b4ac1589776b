mod dto;
mod handlers;
mod repo;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", post(handlers::create_user))
        .route("/users/:id/spells", get(handlers::get_user_spells))
        .route("/users/:id/spells/:spell_id", post(handlers::set_user_spell))
        .route("/users/:id/feats", get(handlers::get_user_feats))
        .route("/users/:id/feats/:feat_id", post(handlers::set_user_feat))
}
