mod dto;
mod handlers;
pub(crate) mod repo;

use axum::{routing::get, Router};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/feats", get(handlers::list_feats))
        .route("/feats/filters", get(handlers::feat_filters))
        .route("/feats/:id", get(handlers::get_feat))
}
