mod dto;
mod handlers;
pub(crate) mod repo;

use axum::{routing::get, Router};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/spells", get(handlers::list_spells))
        .route("/spells/filters", get(handlers::spell_filters))
        .route("/spells/:id", get(handlers::get_spell))
}
