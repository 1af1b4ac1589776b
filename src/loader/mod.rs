mod handlers;
mod services;
mod source;

use axum::{routing::post, Router};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/load-data", post(handlers::load_data))
}
