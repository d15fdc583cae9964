//! Router for the info API

use std::sync::{Arc, RwLock};

use axum::{Router, extract::State, routing::get};

use super::public;
use crate::api::state::AppState;
use crate::planner::EXAMPLE_PROMPTS;

type SharedState = Arc<RwLock<AppState>>;

async fn info(State(state): State<SharedState>) -> axum::Json<public::InfoResponse> {
    let model = state
        .read()
        .expect("Unable to read share state")
        .planner()
        .model()
        .to_string();

    axum::Json(public::InfoResponse {
        model,
        examples: EXAMPLE_PROMPTS.iter().map(|s| s.to_string()).collect(),
    })
}

/// Create the info router
pub fn router() -> Router<SharedState> {
    Router::new().route("/", get(info))
}
