//! API routes module

pub mod chat;
pub mod info;

use std::sync::{Arc, RwLock};

use crate::api::state::AppState;
use axum::Router;

type SharedState = Arc<RwLock<AppState>>;

/// Create the combined API router
pub fn router() -> Router<SharedState> {
    Router::new()
        // Chat routes
        .nest("/chat", chat::router())
        // Model and example prompts
        .nest("/info", info::router())
}
