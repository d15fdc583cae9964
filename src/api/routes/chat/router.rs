//! Router for the chat API

use std::sync::{Arc, RwLock};

use axum::{
    Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};

use super::public;
use crate::api::state::{AppState, SessionHandle};

type SharedState = Arc<RwLock<AppState>>;

fn find_session(state: &SharedState, id: &str) -> Option<SessionHandle> {
    state.write().expect("Unable to write share state").session(id)
}

fn not_found(id: &str) -> axum::response::Response {
    (
        StatusCode::NOT_FOUND,
        format!("Chat session {} not found", id),
    )
        .into_response()
}

async fn transcript_response(session: &SessionHandle) -> public::ChatTranscriptResponse {
    let transcript = session.transcript().await;
    public::ChatTranscriptResponse {
        session_id: session.id().to_string(),
        message_count: transcript.len(),
        transcript,
    }
}

/// Get a single chat session by ID
async fn chat_session(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let Some(session) = find_session(&state, &id) else {
        return not_found(&id);
    };
    axum::Json(transcript_response(&session).await).into_response()
}

/// Get a list of all active chat sessions. Never waits on a session
/// that is busy generating a reply.
async fn chat_list(State(state): State<SharedState>) -> axum::Json<public::ChatSessionsResponse> {
    let sessions = state
        .read()
        .expect("Unable to read share state")
        .sessions();

    let mut summaries: Vec<public::ChatSession> = sessions
        .iter()
        .map(|session| public::ChatSession {
            id: session.id().to_string(),
            message_count: session.message_count(),
            busy: session.is_busy(),
        })
        .collect();
    summaries.sort_by(|a, b| a.id.cmp(&b.id));

    axum::Json(public::ChatSessionsResponse {
        sessions: summaries,
    })
}

/// Start or add to a chat session and respond with the planner's
/// reply
async fn chat_handler(
    State(state): State<SharedState>,
    axum::Json(payload): axum::Json<public::ChatRequest>,
) -> impl IntoResponse {
    if payload.message.trim().is_empty() {
        return (StatusCode::BAD_REQUEST, "Message must not be empty").into_response();
    }

    let session = state
        .write()
        .expect("Unable to write share state")
        .get_or_create_session(payload.session_id.as_deref());

    let (reply, message_count) = match session.submit(&payload.message).await {
        Ok(submitted) => submitted,
        Err(e) => return (StatusCode::BAD_REQUEST, e.to_string()).into_response(),
    };

    axum::Json(public::ChatResponse {
        session_id: session.id().to_string(),
        reply,
        message_count,
    })
    .into_response()
}

/// Start a new conversation in an existing session
async fn reset_session(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let Some(session) = find_session(&state, &id) else {
        return not_found(&id);
    };
    session.reset().await;
    axum::Json(transcript_response(&session).await).into_response()
}

/// End a session and discard its transcript
async fn delete_session(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let removed = state
        .write()
        .expect("Unable to write share state")
        .remove_session(&id);

    match removed {
        Some(_) => {
            tracing::info!("Ended session {}", id);
            StatusCode::NO_CONTENT.into_response()
        }
        None => not_found(&id),
    }
}

/// Create the chat router
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/", post(chat_handler))
        .route("/sessions", get(chat_list))
        .route("/{id}", get(chat_session).delete(delete_session))
        .route("/{id}/reset", post(reset_session))
}
