//! Public types for the chat API
use serde::{Deserialize, Serialize};

use crate::chat::ChatTurn;

#[derive(Serialize, Clone)]
pub struct ChatSession {
    pub id: String,
    pub message_count: usize,
    // A reply is still being generated
    pub busy: bool,
}

#[derive(Deserialize)]
pub struct ChatRequest {
    // Starts a new session when missing
    pub session_id: Option<String>,
    pub message: String,
}

#[derive(Serialize)]
pub struct ChatResponse {
    pub session_id: String,
    pub reply: ChatTurn,
    pub message_count: usize,
}

#[derive(Serialize)]
pub struct ChatSessionsResponse {
    pub sessions: Vec<ChatSession>,
}

#[derive(Serialize)]
pub struct ChatTranscriptResponse {
    pub session_id: String,
    pub transcript: Vec<ChatTurn>,
    pub message_count: usize,
}
