//! Public types for the info API
use serde::Serialize;

#[derive(Serialize)]
pub struct InfoResponse {
    pub model: String,
    pub examples: Vec<String>,
}
