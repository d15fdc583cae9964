//! A single conversation with the planner. Owns its transcript and
//! handles one user submission at a time.
use anyhow::{Result, bail};
use uuid::Uuid;

use super::models::{ChatTurn, Transcript};
use crate::openai::Role;
use crate::planner::TravelPlanner;

pub struct Session {
    id: String,
    transcript: Transcript,
    planner: TravelPlanner,
}

impl Session {
    pub fn new(planner: TravelPlanner) -> Self {
        Self::with_id(&Uuid::new_v4().to_string(), planner)
    }

    pub fn with_id(id: &str, planner: TravelPlanner) -> Self {
        let transcript = Transcript::seeded(planner.welcome_turn());
        Self {
            id: id.to_string(),
            transcript,
            planner,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn planner(&self) -> &TravelPlanner {
        &self.planner
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn message_count(&self) -> usize {
        self.transcript.len()
    }

    /// Handle a message from the user. Appends the user's turn and
    /// exactly one assistant turn, which is either the planner's
    /// answer or a notice explaining why there isn't one.
    ///
    /// Blank input is rejected and leaves the transcript untouched.
    pub async fn submit(&mut self, user_text: &str) -> Result<&ChatTurn> {
        if user_text.trim().is_empty() {
            bail!("Message must not be empty");
        }

        tracing::info!("Session {}: new message", self.id);
        self.transcript.append(ChatTurn::new(Role::User, user_text));

        // Everything before the message we just added
        let prior = self.transcript.len() - 1;
        let reply = self
            .planner
            .respond(user_text, &self.transcript.all()[..prior])
            .await;
        self.transcript.append(ChatTurn::new(Role::Assistant, &reply));

        let turns = self.transcript.all();
        Ok(&turns[turns.len() - 1])
    }

    /// Start a new conversation, keeping only the welcome message.
    pub fn reset(&mut self) {
        tracing::info!("Session {}: reset", self.id);
        self.transcript.clear_to_seed();
    }
}
