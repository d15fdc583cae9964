use anyhow::Result;

use super::prompt::{CityGuide, HONG_KONG, Prompt, render};
use crate::chat::ChatTurn;
use crate::chat::models::recent_turns;
use crate::core::AppConfig;
use crate::openai::{CompletionError, CompletionOptions, Message, Role, completion};

pub const TIMEOUT_NOTICE: &str =
    "⏰ The request timed out. Please try again with a shorter message.";
pub const BUSY_NOTICE: &str =
    "🚦 I'm currently handling many requests. Please wait a moment and try again.";

/// Turns a failed completion into the text shown to the user in
/// place of an answer.
pub fn notice(err: &CompletionError) -> String {
    match err {
        CompletionError::Timeout => TIMEOUT_NOTICE.to_string(),
        CompletionError::RateLimited => BUSY_NOTICE.to_string(),
        CompletionError::Endpoint { detail, .. } => {
            format!("🔧 I encountered an API error: {}. Please try again.", detail)
        }
        CompletionError::Unexpected(detail) => {
            format!("❌ An unexpected error occurred: {}. Please try again.", detail)
        }
    }
}

/// Answers travel planning questions using an OpenAI compatible
/// completion endpoint.
///
/// Every request is the fixed instruction block, followed by the
/// most recent turns of history, followed by the new user message.
#[derive(Clone, Debug)]
pub struct TravelPlanner {
    api_hostname: String,
    api_key: String,
    model: String,
    max_history_turns: usize,
    options: CompletionOptions,
    instructions: String,
    welcome: String,
}

impl TravelPlanner {
    pub fn new(config: &AppConfig) -> Result<Self> {
        Self::for_city(config, &HONG_KONG)
    }

    pub fn for_city(config: &AppConfig, guide: &CityGuide) -> Result<Self> {
        Ok(Self {
            api_hostname: config.api_hostname.clone(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            max_history_turns: config.max_history_turns,
            options: CompletionOptions {
                max_tokens: config.max_response_tokens,
                temperature: config.temperature,
                timeout: config.request_timeout,
            },
            instructions: render(Prompt::Instructions, guide)?,
            welcome: render(Prompt::Welcome, guide)?,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn instructions(&self) -> &str {
        &self.instructions
    }

    /// A fresh welcome turn for seeding a new transcript.
    pub fn welcome_turn(&self) -> ChatTurn {
        ChatTurn::new(Role::Assistant, &self.welcome)
    }

    pub fn build_messages(&self, user_text: &str, history: &[ChatTurn]) -> Vec<Message> {
        let window = recent_turns(history, self.max_history_turns);
        let mut messages = Vec::with_capacity(window.len() + 2);
        messages.push(Message::new(Role::System, &self.instructions));
        messages.extend(window.map(Message::from));
        messages.push(Message::new(Role::User, user_text));
        messages
    }

    /// Get the planner's reply to `user_text`. Failures are returned
    /// as a notice for the user rather than an error so the caller
    /// always has exactly one reply to show.
    pub async fn respond(&self, user_text: &str, history: &[ChatTurn]) -> String {
        let messages = self.build_messages(user_text, history);
        tracing::debug!(
            "Requesting completion from {} with {} messages",
            self.model,
            messages.len()
        );

        match completion(
            &messages,
            &self.options,
            &self.api_hostname,
            &self.api_key,
            &self.model,
        )
        .await
        {
            Ok(content) => content,
            Err(e) => {
                if e.is_transient() {
                    tracing::warn!("Completion failed: {}", e);
                } else {
                    tracing::error!("Completion failed: {}", e);
                }
                notice(&e)
            }
        }
    }
}
