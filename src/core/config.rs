use std::env;
use std::time::Duration;

pub const DEFAULT_API_HOSTNAME: &str = "https://chatapi.akash.network/api";
pub const DEFAULT_MODEL: &str = "DeepSeek-R1-Distill-Llama-70B";
pub const MAX_HISTORY_TURNS: usize = 10;
pub const MAX_RESPONSE_TOKENS: u32 = 2000;
pub const TEMPERATURE: f64 = 0.7;
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
pub const SESSION_IDLE_TIMEOUT: Duration = Duration::from_secs(60 * 60);

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub api_hostname: String,
    pub api_key: String,
    pub model: String,
    pub max_history_turns: usize,
    pub max_response_tokens: u32,
    pub temperature: f64,
    pub request_timeout: Duration,
    // How long the API server keeps a session nobody has used
    pub session_idle_timeout: Duration,
}

impl AppConfig {
    /// Config for a specific endpoint with the fixed request limits.
    pub fn new(api_hostname: &str, api_key: &str, model: &str) -> Self {
        Self {
            api_hostname: api_hostname.to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
            max_history_turns: MAX_HISTORY_TURNS,
            max_response_tokens: MAX_RESPONSE_TOKENS,
            temperature: TEMPERATURE,
            request_timeout: REQUEST_TIMEOUT,
            session_idle_timeout: SESSION_IDLE_TIMEOUT,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        let api_hostname =
            env::var("PLANNER_LLM_HOST").unwrap_or_else(|_| DEFAULT_API_HOSTNAME.to_string());
        let api_key = env::var("PLANNER_API_KEY")
            .or_else(|_| env::var("OPENAI_API_KEY"))
            .unwrap_or_else(|_| "thiswontworkwithoutakey".to_string());
        let model = env::var("PLANNER_LLM_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        Self::new(&api_hostname, &api_key, &model)
    }
}
