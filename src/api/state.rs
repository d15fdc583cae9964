use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use anyhow::Result;
use tokio::sync::Mutex;

use crate::chat::{ChatTurn, Session};
use crate::core::AppConfig;
use crate::planner::TravelPlanner;

/// A session held by the server. The session sits behind its own
/// lock so only one completion call can be in flight per session.
/// The message count lives outside that lock so it can be read while
/// a reply is still pending.
#[derive(Clone)]
pub struct SessionHandle {
    id: String,
    session: Arc<Mutex<Session>>,
    message_count: Arc<AtomicUsize>,
}

impl SessionHandle {
    fn new(session: Session) -> Self {
        Self {
            id: session.id().to_string(),
            message_count: Arc::new(AtomicUsize::new(session.message_count())),
            session: Arc::new(Mutex::new(session)),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Number of turns as of the last completed submission or reset.
    pub fn message_count(&self) -> usize {
        self.message_count.load(Ordering::SeqCst)
    }

    /// True while a submission is waiting on the completion endpoint.
    pub fn is_busy(&self) -> bool {
        self.session.try_lock().is_err()
    }

    /// Waits for any reply already in progress for this session.
    /// Returns the reply along with the message count right after it
    /// was added.
    pub async fn submit(&self, user_text: &str) -> Result<(ChatTurn, usize)> {
        let mut session = self.session.lock().await;
        let reply = session.submit(user_text).await?.clone();
        let count = session.message_count();
        self.message_count.store(count, Ordering::SeqCst);
        Ok((reply, count))
    }

    pub async fn reset(&self) {
        let mut session = self.session.lock().await;
        session.reset();
        self.message_count
            .store(session.message_count(), Ordering::SeqCst);
    }

    pub async fn transcript(&self) -> Vec<ChatTurn> {
        self.session.lock().await.transcript().all().to_vec()
    }
}

struct SessionEntry {
    handle: SessionHandle,
    last_used: Instant,
}

pub struct AppState {
    pub config: AppConfig,
    planner: TravelPlanner,
    sessions: HashMap<String, SessionEntry>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Result<Self> {
        let planner = TravelPlanner::new(&config)?;
        Ok(Self {
            config,
            planner,
            sessions: HashMap::new(),
        })
    }

    pub fn planner(&self) -> &TravelPlanner {
        &self.planner
    }

    /// Look up a session by ID and mark it as used.
    pub fn session(&mut self, id: &str) -> Option<SessionHandle> {
        self.sessions.get_mut(id).map(|entry| {
            entry.last_used = Instant::now();
            entry.handle.clone()
        })
    }

    /// Look up a session by ID, starting a new one if it doesn't
    /// exist. A new ID is generated when none is given. Idle sessions
    /// are dropped whenever a new one is started.
    pub fn get_or_create_session(&mut self, id: Option<&str>) -> SessionHandle {
        if let Some(handle) = id.and_then(|id| self.session(id)) {
            return handle;
        }

        let now = Instant::now();
        self.prune_idle_sessions(now);

        let session = match id {
            Some(id) => Session::with_id(id, self.planner.clone()),
            None => Session::new(self.planner.clone()),
        };
        tracing::info!("Starting session {}", session.id());
        let handle = SessionHandle::new(session);
        self.sessions.insert(
            handle.id().to_string(),
            SessionEntry {
                handle: handle.clone(),
                last_used: now,
            },
        );
        handle
    }

    /// Drop sessions that haven't been used within the configured
    /// idle timeout. Sessions with a reply in progress are kept.
    /// Returns the number of sessions dropped.
    pub fn prune_idle_sessions(&mut self, now: Instant) -> usize {
        let timeout = self.config.session_idle_timeout;
        let before = self.sessions.len();
        self.sessions.retain(|id, entry| {
            let keep = now.saturating_duration_since(entry.last_used) < timeout
                || entry.handle.is_busy();
            if !keep {
                tracing::info!("Dropping idle session {}", id);
            }
            keep
        });
        before - self.sessions.len()
    }

    pub fn remove_session(&mut self, id: &str) -> Option<SessionHandle> {
        self.sessions.remove(id).map(|entry| entry.handle)
    }

    pub fn sessions(&self) -> Vec<SessionHandle> {
        self.sessions
            .values()
            .map(|entry| entry.handle.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn test_config() -> AppConfig {
        AppConfig::new("http://localhost", "test-key", "test-model")
    }

    fn test_state() -> AppState {
        AppState::new(test_config()).unwrap()
    }

    #[tokio::test]
    async fn test_get_or_create_session_reuses_existing() {
        let mut state = test_state();
        let first = state.get_or_create_session(Some("abc"));
        let second = state.get_or_create_session(Some("abc"));
        assert!(Arc::ptr_eq(&first.session, &second.session));
        assert_eq!(first.session.lock().await.id(), "abc");
        assert_eq!(state.sessions().len(), 1);
    }

    #[test]
    fn test_get_or_create_session_generates_id() {
        let mut state = test_state();
        let handle = state.get_or_create_session(None);
        assert!(!handle.id().is_empty());
        assert!(state.session(handle.id()).is_some());
        assert_eq!(handle.message_count(), 1);
    }

    #[test]
    fn test_remove_session() {
        let mut state = test_state();
        state.get_or_create_session(Some("abc"));
        assert!(state.remove_session("abc").is_some());
        assert!(state.session("abc").is_none());
        assert!(state.remove_session("abc").is_none());
    }

    #[test]
    fn test_prune_keeps_recently_used_sessions() {
        let mut state = test_state();
        state.get_or_create_session(Some("a"));
        state.get_or_create_session(Some("b"));

        assert_eq!(state.prune_idle_sessions(Instant::now()), 0);
        assert_eq!(state.sessions().len(), 2);
    }

    #[test]
    fn test_prune_drops_idle_sessions() {
        let mut state = test_state();
        state.get_or_create_session(Some("a"));
        state.get_or_create_session(Some("b"));

        let later = Instant::now() + Duration::from_secs(60 * 60 * 2);
        assert_eq!(state.prune_idle_sessions(later), 2);
        assert!(state.session("a").is_none());
        assert!(state.sessions().is_empty());
    }

    #[test]
    fn test_new_session_prunes_idle_ones() {
        let config = AppConfig {
            session_idle_timeout: Duration::ZERO,
            ..test_config()
        };
        let mut state = AppState::new(config).unwrap();
        state.get_or_create_session(Some("old"));
        state.get_or_create_session(Some("new"));

        assert!(state.session("old").is_none());
        assert!(state.session("new").is_some());
        assert_eq!(state.sessions().len(), 1);
    }

    #[tokio::test]
    async fn test_prune_keeps_busy_sessions() {
        let mut state = test_state();
        let handle = state.get_or_create_session(Some("busy"));

        let _guard = handle.session.lock().await;
        assert!(handle.is_busy());

        let later = Instant::now() + Duration::from_secs(60 * 60 * 2);
        assert_eq!(state.prune_idle_sessions(later), 0);
        assert!(state.session("busy").is_some());
    }

    #[tokio::test]
    async fn test_reset_updates_message_count() {
        let mut state = test_state();
        let handle = state.get_or_create_session(Some("abc"));
        handle.reset().await;
        assert_eq!(handle.message_count(), 1);
        assert!(!handle.is_busy());
        assert_eq!(handle.transcript().await.len(), 1);
    }
}
