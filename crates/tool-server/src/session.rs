//! MCP session tracking for the HTTP transport.

use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use uuid::Uuid;

use crate::error::SessionError;

/// Header carrying the session id on every message after `initialize`.
pub const SESSION_HEADER: &str = "mcp-session-id";

const DEFAULT_MAX_SESSIONS: usize = 1024;
const DEFAULT_IDLE_TIMEOUT_SECS: u64 = 30 * 60;

/// Identifier handed to a client on `initialize`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(Uuid);

impl SessionId {
    /// Creates a new random session ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.simple())
    }
}

impl FromStr for SessionId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim()).map(Self)
    }
}

/// Bounds on the session table.
///
/// Reads from environment variables:
/// - `MCP_MAX_SESSIONS` — live sessions allowed at once (default: `1024`)
/// - `MCP_SESSION_IDLE_SECS` — idle time before a session is evicted (default: `1800`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionLimits {
    pub max_sessions: usize,
    pub idle_timeout: Duration,
}

impl Default for SessionLimits {
    fn default() -> Self {
        Self {
            max_sessions: DEFAULT_MAX_SESSIONS,
            idle_timeout: Duration::from_secs(DEFAULT_IDLE_TIMEOUT_SECS),
        }
    }
}

impl SessionLimits {
    /// Loads limits from the process environment, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads limits through `lookup`; zero or unparsable values keep the default.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let positive = |var: &str| -> Option<u64> {
            let raw = lookup(var)?;
            match raw.trim().parse::<u64>() {
                Ok(n) if n > 0 => Some(n),
                _ => {
                    tracing::warn!(var, value = %raw, "ignoring invalid session limit");
                    None
                }
            }
        };

        Self {
            max_sessions: positive("MCP_MAX_SESSIONS")
                .and_then(|n| usize::try_from(n).ok())
                .unwrap_or(defaults.max_sessions),
            idle_timeout: positive("MCP_SESSION_IDLE_SECS")
                .map(Duration::from_secs)
                .unwrap_or(defaults.idle_timeout),
        }
    }
}

/// State negotiated for one client connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub protocol_version: String,
    pub client_name: Option<String>,
    /// Set once the client sends `notifications/initialized`.
    pub initialized: bool,
    pub last_seen: Instant,
}

impl Session {
    fn is_expired(&self, now: Instant, idle_timeout: Duration) -> bool {
        now.saturating_duration_since(self.last_seen) >= idle_timeout
    }
}

/// Live sessions, shared across request handlers.
///
/// Sessions idle for longer than [`SessionLimits::idle_timeout`] are evicted,
/// and at most [`SessionLimits::max_sessions`] exist at once.
#[derive(Debug, Default, Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<SessionId, Session>>>,
    limits: SessionLimits,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limits(limits: SessionLimits) -> Self {
        Self {
            sessions: Arc::default(),
            limits,
        }
    }

    /// Opens a session and returns its id.
    ///
    /// Expired sessions are swept first; fails when the table is still full.
    pub async fn create(
        &self,
        protocol_version: &str,
        client_name: Option<String>,
    ) -> Result<SessionId, SessionError> {
        let now = Instant::now();
        let mut sessions = self.sessions.write().await;
        self.sweep(&mut sessions, now);

        if sessions.len() >= self.limits.max_sessions {
            metrics::counter!("mcp_sessions_rejected_total").increment(1);
            tracing::warn!(
                max_sessions = self.limits.max_sessions,
                "session limit reached, rejecting initialize"
            );
            return Err(SessionError::CapacityReached(self.limits.max_sessions));
        }

        let id = SessionId::new();
        sessions.insert(
            id,
            Session {
                protocol_version: protocol_version.to_string(),
                client_name,
                initialized: false,
                last_seen: now,
            },
        );
        metrics::gauge!("mcp_sessions_active").set(sessions.len() as f64);
        tracing::info!(session_id = %id, protocol_version, "session opened");
        Ok(id)
    }

    pub async fn get(&self, id: &SessionId) -> Option<Session> {
        self.sessions.read().await.get(id).cloned()
    }

    /// Refreshes `last_seen` for a live session.
    ///
    /// Returns `false` if the session does not exist or has expired; an
    /// expired session is removed.
    pub async fn touch(&self, id: &SessionId) -> bool {
        let now = Instant::now();
        let mut sessions = self.sessions.write().await;
        let expired = match sessions.get_mut(id) {
            None => return false,
            Some(session) if session.is_expired(now, self.limits.idle_timeout) => true,
            Some(session) => {
                session.last_seen = now;
                false
            }
        };

        if expired {
            sessions.remove(id);
            metrics::gauge!("mcp_sessions_active").set(sessions.len() as f64);
            tracing::info!(session_id = %id, "session expired");
            return false;
        }
        true
    }

    /// Marks the session initialized. Returns `false` if it does not exist.
    pub async fn mark_initialized(&self, id: &SessionId) -> bool {
        match self.sessions.write().await.get_mut(id) {
            Some(session) => {
                session.initialized = true;
                true
            }
            None => false,
        }
    }

    /// Closes the session. Returns `false` if it did not exist.
    pub async fn remove(&self, id: &SessionId) -> bool {
        let mut sessions = self.sessions.write().await;
        let removed = sessions.remove(id).is_some();
        if removed {
            metrics::gauge!("mcp_sessions_active").set(sessions.len() as f64);
            tracing::info!(session_id = %id, "session closed");
        }
        removed
    }

    /// Removes every idle session and returns how many were evicted.
    pub async fn evict_expired(&self) -> usize {
        let mut sessions = self.sessions.write().await;
        self.sweep(&mut sessions, Instant::now())
    }

    /// Spawns a task that calls [`evict_expired`](Self::evict_expired) every `period`.
    pub fn spawn_reaper(&self, period: Duration) -> JoinHandle<()> {
        let store = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            loop {
                ticker.tick().await;
                store.evict_expired().await;
            }
        })
    }

    fn sweep(&self, sessions: &mut HashMap<SessionId, Session>, now: Instant) -> usize {
        let before = sessions.len();
        sessions.retain(|_, s| !s.is_expired(now, self.limits.idle_timeout));
        let evicted = before - sessions.len();
        if evicted > 0 {
            metrics::counter!("mcp_sessions_expired_total").increment(evicted as u64);
            metrics::gauge!("mcp_sessions_active").set(sessions.len() as f64);
            tracing::info!(evicted, live = sessions.len(), "evicted idle sessions");
        }
        evicted
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn store_with(max_sessions: usize, idle_secs: u64) -> SessionStore {
        SessionStore::with_limits(SessionLimits {
            max_sessions,
            idle_timeout: Duration::from_secs(idle_secs),
        })
    }

    #[test]
    fn session_id_round_trips_through_display() {
        let id = SessionId::new();
        let parsed: SessionId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn session_id_rejects_garbage() {
        assert!("not-a-session".parse::<SessionId>().is_err());
    }

    #[test]
    fn limits_from_lookup() {
        let vars: HashMap<&str, &str> = [("MCP_MAX_SESSIONS", "8"), ("MCP_SESSION_IDLE_SECS", "60")]
            .into_iter()
            .collect();
        let limits = SessionLimits::from_lookup(|k| vars.get(k).map(|v| v.to_string()));
        assert_eq!(limits.max_sessions, 8);
        assert_eq!(limits.idle_timeout, Duration::from_secs(60));
    }

    #[test]
    fn limits_ignore_invalid_values() {
        let vars: HashMap<&str, &str> = [("MCP_MAX_SESSIONS", "0"), ("MCP_SESSION_IDLE_SECS", "soon")]
            .into_iter()
            .collect();
        let limits = SessionLimits::from_lookup(|k| vars.get(k).map(|v| v.to_string()));
        assert_eq!(limits, SessionLimits::default());
    }

    #[tokio::test]
    async fn create_mark_remove() {
        let store = SessionStore::new();
        let id = store
            .create("2025-06-18", Some("inspector".into()))
            .await
            .unwrap();

        let session = store.get(&id).await.unwrap();
        assert_eq!(session.protocol_version, "2025-06-18");
        assert_eq!(session.client_name.as_deref(), Some("inspector"));
        assert!(!session.initialized);

        assert!(store.mark_initialized(&id).await);
        assert!(store.get(&id).await.unwrap().initialized);

        assert!(store.remove(&id).await);
        assert!(!store.remove(&id).await);
        assert!(store.get(&id).await.is_none());
    }

    #[tokio::test]
    async fn unknown_session_operations() {
        let store = SessionStore::new();
        let id = SessionId::new();
        assert!(!store.touch(&id).await);
        assert!(!store.mark_initialized(&id).await);
        assert!(store.get(&id).await.is_none());
    }

    #[tokio::test]
    async fn create_rejects_over_capacity() {
        let store = store_with(2, 60);
        store.create("2025-06-18", None).await.unwrap();
        store.create("2025-06-18", None).await.unwrap();

        let err = store.create("2025-06-18", None).await.unwrap_err();
        assert!(matches!(err, SessionError::CapacityReached(2)));
    }

    #[tokio::test]
    async fn removing_a_session_frees_capacity() {
        let store = store_with(1, 60);
        let id = store.create("2025-06-18", None).await.unwrap();
        assert!(store.create("2025-06-18", None).await.is_err());

        assert!(store.remove(&id).await);
        assert!(store.create("2025-06-18", None).await.is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn idle_session_expires_on_touch() {
        let store = store_with(4, 60);
        let id = store.create("2025-06-18", None).await.unwrap();

        tokio::time::advance(Duration::from_secs(30)).await;
        assert!(store.touch(&id).await);

        // Touching reset the idle clock.
        tokio::time::advance(Duration::from_secs(45)).await;
        assert!(store.touch(&id).await);

        tokio::time::advance(Duration::from_secs(61)).await;
        assert!(!store.touch(&id).await);
        assert!(store.get(&id).await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn create_sweeps_expired_sessions_before_cap_check() {
        let store = store_with(2, 60);
        store.create("2025-06-18", None).await.unwrap();
        store.create("2025-06-18", None).await.unwrap();
        assert!(store.create("2025-06-18", None).await.is_err());

        tokio::time::advance(Duration::from_secs(61)).await;
        let fresh = store.create("2025-06-18", None).await.unwrap();
        assert!(store.get(&fresh).await.is_some());
        assert_eq!(store.evict_expired().await, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn evict_expired_counts_removed_sessions() {
        let store = store_with(8, 60);
        let stale = store.create("2025-06-18", None).await.unwrap();
        tokio::time::advance(Duration::from_secs(40)).await;
        let recent = store.create("2025-06-18", None).await.unwrap();

        tokio::time::advance(Duration::from_secs(30)).await;
        assert_eq!(store.evict_expired().await, 1);
        assert!(store.get(&stale).await.is_none());
        assert!(store.get(&recent).await.is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn reaper_evicts_in_background() {
        let store = store_with(8, 60);
        let id = store.create("2025-06-18", None).await.unwrap();
        let reaper = store.spawn_reaper(Duration::from_secs(10));

        tokio::time::sleep(Duration::from_secs(75)).await;
        assert!(store.get(&id).await.is_none());
        reaper.abort();
    }
}
