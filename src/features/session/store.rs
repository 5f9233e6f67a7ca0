use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::core::config::SessionConfig;
use crate::features::session::model::Session;

/// Server-side state behind one session cookie
#[derive(Debug)]
struct SessionState {
    authenticated: bool,
    notices: Vec<String>,
    last_seen: Instant,
}

impl SessionState {
    fn new() -> Self {
        Self {
            authenticated: false,
            notices: Vec::new(),
            last_seen: Instant::now(),
        }
    }
}

/// In-process session registry keyed by the cookie token.
///
/// A session is only stored once it carries state (sign-in or a pending
/// notice). Entries idle for longer than the configured TTL are treated as
/// unknown and are purged whenever a new session is issued.
pub struct SessionStore {
    config: SessionConfig,
    sessions: RwLock<HashMap<Uuid, SessionState>>,
}

impl SessionStore {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    pub fn cookie_name(&self) -> &str {
        &self.config.cookie_name
    }

    /// Look up the session for `token`, issuing a fresh anonymous one when the
    /// token is absent, unknown or expired. The flag is true for new sessions.
    ///
    /// Fresh sessions are not stored until something is written to them.
    pub async fn resolve(self: &Arc<Self>, token: Option<Uuid>) -> (Session, bool) {
        let mut sessions = self.sessions.write().await;

        if let Some(id) = token {
            if let Some(state) = sessions.get_mut(&id) {
                if state.last_seen.elapsed() < self.config.ttl {
                    state.last_seen = Instant::now();
                    let session = Session::new(id, state.authenticated, Arc::clone(self));
                    return (session, false);
                }
            }
        }

        let ttl = self.config.ttl;
        let before = sessions.len();
        sessions.retain(|_, state| state.last_seen.elapsed() < ttl);
        let purged = before - sessions.len();
        if purged > 0 {
            tracing::debug!("Purged {} expired sessions", purged);
        }

        let id = Uuid::new_v4();
        tracing::debug!("Issued new session {}", id);

        (Session::new(id, false, Arc::clone(self)), true)
    }

    pub async fn set_authenticated(&self, id: Uuid, authenticated: bool) {
        let mut sessions = self.sessions.write().await;
        let state = sessions.entry(id).or_insert_with(SessionState::new);
        state.authenticated = authenticated;
        state.last_seen = Instant::now();
    }

    pub async fn push_notice(&self, id: Uuid, notice: String) {
        let mut sessions = self.sessions.write().await;
        let state = sessions.entry(id).or_insert_with(SessionState::new);
        state.notices.push(notice);
        state.last_seen = Instant::now();
    }

    /// Remove and return pending notices, oldest first
    pub async fn take_notices(&self, id: Uuid) -> Vec<String> {
        let mut sessions = self.sessions.write().await;
        sessions
            .get_mut(&id)
            .map(|state| std::mem::take(&mut state.notices))
            .unwrap_or_default()
    }

    #[cfg(test)]
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}
