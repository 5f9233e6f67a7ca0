use std::sync::Arc;

use minijinja::{context, Value};
use uuid::Uuid;

use crate::features::session::store::SessionStore;

/// The caller's session, resolved by the session middleware for every request
#[derive(Clone)]
pub struct Session {
    pub id: Uuid,
    /// Authentication state as of the start of this request
    pub authenticated: bool,
    store: Arc<SessionStore>,
}

impl Session {
    pub(crate) fn new(id: Uuid, authenticated: bool, store: Arc<SessionStore>) -> Self {
        Self {
            id,
            authenticated,
            store,
        }
    }

    pub async fn login(&self) {
        self.store.set_authenticated(self.id, true).await;
        tracing::info!("Session {} authenticated", self.id);
    }

    pub async fn logout(&self) {
        self.store.set_authenticated(self.id, false).await;
        tracing::info!("Session {} logged out", self.id);
    }

    /// Queue a one-shot message for the next rendered page
    pub async fn notify(&self, notice: impl Into<String>) {
        self.store.push_notice(self.id, notice.into()).await;
    }

    pub async fn take_notices(&self) -> Vec<String> {
        self.store.take_notices(self.id).await
    }

    /// Values every page layout needs; consumes pending notices
    pub async fn page_context(&self) -> Value {
        context! {
            authenticated => self.authenticated,
            notices => self.take_notices().await,
        }
    }
}
