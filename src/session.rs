//! In-process session store keyed by opaque cookie tokens

use std::{
    collections::HashMap,
    sync::{Arc, RwLock},
};

use uuid::Uuid;

use crate::models::User;

/// Cookie carrying the opaque session token
pub const SESSION_COOKIE: &str = "session_token";

/// Identity bound to an active session
///
/// Its presence proves a prior successful password verification.
#[derive(Debug, Clone)]
pub struct SessionIdentity {
    pub user_id: i64,
    pub username: String,
}

/// Session store mapping opaque tokens to authenticated identities
///
/// Nothing here is persisted; sessions live for the lifetime of the
/// process. A restart logs everyone out.
#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<String, SessionIdentity>>>,
}

impl SessionStore {
    /// Create a new, empty session store
    pub fn new() -> Self {
        Self::default()
    }

    /// Establish a session for a verified user, returning the token
    pub fn start_session(&self, user: &User) -> String {
        let token = Uuid::new_v4().to_string();
        let identity = SessionIdentity {
            user_id: user.id,
            username: user.username.clone(),
        };

        self.inner
            .write()
            .expect("session store lock poisoned")
            .insert(token.clone(), identity);

        token
    }

    /// Look up the identity bound to a token
    pub fn get(&self, token: &str) -> Option<SessionIdentity> {
        self.inner
            .read()
            .expect("session store lock poisoned")
            .get(token)
            .cloned()
    }

    /// End the session for a token; safe to call when none exists
    pub fn end_session(&self, token: &str) {
        self.inner
            .write()
            .expect("session store lock poisoned")
            .remove(token);
    }
}
