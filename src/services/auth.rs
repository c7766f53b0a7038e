// Login sessions: ulid tokens mapped to usernames, held in memory for the
// lifetime of the process. Credentials themselves live in the record store
// and are compared in plaintext by design.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use ulid::Ulid;

use crate::models::Role;
use crate::store::Store;

pub enum LoginOutcome {
    /// Logged in as admin; carries the session token.
    Admin(String),
    /// Logged in as a student with a complete profile.
    Student(String),
    /// Logged in as a student who still has to fill in profile fields.
    ProfileIncomplete(String),
    /// Credential mismatch: user-visible message, no state change.
    InvalidCredentials,
}

#[derive(Clone, Default)]
pub struct AuthSessions {
    inner: Arc<RwLock<HashMap<String, String>>>,
}

impl AuthSessions {
    pub fn login(&self, store: &Store, username: &str, password: &str) -> LoginOutcome {
        let Some(user) = store.verify_login(username, password) else {
            tracing::warn!("failed login attempt for '{username}'");
            return LoginOutcome::InvalidCredentials;
        };

        let token = Ulid::new().to_string();
        self.inner
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(token.clone(), user.username.clone());
        tracing::info!("'{}' logged in", user.username);

        match user.role {
            Role::Admin => LoginOutcome::Admin(token),
            Role::Student if !user.profile_complete() => LoginOutcome::ProfileIncomplete(token),
            Role::Student => LoginOutcome::Student(token),
        }
    }

    pub fn logout(&self, token: &str) {
        self.inner
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .remove(token);
    }

    pub fn username_for(&self, token: &str) -> Option<String> {
        self.inner
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(token)
            .cloned()
    }
}
