use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Clone, Error, PartialEq)]
pub enum AuthError {
    #[error("Incorrect username or password")]
    InvalidCredentials,
    #[error("Administrator login required")]
    NotAuthenticated,
    #[error("Administrator session expired")]
    SessionExpired,
}

impl AuthError {
    pub fn user_message(&self) -> &'static str {
        match self {
            AuthError::InvalidCredentials => "Login yoki parol noto'g'ri",
            AuthError::NotAuthenticated | AuthError::SessionExpired => "Iltimos, qaytadan kiring",
        }
    }
}

/// The single administrator login pair.
#[derive(Clone)]
pub struct AdminCredentials {
    username: String,
    password: String,
}

impl AdminCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    fn matches(&self, username: &str, password: &str) -> bool {
        self.username == username && self.password == password
    }
}

impl fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Persistable part of the admin login: when it happened, if at all.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdminSession {
    pub authenticated_at: Option<DateTime<Utc>>,
}

/// Gate in front of the management operations.
///
/// A login is valid for `session_ttl`; after that the guard reports the
/// session as expired until the next successful login.
#[derive(Debug, Clone)]
pub struct AdminGuard {
    credentials: AdminCredentials,
    session_ttl: Duration,
    session: AdminSession,
}

impl AdminGuard {
    pub fn new(credentials: AdminCredentials, session_ttl: Duration) -> Self {
        Self {
            credentials,
            session_ttl,
            session: AdminSession::default(),
        }
    }

    /// Restores a session saved by a previous run.
    pub fn with_session(mut self, session: AdminSession) -> Self {
        self.session = session;
        self
    }

    pub fn session(&self) -> &AdminSession {
        &self.session
    }

    pub fn login(&mut self, username: &str, password: &str, now: DateTime<Utc>) -> bool {
        if self.credentials.matches(username, password) {
            self.session.authenticated_at = Some(now);
            info!("Administrator logged in");
            true
        } else {
            warn!("Administrator login rejected");
            false
        }
    }

    pub fn logout(&mut self) {
        self.session.authenticated_at = None;
        info!("Administrator logged out");
    }

    pub fn is_authenticated(&self, now: DateTime<Utc>) -> bool {
        self.require(now).is_ok()
    }

    pub fn require(&self, now: DateTime<Utc>) -> Result<(), AuthError> {
        match self.session.authenticated_at {
            None => Err(AuthError::NotAuthenticated),
            Some(at) if now.signed_duration_since(at) >= self.session_ttl => Err(AuthError::SessionExpired),
            Some(_) => Ok(()),
        }
    }
}
