//! One-time anti-forgery tokens for the privileged bulk action.
//!
//! Tokens are issued when the admin listing renders and consumed on first
//! use, so a captured token cannot be replayed and a stale one expires on
//! its own.

use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

use uuid::Uuid;

/// Header carrying the token on state-changing admin requests.
pub const CSRF_HEADER: &str = "x-csrf-token";

/// Default token lifetime.
const DEFAULT_TTL: Duration = Duration::from_secs(15 * 60);

/// Issues and validates short-lived single-use tokens.
pub struct CsrfTokens {
    tokens: RwLock<HashMap<String, Instant>>,
    ttl: Duration,
}

impl Default for CsrfTokens {
    fn default() -> Self {
        Self::new()
    }
}

impl CsrfTokens {
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_TTL)
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            tokens: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    /// Issue a fresh token, pruning expired ones while at it.
    pub fn issue(&self) -> String {
        let token = Uuid::new_v4().to_string();
        let now = Instant::now();

        let mut tokens = self.tokens.write().unwrap_or_else(|e| e.into_inner());
        tokens.retain(|_, issued| now.duration_since(*issued) < self.ttl);
        tokens.insert(token.clone(), now);

        token
    }

    /// Consume a token. Valid tokens are removed so they cannot be
    /// replayed; unknown or expired tokens return false.
    pub fn consume(&self, token: &str) -> bool {
        let mut tokens = self.tokens.write().unwrap_or_else(|e| e.into_inner());
        match tokens.remove(token) {
            Some(issued) => issued.elapsed() < self.ttl,
            None => false,
        }
    }
}
