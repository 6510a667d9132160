// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session context: token evaluation, expiry-driven logout, and the single
//! owner of session persistence side effects.
//!
//! State changes are published on a `watch` channel so route guards can react
//! without polling. The context owns at most one expiry task at a time; the
//! task is aborted on re-evaluation, logout, teardown, and drop.

use crate::routes::{Navigator, Route};
use crate::services::token_store::TokenStore;
use crate::time_utils::{format_utc_rfc3339, Clock};
use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use std::sync::{Arc, Mutex};
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Derived session validity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Not evaluated yet.
    Unknown,
    Valid { expires_at: DateTime<Utc> },
    Invalid,
}

impl SessionState {
    pub fn is_valid(&self) -> bool {
        matches!(self, SessionState::Valid { .. })
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        match self {
            SessionState::Valid { expires_at } => Some(*expires_at),
            _ => None,
        }
    }
}

/// The only claim the client reads from its token.
#[derive(Debug, Deserialize)]
struct ExpiryClaims {
    exp: i64,
}

/// Why a token was rejected.
#[derive(Debug, thiserror::Error)]
pub enum TokenDecodeError {
    #[error("malformed token: {0}")]
    Malformed(#[from] jsonwebtoken::errors::Error),

    #[error("expiry out of range: {0}")]
    ExpiryOutOfRange(i64),
}

/// Read the `exp` claim without verifying the signature.
///
/// The client never holds the signing key; the server remains the authority
/// and rejects forged tokens with 401.
pub fn decode_expiry(token: &str) -> Result<DateTime<Utc>, TokenDecodeError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;

    let data = decode::<ExpiryClaims>(token, &DecodingKey::from_secret(&[]), &validation)?;
    DateTime::from_timestamp(data.claims.exp, 0)
        .ok_or(TokenDecodeError::ExpiryOutOfRange(data.claims.exp))
}

struct SessionInner {
    tokens: TokenStore,
    navigator: Navigator,
    clock: Arc<dyn Clock>,
    state: watch::Sender<SessionState>,
}

impl SessionInner {
    /// Drop the session: clear storage, publish `Invalid`, return to the root.
    fn end(&self, clear_email: bool) {
        self.tokens.clear();
        if clear_email {
            self.tokens.clear_cached_email();
        }
        self.state.send_replace(SessionState::Invalid);
        self.navigator.navigate(Route::ROOT);
    }
}

/// Explicit session context shared by the request client, guards, and flows.
pub struct SessionContext {
    inner: Arc<SessionInner>,
    expiry_task: Mutex<Option<JoinHandle<()>>>,
}

impl SessionContext {
    pub fn new(tokens: TokenStore, navigator: Navigator, clock: Arc<dyn Clock>) -> Self {
        let (state, _) = watch::channel(SessionState::Unknown);
        Self {
            inner: Arc::new(SessionInner {
                tokens,
                navigator,
                clock,
                state,
            }),
            expiry_task: Mutex::new(None),
        }
    }

    pub fn state(&self) -> SessionState {
        *self.inner.state.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.inner.state.subscribe()
    }

    pub fn token(&self) -> Option<String> {
        self.inner.tokens.read()
    }

    pub fn tokens(&self) -> &TokenStore {
        &self.inner.tokens
    }

    pub fn navigator(&self) -> &Navigator {
        &self.inner.navigator
    }

    /// Expiry of the current session, formatted for display.
    pub fn expiry_display(&self) -> Option<String> {
        self.state().expires_at().map(format_utc_rfc3339)
    }

    /// Recompute validity from the stored token, ignoring any prior state.
    ///
    /// Must be called from within a tokio runtime when the token is valid,
    /// since the expiry task is spawned onto it.
    pub fn evaluate(&self) -> SessionState {
        self.cancel_expiry_task();

        let Some(token) = self.inner.tokens.read() else {
            tracing::debug!("No token stored, session invalid");
            self.inner.state.send_replace(SessionState::Invalid);
            self.inner.navigator.navigate(Route::ROOT);
            return SessionState::Invalid;
        };

        let expires_at = match decode_expiry(&token) {
            Ok(exp) => exp,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to decode token, clearing session");
                self.inner.end(false);
                return SessionState::Invalid;
            }
        };

        let now = self.inner.clock.now();
        if expires_at <= now {
            tracing::info!(expires_at = %format_utc_rfc3339(expires_at), "Token expired, clearing session");
            self.inner.end(false);
            return SessionState::Invalid;
        }

        let state = SessionState::Valid { expires_at };
        self.inner.state.send_replace(state);
        self.schedule_expiry(expires_at, now);
        tracing::debug!(expires_at = %format_utc_rfc3339(expires_at), "Session valid");
        state
    }

    /// Store a freshly issued token and evaluate it.
    pub fn login(&self, token: &str, remember: bool) -> SessionState {
        self.inner.tokens.save(token, remember);
        self.evaluate()
    }

    /// Explicit sign-out.
    pub fn logout(&self) {
        self.cancel_expiry_task();
        tracing::info!("Signing out");
        self.inner.end(true);
    }

    /// The server rejected the token; drop the session.
    pub fn invalidate(&self) {
        self.cancel_expiry_task();
        tracing::warn!("Session rejected by server, clearing");
        self.inner.end(false);
    }

    /// Cancel the pending expiry task without touching storage.
    pub fn teardown(&self) {
        self.cancel_expiry_task();
    }

    fn schedule_expiry(&self, expires_at: DateTime<Utc>, now: DateTime<Utc>) {
        let delay = (expires_at - now).to_std().unwrap_or_default();
        // Deadline is fixed now, not when the task is first polled.
        let deadline = tokio::time::Instant::now() + delay;
        let inner = Arc::clone(&self.inner);

        let handle = tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            tracing::info!("Session expired, signing out");
            inner.end(false);
        });

        if let Ok(mut slot) = self.expiry_task.lock() {
            if let Some(previous) = slot.replace(handle) {
                previous.abort();
            }
        }
    }

    fn cancel_expiry_task(&self) {
        if let Ok(mut slot) = self.expiry_task.lock() {
            if let Some(handle) = slot.take() {
                handle.abort();
            }
        }
    }
}

impl Drop for SessionContext {
    fn drop(&mut self) {
        self.cancel_expiry_task();
    }
}
