// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Bearer token persistence across the durable and session storage areas.
//!
//! Storage failures never surface to callers: a failed read is reported as
//! an absent token and a failed write is logged.

use crate::storage::{keys, KeyValueStore, StorageError};
use std::sync::Arc;

/// Owns the single current bearer token and the cached user email.
#[derive(Clone)]
pub struct TokenStore {
    durable: Arc<dyn KeyValueStore>,
    session: Arc<dyn KeyValueStore>,
}

impl TokenStore {
    pub fn new(durable: Arc<dyn KeyValueStore>, session: Arc<dyn KeyValueStore>) -> Self {
        Self { durable, session }
    }

    /// Persist `token` in the durable area if `remember`, else in the session
    /// area. The other area is cleared so only one copy ever exists.
    pub fn save(&self, token: &str, remember: bool) {
        let (target, other, area) = if remember {
            (&self.durable, &self.session, "durable")
        } else {
            (&self.session, &self.durable, "session")
        };

        log_failure(other.remove(keys::TOKEN), "clear stale token");
        log_failure(target.set(keys::TOKEN, token), "save token");
        tracing::debug!(area, "Token saved");
    }

    /// Current token: durable area first, then session area.
    pub fn read(&self) -> Option<String> {
        read_key(self.durable.as_ref(), keys::TOKEN)
            .or_else(|| read_key(self.session.as_ref(), keys::TOKEN))
    }

    /// Remove the token from both areas.
    pub fn clear(&self) {
        log_failure(self.durable.remove(keys::TOKEN), "clear durable token");
        log_failure(self.session.remove(keys::TOKEN), "clear session token");
    }

    pub fn cached_email(&self) -> Option<String> {
        read_key(self.durable.as_ref(), keys::USER_EMAIL)
    }

    pub fn cache_email(&self, email: &str) {
        log_failure(self.durable.set(keys::USER_EMAIL, email), "cache email");
    }

    pub fn clear_cached_email(&self) {
        log_failure(self.durable.remove(keys::USER_EMAIL), "clear cached email");
    }
}

fn read_key(store: &dyn KeyValueStore, key: &str) -> Option<String> {
    match store.get(key) {
        Ok(v) => v.filter(|s| !s.is_empty()),
        Err(e) => {
            tracing::warn!(error = %e, key, "Storage read failed, treating as absent");
            None
        }
    }
}

fn log_failure(result: Result<(), StorageError>, action: &str) {
    if let Err(e) = result {
        tracing::warn!(error = %e, action, "Storage write failed");
    }
}
