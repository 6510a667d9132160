// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session-gated route protection.

use crate::routes::Route;
use crate::services::session::{SessionContext, SessionState};
use std::sync::Arc;

/// What to show for a guarded view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Guarded<V> {
    /// Session not evaluated yet; show a neutral placeholder.
    Loading,
    /// Session valid; show the requested view.
    Allow(V),
    /// Session invalid; show the login entry point in place.
    Login,
}

impl<V> Guarded<V> {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Guarded::Allow(_))
    }

    pub fn map<U, F: FnOnce(V) -> U>(self, f: F) -> Guarded<U> {
        match self {
            Guarded::Loading => Guarded::Loading,
            Guarded::Allow(v) => Guarded::Allow(f(v)),
            Guarded::Login => Guarded::Login,
        }
    }
}

/// Gate `view` on the current session state.
pub fn require_session<V>(state: &SessionState, view: V) -> Guarded<V> {
    match state {
        SessionState::Unknown => Guarded::Loading,
        SessionState::Valid { .. } => Guarded::Allow(view),
        SessionState::Invalid => Guarded::Login,
    }
}

/// Resolves routes against a live session.
#[derive(Clone)]
pub struct RouteGuard {
    session: Arc<SessionContext>,
}

impl RouteGuard {
    pub fn new(session: Arc<SessionContext>) -> Self {
        Self { session }
    }

    /// Public routes pass straight through; protected ones are gated.
    pub fn resolve(&self, route: Route) -> Guarded<Route> {
        if !route.is_protected() {
            return Guarded::Allow(route);
        }
        require_session(&self.session.state(), route)
    }

    /// Wait for the session to leave `Unknown`, then resolve.
    pub async fn resolve_settled(&self, route: Route) -> Guarded<Route> {
        if route.is_protected() {
            let mut rx = self.session.subscribe();
            // A closed channel means the context is gone; resolve with what we have.
            let _ = rx
                .wait_for(|state| !matches!(state, SessionState::Unknown))
                .await;
        }
        self.resolve(route)
    }
}
