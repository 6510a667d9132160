// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Recipe client: session-aware access to a remote recipe management API.
//!
//! This crate provides sign-in with expiry-driven logout, OTP-verified
//! registration and password reset, recipe CRUD, favorites, and a locally
//! searchable catalog.

pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod storage;
pub mod time_utils;

use config::Config;
use error::ClientError;
use middleware::RouteGuard;
use routes::Navigator;
use services::{ApiClient, AuthService, FavoriteToggle, RecipeService, SessionContext, TokenStore};
use std::sync::Arc;
use storage::{FileStore, KeyValueStore, MemoryStore};
use time_utils::{Clock, SystemClock};

/// Shared application state.
pub struct RecipeApp {
    pub config: Config,
    pub session: Arc<SessionContext>,
    pub guard: RouteGuard,
    pub auth: AuthService,
    pub recipes: RecipeService,
}

impl RecipeApp {
    /// Build the app with a durable store under `config.data_dir`.
    pub fn new(config: Config) -> Result<Self, ClientError> {
        let durable = FileStore::open(&config.data_dir)?;
        Self::with_parts(
            config,
            Arc::new(durable),
            Arc::new(MemoryStore::new()),
            Navigator::new(),
            Arc::new(SystemClock),
        )
    }

    /// Build the app from explicit storage areas, navigator, and clock.
    pub fn with_parts(
        config: Config,
        durable: Arc<dyn KeyValueStore>,
        session_area: Arc<dyn KeyValueStore>,
        navigator: Navigator,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, ClientError> {
        let tokens = TokenStore::new(durable, session_area);
        let session = Arc::new(SessionContext::new(tokens, navigator, clock));
        let api = ApiClient::new(&config, Arc::clone(&session))?;

        Ok(Self {
            guard: RouteGuard::new(Arc::clone(&session)),
            auth: AuthService::new(api.clone()),
            recipes: RecipeService::new(api),
            session,
            config,
        })
    }

    /// Favorite toggle for a newly shown view.
    pub fn favorites(&self) -> FavoriteToggle<RecipeService> {
        FavoriteToggle::new(self.recipes.clone())
    }
}
