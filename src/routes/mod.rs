// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Client route table and navigation events.

use std::fmt;
use tokio::sync::broadcast;

/// Capacity of the navigation event channel. Slow subscribers lose the oldest events.
const NAVIGATION_CHANNEL_CAPACITY: usize = 32;

/// Every view the client knows how to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// `/` login entry point (also the application root)
    Login,
    /// `/register`
    Register,
    /// `/recipes` catalog
    Recipes,
    /// `/recipeform` create a recipe
    RecipeForm,
    /// `/favourite` favorites list
    Favorites,
    /// `/recipes/edit/:id`
    RecipeEdit(u64),
    /// `/recipe/:id` detail, viewable without signing in
    RecipeDetail(u64),
    NotFound(String),
}

impl Route {
    /// Application root, where every session failure lands.
    pub const ROOT: Route = Route::Login;

    /// Parse a path into a route. Trailing slashes and query strings are ignored.
    pub fn parse(path: &str) -> Route {
        let path = path.split(['?', '#']).next().unwrap_or("");
        let trimmed = path.trim_end_matches('/');
        let segments: Vec<&str> = trimmed.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] => Route::Login,
            ["register"] => Route::Register,
            ["recipes"] => Route::Recipes,
            ["recipeform"] => Route::RecipeForm,
            ["favourite"] => Route::Favorites,
            ["recipes", "edit", id] => id
                .parse()
                .map(Route::RecipeEdit)
                .unwrap_or_else(|_| Route::NotFound(path.to_string())),
            ["recipe", id] => id
                .parse()
                .map(Route::RecipeDetail)
                .unwrap_or_else(|_| Route::NotFound(path.to_string())),
            _ => Route::NotFound(path.to_string()),
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Login => "/".to_string(),
            Route::Register => "/register".to_string(),
            Route::Recipes => "/recipes".to_string(),
            Route::RecipeForm => "/recipeform".to_string(),
            Route::Favorites => "/favourite".to_string(),
            Route::RecipeEdit(id) => format!("/recipes/edit/{}", id),
            Route::RecipeDetail(id) => format!("/recipe/{}", id),
            Route::NotFound(path) => path.clone(),
        }
    }

    /// Whether the route requires a valid session.
    pub fn is_protected(&self) -> bool {
        matches!(
            self,
            Route::Recipes | Route::RecipeForm | Route::Favorites | Route::RecipeEdit(_)
        )
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Publishes navigation requests to whoever renders views.
#[derive(Clone)]
pub struct Navigator {
    tx: broadcast::Sender<Route>,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigator {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(NAVIGATION_CHANNEL_CAPACITY);
        Self { tx }
    }

    pub fn navigate(&self, route: Route) {
        tracing::debug!(path = %route, "Navigating");
        // No subscribers is fine (e.g. a headless CLI run).
        let _ = self.tx.send(route);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Route> {
        self.tx.subscribe()
    }
}
