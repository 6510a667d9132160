// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::Router;
use chrono::{DateTime, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use recipe_client::config::Config;
use recipe_client::routes::Navigator;
use recipe_client::services::{SessionContext, TokenStore};
use recipe_client::storage::MemoryStore;
use recipe_client::time_utils::FixedClock;
use recipe_client::RecipeApp;
use serde::Serialize;
use std::sync::Arc;

/// Fixed "now" used by tests that drive the session clock.
#[allow(dead_code)]
pub fn test_now() -> DateTime<Utc> {
    DateTime::from_timestamp(1_767_225_600, 0).unwrap() // 2026-01-01T00:00:00Z
}

/// Create a signed test JWT expiring at `exp` (Unix seconds).
#[allow(dead_code)]
pub fn create_test_jwt(exp: i64) -> String {
    #[derive(Serialize)]
    struct Claims {
        sub: String,
        exp: i64,
        iat: i64,
    }

    let claims = Claims {
        sub: "42".to_string(),
        exp,
        iat: exp - 3600,
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(b"server_side_key_the_client_never_sees"),
    )
    .unwrap()
}

/// A JWT valid for an hour of real time.
#[allow(dead_code)]
pub fn create_live_jwt() -> String {
    create_test_jwt(Utc::now().timestamp() + 3600)
}

/// Storage areas kept visible to the test.
#[allow(dead_code)]
pub struct TestStores {
    pub durable: Arc<MemoryStore>,
    pub session: Arc<MemoryStore>,
}

#[allow(dead_code)]
impl TestStores {
    pub fn new() -> Self {
        Self {
            durable: Arc::new(MemoryStore::new()),
            session: Arc::new(MemoryStore::new()),
        }
    }

    pub fn token_store(&self) -> TokenStore {
        TokenStore::new(self.durable.clone(), self.session.clone())
    }

    pub fn both_empty(&self) -> bool {
        use recipe_client::storage::{keys, KeyValueStore};
        self.durable.get(keys::TOKEN).unwrap().is_none()
            && self.session.get(keys::TOKEN).unwrap().is_none()
    }
}

/// Session context on memory stores with the clock frozen at [`test_now`].
#[allow(dead_code)]
pub fn test_session(stores: &TestStores, navigator: Navigator) -> SessionContext {
    SessionContext::new(
        stores.token_store(),
        navigator,
        Arc::new(FixedClock(test_now())),
    )
}

/// Serve `router` on an ephemeral local port and return its base URL.
#[allow(dead_code)]
pub async fn spawn_api(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

/// App wired to a mock API at `api_url`, using real time and memory stores.
#[allow(dead_code)]
pub fn create_test_app(api_url: &str, stores: &TestStores, navigator: Navigator) -> RecipeApp {
    let config = Config {
        api_url: api_url.to_string(),
        ..Config::default()
    };
    RecipeApp::with_parts(
        config,
        stores.durable.clone(),
        stores.session.clone(),
        navigator,
        Arc::new(recipe_client::time_utils::SystemClock),
    )
    .expect("Failed to build test app")
}
