// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Registration, password reset, and recipe endpoints against a recording
//! mock of the recipe API.
//!
//! Every request is logged with its method, path, and JSON body so tests can
//! assert exactly what went over the wire.

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, Method, StatusCode, Uri},
    Json, Router,
};
use recipe_client::error::ClientError;
use recipe_client::models::RecipeDraft;
use recipe_client::routes::Navigator;
use recipe_client::services::OtpStep;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

mod common;
use common::{create_test_app, spawn_api, TestStores};

#[derive(Debug, Clone)]
struct Recorded {
    method: Method,
    path: String,
    body: Value,
    content_type: String,
}

/// Request log plus canned replies keyed by path. Unlisted paths answer
/// `{"success": true}`.
#[derive(Clone, Default)]
struct MockApi {
    log: Arc<Mutex<Vec<Recorded>>>,
    replies: Arc<Mutex<HashMap<String, Value>>>,
}

impl MockApi {
    fn reply(&self, path: &str, body: Value) -> &Self {
        self.replies.lock().unwrap().insert(path.to_string(), body);
        self
    }

    fn requests(&self) -> Vec<Recorded> {
        self.log.lock().unwrap().clone()
    }

    fn paths(&self) -> Vec<String> {
        self.requests().into_iter().map(|r| r.path).collect()
    }

    async fn start(&self) -> String {
        let router = Router::new().fallback(record).with_state(self.clone());
        spawn_api(router).await
    }
}

async fn record(
    State(mock): State<MockApi>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, Json<Value>) {
    let path = uri.path().to_string();
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|h| h.to_str().ok())
        .unwrap_or_default()
        .to_string();
    mock.log.lock().unwrap().push(Recorded {
        method,
        path: path.clone(),
        body: serde_json::from_slice(&body).unwrap_or(Value::Null),
        content_type,
    });

    let reply = mock
        .replies
        .lock()
        .unwrap()
        .get(&path)
        .cloned()
        .unwrap_or_else(|| json!({"success": true}));
    (StatusCode::OK, Json(reply))
}

#[tokio::test]
async fn test_registration_flow_over_http() {
    let mock = MockApi::default();
    mock.reply("/api/register", json!({"message": "Registration successful"}));
    let url = mock.start().await;
    let stores = TestStores::new();
    let app = create_test_app(&url, &stores, Navigator::new());

    let mut flow = app.auth.registration();
    flow.request_otp(" cook@example.com ").await.unwrap();
    assert_eq!(flow.step(), OtpStep::VerifyCode);
    flow.verify("123456").await.unwrap();
    assert_eq!(flow.step(), OtpStep::SetCredential);
    let message = flow
        .submit_credential("Str0ng!pass", "Str0ng!pass")
        .await
        .unwrap();
    assert_eq!(message, "Registration successful");
    assert_eq!(flow.step(), OtpStep::CollectEmail);

    let requests = mock.requests();
    assert_eq!(
        mock.paths(),
        vec!["/api/send-otp", "/api/verify-otp", "/api/register"]
    );
    assert!(requests.iter().all(|r| r.method == Method::POST));
    assert_eq!(requests[0].body, json!({"email": "cook@example.com"}));
    assert_eq!(
        requests[1].body,
        json!({"email": "cook@example.com", "otp": "123456"})
    );
    assert_eq!(
        requests[2].body,
        json!({"email": "cook@example.com", "password": "Str0ng!pass"})
    );
}

#[tokio::test]
async fn test_password_reset_flow_over_http() {
    let mock = MockApi::default();
    // No message: the default confirmation is used.
    mock.reply("/api/reset-password", json!({}));
    let url = mock.start().await;
    let stores = TestStores::new();
    let app = create_test_app(&url, &stores, Navigator::new());

    let mut flow = app.auth.password_reset();
    flow.request_otp("cook@example.com").await.unwrap();
    flow.verify("654321").await.unwrap();
    let message = flow
        .submit_credential("N3w-Secret", "N3w-Secret")
        .await
        .unwrap();
    assert_eq!(message, "Password reset successful");

    assert_eq!(
        mock.paths(),
        vec!["/api/forgot-pass-otp", "/api/verify-otp", "/api/reset-password"]
    );
    assert_eq!(
        mock.requests()[2].body,
        json!({"email": "cook@example.com", "password": "N3w-Secret"})
    );
}

#[tokio::test]
async fn test_send_otp_without_success_flag_does_not_advance() {
    let mock = MockApi::default();
    mock.reply("/api/send-otp", json!({"message": "Mail service down"}));
    let url = mock.start().await;
    let stores = TestStores::new();
    let app = create_test_app(&url, &stores, Navigator::new());

    let mut flow = app.auth.registration();
    let err = flow.request_otp("cook@example.com").await.unwrap_err();

    assert_eq!(err.user_message(), "Mail service down");
    assert_eq!(flow.step(), OtpStep::CollectEmail);
    assert!(flow.resend_remaining().is_zero(), "no cooldown without a send");
}

#[tokio::test]
async fn test_verify_without_success_flag_does_not_advance() {
    let mock = MockApi::default();
    mock.reply("/api/verify-otp", json!({}));
    let url = mock.start().await;
    let stores = TestStores::new();
    let app = create_test_app(&url, &stores, Navigator::new());

    let mut flow = app.auth.password_reset();
    flow.request_otp("cook@example.com").await.unwrap();
    let err = flow.verify("000000").await.unwrap_err();

    assert_eq!(err.user_message(), "Invalid OTP. Please try again.");
    assert_eq!(flow.step(), OtpStep::VerifyCode);
}

#[tokio::test]
async fn test_register_rejection_keeps_flow_at_credential_step() {
    let mock = MockApi::default();
    mock.reply(
        "/api/register",
        json!({"success": false, "message": "Email already registered"}),
    );
    let url = mock.start().await;
    let stores = TestStores::new();
    let app = create_test_app(&url, &stores, Navigator::new());

    let mut flow = app.auth.registration();
    flow.request_otp("cook@example.com").await.unwrap();
    flow.verify("123456").await.unwrap();
    let err = flow
        .submit_credential("Str0ng!pass", "Str0ng!pass")
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Api { .. }));
    assert_eq!(err.user_message(), "Email already registered");
    assert_eq!(flow.step(), OtpStep::SetCredential);
    assert_eq!(flow.email(), "cook@example.com");
}

#[tokio::test]
async fn test_recipe_read_and_update_endpoints() {
    let mock = MockApi::default();
    mock.reply(
        "/api/data/recipe/5",
        json!({
            "RecipeID": 5,
            "RecipeName": "Shakshuka",
            "Ingredients": "[\"eggs\",\"tomatoes\"]",
            "Servings": 2,
            "ImagePath": "/uploads/5.png"
        }),
    )
    .reply(
        "/api/data/userfavorites",
        json!([{"RecipeID": 5, "RecipeName": "Shakshuka"}]),
    );
    let url = mock.start().await;
    let stores = TestStores::new();
    let app = create_test_app(&url, &stores, Navigator::new());

    let recipe = app.recipes.get_recipe(5).await.unwrap();
    assert_eq!(recipe.name, "Shakshuka");
    assert_eq!(recipe.ingredients, vec!["eggs", "tomatoes"]);
    assert_eq!(recipe.servings, Some(2));

    let favorites = app.recipes.list_favorites().await.unwrap();
    assert_eq!(favorites.len(), 1);
    assert_eq!(favorites[0].id, 5);

    let mut draft = RecipeDraft::from_recipe(&recipe);
    draft.name = "Green Shakshuka".into();
    app.recipes.update_recipe(5, &draft).await.unwrap();

    let requests = mock.requests();
    assert_eq!(requests[0].method, Method::GET);
    assert_eq!(requests[0].path, "/api/data/recipe/5");
    assert_eq!(requests[1].method, Method::GET);
    assert_eq!(requests[1].path, "/api/data/userfavorites");
    assert_eq!(requests[2].method, Method::PUT);
    assert_eq!(requests[2].path, "/api/data/recipe/edit/5");
    assert!(requests[2].content_type.starts_with("multipart/form-data"));
}

#[tokio::test]
async fn test_add_category_and_tag_bodies() {
    let mock = MockApi::default();
    let url = mock.start().await;
    let stores = TestStores::new();
    let app = create_test_app(&url, &stores, Navigator::new());

    let name = app.recipes.add_category("  Dessert ", &[]).await.unwrap();
    assert_eq!(name, "Dessert");
    app.recipes.add_tag("Quick", &[]).await.unwrap();

    let requests = mock.requests();
    assert_eq!(requests[0].path, "/api/data/categories");
    assert_eq!(requests[0].body, json!({"categoryName": "Dessert"}));
    assert_eq!(requests[1].path, "/api/data/tags");
    assert_eq!(requests[1].body, json!({"tagName": "Quick"}));
}
