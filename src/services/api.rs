// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Request client for the recipe API.
//!
//! Handles:
//! - Bearer token attachment when a session token exists
//! - Global 401 handling (session cleared, navigation to root)
//! - Error body extraction for user notifications

use crate::config::Config;
use crate::error::{ClientError, GENERIC_FAILURE, UNAUTHORIZED};
use crate::services::session::SessionContext;
use reqwest::{multipart, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Error body shapes the API uses: `{message}` or `{error}`.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Thin HTTP client bound to one session.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: Arc<SessionContext>,
}

impl ApiClient {
    /// Create a client rooted at `{api_url}/api`.
    pub fn new(config: &Config, session: Arc<SessionContext>) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| ClientError::Internal(anyhow::anyhow!("HTTP client init failed: {}", e)))?;

        Ok(Self {
            http,
            base_url: config.api_base(),
            session,
        })
    }

    pub fn session(&self) -> &Arc<SessionContext> {
        &self.session
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Start a request with the bearer token attached when one is stored.
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.http.request(method, self.url(path));
        match self.session.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let response = self.send(self.request(Method::GET, path), path).await?;
        parse_json(response).await
    }

    pub async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let response = self
            .send(self.request(Method::POST, path).json(body), path)
            .await?;
        parse_json(response).await
    }

    /// POST whose response body is irrelevant.
    pub async fn post_unit<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(), ClientError> {
        self.send(self.request(Method::POST, path).json(body), path)
            .await?;
        Ok(())
    }

    /// DELETE, optionally carrying a JSON body.
    pub async fn delete<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: Option<&B>,
    ) -> Result<(), ClientError> {
        let mut builder = self.request(Method::DELETE, path);
        if let Some(body) = body {
            builder = builder.json(body);
        }
        self.send(builder, path).await?;
        Ok(())
    }

    pub async fn post_multipart(
        &self,
        path: &str,
        form: multipart::Form,
    ) -> Result<reqwest::Response, ClientError> {
        self.send(self.request(Method::POST, path).multipart(form), path)
            .await
    }

    pub async fn put_multipart(
        &self,
        path: &str,
        form: multipart::Form,
    ) -> Result<reqwest::Response, ClientError> {
        self.send(self.request(Method::PUT, path).multipart(form), path)
            .await
    }

    /// Send a request and route failures through [`Self::check_response`].
    async fn send(
        &self,
        builder: RequestBuilder,
        path: &str,
    ) -> Result<reqwest::Response, ClientError> {
        let response = builder.send().await.map_err(|e| {
            tracing::warn!(error = %e, path, "Request failed");
            ClientError::from(e)
        })?;
        self.check_response(response, path).await
    }

    /// Check response status and return an error if not successful.
    ///
    /// A 401 ends the session before the error is returned; the caller still
    /// sees the failure and must not assume recovery happened.
    async fn check_response(
        &self,
        response: reqwest::Response,
        path: &str,
    ) -> Result<reqwest::Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = error_message(&body);

        if status == StatusCode::UNAUTHORIZED {
            tracing::warn!(path, "API returned 401, ending session");
            self.session.invalidate();
            return Err(ClientError::Unauthorized(
                message.unwrap_or_else(|| UNAUTHORIZED.to_string()),
            ));
        }

        tracing::warn!(status = status.as_u16(), path, "API error response");
        Err(ClientError::Api {
            status: status.as_u16(),
            message: message.unwrap_or_else(|| GENERIC_FAILURE.to_string()),
        })
    }
}

/// Parse a JSON body; an empty body decodes as JSON `null`.
async fn parse_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
    let bytes = response.bytes().await?;
    let slice: &[u8] = if bytes.iter().all(u8::is_ascii_whitespace) {
        b"null"
    } else {
        &bytes
    };
    serde_json::from_slice(slice).map_err(|e| ClientError::Decode(format!("JSON parse error: {}", e)))
}

/// Pull a human-readable message out of an error body.
fn error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message.or(b.error))
        .filter(|m| !m.trim().is_empty())
}
