//! Account models for the auth endpoints.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Body of `POST /login`.
#[derive(Debug, Clone, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[validate(email(message = "Please input a valid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "Please input your password"))]
    pub password: String,
    /// Mirrors the "remember me" choice so the server can pick a lifetime
    pub remember_me: bool,
}

/// Successful login response. The token is nested one level deep.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: IssuedToken,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IssuedToken {
    pub token: String,
}

/// Current user lookup (`GET /data/useremail`).
#[derive(Debug, Clone, Deserialize)]
pub struct UserEmail {
    pub email_id: String,
}

/// Generic `{success, message}` acknowledgement used by the OTP endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Ack {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
}
