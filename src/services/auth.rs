// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Account endpoints: sign in/out, OTP, registration, password reset.

use crate::error::{ClientError, Result, GENERIC_FAILURE};
use crate::models::user::Ack;
use crate::models::{LoginRequest, LoginResponse, UserEmail};
use crate::services::api::ApiClient;
use crate::services::otp::{OtpApi, OtpFlow, OtpPurpose};
use crate::services::session::SessionState;
use serde::Serialize;
use validator::Validate;

const INVALID_OTP: &str = "Invalid OTP. Please try again.";

#[derive(Serialize)]
struct EmailBody<'a> {
    email: &'a str,
}

#[derive(Serialize)]
struct VerifyBody<'a> {
    email: &'a str,
    otp: &'a str,
}

#[derive(Serialize)]
struct CredentialBody<'a> {
    email: &'a str,
    password: &'a str,
}

/// Account operations over the shared request client.
#[derive(Clone)]
pub struct AuthService {
    api: ApiClient,
}

impl AuthService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Sign in and start a session.
    ///
    /// With `remember` the token survives restarts; otherwise it lives only
    /// as long as this process.
    pub async fn login(&self, email: &str, password: &str, remember: bool) -> Result<SessionState> {
        let request = LoginRequest {
            email: email.trim().to_string(),
            password: password.to_string(),
            remember_me: remember,
        };
        request.validate()?;

        let response: LoginResponse = self.api.post_json("/login", &request).await?;
        if response.token.token.is_empty() {
            return Err(ClientError::Decode("Login response has an empty token".to_string()));
        }

        let session = self.api.session();
        let state = session.login(&response.token.token, remember);
        if !state.is_valid() {
            return Err(ClientError::Decode(
                "Server issued an unusable token".to_string(),
            ));
        }
        // A previous user's cached email must not leak into this session.
        session.tokens().clear_cached_email();
        tracing::info!(remember, "Signed in");
        Ok(state)
    }

    pub fn logout(&self) {
        self.api.session().logout();
    }

    /// Email of the signed-in user, from cache or the API.
    pub async fn current_email(&self) -> Result<String> {
        let tokens = self.api.session().tokens();
        if let Some(email) = tokens.cached_email() {
            return Ok(email);
        }

        let user: UserEmail = self.api.get_json("/data/useremail").await?;
        tokens.cache_email(&user.email_id);
        Ok(user.email_id)
    }

    /// Registration flow bound to this service.
    pub fn registration(&self) -> OtpFlow<AuthService> {
        OtpFlow::new(self.clone(), OtpPurpose::Registration)
    }

    /// Password reset flow bound to this service.
    pub fn password_reset(&self) -> OtpFlow<AuthService> {
        OtpFlow::new(self.clone(), OtpPurpose::PasswordReset)
    }
}

impl OtpApi for AuthService {
    async fn request_otp(&self, purpose: OtpPurpose, email: &str) -> Result<()> {
        let path = match purpose {
            OtpPurpose::Registration => "/send-otp",
            OtpPurpose::PasswordReset => "/forgot-pass-otp",
        };
        let ack: Option<Ack> = self.api.post_json(path, &EmailBody { email }).await?;
        require_success(ack, GENERIC_FAILURE)
    }

    async fn verify_otp(&self, email: &str, code: &str) -> Result<()> {
        let ack: Option<Ack> = self
            .api
            .post_json("/verify-otp", &VerifyBody { email, otp: code })
            .await?;
        require_success(ack, INVALID_OTP)
    }

    async fn set_credential(&self, purpose: OtpPurpose, email: &str, password: &str) -> Result<String> {
        let (path, done) = match purpose {
            OtpPurpose::Registration => ("/register", "Registration successful"),
            OtpPurpose::PasswordReset => ("/reset-password", "Password reset successful"),
        };
        let ack: Option<Ack> = self
            .api
            .post_json(path, &CredentialBody { email, password })
            .await?;
        let message = ack
            .as_ref()
            .and_then(|a| a.message.clone())
            .unwrap_or_else(|| done.to_string());
        check_ack(ack, GENERIC_FAILURE)?;
        Ok(message)
    }
}

/// The OTP endpoints answer 200 either way; only `success: true` counts.
fn require_success(ack: Option<Ack>, fallback: &str) -> Result<()> {
    let ack = ack.unwrap_or_default();
    if ack.success == Some(true) {
        return Ok(());
    }
    Err(ClientError::Api {
        status: 200,
        message: ack.message.unwrap_or_else(|| fallback.to_string()),
    })
}

/// `{success: false}` is a failure even on a 2xx status. A missing flag is success.
fn check_ack(ack: Option<Ack>, fallback: &str) -> Result<()> {
    let ack = ack.unwrap_or_default();
    if ack.success == Some(false) {
        return Err(ClientError::Api {
            status: 200,
            message: ack.message.unwrap_or_else(|| fallback.to_string()),
        });
    }
    Ok(())
}

/// Capitalized local part of an email, for greeting the user.
pub fn display_name(email: &str) -> String {
    let local = email.split('@').next().unwrap_or_default();
    let mut chars = local.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
