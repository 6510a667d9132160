// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Three-step OTP flow shared by registration and password reset.
//!
//! `CollectEmail -> VerifyCode -> SetCredential -> (complete) CollectEmail`,
//! with "edit email" as the only backward edge. A failed remote call never
//! moves the flow.

use crate::error::{ClientError, Result};
use crate::services::password::{strength_score, MIN_ACCEPTED_SCORE};
use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;
use validator::ValidateEmail;

/// Wait between OTP sends.
pub const RESEND_COOLDOWN: Duration = Duration::from_secs(120);

/// Number of digits in an emailed code.
pub const OTP_LENGTH: usize = 6;

/// Which account operation the flow finishes with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OtpPurpose {
    Registration,
    PasswordReset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OtpStep {
    CollectEmail,
    VerifyCode,
    SetCredential,
}

/// Remote operations the flow depends on.
pub trait OtpApi {
    /// Email a fresh code to `email`.
    fn request_otp(&self, purpose: OtpPurpose, email: &str)
        -> impl Future<Output = Result<()>> + Send;

    /// Check `code` for `email`.
    fn verify_otp(&self, email: &str, code: &str) -> impl Future<Output = Result<()>> + Send;

    /// Create the account or reset the password. Returns the server's message.
    fn set_credential(
        &self,
        purpose: OtpPurpose,
        email: &str,
        password: &str,
    ) -> impl Future<Output = Result<String>> + Send;
}

/// OTP flow controller.
pub struct OtpFlow<A> {
    api: A,
    purpose: OtpPurpose,
    step: OtpStep,
    email: String,
    resend_available_at: Option<Instant>,
}

impl<A: OtpApi> OtpFlow<A> {
    pub fn new(api: A, purpose: OtpPurpose) -> Self {
        Self {
            api,
            purpose,
            step: OtpStep::CollectEmail,
            email: String::new(),
            resend_available_at: None,
        }
    }

    pub fn step(&self) -> OtpStep {
        self.step
    }

    pub fn purpose(&self) -> OtpPurpose {
        self.purpose
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Time left before a resend is allowed; zero once it is.
    pub fn resend_remaining(&self) -> Duration {
        self.resend_available_at
            .map(|at| at.saturating_duration_since(Instant::now()))
            .unwrap_or_default()
    }

    pub fn can_resend(&self) -> bool {
        self.step == OtpStep::VerifyCode && self.resend_remaining().is_zero()
    }

    /// Send the first code and move to `VerifyCode`.
    pub async fn request_otp(&mut self, email: &str) -> Result<()> {
        self.expect_step(OtpStep::CollectEmail, "request a code")?;

        let email = email.trim();
        if !email.validate_email() {
            return Err(ClientError::Validation(
                "Please input a valid email address".to_string(),
            ));
        }

        self.api.request_otp(self.purpose, email).await?;

        self.email = email.to_string();
        self.step = OtpStep::VerifyCode;
        self.start_cooldown();
        tracing::info!(purpose = ?self.purpose, "OTP sent");
        Ok(())
    }

    /// Send another code once the cooldown has elapsed.
    pub async fn resend(&mut self) -> Result<()> {
        self.expect_step(OtpStep::VerifyCode, "resend a code")?;

        let remaining = self.resend_remaining();
        if !remaining.is_zero() {
            return Err(ClientError::Validation(format!(
                "Resend OTP in {} seconds",
                remaining.as_secs_f64().ceil() as u64
            )));
        }

        self.api.request_otp(self.purpose, &self.email).await?;
        self.start_cooldown();
        tracing::info!(purpose = ?self.purpose, "OTP resent");
        Ok(())
    }

    /// Check the emailed code and move to `SetCredential`.
    pub async fn verify(&mut self, code: &str) -> Result<()> {
        self.expect_step(OtpStep::VerifyCode, "verify a code")?;

        let code = code.trim();
        if code.len() != OTP_LENGTH || !code.chars().all(|c| c.is_ascii_digit()) {
            return Err(ClientError::Validation(format!(
                "The code must be {} digits",
                OTP_LENGTH
            )));
        }

        self.api.verify_otp(&self.email, code).await?;
        self.step = OtpStep::SetCredential;
        tracing::info!(purpose = ?self.purpose, "OTP verified");
        Ok(())
    }

    /// Go back to change the email address.
    pub fn edit_email(&mut self) -> Result<()> {
        self.expect_step(OtpStep::VerifyCode, "edit the email")?;
        self.step = OtpStep::CollectEmail;
        self.resend_available_at = None;
        Ok(())
    }

    /// Submit the new credential. On success the flow resets for reuse and
    /// the server's confirmation message is returned.
    pub async fn submit_credential(&mut self, password: &str, confirmation: &str) -> Result<String> {
        self.expect_step(OtpStep::SetCredential, "set a password")?;

        if password != confirmation {
            return Err(ClientError::Validation("Passwords do not match!".to_string()));
        }
        if strength_score(password) < MIN_ACCEPTED_SCORE {
            return Err(ClientError::Validation(
                "Password is too weak: use at least 8 characters with uppercase letters, digits, or symbols"
                    .to_string(),
            ));
        }

        let message = self
            .api
            .set_credential(self.purpose, &self.email, password)
            .await?;

        tracing::info!(purpose = ?self.purpose, "OTP flow complete");
        self.reset();
        Ok(message)
    }

    /// Return to `CollectEmail` with no remembered email.
    pub fn reset(&mut self) {
        self.step = OtpStep::CollectEmail;
        self.email.clear();
        self.resend_available_at = None;
    }

    fn start_cooldown(&mut self) {
        self.resend_available_at = Some(Instant::now() + RESEND_COOLDOWN);
    }

    fn expect_step(&self, step: OtpStep, action: &str) -> Result<()> {
        if self.step == step {
            Ok(())
        } else {
            Err(ClientError::InvalidState(format!(
                "Cannot {} while in {:?}",
                action, self.step
            )))
        }
    }
}
