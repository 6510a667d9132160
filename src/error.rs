// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Client error types with consistent user-facing messages.

/// Fallback notification text when the server gives no usable message.
pub const GENERIC_FAILURE: &str = "An unexpected error occurred. Please try again.";

/// Placeholder carried by a 401 whose body had no message.
pub const UNAUTHORIZED: &str = "Unauthorized";

/// Shown for a 401 without a server explanation.
pub const SESSION_EXPIRED: &str = "Your session has expired. Please sign in again.";

/// Client error type. Every variant degrades to a notification; none are fatal.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Rejected locally before any remote call.
    #[error("Invalid input: {0}")]
    Validation(String),

    /// Remote call failed with a status other than 401.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Remote call returned 401. The session has already been cleared.
    #[error("Authentication required: {0}")]
    Unauthorized(String),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Transport error: {0}")]
    Transport(String),

    /// A flow operation was called in the wrong step.
    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Favorite toggle already in flight for recipe {0}")]
    ToggleInFlight(u64),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl ClientError {
    /// True for the 401 class, which is handled globally by the request client.
    pub fn is_session_error(&self) -> bool {
        matches!(self, ClientError::Unauthorized(_))
    }

    /// True if the error was raised locally without contacting the API.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            ClientError::Validation(_)
                | ClientError::InvalidState(_)
                | ClientError::ToggleInFlight(_)
        )
    }

    /// Text suitable for a user notification.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Validation(msg) => msg.clone(),
            ClientError::Api { message, .. } if !message.is_empty() => message.clone(),
            ClientError::Unauthorized(msg) if !msg.is_empty() && msg != UNAUTHORIZED => msg.clone(),
            ClientError::Unauthorized(_) => SESSION_EXPIRED.to_string(),
            ClientError::ToggleInFlight(_) => "Please wait for the previous update.".into(),
            ClientError::InvalidState(msg) => msg.clone(),
            _ => GENERIC_FAILURE.to_string(),
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else {
            ClientError::Transport(err.to_string())
        }
    }
}

impl From<validator::ValidationErrors> for ClientError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let fields: Vec<String> = errors
            .field_errors()
            .into_iter()
            .map(|(field, errs)| {
                errs.iter()
                    .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
                    .unwrap_or_else(|| format!("{} is invalid", field))
            })
            .collect();
        ClientError::Validation(fields.join("; "))
    }
}

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;
