// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Error taxonomy for the FitSync gateway.
//!
//! Every failure a caller can see is one of five kinds. None of them is
//! retried automatically and none is fatal to the process: the screen clears
//! its loading flag, shows `user_message()`, and lets the user re-trigger.

/// Gateway error type shared by every API operation.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The server answered 401. The credential store has already been
    /// cleared by the time this surfaces; the caller must route to login.
    #[error("Session expired, please sign in again")]
    AuthExpired,

    /// Local input validation failed before any network call was made.
    #[error("Invalid input: {0}")]
    Validation(String),

    /// Non-2xx response with a parseable `{success, message}` envelope.
    #[error("Request rejected ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// The request never completed (DNS, connect, timeout).
    #[error("Connection error: {0}")]
    Connectivity(String),

    /// Anything else, e.g. a body that is not parseable JSON.
    #[error("Unexpected error: {0}")]
    Unexpected(#[from] anyhow::Error),
}

impl ApiError {
    /// True when the caller must discard its session and route to login.
    pub fn is_auth_expired(&self) -> bool {
        matches!(self, ApiError::AuthExpired)
    }

    /// True when the request never reached the server.
    pub fn is_connectivity(&self) -> bool {
        matches!(self, ApiError::Connectivity(_))
    }

    /// The single user-facing alert line for this error kind.
    ///
    /// Validation and rejection messages carry their own text; the rest get
    /// a generic recovery instruction.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::AuthExpired => "Your session has expired. Please sign in again.".to_string(),
            ApiError::Validation(msg) => msg.clone(),
            ApiError::Rejected { message, .. } if !message.is_empty() => message.clone(),
            ApiError::Rejected { .. } => "Something went wrong. Please try again.".to_string(),
            ApiError::Connectivity(_) => {
                "Unable to connect. Please check your internet connection and try again."
                    .to_string()
            }
            ApiError::Unexpected(_) => "Something went wrong. Please try again.".to_string(),
        }
    }
}

/// Result type alias for gateway operations.
pub type Result<T> = std::result::Result<T, ApiError>;
