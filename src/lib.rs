// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! FitSync client gateway: session lifecycle, authenticated API access, and
//! optimistic local-state reconciliation for the FitSync nutrition app.
//!
//! The crate is the one collaborator every screen shares: the credential
//! store owns the bearer token, the API client wraps every request with it
//! and normalizes the backend's response envelope, and the reconcilers keep
//! optimistic UI state (likes, event attendance, the workout stopwatch)
//! consistent with what the server actually confirmed.

pub mod chat;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod store;
pub mod sync;
pub mod workout;

pub use client::ApiClient;
pub use config::Config;
pub use error::{ApiError, Result};
pub use store::CredentialStore;
