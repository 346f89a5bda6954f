// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Persistent credential store.
//!
//! Holds exactly two entries under the state directory: the bearer token
//! (`auth_token`, sole authority for "is there a session") and an advisory
//! cached copy of the user profile (`user_profile.json`). The token is
//! written first so a crash between the two writes can never produce a
//! profile without a token. Storage failures on the read path collapse to
//! "no session": the worst outcome is a forced re-login, never a crash.

use std::fs;
use std::path::{Path, PathBuf};

use crate::models::UserProfile;

const TOKEN_FILE: &str = "auth_token";
const PROFILE_FILE: &str = "user_profile.json";

/// File-backed store for the single FitSync session.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    dir: PathBuf,
}

impl CredentialStore {
    /// Create a store rooted at `dir`. The directory is created lazily on
    /// the first `save`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Persist a session. The token write is authoritative; a profile write
    /// failure is logged and tolerated (the profile is a cache only).
    pub fn save(&self, token: &str, profile: &UserProfile) -> std::io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.token_path(), token)?;

        match serde_json::to_vec_pretty(profile) {
            Ok(bytes) => {
                if let Err(e) = fs::write(self.profile_path(), bytes) {
                    tracing::warn!(error = %e, "Failed to cache user profile, continuing anyway");
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to serialize user profile, continuing anyway");
            }
        }

        tracing::debug!(dir = %self.dir.display(), "Session persisted");
        Ok(())
    }

    /// Load the persisted token, if any. Fails closed: any storage error is
    /// logged and reported as "no session".
    pub fn load(&self) -> Option<String> {
        match fs::read_to_string(self.token_path()) {
            Ok(token) => {
                let token = token.trim().to_string();
                if token.is_empty() {
                    None
                } else {
                    Some(token)
                }
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read auth token, treating as signed out");
                None
            }
        }
    }

    /// Load the cached profile, if present and still parseable.
    pub fn load_profile(&self) -> Option<UserProfile> {
        let bytes = match fs::read(self.profile_path()) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read cached profile");
                return None;
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(profile) => Some(profile),
            Err(e) => {
                tracing::warn!(error = %e, "Cached profile is not parseable, ignoring");
                None
            }
        }
    }

    /// Remove both entries. Idempotent: missing files are not an error.
    pub fn clear(&self) {
        for path in [self.token_path(), self.profile_path()] {
            if let Err(e) = fs::remove_file(&path) {
                if e.kind() != std::io::ErrorKind::NotFound {
                    tracing::warn!(path = %path.display(), error = %e, "Failed to remove credential file");
                }
            }
        }
    }

    /// True if a token is currently persisted.
    pub fn has_session(&self) -> bool {
        self.load().is_some()
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn token_path(&self) -> PathBuf {
        self.dir.join(TOKEN_FILE)
    }

    fn profile_path(&self) -> PathBuf {
        self.dir.join(PROFILE_FILE)
    }
}
