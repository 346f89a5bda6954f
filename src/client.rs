// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Authenticated HTTP client for the FitSync backend.
//!
//! Handles:
//! - Bearer-token attachment from the credential store
//! - `{success, message, data}` envelope normalization
//! - The app-wide 401 policy (clear the store, surface `AuthExpired`)
//! - One typed method per backend endpoint
//!
//! There is no retry and no token refresh anywhere: token lifetime is
//! entirely server-controlled and the client only learns about expiry
//! through a 401.

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::Value;
use validator::Validate;

use crate::config::Config;
use crate::error::{ApiError, Result};
use crate::models::{
    ActivitiesPage, ActivityResult, AuthSession, DailyStats, Event, LoginRequest, MealEntry,
    MealLogResult, MealPlan, ProfileUpdate, RegisterRequest, UserProfile,
};
use crate::store::CredentialStore;

/// FitSync API client. Cheap to clone; the underlying connection pool is
/// shared.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    store: CredentialStore,
}

impl ApiClient {
    /// Build a client from config, sharing the given credential store.
    pub fn new(config: &Config, store: CredentialStore) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ApiError::Unexpected(anyhow::anyhow!("HTTP client build failed: {e}")))?;

        Ok(Self {
            http,
            base_url: config.api_base_url.clone(),
            store,
        })
    }

    /// The credential store backing this client.
    pub fn store(&self) -> &CredentialStore {
        &self.store
    }

    // ─── Auth ────────────────────────────────────────────────────────────

    /// Log in and persist the session (token first, profile as cache).
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthSession> {
        let req = LoginRequest {
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        validate(&req)?;

        let body = self
            .request(Method::POST, "/users/login", Some(to_body(&req)?), false)
            .await?;
        let session: AuthSession = extract_data(body)?;
        self.persist_session(&session)?;

        tracing::info!(user = %session.user.first_name(), "Logged in");
        Ok(session)
    }

    /// Register a new account and persist the session.
    pub async fn register(&self, req: &RegisterRequest) -> Result<AuthSession> {
        validate(req)?;

        let body = self
            .request(Method::POST, "/users/register", Some(to_body(req)?), false)
            .await?;
        let session: AuthSession = extract_data(body)?;
        self.persist_session(&session)?;

        tracing::info!(user = %session.user.first_name(), "Account created");
        Ok(session)
    }

    /// Drop the local session. Idempotent; the server is not notified
    /// (tokens are invalidated server-side on their own schedule).
    pub fn logout(&self) {
        self.store.clear();
        tracing::info!("Logged out");
    }

    // ─── Profile ─────────────────────────────────────────────────────────

    /// Fetch the authoritative user profile.
    pub async fn profile(&self) -> Result<UserProfile> {
        let body = self.request(Method::GET, "/users/profile", None, true).await?;
        extract_field(body, "user")
    }

    /// Update the profile. Only the fields present in `update` are sent;
    /// the server's response is the new authoritative profile.
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<UserProfile> {
        if update.name.trim().is_empty() || update.email.trim().is_empty() {
            return Err(ApiError::Validation(
                "Name and email are required".to_string(),
            ));
        }

        let body = self
            .request(Method::PUT, "/users/update", Some(to_body(update)?), true)
            .await?;
        extract_field(body, "user")
    }

    // ─── Dashboard & activities ──────────────────────────────────────────

    /// Fetch today's aggregate stats.
    pub async fn daily_stats(&self) -> Result<DailyStats> {
        let body = self
            .request(Method::GET, "/dashboard/getdailystats", None, true)
            .await?;
        extract_data(body)
    }

    /// Fetch the activity log with the server's summary and pagination.
    pub async fn activities(&self) -> Result<ActivitiesPage> {
        let body = self.request(Method::GET, "/stats/activities", None, true).await?;
        extract_data(body)
    }

    /// Log a completed activity. Calories and suggestions come back from the
    /// server; nothing is computed locally.
    pub async fn log_activity(&self, activity: &str, minutes: u32) -> Result<ActivityResult> {
        let name = activity.trim().to_lowercase();
        if name.is_empty() {
            return Err(ApiError::Validation(
                "Please enter a workout name".to_string(),
            ));
        }

        let payload = serde_json::json!({ "activity": name, "minutes": minutes });
        let body = self
            .request(Method::POST, "/stats/activity", Some(payload), true)
            .await?;
        extract_data(body)
    }

    // ─── Meals ───────────────────────────────────────────────────────────

    /// Fetch all logged meal plans.
    pub async fn meal_plans(&self) -> Result<Vec<MealPlan>> {
        let body = self.request(Method::GET, "/stats/meals", None, true).await?;
        extract_field(body, "mealPlans")
    }

    /// Fetch the meal plan for one date (`YYYY-MM-DD`).
    pub async fn meal_plan_for(&self, date: &str) -> Result<MealPlan> {
        let path = format!("/stats/meals/{date}");
        let body = self.request(Method::GET, &path, None, true).await?;
        extract_field(body, "mealPlan")
    }

    /// Log a day's meals. Validation requires at least one non-empty meal,
    /// not all three.
    pub async fn log_meal(&self, entry: MealEntry) -> Result<MealLogResult> {
        let payload = entry.into_body()?;
        let body = self
            .request(Method::POST, "/stats/meal", Some(payload), true)
            .await?;
        extract_data(body)
    }

    /// Set the weight goal. The suggestion payload shape is not stable
    /// across backend versions, so it is returned as raw JSON.
    pub async fn set_weight_goal(&self, target_weight_kg: f64) -> Result<Value> {
        if target_weight_kg <= 0.0 {
            return Err(ApiError::Validation(
                "Please enter a valid target weight".to_string(),
            ));
        }

        let payload = serde_json::json!({ "targetWeight": target_weight_kg });
        let body = self
            .request(Method::POST, "/stats/weight-goal", Some(payload), true)
            .await?;
        extract_data(body)
    }

    // ─── Chat ────────────────────────────────────────────────────────────

    /// Send a chat message and return the raw response body. Reply text is
    /// resolved by `chat::resolve_reply`, which owns the fallback chain for
    /// the backend's inconsistent response shapes.
    pub async fn chat(&self, message: &str) -> Result<Value> {
        let message = message.trim();
        if message.is_empty() {
            return Err(ApiError::Validation("Please enter a message".to_string()));
        }

        let payload = serde_json::json!({ "message": message });
        self.request(Method::POST, "/stats/chat", Some(payload), true)
            .await
    }

    // ─── Events ──────────────────────────────────────────────────────────

    /// Fetch the community events feed. The collection is read-replaced
    /// wholesale; no incremental merge.
    pub async fn events(&self) -> Result<Vec<Event>> {
        let body = self.request(Method::GET, "/events/", None, true).await?;
        extract_field(body, "events")
    }

    /// Register for an event.
    pub async fn register_event(&self, event_id: &str) -> Result<()> {
        let path = format!("/events/{event_id}/register");
        self.request(Method::POST, &path, None, true).await?;
        Ok(())
    }

    /// Unregister from an event.
    pub async fn unregister_event(&self, event_id: &str) -> Result<()> {
        let path = format!("/events/{event_id}/unregister");
        self.request(Method::DELETE, &path, None, true).await?;
        Ok(())
    }

    // ─── Internals ───────────────────────────────────────────────────────

    fn persist_session(&self, session: &AuthSession) -> Result<()> {
        self.store
            .save(&session.token, &session.user)
            .map_err(|e| ApiError::Unexpected(anyhow::anyhow!("Failed to persist session: {e}")))
    }

    /// Issue one request and normalize the response into a parsed JSON body.
    ///
    /// - Transport failures map to `Connectivity`.
    /// - 401 clears the credential store and maps to `AuthExpired`.
    /// - Other non-2xx (and 2xx with `success: false`) map to `Rejected`
    ///   when the envelope message is parseable, `Unexpected` otherwise.
    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        authed: bool,
    ) -> Result<Value> {
        let url = format!("{}{}", self.base_url, path);
        let mut builder = self.http.request(method.clone(), &url);

        if authed {
            let token = self.store.load().ok_or(ApiError::AuthExpired)?;
            builder = builder.bearer_auth(token);
        }
        builder = match &body {
            Some(json) => builder.json(json),
            // Always JSON content type, even on body-less calls.
            None => builder.header(reqwest::header::CONTENT_TYPE, "application/json"),
        };

        tracing::debug!(%method, path, "API request");

        let response = builder
            .send()
            .await
            .map_err(|e| ApiError::Connectivity(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ApiError::Connectivity(e.to_string()))?;

        if status.as_u16() == 401 {
            tracing::info!(path, "Session rejected by server, clearing credentials");
            self.store.clear();
            return Err(ApiError::AuthExpired);
        }

        if !status.is_success() {
            return Err(rejection(status.as_u16(), &text));
        }

        let parsed: Value = serde_json::from_str(&text).map_err(|e| {
            ApiError::Unexpected(anyhow::anyhow!("Response was not valid JSON: {e}"))
        })?;

        // Some endpoints answer 200 with success: false and a message.
        if parsed.get("success").and_then(Value::as_bool) == Some(false) {
            let message = parsed
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();
            return Err(ApiError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        Ok(parsed)
    }
}

/// Serialize a request body, mapping the (practically impossible) failure
/// into the error taxonomy instead of panicking.
fn to_body<T: serde::Serialize>(req: &T) -> Result<Value> {
    serde_json::to_value(req)
        .map_err(|e| ApiError::Unexpected(anyhow::anyhow!("Request serialization failed: {e}")))
}

/// Run validator-derived checks and surface the first message as a
/// `Validation` error, before any network call.
fn validate<T: Validate>(req: &T) -> Result<()> {
    req.validate().map_err(|errors| {
        let message = errors
            .field_errors()
            .values()
            .flat_map(|errs| errs.iter())
            .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
            .unwrap_or_else(|| "Please fill in all fields to continue".to_string());
        ApiError::Validation(message)
    })
}

/// Map a non-2xx body to `Rejected` when the envelope message is parseable,
/// `Unexpected` otherwise.
fn rejection(status: u16, body: &str) -> ApiError {
    match serde_json::from_str::<Value>(body) {
        Ok(value) => {
            let message = value
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();
            ApiError::Rejected { status, message }
        }
        Err(_) => ApiError::Unexpected(anyhow::anyhow!("HTTP {status} with unparseable body")),
    }
}

/// Unwrap a payload that occupies the whole `data` object: `data`, falling
/// back to the full body.
///
/// The backend is not consistent about nesting; this compatibility rule is
/// deliberately tolerant and must not be strengthened.
pub(crate) fn extract_data<T: DeserializeOwned>(body: Value) -> Result<T> {
    let candidates = [body.get("data").cloned(), Some(body)];
    deserialize_first(candidates.into_iter().flatten())
}

/// Unwrap a single-field payload with the full ordered fallback:
/// `data.<field>` → `<field>` → `data` → full body.
pub(crate) fn extract_field<T: DeserializeOwned>(body: Value, field: &str) -> Result<T> {
    let candidates = [
        body.get("data").and_then(|d| d.get(field)).cloned(),
        body.get(field).cloned(),
        body.get("data").cloned(),
        Some(body),
    ];
    deserialize_first(candidates.into_iter().flatten())
}

/// Try each candidate location in order; first successful deserialization
/// wins.
fn deserialize_first<T: DeserializeOwned>(candidates: impl Iterator<Item = Value>) -> Result<T> {
    let mut last_err = None;
    for candidate in candidates {
        match serde_json::from_value(candidate) {
            Ok(value) => return Ok(value),
            Err(e) => last_err = Some(e),
        }
    }
    Err(ApiError::Unexpected(anyhow::anyhow!(
        "Response payload did not match the expected shape: {}",
        last_err.map(|e| e.to_string()).unwrap_or_default()
    )))
}
