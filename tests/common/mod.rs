// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared test backend: a local axum stub of the FitSync API.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use serde_json::{json, Value};

use fitsync_client::{ApiClient, Config, CredentialStore};

pub const TEST_TOKEN: &str = "test-token-1";
pub const TEST_EMAIL: &str = "jane@example.com";
pub const TEST_PASSWORD: &str = "secret123";

/// Knobs the tests can turn while the backend is running.
#[derive(Clone, Default)]
pub struct Backend {
    /// Force 401 on every authenticated route (simulates server-side token
    /// invalidation mid-session).
    pub reject_token: Arc<AtomicBool>,
    /// Make event register/unregister fail with a 500.
    pub fail_registration: Arc<AtomicBool>,
    /// Make activity logging fail with a 500.
    pub fail_activity: Arc<AtomicBool>,
    /// Body returned verbatim from the chat endpoint.
    pub chat_body: Arc<Mutex<Value>>,
    /// Last body received by the activity endpoint.
    pub last_activity: Arc<Mutex<Option<Value>>>,
    /// Last body received by the meal endpoint.
    pub last_meal: Arc<Mutex<Option<Value>>>,
}

impl Backend {
    pub fn set_chat_body(&self, body: Value) {
        *self.chat_body.lock().unwrap() = body;
    }
}

fn test_user() -> Value {
    json!({
        "id": "u1",
        "name": "Jane Doe",
        "email": TEST_EMAIL,
        "age": 30,
        "heightCm": 170.0,
        "currentWeightKg": 65.0,
    })
}

/// Spawn the stub backend on an ephemeral port; returns the control handle
/// and the API base URL.
pub async fn spawn_backend() -> (Backend, String) {
    let backend = Backend::default();
    backend.set_chat_body(json!({
        "success": true,
        "data": { "response": "Eat more vegetables." },
    }));

    let api = Router::new()
        .route("/users/login", post(login))
        .route("/users/register", post(register))
        .route("/users/profile", get(profile))
        .route("/users/update", put(update_profile))
        .route("/dashboard/getdailystats", get(daily_stats))
        .route("/stats/activities", get(activities))
        .route("/stats/activity", post(log_activity))
        .route("/stats/meals", get(meals))
        .route("/stats/meals/{date}", get(meal_for_date))
        .route("/stats/meal", post(log_meal))
        .route("/stats/weight-goal", post(weight_goal))
        .route("/stats/chat", post(chat))
        .route("/events/", get(events))
        .route("/events/{id}/register", post(register_event))
        .route("/events/{id}/unregister", delete(unregister_event));

    let app = Router::new()
        .nest("/api", api)
        .with_state(backend.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (backend, format!("http://{addr}/api"))
}

/// Client wired to the stub backend with a fresh temp credential store.
/// Returns the client and the tempdir guard (dropping it wipes the store).
pub fn test_client(base_url: &str) -> (ApiClient, tempfile::TempDir) {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = Config::test_default(base_url, dir.path());
    let store = CredentialStore::new(dir.path());
    let client = ApiClient::new(&config, store).expect("client");
    (client, dir)
}

/// Log the test client in against the stub backend.
#[allow(dead_code)]
pub async fn signed_in_client(base_url: &str) -> (ApiClient, tempfile::TempDir) {
    let (client, dir) = test_client(base_url);
    client
        .login(TEST_EMAIL, TEST_PASSWORD)
        .await
        .expect("test login");
    (client, dir)
}

// ─── Handlers ────────────────────────────────────────────────────────────

fn authorize(backend: &Backend, headers: &HeaderMap) -> Option<Response> {
    let expected = format!("Bearer {TEST_TOKEN}");
    let presented = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    if backend.reject_token.load(Ordering::SeqCst) || presented != expected {
        let body = json!({ "success": false, "message": "Unauthorized" });
        return Some((StatusCode::UNAUTHORIZED, Json(body)).into_response());
    }
    None
}

async fn login(Json(body): Json<Value>) -> Response {
    if body["email"] == TEST_EMAIL && body["password"] == TEST_PASSWORD {
        let body = json!({
            "success": true,
            "message": "Login successful",
            "data": { "token": TEST_TOKEN, "user": test_user() },
        });
        (StatusCode::OK, Json(body)).into_response()
    } else {
        let body = json!({ "success": false, "message": "Invalid credentials" });
        (StatusCode::BAD_REQUEST, Json(body)).into_response()
    }
}

async fn register(Json(body): Json<Value>) -> Response {
    let mut user = test_user();
    user["name"] = body["name"].clone();
    user["email"] = body["email"].clone();
    let body = json!({
        "success": true,
        "data": { "token": TEST_TOKEN, "user": user },
    });
    (StatusCode::OK, Json(body)).into_response()
}

async fn profile(State(backend): State<Backend>, headers: HeaderMap) -> Response {
    if let Some(denied) = authorize(&backend, &headers) {
        return denied;
    }
    let body = json!({ "success": true, "data": { "user": test_user() } });
    (StatusCode::OK, Json(body)).into_response()
}

async fn update_profile(
    State(backend): State<Backend>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if let Some(denied) = authorize(&backend, &headers) {
        return denied;
    }
    let mut user = test_user();
    user["name"] = body["name"].clone();
    user["email"] = body["email"].clone();
    let body = json!({ "success": true, "data": { "user": user } });
    (StatusCode::OK, Json(body)).into_response()
}

async fn daily_stats(State(backend): State<Backend>, headers: HeaderMap) -> Response {
    if let Some(denied) = authorize(&backend, &headers) {
        return denied;
    }
    let body = json!({
        "success": true,
        "data": {
            "id": "ds1",
            "date": "2026-02-11",
            "steps": 5000,
            "activeCalories": 500.0,
            "sleepHours": 6.0,
            "bmi": 22.5,
            "bmiCategory": { "category": "Normal", "good": true },
        },
    });
    (StatusCode::OK, Json(body)).into_response()
}

async fn activities(State(backend): State<Backend>, headers: HeaderMap) -> Response {
    if let Some(denied) = authorize(&backend, &headers) {
        return denied;
    }
    let body = json!({
        "success": true,
        "data": {
            "activities": [
                { "id": "a1", "activityName": "running", "duration": 30, "caloriesBurnt": 300.0 },
                { "id": "a2", "activityName": "yoga", "duration": 45, "caloriesBurnt": 150.0 },
            ],
            "summary": {
                "totalActivities": 2,
                "totalCaloriesBurnt": 450.0,
                "averageCaloriesPerActivity": 225.0,
            },
            "pagination": { "currentPage": 1, "totalPages": 1, "hasNext": false, "hasPrev": false },
        },
    });
    (StatusCode::OK, Json(body)).into_response()
}

async fn log_activity(
    State(backend): State<Backend>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if let Some(denied) = authorize(&backend, &headers) {
        return denied;
    }
    if backend.fail_activity.load(Ordering::SeqCst) {
        let body = json!({ "success": false, "message": "Could not log activity" });
        return (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response();
    }

    let minutes = body["minutes"].as_u64().unwrap_or(0);
    *backend.last_activity.lock().unwrap() = Some(body);

    let body = json!({
        "success": true,
        "data": {
            "calorieBurnt": (minutes * 7) as f64,
            "suggestions": "Stay hydrated.",
        },
    });
    (StatusCode::OK, Json(body)).into_response()
}

async fn meals(State(backend): State<Backend>, headers: HeaderMap) -> Response {
    if let Some(denied) = authorize(&backend, &headers) {
        return denied;
    }
    let body = json!({
        "success": true,
        "data": {
            "mealPlans": [
                { "id": "m1", "date": "2026-02-11", "breakfast": "Oatmeal", "totalCalories": 420.0 },
            ],
        },
    });
    (StatusCode::OK, Json(body)).into_response()
}

async fn meal_for_date(
    State(backend): State<Backend>,
    Path(date): Path<String>,
    headers: HeaderMap,
) -> Response {
    if let Some(denied) = authorize(&backend, &headers) {
        return denied;
    }
    let body = json!({
        "success": true,
        "data": { "mealPlan": { "id": "m1", "date": date, "breakfast": "Oatmeal" } },
    });
    (StatusCode::OK, Json(body)).into_response()
}

async fn log_meal(
    State(backend): State<Backend>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if let Some(denied) = authorize(&backend, &headers) {
        return denied;
    }
    *backend.last_meal.lock().unwrap() = Some(body.clone());

    let body = json!({
        "success": true,
        "data": {
            "mealPlan": {
                "id": "m2",
                "breakfast": body["breakfast"],
                "lunch": body["lunch"],
                "dinner": body["dinner"],
                "totalCalories": 600.0,
            },
            "suggestions": "Add some greens.",
            "nextMealRecommendation": "Grilled fish for dinner.",
        },
    });
    (StatusCode::OK, Json(body)).into_response()
}

async fn weight_goal(
    State(backend): State<Backend>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if let Some(denied) = authorize(&backend, &headers) {
        return denied;
    }
    let body = json!({
        "success": true,
        "data": {
            "targetWeight": body["targetWeight"],
            "dailyCalorieTarget": 1800,
        },
    });
    (StatusCode::OK, Json(body)).into_response()
}

async fn chat(State(backend): State<Backend>, headers: HeaderMap, Json(_): Json<Value>) -> Response {
    if let Some(denied) = authorize(&backend, &headers) {
        return denied;
    }
    let body = backend.chat_body.lock().unwrap().clone();
    (StatusCode::OK, Json(body)).into_response()
}

async fn events(State(backend): State<Backend>, headers: HeaderMap) -> Response {
    if let Some(denied) = authorize(&backend, &headers) {
        return denied;
    }
    let body = json!({
        "success": true,
        "data": {
            "events": [
                {
                    "id": "e1",
                    "name": "Morning Yoga",
                    "type": "yoga",
                    "location": "Central Park",
                    "eventDate": "2026-03-01",
                    "participantCount": 12,
                },
                {
                    "id": "e2",
                    "name": "5k Fun Run",
                    "type": "running",
                    "location": "Riverside",
                    "eventDate": "2026-03-08",
                    "participantCount": 40,
                },
            ],
        },
    });
    (StatusCode::OK, Json(body)).into_response()
}

async fn register_event(
    State(backend): State<Backend>,
    Path(_id): Path<String>,
    headers: HeaderMap,
) -> Response {
    if let Some(denied) = authorize(&backend, &headers) {
        return denied;
    }
    if backend.fail_registration.load(Ordering::SeqCst) {
        let body = json!({ "success": false, "message": "Event is full" });
        return (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response();
    }
    let body = json!({ "success": true, "message": "Registered" });
    (StatusCode::OK, Json(body)).into_response()
}

async fn unregister_event(
    State(backend): State<Backend>,
    Path(_id): Path<String>,
    headers: HeaderMap,
) -> Response {
    if let Some(denied) = authorize(&backend, &headers) {
        return denied;
    }
    if backend.fail_registration.load(Ordering::SeqCst) {
        let body = json!({ "success": false, "message": "Unregistration failed" });
        return (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response();
    }
    let body = json!({ "success": true, "message": "Unregistered" });
    (StatusCode::OK, Json(body)).into_response()
}
