//! User profile and auth payloads.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// User profile as returned by `/users/profile` and cached locally.
///
/// Local edits are optimistic-then-confirmed: the server response is the
/// only authoritative copy.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    pub age: Option<u32>,
    pub gender: Option<String>,
    pub height_cm: Option<f64>,
    pub current_weight_kg: Option<f64>,
    pub target_weight_kg: Option<f64>,
    pub health_goal: Option<String>,
    pub activity_level: Option<String>,
    pub target_deadline: Option<String>,
    pub phone: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl UserProfile {
    /// First name for greeting purposes ("Jane Doe" -> "Jane").
    pub fn first_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or("User")
    }
}

/// Session issued at login/registration: one opaque bearer token plus the
/// server's copy of the profile.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthSession {
    pub token: String,
    pub user: UserProfile,
}

/// `POST /users/login` body.
#[derive(Debug, Clone, Serialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Please enter a valid email address"))]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters long"))]
    pub password: String,
}

/// `POST /users/register` body, matching the onboarding form mapping
/// (gender/goal/level are sent upper-cased by the caller).
#[derive(Debug, Clone, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(length(min = 1, message = "Please fill in name"))]
    pub name: String,
    #[validate(email(message = "Please enter a valid email address"))]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters long"))]
    pub password: String,
    #[validate(range(min = 1, max = 120, message = "Please enter a valid age"))]
    pub age: u32,
    pub height_cm: f64,
    pub current_weight_kg: f64,
    pub gender: String,
    pub health_goal: String,
    pub target_weight_kg: f64,
    pub target_deadline: String,
    pub activity_level: String,
}

/// `PUT /users/update` body. Only provided fields are serialized.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_weight_kg: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height_cm: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
}
