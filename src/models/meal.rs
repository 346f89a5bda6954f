//! Meal plan types and the client-side meal entry form.

use serde::{Deserialize, Serialize};

use crate::error::{ApiError, Result};

/// A meal plan as returned by the meals endpoints, including the macros the
/// server computed for it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealPlan {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub breakfast: String,
    #[serde(default)]
    pub lunch: String,
    #[serde(default)]
    pub dinner: String,
    #[serde(default)]
    pub snacks: String,
    #[serde(default)]
    pub total_calories: f64,
    #[serde(default)]
    pub protein_grams: f64,
    #[serde(default)]
    pub carbs_grams: f64,
    #[serde(default)]
    pub fats_grams: f64,
}

/// Client-side meal form. At least one of breakfast/lunch/dinner must be
/// non-empty; empty snacks are omitted from the request body entirely.
#[derive(Debug, Clone, Default)]
pub struct MealEntry {
    pub breakfast: String,
    pub lunch: String,
    pub dinner: String,
    pub snacks: String,
}

impl MealEntry {
    /// Validate and convert to the `POST /stats/meal` body.
    pub fn into_body(self) -> Result<serde_json::Value> {
        let breakfast = self.breakfast.trim();
        let lunch = self.lunch.trim();
        let dinner = self.dinner.trim();
        let snacks = self.snacks.trim();

        if breakfast.is_empty() && lunch.is_empty() && dinner.is_empty() {
            return Err(ApiError::Validation(
                "Please add at least one meal".to_string(),
            ));
        }

        let mut body = serde_json::json!({
            "breakfast": breakfast,
            "lunch": lunch,
            "dinner": dinner,
        });
        if !snacks.is_empty() {
            body["snacks"] = serde_json::Value::String(snacks.to_string());
        }
        Ok(body)
    }
}

/// `POST /stats/meal` response payload: the stored plan plus the server's
/// suggestions for the rest of the day.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealLogResult {
    #[serde(default)]
    pub meal_plan: MealPlan,
    #[serde(default)]
    pub suggestions: String,
    #[serde(default)]
    pub next_meal_recommendation: String,
}
