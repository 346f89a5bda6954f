//! Daily stats and activity log types.
//!
//! All numeric goals used for dashboard progress (10k steps, 8h sleep,
//! 2000 kcal) are fixed client-side constants; the values themselves are
//! server-authoritative.

use serde::{Deserialize, Serialize};

/// Daily steps goal used for the progress ring.
const STEPS_GOAL: f64 = 10_000.0;
/// Nightly sleep goal in hours.
const SLEEP_GOAL_HOURS: f64 = 8.0;
/// Daily active-calorie goal.
const CALORIES_GOAL: f64 = 2_000.0;

/// `GET /dashboard/getdailystats` payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyStats {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub steps: u32,
    #[serde(default)]
    pub active_calories: f64,
    #[serde(default)]
    pub heart_rate_avg: f64,
    #[serde(default)]
    pub sleep_hours: f64,
    #[serde(default)]
    pub weight_kg: f64,
    #[serde(default)]
    pub activities_count: u32,
    #[serde(default)]
    pub total_activity_duration: u32,
    #[serde(default)]
    pub total_calories_from_activities: f64,
    #[serde(default)]
    pub bmi: f64,
    #[serde(default)]
    pub bmi_category: BmiCategory,
    #[serde(default)]
    pub created_at: String,
}

impl DailyStats {
    /// Steps progress toward the daily goal, clamped to 0..=100.
    pub fn steps_progress(&self) -> f64 {
        clamp_percent(self.steps as f64 / STEPS_GOAL)
    }

    /// Sleep progress toward the nightly goal, clamped to 0..=100.
    pub fn sleep_progress(&self) -> f64 {
        clamp_percent(self.sleep_hours / SLEEP_GOAL_HOURS)
    }

    /// Active-calorie progress toward the daily goal, clamped to 0..=100.
    pub fn calories_progress(&self) -> f64 {
        clamp_percent(self.active_calories / CALORIES_GOAL)
    }
}

fn clamp_percent(fraction: f64) -> f64 {
    (fraction * 100.0).clamp(0.0, 100.0)
}

/// BMI classification computed by the server.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BmiCategory {
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub good: bool,
}

/// A logged activity as returned by the stats endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub activity_name: String,
    /// Duration in whole minutes.
    #[serde(default)]
    pub duration: u32,
    #[serde(default)]
    pub calories_burnt: f64,
    #[serde(default)]
    pub suggestions: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub created_at: String,
}

/// `GET /stats/activities` payload: the collection plus the server's
/// aggregate summary and pagination blocks.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivitiesPage {
    #[serde(default)]
    pub activities: Vec<Activity>,
    #[serde(default)]
    pub summary: ActivitiesSummary,
    #[serde(default)]
    pub pagination: Pagination,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivitiesSummary {
    #[serde(default)]
    pub total_activities: u32,
    #[serde(default)]
    pub total_calories_burnt: f64,
    #[serde(default)]
    pub average_calories_per_activity: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    #[serde(default)]
    pub current_page: u32,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub has_next: bool,
    #[serde(default)]
    pub has_prev: bool,
}

/// `POST /stats/activity` payload. Calories and suggestions are entirely
/// server-computed; the client never derives them locally.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityResult {
    #[serde(default)]
    pub activity: Option<Activity>,
    #[serde(default)]
    pub calorie_burnt: f64,
    #[serde(default)]
    pub suggestions: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_clamped_at_100() {
        let stats = DailyStats {
            steps: 25_000,
            sleep_hours: 12.0,
            active_calories: 3_500.0,
            ..DailyStats::default()
        };
        assert_eq!(stats.steps_progress(), 100.0);
        assert_eq!(stats.sleep_progress(), 100.0);
        assert_eq!(stats.calories_progress(), 100.0);
    }

    #[test]
    fn test_progress_partial() {
        let stats = DailyStats {
            steps: 5_000,
            sleep_hours: 6.0,
            active_calories: 500.0,
            ..DailyStats::default()
        };
        assert_eq!(stats.steps_progress(), 50.0);
        assert_eq!(stats.sleep_progress(), 75.0);
        assert_eq!(stats.calories_progress(), 25.0);
    }

    #[test]
    fn test_daily_stats_tolerates_missing_fields() {
        let stats: DailyStats = serde_json::from_str(r#"{"steps": 1200}"#).unwrap();
        assert_eq!(stats.steps, 1200);
        assert_eq!(stats.bmi, 0.0);
        assert!(!stats.bmi_category.good);
    }
}
