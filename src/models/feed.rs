//! Health-tip feed models.
//!
//! Tips are client-only content: no backend endpoint exists for them, so
//! likes and bookmarks live purely in memory (see the feed reconciler).

use serde::{Deserialize, Serialize};

/// Tip category used for feed filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TipCategory {
    Nutrition,
    Workout,
    Sleep,
    Wellness,
}

/// A health tip card with its local interaction state.
#[derive(Debug, Clone)]
pub struct HealthTip {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: TipCategory,
    pub likes: i64,
    pub is_liked: bool,
    pub is_bookmarked: bool,
    pub comments: Vec<Comment>,
}

#[derive(Debug, Clone)]
pub struct Comment {
    pub id: String,
    pub user: String,
    pub text: String,
    pub timestamp: String,
}
