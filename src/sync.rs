// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Optimistic local-state reconciliation.
//!
//! Two collections use the mutate-first pattern:
//! - `TipFeed`: health-tip likes/bookmarks/comments. Client-only, no network
//!   path exists, so there is nothing to reconcile — but the flip and the
//!   counter always move together so a synced future version can revert
//!   them as a pair.
//! - `EventBoard`: event attendance. The flip and participant counter are
//!   applied before the network call and rolled back if it fails; the
//!   server remains the durable source of truth and a refresh replaces the
//!   collection wholesale.

use crate::client::ApiClient;
use crate::error::Result;
use crate::models::{Comment, Event, HealthTip, TipCategory};

// ─────────────────────────────────────────────────────────────────────────────
// Health tips
// ─────────────────────────────────────────────────────────────────────────────

/// In-memory health-tip feed.
#[derive(Debug, Clone, Default)]
pub struct TipFeed {
    tips: Vec<HealthTip>,
}

impl TipFeed {
    pub fn new(tips: Vec<HealthTip>) -> Self {
        Self { tips }
    }

    /// Feed seeded with the built-in tip cards.
    pub fn seeded() -> Self {
        Self::new(seed_tips())
    }

    pub fn tips(&self) -> &[HealthTip] {
        &self.tips
    }

    /// Tips in one category, or all of them.
    pub fn filtered(&self, category: Option<TipCategory>) -> Vec<&HealthTip> {
        self.tips
            .iter()
            .filter(|tip| category.map_or(true, |c| tip.category == c))
            .collect()
    }

    /// Flip the like state and adjust the counter. Returns the previous
    /// `(is_liked, likes)` pair so a caller syncing to a backend can revert
    /// exactly; `None` if the tip does not exist.
    pub fn toggle_like(&mut self, id: &str) -> Option<(bool, i64)> {
        let tip = self.tips.iter_mut().find(|t| t.id == id)?;
        let previous = (tip.is_liked, tip.likes);

        tip.likes += if tip.is_liked { -1 } else { 1 };
        tip.is_liked = !tip.is_liked;
        Some(previous)
    }

    /// Flip the bookmark flag. Returns the new state, `None` if absent.
    pub fn toggle_bookmark(&mut self, id: &str) -> Option<bool> {
        let tip = self.tips.iter_mut().find(|t| t.id == id)?;
        tip.is_bookmarked = !tip.is_bookmarked;
        Some(tip.is_bookmarked)
    }

    /// Append a comment to a tip. Blank comments are dropped.
    pub fn add_comment(&mut self, id: &str, user: &str, text: &str, timestamp: &str) -> bool {
        let text = text.trim();
        if text.is_empty() {
            return false;
        }
        let Some(tip) = self.tips.iter_mut().find(|t| t.id == id) else {
            return false;
        };
        let comment_id = format!("{}-{}", id, tip.comments.len() + 1);
        tip.comments.push(Comment {
            id: comment_id,
            user: user.to_string(),
            text: text.to_string(),
            timestamp: timestamp.to_string(),
        });
        true
    }
}

/// Built-in tip cards shown in the feed.
fn seed_tips() -> Vec<HealthTip> {
    let tip = |id: &str, title: &str, description: &str, category, likes| HealthTip {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        category,
        likes,
        is_liked: false,
        is_bookmarked: false,
        comments: Vec::new(),
    };

    vec![
        tip(
            "1",
            "5 Superfoods for Energy",
            "Discover natural foods that boost your energy levels throughout the day without the crash.",
            TipCategory::Nutrition,
            234,
        ),
        tip(
            "2",
            "10-Minute Morning Workout",
            "Start your day with this energizing routine that requires no equipment.",
            TipCategory::Workout,
            456,
        ),
        tip(
            "3",
            "Better Sleep in 7 Days",
            "Simple habits that will transform your sleep quality and help you wake up refreshed.",
            TipCategory::Sleep,
            189,
        ),
        tip(
            "4",
            "Hydration Hacks",
            "Creative ways to drink more water and stay hydrated throughout your busy day.",
            TipCategory::Wellness,
            312,
        ),
        tip(
            "5",
            "Protein Power Bowl",
            "Build the perfect post-workout meal with these protein-packed ingredients.",
            TipCategory::Nutrition,
            278,
        ),
    ]
}

// ─────────────────────────────────────────────────────────────────────────────
// Events
// ─────────────────────────────────────────────────────────────────────────────

/// In-memory event board with optimistic attendance toggling.
#[derive(Debug, Clone, Default)]
pub struct EventBoard {
    events: Vec<Event>,
}

impl EventBoard {
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn get(&self, id: &str) -> Option<&Event> {
        self.events.iter().find(|e| e.id == id)
    }

    /// Replace the collection with a fresh fetch. Attendance flags carry
    /// over for events that survive the refresh, since the wire format does
    /// not report per-user registration.
    pub async fn refresh(&mut self, client: &ApiClient) -> Result<()> {
        let mut fresh = client.events().await?;
        for event in &mut fresh {
            if let Some(known) = self.get(&event.id) {
                event.is_attending = known.is_attending;
            }
        }
        self.events = fresh;
        Ok(())
    }

    /// Toggle attendance for one event: flip the flag and move the
    /// participant counter by exactly one *before* the call, choose
    /// register/unregister from the pre-toggle state, and roll both back if
    /// the call fails.
    ///
    /// Returns the new attendance state on success.
    pub async fn toggle_attendance(&mut self, client: &ApiClient, id: &str) -> Result<bool> {
        let event = self
            .events
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| crate::error::ApiError::Validation("Unknown event".to_string()))?;

        let was_attending = event.is_attending;

        // Optimistic flip.
        event.is_attending = !was_attending;
        event.participant_count += if was_attending { -1 } else { 1 };

        let result = if was_attending {
            client.unregister_event(id).await
        } else {
            client.register_event(id).await
        };

        match result {
            Ok(()) => {
                tracing::debug!(event = id, attending = !was_attending, "Attendance updated");
                Ok(!was_attending)
            }
            Err(e) => {
                // Revert to the exact pre-toggle pair before propagating.
                let event = self
                    .events
                    .iter_mut()
                    .find(|e| e.id == id)
                    .expect("event cannot disappear during toggle");
                event.is_attending = was_attending;
                event.participant_count += if was_attending { 1 } else { -1 };

                tracing::warn!(event = id, error = %e, "Attendance toggle rolled back");
                Err(e)
            }
        }
    }
}
