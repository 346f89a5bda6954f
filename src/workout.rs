// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout stopwatch state machine.
//!
//! States: Idle → Running → Submitting → Idle. Stop is terminal for a
//! session: elapsed time is frozen at the stop instant and the whole-minute
//! floor is what gets submitted. A failed submission resumes Running with
//! the start re-anchored so no elapsed time is lost (the submission gap is
//! not counted). Calories and suggestions in the result are entirely
//! server-authoritative.
//!
//! All transitions take explicit `DateTime<Utc>` instants; the caller owns
//! the 1-second tick and must stop ticking once the session leaves Running.

use chrono::{DateTime, Utc};

use crate::client::ApiClient;
use crate::error::{ApiError, Result};
use crate::models::ActivityResult;

#[derive(Debug, Clone)]
enum TimerState {
    Idle,
    Running {
        name: String,
        started_at: DateTime<Utc>,
    },
    Submitting {
        name: String,
        frozen_secs: i64,
    },
}

/// Client-side workout stopwatch.
#[derive(Debug, Clone)]
pub struct WorkoutTimer {
    state: TimerState,
}

impl Default for WorkoutTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl WorkoutTimer {
    pub fn new() -> Self {
        Self {
            state: TimerState::Idle,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.state, TimerState::Idle)
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, TimerState::Running { .. })
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.state, TimerState::Submitting { .. })
    }

    /// The workout name, once a session exists.
    pub fn name(&self) -> Option<&str> {
        match &self.state {
            TimerState::Idle => None,
            TimerState::Running { name, .. } | TimerState::Submitting { name, .. } => Some(name),
        }
    }

    /// Idle → Running. Rejects blank names before anything starts.
    pub fn start(&mut self, name: &str, now: DateTime<Utc>) -> Result<()> {
        if !self.is_idle() {
            return Err(ApiError::Validation(
                "A workout is already in progress".to_string(),
            ));
        }
        let name = name.trim();
        if name.is_empty() {
            return Err(ApiError::Validation(
                "Please enter a workout name".to_string(),
            ));
        }

        self.state = TimerState::Running {
            name: name.to_string(),
            started_at: now,
        };
        tracing::debug!(workout = name, "Workout started");
        Ok(())
    }

    /// Whole elapsed seconds. Monotonically non-decreasing while Running
    /// (a clock instant before the start reads as zero); frozen while
    /// Submitting; zero while Idle.
    pub fn elapsed_secs(&self, now: DateTime<Utc>) -> i64 {
        match &self.state {
            TimerState::Idle => 0,
            TimerState::Running { started_at, .. } => {
                (now - *started_at).num_seconds().max(0)
            }
            TimerState::Submitting { frozen_secs, .. } => *frozen_secs,
        }
    }

    /// Running → Submitting. Elapsed is frozen at this instant; returns the
    /// whole-minute duration that will be submitted.
    pub fn stop(&mut self, now: DateTime<Utc>) -> Result<u32> {
        let TimerState::Running { name, started_at } = &self.state else {
            return Err(ApiError::Validation("No workout is running".to_string()));
        };

        let frozen_secs = (now - *started_at).num_seconds().max(0);
        self.state = TimerState::Submitting {
            name: name.clone(),
            frozen_secs,
        };
        Ok((frozen_secs / 60) as u32)
    }

    /// Submitting → Idle after a successful submission.
    pub fn complete(&mut self) {
        self.state = TimerState::Idle;
    }

    /// Submitting → Running after a failed submission. The start is
    /// re-anchored to `now - frozen` so elapsed continues from the frozen
    /// value instead of counting the submission gap.
    pub fn resume(&mut self, now: DateTime<Utc>) {
        if let TimerState::Submitting { name, frozen_secs } = &self.state {
            self.state = TimerState::Running {
                name: name.clone(),
                started_at: now - chrono::Duration::seconds(*frozen_secs),
            };
        }
    }

    /// Stop the session and submit it through the gateway.
    ///
    /// On success the timer returns to Idle and the server's result (with
    /// calories and suggestions) is returned for display. On failure the
    /// timer resumes Running so the user keeps their elapsed time, and the
    /// error propagates. `AuthExpired` is the exception: the session is
    /// gone, so the timer resets too.
    pub async fn submit(
        &mut self,
        client: &ApiClient,
        now: DateTime<Utc>,
    ) -> Result<ActivityResult> {
        let minutes = self.stop(now)?;
        let name = self
            .name()
            .expect("submitting state always carries a name")
            .to_string();

        match client.log_activity(&name, minutes).await {
            Ok(result) => {
                self.complete();
                tracing::info!(
                    workout = %name,
                    minutes,
                    calories = result.calorie_burnt,
                    "Workout logged"
                );
                Ok(result)
            }
            Err(ApiError::AuthExpired) => {
                self.complete();
                Err(ApiError::AuthExpired)
            }
            Err(e) => {
                self.resume(Utc::now());
                tracing::warn!(workout = %name, error = %e, "Workout submission failed, timer resumed");
                Err(e)
            }
        }
    }
}

/// Format elapsed seconds as `MM:SS`, or `HH:MM:SS` once over an hour.
pub fn format_elapsed(seconds: i64) -> String {
    let seconds = seconds.max(0);
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;

    if hours > 0 {
        format!("{hours:02}:{minutes:02}:{secs:02}")
    } else {
        format!("{minutes:02}:{secs:02}")
    }
}
