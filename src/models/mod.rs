// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Wire types for the FitSync REST API plus the client-only feed models.

mod event;
mod feed;
mod meal;
mod stats;
mod user;

pub use event::{Event, EventCreator, EventsPage, Registration};
pub use feed::{Comment, HealthTip, TipCategory};
pub use meal::{MealEntry, MealLogResult, MealPlan};
pub use stats::{
    ActivitiesPage, ActivitiesSummary, Activity, ActivityResult, BmiCategory, DailyStats,
    Pagination,
};
pub use user::{AuthSession, LoginRequest, ProfileUpdate, RegisterRequest, UserProfile};
