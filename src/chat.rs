// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! AI assistant chat: reply resolution and the local message thread.
//!
//! The backend has answered chat requests in several shapes over time, so
//! reply text is resolved through an explicit ordered fallback rather than
//! ad hoc branching. The precedence is fixed:
//! `data.response` → `response` → `message` → raw string → generic fallback.

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::client::ApiClient;
use crate::error::ApiError;

/// Reply used when no recognizable text is present in the response.
pub const FALLBACK_REPLY: &str =
    "I'm sorry, I couldn't process your request right now. Please try again.";

/// Reply used when the request never reached the server.
pub const CONNECTIVITY_REPLY: &str =
    "I'm sorry, I'm having trouble connecting right now. Please check your internet connection and try again.";

/// Opening message seeded into every new thread.
pub const GREETING: &str = "Hi! I'm your AI fitness and nutrition assistant. I can help you with \
workout plans, meal planning, nutrition questions, supplement advice, and healthy lifestyle \
tips. What would you like to know?";

/// Canned prompts shown on an empty thread.
pub const QUICK_QUESTIONS: &[&str] = &[
    "What should I eat for breakfast?",
    "How much protein do I need daily?",
    "Best foods for weight loss?",
    "Healthy snack ideas?",
    "Create a workout plan for me",
    "How to lose weight effectively?",
];

/// Resolve the bot reply text from a raw chat response body.
pub fn resolve_reply(body: &Value) -> String {
    let candidates = [
        body.get("data").and_then(|d| d.get("response")),
        body.get("response"),
        body.get("message"),
        Some(body),
    ];

    for candidate in candidates.into_iter().flatten() {
        if let Some(text) = candidate.as_str() {
            if !text.is_empty() {
                return text.to_string();
            }
        }
    }
    FALLBACK_REPLY.to_string()
}

/// One message in the thread.
#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub text: String,
    pub from_user: bool,
    pub timestamp: DateTime<Utc>,
}

/// In-memory chat thread with optimistic append: the user message is added
/// before the network call, and every failure still produces a bot reply so
/// the thread never dangles.
#[derive(Debug, Clone)]
pub struct ChatThread {
    messages: Vec<ChatMessage>,
}

impl Default for ChatThread {
    fn default() -> Self {
        Self::new(Utc::now())
    }
}

impl ChatThread {
    /// New thread seeded with the assistant greeting.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            messages: vec![ChatMessage {
                text: GREETING.to_string(),
                from_user: false,
                timestamp: now,
            }],
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// True while only the greeting is present (quick questions are shown).
    pub fn is_fresh(&self) -> bool {
        self.messages.len() == 1
    }

    /// Send a message through the gateway and append both sides of the
    /// exchange.
    ///
    /// Rejected requests surface the server's message as the bot reply;
    /// connectivity failures get a canned reply. `AuthExpired` propagates
    /// (the caller must route to login) and the optimistic user message is
    /// kept so nothing typed is lost. Blank input is ignored.
    pub async fn send(
        &mut self,
        client: &ApiClient,
        text: &str,
        now: DateTime<Utc>,
    ) -> crate::error::Result<()> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(());
        }

        self.messages.push(ChatMessage {
            text: text.to_string(),
            from_user: true,
            timestamp: now,
        });

        let reply = match client.chat(text).await {
            Ok(body) => resolve_reply(&body),
            Err(ApiError::AuthExpired) => return Err(ApiError::AuthExpired),
            Err(ApiError::Rejected { message, .. }) if !message.is_empty() => message,
            Err(ApiError::Connectivity(e)) => {
                tracing::warn!(error = %e, "Chat request failed to connect");
                CONNECTIVITY_REPLY.to_string()
            }
            Err(e) => {
                tracing::warn!(error = %e, "Chat request failed");
                FALLBACK_REPLY.to_string()
            }
        };

        self.messages.push(ChatMessage {
            text: reply,
            from_user: false,
            timestamp: now,
        });
        Ok(())
    }
}
