//! Community event types.

use serde::{Deserialize, Serialize};

/// A community event from `GET /events/`.
///
/// `is_attending` is client-owned view state: the wire format does not carry
/// a per-user flag, so it defaults to false on fetch and is maintained by the
/// event board from then on.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub trainer: String,
    #[serde(default)]
    pub creator_id: String,
    #[serde(default)]
    pub event_date: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
    #[serde(default)]
    pub creator: EventCreator,
    #[serde(default)]
    pub registrations: Vec<Registration>,
    #[serde(default)]
    pub participant_count: i64,
    #[serde(default)]
    pub is_attending: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventCreator {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    #[serde(default)]
    pub user_id: String,
}

/// `GET /events/` payload.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventsPage {
    #[serde(default)]
    pub events: Vec<Event>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_type_field_renamed() {
        let event: Event = serde_json::from_str(
            r#"{"id": "e1", "name": "Morning Yoga", "type": "yoga", "participantCount": 12}"#,
        )
        .unwrap();
        assert_eq!(event.kind, "yoga");
        assert_eq!(event.participant_count, 12);
        assert!(!event.is_attending);
    }
}
