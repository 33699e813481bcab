// Webhook payloads and response bodies

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// `object` value of Instagram messaging webhooks
pub const INSTAGRAM_OBJECT: &str = "instagram";

// Inbound webhook payload
//
// Only `object` is read up front; the entries of an Instagram payload are
// decoded lazily so that other objects are acknowledged whatever their shape.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct WebhookPayload {
    #[serde(default)]
    pub object: Value,
    #[serde(default)]
    pub entry: Value,
}

impl WebhookPayload {
    pub fn is_instagram(&self) -> bool {
        self.object.as_str() == Some(INSTAGRAM_OBJECT)
    }

    /// Entries in payload order; a missing or null `entry` is empty
    pub fn entries(&self) -> Result<Vec<Entry>, serde_json::Error> {
        Option::<Vec<Entry>>::deserialize(&self.entry).map(Option::unwrap_or_default)
    }

    /// Every raw messaging event across all entries, in payload order
    pub fn messaging_events(&self) -> Result<Vec<Value>, serde_json::Error> {
        Ok(self
            .entries()?
            .into_iter()
            .flat_map(|entry| entry.messaging)
            .collect())
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Entry {
    #[serde(default)]
    pub messaging: Vec<Value>,
}

// A single messaging event; `sender` is mandatory
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct MessagingEvent {
    pub sender: Participant,
    #[serde(default)]
    pub message: Option<IncomingMessage>,
}

impl MessagingEvent {
    pub fn from_value(value: &Value) -> Result<Self, serde_json::Error> {
        Self::deserialize(value)
    }

    /// Non-empty message text, if this event carries one
    pub fn text(&self) -> Option<&str> {
        self.message
            .as_ref()
            .and_then(|message| message.text.as_deref())
            .filter(|text| !text.is_empty())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Participant {
    #[serde(deserialize_with = "id_from_string_or_number")]
    pub id: String,
}

// Platform ids arrive as strings, but numeric ids are accepted too
fn id_from_string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(id) => id,
        RawId::Number(id) => id.to_string(),
    })
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct IncomingMessage {
    #[serde(default)]
    pub text: Option<String>,
}

// Outbound send API body
#[derive(Debug, Clone, Serialize)]
pub struct SendMessageRequest {
    pub recipient: Participant,
    pub message: OutgoingText,
}

impl SendMessageRequest {
    pub fn text(recipient_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            recipient: Participant {
                id: recipient_id.into(),
            },
            message: OutgoingText { text: text.into() },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct OutgoingText {
    pub text: String,
}

// Verification handshake query string
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VerifyQuery {
    #[serde(rename = "hub.mode")]
    pub mode: Option<String>,
    #[serde(rename = "hub.verify_token")]
    pub verify_token: Option<String>,
    #[serde(rename = "hub.challenge")]
    pub challenge: Option<String>,
}

// POST /webhook acknowledgement
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Error,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StatusResponse {
    pub status: Status,
}

impl StatusResponse {
    pub fn success() -> Self {
        Self {
            status: Status::Success,
        }
    }

    pub fn error() -> Self {
        Self {
            status: Status::Error,
        }
    }
}

// GET /health body
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HealthResponse {
    pub status: String,
    pub knowledge_base_loaded: bool,
    pub gemini_configured: bool,
    pub page_token_configured: bool,
}
