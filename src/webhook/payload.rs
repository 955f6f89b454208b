//! Vote notification payload and its schema checks.

use serde::Serialize;
use serde_json::{Map, Value};

use super::WebhookError;

const REQUIRED_FIELDS: [&str; 3] = ["bot", "user", "type"];

/// The `query` field of a vote notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum VoteQuery {
    /// An empty query string, kept as received
    Text(String),
    /// Decoded query parameters, or a mapping sent as-is
    Params(Map<String, Value>),
}

impl VoteQuery {
    /// Returns a parameter as text, if present and a string.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        match self {
            Self::Text(_) => None,
            Self::Params(params) => params.get(key).and_then(Value::as_str),
        }
    }
}

/// A validated vote notification.
///
/// Only [`WebhookPayload::from_value`] builds one, so `bot`, `user` and
/// `type` are always present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WebhookPayload {
    /// Id of the voted bot (or server)
    pub bot: String,
    /// Id of the voting user
    pub user: String,
    /// `"upvote"`, or `"test"` for test notifications
    #[serde(rename = "type")]
    pub kind: String,
    /// Whether the weekend multiplier applied
    #[serde(rename = "isWeekend", skip_serializing_if = "Option::is_none")]
    pub is_weekend: Option<bool>,
    /// Query parameters of the vote page URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<VoteQuery>,
    /// Keys not covered above, kept verbatim
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl WebhookPayload {
    /// Validates a decoded body and shapes it into a payload.
    ///
    /// A non-empty string `query` is decoded into its parameters.
    ///
    /// # Errors
    ///
    /// - [`WebhookError::InvalidPayloadFormat`] if `value` is not an object
    /// - [`WebhookError::MissingFields`] listing every absent required key
    /// - [`WebhookError::InvalidFieldType`] naming the first mistyped key,
    ///   checked in `bot, user, type, isWeekend, query` order
    pub fn from_value(value: Value) -> Result<Self, WebhookError> {
        let Value::Object(mut map) = value else {
            return Err(WebhookError::InvalidPayloadFormat);
        };

        check_required(&map)?;
        check_types(&map)?;

        let bot = take_string(&mut map, "bot");
        let user = take_string(&mut map, "user");
        let kind = take_string(&mut map, "type");
        let is_weekend = map.remove("isWeekend").and_then(|v| v.as_bool());
        let query = map.remove("query").and_then(|v| match v {
            Value::String(text) if text.is_empty() => Some(VoteQuery::Text(text)),
            Value::String(text) => Some(VoteQuery::Params(decode_query(&text))),
            Value::Object(params) => Some(VoteQuery::Params(params)),
            _ => None,
        });

        Ok(Self {
            bot,
            user,
            kind,
            is_weekend,
            query,
            extra: map,
        })
    }

    /// Returns true for notifications sent from the "Test" button.
    #[must_use]
    pub fn is_test(&self) -> bool {
        self.kind == "test"
    }
}

fn check_required(map: &Map<String, Value>) -> Result<(), WebhookError> {
    let missing: Vec<&'static str> = REQUIRED_FIELDS
        .into_iter()
        .filter(|field| !map.contains_key(*field))
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(WebhookError::MissingFields { fields: missing })
    }
}

fn check_types(map: &Map<String, Value>) -> Result<(), WebhookError> {
    for field in REQUIRED_FIELDS {
        if !map.get(field).is_some_and(Value::is_string) {
            return Err(WebhookError::InvalidFieldType { field });
        }
    }

    if map.get("isWeekend").is_some_and(|v| !v.is_boolean()) {
        return Err(WebhookError::InvalidFieldType { field: "isWeekend" });
    }

    if map
        .get("query")
        .is_some_and(|v| !v.is_string() && !v.is_object())
    {
        return Err(WebhookError::InvalidFieldType { field: "query" });
    }

    Ok(())
}

fn take_string(map: &mut Map<String, Value>, key: &str) -> String {
    match map.remove(key) {
        Some(Value::String(s)) => s,
        _ => String::new(),
    }
}

/// Decodes `a=1&b=2` into a mapping; later duplicates win.
fn decode_query(query: &str) -> Map<String, Value> {
    url::form_urlencoded::parse(query.as_bytes())
        .map(|(key, value)| (key.into_owned(), Value::String(value.into_owned())))
        .collect()
}
