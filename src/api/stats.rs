//! Bot statistics payloads.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::ApiError;

/// Server count reported for a bot.
///
/// Either a single total, or one count per shard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ServerCount {
    /// Total number of servers
    Total(i64),
    /// Server count of each shard, in shard order
    PerShard(Vec<i64>),
}

impl ServerCount {
    /// A total must be positive; a per-shard list must be non-empty.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        match self {
            Self::Total(count) => *count > 0,
            Self::PerShard(counts) => !counts.is_empty(),
        }
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n.as_i64().map(Self::Total),
            Value::Array(items) => items
                .iter()
                .map(Value::as_i64)
                .collect::<Option<Vec<_>>>()
                .map(Self::PerShard),
            _ => None,
        }
    }
}

impl From<i64> for ServerCount {
    fn from(count: i64) -> Self {
        Self::Total(count)
    }
}

impl From<Vec<i64>> for ServerCount {
    fn from(counts: Vec<i64>) -> Self {
        Self::PerShard(counts)
    }
}

/// Statistics posted to `/bots/stats`.
///
/// # Example
///
/// ```
/// use topgg::api::StatsPayload;
///
/// let stats = StatsPayload::new(1_200).with_shard_count(2).with_shard_id(0);
/// assert!(stats.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatsPayload {
    /// Total servers, or servers per shard
    pub server_count: ServerCount,
    /// Number of shards
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shard_count: Option<u64>,
    /// Server count of each shard
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shards: Option<Vec<i64>>,
    /// Shard these stats were collected from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shard_id: Option<u64>,
}

impl StatsPayload {
    /// Creates a payload with only `server_count` set.
    #[must_use]
    pub fn new(server_count: impl Into<ServerCount>) -> Self {
        Self {
            server_count: server_count.into(),
            shard_count: None,
            shards: None,
            shard_id: None,
        }
    }

    /// Sets `shard_count`.
    #[must_use]
    pub const fn with_shard_count(mut self, shard_count: u64) -> Self {
        self.shard_count = Some(shard_count);
        self
    }

    /// Sets `shards`.
    #[must_use]
    pub fn with_shards(mut self, shards: Vec<i64>) -> Self {
        self.shards = Some(shards);
        self
    }

    /// Sets `shard_id`.
    #[must_use]
    pub const fn with_shard_id(mut self, shard_id: u64) -> Self {
        self.shard_id = Some(shard_id);
        self
    }

    /// Checks `server_count` before anything is sent.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::MissingOrInvalidServerCount`] for a non-positive
    /// total or an empty per-shard list.
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.server_count.is_valid() {
            Ok(())
        } else {
            Err(ApiError::MissingOrInvalidServerCount)
        }
    }
}

/// Builds a payload from loosely typed JSON, such as stats collected by
/// another process.
///
/// Optional shard fields that are not integers are ignored.
impl TryFrom<Value> for StatsPayload {
    type Error = ApiError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let server_count = value
            .get("server_count")
            .and_then(ServerCount::from_value)
            .ok_or(ApiError::MissingOrInvalidServerCount)?;

        let payload = Self {
            server_count,
            shard_count: value.get("shard_count").and_then(Value::as_u64),
            shards: value.get("shards").and_then(|v| {
                v.as_array()?
                    .iter()
                    .map(Value::as_i64)
                    .collect::<Option<Vec<_>>>()
            }),
            shard_id: value.get("shard_id").and_then(Value::as_u64),
        };

        payload.validate()?;
        Ok(payload)
    }
}

/// Statistics returned by `GET /bots/stats`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Stats {
    /// Server count, total or per shard, when the API reports it
    pub server_count: Option<ServerCount>,
    /// Number of shards, when the API reports it
    pub shard_count: Option<u64>,
    /// Server count of each shard; empty when not reported
    pub shards: Vec<i64>,
}

impl Stats {
    /// Copies the known fields out of a decoded response body.
    ///
    /// Absent or `null` fields stay unset.
    ///
    /// # Errors
    ///
    /// [`ApiError::UnexpectedResponse`] when a field is present with the wrong type.
    pub fn from_response(body: &Value) -> Result<Self, ApiError> {
        let server_count = present(body, "server_count")
            .map(|value| ServerCount::from_value(value).ok_or_else(|| unexpected("server_count")))
            .transpose()?;
        let shard_count = present(body, "shard_count")
            .map(|value| value.as_u64().ok_or_else(|| unexpected("shard_count")))
            .transpose()?;
        let shards = present(body, "shards")
            .map(|value| {
                value
                    .as_array()
                    .and_then(|items| items.iter().map(Value::as_i64).collect::<Option<Vec<_>>>())
                    .ok_or_else(|| unexpected("shards"))
            })
            .transpose()?
            .unwrap_or_default();

        Ok(Self {
            server_count,
            shard_count,
            shards,
        })
    }
}

fn present<'a>(body: &'a Value, key: &str) -> Option<&'a Value> {
    body.get(key).filter(|value| !value.is_null())
}

fn unexpected(field: &str) -> ApiError {
    ApiError::UnexpectedResponse(format!("invalid {field} in stats response"))
}
