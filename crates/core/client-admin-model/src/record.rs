//! Client registration as returned by the admin API.

use crate::enums::{ApplicationType, AuthMethod};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Server-assigned identifier of a client record.
///
/// The backend emits integers but the console never does arithmetic on
/// them, so the value is kept as opaque text. Both JSON numbers and strings
/// are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "RawRecordId", into = "String")]
pub struct RecordId(String);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawRecordId {
    Number(i64),
    Text(String),
}

impl From<RawRecordId> for RecordId {
    fn from(raw: RawRecordId) -> Self {
        match raw {
            RawRecordId::Number(n) => Self(n.to_string()),
            RawRecordId::Text(s) => Self(s),
        }
    }
}

impl From<RecordId> for String {
    fn from(id: RecordId) -> Self {
        id.0
    }
}

impl RecordId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for RecordId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<i64> for RecordId {
    fn from(id: i64) -> Self {
        Self(id.to_string())
    }
}

pub const DEFAULT_ACCESS_TOKEN_TTL: u32 = 3600;
pub const DEFAULT_REFRESH_TOKEN_TTL: u32 = 86400;
pub const DEFAULT_AUTH_CODE_TTL: u32 = 300;
pub const DEFAULT_DEVICE_CODE_TTL: u32 = 600;
pub const DEFAULT_MAX_REQUEST_TRANSIT_TIME: u32 = 300;

/// Per-client token lifetimes, in seconds, and refresh-token reuse policy.
///
/// Missing, `null` or zero values coming from the backend fall back to the
/// defaults a new client is created with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "RawTokenSettings")]
pub struct TokenSettings {
    pub access_token_ttl: u32,
    pub refresh_token_ttl: u32,
    pub auth_code_ttl: u32,
    pub device_code_ttl: u32,
    pub reuse_refresh_tokens: bool,
    pub max_request_transit_time: u32,
}

impl Default for TokenSettings {
    fn default() -> Self {
        Self {
            access_token_ttl: DEFAULT_ACCESS_TOKEN_TTL,
            refresh_token_ttl: DEFAULT_REFRESH_TOKEN_TTL,
            auth_code_ttl: DEFAULT_AUTH_CODE_TTL,
            device_code_ttl: DEFAULT_DEVICE_CODE_TTL,
            reuse_refresh_tokens: false,
            max_request_transit_time: DEFAULT_MAX_REQUEST_TRANSIT_TIME,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTokenSettings {
    #[serde(default)]
    access_token_ttl: Option<u32>,
    #[serde(default)]
    refresh_token_ttl: Option<u32>,
    #[serde(default)]
    auth_code_ttl: Option<u32>,
    #[serde(default)]
    device_code_ttl: Option<u32>,
    #[serde(default)]
    reuse_refresh_tokens: Option<bool>,
    #[serde(default)]
    max_request_transit_time: Option<u32>,
}

impl From<RawTokenSettings> for TokenSettings {
    fn from(raw: RawTokenSettings) -> Self {
        let positive_or = |value: Option<u32>, default: u32| value.filter(|v| *v > 0).unwrap_or(default);

        Self {
            access_token_ttl: positive_or(raw.access_token_ttl, DEFAULT_ACCESS_TOKEN_TTL),
            refresh_token_ttl: positive_or(raw.refresh_token_ttl, DEFAULT_REFRESH_TOKEN_TTL),
            auth_code_ttl: positive_or(raw.auth_code_ttl, DEFAULT_AUTH_CODE_TTL),
            device_code_ttl: positive_or(raw.device_code_ttl, DEFAULT_DEVICE_CODE_TTL),
            reuse_refresh_tokens: raw.reuse_refresh_tokens.unwrap_or(false),
            max_request_transit_time: positive_or(
                raw.max_request_transit_time,
                DEFAULT_MAX_REQUEST_TRANSIT_TIME,
            ),
        }
    }
}

/// One registered OAuth2 client.
///
/// The client secret is never part of this type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientRecord {
    pub id: RecordId,

    /// Public OAuth2 `client_id`, distinct from [`ClientRecord::id`].
    #[serde(default, deserialize_with = "null_as_default")]
    pub client_id: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default)]
    pub application_type: Option<ApplicationType>,

    #[serde(default)]
    pub auth_method: Option<AuthMethod>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jwk_set_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,

    /// Lifecycle flag owned by the server.
    #[serde(default, deserialize_with = "null_as_default")]
    pub active: bool,

    #[serde(default, deserialize_with = "null_as_default")]
    pub redirect_uris: Vec<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub post_logout_redirect_uris: Vec<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub scopes: Vec<String>,

    #[serde(default)]
    pub token_settings: Option<TokenSettings>,
}

impl ClientRecord {
    /// Description, treating a blank string as absent.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref().filter(|d| !d.trim().is_empty())
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
