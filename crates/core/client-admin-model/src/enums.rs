//! Closed enumerations carried by a client registration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Returned when a string does not name a member of one of the enumerations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} '{value}', expected one of: {expected}")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
    pub expected: &'static str,
}

/// Kind of application a client is registered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApplicationType {
    Web,
    Mobile,
    Server,
}

impl ApplicationType {
    pub const ALL: [ApplicationType; 3] = [Self::Web, Self::Mobile, Self::Server];

    /// Wire name, e.g. `WEB`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Web => "WEB",
            Self::Mobile => "MOBILE",
            Self::Server => "SERVER",
        }
    }

    /// Human-readable label used by form selects.
    pub fn label(self) -> &'static str {
        match self {
            Self::Web => "Web Application",
            Self::Mobile => "Mobile Application",
            Self::Server => "Server Application",
        }
    }
}

impl fmt::Display for ApplicationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApplicationType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|variant| variant.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseEnumError {
                kind: "application type",
                value: s.to_string(),
                expected: "WEB, MOBILE, SERVER",
            })
    }
}

/// Client authentication method at the token endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuthMethod {
    ClientSecretJwt,
    PrivateKeyJwt,
    Pkce,
}

impl AuthMethod {
    pub const ALL: [AuthMethod; 3] = [Self::ClientSecretJwt, Self::PrivateKeyJwt, Self::Pkce];

    /// Wire name, e.g. `CLIENT_SECRET_JWT`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ClientSecretJwt => "CLIENT_SECRET_JWT",
            Self::PrivateKeyJwt => "PRIVATE_KEY_JWT",
            Self::Pkce => "PKCE",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::ClientSecretJwt => "Client Secret JWT",
            Self::PrivateKeyJwt => "Private Key JWT",
            Self::Pkce => "PKCE (Public Client)",
        }
    }
}

impl fmt::Display for AuthMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuthMethod {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|variant| variant.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseEnumError {
                kind: "auth method",
                value: s.to_string(),
                expected: "CLIENT_SECRET_JWT, PRIVATE_KEY_JWT, PKCE",
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names() {
        assert_eq!(
            serde_json::to_string(&ApplicationType::Mobile).unwrap(),
            "\"MOBILE\""
        );
        assert_eq!(
            serde_json::to_string(&AuthMethod::ClientSecretJwt).unwrap(),
            "\"CLIENT_SECRET_JWT\""
        );

        let method: AuthMethod = serde_json::from_str("\"PRIVATE_KEY_JWT\"").unwrap();
        assert_eq!(method, AuthMethod::PrivateKeyJwt);
    }

    #[test]
    fn test_from_str_is_case_insensitive() {
        assert_eq!("web".parse::<ApplicationType>().unwrap(), ApplicationType::Web);
        assert_eq!(" pkce ".parse::<AuthMethod>().unwrap(), AuthMethod::Pkce);
    }

    #[test]
    fn test_from_str_rejects_unknown() {
        let err = "DESKTOP".parse::<ApplicationType>().unwrap_err();
        assert_eq!(err.kind, "application type");
        assert!(err.to_string().contains("DESKTOP"));
    }
}
