//! Request and response bodies of the admin API.

use crate::enums::{ApplicationType, AuthMethod};
use crate::record::TokenSettings;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Body of the create and update calls.
///
/// The backend takes the token settings as top-level fields, so they are
/// flattened on the wire while staying grouped on the Rust side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientRequest {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub application_type: ApplicationType,

    pub auth_method: AuthMethod,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jwk_set_url: Option<String>,

    #[serde(default)]
    pub redirect_uris: Vec<String>,

    #[serde(default)]
    pub post_logout_redirect_uris: Vec<String>,

    #[serde(flatten)]
    pub token_settings: TokenSettings,
}

impl ClientRequest {
    /// Nested token settings carried by this request.
    pub fn token_settings(&self) -> TokenSettings {
        self.token_settings
    }
}

/// Outcome of a secret rotation.
///
/// `new_secret` is only ever present in this response. `Debug` redacts it so
/// it cannot leak into logs.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecretRotation {
    #[serde(default)]
    pub message: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_secret: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
}

impl fmt::Debug for SecretRotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretRotation")
            .field("message", &self.message)
            .field("new_secret", &self.new_secret.as_ref().map(|_| "<redacted>"))
            .field("client_id", &self.client_id)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request() -> ClientRequest {
        ClientRequest {
            name: "Portal".to_string(),
            description: None,
            application_type: ApplicationType::Web,
            auth_method: AuthMethod::Pkce,
            jwk_set_url: None,
            redirect_uris: vec!["https://portal.example.com/cb".to_string()],
            post_logout_redirect_uris: vec![],
            token_settings: TokenSettings::default(),
        }
    }

    #[test]
    fn test_request_is_flat_on_the_wire() {
        let value = serde_json::to_value(request()).unwrap();

        assert_eq!(value["name"], "Portal");
        assert_eq!(value["applicationType"], "WEB");
        assert_eq!(value["authMethod"], "PKCE");
        assert_eq!(value["accessTokenTtl"], 3600);
        assert_eq!(value["refreshTokenTtl"], 86400);
        assert_eq!(value["reuseRefreshTokens"], false);
        assert!(value.get("tokenSettings").is_none());
        assert!(value.get("description").is_none());
        assert!(value.get("jwkSetUrl").is_none());
    }

    #[test]
    fn test_request_reassembles_token_settings() {
        let parsed: ClientRequest = serde_json::from_value(json!({
            "name": "Portal",
            "applicationType": "MOBILE",
            "authMethod": "CLIENT_SECRET_JWT",
            "accessTokenTtl": 60,
            "refreshTokenTtl": 120,
            "authCodeTtl": 30,
            "deviceCodeTtl": 40,
            "reuseRefreshTokens": true,
            "maxRequestTransitTime": 15
        }))
        .unwrap();

        let settings = parsed.token_settings();
        assert_eq!(settings.access_token_ttl, 60);
        assert_eq!(settings.refresh_token_ttl, 120);
        assert_eq!(settings.auth_code_ttl, 30);
        assert_eq!(settings.device_code_ttl, 40);
        assert!(settings.reuse_refresh_tokens);
        assert_eq!(settings.max_request_transit_time, 15);
        assert!(parsed.redirect_uris.is_empty());
    }

    #[test]
    fn test_rotation_debug_redacts_secret() {
        let rotation: SecretRotation = serde_json::from_value(json!({
            "clientId": "c-1",
            "message": "rotated",
            "newSecret": "s3cr3t"
        }))
        .unwrap();

        assert_eq!(rotation.new_secret.as_deref(), Some("s3cr3t"));
        let debug = format!("{rotation:?}");
        assert!(!debug.contains("s3cr3t"));
        assert!(debug.contains("<redacted>"));
    }
}
