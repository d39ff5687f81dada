//! Data model of the OAuth2 client admin console.
//!
//! This crate provides the types shared by the API client and the views:
//! - [`ClientRecord`] and its nested [`TokenSettings`]
//! - the closed [`ApplicationType`] and [`AuthMethod`] enumerations
//! - the [`ClientRequest`] body of create/update and the [`SecretRotation`] response
//! - the redirect URI scheme rule

mod enums;
mod record;
mod request;
mod uri;

pub use enums::{ApplicationType, AuthMethod, ParseEnumError};
pub use record::{
    ClientRecord, DEFAULT_ACCESS_TOKEN_TTL, DEFAULT_AUTH_CODE_TTL, DEFAULT_DEVICE_CODE_TTL,
    DEFAULT_MAX_REQUEST_TRANSIT_TIME, DEFAULT_REFRESH_TOKEN_TTL, RecordId, TokenSettings,
};
pub use request::{ClientRequest, SecretRotation};
pub use uri::{ALLOWED_URI_PREFIXES, has_allowed_scheme};
