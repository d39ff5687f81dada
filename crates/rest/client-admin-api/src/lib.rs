//! REST client for the OAuth2 client management endpoints.
//!
//! This crate provides:
//! - [`ClientsApi`], the async seam the console views are written against
//! - [`ClientAdminApi`], its `reqwest` implementation rooted at `/api/clients`
//! - [`ApiResponse`] and [`ApiError`] for call outcomes
//!
//! Every organization-scoped call carries an `orgId` query parameter, which
//! defaults to [`DEFAULT_ORG_ID`].

mod client;
mod error;
mod response;
mod service;

pub use client::{
    CLIENTS_BASE_PATH, ClientAdminApi, ClientAdminApiBuilder, DEFAULT_ORG_ID, OrgId,
};
pub use error::{ApiError, ApiResult};
pub use response::ApiResponse;
pub use service::ClientsApi;

// Re-export the model so callers only need one dependency
pub use client_admin_model as model;
