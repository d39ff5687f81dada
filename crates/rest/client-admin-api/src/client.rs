//! HTTP implementation of [`ClientsApi`] over `reqwest`.

use crate::error::{ApiError, ApiResult};
use crate::response::ApiResponse;
use crate::service::ClientsApi;
use async_trait::async_trait;
use client_admin_model::{ClientRecord, ClientRequest, RecordId, SecretRotation};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Resource root of the client management endpoints.
pub const CLIENTS_BASE_PATH: &str = "/api/clients";

/// Organization every request is scoped to unless the caller picks another.
pub const DEFAULT_ORG_ID: OrgId = OrgId(1);

/// Organization scope sent as the `orgId` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrgId(pub i64);

impl Default for OrgId {
    fn default() -> Self {
        DEFAULT_ORG_ID
    }
}

impl fmt::Display for OrgId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Join a server URL and a path without doubling or dropping slashes.
fn join_url_segments(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    if path.is_empty() {
        base.to_string()
    } else {
        format!("{}/{}", base, path)
    }
}

/// Client for the `/api/clients` resource.
#[derive(Clone)]
pub struct ClientAdminApi {
    client: reqwest::Client,
    server_url: String,
    org_id: OrgId,
    bearer_token: Option<String>,
    timeout: Option<Duration>,
}

/// Builder for [`ClientAdminApi`].
pub struct ClientAdminApiBuilder {
    server_url: String,
    org_id: OrgId,
    bearer_token: Option<String>,
    timeout: Option<Duration>,
}

impl ClientAdminApiBuilder {
    /// Create a new builder with the required server URL
    pub fn new(server_url: impl Into<String>) -> Self {
        Self {
            server_url: server_url.into(),
            org_id: DEFAULT_ORG_ID,
            bearer_token: None,
            timeout: None,
        }
    }

    /// Scope requests to an organization other than [`DEFAULT_ORG_ID`].
    pub fn with_org_id(mut self, org_id: OrgId) -> Self {
        self.org_id = org_id;
        self
    }

    pub fn with_bearer_token(mut self, token: Option<impl Into<String>>) -> Self {
        self.bearer_token = token.map(Into::into);
        self
    }

    /// Set a request timeout. Requests have none unless this is called.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build the client
    ///
    /// # Errors
    ///
    /// Returns an error if the server URL does not parse or the underlying
    /// HTTP client fails to build
    pub fn build(self) -> ApiResult<ClientAdminApi> {
        Url::parse(&self.server_url)?;

        let client = reqwest::Client::builder().build()?;

        Ok(ClientAdminApi {
            client,
            server_url: self.server_url,
            org_id: self.org_id,
            bearer_token: self.bearer_token,
            timeout: self.timeout,
        })
    }
}

impl ClientAdminApi {
    pub fn builder(server_url: impl Into<String>) -> ClientAdminApiBuilder {
        ClientAdminApiBuilder::new(server_url)
    }

    pub fn org_id(&self) -> OrgId {
        self.org_id
    }

    /// A copy of this client scoped to another organization.
    pub fn for_org(&self, org_id: OrgId) -> Self {
        Self {
            org_id,
            ..self.clone()
        }
    }

    /// Build an endpoint URL below the resource root. Scoped endpoints
    /// carry `orgId` as their first query parameter.
    fn endpoint(&self, segments: &[&str], org_scoped: bool) -> ApiResult<Url> {
        let mut url = Url::parse(&join_url_segments(&self.server_url, CLIENTS_BASE_PATH))?;
        url.path_segments_mut()
            .map_err(|_| ApiError::Url(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .pop_if_empty()
            .extend(segments);
        if org_scoped {
            url.query_pairs_mut()
                .append_pair("orgId", &self.org_id.to_string());
        }
        Ok(url)
    }

    fn redirect_uri_endpoint(&self, id: &RecordId, uri: &str) -> ApiResult<Url> {
        let mut url = self.endpoint(&[id.as_str(), "redirect-uris"], true)?;
        url.query_pairs_mut().append_pair("uri", uri);
        Ok(url)
    }

    /// Issue one request and return the status and raw body of a 2xx answer.
    async fn execute(
        &self,
        method: Method,
        url: Url,
        body: Option<&ClientRequest>,
    ) -> ApiResult<(u16, String)> {
        debug!(%method, %url, "sending admin API request");

        let mut request_builder = self.client.request(method.clone(), url.clone());

        if let Some(token) = &self.bearer_token {
            request_builder = request_builder.bearer_auth(token);
        }

        if let Some(body) = body {
            request_builder = request_builder.json(body);
        }

        #[cfg(not(target_arch = "wasm32"))]
        if let Some(timeout) = self.timeout {
            request_builder = request_builder.timeout(timeout);
        }

        let response = request_builder.send().await.map_err(|err| {
            warn!(%method, %url, error = %err, "admin API request failed");
            ApiError::Transport(err)
        })?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            warn!(%method, %url, status = status.as_u16(), "admin API returned an error status");
            return Err(ApiError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        debug!(%method, %url, status = status.as_u16(), "admin API request succeeded");
        Ok((status.as_u16(), text))
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        method: Method,
        url: Url,
        body: Option<&ClientRequest>,
    ) -> ApiResult<ApiResponse<T>> {
        let (status, text) = self.execute(method, url, body).await?;
        let data = serde_json::from_str(&text)?;
        Ok(ApiResponse::new(status, data))
    }

    async fn fetch_optional<T: DeserializeOwned>(
        &self,
        method: Method,
        url: Url,
        body: Option<&ClientRequest>,
    ) -> ApiResult<ApiResponse<Option<T>>> {
        let (status, text) = self.execute(method, url, body).await?;
        let data = if text.trim().is_empty() {
            None
        } else {
            serde_json::from_str::<Option<T>>(&text)?
        };
        Ok(ApiResponse::new(status, data))
    }

    async fn fetch_empty(&self, method: Method, url: Url) -> ApiResult<ApiResponse<()>> {
        let (status, _) = self.execute(method, url, None).await?;
        Ok(ApiResponse::new(status, ()))
    }
}

#[async_trait]
impl ClientsApi for ClientAdminApi {
    async fn list_clients(&self) -> ApiResult<ApiResponse<Vec<ClientRecord>>> {
        let url = self.endpoint(&[], true)?;
        self.fetch(Method::GET, url, None).await
    }

    async fn get_client(&self, id: &RecordId) -> ApiResult<ApiResponse<Option<ClientRecord>>> {
        let url = self.endpoint(&[id.as_str()], false)?;
        self.fetch_optional(Method::GET, url, None).await
    }

    async fn create_client(
        &self,
        request: &ClientRequest,
    ) -> ApiResult<ApiResponse<ClientRecord>> {
        let url = self.endpoint(&[], true)?;
        self.fetch(Method::POST, url, Some(request)).await
    }

    async fn update_client(
        &self,
        id: &RecordId,
        request: &ClientRequest,
    ) -> ApiResult<ApiResponse<Option<ClientRecord>>> {
        let url = self.endpoint(&[id.as_str()], true)?;
        self.fetch_optional(Method::PUT, url, Some(request)).await
    }

    async fn delete_client(&self, id: &RecordId) -> ApiResult<ApiResponse<()>> {
        let url = self.endpoint(&[id.as_str()], true)?;
        self.fetch_empty(Method::DELETE, url).await
    }

    async fn rotate_secret(&self, id: &RecordId) -> ApiResult<ApiResponse<SecretRotation>> {
        let url = self.endpoint(&[id.as_str(), "rotate-secret"], true)?;
        self.fetch(Method::POST, url, None).await
    }

    async fn list_redirect_uris(&self, id: &RecordId) -> ApiResult<ApiResponse<Vec<String>>> {
        let url = self.endpoint(&[id.as_str(), "redirect-uris"], false)?;
        self.fetch(Method::GET, url, None).await
    }

    async fn add_redirect_uri(&self, id: &RecordId, uri: &str) -> ApiResult<ApiResponse<()>> {
        let url = self.redirect_uri_endpoint(id, uri)?;
        self.fetch_empty(Method::POST, url).await
    }

    async fn delete_redirect_uri(
        &self,
        id: &RecordId,
        uri: &str,
    ) -> ApiResult<ApiResponse<()>> {
        let url = self.redirect_uri_endpoint(id, uri)?;
        self.fetch_empty(Method::DELETE, url).await
    }
}
