use crate::error::ApiResult;
use crate::response::ApiResponse;
use async_trait::async_trait;
use client_admin_model::{ClientRecord, ClientRequest, RecordId, SecretRotation};

/// Operations of the client management REST resource.
///
/// Views talk to the backend only through this trait. Each call is a single
/// round trip: no retries and no caching.
#[async_trait]
pub trait ClientsApi: Send + Sync {
    /// `GET /api/clients?orgId=`
    async fn list_clients(&self) -> ApiResult<ApiResponse<Vec<ClientRecord>>>;

    /// `GET /api/clients/{id}`; `data` is `None` if the body is empty or `null`.
    async fn get_client(&self, id: &RecordId) -> ApiResult<ApiResponse<Option<ClientRecord>>>;

    /// `POST /api/clients?orgId=`; the returned record carries the new id.
    async fn create_client(&self, request: &ClientRequest)
    -> ApiResult<ApiResponse<ClientRecord>>;

    /// `PUT /api/clients/{id}?orgId=`; `data` is `None` if the server sent no body.
    async fn update_client(
        &self,
        id: &RecordId,
        request: &ClientRequest,
    ) -> ApiResult<ApiResponse<Option<ClientRecord>>>;

    /// `DELETE /api/clients/{id}?orgId=`
    async fn delete_client(&self, id: &RecordId) -> ApiResult<ApiResponse<()>>;

    /// `POST /api/clients/{id}/rotate-secret?orgId=`
    async fn rotate_secret(&self, id: &RecordId) -> ApiResult<ApiResponse<SecretRotation>>;

    /// `GET /api/clients/{id}/redirect-uris`
    async fn list_redirect_uris(&self, id: &RecordId) -> ApiResult<ApiResponse<Vec<String>>>;

    /// `POST /api/clients/{id}/redirect-uris?orgId=&uri=`
    async fn add_redirect_uri(&self, id: &RecordId, uri: &str) -> ApiResult<ApiResponse<()>>;

    /// `DELETE /api/clients/{id}/redirect-uris?orgId=&uri=`
    async fn delete_redirect_uri(&self, id: &RecordId, uri: &str)
    -> ApiResult<ApiResponse<()>>;
}
