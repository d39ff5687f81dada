//! In-memory doubles for view tests.

use crate::shell::Shell;
use async_trait::async_trait;
use client_admin_api::{ApiError, ApiResponse, ApiResult, ClientsApi};
use client_admin_model::{
    ApplicationType, AuthMethod, ClientRecord, ClientRequest, RecordId, SecretRotation,
    TokenSettings,
};
use std::collections::HashSet;
use std::sync::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    List,
    Get,
    Create,
    Update,
    Delete,
    Rotate,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    List,
    Get(RecordId),
    Create(ClientRequest),
    Update(RecordId, ClientRequest),
    Delete(RecordId),
    Rotate(RecordId),
    ListRedirectUris(RecordId),
    AddRedirectUri(RecordId, String),
    DeleteRedirectUri(RecordId, String),
}

pub fn record(id: &str, name: &str) -> ClientRecord {
    ClientRecord {
        id: RecordId::new(id),
        client_id: format!("client-{id}"),
        name: name.to_string(),
        description: Some(format!("{name} description")),
        application_type: Some(ApplicationType::Web),
        auth_method: Some(AuthMethod::ClientSecretJwt),
        jwk_set_url: None,
        uri: None,
        active: true,
        redirect_uris: vec![format!("https://{id}.example.com/callback")],
        post_logout_redirect_uris: vec![],
        scopes: vec![],
        token_settings: Some(TokenSettings::default()),
    }
}

/// Backend double holding records in memory and recording every call.
#[derive(Default)]
pub struct FakeApi {
    records: Mutex<Vec<ClientRecord>>,
    calls: Mutex<Vec<Call>>,
    failing: Mutex<HashSet<Op>>,
    rotation: Mutex<Option<SecretRotation>>,
}

impl FakeApi {
    pub fn with_records(records: Vec<ClientRecord>) -> Self {
        Self {
            records: Mutex::new(records),
            ..Self::default()
        }
    }

    pub fn fail(&self, op: Op) {
        self.failing.lock().unwrap().insert(op);
    }

    pub fn set_rotation(&self, rotation: SecretRotation) {
        *self.rotation.lock().unwrap() = Some(rotation);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn records(&self) -> Vec<ClientRecord> {
        self.records.lock().unwrap().clone()
    }

    fn enter(&self, call: Call, op: Option<Op>) -> ApiResult<()> {
        self.calls.lock().unwrap().push(call);
        match op {
            Some(op) if self.failing.lock().unwrap().contains(&op) => Err(ApiError::Status {
                status: 500,
                body: "internal error".to_string(),
            }),
            _ => Ok(()),
        }
    }

    fn find(&self, id: &RecordId) -> ApiResult<ClientRecord> {
        self.records
            .lock()
            .unwrap()
            .iter()
            .find(|record| &record.id == id)
            .cloned()
            .ok_or_else(|| ApiError::Status {
                status: 404,
                body: String::new(),
            })
    }
}

fn apply(record: &mut ClientRecord, request: &ClientRequest) {
    record.name = request.name.clone();
    record.description = request.description.clone();
    record.application_type = Some(request.application_type);
    record.auth_method = Some(request.auth_method);
    record.jwk_set_url = request.jwk_set_url.clone();
    record.redirect_uris = request.redirect_uris.clone();
    record.post_logout_redirect_uris = request.post_logout_redirect_uris.clone();
    record.token_settings = Some(request.token_settings());
}

#[async_trait]
impl ClientsApi for FakeApi {
    async fn list_clients(&self) -> ApiResult<ApiResponse<Vec<ClientRecord>>> {
        self.enter(Call::List, Some(Op::List))?;
        Ok(ApiResponse::ok(self.records()))
    }

    async fn get_client(&self, id: &RecordId) -> ApiResult<ApiResponse<Option<ClientRecord>>> {
        self.enter(Call::Get(id.clone()), Some(Op::Get))?;
        let found = self.records().into_iter().find(|record| &record.id == id);
        Ok(ApiResponse::ok(found))
    }

    async fn create_client(
        &self,
        request: &ClientRequest,
    ) -> ApiResult<ApiResponse<ClientRecord>> {
        self.enter(Call::Create(request.clone()), Some(Op::Create))?;
        let mut records = self.records.lock().unwrap();
        let id = RecordId::from(records.len() as i64 + 100);
        let mut created = record(id.as_str(), &request.name);
        apply(&mut created, request);
        records.push(created.clone());
        Ok(ApiResponse::created(created))
    }

    async fn update_client(
        &self,
        id: &RecordId,
        request: &ClientRequest,
    ) -> ApiResult<ApiResponse<Option<ClientRecord>>> {
        self.enter(Call::Update(id.clone(), request.clone()), Some(Op::Update))?;
        let mut records = self.records.lock().unwrap();
        let updated = records.iter_mut().find(|record| &record.id == id).map(|record| {
            apply(record, request);
            record.clone()
        });
        Ok(ApiResponse::ok(updated))
    }

    async fn delete_client(&self, id: &RecordId) -> ApiResult<ApiResponse<()>> {
        self.enter(Call::Delete(id.clone()), Some(Op::Delete))?;
        self.records.lock().unwrap().retain(|record| &record.id != id);
        Ok(ApiResponse::no_content())
    }

    async fn rotate_secret(&self, id: &RecordId) -> ApiResult<ApiResponse<SecretRotation>> {
        self.enter(Call::Rotate(id.clone()), Some(Op::Rotate))?;
        let rotation = self.rotation.lock().unwrap().clone().unwrap_or(SecretRotation {
            message: Some("Secret rotated".to_string()),
            new_secret: None,
            client_id: None,
        });
        Ok(ApiResponse::ok(rotation))
    }

    async fn list_redirect_uris(&self, id: &RecordId) -> ApiResult<ApiResponse<Vec<String>>> {
        self.enter(Call::ListRedirectUris(id.clone()), None)?;
        Ok(ApiResponse::ok(self.find(id)?.redirect_uris))
    }

    async fn add_redirect_uri(&self, id: &RecordId, uri: &str) -> ApiResult<ApiResponse<()>> {
        self.enter(Call::AddRedirectUri(id.clone(), uri.to_string()), None)?;
        Ok(ApiResponse::created(()))
    }

    async fn delete_redirect_uri(
        &self,
        id: &RecordId,
        uri: &str,
    ) -> ApiResult<ApiResponse<()>> {
        self.enter(Call::DeleteRedirectUri(id.clone(), uri.to_string()), None)?;
        Ok(ApiResponse::no_content())
    }
}

/// Shell double answering confirmations with a fixed value.
pub struct RecordingShell {
    answer: bool,
    pub prompts: Mutex<Vec<String>>,
    pub alerts: Mutex<Vec<String>>,
    pub notices: Mutex<Vec<String>>,
    pub secrets: Mutex<Vec<String>>,
}

impl RecordingShell {
    pub fn confirming() -> Self {
        Self::answering(true)
    }

    pub fn declining() -> Self {
        Self::answering(false)
    }

    fn answering(answer: bool) -> Self {
        Self {
            answer,
            prompts: Mutex::default(),
            alerts: Mutex::default(),
            notices: Mutex::default(),
            secrets: Mutex::default(),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn alerts(&self) -> Vec<String> {
        self.alerts.lock().unwrap().clone()
    }

    pub fn notices(&self) -> Vec<String> {
        self.notices.lock().unwrap().clone()
    }

    pub fn secrets(&self) -> Vec<String> {
        self.secrets.lock().unwrap().clone()
    }
}

impl Shell for RecordingShell {
    fn confirm(&self, prompt: &str) -> bool {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.answer
    }

    fn alert(&self, message: &str) {
        self.alerts.lock().unwrap().push(message.to_string());
    }

    fn notify(&self, message: &str) {
        self.notices.lock().unwrap().push(message.to_string());
    }

    fn disclose_secret(&self, secret: &str) {
        self.secrets.lock().unwrap().push(secret.to_string());
    }
}
