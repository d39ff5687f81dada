//! Create and edit form for a client record.

use crate::loadable::{RequestGuard, Ticket};
use crate::route::Route;
use crate::shell::{Outcome, Shell};
use crate::views::uri_editor::{AddResult, UriList, UriListEditor};
use client_admin_api::{ApiResponse, ApiResult, ClientsApi};
use client_admin_model::{
    ApplicationType, AuthMethod, ClientRecord, ClientRequest, RecordId, TokenSettings,
};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, error, info};

/// Editable fields of the form, with token settings flattened out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientFormFields {
    pub name: String,
    pub description: Option<String>,
    pub application_type: Option<ApplicationType>,
    pub auth_method: Option<AuthMethod>,
    pub jwk_set_url: Option<String>,
    pub redirect_uris: Vec<String>,
    pub post_logout_redirect_uris: Vec<String>,
    pub access_token_ttl: u32,
    pub refresh_token_ttl: u32,
    pub auth_code_ttl: u32,
    pub device_code_ttl: u32,
    pub reuse_refresh_tokens: bool,
    pub max_request_transit_time: u32,
}

impl Default for ClientFormFields {
    fn default() -> Self {
        Self::with_settings(TokenSettings::default())
    }
}

impl ClientFormFields {
    fn with_settings(settings: TokenSettings) -> Self {
        Self {
            name: String::new(),
            description: None,
            application_type: Some(ApplicationType::Web),
            auth_method: Some(AuthMethod::ClientSecretJwt),
            jwk_set_url: None,
            redirect_uris: Vec::new(),
            post_logout_redirect_uris: Vec::new(),
            access_token_ttl: settings.access_token_ttl,
            refresh_token_ttl: settings.refresh_token_ttl,
            auth_code_ttl: settings.auth_code_ttl,
            device_code_ttl: settings.device_code_ttl,
            reuse_refresh_tokens: settings.reuse_refresh_tokens,
            max_request_transit_time: settings.max_request_transit_time,
        }
    }

    pub fn token_settings(&self) -> TokenSettings {
        TokenSettings {
            access_token_ttl: self.access_token_ttl,
            refresh_token_ttl: self.refresh_token_ttl,
            auth_code_ttl: self.auth_code_ttl,
            device_code_ttl: self.device_code_ttl,
            reuse_refresh_tokens: self.reuse_refresh_tokens,
            max_request_transit_time: self.max_request_transit_time,
        }
    }

    pub fn apply(&mut self, edit: FieldEdit) {
        match edit {
            FieldEdit::Name(value) => self.name = value,
            FieldEdit::Description(value) => set_text(&mut self.description, value),
            FieldEdit::ApplicationType(value) => self.application_type = value,
            FieldEdit::AuthMethod(value) => self.auth_method = value,
            FieldEdit::JwkSetUrl(value) => set_text(&mut self.jwk_set_url, value),
            FieldEdit::AccessTokenTtl(value) => self.access_token_ttl = value,
            FieldEdit::RefreshTokenTtl(value) => self.refresh_token_ttl = value,
            FieldEdit::AuthCodeTtl(value) => self.auth_code_ttl = value,
            FieldEdit::DeviceCodeTtl(value) => self.device_code_ttl = value,
            FieldEdit::ReuseRefreshTokens(value) => self.reuse_refresh_tokens = value,
            FieldEdit::MaxRequestTransitTime(value) => self.max_request_transit_time = value,
        }
    }

    /// Check the fields before anything is sent.
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::default();

        if self.name.trim().is_empty() {
            errors.insert(FormField::Name, "Name is required");
        }
        if self.application_type.is_none() {
            errors.insert(FormField::ApplicationType, "Application type is required");
        }
        if self.auth_method.is_none() {
            errors.insert(FormField::AuthMethod, "Auth method is required");
        }

        let ttls = [
            (FormField::AccessTokenTtl, self.access_token_ttl),
            (FormField::RefreshTokenTtl, self.refresh_token_ttl),
            (FormField::AuthCodeTtl, self.auth_code_ttl),
            (FormField::DeviceCodeTtl, self.device_code_ttl),
            (FormField::MaxRequestTransitTime, self.max_request_transit_time),
        ];
        for (field, value) in ttls {
            if value < 1 {
                errors.insert(field, format!("{} must be at least 1 second", field.label()));
            }
        }

        errors
    }

    /// Build the request body. `None` while a required selection is missing.
    pub fn to_request(&self) -> Option<ClientRequest> {
        Some(ClientRequest {
            name: self.name.clone(),
            description: self.description.clone(),
            application_type: self.application_type?,
            auth_method: self.auth_method?,
            jwk_set_url: self.jwk_set_url.clone(),
            redirect_uris: self.redirect_uris.clone(),
            post_logout_redirect_uris: self.post_logout_redirect_uris.clone(),
            token_settings: self.token_settings(),
        })
    }
}

/// Optional text stays absent until something non-blank is entered. Text
/// that was present, even empty, is sent back as typed.
fn set_text(slot: &mut Option<String>, value: String) {
    *slot = if slot.is_none() && value.trim().is_empty() {
        None
    } else {
        Some(value)
    };
}

impl From<&ClientRecord> for ClientFormFields {
    fn from(record: &ClientRecord) -> Self {
        let defaults = Self::with_settings(record.token_settings.unwrap_or_default());
        Self {
            name: record.name.clone(),
            description: record.description.clone(),
            application_type: record.application_type.or(defaults.application_type),
            auth_method: record.auth_method.or(defaults.auth_method),
            jwk_set_url: record.jwk_set_url.clone(),
            redirect_uris: record.redirect_uris.clone(),
            post_logout_redirect_uris: record.post_logout_redirect_uris.clone(),
            ..defaults
        }
    }
}

/// A single editable field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FormField {
    Name,
    Description,
    ApplicationType,
    AuthMethod,
    JwkSetUrl,
    AccessTokenTtl,
    RefreshTokenTtl,
    AuthCodeTtl,
    DeviceCodeTtl,
    ReuseRefreshTokens,
    MaxRequestTransitTime,
}

impl FormField {
    pub const ALL: [FormField; 11] = [
        Self::Name,
        Self::Description,
        Self::ApplicationType,
        Self::AuthMethod,
        Self::JwkSetUrl,
        Self::AccessTokenTtl,
        Self::RefreshTokenTtl,
        Self::AuthCodeTtl,
        Self::DeviceCodeTtl,
        Self::ReuseRefreshTokens,
        Self::MaxRequestTransitTime,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "Client Name",
            Self::Description => "Description",
            Self::ApplicationType => "Application Type",
            Self::AuthMethod => "Authentication Method",
            Self::JwkSetUrl => "JWK Set URL",
            Self::AccessTokenTtl => "Access Token TTL",
            Self::RefreshTokenTtl => "Refresh Token TTL",
            Self::AuthCodeTtl => "Auth Code TTL",
            Self::DeviceCodeTtl => "Device Code TTL",
            Self::ReuseRefreshTokens => "Reuse Refresh Tokens",
            Self::MaxRequestTransitTime => "Max Request Transit Time",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A new value for one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldEdit {
    Name(String),
    Description(String),
    ApplicationType(Option<ApplicationType>),
    AuthMethod(Option<AuthMethod>),
    JwkSetUrl(String),
    AccessTokenTtl(u32),
    RefreshTokenTtl(u32),
    AuthCodeTtl(u32),
    DeviceCodeTtl(u32),
    ReuseRefreshTokens(bool),
    MaxRequestTransitTime(u32),
}

impl FieldEdit {
    pub fn field(&self) -> FormField {
        match self {
            Self::Name(_) => FormField::Name,
            Self::Description(_) => FormField::Description,
            Self::ApplicationType(_) => FormField::ApplicationType,
            Self::AuthMethod(_) => FormField::AuthMethod,
            Self::JwkSetUrl(_) => FormField::JwkSetUrl,
            Self::AccessTokenTtl(_) => FormField::AccessTokenTtl,
            Self::RefreshTokenTtl(_) => FormField::RefreshTokenTtl,
            Self::AuthCodeTtl(_) => FormField::AuthCodeTtl,
            Self::DeviceCodeTtl(_) => FormField::DeviceCodeTtl,
            Self::ReuseRefreshTokens(_) => FormField::ReuseRefreshTokens,
            Self::MaxRequestTransitTime(_) => FormField::MaxRequestTransitTime,
        }
    }
}

/// Pending validation messages keyed by field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<FormField, String>);

impl FieldErrors {
    pub fn insert(&mut self, field: FormField, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn clear(&mut self, field: FormField) {
        self.0.remove(&field);
    }

    pub fn get(&self, field: FormField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = FormField> + '_ {
        self.0.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FormField, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }
}

/// Whether the form creates a new record or updates an existing one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(RecordId),
}

/// State of the create/edit form.
pub struct FormView {
    api: Arc<dyn ClientsApi>,
    mode: FormMode,
    fields: ClientFormFields,
    errors: FieldErrors,
    redirect_editor: UriListEditor,
    post_logout_editor: UriListEditor,
    loading: bool,
    guard: RequestGuard,
}

impl FormView {
    pub fn create(api: Arc<dyn ClientsApi>) -> Self {
        Self::new(api, FormMode::Create)
    }

    pub fn edit(api: Arc<dyn ClientsApi>, id: RecordId) -> Self {
        Self::new(api, FormMode::Edit(id))
    }

    fn new(api: Arc<dyn ClientsApi>, mode: FormMode) -> Self {
        let loading = matches!(mode, FormMode::Edit(_));
        Self {
            api,
            mode,
            fields: ClientFormFields::default(),
            errors: FieldErrors::default(),
            redirect_editor: UriListEditor::new(UriList::Redirect),
            post_logout_editor: UriListEditor::new(UriList::PostLogout),
            loading,
            guard: RequestGuard::new(),
        }
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn fields(&self) -> &ClientFormFields {
        &self.fields
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// True while an edit-mode prefetch is outstanding.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Prefetch the record in edit mode. Returns the route to leave to if the
    /// form cannot be populated.
    pub async fn mount(&mut self, shell: &dyn Shell) -> Option<Route> {
        let FormMode::Edit(id) = self.mode.clone() else {
            return None;
        };
        let ticket = self.begin_load();
        let result = self.api.get_client(&id).await;
        self.finish_load(ticket, result, shell)
    }

    pub fn begin_load(&mut self) -> Ticket {
        self.loading = true;
        self.guard.issue()
    }

    pub fn finish_load(
        &mut self,
        ticket: Ticket,
        result: ApiResult<ApiResponse<Option<ClientRecord>>>,
        shell: &dyn Shell,
    ) -> Option<Route> {
        if !self.guard.is_current(ticket) {
            debug!("Ignoring stale client response for form");
            return None;
        }

        match result.map(ApiResponse::into_data) {
            Ok(Some(record)) => {
                self.fields = ClientFormFields::from(&record);
                self.errors = FieldErrors::default();
                self.loading = false;
                None
            }
            Ok(None) => {
                error!(mode = ?self.mode, "Client to edit was not returned");
                shell.alert("Failed to load client details.");
                Some(Route::List)
            }
            Err(err) => {
                error!(mode = ?self.mode, error = %err, "Failed to load client for editing");
                shell.alert("Failed to load client details.");
                Some(Route::List)
            }
        }
    }

    pub fn unmount(&mut self) {
        self.guard.detach();
    }

    /// Change one field, clearing its pending error.
    pub fn edit_field(&mut self, edit: FieldEdit) {
        self.errors.clear(edit.field());
        self.fields.apply(edit);
    }

    fn uri_parts(&mut self, list: UriList) -> (&mut UriListEditor, &mut Vec<String>) {
        match list {
            UriList::Redirect => (&mut self.redirect_editor, &mut self.fields.redirect_uris),
            UriList::PostLogout => (
                &mut self.post_logout_editor,
                &mut self.fields.post_logout_redirect_uris,
            ),
        }
    }

    pub fn staged_uri(&self, list: UriList) -> &str {
        match list {
            UriList::Redirect => self.redirect_editor.staged(),
            UriList::PostLogout => self.post_logout_editor.staged(),
        }
    }

    pub fn stage_uri(&mut self, list: UriList, input: impl Into<String>) {
        self.uri_parts(list).0.stage(input);
    }

    pub fn add_uri(&mut self, list: UriList, shell: &dyn Shell) -> AddResult {
        let (editor, uris) = self.uri_parts(list);
        editor.add(uris, shell)
    }

    pub fn remove_uri(&mut self, list: UriList, index: usize) -> Option<String> {
        let (_, uris) = self.uri_parts(list);
        UriListEditor::remove(uris, index)
    }

    /// Validate and send exactly one create or update call.
    pub async fn submit(&mut self, shell: &dyn Shell) -> Outcome {
        if self.loading {
            return Outcome::Cancelled;
        }

        self.errors = self.fields.validate();
        if !self.errors.is_empty() {
            debug!(fields = ?self.errors.fields().collect::<Vec<_>>(), "Form validation failed");
            return Outcome::Invalid;
        }
        let Some(request) = self.fields.to_request() else {
            return Outcome::Invalid;
        };

        match &self.mode {
            FormMode::Create => match self.api.create_client(&request).await {
                Ok(response) => {
                    let id = response.into_data().id;
                    info!(%id, "Client created");
                    shell.notify("Client created successfully!");
                    Outcome::Navigate(Route::Detail(id))
                }
                Err(err) => {
                    error!(error = %err, "Failed to create client");
                    shell.alert("Failed to create client. Please try again.");
                    Outcome::Failed
                }
            },
            FormMode::Edit(id) => match self.api.update_client(id, &request).await {
                Ok(_) => {
                    info!(%id, "Client updated");
                    shell.notify("Client updated successfully!");
                    Outcome::Navigate(Route::Detail(id.clone()))
                }
                Err(err) => {
                    error!(%id, error = %err, "Failed to update client");
                    shell.alert("Failed to update client. Please try again.");
                    Outcome::Failed
                }
            },
        }
    }

    pub fn cancel_route(&self) -> Route {
        match &self.mode {
            FormMode::Create => Route::List,
            FormMode::Edit(id) => Route::Detail(id.clone()),
        }
    }
}
