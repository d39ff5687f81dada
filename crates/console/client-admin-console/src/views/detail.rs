//! One client record in full.

use crate::loadable::{Loadable, RequestGuard, Ticket};
use crate::route::Route;
use crate::shell::{Outcome, Shell};
use client_admin_api::{ApiResponse, ApiResult, ClientsApi};
use client_admin_model::{ClientRecord, RecordId};
use std::sync::Arc;
use tracing::{debug, error, info};

/// Detail view state. `Loaded(None)` means the backend returned no record.
pub struct DetailView {
    api: Arc<dyn ClientsApi>,
    id: RecordId,
    state: Loadable<Option<ClientRecord>>,
    guard: RequestGuard,
}

impl DetailView {
    pub fn new(api: Arc<dyn ClientsApi>, id: RecordId) -> Self {
        Self {
            api,
            id,
            state: Loadable::Loading,
            guard: RequestGuard::new(),
        }
    }

    pub fn id(&self) -> &RecordId {
        &self.id
    }

    pub fn state(&self) -> &Loadable<Option<ClientRecord>> {
        &self.state
    }

    pub fn record(&self) -> Option<&ClientRecord> {
        self.state.loaded().and_then(Option::as_ref)
    }

    /// Point the view at another record. Outstanding loads for the previous
    /// id are superseded. Returns false if the id did not change.
    pub fn retarget(&mut self, id: RecordId) -> bool {
        if id == self.id {
            return false;
        }
        debug!(from = %self.id, to = %id, "Retargeting detail view");
        self.id = id;
        self.state = Loadable::Loading;
        self.guard.invalidate();
        true
    }

    pub fn begin_load(&mut self) -> Ticket {
        self.state = Loadable::Loading;
        self.guard.issue()
    }

    /// Apply a fetch result. Returns false if the response was stale.
    pub fn finish_load(
        &mut self,
        ticket: Ticket,
        result: ApiResult<ApiResponse<Option<ClientRecord>>>,
    ) -> bool {
        if !self.guard.is_current(ticket) {
            debug!(id = %self.id, "Ignoring stale client response");
            return false;
        }

        self.state = match result {
            Ok(response) => Loadable::Loaded(response.into_data()),
            Err(err) => {
                error!(id = %self.id, error = %err, "Failed to load client");
                Loadable::Failed("Failed to load client details.".to_string())
            }
        };
        true
    }

    pub async fn load(&mut self) {
        let ticket = self.begin_load();
        let result = self.api.get_client(&self.id).await;
        self.finish_load(ticket, result);
    }

    pub fn unmount(&mut self) {
        self.guard.detach();
    }

    pub async fn delete(&mut self, shell: &dyn Shell) -> Outcome {
        let Some(name) = self.record().map(|record| record.name.clone()) else {
            return Outcome::Cancelled;
        };
        if !shell.confirm(&format!("Are you sure you want to delete client \"{name}\"?")) {
            return Outcome::Cancelled;
        }

        match self.api.delete_client(&self.id).await {
            Ok(_) => {
                info!(id = %self.id, "Client deleted");
                Outcome::Navigate(Route::List)
            }
            Err(err) => {
                error!(id = %self.id, error = %err, "Failed to delete client");
                shell.alert("Failed to delete client. Please try again.");
                Outcome::Failed
            }
        }
    }

    /// Rotate the secret. A returned secret goes straight to the shell and is
    /// never stored on the view.
    pub async fn rotate_secret(&mut self, shell: &dyn Shell) -> Outcome {
        if self.record().is_none() {
            return Outcome::Cancelled;
        }
        if !shell.confirm("Are you sure you want to rotate the client secret?") {
            return Outcome::Cancelled;
        }

        match self.api.rotate_secret(&self.id).await {
            Ok(response) => {
                let rotation = response.into_data();
                info!(id = %self.id, "Client secret rotated");
                let message = rotation.message.as_deref().unwrap_or("Secret rotated");
                shell.notify(&format!("Secret rotated: {message}"));
                if let Some(secret) = rotation.new_secret.as_deref() {
                    shell.disclose_secret(secret);
                }
                Outcome::Completed
            }
            Err(err) => {
                error!(id = %self.id, error = %err, "Failed to rotate client secret");
                shell.alert("Failed to rotate secret. Please try again.");
                Outcome::Failed
            }
        }
    }

    pub fn edit_route(&self) -> Route {
        Route::Edit(self.id.clone())
    }

    pub fn back_route(&self) -> Route {
        Route::List
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Call, FakeApi, Op, RecordingShell, record};
    use client_admin_model::SecretRotation;

    async fn loaded(fake: &Arc<FakeApi>, id: &str) -> DetailView {
        let api: Arc<dyn ClientsApi> = fake.clone();
        let mut view = DetailView::new(api, RecordId::new(id));
        view.load().await;
        view
    }

    #[tokio::test]
    async fn test_load_record() {
        let fake = Arc::new(FakeApi::with_records(vec![record("5", "Portal")]));
        let view = loaded(&fake, "5").await;

        assert_eq!(view.record().map(|r| r.name.as_str()), Some("Portal"));
        assert_eq!(fake.calls(), vec![Call::Get(RecordId::new("5"))]);
    }

    #[tokio::test]
    async fn test_missing_record_loads_as_none() {
        let fake = Arc::new(FakeApi::default());
        let view = loaded(&fake, "5").await;

        assert_eq!(view.state(), &Loadable::Loaded(None));
        assert!(view.record().is_none());
    }

    #[tokio::test]
    async fn test_load_failure() {
        let fake = Arc::new(FakeApi::default());
        fake.fail(Op::Get);
        let view = loaded(&fake, "5").await;

        assert_eq!(view.state().error(), Some("Failed to load client details."));
    }

    #[tokio::test]
    async fn test_delete_navigates_to_list() {
        let fake = Arc::new(FakeApi::with_records(vec![record("5", "Portal")]));
        let shell = RecordingShell::confirming();
        let mut view = loaded(&fake, "5").await;

        assert_eq!(view.delete(&shell).await, Outcome::Navigate(Route::List));
        assert!(fake.records().is_empty());
    }

    #[tokio::test]
    async fn test_failed_delete_alerts() {
        let fake = Arc::new(FakeApi::with_records(vec![record("5", "Portal")]));
        fake.fail(Op::Delete);
        let shell = RecordingShell::confirming();
        let mut view = loaded(&fake, "5").await;

        assert_eq!(view.delete(&shell).await, Outcome::Failed);
        assert!(view.record().is_some());
        assert_eq!(shell.alerts(), vec!["Failed to delete client. Please try again."]);
    }

    #[tokio::test]
    async fn test_rotate_discloses_secret_once() {
        let fake = Arc::new(FakeApi::with_records(vec![record("5", "Portal")]));
        fake.set_rotation(SecretRotation {
            message: Some("Client secret rotated successfully".to_string()),
            new_secret: Some("s3cr3t".to_string()),
            client_id: Some("client-5".to_string()),
        });
        let shell = RecordingShell::confirming();
        let mut view = loaded(&fake, "5").await;

        assert_eq!(view.rotate_secret(&shell).await, Outcome::Completed);
        assert_eq!(
            shell.prompts(),
            vec!["Are you sure you want to rotate the client secret?"]
        );
        assert_eq!(
            shell.notices(),
            vec!["Secret rotated: Client secret rotated successfully"]
        );
        assert_eq!(shell.secrets(), vec!["s3cr3t"]);
    }

    #[tokio::test]
    async fn test_rotate_without_secret_only_notifies() {
        let fake = Arc::new(FakeApi::with_records(vec![record("5", "Portal")]));
        let shell = RecordingShell::confirming();
        let mut view = loaded(&fake, "5").await;

        view.rotate_secret(&shell).await;
        assert_eq!(shell.notices().len(), 1);
        assert!(shell.secrets().is_empty());
    }

    #[tokio::test]
    async fn test_declined_rotation_sends_nothing() {
        let fake = Arc::new(FakeApi::with_records(vec![record("5", "Portal")]));
        let shell = RecordingShell::declining();
        let mut view = loaded(&fake, "5").await;

        assert_eq!(view.rotate_secret(&shell).await, Outcome::Cancelled);
        assert_eq!(fake.calls(), vec![Call::Get(RecordId::new("5"))]);
    }

    #[tokio::test]
    async fn test_failed_rotation_alerts() {
        let fake = Arc::new(FakeApi::with_records(vec![record("5", "Portal")]));
        fake.fail(Op::Rotate);
        let shell = RecordingShell::confirming();
        let mut view = loaded(&fake, "5").await;

        assert_eq!(view.rotate_secret(&shell).await, Outcome::Failed);
        assert_eq!(shell.alerts(), vec!["Failed to rotate secret. Please try again."]);
        assert!(shell.secrets().is_empty());
    }

    #[tokio::test]
    async fn test_retarget_drops_response_for_old_id() {
        let fake = Arc::new(FakeApi::with_records(vec![record("5", "Five"), record("6", "Six")]));
        let api: Arc<dyn ClientsApi> = fake.clone();
        let mut view = DetailView::new(api, RecordId::new("5"));

        let old = view.begin_load();
        assert!(view.retarget(RecordId::new("6")));
        assert!(!view.retarget(RecordId::new("6")));
        assert!(!view.finish_load(old, Ok(ApiResponse::ok(Some(record("5", "Five"))))));
        assert!(view.state().is_loading());

        view.load().await;
        assert_eq!(view.record().map(|r| r.name.as_str()), Some("Six"));
        assert_eq!(view.edit_route(), Route::Edit(RecordId::new("6")));
    }
}
