//! All clients of the active organization.

use crate::loadable::{Loadable, RequestGuard, Ticket};
use crate::shell::{Outcome, Shell};
use client_admin_api::{ApiResponse, ApiResult, ClientsApi};
use client_admin_model::{ClientRecord, RecordId};
use std::sync::Arc;
use tracing::{debug, error, info};

pub struct ListView {
    api: Arc<dyn ClientsApi>,
    state: Loadable<Vec<ClientRecord>>,
    guard: RequestGuard,
}

impl ListView {
    pub fn new(api: Arc<dyn ClientsApi>) -> Self {
        Self {
            api,
            state: Loadable::Loading,
            guard: RequestGuard::new(),
        }
    }

    pub fn state(&self) -> &Loadable<Vec<ClientRecord>> {
        &self.state
    }

    pub fn records(&self) -> &[ClientRecord] {
        self.state.loaded().map(Vec::as_slice).unwrap_or_default()
    }

    pub fn begin_load(&mut self) -> Ticket {
        self.state = Loadable::Loading;
        self.guard.issue()
    }

    /// Apply a list response. Returns false if the response was stale.
    pub fn finish_load(
        &mut self,
        ticket: Ticket,
        result: ApiResult<ApiResponse<Vec<ClientRecord>>>,
    ) -> bool {
        if !self.guard.is_current(ticket) {
            debug!("Ignoring stale client list response");
            return false;
        }

        self.state = match result {
            Ok(response) => Loadable::Loaded(response.into_data()),
            Err(err) => {
                error!(error = %err, "Failed to load clients");
                Loadable::Failed("Failed to load clients. Please try again.".to_string())
            }
        };
        true
    }

    pub async fn load(&mut self) {
        let ticket = self.begin_load();
        let result = self.api.list_clients().await;
        self.finish_load(ticket, result);
    }

    pub fn unmount(&mut self) {
        self.guard.detach();
    }

    /// Delete one row after confirmation. The row is dropped locally on
    /// success; the list is not fetched again.
    pub async fn delete(&mut self, id: &RecordId, shell: &dyn Shell) -> Outcome {
        let Some(name) = self
            .records()
            .iter()
            .find(|record| &record.id == id)
            .map(|record| record.name.clone())
        else {
            debug!(%id, "Delete requested for a client not in the list");
            return Outcome::Cancelled;
        };

        if !shell.confirm(&format!("Are you sure you want to delete client \"{name}\"?")) {
            return Outcome::Cancelled;
        }

        match self.api.delete_client(id).await {
            Ok(_) => {
                info!(%id, "Client deleted");
                if let Some(records) = self.state.loaded_mut() {
                    records.retain(|record| &record.id != id);
                }
                Outcome::Completed
            }
            Err(err) => {
                error!(%id, error = %err, "Failed to delete client");
                shell.alert("Failed to delete client. Please try again.");
                Outcome::Failed
            }
        }
    }
}
