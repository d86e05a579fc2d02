//! The task list controller.
//!
//! # Design
//! `TaskListClient` owns the state and the request builder but performs no
//! I/O. User intents and I/O completions go in; `Command`s come out for the
//! host to execute: send a request, start a status timer, or ask the user a
//! yes/no question. Each request carries a `Pending` snapshot of what it was
//! for (the submitted draft, the edited id) and the host hands that snapshot
//! back with the outcome, so a completion is applied to the values that were
//! submitted and not to whatever the forms hold by then.
//!
//! There is no request coordination. Two overlapping submits both run and
//! both apply their completions in whatever order they arrive.

use std::time::Duration;

use crate::api::TaskApi;
use crate::http::{HttpRequest, HttpResponse, TransportError};
use crate::state::{Action, TaskListState};
use crate::types::{Field, ItemFields, ItemId};
use crate::view::{self, View};

pub const DEFAULT_STATUS_TTL: Duration = Duration::from_millis(3000);
pub const DELETE_PROMPT: &str = "Are you sure want to delete?";

/// What an in-flight request was issued for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pending {
    Load,
    Create(ItemFields),
    Update { id: ItemId, fields: ItemFields },
    Delete(ItemId),
}

/// Side effects requested from the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Execute `request`, then call `TaskListClient::complete` with `pending`.
    Send {
        pending: Pending,
        request: HttpRequest,
    },
    /// After `delay`, call `TaskListClient::expire_status(generation)`.
    ClearStatusAfter { generation: u64, delay: Duration },
    /// Ask the user; answer with `TaskListClient::confirm_delete`.
    Confirm { prompt: &'static str, id: ItemId },
}

#[derive(Debug)]
pub struct TaskListClient {
    api: TaskApi,
    state: TaskListState,
    status_ttl: Duration,
    mounted: bool,
}

impl TaskListClient {
    pub fn new(api: TaskApi) -> Self {
        Self {
            api,
            state: TaskListState::new(),
            status_ttl: DEFAULT_STATUS_TTL,
            mounted: false,
        }
    }

    pub fn with_status_ttl(mut self, ttl: Duration) -> Self {
        self.status_ttl = ttl;
        self
    }

    pub fn state(&self) -> &TaskListState {
        &self.state
    }

    pub fn api(&self) -> &TaskApi {
        &self.api
    }

    pub fn view(&self) -> View {
        view::render(&self.state)
    }

    /// Initial fetch. Only the first call issues a request.
    pub fn mount(&mut self) -> Vec<Command> {
        if self.mounted {
            return Vec::new();
        }
        self.mounted = true;
        vec![Command::Send {
            pending: Pending::Load,
            request: self.api.build_list_items(),
        }]
    }

    pub fn set_new_title(&mut self, value: impl Into<String>) {
        self.state.reduce(Action::NewDraftChanged(Field::Title, value.into()));
    }

    pub fn set_new_description(&mut self, value: impl Into<String>) {
        self.state.reduce(Action::NewDraftChanged(Field::Description, value.into()));
    }

    pub fn set_edit_title(&mut self, value: impl Into<String>) {
        self.state.reduce(Action::EditDraftChanged(Field::Title, value.into()));
    }

    pub fn set_edit_description(&mut self, value: impl Into<String>) {
        self.state.reduce(Action::EditDraftChanged(Field::Description, value.into()));
    }

    pub fn submit_new_item(&mut self) -> Vec<Command> {
        self.state.reduce(Action::SubmitStarted);
        let fields = self.state.new_draft.clone();
        if fields.validate().is_err() {
            self.state.reduce(Action::ValidationFailed);
            return Vec::new();
        }
        match self.api.build_create_item(&fields) {
            Ok(request) => vec![Command::Send {
                pending: Pending::Create(fields),
                request,
            }],
            Err(err) => {
                tracing::error!(error = %err, "could not encode create request");
                self.state.reduce(Action::CreateRejected);
                Vec::new()
            }
        }
    }

    pub fn begin_edit(&mut self, id: &ItemId) {
        let Some(item) = self.state.item(id) else {
            tracing::warn!(%id, "edit requested for an item that is not in the list");
            return;
        };
        let fields = item.fields();
        self.state.reduce(Action::EditStarted {
            id: id.clone(),
            fields,
        });
    }

    pub fn submit_edit(&mut self) -> Vec<Command> {
        let Some(id) = self.state.edit.editing_id().cloned() else {
            tracing::debug!("update submitted with no item in edit mode");
            return Vec::new();
        };
        self.state.reduce(Action::SubmitStarted);
        let fields = self.state.edit.draft().clone();
        if fields.validate().is_err() {
            self.state.reduce(Action::ValidationFailed);
            return Vec::new();
        }
        match self.api.build_update_item(&id, &fields) {
            Ok(request) => vec![Command::Send {
                pending: Pending::Update { id, fields },
                request,
            }],
            Err(err) => {
                tracing::error!(error = %err, "could not encode update request");
                self.state.reduce(Action::UpdateRejected);
                Vec::new()
            }
        }
    }

    pub fn cancel_edit(&mut self) {
        self.state.reduce(Action::EditCancelled);
    }

    /// Asks for confirmation first; nothing changes until `confirm_delete`.
    pub fn delete_item(&mut self, id: &ItemId) -> Vec<Command> {
        if self.state.item(id).is_none() {
            tracing::warn!(%id, "delete requested for an item that is not in the list");
            return Vec::new();
        }
        vec![Command::Confirm {
            prompt: DELETE_PROMPT,
            id: id.clone(),
        }]
    }

    pub fn confirm_delete(&mut self, id: ItemId, confirmed: bool) -> Vec<Command> {
        if !confirmed {
            return Vec::new();
        }
        let request = self.api.build_delete_item(&id);
        vec![Command::Send {
            pending: Pending::Delete(id),
            request,
        }]
    }

    /// Apply the outcome of a request issued through `Command::Send`.
    pub fn complete(
        &mut self,
        pending: Pending,
        result: Result<HttpResponse, TransportError>,
    ) -> Vec<Command> {
        match pending {
            Pending::Load => {
                let action = match result.map(|response| self.api.parse_list_items(response)) {
                    Ok(Ok(items)) => {
                        tracing::debug!(count = items.len(), "items loaded");
                        Action::LoadSucceeded(items)
                    }
                    Ok(Err(err)) => {
                        tracing::warn!(error = %err, "list response unusable");
                        Action::LoadFailed
                    }
                    Err(err) => {
                        tracing::warn!(error = %err, "list request failed");
                        Action::LoadFailed
                    }
                };
                self.state.reduce(action);
                Vec::new()
            }
            Pending::Create(fields) => match result {
                Ok(response) => match self.api.parse_create_item(response) {
                    Ok(id) => {
                        if id.is_none() {
                            tracing::warn!("create response carried no id; appending without one");
                        }
                        self.state.reduce(Action::CreateSucceeded { fields, id });
                        self.schedule_status_clear()
                    }
                    Err(err) => {
                        tracing::warn!(error = %err, "create rejected");
                        self.state.reduce(Action::CreateRejected);
                        Vec::new()
                    }
                },
                Err(err) => self.connection_failed(&err),
            },
            Pending::Update { id, fields } => match result {
                Ok(response) => match self.api.parse_update_item(response) {
                    Ok(()) => {
                        self.state.reduce(Action::UpdateSucceeded { id, fields });
                        self.schedule_status_clear()
                    }
                    Err(err) => {
                        tracing::warn!(%id, error = %err, "update rejected");
                        self.state.reduce(Action::UpdateRejected);
                        Vec::new()
                    }
                },
                Err(err) => self.connection_failed(&err),
            },
            Pending::Delete(id) => {
                match result {
                    Ok(response) => {
                        let outcome = self.api.parse_delete_item(&response);
                        if !outcome.acknowledged {
                            tracing::warn!(
                                %id,
                                status = outcome.status,
                                "delete not acknowledged; removing locally anyway"
                            );
                        }
                        self.state.reduce(Action::DeleteConfirmed(id));
                    }
                    // Only a completed response removes the row.
                    Err(err) => tracing::warn!(%id, error = %err, "delete request failed"),
                }
                Vec::new()
            }
        }
    }

    pub fn expire_status(&mut self, generation: u64) {
        self.state.reduce(Action::StatusExpired(generation));
    }

    fn connection_failed(&mut self, err: &TransportError) -> Vec<Command> {
        tracing::warn!(error = %err, "request did not complete");
        self.state.reduce(Action::ConnectionFailed);
        Vec::new()
    }

    fn schedule_status_clear(&self) -> Vec<Command> {
        self.state
            .banner
            .status_generation()
            .map(|generation| Command::ClearStatusAfter {
                generation,
                delay: self.status_ttl,
            })
            .into_iter()
            .collect()
    }
}
