//! Create user command + compute cache.
//!
//! `CreateUserCommand` validates the draft held in [`ModalState`], posts it
//! and writes the outcome to `CreateUserCompute`, the list and the modal.
//!
//! At most one create request is in flight: while `CreateUserCompute` is
//! `Pending` the command refuses to start another.
//!
//! A response that arrives after the dialog was closed still prepends the
//! user; the dialog itself is only touched while the create form is the one
//! open.

use std::any::Any;

use log::{error, info, warn};
use tokio_util::sync::CancellationToken;
use userreg_states::{
    Command, CommandFuture, CommandSnapshot, Compute, ComputeDeps, Dep, State, Updater, no_deps,
    state_assign_impl,
};

use super::api::{self, UsersApiError};
use super::model::User;
use super::state::{ModalKind, ModalState, UserListState};
use crate::config::ApiConfig;

pub const EMAIL_IN_USE_MESSAGE: &str = "El email ya está en uso. Intenta con otro.";
pub const REQUIRED_FIELDS_MESSAGE: &str = "Nombre, apellido y email son obligatorios.";
pub const CREATE_FAILED_MESSAGE: &str = "Hubo un problema al crear el usuario. Intenta de nuevo.";

/// Inline message for an error reported by the API.
pub fn create_error_message(error: &str) -> String {
    format!("Error al crear usuario: {error}")
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CreateUserResult {
    #[default]
    Idle,
    Pending,
    Success(User),
    Error(String),
}

#[derive(Debug, Clone, Default)]
pub struct CreateUserCompute {
    pub result: CreateUserResult,
}

impl CreateUserCompute {
    pub fn is_pending(&self) -> bool {
        matches!(self.result, CreateUserResult::Pending)
    }

    pub fn created(&self) -> Option<&User> {
        match &self.result {
            CreateUserResult::Success(user) => Some(user),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.result {
            CreateUserResult::Error(msg) => Some(msg),
            _ => None,
        }
    }
}

impl Compute for CreateUserCompute {
    fn deps(&self) -> ComputeDeps {
        no_deps()
    }

    fn compute(&self, _deps: Dep<'_>, _updater: Updater) {}
}

impl State for CreateUserCompute {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn snapshot(&self) -> Option<Box<dyn Any + Send>> {
        Some(Box::new(self.clone()))
    }

    fn assign_box(&mut self, new_self: Box<dyn Any + Send>) {
        state_assign_impl(self, new_self);
    }
}

/// Writes `message` to the form error if the create dialog is still open.
fn report_create_error(updater: &Updater, message: String) {
    let for_modal = message.clone();
    updater.update::<ModalState>(move |modal| {
        if modal.is_open_for(ModalKind::Create) {
            modal.error = Some(for_modal);
        }
    });
    updater.set(CreateUserCompute {
        result: CreateUserResult::Error(message),
    });
}

/// Submit the create form.
#[derive(Debug, Default)]
pub struct CreateUserCommand;

impl Command for CreateUserCommand {
    fn run(
        &self,
        snap: CommandSnapshot,
        updater: Updater,
        cancel: CancellationToken,
    ) -> CommandFuture {
        let config = snap.state::<ApiConfig>().clone();
        let modal = snap.state::<ModalState>();
        let in_flight = snap.compute::<CreateUserCompute>().is_pending();
        let form_open = modal.is_open_for(ModalKind::Create);
        let draft = modal.draft.clone();
        let email_taken = snap
            .state::<UserListState>()
            .email_in_use(&draft.email, None);

        Box::pin(async move {
            if in_flight {
                warn!("CreateUserCommand: a create request is already in flight");
                return;
            }
            if !form_open {
                warn!("CreateUserCommand: create dialog is not open");
                return;
            }

            let missing = draft.missing_required();
            if !missing.is_empty() {
                info!("CreateUserCommand: missing required fields {missing:?}");
                report_create_error(&updater, REQUIRED_FIELDS_MESSAGE.to_owned());
                return;
            }
            if email_taken {
                info!("CreateUserCommand: email {} already loaded", draft.email);
                report_create_error(&updater, EMAIL_IN_USE_MESSAGE.to_owned());
                return;
            }

            updater.set(CreateUserCompute {
                result: CreateUserResult::Pending,
            });
            updater.update::<ModalState>(|modal| modal.error = None);

            let result = tokio::select! {
                _ = cancel.cancelled() => {
                    info!("CreateUserCommand: cancelled");
                    updater.set(CreateUserCompute::default());
                    return;
                }
                result = api::create_user(&config, &draft) => result,
            };

            match result {
                Ok(user) => {
                    info!("CreateUserCommand: created user {}", user.id);
                    let prepended = user.clone();
                    updater.update::<UserListState>(move |list| list.prepend(prepended));
                    updater.update::<ModalState>(|modal| {
                        if modal.is_open_for(ModalKind::Create) {
                            modal.close();
                        }
                    });
                    updater.set(CreateUserCompute {
                        result: CreateUserResult::Success(user),
                    });
                }
                Err(UsersApiError::Status { status, message }) => {
                    warn!("CreateUserCommand: API rejected user ({status}): {message}");
                    report_create_error(&updater, create_error_message(&message));
                }
                Err(err) => {
                    error!("CreateUserCommand: request failed: {err}");
                    report_create_error(&updater, CREATE_FAILED_MESSAGE.to_owned());
                }
            }
        })
    }
}
