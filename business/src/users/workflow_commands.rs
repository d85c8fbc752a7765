//! Local modal workflow: open/close dialogs, save edits, delete with
//! confirmation.
//!
//! UI sets [`UserActionInput`] via `ctx.update(...)` when a command needs a
//! target row, then dispatches. None of these commands perform IO, so their
//! updates are queued by the time `dispatch` returns.

use log::{info, warn};
use tokio_util::sync::CancellationToken;
use userreg_states::{Command, CommandFuture, CommandSnapshot, Time, Updater};

use super::create_user::EMAIL_IN_USE_MESSAGE;
use super::state::{
    DeleteRequest, ModalKind, ModalState, Notice, UserActionInput, UserListState,
};

pub const NAMES_REQUIRED_MESSAGE: &str = "Nombre y apellido son obligatorios.";

fn deleted_notice(first_name: &str) -> String {
    format!("Usuario {first_name} eliminado")
}

/// Open the empty create form.
#[derive(Debug, Default)]
pub struct OpenCreateModalCommand;

impl Command for OpenCreateModalCommand {
    fn run(&self, _snap: CommandSnapshot, updater: Updater, _: CancellationToken) -> CommandFuture {
        Box::pin(async move {
            updater.update::<ModalState>(|modal| modal.open(ModalKind::Create, None));
        })
    }
}

/// Open the view or edit dialog for `UserActionInput::target`.
#[derive(Debug, Default)]
pub struct OpenUserModalCommand;

impl Command for OpenUserModalCommand {
    fn run(&self, snap: CommandSnapshot, updater: Updater, _: CancellationToken) -> CommandFuture {
        let input = snap.state::<UserActionInput>().clone();

        Box::pin(async move {
            let Some(user) = input.target else {
                warn!("OpenUserModalCommand: no target user set");
                return;
            };
            updater.update::<ModalState>(move |modal| modal.open(input.kind, Some(user)));
        })
    }
}

/// Close whatever dialog is open.
#[derive(Debug, Default)]
pub struct CloseModalCommand;

impl Command for CloseModalCommand {
    fn run(&self, _snap: CommandSnapshot, updater: Updater, _: CancellationToken) -> CommandFuture {
        Box::pin(async move {
            updater.update::<ModalState>(ModalState::close);
        })
    }
}

/// Save the edit form over the selected user. Local only.
#[derive(Debug, Default)]
pub struct SaveEditCommand;

impl Command for SaveEditCommand {
    fn run(&self, snap: CommandSnapshot, updater: Updater, _: CancellationToken) -> CommandFuture {
        let modal = snap.state::<ModalState>().clone();
        let list = snap.state::<UserListState>();
        let email = modal.draft.email.trim();
        let email_taken = !email.is_empty()
            && modal.selected.as_ref().is_some_and(|selected| {
                list.email_in_use(email, Some(selected.id.as_str()))
            });

        Box::pin(async move {
            if !modal.is_open_for(ModalKind::Edit) {
                warn!("SaveEditCommand: edit dialog is not open");
                return;
            }
            let Some(selected) = modal.selected else {
                warn!("SaveEditCommand: no user selected");
                return;
            };

            let error = if !modal.draft.missing_names().is_empty() {
                Some(NAMES_REQUIRED_MESSAGE)
            } else if email_taken {
                Some(EMAIL_IN_USE_MESSAGE)
            } else {
                None
            };
            if let Some(error) = error {
                updater.update::<ModalState>(move |modal| {
                    if modal.is_open_for(ModalKind::Edit) {
                        modal.error = Some(error.to_owned());
                    }
                });
                return;
            }

            let updated = modal.draft.into_user(selected.id);
            info!("SaveEditCommand: saving user {}", updated.id);
            updater.update::<UserListState>(move |list| {
                let id = updated.id.clone();
                if !list.replace_user(updated) {
                    warn!("SaveEditCommand: user {id} is no longer loaded");
                }
            });
            updater.update::<ModalState>(ModalState::close);
        })
    }
}

/// Ask for confirmation before deleting `UserActionInput::target`.
#[derive(Debug, Default)]
pub struct RequestDeleteCommand;

impl Command for RequestDeleteCommand {
    fn run(&self, snap: CommandSnapshot, updater: Updater, _: CancellationToken) -> CommandFuture {
        let target = snap.state::<UserActionInput>().target.clone();

        Box::pin(async move {
            let Some(user) = target else {
                warn!("RequestDeleteCommand: no target user set");
                return;
            };
            updater.update::<ModalState>(move |modal| {
                modal.error = None;
                modal.notice = None;
                modal.confirm_delete = Some(DeleteRequest { user });
            });
        })
    }
}

/// Remove the user of the pending delete request and show a notice.
#[derive(Debug, Default)]
pub struct ConfirmDeleteCommand;

impl Command for ConfirmDeleteCommand {
    fn run(&self, snap: CommandSnapshot, updater: Updater, _: CancellationToken) -> CommandFuture {
        let request = snap.state::<ModalState>().confirm_delete.clone();
        let now = snap.state::<Time>().now();

        Box::pin(async move {
            let Some(request) = request else {
                warn!("ConfirmDeleteCommand: nothing to confirm");
                return;
            };

            let id = request.user.id;
            let text = deleted_notice(&request.user.first_name);
            info!("ConfirmDeleteCommand: deleting user {id}");

            let removed_id = id.clone();
            updater.update::<UserListState>(move |list| {
                list.remove_by_id(&removed_id);
            });
            updater.update::<ModalState>(move |modal| {
                modal.confirm_delete = None;
                if modal.selected.as_ref().is_some_and(|user| user.id == id) {
                    modal.close();
                }
                modal.notice = Some(Notice {
                    text,
                    shown_at: now,
                });
            });
        })
    }
}

/// Drop the pending delete request.
#[derive(Debug, Default)]
pub struct CancelDeleteCommand;

impl Command for CancelDeleteCommand {
    fn run(&self, _snap: CommandSnapshot, updater: Updater, _: CancellationToken) -> CommandFuture {
        Box::pin(async move {
            updater.update::<ModalState>(|modal| modal.confirm_delete = None);
        })
    }
}

/// Hide the notice before it expires.
#[derive(Debug, Default)]
pub struct DismissNoticeCommand;

impl Command for DismissNoticeCommand {
    fn run(&self, _snap: CommandSnapshot, updater: Updater, _: CancellationToken) -> CommandFuture {
        Box::pin(async move {
            updater.update::<ModalState>(|modal| modal.notice = None);
        })
    }
}
