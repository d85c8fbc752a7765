//! User management domain.
//!
//! - States: the loaded list, the search box, the modal session.
//! - Computes: the filtered rows, and caches for the fetch/create requests.
//! - Commands: fetch, create, and the local modal workflow.
//!
//! UI code under `ui/src/widgets/**` does not define domain types; it reads
//! via `ctx.state::<T>()` / `ctx.cached::<T>()` and writes by dispatching.

pub mod api;
pub mod create_user;
pub mod fetch_users;
pub mod filter_compute;
pub mod model;
pub mod state;
pub mod workflow_commands;

use userreg_states::StateCtx;

use crate::config::ApiConfig;

pub use create_user::{
    CREATE_FAILED_MESSAGE, CreateUserCommand, CreateUserCompute, CreateUserResult,
    EMAIL_IN_USE_MESSAGE, REQUIRED_FIELDS_MESSAGE,
};
pub use fetch_users::{FetchUsersCommand, FetchUsersCompute, FetchUsersResult};
pub use filter_compute::{FilteredUsersCompute, filter_users};
pub use model::{User, UserDraft};
pub use state::{
    DeleteRequest, ModalKind, ModalState, NOTICE_DURATION, Notice, SearchInput, UserActionInput,
    UserListState,
};
pub use workflow_commands::{
    CancelDeleteCommand, CloseModalCommand, ConfirmDeleteCommand, DismissNoticeCommand,
    NAMES_REQUIRED_MESSAGE, OpenCreateModalCommand, OpenUserModalCommand, RequestDeleteCommand,
    SaveEditCommand,
};

/// Register every user-management state, compute and command on `ctx`.
pub fn register(ctx: &mut StateCtx, config: ApiConfig) {
    ctx.add_state(config);
    ctx.add_state(UserListState::default());
    ctx.add_state(SearchInput::default());
    ctx.add_state(ModalState::default());
    ctx.add_state(UserActionInput::default());

    ctx.record_compute(FilteredUsersCompute::default());
    ctx.record_compute(FetchUsersCompute::default());
    ctx.record_compute(CreateUserCompute::default());

    ctx.record_command(FetchUsersCommand);
    ctx.record_command(CreateUserCommand);
    ctx.record_command(OpenCreateModalCommand);
    ctx.record_command(OpenUserModalCommand);
    ctx.record_command(CloseModalCommand);
    ctx.record_command(SaveEditCommand);
    ctx.record_command(RequestDeleteCommand);
    ctx.record_command(ConfirmDeleteCommand);
    ctx.record_command(CancelDeleteCommand);
    ctx.record_command(DismissNoticeCommand);
}
