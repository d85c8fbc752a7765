//! Initial load of the first page of users.
//!
//! `FetchUsersCompute` is a command-fed cache: its `compute` is a no-op and
//! only `FetchUsersCommand` writes it. A failed fetch leaves
//! [`UserListState`] untouched and is only reported here and in the log.

use std::any::Any;

use log::{error, info};
use tokio_util::sync::CancellationToken;
use userreg_states::{
    Command, CommandFuture, CommandSnapshot, Compute, ComputeDeps, Dep, State, Updater, no_deps,
    state_assign_impl,
};

use super::api;
use super::state::UserListState;
use crate::config::ApiConfig;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FetchUsersResult {
    #[default]
    Idle,
    Loading,
    /// Number of users received.
    Loaded(usize),
    Error(String),
}

#[derive(Debug, Clone, Default)]
pub struct FetchUsersCompute {
    pub result: FetchUsersResult,
}

impl FetchUsersCompute {
    pub fn is_loading(&self) -> bool {
        matches!(self.result, FetchUsersResult::Loading)
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.result {
            FetchUsersResult::Error(msg) => Some(msg),
            _ => None,
        }
    }
}

impl Compute for FetchUsersCompute {
    fn deps(&self) -> ComputeDeps {
        no_deps()
    }

    fn compute(&self, _deps: Dep<'_>, _updater: Updater) {}
}

impl State for FetchUsersCompute {
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

/// Fetch `page`/`page_limit` users and replace the local list with them.
///
/// The UI dispatches this once, on its first frame.
#[derive(Debug, Default)]
pub struct FetchUsersCommand;

impl Command for FetchUsersCommand {
    fn run(
        &self,
        snap: CommandSnapshot,
        updater: Updater,
        cancel: CancellationToken,
    ) -> CommandFuture {
        let config = snap.state::<ApiConfig>().clone();

        Box::pin(async move {
            updater.set(FetchUsersCompute {
                result: FetchUsersResult::Loading,
            });

            let result = tokio::select! {
                _ = cancel.cancelled() => {
                    info!("FetchUsersCommand: cancelled");
                    return;
                }
                result = api::list_users(&config) => result,
            };

            match result {
                Ok(users) => {
                    let count = users.len();
                    info!("FetchUsersCommand: loaded {count} users");
                    updater.update::<UserListState>(move |list| list.replace(users));
                    updater.set(FetchUsersCompute {
                        result: FetchUsersResult::Loaded(count),
                    });
                }
                Err(err) => {
                    error!("FetchUsersCommand: failed to fetch users: {err}");
                    updater.set(FetchUsersCompute {
                        result: FetchUsersResult::Error(err.to_string()),
                    });
                }
            }
        })
    }
}
