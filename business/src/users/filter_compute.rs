//! Search-box filtering of the loaded users.

use std::any::{Any, TypeId};

use userreg_states::{Compute, ComputeDeps, Dep, State, Updater, state_assign_impl};

use super::model::User;
use super::state::{SearchInput, UserListState};

/// Users whose lower-cased first name contains the lower-cased `query`.
///
/// An empty query keeps every user, in order.
pub fn filter_users(users: &[User], query: &str) -> Vec<User> {
    if query.is_empty() {
        return users.to_vec();
    }

    let needle = query.to_lowercase();
    users
        .iter()
        .filter(|user| user.first_name.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

/// Rows currently shown in the table.
///
/// Re-derived whenever [`UserListState`] or [`SearchInput`] changes.
#[derive(Debug, Clone, Default)]
pub struct FilteredUsersCompute {
    pub users: Vec<User>,
}

impl Compute for FilteredUsersCompute {
    fn deps(&self) -> ComputeDeps {
        (
            vec![TypeId::of::<UserListState>(), TypeId::of::<SearchInput>()],
            Vec::new(),
        )
    }

    fn compute(&self, deps: Dep<'_>, updater: Updater) {
        let list = deps.state::<UserListState>();
        let search = deps.state::<SearchInput>();

        updater.set(Self {
            users: filter_users(&list.users, &search.query),
        });
    }
}

impl State for FilteredUsersCompute {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn assign_box(&mut self, new_self: Box<dyn Any + Send>) {
        state_assign_impl(self, new_self);
    }
}
