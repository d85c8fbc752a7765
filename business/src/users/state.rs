//! States backing the user management screen.
//!
//! UI code reads these via `ctx.state::<T>()` and changes them by setting
//! inputs with `ctx.update::<T>()` and dispatching commands.

use std::any::Any;

use chrono::{DateTime, Duration, Utc};
use userreg_states::{State, state_assign_impl};

use super::model::{User, UserDraft};

/// How long the delete notice stays on screen.
pub const NOTICE_DURATION: Duration = Duration::seconds(3);

macro_rules! snapshot_state {
    ($($ty:ty),+ $(,)?) => {$(
        impl State for $ty {
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
    )+};
}

snapshot_state!(UserListState, SearchInput, ModalState, UserActionInput);

/// Every user known locally, in display order.
///
/// Filled by the initial fetch; afterwards the only source of truth.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserListState {
    pub users: Vec<User>,
}

impl UserListState {
    pub fn replace(&mut self, users: Vec<User>) {
        self.users = users;
    }

    pub fn prepend(&mut self, user: User) {
        self.users.insert(0, user);
    }

    /// Removes every user with `id`; returns how many were removed.
    pub fn remove_by_id(&mut self, id: &str) -> usize {
        let before = self.users.len();
        self.users.retain(|user| user.id != id);
        before - self.users.len()
    }

    /// Replaces the user with the same id; `false` when no user matched.
    pub fn replace_user(&mut self, updated: User) -> bool {
        match self.users.iter_mut().find(|user| user.id == updated.id) {
            Some(slot) => {
                *slot = updated;
                true
            }
            None => false,
        }
    }

    /// Exact email match among loaded users, skipping `except_id`.
    pub fn email_in_use(&self, email: &str, except_id: Option<&str>) -> bool {
        self.users.iter().any(|user| {
            Some(user.id.as_str()) != except_id && user.email.as_deref() == Some(email)
        })
    }

    pub fn find(&self, id: &str) -> Option<&User> {
        self.users.iter().find(|user| user.id == id)
    }
}

/// Text typed into the search box.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchInput {
    pub query: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalKind {
    Create,
    View,
    Edit,
}

/// Pending "are you sure?" exchange for a delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteRequest {
    pub user: User,
}

impl DeleteRequest {
    pub fn prompt(&self) -> String {
        format!("¿Estás seguro de eliminar a {}?", self.user.first_name)
    }
}

/// Short-lived message shown after an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub text: String,
    pub shown_at: DateTime<Utc>,
}

impl Notice {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now - self.shown_at >= NOTICE_DURATION
    }
}

/// Which dialog is open, for whom, and what it is editing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModalState {
    /// `None` when no dialog is open.
    pub kind: Option<ModalKind>,
    pub selected: Option<User>,
    pub draft: UserDraft,
    /// Inline error of the create/edit form.
    pub error: Option<String>,
    pub confirm_delete: Option<DeleteRequest>,
    pub notice: Option<Notice>,
}

impl ModalState {
    pub fn is_open(&self) -> bool {
        self.kind.is_some()
    }

    pub fn is_open_for(&self, kind: ModalKind) -> bool {
        self.kind == Some(kind)
    }

    /// Start a new action; clears whatever the previous one left behind.
    pub fn open(&mut self, kind: ModalKind, selected: Option<User>) {
        self.draft = match (kind, &selected) {
            (ModalKind::Edit, Some(user)) => UserDraft::from_user(user),
            _ => UserDraft::default(),
        };
        self.kind = Some(kind);
        self.selected = selected;
        self.error = None;
        self.confirm_delete = None;
        self.notice = None;
    }

    pub fn close(&mut self) {
        self.kind = None;
        self.selected = None;
        self.draft = UserDraft::default();
        self.error = None;
    }

    /// Notice text if it has not expired at `now`.
    pub fn visible_notice(&self, now: DateTime<Utc>) -> Option<&str> {
        self.notice
            .as_ref()
            .filter(|notice| !notice.is_expired(now))
            .map(|notice| notice.text.as_str())
    }
}

/// Target of the next row action, set by the UI before dispatching
/// `OpenUserModalCommand` or `RequestDeleteCommand`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserActionInput {
    pub target: Option<User>,
    pub kind: ModalKind,
}

impl Default for UserActionInput {
    fn default() -> Self {
        Self {
            target: None,
            kind: ModalKind::View,
        }
    }
}
