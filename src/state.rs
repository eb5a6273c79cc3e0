//! List state and the actions that change it.
//!
//! ```text
//! ListState + Action  ->  update()  ->  ListState
//! ```
//!
//! Nothing here performs I/O; the controller dispatches actions as requests
//! start, resolve and fail.

use crate::types::{User, UserId};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListState {
    pub users: Vec<User>,
    /// Last failure description. Later failures overwrite earlier ones.
    pub error: Option<String>,
    pub loading: bool,
}

impl ListState {
    pub fn contains(&self, id: UserId) -> bool {
        self.users.iter().any(|u| u.id == id)
    }

    pub fn find(&self, id: UserId) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    LoadStarted,
    Loaded(Vec<User>),
    LoadFailed(String),
    /// Teardown of the view; the pending load will never report back.
    Disposed,
    Prepended(User),
    Removed(UserId),
    /// Replace the record currently stored under `id`.
    Replaced { id: UserId, user: User },
    /// Restore a snapshot taken before an optimistic change.
    RolledBack { snapshot: Vec<User>, error: String },
}

pub fn update(state: &mut ListState, action: Action) {
    match action {
        Action::LoadStarted => {
            state.loading = true;
        }
        Action::Loaded(users) => {
            state.users = users;
            state.loading = false;
        }
        Action::LoadFailed(error) => {
            state.error = Some(error);
            state.loading = false;
        }
        Action::Disposed => {
            state.loading = false;
        }
        Action::Prepended(user) => {
            state.users.insert(0, user);
        }
        Action::Removed(id) => {
            state.users.retain(|u| u.id != id);
        }
        Action::Replaced { id, user } => {
            if let Some(slot) = state.users.iter_mut().find(|u| u.id == id) {
                *slot = user;
            }
        }
        Action::RolledBack { snapshot, error } => {
            state.users = snapshot;
            state.error = Some(error);
        }
    }
}
