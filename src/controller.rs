//! Optimistic list controller.
//!
//! Every mutation is applied to [`ListState`] before the remote call
//! resolves and undone if that call fails. The initial load is bound to the
//! controller's [`Disposer`], so tearing the view down drops its result.

use rand::Rng;

use crate::cancel::{Disposer, Request, Settled};
use crate::error::{Result, UsersError};
use crate::optimistic;
use crate::state::{update, Action, ListState};
use crate::store::UserStore;
use crate::types::{User, UserId};
use crate::validation::NewUser;

/// Lower bound for locally generated ids, well above what the API hands out.
const LOCAL_ID_MIN: UserId = 1 << 32;

pub struct UserListController<S> {
    store: S,
    state: ListState,
    disposer: Disposer,
}

impl<S: UserStore> UserListController<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            state: ListState::default(),
            disposer: Disposer::new(),
        }
    }

    pub fn state(&self) -> &ListState {
        &self.state
    }

    /// Handle that cancels the pending load, e.g. from a signal handler.
    pub fn disposer(&self) -> Disposer {
        self.disposer.clone()
    }

    pub fn is_disposed(&self) -> bool {
        self.disposer.is_disposed()
    }

    /// Tear down the view. A load still in flight never reports back.
    pub fn dispose(&mut self) {
        self.disposer.dispose();
        update(&mut self.state, Action::Disposed);
    }

    /// Fetch the list once. A failure is recorded in the state and also
    /// returned; a cancelled load is neither.
    pub async fn load(&mut self) -> Result<()> {
        if self.disposer.is_disposed() {
            return Ok(());
        }

        update(&mut self.state, Action::LoadStarted);
        let request = Request::new(self.store.list_users(), &self.disposer);

        match request.settle().await {
            Settled::Done(Ok(users)) => {
                tracing::debug!(count = users.len(), "loaded users");
                update(&mut self.state, Action::Loaded(users));
                Ok(())
            }
            Settled::Done(Err(e)) => {
                tracing::warn!(error = %e, "failed to load users");
                update(&mut self.state, Action::LoadFailed(e.to_string()));
                Err(e)
            }
            Settled::Cancelled => {
                tracing::debug!("load cancelled by teardown");
                update(&mut self.state, Action::Disposed);
                Ok(())
            }
        }
    }

    pub async fn delete(&mut self, id: UserId) -> Result<()> {
        optimistic::mutate(
            &mut self.state,
            Action::Removed(id),
            self.store.delete_user(id),
            |_, _| None,
        )
        .await
    }

    /// Prepend a placeholder for `new_user`, then swap in the server's record.
    pub async fn create(&mut self, new_user: NewUser) -> Result<User> {
        let placeholder = User {
            id: self.local_id(),
            name: new_user.name,
            age: Some(new_user.age),
        };
        let local_id = placeholder.id;

        optimistic::mutate(
            &mut self.state,
            Action::Prepended(placeholder.clone()),
            self.store.create_user(&placeholder),
            |state, created| {
                let user = if created.id == local_id || !state.contains(created.id) {
                    created.clone()
                } else {
                    tracing::warn!(
                        server_id = created.id,
                        local_id,
                        "server returned an id already in the list, keeping local id"
                    );
                    User {
                        id: local_id,
                        ..created.clone()
                    }
                };
                Some(Action::Replaced { id: local_id, user })
            },
        )
        .await
    }

    /// Replace the record stored under `user.id` with `user`.
    pub async fn update(&mut self, user: User) -> Result<User> {
        if !self.state.contains(user.id) {
            return Err(UsersError::UserNotFound(user.id));
        }
        let id = user.id;

        optimistic::mutate(
            &mut self.state,
            Action::Replaced {
                id,
                user: user.clone(),
            },
            self.store.update_user(&user),
            |_, updated| {
                (updated.id == id).then(|| Action::Replaced {
                    id,
                    user: updated.clone(),
                })
            },
        )
        .await
    }

    fn local_id(&self) -> UserId {
        let mut rng = rand::rng();
        loop {
            let id = rng.random_range(LOCAL_ID_MIN..UserId::MAX);
            if !self.state.contains(id) {
                return id;
            }
        }
    }
}
