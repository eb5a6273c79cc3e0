use std::future::Future;

use tokio::task::JoinHandle;

use crate::cancel::Disposer;
use crate::cli::{CreateArgs, UpdateArgs};
use crate::controller::UserListController;
use crate::error::{Result, UsersError};
use crate::output;
use crate::store::UserStore;
use crate::types::{User, UserDraft, UserId};
use crate::validation;

/// A mounted list view for the length of one command.
struct View<S> {
    controller: UserListController<S>,
    interrupt: Disposer,
    watcher: JoinHandle<()>,
}

impl<S: UserStore> View<S> {
    /// Load once, with Ctrl-C tearing the load down.
    ///
    /// Returns `None` when the view was torn down before the list arrived.
    async fn mount(store: S) -> Result<Option<Self>> {
        let controller = UserListController::new(store);
        let interrupt = controller.disposer();

        // The first `ctrl_c()` replaces the default SIGINT handler for the rest
        // of the process, so the watcher stays alive until the view drops and
        // every later network call is raced against it via `interruptible`.
        let watcher = tokio::spawn({
            let interrupt = interrupt.clone();
            async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    interrupt.dispose();
                }
            }
        });

        let mut view = Self {
            controller,
            interrupt,
            watcher,
        };

        output::print_status("Loading users...");
        let loaded = view.controller.load().await;

        if view.controller.is_disposed() {
            return Ok(None);
        }
        loaded.map_err(|e| UsersError::LoadFailed(Box::new(e)))?;

        Ok(Some(view))
    }
}

impl<S> Drop for View<S> {
    fn drop(&mut self) {
        self.watcher.abort();
    }
}

/// Await `future` unless `interrupt` is disposed first.
async fn interruptible<F: Future>(interrupt: &Disposer, future: F) -> Result<F::Output> {
    tokio::select! {
        biased;
        _ = interrupt.disposed() => Err(UsersError::Interrupted),
        output = future => Ok(output),
    }
}

pub async fn list<S: UserStore>(store: S) -> Result<()> {
    let Some(view) = View::mount(store).await? else {
        return Ok(());
    };

    output::print_users(view.controller.state());
    Ok(())
}

pub async fn create<S: UserStore>(store: S, args: CreateArgs) -> Result<()> {
    let draft = UserDraft::new(args.name, args.age);
    // reject bad input before touching the network
    let new_user = validation::validate(&draft)?;

    let Some(mut view) = View::mount(store).await? else {
        return Ok(());
    };

    let outcome = interruptible(&view.interrupt, view.controller.create(new_user)).await?;
    output::print_users(view.controller.state());
    let created = outcome?;

    output::print_message(&format!("Created user {} ({})", created.name, created.id));
    Ok(())
}

pub async fn update<S: UserStore>(store: S, args: UpdateArgs) -> Result<()> {
    let Some(mut view) = View::mount(store).await? else {
        return Ok(());
    };

    let existing = view
        .controller
        .state()
        .find(args.id)
        .cloned()
        .ok_or(UsersError::UserNotFound(args.id))?;
    let edited = apply_edit(&existing, args.name, args.age)?;

    let outcome = interruptible(&view.interrupt, view.controller.update(edited)).await?;
    output::print_users(view.controller.state());
    let updated = outcome?;

    output::print_message(&format!("Updated user {}", updated.id));
    Ok(())
}

pub async fn delete<S: UserStore>(store: S, id: UserId) -> Result<()> {
    let Some(mut view) = View::mount(store).await? else {
        return Ok(());
    };

    if view.controller.state().find(id).is_none() {
        return Err(UsersError::UserNotFound(id));
    }

    let outcome = interruptible(&view.interrupt, view.controller.delete(id)).await?;
    output::print_users(view.controller.state());
    outcome?;

    output::print_message(&format!("Deleted user {id}"));
    Ok(())
}

/// Merge the provided fields into `existing` and run them through the form schema.
fn apply_edit(existing: &User, name: Option<String>, age: Option<i64>) -> Result<User> {
    let mut draft = UserDraft::from(existing);
    if name.is_some() {
        draft.name = name;
    }
    if age.is_some() {
        draft.age = age;
    }

    let edited = validation::submit(&draft, |valid| User {
        id: existing.id,
        name: valid.name,
        age: Some(valid.age),
    })?;
    Ok(edited)
}
