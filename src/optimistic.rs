use std::future::Future;

use crate::error::Result;
use crate::state::{update, Action, ListState};

/// Apply `optimistic` right away, then await `call`.
///
/// On success `reconcile` may produce a follow-up action from the response.
/// On failure the list is restored to exactly what it was before
/// `optimistic` ran and the error message is recorded.
pub async fn mutate<T, F, R>(
    state: &mut ListState,
    optimistic: Action,
    call: F,
    reconcile: R,
) -> Result<T>
where
    F: Future<Output = Result<T>>,
    R: FnOnce(&ListState, &T) -> Option<Action>,
{
    let snapshot = state.users.clone();
    tracing::debug!(?optimistic, "applying optimistic change");
    update(state, optimistic);

    match call.await {
        Ok(value) => {
            if let Some(action) = reconcile(state, &value) {
                tracing::debug!(?action, "reconciling with server response");
                update(state, action);
            }
            Ok(value)
        }
        Err(e) => {
            tracing::warn!(error = %e, "remote call failed, rolling back");
            update(
                state,
                Action::RolledBack {
                    snapshot,
                    error: e.to_string(),
                },
            );
            Err(e)
        }
    }
}
