//! Requests that can be torn down before they resolve.

use std::future::Future;

use tokio_util::sync::CancellationToken;

/// Handle that tears down a pending [`Request`]. Disposing twice is a no-op.
#[derive(Clone, Debug, Default)]
pub struct Disposer {
    token: CancellationToken,
}

impl Disposer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dispose(&self) {
        self.token.cancel();
    }

    pub fn is_disposed(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Resolves once [`Disposer::dispose`] has been called on any clone.
    pub async fn disposed(&self) {
        self.token.cancelled().await;
    }

    fn token(&self) -> CancellationToken {
        self.token.clone()
    }
}

/// Outcome of a request that may have been disposed.
#[derive(Debug)]
pub enum Settled<T> {
    Done(T),
    Cancelled,
}

pub struct Request<F> {
    future: F,
    token: CancellationToken,
}

impl<F: Future> Request<F> {
    /// Bind `future` to `disposer`; the result is dropped once it is disposed.
    pub fn new(future: F, disposer: &Disposer) -> Self {
        Self {
            future,
            token: disposer.token(),
        }
    }

    pub async fn settle(self) -> Settled<F::Output> {
        let Self { future, token } = self;

        tokio::select! {
            biased;
            _ = token.cancelled() => Settled::Cancelled,
            output = future => {
                // disposed while the response was being produced
                if token.is_cancelled() {
                    Settled::Cancelled
                } else {
                    Settled::Done(output)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_settle_without_disposal() {
        let disposer = Disposer::new();
        let settled = Request::new(async { 7 }, &disposer).settle().await;
        assert!(matches!(settled, Settled::Done(7)));
    }

    #[tokio::test]
    async fn test_disposed_before_settle() {
        let disposer = Disposer::new();
        disposer.dispose();
        let settled = Request::new(async { 7 }, &disposer).settle().await;
        assert!(matches!(settled, Settled::Cancelled));
    }

    #[tokio::test]
    async fn test_disposed_while_pending() {
        let disposer = Disposer::new();
        let request = Request::new(std::future::pending::<u8>(), &disposer);

        let (settled, ()) = tokio::join!(request.settle(), async {
            tokio::task::yield_now().await;
            disposer.dispose();
        });
        assert!(matches!(settled, Settled::Cancelled));
    }

    #[test]
    fn test_dispose_is_idempotent() {
        let disposer = Disposer::new();
        let clone = disposer.clone();
        disposer.dispose();
        clone.dispose();
        assert!(disposer.is_disposed());
        assert!(clone.is_disposed());
    }
}
