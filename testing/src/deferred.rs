//! Operations settled imperatively from the test body.

use futures::FutureExt;
use futures::future::BoxFuture;
use tokio::sync::oneshot;

/// Settles the operation returned alongside it by [`deferred`]
///
/// Dropping the resolver without settling leaves the operation pending
/// forever.
#[derive(Debug)]
pub struct Resolver<T, E> {
    tx: oneshot::Sender<Result<T, E>>,
}

impl<T, E> Resolver<T, E> {
    /// Settle with a success value
    pub fn resolve(self, data: T) {
        self.settle(Ok(data));
    }

    /// Settle with a failure value
    pub fn reject(self, error: E) {
        self.settle(Err(error));
    }

    /// Settle with an outcome
    pub fn settle(self, outcome: Result<T, E>) {
        // Nobody is waiting if the operation was dropped
        let _ = self.tx.send(outcome);
    }
}

/// Create an operation and the resolver that settles it
///
/// # Example
///
/// ```
/// # tokio_test::block_on(async {
/// use async_lifecycle_testing::deferred;
///
/// let (operation, resolver) = deferred::<u32, String>();
/// resolver.resolve(3);
/// assert_eq!(operation.await, Ok(3));
/// # });
/// ```
#[must_use]
pub fn deferred<T, E>() -> (BoxFuture<'static, Result<T, E>>, Resolver<T, E>)
where
    T: Send + 'static,
    E: Send + 'static,
{
    let (tx, rx) = oneshot::channel();
    let operation = async move {
        match rx.await {
            Ok(outcome) => outcome,
            Err(_) => std::future::pending().await,
        }
    }
    .boxed();

    (operation, Resolver { tx })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::{assert_pending, assert_ready_eq};

    #[test]
    fn test_pending_until_settled() {
        let (operation, resolver) = deferred::<u8, u8>();
        let mut operation = tokio_test::task::spawn(operation);

        assert_pending!(operation.poll());
        resolver.reject(4);

        assert!(operation.is_woken());
        assert_ready_eq!(operation.poll(), Err(4));
    }

    #[test]
    fn test_dropped_resolver_stays_pending() {
        let (operation, resolver) = deferred::<u8, u8>();
        let mut operation = tokio_test::task::spawn(operation);

        drop(resolver);

        assert_pending!(operation.poll());
    }
}
